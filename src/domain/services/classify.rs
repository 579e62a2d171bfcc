use crate::domain::model::{OsKey, OsMeta};
use regex::Regex;
use std::sync::LazyLock;

static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+\.\d+(?:\.\d+)?)").expect("version pattern is valid"));
static UBUNTU_24_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ubuntu[-_\s]?24").expect("ubuntu 24 pattern is valid"));
static UBUNTU_22_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ubuntu[-_\s]?22").expect("ubuntu 22 pattern is valid"));

const WINDOWS_EXTENSIONS: &[&str] = &[".exe", ".msi"];
const MAC_EXTENSIONS: &[&str] = &[".dmg", ".pkg"];
const LINUX_EXTENSIONS: &[&str] = &[".appimage", ".deb", ".tar.gz", ".tgz"];

/// Extracts the first `x.y` or `x.y.z` version from a tag, normalised to `x.y.z`.
///
/// ```
/// use installer_card::domain::services::version_from_tag;
///
/// assert_eq!(version_from_tag("ManiVault_1.3_online_Windows"), "1.3.0");
/// assert_eq!(version_from_tag("ManiVault-1.3.0-Ubuntu-24"), "1.3.0");
/// assert_eq!(version_from_tag("nightly"), "0.0.0");
/// ```
pub fn version_from_tag(tag: &str) -> String {
    match VERSION_RE.find(tag) {
        Some(m) => {
            let version = m.as_str();
            if version.matches('.').count() == 2 {
                version.to_string()
            } else {
                format!("{}.0", version)
            }
        }
        None => "0.0.0".to_string(),
    }
}

/// Filename slug from the tag alone. Ubuntu releases are matched before generic linux.
pub fn os_slug_from_tag(tag: &str) -> &'static str {
    let t = tag.to_lowercase();
    if UBUNTU_24_RE.is_match(&t) {
        "ubuntu_24"
    } else if UBUNTU_22_RE.is_match(&t) {
        "ubuntu_22"
    } else if t.contains("windows") {
        "windows"
    } else if t.contains("mac") {
        // "mac" 已涵蓋 "macos"
        "macos"
    } else if t.contains("linux") {
        "linux"
    } else {
        "windows"
    }
}

/// Front-matter OS from the asset extension first, then from words in the tag or asset name.
pub fn infer_os_for_frontmatter(tag: &str, asset_name: &str) -> OsKey {
    let asset = asset_name.to_lowercase();
    if let Some(key) = os_from_extension(&asset) {
        return key;
    }

    let hay = format!("{} {}", tag.to_lowercase(), asset);
    if hay.contains("windows") {
        OsKey::Windows
    } else if hay.contains("mac") {
        OsKey::Mac
    } else if hay.contains("linux") || hay.contains("ubuntu") {
        OsKey::Linux
    } else {
        OsKey::Windows
    }
}

fn os_from_extension(asset: &str) -> Option<OsKey> {
    let has_any = |exts: &[&str]| exts.iter().any(|ext| asset.ends_with(ext));
    if has_any(WINDOWS_EXTENSIONS) {
        Some(OsKey::Windows)
    } else if has_any(MAC_EXTENSIONS) {
        Some(OsKey::Mac)
    } else if has_any(LINUX_EXTENSIONS) {
        Some(OsKey::Linux)
    } else {
        None
    }
}

pub fn os_meta(key: OsKey) -> OsMeta {
    match key {
        OsKey::Windows => OsMeta {
            name: "Windows",
            shortname: "Windows",
            compatibility: "Windows 10, 11",
            key: "windows",
            order: 1,
            icon: "windows",
        },
        OsKey::Mac => OsMeta {
            name: "macOS",
            shortname: "macOS",
            compatibility: "macOS 12+ (Apple & Intel)",
            key: "mac",
            order: 2,
            icon: "apple",
        },
        OsKey::Linux => OsMeta {
            name: "Linux",
            shortname: "Linux",
            compatibility: "Ubuntu 22.04+",
            key: "linux",
            order: 3,
            icon: "linux",
        },
    }
}
