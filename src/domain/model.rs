use serde::{Deserialize, Deserializer};

/// GitHub release payload, reduced to the fields the card needs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Release {
    #[serde(default, deserialize_with = "null_as_default")]
    pub tag_name: String,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub assets: Vec<Asset>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Asset {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub size: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub browser_download_url: String,
}

impl Release {
    /// 只有第一個 asset 會被做成卡片
    pub fn primary_asset(&self) -> Option<&Asset> {
        self.assets.first()
    }

    /// 優先使用發佈時間，草稿沒有 published_at 時退回建立時間
    pub fn release_date(&self) -> Option<&str> {
        self.published_at.as_deref().or(self.created_at.as_deref())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Front-matter OS classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OsKey {
    Windows,
    Mac,
    Linux,
}

impl OsKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            OsKey::Windows => "windows",
            OsKey::Mac => "mac",
            OsKey::Linux => "linux",
        }
    }
}

impl std::fmt::Display for OsKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-OS front-matter values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OsMeta {
    pub name: &'static str,
    pub shortname: &'static str,
    pub compatibility: &'static str,
    pub key: &'static str,
    pub order: u8,
    pub icon: &'static str,
}

/// Everything needed to render one installer card and name its file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallerCard {
    pub layout: String,
    pub name: String,
    pub shortname: String,
    pub compatibility: String,
    pub key: String,
    pub card_type: String,
    pub version: String,
    pub date: String,
    pub order: u8,
    pub icon: String,
    pub size: String,
    pub organization: String,
    pub organization_link: String,
    pub download_link: String,
    pub product_name: String,
    pub os_slug: String,
}

impl InstallerCard {
    pub fn file_name(&self) -> String {
        format!("{}_{}.md", self.version, self.os_slug)
    }

    pub fn render(&self) -> String {
        // `image:` 後面的空白與 `date:` 後的三個空白是網站既有卡片的格式，保持一致
        format!(
            r#"---
layout: {layout}
name: "{name}"
shortname: "{shortname}"
compatibility: "{compatibility}"
key: {key}
type: {card_type}
image: 
version: {version}
date:   {date}
order: {order}
icon: {icon}
size: {size}

organization: {organization}
organization-link: {organization_link}
download-link: {download_link}
---
{version} release of {product_name}.
"#,
            layout = self.layout,
            name = self.name,
            shortname = self.shortname,
            compatibility = self.compatibility,
            key = self.key,
            card_type = self.card_type,
            version = self.version,
            date = self.date,
            order = self.order,
            icon = self.icon,
            size = self.size,
            organization = self.organization,
            organization_link = self.organization_link,
            download_link = self.download_link,
            product_name = self.product_name,
        )
    }
}
