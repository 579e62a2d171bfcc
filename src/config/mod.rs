pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path_segment, validate_range, validate_url};

pub use crate::adapters::http::DEFAULT_API_BASE;

pub const DEFAULT_ORG: &str = "ManiVaultStudio";
pub const DEFAULT_REPO: &str = "Releases";
pub const DEFAULT_DEST_DIR: &str = "_installers";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const MAX_TIMEOUT_SECONDS: u64 = 300;

/// Settings shared by every config source.
pub(crate) fn validate_source(config: &impl ConfigProvider, prefix: &str) -> Result<()> {
    let field = |name: &str| format!("{}{}", prefix, name);

    validate_url(&field("api_base"), config.api_base())?;
    validate_path_segment(&field("org"), config.org())?;
    validate_path_segment(&field("repo"), config.repo())?;
    validate_range(
        &field("timeout_seconds"),
        config.timeout_seconds(),
        1,
        MAX_TIMEOUT_SECONDS,
    )?;
    Ok(())
}

#[cfg(feature = "cli")]
use crate::domain::ports::SiteConfig;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_path, Validate};
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "installer-card")]
#[command(about = "Generate an installer card for the website from a GitHub release")]
#[command(version)]
pub struct CliConfig {
    /// GitHub organization owning the releases repository
    #[arg(long, env = "ORG", default_value = DEFAULT_ORG)]
    pub org: String,

    /// Repository the releases are published in
    #[arg(long, env = "REPO", default_value = DEFAULT_REPO)]
    pub repo: String,

    /// Bearer token for the GitHub REST API
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Exact release tag; the latest release is used when unset
    #[arg(long, env = "RELEASE_TAG")]
    pub release_tag: Option<String>,

    /// Directory the card is written to
    #[arg(long, env = "DEST_DIR", default_value = DEFAULT_DEST_DIR)]
    pub dest_dir: String,

    /// GitHub REST API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Request deadline in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECONDS)]
    pub timeout_seconds: u64,

    /// TOML configuration file; replaces all other settings when given
    #[arg(short, long)]
    pub config: Option<String>,

    /// Print the card instead of writing it
    #[arg(long)]
    pub dry_run: bool,

    /// Log format: compact or json
    #[arg(long, default_value = "compact", value_parser = ["compact", "json"])]
    pub log_format: String,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(skip)]
    pub site: SiteConfig,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn api_base(&self) -> &str {
        &self.api_base
    }

    fn org(&self) -> &str {
        &self.org
    }

    fn repo(&self) -> &str {
        &self.repo
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    fn release_tag(&self) -> Option<&str> {
        self.release_tag.as_deref().filter(|t| !t.trim().is_empty())
    }

    fn dest_dir(&self) -> &str {
        &self.dest_dir
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn site(&self) -> &SiteConfig {
        &self.site
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_source(self, "")?;
        validate_path("dest_dir", &self.dest_dir)?;
        tracing::debug!("CLI configuration validation passed");
        Ok(())
    }
}
