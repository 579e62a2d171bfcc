use crate::domain::model::{InstallerCard, Release};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::Deserialize;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base(&self) -> &str;
    fn org(&self) -> &str;
    fn repo(&self) -> &str;
    fn token(&self) -> Option<&str>;
    fn release_tag(&self) -> Option<&str>;
    fn dest_dir(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn site(&self) -> &SiteConfig;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Release>;
    async fn transform(&self, release: Release) -> Result<InstallerCard>;
    async fn load(&self, card: InstallerCard) -> Result<String>;
}

/// 網站端固定的 front-matter 值
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub layout: String,
    pub organization: String,
    pub organization_link: String,
    pub product_name: String,
    pub card_type: String,
    pub compatibility: CompatibilityOverrides,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            layout: "plugin".to_string(),
            organization: "ManiVault".to_string(),
            organization_link: "https://www.manivault.studio".to_string(),
            product_name: "ManiVault Studio".to_string(),
            card_type: "installer".to_string(),
            compatibility: CompatibilityOverrides::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CompatibilityOverrides {
    pub windows: Option<String>,
    pub mac: Option<String>,
    pub linux: Option<String>,
}
