use crate::config::{
    validate_source, DEFAULT_API_BASE, DEFAULT_DEST_DIR, DEFAULT_ORG, DEFAULT_REPO,
    DEFAULT_TIMEOUT_SECONDS,
};
use crate::domain::ports::{ConfigProvider, SiteConfig};
use crate::utils::error::{CardError, Result};
use crate::utils::validation::{validate_path, validate_url, Validate};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub source: SourceConfig,
    pub output: OutputConfig,
    pub site: SiteConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub org: String,
    pub repo: String,
    pub api_base: String,
    pub token: Option<String>,
    pub release_tag: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            org: DEFAULT_ORG.to_string(),
            repo: DEFAULT_REPO.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            token: None,
            release_tag: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dest_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dest_dir: DEFAULT_DEST_DIR.to_string(),
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CardError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| CardError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GITHUB_TOKEN})；未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_RE
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_source(self, "source.")?;
        validate_path("output.dest_dir", &self.output.dest_dir)?;
        validate_url("site.organization_link", &self.site.organization_link)?;

        // 未替換的 ${VAR} 代表環境變數沒有設定
        if let Some(token) = &self.source.token {
            if ENV_VAR_RE.is_match(token) {
                return Err(CardError::MissingConfigError {
                    field: format!("source.token ({})", token),
                });
            }
        }

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn api_base(&self) -> &str {
        &self.source.api_base
    }

    fn org(&self) -> &str {
        &self.source.org
    }

    fn repo(&self) -> &str {
        &self.source.repo
    }

    fn token(&self) -> Option<&str> {
        self.source.token.as_deref().filter(|t| !t.is_empty())
    }

    fn release_tag(&self) -> Option<&str> {
        self.source
            .release_tag
            .as_deref()
            .filter(|t| !t.trim().is_empty())
    }

    fn dest_dir(&self) -> &str {
        &self.output.dest_dir
    }

    fn timeout_seconds(&self) -> u64 {
        self.source.timeout_seconds
    }

    fn site(&self) -> &SiteConfig {
        &self.site
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
