use crate::domain::model::Release;
use crate::utils::error::{CardError, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Client;
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Which release to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseSelector<'a> {
    Latest,
    Tag(&'a str),
}

impl<'a> From<Option<&'a str>> for ReleaseSelector<'a> {
    fn from(tag: Option<&'a str>) -> Self {
        match tag {
            Some(tag) if !tag.trim().is_empty() => ReleaseSelector::Tag(tag),
            _ => ReleaseSelector::Latest,
        }
    }
}

/// Minimal GitHub releases client.
#[derive(Debug, Clone)]
pub struct ReleaseClient {
    client: Client,
    api_base: Url,
}

impl ReleaseClient {
    pub fn new(api_base: &str, token: Option<&str>, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
                CardError::InvalidConfigValueError {
                    field: "token".to_string(),
                    value: "<redacted>".to_string(),
                    reason: "Token contains characters not allowed in an HTTP header".to_string(),
                }
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            api_base: Url::parse(api_base)?,
        })
    }

    /// `<base>/repos/<org>/<repo>/releases/latest` or `.../releases/tags/<tag>`.
    pub fn release_url(&self, org: &str, repo: &str, selector: ReleaseSelector<'_>) -> Result<Url> {
        let mut url = self.api_base.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| CardError::ConfigError {
                message: format!("API base '{}' cannot be used as a base URL", self.api_base),
            })?;
            segments.pop_if_empty().extend(["repos", org, repo, "releases"]);
            match selector {
                ReleaseSelector::Latest => {
                    segments.push("latest");
                }
                ReleaseSelector::Tag(tag) => {
                    segments.extend(["tags", tag]);
                }
            }
        }
        Ok(url)
    }

    pub async fn fetch_release(
        &self,
        org: &str,
        repo: &str,
        selector: ReleaseSelector<'_>,
    ) -> Result<Release> {
        let url = self.release_url(org, repo, selector)?;
        tracing::debug!("Making API request to: {}", url);

        let response = self.client.get(url).send().await?;
        tracing::debug!("API response status: {}", response.status());

        // 先取 body 再解析，解碼失敗歸類為資料錯誤而非網路錯誤
        let body = response.error_for_status()?.text().await?;
        let release: Release = serde_json::from_str(&body)?;
        tracing::debug!(
            "Fetched release '{}' with {} asset(s)",
            release.tag_name,
            release.assets.len()
        );
        Ok(release)
    }
}
