use crate::adapters::http::{ReleaseClient, ReleaseSelector};
use crate::domain::model::{InstallerCard, OsKey, Release};
use crate::domain::ports::{ConfigProvider, Pipeline, SiteConfig, Storage};
use crate::domain::services::{
    format_date, infer_os_for_frontmatter, os_meta, os_slug_from_tag, size_mb, version_from_tag,
};
use crate::utils::error::{CardError, Result};
use std::time::Duration;

pub struct CardPipeline<S: Storage, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
    pub(crate) client: ReleaseClient,
}

impl<S: Storage, C: ConfigProvider> CardPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let client = ReleaseClient::new(
            config.api_base(),
            config.token(),
            Duration::from_secs(config.timeout_seconds()),
        )?;
        Ok(Self {
            storage,
            config,
            client,
        })
    }
}

/// Builds the card from a fetched release. Fails when the release has nothing to download.
pub fn build_card(release: &Release, site: &SiteConfig) -> Result<InstallerCard> {
    let asset = release.primary_asset().ok_or_else(|| CardError::NoAssets {
        tag: release.tag_name.clone(),
    })?;
    if release.assets.len() > 1 {
        tracing::debug!(
            "Release '{}' has {} assets, using '{}'",
            release.tag_name,
            release.assets.len(),
            asset.name
        );
    }

    let tag = release.tag_name.as_str();

    // 檔名只看 tag；front-matter 的 OS 另外參考 asset 副檔名
    let version = version_from_tag(tag);
    let os_slug = os_slug_from_tag(tag);
    let os_key = infer_os_for_frontmatter(tag, &asset.name);
    let meta = os_meta(os_key);
    tracing::debug!(
        "Tag '{}' -> version {}, slug {}, front-matter OS {}",
        tag,
        version,
        os_slug,
        os_key
    );

    let date = release
        .release_date()
        .ok_or_else(|| CardError::DateError {
            message: format!(
                "release '{}' has neither published_at nor created_at",
                tag
            ),
        })
        .and_then(format_date)?;

    let compatibility = match os_key {
        OsKey::Windows => site.compatibility.windows.as_deref(),
        OsKey::Mac => site.compatibility.mac.as_deref(),
        OsKey::Linux => site.compatibility.linux.as_deref(),
    }
    .unwrap_or(meta.compatibility);

    Ok(InstallerCard {
        layout: site.layout.clone(),
        name: meta.name.to_string(),
        shortname: meta.shortname.to_string(),
        compatibility: compatibility.to_string(),
        key: meta.key.to_string(),
        card_type: site.card_type.clone(),
        version,
        date,
        order: meta.order,
        icon: meta.icon.to_string(),
        size: size_mb(asset.size),
        organization: site.organization.clone(),
        organization_link: site.organization_link.clone(),
        download_link: asset.browser_download_url.clone(),
        product_name: site.product_name.clone(),
        os_slug: os_slug.to_string(),
    })
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for CardPipeline<S, C> {
    async fn extract(&self) -> Result<Release> {
        let selector = ReleaseSelector::from(self.config.release_tag());
        match selector {
            ReleaseSelector::Latest => tracing::info!(
                "Fetching latest release of {}/{}",
                self.config.org(),
                self.config.repo()
            ),
            ReleaseSelector::Tag(tag) => tracing::info!(
                "Fetching release '{}' of {}/{}",
                tag,
                self.config.org(),
                self.config.repo()
            ),
        }

        self.client
            .fetch_release(self.config.org(), self.config.repo(), selector)
            .await
    }

    async fn transform(&self, release: Release) -> Result<InstallerCard> {
        build_card(&release, self.config.site())
    }

    async fn load(&self, card: InstallerCard) -> Result<String> {
        let file_name = card.file_name();
        let markdown = card.render();

        tracing::debug!(
            "Writing {} ({} bytes) to {}",
            file_name,
            markdown.len(),
            self.config.dest_dir()
        );
        let path = self
            .storage
            .write_file(&file_name, markdown.as_bytes())
            .await?;

        tracing::debug!("Card saved successfully");
        Ok(path)
    }
}
