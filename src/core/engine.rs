use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct CardEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> CardEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Extract, transform and load; returns the path of the written card.
    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting installer card generation");

        let release = self.pipeline.extract().await?;
        tracing::info!(
            "Fetched release '{}' ({} asset(s))",
            release.tag_name,
            release.assets.len()
        );

        let card = self.pipeline.transform(release).await?;
        tracing::info!("Derived card {} ({} {})", card.file_name(), card.name, card.version);

        let output_path = self.pipeline.load(card).await?;
        tracing::info!("Card saved to: {}", output_path);

        Ok(output_path)
    }

    /// Dry run: the rendered card and its file name, nothing is written.
    pub async fn preview(&self) -> Result<(String, String)> {
        let release = self.pipeline.extract().await?;
        let card = self.pipeline.transform(release).await?;
        Ok((card.file_name(), card.render()))
    }
}
