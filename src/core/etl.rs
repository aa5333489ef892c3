use crate::core::{Pipeline, Result};

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting sales analytics pipeline");

        tracing::info!("Extracting raw rows...");
        let raw_rows = self.pipeline.extract().await?;
        tracing::info!("Read {} raw rows", raw_rows.len());

        tracing::info!("Cleaning, analyzing and enriching...");
        let result = self.pipeline.transform(raw_rows).await?;
        tracing::info!(
            "Enriched {} records ({} lookup misses)",
            result.enriched.len(),
            result.summary.enrichment_misses
        );

        tracing::info!("Writing output artifacts...");
        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}
