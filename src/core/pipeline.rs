use crate::core::{analytics, cleaner, filter, loader, report};
use crate::core::{catalog::HttpCatalog, enricher::Enricher};
use crate::core::{
    ConfigProvider, EnrichedRecord, EtlError, Pipeline, RawRow, Result, RunSummary, Storage,
    TransformResult,
};

pub const ENRICHED_FILE: &str = "enriched_sales.txt";
pub const REPORT_FILE: &str = "sales_report.txt";
pub const UNKNOWN_MARKER: &str = "Unknown";

pub struct SalesPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> SalesPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn filter_options(&self) -> filter::FilterOptions {
        filter::FilterOptions {
            regions: self.config.regions().map(|r| r.to_vec()),
            min_amount: self.config.min_amount(),
            max_amount: self.config.max_amount(),
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for SalesPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<RawRow>> {
        tracing::debug!("Reading input file: {}", self.config.input_path());
        let bytes = self.storage.read_file(self.config.input_path()).await?;
        let text = loader::decode_bytes(&bytes);
        loader::split_rows(&text)
    }

    async fn transform(&self, data: Vec<RawRow>) -> Result<TransformResult> {
        let outcome = cleaner::clean(data, self.config.drop_duplicates());
        tracing::info!(
            valid = outcome.summary.valid,
            rejected = outcome.summary.rejected,
            "Cleaning finished"
        );

        // Analytics runs over the filtered subset; enrichment covers every
        // validated record so no transaction is dropped from the export.
        let filtered = filter::apply(outcome.records.clone(), &self.filter_options());
        let analytics = analytics::analyze(&filtered, self.config.top_n());

        let catalog = HttpCatalog::new(self.config.api_endpoint());
        let mut enricher = Enricher::new(catalog);
        let enriched = enricher.enrich_all(outcome.records).await?;

        let summary = RunSummary {
            clean: outcome.summary,
            analyzed: filtered.len() as u64,
            enrichment_misses: enricher.misses(),
        };

        Ok(TransformResult {
            enriched,
            analytics,
            summary,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let output_path = self.config.output_path().trim_end_matches('/').to_string();

        let data = serialize_enriched(&result.enriched)?;
        let enriched_path = format!("{}/{}", output_path, ENRICHED_FILE);
        tracing::debug!("Writing enriched data to {}", enriched_path);
        self.storage.write_file(&enriched_path, &data).await?;

        // The report is written only after the data file succeeded, so a
        // failed run never leaves a report without its data.
        let report = report::render(&result.analytics, &result.summary, self.config.top_n());
        let report_path = format!("{}/{}", output_path, REPORT_FILE);
        tracing::debug!("Writing report to {}", report_path);
        self.storage
            .write_file(&report_path, report.as_bytes())
            .await?;

        Ok(output_path)
    }
}

/// One pipe-delimited line per record: the six input columns plus
/// category, brand and rating, `Unknown` in all three on a lookup miss.
fn serialize_enriched(records: &[EnrichedRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'|')
        .from_writer(Vec::new());

    writer.write_record([
        "transaction_id",
        "customer_id",
        "product_id",
        "region",
        "amount",
        "date",
        "category",
        "brand",
        "rating",
    ])?;

    for enriched in records {
        let r = &enriched.record;
        let (category, brand, rating) = match &enriched.meta {
            Some(meta) => (
                meta.category.clone(),
                meta.brand.clone(),
                meta.rating.to_string(),
            ),
            None => (
                UNKNOWN_MARKER.to_string(),
                UNKNOWN_MARKER.to_string(),
                UNKNOWN_MARKER.to_string(),
            ),
        };

        let amount = r.amount.to_string();
        let date = r.date.to_string();
        writer.write_record([
            r.transaction_id.as_str(),
            r.customer_id.as_str(),
            r.product_id.as_str(),
            r.region.as_str(),
            amount.as_str(),
            date.as_str(),
            category.as_str(),
            brand.as_str(),
            rating.as_str(),
        ])?;
    }

    writer.into_inner().map_err(|e| EtlError::ProcessingError {
        message: format!("Failed to flush enriched output: {}", e),
    })
}
