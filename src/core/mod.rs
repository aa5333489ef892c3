pub mod analytics;
pub mod catalog;
pub mod cleaner;
pub mod enricher;
pub mod etl;
pub mod filter;
pub mod loader;
pub mod pipeline;
pub mod report;

pub use crate::domain::model::{
    AnalyticsResult, CleanOutcome, CleanSummary, CustomerStats, EnrichedRecord, ProductMeta,
    RawRow, RejectReason, RunSummary, TransactionRecord, TransformResult,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, ProductCatalog, Storage};
pub use crate::utils::error::{EtlError, Result};
