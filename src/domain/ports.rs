use crate::domain::model::{ProductMeta, RawRow, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn api_endpoint(&self) -> &str;
    fn output_path(&self) -> &str;
    fn regions(&self) -> Option<&[String]>;
    fn min_amount(&self) -> Option<Decimal>;
    fn max_amount(&self) -> Option<Decimal>;
    fn top_n(&self) -> usize;
    fn drop_duplicates(&self) -> bool;
}

/// Remote product catalog lookup. `Ok(None)` covers both "product unknown"
/// and "lookup gave up after retries"; neither aborts the run.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    async fn lookup(&self, product_id: &str) -> Result<Option<ProductMeta>>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<RawRow>>;
    async fn transform(&self, data: Vec<RawRow>) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}
