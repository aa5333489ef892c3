use crate::core::{EtlError, ProductCatalog, ProductMeta, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_ATTEMPTS: u32 = 3;
const RETRY_DELAY: Duration = Duration::from_millis(200);

/// HTTP client for the remote product catalog.
///
/// Lookup failure is a normal outcome: a 404 means the product is unknown,
/// and transport errors or server errors exhaust a bounded retry budget
/// before degrading to `None`. No failure here ever aborts the run.
pub struct HttpCatalog {
    client: Client,
    base_url: String,
}

impl HttpCatalog {
    pub fn new(base_url: &str) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn fetch_once(&self, product_id: &str) -> Result<Option<ProductMeta>> {
        let url = format!("{}/{}", self.base_url, product_id);
        tracing::debug!(%url, "Requesting product metadata");

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(EtlError::ProcessingError {
                message: format!("Catalog returned status {} for {}", status, product_id),
            });
        }

        let meta: ProductMeta = response.json().await?;
        Ok(Some(meta))
    }
}

#[async_trait]
impl ProductCatalog for HttpCatalog {
    async fn lookup(&self, product_id: &str) -> Result<Option<ProductMeta>> {
        for attempt in 1..=MAX_ATTEMPTS {
            match self.fetch_once(product_id).await {
                Ok(meta) => return Ok(meta),
                Err(e) if attempt < MAX_ATTEMPTS => {
                    tracing::warn!(
                        product_id,
                        attempt,
                        error = %e,
                        "Catalog lookup failed, retrying"
                    );
                    tokio::time::sleep(RETRY_DELAY).await;
                }
                Err(e) => {
                    tracing::warn!(
                        product_id,
                        error = %e,
                        "Catalog lookup failed after {} attempts, marking unknown",
                        MAX_ATTEMPTS
                    );
                    return Ok(None);
                }
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_lookup_success() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/products/P001");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "category": "Electronics",
                    "brand": "Acme",
                    "rating": 4.5
                }));
        });

        let catalog = HttpCatalog::new(&server.url("/products"));
        let meta = catalog.lookup("P001").await.unwrap().unwrap();

        mock.assert();
        assert_eq!(meta.category, "Electronics");
        assert_eq!(meta.brand, "Acme");
        assert_eq!(meta.rating, 4.5);
    }

    #[tokio::test]
    async fn test_lookup_not_found_returns_none_without_retry() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/products/P404");
            then.status(404);
        });

        let catalog = HttpCatalog::new(&server.url("/products"));
        let meta = catalog.lookup("P404").await.unwrap();

        assert_eq!(mock.hits(), 1);
        assert!(meta.is_none());
    }

    #[tokio::test]
    async fn test_lookup_server_error_retries_then_degrades() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/products/P500");
            then.status(500);
        });

        let catalog = HttpCatalog::new(&server.url("/products"));
        let meta = catalog.lookup("P500").await.unwrap();

        assert_eq!(mock.hits(), MAX_ATTEMPTS as usize);
        assert!(meta.is_none());
    }

    #[tokio::test]
    async fn test_base_url_trailing_slash_normalized() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/products/P001");
            then.status(404);
        });

        let catalog = HttpCatalog::new(&format!("{}/", server.url("/products")));
        let _ = catalog.lookup("P001").await.unwrap();
        mock.assert();
    }
}
