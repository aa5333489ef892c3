use crate::core::{EnrichedRecord, ProductCatalog, ProductMeta, Result, TransactionRecord};
use std::collections::HashMap;

/// Joins transactions with catalog metadata.
///
/// One remote call per distinct `product_id`; the cache lives for a single
/// run and is owned by this value. Every input record yields exactly one
/// output record, in input order, whether or not its lookup succeeded.
pub struct Enricher<C: ProductCatalog> {
    catalog: C,
    cache: HashMap<String, Option<ProductMeta>>,
    misses: u64,
}

impl<C: ProductCatalog> Enricher<C> {
    pub fn new(catalog: C) -> Self {
        Self {
            catalog,
            cache: HashMap::new(),
            misses: 0,
        }
    }

    /// Records whose product could not be resolved, counted per record.
    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub async fn enrich_all(
        &mut self,
        records: Vec<TransactionRecord>,
    ) -> Result<Vec<EnrichedRecord>> {
        let mut enriched = Vec::with_capacity(records.len());

        for record in records {
            let meta = self.lookup_cached(&record.product_id).await?;
            if meta.is_none() {
                self.misses += 1;
            }
            enriched.push(EnrichedRecord { record, meta });
        }

        Ok(enriched)
    }

    async fn lookup_cached(&mut self, product_id: &str) -> Result<Option<ProductMeta>> {
        if let Some(meta) = self.cache.get(product_id) {
            return Ok(meta.clone());
        }

        let meta = self.catalog.lookup(product_id).await?;
        self.cache.insert(product_id.to_string(), meta.clone());
        Ok(meta)
    }
}
