use crate::core::cache::CacheStats;
use crate::core::enricher::Enricher;
use crate::domain::model::EnrichedRecord;
use crate::domain::ports::Catalog;
use crate::utils::error::{EnrichError, Result};
use std::sync::Arc;
use std::time::Duration;

/// Catalog load followed by one enrichment pass.
///
/// Catalog failure is the only error that aborts a run; everything that goes
/// wrong on the summary side degrades into records with fewer fields.
#[derive(Clone)]
pub struct EnrichmentEngine {
    catalog: Arc<dyn Catalog>,
    enricher: Enricher,
    deadline: Option<Duration>,
}

impl EnrichmentEngine {
    pub fn new(catalog: Arc<dyn Catalog>, enricher: Enricher, deadline: Option<Duration>) -> Self {
        Self {
            catalog,
            enricher,
            deadline,
        }
    }

    pub async fn run(&self) -> Result<Vec<EnrichedRecord>> {
        tracing::info!("Loading wildlife catalog...");
        let records = self.catalog.load_wildlife().await.map_err(|e| {
            tracing::error!("Error reading wildlife data: {}", e);
            match e {
                EnrichError::CatalogUnavailable { .. } => e,
                other => EnrichError::catalog(other.to_string()),
            }
        })?;
        tracing::info!("Loaded {} wildlife records", records.len());

        Ok(self.enricher.enrich(records, self.deadline).await)
    }

    pub async fn events(&self) -> Result<Vec<serde_json::Value>> {
        self.catalog.load_events().await.map_err(|e| {
            tracing::error!("Error reading events data: {}", e);
            match e {
                EnrichError::CatalogUnavailable { .. } => e,
                other => EnrichError::catalog(other.to_string()),
            }
        })
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.enricher.cache_stats()
    }
}
