pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, ServeConfig};

pub use crate::adapters::catalog::JsonFileCatalog;
pub use crate::adapters::summary_client::WikipediaClient;
pub use crate::config::AppConfig;
pub use crate::core::{engine::EnrichmentEngine, enricher::Enricher};
pub use crate::domain::model::{EnrichedRecord, ExternalSummary, LocalRecord, SummaryLookup};
pub use crate::utils::error::{EnrichError, Result};

use crate::domain::ports::ConfigProvider;
use std::sync::Arc;

/// Wire the default collaborators (JSON catalog, HTTP summary client) into an engine.
pub fn build_engine<C: ConfigProvider + ?Sized>(config: &C) -> Result<EnrichmentEngine> {
    let client = WikipediaClient::from_config(config)?;
    let enricher = Enricher::new(Arc::new(client), config.concurrency());
    let catalog = JsonFileCatalog::new(config.data_dir());
    Ok(EnrichmentEngine::new(
        Arc::new(catalog),
        enricher,
        config.batch_deadline(),
    ))
}
