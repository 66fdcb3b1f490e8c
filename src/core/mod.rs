pub mod cache;
pub mod engine;
pub mod enricher;
pub mod fallback;
pub mod merge;

pub use crate::domain::model::{EnrichedRecord, ExternalSummary, LocalRecord, SummaryLookup};
pub use crate::domain::ports::{Catalog, ConfigProvider, SummarySource};
pub use crate::utils::error::Result;
