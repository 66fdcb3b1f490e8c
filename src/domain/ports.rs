use crate::domain::model::{LocalRecord, SummaryLookup};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Source of curated records. Failing here is the only thing that aborts a batch.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn load_wildlife(&self) -> Result<Vec<LocalRecord>>;
    async fn load_events(&self) -> Result<Vec<serde_json::Value>>;
}

/// A single external lookup by name.
///
/// Implementations never fail: transport errors, non-2xx responses and
/// unusable payloads all come back as [`SummaryLookup::NotFound`].
#[async_trait]
pub trait SummarySource: Send + Sync {
    async fn fetch(&self, key: &str) -> SummaryLookup;
}

pub trait ConfigProvider: Send + Sync {
    fn summary_endpoint(&self) -> &str;
    fn user_agent(&self) -> &str;
    fn request_timeout(&self) -> Duration;
    fn concurrency(&self) -> usize;
    /// Overall batch deadline, `None` when disabled.
    fn batch_deadline(&self) -> Option<Duration>;
    fn data_dir(&self) -> &str;
}
