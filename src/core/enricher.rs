use crate::core::cache::{CacheStats, SummaryCache};
use crate::core::fallback::resolve_keys;
use crate::core::merge::merge;
use crate::domain::model::{EnrichedRecord, LocalRecord, SummaryLookup};
use crate::domain::ports::SummarySource;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::Instant;

pub const DEFAULT_CONCURRENCY: usize = 8;

/// Fans enrichment out over a batch with a cap on simultaneous outbound fetches.
///
/// Cloning is cheap and clones share the same cache and fetch permits.
#[derive(Clone)]
pub struct Enricher {
    source: Arc<dyn SummarySource>,
    cache: Arc<SummaryCache>,
    permits: Arc<Semaphore>,
}

impl Enricher {
    pub fn new(source: Arc<dyn SummarySource>, concurrency: usize) -> Self {
        Self::with_cache(source, Arc::new(SummaryCache::new()), concurrency)
    }

    pub fn with_cache(
        source: Arc<dyn SummarySource>,
        cache: Arc<SummaryCache>,
        concurrency: usize,
    ) -> Self {
        Self {
            source,
            cache,
            permits: Arc::new(Semaphore::new(concurrency.max(1))),
        }
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Enrich a batch, preserving length and order.
    ///
    /// Every record yields exactly one output. Records whose lookup has not
    /// finished when `deadline` elapses are emitted with local fields only.
    pub async fn enrich(
        &self,
        records: Vec<LocalRecord>,
        deadline: Option<Duration>,
    ) -> Vec<EnrichedRecord> {
        let started = Instant::now();
        let total = records.len();
        let mut selected: Vec<Option<SummaryLookup>> = vec![None; total];
        let mut tasks = JoinSet::new();

        for (index, record) in records.iter().enumerate() {
            let enricher = self.clone();
            let record = record.clone();
            tasks.spawn(async move { (index, enricher.lookup_record(&record).await) });
        }

        let collect = async {
            while let Some(joined) = tasks.join_next().await {
                match joined {
                    Ok((index, lookup)) => selected[index] = Some(lookup),
                    Err(e) => tracing::warn!("enrichment task failed: {}", e),
                }
            }
        };

        match deadline {
            Some(limit) => {
                if tokio::time::timeout(limit, collect).await.is_err() {
                    tasks.abort_all();
                    keep_finished(&mut tasks, &mut selected);
                    tracing::warn!(
                        "batch deadline of {:?} reached, {} record(s) left unenriched",
                        limit,
                        selected.iter().filter(|lookup| lookup.is_none()).count()
                    );
                }
            }
            None => collect.await,
        }

        let enriched: Vec<EnrichedRecord> = records
            .into_iter()
            .zip(selected)
            .map(|(record, lookup)| {
                let summary = lookup.and_then(SummaryLookup::into_summary);
                merge(record, summary.as_ref())
            })
            .collect();

        let stats = self.cache.stats();
        tracing::info!(
            cache_entries = stats.entries,
            cache_hits = stats.hits,
            cache_misses = stats.misses,
            cache_expired = stats.expired,
            cache_coalesced = stats.coalesced,
            "enriched {}/{} records in {:?}",
            enriched.iter().filter(|r| r.is_enriched()).count(),
            total,
            started.elapsed()
        );

        enriched
    }

    /// Walk the record's keys until one yields extract text; otherwise keep
    /// the last result, which may still carry an image.
    async fn lookup_record(&self, record: &LocalRecord) -> SummaryLookup {
        let mut last = SummaryLookup::NotFound;

        for key in resolve_keys(record) {
            last = self.lookup_key(&key).await;
            if last.has_extract() {
                break;
            }
            tracing::debug!(id = record.id, key = %key, "no extract, trying next key");
        }

        last
    }

    async fn lookup_key(&self, key: &str) -> SummaryLookup {
        let source = Arc::clone(&self.source);
        let permits = Arc::clone(&self.permits);

        self.cache
            .get_or_fetch(key, || async move {
                // Only the outbound call holds a permit; hits never wait.
                let _permit = match permits.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => return SummaryLookup::NotFound,
                };
                source.fetch(key).await
            })
            .await
    }
}

/// Record lookups whose tasks completed but were never joined.
fn keep_finished(
    tasks: &mut JoinSet<(usize, SummaryLookup)>,
    selected: &mut [Option<SummaryLookup>],
) -> usize {
    let mut kept = 0;
    while let Some(joined) = tasks.try_join_next() {
        if let Ok((index, lookup)) = joined {
            selected[index] = Some(lookup);
            kept += 1;
        }
    }
    kept
}
