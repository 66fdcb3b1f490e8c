use serde::{Deserialize, Serialize};

/// A curated animal record as it comes out of the catalog.
///
/// Attributes the catalog carries beyond the typed fields are kept in
/// `extra` and written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalRecord {
    pub id: u64,
    #[serde(rename = "name")]
    pub common_name: String,
    pub scientific_name: String,
    pub category: String,
    pub conservation_status: String,
    pub sponsorship_cost: f64,
    pub image: String,
    pub current_residents: u32,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Normalized content of one external summary page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalSummary {
    pub extract_text: Option<String>,
    pub image_url: Option<String>,
    pub canonical_url: Option<String>,
}

impl ExternalSummary {
    pub fn has_extract(&self) -> bool {
        self.extract_text
            .as_deref()
            .is_some_and(|text| !text.trim().is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.extract_text.is_none() && self.image_url.is_none() && self.canonical_url.is_none()
    }
}

/// Outcome of a single lookup against the summary source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryLookup {
    Found(ExternalSummary),
    NotFound,
}

impl SummaryLookup {
    /// True when this result carries non-empty extract text, which is what
    /// stops the key fallback.
    pub fn has_extract(&self) -> bool {
        matches!(self, SummaryLookup::Found(summary) if summary.has_extract())
    }

    pub fn summary(&self) -> Option<&ExternalSummary> {
        match self {
            SummaryLookup::Found(summary) => Some(summary),
            SummaryLookup::NotFound => None,
        }
    }

    pub fn into_summary(self) -> Option<ExternalSummary> {
        match self {
            SummaryLookup::Found(summary) => Some(summary),
            SummaryLookup::NotFound => None,
        }
    }
}

impl From<Option<ExternalSummary>> for SummaryLookup {
    fn from(value: Option<ExternalSummary>) -> Self {
        match value {
            Some(summary) if !summary.is_empty() => SummaryLookup::Found(summary),
            _ => SummaryLookup::NotFound,
        }
    }
}

/// Wire names of the fields [`EnrichedRecord`] adds on top of a local record.
pub const ENRICHED_FIELDS: [&str; 3] = ["wikipediaExtract", "wikipediaImage", "wikipediaUrl"];

/// A local record plus whatever the summary source contributed.
///
/// `image_url` is always populated: it falls back to the record's own image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    #[serde(flatten)]
    pub local: LocalRecord,
    #[serde(
        rename = "wikipediaExtract",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub extract_text: Option<String>,
    #[serde(rename = "wikipediaImage")]
    pub image_url: String,
    #[serde(
        rename = "wikipediaUrl",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub canonical_url: Option<String>,
}

impl EnrichedRecord {
    pub fn id(&self) -> u64 {
        self.local.id
    }

    pub fn is_enriched(&self) -> bool {
        self.extract_text.is_some()
    }
}
