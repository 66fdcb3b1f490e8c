use crate::domain::model::{EnrichedRecord, ExternalSummary, LocalRecord, ENRICHED_FIELDS};

/// Combine a local record with the selected summary, field by field.
///
/// - extract: the summary's, when non-empty
/// - image: the summary's, else the local image
/// - canonical link: the summary's, when present
///
/// Catalog attributes that collide with the enriched field names are dropped.
pub fn merge(mut local: LocalRecord, summary: Option<&ExternalSummary>) -> EnrichedRecord {
    for field in ENRICHED_FIELDS {
        local.extra.remove(field);
    }

    let extract_text = summary
        .and_then(|s| s.extract_text.as_deref())
        .filter(|text| !text.trim().is_empty())
        .map(str::to_string);

    let image_url = summary
        .and_then(|s| s.image_url.as_deref())
        .filter(|url| !url.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| local.image.clone());

    let canonical_url = summary
        .and_then(|s| s.canonical_url.as_deref())
        .filter(|url| !url.trim().is_empty())
        .map(str::to_string);

    EnrichedRecord {
        local,
        extract_text,
        image_url,
        canonical_url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::fixtures::{record, summary};

    #[test]
    fn test_merge_full_summary() {
        let local = record(1, "Otter", "Lutra lutra");
        let s = summary(
            Some("The Eurasian otter is a semiaquatic mammal."),
            Some("https://upload.example/otter.jpg"),
            Some("https://en.wikipedia.org/wiki/Eurasian_otter"),
        );

        let enriched = merge(local.clone(), Some(&s));

        assert_eq!(enriched.local, local);
        assert_eq!(
            enriched.extract_text.as_deref(),
            Some("The Eurasian otter is a semiaquatic mammal.")
        );
        assert_eq!(enriched.image_url, "https://upload.example/otter.jpg");
        assert_eq!(
            enriched.canonical_url.as_deref(),
            Some("https://en.wikipedia.org/wiki/Eurasian_otter")
        );
    }

    #[test]
    fn test_merge_without_summary_keeps_local_image() {
        let enriched = merge(record(2, "Badger", "Meles meles"), None);

        assert!(enriched.extract_text.is_none());
        assert!(enriched.canonical_url.is_none());
        assert_eq!(enriched.image_url, "/images/2.jpg");
    }

    #[test]
    fn test_merge_image_only_summary() {
        let s = summary(None, Some("https://upload.example/hare.jpg"), None);
        let enriched = merge(record(3, "Mountain Hare", "Lepus timidus"), Some(&s));

        assert!(enriched.extract_text.is_none());
        assert_eq!(enriched.image_url, "https://upload.example/hare.jpg");
    }

    #[test]
    fn test_merge_ignores_empty_fields() {
        let s = summary(Some(""), Some(""), Some(""));
        let enriched = merge(record(4, "Pine Marten", "Martes martes"), Some(&s));

        assert!(enriched.extract_text.is_none());
        assert!(enriched.canonical_url.is_none());
        assert_eq!(enriched.image_url, "/images/4.jpg");
    }

    #[test]
    fn test_enriched_values_replace_colliding_catalog_keys() {
        let mut local = record(5, "Otter", "Lutra lutra");
        local.extra.insert("wikipediaImage".to_string(), "/stale.jpg".into());
        local.extra.insert("wikipediaUrl".to_string(), "https://stale".into());
        local.extra.insert("habitat".to_string(), "Riverbank".into());
        let s = summary(Some("Otters swim."), Some("https://upload.example/otter.jpg"), None);

        let enriched = merge(local, Some(&s));
        let json = serde_json::to_string(&enriched).unwrap();

        assert_eq!(json.matches("\"wikipediaImage\"").count(), 1);
        assert!(!json.contains("wikipediaUrl"));
        assert!(!json.contains("/stale.jpg"));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["wikipediaImage"], "https://upload.example/otter.jpg");
        assert_eq!(value["habitat"], "Riverbank");
    }
}
