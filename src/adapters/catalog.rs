use crate::domain::model::LocalRecord;
use crate::domain::ports::Catalog;
use crate::utils::error::{EnrichError, Result};
use crate::utils::validation::Validate;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::path::PathBuf;

pub const WILDLIFE_FILE: &str = "wildlife.json";
pub const EVENTS_FILE: &str = "events.json";

impl Validate for LocalRecord {
    fn validate(&self) -> Result<()> {
        if self.common_name.trim().is_empty() && self.scientific_name.trim().is_empty() {
            return Err(EnrichError::ValidationError {
                message: format!("record {} has neither a name nor a scientific name", self.id),
            });
        }
        if self.image.trim().is_empty() {
            return Err(EnrichError::ValidationError {
                message: format!("record {} has no local image", self.id),
            });
        }
        Ok(())
    }
}

/// Catalog backed by JSON files in a data directory.
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    base_path: PathBuf,
}

impl JsonFileCatalog {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    async fn read_array<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>> {
        let full_path = self.base_path.join(file);
        tracing::debug!("Reading catalog file {}", full_path.display());

        let contents = tokio::fs::read(&full_path)
            .await
            .map_err(|e| EnrichError::catalog(format!("{}: {}", full_path.display(), e)))?;

        serde_json::from_slice(&contents)
            .map_err(|e| EnrichError::catalog(format!("{}: {}", full_path.display(), e)))
    }
}

/// Every record must validate and ids must be unique.
pub fn validate_records(records: &[LocalRecord]) -> Result<()> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        record.validate()?;
        if !seen.insert(record.id) {
            return Err(EnrichError::ValidationError {
                message: format!("duplicate record id {}", record.id),
            });
        }
    }
    Ok(())
}

#[async_trait]
impl Catalog for JsonFileCatalog {
    async fn load_wildlife(&self) -> Result<Vec<LocalRecord>> {
        let records: Vec<LocalRecord> = self.read_array(WILDLIFE_FILE).await?;
        validate_records(&records).map_err(|e| EnrichError::catalog(e.to_string()))?;
        Ok(records)
    }

    async fn load_events(&self) -> Result<Vec<serde_json::Value>> {
        self.read_array(EVENTS_FILE).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const WILDLIFE: &str = r#"[
        {"id": 1, "name": "Red Squirrel", "scientificName": "Sciurus vulgaris", "category": "Mammal",
         "conservationStatus": "Near Threatened", "sponsorshipCost": 25, "image": "/images/squirrel.jpg",
         "currentResidents": 3},
        {"id": 2, "name": "Golden Eagle", "scientificName": "Aquila chrysaetos", "category": "Bird",
         "conservationStatus": "Least Concern", "sponsorshipCost": 40.5, "image": "/images/eagle.jpg",
         "currentResidents": 1}
    ]"#;

    fn catalog_with(files: &[(&str, &str)]) -> (TempDir, JsonFileCatalog) {
        let dir = TempDir::new().unwrap();
        for (name, contents) in files {
            std::fs::write(dir.path().join(name), contents).unwrap();
        }
        let catalog = JsonFileCatalog::new(dir.path());
        (dir, catalog)
    }

    #[tokio::test]
    async fn test_load_wildlife_in_file_order() {
        let (_dir, catalog) = catalog_with(&[(WILDLIFE_FILE, WILDLIFE)]);

        let records = catalog.load_wildlife().await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].common_name, "Red Squirrel");
        assert_eq!(records[1].scientific_name, "Aquila chrysaetos");
        assert_eq!(records[1].sponsorship_cost, 40.5);
    }

    #[tokio::test]
    async fn test_missing_file_is_catalog_unavailable() {
        let (_dir, catalog) = catalog_with(&[]);

        let err = catalog.load_wildlife().await.unwrap_err();
        assert!(matches!(err, EnrichError::CatalogUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_malformed_file_is_catalog_unavailable() {
        let (_dir, catalog) = catalog_with(&[(WILDLIFE_FILE, "{\"not\": \"an array\"}")]);

        let err = catalog.load_wildlife().await.unwrap_err();
        assert!(matches!(err, EnrichError::CatalogUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_record_without_image_rejected() {
        let json = r#"[{"id": 1, "name": "Stoat", "scientificName": "Mustela erminea", "category": "Mammal",
            "conservationStatus": "Least Concern", "sponsorshipCost": 10, "image": "",
            "currentResidents": 1}]"#;
        let (_dir, catalog) = catalog_with(&[(WILDLIFE_FILE, json)]);

        let err = catalog.load_wildlife().await.unwrap_err();
        assert!(err.to_string().contains("no local image"));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let records: Vec<LocalRecord> = serde_json::from_str(WILDLIFE).unwrap();
        let mut doubled = records.clone();
        doubled.push(records[0].clone());

        assert!(validate_records(&records).is_ok());
        assert!(validate_records(&doubled).is_err());
    }

    #[tokio::test]
    async fn test_events_pass_through() {
        let events = r#"[{"id": 1, "title": "Hedgehog Awareness Day", "date": "2025-05-04"}]"#;
        let (_dir, catalog) = catalog_with(&[(EVENTS_FILE, events)]);

        let loaded = catalog.load_events().await.unwrap();
        assert_eq!(loaded[0]["title"], "Hedgehog Awareness Day");
        assert_eq!(loaded[0]["date"], "2025-05-04");
    }
}
