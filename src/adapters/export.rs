use crate::domain::model::EnrichedRecord;
use crate::utils::error::{EnrichError, Result};
use std::io::Write;
use std::str::FromStr;

const CSV_HEADER: [&str; 11] = [
    "id",
    "name",
    "scientificName",
    "category",
    "conservationStatus",
    "sponsorshipCost",
    "currentResidents",
    "image",
    "wikipediaExtract",
    "wikipediaImage",
    "wikipediaUrl",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = EnrichError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(EnrichError::InvalidConfigValueError {
                field: "format".to_string(),
                value: other.to_string(),
                reason: "Unsupported format. Valid formats: json, csv".to_string(),
            }),
        }
    }
}

pub fn write_batch<W: Write>(records: &[EnrichedRecord], format: OutputFormat, out: W) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(records, out),
        OutputFormat::Csv => write_csv(records, out),
    }
}

fn write_json<W: Write>(records: &[EnrichedRecord], mut out: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, records)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

// Extra catalog attributes are JSON-only; CSV keeps a fixed column set.
fn write_csv<W: Write>(records: &[EnrichedRecord], out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(CSV_HEADER)?;

    for record in records {
        let local = &record.local;
        writer.write_record([
            local.id.to_string(),
            local.common_name.clone(),
            local.scientific_name.clone(),
            local.category.clone(),
            local.conservation_status.clone(),
            local.sponsorship_cost.to_string(),
            local.current_residents.to_string(),
            local.image.clone(),
            record.extract_text.clone().unwrap_or_default(),
            record.image_url.clone(),
            record.canonical_url.clone().unwrap_or_default(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
