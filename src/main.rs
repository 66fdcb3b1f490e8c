use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use wildlife_enrich::adapters::export::write_batch;
use wildlife_enrich::utils::error::ErrorSeverity;
use wildlife_enrich::utils::{logger, validation::Validate};
use wildlife_enrich::{build_engine, CliConfig, EnrichError};

async fn run(cli: &CliConfig) -> Result<usize, EnrichError> {
    let config = cli.common.load_config()?;
    config.validate()?;
    tracing::debug!("Effective config: {:?}", config);

    let engine = build_engine(&config)?;
    let records = engine.run().await?;

    let out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    write_batch(&records, cli.format, out)?;

    Ok(records.len())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.common.verbose);
    tracing::info!("Starting wildlife-enrich");

    match run(&cli).await {
        Ok(count) => {
            tracing::info!("✅ Enriched {} records", count);
            if let Some(path) = &cli.output {
                tracing::info!("📁 Output saved to: {}", path.display());
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("❌ Enrichment failed: {} (Severity: {:?})", e, e.severity());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }
}
