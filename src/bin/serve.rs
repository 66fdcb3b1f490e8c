use anyhow::Context;
use clap::Parser;
use wildlife_enrich::adapters::http::{serve, AppState};
use wildlife_enrich::utils::{logger, validation::Validate};
use wildlife_enrich::{build_engine, ServeConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = ServeConfig::parse();
    logger::init_server_logger(args.common.verbose);

    let config = args.load_config().context("failed to load configuration")?;
    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        anyhow::bail!("{}: {}", e.user_friendly_message(), e.recovery_suggestion());
    }

    let addr = config.server_addr().await?;
    let engine = build_engine(&config)?;
    tracing::info!(
        data_dir = %config.catalog.data_dir,
        concurrency = config.enrichment.concurrency,
        "Starting wildlife-serve"
    );

    serve(AppState::new(engine), addr)
        .await
        .context("HTTP server stopped")?;
    Ok(())
}
