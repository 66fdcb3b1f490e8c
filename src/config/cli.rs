use super::toml_config::AppConfig;
use crate::adapters::export::OutputFormat;
use crate::utils::error::Result;
use clap::{Args, Parser};
use std::path::PathBuf;

/// Flags shared by both binaries; each one overrides the config file.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory holding wildlife.json and events.json
    #[arg(long)]
    pub data_dir: Option<String>,

    /// Summary endpoint; the lookup name is appended as a path segment
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Maximum simultaneous outbound fetches
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Overall batch deadline in seconds (0 disables it)
    #[arg(long)]
    pub deadline_seconds: Option<u64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CommonArgs {
    /// Config file (or defaults) with command line overrides applied.
    pub fn load_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };

        if let Some(data_dir) = &self.data_dir {
            config.catalog.data_dir = data_dir.clone();
        }
        if let Some(endpoint) = &self.endpoint {
            config.source.endpoint = endpoint.clone();
        }
        if let Some(concurrency) = self.concurrency {
            config.enrichment.concurrency = concurrency;
        }
        if let Some(deadline) = self.deadline_seconds {
            config.enrichment.deadline_seconds = deadline;
        }

        Ok(config)
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "wildlife-enrich")]
#[command(about = "Enrich the wildlife catalog with encyclopedic summaries")]
pub struct CliConfig {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Output format: json or csv
    #[arg(long, default_value = "json")]
    pub format: OutputFormat,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "wildlife-serve")]
#[command(about = "Serve the enriched wildlife catalog over HTTP")]
pub struct ServeConfig {
    #[command(flatten)]
    pub common: CommonArgs,

    #[arg(long)]
    pub host: Option<String>,

    #[arg(long)]
    pub port: Option<u16>,
}

impl ServeConfig {
    pub fn load_config(&self) -> Result<AppConfig> {
        let mut config = self.common.load_config()?;
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let cli = CliConfig::parse_from([
            "wildlife-enrich",
            "--data-dir",
            "/tmp/catalog",
            "--concurrency",
            "3",
            "--deadline-seconds",
            "0",
            "--format",
            "csv",
        ]);

        let config = cli.common.load_config().unwrap();
        assert_eq!(config.catalog.data_dir, "/tmp/catalog");
        assert_eq!(config.enrichment.concurrency, 3);
        assert_eq!(config.enrichment.deadline_seconds, 0);
        assert_eq!(cli.format, OutputFormat::Csv);
    }

    #[test]
    fn test_serve_flags() {
        let serve = ServeConfig::parse_from(["wildlife-serve", "--port", "8081", "-v"]);

        let config = serve.load_config().unwrap();
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.server.host, "127.0.0.1");
        assert!(serve.common.verbose);
    }
}
