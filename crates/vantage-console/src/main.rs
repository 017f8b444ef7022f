use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use vantage_console::{execute, Cli, ConsoleConfig};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let source = ConsoleConfig::resolve_path(cli.config.as_deref());
    let config = ConsoleConfig::load(source.as_deref()).context("loading console configuration")?;

    // RUST_LOG wins over --log-level, which wins over the config file.
    let level = cli.log_level.as_deref().unwrap_or_else(|| config.log_level());
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .with_context(|| format!("invalid log filter '{level}'"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    match &source {
        Some(path) => {
            tracing::info!(path = %path.display(), overrides = config.reports.len(), "configuration loaded")
        }
        None => tracing::info!("no configuration file, using defaults"),
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(&cli, &config, &mut out)
}
