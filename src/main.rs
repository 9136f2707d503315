use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use iptv_harvest::app::logging::log_file_appender;
use iptv_harvest::app::AppContext;
use iptv_harvest::cli::{commands, Cli};
use iptv_harvest::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing: stdout plus <root>/logs/scraper.log
    let log_dir = cli.root.clone().unwrap_or_else(|| PathBuf::from(".")).join("logs");
    let (file_writer, _log_guard) = tracing_appender::non_blocking(log_file_appender(&log_dir)?);
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(fmt::layer().with_writer(file_writer).with_ansi(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    config.apply_env();
    cli.apply_to(&mut config);

    let ctx = AppContext::new(config, cli.proxy)?;
    commands::harvest(&ctx, &cli).await?;

    Ok(())
}
