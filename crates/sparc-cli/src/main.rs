use clap::Parser;
use eyre::Result;
use tracing_subscriber::EnvFilter;

use sparc_cli::cli::Cli;
use sparc_cli::commands;
use sparc_cli::config::{self, LogFormat, SparcConfig};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => config::default_config_path()?,
    };
    let loaded = config::read_config(&config_path)?;
    let config = loaded.config;
    init_tracing(&config);
    if let Some(from) = loaded.migrated_from {
        tracing::info!(
            path = %config_path.display(),
            from,
            to = config::CURRENT_VERSION,
            "migrated config on load"
        );
    }

    let output = commands::run(cli.command, &config, &config_path).await?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

/// `RUST_LOG` wins over the configured level; an unparseable level falls
/// back to `info`. Logs go to stderr so command output stays pipeable.
fn init_tracing(config: &SparcConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match config.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}
