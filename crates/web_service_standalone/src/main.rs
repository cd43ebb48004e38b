use std::path::PathBuf;

use anyhow::{anyhow, Context};
use clap::Parser;
use ide_core::Config;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "omniglot-server", about = "Omniglot IDE backend")]
struct Cli {
    /// Port to listen on. Overrides APP_PORT and the config file.
    #[arg(long)]
    port: Option<u16>,

    /// Read configuration from this file instead of the default locations.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            let mut config = Config::load_from(path)
                .with_context(|| format!("loading {}", path.display()))?;
            config.apply_env(|key| std::env::var(key).ok());
            config
        }
        None => Config::new(),
    };
    if let Some(port) = cli.port {
        config.port = port;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_line_number(true)
                .with_file(false),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    tracing::info!(
        port = config.port,
        chat_provider = %config.chat_provider,
        debug_provider = %config.debug_provider,
        history = config.history.is_configured(),
        "Starting Omniglot IDE backend"
    );

    web_service::run(config)
        .await
        .map_err(|e| anyhow!("Failed to run web service: {e}"))
}
