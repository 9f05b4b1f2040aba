use anyhow::{Context, Result};
use clap::Parser;
use mini_radar::config::{validate_config, ConfigLoader, DEFAULT_CONFIG_FILE};
use mini_radar::game::maps;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mini-radar")]
#[command(version, about = "External 2-D radar for Counter-Strike 2")]
struct Args {
    /// Configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Map to project onto, overriding `display.default_map`
    #[arg(short, long)]
    map: Option<String>,

    /// Print the known maps and exit
    #[arg(long)]
    list_maps: bool,

    /// Write every frame to stdout as one JSON line
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.list_maps {
        for name in maps::known_maps() {
            println!("{}", name);
        }
        return Ok(());
    }

    let mut config = ConfigLoader::new(&args.config)
        .load_or_default()
        .with_context(|| format!("Failed to load {}", args.config.display()))?;
    if let Some(map) = args.map {
        config.display.default_map = map;
    }

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    validate_config(&config)?;
    info!("Starting Mini-Radar v{}", mini_radar::core::VERSION);

    #[cfg(windows)]
    return radar::run(mini_radar::process::platform_backend(), config, args.json).await;

    #[cfg(not(windows))]
    anyhow::bail!("Mini-Radar only supports Windows");
}

#[cfg(windows)]
mod radar {
    use anyhow::Result;
    use mini_radar::config::Config;
    use mini_radar::poller::{self, Poller};
    use mini_radar::process::ProcessBackend;
    use tracing::{info, warn};

    /// Poll in the background and follow frames until Ctrl+C
    pub async fn run<B>(backend: B, config: Config, json: bool) -> Result<()>
    where
        B: ProcessBackend + Send + 'static,
        B::Process: Send,
    {
        let handle = poller::spawn(Poller::new(backend, &config))?;
        let mut frames = handle.subscribe();
        let mut connected = false;

        info!("Mini-Radar ready. Press Ctrl+C to exit.");
        loop {
            tokio::select! {
                changed = frames.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let frame = frames.borrow_and_update().clone();
                    if frame.connected != connected {
                        connected = frame.connected;
                        if connected {
                            info!("Tracking players on {}", frame.map_name);
                        } else {
                            warn!("Target lost, waiting for it to come back");
                        }
                    }
                    if json {
                        println!("{}", serde_json::to_string(&*frame)?);
                    }
                }
                result = tokio::signal::ctrl_c() => {
                    result?;
                    info!("Shutting down");
                    break;
                }
            }
        }

        tokio::task::spawn_blocking(move || handle.shutdown()).await?;
        Ok(())
    }
}
