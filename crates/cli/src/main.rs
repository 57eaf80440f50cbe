mod channel_commands;
mod config_commands;
mod sink;

use std::path::PathBuf;

use {
    anyhow::Context,
    clap::{Parser, Subcommand},
    tracing::{debug, info},
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

use switchboard_config::SwitchboardConfig;

#[derive(Parser)]
#[command(name = "switchboard", about = "Switchboard: Discord adapter for message chains")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,

    /// Config file to load instead of searching the standard locations.
    #[arg(long, global = true, env = "SWITCHBOARD_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect every configured Discord account and print inbound messages.
    Run,
    /// Send one message chain to a channel over REST.
    Send(channel_commands::SendArgs),
    /// Load the config and report each Discord account.
    CheckConfig,
}

fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if cli.json_logs {
        registry
            .with(fmt::layer().json().with_target(true).with_thread_ids(false))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_ansi(true),
            )
            .init();
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<SwitchboardConfig> {
    match &cli.config {
        Some(path) => switchboard_config::load_config(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => {
            if let Some(path) = switchboard_config::find_config_file() {
                debug!(path = %path.display(), "using discovered config");
            }
            Ok(switchboard_config::discover_and_load())
        },
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_telemetry(&cli);

    info!(version = env!("CARGO_PKG_VERSION"), "switchboard starting");

    let config = load_config(&cli)?;
    match cli.command {
        Commands::Run => channel_commands::run(config).await,
        Commands::Send(args) => channel_commands::send(config, args).await,
        Commands::CheckConfig => config_commands::check_config(&config),
    }
}
