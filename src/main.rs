use std::net::IpAddr;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pocket_code_api::{
    config::{AppConfig, Environment},
    router, server, AppState,
};

#[derive(Parser, Debug)]
#[command(name = "pocket-code-api", version, about = "Pocket Code user management API")]
struct Args {
    #[arg(long, help = "Address to bind (overrides HOST)")]
    host: Option<IpAddr>,

    #[arg(short, long, help = "Port to listen on (overrides PORT)")]
    port: Option<u16>,

    #[arg(long, help = "Environment file to load instead of ./.env")]
    env_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load .env before reading configuration; absence is not an error
    let env_loaded = match &args.env_file {
        Some(path) => dotenvy::from_path(path).map(|_| path.clone()),
        None => dotenvy::dotenv(),
    };

    // Subscriber goes up before configuration parsing so override warnings are visible
    let environment = Environment::from_app_env(std::env::var("APP_ENV").ok().as_deref());
    let default_level = if environment == Environment::Development { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    match env_loaded {
        Ok(path) => tracing::info!("Loaded environment from {}", path.display()),
        Err(e) => tracing::warn!("No environment file loaded ({}), using process environment", e),
    }

    let mut config = AppConfig::from_env();
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    tracing::info!(
        "Starting Pocket Code API in {:?} mode (users auth: {:?})",
        config.environment,
        config.security.users_auth
    );

    let state = AppState::from_config(&config);
    let app = router(&config, state);

    server::serve(app, config.server.bind_addr()).await
}
