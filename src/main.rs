use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cheflink_api::{app, config::AppConfig, database::Store, AppState};

/// ChefLink marketplace API server
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Port to listen on (overrides PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Address to bind
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0")]
    bind: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DB_USER, DB_PASS, ACCESS_TOKEN_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .init();

    let args = Args::parse();

    let mut config = AppConfig::from_env();
    if let Some(port) = args.port {
        config.port = port;
    }
    config.validate().context("invalid configuration")?;
    tracing::info!("Starting ChefLink API in {:?} mode", config.environment);

    let uri = config.database.connection_string()?;
    let store = Store::connect(&uri, &config.database.name)
        .await
        .context("failed to create MongoDB client")?;

    match store.health_check().await {
        Ok(()) => tracing::info!("Pinged your deployment. Connected to MongoDB"),
        Err(e) => tracing::warn!("MongoDB ping failed, continuing: {}", e),
    }

    let bind_addr = format!("{}:{}", args.bind, config.port);
    let app = app(AppState::new(store, config));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("ChefLink server running on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
