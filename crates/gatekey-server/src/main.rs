//! Gatekey server binary.
//!
//! # Usage
//!
//! ```bash
//! # Secrets come from the environment, never compiled in
//! GATEKEY_APP_ID=1789528352 GATEKEY_SECRET=... gatekey-server --bind 0.0.0.0:8080
//! ```

use clap::Parser;
use gatekey_server::{IssuerConfig, router};
use tokio::net::TcpListener;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Gatekey session token server
#[derive(Parser)]
#[command(name = "gatekey-server")]
#[command(about = "HTTP endpoint issuing session join tokens")]
#[command(version)]
struct Args {
    /// Address to bind to
    #[arg(short, long, default_value = "0.0.0.0:8080")]
    bind: String,

    /// Application ID issued tokens are scoped to
    #[arg(long, env = "GATEKEY_APP_ID")]
    app_id: i64,

    /// Shared secret (64 hex characters or a 16/24/32-byte passphrase)
    #[arg(long, env = "GATEKEY_SECRET", hide_env_values = true)]
    secret: String,

    /// Token lifetime in seconds
    #[arg(long, env = "GATEKEY_TOKEN_TTL", default_value = "3600")]
    ttl: i64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    let config =
        IssuerConfig { app_id: args.app_id, secret: args.secret, ttl_seconds: args.ttl };

    tracing::info!(app_id = config.app_id, ttl = config.ttl_seconds, "gatekey server starting");

    let app = router(config);
    let listener = TcpListener::bind(&args.bind).await?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
