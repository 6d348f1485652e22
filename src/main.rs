//! DRAFTBOARD — Fantasy stock/crypto draft leaderboard dashboard.
//!
//! Entry point. Loads configuration, initialises structured logging,
//! wires up the pick store and price provider, and serves the dashboard
//! until shutdown.

use anyhow::{anyhow, Context, Result};
use chrono_tz::Tz;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use draftboard::config;
use draftboard::dashboard;
use draftboard::dashboard::routes::DashboardState;
use draftboard::picks::PickStore;
use draftboard::provider::yahoo::YahooClient;

const BANNER: &str = r#"
 ____  ____      _    _____ _____ ____   ___    _    ____  ____
|  _ \|  _ \    / \  |  ___|_   _| __ ) / _ \  / \  |  _ \|  _ \
| | | | |_) |  / _ \ | |_    | | |  _ \| | | |/ _ \ | |_) | | | |
| |_| |  _ <  / ___ \|  _|   | | | |_) | |_| / ___ \|  _ <| |_| |
|____/|_| \_\/_/   \_\_|     |_| |____/ \___/_/   \_\_| \_\____/

  Fantasy Draft Order Tracker
  v0.1.0
"#;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    // Load configuration from TOML
    let cfg = config::AppConfig::load("config.toml")?;

    // Initialise structured logging
    init_logging();

    println!("{BANNER}");
    info!(
        port = cfg.dashboard.port,
        picks_file = %cfg.picks.file,
        time_zone = %cfg.display.time_zone,
        "DRAFTBOARD starting up"
    );

    let tz: Tz = cfg
        .display
        .time_zone
        .parse()
        .map_err(|e| anyhow!("invalid display time zone: {e}"))?;

    let provider = YahooClient::new(
        cfg.provider.base_url.clone(),
        Duration::from_secs(cfg.provider.timeout_secs),
    )?;

    let state = Arc::new(DashboardState::new(
        PickStore::new(&cfg.picks.file),
        Box::new(provider),
        tz,
        cfg.dashboard.title.clone(),
    ));

    let app = dashboard::build_router(state);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], cfg.dashboard.port));

    info!(port = cfg.dashboard.port, "Serving dashboard on http://localhost:{}", cfg.dashboard.port);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind dashboard port {}", cfg.dashboard.port))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("dashboard server error")?;

    info!("DRAFTBOARD shut down cleanly.");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received.");
    }
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("draftboard=info"));

    let json_logging = std::env::var("DRAFTBOARD_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    } else {
        fmt().with_env_filter(env_filter).with_target(true).init();
    }
}
