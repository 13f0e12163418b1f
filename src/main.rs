use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use club_rankings_api::{app, config::AppConfig, logging, AppState};

#[derive(Parser)]
#[command(name = "club-rankings-api")]
#[command(about = "Chess club ranking service")]
#[command(version)]
struct Args {
    #[arg(long, help = "Port to listen on (overrides CLUB_API_PORT / PORT)")]
    port: Option<u16>,

    #[arg(long, help = "Address to bind (overrides CLUB_API_HOST)")]
    host: Option<String>,

    #[arg(long, help = "Path of the roster JSON file (overrides ROSTER_PATH)")]
    roster: Option<PathBuf>,

    #[arg(long, help = "Directory of static front-end files (overrides PUBLIC_DIR)")]
    public_dir: Option<PathBuf>,
}

impl Args {
    fn apply(self, config: &mut AppConfig) {
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(roster) = self.roster {
            config.storage.roster_path = roster;
        }
        if let Some(public_dir) = self.public_dir {
            config.storage.public_dir = public_dir;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up ROSTER_PATH, PORT, etc.
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    let mut config = club_rankings_api::config::config().clone();
    args.apply(&mut config);

    logging::init(&config.logging)?;
    tracing::info!("Starting chess club rankings in {:?} mode", config.environment);

    let state = AppState::with_roster_file(&config.storage.roster_path);
    let router = app(state, &config.storage.public_dir);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!(
        roster = %config.storage.roster_path.display(),
        "Chess Club Ranking System running on http://{}",
        bind_addr
    );
    tracing::info!("Server started at {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
