use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use tracing::info;

mod api;
mod compare;
mod config;
mod db;

use api::AppState;
use config::Config;
use db::Database;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    // Initialise tracing / logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    if config.log_json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    config.validate()?;

    // Open database
    let db = Database::open(&config.database_path)?;
    info!("Database opened: {}", config.database_path);

    // Seed the sample roster into an empty table
    if config.seed_demo && db.count_players()? == 0 {
        for player in db::demo_players() {
            db.insert_player(&player)?;
        }
        info!("Seeded {} demo players", db.count_players()?);
    }

    let app = api::router(AppState { db });
    let addr: SocketAddr = config.listen_addr.parse()?;
    info!("Comparison service listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
