use clap::Parser;

/// Player statistics store and head-to-head comparison service
#[derive(Parser, Debug, Clone)]
#[command(name = "player-compare", version, about)]
pub struct Config {
    /// HTTP listen address
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8080")]
    pub listen_addr: String,

    /// SQLite database path
    #[arg(long, env = "DATABASE_PATH", default_value = "players.db")]
    pub database_path: String,

    /// Insert a few sample players when the table is empty
    #[arg(long, env = "SEED_DEMO", default_value = "false")]
    pub seed_demo: bool,

    /// Emit logs as JSON lines instead of human-readable text
    #[arg(long, env = "LOG_JSON", default_value = "false")]
    pub log_json: bool,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.listen_addr.parse::<std::net::SocketAddr>().is_err() {
            anyhow::bail!("listen_addr must be a socket address like 0.0.0.0:8080");
        }
        if self.database_path.trim().is_empty() {
            anyhow::bail!("database_path must not be empty");
        }
        Ok(())
    }
}
