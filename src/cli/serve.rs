//! Serve subcommand.

use anyhow::Result;
use clap::Args;
use tracing::info;

use crate::config::Config;
use crate::db::Database;
use crate::server::start_server;

/// Arguments for the serve subcommand
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Interface to bind (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl ServeArgs {
    /// Apply CLI overrides to the loaded config.
    pub fn apply(&self, config: &mut Config) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}

/// Open the database and serve until Ctrl-C.
pub async fn run_serve(config: &Config) -> Result<()> {
    config.ensure_db_dir()?;
    let db = Database::open(&config.server.db_path)?;
    info!(path = %config.server.db_path.display(), "Database opened");

    let handle = start_server(db, config.server.bind_addr()?).await?;

    tokio::signal::ctrl_c().await?;
    info!("Received Ctrl-C");
    handle.shutdown().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_overrides_only_given_fields() {
        let mut config = Config::default();
        ServeArgs {
            host: None,
            port: Some(9999),
        }
        .apply(&mut config);
        assert_eq!(config.server.port, 9999);
        assert_eq!(config.server.host, "127.0.0.1");
    }
}
