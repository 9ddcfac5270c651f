//! Configuration loader with layered merging.

use super::merge::merge_layers;
use super::types::Config;
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable naming an explicit config file.
pub const ENV_CONFIG_PATH: &str = "TODO_TRACKER_CONFIG_PATH";
pub const ENV_DB_PATH: &str = "TODO_TRACKER_DB_PATH";
pub const ENV_HOST: &str = "TODO_TRACKER_HOST";
pub const ENV_PORT: &str = "TODO_TRACKER_PORT";
/// Plain `PORT`, honored for platforms that inject it.
pub const ENV_PORT_PLAIN: &str = "PORT";
pub const ENV_SERVER_URL: &str = "TODO_TRACKER_SERVER_URL";

/// Locations of the file layers.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// `~/.todo-tracker/config.yaml`
    pub user_file: Option<PathBuf>,
    /// `./todo-tracker.yaml`
    pub project_file: Option<PathBuf>,
    /// `--config` or `TODO_TRACKER_CONFIG_PATH`; must exist when set.
    pub explicit_file: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover the standard locations.
    pub fn discover(explicit: Option<PathBuf>) -> Self {
        let explicit_file = explicit.or_else(|| std::env::var(ENV_CONFIG_PATH).ok().map(PathBuf::from));
        Self {
            user_file: dirs::home_dir().map(|h| h.join(".todo-tracker").join("config.yaml")),
            project_file: Some(PathBuf::from("todo-tracker.yaml")),
            explicit_file,
        }
    }
}

/// Loads a [`Config`] from defaults, files and the environment.
///
/// Precedence, lowest first: built-in defaults, user file, project file,
/// explicit file, environment variables.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: Config,
    /// Files that contributed to the result, lowest precedence first.
    sources: Vec<PathBuf>,
}

impl ConfigLoader {
    /// Load using the standard locations and the process environment.
    pub fn load(explicit: Option<PathBuf>) -> Result<Self> {
        Self::load_with(ConfigPaths::discover(explicit), |key| std::env::var(key).ok())
    }

    /// Load with explicit paths and an environment lookup.
    pub fn load_with<F>(paths: ConfigPaths, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut layers: Vec<Value> = vec![serde_json::to_value(Config::default())?];
        let mut sources = Vec::new();

        for path in [&paths.user_file, &paths.project_file].into_iter().flatten() {
            if !path.exists() {
                continue;
            }
            match read_layer(path) {
                Ok(layer) => {
                    layers.push(layer);
                    sources.push(path.clone());
                }
                Err(e) => warn!(path = %path.display(), error = %e, "Ignoring unreadable config file"),
            }
        }

        // An explicit file that cannot be read is an error, not a fallback.
        if let Some(path) = &paths.explicit_file {
            layers.push(read_layer(path)?);
            sources.push(path.clone());
        }

        let mut config: Config = serde_json::from_value(merge_layers(layers))
            .context("invalid configuration")?;
        apply_env_overrides(&mut config, env)?;

        debug!(sources = ?sources, "Configuration loaded");

        Ok(Self {
            config,
            sources,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get mutable access for CLI overrides.
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn into_config(self) -> Config {
        self.config
    }

    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }
}

fn read_layer(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    let value: Value = serde_yaml::from_str(&content)
        .with_context(|| format!("parsing config file {}", path.display()))?;
    Ok(value)
}

/// Apply environment variable overrides to config.
fn apply_env_overrides<F>(config: &mut Config, env: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(db_path) = env(ENV_DB_PATH) {
        config.server.db_path = PathBuf::from(db_path);
    }

    if let Some(host) = env(ENV_HOST) {
        config.server.host = host;
    }

    // The prefixed variable wins over plain PORT.
    if let Some(port) = env(ENV_PORT).or_else(|| env(ENV_PORT_PLAIN)) {
        config.server.port = port
            .parse()
            .with_context(|| format!("invalid port: {}", port))?;
    }

    if let Some(url) = env(ENV_SERVER_URL) {
        config.client.server_url = url;
    }

    Ok(())
}
