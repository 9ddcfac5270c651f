//! Configuration system.
//!
//! Layers, lowest precedence first:
//! 1. **Defaults** - built into [`Config::default`]
//! 2. **User** - `~/.todo-tracker/config.yaml`
//! 3. **Project** - `./todo-tracker.yaml`
//! 4. **Explicit** - `--config` or `TODO_TRACKER_CONFIG_PATH`
//! 5. **Environment** - variables below
//!
//! YAML layers are deep-merged field by field. CLI flags are applied on top
//! by the binary.
//!
//! ## Environment Variables
//! - `TODO_TRACKER_DB_PATH` - Database path
//! - `TODO_TRACKER_HOST` - Bind address
//! - `TODO_TRACKER_PORT` (or `PORT`) - Listen port
//! - `TODO_TRACKER_SERVER_URL` - Server URL for client commands

mod loader;
mod merge;
mod types;

pub use loader::{
    ConfigLoader, ConfigPaths, ENV_CONFIG_PATH, ENV_DB_PATH, ENV_HOST, ENV_PORT, ENV_PORT_PLAIN,
    ENV_SERVER_URL,
};
pub use merge::{merge_into, merge_layers};
pub use types::*;
