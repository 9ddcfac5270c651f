//! Todo Tracker Library
//!
//! A single-table todo API over SQLite, its browser UI, and a client state
//! controller that drives the API the same way the UI does.

pub mod cli;
pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod format;
pub mod logging;
pub mod server;
pub mod types;
