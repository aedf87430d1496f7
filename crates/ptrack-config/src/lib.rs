//! Configuration management for the ptrack system.
//!
//! This crate loads `ptrack.toml` / `ptrack.yaml` files and `PTRACK_*`
//! environment variables into a typed [`PtrackConfig`](config::PtrackConfig).

pub mod config;

pub use config::{ConfigError, PtrackConfig, load_config};
