//! Service configuration from command-line flags and environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use thiserror::Error;

/// Which record store backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    /// Process memory; records are lost on exit.
    Memory,
    /// Process memory mirrored to a snapshot file.
    File,
}

/// Configuration errors found after parsing.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid listen address {addr:?}: {reason}")]
    InvalidAddr { addr: String, reason: String },
}

/// Movie info service configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "movies-info-service", version, about = "Movie info CRUD service")]
pub struct ServiceConfig {
    /// Address to listen on.
    #[arg(long, env = "MOVIES_INFO_ADDR", default_value = "0.0.0.0:8080")]
    pub addr: String,

    /// Record store backend.
    #[arg(long, env = "MOVIES_INFO_STORE", value_enum, default_value_t = StoreKind::Memory)]
    pub store: StoreKind,

    /// Snapshot file used by the `file` store.
    #[arg(long, env = "MOVIES_INFO_DATA_FILE", default_value = "movie_infos.bin")]
    pub data_file: PathBuf,

    /// Log filter directive (e.g. `info,movies_info_service=debug`).
    /// Falls back to `RUST_LOG`, then `info`.
    #[arg(long, env = "MOVIES_INFO_LOG")]
    pub log_filter: Option<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:8080".to_string(),
            store: StoreKind::Memory,
            data_file: PathBuf::from("movie_infos.bin"),
            log_filter: None,
        }
    }
}

impl ServiceConfig {
    /// Check values clap cannot check on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.addr
            .parse::<SocketAddr>()
            .map(|_| ())
            .map_err(|e| ConfigError::InvalidAddr {
                addr: self.addr.clone(),
                reason: e.to_string(),
            })
    }
}
