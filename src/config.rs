//! Daemon settings, read from the environment

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};

pub const DEFAULT_LISTEN: &str = "127.0.0.1:6602";
pub const DEFAULT_LOG_DIR: &str = ".logs";

const LISTEN_VAR: &str = "SPOPD_LISTEN";
const LIBRARY_VAR: &str = "SPOPD_LIBRARY";
const LOG_DIR_VAR: &str = "SPOPD_LOG_DIR";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub listen: SocketAddr,
    /// JSON library to load at startup.
    pub library: Option<PathBuf>,
    pub log_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source; unset keys fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let listen_raw = lookup(LISTEN_VAR).unwrap_or_else(|| DEFAULT_LISTEN.to_string());
        let listen = listen_raw
            .parse()
            .with_context(|| format!("{} is not a socket address: {}", LISTEN_VAR, listen_raw))?;

        let library = lookup(LIBRARY_VAR)
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let log_dir = lookup(LOG_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR));

        Ok(Self {
            listen,
            library,
            log_dir,
        })
    }
}
