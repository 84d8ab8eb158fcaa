use std::{fs, path::Path};

use accord_common::Result;
use serde::{Deserialize, Serialize};

use crate::cli::Args;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_PEER_TIMEOUT_SECS: u64 = 3;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub peers: Vec<String>,
    #[serde(default = "default_peer_timeout")]
    pub peer_timeout_secs: u64,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_peer_timeout() -> u64 {
    DEFAULT_PEER_TIMEOUT_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            peers: Vec::new(),
            peer_timeout_secs: DEFAULT_PEER_TIMEOUT_SECS,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Merges CLI arguments over an optional config file. Flags given on
    /// the command line win; anything unset falls back to the file, then
    /// to the defaults.
    pub fn resolve(args: &Args) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };

        if let Some(port) = args.port {
            config.port = port;
        }
        if !args.peers.is_empty() {
            config.peers = args.peers.clone();
        }
        if let Some(secs) = args.peer_timeout_secs {
            config.peer_timeout_secs = secs;
        }

        Ok(config)
    }
}
