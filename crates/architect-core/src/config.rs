//! Gateway and logging configuration
//!
//! Everything here is explicit, passed-in state: the binary builds these
//! structs once at process start and threads them down. The log file guard
//! returned by the subscriber setup lives until process exit.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Gateway configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub bind: BindMode,
}

fn default_port() -> u16 {
    8000
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind: BindMode::default(),
        }
    }
}

/// Bind mode for the gateway
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BindMode {
    Loopback,
    #[default]
    Lan,
}

impl BindMode {
    pub fn to_addr(&self) -> &str {
        match self {
            BindMode::Loopback => "127.0.0.1",
            BindMode::Lan => "0.0.0.0",
        }
    }
}

/// Log sink configuration: console stream always, file append optional.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LogConfig {
    /// Level filter applied when RUST_LOG is unset.
    #[serde(default = "default_level")]
    pub level: String,
    /// Append one line per record to this file in addition to the console.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            file: None,
        }
    }
}
