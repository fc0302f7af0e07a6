//! Server settings read from the environment.

use std::net::{AddrParseError, SocketAddr};

use thiserror::Error;

pub const BIND_VAR: &str = "PIER_BIND";
pub const EXPORT_STEP_VAR: &str = "PIER_EXPORT_STEP";
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var}: invalid socket address '{value}': {source}")]
    InvalidBind {
        var: &'static str,
        value: String,
        #[source]
        source: AddrParseError,
    },

    #[error("{var}: expected true/false, got '{value}'")]
    InvalidFlag { var: &'static str, value: String },
}

/// Errors that stop the server from starting or serving.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    /// Whether `POST /export/step` builds B-rep models.
    pub export_step: bool,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read settings through `lookup`; unset variables take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_text = lookup(BIND_VAR).unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind_text
            .trim()
            .parse::<SocketAddr>()
            .map_err(|source| ConfigError::InvalidBind {
                var: BIND_VAR,
                value: bind_text.clone(),
                source,
            })?;

        let export_step = match lookup(EXPORT_STEP_VAR) {
            None => true,
            Some(value) => parse_flag(&value).ok_or(ConfigError::InvalidFlag {
                var: EXPORT_STEP_VAR,
                value,
            })?,
        };

        Ok(Self { bind, export_step })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
