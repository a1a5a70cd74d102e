//! Server configuration read from the environment.
//!
//! Every setting has a default matching the stock deployment: bind
//! `0.0.0.0:5000`, artifacts under `./artifacts`, wildcard CORS origin.

use std::path::PathBuf;

use crate::adapters::fs::{COLUMNS_FILE_NAME, DEFAULT_ARTIFACT_DIR, MODEL_FILE_NAME};

pub const HOST_ENV: &str = "HOMEPRICE_HOST";
pub const PORT_ENV: &str = "HOMEPRICE_PORT";
pub const COLUMNS_FILE_ENV: &str = "HOMEPRICE_COLUMNS_FILE";
pub const MODEL_FILE_ENV: &str = "HOMEPRICE_MODEL_FILE";
pub const CORS_ORIGIN_ENV: &str = "HOMEPRICE_CORS_ORIGIN";
pub const PRELOAD_ENV: &str = "HOMEPRICE_PRELOAD";
pub const WORKERS_ENV: &str = "HOMEPRICE_WORKERS";
pub const LOG_FILE_ENV: &str = "HOMEPRICE_LOG_FILE";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_CORS_ORIGIN: &str = "*";

/// Error type for configuration parsing.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var}={value:?} is not a valid {expected}")]
    Invalid {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Snapshot of the settings the server binary consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub columns_file: PathBuf,
    pub model_file: PathBuf,
    pub cors_origin: String,
    pub preload: bool,
    /// `None` keeps actix's default (one per physical core)
    pub workers: Option<usize>,
    /// `None` logs to stdout
    pub log_file: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let dir = PathBuf::from(DEFAULT_ARTIFACT_DIR);
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            columns_file: dir.join(COLUMNS_FILE_NAME),
            model_file: dir.join(MODEL_FILE_NAME),
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
            preload: false,
            workers: None,
            log_file: None,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim() {
        "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
        "0" | "false" | "FALSE" | "no" | "NO" | "" => Some(false),
        _ => None,
    }
}

impl ServerConfig {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    /// Returns `ConfigError::Invalid` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    ///
    /// # Errors
    /// See [`ServerConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(host) = lookup(HOST_ENV) {
            cfg.host = host.trim().to_string();
        }

        if let Some(v) = lookup(PORT_ENV) {
            cfg.port = v.trim().parse().map_err(|_| ConfigError::Invalid {
                var: PORT_ENV,
                value: v.clone(),
                expected: "port number",
            })?;
        }

        if let Some(v) = lookup(COLUMNS_FILE_ENV) {
            cfg.columns_file = PathBuf::from(v.trim());
        }
        if let Some(v) = lookup(MODEL_FILE_ENV) {
            cfg.model_file = PathBuf::from(v.trim());
        }

        if let Some(v) = lookup(CORS_ORIGIN_ENV) {
            let origin = v.trim();
            if origin.is_empty() {
                return Err(ConfigError::Invalid {
                    var: CORS_ORIGIN_ENV,
                    value: v.clone(),
                    expected: "origin",
                });
            }
            cfg.cors_origin = origin.to_string();
        }

        if let Some(v) = lookup(PRELOAD_ENV) {
            cfg.preload = parse_bool(&v).ok_or_else(|| ConfigError::Invalid {
                var: PRELOAD_ENV,
                value: v.clone(),
                expected: "boolean",
            })?;
        }

        if let Some(v) = lookup(WORKERS_ENV) {
            let workers = v
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|&n| n > 0)
                .ok_or_else(|| ConfigError::Invalid {
                    var: WORKERS_ENV,
                    value: v.clone(),
                    expected: "positive worker count",
                })?;
            cfg.workers = Some(workers);
        }

        cfg.log_file = lookup(LOG_FILE_ENV)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        Ok(cfg)
    }
}
