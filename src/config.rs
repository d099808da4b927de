// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment once at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `DATA_DIR` | Directory holding the project database | `./data` |
//! | `OWNER_PRIVATE_KEY` | Hex secp256k1 signing key | Required unless a key file is set |
//! | `OWNER_PRIVATE_KEY_FILE` | PEM signing key path (SEC1 or PKCS#8) | Optional |
//! | `TLS_CERT_PATH` | PEM certificate chain for HTTPS | Optional |
//! | `TLS_KEY_PATH` | PEM private key for HTTPS | Optional |
//! | `RATE_LIMIT_WINDOW_SECS` | Rate-limit window length | `900` |
//! | `RATE_LIMIT_MAX_REQUESTS` | Requests allowed per window per client | `100` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::{
    fmt,
    net::{IpAddr, SocketAddr},
    path::PathBuf,
    time::Duration,
};

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";

/// Environment variable name for the data directory path.
///
/// The project database file is created inside this directory.
pub const DATA_DIR_ENV: &str = "DATA_DIR";

/// Hex-encoded owner key used for every issued signature.
pub const OWNER_PRIVATE_KEY_ENV: &str = "OWNER_PRIVATE_KEY";

/// Path to a PEM owner key. Takes precedence over [`OWNER_PRIVATE_KEY_ENV`].
pub const OWNER_PRIVATE_KEY_FILE_ENV: &str = "OWNER_PRIVATE_KEY_FILE";

pub const TLS_CERT_PATH_ENV: &str = "TLS_CERT_PATH";
pub const TLS_KEY_PATH_ENV: &str = "TLS_KEY_PATH";
pub const RATE_LIMIT_WINDOW_SECS_ENV: &str = "RATE_LIMIT_WINDOW_SECS";
pub const RATE_LIMIT_MAX_REQUESTS_ENV: &str = "RATE_LIMIT_MAX_REQUESTS";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_RATE_LIMIT_WINDOW_SECS: u64 = 15 * 60;
pub const DEFAULT_RATE_LIMIT_MAX_REQUESTS: u32 = 100;

/// Default `RUST_LOG` filter when the variable is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{name} has invalid value {value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("TLS_CERT_PATH and TLS_KEY_PATH must be set together")]
    IncompleteTls,
}

/// Where the owner signing key comes from.
#[derive(Clone, PartialEq, Eq)]
pub enum OwnerKeySource {
    Hex(String),
    PemFile(PathBuf),
}

impl fmt::Debug for OwnerKeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hex(_) => f.write_str("Hex(<redacted>)"),
            Self::PemFile(path) => f.debug_tuple("PemFile").field(path).finish(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsPaths {
    pub cert: PathBuf,
    pub key: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub window: Duration,
    pub max_requests: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window: Duration::from_secs(DEFAULT_RATE_LIMIT_WINDOW_SECS),
            max_requests: DEFAULT_RATE_LIMIT_MAX_REQUESTS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub data_dir: PathBuf,
    pub owner_key: OwnerKeySource,
    pub tls: Option<TlsPaths>,
    pub rate_limit: RateLimitConfig,
    pub log_format: LogFormat,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let host = get(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let ip: IpAddr = parse_var(HOST_ENV, &host)?;
        let port = match get(PORT_ENV) {
            Some(raw) => parse_var(PORT_ENV, &raw)?,
            None => DEFAULT_PORT,
        };

        let data_dir = get(DATA_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let owner_key = match (get(OWNER_PRIVATE_KEY_FILE_ENV), get(OWNER_PRIVATE_KEY_ENV)) {
            (Some(path), _) => OwnerKeySource::PemFile(PathBuf::from(path)),
            (None, Some(hex)) => OwnerKeySource::Hex(hex),
            (None, None) => return Err(ConfigError::Missing(OWNER_PRIVATE_KEY_ENV)),
        };

        let tls = match (get(TLS_CERT_PATH_ENV), get(TLS_KEY_PATH_ENV)) {
            (Some(cert), Some(key)) => Some(TlsPaths {
                cert: PathBuf::from(cert),
                key: PathBuf::from(key),
            }),
            (None, None) => None,
            _ => return Err(ConfigError::IncompleteTls),
        };

        let window_secs: u64 = match get(RATE_LIMIT_WINDOW_SECS_ENV) {
            Some(raw) => parse_positive(RATE_LIMIT_WINDOW_SECS_ENV, &raw)?,
            None => DEFAULT_RATE_LIMIT_WINDOW_SECS,
        };
        let max_requests: u32 = match get(RATE_LIMIT_MAX_REQUESTS_ENV) {
            Some(raw) => parse_positive(RATE_LIMIT_MAX_REQUESTS_ENV, &raw)?,
            None => DEFAULT_RATE_LIMIT_MAX_REQUESTS,
        };

        let log_format = match get(LOG_FORMAT_ENV).map(|v| v.to_ascii_lowercase()) {
            Some(v) if v == "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Ok(Self {
            bind_addr: SocketAddr::new(ip, port),
            data_dir,
            owner_key,
            tls,
            rate_limit: RateLimitConfig {
                window: Duration::from_secs(window_secs),
                max_requests,
            },
            log_format,
        })
    }

    /// Full path of the project database file.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(crate::storage::DATABASE_FILE)
    }
}

fn parse_var<T>(name: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        name,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

fn parse_positive<T>(name: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr + Default + PartialEq,
    T::Err: fmt::Display,
{
    let value: T = parse_var(name, raw)?;
    if value == T::default() {
        return Err(ConfigError::Invalid {
            name,
            value: raw.to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(value)
}
