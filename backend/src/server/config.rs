//! Server configuration parsing and validation.
//!
//! This module centralises the environment-driven server settings so they are
//! validated consistently and can be tested in isolation.

use mockable::Env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tracing::warn;

const BIND_ADDR_ENV: &str = "ACCOUNTS_BIND_ADDR";
const BIND_ADDR_EXPECTED: &str = "host:port socket address";
const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 8080);

/// Build mode for server configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate defaults and emit warnings for missing toggles.
    Debug,
    /// Release builds require explicit, valid server toggles.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use accounts::server::config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Server settings derived from configuration toggles.
#[derive(Clone, Copy, Debug)]
pub struct ServerConfig {
    /// Socket address the HTTP listener binds to.
    pub bind_addr: SocketAddr,
}

/// Errors raised while validating server configuration.
#[derive(thiserror::Error, Debug)]
pub enum ServerConfigError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {name}")]
    MissingEnv {
        /// Name of the missing variable.
        name: &'static str,
    },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        /// Name of the offending variable.
        name: &'static str,
        /// The rejected value.
        value: String,
        /// Human-readable description of the accepted format.
        expected: &'static str,
    },
}

/// Build server settings from environment variables and build mode.
///
/// Debug builds fall back to `0.0.0.0:8080` when the bind address is missing
/// or unparseable; release builds reject both cases.
///
/// # Examples
///
/// ```rust
/// use accounts::server::config::{server_config_from_env, BuildMode};
/// use mockable::MockEnv;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "ACCOUNTS_BIND_ADDR" => Some("127.0.0.1:9090".to_string()),
///     _ => None,
/// });
///
/// let config = server_config_from_env(&env, BuildMode::Release)?;
/// assert_eq!(config.bind_addr.port(), 9090);
/// # Ok(())
/// # }
/// ```
pub fn server_config_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<ServerConfig, ServerConfigError> {
    let bind_addr = bind_addr_from_env(env, mode)?;
    Ok(ServerConfig { bind_addr })
}

fn bind_addr_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<SocketAddr, ServerConfigError> {
    match env.string(BIND_ADDR_ENV) {
        Some(value) => match value.parse() {
            Ok(addr) => Ok(addr),
            Err(_) => {
                if mode.is_debug() {
                    warn!(value = %value, "invalid ACCOUNTS_BIND_ADDR; using default");
                    Ok(DEFAULT_BIND_ADDR)
                } else {
                    Err(ServerConfigError::InvalidEnv {
                        name: BIND_ADDR_ENV,
                        value,
                        expected: BIND_ADDR_EXPECTED,
                    })
                }
            }
        },
        None => {
            if mode.is_debug() {
                warn!("ACCOUNTS_BIND_ADDR not set; using default");
                Ok(DEFAULT_BIND_ADDR)
            } else {
                Err(ServerConfigError::MissingEnv {
                    name: BIND_ADDR_ENV,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests;
