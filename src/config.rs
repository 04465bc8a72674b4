//! Configuration management for the parlor session protocol

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use crate::error::SessionError;

/// Main configuration for a parlor client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParlorConfig {
    /// Network configuration
    pub network: NetworkConfig,
    /// Session configuration
    pub session: SessionConfig,
}

impl Default for ParlorConfig {
    fn default() -> Self {
        Self {
            network: NetworkConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

/// Network-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// RPC endpoint of the ledger gateway
    pub endpoint: String,
    /// WebSocket endpoint used for the event subscription channel
    pub ws_endpoint: String,
    /// Connection timeout in seconds
    pub connection_timeout: u64,
    /// Retry attempts for failed connections
    pub retry_attempts: u32,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8545".to_string(),
            ws_endpoint: "ws://localhost:8546".to_string(),
            connection_timeout: 10,
            retry_attempts: 3,
        }
    }
}

/// Session-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Whether to route requests through the confidential channel
    pub confidential: bool,
    /// Default deadline for readiness propagation across handles (milliseconds)
    pub settle_timeout_ms: u64,
    /// Maximum number of concurrent sessions per client
    pub max_concurrent_sessions: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            confidential: true,
            settle_timeout_ms: 1000,
            max_concurrent_sessions: 5,
        }
    }
}

impl ParlorConfig {
    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SessionError> {
        let content = fs::read_to_string(path).map_err(|e| {
            SessionError::Configuration {
                message: format!("Failed to read config file: {}", e),
                field: "config_file".to_string(),
            }
        })?;

        let config: ParlorConfig = toml::from_str(&content).map_err(|e| {
            SessionError::Configuration {
                message: format!("Failed to parse config file: {}", e),
                field: "config_format".to_string(),
            }
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), SessionError> {
        let content = toml::to_string_pretty(self).map_err(|e| {
            SessionError::Configuration {
                message: format!("Failed to serialize config: {}", e),
                field: "config_serialization".to_string(),
            }
        })?;

        fs::write(path, content).map_err(|e| {
            SessionError::Configuration {
                message: format!("Failed to write config file: {}", e),
                field: "config_write".to_string(),
            }
        })?;

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.network.endpoint.is_empty() {
            return Err(SessionError::Configuration {
                message: "Ledger endpoint must not be empty".to_string(),
                field: "network.endpoint".to_string(),
            });
        }

        if self.network.ws_endpoint.is_empty() {
            return Err(SessionError::Configuration {
                message: "Event endpoint must not be empty".to_string(),
                field: "network.ws_endpoint".to_string(),
            });
        }

        if self.network.connection_timeout == 0 {
            return Err(SessionError::Configuration {
                message: "Connection timeout must be greater than 0".to_string(),
                field: "network.connection_timeout".to_string(),
            });
        }

        if self.session.settle_timeout_ms == 0 {
            return Err(SessionError::Configuration {
                message: "Settle timeout must be greater than 0".to_string(),
                field: "session.settle_timeout_ms".to_string(),
            });
        }

        if self.session.max_concurrent_sessions == 0 {
            return Err(SessionError::Configuration {
                message: "Max concurrent sessions must be greater than 0".to_string(),
                field: "session.max_concurrent_sessions".to_string(),
            });
        }

        Ok(())
    }

    /// Create a production-ready configuration
    pub fn production() -> Self {
        Self {
            network: NetworkConfig {
                endpoint: "https://gateway.example.org".to_string(),
                ws_endpoint: "wss://gateway.example.org/ws".to_string(),
                connection_timeout: 5,
                retry_attempts: 2,
            },
            session: SessionConfig {
                confidential: true,
                settle_timeout_ms: 2000,       // slower finality on public networks
                max_concurrent_sessions: 3,
            },
        }
    }

    /// Create a development configuration with relaxed settings
    pub fn development() -> Self {
        Self {
            network: NetworkConfig {
                endpoint: "http://localhost:8545".to_string(),
                ws_endpoint: "ws://localhost:8546".to_string(),
                connection_timeout: 30,
                retry_attempts: 5,
            },
            session: SessionConfig {
                confidential: false,           // plain channel for local debugging
                settle_timeout_ms: 1000,
                max_concurrent_sessions: 10,
            },
        }
    }
}
