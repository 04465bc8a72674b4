//! Error types for the parlor session protocol

use thiserror::Error;

/// Main error type for session coordination
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    #[error("session creation rejected: {message}")]
    Creation {
        message: String,
        field: Option<String>,
    },

    #[error("illegal move: {message}")]
    IllegalMove {
        message: String,
        player_id: Option<u32>,
    },

    #[error("session not ready: {0}")]
    NotReady(String),

    #[error("timeout after {duration_ms}ms during {operation}")]
    Timeout {
        operation: String,
        duration_ms: u64,
    },

    #[error("network error: {source}")]
    Network {
        source: NetworkError,
        context: String,
    },

    #[error("configuration error: {message}")]
    Configuration {
        message: String,
        field: String,
    },

    #[error("serialization error: {message}")]
    Serialization { message: String },

    #[error("hex decoding error: {0}")]
    HexDecode(#[from] hex::FromHexError),

    #[error("event subscription failed: {0}")]
    Subscription(String),

    #[error("unknown session: {0}")]
    UnknownSession(u64),
}

impl SessionError {
    /// Creation rejection without a specific offending field
    pub fn creation(message: impl Into<String>) -> Self {
        SessionError::Creation {
            message: message.into(),
            field: None,
        }
    }

    /// Collaborator-reported move rejection
    pub fn illegal_move(message: impl Into<String>, player_id: Option<u32>) -> Self {
        SessionError::IllegalMove {
            message: message.into(),
            player_id,
        }
    }
}

/// Network-specific error types
#[derive(Debug, Clone, Error)]
pub enum NetworkError {
    #[error("connection failed: {message}")]
    ConnectionFailed { message: String },

    #[error("request timeout: {duration_ms}ms")]
    RequestTimeout { duration_ms: u64 },

    #[error("invalid response: {message}")]
    InvalidResponse { message: String },

    #[error("service unavailable: {service}")]
    ServiceUnavailable { service: String },
}

impl From<NetworkError> for SessionError {
    fn from(err: NetworkError) -> Self {
        SessionError::Network {
            source: err,
            context: String::new(),
        }
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        SessionError::Serialization {
            message: err.to_string(),
        }
    }
}

/// Type alias for the main result type used throughout the library
pub type SessionResult<T> = Result<T, SessionError>;

/// Logging configuration and initialization
pub mod logging {
    use tracing::Level;
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};
    use std::env;

    /// Logging output format
    #[derive(Debug, Clone)]
    pub enum LogFormat {
        Human,
        Json,
    }

    /// Logging output destination
    #[derive(Debug, Clone)]
    pub enum LogOutput {
        Stdout,
        Stderr,
    }

    /// Logging configuration
    #[derive(Debug, Clone)]
    pub struct LoggingConfig {
        pub level: Level,
        pub format: LogFormat,
        pub output: LogOutput,
    }

    impl Default for LoggingConfig {
        fn default() -> Self {
            Self {
                level: Level::INFO,
                format: LogFormat::Human,
                output: LogOutput::Stdout,
            }
        }
    }

    /// Initialize structured logging with the given configuration
    pub fn init_logging(config: LoggingConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let env_filter = EnvFilter::builder()
            .with_default_directive(config.level.into())
            .from_env_lossy()
            .add_directive("parlor=trace".parse()?)
            .add_directive("tokio=info".parse()?);

        let registry = tracing_subscriber::registry()
            .with(env_filter);

        match config.format {
            LogFormat::Human => {
                let fmt_layer = fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true);

                match config.output {
                    LogOutput::Stdout => registry.with(fmt_layer.with_writer(std::io::stdout)).init(),
                    LogOutput::Stderr => registry.with(fmt_layer.with_writer(std::io::stderr)).init(),
                }
            }
            LogFormat::Json => {
                let fmt_layer = fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_span_events(fmt::format::FmtSpan::CLOSE);

                match config.output {
                    LogOutput::Stdout => registry.with(fmt_layer.with_writer(std::io::stdout)).init(),
                    LogOutput::Stderr => registry.with(fmt_layer.with_writer(std::io::stderr)).init(),
                }
            }
        }

        Ok(())
    }

    /// Initialize logging with environment-based configuration
    pub fn init_from_env() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let level = env::var("PARLOR_LOG_LEVEL")
            .unwrap_or_else(|_| "info".to_string())
            .parse::<Level>()
            .unwrap_or(Level::INFO);

        let format = match env::var("PARLOR_LOG_FORMAT").as_ref().map(|s| s.as_str()) {
            Ok("json") => LogFormat::Json,
            _ => LogFormat::Human,
        };

        let output = match env::var("PARLOR_LOG_OUTPUT").as_ref().map(|s| s.as_str()) {
            Ok("stderr") => LogOutput::Stderr,
            _ => LogOutput::Stdout,
        };

        let config = LoggingConfig { level, format, output };
        init_logging(config)
    }
}
