use std::fmt::Display;
use thiserror::Error;

pub mod codes;
pub mod helpers;

pub use codes::{describe_error_code, ErrorCode};
pub use helpers::ErrorExt;

/// The error type shared by every jobscope operation
///
/// Collaborator failures surface as [`JobScopeError::Communication`] and are
/// propagated to the caller untouched; nothing in this crate retries.
#[derive(Error, Debug)]
pub enum JobScopeError {
    #[error("[E{code:04}] Job tracker communication failed during {operation}: {message}")]
    Communication {
        code: u16,
        operation: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Invalid identifier '{value}': {message}")]
    InvalidId {
        code: u16,
        value: String,
        message: String,
    },

    #[error("[E{code:04}] Configuration error: {message}")]
    Config {
        code: u16,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl JobScopeError {
    /// Create a communication error with default code
    pub fn communication(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::communication_with_code(ErrorCode::COMM_GENERIC, operation, message)
    }

    /// Create a communication error with specific code
    pub fn communication_with_code(
        code: u16,
        operation: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Communication {
            code,
            operation: operation.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create an identifier parse error
    pub fn invalid_id(code: u16, value: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidId {
            code,
            value: value.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error with default code
    pub fn config(message: impl Into<String>) -> Self {
        Self::config_with_code(ErrorCode::CONFIG_GENERIC, message)
    }

    /// Create a configuration error with specific code
    pub fn config_with_code(code: u16, message: impl Into<String>) -> Self {
        Self::Config {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error to this error
    ///
    /// Identifier errors carry no source and are returned unchanged.
    pub fn with_source(
        mut self,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        match &mut self {
            Self::Communication { source: src, .. }
            | Self::Config { source: src, .. } => {
                *src = Some(source.into());
            }
            Self::InvalidId { .. } => {}
        }
        self
    }

    /// Add context to the error message
    pub fn with_context(mut self, context: impl Display) -> Self {
        match &mut self {
            Self::Communication { message, .. }
            | Self::InvalidId { message, .. }
            | Self::Config { message, .. } => {
                *message = format!("{}: {}", message, context);
            }
        }
        self
    }

    /// Get the error code
    pub fn code(&self) -> u16 {
        match self {
            Self::Communication { code, .. }
            | Self::InvalidId { code, .. }
            | Self::Config { code, .. } => *code,
        }
    }

    /// Whether the failure was a collaborator communication problem
    pub fn is_communication(&self) -> bool {
        matches!(self, Self::Communication { .. })
    }

    /// Whether a caller-level retry could plausibly succeed
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Communication { code, .. } => *code != ErrorCode::COMM_JOB_NOT_FOUND,
            Self::InvalidId { .. } | Self::Config { .. } => false,
        }
    }
}

/// Type alias for Results using JobScopeError
pub type Result<T> = std::result::Result<T, JobScopeError>;

impl From<std::io::Error> for JobScopeError {
    fn from(err: std::io::Error) -> Self {
        use std::io::ErrorKind;

        let (code, message) = match err.kind() {
            ErrorKind::TimedOut => (ErrorCode::COMM_TIMEOUT, "Request timed out"),
            ErrorKind::NotFound => (ErrorCode::COMM_JOB_NOT_FOUND, "Not found"),
            _ => (ErrorCode::COMM_GENERIC, "IO operation failed"),
        };

        JobScopeError::communication_with_code(code, "io", message).with_source(err)
    }
}

impl From<toml::de::Error> for JobScopeError {
    fn from(err: toml::de::Error) -> Self {
        JobScopeError::config_with_code(ErrorCode::CONFIG_PARSE_ERROR, "Invalid TOML syntax")
            .with_source(err)
    }
}
