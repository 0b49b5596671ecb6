use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntelError {
    #[error("{source_name} API failed: {status}")]
    FetchError { source_name: String, status: u16 },

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("{source_name} task failed: {message}")]
    TaskError { source_name: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Upstream,
    Internal,
    Configuration,
}

impl IntelError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            IntelError::FetchError { .. } | IntelError::HttpError(_) => ErrorCategory::Upstream,
            IntelError::TaskError { .. }
            | IntelError::IoError(_)
            | IntelError::SerializationError(_) => ErrorCategory::Internal,
            IntelError::ConfigError { .. } | IntelError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Upstream => format!("An upstream feed could not be read: {}", self),
            ErrorCategory::Internal => format!("Aggregation failed unexpectedly: {}", self),
            ErrorCategory::Configuration => {
                format!("Please check your configuration: {}", self)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, IntelError>;
