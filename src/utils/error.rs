use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Meta API error (status {status:?}): {details}")]
    UpstreamError {
        status: Option<u16>,
        details: serde_json::Value,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Request,
    Upstream,
    Configuration,
    System,
}

impl RelayError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RelayError::ValidationError { .. } => ErrorCategory::Request,
            RelayError::ApiError(_) | RelayError::UpstreamError { .. } => ErrorCategory::Upstream,
            RelayError::ConfigError { .. }
            | RelayError::MissingConfigError { .. }
            | RelayError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            RelayError::IoError(_) | RelayError::SerializationError(_) => ErrorCategory::System,
        }
    }

    /// HTTP status the relay answers with when this error reaches a handler.
    pub fn status_code(&self) -> u16 {
        match self.category() {
            ErrorCategory::Request => 400,
            _ => 500,
        }
    }

    /// Upstream payload (or a best-effort message) to hand back to the caller.
    pub fn details(&self) -> serde_json::Value {
        match self {
            RelayError::UpstreamError { details, .. } => details.clone(),
            other => serde_json::Value::String(other.to_string()),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            RelayError::ValidationError { message } => message.clone(),
            RelayError::ApiError(_) | RelayError::UpstreamError { .. } => {
                "Meta API error".to_string()
            }
            RelayError::MissingConfigError { field } => {
                format!("Missing required setting: {}", field)
            }
            RelayError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting {}: {}", field, reason)
            }
            RelayError::ConfigError { message } => format!("Configuration problem: {}", message),
            RelayError::IoError(_) | RelayError::SerializationError(_) => {
                "Internal error".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, RelayError>;
