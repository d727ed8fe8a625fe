use thiserror::Error;

/// Number of body characters kept when a response cannot be converted.
pub const BODY_SNIPPET_CHARS: usize = 1000;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned HTTP {status}")]
    HttpStatusError { status: u16, body: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Failed to convert response to GeoJSON: {message}")]
    ConversionError { message: String, snippet: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Data,
    System,
}

impl EtlError {
    /// Builds a conversion error that keeps the head of the offending body.
    pub fn conversion(message: impl Into<String>, body: &str) -> Self {
        EtlError::ConversionError {
            message: message.into(),
            snippet: body.chars().take(BODY_SNIPPET_CHARS).collect(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::ApiError(_) | EtlError::HttpStatusError { .. } => ErrorCategory::Network,
            EtlError::CsvError(_)
            | EtlError::SerializationError(_)
            | EtlError::ConversionError { .. } => ErrorCategory::Data,
            EtlError::IoError(_) => ErrorCategory::System,
            EtlError::ConfigError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Data => 1,
            ErrorCategory::Configuration => 2,
            ErrorCategory::Network => 3,
            ErrorCategory::System => 4,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::HttpStatusError { status, body } => {
                format!("Error: HTTP {}\n{}", status, body)
            }
            EtlError::ConversionError { message, snippet } => {
                format!(
                    "Failed to convert CSV response to GeoJSON: {}\n{}",
                    message, snippet
                )
            }
            EtlError::ApiError(e) if e.is_timeout() => {
                "The station API did not answer before the timeout".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::HttpStatusError { status: 401 | 403, .. } => {
                "Check that the API key is valid (set --api-key or NREL_API_KEY)"
            }
            EtlError::HttpStatusError { .. } | EtlError::ApiError(_) => {
                "Check network connectivity and the API base URL, then run again"
            }
            EtlError::ConversionError { .. }
            | EtlError::CsvError(_)
            | EtlError::SerializationError(_) => {
                "The API returned an unexpected payload; inspect the body above"
            }
            EtlError::IoError(_) => "Check that the output path is writable",
            EtlError::ConfigError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. } => {
                "Fix the configuration value and run again"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
