use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnrichError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Catalog unavailable: {message}")]
    CatalogUnavailable { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl EnrichError {
    pub fn catalog(message: impl Into<String>) -> Self {
        Self::CatalogUnavailable {
            message: message.into(),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            EnrichError::HttpError(_) => ErrorSeverity::Medium,
            EnrichError::CsvError(_)
            | EnrichError::SerializationError(_)
            | EnrichError::ValidationError { .. } => ErrorSeverity::High,
            EnrichError::ConfigError { .. }
            | EnrichError::MissingConfigError { .. }
            | EnrichError::InvalidConfigValueError { .. }
            | EnrichError::ConfigValidationError { .. } => ErrorSeverity::High,
            EnrichError::IoError(_) | EnrichError::CatalogUnavailable { .. } => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EnrichError::CatalogUnavailable { .. } => "Failed to load wildlife data".to_string(),
            EnrichError::HttpError(_) => "Could not reach the summary service".to_string(),
            EnrichError::MissingConfigError { field } => {
                format!("Configuration is missing '{}'", field)
            }
            EnrichError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EnrichError::CatalogUnavailable { .. } => {
                "Check that wildlife.json exists in the data directory and is a valid JSON array"
            }
            EnrichError::HttpError(_) => "Check network connectivity and the source endpoint",
            EnrichError::ConfigError { .. }
            | EnrichError::MissingConfigError { .. }
            | EnrichError::InvalidConfigValueError { .. }
            | EnrichError::ConfigValidationError { .. } => {
                "Review the configuration file and command line flags"
            }
            EnrichError::IoError(_) => "Check file permissions and that the output path exists",
            EnrichError::CsvError(_) | EnrichError::SerializationError(_) => {
                "Try a different output format"
            }
            EnrichError::ValidationError { .. } => "Fix the offending record in the catalog",
        }
    }
}

pub type Result<T> = std::result::Result<T, EnrichError>;
