use thiserror::Error;

#[derive(Error, Debug)]
pub enum CardError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Release has no assets; cannot create installer card (tag: {tag})")]
    NoAssets { tag: String },

    #[error("Invalid release date: {message}")]
    DateError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
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
    Network,
    Data,
    Configuration,
    Io,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl CardError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CardError::ApiError(_) | CardError::UrlError(_) => ErrorCategory::Network,
            CardError::SerializationError(_)
            | CardError::NoAssets { .. }
            | CardError::DateError { .. } => ErrorCategory::Data,
            CardError::IoError(_) => ErrorCategory::Io,
            CardError::ConfigError { .. }
            | CardError::ConfigValidationError { .. }
            | CardError::InvalidConfigValueError { .. }
            | CardError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 網路錯誤通常可以重跑 workflow 解決
            CardError::ApiError(_) => ErrorSeverity::Medium,
            CardError::NoAssets { .. }
            | CardError::DateError { .. }
            | CardError::SerializationError(_)
            | CardError::UrlError(_) => ErrorSeverity::High,
            CardError::ConfigError { .. }
            | CardError::ConfigValidationError { .. }
            | CardError::InvalidConfigValueError { .. }
            | CardError::MissingConfigError { .. } => ErrorSeverity::High,
            CardError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    /// HTTP status of a failed release request, if the server answered at all.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            CardError::ApiError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            CardError::ApiError(_) => match self.http_status() {
                Some(401) | Some(403) => {
                    "Check that GITHUB_TOKEN is valid and can read the repository".to_string()
                }
                Some(404) => {
                    "Check ORG, REPO and RELEASE_TAG; the release may not exist or be private"
                        .to_string()
                }
                _ => "Check network connectivity and the GitHub API status, then retry".to_string(),
            },
            CardError::UrlError(_) => "Check the API base URL".to_string(),
            CardError::NoAssets { .. } => {
                "Attach the installer to the release before generating its card".to_string()
            }
            CardError::DateError { .. } => {
                "Make sure the release is published and carries a valid timestamp".to_string()
            }
            CardError::SerializationError(_) => {
                "The release response could not be decoded; check the API base URL".to_string()
            }
            CardError::IoError(_) => {
                "Check that DEST_DIR is writable and the disk is not full".to_string()
            }
            CardError::ConfigError { .. }
            | CardError::ConfigValidationError { .. }
            | CardError::InvalidConfigValueError { .. }
            | CardError::MissingConfigError { .. } => {
                "Review the command-line flags, environment variables or config file".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CardError::ApiError(e) => match e.status() {
                Some(status) => format!("GitHub API returned {}", status),
                None if e.is_timeout() => "GitHub API request timed out".to_string(),
                None => format!("Could not reach GitHub API: {}", e),
            },
            CardError::NoAssets { .. } => {
                "Release has no assets; cannot create installer card.".to_string()
            }
            CardError::SerializationError(e) => {
                format!("GitHub API answered, but not with a release: {}", e)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CardError>;
