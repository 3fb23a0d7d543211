use thiserror::Error;

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required env var(s): {}", .names.join(", "))]
    MissingEnvVars { names: Vec<String> },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Catalog error: {message}")]
    CatalogError { message: String },

    #[error("Backend returned {status}: {message}")]
    Backend { status: u16, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Backend,
    Data,
    System,
}

impl SeedError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SeedError::ConfigError { .. }
            | SeedError::MissingEnvVars { .. }
            | SeedError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            SeedError::ApiError(_) => ErrorCategory::Network,
            SeedError::Backend { .. } => ErrorCategory::Backend,
            SeedError::CatalogError { .. } | SeedError::SerializationError(_) => {
                ErrorCategory::Data
            }
            SeedError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            SeedError::MissingEnvVars { .. } => {
                "Add the missing variables to .env (or .env.seed for the API key)".to_string()
            }
            SeedError::ConfigError { .. } | SeedError::InvalidConfigValueError { .. } => {
                "Check the env files and command-line arguments".to_string()
            }
            SeedError::ApiError(_) => {
                "Check the endpoint URL and your network connection".to_string()
            }
            SeedError::Backend { status, .. } if *status == 401 || *status == 403 => {
                "Check that APPWRITE_API_KEY has the databases.write scope".to_string()
            }
            SeedError::Backend { status: 404, .. } => {
                "Check the database and collection ids in .env".to_string()
            }
            SeedError::Backend { .. } => {
                "Inspect the backend console; records created before the failure remain"
                    .to_string()
            }
            SeedError::CatalogError { .. } | SeedError::SerializationError(_) => {
                "Fix the catalog file and run again".to_string()
            }
            SeedError::IoError(_) => "Make sure the file exists and is readable".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SeedError::MissingEnvVars { names } => names
                .iter()
                .map(|name| format!("Missing required env var: {}", name))
                .collect::<Vec<_>>()
                .join("\n"),
            SeedError::Backend { message, .. } => format!("Seed failed: {}", message),
            SeedError::ApiError(e) => format!("Seed failed: {}", e),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SeedError>;
