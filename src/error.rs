use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Authentication(String),

    #[error("Failed to load {resource} ({status}): {message}")]
    DataFetch {
        resource: String,
        status: u16,
        message: String,
    },

    #[error("Request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{0}")]
    Unknown(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Message shown to the user in place of the failed view.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Authentication(message) => message.to_owned(),
            AppError::DataFetch { resource, .. } => {
                format!("Could not load {resource}. Refresh to try again.")
            }
            AppError::Forbidden(_) => "You do not have access to this section.".to_owned(),
            AppError::Validation(message) => message.to_owned(),
            AppError::Http(e) => {
                tracing::error!("Request error: {:?}", e);
                "The CRM service is unreachable. Refresh to try again.".to_owned()
            }
            AppError::Config(e) => {
                tracing::error!("Configuration error: {}", e);
                "The application is misconfigured.".to_owned()
            }
            AppError::Unknown(e) => {
                tracing::error!("Unexpected error: {:?}", e);
                "An unexpected error occurred. Please try again later.".to_owned()
            }
        }
    }
}

impl From<megagen_session::Error> for AppError {
    fn from(value: megagen_session::Error) -> Self {
        match value {
            megagen_session::Error::Authentication(message) => AppError::Authentication(message),
            megagen_session::Error::Validate(e) => AppError::Validation(e.to_string()),
            megagen_session::Error::Unknown(e) => AppError::Unknown(e),
        }
    }
}

impl From<megagen_quote::Error> for AppError {
    fn from(value: megagen_quote::Error) -> Self {
        match value {
            megagen_quote::Error::Validate(e) => AppError::Validation(e.to_string()),
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(value: config::ConfigError) -> Self {
        AppError::Config(value.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(value: url::ParseError) -> Self {
        AppError::Config(value.to_string())
    }
}
