pub const DEFAULT_AUTHENTICATION_MESSAGE: &str = "Invalid credentials";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Validate(#[from] validator::ValidationErrors),

    #[error("{0}")]
    Authentication(String),

    #[error("{0}")]
    Unknown(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Authentication failure carrying the server message, or the default one.
    pub fn authentication(message: Option<String>) -> Self {
        let message = message
            .map(|m| m.trim().to_owned())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_AUTHENTICATION_MESSAGE.to_owned());

        Self::Authentication(message)
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Self::Unknown(value.into())
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::Unknown(value.into())
    }
}

#[macro_export]
macro_rules! authentication {
    ($msg:literal $(,)?) => {
        return Err($crate::Error::Authentication(format!($msg)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::Error::Authentication(format!($fmt, $($arg)*)))
    };
}
