#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Validate(#[from] validator::ValidationErrors),
}

pub type Result<T> = std::result::Result<T, Error>;
