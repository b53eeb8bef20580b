pub mod api;
pub mod config;
pub mod error;
pub mod observability;
pub mod routes;
pub mod sync;

pub use config::Config;
pub use error::{AppError, Result};
