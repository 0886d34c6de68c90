pub mod api;
pub mod config;
mod error;
pub mod logging;
pub mod presence;
pub mod resolver;
pub mod scheduler;
pub mod sink;
mod validation;

#[cfg(test)]
mod testing;

pub use error::{ApiError, ConfigError};
pub use validation::ValidationError;
