//! Error types for spinplot

use thiserror::Error;

/// Main error type for spinplot operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("malformed sample `{id}`: non-finite coordinate ({x}, {y})")]
    MalformedSample { id: String, x: f32, y: f32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("render error: {0}")]
    Render(String),
}

/// Result type alias for spinplot operations
pub type Result<T> = std::result::Result<T, Error>;
