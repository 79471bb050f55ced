//! Error types for the IGT layout engine
//!
//! The layout pass itself is infallible. These errors only arise at the
//! JavaScript boundary: bad configuration, undecodable input, or a page
//! without a DOM to measure in.

use thiserror::Error;

/// Rejected layout configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A pixel length is negative or not a number
    #[error("Invalid length for `{field}`: {value}")]
    InvalidLength { field: &'static str, value: f32 },

    /// Minimum line width percentage outside 0..=100
    #[error("min_line_width_as_percent must be within 0..=100, got {0}")]
    InvalidPercent(f32),
}

/// Errors surfaced by the WASM API
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("Invalid layout configuration: {0}")]
    Config(#[from] ConfigError),

    /// A JS value could not be decoded into the expected shape
    #[error("{context}: {message}")]
    Deserialize { context: String, message: String },

    /// The result could not be encoded for JavaScript
    #[error("{context}: {message}")]
    Serialize { context: String, message: String },

    /// No `window`/`document` is available for DOM measurement
    #[error("DOM unavailable: {0}")]
    DomUnavailable(String),
}

impl ApiError {
    pub fn deserialize(context: &str, err: impl std::fmt::Display) -> Self {
        ApiError::Deserialize {
            context: context.to_string(),
            message: err.to_string(),
        }
    }

    pub fn serialize(context: &str, err: impl std::fmt::Display) -> Self {
        ApiError::Serialize {
            context: context.to_string(),
            message: err.to_string(),
        }
    }
}
