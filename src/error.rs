//! Error types for the quadcell index.

use thiserror::Error;

/// Errors produced while decoding cells, validating coordinates or loading
/// configuration.
///
/// Misuse of the navigation API (asking for the parent of the root, a child
/// past the configured depth, a covering with a zero budget) is a programming
/// error and panics instead of returning one of these.
#[derive(Debug, Error)]
pub enum QuadCellError {
    /// Domain bounds are not finite or not strictly increasing
    #[error("invalid domain: {0}")]
    InvalidDomain(String),

    /// Configuration values failed validation
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A cell string contained something other than `0`..`3`
    #[error("invalid cell digit {found:?} at position {position}")]
    InvalidCellDigit { position: usize, found: char },

    /// A cell string is too long for the configured number of levels
    #[error("cell of length {length} does not fit {depth_levels} depth levels")]
    CellTooDeep { length: usize, depth_levels: u8 },

    /// A pre-order key does not name any cell of the tree
    #[error("key {key} is not a valid cell for {depth_levels} depth levels")]
    InvalidCellKey { key: i64, depth_levels: u8 },

    /// A coordinate was NaN or infinite
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// A point lies outside the index domain
    #[error("point ({x}, {y}) lies outside the index domain")]
    OutOfDomain { x: f64, y: f64 },

    /// I/O failure while reading a configuration file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be parsed or written
    #[error("serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for QuadCellError {
    fn from(err: serde_json::Error) -> Self {
        QuadCellError::SerializationError(err.to_string())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, QuadCellError>;
