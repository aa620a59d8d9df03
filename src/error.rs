//! Error types for Flowmorph.
//!
//! All errors in Flowmorph are represented by the `MorphError` enum,
//! which provides specific variants for different error categories.

use std::io::ErrorKind;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for all Flowmorph operations.
///
/// Policy outcomes (a vetoed replace rule, an element without replacement
/// category) are never errors; they surface as empty candidate lists.
#[derive(Deserialize, Serialize, Error, Debug, Clone, PartialEq)]
pub enum MorphError {
    /// Caller violated an operation contract, e.g. executing a descriptor
    /// that is not among the current candidates of the element.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Referenced element does not exist in the current diagram.
    #[error("element {0} not found")]
    NotFound(String),

    /// Structural errors while building a diagram from its model.
    #[error("{0}")]
    Diagram(String),

    /// Configuration parsing or validation errors.
    #[error("{0}")]
    Config(String),

    /// Data conversion errors (JSON).
    #[error("{0}")]
    Convert(String),

    /// I/O operation errors.
    #[error("{0}")]
    IoError(String),
}

impl From<MorphError> for String {
    fn from(val: MorphError) -> Self {
        val.to_string()
    }
}

impl From<std::io::Error> for MorphError {
    fn from(error: std::io::Error) -> Self {
        MorphError::IoError(error.to_string())
    }
}

impl From<MorphError> for std::io::Error {
    fn from(val: MorphError) -> Self {
        #[allow(clippy::io_other_error)]
        std::io::Error::new(ErrorKind::Other, val.to_string())
    }
}

impl From<serde_json::Error> for MorphError {
    fn from(error: serde_json::Error) -> Self {
        MorphError::Convert(error.to_string())
    }
}

impl From<toml::de::Error> for MorphError {
    fn from(error: toml::de::Error) -> Self {
        MorphError::Config(error.to_string())
    }
}
