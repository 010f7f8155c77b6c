//! Centralized error handling for descry.
//!
//! Every summary operation either returns its result or one of a small set of
//! typed failures. Callers can match on the variant to decide whether to skip a
//! summary and carry on with the next one:
//!
//! ```
//! use descry::error::DescryError;
//!
//! fn describe(err: &DescryError) -> &'static str {
//!     match err {
//!         DescryError::TypeMismatch { .. } => "wrong attribute type",
//!         DescryError::InsufficientData { .. } => "not enough values",
//!         DescryError::SchemaMismatch { .. } => "no such attribute",
//!         _ => "other",
//!     }
//! }
//! ```
//!
//! ## Context Extension Trait
//!
//! `ResultExt` adds `.context()` to any `Result` whose error converts into
//! [`DescryError`]:
//!
//! ```no_run
//! use descry::error::ResultExt;
//! use std::fs;
//!
//! fn load_settings() -> descry::error::Result<String> {
//!     let raw = fs::read_to_string("config.json").context("Failed to read settings")?;
//!     Ok(raw)
//! }
//! ```

use crate::dataset::AttributeKind;
use std::fmt;

/// Main error type for descry operations.
#[derive(Debug)]
pub enum DescryError {
    /// The operation needs an attribute of one kind and got the other.
    TypeMismatch {
        attribute: String,
        expected: AttributeKind,
        actual: AttributeKind,
    },

    /// Fewer non-missing values than the statistic requires.
    InsufficientData {
        attribute: String,
        required: usize,
        actual: usize,
    },

    /// A referenced attribute (by name or position) is not in the schema.
    SchemaMismatch { attribute: String },

    /// The schema itself is malformed (duplicate or empty attribute names, bad levels).
    InvalidSchema(String),

    /// A row does not agree with the schema.
    InvalidDataset(String),

    /// I/O errors (config and data files)
    Io(std::io::Error),

    /// Errors raised by Polars while reading or converting a frame
    DataProcessing(String),

    /// Configuration errors
    Config(String),

    /// Generic error with context
    Other(String),
}

impl fmt::Display for DescryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeMismatch {
                attribute,
                expected,
                actual,
            } => write!(
                f,
                "Type mismatch: attribute '{attribute}' is {actual}, expected {expected}"
            ),
            Self::InsufficientData {
                attribute,
                required,
                actual,
            } => write!(
                f,
                "Insufficient data: attribute '{attribute}' needs at least {required} non-missing values, has {actual}"
            ),
            Self::SchemaMismatch { attribute } => {
                write!(f, "Schema mismatch: attribute '{attribute}' not found")
            }
            Self::InvalidSchema(msg) => write!(f, "Invalid schema: {msg}"),
            Self::InvalidDataset(msg) => write!(f, "Invalid dataset: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::DataProcessing(msg) => write!(f, "Data processing error: {msg}"),
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for DescryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DescryError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for DescryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(format!("JSON error: {err}"))
    }
}

impl From<polars::error::PolarsError> for DescryError {
    fn from(err: polars::error::PolarsError) -> Self {
        Self::DataProcessing(err.to_string())
    }
}

impl From<DescryError> for String {
    fn from(err: DescryError) -> Self {
        err.to_string()
    }
}

/// Result type alias for descry operations.
pub type Result<T> = std::result::Result<T, DescryError>;

/// Extension trait to add context to results.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> Result<T>;

    /// Add context using a closure (lazy evaluation).
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<DescryError>,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err: DescryError = e.into();
            DescryError::Other(format!("{}: {}", msg.into(), err))
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err: DescryError = e.into();
            DescryError::Other(format!("{}: {}", f(), err))
        })
    }
}
