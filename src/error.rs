//! Error types for saltio
//!
//! Provides a unified error type for resource and store operations.
//!
//! Bounds violations are not errors: out-of-range offsets transfer zero
//! bytes and short transfers are reported through the returned count.

use thiserror::Error;

/// Result type alias using SaltError
pub type Result<T> = std::result::Result<T, SaltError>;

/// Unified error type for saltio operations
#[derive(Debug, Error)]
pub enum SaltError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Lifecycle Errors
    // -------------------------------------------------------------------------
    /// `init` could not establish the backing handle
    #[error("Acquisition failed: {0}")]
    Acquisition(String),

    /// A resource or store was used while not initialized
    #[error("Usage on invalid resource: {0}")]
    UsageOnInvalid(String),

    // -------------------------------------------------------------------------
    // Composite Errors
    // -------------------------------------------------------------------------
    /// A member of a list composite failed; earlier members were rolled back
    #[error("List member {index} failed: {source}")]
    Member {
        index: usize,
        #[source]
        source: Box<SaltError>,
    },
}

impl SaltError {
    /// True for errors raised by `init` (including list member failures)
    pub fn is_acquisition(&self) -> bool {
        match self {
            SaltError::Acquisition(_) => true,
            SaltError::Member { source, .. } => source.is_acquisition(),
            _ => false,
        }
    }
}
