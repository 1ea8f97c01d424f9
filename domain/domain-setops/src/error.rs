//! Error types for set operations.

use domain_types::DomainError;
use thiserror::Error;

/// Errors that can occur during set operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SetOpError {
    /// 2-D and 3-D objects were mixed in one operation.
    #[error("dimension mismatch: {details}")]
    DimensionMismatch {
        /// Description of the mismatch.
        details: String,
    },

    /// Grey averaging was requested but an input has no values.
    #[error("object {index} has no grey values to average")]
    MissingValues {
        /// Position of the object among the inputs.
        index: usize,
    },

    /// Error from building the output domain or values.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Result type for set operations.
pub type SetOpResult<T> = Result<T, SetOpError>;
