//! Error types for scanning.

use domain_types::DomainError;
use thiserror::Error;

/// Errors that can occur while setting up a scan.
///
/// Running out of intervals is not an error: scans are iterators and simply
/// return `None`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ScanError {
    /// A grey scan was requested on an object without values.
    #[error("object has no grey values")]
    MissingValues,

    /// The value table has no slot for some sample of the domain.
    #[error("value table {table} does not cover domain {domain}")]
    ValuesDoNotCoverDomain {
        /// Bounds of the table.
        table: String,
        /// Bounds of the domain.
        domain: String,
    },

    /// Error from the underlying domain or value table.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Result type for scan setup.
pub type ScanResult<T> = Result<T, ScanError>;
