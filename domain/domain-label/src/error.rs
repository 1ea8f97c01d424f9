//! Error types for labeling.

use domain_types::DomainError;
use thiserror::Error;

use crate::config::Connectivity;

/// Errors that can occur during connected-component labeling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum LabelError {
    /// The connectivity has no meaning for the object's dimensionality.
    #[error("{connectivity:?} connectivity is not valid for {dimensions}-D labeling")]
    InvalidConnectivity {
        /// Requested connectivity.
        connectivity: Connectivity,
        /// Dimensionality of the object being labeled.
        dimensions: u8,
    },

    /// A 3-D object had no fragment with positive area on any plane.
    #[error("no fragments to label")]
    NoFragments,

    /// More components were found than the configured maximum.
    #[error("found {found} objects, more than the maximum of {max}")]
    TooManyObjects {
        /// Configured maximum.
        max: usize,
        /// Number of components found.
        found: usize,
    },

    /// Error from building an output domain or value table.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Result type for labeling.
pub type LabelResult<T> = Result<T, LabelError>;
