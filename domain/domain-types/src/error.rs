//! Error types for domain construction and maintenance.

use crate::grey::GreyKind;

/// Errors that can occur while building or mutating domains and value tables.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum DomainError {
    /// A bounding box with its last coordinate before its first.
    #[error("invalid bounds: {first}..={last} on the {axis} axis")]
    InvalidBounds {
        /// Axis name ("line", "column" or "plane").
        axis: &'static str,
        /// First coordinate.
        first: i32,
        /// Last coordinate.
        last: i32,
    },

    /// A line coordinate outside the domain's line range.
    #[error("line {line} is outside {line1}..={lastln}")]
    LineOutOfRange {
        /// The offending line.
        line: i32,
        /// First line of the domain.
        line1: i32,
        /// Last line of the domain.
        lastln: i32,
    },

    /// A plane coordinate outside the plane domain's plane range.
    #[error("plane {plane} is outside {plane1}..={lastpl}")]
    PlaneOutOfRange {
        /// The offending plane.
        plane: i32,
        /// First plane of the domain.
        plane1: i32,
        /// Last plane of the domain.
        lastpl: i32,
    },

    /// Intervals that are out of order, overlapping or inverted.
    #[error("malformed intervals on line {line}: {details}")]
    MalformedIntervals {
        /// Line on which the problem was found.
        line: i32,
        /// Description of the problem.
        details: String,
    },

    /// The stored grey kind differs from the declared one.
    #[error("grey kind mismatch: expected {expected:?}, found {found:?}")]
    GreyKindMismatch {
        /// Kind the caller declared.
        expected: GreyKind,
        /// Kind actually stored.
        found: GreyKind,
    },

    /// A value table that does not cover the domain it is paired with.
    #[error("value table does not cover the domain: {details}")]
    ValuesDoNotCoverDomain {
        /// Description of the mismatch.
        details: String,
    },

    /// A voxel value table whose plane range differs from its plane domain.
    #[error("voxel values cover planes {values_plane1}..={values_lastpl}, domain covers {plane1}..={lastpl}")]
    PlaneRangeMismatch {
        /// First plane of the domain.
        plane1: i32,
        /// Last plane of the domain.
        lastpl: i32,
        /// First plane of the values.
        values_plane1: i32,
        /// Last plane of the values.
        values_lastpl: i32,
    },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
