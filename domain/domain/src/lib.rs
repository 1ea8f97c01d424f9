//! Run-length encoded image domains for 2-D and 3-D biomedical images.
//!
//! This umbrella crate re-exports all domain-* crates, providing a unified API
//! over the interval-domain engine. All crates are Layer 0 (zero Bevy
//! dependencies) and can be used in CLI tools, WASM, servers, or Python
//! bindings.
//!
//! # Quick Start
//!
//! ```
//! use domain::prelude::*;
//!
//! let a = IntervalDomain::rect(0, 0, 0, 0)?;
//! let b = IntervalDomain::rect(10, 10, 10, 10)?;
//! let both = union_n(&[&a, &b]);
//! assert_eq!(both.area(), 2);
//!
//! let parts = label_2d(&both, &LabelConfig::planar())?;
//! assert_eq!(parts.len(), 2);
//! # Ok::<(), domain::label::LabelError>(())
//! ```
//!
//! # Module Organization
//!
//! - [`types`] - Interval and plane domains, the dynamic interval pool,
//!   standardization, grey value tables and objects
//! - [`scan`] - Raster, grey and voxel scans
//! - [`setops`] - N-way intersection and union, grey averaging, dilation
//! - [`label`] - 2-D and 3-D connected-component labeling
//!
//! # Feature Flags
//!
//! - `serde` - Serialize/deserialize plain data types and configurations

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

// =============================================================================
// Re-exports
// =============================================================================

/// Interval and plane domains, grey value tables and objects.
pub use domain_types as types;

/// Raster, grey and voxel scans.
pub use domain_scan as scan;

/// N-way set algebra on domains and objects.
pub use domain_setops as setops;

/// Connected-component labeling.
pub use domain_label as label;

// =============================================================================
// Prelude
// =============================================================================

/// Common imports for domain processing.
///
/// # Usage
///
/// ```
/// use domain::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use domain_types::{
        BoundingBox2, BoundingBox3, DomainObject, DynItvPool, GreyKind, GreyValue, GreyValues,
        Interval, IntervalDomain, IntervalDomainBuilder, Object2D, Object3D, PixelValue,
        PlaneDomain, Rgba, ValueTable, VoxelValues,
    };

    // Scanning
    pub use domain_scan::{RasterDir, grey_scan, raster_scan, voxel_scan};

    // Set algebra
    pub use domain_setops::{
        SetOpConfig, intersect_n, intersect_n_3d, intersect_objects, union_n, union_n_3d,
        union_objects,
    };

    // Labeling
    pub use domain_label::{Connectivity, LabelConfig, label, label_2d, label_3d};
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prelude_imports() {
        use prelude::*;

        let dom = IntervalDomain::empty();
        assert!(dom.is_empty());
        assert_eq!(raster_scan(&dom, RasterDir::default()).count(), 0);
    }

    #[test]
    fn test_module_reexports() {
        let _ = types::DynItvPool::default();
        let _ = setops::SetOpConfig::default();
        let _ = label::LabelConfig::volumetric();
    }
}
