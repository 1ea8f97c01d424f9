//! Connected-component labeling of run-length encoded domains.
//!
//! Labeling never floods samples: components are found from interval
//! adjacency alone.
//!
//! - [`label_2d`] / [`label_object_2d`]: one forward pass over the lines of
//!   a 2-D domain, joining intervals of consecutive lines in a union-find.
//! - [`label_plane_domain`] / [`label_3d`]: every plane labeled on its own
//!   (in parallel), then fragments of adjacent planes fused through a
//!   mutex-guarded [`UnionFind`].
//! - [`label`]: dispatch on a [`DomainObject`].
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**.
//!
//! # Connectivity
//!
//! | Connectivity | 2-D | 3-D within a plane | 3-D across planes |
//! |--------------|-----|--------------------|-------------------|
//! | `Four` | edge | edge | face |
//! | `Six` | invalid | edge | face |
//! | `Eight` | edge, corner | edge, corner | face, edge, corner |
//! | `Eighteen`, `TwentySix` | invalid | edge, corner | face, edge, corner |
//!
//! # Example
//!
//! ```
//! use domain_label::{LabelConfig, label};
//! use domain_types::{DomainObject, IntervalDomain};
//!
//! let dom = IntervalDomain::from_intervals(0, &[vec![(0, 1), (5, 6)]])?;
//! let parts = label(&DomainObject::from(dom), &LabelConfig::planar())?;
//! assert_eq!(parts.len(), 2);
//! # Ok::<(), domain_label::LabelError>(())
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod label2d;
pub mod label3d;
pub mod union_find;

pub use config::{Connectivity, LabelConfig};
pub use error::{LabelError, LabelResult};
pub use label2d::{label_2d, label_object_2d};
pub use label3d::{label_3d, label_plane_domain};
pub use union_find::{SharedUnionFind, UnionFind};

use domain_types::DomainObject;

/// Labels any domain object.
///
/// [`DomainObject::Empty`] has no components.
///
/// # Errors
///
/// As [`label_object_2d`] or [`label_3d`], depending on the object.
pub fn label(object: &DomainObject, config: &LabelConfig) -> LabelResult<Vec<DomainObject>> {
    match object {
        DomainObject::Empty => Ok(Vec::new()),
        DomainObject::TwoD(obj) => Ok(label_object_2d(obj, config)?
            .into_iter()
            .map(DomainObject::from)
            .collect()),
        DomainObject::ThreeD(obj) => Ok(label_3d(obj, config)?
            .into_iter()
            .map(DomainObject::from)
            .collect()),
    }
}
