//! Run-length encoded 2-D and 3-D domains.
//!
//! An image's occupied region is stored as sorted, non-overlapping,
//! non-adjacent intervals per scan line ([`IntervalDomain`]) and, in 3-D, as
//! an ordered stack of such domains ([`PlaneDomain`]). Grey values live in
//! rectangular tables paired with a domain ([`Object2D`], [`Object3D`]).
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. It can be used in:
//! - CLI tools
//! - Web applications (WASM)
//! - Servers
//! - Python bindings
//!
//! # Building domains
//!
//! ```
//! use domain_types::{DynItvPool, IntervalDomain};
//!
//! // From explicit intervals (absolute columns, one list per line).
//! let a = IntervalDomain::from_intervals(0, &[vec![(0, 3)], vec![(1, 2), (6, 7)]])?;
//! assert_eq!(a.area(), 8);
//!
//! // From dense bitmask rows, least significant bit first.
//! let b = IntervalDomain::from_bitmask(0, 0, 8, &[[0b1100_0011u8]])?;
//! assert_eq!(b.interval_count(), 2);
//!
//! // Interval by interval through a pool, then standardized.
//! let mut c = IntervalDomain::new(0, 9, 0, 99)?;
//! let mut pool = DynItvPool::default();
//! c.dyn_add(&mut pool, 4, 10, 5)?;
//! c.standardize();
//! assert_eq!((c.line1(), c.kol1(), c.lastkl()), (4, 10, 14));
//! # Ok::<(), domain_types::DomainError>(())
//! ```
//!
//! # Standardization
//!
//! Constructors and pool filling do not keep the bounding box minimal;
//! [`IntervalDomain::standardize`] and [`PlaneDomain::standardize`] restore
//! it. Every operation that returns a new domain returns it standardized.

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::similar_names)]
// Line and column coordinates are i32 while storage is indexed by usize.
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::missing_panics_doc)]

pub mod domain;
pub mod error;
pub mod grey;
pub mod interval;
pub mod object;
pub mod plane;
pub mod pool;
pub mod values;

pub use domain::{IntervalDomain, IntervalDomainBuilder};
pub use error::{DomainError, DomainResult};
pub use grey::{GreyKind, GreyValue, PixelValue, Rgba};
pub use interval::{BoundingBox2, Interval};
pub use object::{DomainObject, Object2D, Object3D};
pub use plane::{BoundingBox3, PlaneDomain};
pub use pool::{DEFAULT_ITVS_IN_BLOCK, DynItvPool, set_bit_interval};
pub use values::{GreyValues, ValueTable, VoxelValues};

/// Re-export of the vector type used for voxel sizes.
pub use nalgebra::Vector3;
