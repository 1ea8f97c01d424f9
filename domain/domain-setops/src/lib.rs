//! N-way set algebra on interval and plane domains.
//!
//! This crate combines any number of domains at once by scanning them in
//! lock step, rather than folding pairwise operations:
//!
//! - [`intersect_n`] / [`union_n`] for 2-D interval domains
//! - [`intersect_n_3d`] / [`union_n_3d`] for plane domains, plane by plane
//!   and optionally in parallel
//! - [`intersect_objects`] / [`union_objects`] for whole objects, with
//!   optional per-sample grey averaging
//! - [`dilate`] and [`has_intersection`], the adjacency primitives used by
//!   connected-component labeling
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**.
//!
//! # Quick Start
//!
//! ```
//! use domain_setops::{intersect_n, union_n};
//! use domain_types::IntervalDomain;
//!
//! let a = IntervalDomain::rect(0, 9, 0, 9)?;
//! let b = IntervalDomain::rect(5, 14, 5, 14)?;
//! let i = intersect_n(&[&a, &b]);
//! let u = union_n(&[&a, &b]);
//! assert_eq!(i.area() + u.area(), a.area() + b.area());
//! # Ok::<(), domain_types::DomainError>(())
//! ```
//!
//! # Conventions
//!
//! | Inputs | Intersection | Union |
//! |--------|--------------|-------|
//! | none | empty | empty |
//! | one | copy of it | copy of it |
//! | any empty | empty | empty inputs dropped |
//!
//! Results are always new, standardized domains.

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::similar_names)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::missing_panics_doc)]

mod average;
pub mod config;
pub mod dilate;
pub mod error;
pub mod intersect;
pub mod objects;
pub mod planes;
pub mod union;

pub use config::SetOpConfig;
pub use dilate::{Connectivity2, dilate};
pub use error::{SetOpError, SetOpResult};
pub use intersect::{has_intersection, intersect_n};
pub use objects::{intersect_objects, union_objects};
pub use planes::{intersect_n_3d, union_n_3d};
pub use union::union_n;
