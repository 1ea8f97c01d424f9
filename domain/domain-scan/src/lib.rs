//! Scan iterator protocol for interval and plane domains.
//!
//! Every algorithm built on the domain encoding reads it through this crate:
//!
//! - [`raster_scan`] yields a domain's intervals in absolute coordinates in
//!   any of the four [`RasterDir`] orders.
//! - [`ScanCursor`] is the same walk as an explicit cursor that can be
//!   advanced, inspected and skipped forward, for synchronized scans over
//!   several domains.
//! - [`grey_scan`] pairs each interval with the samples beneath it; the
//!   sample type is checked against the value table when the scan is built.
//! - [`voxel_scan`] and [`voxel_grey_scan`] extend both to plane domains.
//!
//! End of a scan is `None` from the iterator, never an error.
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**.
//!
//! # Example
//!
//! ```
//! use domain_scan::{RasterDir, raster_scan};
//! use domain_types::IntervalDomain;
//!
//! let dom = IntervalDomain::from_intervals(0, &[vec![(0, 4)], vec![(2, 2), (6, 8)]])?;
//! let area: i64 = raster_scan(&dom, RasterDir::IncLineIncCol).map(|s| s.len()).sum();
//! assert_eq!(area, dom.area());
//! # Ok::<(), domain_types::DomainError>(())
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]

pub mod error;
pub mod grey;
pub mod raster;
pub mod voxel;

pub use error::{ScanError, ScanResult};
pub use grey::{GreyInterval, GreyScan, grey_scan, grey_scan_table};
pub use raster::{IntervalScan, RasterDir, ScanCursor, ScanInterval, raster_scan};
pub use voxel::{VoxelInterval, VoxelScan, voxel_grey_scan, voxel_scan};
