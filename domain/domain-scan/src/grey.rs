//! Grey value scans.
//!
//! A grey scan walks a domain exactly like [`raster_scan`](crate::raster_scan)
//! and pairs every interval with the slice of samples under it. The sample
//! type is declared by the caller and checked against the table once, when
//! the scan is built.

use std::iter::FusedIterator;

use domain_types::{GreyValue, IntervalDomain, Object2D, ValueTable};

use crate::error::{ScanError, ScanResult};
use crate::raster::{IntervalScan, RasterDir, ScanInterval, raster_scan};

/// An interval with its samples, in increasing column order regardless of
/// the scan direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GreyInterval<'a, T> {
    /// The interval.
    pub interval: ScanInterval,
    /// Samples of columns `interval.left..=interval.right`.
    pub values: &'a [T],
}

/// Iterator over intervals and their samples.
#[derive(Debug, Clone)]
pub struct GreyScan<'a, T> {
    scan: IntervalScan<'a>,
    table: &'a ValueTable<T>,
}

impl<'a, T: GreyValue> Iterator for GreyScan<'a, T> {
    type Item = GreyInterval<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let interval = self.scan.next()?;
        let values = self
            .table
            .row(interval.line, interval.left, interval.right)
            .unwrap_or(&[]);
        Some(GreyInterval { interval, values })
    }
}

impl<T: GreyValue> FusedIterator for GreyScan<'_, T> {}

/// Scans `domain` in `dir` order together with `table`.
///
/// # Errors
///
/// Returns [`ScanError::ValuesDoNotCoverDomain`] if the table lacks a slot
/// for some sample of the domain.
pub fn grey_scan_table<'a, T: GreyValue>(
    domain: &'a IntervalDomain,
    table: &'a ValueTable<T>,
    dir: RasterDir,
) -> ScanResult<GreyScan<'a, T>> {
    if !table.covers(domain) {
        return Err(ScanError::ValuesDoNotCoverDomain {
            table: format!("{:?}", table.bounding_box()),
            domain: format!("{:?}", domain.bounding_box()),
        });
    }
    Ok(GreyScan {
        scan: raster_scan(domain, dir),
        table,
    })
}

/// Scans an object's domain in `dir` order, reading its samples as `T`.
///
/// # Errors
///
/// - [`ScanError::MissingValues`] if the object has no values.
/// - [`ScanError::Domain`] wrapping a grey kind mismatch if the values are
///   not of type `T`.
/// - [`ScanError::ValuesDoNotCoverDomain`] if the table misses samples.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use domain_scan::{RasterDir, grey_scan};
/// use domain_types::{GreyValues, IntervalDomain, Object2D, ValueTable};
///
/// let dom = IntervalDomain::from_intervals(0, &[vec![(0, 0), (2, 3)]])?;
/// let mut table = ValueTable::for_domain(&dom, 0u8);
/// table.row_mut(0, 0, 3).unwrap().copy_from_slice(&[1, 2, 3, 4]);
/// let obj = Object2D::with_values(dom, Arc::new(GreyValues::from(table)))?;
///
/// let sums: Vec<u32> = grey_scan::<u8>(&obj, RasterDir::IncLineIncCol)?
///     .map(|g| g.values.iter().map(|&v| u32::from(v)).sum())
///     .collect();
/// assert_eq!(sums, vec![1, 7]);
/// assert!(grey_scan::<i32>(&obj, RasterDir::IncLineIncCol).is_err());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn grey_scan<T: GreyValue>(object: &Object2D, dir: RasterDir) -> ScanResult<GreyScan<'_, T>> {
    let values = object.values().ok_or(ScanError::MissingValues)?;
    let table = values.as_table::<T>()?;
    grey_scan_table(object.domain(), table, dir)
}
