//! Scans over plane domains.

use std::iter::FusedIterator;

use domain_types::{GreyValue, Object3D, PlaneDomain};

use crate::error::{ScanError, ScanResult};
use crate::grey::{GreyInterval, grey_scan_table};
use crate::raster::{IntervalScan, RasterDir, raster_scan};

/// One interval of a plane domain in absolute coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VoxelInterval {
    /// Plane of the interval.
    pub plane: i32,
    /// Line of the interval.
    pub line: i32,
    /// Leftmost column (inclusive).
    pub left: i32,
    /// Rightmost column (inclusive).
    pub right: i32,
}

/// Iterator over every interval of a plane domain, planes in increasing
/// order and each plane in raster order.
#[derive(Debug, Clone)]
pub struct VoxelScan<'a> {
    domain: &'a PlaneDomain,
    planes_loaded: usize,
    plane: i32,
    scan: Option<IntervalScan<'a>>,
}

impl Iterator for VoxelScan<'_> {
    type Item = VoxelInterval;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(itv) = self.scan.as_mut().and_then(Iterator::next) {
                return Some(VoxelInterval {
                    plane: self.plane,
                    line: itv.line,
                    left: itv.left,
                    right: itv.right,
                });
            }
            if self.planes_loaded >= self.domain.plane_count() {
                self.scan = None;
                return None;
            }
            self.plane = self.domain.plane1() + i32::try_from(self.planes_loaded).unwrap_or(i32::MAX);
            self.planes_loaded += 1;
            self.scan = self
                .domain
                .plane(self.plane)
                .map(|d| raster_scan(d, RasterDir::IncLineIncCol));
        }
    }
}

impl FusedIterator for VoxelScan<'_> {}

/// Scans every plane of `domain`.
///
/// # Example
///
/// ```
/// use domain_scan::voxel_scan;
/// use domain_types::{IntervalDomain, PlaneDomain};
///
/// let sq = IntervalDomain::rect(0, 1, 0, 1)?;
/// let pd = PlaneDomain::from_planes(2, vec![Some(sq.clone()), None, Some(sq)]);
/// let planes: Vec<i32> = voxel_scan(&pd).map(|v| v.plane).collect();
/// assert_eq!(planes, vec![2, 2, 4, 4]);
/// # Ok::<(), domain_types::DomainError>(())
/// ```
#[must_use]
pub fn voxel_scan(domain: &PlaneDomain) -> VoxelScan<'_> {
    VoxelScan {
        domain,
        planes_loaded: 0,
        plane: domain.plane1(),
        scan: None,
    }
}

/// Scans every plane of a 3-D object together with its samples read as
/// `T`, yielding `(plane, interval)`.
///
/// # Errors
///
/// - [`ScanError::MissingValues`] if the object has no values or an
///   occupied plane has no table.
/// - [`ScanError::Domain`] wrapping a grey kind mismatch.
/// - [`ScanError::ValuesDoNotCoverDomain`] if a plane's table misses
///   samples.
pub fn voxel_grey_scan<T: GreyValue>(
    object: &Object3D,
) -> ScanResult<impl Iterator<Item = (i32, GreyInterval<'_, T>)> + '_> {
    let values = object.values().ok_or(ScanError::MissingValues)?;
    let mut scans = Vec::with_capacity(object.domain().plane_count());
    for (p, dom) in object.domain().planes() {
        let Some(dom) = dom.filter(|d| !d.is_empty()) else {
            continue;
        };
        let table = values.plane(p).ok_or(ScanError::MissingValues)?.as_table::<T>()?;
        scans.push((p, grey_scan_table(dom, table, RasterDir::IncLineIncCol)?));
    }
    Ok(scans
        .into_iter()
        .flat_map(|(p, scan)| scan.map(move |g| (p, g))))
}
