//! 3-D plane domains.

use std::sync::Arc;

use nalgebra::{Point3, Vector3};
use tracing::debug;

use crate::domain::{IntervalDomain, check_bounds, offset_i32, span};
use crate::error::{DomainError, DomainResult};
use crate::interval::BoundingBox2;
use crate::values::VoxelValues;

/// Inclusive plane/line/column bounds of a 3-D domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox3 {
    /// First plane.
    pub plane1: i32,
    /// Last plane.
    pub lastpl: i32,
    /// First line.
    pub line1: i32,
    /// Last line.
    pub lastln: i32,
    /// First column.
    pub kol1: i32,
    /// Last column.
    pub lastkl: i32,
}

impl BoundingBox3 {
    /// Minimum corner as `(column, line, plane)`.
    #[must_use]
    pub fn min(&self) -> Point3<i32> {
        Point3::new(self.kol1, self.line1, self.plane1)
    }

    /// Maximum corner as `(column, line, plane)`.
    #[must_use]
    pub fn max(&self) -> Point3<i32> {
        Point3::new(self.lastkl, self.lastln, self.lastpl)
    }

    /// Line/column part of the box.
    #[must_use]
    pub const fn to_2d(&self) -> BoundingBox2 {
        BoundingBox2::new(self.line1, self.lastln, self.kol1, self.lastkl)
    }

    /// Number of planes spanned, zero for an inverted box.
    #[must_use]
    pub const fn depth(&self) -> i64 {
        let d = (self.lastpl as i64) - (self.plane1 as i64) + 1;
        if d < 0 { 0 } else { d }
    }
}

/// An ordered, possibly sparse, stack of [`IntervalDomain`]s.
///
/// Plane `p` lives in slot `p - plane1`. Slots hold shared domains so that
/// copies of a plane domain moved only along the plane axis reuse the same
/// planes. An absent slot and an empty domain both denote an empty plane.
///
/// # Example
///
/// ```
/// use domain_types::{IntervalDomain, PlaneDomain};
///
/// let square = IntervalDomain::rect(0, 1, 0, 1)?;
/// let mut pd = PlaneDomain::from_planes(4, vec![None, Some(square.clone()), Some(square)]);
/// assert_eq!((pd.plane1(), pd.lastpl()), (5, 6));
/// assert_eq!(pd.volume(), 8);
/// # Ok::<(), domain_types::DomainError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PlaneDomain {
    plane1: i32,
    lastpl: i32,
    bbox: BoundingBox2,
    voxel_size: Vector3<f64>,
    planes: Vec<Option<Arc<IntervalDomain>>>,
}

/// Line/column box of the canonical empty domain.
const EMPTY_BOX: BoundingBox2 = BoundingBox2::new(0, -1, 0, 0);

impl PlaneDomain {
    /// Creates absent planes `plane1..=lastpl` with unit voxels.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidBounds`] if `lastpl < plane1`.
    pub fn new(plane1: i32, lastpl: i32) -> DomainResult<Self> {
        check_bounds("plane", plane1, lastpl)?;
        Ok(Self {
            plane1,
            lastpl,
            bbox: EMPTY_BOX,
            voxel_size: Vector3::new(1.0, 1.0, 1.0),
            planes: vec![None; span(plane1, lastpl)],
        })
    }

    /// The empty plane domain.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            plane1: 0,
            lastpl: -1,
            bbox: EMPTY_BOX,
            voxel_size: Vector3::new(1.0, 1.0, 1.0),
            planes: Vec::new(),
        }
    }

    /// Builds a standardized plane domain from planes starting at `plane1`.
    #[must_use]
    pub fn from_planes<I>(plane1: i32, planes: I) -> Self
    where
        I: IntoIterator<Item = Option<IntervalDomain>>,
    {
        let planes: Vec<_> = planes.into_iter().map(|p| p.map(Arc::new)).collect();
        let lastpl = plane1 + offset_i32(planes.len()) - 1;
        let mut pd = Self {
            plane1,
            lastpl,
            bbox: EMPTY_BOX,
            voxel_size: Vector3::new(1.0, 1.0, 1.0),
            planes,
        };
        pd.standardize_planes();
        pd
    }

    /// Sets the physical voxel size.
    #[must_use]
    pub fn with_voxel_size(mut self, voxel_size: Vector3<f64>) -> Self {
        self.voxel_size = voxel_size;
        self
    }

    /// First plane.
    #[must_use]
    pub const fn plane1(&self) -> i32 {
        self.plane1
    }

    /// Last plane.
    #[must_use]
    pub const fn lastpl(&self) -> i32 {
        self.lastpl
    }

    /// Number of plane slots.
    #[must_use]
    pub fn plane_count(&self) -> usize {
        self.planes.len()
    }

    /// Physical size of a voxel as `(column, line, plane)`.
    #[must_use]
    pub const fn voxel_size(&self) -> Vector3<f64> {
        self.voxel_size
    }

    /// Replaces the voxel size.
    pub fn set_voxel_size(&mut self, voxel_size: Vector3<f64>) {
        self.voxel_size = voxel_size;
    }

    /// Plane, line and column bounds.
    #[must_use]
    pub const fn bounding_box(&self) -> BoundingBox3 {
        BoundingBox3 {
            plane1: self.plane1,
            lastpl: self.lastpl,
            line1: self.bbox.line1,
            lastln: self.bbox.lastln,
            kol1: self.bbox.kol1,
            lastkl: self.bbox.lastkl,
        }
    }

    fn slot(&self, plane: i32) -> Option<usize> {
        usize::try_from(i64::from(plane) - i64::from(self.plane1))
            .ok()
            .filter(|&i| i < self.planes.len())
    }

    /// Domain of `plane`, if present.
    #[must_use]
    pub fn plane(&self, plane: i32) -> Option<&IntervalDomain> {
        self.plane_arc(plane).map(AsRef::as_ref)
    }

    /// Shared domain of `plane`, if present.
    #[must_use]
    pub fn plane_arc(&self, plane: i32) -> Option<&Arc<IntervalDomain>> {
        self.slot(plane).and_then(|i| self.planes[i].as_ref())
    }

    /// Iterates over `(plane, domain)` for every slot in increasing order.
    pub fn planes(&self) -> impl DoubleEndedIterator<Item = (i32, Option<&Arc<IntervalDomain>>)> + '_ {
        (0..self.planes.len()).map(move |i| (self.plane1 + offset_i32(i), self.planes[i].as_ref()))
    }

    /// Stores the domain of `plane` and grows the line/column box to hold it.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::PlaneOutOfRange`] if `plane` has no slot.
    pub fn set_plane(&mut self, plane: i32, domain: Option<Arc<IntervalDomain>>) -> DomainResult<()> {
        let idx = self.slot(plane).ok_or(DomainError::PlaneOutOfRange {
            plane,
            plane1: self.plane1,
            lastpl: self.lastpl,
        })?;
        if let Some(d) = domain.as_deref().filter(|d| !d.is_empty()) {
            self.bbox = if self.bbox.lastln < self.bbox.line1 {
                d.bounding_box()
            } else {
                self.bbox.union(&d.bounding_box())
            };
        }
        self.planes[idx] = domain;
        Ok(())
    }

    /// Total number of occupied voxels.
    #[must_use]
    pub fn volume(&self) -> i64 {
        self.planes.iter().flatten().map(|d| d.area()).sum()
    }

    /// Total number of intervals over all planes.
    #[must_use]
    pub fn interval_count(&self) -> usize {
        self.planes.iter().flatten().map(|d| d.interval_count()).sum()
    }

    /// Returns `true` if no voxel is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.planes.iter().flatten().all(|d| d.is_empty())
    }

    /// Returns `true` if the absolute voxel is occupied.
    #[must_use]
    pub fn contains(&self, plane: i32, line: i32, col: i32) -> bool {
        self.plane(plane).is_some_and(|d| d.contains(line, col))
    }

    /// Returns `true` if every plane is standard, the boundary planes are
    /// occupied and the line/column box is the union of the planes' boxes.
    #[must_use]
    pub fn is_standard(&self) -> bool {
        if self.planes.is_empty() {
            return self.plane1 == 0 && self.lastpl == -1 && self.bbox == EMPTY_BOX;
        }
        let occupied = |p: &Option<Arc<IntervalDomain>>| p.as_ref().is_some_and(|d| d.area() > 0);
        self.planes.first().is_some_and(occupied)
            && self.planes.last().is_some_and(occupied)
            && self.planes.iter().flatten().all(|d| d.is_standard())
            && self.bbox == self.planes_box()
    }

    fn planes_box(&self) -> BoundingBox2 {
        self.planes
            .iter()
            .flatten()
            .filter(|d| !d.is_empty())
            .map(|d| d.bounding_box())
            .reduce(|a, b| a.union(&b))
            .unwrap_or(EMPTY_BOX)
    }

    /// Restores a minimal bounding box in place, trimming `values` in step.
    ///
    /// Every plane is standardized, boundary planes without positive area
    /// are dropped along with their values and the line/column box becomes
    /// the union of the remaining planes' boxes. Interior empty planes are
    /// kept. A domain with no occupied plane collapses to the empty domain.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::PlaneRangeMismatch`] if `values` does not span
    /// exactly the same planes as the domain; nothing is modified then.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use domain_types::{IntervalDomain, PlaneDomain};
    ///
    /// let mut pd = PlaneDomain::new(0, 4)?;
    /// pd.set_plane(2, Some(Arc::new(IntervalDomain::rect(3, 3, 7, 8)?)))?;
    /// pd.set_plane(4, Some(Arc::new(IntervalDomain::empty())))?;
    /// pd.standardize(None)?;
    /// assert_eq!((pd.plane1(), pd.lastpl()), (2, 2));
    /// assert_eq!(pd.bounding_box().kol1, 7);
    /// # Ok::<(), domain_types::DomainError>(())
    /// ```
    pub fn standardize(&mut self, values: Option<&mut VoxelValues>) -> DomainResult<()> {
        if let Some(v) = values.as_deref() {
            if v.plane1() != self.plane1 || v.lastpl() != self.lastpl {
                return Err(DomainError::PlaneRangeMismatch {
                    plane1: self.plane1,
                    lastpl: self.lastpl,
                    values_plane1: v.plane1(),
                    values_lastpl: v.lastpl(),
                });
            }
        }
        let before = (self.plane1, self.lastpl);
        let kept = self.standardize_planes();
        if let Some(v) = values {
            match kept {
                Some((first, last)) => v.retain_slots(first, last),
                None => v.clear(),
            }
        }
        debug!(
            from = ?before,
            to = ?(self.plane1, self.lastpl),
            volume = self.volume(),
            "Standardized plane domain"
        );
        Ok(())
    }

    /// Standardizes planes and trims boundary slots, returning the kept
    /// slot range.
    fn standardize_planes(&mut self) -> Option<(usize, usize)> {
        for d in self.planes.iter_mut().flatten() {
            if !d.is_standard() {
                Arc::make_mut(d).standardize();
            }
        }
        let occupied = |p: &Option<Arc<IntervalDomain>>| p.as_ref().is_some_and(|d| d.area() > 0);
        let Some(first) = self.planes.iter().position(occupied) else {
            let voxel_size = self.voxel_size;
            *self = Self::empty().with_voxel_size(voxel_size);
            return None;
        };
        let last = self.planes.iter().rposition(occupied).unwrap_or(first);
        self.planes.truncate(last + 1);
        self.planes.drain(..first);
        self.plane1 += offset_i32(first);
        self.lastpl = self.plane1 + offset_i32(self.planes.len()) - 1;
        self.bbox = self.planes_box();
        Some((first, last))
    }

    /// Returns a copy moved by `dp` planes, `dl` lines and `dk` columns.
    ///
    /// When only the plane origin moves the copy shares every plane with
    /// `self`.
    #[must_use]
    pub fn shifted(&self, dp: i32, dl: i32, dk: i32) -> Self {
        if self.planes.is_empty() {
            return self.clone();
        }
        let planes = if dl == 0 && dk == 0 {
            self.planes.clone()
        } else {
            self.planes
                .iter()
                .map(|p| p.as_ref().map(|d| Arc::new(d.shifted(dl, dk))))
                .collect()
        };
        let bbox = if self.bbox == EMPTY_BOX {
            EMPTY_BOX
        } else {
            BoundingBox2::new(
                self.bbox.line1 + dl,
                self.bbox.lastln + dl,
                self.bbox.kol1 + dk,
                self.bbox.lastkl + dk,
            )
        };
        Self {
            plane1: self.plane1 + dp,
            lastpl: self.lastpl + dp,
            bbox,
            voxel_size: self.voxel_size,
            planes,
        }
    }
}

impl Default for PlaneDomain {
    fn default() -> Self {
        Self::empty()
    }
}

/// Deep equality of plane ranges and per-plane domains; an absent plane
/// equals an empty one and all empty plane domains are equal. Voxel size is
/// not compared.
impl PartialEq for PlaneDomain {
    fn eq(&self, other: &Self) -> bool {
        if self.is_empty() && other.is_empty() {
            return true;
        }
        let empty = IntervalDomain::empty();
        self.plane1 == other.plane1
            && self.lastpl == other.lastpl
            && self
                .planes
                .iter()
                .zip(&other.planes)
                .all(|(a, b)| a.as_deref().unwrap_or(&empty) == b.as_deref().unwrap_or(&empty))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::grey::PixelValue;
    use crate::values::{GreyValues, ValueTable};
    use approx::assert_relative_eq;

    fn square(line: i32, col: i32) -> IntervalDomain {
        IntervalDomain::rect(line, line + 1, col, col + 1).unwrap()
    }

    #[test]
    fn standardize_trims_boundary_planes_only() {
        let mut pd = PlaneDomain::new(10, 15).unwrap();
        pd.set_plane(11, Some(Arc::new(square(0, 0)))).unwrap();
        pd.set_plane(12, Some(Arc::new(IntervalDomain::empty()))).unwrap();
        pd.set_plane(14, Some(Arc::new(square(5, 5)))).unwrap();
        pd.standardize(None).unwrap();
        assert_eq!((pd.plane1(), pd.lastpl()), (11, 14));
        assert_eq!(pd.plane_count(), 4);
        assert!(pd.plane(13).is_none());
        assert_eq!(pd.bounding_box().to_2d(), BoundingBox2::new(0, 6, 0, 6));
        assert!(pd.is_standard());
    }

    #[test]
    fn standardize_is_idempotent() {
        let mut pd = PlaneDomain::from_planes(0, vec![None, Some(square(2, 3)), None]);
        let once = pd.clone();
        pd.standardize(None).unwrap();
        assert_eq!(pd, once);
        assert_eq!(pd.bounding_box(), once.bounding_box());
    }

    #[test]
    fn standardize_all_empty_collapses() {
        let mut pd = PlaneDomain::new(3, 5).unwrap();
        pd.set_plane(4, Some(Arc::new(IntervalDomain::new(0, 3, 0, 3).unwrap())))
            .unwrap();
        let mut values = VoxelValues::new(3, 3, PixelValue::UByte(0));
        pd.standardize(Some(&mut values)).unwrap();
        assert!(pd.is_empty());
        assert_eq!(pd.bounding_box().depth(), 0);
        assert_eq!(values.plane_count(), 0);
        assert!(pd.is_standard());
    }

    #[test]
    fn standardize_trims_values_in_step() {
        let mut pd = PlaneDomain::new(0, 3).unwrap();
        pd.set_plane(2, Some(Arc::new(square(0, 0)))).unwrap();
        let mut values = VoxelValues::new(0, 4, PixelValue::Int(-1));
        let table = ValueTable::new(BoundingBox2::new(0, 1, 0, 1), 9i32).unwrap();
        values.set_plane(2, Some(Arc::new(GreyValues::from(table)))).unwrap();
        pd.standardize(Some(&mut values)).unwrap();
        assert_eq!((values.plane1(), values.lastpl()), (2, 2));
        assert_eq!(values.get(2, 1, 1), PixelValue::Int(9));
    }

    #[test]
    fn standardize_rejects_mismatched_values() {
        let mut pd = PlaneDomain::new(0, 3).unwrap();
        let mut values = VoxelValues::new(0, 2, PixelValue::Int(0));
        assert!(matches!(
            pd.standardize(Some(&mut values)),
            Err(DomainError::PlaneRangeMismatch { .. })
        ));
        assert_eq!(pd.plane_count(), 4);
    }

    #[test]
    fn plane_shift_shares_planes() {
        let pd = PlaneDomain::from_planes(0, vec![Some(square(0, 0)), Some(square(1, 1))])
            .with_voxel_size(Vector3::new(0.5, 0.5, 2.0));
        let moved = pd.shifted(7, 0, 0);
        assert!(Arc::ptr_eq(pd.plane_arc(0).unwrap(), moved.plane_arc(7).unwrap()));
        let moved = pd.shifted(0, 2, -1);
        assert!(moved.contains(1, 3, 0));
        assert_eq!(moved.bounding_box().min(), Point3::new(-1, 2, 0));
        assert_relative_eq!(moved.voxel_size().z, 2.0);
    }

    #[test]
    fn set_plane_range_checked() {
        let mut pd = PlaneDomain::new(0, 1).unwrap();
        assert!(matches!(
            pd.set_plane(2, None),
            Err(DomainError::PlaneOutOfRange { plane: 2, .. })
        ));
    }
}
