//! Grey value tables for 2-D and 3-D objects.

use std::sync::Arc;

use crate::domain::{IntervalDomain, span};
use crate::error::{DomainError, DomainResult};
use crate::grey::{GreyKind, GreyValue, PixelValue, Rgba};
use crate::interval::BoundingBox2;

/// Rectangular table of samples over a bounding box.
///
/// Samples outside the box read as the background value.
///
/// # Example
///
/// ```
/// use domain_types::{BoundingBox2, ValueTable};
///
/// let mut table = ValueTable::new(BoundingBox2::new(0, 1, 10, 12), 0u8)?;
/// table.set(1, 11, 200)?;
/// assert_eq!(table.get(1, 11), 200);
/// assert_eq!(table.get(1, 13), 0);
/// assert_eq!(table.row(1, 10, 12), Some(&[0, 200, 0][..]));
/// # Ok::<(), domain_types::DomainError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValueTable<T> {
    bbox: BoundingBox2,
    width: usize,
    data: Vec<T>,
    background: T,
}

impl<T: GreyValue> ValueTable<T> {
    /// Creates a table over `bbox` filled with `background`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidBounds`] for an inverted box.
    pub fn new(bbox: BoundingBox2, background: T) -> DomainResult<Self> {
        if bbox.lastln < bbox.line1 {
            return Err(DomainError::InvalidBounds {
                axis: "line",
                first: bbox.line1,
                last: bbox.lastln,
            });
        }
        if bbox.lastkl < bbox.kol1 {
            return Err(DomainError::InvalidBounds {
                axis: "column",
                first: bbox.kol1,
                last: bbox.lastkl,
            });
        }
        let width = span(bbox.kol1, bbox.lastkl);
        let height = span(bbox.line1, bbox.lastln);
        Ok(Self {
            bbox,
            width,
            data: vec![background; width * height],
            background,
        })
    }

    /// Creates a background-filled table covering `domain`.
    ///
    /// An empty domain gives a table with no samples.
    #[must_use]
    pub fn for_domain(domain: &IntervalDomain, background: T) -> Self {
        Self::new(domain.bounding_box(), background).unwrap_or(Self {
            bbox: domain.bounding_box(),
            width: 0,
            data: Vec::new(),
            background,
        })
    }

    /// Bounds of the table.
    #[must_use]
    pub const fn bounding_box(&self) -> BoundingBox2 {
        self.bbox
    }

    /// Background value.
    #[must_use]
    pub const fn background(&self) -> T {
        self.background
    }

    /// Replaces the background value.
    pub fn set_background(&mut self, background: T) {
        self.background = background;
    }

    fn index(&self, line: i32, col: i32) -> Option<usize> {
        if self.data.is_empty() || !self.bbox.contains(line, col) {
            return None;
        }
        let row = span(self.bbox.line1, line) - 1;
        let c = span(self.bbox.kol1, col) - 1;
        Some(row * self.width + c)
    }

    /// Value at the absolute sample, or the background outside the table.
    #[must_use]
    pub fn get(&self, line: i32, col: i32) -> T {
        self.index(line, col)
            .and_then(|i| self.data.get(i).copied())
            .unwrap_or(self.background)
    }

    /// Stores a value at the absolute sample.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::ValuesDoNotCoverDomain`] if the sample lies
    /// outside the table.
    pub fn set(&mut self, line: i32, col: i32, value: T) -> DomainResult<()> {
        let slot = self
            .index(line, col)
            .and_then(|i| self.data.get_mut(i))
            .ok_or_else(|| DomainError::ValuesDoNotCoverDomain {
                details: format!("sample ({line}, {col}) is outside {:?}", self.bbox),
            })?;
        *slot = value;
        Ok(())
    }

    fn row_range(&self, line: i32, left: i32, right: i32) -> Option<std::ops::Range<usize>> {
        if right < left || left < self.bbox.kol1 || right > self.bbox.lastkl {
            return None;
        }
        let start = self.index(line, left)?;
        Some(start..start + span(left, right))
    }

    /// Samples of `line` in the absolute columns `left..=right`, or `None`
    /// if that run is not inside the table.
    #[must_use]
    pub fn row(&self, line: i32, left: i32, right: i32) -> Option<&[T]> {
        let range = self.row_range(line, left, right)?;
        self.data.get(range)
    }

    /// Mutable samples of `line` in the absolute columns `left..=right`.
    pub fn row_mut(&mut self, line: i32, left: i32, right: i32) -> Option<&mut [T]> {
        let range = self.row_range(line, left, right)?;
        self.data.get_mut(range)
    }

    /// Returns `true` if every sample of `domain` has a slot in the table.
    #[must_use]
    pub fn covers(&self, domain: &IntervalDomain) -> bool {
        domain.is_empty()
            || (!self.data.is_empty()
                && self.bbox.intersection(&domain.bounding_box()) == Some(domain.bounding_box()))
    }
}

/// A value table of any kind.
#[derive(Debug, Clone, PartialEq)]
pub enum GreyValues {
    /// 32-bit signed integers.
    Int(ValueTable<i32>),
    /// 16-bit signed integers.
    Short(ValueTable<i16>),
    /// 8-bit unsigned integers.
    UByte(ValueTable<u8>),
    /// 32-bit floats.
    Float(ValueTable<f32>),
    /// 64-bit floats.
    Double(ValueTable<f64>),
    /// Packed colours.
    Rgba(ValueTable<Rgba>),
}

macro_rules! each_table {
    ($values:expr, $t:ident => $body:expr) => {
        match $values {
            GreyValues::Int($t) => $body,
            GreyValues::Short($t) => $body,
            GreyValues::UByte($t) => $body,
            GreyValues::Float($t) => $body,
            GreyValues::Double($t) => $body,
            GreyValues::Rgba($t) => $body,
        }
    };
}

impl GreyValues {
    /// Wraps a typed table.
    #[must_use]
    pub fn from_table<T: GreyValue>(table: ValueTable<T>) -> Self {
        T::into_values(table)
    }

    /// Kind of the stored samples.
    #[must_use]
    pub const fn kind(&self) -> GreyKind {
        match self {
            Self::Int(_) => GreyKind::Int,
            Self::Short(_) => GreyKind::Short,
            Self::UByte(_) => GreyKind::UByte,
            Self::Float(_) => GreyKind::Float,
            Self::Double(_) => GreyKind::Double,
            Self::Rgba(_) => GreyKind::Rgba,
        }
    }

    /// Bounds of the table.
    #[must_use]
    pub fn bounding_box(&self) -> BoundingBox2 {
        each_table!(self, t => t.bounding_box())
    }

    /// Background value.
    #[must_use]
    pub fn background(&self) -> PixelValue {
        each_table!(self, t => t.background().to_pixel())
    }

    /// Kind-erased value at the absolute sample.
    #[must_use]
    pub fn get(&self, line: i32, col: i32) -> PixelValue {
        each_table!(self, t => t.get(line, col).to_pixel())
    }

    /// Returns `true` if every sample of `domain` has a slot in the table.
    #[must_use]
    pub fn covers(&self, domain: &IntervalDomain) -> bool {
        each_table!(self, t => t.covers(domain))
    }

    /// Borrows the table as samples of type `T`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::GreyKindMismatch`] if `T` is not the stored
    /// kind.
    ///
    /// # Example
    ///
    /// ```
    /// use domain_types::{BoundingBox2, GreyValues, ValueTable};
    ///
    /// let values = GreyValues::from_table(ValueTable::new(BoundingBox2::new(0, 0, 0, 0), 1i16)?);
    /// assert!(values.as_table::<i16>().is_ok());
    /// assert!(values.as_table::<i32>().is_err());
    /// # Ok::<(), domain_types::DomainError>(())
    /// ```
    pub fn as_table<T: GreyValue>(&self) -> DomainResult<&ValueTable<T>> {
        T::table(self).ok_or(DomainError::GreyKindMismatch {
            expected: T::KIND,
            found: self.kind(),
        })
    }

    /// Mutably borrows the table as samples of type `T`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::GreyKindMismatch`] if `T` is not the stored
    /// kind.
    pub fn as_table_mut<T: GreyValue>(&mut self) -> DomainResult<&mut ValueTable<T>> {
        let found = self.kind();
        T::table_mut(self).ok_or(DomainError::GreyKindMismatch {
            expected: T::KIND,
            found,
        })
    }
}

impl<T: GreyValue> From<ValueTable<T>> for GreyValues {
    fn from(table: ValueTable<T>) -> Self {
        T::into_values(table)
    }
}

/// Per-plane value tables of a 3-D object.
///
/// Planes are reference counted so several objects can share them; an
/// absent plane reads as background.
#[derive(Debug, Clone, PartialEq)]
pub struct VoxelValues {
    plane1: i32,
    planes: Vec<Option<Arc<GreyValues>>>,
    background: PixelValue,
}

impl VoxelValues {
    /// Creates `count` absent planes starting at `plane1`.
    #[must_use]
    pub fn new(plane1: i32, count: usize, background: PixelValue) -> Self {
        Self {
            plane1,
            planes: vec![None; count],
            background,
        }
    }

    /// First plane.
    #[must_use]
    pub const fn plane1(&self) -> i32 {
        self.plane1
    }

    /// Last plane; `plane1 - 1` when there are no planes.
    #[must_use]
    pub fn lastpl(&self) -> i32 {
        self.plane1 + crate::domain::offset_i32(self.planes.len()) - 1
    }

    /// Number of plane slots.
    #[must_use]
    pub fn plane_count(&self) -> usize {
        self.planes.len()
    }

    /// Shared background value.
    #[must_use]
    pub const fn background(&self) -> PixelValue {
        self.background
    }

    /// Kind of the stored planes, from the first present plane.
    #[must_use]
    pub fn kind(&self) -> Option<GreyKind> {
        self.planes.iter().flatten().map(|p| p.kind()).next()
    }

    fn slot(&self, plane: i32) -> Option<usize> {
        usize::try_from(i64::from(plane) - i64::from(self.plane1))
            .ok()
            .filter(|&i| i < self.planes.len())
    }

    /// Table of `plane`, if present.
    #[must_use]
    pub fn plane(&self, plane: i32) -> Option<&Arc<GreyValues>> {
        self.slot(plane).and_then(|i| self.planes[i].as_ref())
    }

    /// Iterates over `(plane, table)` for every slot.
    pub fn planes(&self) -> impl Iterator<Item = (i32, Option<&Arc<GreyValues>>)> + '_ {
        (self.plane1..).zip(self.planes.iter().map(Option::as_ref))
    }

    /// Stores the table of `plane`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::PlaneOutOfRange`] if `plane` has no slot, or
    /// [`DomainError::GreyKindMismatch`] if the table's kind differs from the
    /// background's.
    pub fn set_plane(&mut self, plane: i32, values: Option<Arc<GreyValues>>) -> DomainResult<()> {
        if let Some(v) = &values {
            if v.kind() != self.background.kind() {
                return Err(DomainError::GreyKindMismatch {
                    expected: self.background.kind(),
                    found: v.kind(),
                });
            }
        }
        let idx = self.slot(plane).ok_or(DomainError::PlaneOutOfRange {
            plane,
            plane1: self.plane1,
            lastpl: self.lastpl(),
        })?;
        self.planes[idx] = values;
        Ok(())
    }

    /// Kind-erased value of an absolute voxel.
    #[must_use]
    pub fn get(&self, plane: i32, line: i32, col: i32) -> PixelValue {
        self.plane(plane)
            .map_or(self.background, |p| p.get(line, col))
    }

    /// Keeps slots `first..=last` and renumbers them from `plane1 + first`.
    pub(crate) fn retain_slots(&mut self, first: usize, last: usize) {
        self.planes.truncate(last + 1);
        self.planes.drain(..first.min(self.planes.len()));
        self.plane1 += crate::domain::offset_i32(first);
    }

    /// Drops every plane and resets the origin.
    pub(crate) fn clear(&mut self) {
        self.planes.clear();
        self.plane1 = 0;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn table_rows_are_absolute() {
        let mut t = ValueTable::new(BoundingBox2::new(-1, 1, -2, 2), 0i32).unwrap();
        t.row_mut(0, -1, 1).unwrap().copy_from_slice(&[1, 2, 3]);
        assert_eq!(t.row(0, -2, 2).unwrap(), &[0, 1, 2, 3, 0]);
        assert_eq!(t.row(0, -3, 0), None);
        assert_eq!(t.row(2, 0, 0), None);
        assert_eq!(t.get(5, 5), 0);
    }

    #[test]
    fn set_outside_fails() {
        let mut t = ValueTable::new(BoundingBox2::new(0, 0, 0, 0), 0.0f64).unwrap();
        assert!(t.set(1, 0, 1.0).is_err());
        t.set(0, 0, 1.0).unwrap();
        assert_eq!(t.get(0, 0), 1.0);
    }

    #[test]
    fn coverage_of_domain() {
        let dom = IntervalDomain::from_intervals(0, &[vec![(0, 3)], vec![(2, 5)]]).unwrap();
        let t = ValueTable::for_domain(&dom, 0u8);
        assert!(t.covers(&dom));
        assert!(!t.covers(&dom.shifted(0, 1)));
        let empty = ValueTable::for_domain(&IntervalDomain::empty(), 0u8);
        assert!(empty.covers(&IntervalDomain::empty()));
        assert!(!empty.covers(&dom));
    }

    #[test]
    fn kind_mismatch_is_reported() {
        let mut values = GreyValues::from(ValueTable::new(BoundingBox2::new(0, 0, 0, 0), 0u8).unwrap());
        assert_eq!(values.kind(), GreyKind::UByte);
        let err = values.as_table_mut::<f32>().unwrap_err();
        assert_eq!(
            err,
            DomainError::GreyKindMismatch {
                expected: GreyKind::Float,
                found: GreyKind::UByte
            }
        );
    }

    #[test]
    fn voxel_planes_trim() {
        let mut v = VoxelValues::new(3, 4, PixelValue::Int(0));
        let table = Arc::new(GreyValues::from(
            ValueTable::new(BoundingBox2::new(0, 0, 0, 0), 5i32).unwrap(),
        ));
        v.set_plane(4, Some(table.clone())).unwrap();
        assert!(v.set_plane(7, None).is_err());
        v.retain_slots(1, 2);
        assert_eq!((v.plane1(), v.lastpl()), (4, 5));
        assert!(Arc::ptr_eq(v.plane(4).unwrap(), &table));
        assert_eq!(v.get(5, 0, 0), PixelValue::Int(0));
        assert_eq!(v.get(4, 0, 0), PixelValue::Int(5));
    }

    #[test]
    fn voxel_kind_must_match_background() {
        let mut v = VoxelValues::new(0, 1, PixelValue::Float(0.0));
        let table = Arc::new(GreyValues::from(
            ValueTable::new(BoundingBox2::new(0, 0, 0, 0), 0i32).unwrap(),
        ));
        assert!(matches!(
            v.set_plane(0, Some(table)),
            Err(DomainError::GreyKindMismatch { .. })
        ));
    }
}
