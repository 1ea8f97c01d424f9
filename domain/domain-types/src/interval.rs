//! Intervals and 2-D bounding boxes.

/// A run of occupied columns on one scan line.
///
/// Both ends are inclusive and stored relative to the owning domain's
/// first column (`kol1`), so shifting a domain never touches its intervals.
///
/// # Example
///
/// ```
/// use domain_types::Interval;
///
/// let itv = Interval::new(2, 5);
/// assert_eq!(itv.len(), 4);
/// assert!(itv.touches(&Interval::new(6, 8)));
/// assert!(!itv.touches(&Interval::new(7, 8)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval {
    /// Left end (inclusive), relative to the domain's `kol1`.
    pub left: i32,
    /// Right end (inclusive), relative to the domain's `kol1`.
    pub right: i32,
}

impl Interval {
    /// Creates a new interval.
    #[must_use]
    pub const fn new(left: i32, right: i32) -> Self {
        Self { left, right }
    }

    /// Creates an interval from its left end and its length.
    ///
    /// # Example
    ///
    /// ```
    /// use domain_types::Interval;
    ///
    /// assert_eq!(Interval::from_len(3, 2), Interval::new(3, 4));
    /// ```
    #[must_use]
    pub const fn from_len(left: i32, len: i32) -> Self {
        Self {
            left,
            right: left + len - 1,
        }
    }

    /// Number of columns covered.
    #[must_use]
    pub const fn len(&self) -> i64 {
        (self.right as i64) - (self.left as i64) + 1
    }

    /// Returns `true` if the interval is inverted and covers nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.right < self.left
    }

    /// Returns `true` if the two intervals share at least one column.
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.left <= other.right && other.left <= self.right
    }

    /// Returns `true` if the two intervals overlap or are adjacent.
    #[must_use]
    pub const fn touches(&self, other: &Self) -> bool {
        self.left <= other.right + 1 && other.left <= self.right + 1
    }

    /// Returns the interval moved by `offset` columns.
    #[must_use]
    pub const fn offset(&self, offset: i32) -> Self {
        Self {
            left: self.left + offset,
            right: self.right + offset,
        }
    }
}

/// Inclusive line/column bounds of a 2-D domain.
///
/// # Example
///
/// ```
/// use domain_types::BoundingBox2;
///
/// let a = BoundingBox2::new(0, 4, 0, 4);
/// let b = BoundingBox2::new(3, 9, 2, 2);
/// assert!(a.overlaps(&b));
/// assert_eq!(a.union(&b), BoundingBox2::new(0, 9, 0, 4));
/// assert_eq!(a.intersection(&b), Some(BoundingBox2::new(3, 4, 2, 2)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox2 {
    /// First line.
    pub line1: i32,
    /// Last line.
    pub lastln: i32,
    /// First column.
    pub kol1: i32,
    /// Last column.
    pub lastkl: i32,
}

impl BoundingBox2 {
    /// Creates new bounds.
    #[must_use]
    pub const fn new(line1: i32, lastln: i32, kol1: i32, lastkl: i32) -> Self {
        Self {
            line1,
            lastln,
            kol1,
            lastkl,
        }
    }

    /// Number of lines spanned, zero for an inverted box.
    #[must_use]
    pub const fn height(&self) -> i64 {
        let h = (self.lastln as i64) - (self.line1 as i64) + 1;
        if h < 0 { 0 } else { h }
    }

    /// Number of columns spanned, zero for an inverted box.
    #[must_use]
    pub const fn width(&self) -> i64 {
        let w = (self.lastkl as i64) - (self.kol1 as i64) + 1;
        if w < 0 { 0 } else { w }
    }

    /// Returns `true` if the two boxes share at least one sample.
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.line1 <= other.lastln
            && other.line1 <= self.lastln
            && self.kol1 <= other.lastkl
            && other.kol1 <= self.lastkl
    }

    /// Returns `true` if the sample lies inside the box.
    #[must_use]
    pub const fn contains(&self, line: i32, col: i32) -> bool {
        line >= self.line1 && line <= self.lastln && col >= self.kol1 && col <= self.lastkl
    }

    /// Smallest box containing both.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            line1: self.line1.min(other.line1),
            lastln: self.lastln.max(other.lastln),
            kol1: self.kol1.min(other.kol1),
            lastkl: self.lastkl.max(other.lastkl),
        }
    }

    /// Common part of both boxes, `None` if they are disjoint.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let b = Self {
            line1: self.line1.max(other.line1),
            lastln: self.lastln.min(other.lastln),
            kol1: self.kol1.max(other.kol1),
            lastkl: self.lastkl.min(other.lastkl),
        };
        (b.line1 <= b.lastln && b.kol1 <= b.lastkl).then_some(b)
    }

    /// Box grown by `n` samples on every side.
    #[must_use]
    pub const fn expanded(&self, n: i32) -> Self {
        Self {
            line1: self.line1 - n,
            lastln: self.lastln + n,
            kol1: self.kol1 - n,
            lastkl: self.lastkl + n,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_len_and_offset() {
        let itv = Interval::new(-2, 2);
        assert_eq!(itv.len(), 5);
        assert_eq!(itv.offset(3), Interval::new(1, 5));
        assert!(!itv.is_empty());
        assert!(Interval::new(3, 2).is_empty());
    }

    #[test]
    fn interval_overlap_versus_touch() {
        let a = Interval::new(0, 3);
        assert!(a.overlaps(&Interval::new(3, 9)));
        assert!(!a.overlaps(&Interval::new(4, 9)));
        assert!(a.touches(&Interval::new(4, 9)));
        assert!(!a.touches(&Interval::new(5, 9)));
    }

    #[test]
    fn bbox_dimensions() {
        let b = BoundingBox2::new(5, 5, 2, 2);
        assert_eq!(b.height(), 1);
        assert_eq!(b.width(), 1);
        assert_eq!(BoundingBox2::new(0, -1, 0, 0).height(), 0);
    }

    #[test]
    fn bbox_disjoint_intersection() {
        let a = BoundingBox2::new(0, 1, 0, 1);
        let b = BoundingBox2::new(10, 11, 10, 11);
        assert!(!a.overlaps(&b));
        assert_eq!(a.intersection(&b), None);
        assert_eq!(a.expanded(1), BoundingBox2::new(-1, 2, -1, 2));
    }
}
