//! Run-length encoded 2-D interval domains.

use crate::error::{DomainError, DomainResult};
use crate::interval::{BoundingBox2, Interval};

/// Location of one line's intervals inside the domain's block storage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct LineSlot {
    /// Index of the block holding the line's intervals.
    pub(crate) block: usize,
    /// Offset of the first interval within the block.
    pub(crate) start: usize,
    /// Number of intervals on the line.
    pub(crate) len: usize,
}

/// A 2-D region stored as sorted, non-overlapping, non-adjacent intervals
/// per scan line.
///
/// Interval columns are relative to [`kol1`](Self::kol1). Line `l` of the
/// domain is held in slot `l - line1`. Interval storage is a stack of
/// blocks; every line's intervals are contiguous within one block and lines
/// refer to them by index, so blocks can grow without invalidating anything.
///
/// A *standardized* domain has a minimal box: its first and last lines are
/// non-empty and at least one interval starts at relative column zero. The
/// empty domain is represented by the sentinel box
/// `{line1: 0, lastln: -1, kol1: 0, lastkl: 0}` with no lines.
///
/// # Example
///
/// ```
/// use domain_types::IntervalDomain;
///
/// let dom = IntervalDomain::from_intervals(5, &[vec![(2, 4), (8, 8)], vec![], vec![(3, 3)]])?;
/// assert_eq!(dom.line1(), 5);
/// assert_eq!(dom.lastln(), 7);
/// assert_eq!(dom.kol1(), 2);
/// assert_eq!(dom.lastkl(), 8);
/// assert_eq!(dom.area(), 5);
/// assert_eq!(dom.interval_count(), 3);
/// # Ok::<(), domain_types::DomainError>(())
/// ```
#[derive(Debug, Clone)]
pub struct IntervalDomain {
    pub(crate) line1: i32,
    pub(crate) lastln: i32,
    pub(crate) kol1: i32,
    pub(crate) lastkl: i32,
    pub(crate) lines: Vec<LineSlot>,
    pub(crate) blocks: Vec<Vec<Interval>>,
}

impl IntervalDomain {
    /// Creates a domain over the given box with every line empty.
    ///
    /// Lines are filled afterwards through a [`DynItvPool`](crate::DynItvPool)
    /// and the result standardized.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidBounds`] if `lastln < line1` or
    /// `lastkl < kol1`.
    pub fn new(line1: i32, lastln: i32, kol1: i32, lastkl: i32) -> DomainResult<Self> {
        check_bounds("line", line1, lastln)?;
        check_bounds("column", kol1, lastkl)?;
        let height = span(line1, lastln);
        Ok(Self {
            line1,
            lastln,
            kol1,
            lastkl,
            lines: vec![LineSlot::default(); height],
            blocks: Vec::new(),
        })
    }

    /// The empty domain.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            line1: 0,
            lastln: -1,
            kol1: 0,
            lastkl: 0,
            lines: Vec::new(),
            blocks: Vec::new(),
        }
    }

    /// Creates a rectangular domain, one full-width interval per line.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidBounds`] for an inverted box.
    ///
    /// # Example
    ///
    /// ```
    /// use domain_types::IntervalDomain;
    ///
    /// let rect = IntervalDomain::rect(0, 2, 10, 13)?;
    /// assert_eq!(rect.area(), 12);
    /// assert!(rect.is_standard());
    /// # Ok::<(), domain_types::DomainError>(())
    /// ```
    pub fn rect(line1: i32, lastln: i32, kol1: i32, lastkl: i32) -> DomainResult<Self> {
        check_bounds("line", line1, lastln)?;
        check_bounds("column", kol1, lastkl)?;
        let height = span(line1, lastln);
        let block = vec![Interval::new(0, lastkl - kol1); height];
        let lines = (0..height)
            .map(|i| LineSlot {
                block: 0,
                start: i,
                len: 1,
            })
            .collect();
        Ok(Self {
            line1,
            lastln,
            kol1,
            lastkl,
            lines,
            blocks: vec![block],
        })
    }

    /// Builds a standardized domain from absolute `(left, right)` pairs, one
    /// list per line starting at `line1`.
    ///
    /// Touching intervals are merged.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::MalformedIntervals`] if an interval is inverted
    /// or a line's intervals are out of order or overlapping.
    pub fn from_intervals<L>(line1: i32, lines: &[L]) -> DomainResult<Self>
    where
        L: AsRef<[(i32, i32)]>,
    {
        let capacity = lines.iter().map(|l| l.as_ref().len()).sum();
        let mut builder = IntervalDomainBuilder::with_capacity(capacity);
        for (line, itvs) in (line1..).zip(lines) {
            for &(left, right) in itvs.as_ref() {
                builder.push(line, left, right)?;
            }
        }
        Ok(builder.finish())
    }

    /// First line.
    #[must_use]
    pub const fn line1(&self) -> i32 {
        self.line1
    }

    /// Last line.
    #[must_use]
    pub const fn lastln(&self) -> i32 {
        self.lastln
    }

    /// First column; interval offsets are relative to it.
    #[must_use]
    pub const fn kol1(&self) -> i32 {
        self.kol1
    }

    /// Last column.
    #[must_use]
    pub const fn lastkl(&self) -> i32 {
        self.lastkl
    }

    /// Line and column bounds.
    #[must_use]
    pub const fn bounding_box(&self) -> BoundingBox2 {
        BoundingBox2::new(self.line1, self.lastln, self.kol1, self.lastkl)
    }

    /// Number of line slots.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Intervals of `line`, relative to [`kol1`](Self::kol1).
    ///
    /// Lines outside the domain yield an empty slice.
    #[must_use]
    pub fn line_intervals(&self, line: i32) -> &[Interval] {
        if line < self.line1 || line > self.lastln {
            return &[];
        }
        match usize::try_from(i64::from(line) - i64::from(self.line1)) {
            Ok(idx) => self.slot_intervals(idx),
            Err(_) => &[],
        }
    }

    /// Intervals of the line slot at `idx`.
    pub(crate) fn slot_intervals(&self, idx: usize) -> &[Interval] {
        self.lines
            .get(idx)
            .filter(|slot| slot.len > 0)
            .and_then(|slot| {
                self.blocks
                    .get(slot.block)
                    .and_then(|b| b.get(slot.start..slot.start + slot.len))
            })
            .unwrap_or(&[])
    }

    /// Iterates over `(line, intervals)` for every line slot, in increasing
    /// line order. Intervals are relative to [`kol1`](Self::kol1).
    pub fn lines(&self) -> impl DoubleEndedIterator<Item = (i32, &[Interval])> + '_ {
        (0..self.lines.len()).map(move |idx| (self.line1 + offset_i32(idx), self.slot_intervals(idx)))
    }

    /// Total number of intervals.
    #[must_use]
    pub fn interval_count(&self) -> usize {
        self.lines.iter().map(|s| s.len).sum()
    }

    /// Largest number of intervals found on any single line.
    #[must_use]
    pub fn max_intervals_per_line(&self) -> usize {
        self.lines.iter().map(|s| s.len).max().unwrap_or(0)
    }

    /// Number of occupied samples.
    #[must_use]
    pub fn area(&self) -> i64 {
        self.lines()
            .flat_map(|(_, itvs)| itvs.iter())
            .map(Interval::len)
            .sum()
    }

    /// Returns `true` if no sample is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|s| s.len == 0)
    }

    /// Returns `true` if the absolute sample `(line, col)` is occupied.
    #[must_use]
    pub fn contains(&self, line: i32, col: i32) -> bool {
        let rel = col - self.kol1;
        let itvs = self.line_intervals(line);
        // Intervals are sorted, so a binary search on the right end finds the
        // only candidate.
        let idx = itvs.partition_point(|itv| itv.right < rel);
        itvs.get(idx).is_some_and(|itv| itv.left <= rel)
    }

    /// Returns `true` if the box is minimal.
    #[must_use]
    pub fn is_standard(&self) -> bool {
        if self.lines.is_empty() {
            return self.line1 == 0 && self.lastln == -1 && self.kol1 == 0 && self.lastkl == 0;
        }
        let first_ok = self.lines.first().is_some_and(|s| s.len > 0);
        let last_ok = self.lines.last().is_some_and(|s| s.len > 0);
        if !(first_ok && last_ok) {
            return false;
        }
        let (min_left, max_right) = self.relative_extent();
        min_left == 0 && self.kol1 + max_right == self.lastkl
    }

    /// Minimum left and maximum right relative offsets over all lines.
    fn relative_extent(&self) -> (i32, i32) {
        self.lines()
            .flat_map(|(_, itvs)| itvs.iter())
            .fold((i32::MAX, i32::MIN), |(lo, hi), itv| {
                (lo.min(itv.left), hi.max(itv.right))
            })
    }

    /// Restores a minimal bounding box in place.
    ///
    /// Leading and trailing empty lines are dropped, then every interval is
    /// shifted so the leftmost starts at relative column zero and `lastkl`
    /// is recomputed. A domain with no intervals collapses to the empty
    /// domain. Standardizing twice is the same as standardizing once.
    ///
    /// # Example
    ///
    /// ```
    /// use domain_types::{DynItvPool, IntervalDomain};
    ///
    /// let mut dom = IntervalDomain::new(0, 9, 0, 9)?;
    /// let mut pool = DynItvPool::new(16);
    /// dom.dyn_add(&mut pool, 5, 2, 1)?;
    /// dom.standardize();
    /// assert_eq!((dom.line1(), dom.lastln(), dom.kol1(), dom.lastkl()), (5, 5, 2, 2));
    /// assert_eq!(dom.area(), 1);
    /// # Ok::<(), domain_types::DomainError>(())
    /// ```
    pub fn standardize(&mut self) {
        let Some(first) = self.lines.iter().position(|s| s.len > 0) else {
            *self = Self::empty();
            return;
        };
        let last = self.lines.iter().rposition(|s| s.len > 0).unwrap_or(first);
        self.lines.truncate(last + 1);
        self.lines.drain(..first);
        self.line1 += offset_i32(first);
        self.lastln = self.line1 + offset_i32(self.lines.len()) - 1;

        let (k, r) = self.relative_extent();
        if k != 0 {
            // Every stored interval belongs to at most one line, so shifting
            // whole blocks is equivalent to shifting each line.
            for itv in self.blocks.iter_mut().flatten() {
                *itv = itv.offset(-k);
            }
            self.kol1 += k;
        }
        self.lastkl = self.kol1 + r - k;
    }

    /// Returns a copy of the domain moved by `dl` lines and `dk` columns.
    ///
    /// # Example
    ///
    /// ```
    /// use domain_types::IntervalDomain;
    ///
    /// let a = IntervalDomain::rect(0, 1, 0, 1)?;
    /// let b = a.shifted(10, 10);
    /// assert_eq!(b.bounding_box().line1, 10);
    /// assert_eq!(b.line_intervals(10), a.line_intervals(0));
    /// # Ok::<(), domain_types::DomainError>(())
    /// ```
    #[must_use]
    pub fn shifted(&self, dl: i32, dk: i32) -> Self {
        if self.lines.is_empty() {
            return self.clone();
        }
        let mut out = self.clone();
        out.line1 += dl;
        out.lastln += dl;
        out.kol1 += dk;
        out.lastkl += dk;
        out
    }

    /// Returns a copy whose intervals occupy a single compact block.
    #[must_use]
    pub fn compacted(&self) -> Self {
        let mut block = Vec::with_capacity(self.interval_count());
        let mut lines = Vec::with_capacity(self.lines.len());
        for idx in 0..self.lines.len() {
            let itvs = self.slot_intervals(idx);
            lines.push(LineSlot {
                block: 0,
                start: block.len(),
                len: itvs.len(),
            });
            block.extend_from_slice(itvs);
        }
        Self {
            line1: self.line1,
            lastln: self.lastln,
            kol1: self.kol1,
            lastkl: self.lastkl,
            lines,
            blocks: vec![block],
        }
    }

    /// Number of interval storage blocks currently owned.
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }
}

impl Default for IntervalDomain {
    fn default() -> Self {
        Self::empty()
    }
}

/// Two domains are equal when they have the same box and the same intervals
/// on every line; block layout is ignored. All empty domains are equal.
impl PartialEq for IntervalDomain {
    fn eq(&self, other: &Self) -> bool {
        if self.is_empty() && other.is_empty() {
            return true;
        }
        self.bounding_box() == other.bounding_box()
            && self.lines.len() == other.lines.len()
            && self.lines().zip(other.lines()).all(|(a, b)| a.1 == b.1)
    }
}

impl Eq for IntervalDomain {}

/// Accumulates absolute intervals in raster order and produces a
/// standardized [`IntervalDomain`] stored in one block.
///
/// # Example
///
/// ```
/// use domain_types::IntervalDomainBuilder;
///
/// let mut b = IntervalDomainBuilder::with_capacity(3);
/// b.push(0, 0, 1)?;
/// b.push(0, 2, 4)?; // touches the previous interval and is merged
/// b.push(3, 7, 9)?;
/// let dom = b.finish();
/// assert_eq!(dom.interval_count(), 2);
/// assert_eq!(dom.area(), 8);
/// # Ok::<(), domain_types::DomainError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct IntervalDomainBuilder {
    /// Absolute intervals in raster order.
    intervals: Vec<Interval>,
    /// `(line, start, len)` for every line that received intervals.
    lines: Vec<(i32, usize, usize)>,
}

impl IntervalDomainBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder with room for `capacity` intervals.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            intervals: Vec::with_capacity(capacity),
            lines: Vec::new(),
        }
    }

    /// Appends the absolute interval `[left, right]` on `line`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::MalformedIntervals`] if the interval is
    /// inverted, lies on an earlier line than the previous push, or starts at
    /// or before the previous interval's right end on the same line.
    pub fn push(&mut self, line: i32, left: i32, right: i32) -> DomainResult<()> {
        if right < left {
            return Err(DomainError::MalformedIntervals {
                line,
                details: format!("inverted interval [{left}, {right}]"),
            });
        }
        match self.lines.last_mut() {
            Some((last_line, _, _)) if line < *last_line => Err(DomainError::MalformedIntervals {
                line,
                details: format!("line {line} pushed after line {last_line}"),
            }),
            Some((last_line, _, len)) if line == *last_line => {
                let Some(prev) = self.intervals.last_mut() else {
                    return Err(DomainError::MalformedIntervals {
                        line,
                        details: "line recorded without intervals".to_string(),
                    });
                };
                if left <= prev.right {
                    return Err(DomainError::MalformedIntervals {
                        line,
                        details: format!(
                            "interval [{left}, {right}] overlaps or precedes [{}, {}]",
                            prev.left, prev.right
                        ),
                    });
                }
                if left == prev.right + 1 {
                    prev.right = right;
                } else {
                    self.intervals.push(Interval::new(left, right));
                    *len += 1;
                }
                Ok(())
            }
            _ => {
                self.lines.push((line, self.intervals.len(), 1));
                self.intervals.push(Interval::new(left, right));
                Ok(())
            }
        }
    }

    /// Number of intervals pushed so far, after merging.
    #[must_use]
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Returns `true` if nothing has been pushed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Consumes the builder, producing a standardized domain.
    #[must_use]
    pub fn finish(self) -> IntervalDomain {
        let (Some(&(line1, _, _)), Some(&(lastln, _, _))) = (self.lines.first(), self.lines.last())
        else {
            return IntervalDomain::empty();
        };
        let (kol1, lastkl) = self
            .intervals
            .iter()
            .fold((i32::MAX, i32::MIN), |(lo, hi), itv| (lo.min(itv.left), hi.max(itv.right)));

        let mut slots = vec![LineSlot::default(); span(line1, lastln)];
        for &(line, start, len) in &self.lines {
            if let Some(slot) = usize::try_from(line - line1).ok().and_then(|i| slots.get_mut(i)) {
                *slot = LineSlot {
                    block: 0,
                    start,
                    len,
                };
            }
        }
        let block = self.intervals.into_iter().map(|itv| itv.offset(-kol1)).collect();
        IntervalDomain {
            line1,
            lastln,
            kol1,
            lastkl,
            lines: slots,
            blocks: vec![block],
        }
    }
}

/// Number of slots in an inclusive range, zero when inverted.
pub(crate) fn span(first: i32, last: i32) -> usize {
    usize::try_from(i64::from(last) - i64::from(first) + 1).unwrap_or(0)
}

/// Converts a slot offset back to a coordinate offset.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub(crate) const fn offset_i32(n: usize) -> i32 {
    n as i32
}

pub(crate) fn check_bounds(axis: &'static str, first: i32, last: i32) -> DomainResult<()> {
    if last < first {
        Err(DomainError::InvalidBounds { axis, first, last })
    } else {
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn single_sample_standardizes_to_its_own_box() {
        let mut dom = IntervalDomain::new(0, 9, 0, 9).unwrap();
        let mut pool = crate::DynItvPool::new(4);
        dom.dyn_add(&mut pool, 5, 2, 1).unwrap();
        dom.standardize();
        assert_eq!(dom.bounding_box(), BoundingBox2::new(5, 5, 2, 2));
        assert_eq!(dom.area(), 1);
        assert!(dom.is_standard());
    }

    #[test]
    fn standardize_is_idempotent() {
        let mut dom = IntervalDomain::from_intervals(3, &[vec![], vec![(4, 6)], vec![(9, 12)]]).unwrap();
        let once = dom.clone();
        dom.standardize();
        assert_eq!(dom, once);
        assert_eq!(dom.bounding_box(), once.bounding_box());
    }

    #[test]
    fn standardize_empty_domain() {
        let mut dom = IntervalDomain::new(2, 8, -3, 3).unwrap();
        dom.standardize();
        assert!(dom.is_empty());
        assert_eq!(dom.bounding_box(), BoundingBox2::new(0, -1, 0, 0));
        dom.standardize();
        assert_eq!(dom.bounding_box(), BoundingBox2::new(0, -1, 0, 0));
        assert!(dom.is_standard());
    }

    #[test]
    fn standardize_shifts_intervals_and_kol1() {
        let mut dom = IntervalDomain::new(0, 2, 10, 30).unwrap();
        let mut pool = crate::DynItvPool::new(8);
        dom.dyn_add(&mut pool, 1, 5, 3).unwrap();
        dom.dyn_add(&mut pool, 2, 7, 4).unwrap();
        dom.standardize();
        assert_eq!(dom.bounding_box(), BoundingBox2::new(1, 2, 15, 20));
        assert_eq!(dom.line_intervals(1), &[Interval::new(0, 2)]);
        assert_eq!(dom.line_intervals(2), &[Interval::new(2, 5)]);
    }

    #[test]
    fn from_intervals_rejects_overlap() {
        let err = IntervalDomain::from_intervals(0, &[vec![(0, 4), (3, 6)]]).unwrap_err();
        assert!(matches!(err, DomainError::MalformedIntervals { line: 0, .. }));
        let err = IntervalDomain::from_intervals(0, &[vec![(5, 4)]]).unwrap_err();
        assert!(matches!(err, DomainError::MalformedIntervals { .. }));
    }

    #[test]
    fn from_intervals_merges_touching_runs() {
        let dom = IntervalDomain::from_intervals(0, &[vec![(0, 1), (2, 3), (5, 5)]]).unwrap();
        assert_eq!(dom.line_intervals(0), &[Interval::new(0, 3), Interval::new(5, 5)]);
    }

    #[test]
    fn contains_and_line_queries() {
        let dom = IntervalDomain::from_intervals(-2, &[vec![(-1, 1), (4, 6)]]).unwrap();
        assert!(dom.contains(-2, 0));
        assert!(dom.contains(-2, 4));
        assert!(!dom.contains(-2, 2));
        assert!(!dom.contains(-1, 0));
        assert!(dom.line_intervals(100).is_empty());
        assert_eq!(dom.max_intervals_per_line(), 2);
    }

    #[test]
    fn equality_ignores_block_layout() {
        let dom = IntervalDomain::from_intervals(0, &[vec![(0, 2)], vec![(1, 1)]]).unwrap();
        let compact = dom.compacted();
        assert_eq!(dom, compact);
        assert_ne!(dom, dom.shifted(0, 1));
        assert_eq!(IntervalDomain::empty(), IntervalDomain::new(0, 3, 0, 3).unwrap());
    }

    #[test]
    fn invalid_bounds_rejected() {
        assert!(matches!(
            IntervalDomain::new(3, 2, 0, 0),
            Err(DomainError::InvalidBounds { axis: "line", .. })
        ));
        assert!(IntervalDomain::rect(0, 0, 4, 3).is_err());
    }
}
