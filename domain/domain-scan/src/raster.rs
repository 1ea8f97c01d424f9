//! Raster scans over interval domains.
//!
//! A [`ScanCursor`] walks a domain's intervals in one of four raster orders
//! and always knows its current interval, which is what synchronized
//! multi-domain algorithms need. [`IntervalScan`] wraps a cursor as a plain
//! forward-only [`Iterator`]; build a new one to scan again.

use std::iter::FusedIterator;

use domain_types::{Interval, IntervalDomain};

/// Raster traversal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RasterDir {
    /// Lines top to bottom, columns left to right.
    #[default]
    IncLineIncCol,
    /// Lines top to bottom, columns right to left.
    IncLineDecCol,
    /// Lines bottom to top, columns left to right.
    DecLineIncCol,
    /// Lines bottom to top, columns right to left.
    DecLineDecCol,
}

impl RasterDir {
    /// Returns `true` if lines are visited in increasing order.
    #[must_use]
    pub const fn lines_increasing(self) -> bool {
        matches!(self, Self::IncLineIncCol | Self::IncLineDecCol)
    }

    /// Returns `true` if intervals within a line are visited left to right.
    #[must_use]
    pub const fn columns_increasing(self) -> bool {
        matches!(self, Self::IncLineIncCol | Self::DecLineIncCol)
    }
}

/// One interval in absolute coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScanInterval {
    /// Line of the interval.
    pub line: i32,
    /// Leftmost column (inclusive).
    pub left: i32,
    /// Rightmost column (inclusive).
    pub right: i32,
}

impl ScanInterval {
    /// Number of columns covered.
    #[must_use]
    pub const fn len(&self) -> i64 {
        (self.right as i64) - (self.left as i64) + 1
    }

    /// Always `false`; scan intervals cover at least one column.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.right < self.left
    }
}

/// A cursor positioned on one interval of a domain.
///
/// # Example
///
/// ```
/// use domain_scan::{RasterDir, ScanCursor};
/// use domain_types::IntervalDomain;
///
/// let dom = IntervalDomain::from_intervals(0, &[vec![(0, 1), (4, 5)], vec![(2, 2)]])?;
/// let mut cursor = ScanCursor::new(&dom, RasterDir::IncLineIncCol);
/// assert_eq!(cursor.current().map(|c| c.left), Some(0));
/// assert!(cursor.line_remaining());
/// cursor.advance();
/// assert!(!cursor.line_remaining());
/// cursor.advance();
/// assert_eq!(cursor.current().map(|c| c.line), Some(1));
/// cursor.advance();
/// assert!(cursor.is_exhausted());
/// # Ok::<(), domain_types::DomainError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ScanCursor<'a> {
    domain: &'a IntervalDomain,
    dir: RasterDir,
    /// Line slots loaded so far.
    lines_loaded: usize,
    line: i32,
    itvs: &'a [Interval],
    /// Intervals of the current line handed out so far.
    taken: usize,
    current: Option<ScanInterval>,
}

impl<'a> ScanCursor<'a> {
    /// Creates a cursor positioned on the first interval in `dir` order.
    #[must_use]
    pub fn new(domain: &'a IntervalDomain, dir: RasterDir) -> Self {
        let mut cursor = Self {
            domain,
            dir,
            lines_loaded: 0,
            line: domain.line1(),
            itvs: &[],
            taken: 0,
            current: None,
        };
        cursor.advance();
        cursor
    }

    /// The domain being scanned.
    #[must_use]
    pub const fn domain(&self) -> &'a IntervalDomain {
        self.domain
    }

    /// Traversal order.
    #[must_use]
    pub const fn direction(&self) -> RasterDir {
        self.dir
    }

    /// The interval the cursor is on, `None` once exhausted.
    #[must_use]
    pub const fn current(&self) -> Option<ScanInterval> {
        self.current
    }

    /// Line of the current interval.
    #[must_use]
    pub fn line(&self) -> Option<i32> {
        self.current.map(|c| c.line)
    }

    /// Returns `true` once every interval has been visited.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.current.is_none()
    }

    /// Returns `true` if more intervals follow on the current line.
    #[must_use]
    pub fn line_remaining(&self) -> bool {
        self.current.is_some() && self.taken < self.itvs.len()
    }

    fn line_slot(&self, n: usize) -> usize {
        if self.dir.lines_increasing() {
            n
        } else {
            self.domain.line_count() - 1 - n
        }
    }

    fn load_line(&mut self, n: usize) {
        let slot = self.line_slot(n);
        self.line = self.domain.line1() + i32::try_from(slot).unwrap_or(i32::MAX);
        self.itvs = self.domain.line_intervals(self.line);
        self.taken = 0;
        self.lines_loaded = n + 1;
    }

    /// Moves to the next interval and returns it.
    pub fn advance(&mut self) -> Option<ScanInterval> {
        while self.taken >= self.itvs.len() {
            if self.lines_loaded >= self.domain.line_count() {
                self.current = None;
                return None;
            }
            self.load_line(self.lines_loaded);
        }
        let idx = if self.dir.columns_increasing() {
            self.taken
        } else {
            self.itvs.len() - 1 - self.taken
        };
        self.taken += 1;
        let itv = self.itvs[idx];
        let kol1 = self.domain.kol1();
        self.current = Some(ScanInterval {
            line: self.line,
            left: kol1 + itv.left,
            right: kol1 + itv.right,
        });
        self.current
    }

    /// Skips forward to the first interval on `line` or beyond it in the
    /// scan order and returns it.
    ///
    /// Whole lines are skipped without visiting their intervals. Lines that
    /// the scan has already passed are never revisited.
    pub fn skip_to_line(&mut self, line: i32) -> Option<ScanInterval> {
        let cur = self.current?;
        let increasing = self.dir.lines_increasing();
        let ahead = move |l: i32| {
            if increasing {
                l >= line
            } else {
                l <= line
            }
        };
        if ahead(cur.line) {
            return Some(cur);
        }
        let offset = i64::from(line) - i64::from(self.domain.line1());
        let target = if increasing {
            usize::try_from(offset).ok()
        } else {
            usize::try_from(i64::from(self.domain.lastln()) - i64::from(line)).ok()
        };
        match target {
            Some(n) if n >= self.domain.line_count() => {
                self.itvs = &[];
                self.lines_loaded = self.domain.line_count();
                self.current = None;
                None
            }
            Some(n) if n >= self.lines_loaded => {
                self.load_line(n);
                self.advance()
            }
            _ => {
                while self.current.is_some_and(|c| !ahead(c.line)) {
                    self.advance();
                }
                self.current
            }
        }
    }
}

/// Forward-only iterator over a domain's intervals in absolute coordinates.
#[derive(Debug, Clone)]
pub struct IntervalScan<'a> {
    cursor: ScanCursor<'a>,
}

impl Iterator for IntervalScan<'_> {
    type Item = ScanInterval;

    fn next(&mut self) -> Option<Self::Item> {
        let cur = self.cursor.current()?;
        self.cursor.advance();
        Some(cur)
    }
}

impl FusedIterator for IntervalScan<'_> {}

impl<'a> IntervalScan<'a> {
    /// The domain being scanned.
    #[must_use]
    pub const fn domain(&self) -> &'a IntervalDomain {
        self.cursor.domain()
    }
}

/// Scans `domain` in `dir` order.
///
/// # Example
///
/// ```
/// use domain_scan::{RasterDir, raster_scan};
/// use domain_types::IntervalDomain;
///
/// let dom = IntervalDomain::from_intervals(3, &[vec![(10, 11), (20, 20)], vec![(12, 15)]])?;
/// let lefts: Vec<_> = raster_scan(&dom, RasterDir::DecLineDecCol).map(|s| (s.line, s.left)).collect();
/// assert_eq!(lefts, vec![(4, 12), (3, 20), (3, 10)]);
/// # Ok::<(), domain_types::DomainError>(())
/// ```
#[must_use]
pub fn raster_scan(domain: &IntervalDomain, dir: RasterDir) -> IntervalScan<'_> {
    IntervalScan {
        cursor: ScanCursor::new(domain, dir),
    }
}
