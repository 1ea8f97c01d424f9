//! N-way intersection of interval domains.

use domain_scan::{RasterDir, ScanCursor};
use domain_types::{BoundingBox2, IntervalDomain, IntervalDomainBuilder};
use smallvec::SmallVec;
use tracing::debug;

/// Cursors for a typical handful of inputs live on the stack.
pub(crate) type Cursors<'a> = SmallVec<[ScanCursor<'a>; 8]>;

/// Intersection of any number of domains.
///
/// All inputs are scanned together: laggard cursors are skipped forward to
/// the furthest current line, then on a common line the overlap of the
/// current intervals is emitted and every cursor whose interval ends first
/// moves on. The scan stops as soon as any cursor is exhausted.
///
/// No inputs gives the empty domain and a single input gives a copy of it.
/// Any empty input makes the result empty. The result is standardized.
///
/// # Example
///
/// ```
/// use domain_setops::intersect_n;
/// use domain_types::IntervalDomain;
///
/// let a = IntervalDomain::rect(0, 9, 0, 9)?;
/// let b = IntervalDomain::rect(5, 14, 5, 14)?;
/// let c = IntervalDomain::from_intervals(7, &[vec![(0, 6), (8, 20)]])?;
/// let i = intersect_n(&[&a, &b, &c]);
/// assert_eq!(i.area(), 4);
/// assert_eq!(i.line_intervals(7).len(), 2);
/// # Ok::<(), domain_types::DomainError>(())
/// ```
#[must_use]
pub fn intersect_n(domains: &[&IntervalDomain]) -> IntervalDomain {
    match domains {
        [] => return IntervalDomain::empty(),
        [only] => return (*only).clone(),
        _ => {}
    }
    if domains.iter().any(|d| d.is_empty()) {
        return IntervalDomain::empty();
    }
    let Some(bbox) = common_box(domains) else {
        return IntervalDomain::empty();
    };

    let capacity = domains.iter().map(|d| d.interval_count()).min().unwrap_or(0);
    let mut builder = IntervalDomainBuilder::with_capacity(capacity);
    let mut cursors: Cursors<'_> = domains
        .iter()
        .map(|d| ScanCursor::new(d, RasterDir::IncLineIncCol))
        .collect();

    'scan: loop {
        // Bring every cursor onto the furthest current line.
        let mut line = bbox.line1;
        loop {
            let mut synced = true;
            for c in &mut cursors {
                let Some(cur) = c.skip_to_line(line) else {
                    break 'scan;
                };
                if cur.line != line {
                    line = cur.line;
                    synced = false;
                }
            }
            if synced {
                break;
            }
        }
        if line > bbox.lastln {
            break;
        }

        let mut left = i32::MIN;
        let mut right = i32::MAX;
        for cur in cursors.iter().filter_map(ScanCursor::current) {
            left = left.max(cur.left);
            right = right.min(cur.right);
        }
        if left <= right && builder.push(line, left, right).is_err() {
            // Outputs are produced in raster order, so this cannot happen.
            break;
        }
        for c in &mut cursors {
            if c.current().is_some_and(|cur| cur.right == right) {
                c.advance();
            }
        }
    }

    let out = builder.finish();
    debug!(
        inputs = domains.len(),
        intervals = out.interval_count(),
        area = out.area(),
        "Intersected domains"
    );
    out
}

/// Returns `true` if the two domains share at least one sample.
///
/// Stops at the first common sample without building anything.
///
/// # Example
///
/// ```
/// use domain_setops::has_intersection;
/// use domain_types::IntervalDomain;
///
/// let a = IntervalDomain::from_intervals(0, &[vec![(0, 1), (6, 7)]])?;
/// let b = IntervalDomain::from_intervals(0, &[vec![(2, 5)]])?;
/// let c = IntervalDomain::from_intervals(0, &[vec![(5, 6)]])?;
/// assert!(!has_intersection(&a, &b));
/// assert!(has_intersection(&a, &c));
/// # Ok::<(), domain_types::DomainError>(())
/// ```
#[must_use]
pub fn has_intersection(a: &IntervalDomain, b: &IntervalDomain) -> bool {
    if a.is_empty() || b.is_empty() || !a.bounding_box().overlaps(&b.bounding_box()) {
        return false;
    }
    let mut ca = ScanCursor::new(a, RasterDir::IncLineIncCol);
    let mut cb = ScanCursor::new(b, RasterDir::IncLineIncCol);
    while let (Some(x), Some(y)) = (ca.current(), cb.current()) {
        if x.line < y.line {
            ca.skip_to_line(y.line);
        } else if y.line < x.line {
            cb.skip_to_line(x.line);
        } else if x.left <= y.right && y.left <= x.right {
            return true;
        } else if x.right < y.right {
            ca.advance();
        } else {
            cb.advance();
        }
    }
    false
}

/// Intersection of the inputs' bounding boxes.
fn common_box(domains: &[&IntervalDomain]) -> Option<BoundingBox2> {
    domains
        .iter()
        .map(|d| Some(d.bounding_box()))
        .reduce(|a, b| a.and_then(|a| b.and_then(|b| a.intersection(&b))))
        .flatten()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn dom(line1: i32, lines: &[&[(i32, i32)]]) -> IntervalDomain {
        IntervalDomain::from_intervals(line1, lines).unwrap()
    }

    #[test]
    fn zero_and_one_input() {
        assert!(intersect_n(&[]).is_empty());
        let a = dom(3, &[&[(1, 4)], &[], &[(0, 0)]]);
        let copy = intersect_n(&[&a]);
        assert_eq!(copy, a);
    }

    #[test]
    fn disjoint_is_empty_not_error() {
        let a = IntervalDomain::rect(0, 0, 0, 0).unwrap();
        let b = IntervalDomain::rect(10, 10, 10, 10).unwrap();
        let i = intersect_n(&[&a, &b]);
        assert!(i.is_empty());
        assert!(i.lastln() < i.line1());
    }

    #[test]
    fn empty_input_short_circuits() {
        let a = IntervalDomain::rect(0, 5, 0, 5).unwrap();
        assert!(intersect_n(&[&a, &IntervalDomain::empty()]).is_empty());
    }

    #[test]
    fn interleaved_intervals() {
        let a = dom(0, &[&[(0, 3), (6, 9), (12, 15)], &[(0, 15)]]);
        let b = dom(0, &[&[(2, 7), (9, 13)], &[]]);
        let i = intersect_n(&[&a, &b]);
        let expected = dom(0, &[&[(2, 3), (6, 7), (9, 9), (12, 13)]]);
        assert_eq!(i, expected);
        assert!(i.is_standard());
    }

    #[test]
    fn order_does_not_matter() {
        let a = dom(0, &[&[(0, 10)], &[(3, 8)], &[(0, 2), (5, 9)]]);
        let b = dom(1, &[&[(2, 4), (6, 12)], &[(1, 6)]]);
        let c = dom(-3, &[&[(0, 0)], &[], &[], &[(0, 20)], &[(0, 20)], &[(0, 20)]]);
        let abc = intersect_n(&[&a, &b, &c]);
        assert_eq!(abc, intersect_n(&[&c, &a, &b]));
        assert_eq!(abc, intersect_n(&[&b, &c, &a]));
        assert_eq!(abc, dom(1, &[&[(3, 4), (6, 8)], &[(1, 2), (5, 6)]]));
    }

    #[test]
    fn skips_lines_missing_from_one_input() {
        let a = dom(0, &[&[(0, 4)], &[(0, 4)], &[(0, 4)], &[(0, 4)]]);
        let b = dom(0, &[&[(2, 2)], &[], &[], &[(1, 1)]]);
        let i = intersect_n(&[&a, &b]);
        assert_eq!(i.area(), 2);
        assert_eq!(i.line_count(), 4);
    }

    #[test]
    fn intersection_test_matches_intersection() {
        let a = dom(0, &[&[(0, 0)], &[(5, 5)]]);
        let b = dom(1, &[&[(4, 4), (6, 6)]]);
        assert!(!has_intersection(&a, &b));
        assert!(intersect_n(&[&a, &b]).is_empty());
        let c = dom(1, &[&[(5, 9)]]);
        assert!(has_intersection(&a, &c));
        assert!(!has_intersection(&a, &IntervalDomain::empty()));
    }
}
