//! N-way union of interval domains.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use domain_scan::{RasterDir, ScanCursor};
use domain_types::{IntervalDomain, IntervalDomainBuilder};
use tracing::debug;

use crate::intersect::Cursors;

/// Union of any number of domains.
///
/// The inputs' intervals are merged in raster order; overlapping or
/// adjacent intervals on a line become one output interval. Empty inputs
/// are dropped first. No inputs gives the empty domain and a single input
/// gives a copy of it. The result is standardized.
///
/// # Example
///
/// ```
/// use domain_setops::union_n;
/// use domain_types::IntervalDomain;
///
/// let a = IntervalDomain::rect(0, 0, 0, 0)?;
/// let b = IntervalDomain::rect(10, 10, 10, 10)?;
/// let u = union_n(&[&a, &b]);
/// assert_eq!(u.area(), 2);
/// assert_eq!((u.line1(), u.lastln(), u.kol1(), u.lastkl()), (0, 10, 0, 10));
/// # Ok::<(), domain_types::DomainError>(())
/// ```
#[must_use]
pub fn union_n(domains: &[&IntervalDomain]) -> IntervalDomain {
    let live: Vec<&IntervalDomain> = domains.iter().copied().filter(|d| !d.is_empty()).collect();
    match live.as_slice() {
        [] => return IntervalDomain::empty(),
        [only] => return (*only).clone(),
        _ => {}
    }

    let capacity = live.iter().map(|d| d.interval_count()).sum();
    let mut builder = IntervalDomainBuilder::with_capacity(capacity);
    let mut cursors: Cursors<'_> = live
        .iter()
        .map(|d| ScanCursor::new(d, RasterDir::IncLineIncCol))
        .collect();

    // Min-heap of (line, left, cursor) over the cursors' current intervals.
    let mut heap: BinaryHeap<Reverse<(i32, i32, usize)>> = cursors
        .iter()
        .enumerate()
        .filter_map(|(i, c)| c.current().map(|cur| Reverse((cur.line, cur.left, i))))
        .collect();

    let mut pending: Option<(i32, i32, i32)> = None;
    while let Some(Reverse((_, _, i))) = heap.pop() {
        let Some(cur) = cursors[i].current() else {
            continue;
        };
        pending = match pending {
            Some((line, left, right)) if line == cur.line && cur.left <= right + 1 => {
                Some((line, left, right.max(cur.right)))
            }
            Some((line, left, right)) => {
                emit(&mut builder, line, left, right);
                Some((cur.line, cur.left, cur.right))
            }
            None => Some((cur.line, cur.left, cur.right)),
        };
        if let Some(next) = cursors[i].advance() {
            heap.push(Reverse((next.line, next.left, i)));
        }
    }
    if let Some((line, left, right)) = pending {
        emit(&mut builder, line, left, right);
    }

    let out = builder.finish();
    debug!(
        inputs = domains.len(),
        merged = live.len(),
        intervals = out.interval_count(),
        area = out.area(),
        "United domains"
    );
    out
}

fn emit(builder: &mut IntervalDomainBuilder, line: i32, left: i32, right: i32) {
    // Merged runs are separated by at least one column, so pushes never
    // overlap the previous interval.
    let _ = builder.push(line, left, right);
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::intersect_n;

    fn dom(line1: i32, lines: &[&[(i32, i32)]]) -> IntervalDomain {
        IntervalDomain::from_intervals(line1, lines).unwrap()
    }

    #[test]
    fn zero_and_one_input() {
        assert!(union_n(&[]).is_empty());
        let a = dom(-2, &[&[(0, 4), (7, 7)]]);
        assert_eq!(union_n(&[&a]), a);
        assert_eq!(union_n(&[&a, &IntervalDomain::empty()]), a);
    }

    #[test]
    fn adjacent_intervals_merge() {
        let a = dom(0, &[&[(0, 2), (10, 12)]]);
        let b = dom(0, &[&[(3, 5)]]);
        let c = dom(0, &[&[(6, 9)]]);
        let u = union_n(&[&a, &b, &c]);
        assert_eq!(u, dom(0, &[&[(0, 12)]]));
        assert_eq!(u.interval_count(), 1);
    }

    #[test]
    fn nested_and_overlapping() {
        let a = dom(0, &[&[(0, 20)], &[(5, 6)]]);
        let b = dom(0, &[&[(3, 4), (8, 30)], &[], &[(0, 0)]]);
        let u = union_n(&[&b, &a]);
        assert_eq!(u, dom(0, &[&[(0, 30)], &[(5, 6)], &[(0, 0)]]));
    }

    #[test]
    fn argument_order_is_irrelevant() {
        let a = dom(0, &[&[(0, 1), (8, 9)], &[(4, 4)]]);
        let b = dom(1, &[&[(5, 7)], &[(0, 3)]]);
        let c = dom(-1, &[&[(2, 2)], &[], &[], &[(3, 3), (9, 12)]]);
        let u = union_n(&[&a, &b, &c]);
        assert_eq!(u, union_n(&[&c, &b, &a]));
        assert_eq!(u, union_n(&[&b, &a, &c]));
        assert_eq!(u.area(), a.area() + b.area() + c.area() - 1);
    }

    #[test]
    fn area_conservation() {
        let a = dom(0, &[&[(0, 9)], &[(2, 5), (8, 12)], &[(0, 0)]]);
        let b = dom(1, &[&[(4, 9)], &[(0, 3)], &[(1, 1)]]);
        let i = intersect_n(&[&a, &b]);
        let u = union_n(&[&a, &b]);
        assert_eq!(i.area() + u.area(), a.area() + b.area());
    }
}
