//! One-step morphological dilation of interval domains.

use domain_types::{IntervalDomain, IntervalDomainBuilder};
use smallvec::SmallVec;

/// Planar neighbourhood used by dilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Connectivity2 {
    /// Edge neighbours only.
    Four,
    /// Edge and corner neighbours.
    #[default]
    Eight,
}

/// Grows `domain` by one sample in the given neighbourhood.
///
/// Output line `l` is built from source lines `l - 1`, `l` and `l + 1`:
/// the centre line's intervals grow one column each way, and the
/// neighbouring lines' intervals are copied as they are (4-connected) or
/// also grown (8-connected). The result is standardized.
///
/// # Example
///
/// ```
/// use domain_setops::{Connectivity2, dilate};
/// use domain_types::IntervalDomain;
///
/// let dot = IntervalDomain::rect(5, 5, 5, 5)?;
/// assert_eq!(dilate(&dot, Connectivity2::Four).area(), 5);
/// assert_eq!(dilate(&dot, Connectivity2::Eight).area(), 9);
/// # Ok::<(), domain_types::DomainError>(())
/// ```
#[must_use]
pub fn dilate(domain: &IntervalDomain, connectivity: Connectivity2) -> IntervalDomain {
    if domain.is_empty() {
        return IntervalDomain::empty();
    }
    let grow_neighbours = i32::from(connectivity == Connectivity2::Eight);
    let kol1 = domain.kol1();
    let mut builder = IntervalDomainBuilder::with_capacity(domain.interval_count() + 2);
    let mut runs: SmallVec<[(i32, i32); 16]> = SmallVec::new();

    for line in domain.line1() - 1..=domain.lastln() + 1 {
        runs.clear();
        for (src, grow) in [
            (line - 1, grow_neighbours),
            (line, 1),
            (line + 1, grow_neighbours),
        ] {
            runs.extend(
                domain
                    .line_intervals(src)
                    .iter()
                    .map(|itv| (kol1 + itv.left - grow, kol1 + itv.right + grow)),
            );
        }
        runs.sort_unstable();

        let mut pending: Option<(i32, i32)> = None;
        for &(left, right) in &runs {
            pending = match pending {
                Some((l, r)) if left <= r + 1 => Some((l, r.max(right))),
                Some((l, r)) => {
                    let _ = builder.push(line, l, r);
                    Some((left, right))
                }
                None => Some((left, right)),
            };
        }
        if let Some((l, r)) = pending {
            let _ = builder.push(line, l, r);
        }
    }
    builder.finish()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::union_n;

    fn shifted_union(dom: &IntervalDomain, offsets: &[(i32, i32)]) -> IntervalDomain {
        let shifted: Vec<_> = offsets.iter().map(|&(dl, dk)| dom.shifted(dl, dk)).collect();
        let refs: Vec<&IntervalDomain> = shifted.iter().collect();
        union_n(&refs)
    }

    fn sample() -> IntervalDomain {
        IntervalDomain::from_intervals(0, &[vec![(0, 2), (6, 6)], vec![], vec![(3, 4)]]).unwrap()
    }

    #[test]
    fn four_connected_is_union_of_edge_shifts() {
        let dom = sample();
        let expected = shifted_union(&dom, &[(0, 0), (-1, 0), (1, 0), (0, -1), (0, 1)]);
        assert_eq!(dilate(&dom, Connectivity2::Four), expected);
    }

    #[test]
    fn eight_connected_is_union_of_all_shifts() {
        let dom = sample();
        let mut offsets = Vec::new();
        for dl in -1..=1 {
            for dk in -1..=1 {
                offsets.push((dl, dk));
            }
        }
        assert_eq!(dilate(&dom, Connectivity2::Eight), shifted_union(&dom, &offsets));
    }

    #[test]
    fn empty_stays_empty() {
        assert!(dilate(&IntervalDomain::empty(), Connectivity2::Eight).is_empty());
    }
}
