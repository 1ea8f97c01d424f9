//! N-way set operations on plane domains.
//!
//! Both operations work plane by plane: the output plane range is the
//! intersection (or union) of the input ranges and each output plane is the
//! 2-D operation applied to the inputs' domains on that plane. Planes are
//! independent, so with [`SetOpConfig::parallel`] they are processed with
//! rayon.

use std::sync::Arc;

use domain_types::{IntervalDomain, PlaneDomain};
use rayon::prelude::*;
use tracing::debug;

use crate::config::SetOpConfig;
use crate::intersect::intersect_n;
use crate::union::union_n;

/// Which 2-D operation to apply per plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PlaneOp {
    Intersect,
    Union,
}

/// Intersection of any number of plane domains.
///
/// A plane that is absent from any input is absent from the result. No
/// inputs gives the empty domain, a single input a copy of it and any empty
/// input an empty result. The voxel size is taken from the first input.
/// The result is standardized.
///
/// # Example
///
/// ```
/// use domain_setops::{SetOpConfig, intersect_n_3d};
/// use domain_types::{IntervalDomain, PlaneDomain};
///
/// let sq = IntervalDomain::rect(0, 3, 0, 3)?;
/// let a = PlaneDomain::from_planes(0, vec![Some(sq.clone()), Some(sq.clone()), Some(sq.clone())]);
/// let b = PlaneDomain::from_planes(2, vec![Some(sq.shifted(2, 2)), Some(sq)]);
/// let i = intersect_n_3d(&[&a, &b], &SetOpConfig::default());
/// assert_eq!((i.plane1(), i.lastpl()), (2, 2));
/// assert_eq!(i.volume(), 4);
/// # Ok::<(), domain_types::DomainError>(())
/// ```
#[must_use]
pub fn intersect_n_3d(domains: &[&PlaneDomain], config: &SetOpConfig) -> PlaneDomain {
    match domains {
        [] => return PlaneDomain::empty(),
        [only] => return (*only).clone(),
        _ => {}
    }
    if domains.iter().any(|d| d.is_empty()) {
        return PlaneDomain::empty().with_voxel_size(domains[0].voxel_size());
    }
    combine(domains, PlaneOp::Intersect, config)
}

/// Union of any number of plane domains.
///
/// Empty inputs are dropped first. No inputs gives the empty domain and a
/// single input a copy of it. The voxel size is taken from the first
/// remaining input. The result is standardized.
#[must_use]
pub fn union_n_3d(domains: &[&PlaneDomain], config: &SetOpConfig) -> PlaneDomain {
    let live: Vec<&PlaneDomain> = domains.iter().copied().filter(|d| !d.is_empty()).collect();
    match live.as_slice() {
        [] => PlaneDomain::empty(),
        [only] => (*only).clone(),
        _ => combine(&live, PlaneOp::Union, config),
    }
}

/// Applies `op` plane by plane over non-empty inputs.
pub(crate) fn combine(domains: &[&PlaneDomain], op: PlaneOp, config: &SetOpConfig) -> PlaneDomain {
    let voxel_size = domains[0].voxel_size();
    let ranges = domains.iter().map(|d| (d.plane1(), d.lastpl()));
    let (plane1, lastpl) = match op {
        PlaneOp::Intersect => ranges.fold((i32::MIN, i32::MAX), |(a, b), (p, q)| (a.max(p), b.min(q))),
        PlaneOp::Union => ranges.fold((i32::MAX, i32::MIN), |(a, b), (p, q)| (a.min(p), b.max(q))),
    };
    let Ok(mut out) = PlaneDomain::new(plane1, lastpl) else {
        return PlaneDomain::empty().with_voxel_size(voxel_size);
    };
    out.set_voxel_size(voxel_size);

    let combine_plane = |p: i32| -> Option<IntervalDomain> {
        let planes: Vec<&IntervalDomain> = domains.iter().filter_map(|d| d.plane(p)).collect();
        match op {
            PlaneOp::Intersect if planes.len() < domains.len() => None,
            PlaneOp::Intersect => Some(intersect_n(&planes)),
            PlaneOp::Union if planes.is_empty() => None,
            PlaneOp::Union => Some(union_n(&planes)),
        }
    };
    let results: Vec<(i32, Option<IntervalDomain>)> = if config.parallel {
        (plane1..=lastpl)
            .into_par_iter()
            .map(|p| (p, combine_plane(p)))
            .collect()
    } else {
        (plane1..=lastpl).map(|p| (p, combine_plane(p))).collect()
    };

    for (p, dom) in results {
        let dom = dom.filter(|d| !d.is_empty()).map(Arc::new);
        // Every p lies in plane1..=lastpl, the range `out` was built with.
        let _ = out.set_plane(p, dom);
    }
    let _ = out.standardize(None);
    debug!(
        inputs = domains.len(),
        op = ?op,
        planes = out.plane_count(),
        volume = out.volume(),
        "Combined plane domains"
    );
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn stack(plane1: i32, planes: &[Option<IntervalDomain>]) -> PlaneDomain {
        PlaneDomain::from_planes(plane1, planes.to_vec())
    }

    fn sq(line: i32, col: i32) -> IntervalDomain {
        IntervalDomain::rect(line, line + 1, col, col + 1).unwrap()
    }

    #[test]
    fn union_spans_both_ranges() {
        let a = stack(0, &[Some(sq(0, 0))]);
        let b = stack(3, &[Some(sq(5, 5)), Some(sq(5, 5))]);
        for parallel in [true, false] {
            let config = SetOpConfig::default().with_parallel(parallel);
            let u = union_n_3d(&[&a, &b], &config);
            assert_eq!((u.plane1(), u.lastpl()), (0, 4));
            assert_eq!(u.volume(), 12);
            assert!(u.plane(1).is_none());
        }
    }

    #[test]
    fn intersection_with_gap_plane() {
        let a = stack(0, &[Some(sq(0, 0)), None, Some(sq(0, 0))]);
        let b = stack(0, &[Some(sq(0, 0)), Some(sq(0, 0)), Some(sq(1, 1))]);
        let i = intersect_n_3d(&[&a, &b], &SetOpConfig::default());
        assert_eq!((i.plane1(), i.lastpl()), (0, 2));
        assert!(i.plane(1).is_none());
        assert_eq!(i.plane(2).map(IntervalDomain::area), Some(1));
    }

    #[test]
    fn disjoint_ranges_give_empty() {
        let a = stack(0, &[Some(sq(0, 0))]);
        let b = stack(5, &[Some(sq(0, 0))]);
        assert!(intersect_n_3d(&[&a, &b], &SetOpConfig::default()).is_empty());
        assert!(intersect_n_3d(&[&a, &PlaneDomain::empty()], &SetOpConfig::default()).is_empty());
    }

    #[test]
    fn identity_and_commutativity() {
        let a = stack(0, &[Some(sq(0, 0)), Some(sq(1, 0))]);
        let b = stack(1, &[Some(sq(0, 1)), Some(sq(3, 3))]);
        let config = SetOpConfig::default();
        assert_eq!(union_n_3d(&[&a], &config), a);
        assert_eq!(intersect_n_3d(&[&a], &config), a);
        assert_eq!(union_n_3d(&[&a, &b], &config), union_n_3d(&[&b, &a], &config));
        let i = intersect_n_3d(&[&a, &b], &config);
        let u = union_n_3d(&[&a, &b], &config);
        assert_eq!(i.volume() + u.volume(), a.volume() + b.volume());
    }
}
