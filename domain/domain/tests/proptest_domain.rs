//! Property-based tests for domain operations.
//!
//! These tests use proptest to generate random interval and plane domains
//! and verify the invariants of standardization, set algebra and labeling.
//!
//! Run with: cargo test -p domain -- proptest

#![allow(clippy::unwrap_used, clippy::expect_used)]

use domain::label::label_plane_domain;
use domain::prelude::*;
use domain::setops::has_intersection;
use proptest::prelude::*;

// =============================================================================
// Strategies for generating random domains
// =============================================================================

/// Generate one line of sorted intervals separated by at least one column.
fn arb_line() -> impl Strategy<Value = Vec<(i32, i32)>> {
    (0..20i32, prop::collection::vec((1..6i32, 1..6i32), 0..4)).prop_map(|(start, runs)| {
        let mut col = start;
        let mut line = Vec::with_capacity(runs.len());
        for (gap, len) in runs {
            let right = col + len - 1;
            line.push((col, right));
            col = right + 1 + gap;
        }
        line
    })
}

/// Generate the per-line interval lists of a domain.
fn arb_lines() -> impl Strategy<Value = (i32, Vec<Vec<(i32, i32)>>)> {
    (-5..5i32, prop::collection::vec(arb_line(), 1..8))
}

/// Generate a random interval domain.
fn arb_domain() -> impl Strategy<Value = IntervalDomain> {
    arb_lines().prop_map(|(line1, lines)| IntervalDomain::from_intervals(line1, &lines).unwrap())
}

/// Generate a random plane domain with some absent planes.
fn arb_plane_domain() -> impl Strategy<Value = PlaneDomain> {
    (
        -3..3i32,
        prop::collection::vec(prop::option::weighted(0.8, arb_domain()), 1..5),
    )
        .prop_map(|(plane1, planes)| PlaneDomain::from_planes(plane1, planes))
}

// =============================================================================
// Standardization and construction
// =============================================================================

proptest! {
    #[test]
    fn proptest_standardize_idempotent(d in arb_domain()) {
        let mut once = d.clone();
        once.standardize();
        let mut twice = once.clone();
        twice.standardize();
        prop_assert_eq!(&once, &twice);
        prop_assert!(twice.is_standard());
        prop_assert_eq!(once.area(), d.area());
    }

    #[test]
    fn proptest_pool_matches_interval_lists((line1, lines) in arb_lines()) {
        let expected = IntervalDomain::from_intervals(line1, &lines).unwrap();
        let mut built = IntervalDomain::new(line1, line1, 0, 100).unwrap();
        let mut pool = DynItvPool::new(3);
        for (line, itvs) in (line1..).zip(&lines) {
            for &(left, right) in itvs {
                built.dyn_add(&mut pool, line, left, right - left + 1).unwrap();
            }
        }
        built.standardize();
        prop_assert_eq!(built, expected);
    }

    #[test]
    fn proptest_bitmask_round_trip(d in arb_domain()) {
        let width = usize::try_from(d.bounding_box().width()).unwrap();
        let rows = d.to_bitmask();
        let back = IntervalDomain::from_bitmask(d.line1(), d.kol1(), width, &rows).unwrap();
        prop_assert_eq!(back, d);
    }

    #[test]
    fn proptest_reverse_scan_is_reversed(d in arb_domain()) {
        let forward: Vec<_> = raster_scan(&d, RasterDir::IncLineIncCol).collect();
        let mut backward: Vec<_> = raster_scan(&d, RasterDir::DecLineDecCol).collect();
        backward.reverse();
        prop_assert_eq!(forward.len(), d.interval_count());
        prop_assert_eq!(forward, backward);
    }
}

// =============================================================================
// Set algebra
// =============================================================================

proptest! {
    #[test]
    fn proptest_area_conservation(a in arb_domain(), b in arb_domain()) {
        let i = intersect_n(&[&a, &b]);
        let u = union_n(&[&a, &b]);
        prop_assert_eq!(i.area() + u.area(), a.area() + b.area());
        prop_assert!(i.is_standard());
        prop_assert!(u.is_standard());
    }

    #[test]
    fn proptest_identity(d in arb_domain()) {
        prop_assert_eq!(&union_n(&[&d]), &d);
        prop_assert_eq!(&intersect_n(&[&d]), &d);
        prop_assert_eq!(&union_n(&[&d, &d]), &d);
        prop_assert_eq!(&intersect_n(&[&d, &d]), &d);
    }

    #[test]
    fn proptest_order_independence(a in arb_domain(), b in arb_domain(), c in arb_domain()) {
        let u = union_n(&[&a, &b, &c]);
        prop_assert_eq!(&u, &union_n(&[&c, &a, &b]));
        prop_assert_eq!(&u, &union_n(&[&b, &c, &a]));
        prop_assert_eq!(&u, &union_n(&[&union_n(&[&a, &b]), &c]));

        let i = intersect_n(&[&a, &b, &c]);
        prop_assert_eq!(&i, &intersect_n(&[&c, &a, &b]));
        prop_assert_eq!(&i, &intersect_n(&[&intersect_n(&[&a, &b]), &c]));
    }

    #[test]
    fn proptest_plane_area_conservation(a in arb_plane_domain(), b in arb_plane_domain()) {
        let config = SetOpConfig::default();
        let i = intersect_n_3d(&[&a, &b], &config);
        let u = union_n_3d(&[&a, &b], &config);
        prop_assert_eq!(i.volume() + u.volume(), a.volume() + b.volume());
    }
}

// =============================================================================
// Labeling
// =============================================================================

proptest! {
    #[test]
    fn proptest_label_2d_partitions(d in arb_domain(), diagonal in any::<bool>()) {
        let connectivity = if diagonal { Connectivity::Eight } else { Connectivity::Four };
        let config = LabelConfig::planar().with_connectivity(connectivity);
        let parts = label_2d(&d, &config).unwrap();

        let refs: Vec<&IntervalDomain> = parts.iter().collect();
        prop_assert_eq!(&union_n(&refs), &d);
        let area: i64 = parts.iter().map(IntervalDomain::area).sum();
        prop_assert_eq!(area, d.area());
        for (k, a) in parts.iter().enumerate() {
            prop_assert!(a.is_standard());
            for b in &parts[k + 1..] {
                prop_assert!(!has_intersection(a, b));
            }
        }
    }

    #[test]
    fn proptest_label_3d_partitions(pd in arb_plane_domain(), diagonal in any::<bool>()) {
        prop_assume!(!pd.is_empty());
        let connectivity = if diagonal { Connectivity::TwentySix } else { Connectivity::Six };
        let config = LabelConfig::volumetric().with_connectivity(connectivity);

        let parallel = label_plane_domain(&pd, &config.with_parallel(true)).unwrap();
        let sequential = label_plane_domain(&pd, &config.with_parallel(false)).unwrap();
        prop_assert_eq!(&parallel, &sequential);

        let refs: Vec<&PlaneDomain> = parallel.iter().collect();
        prop_assert_eq!(&union_n_3d(&refs, &SetOpConfig::default()), &pd);
        let volume: i64 = parallel.iter().map(PlaneDomain::volume).sum();
        prop_assert_eq!(volume, pd.volume());
    }
}
