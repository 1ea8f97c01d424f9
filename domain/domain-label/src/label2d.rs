//! 2-D connected-component labeling by interval adjacency.
//!
//! Intervals on consecutive lines are joined when their column ranges
//! overlap (4-connected) or overlap or touch at a corner (8-connected). One
//! forward pass over the lines links adjacent intervals in a union-find, a
//! second pass routes every interval into its component's builder.

use std::sync::Arc;

use domain_types::{Interval, IntervalDomain, IntervalDomainBuilder, Object2D};
use tracing::debug;

use crate::config::LabelConfig;
use crate::error::{LabelError, LabelResult};
use crate::union_find::UnionFind;

/// Labels the connected components of a 2-D domain.
///
/// Components come back in raster order of their first interval, each as a
/// standardized domain. Components smaller than
/// [`LabelConfig::ignore_lines`] are dropped. An empty domain has no
/// components.
///
/// # Errors
///
/// - [`LabelError::InvalidConnectivity`] for a volumetric connectivity.
/// - [`LabelError::TooManyObjects`] if more than
///   [`LabelConfig::max_objects`] components are kept.
///
/// # Example
///
/// ```
/// use domain_label::{LabelConfig, label_2d};
/// use domain_types::IntervalDomain;
///
/// // Two samples touching at a corner.
/// let dom = IntervalDomain::from_intervals(0, &[vec![(0, 0)], vec![(1, 1)]])?;
/// assert_eq!(label_2d(&dom, &LabelConfig::planar())?.len(), 1);
///
/// let four = LabelConfig::planar().with_connectivity(domain_label::Connectivity::Four);
/// assert_eq!(label_2d(&dom, &four)?.len(), 2);
/// # Ok::<(), domain_label::LabelError>(())
/// ```
pub fn label_2d(domain: &IntervalDomain, config: &LabelConfig) -> LabelResult<Vec<IntervalDomain>> {
    if !config.connectivity.is_planar() {
        return Err(LabelError::InvalidConnectivity {
            connectivity: config.connectivity,
            dimensions: 2,
        });
    }
    label_planar(domain, config.connectivity.joins_diagonals(), config)
}

/// Labels a 2-D object; every component shares the source value table.
///
/// # Errors
///
/// As [`label_2d`].
pub fn label_object_2d(object: &Object2D, config: &LabelConfig) -> LabelResult<Vec<Object2D>> {
    let components = label_2d(object.domain(), config)?;
    match object.values() {
        None => Ok(components.into_iter().map(Object2D::new).collect()),
        Some(values) => components
            .into_iter()
            .map(|dom| Ok(Object2D::with_values(dom, Arc::clone(values))?))
            .collect(),
    }
}

/// Labeling core shared with the per-plane pass of 3-D labeling.
pub(crate) fn label_planar(
    domain: &IntervalDomain,
    diagonal: bool,
    config: &LabelConfig,
) -> LabelResult<Vec<IntervalDomain>> {
    if domain.is_empty() {
        return Ok(Vec::new());
    }
    let slack = i32::from(diagonal);
    let mut forest = UnionFind::new(domain.interval_count());

    let mut prev: &[Interval] = &[];
    let mut prev_base = 0;
    let mut base = 0;
    for (_, itvs) in domain.lines() {
        link_lines(&mut forest, prev, prev_base, itvs, base, slack);
        prev = itvs;
        prev_base = base;
        base += itvs.len();
    }

    let (labels, count) = forest.dense_labels();
    let mut builders = vec![IntervalDomainBuilder::new(); count];
    let kol1 = domain.kol1();
    let mut id = 0;
    for (line, itvs) in domain.lines() {
        for itv in itvs {
            builders[labels[id]].push(line, kol1 + itv.left, kol1 + itv.right)?;
            id += 1;
        }
    }

    let min_extent = i64::from(config.ignore_lines);
    let components: Vec<IntervalDomain> = builders
        .into_iter()
        .map(IntervalDomainBuilder::finish)
        .filter(|dom| {
            let bbox = dom.bounding_box();
            bbox.height() - 1 >= min_extent && bbox.width() - 1 >= min_extent
        })
        .collect();

    if components.len() > config.max_objects {
        return Err(LabelError::TooManyObjects {
            max: config.max_objects,
            found: components.len(),
        });
    }
    debug!(
        intervals = base,
        found = count,
        kept = components.len(),
        diagonal,
        "Labeled planar domain"
    );
    Ok(components)
}

/// Unions every interval of `lower` with the intervals of `upper` it
/// touches. Both lines are sorted, so one merge-like sweep visits every
/// candidate pair.
fn link_lines(
    forest: &mut UnionFind,
    upper: &[Interval],
    upper_base: usize,
    lower: &[Interval],
    lower_base: usize,
    slack: i32,
) {
    let (mut i, mut k) = (0, 0);
    while let (Some(a), Some(b)) = (upper.get(i), lower.get(k)) {
        if a.left <= b.right + slack && b.left <= a.right + slack {
            forest.union(upper_base + i, lower_base + k);
        }
        match a.right.cmp(&b.right) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => k += 1,
            std::cmp::Ordering::Equal => {
                i += 1;
                k += 1;
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::Connectivity;
    use domain_setops::union_n;
    use domain_types::{GreyValues, ValueTable};

    fn dom(line1: i32, lines: &[&[(i32, i32)]]) -> IntervalDomain {
        IntervalDomain::from_intervals(line1, lines).unwrap()
    }

    fn four() -> LabelConfig {
        LabelConfig::planar().with_connectivity(Connectivity::Four)
    }

    #[test]
    fn disjoint_squares() {
        let a = IntervalDomain::rect(0, 0, 0, 0).unwrap();
        let b = IntervalDomain::rect(10, 10, 10, 10).unwrap();
        let u = union_n(&[&a, &b]);
        let parts = label_2d(&u, &LabelConfig::planar()).unwrap();
        assert_eq!(parts, vec![a, b]);
    }

    #[test]
    fn u_shape_joins_late() {
        // Two prongs that only meet on the last line.
        let d = dom(0, &[&[(0, 0), (4, 4)], &[(0, 0), (4, 4)], &[(0, 4)]]);
        let parts = label_2d(&d, &four()).unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0], d);
    }

    #[test]
    fn diagonal_needs_eight_connectivity() {
        let d = dom(0, &[&[(0, 1)], &[(2, 3)]]);
        assert_eq!(label_2d(&d, &LabelConfig::planar()).unwrap().len(), 1);
        let parts = label_2d(&d, &four()).unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].bounding_box().lastkl, 1);
    }

    #[test]
    fn empty_line_separates() {
        let d = dom(0, &[&[(0, 3)], &[], &[(0, 3)]]);
        assert_eq!(label_2d(&d, &LabelConfig::planar()).unwrap().len(), 2);
    }

    #[test]
    fn partition_of_input() {
        let d = dom(
            3,
            &[&[(0, 2), (6, 8), (12, 12)], &[(2, 6), (14, 15)], &[(0, 0), (9, 9)], &[(1, 1)]],
        );
        for config in [four(), LabelConfig::planar()] {
            let parts = label_2d(&d, &config).unwrap();
            let refs: Vec<&IntervalDomain> = parts.iter().collect();
            assert_eq!(union_n(&refs), d);
            let area: i64 = parts.iter().map(IntervalDomain::area).sum();
            assert_eq!(area, d.area());
        }
    }

    #[test]
    fn ignore_lines_drops_small_parts() {
        let d = dom(0, &[&[(0, 0), (4, 7)], &[(4, 7)], &[(4, 7)]]);
        let parts = label_2d(&d, &LabelConfig::planar().with_ignore_lines(2)).unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].area(), 12);
    }

    #[test]
    fn too_many_objects() {
        let d = dom(0, &[&[(0, 0), (2, 2), (4, 4)]]);
        let err = label_2d(&d, &LabelConfig::planar().with_max_objects(2)).unwrap_err();
        assert_eq!(err, LabelError::TooManyObjects { max: 2, found: 3 });
    }

    #[test]
    fn volumetric_connectivity_rejected() {
        let d = dom(0, &[&[(0, 0)]]);
        let err = label_2d(&d, &LabelConfig::volumetric()).unwrap_err();
        assert!(matches!(err, LabelError::InvalidConnectivity { dimensions: 2, .. }));
    }

    #[test]
    fn components_share_values() {
        let d = dom(0, &[&[(0, 1), (5, 6)]]);
        let values = Arc::new(GreyValues::from(ValueTable::for_domain(&d, 7i16)));
        let obj = Object2D::with_values(d, Arc::clone(&values)).unwrap();
        let parts = label_object_2d(&obj, &LabelConfig::planar()).unwrap();
        assert_eq!(parts.len(), 2);
        for part in &parts {
            assert!(Arc::ptr_eq(part.values().unwrap(), &values));
        }
    }
}
