//! 3-D connected-component labeling.
//!
//! Every plane is labeled on its own, then fragments on adjacent planes are
//! joined in a shared union-find when they overlap. With face connectivity
//! (4 or 6) fragments must share a column on some line; with 8, 18 or 26
//! the upper fragment is first grown by one 8-connected step, so diagonal
//! contact across planes also joins.
//!
//! Per-plane labeling, plane-pair linking and output assembly all run on
//! rayon when [`LabelConfig::parallel`] is set. The union-find is the only
//! shared mutable state and is locked around each union.

use std::sync::Arc;

use domain_setops::{Connectivity2, dilate, has_intersection, union_n};
use domain_types::{IntervalDomain, Object3D, PlaneDomain, Vector3, VoxelValues};
use hashbrown::HashMap;
use rayon::prelude::*;
use smallvec::SmallVec;
use tracing::{debug, info};

use crate::config::LabelConfig;
use crate::error::{LabelError, LabelResult};
use crate::label2d::label_planar;
use crate::union_find::SharedUnionFind;

/// Fragments of one plane.
#[derive(Debug)]
struct PlaneFragments {
    plane: i32,
    fragments: Vec<IntervalDomain>,
}

/// The planes of one output component, each with its fragments.
type ComponentSlices<'a> = Vec<(i32, SmallVec<[&'a IntervalDomain; 2]>)>;

/// Labels the connected components of a plane domain.
///
/// Components come back in order of their first fragment (lowest plane,
/// then raster order), each standardized and carrying the source voxel
/// size. Every connectivity is accepted: 4 behaves like 6 and 8 like 26.
///
/// # Errors
///
/// - [`LabelError::NoFragments`] if no plane has a fragment left after
///   [`LabelConfig::ignore_lines`] filtering.
/// - [`LabelError::TooManyObjects`] if a plane or the whole volume has more
///   than [`LabelConfig::max_objects`] components.
///
/// # Example
///
/// ```
/// use domain_label::{LabelConfig, label_plane_domain};
/// use domain_types::{IntervalDomain, PlaneDomain};
///
/// let cube = IntervalDomain::rect(0, 1, 0, 1)?;
/// let stacked = PlaneDomain::from_planes(0, vec![Some(cube.clone()); 4]);
/// assert_eq!(label_plane_domain(&stacked, &LabelConfig::volumetric())?.len(), 1);
/// # Ok::<(), domain_label::LabelError>(())
/// ```
pub fn label_plane_domain(domain: &PlaneDomain, config: &LabelConfig) -> LabelResult<Vec<PlaneDomain>> {
    let diagonal = config.connectivity.joins_diagonals();
    let planes: Vec<(i32, &IntervalDomain)> = domain
        .planes()
        .filter_map(|(p, d)| d.filter(|d| !d.is_empty()).map(|d| (p, &**d)))
        .collect();

    let label_plane = |&(plane, dom): &(i32, &IntervalDomain)| {
        label_planar(dom, diagonal, config).map(|fragments| PlaneFragments { plane, fragments })
    };
    let mut layers: Vec<PlaneFragments> = if config.parallel {
        planes.par_iter().map(label_plane).collect::<LabelResult<_>>()?
    } else {
        planes.iter().map(label_plane).collect::<LabelResult<_>>()?
    };
    layers.retain(|layer| !layer.fragments.is_empty());

    let mut offsets = Vec::with_capacity(layers.len());
    let mut total = 0;
    for layer in &layers {
        offsets.push(total);
        total += layer.fragments.len();
    }
    if total == 0 {
        return Err(LabelError::NoFragments);
    }

    let (labels, count) = if total == 1 {
        (vec![0], 1)
    } else {
        let dilation = diagonal.then_some(Connectivity2::Eight);
        let forest = SharedUnionFind::new(total);
        let pairs: Vec<usize> = (1..layers.len())
            .filter(|&k| layers[k].plane == layers[k - 1].plane + 1)
            .collect();
        let link = |&k: &usize| {
            link_planes(&layers[k - 1], offsets[k - 1], &layers[k], offsets[k], dilation, &forest);
        };
        if config.parallel {
            pairs.par_iter().for_each(link);
        } else {
            pairs.iter().for_each(link);
        }
        debug!(fragments = total, plane_pairs = pairs.len(), "Linked plane fragments");
        forest.into_inner().dense_labels()
    };
    if count > config.max_objects {
        return Err(LabelError::TooManyObjects {
            max: config.max_objects,
            found: count,
        });
    }

    let mut groups: Vec<ComponentSlices<'_>> = vec![Vec::new(); count];
    for (layer, &base) in layers.iter().zip(&offsets) {
        let mut by_component: HashMap<usize, SmallVec<[&IntervalDomain; 2]>> = HashMap::new();
        for (i, frag) in layer.fragments.iter().enumerate() {
            by_component.entry(labels[base + i]).or_default().push(frag);
        }
        for (component, frags) in by_component {
            groups[component].push((layer.plane, frags));
        }
    }

    let voxel_size = domain.voxel_size();
    let components: Vec<PlaneDomain> = if config.parallel {
        groups
            .par_iter()
            .map(|slices| assemble(slices, voxel_size))
            .collect::<LabelResult<_>>()?
    } else {
        groups
            .iter()
            .map(|slices| assemble(slices, voxel_size))
            .collect::<LabelResult<_>>()?
    };

    info!(
        planes = planes.len(),
        fragments = total,
        components = components.len(),
        connectivity = ?config.connectivity,
        parallel = config.parallel,
        "Labeled plane domain"
    );
    Ok(components)
}

/// Labels a 3-D object.
///
/// Components of an object with values get a new voxel table whose planes
/// share the source's plane tables and whose background is the source's.
///
/// # Errors
///
/// As [`label_plane_domain`].
pub fn label_3d(object: &Object3D, config: &LabelConfig) -> LabelResult<Vec<Object3D>> {
    let components = label_plane_domain(object.domain(), config)?;
    let Some(values) = object.values() else {
        return Ok(components.into_iter().map(Object3D::new).collect());
    };
    components
        .into_iter()
        .map(|dom| {
            let mut shared = VoxelValues::new(dom.plane1(), dom.plane_count(), values.background());
            for (p, plane) in dom.planes() {
                if plane.is_some() {
                    shared.set_plane(p, values.plane(p).cloned())?;
                }
            }
            Ok(Object3D::with_values(dom, shared)?)
        })
        .collect()
}

/// Joins fragments of `upper` with the fragments of `lower` they touch.
fn link_planes(
    lower: &PlaneFragments,
    lower_base: usize,
    upper: &PlaneFragments,
    upper_base: usize,
    dilation: Option<Connectivity2>,
    forest: &SharedUnionFind,
) {
    for (j, frag) in upper.fragments.iter().enumerate() {
        let grown = dilation.map(|c| dilate(frag, c));
        let probe = grown.as_ref().unwrap_or(frag);
        for (i, other) in lower.fragments.iter().enumerate() {
            // Inclusive box test inside `has_intersection` rejects most pairs.
            if has_intersection(probe, other) {
                forest.union(lower_base + i, upper_base + j);
            }
        }
    }
}

/// Builds one component from its per-plane fragments.
fn assemble(slices: &ComponentSlices<'_>, voxel_size: Vector3<f64>) -> LabelResult<PlaneDomain> {
    let (Some(&(plane1, _)), Some(&(lastpl, _))) = (slices.first(), slices.last()) else {
        return Ok(PlaneDomain::empty().with_voxel_size(voxel_size));
    };
    let mut out = PlaneDomain::new(plane1, lastpl)?.with_voxel_size(voxel_size);
    for (plane, frags) in slices {
        out.set_plane(*plane, Some(Arc::new(union_n(frags))))?;
    }
    out.standardize(None)?;
    Ok(out)
}
