//! Set operations on whole objects, with optional grey averaging.

use std::sync::Arc;

use domain_types::{
    DomainObject, GreyKind, GreyValue, GreyValues, IntervalDomain, Object2D, Object3D, PlaneDomain,
    Rgba, VoxelValues,
};
use tracing::info;

use crate::average::{Source, average_table};
use crate::config::SetOpConfig;
use crate::error::{SetOpError, SetOpResult};
use crate::intersect::intersect_n;
use crate::planes::{intersect_n_3d, union_n_3d};
use crate::union::union_n;

/// Intersection of any number of objects.
///
/// Any empty object makes the result [`DomainObject::Empty`], as does an
/// empty intersection or no inputs at all. With
/// [`SetOpConfig::average_values`] every output sample is the mean of the
/// inputs' samples; the background comes from the first input.
///
/// # Errors
///
/// - [`SetOpError::DimensionMismatch`] if 2-D and 3-D objects are mixed.
/// - [`SetOpError::MissingValues`] if averaging and an input has no values.
/// - [`SetOpError::Domain`] wrapping a grey kind mismatch if the inputs'
///   values are of different kinds.
///
/// # Example
///
/// ```
/// use domain_setops::{SetOpConfig, intersect_objects};
/// use domain_types::{DomainObject, IntervalDomain};
///
/// let a = DomainObject::from(IntervalDomain::rect(0, 3, 0, 3)?);
/// let b = DomainObject::from(IntervalDomain::rect(2, 5, 2, 5)?);
/// let i = intersect_objects(&[&a, &b], &SetOpConfig::default())?;
/// match i {
///     DomainObject::TwoD(obj) => assert_eq!(obj.domain().area(), 4),
///     _ => unreachable!(),
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn intersect_objects(objects: &[&DomainObject], config: &SetOpConfig) -> SetOpResult<DomainObject> {
    if objects.iter().any(|o| o.is_empty()) {
        return Ok(DomainObject::Empty);
    }
    combine_objects(objects, Op::Intersect, config)
}

/// Union of any number of objects.
///
/// Empty objects are dropped; if none remain the result is
/// [`DomainObject::Empty`]. With [`SetOpConfig::average_values`] every
/// output sample is the mean of the inputs covering it; the background
/// comes from the first remaining input.
///
/// # Errors
///
/// Same as [`intersect_objects`].
pub fn union_objects(objects: &[&DomainObject], config: &SetOpConfig) -> SetOpResult<DomainObject> {
    let live: Vec<&DomainObject> = objects.iter().copied().filter(|o| !o.is_empty()).collect();
    combine_objects(&live, Op::Union, config)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Intersect,
    Union,
}

/// Combines non-empty objects of one dimensionality.
fn combine_objects(objects: &[&DomainObject], op: Op, config: &SetOpConfig) -> SetOpResult<DomainObject> {
    let mut flat: Vec<&Object2D> = Vec::new();
    let mut volumes: Vec<&Object3D> = Vec::new();
    for obj in objects {
        match obj {
            DomainObject::TwoD(o) => flat.push(o),
            DomainObject::ThreeD(o) => volumes.push(o),
            DomainObject::Empty => {}
        }
    }
    if !flat.is_empty() && !volumes.is_empty() {
        return Err(SetOpError::DimensionMismatch {
            details: format!("{} 2-D and {} 3-D objects", flat.len(), volumes.len()),
        });
    }
    if config.average_values {
        let missing = objects.iter().position(|o| o.grey_kind().is_none());
        if let Some(index) = missing {
            return Err(SetOpError::MissingValues { index });
        }
    }

    let result = if volumes.is_empty() {
        combine_2d(&flat, op, config)?
    } else {
        combine_3d(&volumes, op, config)?
    };
    info!(
        inputs = objects.len(),
        op = ?op,
        averaged = config.average_values,
        empty = result.is_empty(),
        "Combined objects"
    );
    Ok(result)
}

fn combine_2d(objects: &[&Object2D], op: Op, config: &SetOpConfig) -> SetOpResult<DomainObject> {
    let domains: Vec<&IntervalDomain> = objects.iter().map(|o| o.domain()).collect();
    let domain = match op {
        Op::Intersect => intersect_n(&domains),
        Op::Union => union_n(&domains),
    };
    if domain.is_empty() {
        return Ok(DomainObject::Empty);
    }
    if !config.average_values {
        return Ok(Object2D::new(domain).into());
    }
    let tables: Vec<&GreyValues> = objects.iter().filter_map(|o| o.values().map(|v| &**v)).collect();
    let values = dispatch_average(&domain, &domains, &tables)?;
    Ok(Object2D::with_values(domain, Arc::new(values))?.into())
}

fn combine_3d(objects: &[&Object3D], op: Op, config: &SetOpConfig) -> SetOpResult<DomainObject> {
    let domains: Vec<&PlaneDomain> = objects.iter().map(|o| o.domain()).collect();
    let domain = match op {
        Op::Intersect => intersect_n_3d(&domains, config),
        Op::Union => union_n_3d(&domains, config),
    };
    if domain.is_empty() {
        return Ok(DomainObject::Empty);
    }
    if !config.average_values {
        return Ok(Object3D::new(domain).into());
    }

    let voxel_values: Vec<&VoxelValues> = objects.iter().filter_map(|o| o.values()).collect();
    let Some(first) = voxel_values.first() else {
        return Err(SetOpError::MissingValues { index: 0 });
    };
    let mut values = VoxelValues::new(domain.plane1(), domain.plane_count(), first.background());
    for (p, out) in domain.planes() {
        let Some(out) = out.filter(|d| !d.is_empty()) else {
            continue;
        };
        let mut doms = Vec::with_capacity(objects.len());
        let mut tables = Vec::with_capacity(objects.len());
        for (obj, vv) in objects.iter().zip(&voxel_values) {
            if let (Some(d), Some(t)) = (obj.domain().plane(p), vv.plane(p)) {
                doms.push(d);
                tables.push(&**t);
            }
        }
        let plane_values = dispatch_average_with(out, &doms, &tables, first.background().kind())?;
        values.set_plane(p, Some(Arc::new(plane_values)))?;
    }
    Ok(Object3D::with_values(domain, values)?.into())
}

fn dispatch_average(
    out: &IntervalDomain,
    domains: &[&IntervalDomain],
    tables: &[&GreyValues],
) -> SetOpResult<GreyValues> {
    let Some(kind) = tables.first().map(|t| t.kind()) else {
        return Err(SetOpError::MissingValues { index: 0 });
    };
    dispatch_average_with(out, domains, tables, kind)
}

/// Averages `tables` of kind `kind` over `out`; the background is the first
/// table's.
fn dispatch_average_with(
    out: &IntervalDomain,
    domains: &[&IntervalDomain],
    tables: &[&GreyValues],
    kind: GreyKind,
) -> SetOpResult<GreyValues> {
    match kind {
        GreyKind::Int => average_typed::<i32>(out, domains, tables),
        GreyKind::Short => average_typed::<i16>(out, domains, tables),
        GreyKind::UByte => average_typed::<u8>(out, domains, tables),
        GreyKind::Float => average_typed::<f32>(out, domains, tables),
        GreyKind::Double => average_typed::<f64>(out, domains, tables),
        GreyKind::Rgba => average_typed::<Rgba>(out, domains, tables),
    }
}

fn average_typed<T: GreyValue>(
    out: &IntervalDomain,
    domains: &[&IntervalDomain],
    tables: &[&GreyValues],
) -> SetOpResult<GreyValues> {
    let mut sources: Vec<Source<'_, T>> = Vec::with_capacity(tables.len());
    for (dom, table) in domains.iter().zip(tables) {
        sources.push((*dom, table.as_table::<T>()?));
    }
    let background = sources.first().map_or_else(T::default, |(_, t)| t.background());
    Ok(GreyValues::from_table(average_table(out, &sources, background)))
}
