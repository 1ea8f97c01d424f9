//! Domain objects: a domain with optional grey values.

use std::sync::Arc;

use crate::domain::IntervalDomain;
use crate::error::{DomainError, DomainResult};
use crate::grey::GreyKind;
use crate::plane::PlaneDomain;
use crate::values::{GreyValues, VoxelValues};

/// A 2-D domain with an optional shared value table.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use domain_types::{GreyValues, IntervalDomain, Object2D, ValueTable};
///
/// let dom = IntervalDomain::rect(0, 3, 0, 3)?;
/// let table = ValueTable::for_domain(&dom, 0u8);
/// let obj = Object2D::with_values(dom, Arc::new(GreyValues::from(table)))?;
/// assert!(obj.values().is_some());
/// # Ok::<(), domain_types::DomainError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Object2D {
    domain: IntervalDomain,
    values: Option<Arc<GreyValues>>,
}

impl Object2D {
    /// Creates an object without values.
    #[must_use]
    pub const fn new(domain: IntervalDomain) -> Self {
        Self {
            domain,
            values: None,
        }
    }

    /// Creates an object with values.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::ValuesDoNotCoverDomain`] if the table has no
    /// slot for some sample of `domain`.
    pub fn with_values(domain: IntervalDomain, values: Arc<GreyValues>) -> DomainResult<Self> {
        if !values.covers(&domain) {
            return Err(DomainError::ValuesDoNotCoverDomain {
                details: format!(
                    "table {:?} versus domain {:?}",
                    values.bounding_box(),
                    domain.bounding_box()
                ),
            });
        }
        Ok(Self {
            domain,
            values: Some(values),
        })
    }

    /// The domain.
    #[must_use]
    pub const fn domain(&self) -> &IntervalDomain {
        &self.domain
    }

    /// The values, if any.
    #[must_use]
    pub const fn values(&self) -> Option<&Arc<GreyValues>> {
        self.values.as_ref()
    }

    /// Grey kind of the values, if any.
    #[must_use]
    pub fn grey_kind(&self) -> Option<GreyKind> {
        self.values.as_ref().map(|v| v.kind())
    }

    /// Splits the object into its parts.
    #[must_use]
    pub fn into_parts(self) -> (IntervalDomain, Option<Arc<GreyValues>>) {
        (self.domain, self.values)
    }
}

/// A 3-D plane domain with optional per-plane values.
#[derive(Debug, Clone, PartialEq)]
pub struct Object3D {
    domain: PlaneDomain,
    values: Option<VoxelValues>,
}

impl Object3D {
    /// Creates an object without values.
    #[must_use]
    pub const fn new(domain: PlaneDomain) -> Self {
        Self {
            domain,
            values: None,
        }
    }

    /// Creates an object with values.
    ///
    /// # Errors
    ///
    /// - [`DomainError::PlaneRangeMismatch`] if the value planes differ from
    ///   the domain planes.
    /// - [`DomainError::ValuesDoNotCoverDomain`] if an occupied plane has no
    ///   table or its table misses samples.
    pub fn with_values(domain: PlaneDomain, values: VoxelValues) -> DomainResult<Self> {
        if values.plane1() != domain.plane1() || values.lastpl() != domain.lastpl() {
            return Err(DomainError::PlaneRangeMismatch {
                plane1: domain.plane1(),
                lastpl: domain.lastpl(),
                values_plane1: values.plane1(),
                values_lastpl: values.lastpl(),
            });
        }
        for (p, dom) in domain.planes() {
            let Some(dom) = dom.filter(|d| !d.is_empty()) else {
                continue;
            };
            if !values.plane(p).is_some_and(|v| v.covers(dom)) {
                return Err(DomainError::ValuesDoNotCoverDomain {
                    details: format!("plane {p}"),
                });
            }
        }
        Ok(Self {
            domain,
            values: Some(values),
        })
    }

    /// The domain.
    #[must_use]
    pub const fn domain(&self) -> &PlaneDomain {
        &self.domain
    }

    /// The values, if any.
    #[must_use]
    pub const fn values(&self) -> Option<&VoxelValues> {
        self.values.as_ref()
    }

    /// Grey kind of the values, if any.
    #[must_use]
    pub fn grey_kind(&self) -> Option<GreyKind> {
        self.values.as_ref().map(|v| v.background().kind())
    }

    /// Splits the object into its parts.
    #[must_use]
    pub fn into_parts(self) -> (PlaneDomain, Option<VoxelValues>) {
        (self.domain, self.values)
    }
}

/// Any object the domain engine works on.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DomainObject {
    /// An object with no domain.
    #[default]
    Empty,
    /// A 2-D object.
    TwoD(Object2D),
    /// A 3-D object.
    ThreeD(Object3D),
}

impl DomainObject {
    /// Returns `true` for [`DomainObject::Empty`] and for objects whose
    /// domain occupies nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::TwoD(o) => o.domain().is_empty(),
            Self::ThreeD(o) => o.domain().is_empty(),
        }
    }

    /// Grey kind of the object's values, if any.
    #[must_use]
    pub fn grey_kind(&self) -> Option<GreyKind> {
        match self {
            Self::Empty => None,
            Self::TwoD(o) => o.grey_kind(),
            Self::ThreeD(o) => o.grey_kind(),
        }
    }

    /// Number of dimensions, `None` for [`DomainObject::Empty`].
    #[must_use]
    pub const fn dimensions(&self) -> Option<u8> {
        match self {
            Self::Empty => None,
            Self::TwoD(_) => Some(2),
            Self::ThreeD(_) => Some(3),
        }
    }
}

impl From<Object2D> for DomainObject {
    fn from(obj: Object2D) -> Self {
        Self::TwoD(obj)
    }
}

impl From<Object3D> for DomainObject {
    fn from(obj: Object3D) -> Self {
        Self::ThreeD(obj)
    }
}

impl From<IntervalDomain> for DomainObject {
    fn from(domain: IntervalDomain) -> Self {
        Self::TwoD(Object2D::new(domain))
    }
}

impl From<PlaneDomain> for DomainObject {
    fn from(domain: PlaneDomain) -> Self {
        Self::ThreeD(Object3D::new(domain))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::grey::PixelValue;
    use crate::interval::BoundingBox2;
    use crate::values::ValueTable;

    #[test]
    fn values_must_cover_domain() {
        let dom = IntervalDomain::rect(0, 2, 0, 2).unwrap();
        let small = ValueTable::new(BoundingBox2::new(0, 1, 0, 2), 0i32).unwrap();
        assert!(Object2D::with_values(dom.clone(), Arc::new(small.into())).is_err());
        let full = ValueTable::for_domain(&dom, 0i32);
        let obj = Object2D::with_values(dom, Arc::new(full.into())).unwrap();
        assert_eq!(obj.grey_kind(), Some(GreyKind::Int));
    }

    #[test]
    fn voxel_values_must_cover_every_plane() {
        let sq = IntervalDomain::rect(0, 0, 0, 0).unwrap();
        let pd = PlaneDomain::from_planes(0, vec![Some(sq.clone()), Some(sq.clone())]);
        let mut values = VoxelValues::new(0, 2, PixelValue::Short(0));
        let table = Arc::new(GreyValues::from(ValueTable::for_domain(&sq, 1i16)));
        values.set_plane(0, Some(table.clone())).unwrap();
        assert!(Object3D::with_values(pd.clone(), values.clone()).is_err());
        values.set_plane(1, Some(table)).unwrap();
        let obj = Object3D::with_values(pd.clone(), values).unwrap();
        assert_eq!(obj.grey_kind(), Some(GreyKind::Short));
        assert!(Object3D::with_values(pd, VoxelValues::new(1, 2, PixelValue::Short(0))).is_err());
    }

    #[test]
    fn object_kinds() {
        assert!(DomainObject::Empty.is_empty());
        assert_eq!(DomainObject::default().dimensions(), None);
        let obj = DomainObject::from(IntervalDomain::rect(0, 0, 0, 0).unwrap());
        assert_eq!(obj.dimensions(), Some(2));
        assert!(!obj.is_empty());
        assert!(DomainObject::from(PlaneDomain::empty()).is_empty());
    }
}
