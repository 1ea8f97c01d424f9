//! Grey value kinds.
//!
//! Sample values come in six kinds. Code that reads or writes samples is
//! generic over [`GreyValue`], so the compiler ties a scan's declared kind to
//! the table it reads; kind-erased storage lives in
//! [`GreyValues`](crate::GreyValues).

use std::fmt::Debug;

use crate::values::{GreyValues, ValueTable};

/// Numeric kind of a grey value table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GreyKind {
    /// 32-bit signed integer.
    Int,
    /// 16-bit signed integer.
    Short,
    /// 8-bit unsigned integer.
    UByte,
    /// 32-bit float.
    Float,
    /// 64-bit float.
    Double,
    /// Packed 8-bit red, green, blue and alpha channels.
    Rgba,
}

/// A colour packed into a `u32` as `0xAABBGGRR`.
///
/// # Example
///
/// ```
/// use domain_types::Rgba;
///
/// let c = Rgba::new(10, 20, 30, 255);
/// assert_eq!(c.channels(), [10, 20, 30, 255]);
/// assert_eq!(c.0, 0xff1e_140a);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgba(pub u32);

impl Rgba {
    /// Packs four channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(u32::from_le_bytes([r, g, b, a]))
    }

    /// Unpacks `[r, g, b, a]`.
    #[must_use]
    pub const fn channels(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }
}

/// A single value of any kind, used for backgrounds and kind-erased reads.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PixelValue {
    /// 32-bit signed integer.
    Int(i32),
    /// 16-bit signed integer.
    Short(i16),
    /// 8-bit unsigned integer.
    UByte(u8),
    /// 32-bit float.
    Float(f32),
    /// 64-bit float.
    Double(f64),
    /// Packed colour.
    Rgba(Rgba),
}

impl PixelValue {
    /// Kind of the value.
    #[must_use]
    pub const fn kind(&self) -> GreyKind {
        match self {
            Self::Int(_) => GreyKind::Int,
            Self::Short(_) => GreyKind::Short,
            Self::UByte(_) => GreyKind::UByte,
            Self::Float(_) => GreyKind::Float,
            Self::Double(_) => GreyKind::Double,
            Self::Rgba(_) => GreyKind::Rgba,
        }
    }
}

/// A sample type that can be stored in a value table.
///
/// `Sum` accumulates values for averaging; [`mean`](Self::mean) divides it
/// back down, truncating for integral kinds.
pub trait GreyValue: Copy + PartialEq + Debug + Default + Send + Sync + 'static {
    /// Kind tag of this type.
    const KIND: GreyKind;

    /// Accumulator used when averaging.
    type Sum: Copy + Default + Send + Sync;

    /// Adds `value` to `sum`.
    fn accumulate(sum: Self::Sum, value: Self) -> Self::Sum;

    /// Mean of `count` accumulated values; the default value when `count`
    /// is zero.
    fn mean(sum: Self::Sum, count: u32) -> Self;

    /// Borrows the typed table if `values` holds this kind.
    fn table(values: &GreyValues) -> Option<&ValueTable<Self>>;

    /// Mutably borrows the typed table if `values` holds this kind.
    fn table_mut(values: &mut GreyValues) -> Option<&mut ValueTable<Self>>;

    /// Wraps a typed table into kind-erased storage.
    fn into_values(table: ValueTable<Self>) -> GreyValues;

    /// Erases the kind of a single value.
    fn to_pixel(self) -> PixelValue;

    /// Recovers a typed value if `pixel` has this kind.
    fn from_pixel(pixel: PixelValue) -> Option<Self>;
}

macro_rules! impl_grey_value {
    ($ty:ty, $variant:ident, $sum:ty, $mean:expr) => {
        impl GreyValue for $ty {
            const KIND: GreyKind = GreyKind::$variant;
            type Sum = $sum;

            fn accumulate(sum: Self::Sum, value: Self) -> Self::Sum {
                sum + <$sum>::from(value)
            }

            fn mean(sum: Self::Sum, count: u32) -> Self {
                if count == 0 {
                    return Self::default();
                }
                let mean: fn($sum, u32) -> $ty = $mean;
                mean(sum, count)
            }

            fn table(values: &GreyValues) -> Option<&ValueTable<Self>> {
                match values {
                    GreyValues::$variant(t) => Some(t),
                    _ => None,
                }
            }

            fn table_mut(values: &mut GreyValues) -> Option<&mut ValueTable<Self>> {
                match values {
                    GreyValues::$variant(t) => Some(t),
                    _ => None,
                }
            }

            fn into_values(table: ValueTable<Self>) -> GreyValues {
                GreyValues::$variant(table)
            }

            fn to_pixel(self) -> PixelValue {
                PixelValue::$variant(self)
            }

            fn from_pixel(pixel: PixelValue) -> Option<Self> {
                match pixel {
                    PixelValue::$variant(v) => Some(v),
                    _ => None,
                }
            }
        }
    };
}

// Integral means of values of one type always fit back into that type.
impl_grey_value!(i32, Int, i64, |s, n| i32::try_from(s / i64::from(n)).unwrap_or_default());
impl_grey_value!(i16, Short, i64, |s, n| i16::try_from(s / i64::from(n)).unwrap_or_default());
impl_grey_value!(u8, UByte, i64, |s, n| u8::try_from(s / i64::from(n)).unwrap_or_default());
#[allow(clippy::cast_possible_truncation)]
const fn narrow(v: f64) -> f32 {
    v as f32
}
impl_grey_value!(f32, Float, f64, |s, n| narrow(s / f64::from(n)));
impl_grey_value!(f64, Double, f64, |s, n| s / f64::from(n));

impl GreyValue for Rgba {
    const KIND: GreyKind = GreyKind::Rgba;
    type Sum = [u64; 4];

    fn accumulate(mut sum: Self::Sum, value: Self) -> Self::Sum {
        for (s, c) in sum.iter_mut().zip(value.channels()) {
            *s += u64::from(c);
        }
        sum
    }

    fn mean(sum: Self::Sum, count: u32) -> Self {
        if count == 0 {
            return Self::default();
        }
        let n = u64::from(count);
        let [r, g, b, a] = sum.map(|s| u8::try_from(s / n).unwrap_or(u8::MAX));
        Self::new(r, g, b, a)
    }

    fn table(values: &GreyValues) -> Option<&ValueTable<Self>> {
        match values {
            GreyValues::Rgba(t) => Some(t),
            _ => None,
        }
    }

    fn table_mut(values: &mut GreyValues) -> Option<&mut ValueTable<Self>> {
        match values {
            GreyValues::Rgba(t) => Some(t),
            _ => None,
        }
    }

    fn into_values(table: ValueTable<Self>) -> GreyValues {
        GreyValues::Rgba(table)
    }

    fn to_pixel(self) -> PixelValue {
        PixelValue::Rgba(self)
    }

    fn from_pixel(pixel: PixelValue) -> Option<Self> {
        match pixel {
            PixelValue::Rgba(v) => Some(v),
            _ => None,
        }
    }
}

/// Mean of a slice of values, or `None` if it is empty.
///
/// # Example
///
/// ```
/// use domain_types::grey::mean_of;
///
/// assert_eq!(mean_of(&[1i32, 2, 4]), Some(2));
/// assert_eq!(mean_of::<u8>(&[]), None);
/// ```
#[must_use]
pub fn mean_of<T: GreyValue>(values: &[T]) -> Option<T> {
    let count = u32::try_from(values.len()).ok().filter(|&n| n > 0)?;
    let sum = values.iter().fold(T::Sum::default(), |s, &v| T::accumulate(s, v));
    Some(T::mean(sum, count))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn integral_means_truncate() {
        assert_eq!(mean_of(&[1i32, 2]), Some(1));
        assert_eq!(mean_of(&[-1i32, -2]), Some(-1));
        assert_eq!(mean_of(&[255u8, 254]), Some(254));
        assert_eq!(mean_of(&[i16::MAX, i16::MAX]), Some(i16::MAX));
    }

    #[test]
    fn float_means_are_exact() {
        assert_relative_eq!(mean_of(&[1.0f64, 2.0]).unwrap(), 1.5);
        assert_relative_eq!(mean_of(&[0.5f32, 0.25]).unwrap(), 0.375);
    }

    #[test]
    fn rgba_means_per_channel() {
        let m = mean_of(&[Rgba::new(0, 10, 255, 255), Rgba::new(3, 20, 254, 0)]).unwrap();
        assert_eq!(m.channels(), [1, 15, 254, 127]);
    }

    #[test]
    fn zero_count_gives_default() {
        assert_eq!(i32::mean(0, 0), 0);
        assert_eq!(Rgba::mean([9; 4], 0), Rgba(0));
    }

    #[test]
    fn pixel_round_trip_respects_kind() {
        let p = 7i16.to_pixel();
        assert_eq!(p.kind(), GreyKind::Short);
        assert_eq!(i16::from_pixel(p), Some(7));
        assert_eq!(i32::from_pixel(p), None);
        assert_eq!(f64::from_pixel(PixelValue::Double(0.5)), Some(0.5));
    }
}
