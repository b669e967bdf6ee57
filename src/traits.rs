//! Definitions and implementations for the traits that parameterise a [`BallTree`](crate::BallTree):
//! the co-ordinate type, the stored item type, and the distance metric.
use num_traits::float::FloatCore;
use std::fmt::Debug;

/// Axis trait represents the traits that must be implemented
/// by the type that is used as the first generic parameter, `A`,
/// on [`BallTree`](crate::BallTree). This will be [`f64`] or [`f32`].
///
/// Distances are always computed in `f64` internally, since Vincenty's
/// iteration does not converge reliably at single precision; `A` is only
/// the storage and result type.
pub trait Axis: FloatCore + Default + Debug + Copy + Sync + Send + std::ops::AddAssign {
    /// widens a value of this type to an `f64`
    fn into_f64(self) -> f64;

    /// narrows an `f64` into this type
    fn from_f64(value: f64) -> Self;
}

impl Axis for f32 {
    #[inline]
    fn into_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value as f32
    }
}

impl Axis for f64 {
    #[inline]
    fn into_f64(self) -> f64 {
        self
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value
    }
}

/// Content trait.
///
/// Must be implemented by any type that you want to use to represent the items
/// stored alongside each point in a [`BallTree`](crate::BallTree). Trees built with
/// [`BallTree::new_from_slice`](crate::BallTree::new_from_slice) store the index of each
/// point in the source slice, so this will generally be `usize` or `u32`
/// (or `u16` for trees with fewer than 65535 points).
pub trait Content: PartialEq + Default + Clone + Copy + Ord + Debug + Sync + Send {}
impl<T: PartialEq + Default + Clone + Copy + Ord + Debug + Sync + Send> Content for T {}

/// Trait that needs to be implemented by any potential distance
/// metric to be used within queries.
///
/// The tree prunes with `dist(query, centroid) - radius`, so an implementation
/// must satisfy the triangle inequality for query results to be exact.
pub trait DistanceMetric<A> {
    /// returns the distance between two `[lat, lng]` points, in degrees, as measured
    /// by a particular distance metric
    fn dist(a: &[A; 2], b: &[A; 2]) -> A;
}

#[cfg(test)]
mod tests {
    use crate::traits::Axis;

    #[test]
    fn test_f32_round_trips_through_f64() {
        assert_eq!(<f32 as Axis>::from_f64(1.5f32.into_f64()), 1.5f32);
        assert_eq!(<f32 as Axis>::from_f64(f64::INFINITY), f32::INFINITY);
    }

    #[test]
    fn test_f64_is_identity() {
        assert_eq!(<f64 as Axis>::from_f64(0.1), 0.1);
        assert_eq!(0.1f64.into_f64(), 0.1);
    }
}
