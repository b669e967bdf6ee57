//! Geodesic distance metrics between `[lat, lng]` points expressed in degrees.
//!
//! All distances are in metres. [`Vincenty`] is the default metric used by
//! [`GeoBallTree`](crate::GeoBallTree) and is accurate to well under a millimetre on the
//! WGS-84 ellipsoid; [`Haversine`] is a cheaper spherical approximation.

use crate::traits::{Axis, DistanceMetric};

/// WGS-84 semi-major axis, in metres
pub const WGS84_SEMI_MAJOR_AXIS: f64 = 6_378_137.0;

/// WGS-84 flattening
pub const WGS84_FLATTENING: f64 = 1.0 / 298.257_223_563;

/// WGS-84 semi-minor axis, in metres
pub const WGS84_SEMI_MINOR_AXIS: f64 = 6_356_752.314_245_179;

/// IUGG mean Earth radius, in metres
pub const MEAN_EARTH_RADIUS: f64 = 6_371_008.8;

const VINCENTY_MAX_ITERATIONS: usize = 200;
const VINCENTY_CONVERGENCE_THRESHOLD: f64 = 1e-12;

/// Returns the geodesic distance in metres between two `[lat, lng]` points in degrees,
/// using Vincenty's inverse formula on the WGS-84 ellipsoid.
///
/// For nearly antipodal points the iteration may fail to converge; in that case
/// the great-circle distance on a sphere of [`MEAN_EARTH_RADIUS`] is returned.
///
/// # Examples
///
/// ```rust
/// use geoball::distance::vincenty;
///
/// // one degree of longitude along the equator
/// let d = vincenty([0.0, 0.0], [0.0, 1.0]);
/// assert!((d - 111_319.490_793).abs() < 1e-3);
/// ```
pub fn vincenty(a: [f64; 2], b: [f64; 2]) -> f64 {
    let f = WGS84_FLATTENING;

    let u1 = ((1.0 - f) * a[0].to_radians().tan()).atan();
    let u2 = ((1.0 - f) * b[0].to_radians().tan()).atan();
    let l = (b[1] - a[1]).to_radians();

    let (sin_u1, cos_u1) = u1.sin_cos();
    let (sin_u2, cos_u2) = u2.sin_cos();

    let mut lambda = l;
    let mut converged = false;

    let mut sin_sigma = 0.0;
    let mut cos_sigma = 1.0;
    let mut sigma = 0.0;
    let mut cos_sq_alpha = 1.0;
    let mut cos_2_sigma_m = 0.0;

    for _ in 0..VINCENTY_MAX_ITERATIONS {
        let (sin_lambda, cos_lambda) = lambda.sin_cos();

        sin_sigma = ((cos_u2 * sin_lambda).powi(2)
            + (cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda).powi(2))
        .sqrt();

        if sin_sigma == 0.0 {
            // coincident points
            return 0.0;
        }

        cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
        sigma = sin_sigma.atan2(cos_sigma);

        let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
        cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;

        // equatorial line: cos_sq_alpha = 0
        cos_2_sigma_m = if cos_sq_alpha != 0.0 {
            cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha
        } else {
            0.0
        };

        let c = f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha));

        let lambda_prev = lambda;
        lambda = l
            + (1.0 - c)
                * f
                * sin_alpha
                * (sigma
                    + c * sin_sigma
                        * (cos_2_sigma_m + c * cos_sigma * (-1.0 + 2.0 * cos_2_sigma_m.powi(2))));

        if (lambda - lambda_prev).abs() < VINCENTY_CONVERGENCE_THRESHOLD {
            converged = true;
            break;
        }
    }

    if !converged {
        return haversine(a, b);
    }

    let a_sq = WGS84_SEMI_MAJOR_AXIS * WGS84_SEMI_MAJOR_AXIS;
    let b_sq = WGS84_SEMI_MINOR_AXIS * WGS84_SEMI_MINOR_AXIS;
    let u_sq = cos_sq_alpha * (a_sq - b_sq) / b_sq;

    let big_a = 1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
    let big_b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));

    let delta_sigma = big_b
        * sin_sigma
        * (cos_2_sigma_m
            + big_b / 4.0
                * (cos_sigma * (-1.0 + 2.0 * cos_2_sigma_m.powi(2))
                    - big_b / 6.0
                        * cos_2_sigma_m
                        * (-3.0 + 4.0 * sin_sigma.powi(2))
                        * (-3.0 + 4.0 * cos_2_sigma_m.powi(2))));

    WGS84_SEMI_MINOR_AXIS * big_a * (sigma - delta_sigma)
}

/// Returns the great-circle distance in metres between two `[lat, lng]` points in degrees,
/// on a sphere of [`MEAN_EARTH_RADIUS`].
///
/// # Examples
///
/// ```rust
/// use geoball::distance::haversine;
///
/// assert_eq!(haversine([10.0, 20.0], [10.0, 20.0]), 0.0);
/// ```
pub fn haversine(a: [f64; 2], b: [f64; 2]) -> f64 {
    let lat1 = a[0].to_radians();
    let lat2 = b[0].to_radians();
    let d_lat = lat2 - lat1;
    let d_lng = (b[1] - a[1]).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);

    2.0 * MEAN_EARTH_RADIUS * h.sqrt().min(1.0).asin()
}

/// Converts a `[lat, lng]` point in degrees to a 3D cartesian position on the unit sphere
pub(crate) fn lat_lng_to_unit_sphere(p: [f64; 2]) -> [f64; 3] {
    let (sin_lat, cos_lat) = p[0].to_radians().sin_cos();
    let (sin_lng, cos_lng) = p[1].to_radians().sin_cos();

    [cos_lat * cos_lng, cos_lat * sin_lng, sin_lat]
}

/// Converts a (not necessarily normalised) 3D cartesian vector back to `[lat, lng]` in degrees
pub(crate) fn unit_sphere_to_lat_lng(v: [f64; 3]) -> [f64; 2] {
    let lat = v[2].atan2((v[0] * v[0] + v[1] * v[1]).sqrt());
    let lng = v[1].atan2(v[0]);

    [lat.to_degrees(), lng.to_degrees()]
}

/// Returns the geodesic distance between two points using Vincenty's formula
/// on the WGS-84 ellipsoid.
///
/// # Examples
///
/// ```rust
/// use geoball::distance::Vincenty;
/// use geoball::traits::DistanceMetric;
///
/// assert_eq!(0f32, Vincenty::dist(&[51.5f32, -0.12f32], &[51.5f32, -0.12f32]));
/// assert!(Vincenty::dist(&[0f64, 0f64], &[1f64, 0f64]) > 110_000.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Vincenty {}

impl<A: Axis> DistanceMetric<A> for Vincenty {
    #[inline]
    fn dist(a: &[A; 2], b: &[A; 2]) -> A {
        A::from_f64(vincenty(
            [a[0].into_f64(), a[1].into_f64()],
            [b[0].into_f64(), b[1].into_f64()],
        ))
    }
}

/// Returns the great-circle distance between two points on a spherical Earth.
///
/// Faster than [`Vincenty`], with errors of up to around 0.5%.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Haversine {}

impl<A: Axis> DistanceMetric<A> for Haversine {
    #[inline]
    fn dist(a: &[A; 2], b: &[A; 2]) -> A {
        A::from_f64(haversine(
            [a[0].into_f64(), a[1].into_f64()],
            [b[0].into_f64(), b[1].into_f64()],
        ))
    }
}
