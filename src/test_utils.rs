//! Random geo data and brute-force reference queries, shared by tests and benches.
use crate::traits::{Axis, DistanceMetric};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Returns `n` points spread uniformly by area over the whole globe.
pub fn random_lat_lng_points<A: Axis>(n: usize, seed: u64) -> Vec<[A; 2]> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    (0..n)
        .map(|_| {
            let lat = rng.random_range(-1f64..1f64).asin().to_degrees();
            let lng = rng.random_range(-180f64..180f64);
            [A::from_f64(lat), A::from_f64(lng)]
        })
        .collect()
}

/// Returns `n` points scattered uniformly within `spread` degrees of `centre` on each axis.
pub fn random_points_near<A: Axis>(centre: [f64; 2], spread: f64, n: usize, seed: u64) -> Vec<[A; 2]> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    (0..n)
        .map(|_| {
            let lat = (centre[0] + rng.random_range(-spread..spread)).clamp(-89.9, 89.9);
            let lng = centre[1] + rng.random_range(-spread..spread);
            [A::from_f64(lat), A::from_f64(lng)]
        })
        .collect()
}

/// Brute-force `qty` nearest neighbours of `query` within `content`, as
/// `(distance, index)` pairs sorted by ascending distance, then index.
pub fn linear_search<A: Axis, D: DistanceMetric<A>>(
    content: &[[A; 2]],
    qty: usize,
    query: &[A; 2],
) -> Vec<(A, usize)> {
    let mut results: Vec<(A, usize)> = content
        .iter()
        .enumerate()
        .map(|(idx, point)| (D::dist(query, point), idx))
        .collect();

    results.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal).then(a.1.cmp(&b.1)));
    results.truncate(qty);

    results
}
