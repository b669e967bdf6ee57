//! Building a [`BallTree`] from a slice of `[lat, lng]` points.

use crate::ball_tree::BallTree;
use crate::distance::{lat_lng_to_unit_sphere, unit_sphere_to_lat_lng};
use crate::error::BuildError;
use crate::traits::{Axis, Content, DistanceMetric};
use crate::tree_index::{left_child, node_range_end, node_range_start};
use aligned_vec::{AVec, CACHELINE_ALIGN};
use az::{Az, Cast};
use ordered_float::OrderedFloat;
use std::marker::PhantomData;
#[cfg(feature = "tracing")]
use tracing::{event, span, Level};

impl<A, T, D, const B: usize> From<&[[A; 2]]> for BallTree<A, T, D, B>
where
    A: Axis,
    T: Content,
    D: DistanceMetric<A>,
    usize: Cast<T>,
{
    /// Creates a `BallTree`, populated with points from `slice`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use geoball::GeoBallTree;
    ///
    /// let points: Vec<[f32; 2]> = vec!([48.85, 2.35]);
    /// let tree: GeoBallTree<f32, u32> = (&*points).into();
    ///
    /// assert_eq!(tree.size(), 1);
    /// ```
    fn from(slice: &[[A; 2]]) -> Self {
        BallTree::new_from_slice(slice)
    }
}

impl<A, T, D, const B: usize> BallTree<A, T, D, B>
where
    A: Axis,
    T: Content,
    D: DistanceMetric<A>,
    usize: Cast<T>,
{
    /// Creates a `BallTree` populated with points from `source`, with leaves holding
    /// roughly `B` points each. Each point's index in `source` is stored as its item.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use geoball::GeoBallTree;
    ///
    /// let points: Vec<[f64; 2]> = vec!([51.5, -0.12], [48.85, 2.35], [52.52, 13.40]);
    /// let tree: GeoBallTree<f64, u32> = GeoBallTree::new_from_slice(&points);
    ///
    /// assert_eq!(tree.size(), 3);
    /// assert_eq!(tree.level_count(), 1);
    /// ```
    pub fn new_from_slice(source: &[[A; 2]]) -> Self {
        Self::populate(source, Self::default_level_count(source.len()))
    }

    /// Creates a `BallTree` populated with points from `source`, with exactly
    /// `levels` levels.
    ///
    /// Fails if `levels` is zero, or if the `2^(levels - 1)` leaves can't each be
    /// given at least one point.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use geoball::GeoBallTree;
    ///
    /// let points: Vec<[f64; 2]> = (0..8).map(|i| [i as f64, 0.0]).collect();
    /// let tree: GeoBallTree<f64, u32> = GeoBallTree::new_from_slice_with_levels(&points, 2).unwrap();
    ///
    /// assert_eq!(tree.node_count(), 3);
    /// ```
    pub fn new_from_slice_with_levels(source: &[[A; 2]], levels: usize) -> Result<Self, BuildError> {
        if levels == 0 {
            return Err(BuildError::ZeroLevels);
        }

        let n_leaves = u32::try_from(levels - 1)
            .ok()
            .and_then(|shift| 1usize.checked_shl(shift))
            .unwrap_or(usize::MAX);
        if n_leaves > source.len() {
            return Err(BuildError::TooManyLeaves {
                n_leaves,
                n_points: source.len(),
            });
        }

        Ok(Self::populate(source, levels))
    }

    fn default_level_count(n_points: usize) -> usize {
        if n_points == 0 {
            return 0;
        }

        ((n_points - 1) / B.max(1)).max(1).ilog2() as usize + 1
    }

    fn populate(source: &[[A; 2]], levels: usize) -> Self {
        #[cfg(feature = "tracing")]
        let span = span!(Level::TRACE, "populate", n_points = source.len(), levels);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let n_points = source.len();
        let n_nodes = (1usize << levels) - 1;

        let mut sort_index = Vec::from_iter(0..n_points);
        let mut centroids: Vec<[A; 2]> = Vec::with_capacity(n_nodes);
        let mut radiuses: Vec<A> = Vec::with_capacity(n_nodes);

        // level order, so every node's range has been partitioned by its parent
        // before it is visited
        for node in 0..n_nodes {
            let start = node_range_start(node, n_points);
            let end = node_range_end(node, n_points);
            let members = &mut sort_index[start..end];

            let centroid = Self::calc_centroid(source, members);
            let radius = members
                .iter()
                .map(|&idx| D::dist(&centroid, &source[idx]))
                .fold(A::zero(), |acc, dist| acc.max(dist));

            centroids.push(centroid);
            radiuses.push(radius);

            let left = left_child(node);
            if left < n_nodes {
                let pivot = node_range_end(left, n_points) - start;
                Self::split(source, members, pivot, &centroid);
            }
        }

        let tree_points = sort_index.iter().map(|&idx| source[idx]).collect();
        let items = sort_index.iter().map(|&idx| idx.az::<T>()).collect();

        #[cfg(feature = "tracing")]
        event!(
            Level::DEBUG,
            n_points,
            n_nodes,
            root_radius = ?radiuses.first(),
            "ball tree constructed"
        );

        Self {
            tree_points,
            items,
            centroids: AVec::from_slice(CACHELINE_ALIGN, &centroids),
            radiuses: AVec::from_slice(CACHELINE_ALIGN, &radiuses),
            metric: PhantomData,
        }
    }

    /// Spherical mean of the member points: the normalised sum of their unit vectors.
    fn calc_centroid(source: &[[A; 2]], members: &[usize]) -> [A; 2] {
        let Some(&first) = members.first() else {
            return [A::zero(); 2];
        };
        if members.len() == 1 {
            return source[first];
        }

        let sum = members.iter().fold([0f64; 3], |mut acc, &idx| {
            let v = lat_lng_to_unit_sphere([source[idx][0].into_f64(), source[idx][1].into_f64()]);
            acc[0] += v[0];
            acc[1] += v[1];
            acc[2] += v[2];
            acc
        });

        let norm = (sum[0] * sum[0] + sum[1] * sum[1] + sum[2] * sum[2]).sqrt();
        if norm < 1e-9 * members.len() as f64 {
            // points cancel out, e.g. an antipodal pair
            return source[first];
        }

        let [lat, lng] = unit_sphere_to_lat_lng(sum);
        [A::from_f64(lat), A::from_f64(lng)]
    }

    /// Partitions `members` so that the first `pivot` entries are the points lowest along
    /// the axis with the greatest spread.
    fn split(source: &[[A; 2]], members: &mut [usize], pivot: usize, centroid: &[A; 2]) {
        if pivot == 0 || pivot >= members.len() {
            return;
        }

        let (mut lat_min, mut lat_max) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut lng_min, mut lng_max) = (f64::INFINITY, f64::NEG_INFINITY);
        for &idx in members.iter() {
            let [lat, lng] = source[idx];
            lat_min = lat_min.min(lat.into_f64());
            lat_max = lat_max.max(lat.into_f64());
            lng_min = lng_min.min(lng.into_f64());
            lng_max = lng_max.max(lng.into_f64());
        }

        // a degree of longitude shrinks towards the poles
        let lng_scale = centroid[0].into_f64().to_radians().cos().abs();
        let dim = if lat_max - lat_min >= (lng_max - lng_min) * lng_scale {
            0
        } else {
            1
        };

        members.select_nth_unstable_by_key(pivot, |&idx| OrderedFloat(source[idx][dim]));
    }
}
