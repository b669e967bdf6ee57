//! Immutable geodesic ball tree.
//!
//! A [`BallTree`] is a complete binary tree over a permutation of its points, held in
//! three flat arrays: the points themselves in tree order, and a bounding ball
//! (centroid and covering radius) per node. The range of points each node covers
//! is never stored; it is implied by the node's index (see [`crate::tree_index`]).
//!
//! Trees are either built from a slice of `[lat, lng]` points with
//! [`BallTree::new_from_slice`], or adopted from arrays produced elsewhere with
//! [`BallTree::from_parts`].

use crate::error::BuildError;
use crate::traits::{Axis, Content, DistanceMetric};
use crate::tree_index;
use aligned_vec::{AVec, CACHELINE_ALIGN};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// Immutable ball tree over `[lat, lng]` points, in degrees.
///
/// Generic parameters:
/// * `A`: the co-ordinate and distance type, [`f32`] or [`f64`]
/// * `T`: the item stored alongside each point and returned by queries
/// * `D`: the [`DistanceMetric`] the node radii were computed with, and that queries use
/// * `B`: the approximate number of points per leaf when building with [`BallTree::new_from_slice`]
///
/// A convenient type alias exists for a Vincenty tree with some sensible defaults set: [`GeoBallTree`](crate::GeoBallTree).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(
        serialize = "A: Serialize, T: Serialize",
        deserialize = "A: Deserialize<'de>, T: Deserialize<'de>"
    ))
)]
#[derive(Clone, Debug, PartialEq)]
pub struct BallTree<A: Copy + Default, T: Copy + Default, D, const B: usize> {
    pub(crate) tree_points: Vec<[A; 2]>,
    pub(crate) items: Vec<T>,
    pub(crate) centroids: AVec<[A; 2]>,
    pub(crate) radiuses: AVec<A>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) metric: PhantomData<fn() -> D>,
}

impl<A, T, D, const B: usize> BallTree<A, T, D, B>
where
    A: Axis,
    T: Content,
    D: DistanceMetric<A>,
{
    /// Adopts a ball tree that was built elsewhere.
    ///
    /// `tree_points` and `items` are parallel, in tree order. `centroids` and `radiuses`
    /// are parallel, one entry per node in heap order (root first). Every point in a
    /// node's range must lie within `radius` of `centroid` as measured by `D`; this is
    /// not checked, and a tree that breaks it returns wrong neighbours rather than an error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use geoball::GeoBallTree;
    ///
    /// let tree: GeoBallTree<f64, u32> = GeoBallTree::from_parts(
    ///     vec![[0.0, 0.0], [0.0, 1.0]],
    ///     vec![0, 1],
    ///     vec![[0.0, 0.5]],
    ///     vec![60_000.0],
    /// ).unwrap();
    ///
    /// assert_eq!(tree.size(), 2);
    /// assert_eq!(tree.node_count(), 1);
    /// ```
    pub fn from_parts(
        tree_points: Vec<[A; 2]>,
        items: Vec<T>,
        centroids: Vec<[A; 2]>,
        radiuses: Vec<A>,
    ) -> Result<Self, BuildError> {
        if tree_points.len() != items.len() {
            return Err(BuildError::ItemCountMismatch {
                points: tree_points.len(),
                items: items.len(),
            });
        }

        if centroids.len() != radiuses.len() {
            return Err(BuildError::NodeCountMismatch {
                centroids: centroids.len(),
                radiuses: radiuses.len(),
            });
        }

        let n_nodes = radiuses.len();
        let n_points = tree_points.len();

        if n_nodes == 0 {
            if n_points > 0 {
                return Err(BuildError::IncompleteTree { n_nodes });
            }
        } else {
            if !(n_nodes + 1).is_power_of_two() {
                return Err(BuildError::IncompleteTree { n_nodes });
            }

            let n_leaves = (n_nodes + 1) >> 1;
            if n_leaves > n_points {
                return Err(BuildError::TooManyLeaves { n_leaves, n_points });
            }
        }

        if let Some((node, radius)) = radiuses
            .iter()
            .enumerate()
            .find(|(_, r)| !r.is_finite() || **r < A::zero())
        {
            return Err(BuildError::InvalidRadius {
                node,
                radius: radius.into_f64(),
            });
        }

        Ok(Self {
            tree_points,
            items,
            centroids: AVec::from_slice(CACHELINE_ALIGN, &centroids),
            radiuses: AVec::from_slice(CACHELINE_ALIGN, &radiuses),
            metric: PhantomData,
        })
    }

    /// Returns the number of points stored in the tree
    ///
    /// # Examples
    ///
    /// ```rust
    /// use geoball::GeoBallTree;
    ///
    /// let points: Vec<[f64; 2]> = vec!([51.5, -0.12]);
    /// let tree: GeoBallTree<f64, u32> = GeoBallTree::new_from_slice(&points);
    ///
    /// assert_eq!(tree.size(), 1);
    /// ```
    #[inline]
    pub fn size(&self) -> usize {
        self.tree_points.len()
    }

    /// Returns the number of nodes in the tree
    #[inline]
    pub fn node_count(&self) -> usize {
        self.radiuses.len()
    }

    /// Returns the number of levels in the tree. The leaves are on level `level_count() - 1`.
    #[inline]
    pub fn level_count(&self) -> usize {
        tree_index::level_count(self.node_count())
    }

    /// The stored points, in tree order
    #[inline]
    pub fn tree_points(&self) -> &[[A; 2]] {
        &self.tree_points
    }

    /// The stored items, parallel to [`tree_points`](Self::tree_points)
    #[inline]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// The centre of each node's bounding ball, in heap order
    #[inline]
    pub fn centroids(&self) -> &[[A; 2]] {
        &self.centroids
    }

    /// The covering radius of each node's bounding ball, in heap order
    #[inline]
    pub fn radiuses(&self) -> &[A] {
        &self.radiuses
    }

    /// Returns the tree-order points covered by `node`
    #[inline]
    pub(crate) fn node_points(&self, node: usize) -> std::ops::Range<usize> {
        let n_points = self.tree_points.len();

        tree_index::node_range_start(node, n_points)..tree_index::node_range_end(node, n_points)
    }
}
