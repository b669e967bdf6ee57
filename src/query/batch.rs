use crate::ball_tree::BallTree;
use crate::error::QueryError;
use crate::nearest_neighbour::{collect_row, NearestNeighbour};
use crate::traits::{Axis, Content, DistanceMetric};
#[cfg(feature = "rayon")]
use rayon::prelude::*;
#[cfg(feature = "tracing")]
use tracing::{event, span, Level};

impl<A, T, D, const B: usize> BallTree<A, T, D, B>
where
    A: Axis,
    T: Content,
    D: DistanceMetric<A>,
{
    /// Finds the `k` nearest neighbours of every point in `queries`, writing them into
    /// caller-owned row-major `(queries.len(), k)` buffers.
    ///
    /// Each row of `distances` / `indices` must already be sorted by descending
    /// distance, which in practice means filled with `A::infinity()` and a sentinel item.
    /// Rows are left sorted descending: column `0` holds the furthest of the `k`
    /// neighbours found, and unfilled slots (when `k` exceeds the tree size) keep their
    /// initial values.
    ///
    /// Query `i` is compared with tree point `i`, so querying a tree with its own
    /// [`tree_points`](Self::tree_points) starts every walk at the right leaf.
    ///
    /// With the `rayon` feature enabled, rows are processed in parallel.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use geoball::GeoBallTree;
    ///
    /// let content: Vec<[f64; 2]> = vec!([0.0, 0.0], [0.0, 1.0], [0.0, 3.0]);
    /// let tree: GeoBallTree<f64, u32> = GeoBallTree::new_from_slice(&content);
    ///
    /// let queries = [[0.0, 0.1], [0.0, 2.9]];
    /// let mut distances = vec![f64::INFINITY; 4];
    /// let mut indices = vec![u32::MAX; 4];
    ///
    /// tree.query_into(&queries, 2, &mut distances, &mut indices).unwrap();
    ///
    /// assert_eq!(indices, vec![1, 0, 1, 2]);
    /// ```
    pub fn query_into(
        &self,
        queries: &[[A; 2]],
        k: usize,
        distances: &mut [A],
        indices: &mut [T],
    ) -> Result<(), QueryError> {
        let expected = queries.len() * k;
        if distances.len() != expected {
            return Err(QueryError::BufferShape {
                buffer: "distances",
                expected,
                got: distances.len(),
            });
        }
        if indices.len() != expected {
            return Err(QueryError::BufferShape {
                buffer: "indices",
                expected,
                got: indices.len(),
            });
        }

        if k == 0 {
            return Ok(());
        }

        #[cfg(feature = "tracing")]
        let span = span!(Level::TRACE, "query_into", queries = queries.len(), k);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        #[cfg(feature = "rayon")]
        distances
            .par_chunks_mut(k)
            .zip(indices.par_chunks_mut(k))
            .enumerate()
            .for_each(|(idx, (dist_row, item_row))| {
                self.query_row(&queries[idx], Some(idx), dist_row, item_row)
            });

        #[cfg(not(feature = "rayon"))]
        distances
            .chunks_mut(k)
            .zip(indices.chunks_mut(k))
            .enumerate()
            .for_each(|(idx, (dist_row, item_row))| {
                self.query_row(&queries[idx], Some(idx), dist_row, item_row)
            });

        #[cfg(feature = "tracing")]
        event!(Level::DEBUG, queries = queries.len(), k, "batch query complete");

        Ok(())
    }

    /// Finds the `qty` nearest neighbours of every point in `queries`, each sorted by
    /// ascending distance.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use geoball::GeoBallTree;
    ///
    /// let content: Vec<[f32; 2]> = (0..100).map(|i| [i as f32 * 0.01, 0.0]).collect();
    /// let tree: GeoBallTree<f32, u32> = GeoBallTree::new_from_slice(&content);
    ///
    /// let results = tree.nearest_n_batch(tree.tree_points(), 1);
    ///
    /// for (row, &item) in results.iter().zip(tree.items()) {
    ///     assert_eq!(row[0].item, item);
    ///     assert_eq!(row[0].distance, 0.0);
    /// }
    /// ```
    pub fn nearest_n_batch(&self, queries: &[[A; 2]], qty: usize) -> Vec<Vec<NearestNeighbour<A, T>>> {
        if qty == 0 {
            return vec![Vec::new(); queries.len()];
        }

        let mut distances = vec![A::infinity(); queries.len() * qty];
        let mut items = vec![T::default(); queries.len() * qty];

        #[cfg(feature = "rayon")]
        distances
            .par_chunks_mut(qty)
            .zip(items.par_chunks_mut(qty))
            .enumerate()
            .for_each(|(idx, (dist_row, item_row))| {
                self.query_row(&queries[idx], Some(idx), dist_row, item_row)
            });

        #[cfg(not(feature = "rayon"))]
        distances
            .chunks_mut(qty)
            .zip(items.chunks_mut(qty))
            .enumerate()
            .for_each(|(idx, (dist_row, item_row))| {
                self.query_row(&queries[idx], Some(idx), dist_row, item_row)
            });

        distances
            .chunks(qty)
            .zip(items.chunks(qty))
            .map(|(dist_row, item_row)| collect_row(dist_row, item_row))
            .collect()
    }
}
