//! Errors raised while validating tree arrays and query buffers on the host side.
//!
//! The query walk itself cannot fail: everything that could make it misbehave is
//! checked up front by [`BallTree::from_parts`](crate::BallTree::from_parts) and
//! [`BallTree::query_into`](crate::BallTree::query_into).

/// Errors that can occur while constructing or adopting a [`BallTree`](crate::BallTree).
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum BuildError {
    /// The number of items does not match the number of tree points.
    #[error("item count mismatch: {points} tree points but {items} items")]
    ItemCountMismatch {
        /// number of tree points supplied
        points: usize,
        /// number of items supplied
        items: usize,
    },

    /// The per-node centroid and radius arrays have different lengths.
    #[error("node array mismatch: {centroids} centroids but {radiuses} radiuses")]
    NodeCountMismatch {
        /// number of centroids supplied
        centroids: usize,
        /// number of radiuses supplied
        radiuses: usize,
    },

    /// The node count is not of the form `2^levels - 1`.
    #[error("{n_nodes} nodes do not form a complete binary tree")]
    IncompleteTree {
        /// number of nodes supplied
        n_nodes: usize,
    },

    /// The tree has more leaves than points, so some leaves would be empty
    /// (or it has nodes but no points at all).
    #[error("{n_leaves} leaves cannot be populated from {n_points} points")]
    TooManyLeaves {
        /// number of leaves implied by the node count or requested levels
        n_leaves: usize,
        /// number of points available
        n_points: usize,
    },

    /// A tree needs at least one level.
    #[error("a tree needs at least one level")]
    ZeroLevels,

    /// A node's covering radius is negative, infinite or NaN.
    #[error("node {node} has invalid radius {radius}")]
    InvalidRadius {
        /// the offending node
        node: usize,
        /// its radius, widened to f64
        radius: f64,
    },
}

/// Errors that can occur when running a batch query into caller-owned buffers.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum QueryError {
    /// An output buffer is not `queries * n_neighbours` long.
    #[error("{buffer} buffer has length {got}, expected {expected}")]
    BufferShape {
        /// which buffer was mis-sized
        buffer: &'static str,
        /// required length
        expected: usize,
        /// actual length
        got: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_render_their_context() {
        let err = BuildError::IncompleteTree { n_nodes: 6 };
        assert_eq!(err.to_string(), "6 nodes do not form a complete binary tree");

        let err = QueryError::BufferShape {
            buffer: "distances",
            expected: 12,
            got: 10,
        };
        assert_eq!(
            err.to_string(),
            "distances buffer has length 10, expected 12"
        );
    }
}
