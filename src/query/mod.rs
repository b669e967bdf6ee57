//! Nearest-neighbour queries against a [`BallTree`](crate::BallTree).
//!
//! Every query walks the tree without a stack or recursion. The walk starts at a
//! "home" node whose ball contains the query point, and moves on from each node in
//! one of three ways:
//!
//! * if the node's ball is further away than the worst neighbour kept so far, skip
//!   its whole subtree and move to [`next_right`](crate::tree_index::next_right);
//! * otherwise, if it has children, descend into its left child;
//! * otherwise it is a leaf: scan its points, then move to `next_right`.
//!
//! Climbing out past the root wraps around to the root, so the walk covers the
//! rest of the tree and stops once it arrives back at the home node.

mod batch;
mod nearest_n;

pub use nearest_n::NODE_DISTANCE_EPSILON;
