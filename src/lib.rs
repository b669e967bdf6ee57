#![warn(rustdoc::missing_crate_level_docs)]
#![deny(rustdoc::invalid_codeblock_attributes)]
#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::private_intra_doc_links)]

//! # GeoBall
//!
//! A ball-tree for fast batch k-nearest-neighbour queries over `[lat, lng]` points,
//! using true geodesic distance on the WGS-84 ellipsoid (Vincenty's formula).
//!
//! The tree is a complete binary tree stored as flat arrays: the points in tree
//! order, plus a centroid and covering radius per node. Which points a node covers
//! is implied by its index alone, and queries walk the tree without a stack, so
//! every query in a batch is independent and they run in parallel via rayon.
//!
//! ## Usage
//! ```rust
//! use geoball::GeoBallTree;
//!
//! let cities: Vec<[f64; 2]> = vec![
//!     [51.507, -0.128],  // London
//!     [48.857, 2.352],   // Paris
//!     [52.520, 13.405],  // Berlin
//!     [41.903, 12.496],  // Rome
//! ];
//!
//! let tree: GeoBallTree<f64, u32> = GeoBallTree::new_from_slice(&cities);
//!
//! assert_eq!(tree.size(), 4);
//!
//! // Amsterdam
//! let nearest = tree.nearest_n(&[52.368, 4.904], 2);
//! assert_eq!(nearest[0].item, 0);
//! assert_eq!(nearest[1].item, 1);
//! assert!((nearest[0].distance - 357_000.0).abs() < 5_000.0);
//!
//! // every city's nearest neighbour is itself
//! let results = tree.nearest_n_batch(tree.tree_points(), 1);
//! assert!(results.iter().all(|row| row[0].distance == 0.0));
//! ```
//!
//! ## Optional features
//!
//! * `rayon` (default): batch queries run one rayon task per query row
//! * `tracing` (default): construction and batch queries emit `tracing` events
//! * `serde`: `BallTree` implements `Serialize` / `Deserialize`

pub mod ball_tree;
mod construction;
pub mod distance;
pub mod error;
pub mod nearest_neighbour;
pub mod query;
#[cfg(any(test, feature = "test_utils"))]
#[doc(hidden)]
pub mod test_utils;
pub mod traits;
pub mod tree_index;

pub use crate::ball_tree::BallTree;
pub use crate::distance::{Haversine, Vincenty};
pub use crate::error::{BuildError, QueryError};
pub use crate::nearest_neighbour::NearestNeighbour;

/// A [`BallTree`] using the [`Vincenty`] metric, with leaves of around 32 points.
pub type GeoBallTree<A, T> = BallTree<A, T, Vincenty, 32>;
