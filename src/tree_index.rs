//! Index arithmetic for the implicit complete binary tree used by [`BallTree`](crate::BallTree).
//!
//! Nodes are laid out heap-style: the root is node `0`, the left child of node `i`
//! is `2i + 1` (always odd) and its right child is `2i + 2` (always even). No
//! per-node ranges, parent or child links are stored: the contiguous range of
//! tree-order points covered by a node is derived purely from the node's index
//! and the total number of points.

use divrem::DivCeil;

/// Returns the depth of `node`, with the root at level 0.
#[inline]
pub fn node_to_level(node: usize) -> usize {
    (node + 1).ilog2() as usize
}

/// Returns the index of the first tree-order point covered by `node`, for a tree over `n_points` points.
///
/// The nodes of any single level partition `[0, n_points)` into `2^level`
/// contiguous blocks whose sizes differ by at most one.
#[inline]
pub fn node_range_start(node: usize, n_points: usize) -> usize {
    let level = node_to_level(node);
    let pos = node + 1 - (1 << level);

    (pos * n_points) >> level
}

/// Returns the index one past the last tree-order point covered by `node`, for a tree over `n_points` points.
#[inline]
pub fn node_range_end(node: usize, n_points: usize) -> usize {
    let level = node_to_level(node);
    let pos = node + 1 - (1 << level);

    ((pos + 1) * n_points) >> level
}

/// Returns the leaf node, on the deepest level of a tree of `n_nodes` nodes,
/// whose range contains the tree-order point `point_id`.
///
/// # Examples
///
/// ```rust
/// use geoball::tree_index::{node_range_end, node_range_start, point_id_to_node};
///
/// // 10 points over a 3-level tree with leaves 3, 4, 5 and 6
/// let leaf = point_id_to_node(4, 10, 7);
/// assert_eq!(leaf, 4);
/// assert!(node_range_start(leaf, 10) <= 4 && 4 < node_range_end(leaf, 10));
/// ```
#[inline]
pub fn point_id_to_node(point_id: usize, n_points: usize, n_nodes: usize) -> usize {
    let n_leaves = (n_nodes + 1) >> 1;
    let pos = DivCeil::div_ceil((point_id + 1) * n_leaves, n_points) - 1;

    n_leaves - 1 + pos
}

/// Returns the next node to visit once the subtree rooted at `node` has been
/// fully handled (visited or pruned).
///
/// Climbs while `node` is a right child; once it reaches a left child its right
/// sibling is returned. Climbing out of the root returns `0`, signalling that the
/// walk has wrapped around.
///
/// # Examples
///
/// ```rust
/// use geoball::tree_index::next_right;
///
/// assert_eq!(next_right(3), 4);
/// assert_eq!(next_right(4), 2);
/// assert_eq!(next_right(6), 0);
/// ```
#[inline]
pub fn next_right(mut node: usize) -> usize {
    while node != 0 && node & 1 == 0 {
        node = (node - 2) >> 1;
    }

    if node == 0 {
        0
    } else {
        node + 1
    }
}

/// Returns the index of the left child of `node`
#[inline]
pub fn left_child(node: usize) -> usize {
    (node << 1) + 1
}

/// Returns the index of the parent of `node`. The root is its own parent.
#[inline]
pub fn parent(node: usize) -> usize {
    node.saturating_sub(1) >> 1
}

/// Returns `true` if `node` is the left child of its parent
#[inline]
pub fn is_left_child(node: usize) -> bool {
    node & 1 == 1
}

/// Returns the number of levels of a complete tree of `n_nodes` nodes
#[inline]
pub fn level_count(n_nodes: usize) -> usize {
    if n_nodes == 0 {
        0
    } else {
        node_to_level(n_nodes - 1) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(2, 1)]
    #[case(3, 2)]
    #[case(6, 2)]
    #[case(7, 3)]
    #[case(14, 3)]
    #[case(15, 4)]
    fn node_to_level_produces_correct_values(#[case] node: usize, #[case] expected: usize) {
        assert_eq!(node_to_level(node), expected);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 2)]
    #[case(2, 0)]
    #[case(3, 4)]
    #[case(4, 2)]
    #[case(5, 6)]
    #[case(6, 0)]
    #[case(7, 8)]
    #[case(10, 2)]
    #[case(12, 6)]
    #[case(14, 0)]
    fn next_right_produces_correct_values(#[case] node: usize, #[case] expected: usize) {
        assert_eq!(next_right(node), expected);
    }

    #[rstest]
    #[case(1, 0)]
    #[case(2, 0)]
    #[case(3, 1)]
    #[case(4, 1)]
    #[case(5, 2)]
    #[case(6, 2)]
    fn parent_produces_correct_values(#[case] node: usize, #[case] expected: usize) {
        assert_eq!(parent(node), expected);
        assert!(left_child(expected) == node || left_child(expected) + 1 == node);
        assert_eq!(is_left_child(node), left_child(expected) == node);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(3, 2)]
    #[case(7, 3)]
    #[case(1023, 10)]
    fn level_count_produces_correct_values(#[case] n_nodes: usize, #[case] expected: usize) {
        assert_eq!(level_count(n_nodes), expected);
    }

    #[test]
    fn ranges_at_each_level_tile_all_points() {
        for n_points in [0usize, 1, 2, 3, 7, 8, 10, 33, 100, 1_001] {
            for level in 0..8 {
                let first = (1usize << level) - 1;
                let last = (1usize << (level + 1)) - 1;

                let mut expected_start = 0;
                for node in first..last {
                    let start = node_range_start(node, n_points);
                    let end = node_range_end(node, n_points);

                    assert_eq!(start, expected_start, "gap or overlap at node {node}");
                    assert!(end >= start);
                    assert!(end - start <= n_points.div_ceil(1 << level));
                    expected_start = end;
                }
                assert_eq!(expected_start, n_points);
            }
        }
    }

    #[test]
    fn children_tile_their_parent() {
        let n_points = 97;
        for node in 0..63 {
            let left = left_child(node);
            assert_eq!(node_range_start(left, n_points), node_range_start(node, n_points));
            assert_eq!(node_range_end(left, n_points), node_range_start(left + 1, n_points));
            assert_eq!(node_range_end(left + 1, n_points), node_range_end(node, n_points));
        }
    }

    #[test]
    fn point_id_to_node_finds_the_covering_leaf() {
        for n_nodes in [1usize, 3, 7, 15, 31] {
            let n_leaves = (n_nodes + 1) / 2;
            for n_points in n_leaves..(n_leaves * 5) {
                for point_id in 0..n_points {
                    let leaf = point_id_to_node(point_id, n_points, n_nodes);

                    assert!(leaf >= n_leaves - 1 && leaf < n_nodes);
                    assert!(node_range_start(leaf, n_points) <= point_id);
                    assert!(point_id < node_range_end(leaf, n_points));
                }
            }
        }
    }

    #[test]
    fn next_right_always_returns_to_root() {
        for n_nodes in [1usize, 3, 7, 15, 255] {
            for start in 0..n_nodes {
                let mut node = start;
                let mut steps = 0;
                loop {
                    node = next_right(node);
                    steps += 1;
                    if node == 0 {
                        break;
                    }
                    assert!(steps <= n_nodes, "no wrap from node {start}");
                }
            }
        }
    }
}
