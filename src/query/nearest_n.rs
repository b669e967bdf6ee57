use crate::ball_tree::BallTree;
use crate::nearest_neighbour::{collect_row, NearestNeighbour};
use crate::traits::{Axis, Content, DistanceMetric};
use crate::tree_index::{left_child, next_right, point_id_to_node};

/// Lower bounds at or below this many metres are treated as zero, since
/// Vincenty's formula is not accurate beyond it.
pub const NODE_DISTANCE_EPSILON: f64 = 1e-4;

impl<A, T, D, const B: usize> BallTree<A, T, D, B>
where
    A: Axis,
    T: Content,
    D: DistanceMetric<A>,
{
    /// Finds the nearest `qty` items to `query`, sorted by ascending distance.
    ///
    /// Fewer than `qty` results are returned if the tree holds fewer than `qty` points.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use geoball::GeoBallTree;
    ///
    /// let content: Vec<[f64; 2]> = vec!(
    ///     [51.507, -0.128],  // London
    ///     [48.857, 2.352],   // Paris
    ///     [52.520, 13.405],  // Berlin
    /// );
    ///
    /// let tree: GeoBallTree<f64, u32> = GeoBallTree::new_from_slice(&content);
    ///
    /// // Brussels
    /// let nearest = tree.nearest_n(&[50.850, 4.352], 2);
    ///
    /// assert_eq!(nearest.len(), 2);
    /// assert_eq!(nearest[0].item, 1);
    /// assert_eq!(nearest[1].item, 0);
    /// ```
    #[inline]
    pub fn nearest_n(&self, query: &[A; 2], qty: usize) -> Vec<NearestNeighbour<A, T>> {
        let mut distances = vec![A::infinity(); qty];
        let mut items = vec![T::default(); qty];

        self.query_row(query, None, &mut distances, &mut items);

        collect_row(&distances, &items)
    }

    /// Finds the nearest item to `query`, or `None` if the tree is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use geoball::GeoBallTree;
    ///
    /// let content: Vec<[f32; 2]> = vec!([40.71, -74.01], [34.05, -118.24]);
    /// let tree: GeoBallTree<f32, u32> = GeoBallTree::new_from_slice(&content);
    ///
    /// let nearest = tree.nearest_one(&[37.77, -122.42]).unwrap();
    ///
    /// assert_eq!(nearest.item, 1);
    /// ```
    #[inline]
    pub fn nearest_one(&self, query: &[A; 2]) -> Option<NearestNeighbour<A, T>> {
        self.nearest_n(query, 1).into_iter().next()
    }

    /// Runs the nearest-neighbour walk for one query into a single result row.
    ///
    /// `distances` and `items` are parallel, `k` slots each, and must be sorted by
    /// descending distance on entry (a row of `A::infinity()` is). They are updated in
    /// place and stay sorted descending, so slot `0` always holds the worst neighbour
    /// kept so far. Passing a row that already holds results from another tree merges
    /// with them.
    ///
    /// `own_idx` is the row's index within a batch. When the query is bit-equal to the
    /// tree point at that index, the walk starts directly from that point's leaf.
    pub fn query_row(
        &self,
        query: &[A; 2],
        own_idx: Option<usize>,
        distances: &mut [A],
        items: &mut [T],
    ) {
        debug_assert_eq!(distances.len(), items.len());

        let n_nodes = self.radiuses.len();
        if n_nodes == 0 || distances.is_empty() {
            return;
        }

        let home_node = self.home_node(query, own_idx);
        let mut node = home_node;
        let mut wrapped = false;

        loop {
            let next = if self.distance_to_node(query, node) > distances[0] {
                next_right(node)
            } else if left_child(node) < n_nodes {
                left_child(node)
            } else {
                self.process_node(query, node, distances, items);
                next_right(node)
            };

            if next == home_node || next >= n_nodes {
                break;
            }

            // a second wrap past the root means the home node was skipped, which only
            // happens when a ball does not contain its children
            if next == 0 {
                if wrapped {
                    break;
                }
                wrapped = true;
            }

            node = next;
        }
    }

    /// Returns a lower bound on the distance from `query` to any point covered by `node`.
    ///
    /// Zero means that `query` lies inside (or on the edge of) the node's ball.
    #[inline]
    pub fn distance_to_node(&self, query: &[A; 2], node: usize) -> A {
        let dist = D::dist(query, &self.centroids[node]) - self.radiuses[node];

        if dist <= A::from_f64(NODE_DISTANCE_EPSILON) {
            A::zero()
        } else {
            dist
        }
    }

    /// Scans every point covered by `node`, keeping the `k` closest to `query` in the
    /// descending row `distances` / `items`.
    ///
    /// Points at equal distances are ranked by item, so the row holds the `k` smallest
    /// `(distance, item)` pairs seen, whatever order the points are scanned in.
    pub fn process_node(&self, query: &[A; 2], node: usize, distances: &mut [A], items: &mut [T]) {
        for idx in self.node_points(node) {
            let dist = D::dist(query, &self.tree_points[idx]);
            let item = self.items[idx];

            if ranks_before(dist, item, distances[0], items[0]) {
                distances[0] = dist;
                items[0] = item;

                // only slot 0 can be out of place
                for slot in 1..distances.len() {
                    if ranks_before(distances[slot - 1], items[slot - 1], distances[slot], items[slot]) {
                        distances.swap(slot - 1, slot);
                        items.swap(slot - 1, slot);
                    } else {
                        break;
                    }
                }
            }
        }
    }

    /// Returns the node the walk for `query` starts (and ends) at.
    ///
    /// If `own_idx` names a tree point bit-equal to `query`, that point's leaf is
    /// returned. Otherwise this descends from the root, into the left child of each
    /// node whose ball contains `query` and on to [`next_right`] of each node whose
    /// ball does not, and returns the last containing node visited. Only children of
    /// containing nodes are ever visited, so every ancestor of the returned node also
    /// contains `query`. If even the root does not, the root is returned.
    pub fn home_node(&self, query: &[A; 2], own_idx: Option<usize>) -> usize {
        let n_nodes = self.radiuses.len();

        if let Some(idx) = own_idx {
            if self.tree_points.get(idx) == Some(query) {
                return point_id_to_node(idx, self.tree_points.len(), n_nodes);
            }
        }

        let mut home = 0;
        let mut node = 0;
        while node < n_nodes {
            if self.distance_to_node(query, node) == A::zero() {
                home = node;
                node = left_child(node);
            } else {
                node = next_right(node);
                if node == 0 {
                    break;
                }
            }
        }

        home
    }
}

/// Whether `(dist, item)` belongs closer to the front of a result than `(other_dist, other_item)`.
#[inline]
fn ranks_before<A: Axis, T: Content>(dist: A, item: T, other_dist: A, other_item: T) -> bool {
    dist < other_dist || (dist == other_dist && item < other_item)
}
