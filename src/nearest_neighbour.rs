//! A result item returned by a query
use crate::traits::{Axis, Content};
use std::cmp::Ordering;

/// Represents an entry in the results of a nearest neighbour query, with `distance` being the distance of this
/// particular item from the query point, in metres, and `item` being the stored item that was found
/// as part of the query.
#[derive(Debug, Copy, Clone)]
pub struct NearestNeighbour<A, T> {
    /// the distance of the found item from the query point according to the tree's distance metric
    pub distance: A,
    /// the stored item that was found in the query
    pub item: T,
}

impl<A: PartialOrd, T: Content> Ord for NearestNeighbour<A, T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.partial_cmp(other).unwrap_or(Ordering::Equal)
    }
}

#[allow(unknown_lints)]
#[allow(clippy::non_canonical_partial_ord_impl)]
impl<A: PartialOrd, T: Content> PartialOrd for NearestNeighbour<A, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.distance
            .partial_cmp(&other.distance)
            .map(|ord| ord.then_with(|| self.item.cmp(&other.item)))
    }
}

impl<A: PartialEq, T: Content> Eq for NearestNeighbour<A, T> {}

impl<A: PartialEq, T: Content> PartialEq for NearestNeighbour<A, T> {
    fn eq(&self, other: &Self) -> bool {
        self.distance == other.distance && self.item == other.item
    }
}

impl<A, T: Content> From<NearestNeighbour<A, T>> for (A, T) {
    fn from(elem: NearestNeighbour<A, T>) -> Self {
        (elem.distance, elem.item)
    }
}

/// Converts one query row, sorted by descending distance with unfilled slots
/// still at infinity, into neighbours sorted by ascending distance.
pub(crate) fn collect_row<A: Axis, T: Content>(
    distances: &[A],
    items: &[T],
) -> Vec<NearestNeighbour<A, T>> {
    distances
        .iter()
        .zip(items)
        .rev()
        .filter(|(distance, _)| distance.is_finite())
        .map(|(&distance, &item)| NearestNeighbour { distance, item })
        .collect()
}
