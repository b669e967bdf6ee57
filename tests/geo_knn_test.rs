use geoball::test_utils::{linear_search, random_lat_lng_points, random_points_near};
use geoball::traits::DistanceMetric;
use geoball::tree_index::point_id_to_node;
use geoball::{BallTree, GeoBallTree, Haversine, Vincenty};

/// Vincenty distance reported in kilometres rather than metres
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct VincentyKm;

impl DistanceMetric<f64> for VincentyKm {
    fn dist(a: &[f64; 2], b: &[f64; 2]) -> f64 {
        Vincenty::dist(a, b) / 1_000.0
    }
}

#[test]
fn grid_point_is_its_own_nearest_neighbour() {
    // 8 points on a 2 x 4 grid, in a tree of 1 root and 2 leaves
    let grid: Vec<[f32; 2]> = (0..8)
        .map(|i| [10.0 + (i / 4) as f32 * 0.5, 20.0 + (i % 4) as f32 * 0.5])
        .collect();

    let tree: GeoBallTree<f32, u32> = GeoBallTree::new_from_slice_with_levels(&grid, 2).unwrap();
    assert_eq!(tree.node_count(), 3);

    let mut distances = vec![f32::INFINITY; 8];
    let mut indices = vec![u32::MAX; 8];
    tree.query_into(tree.tree_points(), 1, &mut distances, &mut indices)
        .unwrap();

    for (idx, point) in tree.tree_points().iter().enumerate() {
        assert_eq!(tree.home_node(point, Some(idx)), point_id_to_node(idx, 8, 3));
        assert_eq!(indices[idx], tree.items()[idx]);
        assert!(distances[idx] < 1e-3);
        assert_eq!(grid[indices[idx] as usize], *point);
    }
}

#[test]
fn batch_query_matches_brute_force_worldwide() {
    let points = random_lat_lng_points::<f64>(5_000, 1);
    let queries = random_lat_lng_points::<f64>(300, 2);
    let tree: BallTree<f64, usize, Vincenty, 24> = BallTree::new_from_slice(&points);

    let results = tree.nearest_n_batch(&queries, 5);

    for (query, row) in queries.iter().zip(results) {
        let expected = linear_search::<f64, Vincenty>(&points, 5, query);
        let got: Vec<(f64, usize)> = row.into_iter().map(Into::into).collect();

        assert_eq!(got, expected);
    }
}

#[test]
fn small_item_types_and_custom_metrics_are_supported() {
    let points = random_points_near::<f64>([64.1, -21.9], 3.0, 2_000, 3);
    let tree: BallTree<f64, u16, VincentyKm, 16> = BallTree::new_from_slice(&points);

    for query in random_points_near::<f64>([64.1, -21.9], 3.0, 50, 4) {
        let expected = linear_search::<f64, VincentyKm>(&points, 3, &query);
        let got: Vec<(f64, usize)> = tree
            .nearest_n(&query, 3)
            .into_iter()
            .map(|n| (n.distance, n.item as usize))
            .collect();

        assert_eq!(got, expected);
        assert!(got[0].0 < 100.0, "kilometres expected, got {}", got[0].0);
    }
}

#[test]
fn adopted_tree_answers_like_the_tree_it_came_from() {
    let points = random_points_near::<f64>([-41.3, 174.8], 1.0, 700, 5);
    let built: BallTree<f64, u32, Haversine, 8> = BallTree::new_from_slice(&points);

    let adopted: BallTree<f64, u32, Haversine, 8> = BallTree::from_parts(
        built.tree_points().to_vec(),
        built.items().to_vec(),
        built.centroids().to_vec(),
        built.radiuses().to_vec(),
    )
    .unwrap();

    assert_eq!(adopted, built);

    let queries = random_points_near::<f64>([-41.3, 174.8], 1.5, 100, 6);
    assert_eq!(
        adopted.nearest_n_batch(&queries, 4),
        built.nearest_n_batch(&queries, 4)
    );
}

#[test]
fn points_either_side_of_the_antimeridian_are_neighbours() {
    let points: Vec<[f64; 2]> = vec![
        [-17.7, 178.0],  // Fiji
        [-17.8, -179.9], // just across the antimeridian
        [-17.7, 0.0],
        [-13.8, -171.8], // Samoa
        [51.5, -0.1],
    ];
    let tree: BallTree<f64, u32, Vincenty, 1> = BallTree::new_from_slice(&points);

    let nearest = tree.nearest_n(&[-17.75, 179.95], 2);

    assert_eq!(nearest[0].item, 1);
    assert_eq!(nearest[1].item, 0);
}
