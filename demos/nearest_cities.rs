/// GeoBall example: nearest cities
///
/// Builds a ball tree over a handful of world cities and runs single,
/// batch and buffer-filling k-nearest-neighbour queries against it, with
/// distances measured along the WGS-84 ellipsoid.
use std::error::Error;
use std::fmt::Formatter;
use std::time::Instant;

use geoball::{BallTree, GeoBallTree, Haversine};
use tracing::Level;
use tracing_subscriber::fmt;

pub struct City {
    name: &'static str,
    country: &'static str,
    lat: f64,
    lng: f64,
}

impl std::fmt::Display for City {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.name, self.country)
    }
}

impl City {
    const fn new(name: &'static str, country: &'static str, lat: f64, lng: f64) -> Self {
        City { name, country, lat, lng }
    }

    pub fn as_lat_lng(&self) -> [f64; 2] {
        [self.lat, self.lng]
    }
}

const CITIES: [City; 20] = [
    City::new("London", "United Kingdom", 51.5072, -0.1275),
    City::new("Birmingham", "United Kingdom", 52.4800, -1.9025),
    City::new("Manchester", "United Kingdom", 53.4794, -2.2453),
    City::new("Dublin", "Ireland", 53.3497, -6.2603),
    City::new("Paris", "France", 48.8567, 2.3522),
    City::new("Brussels", "Belgium", 50.8467, 4.3525),
    City::new("Amsterdam", "Netherlands", 52.3728, 4.8936),
    City::new("Berlin", "Germany", 52.5200, 13.4050),
    City::new("Madrid", "Spain", 40.4169, -3.7033),
    City::new("Rome", "Italy", 41.8933, 12.4828),
    City::new("Reykjavik", "Iceland", 64.1467, -21.9400),
    City::new("New York", "United States", 40.6943, -73.9249),
    City::new("Mexico City", "Mexico", 19.4333, -99.1333),
    City::new("Sao Paulo", "Brazil", -23.5504, -46.6339),
    City::new("Lagos", "Nigeria", 6.4550, 3.3841),
    City::new("Nairobi", "Kenya", -1.2864, 36.8172),
    City::new("Mumbai", "India", 19.0761, 72.8775),
    City::new("Tokyo", "Japan", 35.6897, 139.6922),
    City::new("Sydney", "Australia", -33.8678, 151.2100),
    City::new("Suva", "Fiji", -18.1416, 178.4419),
];

fn main() -> Result<(), Box<dyn Error>> {
    let subscriber = fmt().with_max_level(Level::DEBUG).without_time().finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let positions: Vec<[f64; 2]> = CITIES.iter().map(City::as_lat_lng).collect();

    // Small leaves so that even 20 cities give a tree a few levels deep.
    // Items are the cities' indices in `CITIES`.
    let start = Instant::now();
    let tree: BallTree<f64, u16, geoball::Vincenty, 4> = BallTree::new_from_slice(&positions);
    println!(
        "Built a {} level tree over {} cities in {:?}",
        tree.level_count(),
        tree.size(),
        start.elapsed()
    );

    // ### nearest city to 52.5N, 1.9W
    let query = [52.5, -1.9];
    if let Some(nearest) = tree.nearest_one(&query) {
        println!(
            "\nNearest city to 52.5N, 1.9W: {} ({:.1}km)",
            CITIES[nearest.item as usize],
            nearest.distance / 1_000.0
        );
    }

    // ### nearest five cities to 52.5N, 1.9W
    let nearest_5 = tree
        .nearest_n(&query, 5)
        .into_iter()
        .map(|neighbour| {
            (
                CITIES[neighbour.item as usize].name,
                format!("{dist:.1}km", dist = neighbour.distance / 1_000.0),
            )
        })
        .collect::<Vec<_>>();
    println!("\nNearest 5 cities to 52.5N, 1.9W: {:?}", nearest_5);

    // ### each city's nearest other city
    // Querying with the tree's own points starts every walk at the leaf that
    // holds the query, and the first result is always the city itself.
    let results = tree.nearest_n_batch(tree.tree_points(), 2);
    println!("\nNearest neighbouring city:");
    for row in results {
        let (own, other) = (row[0].item as usize, row[1].item as usize);
        println!(
            "  {:<12} -> {:<12} {:>9.1}km",
            CITIES[own].name,
            CITIES[other].name,
            row[1].distance / 1_000.0
        );
    }

    // ### raw buffer queries
    // `query_into` fills caller-owned row-major buffers; each row comes back
    // sorted with the furthest neighbour first.
    let queries = [[0.0, 0.0], [-17.0, -179.5]];
    let k = 3;
    let mut distances = vec![f64::INFINITY; queries.len() * k];
    let mut indices = vec![u16::MAX; queries.len() * k];
    tree.query_into(&queries, k, &mut distances, &mut indices)?;

    for (query, (dist_row, item_row)) in queries
        .iter()
        .zip(distances.chunks(k).zip(indices.chunks(k)))
    {
        let names = item_row
            .iter()
            .rev()
            .zip(dist_row.iter().rev())
            .map(|(&item, dist)| format!("{} ({:.0}km)", CITIES[item as usize].name, dist / 1_000.0))
            .collect::<Vec<_>>();
        println!("\nNearest {k} cities to {:?}: {:?}", query, names);
    }

    // ### compare with the spherical approximation
    let ellipsoidal_tree: GeoBallTree<f64, u16> = GeoBallTree::new_from_slice(&positions);
    let spherical: BallTree<f64, u16, Haversine, 4> = BallTree::new_from_slice(&positions);
    let ellipsoidal = ellipsoidal_tree.nearest_n(&[-33.0, 150.0], 1);
    let approximate = spherical.nearest_n(&[-33.0, 150.0], 1);
    println!(
        "\nSydney from 33S, 150E: {:.3}km on the ellipsoid, {:.3}km on a sphere",
        ellipsoidal[0].distance / 1_000.0,
        approximate[0].distance / 1_000.0
    );

    Ok(())
}
