use criterion::measurement::WallTime;
use criterion::{
    criterion_group, criterion_main, AxisScale, BenchmarkGroup, BenchmarkId, Criterion,
    PlotConfiguration, Throughput,
};
use geoball::test_utils::random_lat_lng_points;
use geoball::traits::Axis;
use geoball::{BallTree, Haversine, Vincenty};
use std::hint::black_box;

const BUCKET_SIZE: usize = 32;
const QUERY: usize = 1_000;

pub fn build(c: &mut Criterion) {
    let mut group = c.benchmark_group("Build");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in [1_000, 10_000, 100_000].iter() {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("f64", size), &size, |b, &size| {
            let points = random_lat_lng_points::<f64>(size, 1);

            b.iter(|| {
                black_box(BallTree::<f64, u32, Vincenty, BUCKET_SIZE>::new_from_slice(&points))
            });
        });
    }
}

pub fn nearest_n(c: &mut Criterion) {
    let mut group = c.benchmark_group("Query Nearest n");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in [1_000, 10_000, 100_000].iter() {
        bench_nearest_n::<f64>(&mut group, size, 10, "f64");
        bench_nearest_n::<f32>(&mut group, size, 10, "f32");
    }
}

pub fn nearest_n_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("Query Nearest n Batch");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in [1_000, 10_000, 100_000].iter() {
        group.throughput(Throughput::Elements(size as u64));

        let points = random_lat_lng_points::<f64>(size, 2);
        let vincenty = BallTree::<f64, u32, Vincenty, BUCKET_SIZE>::new_from_slice(&points);
        let haversine = BallTree::<f64, u32, Haversine, BUCKET_SIZE>::new_from_slice(&points);

        group.bench_with_input(BenchmarkId::new("self vincenty", size), &size, |b, _| {
            let mut distances = vec![f64::INFINITY; size * 10];
            let mut indices = vec![u32::MAX; size * 10];

            b.iter(|| {
                distances.fill(f64::INFINITY);
                vincenty
                    .query_into(vincenty.tree_points(), 10, &mut distances, &mut indices)
                    .unwrap();
                black_box(&distances);
            });
        });

        group.bench_with_input(BenchmarkId::new("self haversine", size), &size, |b, _| {
            b.iter(|| black_box(haversine.nearest_n_batch(haversine.tree_points(), 10)));
        });
    }
}

fn bench_nearest_n<A: Axis>(
    group: &mut BenchmarkGroup<WallTime>,
    size: usize,
    qty: usize,
    subtype: &str,
) {
    group.throughput(Throughput::Elements(QUERY as u64));

    group.bench_with_input(BenchmarkId::new(subtype, size), &size, |b, &size| {
        let points = random_lat_lng_points::<A>(size, 3);
        let queries = random_lat_lng_points::<A>(QUERY, 4);
        let tree = BallTree::<A, u32, Vincenty, BUCKET_SIZE>::new_from_slice(&points);

        b.iter(|| {
            queries
                .iter()
                .for_each(|query| {
                    black_box(tree.nearest_n(query, qty));
                })
        });
    });
}

criterion_group!(benches, build, nearest_n, nearest_n_batch);
criterion_main!(benches);
