use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use transit_core::{query::Router, util::test_networks::grid_network};

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_modes");

    for n in [10, 50] {
        let network = grid_network(n);
        let destination = format!("R{}C{}", n - 1, n - 1);
        let router = Router::new(&network);

        group.bench_with_input(BenchmarkId::new("Bfs", n * n), &destination, |b, dst| {
            b.iter(|| router.find_fewest_stops("R0C0", dst, false));
        });
        group.bench_with_input(BenchmarkId::new("HopAStar", n * n), &destination, |b, dst| {
            b.iter(|| router.find_fewest_stops("R0C0", dst, true));
        });
        group.bench_with_input(
            BenchmarkId::new("LineChanges", n * n),
            &destination,
            |b, dst| {
                b.iter(|| router.find_fewest_line_changes("R0C0", dst));
            },
        );
    }
    group.finish();
}
