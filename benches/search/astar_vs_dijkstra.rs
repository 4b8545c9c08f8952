use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use transit_core::{
    builder::NetworkBuilder,
    network::{node_index, Network},
    search::{astar::AStar, dijkstra::Dijkstra},
    util::{math::straight_line, test_networks::grid_network},
};

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

fn gen_rand_network(number_stations: usize) -> Network {
    let mut rng = rand::thread_rng();

    // 2.5 segments per station on average
    let number_segments: usize = (number_stations as f32 * 2.5) as usize;

    let mut b = NetworkBuilder::new();
    let line = b.add_line("Random", None).unwrap();

    for i in 0..number_stations {
        let coordinate = transit_core::records::Coordinate::new(
            rng.gen_range(51.3..51.7),
            rng.gen_range(-0.5..0.3),
        );
        b.add_station(&format!("S{i}"), Some(coordinate), &[line])
            .unwrap();
    }

    for _ in 0..number_segments {
        let source = rng.gen_range(0..number_stations);
        let target = rng.gen_range(0..number_stations);
        let weight = rng.gen_range(1..100) as f64;
        b.connect(node_index(source), node_index(target), line, weight);
    }

    b.finish()
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut networks: Vec<Network> = [1000, 50_000]
        .iter()
        .map(|i| gen_rand_network(*i))
        .collect();
    networks.push(grid_network(100));

    let mut group = c.benchmark_group("astar_vs_dijkstra");
    let mut rng = rand::thread_rng();
    for network in networks {
        group.bench_with_input(
            BenchmarkId::new("Dijkstra", network.num_stations()),
            &network,
            |b, g| {
                let src = rng.gen_range(0..g.num_stations());
                let dst = rng.gen_range(0..g.num_stations());
                let mut dijkstra = Dijkstra::new(g);
                b.iter(|| {
                    dijkstra.search(node_index(src), node_index(dst));
                });
            },
        );
        group.bench_with_input(
            BenchmarkId::new("AStar", network.num_stations()),
            &network,
            |b, g| {
                let src = rng.gen_range(0..g.num_stations());
                let dst = rng.gen_range(0..g.num_stations());
                let mut astar = AStar::new(g);
                b.iter(|| {
                    astar.search(node_index(src), node_index(dst), straight_line);
                });
            },
        );
    }
    group.finish();
}
