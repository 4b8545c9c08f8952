//! Name based queries over a built [`Network`].
//!
//! A [`Router`] validates the station names, resolves them to handles, runs
//! the requested search and turns the outcome into a [`PathResult`].
//! Invalid arguments are returned as [`QueryError`]. Every other reason for
//! not producing a route is reported as [`PathResult::NotFound`].
use log::{debug, info};

use crate::{
    error::{NotFound, QueryError, Side},
    network::{Network, NodeIndex},
    params::SearchParams,
    result::{LineChange, Metric, PathResult, Route},
    search::{
        astar::AStar, astar_hops::HopAStar, bfs::Bfs, dijkstra::Dijkstra,
        line_changes::LineChangeSearch, shortest_path::ShortestPath,
    },
    util::math::straight_line,
};

enum Lookup {
    Found(NodeIndex),
    Unknown,
    Ambiguous(Vec<NodeIndex>),
}

pub struct Router<'a> {
    g: &'a Network,
    params: SearchParams,
}

impl<'a> Router<'a> {
    pub fn new(network: &'a Network) -> Self {
        Self::with_params(network, SearchParams::default())
    }

    pub fn with_params(network: &'a Network, params: SearchParams) -> Self {
        Router { g: network, params }
    }

    /// Route with the smallest total distance in kilometers.
    pub fn find_shortest_distance(
        &self,
        source: &str,
        destination: &str,
        use_astar: bool,
    ) -> Result<PathResult, QueryError> {
        let (s, t) = match self.resolve_pair(source, destination)? {
            Ok(pair) => pair,
            Err(reason) => return Ok(reason.into()),
        };

        let sp = if use_astar {
            AStar::new(self.g).search(s, t, straight_line)
        } else {
            Dijkstra::new(self.g).search(s, t)
        };

        Ok(self.to_result(s, t, sp, |sp| Metric::Distance(sp.weight)))
    }

    /// Route passing the fewest segments.
    pub fn find_fewest_stops(
        &self,
        source: &str,
        destination: &str,
        use_astar: bool,
    ) -> Result<PathResult, QueryError> {
        let (s, t) = match self.resolve_pair(source, destination)? {
            Ok(pair) => pair,
            Err(reason) => return Ok(reason.into()),
        };

        let sp = if use_astar {
            HopAStar::with_scale(self.g, self.params.hop_heuristic_scale).search(
                s,
                t,
                straight_line,
            )
        } else {
            Bfs::new(self.g).search(s, t)
        };

        Ok(self.to_result(s, t, sp, |sp| Metric::Stops(sp.hops())))
    }

    /// Route with the fewest changes between line groups, shorter routes
    /// first among those.
    pub fn find_fewest_line_changes(
        &self,
        source: &str,
        destination: &str,
    ) -> Result<PathResult, QueryError> {
        let (s, t) = match self.resolve_pair(source, destination)? {
            Ok(pair) => pair,
            Err(reason) => return Ok(reason.into()),
        };

        let Some(path) = LineChangeSearch::new(self.g).search(s, t) else {
            return Ok(self.no_path(s, t));
        };

        let line_changes = path
            .changes
            .iter()
            .map(|change| LineChange {
                station: self.g.stations[change.station.index()].name.clone(),
                from_lines: self.g.group_names(&change.from),
                to_lines: self.g.group_names(&change.to),
            })
            .collect();

        Ok(PathResult::Found(Route {
            stations: self.g.station_names(&path.nodes),
            metric: Metric::LineChanges(path.num_changes()),
            line_changes: Some(line_changes),
        }))
    }

    fn to_result(
        &self,
        s: NodeIndex,
        t: NodeIndex,
        sp: Option<ShortestPath>,
        metric: impl Fn(&ShortestPath) -> Metric,
    ) -> PathResult {
        match sp {
            Some(sp) => PathResult::Found(Route {
                stations: self.g.station_names(&sp.nodes),
                metric: metric(&sp),
                line_changes: None,
            }),
            None => self.no_path(s, t),
        }
    }

    fn no_path(&self, s: NodeIndex, t: NodeIndex) -> PathResult {
        let from = self.g.stations[s.index()].name.clone();
        let to = self.g.stations[t.index()].name.clone();
        info!("No path between {} and {}", from, to);
        PathResult::NotFound(NotFound::NoPath { from, to })
    }

    /// Validates both names and resolves them to stations.
    ///
    /// The outer `Result` carries invalid arguments, the inner one names
    /// stations the network cannot provide.
    fn resolve_pair(
        &self,
        source: &str,
        destination: &str,
    ) -> Result<Result<(NodeIndex, NodeIndex), NotFound>, QueryError> {
        let source = source.trim();
        let destination = destination.trim();

        if source.is_empty() {
            return Err(QueryError::EmptyStationName { side: Side::Source });
        }
        if destination.is_empty() {
            return Err(QueryError::EmptyStationName {
                side: Side::Destination,
            });
        }
        if source.to_lowercase() == destination.to_lowercase() {
            return Err(QueryError::SameStation {
                name: source.to_string(),
            });
        }

        if self.g.is_empty() {
            return Ok(Err(NotFound::EmptyNetwork));
        }

        let s = self.lookup(source);
        let t = self.lookup(destination);
        debug!("Resolving '{}' and '{}'", source, destination);

        // Ambiguity is reported before unknown names, source side first
        let pair = match (s, t) {
            (Lookup::Found(s), Lookup::Found(t)) => Ok((s, t)),
            (Lookup::Ambiguous(candidates), _) => {
                Err(self.ambiguous(Side::Source, source, &candidates))
            }
            (_, Lookup::Ambiguous(candidates)) => {
                Err(self.ambiguous(Side::Destination, destination, &candidates))
            }
            (s, t) => Err(NotFound::UnknownStation {
                from: matches!(s, Lookup::Unknown).then(|| source.to_string()),
                to: matches!(t, Lookup::Unknown).then(|| destination.to_string()),
            }),
        };

        Ok(pair)
    }

    fn lookup(&self, name: &str) -> Lookup {
        if let Some(node) = self.g.station_index(name) {
            return Lookup::Found(node);
        }
        match self.g.stations_named_ignore_case(name) {
            [] => Lookup::Unknown,
            [node] => Lookup::Found(*node),
            nodes => Lookup::Ambiguous(nodes.to_vec()),
        }
    }

    fn ambiguous(&self, side: Side, name: &str, candidates: &[NodeIndex]) -> NotFound {
        NotFound::AmbiguousStation {
            side,
            name: name.to_string(),
            candidates: self.g.station_names(candidates),
        }
    }
}

pub fn find_shortest_distance(
    network: &Network,
    source: &str,
    destination: &str,
    use_astar: bool,
) -> Result<PathResult, QueryError> {
    Router::new(network).find_shortest_distance(source, destination, use_astar)
}

pub fn find_fewest_stops(
    network: &Network,
    source: &str,
    destination: &str,
    use_astar: bool,
) -> Result<PathResult, QueryError> {
    Router::new(network).find_fewest_stops(source, destination, use_astar)
}

pub fn find_fewest_line_changes(
    network: &Network,
    source: &str,
    destination: &str,
) -> Result<PathResult, QueryError> {
    Router::new(network).find_fewest_line_changes(source, destination)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    use crate::{
        builder::{build, NetworkBuilder},
        constants::Weight,
        records::LineRecord,
        station,
        util::test_networks::{
            chain_network, chain_with_shortcut, disconnected_network, grid_network,
            interchange_network,
        },
    };

    use super::*;

    fn init_log() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn route(result: Result<PathResult, QueryError>) -> Route {
        match result.unwrap() {
            PathResult::Found(route) => route,
            PathResult::NotFound(reason) => panic!("expected a route, got: {reason}"),
        }
    }

    fn not_found(result: Result<PathResult, QueryError>) -> NotFound {
        match result.unwrap() {
            PathResult::Found(route) => panic!("expected no route, got: {route}"),
            PathResult::NotFound(reason) => reason,
        }
    }

    #[test]
    fn shortest_distance_on_chain() {
        init_log();
        let g = chain_network();

        for use_astar in [false, true] {
            let r = route(find_shortest_distance(&g, "A", "D", use_astar));
            assert_eq!(r.stations, vec!["A", "B", "C", "D"]);
            assert_eq!(r.metric, Metric::Distance(10.0));
            assert_eq!(r.line_changes, None);
        }
    }

    #[test]
    fn longer_direct_segment_loses() {
        let g = chain_with_shortcut();

        for use_astar in [false, true] {
            let r = route(find_shortest_distance(&g, "A", "D", use_astar));
            assert_eq!(r.stations, vec!["A", "B", "C", "D"]);
            assert_eq!(r.metric, Metric::Distance(10.0));
        }
    }

    #[test]
    fn fewest_stops_takes_direct_segment() {
        let g = chain_with_shortcut();

        for use_astar in [false, true] {
            let r = route(find_fewest_stops(&g, "A", "D", use_astar));
            assert_eq!(r.stations, vec!["A", "D"]);
            assert_eq!(r.metric, Metric::Stops(1));
        }
    }

    #[test]
    fn two_stations_one_line() {
        let mut b = NetworkBuilder::new();
        let l = b.add_line("L", None).unwrap();
        let a = b.add_station("A", None, &[l]).unwrap();
        let bb = b.add_station("B", None, &[l]).unwrap();
        b.connect(a, bb, l, 1.0);
        let g = b.finish();

        let r = route(find_fewest_line_changes(&g, "A", "B"));
        assert_eq!(r.stations, vec!["A", "B"]);
        assert_eq!(r.metric, Metric::LineChanges(0));
        assert_eq!(r.line_changes, Some(vec![]));
    }

    #[test]
    fn one_change_at_interchange() {
        let g = interchange_network();

        let r = route(find_fewest_line_changes(&g, "1", "3"));
        assert_eq!(r.stations, vec!["1", "2", "3"]);
        assert_eq!(r.metric, Metric::LineChanges(1));
        assert_eq!(
            r.line_changes,
            Some(vec![LineChange {
                station: "2".into(),
                from_lines: vec!["X".into()],
                to_lines: vec!["Y".into()],
            }])
        );
    }

    #[test]
    fn unknown_station() {
        let g = chain_network();

        assert_eq!(
            not_found(find_shortest_distance(&g, "Atlantis", "D", false)),
            NotFound::UnknownStation {
                from: Some("Atlantis".into()),
                to: None
            }
        );
        assert_eq!(
            not_found(find_fewest_stops(&g, "A", "Lemuria", true)),
            NotFound::UnknownStation {
                from: None,
                to: Some("Lemuria".into())
            }
        );
        assert_eq!(
            not_found(find_fewest_line_changes(&g, "Atlantis", "Lemuria")),
            NotFound::UnknownStation {
                from: Some("Atlantis".into()),
                to: Some("Lemuria".into())
            }
        );
    }

    #[test]
    fn disconnected() {
        let g = disconnected_network();
        let expected = NotFound::NoPath {
            from: "A".into(),
            to: "B".into(),
        };

        for use_astar in [false, true] {
            assert_eq!(not_found(find_shortest_distance(&g, "A", "B", use_astar)), expected);
            assert_eq!(not_found(find_fewest_stops(&g, "A", "B", use_astar)), expected);
        }
        assert_eq!(not_found(find_fewest_line_changes(&g, "A", "B")), expected);
    }

    #[test]
    fn invalid_arguments() {
        let g = chain_network();

        assert_eq!(
            find_shortest_distance(&g, "  ", "D", false),
            Err(QueryError::EmptyStationName { side: Side::Source })
        );
        assert_eq!(
            find_fewest_stops(&g, "A", "", false),
            Err(QueryError::EmptyStationName {
                side: Side::Destination
            })
        );
        assert_eq!(
            find_fewest_line_changes(&g, "a", " A "),
            Err(QueryError::SameStation { name: "a".into() })
        );
        // Arguments are checked before the network is looked at
        let empty = build(&[], &[]).unwrap();
        assert_eq!(
            find_shortest_distance(&empty, "", "D", false),
            Err(QueryError::EmptyStationName { side: Side::Source })
        );
    }

    #[test]
    fn empty_network() {
        let g = build(&[], &[]).unwrap();
        assert_eq!(
            not_found(find_shortest_distance(&g, "A", "B", false)),
            NotFound::EmptyNetwork
        );
    }

    #[test]
    fn name_resolution() {
        let g = chain_network();
        let r = route(find_shortest_distance(&g, " a", "d ", false));
        assert_eq!(r.stations, vec!["A", "B", "C", "D"]);

        let lines = vec![LineRecord::new("L")];
        let stations = vec![
            station!("Bank", ["L"]),
            station!("BANK", ["L"]),
            station!("Monument", ["L"]),
        ];
        let g = build(&lines, &stations).unwrap();

        // Exact matches win over case-insensitive ones
        let r = route(find_fewest_stops(&g, "BANK", "Monument", false));
        assert_eq!(r.stations, vec!["BANK", "Monument"]);

        assert_eq!(
            not_found(find_fewest_stops(&g, "monument", "bank", false)),
            NotFound::AmbiguousStation {
                side: Side::Destination,
                name: "bank".into(),
                candidates: vec!["Bank".into(), "BANK".into()],
            }
        );

        // An ambiguous name is not hidden by an unknown one on the other side
        assert_eq!(
            not_found(find_fewest_stops(&g, "bank", "Atlantis", false)),
            NotFound::AmbiguousStation {
                side: Side::Source,
                name: "bank".into(),
                candidates: vec!["Bank".into(), "BANK".into()],
            }
        );
        assert_eq!(
            not_found(find_fewest_stops(&g, "Atlantis", "bank", false)),
            NotFound::AmbiguousStation {
                side: Side::Destination,
                name: "bank".into(),
                candidates: vec!["Bank".into(), "BANK".into()],
            }
        );
    }

    #[test]
    fn single_line_routes_have_no_changes() {
        let g = grid_network(4);
        let r = route(find_fewest_line_changes(&g, "R1C0", "R1C3"));
        assert_eq!(r.stations, vec!["R1C0", "R1C1", "R1C2", "R1C3"]);
        assert_eq!(r.metric, Metric::LineChanges(0));

        let r = route(find_fewest_line_changes(&g, "R0C2", "R3C2"));
        assert_eq!(r.stations, vec!["R0C2", "R1C2", "R2C2", "R3C2"]);
        assert_eq!(r.line_changes, Some(vec![]));
    }

    #[test]
    fn hop_scale_is_configurable() {
        let g = grid_network(4);
        let router = Router::with_params(&g, SearchParams::new().hop_heuristic_scale(0.0));
        let r = route(router.find_fewest_stops("R0C0", "R3C3", true));
        assert_eq!(r.metric, Metric::Stops(6));
    }

    #[test]
    fn repeated_queries_are_identical() {
        let g = grid_network(5);
        let router = Router::new(&g);

        let first = router.find_shortest_distance("R0C0", "R4C3", false).unwrap();
        for _ in 0..5 {
            assert_eq!(router.find_shortest_distance("R0C0", "R4C3", false).unwrap(), first);
        }

        let first = router.find_fewest_line_changes("R0C4", "R4C0").unwrap();
        for _ in 0..5 {
            assert_eq!(router.find_fewest_line_changes("R0C4", "R4C0").unwrap(), first);
        }
    }

    #[test]
    fn concurrent_queries() {
        let g = grid_network(6);
        let expected = (
            find_shortest_distance(&g, "R0C0", "R5C5", true).unwrap(),
            find_fewest_stops(&g, "R0C5", "R5C0", false).unwrap(),
            find_fewest_line_changes(&g, "R2C0", "R3C5").unwrap(),
        );

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    scope.spawn(|| {
                        (
                            find_shortest_distance(&g, "R0C0", "R5C5", true).unwrap(),
                            find_fewest_stops(&g, "R0C5", "R5C0", false).unwrap(),
                            find_fewest_line_changes(&g, "R2C0", "R3C5").unwrap(),
                        )
                    })
                })
                .collect();

            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }

    const STATIONS: usize = 8;

    fn random_network(edges: &[(usize, usize, Weight)]) -> Network {
        let mut b = NetworkBuilder::new();
        let l = b.add_line("L", None).unwrap();
        let nodes: Vec<_> = (0..STATIONS)
            .map(|i| b.add_station(&format!("S{i}"), None, &[l]).unwrap())
            .collect();
        for &(x, y, w) in edges {
            b.connect(nodes[x], nodes[y], l, w);
        }
        b.finish()
    }

    /// Cheapest walk from station 0 to every station, by plain relaxation.
    fn relax_all(g: &Network, cost: impl Fn(Weight) -> Weight) -> Vec<Weight> {
        let mut dist = vec![f64::INFINITY; g.num_stations()];
        dist[0] = 0.0;
        for _ in 0..g.num_stations() {
            for segment in g.segments() {
                let (a, b) = (segment.source.index(), segment.target.index());
                let w = cost(segment.weight);
                if dist[a] + w < dist[b] {
                    dist[b] = dist[a] + w;
                }
                if dist[b] + w < dist[a] {
                    dist[a] = dist[b] + w;
                }
            }
        }
        dist
    }

    fn assert_walk(g: &Network, r: &Route, source: &str, destination: &str) {
        assert_eq!(r.stations.first().map(String::as_str), Some(source));
        assert_eq!(r.stations.last().map(String::as_str), Some(destination));
        for pair in r.stations.windows(2) {
            let a = g.station_index(&pair[0]).unwrap();
            let b = g.station_index(&pair[1]).unwrap();
            assert!(g.are_adjacent(a, b), "{} and {} are not adjacent", pair[0], pair[1]);
        }
    }

    proptest! {
        #[test]
        fn optimal_metrics(
            edges in prop::collection::vec((0..STATIONS, 0..STATIONS, 0.1f64..10.0), 0..20),
            target in 1..STATIONS,
        ) {
            let g = random_network(&edges);
            let destination = format!("S{target}");
            let best_distance = relax_all(&g, |w| w)[target];
            let best_hops = relax_all(&g, |_| 1.0)[target];

            match find_shortest_distance(&g, "S0", &destination, false).unwrap() {
                PathResult::Found(r) => {
                    assert_walk(&g, &r, "S0", &destination);
                    assert_abs_diff_eq!(r.metric.value(), best_distance, epsilon = 1e-9);
                }
                PathResult::NotFound(reason) => {
                    prop_assert!(best_distance.is_infinite());
                    prop_assert!(matches!(reason, NotFound::NoPath { .. }), "unexpected {:?}", reason);
                }
            }

            match find_fewest_stops(&g, "S0", &destination, false).unwrap() {
                PathResult::Found(r) => {
                    assert_walk(&g, &r, "S0", &destination);
                    prop_assert_eq!(r.metric.value(), best_hops);
                }
                PathResult::NotFound(_) => prop_assert!(best_hops.is_infinite()),
            }

            // A single line never needs a change
            if let PathResult::Found(r) = find_fewest_line_changes(&g, "S0", &destination).unwrap() {
                assert_walk(&g, &r, "S0", &destination);
                prop_assert_eq!(r.metric, Metric::LineChanges(0));
            }
        }
    }
}
