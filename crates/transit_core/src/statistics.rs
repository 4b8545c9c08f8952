use std::{
    fmt::{Debug, Display},
    time::{Duration, Instant},
};

use crate::network::{node_index, Network};

#[derive(Debug, Default)]
pub struct SearchStats {
    pub nodes_settled: usize,
    pub duration: Option<Duration>,
    start_time: Option<Instant>,
}

impl SearchStats {
    pub fn init(&mut self) {
        self.nodes_settled = 0;
        self.duration = None;
        self.start_timer();
    }

    fn start_timer(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn finish(&mut self) {
        if let Some(start_time) = self.start_time {
            self.duration = Some(start_time.elapsed());
        }
    }
}

impl Display for SearchStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Stats: {} nodes settled in {:?}",
            self.nodes_settled, self.duration
        )
    }
}

pub fn average_degree(g: &Network) -> f64 {
    if g.is_empty() {
        return 0.0;
    }
    let mut sum = 0.0;
    for node in 0..g.num_stations() {
        sum += g.degree(node_index(node)) as f64;
    }
    sum / g.num_stations() as f64
}
