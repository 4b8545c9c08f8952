//! Small networks shared by the tests, benchmarks and the demo.
use crate::{
    builder::{build, NetworkBuilder},
    network::Network,
    records::{LineRecord, StationRecord},
};

/// A -5- B -3- C -2- D, all on line L1.
pub fn chain_network() -> Network {
    let mut b = NetworkBuilder::new();
    let l1 = b.add_line("L1", None).unwrap();

    let a = b.add_station("A", None, &[l1]).unwrap();
    let bb = b.add_station("B", None, &[l1]).unwrap();
    let c = b.add_station("C", None, &[l1]).unwrap();
    let d = b.add_station("D", None, &[l1]).unwrap();

    b.connect(a, bb, l1, 5.0); // A <=> B
    b.connect(bb, c, l1, 3.0); // B <=> C
    b.connect(c, d, l1, 2.0); // C <=> D

    b.finish()
}

/// [`chain_network`] plus a direct A-D segment of 15 on line L2.
pub fn chain_with_shortcut() -> Network {
    //  ____15____
    // /          \
    // A -5- B -3- C -2- D
    let mut b = NetworkBuilder::new();
    let l1 = b.add_line("L1", None).unwrap();
    let l2 = b.add_line("L2", None).unwrap();

    let a = b.add_station("A", None, &[l1, l2]).unwrap();
    let bb = b.add_station("B", None, &[l1]).unwrap();
    let c = b.add_station("C", None, &[l1]).unwrap();
    let d = b.add_station("D", None, &[l1, l2]).unwrap();

    b.connect(a, bb, l1, 5.0); // A <=> B
    b.connect(bb, c, l1, 3.0); // B <=> C
    b.connect(c, d, l1, 2.0); // C <=> D
    b.connect(a, d, l2, 15.0); // A <=> D

    b.finish()
}

/// 1 (X) - 2 (X, Y) - 3 (Y), built from records.
pub fn interchange_network() -> Network {
    let lines = vec![LineRecord::new("X"), LineRecord::new("Y")];
    let stations = vec![
        StationRecord::new("1").lines(["X"]),
        StationRecord::new("2").lines(["X", "Y"]),
        StationRecord::new("3").lines(["Y"]),
    ];
    build(&lines, &stations).unwrap()
}

/// Two stations on the same line without any segment.
pub fn disconnected_network() -> Network {
    let mut b = NetworkBuilder::new();
    let l = b.add_line("L", None).unwrap();
    b.add_station("A", None, &[l]).unwrap();
    b.add_station("B", None, &[l]).unwrap();
    b.finish()
}

/// `n` x `n` grid with 0.01 degree spacing, one line per row and column.
///
/// Station `R{r}C{c}` has index `r * n + c`.
pub fn grid_network(n: usize) -> Network {
    let mut lines = Vec::with_capacity(2 * n);
    for i in 0..n {
        lines.push(LineRecord::new(format!("Row {i}")));
        lines.push(LineRecord::new(format!("Col {i}")));
    }

    let mut stations = Vec::with_capacity(n * n);
    for r in 0..n {
        for c in 0..n {
            stations.push(
                StationRecord::new(format!("R{r}C{c}"))
                    .lines([format!("Row {r}"), format!("Col {c}")])
                    .at(r as f64 * 0.01, c as f64 * 0.01),
            );
        }
    }

    build(&lines, &stations).unwrap()
}
