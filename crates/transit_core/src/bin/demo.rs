use transit_core::prelude::*;
use transit_core::station;

fn main() {
    env_logger::init();

    let lines = vec![
        LineRecord::new("Central").color("#DC241F"),
        LineRecord::new("Victoria").color("#0098D4"),
        LineRecord::new("Piccadilly").color("#003688"),
        LineRecord::new("Northern - Charing Cross Branch").color("#000000"),
        LineRecord::new("Northern - Bank Branch").color("#000000"),
    ];

    // Running order of each line follows the order of this list
    let stations = vec![
        station!("Victoria", ["Victoria"], 51.4965, -0.1447),
        station!("Green Park", ["Victoria", "Piccadilly"], 51.5067, -0.1428),
        station!("Oxford Circus", ["Central", "Victoria"], 51.5152, -0.1419),
        station!("Warren Street", ["Victoria", "Northern - Charing Cross Branch"], 51.5247, -0.1384),
        station!("Tottenham Court Road", ["Central", "Northern - Charing Cross Branch"], 51.5165, -0.1308),
        station!("Piccadilly Circus", ["Piccadilly"], 51.5098, -0.1342),
        station!("Leicester Square", ["Piccadilly", "Northern - Charing Cross Branch"], 51.5113, -0.1281),
        station!("Holborn", ["Central", "Piccadilly"], 51.5174, -0.1201),
        station!("Euston", ["Northern - Bank Branch"], 51.5282, -0.1337),
        station!("Bank", ["Central", "Northern - Bank Branch"], 51.5133, -0.0886),
    ];

    let network = build(&lines, &stations).expect("Failed to build network");
    network.print_info();
    println!(
        "Average degree: {:.2}",
        transit_core::statistics::average_degree(&network)
    );

    let router = Router::new(&network);
    let queries = [
        ("Victoria", "Bank"),
        ("Piccadilly Circus", "Warren Street"),
        ("Euston", "Green Park"),
        ("Victoria", "Atlantis"),
    ];

    for (source, destination) in queries {
        println!("\n{source} -> {destination}");
        for use_astar in [false, true] {
            let label = if use_astar { "A*" } else { "plain" };
            match router.find_shortest_distance(source, destination, use_astar) {
                Ok(result) => println!("  shortest distance ({label}): {result}"),
                Err(e) => println!("  invalid query: {e}"),
            }
            match router.find_fewest_stops(source, destination, use_astar) {
                Ok(result) => println!("  fewest stops ({label}): {result}"),
                Err(e) => println!("  invalid query: {e}"),
            }
        }
        match router.find_fewest_line_changes(source, destination) {
            Ok(result) => println!("  fewest line changes: {result}"),
            Err(e) => println!("  invalid query: {e}"),
        }
    }
}
