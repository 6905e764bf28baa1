use clap::Parser;
use kairo::prelude::*;
use std::fs;
use std::time::Instant;

/// Evaluate a circuit snapshot and print the derived state of every node and
/// wire. A development tool for inspecting circuits outside the editor.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the circuit JSON file ({"nodes": [...], "edges": [...]})
    circuit_path: String,

    /// Switch node ids to toggle before evaluating (repeatable)
    #[arg(short, long = "toggle")]
    toggle: Vec<String>,

    /// Print the evaluation as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() {
    let cli = Cli::parse();

    let load_start = Instant::now();
    let circuit_json = fs::read_to_string(&cli.circuit_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read circuit file '{}': {}",
            &cli.circuit_path, e
        ))
    });
    let circuit = CircuitDefinition::from_json(&circuit_json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse circuit: {}", e)));
    let load_duration = load_start.elapsed();

    let node_count = circuit.nodes.len();
    let edge_count = circuit.edges.len();

    let mut board = CircuitBoard::from_circuit(circuit)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to open circuit: {}", e)));

    for switch_id in &cli.toggle {
        board
            .toggle_switch(switch_id)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to toggle '{}': {}", switch_id, e)));
    }

    let eval_start = Instant::now();
    let evaluation = board.evaluation().clone();
    let eval_duration = eval_start.elapsed();

    if cli.json {
        let rendered = serde_json::to_string_pretty(&evaluation)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to render JSON: {}", e)));
        println!("{}", rendered);
        return;
    }

    println!("\nNodes:");
    let mut node_ids: Vec<&String> = evaluation.states.keys().collect();
    node_ids.sort();
    for id in node_ids {
        let state = &evaluation.states[id];
        let node_type = board
            .graph()
            .node(id)
            .map(|n| n.node_type.as_str())
            .unwrap_or("?");
        let mut line = format!(
            "  {:<12} {:<20} power={}",
            id,
            node_type,
            if state.power { "on" } else { "off" }
        );
        if let Some(value) = state.value {
            line.push_str(&format!(" value={}", value));
        }
        if state.unstable {
            line.push_str(" UNSTABLE");
        }
        println!("{}", line);
    }

    println!("\nWires:");
    let mut edge_ids: Vec<&String> = evaluation.edge_power.keys().collect();
    edge_ids.sort();
    for id in edge_ids {
        println!(
            "  {:<12} {}",
            id,
            if evaluation.edge_power[id] { "powered" } else { "unpowered" }
        );
    }

    println!("\n--- Summary ---");
    println!("Nodes:       {}", node_count);
    println!("Edges:       {}", edge_count);
    println!("Loading:     {:?}", load_duration);
    println!("Evaluation:  {:?}", eval_duration);
    println!();
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
