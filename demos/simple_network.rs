//! Small walkthrough of geneprop on a toy interactome
//!
//! Run with: cargo run --example simple_network

use geneprop::report::{module_members, top_scores};
use geneprop::{expand_module, propagate_run, GeneGraph, RwrConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Building toy interactome...");
    let graph = GeneGraph::from_weighted_edges([
        ("TP53", "MDM2", 0.999),
        ("MDM2", "CDKN2A", 0.912),
        ("TP53", "ATM", 0.950),
        ("ATM", "CHEK2", 0.990),
        ("CHEK2", "TP53", 0.980),
        ("CHEK2", "BRCA1", 0.870),
        ("BRCA1", "BRCA2", 0.970),
        ("BRCA2", "PALB2", 0.990),
    ]);
    println!(
        "  {} genes, {} interactions\n",
        graph.num_nodes(),
        graph.num_edges()
    );

    let split = graph.resolve_seeds(&["TP53", "BRCA2", "KRAS"]);
    println!("Seeds missing from network: {:?}\n", split.missing);

    let run = propagate_run(&graph, &split.present, &RwrConfig::default())?;
    println!(
        "RWR finished after {} iterations (converged: {})",
        run.iterations, run.converged
    );
    for (gene, score) in top_scores(&graph, &run.scores, 5) {
        println!("   {gene}: {score:.6}");
    }

    let module = expand_module(&graph, &split.present, 6)?;
    println!("\nModule:");
    for (rank, gene) in module_members(&graph, &module) {
        println!("  {rank:02}. {gene}");
    }

    Ok(())
}
