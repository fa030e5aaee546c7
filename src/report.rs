//! Ranked views over algorithm output, resolved to gene names

use crate::algorithms::{Module, ScoreVector};
use crate::storage::GeneGraph;
use std::cmp::Ordering;

/// Highest-scoring genes, best first
///
/// The sort is stable, so equal scores keep graph order.
///
/// # Example
///
/// ```
/// use geneprop::{propagate, report::top_scores, GeneGraph, RwrConfig};
///
/// let graph = GeneGraph::from_edges([("A", "B"), ("B", "C")]);
/// let seeds = graph.resolve_seeds(&["A"]).present;
/// let scores = propagate(&graph, &seeds, &RwrConfig::default()).unwrap();
///
/// let top = top_scores(&graph, &scores, 1);
/// assert_eq!(top[0].0, "A");
/// ```
#[must_use]
pub fn top_scores<'g>(
    graph: &'g GeneGraph,
    scores: &ScoreVector,
    n: usize,
) -> Vec<(&'g str, f64)> {
    let mut ranked: Vec<(&str, f64)> = scores
        .iter()
        .filter_map(|(node, score)| graph.node_name(node).map(|name| (name, score)))
        .collect();

    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    ranked.truncate(n);
    ranked
}

/// Module members as `(rank, gene)`, ascending by rank
#[must_use]
pub fn module_members<'g>(graph: &'g GeneGraph, module: &Module) -> Vec<(usize, &'g str)> {
    module
        .ranked()
        .into_iter()
        .filter_map(|(node, rank)| graph.node_name(node).map(|name| (rank, name)))
        .collect()
}
