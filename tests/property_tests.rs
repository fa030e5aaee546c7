//! Property-based tests for geneprop
//!
//! Verifies graph, propagation, and expansion invariants on arbitrary networks

use geneprop::{
    expand_module, propagate, propagate_run, restart_distribution, GeneGraph, NodeId, RwrConfig,
};
use proptest::prelude::*;
use std::collections::HashSet;

// Property: adjacency is symmetric and neighbor lists have no duplicates
proptest! {
    #[test]
    fn prop_adjacency_symmetric(edges in prop_edge_list(0usize..80usize, 1u32..30u32)) {
        let graph = GeneGraph::from_edges(edges);

        for u in graph.nodes() {
            let neighbors = graph.neighbors(u);
            let unique: HashSet<_> = neighbors.iter().collect();
            prop_assert_eq!(unique.len(), neighbors.len());

            for &v in neighbors {
                prop_assert!(graph.neighbors(v).contains(&u));
            }
        }
    }
}

// Property: scores are non-negative and total mass never exceeds one
proptest! {
    #[test]
    fn prop_scores_non_negative_and_bounded(
        edges in prop_edge_list(1usize..80usize, 1u32..30u32),
        restart in 0.05f64..0.95,
        max_iter in 0usize..60,
        seed_picks in prop::collection::vec(any::<prop::sample::Index>(), 1..6),
    ) {
        let graph = GeneGraph::from_edges(edges);
        let seeds = pick_seeds(&graph, &seed_picks);
        let config = RwrConfig { restart, max_iter, tol: 1e-9 };

        let scores = propagate(&graph, &seeds, &config).unwrap();

        prop_assert_eq!(scores.len(), graph.num_nodes());
        for (_, s) in scores.iter() {
            prop_assert!(s >= 0.0);
        }
        prop_assert!(scores.sum() <= 1.0 + 1e-9);
    }
}

// Property: restart distribution of distinct seeds sums to one
proptest! {
    #[test]
    fn prop_restart_distribution_sums_to_one(
        edges in prop_edge_list(1usize..80usize, 1u32..30u32),
        seed_picks in prop::collection::vec(any::<prop::sample::Index>(), 1..6),
    ) {
        let graph = GeneGraph::from_edges(edges);
        let mut seeds = pick_seeds(&graph, &seed_picks);
        seeds.sort_unstable();
        seeds.dedup();

        let p0 = restart_distribution(&graph, &seeds).unwrap();
        prop_assert!((p0.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }
}

// Property: converging early equals running exactly that many iterations
proptest! {
    #[test]
    fn prop_convergence_idempotent(
        edges in prop_edge_list(1usize..60usize, 1u32..20u32),
        restart in 0.2f64..0.9,
        seed_picks in prop::collection::vec(any::<prop::sample::Index>(), 1..4),
    ) {
        let graph = GeneGraph::from_edges(edges);
        let seeds = pick_seeds(&graph, &seed_picks);

        let early = propagate_run(
            &graph,
            &seeds,
            &RwrConfig { restart, max_iter: 10_000, tol: 1e-7 },
        ).unwrap();
        let fixed = propagate_run(
            &graph,
            &seeds,
            &RwrConfig { restart, max_iter: early.iterations, tol: 0.0 },
        ).unwrap();

        prop_assert!(early.converged);
        prop_assert_eq!(fixed.scores, early.scores);
    }
}

// Property: module output is deterministic, bounded, and ranks strictly increase
proptest! {
    #[test]
    fn prop_module_bounded_and_ranked(
        edges in prop_edge_list(1usize..80usize, 1u32..30u32),
        k in 1usize..40,
        seed_picks in prop::collection::vec(any::<prop::sample::Index>(), 1..4),
    ) {
        let graph = GeneGraph::from_edges(edges);
        let seeds = pick_seeds(&graph, &seed_picks);
        let distinct: HashSet<NodeId> = seeds.iter().copied().collect();

        let module = expand_module(&graph, &seeds, k).unwrap();

        prop_assert!(module.len() <= k.max(distinct.len()));
        prop_assert!(module.len() - distinct.len() <= k.saturating_sub(distinct.len()));
        for seed in &distinct {
            prop_assert!(module.contains(*seed));
        }

        // Expansion members follow the seeds with strictly increasing ranks
        let expansion: Vec<usize> = module
            .members()
            .iter()
            .filter(|(node, _)| !distinct.contains(node))
            .map(|&(_, rank)| rank)
            .collect();
        for pair in expansion.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
        if let Some(&first) = expansion.first() {
            prop_assert_eq!(first, seeds.len() + 1);
        }

        prop_assert_eq!(expand_module(&graph, &seeds, k).unwrap(), module);
    }
}

// Property: every added member links to an earlier member
proptest! {
    #[test]
    fn prop_module_grows_connected(
        edges in prop_edge_list(1usize..80usize, 1u32..30u32),
        seed_picks in prop::collection::vec(any::<prop::sample::Index>(), 1..3),
    ) {
        let graph = GeneGraph::from_edges(edges);
        let seeds = pick_seeds(&graph, &seed_picks);
        let distinct: HashSet<NodeId> = seeds.iter().copied().collect();

        let module = expand_module(&graph, &seeds, 25).unwrap();

        let mut so_far: HashSet<NodeId> = distinct.clone();
        for (node, _) in module.ranked() {
            if distinct.contains(&node) {
                continue;
            }
            prop_assert!(graph.neighbors(node).iter().any(|n| so_far.contains(n)));
            so_far.insert(node);
        }
    }
}

// Helper: map sampled indices onto node ids of a non-empty graph
fn pick_seeds(graph: &GeneGraph, picks: &[prop::sample::Index]) -> Vec<NodeId> {
    #[allow(clippy::cast_possible_truncation)]
    picks
        .iter()
        .map(|p| NodeId(p.index(graph.num_nodes()) as u32))
        .collect()
}

// Helper: Generate arbitrary gene edge list
fn prop_edge_list(
    num_edges: impl Strategy<Value = usize>,
    max_gene: impl Strategy<Value = u32>,
) -> impl Strategy<Value = Vec<(String, String)>> {
    (num_edges, max_gene).prop_flat_map(|(n, max_gene)| {
        let max_gene = max_gene.max(1);
        prop::collection::vec(
            (0..max_gene, 0..max_gene).prop_map(|(u, v)| (format!("G{u}"), format!("G{v}"))),
            n..=n,
        )
    })
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_single_self_loop_graph() {
        let graph = GeneGraph::from_edges([("A", "A")]);
        let seeds = vec![NodeId(0)];

        // All mass walks back to A each step
        let scores = propagate(&graph, &seeds, &RwrConfig::default()).unwrap();
        assert!((scores.as_slice()[0] - 1.0).abs() < 1e-9);

        // Nothing to add beyond the seed
        let module = expand_module(&graph, &seeds, 5).unwrap();
        assert_eq!(module.len(), 1);
    }
}
