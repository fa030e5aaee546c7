//! DIAMOnD-style disease module expansion
//!
//! Based on Ghiassian et al. (2015) "A DIseAse MOdule Detection (DIAMOnD)
//! algorithm derived from a systematic analysis of connectivity patterns of
//! disease proteins in the human interactome". This variant ranks candidates by
//! the raw number of links into the current module rather than by a
//! hypergeometric p-value.

use crate::config::ExpansionConfig;
use crate::error::Result;
use crate::storage::{GeneGraph, NodeId};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Module members with their inclusion rank
///
/// Ranks start at 1. Seeds take the first ranks in seed-list order; a seed that
/// appears more than once keeps the rank of its last occurrence, leaving a gap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Module {
    /// (member, rank) in order of first inclusion
    members: Vec<(NodeId, usize)>,
    /// member → position in `members`
    slots: HashMap<NodeId, usize>,
}

impl Module {
    /// Insert a member or overwrite its rank
    fn assign(&mut self, node: NodeId, rank: usize) {
        if let Some(&slot) = self.slots.get(&node) {
            self.members[slot].1 = rank;
        } else {
            self.slots.insert(node, self.members.len());
            self.members.push((node, rank));
        }
    }

    /// Rank of a member
    #[must_use]
    pub fn rank(&self, node: NodeId) -> Option<usize> {
        self.slots.get(&node).map(|&slot| self.members[slot].1)
    }

    /// True if `node` is a member
    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.slots.contains_key(&node)
    }

    /// Number of distinct members
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True if the module has no members
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members in order of first inclusion, with their (possibly overwritten) rank
    #[must_use]
    pub fn members(&self) -> &[(NodeId, usize)] {
        &self.members
    }

    /// Members sorted by ascending rank
    #[must_use]
    pub fn ranked(&self) -> Vec<(NodeId, usize)> {
        let mut ranked = self.members.clone();
        ranked.sort_by_key(|&(_, rank)| rank);
        ranked
    }
}

/// Grow a connected module around the seeds, one most-connected node at a time
///
/// # Arguments
///
/// * `graph` - Interaction network; its node order decides ties
/// * `seeds` - Seed genes, already resolved to ids present in `graph`
/// * `k` - Target number of distinct members, seeds included
///
/// # Returns
///
/// The module with ranks. Growth stops early once no outside node links into
/// the module. Seeds are always kept, so more than `k` distinct seeds yield a
/// module of exactly those seeds.
///
/// # Algorithm
///
/// Each step picks the non-member with the most neighbors inside the module.
/// Candidates are scanned in graph order with a strict `>` comparison, so the
/// earliest node wins a tie. Link counts are maintained incrementally as
/// members are added.
///
/// # Errors
///
/// [`crate::Error::InvalidArgument`] if `k` is zero
///
/// # Example
///
/// ```
/// use geneprop::{expand_module, GeneGraph};
///
/// let graph = GeneGraph::from_edges([("A", "B"), ("B", "C"), ("C", "D")]);
/// let seeds = graph.resolve_seeds(&["A"]).present;
///
/// let module = expand_module(&graph, &seeds, 3).unwrap();
///
/// let names: Vec<_> = module
///     .ranked()
///     .into_iter()
///     .map(|(node, rank)| (graph.node_name(node).unwrap(), rank))
///     .collect();
/// assert_eq!(names, vec![("A", 1), ("B", 2), ("C", 3)]);
/// ```
pub fn expand_module(graph: &GeneGraph, seeds: &[NodeId], k: usize) -> Result<Module> {
    ExpansionConfig { k }.validate()?;

    let n = graph.num_nodes();
    let mut in_module = vec![false; n];
    let mut links = vec![0_usize; n];
    let mut module = Module::default();
    let mut next_rank = 1;

    for &seed in seeds {
        if !graph.has_node(seed) {
            continue;
        }
        module.assign(seed, next_rank);
        next_rank += 1;
        absorb(graph, seed, &mut in_module, &mut links);
    }

    while module.len() < k {
        let mut best: Option<(NodeId, usize)> = None;

        for node in graph.nodes() {
            if in_module[node.index()] {
                continue;
            }
            let count = links[node.index()];
            if best.map_or(true, |(_, best_count)| count > best_count) {
                best = Some((node, count));
            }
        }

        match best {
            Some((node, count)) if count > 0 => {
                trace!(node = node.0, rank = next_rank, links = count, "module grows");
                module.assign(node, next_rank);
                next_rank += 1;
                absorb(graph, node, &mut in_module, &mut links);
            }
            _ => {
                debug!(
                    size = module.len(),
                    target = k,
                    "no candidate links into the module, stopping early"
                );
                break;
            }
        }
    }

    Ok(module)
}

/// Mark `node` as a member and credit its neighbors with one module link
fn absorb(graph: &GeneGraph, node: NodeId, in_module: &mut [bool], links: &mut [usize]) {
    if in_module[node.index()] {
        return;
    }
    in_module[node.index()] = true;
    for &neighbor in graph.neighbors(node) {
        links[neighbor.index()] += 1;
    }
}
