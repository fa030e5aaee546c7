//! Random Walk with Restart (RWR) network propagation
//!
//! Based on Köhler et al. (2008) "Walking the interactome for prioritization of
//! candidate disease genes". Power iteration over the unweighted adjacency with a
//! fixed restart distribution on the seed genes.

use crate::config::RwrConfig;
use crate::error::{Error, Result};
use crate::storage::{GeneGraph, NodeId};
use tracing::debug;

/// Relevance score per node, indexed by [`NodeId`]
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreVector {
    scores: Vec<f64>,
}

impl ScoreVector {
    /// Score of a node (`None` for ids outside the graph)
    #[must_use]
    pub fn get(&self, node: NodeId) -> Option<f64> {
        self.scores.get(node.index()).copied()
    }

    /// Number of scored nodes (equals the graph's node count)
    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// True for an empty graph
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Raw scores in node order
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.scores
    }

    /// Iterate `(node, score)` in node order
    #[allow(clippy::cast_possible_truncation)]
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        self.scores
            .iter()
            .enumerate()
            .map(|(i, &s)| (NodeId(i as u32), s))
    }

    /// Total mass
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.scores.iter().sum()
    }
}

/// Result of a propagation run with convergence diagnostics
#[derive(Debug, Clone, PartialEq)]
pub struct RwrRun {
    /// Scores after the last computed iteration
    pub scores: ScoreVector,
    /// Iterations actually performed
    pub iterations: usize,
    /// True if the L1 change dropped strictly below the tolerance
    pub converged: bool,
    /// L1 change of the last iteration (`None` if no iteration ran)
    pub final_delta: Option<f64>,
}

/// Build the restart distribution for a seed sequence
///
/// Every seed occurrence sets its node to `1 / seeds.len()`. The denominator is
/// the full sequence length, so repeated seeds leave the distribution summing to
/// less than one. Ids outside the graph are skipped.
///
/// # Errors
///
/// [`Error::InvalidArgument`] if `seeds` is empty
#[allow(clippy::cast_precision_loss)] // Seed lists >2^52 entries unlikely
pub fn restart_distribution(graph: &GeneGraph, seeds: &[NodeId]) -> Result<Vec<f64>> {
    if seeds.is_empty() {
        return Err(Error::invalid("seed list is empty"));
    }

    let seed_mass = 1.0 / seeds.len() as f64;
    let mut distribution = vec![0.0; graph.num_nodes()];

    for &seed in seeds {
        if graph.has_node(seed) {
            distribution[seed.index()] = seed_mass;
        }
    }

    Ok(distribution)
}

/// Propagate seed relevance over the network with Random Walk with Restart
///
/// # Arguments
///
/// * `graph` - Interaction network (edge weights are ignored)
/// * `seeds` - Seed genes, already resolved to ids present in `graph`
/// * `config` - Restart probability, iteration cap and tolerance
///
/// # Returns
///
/// One score per node. Reaching `max_iter` without converging is not an error;
/// the last iterate is returned.
///
/// # Algorithm
///
/// ```text
/// p(t+1)[v] = (1 - r) * Σ_{u ∈ N(v)} p(t)[u] / deg(u) + r * p0[v]
/// ```
///
/// Where:
/// - r = restart probability
/// - p0 = restart distribution over the seeds
/// - nodes with no neighbors contribute nothing to the diffusion term
///
/// # Errors
///
/// [`Error::InvalidArgument`] for an empty seed list, restart outside (0, 1),
/// or a negative tolerance.
///
/// # Example
///
/// ```
/// use geneprop::{propagate, GeneGraph, RwrConfig};
///
/// let graph = GeneGraph::from_edges([("A", "B"), ("B", "C"), ("C", "D")]);
/// let seeds = graph.resolve_seeds(&["A"]).present;
///
/// let config = RwrConfig { restart: 0.5, max_iter: 1, tol: 0.0 };
/// let scores = propagate(&graph, &seeds, &config).unwrap();
///
/// assert_eq!(scores.as_slice(), &[0.5, 0.5, 0.0, 0.0]);
/// ```
pub fn propagate(
    graph: &GeneGraph,
    seeds: &[NodeId],
    config: &RwrConfig,
) -> Result<ScoreVector> {
    propagate_run(graph, seeds, config).map(|run| run.scores)
}

/// Same as [`propagate`], also reporting iteration count and convergence
///
/// # Errors
///
/// See [`propagate`].
#[allow(clippy::cast_precision_loss)] // Degrees >2^52 unlikely
pub fn propagate_run(
    graph: &GeneGraph,
    seeds: &[NodeId],
    config: &RwrConfig,
) -> Result<RwrRun> {
    config.validate()?;
    let restart = restart_distribution(graph, seeds)?;

    let walk = 1.0 - config.restart;
    let mut scores = restart.clone();
    let mut next = vec![0.0; scores.len()];

    let mut iterations = 0;
    let mut converged = false;
    let mut final_delta = None;

    for iteration in 0..config.max_iter {
        next.fill(0.0);

        // Diffusion reads only the previous iterate
        for node in graph.nodes() {
            let neighbors = graph.neighbors(node);
            if neighbors.is_empty() {
                continue;
            }

            let spread = scores[node.index()] / neighbors.len() as f64;
            for &neighbor in neighbors {
                next[neighbor.index()] += walk * spread;
            }
        }

        for (score, &p0) in next.iter_mut().zip(&restart) {
            *score += config.restart * p0;
        }

        // Check convergence (L1 norm)
        let diff: f64 = next
            .iter()
            .zip(&scores)
            .map(|(new, old)| (new - old).abs())
            .sum();

        std::mem::swap(&mut scores, &mut next);
        iterations = iteration + 1;
        final_delta = Some(diff);

        if diff < config.tol {
            converged = true;
            break;
        }
    }

    if converged {
        debug!(iterations, delta = ?final_delta, "RWR converged");
    } else {
        debug!(iterations, delta = ?final_delta, "RWR stopped at iteration cap");
    }

    Ok(RwrRun {
        scores: ScoreVector { scores },
        iterations,
        converged,
        final_delta,
    })
}
