//! CSR (Compressed Sparse Row) interaction network
//!
//! Undirected gene graph stored as a symmetric CSR adjacency. Every undirected
//! edge `u - v` appears twice in the CSR arrays (`u → v` and `v → u`), except
//! self-loops which appear once.
//!
//! # CSR Format
//!
//! ```text
//! Edges (insertion order): TP53 - MDM2, MDM2 - CDKN2A
//!
//! Nodes (first appearance): TP53 = 0, MDM2 = 1, CDKN2A = 2
//!
//! CSR:
//!   row_offsets: [0, 1, 3, 4]   // TP53: [0..1), MDM2: [1..3), CDKN2A: [3..4)
//!   col_indices: [1, 0, 2, 1]
//! ```
//!
//! Node ids are dense and assigned in first-appearance order. That order is the
//! graph's iteration order and never changes after [`GraphBuilder::build`];
//! module expansion breaks ties on it.

use std::collections::HashMap;

/// Node identifier (zero-indexed, insertion order)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Position of the node in per-node vectors
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Undirected edge as it was first inserted
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// Endpoint given first
    pub source: NodeId,
    /// Endpoint given second
    pub target: NodeId,
    /// Optional confidence/weight column (not used by the algorithms)
    pub weight: Option<f32>,
}

/// Seed names split by graph membership
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedSplit {
    /// Seeds found in the graph, input order, duplicates kept
    pub present: Vec<NodeId>,
    /// Seeds not found in the graph, input order
    pub missing: Vec<String>,
}

/// Key for an undirected edge: smaller id first
fn edge_key(a: NodeId, b: NodeId) -> (u32, u32) {
    if a <= b {
        (a.0, b.0)
    } else {
        (b.0, a.0)
    }
}

/// Incremental builder for [`GeneGraph`]
///
/// Re-adding an existing pair (in either direction) keeps the original edge
/// and replaces its weight.
///
/// # Example
///
/// ```
/// use geneprop::GraphBuilder;
///
/// let mut builder = GraphBuilder::new();
/// builder.add_edge("TP53", "MDM2", Some(0.9));
/// builder.add_edge("MDM2", "TP53", Some(0.7)); // same edge, weight replaced
///
/// let graph = builder.build();
/// assert_eq!(graph.num_edges(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    names: Vec<String>,
    index: HashMap<String, NodeId>,
    adjacency: Vec<Vec<NodeId>>,
    edges: Vec<Edge>,
    edge_slots: HashMap<(u32, u32), usize>,
}

impl GraphBuilder {
    /// Create new empty builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node, returning its id (existing id if already present)
    #[allow(clippy::cast_possible_truncation)] // Graphs >4B nodes not supported
    pub fn add_node(&mut self, name: &str) -> NodeId {
        if let Some(&id) = self.index.get(name) {
            return id;
        }

        let id = NodeId(self.names.len() as u32);
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), id);
        self.adjacency.push(Vec::new());
        id
    }

    /// Add an undirected edge, registering unseen endpoints in order
    pub fn add_edge(&mut self, source: &str, target: &str, weight: Option<f32>) {
        let src = self.add_node(source);
        let dst = self.add_node(target);
        self.connect(src, dst, weight);
    }

    /// Add an undirected edge between two already-registered nodes
    pub(crate) fn connect(&mut self, src: NodeId, dst: NodeId, weight: Option<f32>) {
        if let Some(&slot) = self.edge_slots.get(&edge_key(src, dst)) {
            self.edges[slot].weight = weight;
            return;
        }

        self.edge_slots.insert(edge_key(src, dst), self.edges.len());
        self.edges.push(Edge {
            source: src,
            target: dst,
            weight,
        });

        self.adjacency[src.index()].push(dst);
        if src != dst {
            self.adjacency[dst.index()].push(src);
        }
    }

    /// Number of nodes registered so far
    #[must_use]
    pub fn num_nodes(&self) -> usize {
        self.names.len()
    }

    /// Freeze into an immutable CSR graph
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // Graphs with >4B edges not supported
    pub fn build(self) -> GeneGraph {
        let mut row_offsets = Vec::with_capacity(self.adjacency.len() + 1);
        let mut col_indices = Vec::new();

        let mut offset = 0_u32;
        row_offsets.push(offset);

        for neighbors in &self.adjacency {
            offset += neighbors.len() as u32;
            row_offsets.push(offset);
            col_indices.extend_from_slice(neighbors);
        }

        GeneGraph {
            row_offsets,
            col_indices,
            names: self.names,
            index: self.index,
            edges: self.edges,
            edge_slots: self.edge_slots,
        }
    }
}

/// Immutable undirected gene interaction graph
///
/// Optimized for:
/// - O(1) access to a node's neighbor slice (CSR indexing)
/// - Stable node iteration order (insertion order)
/// - Shared read-only use across threads (`Send + Sync`)
///
/// # Example
///
/// ```
/// use geneprop::GeneGraph;
///
/// let graph = GeneGraph::from_edges([("A", "B"), ("B", "C"), ("C", "D")]);
///
/// let b = graph.node_id("B").unwrap();
/// assert_eq!(graph.degree(b), 2);
/// assert_eq!(graph.num_nodes(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct GeneGraph {
    /// node i's neighbors live at `col_indices[row_offsets[i]..row_offsets[i + 1]]`
    row_offsets: Vec<u32>,

    /// Neighbor ids, both directions of every edge
    col_indices: Vec<NodeId>,

    /// Node names indexed by id
    names: Vec<String>,

    /// Name → id lookup
    index: HashMap<String, NodeId>,

    /// Undirected edges in insertion order
    edges: Vec<Edge>,

    /// Undirected edge key → position in `edges`
    edge_slots: HashMap<(u32, u32), usize>,
}

impl GeneGraph {
    /// Build an unweighted graph from name pairs
    pub fn from_edges<I, S>(edges: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let mut builder = GraphBuilder::new();
        for (u, v) in edges {
            builder.add_edge(u.as_ref(), v.as_ref(), None);
        }
        builder.build()
    }

    /// Build a weighted graph from `(source, target, weight)` triples
    pub fn from_weighted_edges<I, S>(edges: I) -> Self
    where
        I: IntoIterator<Item = (S, S, f32)>,
        S: AsRef<str>,
    {
        let mut builder = GraphBuilder::new();
        for (u, v, w) in edges {
            builder.add_edge(u.as_ref(), v.as_ref(), Some(w));
        }
        builder.build()
    }

    /// Get number of nodes
    #[must_use]
    pub fn num_nodes(&self) -> usize {
        self.names.len()
    }

    /// Get number of undirected edges
    #[must_use]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// True if the graph has no nodes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// True if any edge carries a weight
    #[must_use]
    pub fn is_weighted(&self) -> bool {
        self.edges.iter().any(|e| e.weight.is_some())
    }

    /// Iterate node ids in insertion order
    #[allow(clippy::cast_possible_truncation)]
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.names.len()).map(|i| NodeId(i as u32))
    }

    /// True if `node` is a valid id for this graph
    #[must_use]
    pub fn has_node(&self, node: NodeId) -> bool {
        node.index() < self.names.len()
    }

    /// Look up a node by name
    #[must_use]
    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    /// True if a node with this name exists
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Get node name
    #[must_use]
    pub fn node_name(&self, node: NodeId) -> Option<&str> {
        self.names.get(node.index()).map(String::as_str)
    }

    /// Neighbors of a node (empty slice for unknown ids)
    #[must_use]
    pub fn neighbors(&self, node: NodeId) -> &[NodeId] {
        if !self.has_node(node) {
            return &[];
        }

        let start = self.row_offsets[node.index()] as usize;
        let end = self.row_offsets[node.index() + 1] as usize;
        &self.col_indices[start..end]
    }

    /// Number of distinct neighbors
    #[must_use]
    pub fn degree(&self, node: NodeId) -> usize {
        self.neighbors(node).len()
    }

    /// Undirected edges in insertion order
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Weight of the edge `u - v` in either direction.
    ///
    /// Outer `None`: no such edge. Inner `None`: edge is unweighted.
    #[must_use]
    pub fn edge_weight(&self, u: NodeId, v: NodeId) -> Option<Option<f32>> {
        self.edge_slots
            .get(&edge_key(u, v))
            .map(|&slot| self.edges[slot].weight)
    }

    /// Split raw seed names into those present in the graph and those missing
    ///
    /// # Example
    ///
    /// ```
    /// use geneprop::GeneGraph;
    ///
    /// let graph = GeneGraph::from_edges([("A", "B")]);
    /// let split = graph.resolve_seeds(&["A", "X", "A"]);
    ///
    /// assert_eq!(split.present.len(), 2);
    /// assert_eq!(split.missing, vec!["X".to_string()]);
    /// ```
    pub fn resolve_seeds<S: AsRef<str>>(&self, seeds: &[S]) -> SeedSplit {
        let mut split = SeedSplit::default();
        for seed in seeds {
            match self.node_id(seed.as_ref()) {
                Some(id) => split.present.push(id),
                None => split.missing.push(seed.as_ref().to_string()),
            }
        }
        split
    }

    /// Get CSR components (row offsets, neighbor ids)
    #[must_use]
    pub fn csr_components(&self) -> (&[u32], &[NodeId]) {
        (&self.row_offsets, &self.col_indices)
    }
}

impl Default for GeneGraph {
    fn default() -> Self {
        GraphBuilder::new().build()
    }
}
