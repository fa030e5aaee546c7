//! geneprop: disease-gene prioritisation on interaction networks
//!
//! # Overview
//!
//! geneprop scores genes by their network proximity to a set of known disease
//! genes (seeds). Two complementary views are provided:
//!
//! - **Random Walk with Restart**: diffusion score for every gene
//! - **DIAMOnD-style expansion**: ordered, connected module grown around the seeds
//!
//! # Quick Start
//!
//! ```
//! use geneprop::{expand_module, propagate, GeneGraph, RwrConfig};
//!
//! let graph = GeneGraph::from_edges([
//!     ("TP53", "MDM2"),
//!     ("MDM2", "CDKN2A"),
//!     ("TP53", "ATM"),
//! ]);
//!
//! // Drop seeds that are not in the network
//! let split = graph.resolve_seeds(&["TP53", "NOT_A_GENE"]);
//! assert_eq!(split.missing, vec!["NOT_A_GENE".to_string()]);
//!
//! let scores = propagate(&graph, &split.present, &RwrConfig::default()).unwrap();
//! assert_eq!(scores.len(), 4);
//!
//! let module = expand_module(&graph, &split.present, 3).unwrap();
//! assert_eq!(module.len(), 3);
//! ```
//!
//! # Architecture
//!
//! - **Storage**: insertion-ordered symmetric CSR graph, Parquet persistence
//! - **Algorithms**: RWR (`propagate`) and module expansion (`expand_module`)
//! - **I/O**: edge-list and seed-file loaders, kept outside the algorithms
//! - **Report**: ranked, name-resolved views of the results

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod algorithms;
pub mod config;
pub mod error;
pub mod io;
pub mod report;
pub mod storage;

// Re-export core types
pub use algorithms::{
    expand_module, propagate, propagate_run, restart_distribution, Module, RwrRun, ScoreVector,
};
pub use config::{ExpansionConfig, RwrConfig};
pub use error::{Error, Result};
pub use storage::{Edge, GeneGraph, GraphBuilder, NodeId, SeedSplit};
