//! Graph storage layer
//!
//! Provides the CSR interaction network and Parquet persistence.

pub mod csr;
#[cfg(feature = "storage")]
pub mod parquet;

pub use csr::{Edge, GeneGraph, GraphBuilder, NodeId, SeedSplit};
