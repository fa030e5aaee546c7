//! Parquet I/O for graph persistence
//!
//! # Format
//!
//! Graphs are stored as two Parquet files:
//! - `{path}_nodes.parquet`: (`node_id`, name), one row per node in iteration order
//! - `{path}_edges.parquet`: (source, target, weight), one row per undirected
//!   edge in insertion order; `weight` is null for unweighted edges
//!
//! Reloading replays nodes then edges through [`GraphBuilder`], so node ids,
//! neighbor order and weights come back identical.

use super::{GeneGraph, GraphBuilder, NodeId};
use anyhow::{bail, Context, Result};
use arrow::array::{Array, ArrayRef, Float32Array, StringArray, UInt32Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::arrow_writer::ArrowWriter;
use parquet::file::properties::WriterProperties;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

impl GeneGraph {
    /// Write graph to Parquet files
    ///
    /// Creates `{path}_nodes.parquet` and `{path}_edges.parquet`.
    ///
    /// # Errors
    ///
    /// Returns error if file I/O fails or Arrow conversion fails
    #[allow(clippy::unused_async)] // Async API for future I/O operations
    pub async fn write_parquet<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let base_path = path.as_ref();

        self.write_nodes_parquet(base_path)?;
        self.write_edges_parquet(base_path)?;

        Ok(())
    }

    /// Read graph from Parquet files
    ///
    /// # Errors
    ///
    /// Returns error if files don't exist, Arrow conversion fails, or an edge
    /// references an unknown node id
    #[allow(clippy::unused_async)] // Async API for future I/O operations
    pub async fn read_parquet<P: AsRef<Path>>(path: P) -> Result<Self> {
        let base_path = path.as_ref();

        let mut nodes = Self::read_nodes_parquet(base_path)?;
        nodes.sort_by_key(|(id, _)| *id);

        let mut builder = GraphBuilder::new();
        for (id, name) in &nodes {
            if builder.add_node(name) != *id {
                bail!("Node table is not dense: {name} stored as {}", id.0);
            }
        }

        for (src, dst, weight) in Self::read_edges_parquet(base_path)? {
            if src.index() >= builder.num_nodes() || dst.index() >= builder.num_nodes() {
                bail!("Edge {} - {} references an unknown node", src.0, dst.0);
            }
            builder.connect(src, dst, weight);
        }

        Ok(builder.build())
    }

    fn write_nodes_parquet(&self, base_path: &Path) -> Result<()> {
        let nodes_path = format!("{}_nodes.parquet", base_path.display());

        let mut node_ids = Vec::with_capacity(self.num_nodes());
        let mut names = Vec::with_capacity(self.num_nodes());
        for node in self.nodes() {
            node_ids.push(node.0);
            names.push(self.node_name(node).unwrap_or_default());
        }

        let schema = Arc::new(Schema::new(vec![
            Field::new("node_id", DataType::UInt32, false),
            Field::new("name", DataType::Utf8, false),
        ]));

        let columns: Vec<ArrayRef> = vec![
            Arc::new(UInt32Array::from(node_ids)),
            Arc::new(StringArray::from(names)),
        ];

        write_batch(&nodes_path, schema, columns)
    }

    fn write_edges_parquet(&self, base_path: &Path) -> Result<()> {
        let edges_path = format!("{}_edges.parquet", base_path.display());

        let sources: Vec<u32> = self.edges().iter().map(|e| e.source.0).collect();
        let targets: Vec<u32> = self.edges().iter().map(|e| e.target.0).collect();
        let weights: Vec<Option<f32>> = self.edges().iter().map(|e| e.weight).collect();

        let schema = Arc::new(Schema::new(vec![
            Field::new("source", DataType::UInt32, false),
            Field::new("target", DataType::UInt32, false),
            Field::new("weight", DataType::Float32, true),
        ]));

        let columns: Vec<ArrayRef> = vec![
            Arc::new(UInt32Array::from(sources)),
            Arc::new(UInt32Array::from(targets)),
            Arc::new(Float32Array::from(weights)),
        ];

        write_batch(&edges_path, schema, columns)
    }

    fn read_nodes_parquet(base_path: &Path) -> Result<Vec<(NodeId, String)>> {
        let nodes_path = format!("{}_nodes.parquet", base_path.display());
        let mut nodes = Vec::new();

        for batch in read_batches(&nodes_path)? {
            let node_ids = batch
                .column(0)
                .as_any()
                .downcast_ref::<UInt32Array>()
                .context("Invalid node_id column type")?;

            let names = batch
                .column(1)
                .as_any()
                .downcast_ref::<StringArray>()
                .context("Invalid name column type")?;

            for i in 0..batch.num_rows() {
                nodes.push((NodeId(node_ids.value(i)), names.value(i).to_string()));
            }
        }

        Ok(nodes)
    }

    fn read_edges_parquet(base_path: &Path) -> Result<Vec<(NodeId, NodeId, Option<f32>)>> {
        let edges_path = format!("{}_edges.parquet", base_path.display());
        let mut edges = Vec::new();

        for batch in read_batches(&edges_path)? {
            let sources = batch
                .column(0)
                .as_any()
                .downcast_ref::<UInt32Array>()
                .context("Invalid source column type")?;

            let targets = batch
                .column(1)
                .as_any()
                .downcast_ref::<UInt32Array>()
                .context("Invalid target column type")?;

            let weights = batch
                .column(2)
                .as_any()
                .downcast_ref::<Float32Array>()
                .context("Invalid weight column type")?;

            for i in 0..batch.num_rows() {
                let weight = (!weights.is_null(i)).then(|| weights.value(i));
                edges.push((NodeId(sources.value(i)), NodeId(targets.value(i)), weight));
            }
        }

        Ok(edges)
    }
}

/// Write a single ZSTD-compressed record batch
fn write_batch(path: &str, schema: Arc<Schema>, columns: Vec<ArrayRef>) -> Result<()> {
    let batch = RecordBatch::try_new(schema.clone(), columns)
        .with_context(|| format!("Failed to create RecordBatch for {path}"))?;

    let file = File::create(path).with_context(|| format!("Failed to create {path}"))?;

    let props = WriterProperties::builder()
        .set_compression(parquet::basic::Compression::ZSTD(
            parquet::basic::ZstdLevel::try_new(3)?,
        ))
        .build();

    let mut writer = ArrowWriter::try_new(file, schema, Some(props))?;
    writer.write(&batch)?;
    writer.close()?;

    Ok(())
}

fn read_batches(path: &str) -> Result<Vec<RecordBatch>> {
    let file = File::open(path).with_context(|| format!("Failed to open {path}"))?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    reader
        .collect::<std::result::Result<Vec<_>, _>>()
        .with_context(|| format!("Failed to read {path}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_parquet_roundtrip_weighted() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("string_network");

        let graph = GeneGraph::from_weighted_edges([
            ("TP53", "MDM2", 0.999),
            ("MDM2", "CDKN2A", 0.71),
            ("TP53", "ATM", 0.93),
        ]);

        graph.write_parquet(&path).await.unwrap();
        let loaded = GeneGraph::read_parquet(&path).await.unwrap();

        assert_eq!(loaded.num_nodes(), graph.num_nodes());
        assert_eq!(loaded.num_edges(), graph.num_edges());
        assert_eq!(loaded.edges(), graph.edges());
        assert_eq!(loaded.csr_components(), graph.csr_components());
        assert!(loaded.is_weighted());

        let tp53 = loaded.node_id("TP53").unwrap();
        let atm = loaded.node_id("ATM").unwrap();
        assert_eq!(loaded.edge_weight(atm, tp53), Some(Some(0.93)));
    }

    #[tokio::test]
    async fn test_parquet_roundtrip_unweighted_keeps_isolated_nodes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plain");

        let mut builder = GraphBuilder::new();
        builder.add_edge("A", "B", None);
        builder.add_node("ORPHAN");
        let graph = builder.build();

        graph.write_parquet(&path).await.unwrap();
        let loaded = GeneGraph::read_parquet(&path).await.unwrap();

        assert!(!loaded.is_weighted());
        assert_eq!(loaded.node_id("ORPHAN"), Some(NodeId(2)));
        assert_eq!(loaded.degree(NodeId(2)), 0);
    }

    #[tokio::test]
    async fn test_empty_graph_parquet() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty_graph");

        let graph = GeneGraph::default();
        graph.write_parquet(&path).await.unwrap();

        let loaded = GeneGraph::read_parquet(&path).await.unwrap();
        assert_eq!(loaded.num_nodes(), 0);
        assert_eq!(loaded.num_edges(), 0);
    }

    #[tokio::test]
    async fn test_missing_files_error() {
        let dir = tempdir().unwrap();
        let result = GeneGraph::read_parquet(dir.path().join("nope")).await;
        assert!(result.is_err());
    }
}
