//! Network and seed file loaders
//!
//! # Network formats
//!
//! - STRING export with a tab-separated header containing `protein1_hugo` and
//!   `protein2_hugo`: those two columns are read, everything else is ignored.
//! - Headerless edge list, tab- or whitespace-delimited (sniffed from the first
//!   non-empty line). Two columns give an unweighted network, three or more
//!   take the third column as an `f32` weight. The first data row fixes the
//!   choice: a later row that adds or lacks the weight column is a parse error.
//!   Trailing empty tab fields are ignored, so `A\tB\t` is a two-column row.
//!
//! # Seed format
//!
//! One gene symbol per line. Surrounding whitespace is trimmed and blank lines
//! are dropped; order and duplicates are kept.

use crate::error::{Error, Result};
use crate::storage::{GeneGraph, GraphBuilder};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Header columns of the STRING network export mapped to HUGO symbols
pub const STRING_SOURCE_COLUMN: &str = "protein1_hugo";
/// See [`STRING_SOURCE_COLUMN`]
pub const STRING_TARGET_COLUMN: &str = "protein2_hugo";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delimiter {
    Tab,
    Whitespace,
}

impl Delimiter {
    fn sniff(line: &str) -> Self {
        if line.contains('\t') {
            Self::Tab
        } else {
            Self::Whitespace
        }
    }

    fn split(self, line: &str) -> Vec<&str> {
        match self {
            Self::Tab => {
                let mut fields: Vec<&str> = line.split('\t').map(str::trim).collect();
                while fields.last().is_some_and(|f| f.is_empty()) {
                    fields.pop();
                }
                fields
            }
            Self::Whitespace => line.split_whitespace().collect(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Layout {
    /// STRING header: read the two named columns by position
    StringHeader { source: usize, target: usize },
    /// Headerless edge list
    EdgeList { delimiter: Delimiter, weighted: bool },
}

impl Layout {
    /// Decide the layout from the first non-empty line. Returns the layout and
    /// whether that line holds data.
    fn detect(first: &str) -> (Self, bool) {
        let header: Vec<&str> = Delimiter::Tab.split(first);
        let source = header.iter().position(|c| *c == STRING_SOURCE_COLUMN);
        let target = header.iter().position(|c| *c == STRING_TARGET_COLUMN);

        if let (Some(source), Some(target)) = (source, target) {
            return (Self::StringHeader { source, target }, false);
        }

        let delimiter = Delimiter::sniff(first);
        let weighted = delimiter.split(first).len() >= 3;
        (
            Self::EdgeList {
                delimiter,
                weighted,
            },
            true,
        )
    }

    fn add_row(self, builder: &mut GraphBuilder, line: &str, line_no: usize) -> Result<()> {
        let parse_error = |message: String| Error::Parse {
            line: line_no,
            message,
        };

        match self {
            Self::StringHeader { source, target } => {
                let fields = Delimiter::Tab.split(line);
                let (Some(u), Some(v)) = (fields.get(source), fields.get(target)) else {
                    return Err(parse_error(format!(
                        "expected at least {} tab-separated columns, found {}",
                        source.max(target) + 1,
                        fields.len()
                    )));
                };
                builder.add_edge(u, v, None);
            }
            Self::EdgeList {
                delimiter,
                weighted,
            } => {
                let fields = delimiter.split(line);
                if fields.len() < 2 {
                    return Err(parse_error(format!(
                        "expected at least 2 columns, found {}",
                        fields.len()
                    )));
                }

                let weight = if weighted {
                    let raw = fields
                        .get(2)
                        .ok_or_else(|| parse_error("missing weight column".to_string()))?;
                    let value = raw
                        .parse::<f32>()
                        .map_err(|e| parse_error(format!("invalid weight {raw:?}: {e}")))?;
                    Some(value)
                } else if fields.len() > 2 {
                    return Err(parse_error(format!(
                        "expected 2 columns as in the first row, found {}",
                        fields.len()
                    )));
                } else {
                    None
                };

                builder.add_edge(fields[0], fields[1], weight);
            }
        }

        Ok(())
    }
}

/// Parse an interaction network from any buffered reader
///
/// # Errors
///
/// [`Error::Parse`] for malformed rows, [`Error::Read`] if the reader fails.
///
/// # Example
///
/// ```
/// use geneprop::io::parse_network;
///
/// let data = "TP53\tMDM2\t0.99\nMDM2\tCDKN2A\t0.7\n";
/// let graph = parse_network(data.as_bytes()).unwrap();
///
/// assert_eq!(graph.num_nodes(), 3);
/// assert!(graph.is_weighted());
/// ```
pub fn parse_network<R: BufRead>(reader: R) -> Result<GeneGraph> {
    let mut builder = GraphBuilder::new();
    let mut layout: Option<Layout> = None;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }

        let current = match layout {
            Some(current) => current,
            None => {
                let (detected, is_data) = Layout::detect(&line);
                layout = Some(detected);
                if !is_data {
                    continue;
                }
                detected
            }
        };

        current.add_row(&mut builder, &line, line_no)?;
    }

    let graph = builder.build();
    debug!(
        nodes = graph.num_nodes(),
        edges = graph.num_edges(),
        weighted = graph.is_weighted(),
        "network parsed"
    );

    Ok(graph)
}

/// Load an interaction network from a file
///
/// # Errors
///
/// [`Error::Io`] if the file cannot be opened, otherwise as [`parse_network`].
pub fn load_network<P: AsRef<Path>>(path: P) -> Result<GeneGraph> {
    parse_network(open(path.as_ref())?)
}

/// Parse a seed list from any buffered reader
///
/// # Errors
///
/// [`Error::Read`] if the reader fails
pub fn parse_seeds<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut seeds = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let gene = line.trim();
        if !gene.is_empty() {
            seeds.push(gene.to_string());
        }
    }
    Ok(seeds)
}

/// Load a seed list from a file
///
/// # Errors
///
/// [`Error::Io`] if the file cannot be opened, [`Error::Read`] on read failure
pub fn load_seeds<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    parse_seeds(open(path.as_ref())?)
}

fn open(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_header_columns() {
        let data = "protein1\tprotein2\tprotein1_hugo\tprotein2_hugo\tcombined_score\n\
                    9606.ENSP1\t9606.ENSP2\tTP53\tMDM2\t999\n\
                    9606.ENSP2\t9606.ENSP3\tMDM2\tCDKN2A\t700\n";

        let graph = parse_network(data.as_bytes()).unwrap();

        assert_eq!(graph.num_nodes(), 3);
        assert_eq!(graph.num_edges(), 2);
        assert!(graph.contains("TP53"));
        assert!(!graph.contains("9606.ENSP1"));
        assert!(!graph.is_weighted());
    }

    #[test]
    fn test_tab_unweighted() {
        let graph = parse_network("A\tB\nB\tC\n".as_bytes()).unwrap();

        assert_eq!(graph.num_edges(), 2);
        assert!(!graph.is_weighted());
    }

    #[test]
    fn test_whitespace_weighted() {
        let data = "A   B 0.5\n\nB C   0.25\n";
        let graph = parse_network(data.as_bytes()).unwrap();

        let b = graph.node_id("B").unwrap();
        let c = graph.node_id("C").unwrap();
        assert_eq!(graph.num_edges(), 2);
        assert_eq!(graph.edge_weight(b, c), Some(Some(0.25)));
    }

    #[test]
    fn test_node_order_follows_file() {
        let graph = parse_network("Z A\nM Z\n".as_bytes()).unwrap();
        let names: Vec<_> = graph.nodes().filter_map(|n| graph.node_name(n)).collect();
        assert_eq!(names, vec!["Z", "A", "M"]);
    }

    #[test]
    fn test_bad_weight_reports_line() {
        let data = "A\tB\t1.0\nB\tC\thigh\n";
        let err = parse_network(data.as_bytes()).unwrap_err();

        assert!(matches!(err, Error::Parse { line: 2, .. }), "{err}");
    }

    #[test]
    fn test_single_column_row_rejected() {
        let err = parse_network("A B\nLONELY\n".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }));
    }

    #[test]
    fn test_trailing_tab_is_not_a_weight_column() {
        let graph = parse_network("A\tB\t\nB\tC\t\n".as_bytes()).unwrap();

        assert_eq!(graph.num_edges(), 2);
        assert!(!graph.is_weighted());
    }

    #[test]
    fn test_weight_column_appearing_late_rejected() {
        let err = parse_network("A B\nB C 0.5\n".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }), "{err}");
    }

    #[test]
    fn test_weight_column_missing_late_rejected() {
        let err = parse_network("A\tB\t0.5\nB\tC\n".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }), "{err}");
    }

    #[test]
    fn test_short_string_header_row_rejected() {
        let data = "protein1\tprotein2\tprotein1_hugo\tprotein2_hugo\n\
                    9606.ENSP1\t9606.ENSP2\tTP53\tMDM2\n\
                    9606.ENSP2\t9606.ENSP3\tMDM2\n";

        let err = parse_network(data.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 3, .. }), "{err}");
    }

    #[test]
    fn test_empty_input() {
        let graph = parse_network("".as_bytes()).unwrap();
        assert!(graph.is_empty());
    }

    #[test]
    fn test_seeds_trimmed_and_ordered() {
        let seeds = parse_seeds("  TP53\n\nBRCA1\r\nTP53\n   \n".as_bytes()).unwrap();
        assert_eq!(seeds, vec!["TP53", "BRCA1", "TP53"]);
    }

    #[test]
    fn test_missing_file() {
        let err = load_seeds("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
