//! Node-link JSON codec.
//!
//! The document layout is fixed:
//!
//! ```json
//! {"directed": true, "multigraph": false, "graph": {},
//!  "nodes": [{"label": "Node 0", "id": 0}],
//!  "links": [{"weight": 1.5, "source": 0, "target": 1}]}
//! ```
//!
//! The edge list lives under `links`; a document that uses any other key is
//! rejected rather than silently loaded without edges.

use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};
use tracing::{Span, debug, field, info, instrument};

use crate::{
    error::{GraphError, Result},
    graph::{Graph, NodeId},
    value::Attributes,
};

const NODE_KEYS: [&str; 1] = ["id"];
const LINK_KEYS: [&str; 2] = ["source", "target"];

/// Serializable mirror of a node-link document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeLinkData {
    /// Whether links are directed.
    #[serde(default)]
    pub directed: bool,
    /// Whether parallel links are allowed. Always `false` when written.
    #[serde(default)]
    pub multigraph: bool,
    /// Graph-level attributes.
    #[serde(default)]
    pub graph: Attributes,
    /// Node records.
    pub nodes: Vec<NodeRecord>,
    /// Link records.
    pub links: Vec<LinkRecord>,
}

/// A node entry: its attributes followed by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Node attributes.
    #[serde(flatten)]
    pub attributes: Attributes,
    /// Node identifier.
    pub id: NodeId,
}

/// A link entry: its attributes followed by `source` and `target`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkRecord {
    /// Link attributes.
    #[serde(flatten)]
    pub attributes: Attributes,
    /// Source node identifier.
    pub source: NodeId,
    /// Target node identifier.
    pub target: NodeId,
}

impl NodeLinkData {
    /// Captures `graph` as a node-link document.
    ///
    /// Attributes named like a record's structural keys (`id` on nodes,
    /// `source`/`target` on links) are left out so the written ids win.
    #[must_use]
    pub fn from_graph(graph: &Graph) -> Self {
        Self {
            directed: graph.is_directed(),
            multigraph: false,
            graph: graph.attributes().clone(),
            nodes: graph
                .nodes()
                .map(|node| NodeRecord {
                    attributes: without(&node.attributes, &NODE_KEYS),
                    id: node.id,
                })
                .collect(),
            links: graph
                .edges()
                .map(|edge| LinkRecord {
                    attributes: without(&edge.attributes, &LINK_KEYS),
                    source: edge.source,
                    target: edge.target,
                })
                .collect(),
        }
    }

    /// Rebuilds a [`Graph`] from the document.
    ///
    /// # Errors
    /// Returns [`GraphError::UnsupportedMultigraph`] for multigraph documents,
    /// [`GraphError::DuplicateNode`] for repeated ids and
    /// [`GraphError::UnknownEndpoint`] for links to undeclared nodes.
    pub fn into_graph(self) -> Result<Graph> {
        if self.multigraph {
            return Err(GraphError::UnsupportedMultigraph);
        }
        let mut graph = Graph::new(self.directed);
        *graph.attributes_mut() = self.graph;
        for node in self.nodes {
            graph.add_node(node.id, node.attributes)?;
        }
        for link in self.links {
            graph.add_edge(link.source, link.target, link.attributes)?;
        }
        Ok(graph)
    }
}

fn without(attributes: &Attributes, structural: &[&str]) -> Attributes {
    attributes
        .iter()
        .filter(|(key, _)| !structural.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Serializes `graph` as pretty-printed node-link JSON.
///
/// # Errors
/// Returns [`GraphError::Json`] if encoding fails.
///
/// # Examples
/// ```
/// use graphdash_core::{Graph, node_link};
///
/// let text = node_link::to_string(&Graph::new(true))?;
/// assert!(text.contains("\"links\": []"));
/// let graph = node_link::from_str(&text)?;
/// assert!(graph.is_directed());
/// # Ok::<(), graphdash_core::GraphError>(())
/// ```
pub fn to_string(graph: &Graph) -> Result<String> {
    serde_json::to_string_pretty(&NodeLinkData::from_graph(graph))
        .map_err(|source| GraphError::Json { source })
}

/// Parses node-link JSON into a [`Graph`].
///
/// # Errors
/// Returns [`GraphError::Json`] for malformed documents and the structural
/// errors of [`NodeLinkData::into_graph`].
pub fn from_str(text: &str) -> Result<Graph> {
    serde_json::from_str::<NodeLinkData>(text)
        .map_err(|source| GraphError::Json { source })?
        .into_graph()
}

/// Writes `graph` to `path`, creating missing parent directories.
///
/// # Errors
/// Returns [`GraphError::Io`] when the directory or file cannot be written
/// and [`GraphError::Json`] if encoding fails.
#[instrument(name = "node_link.write", err, skip(graph), fields(path = field::Empty))]
pub fn write_graph_file(path: &Path, graph: &Graph) -> Result<()> {
    Span::current().record("path", field::display(path.display()));
    let io_error = |source| GraphError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &NodeLinkData::from_graph(graph))
        .map_err(|source| GraphError::Json { source })?;
    writer.flush().map_err(io_error)?;
    debug!(nodes = graph.node_count(), edges = graph.edge_count(), "graph written");
    Ok(())
}

/// Loads a graph from a node-link JSON file.
///
/// # Errors
/// Returns [`GraphError::Io`] when the file cannot be opened,
/// [`GraphError::Json`] when it is not a node-link document, and the
/// structural errors of [`NodeLinkData::into_graph`].
#[instrument(name = "node_link.read", err, fields(path = field::Empty))]
pub fn read_graph_file(path: &Path) -> Result<Graph> {
    Span::current().record("path", field::display(path.display()));
    let file = File::open(path).map_err(|source| GraphError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let data: NodeLinkData = serde_json::from_reader(BufReader::new(file))
        .map_err(|source| GraphError::Json { source })?;
    let graph = data.into_graph()?;
    info!(summary = %graph.summary(), "graph loaded");
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    use crate::value::AttrValue;

    #[rstest]
    fn node_attributes_precede_id() -> Result<()> {
        let mut graph = Graph::new(true);
        graph.add_node(
            NodeId::new(0),
            Attributes::from([("label".to_owned(), AttrValue::from("Node 0"))]),
        )?;
        let text = serde_json::to_string(&NodeLinkData::from_graph(&graph))
            .map_err(|source| GraphError::Json { source })?;
        assert_eq!(
            text,
            r#"{"directed":true,"multigraph":false,"graph":{},"nodes":[{"label":"Node 0","id":0}],"links":[]}"#
        );
        Ok(())
    }

    #[rstest]
    fn structural_attribute_names_do_not_shadow_ids() -> Result<()> {
        let mut graph = Graph::new(true);
        graph.add_node(
            NodeId::new(0),
            Attributes::from([
                ("id".to_owned(), AttrValue::from("alpha")),
                ("label".to_owned(), AttrValue::from("Node 0")),
            ]),
        )?;
        graph.add_node(NodeId::new(1), Attributes::new())?;
        graph.add_edge(
            NodeId::new(0),
            NodeId::new(1),
            Attributes::from([
                ("source".to_owned(), AttrValue::from("sensor")),
                ("target".to_owned(), AttrValue::Int(7)),
                ("weight".to_owned(), AttrValue::Float(1.5)),
            ]),
        )?;

        let text = to_string(&graph)?;
        assert_eq!(text.matches("\"id\"").count(), 2);
        let loaded = from_str(&text)?;

        let node = loaded.node(NodeId::new(0)).expect("node 0 survives");
        assert_eq!(node.attributes.get("id"), None);
        assert_eq!(node.attributes.get("label"), Some(&AttrValue::from("Node 0")));
        let edge = loaded
            .edge(NodeId::new(0), NodeId::new(1))
            .expect("edge survives");
        assert_eq!(
            edge.attributes,
            Attributes::from([("weight".to_owned(), AttrValue::Float(1.5))])
        );
        Ok(())
    }

    #[rstest]
    #[case::edges_key(r#"{"nodes": [], "edges": []}"#)]
    #[case::not_json("nodes: []")]
    #[case::null_attribute(r#"{"nodes": [{"id": 0, "x": null}], "links": []}"#)]
    fn from_str_rejects_malformed_documents(#[case] text: &str) {
        let err = from_str(text).expect_err("document must be rejected");
        assert!(matches!(err, GraphError::Json { .. }));
    }

    #[rstest]
    fn from_str_rejects_multigraph() {
        let err = from_str(r#"{"multigraph": true, "nodes": [], "links": []}"#)
            .expect_err("multigraph must be rejected");
        assert!(matches!(err, GraphError::UnsupportedMultigraph));
    }

    #[rstest]
    fn from_str_rejects_dangling_links() {
        let err = from_str(r#"{"nodes": [{"id": 0}], "links": [{"source": 0, "target": 3}]}"#)
            .expect_err("dangling link must be rejected");
        assert!(matches!(
            err,
            GraphError::UnknownEndpoint { missing, .. } if missing == NodeId::new(3)
        ));
    }

    #[rstest]
    fn from_str_defaults_optional_fields() -> Result<()> {
        let graph = from_str(
            r#"{"nodes": [{"id": 1, "kind": "x"}, {"id": 2}], "links": [{"source": 1, "target": 2, "w": 0.5}]}"#,
        )?;
        assert!(!graph.is_directed());
        assert!(graph.attributes().is_empty());
        assert_eq!(graph.node_count(), 2);
        let edge = graph.edge(NodeId::new(2), NodeId::new(1)).expect("undirected lookup");
        assert_eq!(edge.attributes.get("w"), Some(&AttrValue::Float(0.5)));
        Ok(())
    }
}
