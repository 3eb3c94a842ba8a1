//! In-memory attributed graph.
//!
//! A [`Graph`] stores its nodes and edges in a `petgraph` [`DiGraph`]. Node
//! and edge indices are never removed, so index order is insertion order and
//! serialization is stable. Undirected graphs keep each edge in the
//! orientation it was first added with and look it up both ways.

use std::{collections::HashMap, fmt};

use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use serde::{Deserialize, Serialize};

use crate::{
    error::{GraphError, Result},
    value::Attributes,
};

/// Identifies a node for the lifetime of its graph.
///
/// # Examples
/// ```
/// use graphdash_core::NodeId;
///
/// let id = NodeId::new(3);
/// assert_eq!(id.get(), 3);
/// assert_eq!(id.to_string(), "3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(i64);

impl NodeId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A node and its attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Stable identifier.
    pub id: NodeId,
    /// Open-ended attributes.
    pub attributes: Attributes,
}

/// An edge between two nodes and its attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    /// Node the edge leaves (or the first endpoint of an undirected edge).
    pub source: NodeId,
    /// Node the edge enters (or the second endpoint of an undirected edge).
    pub target: NodeId,
    /// Open-ended attributes.
    pub attributes: Attributes,
}

/// Directed or undirected simple graph with attributed nodes and edges.
///
/// Each ordered pair (directed) or unordered pair (undirected) holds at most
/// one edge. Adding an edge for an existing pair merges the new attributes
/// into the existing edge and keeps its endpoint order.
///
/// # Examples
/// ```
/// use graphdash_core::{Attributes, Graph, NodeId};
///
/// let mut graph = Graph::new(false);
/// graph.add_node(NodeId::new(0), Attributes::new())?;
/// graph.add_node(NodeId::new(1), Attributes::new())?;
/// graph.add_edge(NodeId::new(0), NodeId::new(1), Attributes::new())?;
/// graph.add_edge(NodeId::new(1), NodeId::new(0), Attributes::new())?;
/// assert_eq!(graph.edge_count(), 1);
/// # Ok::<(), graphdash_core::GraphError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Graph {
    directed: bool,
    attributes: Attributes,
    inner: DiGraph<Node, Edge>,
    index: HashMap<NodeId, NodeIndex>,
}

impl Graph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new(directed: bool) -> Self {
        Self {
            directed,
            attributes: Attributes::new(),
            inner: DiGraph::new(),
            index: HashMap::new(),
        }
    }

    /// Returns `true` when edges are ordered pairs.
    #[must_use]
    pub const fn is_directed(&self) -> bool {
        self.directed
    }

    /// Graph-level attributes.
    #[must_use]
    pub const fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Mutable access to graph-level attributes.
    pub const fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.inner.raw_nodes().iter().map(|node| &node.weight)
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.inner.raw_edges().iter().map(|edge| &edge.weight)
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Looks up a node by id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.index
            .get(&id)
            .and_then(|&index| self.inner.node_weight(index))
    }

    /// Looks up the edge joining `source` and `target`, honouring direction.
    #[must_use]
    pub fn edge(&self, source: NodeId, target: NodeId) -> Option<&Edge> {
        self.find_edge(source, target)
            .and_then(|index| self.inner.edge_weight(index))
    }

    /// Adds a node.
    ///
    /// # Errors
    /// Returns [`GraphError::DuplicateNode`] if `id` is already present.
    pub fn add_node(&mut self, id: NodeId, attributes: Attributes) -> Result<()> {
        if self.index.contains_key(&id) {
            return Err(GraphError::DuplicateNode { id });
        }
        self.push_node(id, attributes);
        Ok(())
    }

    /// Appends a node whose id is known to be fresh.
    pub(crate) fn push_node(&mut self, id: NodeId, attributes: Attributes) {
        let index = self.inner.add_node(Node { id, attributes });
        self.index.insert(id, index);
    }

    /// Adds an edge, or merges `attributes` into the existing edge for the
    /// same pair.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownEndpoint`] if either endpoint is not a
    /// node of this graph.
    pub fn add_edge(
        &mut self,
        source: NodeId,
        target: NodeId,
        attributes: Attributes,
    ) -> Result<()> {
        for endpoint in [source, target] {
            if !self.index.contains_key(&endpoint) {
                return Err(GraphError::UnknownEndpoint {
                    source_id: source,
                    target_id: target,
                    missing: endpoint,
                });
            }
        }
        self.upsert_edge(source, target, attributes);
        Ok(())
    }

    /// Inserts or merges an edge. Pairs with an unknown endpoint are ignored.
    pub(crate) fn upsert_edge(&mut self, source: NodeId, target: NodeId, attributes: Attributes) {
        if let Some(existing) = self
            .find_edge(source, target)
            .and_then(|index| self.inner.edge_weight_mut(index))
        {
            existing.attributes.extend(attributes);
            return;
        }
        let (Some(&from), Some(&to)) = (self.index.get(&source), self.index.get(&target)) else {
            return;
        };
        self.inner.add_edge(
            from,
            to,
            Edge {
                source,
                target,
                attributes,
            },
        );
    }

    /// Summarises the graph's kind and size.
    #[must_use]
    pub fn summary(&self) -> GraphSummary {
        GraphSummary {
            directed: self.directed,
            nodes: self.node_count(),
            edges: self.edge_count(),
        }
    }

    fn find_edge(&self, source: NodeId, target: NodeId) -> Option<EdgeIndex> {
        let from = *self.index.get(&source)?;
        let to = *self.index.get(&target)?;
        self.inner.find_edge(from, to).or_else(|| {
            if self.directed {
                None
            } else {
                self.inner.find_edge(to, from)
            }
        })
    }
}

impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        self.directed == other.directed
            && self.attributes == other.attributes
            && self.nodes().eq(other.nodes())
            && self.edges().eq(other.edges())
    }
}

/// Kind and size of a graph, displayed as `Type: DiGraph, Nodes: 3, Edges: 2`.
///
/// # Examples
/// ```
/// use graphdash_core::Graph;
///
/// let summary = Graph::new(true).summary();
/// assert_eq!(summary.to_string(), "Type: DiGraph, Nodes: 0, Edges: 0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GraphSummary {
    /// Whether the graph is directed.
    pub directed: bool,
    /// Number of nodes.
    pub nodes: usize,
    /// Number of edges.
    pub edges: usize,
}

impl GraphSummary {
    /// Name of the graph kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        if self.directed { "DiGraph" } else { "Graph" }
    }
}

impl fmt::Display for GraphSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Type: {}, Nodes: {}, Edges: {}",
            self.kind(),
            self.nodes,
            self.edges
        )
    }
}
