//! Renderable element data for the dashboard widget.
//!
//! The widget addresses elements by string ids, so node data gains a string
//! `id` (and a `name` when the node has none) and edge data gains string
//! `source`/`target` keys on top of their attributes.

use serde::Serialize;
use tracing::debug;

use crate::{
    graph::Graph,
    value::{AttrValue, Attributes},
};

/// One node or edge as consumed by the rendering widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    /// Element properties, including the structural keys.
    pub data: Attributes,
}

/// Node and edge elements rendered from a [`Graph`].
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Elements {
    /// Node elements in graph order.
    pub nodes: Vec<Element>,
    /// Edge elements in graph order.
    pub edges: Vec<Element>,
}

impl Elements {
    /// Renders every node and edge of `graph`.
    ///
    /// # Examples
    /// ```
    /// use graphdash_core::{Attributes, Elements, Graph, NodeId};
    ///
    /// let mut graph = Graph::new(true);
    /// graph.add_node(NodeId::new(4), Attributes::new())?;
    /// let elements = Elements::from_graph(&graph);
    /// let data = &elements.nodes[0].data;
    /// assert_eq!(data["id"].to_string(), "4");
    /// assert_eq!(data["name"].to_string(), "4");
    /// # Ok::<(), graphdash_core::GraphError>(())
    /// ```
    #[must_use]
    pub fn from_graph(graph: &Graph) -> Self {
        let nodes = graph
            .nodes()
            .map(|node| {
                let mut data = node.attributes.clone();
                let id = node.id.to_string();
                data.insert("id".to_owned(), AttrValue::Text(id.clone()));
                data.entry("name".to_owned()).or_insert(AttrValue::Text(id));
                debug!(id = %node.id, ?data, "node element");
                Element { data }
            })
            .collect();
        let edges = graph
            .edges()
            .map(|edge| {
                let mut data = edge.attributes.clone();
                data.insert("source".to_owned(), AttrValue::Text(edge.source.to_string()));
                data.insert("target".to_owned(), AttrValue::Text(edge.target.to_string()));
                debug!(source = %edge.source, target = %edge.target, ?data, "edge element");
                Element { data }
            })
            .collect();
        Self { nodes, edges }
    }

    /// Node element data, the input to attribute classification.
    pub fn node_data(&self) -> impl Iterator<Item = &Attributes> {
        self.nodes.iter().map(|element| &element.data)
    }

    /// Nodes followed by edges, the order the widget expects.
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.nodes.iter().chain(&self.edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::graph::NodeId;

    #[test]
    fn existing_names_are_kept() {
        let mut graph = Graph::new(false);
        graph
            .add_node(
                NodeId::new(0),
                Attributes::from([("name".to_owned(), AttrValue::from("gateway"))]),
            )
            .expect("fresh id");
        graph
            .add_node(NodeId::new(1), Attributes::new())
            .expect("fresh id");

        let elements = Elements::from_graph(&graph);
        let names: Vec<String> = elements
            .node_data()
            .filter_map(|data| data.get("name").map(ToString::to_string))
            .collect();
        assert_eq!(names, vec!["gateway".to_owned(), "1".to_owned()]);
        assert_eq!(
            elements.nodes[0].data.get("id"),
            Some(&AttrValue::from("0"))
        );
    }

    #[test]
    fn edge_data_gains_string_endpoints() {
        let mut graph = Graph::new(true);
        for raw in [1, 2] {
            graph
                .add_node(NodeId::new(raw), Attributes::new())
                .expect("fresh id");
        }
        graph
            .add_edge(
                NodeId::new(1),
                NodeId::new(2),
                Attributes::from([("type".to_owned(), AttrValue::from("solid"))]),
            )
            .expect("endpoints exist");

        let elements = Elements::from_graph(&graph);
        let data = &elements.edges[0].data;
        assert_eq!(data.get("source"), Some(&AttrValue::from("1")));
        assert_eq!(data.get("target"), Some(&AttrValue::from("2")));
        assert_eq!(data.get("type"), Some(&AttrValue::from("solid")));
        assert_eq!(elements.iter().count(), 3);
    }
}
