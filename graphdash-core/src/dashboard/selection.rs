//! Summaries of the nodes selected in the dashboard.

use std::fmt;

use serde::Serialize;

use crate::value::Attributes;

/// Text shown when nothing is selected.
pub const EMPTY_SELECTION_PROMPT: &str = "No nodes selected. Click on nodes to see details.";

/// Details of one selected node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedNode {
    /// Heading: the node label, or its id when unlabelled.
    pub title: String,
    /// Node id.
    pub id: String,
    /// Every property except `id`, as `key: value`.
    pub properties: Vec<String>,
}

/// The current selection, rendered as text by [`fmt::Display`].
///
/// # Examples
/// ```
/// use graphdash_core::{AttrValue, Attributes, SelectionSummary};
///
/// let node = Attributes::from([
///     ("id".to_owned(), AttrValue::from("3")),
///     ("label".to_owned(), AttrValue::from("Node 3")),
/// ]);
/// let summary = SelectionSummary::from_selection([&node]);
/// assert!(summary.to_string().starts_with("Selected Nodes: 1"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SelectionSummary {
    /// Selected nodes in selection order.
    pub nodes: Vec<SelectedNode>,
}

impl SelectionSummary {
    /// Summarises the data of the selected nodes.
    pub fn from_selection<'a, I>(selected: I) -> Self
    where
        I: IntoIterator<Item = &'a Attributes>,
    {
        let nodes = selected
            .into_iter()
            .map(|data| {
                let id = data.get("id").map(ToString::to_string).unwrap_or_default();
                let title = data
                    .get("label")
                    .map_or_else(|| id.clone(), ToString::to_string);
                let properties = data
                    .iter()
                    .filter(|(key, _)| key.as_str() != "id")
                    .map(|(key, value)| format!("{key}: {value}"))
                    .collect();
                SelectedNode {
                    title,
                    id,
                    properties,
                }
            })
            .collect();
        Self { nodes }
    }
}

impl fmt::Display for SelectionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nodes.is_empty() {
            return f.write_str(EMPTY_SELECTION_PROMPT);
        }
        writeln!(f, "Selected Nodes: {}", self.nodes.len())?;
        for node in &self.nodes {
            writeln!(f, "Node: {}", node.title)?;
            writeln!(f, "ID: {}", node.id)?;
            writeln!(f, "Properties: {}", node.properties.join(", "))?;
        }
        Ok(())
    }
}
