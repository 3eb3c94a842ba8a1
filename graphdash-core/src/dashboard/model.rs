//! The complete model handed to the dashboard shell.

use std::path::Path;

use serde::Serialize;
use tracing::{Span, field, info, instrument};

use crate::{
    classify::{CategoricalAttributes, classify},
    dashboard::{
        layout::{Layout, LayoutConfig},
        legend::Legend,
        selection::SelectionSummary,
        style::{StyleRule, restyle},
    },
    elements::{Element, Elements},
    error::StyleError,
    graph::{Graph, GraphSummary},
    palette::{ColorMappings, assign_colors},
};

/// Heading shown above the graph.
pub const DASHBOARD_TITLE: &str = "Graph Network Visualization";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8050;

/// Options supplied when the dashboard starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardOptions {
    /// Requested layout name; unknown names fall back to `circle`.
    pub layout: String,
    /// Requested color attribute; ignored unless it is categorical.
    pub color_by: Option<String>,
    /// Host the shell should bind.
    pub host: String,
    /// Port the shell should bind.
    pub port: u16,
    /// Whether the shell runs in debug mode.
    pub debug: bool,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            layout: Layout::default().name().to_owned(),
            color_by: None,
            host: DEFAULT_HOST.to_owned(),
            port: DEFAULT_PORT,
            debug: false,
        }
    }
}

/// Where and how the shell serves the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerSettings {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Debug mode.
    pub debug: bool,
}

/// Everything the dashboard shell needs to render a graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardModel {
    /// Page heading.
    pub title: String,
    /// Path of the graph file being shown.
    pub source: String,
    /// Kind and size of the graph.
    pub summary: GraphSummary,
    /// Initial layout.
    pub layout: LayoutConfig,
    /// Layouts offered in the layout selector.
    pub available_layouts: Vec<Layout>,
    /// Nodes followed by edges.
    pub elements: Vec<Element>,
    /// Attributes offered in the color selector.
    pub categorical_attributes: CategoricalAttributes,
    /// Initially selected color attribute.
    pub color_by: Option<String>,
    /// Attribute → value → color.
    pub color_mappings: ColorMappings,
    /// [`Self::color_mappings`] serialized for client-side restyling.
    pub color_mappings_payload: String,
    /// Initial stylesheet.
    pub stylesheet: Vec<StyleRule>,
    /// Initial legend.
    pub legend: Legend,
    /// Text shown in the selection panel before anything is selected.
    pub selection_prompt: String,
    /// Server settings for the shell.
    pub server: ServerSettings,
}

impl DashboardModel {
    /// Derives the dashboard model for `graph` loaded from `source`.
    ///
    /// Categorical attributes and color mappings are recomputed from the
    /// rendered node data on every call.
    ///
    /// # Errors
    /// Returns [`StyleError::MalformedPayload`] if the color-mapping payload
    /// cannot be read back while rendering the initial styles.
    ///
    /// # Examples
    /// ```
    /// use std::path::Path;
    /// use graphdash_core::{DashboardModel, DashboardOptions, SampleGraphBuilder};
    ///
    /// let graph = SampleGraphBuilder::new().with_seed(3).build()?.generate();
    /// let model = DashboardModel::build(Path::new("graph.json"), &graph, &DashboardOptions::default())?;
    /// assert_eq!(model.color_by.as_deref(), Some("category"));
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[instrument(
        name = "dashboard.build",
        err,
        skip(graph, options),
        fields(source = field::Empty, layout = field::Empty, color_by = field::Empty),
    )]
    pub fn build(
        source: &Path,
        graph: &Graph,
        options: &DashboardOptions,
    ) -> Result<Self, StyleError> {
        let span = Span::current();
        span.record("source", field::display(source.display()));

        let elements = Elements::from_graph(graph);
        let categorical = classify(elements.node_data());
        let color_by = choose_color_attribute(options.color_by.as_deref(), &categorical);
        let color_mappings = assign_colors(&categorical);
        let payload = color_mappings.to_payload();
        let stylesheet = restyle(color_by.as_deref(), &payload)?;
        let legend = Legend::from_payload(color_by.as_deref(), &payload)?;
        let layout = Layout::resolve(&options.layout);

        span.record("layout", field::display(layout));
        span.record(
            "color_by",
            field::display(color_by.as_deref().unwrap_or("<none>")),
        );
        info!(
            elements = elements.nodes.len() + elements.edges.len(),
            categorical = categorical.len(),
            "dashboard model ready"
        );

        Ok(Self {
            title: DASHBOARD_TITLE.to_owned(),
            source: source.display().to_string(),
            summary: graph.summary(),
            layout: layout.config(),
            available_layouts: Layout::ALL.to_vec(),
            elements: elements.iter().cloned().collect(),
            categorical_attributes: categorical,
            color_by,
            color_mappings,
            color_mappings_payload: payload,
            stylesheet,
            legend,
            selection_prompt: SelectionSummary::default().to_string(),
            server: ServerSettings {
                host: options.host.clone(),
                port: options.port,
                debug: options.debug,
            },
        })
    }
}

/// Picks the initial color attribute: `requested` when it is categorical,
/// otherwise the first categorical attribute.
///
/// # Examples
/// ```
/// use graphdash_core::{AttrValue, Attributes, choose_color_attribute, classify};
///
/// let nodes: Vec<Attributes> = ["A", "B"]
///     .into_iter()
///     .map(|c| Attributes::from([("category".to_owned(), AttrValue::from(c))]))
///     .collect();
/// let categorical = classify(&nodes);
/// assert_eq!(choose_color_attribute(Some("weight"), &categorical).as_deref(), Some("category"));
/// ```
#[must_use]
pub fn choose_color_attribute(
    requested: Option<&str>,
    categorical: &CategoricalAttributes,
) -> Option<String> {
    requested
        .filter(|attribute| categorical.contains(attribute))
        .or_else(|| categorical.names().next())
        .map(ToOwned::to_owned)
}
