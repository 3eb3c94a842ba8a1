//! Graphdash core library.
//!
//! Generates random attributed sample graphs, persists them as node-link
//! JSON, and derives the data an interactive dashboard needs to display
//! them: renderable elements, categorical attributes, deterministic color
//! mappings, stylesheets and legends.
//!
//! ```
//! use graphdash_core::{Elements, SampleGraphBuilder, assign_colors, classify};
//!
//! let graph = SampleGraphBuilder::new()
//!     .with_node_count(5)
//!     .with_max_out_edges(2)
//!     .with_seed(42)
//!     .build()?
//!     .generate();
//! let elements = Elements::from_graph(&graph);
//! let mappings = assign_colors(&classify(elements.node_data()));
//! assert!(mappings.iter().all(|(_, colors)| colors.len() <= 10));
//! # Ok::<(), graphdash_core::GraphError>(())
//! ```

mod builder;
mod classify;
pub mod dashboard;
mod elements;
mod error;
mod generator;
mod graph;
pub mod node_link;
mod palette;
mod value;

pub use crate::{
    builder::SampleGraphBuilder,
    classify::{
        CategoricalAttributes, MAX_DISTINCT_VALUES, MIN_DISTINCT_VALUES, RESERVED_KEYS, classify,
        is_reserved,
    },
    dashboard::{
        DashboardModel, DashboardOptions, Layout, Legend, SelectionSummary, StyleRule,
        choose_color_attribute, color_rules, restyle,
    },
    elements::{Element, Elements},
    error::{GraphError, GraphErrorCode, Result, StyleError, StyleErrorCode},
    generator::{EDGE_TYPES, NODE_CATEGORIES, SampleGraphGenerator},
    graph::{Edge, Graph, GraphSummary, Node, NodeId},
    node_link::{NodeLinkData, read_graph_file, write_graph_file},
    palette::{ColorMappings, ParseRgbError, Rgb, assign_colors, palette},
    value::{AttrValue, Attributes},
};
