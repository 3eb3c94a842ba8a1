//! Random attributed sample graphs.
//!
//! Randomness is drawn from one stream in a fixed order: every node's
//! `size`, `importance` and `category`, then per source node the fan-out,
//! the target sample and each edge's `weight` and `type`. Seeding the stream
//! therefore fixes the whole graph.

use std::path::Path;

use rand::{Rng, SeedableRng, rngs::StdRng, seq::index};
use tracing::{Span, field, info, instrument};

use crate::{
    error::Result,
    graph::{Graph, NodeId},
    node_link::write_graph_file,
    value::{AttrValue, Attributes},
};

/// Categories assigned uniformly to generated nodes.
pub const NODE_CATEGORIES: [&str; 3] = ["A", "B", "C"];

/// Line styles assigned uniformly to generated edges.
pub const EDGE_TYPES: [&str; 3] = ["solid", "dashed", "dotted"];

/// Generates random attributed graphs from validated parameters.
///
/// Construct instances through [`crate::SampleGraphBuilder`].
///
/// # Examples
/// ```
/// use graphdash_core::SampleGraphBuilder;
///
/// let generator = SampleGraphBuilder::new()
///     .with_node_count(4)
///     .with_seed(7)
///     .build()?;
/// let first = generator.generate();
/// let second = generator.generate();
/// assert_eq!(first, second);
/// assert_eq!(first.node_count(), 4);
/// # Ok::<(), graphdash_core::GraphError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleGraphGenerator {
    node_count: usize,
    max_out_edges: usize,
    directed: bool,
    seed: Option<u64>,
}

impl SampleGraphGenerator {
    pub(crate) const fn new(
        node_count: usize,
        max_out_edges: usize,
        directed: bool,
        seed: Option<u64>,
    ) -> Self {
        Self {
            node_count,
            max_out_edges,
            directed,
            seed,
        }
    }

    /// Number of nodes each generated graph contains.
    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.node_count
    }

    /// Upper bound on outgoing edges drawn per node.
    #[must_use]
    pub const fn max_out_edges(&self) -> usize {
        self.max_out_edges
    }

    /// Whether generated graphs are directed.
    #[must_use]
    pub const fn is_directed(&self) -> bool {
        self.directed
    }

    /// Seed fixing the random stream, if any.
    #[must_use]
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Effective fan-out ceiling: `min(max_out_edges, node_count - 1)`.
    #[must_use]
    pub fn fan_out_ceiling(&self) -> usize {
        self.max_out_edges.min(self.node_count.saturating_sub(1))
    }

    /// Generates a graph, seeding the stream from the configured seed or from
    /// system entropy.
    #[must_use]
    pub fn generate(&self) -> Graph {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.generate_with(&mut rng)
    }

    /// Generates a graph drawing every random value from `rng`.
    #[instrument(
        name = "generator.generate",
        skip(self, rng),
        fields(nodes = self.node_count, max_out_edges = self.max_out_edges, directed = self.directed),
    )]
    pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Graph {
        let mut graph = Graph::new(self.directed);
        for index in 0..self.node_count {
            let attributes = node_attributes(index, rng);
            graph.push_node(node_id(index), attributes);
        }

        let ceiling = self.fan_out_ceiling();
        for source in 0..self.node_count {
            let fan_out = rng.gen_range(0..=ceiling);
            if fan_out == 0 {
                continue;
            }
            let candidates: Vec<usize> = (0..self.node_count).filter(|&c| c != source).collect();
            for position in index::sample(rng, candidates.len(), fan_out) {
                let Some(&target) = candidates.get(position) else {
                    continue;
                };
                let attributes = edge_attributes(source, target, rng);
                graph.upsert_edge(node_id(source), node_id(target), attributes);
            }
        }

        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "generated sample graph"
        );
        graph
    }

    /// Generates a graph and writes it to `path` in node-link JSON, creating
    /// missing parent directories.
    ///
    /// # Errors
    /// Returns [`crate::GraphError::Io`] or [`crate::GraphError::Json`] when
    /// the file cannot be written.
    #[instrument(name = "generator.generate_to", err, skip(self), fields(path = field::Empty))]
    pub fn generate_to(&self, path: &Path) -> Result<Graph> {
        Span::current().record("path", field::display(path.display()));
        let graph = self.generate();
        write_graph_file(path, &graph)?;
        info!(path = %path.display(), summary = %graph.summary(), "graph saved");
        Ok(graph)
    }
}

fn node_attributes<R: Rng + ?Sized>(index: usize, rng: &mut R) -> Attributes {
    let size = rng.gen_range(1..=10_i64);
    let importance = rng.gen_range(0.0..1.0_f64);
    let category = pick(&NODE_CATEGORIES, rng);
    Attributes::from([
        ("label".to_owned(), AttrValue::Text(format!("Node {index}"))),
        ("size".to_owned(), AttrValue::Int(size)),
        ("importance".to_owned(), AttrValue::Float(importance)),
        ("category".to_owned(), AttrValue::from(category)),
    ])
}

fn edge_attributes<R: Rng + ?Sized>(source: usize, target: usize, rng: &mut R) -> Attributes {
    let weight = rng.gen_range(0.1..5.0_f64);
    let kind = pick(&EDGE_TYPES, rng);
    Attributes::from([
        (
            "label".to_owned(),
            AttrValue::Text(format!("e{source}-{target}")),
        ),
        ("weight".to_owned(), AttrValue::Float(weight)),
        ("type".to_owned(), AttrValue::from(kind)),
    ])
}

fn pick<'a, R: Rng + ?Sized>(choices: &[&'a str; 3], rng: &mut R) -> &'a str {
    choices[rng.gen_range(0..choices.len())]
}

#[expect(
    clippy::cast_possible_wrap,
    reason = "node counts are validated from non-negative i64 inputs"
)]
const fn node_id(index: usize) -> NodeId {
    NodeId::new(index as i64)
}
