//! Builder utilities for configuring sample graph generation.
//!
//! Parameters arrive as signed integers from the command line, so validation
//! happens once in [`SampleGraphBuilder::build`] before any randomness is
//! drawn.

use crate::{
    error::{GraphError, Result},
    generator::SampleGraphGenerator,
};

const DEFAULT_NODE_COUNT: i64 = 10;
const DEFAULT_MAX_OUT_EDGES: i64 = 3;

/// Configures and constructs [`SampleGraphGenerator`] instances.
///
/// # Examples
/// ```
/// use graphdash_core::SampleGraphBuilder;
///
/// let generator = SampleGraphBuilder::new()
///     .with_node_count(5)
///     .with_max_out_edges(2)
///     .with_seed(42)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(generator.node_count(), 5);
/// assert_eq!(generator.seed(), Some(42));
/// ```
#[derive(Debug, Clone)]
pub struct SampleGraphBuilder {
    node_count: i64,
    max_out_edges: i64,
    directed: bool,
    seed: Option<u64>,
}

impl Default for SampleGraphBuilder {
    fn default() -> Self {
        Self {
            node_count: DEFAULT_NODE_COUNT,
            max_out_edges: DEFAULT_MAX_OUT_EDGES,
            directed: true,
            seed: None,
        }
    }
}

impl SampleGraphBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use graphdash_core::SampleGraphBuilder;
    ///
    /// let builder = SampleGraphBuilder::new();
    /// assert_eq!(builder.node_count(), 10);
    /// assert_eq!(builder.max_out_edges(), 3);
    /// assert!(builder.is_directed());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the number of nodes to generate.
    #[must_use]
    pub const fn with_node_count(mut self, count: i64) -> Self {
        self.node_count = count;
        self
    }

    /// Returns the configured node count.
    #[must_use]
    pub const fn node_count(&self) -> i64 {
        self.node_count
    }

    /// Overrides the maximum number of outgoing edges drawn per node.
    #[must_use]
    pub const fn with_max_out_edges(mut self, max: i64) -> Self {
        self.max_out_edges = max;
        self
    }

    /// Returns the configured fan-out ceiling.
    #[must_use]
    pub const fn max_out_edges(&self) -> i64 {
        self.max_out_edges
    }

    /// Chooses between a directed and an undirected graph.
    #[must_use]
    pub const fn with_directed(mut self, directed: bool) -> Self {
        self.directed = directed;
        self
    }

    /// Returns whether the generated graph will be directed.
    #[must_use]
    pub const fn is_directed(&self) -> bool {
        self.directed
    }

    /// Fixes the random seed so generation is reproducible.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets or clears the random seed.
    #[must_use]
    pub const fn with_optional_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Validates the configuration and constructs a [`SampleGraphGenerator`].
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidArgument`] when the node count or the
    /// fan-out ceiling is negative.
    ///
    /// # Examples
    /// ```
    /// use graphdash_core::{GraphError, SampleGraphBuilder};
    ///
    /// let err = SampleGraphBuilder::new().with_node_count(-1).build().unwrap_err();
    /// assert!(matches!(err, GraphError::InvalidArgument { parameter: "nodes", got: -1 }));
    /// ```
    pub fn build(self) -> Result<SampleGraphGenerator> {
        let node_count = non_negative("nodes", self.node_count)?;
        let max_out_edges = non_negative("max_edges", self.max_out_edges)?;
        Ok(SampleGraphGenerator::new(
            node_count,
            max_out_edges,
            self.directed,
            self.seed,
        ))
    }
}

fn non_negative(parameter: &'static str, got: i64) -> Result<usize> {
    usize::try_from(got).map_err(|_| GraphError::InvalidArgument { parameter, got })
}
