use graphdash_core::{Graph, SampleGraphBuilder};

/// Generates the seeded graph most tests share.
#[must_use]
pub fn seeded_graph(nodes: i64, max_edges: i64, directed: bool, seed: u64) -> Graph {
    SampleGraphBuilder::new()
        .with_node_count(nodes)
        .with_max_out_edges(max_edges)
        .with_directed(directed)
        .with_seed(seed)
        .build()
        .expect("parameters are valid")
        .generate()
}
