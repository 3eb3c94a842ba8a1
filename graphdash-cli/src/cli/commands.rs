//! Command implementations and argument parsing for the graphdash CLI.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use graphdash_core::{
    DashboardModel, DashboardOptions, GraphError, GraphSummary, SampleGraphBuilder, StyleError,
    read_graph_file,
};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

const DEFAULT_NODES: i64 = 10;
const DEFAULT_MAX_EDGES: i64 = 3;
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8050;
const DEFAULT_LAYOUT: &str = "circle";

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "graphdash",
    about = "Generate attributed sample graphs and prepare them for the graph dashboard."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Generate a random attributed graph and save it as node-link JSON.
    GenerateSampleGraph(GenerateArgs),
    /// Load a node-link graph file and emit the dashboard model.
    RunDashboard(DashboardArgs),
}

/// Options accepted by `generate-sample-graph`.
#[derive(Debug, Args, Clone)]
pub struct GenerateArgs {
    /// Destination file; missing parent directories are created.
    pub output: PathBuf,

    /// Number of nodes to generate.
    #[arg(
        short = 'n',
        long = "nodes",
        default_value_t = DEFAULT_NODES,
        allow_negative_numbers = true,
    )]
    pub nodes: i64,

    /// Maximum number of outgoing edges drawn per node.
    #[arg(
        short = 'e',
        long = "max-edges",
        default_value_t = DEFAULT_MAX_EDGES,
        allow_negative_numbers = true,
    )]
    pub max_edges: i64,

    /// Generate a directed graph (the default).
    #[arg(long, overrides_with = "undirected")]
    pub directed: bool,

    /// Generate an undirected graph.
    #[arg(long, overrides_with = "directed")]
    pub undirected: bool,

    /// Seed for reproducible output; negative seeds are accepted.
    #[arg(long, allow_negative_numbers = true)]
    pub seed: Option<i64>,
}

impl GenerateArgs {
    /// Whether the generated graph is directed; the last of `--directed` and
    /// `--undirected` wins.
    #[must_use]
    pub const fn is_directed(&self) -> bool {
        !self.undirected
    }

    /// The seed as the generator's `u64`, reinterpreting the two's-complement
    /// bits so every `i64` maps to a distinct stream.
    #[must_use]
    pub fn generator_seed(&self) -> Option<u64> {
        self.seed.map(i64::cast_unsigned)
    }
}

/// Options accepted by `run-dashboard`.
#[derive(Debug, Args, Clone)]
pub struct DashboardArgs {
    /// Node-link JSON file to display.
    pub graph: PathBuf,

    /// Run the dashboard shell in debug mode.
    #[arg(long)]
    pub debug: bool,

    /// Port the dashboard shell binds.
    #[arg(short = 'p', long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Host the dashboard shell binds.
    #[arg(long, default_value = DEFAULT_HOST)]
    pub host: String,

    /// Initial layout; unknown names fall back to `circle`.
    #[arg(long, default_value = DEFAULT_LAYOUT)]
    pub layout: String,

    /// Attribute used for the initial node coloring.
    #[arg(long = "color-by")]
    pub color_by: Option<String>,
}

impl DashboardArgs {
    fn options(&self) -> DashboardOptions {
        DashboardOptions {
            layout: self.layout.clone(),
            color_by: self.color_by.clone(),
            host: self.host.clone(),
            port: self.port,
            debug: self.debug,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Generating, loading or writing a graph failed.
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// Rendering the dashboard styles failed.
    #[error(transparent)]
    Style(#[from] StyleError),
    /// Writing the command output failed.
    #[error("failed to write command output: {source}")]
    Output {
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

impl CliError {
    /// Stable code of the wrapped library error, if any.
    #[must_use]
    pub const fn code(&self) -> Option<&'static str> {
        match self {
            Self::Graph(err) => Some(err.code().as_str()),
            Self::Style(err) => Some(err.code().as_str()),
            Self::Output { .. } => None,
        }
    }
}

/// Where a graph was written and what it contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSummary {
    /// Destination file.
    pub path: PathBuf,
    /// Kind and size of the written graph.
    pub graph: GraphSummary,
}

/// Result of a successful command.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// `generate-sample-graph` wrote a graph.
    Generated(GenerationSummary),
    /// `run-dashboard` derived the dashboard model.
    Dashboard(Box<DashboardModel>),
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when generation, loading or model derivation fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use graphdash_cli::cli::{Cli, Command, CommandOutcome, GenerateArgs, run_cli};
/// # use tempfile::TempDir;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let dir = TempDir::new()?;
/// let cli = Cli {
///     command: Command::GenerateSampleGraph(GenerateArgs {
///         output: dir.path().join("graph.json"),
///         nodes: 4,
///         max_edges: 2,
///         directed: false,
///         undirected: false,
///         seed: Some(42),
///     }),
/// };
/// let CommandOutcome::Generated(summary) = run_cli(cli)? else {
///     unreachable!("generation yields a summary");
/// };
/// assert_eq!(summary.graph.nodes, 4);
/// # Ok(())
/// # }
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<CommandOutcome, CliError> {
    let span = Span::current();
    match cli.command {
        Command::GenerateSampleGraph(args) => {
            span.record("command", field::display("generate-sample-graph"));
            generate(args).map(CommandOutcome::Generated)
        }
        Command::RunDashboard(args) => {
            span.record("command", field::display("run-dashboard"));
            dashboard(&args).map(|model| CommandOutcome::Dashboard(Box::new(model)))
        }
    }
}

#[instrument(
    name = "cli.generate",
    err,
    skip(args),
    fields(
        output = field::Empty,
        nodes = args.nodes,
        max_edges = args.max_edges,
        directed = args.is_directed(),
        seed = field::Empty,
    ),
)]
pub(super) fn generate(args: GenerateArgs) -> Result<GenerationSummary, CliError> {
    let span = Span::current();
    span.record("output", field::display(args.output.display()));
    if let Some(seed) = args.seed {
        span.record("seed", seed);
    }

    let generator = SampleGraphBuilder::new()
        .with_node_count(args.nodes)
        .with_max_out_edges(args.max_edges)
        .with_directed(args.is_directed())
        .with_optional_seed(args.generator_seed())
        .build()?;
    let graph = generator.generate_to(&args.output)?;
    let summary = GenerationSummary {
        path: args.output,
        graph: graph.summary(),
    };
    info!(
        path = %summary.path.display(),
        summary = %summary.graph,
        "command completed"
    );
    Ok(summary)
}

#[instrument(
    name = "cli.dashboard",
    err,
    skip(args),
    fields(graph = field::Empty, layout = field::Empty, color_by = field::Empty),
)]
pub(super) fn dashboard(args: &DashboardArgs) -> Result<DashboardModel, CliError> {
    let span = Span::current();
    span.record("graph", field::display(args.graph.display()));
    span.record("layout", field::display(&args.layout));
    span.record(
        "color_by",
        field::display(args.color_by.as_deref().unwrap_or("<auto>")),
    );

    info!(path = %args.graph.display(), "loading graph");
    let graph = read_graph_file(&args.graph)?;
    let model = DashboardModel::build(&args.graph, &graph, &args.options())?;
    info!(
        host = model.server.host.as_str(),
        port = model.server.port,
        debug = model.server.debug,
        "command completed"
    );
    Ok(model)
}

/// Renders `outcome` to `writer`: a short report for generated graphs and
/// pretty JSON for dashboard models.
///
/// # Errors
/// Returns [`CliError::Output`] if writing to `writer` fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use graphdash_cli::cli::{CommandOutcome, GenerationSummary, render_outcome};
/// # use graphdash_core::Graph;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let outcome = CommandOutcome::Generated(GenerationSummary {
///     path: "graph.json".into(),
///     graph: Graph::new(true).summary(),
/// });
/// let mut buffer = Vec::new();
/// render_outcome(&outcome, &mut buffer)?;
/// assert_eq!(
///     String::from_utf8(buffer)?,
///     "Graph saved to graph.json\nGraph info: Type: DiGraph, Nodes: 0, Edges: 0\n"
/// );
/// # Ok(())
/// # }
/// ```
pub fn render_outcome(outcome: &CommandOutcome, mut writer: impl Write) -> Result<(), CliError> {
    let output = |source| CliError::Output { source };
    match outcome {
        CommandOutcome::Generated(summary) => {
            writeln!(writer, "Graph saved to {}", summary.path.display()).map_err(output)?;
            writeln!(writer, "Graph info: {}", summary.graph).map_err(output)?;
        }
        CommandOutcome::Dashboard(model) => {
            serde_json::to_writer_pretty(&mut writer, model)
                .map_err(|err| output(io::Error::from(err)))?;
            writeln!(writer).map_err(output)?;
        }
    }
    Ok(())
}
