//! Unit tests for argument parsing, command execution and output rendering.

use super::commands::{dashboard, generate};
use super::test_helpers::{
    create_text_file, generate_args, parse, run_cli_expecting_error, temp_dir,
};
use super::{
    Cli, CliError, Command, CommandOutcome, DashboardArgs, GenerationSummary, render_outcome,
    run_cli,
};

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use graphdash_core::{GraphError, GraphSummary, Layout, SampleGraphBuilder, read_graph_file};
use rstest::rstest;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

use graphdash_test_support::tracing::RecordingLayer;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn dashboard_args(graph: PathBuf) -> DashboardArgs {
    DashboardArgs {
        graph,
        debug: false,
        port: 8050,
        host: "127.0.0.1".to_owned(),
        layout: "circle".to_owned(),
        color_by: None,
    }
}

#[rstest]
fn generate_defaults() {
    let Command::GenerateSampleGraph(args) = parse(&["generate-sample-graph", "out.json"]).command
    else {
        panic!("expected generate-sample-graph");
    };
    assert_eq!(args.output, PathBuf::from("out.json"));
    assert_eq!(args.nodes, 10);
    assert_eq!(args.max_edges, 3);
    assert!(args.is_directed());
    assert_eq!(args.seed, None);
}

#[rstest]
#[case::undirected(&["--undirected"], false)]
#[case::directed(&["--directed"], true)]
#[case::last_wins(&["--directed", "--undirected"], false)]
#[case::last_wins_reversed(&["--undirected", "--directed"], true)]
fn directedness_flags(#[case] flags: &[&str], #[case] expected: bool) {
    let mut args = vec!["generate-sample-graph", "out.json"];
    args.extend_from_slice(flags);
    let Command::GenerateSampleGraph(parsed) = parse(&args).command else {
        panic!("expected generate-sample-graph");
    };
    assert_eq!(parsed.is_directed(), expected);
}

#[rstest]
fn generate_accepts_short_and_negative_values() {
    let cli = parse(&[
        "generate-sample-graph",
        "out.json",
        "-n",
        "-2",
        "-e",
        "4",
        "--seed",
        "7",
    ]);
    let Command::GenerateSampleGraph(args) = cli.command else {
        panic!("expected generate-sample-graph");
    };
    assert_eq!(args.nodes, -2);
    assert_eq!(args.max_edges, 4);
    assert_eq!(args.seed, Some(7));
}

#[rstest]
#[case::negative("-5", -5, u64::MAX - 4)]
#[case::minimum("-9223372036854775808", i64::MIN, 1 << 63)]
#[case::positive("42", 42, 42)]
fn seeds_accept_any_signed_value(#[case] raw: &str, #[case] seed: i64, #[case] stream: u64) {
    let Command::GenerateSampleGraph(args) =
        parse(&["generate-sample-graph", "out.json", "--seed", raw]).command
    else {
        panic!("expected generate-sample-graph");
    };
    assert_eq!(args.seed, Some(seed));
    assert_eq!(args.generator_seed(), Some(stream));
}

#[rstest]
fn negative_seed_generates_reproducibly() -> TestResult {
    let dir = temp_dir();
    let path = dir.path().join("graph.json");
    let mut args = generate_args(path.clone(), 7, 2);
    args.seed = Some(-1);
    generate(args)?;

    let expected = SampleGraphBuilder::new()
        .with_node_count(7)
        .with_max_out_edges(2)
        .with_seed(u64::MAX)
        .build()?
        .generate();
    assert_eq!(read_graph_file(&path)?, expected);
    Ok(())
}

#[rstest]
fn dashboard_defaults_and_overrides() {
    let Command::RunDashboard(defaults) = parse(&["run-dashboard", "graph.json"]).command else {
        panic!("expected run-dashboard");
    };
    assert!(!defaults.debug);
    assert_eq!(defaults.port, 8050);
    assert_eq!(defaults.host, "127.0.0.1");
    assert_eq!(defaults.layout, "circle");
    assert_eq!(defaults.color_by, None);

    let cli = parse(&[
        "run-dashboard",
        "graph.json",
        "--debug",
        "-p",
        "9000",
        "--host",
        "0.0.0.0",
        "--layout",
        "grid",
        "--color-by",
        "category",
    ]);
    let Command::RunDashboard(args) = cli.command else {
        panic!("expected run-dashboard");
    };
    assert!(args.debug);
    assert_eq!(args.port, 9000);
    assert_eq!(args.host, "0.0.0.0");
    assert_eq!(args.layout, "grid");
    assert_eq!(args.color_by.as_deref(), Some("category"));
}

#[rstest]
fn missing_graph_path_is_a_usage_error() {
    assert!(Cli::try_parse_from(["graphdash", "run-dashboard"]).is_err());
}

#[rstest]
fn generate_writes_loadable_graph() -> TestResult {
    let dir = temp_dir();
    let output = dir.path().join("out").join("graph.json");
    let summary = generate(generate_args(output.clone(), 6, 2))?;

    assert_eq!(summary.path, output);
    let loaded = read_graph_file(&output)?;
    assert_eq!(loaded.summary(), summary.graph);
    assert_eq!(summary.graph.nodes, 6);
    assert!(summary.graph.directed);
    Ok(())
}

#[rstest]
fn generate_is_reproducible_with_seed() -> TestResult {
    let dir = temp_dir();
    let first = dir.path().join("a.json");
    let second = dir.path().join("b.json");
    generate(generate_args(first.clone(), 8, 3))?;
    generate(generate_args(second.clone(), 8, 3))?;
    assert_eq!(fs::read(first)?, fs::read(second)?);
    Ok(())
}

#[rstest]
#[case::nodes(-1, 3, "nodes")]
#[case::max_edges(5, -1, "max_edges")]
fn generate_rejects_negative_parameters(
    #[case] nodes: i64,
    #[case] max_edges: i64,
    #[case] parameter: &str,
) {
    let dir = temp_dir();
    let output = dir.path().join("graph.json");
    let err = run_cli_expecting_error(
        Command::GenerateSampleGraph(generate_args(output.clone(), nodes, max_edges)),
        "negative parameters must fail",
    );
    assert!(matches!(
        err,
        CliError::Graph(GraphError::InvalidArgument { parameter: p, .. }) if p == parameter
    ));
    assert_eq!(err.code(), Some("GRAPH_INVALID_ARGUMENT"));
    assert!(!output.exists());
}

#[rstest]
fn dashboard_builds_model_for_generated_graph() -> TestResult {
    let dir = temp_dir();
    let path = dir.path().join("graph.json");
    generate(generate_args(path.clone(), 10, 3))?;

    let mut args = dashboard_args(path);
    args.layout = "spiral".to_owned();
    args.color_by = Some("size".to_owned());
    let model = dashboard(&args)?;

    assert_eq!(model.layout.name, Layout::Circle);
    assert_eq!(model.summary.nodes, 10);
    assert!(model.categorical_attributes.contains("category"));
    let expected = if model.categorical_attributes.contains("size") {
        "size"
    } else {
        "category"
    };
    assert_eq!(model.color_by.as_deref(), Some(expected));
    Ok(())
}

#[rstest]
#[case::missing("absent.json", None)]
#[case::malformed("broken.json", Some("{\"nodes\": ["))]
#[case::dangling(
    "dangling.json",
    Some(r#"{"nodes": [{"id": 0}], "links": [{"source": 0, "target": 3}]}"#)
)]
fn dashboard_fails_on_unloadable_graph(
    #[case] name: &str,
    #[case] contents: Option<&str>,
) -> TestResult {
    let dir = temp_dir();
    let path = match contents {
        Some(contents) => create_text_file(&dir, name, contents)?,
        None => dir.path().join(name),
    };
    let err = run_cli_expecting_error(
        Command::RunDashboard(dashboard_args(path)),
        "unloadable graph must fail",
    );
    assert!(matches!(err, CliError::Graph(_)));
    assert!(err.code().is_some());
    Ok(())
}

#[rstest]
fn render_generated_summary() -> TestResult {
    let outcome = CommandOutcome::Generated(GenerationSummary {
        path: PathBuf::from("out/graph.json"),
        graph: GraphSummary {
            directed: false,
            nodes: 3,
            edges: 2,
        },
    });
    let mut buffer = Vec::new();
    render_outcome(&outcome, &mut buffer)?;
    assert_eq!(
        String::from_utf8(buffer)?,
        "Graph saved to out/graph.json\nGraph info: Type: Graph, Nodes: 3, Edges: 2\n"
    );
    Ok(())
}

#[rstest]
fn render_dashboard_model_as_json() -> TestResult {
    let dir = temp_dir();
    let path = dir.path().join("graph.json");
    generate(generate_args(path.clone(), 4, 1))?;
    let outcome = run_cli(Cli {
        command: Command::RunDashboard(dashboard_args(path)),
    })?;

    let mut buffer = Vec::new();
    render_outcome(&outcome, &mut buffer)?;
    let rendered: serde_json::Value = serde_json::from_slice(&buffer)?;
    assert_eq!(rendered["title"], "Graph Network Visualization");
    assert_eq!(rendered["layout"]["name"], "circle");
    assert_eq!(rendered["server"]["port"], 8050);
    assert_eq!(rendered["summary"]["nodes"], 4);
    Ok(())
}

#[rstest]
fn run_cli_emits_tracing_fields() -> TestResult {
    let dir = temp_dir();
    let path = dir.path().join("graph.json");
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    let cli = Cli {
        command: Command::GenerateSampleGraph(generate_args(path, 5, 2)),
    };
    tracing::subscriber::with_default(subscriber, || run_cli(cli))?;

    let run = layer.span("cli.run").expect("cli.run span must exist");
    assert_eq!(
        run.fields.get("command").map(String::as_str),
        Some("generate-sample-graph")
    );

    let span = layer.span("cli.generate").expect("cli.generate span must exist");
    assert_eq!(span.fields.get("nodes").map(String::as_str), Some("5"));
    assert_eq!(span.fields.get("seed").map(String::as_str), Some("42"));
    assert!(
        span.fields
            .get("output")
            .is_some_and(|value| value.ends_with("graph.json"))
    );
    assert!(layer.span("generator.generate_to").is_some());
    assert!(layer.has_event(Level::INFO, "command completed"));
    Ok(())
}

#[rstest]
fn dashboard_records_path_on_error() {
    let dir = temp_dir();
    let missing = dir.path().join("missing.json");
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    let err = tracing::subscriber::with_default(subscriber, || dashboard(&dashboard_args(missing)))
        .expect_err("missing file must fail");
    assert!(matches!(err, CliError::Graph(GraphError::Io { .. })));

    let span = layer.span("cli.dashboard").expect("cli.dashboard span must exist");
    assert!(
        span.fields
            .get("graph")
            .is_some_and(|value| value.ends_with("missing.json"))
    );
    assert_eq!(span.fields.get("color_by").map(String::as_str), Some("<auto>"));
    assert!(
        layer
            .events()
            .iter()
            .any(|event| event.level == Level::ERROR && event.target.starts_with("graphdash"))
    );
}
