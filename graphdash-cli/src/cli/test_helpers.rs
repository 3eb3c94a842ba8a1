//! Small helpers shared across CLI tests.

use std::fs;
use std::io;
use std::path::PathBuf;

use clap::Parser;
use tempfile::TempDir;

use super::{Cli, CliError, Command, GenerateArgs, run_cli};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn create_text_file(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    fs::write(&path, contents)?;
    Ok(path)
}

pub(super) fn generate_args(output: PathBuf, nodes: i64, max_edges: i64) -> GenerateArgs {
    GenerateArgs {
        output,
        nodes,
        max_edges,
        directed: false,
        undirected: false,
        seed: Some(42),
    }
}

pub(super) fn parse(args: &[&str]) -> Cli {
    match Cli::try_parse_from(std::iter::once("graphdash").chain(args.iter().copied())) {
        Ok(cli) => cli,
        Err(err) => panic!("arguments must parse: {err}"),
    }
}

pub(super) fn run_cli_expecting_error(command: Command, panic_msg: &str) -> CliError {
    match run_cli(Cli { command }) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
