//! Command-line interface for generating sample graphs and preparing them
//! for the dashboard.
//!
//! `generate-sample-graph` writes a seeded or random attributed graph as
//! node-link JSON; `run-dashboard` loads such a file and emits the dashboard
//! model the external shell renders.

mod commands;

pub use commands::{
    Cli, CliError, Command, CommandOutcome, DashboardArgs, GenerateArgs, GenerationSummary,
    render_outcome, run_cli,
};

#[cfg(test)]
mod test_helpers;
#[cfg(test)]
mod tests;
