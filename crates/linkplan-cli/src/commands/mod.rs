//! CLI command definitions and dispatch.

pub mod check;
pub mod graph;
pub mod plan;
pub mod presets;
pub mod source;

use clap::{Parser, Subcommand};

/// linkplan — resolve component graphs into build and link plans.
#[derive(Parser, Debug)]
#[command(name = "lkp", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    pub log_json: bool,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve and print the plan for one build configuration.
    Plan(plan::PlanArgs),
    /// Report every problem in a manifest without resolving it.
    Check(check::CheckArgs),
    /// Print the requirement graph in Graphviz DOT format.
    Graph(graph::GraphArgs),
    /// List built-in presets or print one of them.
    Presets(presets::PresetsArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Plan(args) => plan::execute(args),
        Command::Check(args) => check::execute(args),
        Command::Graph(args) => graph::execute(args),
        Command::Presets(args) => presets::execute(args),
    }
}
