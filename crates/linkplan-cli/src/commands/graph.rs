//! `lkp graph` — print the requirement graph as Graphviz DOT.

use clap::Args;

use crate::commands::source::SourceArgs;

/// Arguments for the `graph` command.
#[derive(Args, Debug)]
pub struct GraphArgs {
    /// Manifest or preset to draw.
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Executes the `graph` command. Edges point from dependency to dependent.
///
/// # Errors
///
/// Returns an error if loading fails or a requirement is undefined.
pub fn execute(args: GraphArgs) -> anyhow::Result<()> {
    let graph = args.source.load_graph()?;
    print!("{}", graph.dependency_graph()?.to_dot());
    Ok(())
}
