//! `lkp plan` — resolve a component graph for one build configuration.

use clap::Args;

use crate::commands::source::{ConfigArgs, SourceArgs};
use crate::output;

/// Arguments for the `plan` command.
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Manifest or preset to resolve.
    #[command(flatten)]
    pub source: SourceArgs,

    /// Build configuration.
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Print the plan as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Executes the `plan` command.
///
/// Loads the components, resolves them for the requested configuration and
/// prints the ordered plan.
///
/// # Errors
///
/// Returns an error if loading or resolution fails.
pub fn execute(args: PlanArgs) -> anyhow::Result<()> {
    let graph = args.source.load_graph()?;
    let config = args.config.to_config()?;
    let plan = graph.resolve(&config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print!("{}", output::render_plan(&plan));
        println!("  fingerprint: {}", plan.fingerprint()?);
    }
    Ok(())
}
