//! `lkp check` — report every problem in a component set.

use clap::Args;

use crate::commands::source::SourceArgs;
use crate::output;

/// Arguments for the `check` command.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Manifest or preset to check.
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Executes the `check` command.
///
/// Unlike `plan`, duplicates and dangling requirements are all collected
/// before reporting.
///
/// # Errors
///
/// Returns an error if the manifest cannot be loaded or has any issue.
pub fn execute(args: CheckArgs) -> anyhow::Result<()> {
    let manifest = args.source.load_manifest()?;
    let issues = manifest.diagnose();
    if issues.is_empty() {
        println!("ok: {} component(s), no issues", manifest.components.len());
        return Ok(());
    }
    print!("{}", output::render_issues(&issues));
    anyhow::bail!("{} issue(s) found", issues.len())
}
