//! `lkp presets` — list built-in presets or print one.

use clap::Args;
use linkplan_common::error::PlanError;
use linkplan_graph::catalog;

/// Arguments for the `presets` command.
#[derive(Args, Debug)]
pub struct PresetsArgs {
    /// Preset to print; lists all presets when omitted.
    pub name: Option<String>,
}

/// Executes the `presets` command.
///
/// # Errors
///
/// Returns an error if the named preset does not exist.
pub fn execute(args: PresetsArgs) -> anyhow::Result<()> {
    match args.name {
        Some(name) => {
            let source = catalog::preset_source(&name).ok_or(PlanError::NotFound { kind: "preset", id: name })?;
            print!("{source}");
        }
        None => {
            for name in catalog::preset_names() {
                println!("{name}");
            }
        }
    }
    Ok(())
}
