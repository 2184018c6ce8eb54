//! Human-readable rendering for CLI commands.

use std::fmt::Write;

use linkplan_common::error::PlanError;
use linkplan_graph::ResolvedPlan;

const RULE: &str = "\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}";

/// Renders a plan as indented text, one block per component.
#[must_use]
pub fn render_plan(plan: &ResolvedPlan) -> String {
    let mut out = String::new();
    let config = &plan.config;
    let _ = writeln!(
        out,
        "Link plan for: {} {} ({}, {}, {})",
        plan.package, config.version, config.platform, config.linkage, config.build_type
    );
    let _ = writeln!(out, "{RULE}");
    if !plan.features.is_empty() {
        let features: Vec<&str> = plan.features.iter().map(String::as_str).collect();
        let _ = writeln!(out, "  features: {}", features.join(", "));
    }
    if let Some(pic) = plan.position_independent {
        let _ = writeln!(out, "  pic: {}", if pic { "on" } else { "off" });
    }
    let _ = writeln!(out);

    for (i, component) in plan.components.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}  [{}]", i + 1, component.name, component.target);
        if let Some(library) = &component.library {
            let _ = writeln!(out, "       library:  {library}");
        }
        push_list(&mut out, "includes", &component.include_dirs);
        push_list(&mut out, "requires", &component.requires);
        push_list(&mut out, "external", &component.external);
        push_list(&mut out, "system", &component.system_libs);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "  {} component(s), {} to link.", plan.components.len(), plan.libraries().len());
    let link_order = plan.link_order();
    if !link_order.is_empty() {
        let _ = writeln!(out, "  link order: {}", link_order.join(" "));
    }
    if !plan.requirements.is_empty() {
        let packages: Vec<String> = plan.requirements.iter().map(|r| r.reference()).collect();
        let _ = writeln!(out, "  packages: {}", packages.join(" "));
    }
    let system = plan.system_libs();
    if !system.is_empty() {
        let _ = writeln!(out, "  system libraries: {}", system.join(" "));
    }
    out
}

fn push_list(out: &mut String, label: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(out, "       {:<9} {}", format!("{label}:"), items.join(", "));
}

/// Renders `check` findings, one per line.
#[must_use]
pub fn render_issues(issues: &[PlanError]) -> String {
    let mut out = String::new();
    for issue in issues {
        let _ = writeln!(out, "  \u{2717} {issue}");
    }
    out
}
