//! @acp:module "Filter Command"
//! @acp:summary "Project an element manifest onto its visible API surface"
//! @acp:domain cli
//! @acp:layer handler

use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;
use serde::Serialize;

use crate::config::OutputFormat;
use crate::surface::{explain, filter_surface, ElementNode, ExplainedElement, Manifest, Surface};
use crate::visibility::VisibilityPolicy;

/// Options for the filter command
#[derive(Debug, Clone)]
pub struct FilterOptions {
    /// Manifest to read (.json, .yaml, .yml)
    pub manifest: PathBuf,
    /// Output format
    pub format: OutputFormat,
    /// Write output here instead of stdout
    pub output: Option<PathBuf>,
    /// Include every per-element decision
    pub explain: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FilterReport<'a> {
    #[serde(flatten)]
    surface: &'a Surface,
    #[serde(skip_serializing_if = "Option::is_none")]
    decisions: Option<Vec<ExplainedElement>>,
}

/// Execute the filter command
pub fn execute_filter(options: FilterOptions, policy: VisibilityPolicy) -> Result<Surface> {
    let manifest = Manifest::load(&options.manifest)
        .with_context(|| format!("Failed to load manifest {}", options.manifest.display()))?;

    let surface = filter_surface(&manifest, &policy);
    let decisions = options.explain.then(|| explain(&manifest, &policy));

    let rendered = match options.format {
        OutputFormat::Tree => {
            let mut out = render_tree(&surface.elements);
            if let Some(decisions) = &decisions {
                out.push_str(&render_decisions(decisions));
            }
            out
        }
        OutputFormat::Json => serde_json::to_string_pretty(&FilterReport {
            surface: &surface,
            decisions,
        })?,
        OutputFormat::Yaml => serde_yaml::to_string(&FilterReport {
            surface: &surface,
            decisions,
        })?,
    };

    match &options.output {
        Some(path) => {
            std::fs::write(path, &rendered)?;
            println!("{} Surface written to {}", style("✓").green(), path.display());
        }
        None => println!("{}", rendered),
    }

    if options.format == OutputFormat::Tree || options.output.is_some() {
        print_summary(&surface);
    }

    Ok(surface)
}

/// Render elements as an indented tree
pub fn render_tree(elements: &[ElementNode]) -> String {
    let mut out = String::new();
    for element in elements {
        render_node(element, 0, &mut out);
    }
    out
}

fn render_node(node: &ElementNode, depth: usize, out: &mut String) {
    let mut markers = Vec::new();
    if let Some(audience) = node.audience {
        markers.push(audience.to_string());
    }
    if let Some(stability) = node.stability {
        markers.push(stability.to_string());
    }

    out.push_str(&"  ".repeat(depth));
    out.push_str(&format!("{} {}", node.kind, node.name));
    if !markers.is_empty() {
        out.push_str(&format!(" [{}]", markers.join(", ")));
    }
    out.push('\n');

    for child in &node.children {
        render_node(child, depth + 1, out);
    }
}

fn render_decisions(decisions: &[ExplainedElement]) -> String {
    let mut out = String::from("\nDecisions:\n");
    for decision in decisions {
        let mark = if decision.included { "+" } else { "-" };
        out.push_str(&format!(
            "  {} {} ({}): {}\n",
            mark, decision.path, decision.stage, decision.reason
        ));
    }
    out
}

fn print_summary(surface: &Surface) {
    let stats = &surface.stats;
    eprintln!(
        "{} {} included, {} excluded, {} pruned ({})",
        style("→").cyan(),
        style(stats.included).green(),
        style(stats.excluded).red(),
        style(stats.pruned).dim(),
        surface.policy
    );
}
