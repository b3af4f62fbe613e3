use std::fmt;
use std::fs;
use std::path::Path;
use tracing::info;

use super::error::Error;
use patrol_core::PatrolPlan;

/// Renders the plan as a Graphviz DOT document.
pub fn render_dot(plan: &PatrolPlan) -> Result<String, Error> {
    let mut out = String::new();
    write_dot_to(&mut out, plan)?;
    Ok(out)
}

/// Writes the DOT document for `plan` into `out`.
///
/// Vertex width/height come from the kill-based size hint, fill colour from
/// the jump-based colour hint (HSV value channel), and edge `penwidth` marks
/// the recommended loop.
pub fn write_dot_to<W: fmt::Write>(out: &mut W, plan: &PatrolPlan) -> fmt::Result {
    let hints = plan.render_hints();

    writeln!(out, "graph patrol {{")?;
    writeln!(out, "  graph [size=\"100,100\", overlap=prism, ratio=fill];")?;
    writeln!(out, "  node [shape=circle, style=filled, fixedsize=true];")?;

    for (idx, location) in plan.graph.locations.iter().enumerate() {
        let size = hints.vertex_sizes[idx];
        let color = hints.vertex_colors[idx];
        writeln!(
            out,
            "  {} [label=\"{}\", width={:.3}, height={:.3}, fillcolor=\"0.000 1.000 {:.3}\"];",
            location.id,
            escape_label(&location.name),
            size,
            size,
            color
        )?;
    }

    for ((a, b), width) in &hints.edge_pen_widths {
        writeln!(out, "  {} -- {} [penwidth={}];", a, b, width)?;
    }

    writeln!(out, "}}")
}

/// Writes the DOT rendering of `plan` to `path`.
pub fn write_dot(plan: &PatrolPlan, path: &Path) -> Result<(), Error> {
    fs::write(path, render_dot(plan)?)?;
    info!(path = %path.display(), "wrote graph");
    Ok(())
}

fn escape_label(name: &str) -> String {
    name.replace('\\', "\\\\").replace('"', "\\\"")
}
