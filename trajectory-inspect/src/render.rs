//! Plain-text rendering of the visible trajectory tree.

use std::fmt::{self, Write};

use trajectory_core::{NodeBody, NodeView, SummaryView, TrajectoryView};

const INDENT: &str = "  ";

pub fn render_text(view: &TrajectoryView) -> String {
    let mut out = String::new();
    // Formatting into a String only fails if a Display impl does.
    if let Err(err) = write_view(&mut out, view) {
        tracing::warn!("trajectory text truncated: {err}");
    }
    out
}

fn write_view(out: &mut impl Write, view: &TrajectoryView) -> fmt::Result {
    match view {
        TrajectoryView::Loading { skeleton_rows } => {
            for _ in 0..*skeleton_rows {
                writeln!(out, "░░░░░░░░░░░░░░░░░░░░")?;
            }
        }
        TrajectoryView::Empty { summary, message } => {
            write_summary(out, summary)?;
            writeln!(out, "{message}")?;
        }
        TrajectoryView::Tree { summary, roots } => {
            write_summary(out, summary)?;
            for root in roots {
                write_node(out, root)?;
            }
        }
    }
    Ok(())
}

fn write_summary(out: &mut impl Write, summary: &SummaryView) -> fmt::Result {
    writeln!(
        out,
        "run {} | {} subcalls | depth {} | {} tokens | {} | {}",
        summary.run_id,
        summary.total_subcalls,
        summary.max_depth,
        summary.total_tokens,
        summary.total_cost,
        summary.total_duration
    )
}

fn write_node(out: &mut impl Write, node: &NodeView) -> fmt::Result {
    let pad = INDENT.repeat(node.depth as usize);
    let marker = match node.body {
        NodeBody::Leaf => " ",
        NodeBody::Collapsed => "▸",
        NodeBody::Expanded(_) => "▾",
        NodeBody::DepthLimited { .. } => "…",
    };
    writeln!(
        out,
        "{pad}{marker} {} {} [{}]  {}  {} tok  {}",
        node.glyph, node.name, node.id, node.duration, node.tokens, node.cost
    )?;
    if let Some(error) = &node.error {
        writeln!(out, "{pad}    error: {error}")?;
    }
    for call in &node.tools {
        writeln!(
            out,
            "{pad}    - {} {} [{}] {} {}",
            call.glyph,
            call.name,
            call.id,
            call.outcome.as_str(),
            call.duration
        )?;
    }
    match &node.body {
        NodeBody::Expanded(children) => {
            for child in children {
                write_node(out, child)?;
            }
        }
        NodeBody::DepthLimited { label, .. } => {
            writeln!(out, "{pad}{INDENT}  {label} (load deeper levels)")?;
        }
        NodeBody::Leaf | NodeBody::Collapsed => {}
    }
    Ok(())
}
