//! Depth-bounded traversal: which ids "expand all" installs, and the visible
//! tree for a given expansion state.
//!
//! Both walks use positional depth (roots at 0, children at parent + 1) and
//! stop at the display bound, so their cost is bounded by `max_display_depth`
//! no matter how deep the recorded trajectory goes.

use crate::expansion::ExpansionState;
use crate::format::{
    format_cost, format_duration, format_tokens, group_thousands, nested_label, outcome_glyph,
};
use crate::model::{Outcome, Subcall, ToolCall, Trajectory};

// ── Constants ────────────────────────────────────────────────────────────────

pub const DEFAULT_MAX_DISPLAY_DEPTH: u32 = 10;
pub const LOADING_SKELETON_ROWS: usize = 3;
pub const EMPTY_TRAJECTORY_MESSAGE: &str = "No subcalls recorded for this run";
pub const LOAD_DEEPER_LABEL: &str = "Load deeper levels";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    pub max_display_depth: u32,
    pub is_loading: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_display_depth: DEFAULT_MAX_DISPLAY_DEPTH,
            is_loading: false,
        }
    }
}

impl RenderOptions {
    pub fn with_max_display_depth(max_display_depth: u32) -> Self {
        Self {
            max_display_depth,
            ..Self::default()
        }
    }
}

/// A node at or past the last displayable level that still has children.
pub fn is_depth_limited(node: &Subcall, depth: u32, max_display_depth: u32) -> bool {
    node.has_children() && depth >= max_display_depth.saturating_sub(1)
}

// ── Collect-expandable ───────────────────────────────────────────────────────

/// Ids "expand all" should reveal, in depth-first order.
pub fn collect_expandable(trajectory: &Trajectory, max_display_depth: u32) -> Vec<String> {
    let mut ids = Vec::new();
    for root in &trajectory.subcalls {
        collect_node(root, 0, max_display_depth, &mut ids);
    }
    ids
}

fn collect_node(node: &Subcall, depth: u32, max_display_depth: u32, ids: &mut Vec<String>) {
    if !node.has_children() || is_depth_limited(node, depth, max_display_depth) {
        return;
    }
    ids.push(node.id.clone());
    for child in &node.children {
        collect_node(child, depth + 1, max_display_depth, ids);
    }
}

// ── Render output ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum TrajectoryView {
    Loading { skeleton_rows: usize },
    Empty { summary: SummaryView, message: &'static str },
    Tree { summary: SummaryView, roots: Vec<NodeView> },
}

/// Producer-supplied totals, formatted but never recomputed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummaryView {
    pub run_id: String,
    pub total_subcalls: String,
    pub max_depth: String,
    pub total_tokens: String,
    pub total_cost: String,
    pub total_duration: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeView {
    pub id: String,
    pub name: String,
    pub depth: u32,
    pub outcome: Outcome,
    pub glyph: &'static str,
    pub duration: String,
    pub tokens: String,
    pub cost: String,
    pub error: Option<String>,
    pub child_count: usize,
    pub tool_count: usize,
    pub children_expanded: bool,
    pub tools_expanded: bool,
    /// Tool rows; empty unless `tools_expanded`.
    pub tools: Vec<ToolCallView>,
    pub body: NodeBody,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeBody {
    Leaf,
    Collapsed,
    Expanded(Vec<NodeView>),
    /// Children exist but sit beyond the display bound.
    DepthLimited { hidden: usize, label: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolCallView {
    pub id: String,
    pub name: String,
    pub outcome: Outcome,
    pub glyph: &'static str,
    pub duration: String,
}

impl TrajectoryView {
    pub fn summary(&self) -> Option<&SummaryView> {
        match self {
            TrajectoryView::Loading { .. } => None,
            TrajectoryView::Empty { summary, .. } | TrajectoryView::Tree { summary, .. } => {
                Some(summary)
            }
        }
    }

    pub fn roots(&self) -> &[NodeView] {
        match self {
            TrajectoryView::Tree { roots, .. } => roots,
            _ => &[],
        }
    }

    /// Every rendered node row in display order.
    pub fn visible_nodes(&self) -> Vec<&NodeView> {
        let mut out = Vec::new();
        for root in self.roots() {
            root.push_visible(&mut out);
        }
        out
    }

    pub fn visible_ids(&self) -> Vec<&str> {
        self.visible_nodes()
            .into_iter()
            .map(|node| node.id.as_str())
            .collect()
    }
}

impl NodeView {
    pub fn is_depth_limited(&self) -> bool {
        matches!(self.body, NodeBody::DepthLimited { .. })
    }

    pub fn visible_children(&self) -> &[NodeView] {
        match &self.body {
            NodeBody::Expanded(children) => children,
            _ => &[],
        }
    }

    fn push_visible<'a>(&'a self, out: &mut Vec<&'a NodeView>) {
        out.push(self);
        for child in self.visible_children() {
            child.push_visible(out);
        }
    }
}

// ── Render ───────────────────────────────────────────────────────────────────

/// Visible tree for `(trajectory, state, options)`. Pure: equal inputs give
/// equal output.
pub fn render(
    trajectory: &Trajectory,
    state: &ExpansionState,
    options: &RenderOptions,
) -> TrajectoryView {
    if options.is_loading {
        return TrajectoryView::Loading {
            skeleton_rows: LOADING_SKELETON_ROWS,
        };
    }
    let summary = summarize(trajectory);
    if trajectory.is_empty() {
        return TrajectoryView::Empty {
            summary,
            message: EMPTY_TRAJECTORY_MESSAGE,
        };
    }
    let roots = trajectory
        .subcalls
        .iter()
        .map(|root| render_node(root, 0, state, options.max_display_depth))
        .collect();
    TrajectoryView::Tree { summary, roots }
}

pub fn summarize(trajectory: &Trajectory) -> SummaryView {
    SummaryView {
        run_id: trajectory.run_id.clone(),
        total_subcalls: group_thousands(u64::from(trajectory.total_subcalls)),
        max_depth: trajectory.max_depth.to_string(),
        total_tokens: format_tokens(&trajectory.total_tokens),
        total_cost: format_cost(trajectory.total_cost),
        total_duration: format_duration(trajectory.total_duration_ms),
    }
}

fn render_node(
    node: &Subcall,
    depth: u32,
    state: &ExpansionState,
    max_display_depth: u32,
) -> NodeView {
    let flags = state.node(&node.id);
    let tools_expanded = flags.tools_shown && node.has_tool_calls();
    let body = if !node.has_children() {
        NodeBody::Leaf
    } else if is_depth_limited(node, depth, max_display_depth) {
        NodeBody::DepthLimited {
            hidden: node.children.len(),
            label: nested_label(node.children.len()),
        }
    } else if flags.children_shown {
        NodeBody::Expanded(
            node.children
                .iter()
                .map(|child| render_node(child, depth + 1, state, max_display_depth))
                .collect(),
        )
    } else {
        NodeBody::Collapsed
    };

    NodeView {
        id: node.id.clone(),
        name: node.name.clone(),
        depth,
        outcome: node.outcome,
        glyph: outcome_glyph(node.outcome),
        duration: format_duration(node.duration_ms),
        tokens: format_tokens(&node.tokens),
        cost: format_cost(node.cost),
        error: node
            .error
            .clone()
            .filter(|_| node.outcome.is_failure()),
        child_count: node.children.len(),
        tool_count: node.tool_calls.len(),
        children_expanded: matches!(body, NodeBody::Expanded(_)),
        tools_expanded,
        tools: if tools_expanded {
            node.tool_calls.iter().map(render_tool_call).collect()
        } else {
            Vec::new()
        },
        body,
    }
}

fn render_tool_call(call: &ToolCall) -> ToolCallView {
    ToolCallView {
        id: call.id.clone(),
        name: call.name.clone(),
        outcome: call.outcome,
        glyph: outcome_glyph(call.outcome),
        duration: format_duration(call.duration_ms),
    }
}
