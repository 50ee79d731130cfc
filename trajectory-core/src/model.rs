use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ============================================================================
// Outcome
// ============================================================================

/// Terminal (or in-flight) state of a subcall or tool call.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "../../trajectory-viewer/src/types/generated.ts")]
pub enum Outcome {
    Success,
    Failure,
    Running,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::Failure => "failure",
            Outcome::Running => "running",
        }
    }

    pub fn is_failure(self) -> bool {
        matches!(self, Outcome::Failure)
    }
}

// ============================================================================
// Leaf types
// ============================================================================

/// One tool invocation performed while a subcall executed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../../trajectory-viewer/src/types/generated.ts")]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub outcome: Outcome,
    #[ts(type = "number")]
    pub duration_ms: u64,
}

/// Input/output token pair, always displayed as their sum.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../../trajectory-viewer/src/types/generated.ts")]
pub struct TokenCounts {
    #[ts(type = "number")]
    pub input: u64,
    #[ts(type = "number")]
    pub output: u64,
}

impl TokenCounts {
    pub fn new(input: u64, output: u64) -> Self {
        Self { input, output }
    }

    pub fn total(&self) -> u64 {
        self.input.saturating_add(self.output)
    }
}

impl std::ops::Add for TokenCounts {
    type Output = TokenCounts;

    fn add(self, rhs: TokenCounts) -> TokenCounts {
        TokenCounts {
            input: self.input.saturating_add(rhs.input),
            output: self.output.saturating_add(rhs.output),
        }
    }
}

// ============================================================================
// Tree node
// ============================================================================

/// One nested invocation. Owns its tool calls and its subtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../../trajectory-viewer/src/types/generated.ts")]
pub struct Subcall {
    /// Unique across the whole trajectory; keys expansion state and callbacks.
    pub id: String,

    /// Roots are 0, every child is parent + 1.
    pub depth: u32,

    pub name: String,

    pub outcome: Outcome,

    pub started_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,

    #[ts(type = "number")]
    pub duration_ms: u64,

    pub tokens: TokenCounts,

    pub cost: f64,

    #[serde(default)]
    pub tool_calls: Vec<ToolCall>,

    #[serde(default)]
    pub children: Vec<Subcall>,

    /// Present only when `outcome` is `failure`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Subcall {
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }

    /// Number of nodes strictly below this one.
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| 1 + child.descendant_count())
            .sum()
    }
}

// ============================================================================
// Aggregate root
// ============================================================================

/// Full recorded trace of one agent run.
///
/// The summary fields come from the producer and are displayed verbatim; see
/// [`crate::stats::TreeStats`] for an audit-only recomputation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../../trajectory-viewer/src/types/generated.ts")]
pub struct Trajectory {
    pub run_id: String,
    pub total_subcalls: u32,
    pub max_depth: u32,
    pub total_tokens: TokenCounts,
    pub total_cost: f64,
    #[ts(type = "number")]
    pub total_duration_ms: u64,
    #[serde(default)]
    pub subcalls: Vec<Subcall>,
}

impl Trajectory {
    pub fn is_empty(&self) -> bool {
        self.subcalls.is_empty()
    }

    /// Pre-order walk yielding `(positional depth, node)`.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: self.subcalls.iter().rev().map(|node| (0, node)).collect(),
        }
    }

    pub fn find_subcall(&self, id: &str) -> Option<&Subcall> {
        self.walk().map(|(_, node)| node).find(|node| node.id == id)
    }
}

/// Iterator returned by [`Trajectory::walk`].
pub struct Walk<'a> {
    stack: Vec<(u32, &'a Subcall)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (u32, &'a Subcall);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|child| (depth + 1, child)));
        Some((depth, node))
    }
}
