//! RLM trajectory core
//!
//! Shared by:
//! - the Dioxus trajectory viewer (WASM)
//! - the `trajectory-inspect` CLI (native)
//!
//! The model is serializable with serde (camelCase JSON) and exported to
//! TypeScript for the dashboard host. Everything else here is pure: the
//! expansion store, the depth-bounded traversal and display formatting never
//! perform I/O.

pub mod expansion;
pub mod format;
pub mod interaction;
pub mod model;
pub mod stats;
pub mod traversal;
pub mod validate;

#[cfg(test)]
mod fixtures;

pub use expansion::{ExpansionState, NodeExpansion};
pub use interaction::{apply_action, HostEvent, ViewerAction};
pub use model::{Outcome, Subcall, TokenCounts, ToolCall, Trajectory, Walk};
pub use stats::TreeStats;
pub use traversal::{
    collect_expandable, is_depth_limited, render, NodeBody, NodeView, RenderOptions, SummaryView,
    ToolCallView, TrajectoryView, DEFAULT_MAX_DISPLAY_DEPTH,
};
pub use validate::TrajectoryError;

#[cfg(test)]
mod tests {
    use super::*;
    use ts_rs::{Config, TS};

    const DEMO_TRAJECTORY: &str = include_str!("../../fixtures/demo-trajectory.json");

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_string(&Outcome::Running).unwrap();
        assert_eq!(json, "\"running\"");
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let raw = serde_json::json!({
            "runId": "run-1",
            "totalSubcalls": 1,
            "maxDepth": 0,
            "totalTokens": { "input": 10, "output": 5 },
            "totalCost": 0.01,
            "totalDurationMs": 250,
            "subcalls": [{
                "id": "only",
                "depth": 0,
                "name": "answer",
                "outcome": "failure",
                "startedAt": "2026-02-20T10:00:00Z",
                "durationMs": 250,
                "tokens": { "input": 10, "output": 5 },
                "cost": 0.01,
                "error": "tool budget exhausted"
            }]
        });
        let trajectory = Trajectory::from_json(&raw.to_string()).unwrap();
        let node = &trajectory.subcalls[0];
        assert!(node.tool_calls.is_empty());
        assert!(node.children.is_empty());
        assert!(node.completed_at.is_none());
        assert_eq!(node.error.as_deref(), Some("tool budget exhausted"));

        let back = serde_json::to_value(&trajectory).unwrap();
        assert_eq!(back["subcalls"][0]["durationMs"], 250);
        assert!(back["subcalls"][0].get("completedAt").is_none());
    }

    #[test]
    fn test_demo_fixture_is_valid() {
        let trajectory = Trajectory::from_json(DEMO_TRAJECTORY).unwrap();
        let stats = TreeStats::compute(&trajectory);
        assert!(stats.max_depth >= DEFAULT_MAX_DISPLAY_DEPTH);
        assert!(stats.discrepancies(&trajectory).is_empty());
    }

    #[test]
    fn test_walk_is_pre_order_with_positional_depth() {
        let trajectory = fixtures::sample();
        let order: Vec<(u32, &str)> = trajectory
            .walk()
            .map(|(depth, node)| (depth, node.id.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                (0, "root-a"),
                (1, "plan"),
                (1, "search"),
                (2, "fetch"),
                (0, "root-b")
            ]
        );
        assert_eq!(trajectory.find_subcall("fetch").map(|n| n.depth), Some(2));
        assert!(trajectory.find_subcall("nope").is_none());
    }

    #[test]
    fn export_types() {
        // The export_to attribute on each type picks the output file
        let config = Config::default();
        Outcome::export(&config).unwrap();
        ToolCall::export(&config).unwrap();
        TokenCounts::export(&config).unwrap();
        Subcall::export(&config).unwrap();
        Trajectory::export(&config).unwrap();
    }
}
