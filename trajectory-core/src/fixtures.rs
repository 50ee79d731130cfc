//! Tree builders shared by the unit tests.

use chrono::{TimeZone, Utc};

use crate::model::{Outcome, Subcall, TokenCounts, ToolCall, Trajectory};

pub fn leaf(id: &str, depth: u32) -> Subcall {
    let started_at = Utc.with_ymd_and_hms(2026, 2, 20, 10, 0, 0).unwrap();
    Subcall {
        id: id.to_string(),
        depth,
        name: format!("call {id}"),
        outcome: Outcome::Success,
        started_at,
        completed_at: Some(started_at + chrono::Duration::milliseconds(1_500)),
        duration_ms: 1_500,
        tokens: TokenCounts::new(100, 50),
        cost: 0.01,
        tool_calls: Vec::new(),
        children: Vec::new(),
        error: None,
    }
}

pub fn tool(id: &str) -> ToolCall {
    ToolCall {
        id: id.to_string(),
        name: "file_read".to_string(),
        outcome: Outcome::Success,
        duration_ms: 100,
    }
}

pub fn trajectory_of(subcalls: Vec<Subcall>) -> Trajectory {
    Trajectory {
        run_id: "run-test".to_string(),
        total_subcalls: 0,
        max_depth: 0,
        total_tokens: TokenCounts::default(),
        total_cost: 0.0,
        total_duration_ms: 0,
        subcalls,
    }
}

/// A single path `node-0 -> node-1 -> ... -> node-{len-1}`.
pub fn chain(len: u32) -> Subcall {
    let mut node = leaf(&format!("node-{}", len - 1), len - 1);
    for depth in (0..len - 1).rev() {
        let mut parent = leaf(&format!("node-{depth}"), depth);
        parent.children.push(node);
        node = parent;
    }
    node
}

/// Two roots; `root-a` nests two levels and carries tool calls, `root-b`
/// failed. The summary matches the tree.
pub fn sample() -> Trajectory {
    let mut fetch = leaf("fetch", 2);
    fetch.tokens = TokenCounts::new(400, 100);
    fetch.cost = 0.03;

    let mut search = leaf("search", 1);
    search.tokens = TokenCounts::new(800, 300);
    search.cost = 0.08;
    search.children.push(fetch);

    let mut plan = leaf("plan", 1);
    plan.tokens = TokenCounts::new(500, 200);
    plan.cost = 0.05;

    let mut root_a = leaf("root-a", 0);
    root_a.tokens = TokenCounts::new(1_000, 400);
    root_a.cost = 0.10;
    root_a.tool_calls = vec![
        tool("tool-read"),
        ToolCall {
            id: "tool-grep".to_string(),
            name: "grep".to_string(),
            outcome: Outcome::Failure,
            duration_ms: 2_400,
        },
    ];
    root_a.children = vec![plan, search];

    let mut root_b = leaf("root-b", 0);
    root_b.tokens = TokenCounts::new(300, 200);
    root_b.cost = 0.05;
    root_b.outcome = Outcome::Failure;
    root_b.error = Some("rate limited".to_string());

    Trajectory {
        run_id: "run-sample".to_string(),
        total_subcalls: 5,
        max_depth: 2,
        total_tokens: TokenCounts::new(3_000, 1_200),
        total_cost: 0.31,
        total_duration_ms: 300_000,
        subcalls: vec![root_a, root_b],
    }
}
