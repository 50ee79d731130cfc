//! Statistics recomputed from the tree itself. Used to audit producer
//! summaries; display always uses the producer's values.

use crate::model::{TokenCounts, Trajectory};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TreeStats {
    pub subcalls: u32,
    pub max_depth: u32,
    pub tokens: TokenCounts,
    pub cost: f64,
    pub tool_calls: u32,
    pub failures: u32,
}

impl TreeStats {
    pub fn compute(trajectory: &Trajectory) -> Self {
        trajectory
            .walk()
            .fold(TreeStats::default(), |mut stats, (depth, node)| {
                stats.subcalls += 1;
                stats.max_depth = stats.max_depth.max(depth);
                stats.tokens = stats.tokens + node.tokens;
                stats.cost += node.cost;
                stats.tool_calls += node.tool_calls.len() as u32;
                if node.outcome.is_failure() {
                    stats.failures += 1;
                }
                stats
            })
    }

    /// Human-readable disagreements between these stats and the summary
    /// carried by `trajectory`.
    pub fn discrepancies(&self, trajectory: &Trajectory) -> Vec<String> {
        let mut out = Vec::new();
        if self.subcalls != trajectory.total_subcalls {
            out.push(format!(
                "totalSubcalls is {} but the tree has {}",
                trajectory.total_subcalls, self.subcalls
            ));
        }
        if !trajectory.is_empty() && self.max_depth != trajectory.max_depth {
            out.push(format!(
                "maxDepth is {} but the tree reaches {}",
                trajectory.max_depth, self.max_depth
            ));
        }
        if self.tokens != trajectory.total_tokens {
            out.push(format!(
                "totalTokens is {}/{} but the tree sums to {}/{}",
                trajectory.total_tokens.input,
                trajectory.total_tokens.output,
                self.tokens.input,
                self.tokens.output
            ));
        }
        if (self.cost - trajectory.total_cost).abs() > 0.005 {
            out.push(format!(
                "totalCost is {:.4} but the tree sums to {:.4}",
                trajectory.total_cost, self.cost
            ));
        }
        out
    }
}
