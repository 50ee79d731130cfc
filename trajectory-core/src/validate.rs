//! Load-time checks for trajectories handed over by a producer.
//!
//! Rendering never fails; malformed producer output is rejected here instead.

use std::collections::HashSet;

use thiserror::Error;

use crate::model::{Outcome, Subcall, Trajectory};

#[derive(Debug, Error)]
pub enum TrajectoryError {
    #[error("failed to parse trajectory JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("subcall '{id}' has depth {found}, expected {expected}")]
    DepthMismatch {
        id: String,
        expected: u32,
        found: u32,
    },

    #[error("subcall id '{0}' appears more than once")]
    DuplicateId(String),

    #[error("subcall '{id}' is {outcome} but {detail}")]
    ErrorOutcomeMismatch {
        id: String,
        outcome: &'static str,
        detail: &'static str,
    },

    #[error("subcall '{id}' has invalid cost {cost}")]
    InvalidCost { id: String, cost: f64 },
}

impl Trajectory {
    pub fn from_json(raw: &str) -> Result<Self, TrajectoryError> {
        let trajectory: Trajectory = serde_json::from_str(raw)?;
        trajectory.validate()?;
        Ok(trajectory)
    }

    pub fn to_json(&self) -> Result<String, TrajectoryError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check tree invariants: positional depth, globally unique ids,
    /// `error` present exactly on failed subcalls, finite non-negative cost.
    pub fn validate(&self) -> Result<(), TrajectoryError> {
        let mut seen = HashSet::new();
        for (expected, node) in self.walk() {
            check_node(node, expected, &mut seen)?;
        }
        Ok(())
    }
}

fn check_node<'a>(
    node: &'a Subcall,
    expected_depth: u32,
    seen: &mut HashSet<&'a str>,
) -> Result<(), TrajectoryError> {
    if node.depth != expected_depth {
        return Err(TrajectoryError::DepthMismatch {
            id: node.id.clone(),
            expected: expected_depth,
            found: node.depth,
        });
    }
    if !seen.insert(node.id.as_str()) {
        return Err(TrajectoryError::DuplicateId(node.id.clone()));
    }
    match (node.outcome, node.error.is_some()) {
        (Outcome::Failure, false) => {
            return Err(TrajectoryError::ErrorOutcomeMismatch {
                id: node.id.clone(),
                outcome: node.outcome.as_str(),
                detail: "has no error message",
            })
        }
        (Outcome::Success | Outcome::Running, true) => {
            return Err(TrajectoryError::ErrorOutcomeMismatch {
                id: node.id.clone(),
                outcome: node.outcome.as_str(),
                detail: "carries an error message",
            })
        }
        _ => {}
    }
    if !node.cost.is_finite() || node.cost < 0.0 {
        return Err(TrajectoryError::InvalidCost {
            id: node.id.clone(),
            cost: node.cost,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{leaf, trajectory_of};

    #[test]
    fn test_valid_tree_passes() {
        let mut root = leaf("root", 0);
        root.children.push(leaf("child", 1));
        assert!(trajectory_of(vec![root]).validate().is_ok());
    }

    #[test]
    fn test_depth_mismatch_rejected() {
        let mut root = leaf("root", 0);
        root.children.push(leaf("child", 3));
        let err = trajectory_of(vec![root]).validate().unwrap_err();
        assert!(matches!(
            err,
            TrajectoryError::DepthMismatch { expected: 1, found: 3, .. }
        ));
    }

    #[test]
    fn test_duplicate_id_rejected_across_branches() {
        let mut a = leaf("a", 0);
        a.children.push(leaf("dup", 1));
        let mut b = leaf("b", 0);
        b.children.push(leaf("dup", 1));
        let err = trajectory_of(vec![a, b]).validate().unwrap_err();
        assert!(matches!(err, TrajectoryError::DuplicateId(id) if id == "dup"));
    }

    #[test]
    fn test_failure_without_error_rejected() {
        let mut node = leaf("broken", 0);
        node.outcome = Outcome::Failure;
        let err = trajectory_of(vec![node]).validate().unwrap_err();
        assert!(err.to_string().contains("has no error message"));
    }

    #[test]
    fn test_error_on_success_rejected() {
        let mut node = leaf("odd", 0);
        node.error = Some("boom".to_string());
        assert!(trajectory_of(vec![node]).validate().is_err());
    }

    #[test]
    fn test_negative_cost_rejected() {
        let mut node = leaf("cheap", 0);
        node.cost = -0.01;
        let err = trajectory_of(vec![node]).validate().unwrap_err();
        assert!(matches!(err, TrajectoryError::InvalidCost { .. }));
    }

    #[test]
    fn test_from_json_reports_parse_errors() {
        let err = Trajectory::from_json("{not json").unwrap_err();
        assert!(matches!(err, TrajectoryError::Parse(_)));
    }
}
