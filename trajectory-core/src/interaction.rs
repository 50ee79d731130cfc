//! User actions and the host notifications they produce.
//!
//! Every action is applied synchronously and yields at most one
//! [`HostEvent`].

use crate::expansion::ExpansionState;
use crate::model::Trajectory;
use crate::traversal::collect_expandable;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewerAction {
    ToggleNode(String),
    ToggleTools(String),
    ExpandAll,
    CollapseAll,
    ActivateSubcall(String),
    ActivateToolCall(String),
    LoadDeeper(String),
}

/// Callback the host should receive for an action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HostEvent {
    SubcallClicked(String),
    ToolCallClicked(String),
    LoadDeeperRequested(String),
}

/// Apply `action` to `state`. Only the toggle and bulk actions touch state;
/// activation actions only produce a host event.
pub fn apply_action(
    trajectory: &Trajectory,
    state: &mut ExpansionState,
    max_display_depth: u32,
    action: ViewerAction,
) -> Option<HostEvent> {
    match action {
        ViewerAction::ToggleNode(id) => {
            if let Some(node) = trajectory.find_subcall(&id) {
                state.toggle_node(node);
            }
            None
        }
        ViewerAction::ToggleTools(id) => {
            if let Some(node) = trajectory.find_subcall(&id) {
                state.toggle_tools(node);
            }
            None
        }
        ViewerAction::ExpandAll => {
            state.expand_all(collect_expandable(trajectory, max_display_depth));
            None
        }
        ViewerAction::CollapseAll => {
            state.collapse_all();
            None
        }
        ViewerAction::ActivateSubcall(id) => Some(HostEvent::SubcallClicked(id)),
        ViewerAction::ActivateToolCall(id) => Some(HostEvent::ToolCallClicked(id)),
        ViewerAction::LoadDeeper(id) => Some(HostEvent::LoadDeeperRequested(id)),
    }
}
