//! Viewer-owned record of which subcalls show their children and tool calls.

use std::collections::{BTreeMap, BTreeSet};

use crate::model::Subcall;

/// Per-node flags. Both flags live in one record so they cannot drift apart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeExpansion {
    pub children_shown: bool,
    pub tools_shown: bool,
}

impl NodeExpansion {
    fn is_collapsed(&self) -> bool {
        !self.children_shown && !self.tools_shown
    }
}

/// Expansion state keyed by subcall id. Starts empty (everything collapsed).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    nodes: BTreeMap<String, NodeExpansion>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, id: &str) -> NodeExpansion {
        self.nodes.get(id).copied().unwrap_or_default()
    }

    pub fn is_children_expanded(&self, id: &str) -> bool {
        self.node(id).children_shown
    }

    pub fn is_tools_expanded(&self, id: &str) -> bool {
        self.node(id).tools_shown
    }

    pub fn children_expanded_ids(&self) -> BTreeSet<String> {
        self.nodes
            .iter()
            .filter(|(_, flags)| flags.children_shown)
            .map(|(id, _)| id.clone())
            .collect()
    }

    pub fn tools_expanded_ids(&self) -> BTreeSet<String> {
        self.nodes
            .iter()
            .filter(|(_, flags)| flags.tools_shown)
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Flip whether `node`'s children are shown. Leaves are ignored.
    pub fn toggle_node(&mut self, node: &Subcall) {
        if !node.has_children() {
            return;
        }
        self.update(&node.id, |flags| flags.children_shown = !flags.children_shown);
    }

    /// Flip whether `node`'s tool calls are shown. Ignored without tool calls.
    pub fn toggle_tools(&mut self, node: &Subcall) {
        if !node.has_tool_calls() {
            return;
        }
        self.update(&node.id, |flags| flags.tools_shown = !flags.tools_shown);
    }

    /// Replace the children-expanded set with exactly `ids`.
    pub fn expand_all<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.clear_children();
        for id in ids {
            self.nodes.entry(id.into()).or_default().children_shown = true;
        }
    }

    /// Hide every node's children. Tool-call expansion is kept.
    pub fn collapse_all(&mut self) {
        self.clear_children();
    }

    /// Forget everything, e.g. when a different trajectory is shown.
    pub fn reset(&mut self) {
        self.nodes.clear();
    }

    fn clear_children(&mut self) {
        for flags in self.nodes.values_mut() {
            flags.children_shown = false;
        }
        self.nodes.retain(|_, flags| !flags.is_collapsed());
    }

    fn update(&mut self, id: &str, apply: impl FnOnce(&mut NodeExpansion)) {
        let flags = self.nodes.entry(id.to_string()).or_default();
        apply(flags);
        if flags.is_collapsed() {
            self.nodes.remove(id);
        }
    }
}
