use dioxus::prelude::*;
use trajectory_core::{
    apply_action, render, ExpansionState, HostEvent, NodeBody, NodeView, Outcome, RenderOptions,
    SummaryView, Trajectory, TrajectoryView, ViewerAction, DEFAULT_MAX_DISPLAY_DEPTH,
};
use trajectory_core::traversal::LOAD_DEEPER_LABEL;

use super::styles::TRAJECTORY_STYLES;

// ── View helper fns ──────────────────────────────────────────────────────────

pub fn outcome_class(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Success => "rlm-node-row rlm-node-row--success",
        Outcome::Failure => "rlm-node-row rlm-node-row--failure",
        Outcome::Running => "rlm-node-row rlm-node-row--running",
    }
}

pub fn tool_class(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Success => "rlm-tool-row rlm-tool-row--success",
        Outcome::Failure => "rlm-tool-row rlm-tool-row--failure",
        Outcome::Running => "rlm-tool-row rlm-tool-row--running",
    }
}

pub fn toggle_glyph(expanded: bool) -> &'static str {
    if expanded {
        "▾"
    } else {
        "▸"
    }
}

pub fn tools_toggle_label(count: usize, expanded: bool) -> String {
    let noun = if count == 1 { "tool" } else { "tools" };
    if expanded {
        format!("hide {count} {noun}")
    } else {
        format!("{count} {noun}")
    }
}

/// The expansion state that applies to `trajectory`. State recorded against
/// any other trajectory value is discarded, even when the run id matches.
fn state_for(stored: &(Trajectory, ExpansionState), trajectory: &Trajectory) -> ExpansionState {
    let (owner, state) = stored;
    if owner == trajectory {
        state.clone()
    } else {
        ExpansionState::new()
    }
}

// ── RlmTrajectory component ──────────────────────────────────────────────────

/// Collapsible view of a recursive execution trajectory.
///
/// Expansion state lives inside the component and belongs to the exact
/// `trajectory` value it was built against. Passing any different value
/// (a new run, or a refetch of the same run with changed content) starts
/// again from the collapsed state.
#[component]
pub fn RlmTrajectory(
    trajectory: Trajectory,
    #[props(default)] is_loading: bool,
    #[props(default = DEFAULT_MAX_DISPLAY_DEPTH)] max_display_depth: u32,
    on_subcall_click: Option<EventHandler<String>>,
    on_tool_call_click: Option<EventHandler<String>>,
    on_load_deeper: Option<EventHandler<String>>,
) -> Element {
    let mut expansion = use_signal(|| (trajectory.clone(), ExpansionState::new()));

    let dispatch = {
        let trajectory = trajectory.clone();
        use_callback(move |action: ViewerAction| {
            let event = {
                let mut stored = expansion.write();
                let (owner, state) = &mut *stored;
                if *owner != trajectory {
                    *owner = trajectory.clone();
                    state.reset();
                }
                let is_expand_all = action == ViewerAction::ExpandAll;
                let event = apply_action(&trajectory, state, max_display_depth, action);
                if is_expand_all {
                    dioxus_logger::tracing::debug!(
                        "Expanded {} subcalls in run {}",
                        state.children_expanded_ids().len(),
                        trajectory.run_id
                    );
                }
                event
            };
            match event {
                Some(HostEvent::SubcallClicked(id)) => {
                    if let Some(handler) = on_subcall_click {
                        handler.call(id);
                    }
                }
                Some(HostEvent::ToolCallClicked(id)) => {
                    if let Some(handler) = on_tool_call_click {
                        handler.call(id);
                    }
                }
                Some(HostEvent::LoadDeeperRequested(id)) => match on_load_deeper {
                    Some(handler) => handler.call(id),
                    None => dioxus_logger::tracing::warn!(
                        "Load deeper requested for {} but no handler is attached",
                        id
                    ),
                },
                None => {}
            }
        })
    };

    let state = state_for(&expansion.read(), &trajectory);
    let view = render(
        &trajectory,
        &state,
        &RenderOptions {
            max_display_depth,
            is_loading,
        },
    );
    let can_load_deeper = on_load_deeper.is_some();

    rsx! {
        style { {TRAJECTORY_STYLES} }
        div {
            class: "rlm-trajectory",
            {match view {
                TrajectoryView::Loading { skeleton_rows } => rsx! {
                    div {
                        class: "rlm-skeleton",
                        for idx in 0..skeleton_rows {
                            div { key: "{idx}", class: "rlm-skeleton-row" }
                        }
                    }
                },
                TrajectoryView::Empty { summary, message } => rsx! {
                    SummaryHeader { summary: summary.clone(), dispatch, has_nodes: false }
                    div {
                        class: "empty-state",
                        p { "{message}" }
                    }
                },
                TrajectoryView::Tree { summary, roots } => rsx! {
                    SummaryHeader { summary: summary.clone(), dispatch, has_nodes: true }
                    div {
                        class: "rlm-tree",
                        for root in roots {
                            SubcallNode {
                                key: "{root.id}",
                                node: root.clone(),
                                dispatch,
                                can_load_deeper,
                            }
                        }
                    }
                },
            }}
        }
    }
}

#[component]
fn SummaryHeader(
    summary: SummaryView,
    dispatch: Callback<ViewerAction>,
    has_nodes: bool,
) -> Element {
    rsx! {
        div {
            class: "rlm-summary",
            div {
                class: "rlm-summary-metrics",
                span { class: "rlm-pill", "run {summary.run_id}" }
                span { class: "rlm-pill", "{summary.total_subcalls} subcalls" }
                span { class: "rlm-pill", "depth {summary.max_depth}" }
                span { class: "rlm-pill", "{summary.total_tokens} tokens" }
                span { class: "rlm-pill", "{summary.total_cost}" }
                span { class: "rlm-pill", "{summary.total_duration}" }
            }
            if has_nodes {
                div {
                    class: "rlm-summary-actions",
                    button {
                        class: "rlm-action",
                        onclick: move |_| dispatch.call(ViewerAction::ExpandAll),
                        "Expand all"
                    }
                    button {
                        class: "rlm-action",
                        onclick: move |_| dispatch.call(ViewerAction::CollapseAll),
                        "Collapse all"
                    }
                }
            }
        }
    }
}

#[component]
fn SubcallNode(node: NodeView, dispatch: Callback<ViewerAction>, can_load_deeper: bool) -> Element {
    let row_class = outcome_class(node.outcome);
    let show_children_toggle = node.child_count > 0 && !node.is_depth_limited();

    // Nesting depth comes from the constant `.rlm-children` padding, so
    // nodes carry no per-depth offset of their own.
    rsx! {
        div {
            class: "rlm-node",
            div {
                class: "rlm-node-main",
                onclick: {
                    let id = node.id.clone();
                    move |_| dispatch.call(ViewerAction::ActivateSubcall(id.clone()))
                },
                div {
                    class: "{row_class}",
                    if show_children_toggle {
                        button {
                            class: "rlm-toggle",
                            "aria-expanded": node.children_expanded,
                            onclick: {
                                let id = node.id.clone();
                                move |evt: MouseEvent| {
                                    evt.stop_propagation();
                                    dispatch.call(ViewerAction::ToggleNode(id.clone()));
                                }
                            },
                            "{toggle_glyph(node.children_expanded)}"
                        }
                    } else {
                        span { class: "rlm-toggle-spacer" }
                    }
                    span { class: "rlm-glyph", "{node.glyph}" }
                    span { class: "rlm-node-name", "{node.name}" }
                    span { class: "rlm-metric", "{node.duration}" }
                    span { class: "rlm-metric", "{node.tokens} tok" }
                    span { class: "rlm-metric", "{node.cost}" }
                    if node.tool_count > 0 {
                        button {
                            class: "rlm-pill",
                            onclick: {
                                let id = node.id.clone();
                                move |evt: MouseEvent| {
                                    evt.stop_propagation();
                                    dispatch.call(ViewerAction::ToggleTools(id.clone()));
                                }
                            },
                            "{tools_toggle_label(node.tool_count, node.tools_expanded)}"
                        }
                    }
                }
                if let Some(error) = node.error.as_ref() {
                    div { class: "rlm-node-error", "{error}" }
                }
            }
            // Tool rows sit outside `.rlm-node-main`: a tool click never
            // reaches the subcall handler.
            if !node.tools.is_empty() {
                div {
                    class: "rlm-tool-list",
                    for call in node.tools.iter() {
                        div {
                            key: "{call.id}",
                            class: "{tool_class(call.outcome)}",
                            onclick: {
                                let id = call.id.clone();
                                move |evt: MouseEvent| {
                                    evt.stop_propagation();
                                    dispatch.call(ViewerAction::ActivateToolCall(id.clone()));
                                }
                            },
                            span { class: "rlm-glyph", "{call.glyph}" }
                            span { class: "rlm-tool-name", "{call.name}" }
                            span { class: "rlm-metric", "{call.outcome.as_str()}" }
                            span { class: "rlm-metric", "{call.duration}" }
                        }
                    }
                }
            }
            {match &node.body {
                NodeBody::Expanded(children) => rsx! {
                    div {
                        class: "rlm-children",
                        for child in children.iter() {
                            SubcallNode {
                                key: "{child.id}",
                                node: child.clone(),
                                dispatch,
                                can_load_deeper,
                            }
                        }
                    }
                },
                NodeBody::DepthLimited { label, .. } => rsx! {
                    div {
                        class: "rlm-depth-limit",
                        span { "{label}" }
                        button {
                            class: "rlm-action",
                            disabled: !can_load_deeper,
                            onclick: {
                                let id = node.id.clone();
                                move |_| dispatch.call(ViewerAction::LoadDeeper(id.clone()))
                            },
                            "{LOAD_DEEPER_LABEL}"
                        }
                    }
                },
                NodeBody::Leaf | NodeBody::Collapsed => rsx! {},
            }}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trajectory_core::collect_expandable;

    const DEMO_TRAJECTORY: &str = include_str!("../../../../fixtures/demo-trajectory.json");

    fn demo() -> Trajectory {
        Trajectory::from_json(DEMO_TRAJECTORY).expect("demo fixture")
    }

    fn render_html(app: fn() -> Element) -> String {
        let mut dom = VirtualDom::new(app);
        dom.rebuild_in_place();
        dioxus_ssr::render(&dom)
    }

    /// Markup with listener markers (`data-node-hydration`) kept in.
    fn render_hydratable(app: fn() -> Element) -> String {
        let mut dom = VirtualDom::new(app);
        dom.rebuild_in_place();
        let mut renderer = dioxus_ssr::Renderer::new();
        renderer.pre_render = true;
        renderer.render(&dom)
    }

    /// Outer markup of the first `div` whose class attribute starts with `class`.
    fn outer_div<'a>(html: &'a str, class: &str) -> &'a str {
        let start = html
            .find(&format!("<div class=\"{class}"))
            .unwrap_or_else(|| panic!("no div with class {class} in {html}"));
        let mut depth = 0usize;
        let mut cursor = start;
        loop {
            let close = cursor + html[cursor..].find("</div>").expect("unbalanced markup");
            match html[cursor..].find("<div").map(|i| i + cursor) {
                Some(open) if open < close => {
                    depth += 1;
                    cursor = open + "<div".len();
                }
                _ => {
                    depth -= 1;
                    cursor = close + "</div>".len();
                    if depth == 0 {
                        return &html[start..cursor];
                    }
                }
            }
        }
    }

    /// Opening tags of every element whose markup contains `marker`.
    fn opening_tags<'a>(html: &'a str, marker: &str) -> Vec<&'a str> {
        html.match_indices(marker)
            .filter_map(|(at, _)| {
                let open = html[..at].rfind('<')?;
                let close = at + html[at..].find('>')?;
                Some(&html[open..=close])
            })
            .collect()
    }

    fn loading_app() -> Element {
        rsx! {
            RlmTrajectory { trajectory: demo(), is_loading: true }
        }
    }

    fn empty_app() -> Element {
        let mut trajectory = demo();
        trajectory.subcalls.clear();
        rsx! {
            RlmTrajectory { trajectory }
        }
    }

    fn collapsed_app() -> Element {
        rsx! {
            RlmTrajectory { trajectory: demo() }
        }
    }

    /// Demo tree after "expand all" with the root's tool list open.
    fn expanded_tree_app() -> Element {
        let trajectory = demo();
        let mut state = ExpansionState::new();
        state.expand_all(collect_expandable(&trajectory, DEFAULT_MAX_DISPLAY_DEPTH));
        if let Some(root) = trajectory.find_subcall("root") {
            state.toggle_tools(root);
        }
        let view = render(&trajectory, &state, &RenderOptions::default());
        let roots = view.roots().to_vec();
        let dispatch = use_callback(|_: ViewerAction| {});
        rsx! {
            for root in roots {
                SubcallNode { key: "{root.id}", node: root, dispatch, can_load_deeper: false }
            }
        }
    }

    #[test]
    fn test_loading_renders_skeleton_only() {
        let html = render_html(loading_app);
        assert_eq!(html.matches("class=\"rlm-skeleton-row\"").count(), 3);
        assert!(!html.contains("class=\"rlm-node-main\""));
        assert!(!html.contains("class=\"rlm-summary\""));
        assert!(!html.contains("rlm.run"));
    }

    #[test]
    fn test_empty_trajectory_shows_message() {
        let html = render_html(empty_app);
        assert!(html.contains("No subcalls recorded for this run"));
        assert!(html.contains("run run-7f3a"));
        assert!(!html.contains("class=\"rlm-node-main\""));
        assert!(!html.contains("Expand all"));
    }

    #[test]
    fn test_initial_render_is_collapsed() {
        let html = render_html(collapsed_app);
        assert_eq!(html.matches("class=\"rlm-node-main\"").count(), 2);
        assert!(html.contains("Expand all"));
        assert!(!html.contains("class=\"rlm-children\""));
        assert!(!html.contains("class=\"rlm-tool-row"));
    }

    #[test]
    fn test_depth_limit_affordance_at_bound() {
        let html = render_html(expanded_tree_app);
        let limit = outer_div(&html, "rlm-depth-limit");
        assert!(limit.contains("1 more nested subcall"));
        assert!(limit.contains(LOAD_DEEPER_LABEL));
        assert_eq!(html.matches("class=\"rlm-depth-limit\"").count(), 1);
        assert!(html.contains("rlm.subquery level 9"));
        assert!(!html.contains("rlm.subquery level 10"));
    }

    #[test]
    fn test_nested_nodes_carry_no_inline_offset() {
        let html = render_html(expanded_tree_app);
        assert!(html.matches("class=\"rlm-children\"").count() >= 9);
        assert!(!html.contains("margin-left"));
        assert!(!html.contains("style="));

        let rule_start = TRAJECTORY_STYLES.find(".rlm-children {").expect("children rule");
        let rule = &TRAJECTORY_STYLES[rule_start..];
        let rule = &rule[..rule.find('}').expect("rule end")];
        assert!(rule.contains("padding-left: 1.1rem;"));
    }

    #[test]
    fn test_tool_rows_are_outside_the_subcall_target() {
        let html = render_html(expanded_tree_app);
        let root = outer_div(&html, "rlm-node\"");
        let main = outer_div(root, "rlm-node-main");
        assert!(main.contains("rlm.run"));
        assert!(!main.contains("rlm-tool-row"));

        let tools = outer_div(root, "rlm-tool-list");
        assert_eq!(tools.matches("rlm-tool-row--").count(), 3);
        assert!(tools.contains("shell"));
    }

    #[test]
    fn test_tool_rows_carry_their_own_click_listener() {
        let html = render_hydratable(expanded_tree_app);
        let tool_rows = opening_tags(&html, "rlm-tool-row--");
        assert_eq!(tool_rows.len(), 3);
        for tag in tool_rows {
            assert!(tag.contains("click"), "tool row without a listener: {tag}");
        }
        let mains = opening_tags(&html, "\"rlm-node-main\"");
        assert!(!mains.is_empty());
        assert!(mains.iter().all(|tag| tag.contains("click")));
    }

    #[test]
    fn test_state_is_discarded_for_a_different_trajectory() {
        let trajectory = demo();
        let mut state = ExpansionState::new();
        state.expand_all(["root"]);
        let stored = (trajectory.clone(), state);

        let kept = state_for(&stored, &trajectory);
        assert!(kept.is_children_expanded("root"));

        let mut other_run = trajectory.clone();
        other_run.run_id = "run-other".to_string();
        assert_eq!(state_for(&stored, &other_run), ExpansionState::new());

        let mut refetched = trajectory;
        refetched.subcalls.pop();
        assert_eq!(refetched.run_id, stored.0.run_id);
        assert_eq!(state_for(&stored, &refetched), ExpansionState::new());
    }

    #[test]
    fn test_tools_toggle_label() {
        assert_eq!(tools_toggle_label(1, false), "1 tool");
        assert_eq!(tools_toggle_label(3, true), "hide 3 tools");
        assert_eq!(toggle_glyph(true), "▾");
        assert_eq!(toggle_glyph(false), "▸");
    }

    #[test]
    fn test_outcome_classes_are_distinct() {
        let classes = [
            outcome_class(Outcome::Success),
            outcome_class(Outcome::Failure),
            outcome_class(Outcome::Running),
        ];
        assert!(classes.iter().all(|class| class.starts_with("rlm-node-row ")));
        assert_ne!(classes[0], classes[1]);
        assert_ne!(classes[1], classes[2]);
        assert_eq!(tool_class(Outcome::Failure), "rlm-tool-row rlm-tool-row--failure");
    }
}
