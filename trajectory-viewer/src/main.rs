use dioxus::launch;
use dioxus::prelude::*;
use dioxus_logger::tracing::{info, Level};
use trajectory_core::Trajectory;

use trajectory_viewer::RlmTrajectory;

const DEMO_TRAJECTORY: &str = include_str!("../../fixtures/demo-trajectory.json");

fn main() {
    // Initialize logging for WASM
    wasm_logger::init(wasm_logger::Config::default());
    dioxus_logger::init(Level::INFO).ok();

    launch(App);
}

#[component]
fn App() -> Element {
    let mut selection = use_signal(|| None::<String>);
    let loaded = use_hook(|| Trajectory::from_json(DEMO_TRAJECTORY).map_err(|e| e.to_string()));

    match loaded {
        Ok(trajectory) => rsx! {
            div {
                style: "padding: 1rem; max-width: 960px; margin: 0 auto;",
                h3 { "RLM Trajectory" }
                if let Some(selected) = selection() {
                    p { class: "rlm-selection", "Selected: {selected}" }
                }
                RlmTrajectory {
                    trajectory,
                    on_subcall_click: move |id: String| {
                        info!("Subcall selected: {}", id);
                        selection.set(Some(format!("subcall {id}")));
                    },
                    on_tool_call_click: move |id: String| {
                        info!("Tool call selected: {}", id);
                        selection.set(Some(format!("tool call {id}")));
                    },
                }
            }
        },
        Err(message) => {
            dioxus_logger::tracing::error!("Failed to load demo trajectory: {}", message);
            rsx! {
                div {
                    class: "empty-state",
                    p { "Could not load trajectory: {message}" }
                }
            }
        }
    }
}
