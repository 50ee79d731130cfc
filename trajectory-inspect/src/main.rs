mod config;
mod render;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use trajectory_core::{collect_expandable, ExpansionState, RenderOptions, Trajectory, TreeStats};

use config::{Config, ExpandMode};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trajectory_inspect=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env(std::env::args().nth(1))?;
    let path = config.trajectory_file.display().to_string();

    let raw = std::fs::read_to_string(&config.trajectory_file)
        .with_context(|| format!("failed to read trajectory file {path}"))?;
    let trajectory =
        Trajectory::from_json(&raw).with_context(|| format!("invalid trajectory in {path}"))?;
    info!(
        run_id = %trajectory.run_id,
        path = %path,
        roots = trajectory.subcalls.len(),
        "trajectory loaded"
    );

    if config.audit_summary {
        let stats = TreeStats::compute(&trajectory);
        for issue in stats.discrepancies(&trajectory) {
            warn!(run_id = %trajectory.run_id, "summary mismatch: {issue}");
        }
    }

    let state = initial_state(&trajectory, &config);
    let view = trajectory_core::render(
        &trajectory,
        &state,
        &RenderOptions::with_max_display_depth(config.max_display_depth),
    );
    print!("{}", render::render_text(&view));
    Ok(())
}

fn initial_state(trajectory: &Trajectory, config: &Config) -> ExpansionState {
    let mut state = ExpansionState::new();
    if config.expand == ExpandMode::All {
        let ids = collect_expandable(trajectory, config.max_display_depth);
        info!(expanded = ids.len(), max_display_depth = config.max_display_depth, "expand all");
        state.expand_all(ids);
    }
    if config.show_tools {
        for (_, node) in trajectory.walk() {
            state.toggle_tools(node);
        }
    }
    state
}
