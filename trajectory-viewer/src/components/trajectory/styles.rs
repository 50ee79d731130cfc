pub const TRAJECTORY_STYLES: &str = r#"
.rlm-trajectory {
    display: flex;
    flex-direction: column;
    gap: 0.6rem;
    color: var(--text-primary, #f8fafc);
    font-size: 0.8rem;
}

.rlm-summary {
    display: flex;
    justify-content: space-between;
    align-items: flex-start;
    gap: 0.6rem;
    border: 1px solid var(--border-color, #334155);
    border-radius: 10px;
    background: color-mix(in srgb, var(--bg-secondary, #111827) 86%, #0b1225 14%);
    padding: 0.55rem 0.7rem;
}

.rlm-summary-metrics,
.rlm-summary-actions {
    display: flex;
    gap: 0.35rem;
    flex-wrap: wrap;
}

.rlm-pill {
    border: 1px solid var(--border-color, #334155);
    background: var(--bg-primary, #0f172a);
    color: var(--text-secondary, #cbd5e1);
    border-radius: 999px;
    font-size: 0.68rem;
    padding: 0.2rem 0.45rem;
    white-space: nowrap;
}

button.rlm-pill {
    cursor: pointer;
}

.rlm-action {
    background: color-mix(in srgb, var(--bg-primary) 75%, var(--accent-bg) 25%);
    border: 1px solid color-mix(in srgb, var(--border-color) 50%, var(--accent-bg) 50%);
    color: var(--text-primary);
    border-radius: 0.45rem;
    padding: 0.28rem 0.5rem;
    font-size: 0.72rem;
    cursor: pointer;
}

.rlm-action:disabled {
    opacity: 0.45;
    cursor: not-allowed;
}

.rlm-tree {
    display: flex;
    flex-direction: column;
    gap: 0.3rem;
}

.rlm-node-main {
    cursor: pointer;
    border-radius: 8px;
    border: 1px solid var(--border-color, #1f2a44);
    background: var(--bg-primary, #0b1222);
    padding: 0.35rem 0.5rem;
}

.rlm-node-main:hover {
    border-color: color-mix(in srgb, var(--border-color) 60%, var(--accent-bg) 40%);
}

.rlm-node-row {
    display: flex;
    align-items: center;
    gap: 0.45rem;
}

.rlm-node-row--failure .rlm-glyph { color: #ef4444; }
.rlm-node-row--success .rlm-glyph { color: #22c55e; }
.rlm-node-row--running .rlm-glyph { color: #f59e0b; }

.rlm-toggle,
.rlm-toggle-spacer {
    width: 1.2rem;
    flex-shrink: 0;
}

.rlm-toggle {
    background: transparent;
    border: none;
    color: var(--text-secondary, #9ca3af);
    cursor: pointer;
}

.rlm-node-name {
    flex: 1;
    overflow: hidden;
    text-overflow: ellipsis;
    white-space: nowrap;
}

.rlm-metric {
    color: var(--text-secondary, #9ca3af);
    font-variant-numeric: tabular-nums;
    white-space: nowrap;
}

.rlm-node-error {
    margin: 0.3rem 0 0 1.65rem;
    color: #fca5a5;
    font-size: 0.74rem;
}

.rlm-tool-list {
    display: flex;
    flex-direction: column;
    gap: 0.2rem;
    margin: 0.35rem 0 0 1.65rem;
}

.rlm-tool-row {
    display: flex;
    gap: 0.45rem;
    align-items: center;
    border-left: 2px solid var(--border-color, #334155);
    padding: 0.15rem 0.4rem;
    cursor: pointer;
}

.rlm-tool-row--failure { border-left-color: #ef4444; }
.rlm-tool-row--running { border-left-color: #f59e0b; }

.rlm-tool-name {
    flex: 1;
}

.rlm-children {
    display: flex;
    flex-direction: column;
    gap: 0.3rem;
    margin-top: 0.3rem;
    padding-left: 1.1rem;
    border-left: 1px solid var(--border-color, #334155);
}

.rlm-depth-limit {
    display: flex;
    align-items: center;
    gap: 0.5rem;
    margin: 0.3rem 0 0 1.65rem;
    color: var(--text-secondary, #9ca3af);
    font-style: italic;
}

.rlm-skeleton {
    display: flex;
    flex-direction: column;
    gap: 0.4rem;
}

.rlm-skeleton-row {
    height: 2rem;
    border-radius: 8px;
    background: color-mix(in srgb, var(--bg-secondary, #111827) 80%, #334155 20%);
    animation: rlm-pulse 1.4s ease-in-out infinite;
}

@keyframes rlm-pulse {
    0%, 100% { opacity: 0.55; }
    50% { opacity: 1; }
}

.empty-state {
    color: var(--text-secondary, #9ca3af);
    text-align: center;
    padding: 1.2rem 0;
}
"#;
