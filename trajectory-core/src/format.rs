use crate::model::{Outcome, TokenCounts};

// ── Formatting helpers ───────────────────────────────────────────────────────

/// `"{ms}ms"` below a second, `"{s}s"` below a minute, `"{m}m {s}s"` above.
pub fn format_duration(ms: u64) -> String {
    if ms < 1_000 {
        return format!("{ms}ms");
    }
    let total_secs = ms / 1_000;
    if total_secs < 60 {
        format!("{total_secs}s")
    } else {
        format!("{}m {}s", total_secs / 60, total_secs % 60)
    }
}

/// Input plus output, grouped with thousands separators.
pub fn format_tokens(tokens: &TokenCounts) -> String {
    group_thousands(tokens.total())
}

pub fn format_cost(cost: f64) -> String {
    format!("${cost:.2}")
}

pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn outcome_glyph(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Success => "✓",
        Outcome::Failure => "✗",
        Outcome::Running => "◌",
    }
}

pub fn nested_label(count: usize) -> String {
    if count == 1 {
        "1 more nested subcall".to_string()
    } else {
        format!("{count} more nested subcalls")
    }
}
