//! Markdown job summary rendering.

use std::fmt::Write;

use crate::check::{CheckStatus, CheckSummary};

fn status_cell(status: CheckStatus) -> &'static str {
    match status {
        CheckStatus::Ok => "✅ ok",
        CheckStatus::Drift => "⚠️ drift",
        CheckStatus::Error => "❌ error",
    }
}

/// Pipes would split table cells.
fn cell(s: &str) -> String {
    s.replace('|', "\\|")
}

/// Render a check summary as a Markdown section for `$GITHUB_STEP_SUMMARY`.
pub fn render_summary(summary: &CheckSummary) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "## Drift check results");
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "**{}** scope(s) checked: {} ok, {} drift, {} error",
        summary.total, summary.ok, summary.drift, summary.error
    );
    let _ = writeln!(out);

    if summary.results.is_empty() {
        return out;
    }

    let _ = writeln!(out, "| Scope | Project | Environment | Tool | Status | Changes |");
    let _ = writeln!(out, "|---|---|---|---|---|---|");
    for r in &summary.results {
        let changes = match r.status {
            CheckStatus::Error => r.message.as_deref().map(cell).unwrap_or_default(),
            _ => r.changes.to_string(),
        };
        let _ = writeln!(
            out,
            "| {} | {} | {} | {} | {} | {} |",
            cell(&r.scope),
            cell(&r.project),
            cell(&r.environment),
            r.tool,
            status_cell(r.status),
            changes
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "_Generated {}_",
        summary.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    out
}
