use std::fmt::Write as _;

use client_core::SearchSession;
use shared::protocol::SearchResult;

const SNIPPET_WIDTH: usize = 48;

fn truncate(text: &str, width: usize) -> String {
    let flat = text.replace(['\n', '\r'], " ");
    if flat.chars().count() <= width {
        return flat;
    }
    let mut cut: String = flat.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

fn created_label(result: &SearchResult) -> String {
    result
        .created_at_utc()
        .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| result.created_at.clone())
}

fn score_label(result: &SearchResult) -> String {
    result
        .score
        .map(|score| format!("{score:.4}"))
        .unwrap_or_else(|| "-".to_string())
}

/// The current page of a finished search, with a count header and page footer.
pub fn results_page(session: &SearchSession) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "results ({})", session.results().len());

    for result in session.visible() {
        let _ = writeln!(
            out,
            "{:>8}  {}  {}  [{}]  {{{}}}  {}  {}",
            score_label(result),
            result.uuid,
            truncate(&result.title, SNIPPET_WIDTH),
            result.category,
            result.tags,
            created_label(result),
            truncate(&result.snippet, SNIPPET_WIDTH),
        );
    }

    let _ = writeln!(out, "page {}/{}", session.page(), session.total_pages());
    out
}

pub fn memo_detail(result: &SearchResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "── {} ──", result.title);
    let _ = writeln!(out, "category: {}", result.category);
    let _ = writeln!(out, "tags: {}", result.tags);
    let _ = writeln!(out, "created: {}", created_label(result));
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", result.body);
    out
}
