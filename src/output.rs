//! Terminal preview of enriched rows.

use orcid_enricher_core::{OUTPUT_COLUMNS, OutputRow};

const MISSING_CELL: &str = "-";
const SEPARATOR: &str = " | ";

/// Returns terminal width from COLUMNS, or 80 if unset/invalid.
pub(crate) fn terminal_width() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|width| *width >= 20)
        .unwrap_or(80)
}

/// Truncates text to at most `width` chars, appending ellipsis if truncated.
pub(crate) fn truncate_to_width(text: &str, width: usize) -> String {
    let text_len = text.chars().count();
    if text_len <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    if width == 1 {
        return "…".to_string();
    }

    let mut output: String = text.chars().take(width - 1).collect();
    output.push('…');
    output
}

fn cells(row: &OutputRow) -> [&str; 8] {
    fn or_missing(value: &Option<String>) -> &str {
        value.as_deref().unwrap_or(MISSING_CELL)
    }

    [
        or_missing(&row.title),
        or_missing(&row.work_type),
        or_missing(&row.year),
        or_missing(&row.doi),
        &row.orcid,
        or_missing(&row.given_name),
        or_missing(&row.family_name),
        or_missing(&row.country),
    ]
}

/// Header plus the first `limit` rows, each truncated to `width`.
///
/// Returns no lines when `limit` is zero or there are no rows.
pub(crate) fn preview_lines(rows: &[OutputRow], limit: usize, width: usize) -> Vec<String> {
    if limit == 0 || rows.is_empty() {
        return Vec::new();
    }

    let mut lines = Vec::with_capacity(limit.min(rows.len()) + 1);
    lines.push(truncate_to_width(&OUTPUT_COLUMNS.join(SEPARATOR), width));
    for row in rows.iter().take(limit) {
        lines.push(truncate_to_width(&cells(row).join(SEPARATOR), width));
    }
    lines
}

/// Prints the preview to stdout.
pub(crate) fn print_preview(rows: &[OutputRow], limit: usize) {
    for line in preview_lines(rows, limit, terminal_width()) {
        println!("{line}");
    }
}
