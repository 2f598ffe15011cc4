//! Rendering and JSON serialization for CLI output.

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use serde::Serialize;
use sift_document::{PageRecord, SectionRecord};
use sift_extract::ExtractReport;

/// Placeholder shown for the untitled leading section.
const UNTITLED: &str = "(untitled)";

/// Maximum characters of section content shown in listings.
const PREVIEW_CHARS: usize = 72;

/// Serializes a value as pretty JSON.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("failed to serialize JSON: {e}"))
}

/// Renders a page as a compact listing: route and title, then one line per section.
pub fn render_page(page: &PageRecord) -> String {
    let mut lines = Vec::with_capacity(page.sections.len() + 1);
    if page.title.is_empty() {
        lines.push(page.route.clone());
    } else {
        lines.push(format!("{}  {}", page.route, page.title));
    }
    for section in &page.sections {
        lines.push(format!("  - {}", section_heading(section)));
    }
    join_lines(&lines)
}

/// Renders a page with the full content of every section.
pub fn render_page_detail(page: &PageRecord) -> String {
    let title = if page.title.is_empty() {
        UNTITLED
    } else {
        page.title.as_str()
    };
    let mut lines = vec![
        format!("--- {} ---", page.route),
        format!("title: {title}"),
        format!("{} sections", page.sections.len()),
    ];
    if !page.sections.is_empty() {
        lines.push(section_table(page).to_string());
    }

    for section in &page.sections {
        lines.push(String::new());
        lines.push(format!("## {}", section_heading(section)));
        if section.content.is_empty() {
            lines.push("(no content)".to_string());
        } else {
            lines.push(section.content.clone());
        }
    }
    join_lines(&lines)
}

/// Joins lines with a trailing newline after each.
fn join_lines(lines: &[String]) -> String {
    lines.iter().map(|line| format!("{line}\n")).collect()
}

/// Renders an overview table of a page's sections.
fn section_table(page: &PageRecord) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["#", "Section", "Anchor", "Words"]);
    for (i, section) in page.sections.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(section.title.as_deref().unwrap_or(UNTITLED)),
            Cell::new(&section.href),
            Cell::new(section.content.split_whitespace().count()),
        ]);
    }
    table
}

/// Renders the one-line batch summary.
pub fn render_summary(report: &ExtractReport) -> String {
    format!(
        "{} pages, {} sections, {} skipped, {} failed",
        report.pages.len(),
        report.section_count(),
        report.skipped.len(),
        report.failures.len()
    )
}

/// Formats a section heading with its anchor, if any.
fn section_heading(section: &SectionRecord) -> String {
    let title = section.title.as_deref().unwrap_or(UNTITLED);
    let line = if section.href.is_empty() {
        title.to_string()
    } else {
        format!("{title}  {}", section.href)
    };
    if section.title.is_none() {
        format!("{line}  {}", preview(&section.content))
    } else {
        line
    }
}

/// Shortens content to a single-line preview.
fn preview(content: &str) -> String {
    if content.chars().count() <= PREVIEW_CHARS {
        return content.to_string();
    }
    let cut: String = content.chars().take(PREVIEW_CHARS).collect();
    format!("{}...", cut.trim_end())
}
