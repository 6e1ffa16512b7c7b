use crate::model::{AuditFindings, PageRecord};

const TABLE_HEADER: [&str; 5] = ["Original", "Target", "Title", "H1", "Notes"];

pub fn render_report(findings: &AuditFindings, mapped_pages: usize) -> String {
    let mut lines: Vec<String> = vec![
        "# Review Template Consistency Audit".to_string(),
        String::new(),
        "Generated by `sitekit audit`.".to_string(),
        String::new(),
        "## Summary".to_string(),
        String::new(),
        format!("- Total mapped pages analysed: **{mapped_pages}**"),
        format!(
            "- Pages still using placeholder copy: **{}**",
            findings.placeholder.len()
        ),
        format!(
            "- Pages with missing topic keywords: **{}**",
            findings.keyword_mismatches.len()
        ),
        format!(
            "- Missing review targets: **{}**",
            findings.missing_targets.len()
        ),
        format!(
            "- Missing original source files: **{}**",
            findings.missing_originals.len()
        ),
        String::new(),
    ];

    render_section(
        &mut lines,
        "Placeholder Nuclear Bodies Templates",
        &findings.placeholder,
        false,
    );
    render_section(
        &mut lines,
        "Keyword Mismatches",
        &findings.keyword_mismatches,
        true,
    );
    render_section(
        &mut lines,
        "Missing Review Targets",
        &findings.missing_targets,
        false,
    );
    render_section(
        &mut lines,
        "Missing Original Source Files",
        &findings.missing_originals,
        false,
    );

    lines.join("\n")
}

fn render_section(
    lines: &mut Vec<String>,
    title: &str,
    entries: &[PageRecord],
    include_keywords: bool,
) {
    lines.push(format!("## {title}"));
    lines.push(String::new());

    if entries.is_empty() {
        lines.push("No issues detected.".to_string());
        lines.push(String::new());
        return;
    }

    lines.push(table_row(TABLE_HEADER.iter().map(|cell| cell.to_string())));
    lines.push(table_row(TABLE_HEADER.iter().map(|_| "---".to_string())));

    for record in entries {
        lines.push(table_row(
            [
                record.original.clone(),
                format!("reviews/{}", record.target),
                non_empty_or(&record.title, "(no title)"),
                non_empty_or(&record.heading, "(no h1)"),
                notes(record, include_keywords),
            ]
            .into_iter(),
        ));
    }
    lines.push(String::new());
}

fn notes(record: &PageRecord, include_keywords: bool) -> String {
    let mut parts = record.problems.clone();

    if include_keywords {
        if let Some(missing) = record.missing_keywords.as_ref().filter(|m| !m.is_empty()) {
            let mut sorted = missing.clone();
            sorted.sort();
            parts.push(format!("Missing keywords: {}", sorted.join(", ")));
        }
    }

    parts.join("; ")
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

fn table_row(cells: impl Iterator<Item = String>) -> String {
    let cells: Vec<String> = cells.map(|cell| escape_cell(&cell)).collect();
    format!("|{}|", cells.join("|"))
}

/// Escapes the column delimiter and folds line breaks so a cell stays on its row.
pub fn escape_cell(value: &str) -> String {
    value
        .replace(['\r', '\n'], " ")
        .replace('|', r"\|")
}
