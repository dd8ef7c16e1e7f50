//! Plain-text rendering for terminal output. JSON output bypasses this
//! module entirely (see `--json` handling in main).

use catalog_query::{GroupCount, GroupShare};
use catalog_model::ScholarshipRecord;

/// Columns shown by the table views; the full attribute set only appears in
/// the CSV export, where width does not matter.
const TABLE_HEADER: [&str; 7] = [
    "id",
    "continent",
    "origin_country",
    "institution_name",
    "program_level",
    "scholarship_type",
    "application_window",
];

pub fn records_table(records: &[ScholarshipRecord]) -> String {
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|r| {
            vec![
                r.id.clone(),
                r.continent.clone(),
                r.origin_country.clone(),
                r.institution_name.clone(),
                r.program_level.clone(),
                r.scholarship_type.clone(),
                r.application_window.clone(),
            ]
        })
        .collect();
    layout(&TABLE_HEADER.map(String::from), &rows)
}

pub fn counts_table(groups: &[GroupCount]) -> String {
    let rows: Vec<Vec<String>> = groups
        .iter()
        .map(|g| vec![g.value.clone(), g.count.to_string()])
        .collect();
    layout(&["value".to_string(), "count".to_string()], &rows)
}

pub fn shares_table(shares: &[GroupShare]) -> String {
    let rows: Vec<Vec<String>> = shares
        .iter()
        .map(|s| vec![s.value.clone(), s.count.to_string(), format!("{:.1}", s.percent)])
        .collect();
    layout(
        &["value".to_string(), "count".to_string(), "percent".to_string()],
        &rows,
    )
}

pub fn scored_records_table(hits: &[(ScholarshipRecord, f64)]) -> String {
    let rows: Vec<Vec<String>> = hits
        .iter()
        .map(|(r, score)| {
            vec![
                r.id.clone(),
                r.institution_name.clone(),
                r.continent.clone(),
                format!("{score:.1}"),
            ]
        })
        .collect();
    layout(
        &[
            "id".to_string(),
            "institution_name".to_string(),
            "continent".to_string(),
            "score".to_string(),
        ],
        &rows,
    )
}

/// Pad each column to its widest cell.
fn layout(header: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(String::len).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if cell.len() > widths[i] {
                widths[i] = cell.len();
            }
        }
    }

    let mut out = String::new();
    render_line(&mut out, header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    render_line(&mut out, &rule, &widths);
    for row in rows {
        render_line(&mut out, row, &widths);
    }
    out
}

fn render_line(out: &mut String, cells: &[String], widths: &[usize]) {
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            out.push_str("  ");
        }
        out.push_str(cell);
        // No trailing padding on the last column.
        if i + 1 < cells.len() {
            for _ in cell.len()..widths[i] {
                out.push(' ');
            }
        }
    }
    out.push('\n');
}
