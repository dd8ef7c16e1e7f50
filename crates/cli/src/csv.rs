//! CSV support for uploads and report export: quote-aware, CRLF-tolerant,
//! comma-separated. One fixed dialect, one fixed schema.

use std::io::{self, Write};
use std::mem::take;

use chrono::{DateTime, Utc};

use catalog_model::{Attribute, ScholarshipRecord};

/// Parse CSV text into rows of cells. Blank lines are dropped.
pub fn parse_rows(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    if matches!(chars.peek(), Some('"')) {
                        chars.next(); // double-quote escape
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            ',' if !in_quotes => row.push(take(&mut field)),
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) {
                    chars.next();
                }
                row.push(take(&mut field));
                if !(row.len() == 1 && row[0].is_empty()) {
                    rows.push(take(&mut row));
                } else {
                    row.clear();
                }
            }
            _ => field.push(ch),
        }
    }

    // Flush the trailing row even if the text lacks a final newline.
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}

/// Write one CSV row, quoting cells that need it.
pub fn write_row<W: Write>(mut w: W, row: &[String]) -> io::Result<()> {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            write!(w, ",")?;
        }
        if cell.contains(',') || cell.contains('"') || cell.contains('\n') || cell.contains('\r') {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            write!(w, "{cell}")?;
        }
    }
    writeln!(w)
}

/// Drop a leading header row, using the original dashboard's heuristic: the
/// first row is a header iff its first cell is neither numeric nor an
/// id-prefix token (a leading `B`).
pub fn strip_header(mut rows: Vec<Vec<String>>) -> Vec<Vec<String>> {
    let is_header = rows
        .first()
        .and_then(|row| row.first())
        .map(|cell| !is_numeric(cell) && !cell.starts_with('B'))
        .unwrap_or(false);
    if is_header {
        rows.remove(0);
    }
    rows
}

fn is_numeric(cell: &str) -> bool {
    !cell.is_empty() && cell.chars().all(|c| c.is_ascii_digit())
}

/// Map uploaded rows onto records.
///
/// A row needs the 11 value columns (id through link); a 12th cell, when
/// present and an RFC 3339 timestamp, becomes `created_at`. Shorter or
/// otherwise unusable rows are skipped with a log line, never fatal.
/// Returns the mapped records and the number of rows skipped.
pub fn rows_to_records(rows: Vec<Vec<String>>) -> (Vec<ScholarshipRecord>, usize) {
    let mut records = Vec::new();
    let mut skipped = 0;
    for (index, row) in rows.into_iter().enumerate() {
        match row_to_record(&row) {
            Some(record) => records.push(record),
            None => {
                log::warn!("skipping malformed upload row {} ({} cells)", index + 1, row.len());
                skipped += 1;
            }
        }
    }
    (records, skipped)
}

fn row_to_record(row: &[String]) -> Option<ScholarshipRecord> {
    if row.len() < 11 || row[0].is_empty() {
        return None;
    }
    let optional = |cell: &String| (!cell.is_empty()).then(|| cell.clone());
    let created_at = row
        .get(11)
        .filter(|cell| !cell.is_empty())
        .and_then(|cell| DateTime::parse_from_rfc3339(cell).ok())
        .map(|ts| ts.with_timezone(&Utc));

    Some(ScholarshipRecord {
        id: row[0].clone(),
        continent: row[1].clone(),
        origin_country: row[2].clone(),
        institution_name: row[3].clone(),
        top_university: optional(&row[4]),
        program_level: row[5].clone(),
        scholarship_type: row[6].clone(),
        requirements: row[7].clone(),
        benefit: row[8].clone(),
        application_window: row[9].clone(),
        link: row[10].clone(),
        created_at,
    })
}

/// Render the full catalog as CSV: header row plus one row per record, in
/// store column order.
pub fn records_to_csv(records: &[ScholarshipRecord]) -> String {
    let mut buf: Vec<u8> = Vec::new();
    let header: Vec<String> = Attribute::ALL
        .into_iter()
        .map(|attr| attr.as_str().to_string())
        .collect();
    let _ = write_row(&mut buf, &header);
    for record in records {
        let row: Vec<String> = Attribute::ALL
            .into_iter()
            .map(|attr| record.attribute_text(attr).unwrap_or_default())
            .collect();
        let _ = write_row(&mut buf, &row);
    }
    String::from_utf8(buf).unwrap_or_default()
}
