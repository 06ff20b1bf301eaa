//! Minimal CSV parsing for bulk tool uploads.
//!
//! The admin bulk upload accepts the loose CSV exports the directory has
//! historically ingested, so this parser is an explicit two-state machine
//! rather than a full RFC 4180 implementation:
//!
//! - A `"` toggles between [`FieldState::Unquoted`] and
//!   [`FieldState::Quoted`]; quote characters themselves are never part of
//!   a field value.
//! - Commas split fields only while unquoted.
//! - Doubled quotes (`""`) are NOT an escape; they toggle out and back in,
//!   contributing nothing. This preserves the behavior existing uploads
//!   rely on.
//! - The first line is the header row. Data rows with fewer fields than
//!   headers are dropped silently; extra trailing fields are ignored.
//! - Headers and values are whitespace-trimmed. Wrapping quotes never
//!   reach the output because the scanner consumes them.

use std::collections::HashMap;

/// One data row, keyed by header name.
pub type RawRecord = HashMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldState {
    Unquoted,
    Quoted,
}

/// Parse CSV text into records keyed by the header row.
///
/// Returns an empty vector when the input has no header or no data rows.
pub fn parse_csv(input: &str) -> Vec<RawRecord> {
    let mut lines = input.trim().lines();

    let headers: Vec<String> = match lines.next() {
        Some(header_line) => split_line(header_line),
        None => return Vec::new(),
    };
    if headers.is_empty() {
        return Vec::new();
    }

    let mut records = Vec::new();
    for line in lines {
        let values = split_line(line);
        // Short rows are structural noise (stray newlines, truncated
        // exports) and are skipped rather than failing the batch.
        if values.len() < headers.len() {
            continue;
        }
        let record: RawRecord = headers
            .iter()
            .cloned()
            .zip(values)
            .collect();
        records.push(record);
    }

    records
}

/// Split a single line into trimmed, quote-stripped field values.
fn split_line(line: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut state = FieldState::Unquoted;

    for ch in line.chars() {
        match (state, ch) {
            (FieldState::Unquoted, '"') => state = FieldState::Quoted,
            (FieldState::Quoted, '"') => state = FieldState::Unquoted,
            (FieldState::Unquoted, ',') => {
                values.push(finish_field(&mut current));
            }
            (_, other) => current.push(other),
        }
    }
    values.push(finish_field(&mut current));

    values
}

fn finish_field(buf: &mut String) -> String {
    let value = buf.trim().to_string();
    buf.clear();
    value
}
