//! Pipe-table encoding shared by every entity section.
//!
//! Each entity owns a `Schema` with an append-only column list. Decoding maps
//! cells through the header of the document being read, not through the
//! current schema, so files written with fewer columns still line up.

pub mod pomodoros;
pub mod reading;
pub mod reminders;
pub mod stats;
pub mod tasks;
pub mod templates;

use super::diagnostics::Diagnostics;
use super::fields::{
    choice_or, decode_date, decode_json, decode_row, encode_row, is_separator_row, parse_flag,
    parse_number, parse_tags,
};
use crate::domain::{TagSet, Vocabulary};
use serde::de::DeserializeOwned;
use std::fmt::Display;
use std::str::FromStr;

/// Fixed column layout of one entity table
#[derive(Debug)]
pub struct Schema {
    /// Section heading, also used in diagnostics
    pub title: &'static str,
    /// Column that identifies a row
    pub identity: &'static str,
    /// Current columns, in order. Only ever append.
    pub columns: &'static [&'static str],
    /// Line written instead of a table when there are no rows
    pub placeholder: &'static str,
}

/// Render rows (unescaped values, one per schema column) as a table or the placeholder
pub fn render_table(schema: &Schema, rows: Vec<Vec<String>>) -> String {
    if rows.is_empty() {
        return format!("{}\n", schema.placeholder);
    }

    let mut output = String::new();
    output.push_str(&encode_row(schema.columns));
    output.push('\n');
    output.push('|');
    for _ in schema.columns {
        output.push_str(" --- |");
    }
    output.push('\n');
    for row in rows {
        output.push_str(&encode_row(row.as_slice()));
        output.push('\n');
    }
    output
}

/// Tag of an optional closed-domain value, empty when absent
pub fn tag_or_empty<T: Vocabulary>(value: Option<T>) -> String {
    value.map(|v| v.to_tag().to_string()).unwrap_or_default()
}

pub fn number_or_empty<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// A table as found in a document: its own header plus decoded data rows
#[derive(Debug)]
pub struct Table {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Find the first table in a section body. `None` if there is no table
    /// (placeholder line, prose, or nothing at all).
    pub fn parse(lines: &[&str]) -> Option<Self> {
        let mut i = 0;

        // Skip to header
        while i < lines.len() && !lines[i].trim_start().starts_with('|') {
            i += 1;
        }
        if i >= lines.len() {
            return None;
        }

        let header: Vec<String> = decode_row(lines[i])
            .into_iter()
            .map(|name| name.trim().to_string())
            .collect();
        i += 1;

        let mut rows = Vec::new();
        while i < lines.len() {
            let line = lines[i].trim();
            if line.is_empty() {
                i += 1;
                continue;
            }
            if !line.starts_with('|') {
                // Table ended
                break;
            }
            if !is_separator_row(line) {
                rows.push(decode_row(line));
            }
            i += 1;
        }

        Some(Self { header, rows })
    }

    fn position(&self, column: &str) -> Option<usize> {
        self.header
            .iter()
            .position(|name| name.eq_ignore_ascii_case(column))
    }

    /// Decode every row with `build`. Rows too short to hold the identity
    /// column are skipped; everything else is repaired cell by cell.
    pub fn decode<T>(
        &self,
        schema: &Schema,
        diagnostics: &mut Diagnostics,
        mut build: impl FnMut(&mut Row<'_>) -> T,
    ) -> Vec<T> {
        let Some(identity) = self.position(schema.identity) else {
            diagnostics.dropped(
                schema.title,
                format!("table has no {} column, {} rows ignored", schema.identity, self.rows.len()),
            );
            return Vec::new();
        };

        let mut items = Vec::with_capacity(self.rows.len());
        for (index, cells) in self.rows.iter().enumerate() {
            let Some(id) = cells.get(identity) else {
                diagnostics.dropped(
                    &format!("{} row {}", schema.title, index + 1),
                    format!("row has no {} cell", schema.identity),
                );
                continue;
            };

            let location = if id.is_empty() {
                format!("{} row {}", schema.title, index + 1)
            } else {
                format!("{} {}", schema.title, id)
            };
            let mut row = Row {
                table: self,
                cells,
                location,
                diagnostics: &mut *diagnostics,
            };
            items.push(build(&mut row));
        }
        items
    }
}

/// Typed access to the cells of one row, recording every repair
pub struct Row<'a> {
    table: &'a Table,
    cells: &'a [String],
    location: String,
    diagnostics: &'a mut Diagnostics,
}

impl<'a> Row<'a> {
    /// Cell under `column`, `None` if this document has no such column or the row is short
    pub fn raw(&self, column: &str) -> Option<&'a str> {
        let cells = self.cells;
        self.table
            .position(column)
            .and_then(|index| cells.get(index))
            .map(String::as_str)
    }

    /// Required text, empty when missing
    pub fn text(&self, column: &str) -> String {
        self.raw(column).unwrap_or("").to_string()
    }

    /// Optional text or date: empty is absent, anything else verbatim
    pub fn optional(&self, column: &str) -> Option<String> {
        self.raw(column).and_then(decode_date)
    }

    /// Zero-safe number with default
    pub fn number<T: FromStr + Display>(&mut self, column: &str, default: T) -> T {
        let raw = self.raw(column).unwrap_or("");
        if raw.trim().is_empty() {
            return default;
        }
        match parse_number(raw) {
            Some(value) => value,
            None => {
                self.diagnostics
                    .repaired(&self.location, column, raw, default.to_string());
                default
            }
        }
    }

    pub fn optional_number<T: FromStr>(&mut self, column: &str) -> Option<T> {
        let raw = self.raw(column).unwrap_or("");
        if raw.trim().is_empty() {
            return None;
        }
        let value = parse_number(raw);
        if value.is_none() {
            self.diagnostics.repaired(&self.location, column, raw, "");
        }
        value
    }

    /// Non-negative minutes, fractions kept; anything else is cleared and recorded
    pub fn optional_minutes(&mut self, column: &str) -> Option<f64> {
        let raw = self.raw(column).unwrap_or("");
        if raw.trim().is_empty() {
            return None;
        }
        let value = parse_number::<f64>(raw).filter(|minutes| minutes.is_finite() && *minutes >= 0.0);
        if value.is_none() {
            self.diagnostics.repaired(&self.location, column, raw, "");
        }
        value
    }

    /// Closed-domain value with a default for empty or unknown tags
    pub fn choice<T: Vocabulary>(&mut self, column: &str, default: T) -> T {
        let raw = self.raw(column).unwrap_or("");
        if raw.trim().is_empty() {
            return default;
        }
        if T::from_tag(raw).is_none() {
            self.diagnostics
                .repaired(&self.location, column, raw, default.to_tag());
        }
        choice_or(raw, default)
    }

    /// Closed-domain value that is absent when empty or unknown
    pub fn optional_choice<T: Vocabulary>(&mut self, column: &str) -> Option<T> {
        let raw = self.raw(column);
        self.nested_choice(column, raw)
    }

    /// Tag taken from inside a cell (a JSON field, say); an unknown tag is
    /// recorded against `column` and dropped
    pub fn nested_choice<T: Vocabulary>(&mut self, column: &str, raw: Option<&str>) -> Option<T> {
        let raw = raw.unwrap_or("");
        if raw.trim().is_empty() {
            return None;
        }
        let value = T::from_tag(raw);
        if value.is_none() {
            self.diagnostics.repaired(&self.location, column, raw, "");
        }
        value
    }

    pub fn flag(&mut self, column: &str) -> Option<bool> {
        let raw = self.raw(column).unwrap_or("");
        if raw.trim().is_empty() {
            return None;
        }
        let value = parse_flag(raw);
        if value.is_none() {
            self.diagnostics.repaired(&self.location, column, raw, "");
        }
        value
    }

    pub fn tags(&self, column: &str) -> TagSet {
        parse_tags(self.raw(column).unwrap_or(""))
    }

    /// Nested list stored as JSON; malformed JSON is absent
    pub fn json<T: DeserializeOwned>(&mut self, column: &str) -> Option<T> {
        let raw = self.raw(column).unwrap_or("");
        match decode_json(raw) {
            Ok(value) => value,
            Err(err) => {
                tracing::debug!(location = %self.location, column, %err, "unreadable JSON cell");
                self.diagnostics.repaired(&self.location, column, raw, "");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TaskStatus;

    const SCHEMA: Schema = Schema {
        title: "Things",
        identity: "ID",
        columns: &["ID", "Name", "Count", "Status"],
        placeholder: "_No things yet._",
    };

    #[test]
    fn test_render_empty_uses_placeholder() {
        assert_eq!(render_table(&SCHEMA, Vec::new()), "_No things yet._\n");
    }

    #[test]
    fn test_render_table() {
        let rendered = render_table(
            &SCHEMA,
            vec![vec!["a".into(), "x | y".into(), "0".into(), "done".into()]],
        );
        assert_eq!(
            rendered,
            "| ID | Name | Count | Status |\n| --- | --- | --- | --- |\n| a | x \\| y | 0 | done |\n"
        );
    }

    #[test]
    fn test_cells_follow_document_header() {
        // Columns in a different order than the schema
        let lines = ["| Status | ID | Count |", "| --- | --- | --- |", "| done | a | 7 |"];
        let table = Table::parse(&lines).unwrap();
        let mut diagnostics = Diagnostics::new();
        let items = table.decode(&SCHEMA, &mut diagnostics, |row| {
            (
                row.text("ID"),
                row.choice("Status", TaskStatus::Active),
                row.number("Count", 1u32),
                row.optional("Name"),
            )
        });
        assert_eq!(items, vec![("a".to_string(), TaskStatus::Done, 7, None)]);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_short_row_is_skipped() {
        let lines = ["| Name | ID |", "| --- | --- |", "| lonely |", "| ok | b |"];
        let table = Table::parse(&lines).unwrap();
        let mut diagnostics = Diagnostics::new();
        let ids = table.decode(&SCHEMA, &mut diagnostics, |row| row.text("ID"));
        assert_eq!(ids, vec!["b".to_string()]);
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_bad_cells_are_repaired() {
        let lines = ["| ID | Count | Status |", "|---|---|---|", "| a | lots | archived |"];
        let table = Table::parse(&lines).unwrap();
        let mut diagnostics = Diagnostics::new();
        let items = table.decode(&SCHEMA, &mut diagnostics, |row| {
            (row.number("Count", 3u32), row.choice("Status", TaskStatus::Active))
        });
        assert_eq!(items, vec![(3, TaskStatus::Active)]);
        assert_eq!(diagnostics.len(), 2);
    }

    #[test]
    fn test_table_without_identity_column() {
        let lines = ["| Name |", "| --- |", "| x |"];
        let table = Table::parse(&lines).unwrap();
        let mut diagnostics = Diagnostics::new();
        let items = table.decode(&SCHEMA, &mut diagnostics, |row| row.text("Name"));
        assert!(items.is_empty());
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_no_table() {
        assert!(Table::parse(&["_No things yet._", ""]).is_none());
        assert!(Table::parse(&[]).is_none());
    }
}
