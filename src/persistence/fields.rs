//! Per-value codecs shared by every table and key/value section.

use crate::domain::{TagSet, Vocabulary};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::str::FromStr;

/// Token written in place of a line feed so a cell stays on one line
pub const LINE_BREAK: &str = "<br>";

/// Line-break spellings accepted when reading (hand-edited files use all three)
const LINE_BREAK_FORMS: [&str; 3] = ["<br>", "<br/>", "<br />"];

/// Escape a value for a table cell.
///
/// `\` and `|` are backslash-escaped, line feeds become `<br>`, carriage
/// returns become `\r`, and a literal `<br` is written as `\<br`. Whitespace
/// at either end is escaped (`\s`, `\t`, `\u{..}`) so cell trimming keeps it.
pub fn escape_cell(value: &str) -> String {
    let body_start = value.len() - value.trim_start_matches(is_edge_space).len();
    let body_end = value.trim_end_matches(is_edge_space).len();

    let mut out = String::with_capacity(value.len());
    for (index, c) in value.char_indices() {
        if index < body_start || index >= body_end {
            match c {
                ' ' => out.push_str("\\s"),
                '\t' => out.push_str("\\t"),
                _ => out.push_str(&format!("\\u{{{:x}}}", c as u32)),
            }
            continue;
        }
        match c {
            '\\' => out.push_str("\\\\"),
            '|' => out.push_str("\\|"),
            '\n' => out.push_str(LINE_BREAK),
            '\r' => out.push_str("\\r"),
            '<' if value[index..].starts_with("<br") => out.push_str("\\<"),
            _ => out.push(c),
        }
    }
    out
}

/// Whitespace that trimming would eat; line breaks have their own escapes
fn is_edge_space(c: char) -> bool {
    c.is_whitespace() && c != '\n' && c != '\r'
}

/// Reverse `escape_cell`. Unknown escapes are kept literally.
pub fn unescape_cell(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(c) = rest.chars().next() {
        if c == '\\' {
            match rest[1..].chars().next() {
                Some(next @ ('\\' | '|' | '<')) => {
                    out.push(next);
                    rest = &rest[1 + next.len_utf8()..];
                    continue;
                }
                Some('r') => {
                    out.push('\r');
                    rest = &rest[2..];
                    continue;
                }
                Some('s') => {
                    out.push(' ');
                    rest = &rest[2..];
                    continue;
                }
                Some('t') => {
                    out.push('\t');
                    rest = &rest[2..];
                    continue;
                }
                Some('u') => {
                    if let Some((decoded, used)) = unicode_escape(&rest[2..]) {
                        out.push(decoded);
                        rest = &rest[2 + used..];
                        continue;
                    }
                }
                _ => {}
            }
            out.push('\\');
            rest = &rest[1..];
            continue;
        }
        if c == '<' {
            if let Some(form) = LINE_BREAK_FORMS.iter().find(|form| rest.starts_with(**form)) {
                out.push('\n');
                rest = &rest[form.len()..];
                continue;
            }
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }
    out
}

/// `{hex}` after `\u`: the char and the bytes consumed
fn unicode_escape(rest: &str) -> Option<(char, usize)> {
    let body = rest.strip_prefix('{')?;
    let close = body.find('}')?;
    let code = u32::from_str_radix(&body[..close], 16).ok()?;
    Some((char::from_u32(code)?, close + 2))
}

/// Split a table row into trimmed raw cells, honouring `\|` escapes.
///
/// Leading and trailing delimiters are optional. Cells are returned still escaped.
pub fn split_row(line: &str) -> Vec<&str> {
    let line = line.trim();
    let mut cells = Vec::new();
    let mut start = 0;
    let mut escaped = false;

    for (index, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '|' => {
                cells.push(&line[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    cells.push(&line[start..]);

    if line.starts_with('|') {
        cells.remove(0);
    }
    if cells.last().map_or(false, |cell| cell.is_empty()) {
        cells.pop();
    }

    cells.into_iter().map(str::trim).collect()
}

/// Split and unescape a row in one go
pub fn decode_row(line: &str) -> Vec<String> {
    split_row(line).into_iter().map(unescape_cell).collect()
}

/// Render one row from already-formatted values
pub fn encode_row<S: AsRef<str>>(values: &[S]) -> String {
    let mut line = String::from("|");
    for value in values {
        line.push(' ');
        line.push_str(&escape_cell(value.as_ref()));
        line.push_str(" |");
    }
    line
}

/// True for a `| --- | :---: |` style separator row
pub fn is_separator_row(line: &str) -> bool {
    let cells = split_row(line);
    !cells.is_empty()
        && cells.iter().all(|cell| {
            cell.contains('-') && cell.chars().all(|c| c == '-' || c == ':' || c == ' ')
        })
}

/// Parse a number, `None` for blank or unparseable text. Zero is a value.
pub fn parse_number<T: FromStr>(raw: &str) -> Option<T> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse().ok()
}

/// Leading whitespace-separated token, for values like "25 min"
pub fn leading_token(value: &str) -> &str {
    value.split_whitespace().next().unwrap_or("")
}

/// Empty is absent, anything else (whitespace included) is kept verbatim
pub fn decode_date(raw: &str) -> Option<String> {
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

pub fn encode_optional(value: Option<&str>) -> &str {
    value.unwrap_or("")
}

/// Tag lookup with a fallback for unknown or empty tags
pub fn choice_or<T: Vocabulary>(raw: &str, default: T) -> T {
    T::from_tag(raw).unwrap_or(default)
}

pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" | "x" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

pub fn encode_flag(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// "yes"/"no" for key/value sections
pub fn encode_switch(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

/// Parse tags from comma-separated string like "tag1, tag2, tag3".
/// `\,` is a comma inside a tag and `\\` a backslash.
pub fn parse_tags(raw: &str) -> TagSet {
    let mut tags = TagSet::new();
    let mut current = String::new();
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(next @ (',' | '\\')) => current.push(next),
                Some(other) => {
                    current.push('\\');
                    current.push(other);
                }
                None => current.push('\\'),
            },
            ',' => {
                tags.insert(&current);
                current.clear();
            }
            _ => current.push(c),
        }
    }
    tags.insert(&current);
    tags
}

pub fn encode_tags(tags: &TagSet) -> String {
    tags.iter()
        .map(|tag| tag.replace('\\', "\\\\").replace(',', "\\,"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Compact JSON for nested lists stored in one cell
pub fn encode_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

/// Blank cell is `Ok(None)`
pub fn decode_json<T: DeserializeOwned>(raw: &str) -> Result<Option<T>, serde_json::Error> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(raw).map(Some)
}
