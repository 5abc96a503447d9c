use super::{render_table, Row, Schema, Table};
use crate::domain::{ReadingItem, ReadingStatus, Vocabulary};
use crate::persistence::diagnostics::Diagnostics;
use crate::persistence::fields::{encode_optional, encode_tags};

pub const SCHEMA: Schema = Schema {
    title: "Reading List",
    identity: "ID",
    columns: &[
        "ID",
        "URL",
        "Title",
        "Status",
        "Tags",
        "Notes",
        "Description",
        "Image",
        "Domain",
        "Added",
        "Read At",
    ],
    placeholder: "_Reading list is empty._",
};

pub fn render(items: &[ReadingItem]) -> String {
    render_table(
        &SCHEMA,
        items
            .iter()
            .map(|item| {
                vec![
                    item.id.clone(),
                    item.url.clone(),
                    item.title.clone(),
                    item.status.to_tag().to_string(),
                    encode_tags(&item.tags),
                    encode_optional(item.notes.as_deref()).to_string(),
                    encode_optional(item.description.as_deref()).to_string(),
                    encode_optional(item.image.as_deref()).to_string(),
                    encode_optional(item.domain.as_deref()).to_string(),
                    encode_optional(item.added_at.as_deref()).to_string(),
                    encode_optional(item.read_at.as_deref()).to_string(),
                ]
            })
            .collect(),
    )
}

pub fn parse(lines: &[&str], diagnostics: &mut Diagnostics) -> Vec<ReadingItem> {
    match Table::parse(lines) {
        Some(table) => table.decode(&SCHEMA, diagnostics, item_from_row),
        None => Vec::new(),
    }
}

fn item_from_row(row: &mut Row<'_>) -> ReadingItem {
    ReadingItem {
        id: row.text("ID"),
        url: row.text("URL"),
        title: row.text("Title"),
        status: row.choice("Status", ReadingStatus::Unread),
        tags: row.tags("Tags"),
        notes: row.optional("Notes"),
        description: row.optional("Description"),
        image: row.optional("Image"),
        domain: row.optional("Domain"),
        added_at: row.optional("Added"),
        read_at: row.optional("Read At"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_round_trip() {
        let mut item = ReadingItem::new("r1", "https://example.com/a?x=1|2", "Pipes | in titles");
        item.status = ReadingStatus::Read;
        item.tags = ["rust", "storage"].into_iter().collect();
        item.read_at = Some("2025-11-10".to_string());
        item.domain = Some("example.com".to_string());

        let rendered = render(&[item.clone()]);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(parse(&lines, &mut Diagnostics::new()), vec![item]);
    }

    #[test]
    fn test_tags_compare_as_set() {
        let lines = ["| ID | URL | Title | Tags |", "| - | - | - | - |", "| r1 | u | t | b, a |"];
        let parsed = parse(&lines, &mut Diagnostics::new());
        let expected: crate::domain::TagSet = ["a", "b"].into_iter().collect();
        assert_eq!(parsed[0].tags, expected);
        assert_eq!(parsed[0].tags.iter().next(), Some("b"));
    }
}
