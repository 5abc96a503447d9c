use super::{render_table, Row, Schema, Table};
use crate::domain::{Reminder, ReminderCategory, ReminderRecurrence, Vocabulary};
use crate::persistence::diagnostics::Diagnostics;
use crate::persistence::fields::{encode_flag, encode_optional};

pub const SCHEMA: Schema = Schema {
    title: "Reminders",
    identity: "ID",
    columns: &[
        "ID",
        "Title",
        "Date",
        "Time",
        "Recurrence",
        "Category",
        "Notes",
        "Acknowledged",
        "Acknowledged At",
        "Created",
    ],
    placeholder: "_No reminders._",
};

pub fn render(reminders: &[Reminder]) -> String {
    render_table(
        &SCHEMA,
        reminders
            .iter()
            .map(|reminder| {
                vec![
                    reminder.id.clone(),
                    reminder.title.clone(),
                    reminder.date.clone(),
                    encode_optional(reminder.time.as_deref()).to_string(),
                    reminder.recurrence.to_tag().to_string(),
                    reminder.category.to_tag().to_string(),
                    encode_optional(reminder.notes.as_deref()).to_string(),
                    reminder.acknowledged.map(encode_flag).unwrap_or("").to_string(),
                    encode_optional(reminder.acknowledged_at.as_deref()).to_string(),
                    encode_optional(reminder.created_at.as_deref()).to_string(),
                ]
            })
            .collect(),
    )
}

pub fn parse(lines: &[&str], diagnostics: &mut Diagnostics) -> Vec<Reminder> {
    match Table::parse(lines) {
        Some(table) => table.decode(&SCHEMA, diagnostics, reminder_from_row),
        None => Vec::new(),
    }
}

fn reminder_from_row(row: &mut Row<'_>) -> Reminder {
    Reminder {
        id: row.text("ID"),
        title: row.text("Title"),
        date: row.text("Date"),
        time: row.optional("Time"),
        recurrence: row.choice("Recurrence", ReminderRecurrence::Once),
        category: row.choice("Category", ReminderCategory::Personal),
        notes: row.optional("Notes"),
        acknowledged: row.flag("Acknowledged"),
        acknowledged_at: row.optional("Acknowledged At"),
        created_at: row.optional("Created"),
    }
}
