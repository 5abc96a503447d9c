use super::{number_or_empty, render_table, tag_or_empty, Row, Schema, Table};
use crate::domain::{Recurrence, Subtask, Task, TaskStatus, Vocabulary};
use crate::persistence::diagnostics::Diagnostics;
use crate::persistence::fields::{encode_json, encode_optional};

/// Columns 1-19 are the original layout; 20-24 were appended later.
pub const SCHEMA: Schema = Schema {
    title: "Tasks",
    identity: "ID",
    columns: &[
        "ID",
        "Title",
        "Description",
        "Priority",
        "Status",
        "Quadrant",
        "Category",
        "Energy",
        "Created",
        "Completed",
        "Due",
        "Estimate (min)",
        "Notes",
        "Subtasks",
        "Recurrence",
        "Recurrence Day",
        "Recurrence Month",
        "Recurring Parent",
        "Next Due",
        "Status Changed",
        "Pinned For",
        "Started",
        "Time Spent (min)",
        "Link",
    ],
    placeholder: "_No tasks yet._",
};

pub fn render(tasks: &[Task]) -> String {
    render_table(&SCHEMA, tasks.iter().map(cells).collect())
}

fn cells(task: &Task) -> Vec<String> {
    let recurrence = task.recurrence.as_ref();
    vec![
        task.id.clone(),
        task.title.clone(),
        encode_optional(task.description.as_deref()).to_string(),
        task.priority.to_tag().to_string(),
        task.status.to_tag().to_string(),
        tag_or_empty(task.quadrant),
        tag_or_empty(task.category),
        tag_or_empty(task.energy),
        task.created_at.clone(),
        encode_optional(task.completed_at.as_deref()).to_string(),
        encode_optional(task.due_date.as_deref()).to_string(),
        number_or_empty(task.estimate_minutes),
        encode_optional(task.notes.as_deref()).to_string(),
        task.subtasks.as_ref().map(encode_json).unwrap_or_default(),
        recurrence
            .map(|r| r.frequency.to_tag().to_string())
            .unwrap_or_default(),
        number_or_empty(recurrence.and_then(|r| r.day)),
        number_or_empty(recurrence.and_then(|r| r.month)),
        encode_optional(task.recurring_parent_id.as_deref()).to_string(),
        encode_optional(task.next_due_date.as_deref()).to_string(),
        encode_optional(task.status_changed_at.as_deref()).to_string(),
        encode_optional(task.pinned_for.as_deref()).to_string(),
        encode_optional(task.started_at.as_deref()).to_string(),
        number_or_empty(task.time_spent_minutes),
        encode_optional(task.link.as_deref()).to_string(),
    ]
}

pub fn parse(lines: &[&str], diagnostics: &mut Diagnostics) -> Vec<Task> {
    match Table::parse(lines) {
        Some(table) => table.decode(&SCHEMA, diagnostics, task_from_row),
        None => Vec::new(),
    }
}

fn task_from_row(row: &mut Row<'_>) -> Task {
    let recurrence = row.optional_choice("Recurrence").map(|frequency| Recurrence {
        frequency,
        day: row.optional_number("Recurrence Day"),
        month: row.optional_number("Recurrence Month"),
    });

    Task {
        id: row.text("ID"),
        title: row.text("Title"),
        description: row.optional("Description"),
        priority: row.choice("Priority", Default::default()),
        status: row.choice("Status", TaskStatus::Active),
        quadrant: row.optional_choice("Quadrant"),
        category: row.optional_choice("Category"),
        energy: row.optional_choice("Energy"),
        created_at: row.text("Created"),
        completed_at: row.optional("Completed"),
        due_date: row.optional("Due"),
        estimate_minutes: row.optional_minutes("Estimate (min)"),
        notes: row.optional("Notes"),
        subtasks: row.json::<Vec<Subtask>>("Subtasks"),
        recurrence,
        recurring_parent_id: row.optional("Recurring Parent"),
        next_due_date: row.optional("Next Due"),
        status_changed_at: row.optional("Status Changed"),
        pinned_for: row.optional("Pinned For"),
        started_at: row.optional("Started"),
        time_spent_minutes: row.optional_minutes("Time Spent (min)"),
        link: row.optional("Link"),
    }
}
