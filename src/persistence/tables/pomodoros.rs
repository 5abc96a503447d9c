use super::{number_or_empty, render_table, Row, Schema, Table};
use crate::domain::{Pomodoro, PomodoroStatus, TaskLink, Vocabulary, DEFAULT_POMODORO_SECS};
use crate::persistence::diagnostics::Diagnostics;
use crate::persistence::fields::{encode_json, encode_optional};

pub const SCHEMA: Schema = Schema {
    title: "Pomodoros",
    identity: "ID",
    columns: &[
        "ID",
        "Title",
        "Duration (s)",
        "Elapsed (s)",
        "Status",
        "Task ID",
        "Subtask ID",
        "Created",
        "Completed",
        "Started At",
        "Accumulated (s)",
        "Links",
    ],
    placeholder: "_No pomodoros yet._",
};

pub fn render(pomodoros: &[Pomodoro]) -> String {
    render_table(&SCHEMA, pomodoros.iter().map(cells).collect())
}

fn cells(pomodoro: &Pomodoro) -> Vec<String> {
    vec![
        pomodoro.id.clone(),
        pomodoro.title.clone(),
        pomodoro.duration_secs.to_string(),
        pomodoro.elapsed_secs.to_string(),
        pomodoro.status.to_tag().to_string(),
        encode_optional(pomodoro.task_id.as_deref()).to_string(),
        encode_optional(pomodoro.subtask_id.as_deref()).to_string(),
        encode_optional(pomodoro.created_at.as_deref()).to_string(),
        encode_optional(pomodoro.completed_at.as_deref()).to_string(),
        encode_optional(pomodoro.started_at.as_deref()).to_string(),
        number_or_empty(pomodoro.accumulated_secs),
        pomodoro.links.as_ref().map(encode_json).unwrap_or_default(),
    ]
}

pub fn parse(lines: &[&str], diagnostics: &mut Diagnostics) -> Vec<Pomodoro> {
    match Table::parse(lines) {
        Some(table) => table.decode(&SCHEMA, diagnostics, pomodoro_from_row),
        None => Vec::new(),
    }
}

fn pomodoro_from_row(row: &mut Row<'_>) -> Pomodoro {
    // Legacy single link and the links list are independent; neither is derived from the other
    Pomodoro {
        id: row.text("ID"),
        title: row.text("Title"),
        duration_secs: row.number("Duration (s)", DEFAULT_POMODORO_SECS),
        elapsed_secs: row.number("Elapsed (s)", 0),
        status: row.choice("Status", PomodoroStatus::Idle),
        task_id: row.optional("Task ID"),
        subtask_id: row.optional("Subtask ID"),
        created_at: row.optional("Created"),
        completed_at: row.optional("Completed"),
        started_at: row.optional("Started At"),
        accumulated_secs: row.optional_number("Accumulated (s)"),
        links: row.json::<Vec<TaskLink>>("Links"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lines(text: &str) -> Vec<&str> {
        text.lines().collect()
    }

    #[test]
    fn test_every_column_is_written() {
        assert_eq!(cells(&Pomodoro::new("p1", "x")).len(), SCHEMA.columns.len());
    }

    #[test]
    fn test_zero_duration_survives() {
        let mut pomodoro = Pomodoro::new("p1", "Zero");
        pomodoro.duration_secs = 0;
        pomodoro.accumulated_secs = Some(0);
        let parsed = parse(&lines(&render(&[pomodoro.clone()])), &mut Diagnostics::new());
        assert_eq!(parsed, vec![pomodoro]);
    }

    #[test]
    fn test_legacy_and_multi_links_both_round_trip() {
        let mut pomodoro = Pomodoro::new("p1", "Linked");
        pomodoro.status = PomodoroStatus::Running;
        pomodoro.started_at = Some("2025-11-10T09:00:00.000Z".to_string());
        pomodoro.elapsed_secs = 300;
        pomodoro.task_id = Some("t1".to_string());
        pomodoro.subtask_id = Some("s1".to_string());
        pomodoro.links = Some(vec![
            TaskLink {
                task_id: "t1".to_string(),
                subtask_id: Some("s1".to_string()),
            },
            TaskLink {
                task_id: "t2".to_string(),
                subtask_id: None,
            },
        ]);

        let mut diagnostics = Diagnostics::new();
        let parsed = parse(&lines(&render(&[pomodoro.clone()])), &mut diagnostics);
        assert_eq!(parsed, vec![pomodoro]);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_only_legacy_link() {
        let mut pomodoro = Pomodoro::new("p1", "Old style");
        pomodoro.task_id = Some("t9".to_string());
        let parsed = parse(&lines(&render(&[pomodoro])), &mut Diagnostics::new());
        assert_eq!(parsed[0].task_id.as_deref(), Some("t9"));
        assert_eq!(parsed[0].links, None);
    }

    #[test]
    fn test_malformed_links_cell() {
        let text = "| ID | Title | Links |\n| --- | --- | --- |\n| p1 | Broken | [{\"taskId\": |\n";
        let mut diagnostics = Diagnostics::new();
        let parsed = parse(&lines(text), &mut diagnostics);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].links, None);
        assert_eq!(parsed[0].duration_secs, DEFAULT_POMODORO_SECS);
        assert_eq!(diagnostics.len(), 1);
    }
}
