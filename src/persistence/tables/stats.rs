use super::{render_table, Row, Schema, Table};
use crate::domain::DailyStats;
use crate::persistence::diagnostics::Diagnostics;

pub const SCHEMA: Schema = Schema {
    title: "Daily Stats",
    identity: "Date",
    columns: &["Date", "Pomodoros", "Focus (min)", "Tasks Completed", "Break (min)"],
    placeholder: "_No stats recorded yet._",
};

pub fn render(stats: &[DailyStats]) -> String {
    render_table(
        &SCHEMA,
        stats
            .iter()
            .map(|day| {
                vec![
                    day.date.clone(),
                    day.pomodoros.to_string(),
                    day.focus_minutes.to_string(),
                    day.tasks_completed.to_string(),
                    day.break_minutes.to_string(),
                ]
            })
            .collect(),
    )
}

pub fn parse(lines: &[&str], diagnostics: &mut Diagnostics) -> Vec<DailyStats> {
    match Table::parse(lines) {
        Some(table) => table.decode(&SCHEMA, diagnostics, stats_from_row),
        None => Vec::new(),
    }
}

fn stats_from_row(row: &mut Row<'_>) -> DailyStats {
    DailyStats {
        date: row.text("Date"),
        pomodoros: row.number("Pomodoros", 0),
        focus_minutes: row.number("Focus (min)", 0),
        tasks_completed: row.number("Tasks Completed", 0),
        break_minutes: row.number("Break (min)", 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_keeps_order() {
        let stats = vec![
            DailyStats {
                pomodoros: 6,
                focus_minutes: 150,
                ..DailyStats::new("2025-11-11")
            },
            DailyStats::new("2025-11-09"),
        ];
        let rendered = render(&stats);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(parse(&lines, &mut Diagnostics::new()), stats);
    }

    #[test]
    fn test_older_table_without_break_column() {
        let lines = [
            "| Date | Pomodoros | Focus (min) | Tasks Completed |",
            "| --- | --- | --- | --- |",
            "| 2025-11-10 | 4 | 100 | 0 |",
        ];
        let mut diagnostics = Diagnostics::new();
        let parsed = parse(&lines, &mut diagnostics);
        assert_eq!(parsed[0].tasks_completed, 0);
        assert_eq!(parsed[0].break_minutes, 0);
        assert_eq!(parsed[0].focus_minutes, 100);
        assert!(diagnostics.is_empty());
    }
}
