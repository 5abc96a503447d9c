use super::diagnostics::Diagnostics;
use super::sections::{parse_preferences, parse_settings, Section, SplitDocument, TITLE};
use super::tables::{pomodoros, reading, reminders, stats, tasks, templates};
use crate::domain::AppState;

/// Parse a document into state. Never fails: whatever cannot be read falls
/// back to defaults.
pub fn decode(content: &str) -> AppState {
    decode_with_diagnostics(content).0
}

/// Like `decode`, also returning every recovery made along the way
pub fn decode_with_diagnostics(content: &str) -> (AppState, Diagnostics) {
    let mut diagnostics = Diagnostics::new();
    let document = SplitDocument::split(content);

    let (settings, current_streak) = parse_settings(document.lines(Section::Settings), &mut diagnostics);
    let preferences = parse_preferences(document.lines(Section::Preferences), &mut diagnostics);

    let tasks = tasks::parse(document.lines(Section::Tasks), &mut diagnostics);
    let pomodoros = pomodoros::parse(document.lines(Section::Pomodoros), &mut diagnostics);
    let daily_stats = stats::parse(document.lines(Section::DailyStats), &mut diagnostics);
    let templates = templates::parse(document.lines(Section::Templates), &mut diagnostics);
    let reading_list = reading::parse(document.lines(Section::ReadingList), &mut diagnostics);
    let reminders = reminders::parse(document.lines(Section::Reminders), &mut diagnostics);

    let state = AppState {
        settings,
        current_streak,
        tasks,
        pomodoros,
        daily_stats,
        templates,
        preferences,
        reading_list,
        reminders,
        unknown_sections: document.into_unknown(),
    };
    (state, diagnostics)
}

/// Whether text looks like one of our documents: the title line or at
/// least one known section heading
pub fn is_recognizable(content: &str) -> bool {
    content.lines().map(str::trim).any(|line| {
        line.eq_ignore_ascii_case(TITLE)
            || line
                .strip_prefix("## ")
                .map_or(false, |heading| Section::from_heading(heading).is_some())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Category, DailyStats, Frequency, OpaqueSection, Pomodoro, Priority, ReadingItem, Recurrence,
        Reminder, Subtask, Task, TaskLink, TaskStatus, TimerSettings,
    };
    use crate::persistence::serializer::encode;
    use pretty_assertions::assert_eq;

    fn task(id: &str, title: &str) -> Task {
        Task {
            id: id.to_string(),
            created_at: "2025-11-12T09:00:00.000Z".to_string(),
            ..Task::new(title)
        }
    }

    #[test]
    fn test_done_task_round_trip() {
        let mut done = task("t1", "Ship release");
        done.status = TaskStatus::Done;
        done.completed_at = Some("2025-11-12T17:30:00.000Z".to_string());

        let mut state = AppState::new();
        state.tasks.push(done.clone());

        let decoded = decode(&encode(&state));
        assert_eq!(decoded.tasks, vec![done]);
        assert!(decoded.pomodoros.is_empty());
        assert!(decoded.reminders.is_empty());
        assert!(decoded.reading_list.is_empty());
    }

    #[test]
    fn test_pipes_and_newlines_round_trip() {
        let mut tricky = task("t1", "Option A | Option B");
        tricky.description = Some("Line 1\nLine 2 | with pipe".to_string());

        let mut state = AppState::new();
        state.tasks.push(tricky);

        let decoded = decode(&encode(&state));
        assert_eq!(decoded.tasks[0].title, "Option A | Option B");
        assert_eq!(decoded.tasks[0].description.as_deref(), Some("Line 1\nLine 2 | with pipe"));
    }

    #[test]
    fn test_nineteen_column_tasks_table() {
        let content = "\
# Daybook

## Tasks

| ID | Title | Description | Priority | Status | Quadrant | Category | Energy | Created | Completed | Due | Estimate (min) | Notes | Subtasks | Recurrence | Recurrence Day | Recurrence Month | Recurring Parent | Next Due |
| --- | --- | --- | --- | --- | --- | --- | --- | --- | --- | --- | --- | --- | --- | --- | --- | --- | --- | --- |
| t1 | Pay taxes | Annual | high | active | do | personal | low | 2024-03-01 | | 2024-04-15 | 90 | bring receipts | [{\"id\":\"s1\",\"title\":\"Collect\",\"done\":true}] | yearly | 15 | 4 | t0 | 2025-04-15 |
";
        let (state, diagnostics) = decode_with_diagnostics(content);
        assert!(diagnostics.is_empty());
        assert_eq!(state.tasks.len(), 1);

        let task = &state.tasks[0];
        assert_eq!(task.id, "t1");
        assert_eq!(task.title, "Pay taxes");
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.category, Some(Category::Personal));
        assert_eq!(task.estimate_minutes, Some(90.0));
        assert_eq!(task.completed_at, None);
        assert_eq!(
            task.subtasks,
            Some(vec![Subtask {
                id: "s1".to_string(),
                title: "Collect".to_string(),
                done: true,
            }])
        );
        assert_eq!(
            task.recurrence,
            Some(Recurrence {
                frequency: Frequency::Yearly,
                day: Some(15),
                month: Some(4),
            })
        );
        assert_eq!(task.recurring_parent_id.as_deref(), Some("t0"));
        assert_eq!(task.next_due_date.as_deref(), Some("2025-04-15"));

        assert_eq!(task.status_changed_at, None);
        assert_eq!(task.pinned_for, None);
        assert_eq!(task.started_at, None);
        assert_eq!(task.time_spent_minutes, None);
        assert_eq!(task.link, None);
    }

    #[test]
    fn test_zero_timer_settings() {
        let mut state = AppState::new();
        state.settings = TimerSettings {
            focus_minutes: 0,
            short_break_minutes: 0,
            long_break_minutes: 0,
            sessions_before_long_break: 0,
            ..TimerSettings::default()
        };
        let decoded = decode(&encode(&state));
        assert_eq!(decoded.settings, state.settings);
    }

    #[test]
    fn test_full_state_round_trip() {
        let mut state = AppState::new();
        state.current_streak = 12;

        let mut parent = task("t1", "Water plants");
        parent.recurrence = Some(Recurrence {
            frequency: Frequency::Weekly,
            day: Some(3),
            month: None,
        });
        parent.subtasks = Some(Vec::new());
        parent.time_spent_minutes = Some(1.5);
        state.tasks.push(parent);
        state.tasks.push(task("t2", "Second"));

        let mut pomodoro = Pomodoro::new("p1", "Deep work");
        pomodoro.task_id = Some("t1".to_string());
        pomodoro.links = Some(vec![TaskLink {
            task_id: "t2".to_string(),
            subtask_id: None,
        }]);
        state.pomodoros.push(pomodoro);

        state.daily_stats.push(DailyStats {
            pomodoros: 3,
            ..DailyStats::new("2025-11-12")
        });
        let mut reminder = Reminder::new("r1", "Dentist", "2025-12-01");
        reminder.acknowledged = Some(false);
        state.reminders.push(reminder);
        state.unknown_sections.push(OpaqueSection {
            heading: "Scratch".to_string(),
            body: vec!["| not | ours |".to_string(), "".to_string(), "free text".to_string()],
        });

        let encoded = encode(&state);
        let (decoded, diagnostics) = decode_with_diagnostics(&encoded);
        assert!(diagnostics.is_empty());
        assert_eq!(decoded, state);
        assert_eq!(encode(&decoded), encoded);
    }

    #[test]
    fn test_whitespace_and_comma_values_round_trip() {
        let mut state = AppState::new();
        let mut padded = task("t1", "  indented title ");
        padded.description = Some("   ".to_string());
        state.tasks.push(padded);

        let mut item = ReadingItem::new("r1", "https://example.com", "Example");
        item.tags = ["rust, async"].into_iter().collect();
        state.reading_list.push(item);

        let decoded = decode(&encode(&state));
        assert_eq!(decoded.tasks[0].title, "  indented title ");
        assert_eq!(decoded.tasks[0].description.as_deref(), Some("   "));
        assert_eq!(decoded.reading_list[0].tags.len(), 1);
        assert_eq!(decoded, state);
    }

    #[test]
    fn test_empty_and_title_only() {
        assert_eq!(decode(""), AppState::new());
        assert_eq!(decode("# Daybook\n"), AppState::new());
    }

    #[test]
    fn test_nonsense_sections_decode_to_defaults() {
        let content = "## Tasks\nno table here\n## Settings\n- **Focus Duration:** lots\n## Daily Stats\n| a | b |\n| 1 | 2 |\n";
        let (state, diagnostics) = decode_with_diagnostics(content);
        assert!(state.tasks.is_empty());
        assert!(state.daily_stats.is_empty());
        assert_eq!(state.settings, TimerSettings::default());
        assert!(!diagnostics.is_empty());
    }

    #[test]
    fn test_invalid_status_is_repaired_and_reported() {
        let content = "## Tasks\n| ID | Title | Status |\n| --- | --- | --- |\n| t1 | Odd | archived |\n";
        let (state, diagnostics) = decode_with_diagnostics(content);
        assert_eq!(state.tasks[0].status, TaskStatus::Active);
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_is_recognizable() {
        assert!(is_recognizable("# Daybook\n"));
        assert!(is_recognizable("notes\n## reminders\n"));
        assert!(!is_recognizable(""));
        assert!(!is_recognizable("# Shopping\n- milk\n"));
    }
}
