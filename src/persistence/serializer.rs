use super::sections::{render_preferences, render_settings, Section, TITLE};
use super::tables::{pomodoros, reading, reminders, stats, tasks, templates};
use crate::domain::AppState;

/// Serialize the whole state into one markdown document.
///
/// Output depends only on `state`: same state, same bytes.
pub fn encode(state: &AppState) -> String {
    let mut output = String::new();
    output.push_str(TITLE);
    output.push('\n');

    for section in Section::ORDER {
        let body = match section {
            Section::Settings => render_settings(&state.settings, state.current_streak),
            Section::Tasks => tasks::render(&state.tasks),
            Section::Pomodoros => pomodoros::render(&state.pomodoros),
            Section::DailyStats => stats::render(&state.daily_stats),
            Section::Templates => templates::render(&state.templates),
            Section::Preferences => render_preferences(&state.preferences),
            Section::ReadingList if state.reading_list.is_empty() => continue,
            Section::ReadingList => reading::render(&state.reading_list),
            Section::Reminders if state.reminders.is_empty() => continue,
            Section::Reminders => reminders::render(&state.reminders),
        };
        push_section(&mut output, section.heading(), &body);
    }

    for section in &state.unknown_sections {
        let mut body = section.body.join("\n");
        if !body.is_empty() {
            body.push('\n');
        }
        push_section(&mut output, &section.heading, &body);
    }

    output
}

fn push_section(output: &mut String, heading: &str, body: &str) {
    output.push_str(&format!("\n## {}\n\n", heading));
    output.push_str(body);
}
