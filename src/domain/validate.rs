use super::state::AppState;
use std::collections::HashSet;
use thiserror::Error;

/// Why a state was rejected before saving
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{kind} has an empty id")]
    EmptyId { kind: &'static str },
    #[error("{kind} id {id:?} is used more than once")]
    DuplicateId { kind: &'static str, id: String },
    #[error("{kind} {id:?} has an empty title")]
    EmptyTitle { kind: &'static str, id: String },
    #[error("task {id:?} has recurrence month {month}, expected 1-12")]
    InvalidMonth { id: String, month: u32 },
}

/// Check structural rules the document format cannot enforce on its own.
///
/// Pure: takes the decoded state and reports the first problem found.
pub fn validate(state: &AppState) -> Result<(), ValidationError> {
    check_ids("task", state.tasks.iter().map(|task| task.id.as_str()))?;
    check_ids("pomodoro", state.pomodoros.iter().map(|p| p.id.as_str()))?;
    check_ids("daily stats", state.daily_stats.iter().map(|s| s.date.as_str()))?;
    check_ids("template", state.templates.iter().map(|t| t.id.as_str()))?;
    check_ids("reading item", state.reading_list.iter().map(|r| r.id.as_str()))?;
    check_ids("reminder", state.reminders.iter().map(|r| r.id.as_str()))?;

    for task in &state.tasks {
        if task.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle {
                kind: "task",
                id: task.id.clone(),
            });
        }
        if let Some(month) = task.recurrence.as_ref().and_then(|r| r.month) {
            if !(1..=12).contains(&month) {
                return Err(ValidationError::InvalidMonth {
                    id: task.id.clone(),
                    month,
                });
            }
        }
    }

    for reminder in &state.reminders {
        if reminder.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle {
                kind: "reminder",
                id: reminder.id.clone(),
            });
        }
    }

    Ok(())
}

fn check_ids<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for id in ids {
        if id.trim().is_empty() {
            return Err(ValidationError::EmptyId { kind });
        }
        if !seen.insert(id) {
            return Err(ValidationError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}
