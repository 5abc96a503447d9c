use super::enums::PomodoroStatus;
use serde::{Deserialize, Serialize};

/// Default focus block length in seconds
pub const DEFAULT_POMODORO_SECS: u64 = 25 * 60;

/// Link from a pomodoro to a task (and optionally one of its subtasks)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskLink {
    pub task_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtask_id: Option<String>,
}

/// A focus timer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pomodoro {
    pub id: String,
    pub title: String,
    pub duration_secs: u64,
    pub elapsed_secs: u64,
    pub status: PomodoroStatus,
    /// Legacy single link, kept alongside `links`
    pub task_id: Option<String>,
    pub subtask_id: Option<String>,
    pub created_at: Option<String>,
    pub completed_at: Option<String>,
    /// When the current run started (for resuming a running timer)
    pub started_at: Option<String>,
    /// Seconds accumulated before `started_at`
    pub accumulated_secs: Option<u64>,
    pub links: Option<Vec<TaskLink>>,
}

impl Pomodoro {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            duration_secs: DEFAULT_POMODORO_SECS,
            elapsed_secs: 0,
            status: PomodoroStatus::Idle,
            task_id: None,
            subtask_id: None,
            created_at: None,
            completed_at: None,
            started_at: None,
            accumulated_secs: None,
            links: None,
        }
    }
}

/// Timer configuration (the "Settings" section)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerSettings {
    pub focus_minutes: u32,
    pub short_break_minutes: u32,
    pub long_break_minutes: u32,
    pub sessions_before_long_break: u32,
    pub auto_start_breaks: bool,
    pub auto_start_focus: bool,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            focus_minutes: 25,
            short_break_minutes: 5,
            long_break_minutes: 15,
            sessions_before_long_break: 4,
            auto_start_breaks: false,
            auto_start_focus: false,
        }
    }
}

/// Usage counters for one calendar day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyStats {
    /// ISO date, e.g. "2025-11-10"
    pub date: String,
    pub pomodoros: u32,
    pub focus_minutes: u32,
    pub tasks_completed: u32,
    pub break_minutes: u32,
}

impl DailyStats {
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            pomodoros: 0,
            focus_minutes: 0,
            tasks_completed: 0,
            break_minutes: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_pomodoro_is_idle() {
        let pomodoro = Pomodoro::new("p1", "Deep work");
        assert_eq!(pomodoro.duration_secs, DEFAULT_POMODORO_SECS);
        assert_eq!(pomodoro.status, PomodoroStatus::Idle);
        assert!(pomodoro.links.is_none());
    }

    #[test]
    fn test_timer_settings_default() {
        let settings = TimerSettings::default();
        assert_eq!(settings.focus_minutes, 25);
        assert_eq!(settings.sessions_before_long_break, 4);
        assert!(!settings.auto_start_breaks);
    }
}
