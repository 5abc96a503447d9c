use super::enums::{DefaultView, Theme, WeekStart};
use super::reading::ReadingItem;
use super::reminder::Reminder;
use super::task::Task;
use super::template::TaskTemplate;
use super::timer::{DailyStats, Pomodoro, TimerSettings};

/// App-wide preferences (the "Preferences" section)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPreferences {
    pub theme: Theme,
    pub week_start: WeekStart,
    pub default_view: DefaultView,
    pub daily_goal_minutes: u32,
    pub sound_enabled: bool,
    pub notifications_enabled: bool,
}

impl Default for AppPreferences {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            week_start: WeekStart::default(),
            default_view: DefaultView::default(),
            daily_goal_minutes: 120,
            sound_enabled: true,
            notifications_enabled: true,
        }
    }
}

/// A section with a heading this version does not know, carried through untouched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpaqueSection {
    pub heading: String,
    pub body: Vec<String>,
}

/// Everything the planner persists. One value per data file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub settings: TimerSettings,
    pub current_streak: u32,
    pub tasks: Vec<Task>,
    pub pomodoros: Vec<Pomodoro>,
    pub daily_stats: Vec<DailyStats>,
    pub templates: Vec<TaskTemplate>,
    pub preferences: AppPreferences,
    pub reading_list: Vec<ReadingItem>,
    pub reminders: Vec<Reminder>,
    pub unknown_sections: Vec<OpaqueSection>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = AppState::new();
        assert!(state.tasks.is_empty());
        assert_eq!(state.current_streak, 0);
        assert_eq!(state.preferences.daily_goal_minutes, 120);
        assert!(state.preferences.sound_enabled);
    }
}
