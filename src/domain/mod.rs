pub mod enums;
pub mod reading;
pub mod reminder;
pub mod state;
pub mod task;
pub mod template;
pub mod timer;
pub mod validate;

pub use enums::{
    Category, DefaultView, Energy, Frequency, PomodoroStatus, Priority, Quadrant, ReadingStatus,
    ReminderCategory, ReminderRecurrence, TaskStatus, Theme, Vocabulary, WeekStart,
};
pub use reading::{ReadingItem, TagSet};
pub use reminder::Reminder;
pub use state::{AppPreferences, AppState, OpaqueSection};
pub use task::{Recurrence, Subtask, Task};
pub use template::{TaskTemplate, TemplateTask};
pub use timer::{DailyStats, Pomodoro, TaskLink, TimerSettings, DEFAULT_POMODORO_SECS};
pub use validate::{validate, ValidationError};
