use super::enums::{Category, Energy, Frequency, Priority, Quadrant, TaskStatus};
use chrono::Local;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A checklist entry inside a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub done: bool,
}

/// Repeat rule of a recurring task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recurrence {
    pub frequency: Frequency,
    /// Day of week (0-6) or day of month (1-31), depending on frequency
    pub day: Option<u32>,
    /// Month (1-12) for yearly recurrence
    pub month: Option<u32>,
}

/// A task on the planner
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub status: TaskStatus,
    pub quadrant: Option<Quadrant>,
    pub category: Option<Category>,
    pub energy: Option<Energy>,
    pub created_at: String,
    pub completed_at: Option<String>,
    pub due_date: Option<String>,
    /// Minutes; other clients may write fractions
    pub estimate_minutes: Option<f64>,
    pub notes: Option<String>,
    pub subtasks: Option<Vec<Subtask>>,
    pub recurrence: Option<Recurrence>,
    /// Task this occurrence was generated from
    pub recurring_parent_id: Option<String>,
    pub next_due_date: Option<String>,
    pub status_changed_at: Option<String>,
    /// Date the task is pinned to "today" for
    pub pinned_for: Option<String>,
    pub started_at: Option<String>,
    pub time_spent_minutes: Option<f64>,
    pub link: Option<String>,
}

impl Task {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            description: None,
            priority: Priority::default(),
            status: TaskStatus::default(),
            quadrant: None,
            category: None,
            energy: None,
            created_at: Local::now().to_rfc3339(),
            completed_at: None,
            due_date: None,
            estimate_minutes: None,
            notes: None,
            subtasks: None,
            recurrence: None,
            recurring_parent_id: None,
            next_due_date: None,
            status_changed_at: None,
            pinned_for: None,
            started_at: None,
            time_spent_minutes: None,
            link: None,
        }
    }
}
