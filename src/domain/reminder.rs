use super::enums::{ReminderCategory, ReminderRecurrence};

/// A dated reminder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub id: String,
    pub title: String,
    pub date: String,
    /// Absent for all-day reminders
    pub time: Option<String>,
    pub recurrence: ReminderRecurrence,
    pub category: ReminderCategory,
    pub notes: Option<String>,
    pub acknowledged: Option<bool>,
    pub acknowledged_at: Option<String>,
    pub created_at: Option<String>,
}

impl Reminder {
    pub fn new(id: impl Into<String>, title: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            date: date.into(),
            time: None,
            recurrence: ReminderRecurrence::default(),
            category: ReminderCategory::default(),
            notes: None,
            acknowledged: None,
            acknowledged_at: None,
            created_at: None,
        }
    }

    pub fn is_all_day(&self) -> bool {
        self.time.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_day() {
        let mut reminder = Reminder::new("r1", "Dentist", "2025-11-12");
        assert!(reminder.is_all_day());
        reminder.time = Some("09:30".to_string());
        assert!(!reminder.is_all_day());
    }
}
