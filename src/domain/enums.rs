use serde::{Serialize, Serializer};
use std::fmt;

/// A closed set of lowercase tags stored in the document.
pub trait Vocabulary: Copy + Sized + 'static {
    const ALL: &'static [Self];

    /// Convert to the tag written to the document
    fn to_tag(&self) -> &'static str;

    /// Parse a stored tag (case-insensitive, surrounding whitespace ignored)
    fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|value| value.to_tag().eq_ignore_ascii_case(tag))
    }
}

macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $tag:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl Vocabulary for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn to_tag(&self) -> &'static str {
                match self {
                    $(Self::$variant => $tag),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.to_tag())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.to_tag())
            }
        }
    };
}

vocabulary! {
    /// Task priority
    #[derive(Default)]
    Priority {
        Low => "low",
        #[default]
        Medium => "medium",
        High => "high",
    }
}

vocabulary! {
    /// Lifecycle status of a task
    #[derive(Default)]
    TaskStatus {
        #[default]
        Active => "active",
        Done => "done",
        Monitored => "monitored",
    }
}

vocabulary! {
    /// Eisenhower matrix quadrant
    Quadrant {
        Do => "do",
        Schedule => "schedule",
        Delegate => "delegate",
        Eliminate => "eliminate",
    }
}

vocabulary! {
    Category {
        Work => "work",
        Personal => "personal",
        Health => "health",
        Learning => "learning",
        Errands => "errands",
        Other => "other",
    }
}

vocabulary! {
    /// Energy a task demands
    Energy {
        Low => "low",
        Medium => "medium",
        High => "high",
    }
}

vocabulary! {
    /// How often a recurring task comes back
    Frequency {
        Daily => "daily",
        Weekdays => "weekdays",
        Weekly => "weekly",
        Monthly => "monthly",
        Yearly => "yearly",
    }
}

vocabulary! {
    /// Runtime status of a pomodoro timer
    #[derive(Default)]
    PomodoroStatus {
        #[default]
        Idle => "idle",
        Running => "running",
        Paused => "paused",
        Completed => "completed",
    }
}

vocabulary! {
    /// Repeat rule for reminders (separate from task frequency: reminders can be one-off)
    #[derive(Default)]
    ReminderRecurrence {
        #[default]
        Once => "none",
        Daily => "daily",
        Weekly => "weekly",
        Monthly => "monthly",
        Yearly => "yearly",
    }
}

vocabulary! {
    #[derive(Default)]
    ReminderCategory {
        #[default]
        Personal => "personal",
        Work => "work",
        Health => "health",
        Bill => "bill",
        Birthday => "birthday",
        Other => "other",
    }
}

vocabulary! {
    #[derive(Default)]
    ReadingStatus {
        #[default]
        Unread => "unread",
        Reading => "reading",
        Read => "read",
    }
}

vocabulary! {
    #[derive(Default)]
    Theme {
        #[default]
        System => "system",
        Light => "light",
        Dark => "dark",
    }
}

vocabulary! {
    #[derive(Default)]
    WeekStart {
        #[default]
        Monday => "monday",
        Sunday => "sunday",
    }
}

vocabulary! {
    /// Screen the app opens on
    #[derive(Default)]
    DefaultView {
        #[default]
        List => "list",
        Matrix => "matrix",
        Calendar => "calendar",
        Focus => "focus",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tag() {
        assert_eq!(TaskStatus::from_tag("done"), Some(TaskStatus::Done));
        assert_eq!(TaskStatus::from_tag("  Monitored "), Some(TaskStatus::Monitored));
        assert_eq!(TaskStatus::from_tag("archived"), None);
        assert_eq!(TaskStatus::from_tag(""), None);
    }

    #[test]
    fn test_to_tag() {
        assert_eq!(Priority::High.to_tag(), "high");
        assert_eq!(ReminderRecurrence::Once.to_tag(), "none");
        assert_eq!(Quadrant::Eliminate.to_string(), "eliminate");
    }

    #[test]
    fn test_defaults() {
        assert_eq!(TaskStatus::default(), TaskStatus::Active);
        assert_eq!(Priority::default(), Priority::Medium);
        assert_eq!(PomodoroStatus::default(), PomodoroStatus::Idle);
        assert_eq!(ReadingStatus::default(), ReadingStatus::Unread);
    }

    #[test]
    fn test_every_tag_parses_back() {
        for status in ReminderCategory::ALL {
            assert_eq!(ReminderCategory::from_tag(status.to_tag()), Some(*status));
        }
    }
}
