//! Splitting a document into `##` sections and the key/value sections.

use super::diagnostics::Diagnostics;
use super::fields::{encode_switch, leading_token, parse_flag, parse_number};
use crate::domain::{AppPreferences, OpaqueSection, TimerSettings, Vocabulary};
use std::fmt::Display;
use std::str::FromStr;

/// Title line at the top of every document
pub const TITLE: &str = "# Daybook";

/// Known sections, in the order they are written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Settings,
    Tasks,
    Pomodoros,
    DailyStats,
    Templates,
    Preferences,
    ReadingList,
    Reminders,
}

impl Section {
    pub const ORDER: [Section; 8] = [
        Section::Settings,
        Section::Tasks,
        Section::Pomodoros,
        Section::DailyStats,
        Section::Templates,
        Section::Preferences,
        Section::ReadingList,
        Section::Reminders,
    ];

    pub fn heading(&self) -> &'static str {
        match self {
            Section::Settings => "Settings",
            Section::Tasks => "Tasks",
            Section::Pomodoros => "Pomodoros",
            Section::DailyStats => "Daily Stats",
            Section::Templates => "Templates",
            Section::Preferences => "Preferences",
            Section::ReadingList => "Reading List",
            Section::Reminders => "Reminders",
        }
    }

    /// Match heading text (without `## `), accepting a few older spellings
    pub fn from_heading(text: &str) -> Option<Self> {
        let text = text.trim();
        if let Some(section) = Self::ORDER
            .iter()
            .copied()
            .find(|section| section.heading().eq_ignore_ascii_case(text))
        {
            return Some(section);
        }
        match text.to_ascii_lowercase().as_str() {
            "timer settings" => Some(Section::Settings),
            "stats" | "statistics" => Some(Section::DailyStats),
            "task templates" => Some(Section::Templates),
            "reading" => Some(Section::ReadingList),
            _ => None,
        }
    }
}

/// Where lines are currently being collected while splitting
enum Target {
    Preamble,
    Known(usize),
    Unknown(usize),
    Ignored,
}

/// A document cut into sections
#[derive(Debug, Default)]
pub struct SplitDocument<'a> {
    known: Vec<(Section, Vec<&'a str>)>,
    unknown: Vec<OpaqueSection>,
}

impl<'a> SplitDocument<'a> {
    pub fn split(content: &'a str) -> Self {
        let mut document = SplitDocument::default();
        let mut target = Target::Preamble;

        for line in content.lines() {
            let trimmed = line.trim();

            if let Some(heading) = trimmed.strip_prefix("## ") {
                target = match Section::from_heading(heading) {
                    Some(section) if document.section(section).is_some() => {
                        tracing::warn!(heading, "repeated section ignored");
                        Target::Ignored
                    }
                    Some(section) => {
                        document.known.push((section, Vec::new()));
                        Target::Known(document.known.len() - 1)
                    }
                    None => {
                        document.unknown.push(OpaqueSection {
                            heading: heading.trim().to_string(),
                            body: Vec::new(),
                        });
                        Target::Unknown(document.unknown.len() - 1)
                    }
                };
                continue;
            }

            match target {
                Target::Known(index) => document.known[index].1.push(line),
                Target::Unknown(index) => document.unknown[index].body.push(line.to_string()),
                // Title line and anything before the first section
                Target::Preamble | Target::Ignored => {}
            }
        }

        for section in &mut document.unknown {
            trim_blank_edges(&mut section.body);
        }
        document
    }

    /// Body lines of a known section, `None` if the document lacks it
    pub fn section(&self, section: Section) -> Option<&[&'a str]> {
        self.known
            .iter()
            .find(|(kind, _)| *kind == section)
            .map(|(_, lines)| lines.as_slice())
    }

    /// Lines of a section, empty when missing
    pub fn lines(&self, section: Section) -> &[&'a str] {
        self.section(section).unwrap_or(&[])
    }

    pub fn has_known_sections(&self) -> bool {
        !self.known.is_empty()
    }

    pub fn into_unknown(self) -> Vec<OpaqueSection> {
        self.unknown
    }
}

fn trim_blank_edges(lines: &mut Vec<String>) {
    while lines.last().map_or(false, |line| line.trim().is_empty()) {
        lines.pop();
    }
    let leading = lines.iter().take_while(|line| line.trim().is_empty()).count();
    lines.drain(..leading);
}

/// `- **Label:** value` lines of one section
#[derive(Debug, Default)]
pub struct KeyValues {
    entries: Vec<(String, String)>,
}

impl KeyValues {
    pub fn parse(lines: &[&str]) -> Self {
        let entries = lines
            .iter()
            .filter_map(|line| parse_key_value(line))
            .collect();
        Self { entries }
    }

    /// Value for a label (case-insensitive); the first occurrence wins
    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(label))
            .map(|(_, value)| value.as_str())
    }

    /// Number from the first token ("25 min" -> 25). Zero is kept.
    fn number<T: FromStr + Display>(
        &self,
        label: &str,
        default: T,
        location: &str,
        diagnostics: &mut Diagnostics,
    ) -> T {
        let Some(value) = self.get(label) else {
            return default;
        };
        let token = leading_token(value);
        if token.is_empty() {
            return default;
        }
        match parse_number(token) {
            Some(number) => number,
            None => {
                diagnostics.repaired(location, label, value, default.to_string());
                default
            }
        }
    }

    fn switch(&self, label: &str, default: bool, location: &str, diagnostics: &mut Diagnostics) -> bool {
        let Some(value) = self.get(label).filter(|value| !value.trim().is_empty()) else {
            return default;
        };
        match parse_flag(value) {
            Some(flag) => flag,
            None => {
                diagnostics.repaired(location, label, value, encode_switch(default));
                default
            }
        }
    }

    fn choice<T: Vocabulary>(&self, label: &str, default: T, location: &str, diagnostics: &mut Diagnostics) -> T {
        let Some(value) = self.get(label).filter(|value| !value.trim().is_empty()) else {
            return default;
        };
        match T::from_tag(value) {
            Some(choice) => choice,
            None => {
                diagnostics.repaired(location, label, value, default.to_tag());
                default
            }
        }
    }
}

fn parse_key_value(line: &str) -> Option<(String, String)> {
    let line = line.trim();
    let line = line
        .strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))
        .unwrap_or(line)
        .trim_start();
    let rest = line.strip_prefix("**")?;

    // "**Label:** value" or "**Label**: value"
    let (label, value) = rest
        .split_once(":**")
        .or_else(|| rest.split_once("**:"))?;
    Some((label.trim().to_string(), value.trim().to_string()))
}

fn key_value_line(label: &str, value: impl Display) -> String {
    format!("- **{}:** {}\n", label, value)
}

const FOCUS_DURATION: &str = "Focus Duration";
const SHORT_BREAK: &str = "Short Break";
const LONG_BREAK: &str = "Long Break";
const SESSIONS_BEFORE_LONG_BREAK: &str = "Sessions Before Long Break";
const AUTO_START_BREAKS: &str = "Auto-start Breaks";
const AUTO_START_FOCUS: &str = "Auto-start Focus";
const CURRENT_STREAK: &str = "Current Streak";

const THEME: &str = "Theme";
const WEEK_START: &str = "Week Starts On";
const DEFAULT_VIEW: &str = "Default View";
const DAILY_GOAL: &str = "Daily Goal";
const SOUND: &str = "Sound";
const NOTIFICATIONS: &str = "Notifications";

pub fn render_settings(settings: &TimerSettings, current_streak: u32) -> String {
    let mut output = String::new();
    output.push_str(&key_value_line(FOCUS_DURATION, format!("{} min", settings.focus_minutes)));
    output.push_str(&key_value_line(SHORT_BREAK, format!("{} min", settings.short_break_minutes)));
    output.push_str(&key_value_line(LONG_BREAK, format!("{} min", settings.long_break_minutes)));
    output.push_str(&key_value_line(SESSIONS_BEFORE_LONG_BREAK, settings.sessions_before_long_break));
    output.push_str(&key_value_line(AUTO_START_BREAKS, encode_switch(settings.auto_start_breaks)));
    output.push_str(&key_value_line(AUTO_START_FOCUS, encode_switch(settings.auto_start_focus)));
    output.push_str(&key_value_line(CURRENT_STREAK, format!("{} days", current_streak)));
    output
}

/// Timer settings and the streak counter; every field falls back on its own
pub fn parse_settings(lines: &[&str], diagnostics: &mut Diagnostics) -> (TimerSettings, u32) {
    let values = KeyValues::parse(lines);
    let defaults = TimerSettings::default();
    let at = Section::Settings.heading();

    let settings = TimerSettings {
        focus_minutes: values.number(FOCUS_DURATION, defaults.focus_minutes, at, diagnostics),
        short_break_minutes: values.number(SHORT_BREAK, defaults.short_break_minutes, at, diagnostics),
        long_break_minutes: values.number(LONG_BREAK, defaults.long_break_minutes, at, diagnostics),
        sessions_before_long_break: values.number(
            SESSIONS_BEFORE_LONG_BREAK,
            defaults.sessions_before_long_break,
            at,
            diagnostics,
        ),
        auto_start_breaks: values.switch(AUTO_START_BREAKS, defaults.auto_start_breaks, at, diagnostics),
        auto_start_focus: values.switch(AUTO_START_FOCUS, defaults.auto_start_focus, at, diagnostics),
    };
    let streak = values.number(CURRENT_STREAK, 0, at, diagnostics);

    (settings, streak)
}

pub fn render_preferences(preferences: &AppPreferences) -> String {
    let mut output = String::new();
    output.push_str(&key_value_line(THEME, preferences.theme));
    output.push_str(&key_value_line(WEEK_START, preferences.week_start));
    output.push_str(&key_value_line(DEFAULT_VIEW, preferences.default_view));
    output.push_str(&key_value_line(DAILY_GOAL, format!("{} min", preferences.daily_goal_minutes)));
    output.push_str(&key_value_line(SOUND, encode_switch(preferences.sound_enabled)));
    output.push_str(&key_value_line(NOTIFICATIONS, encode_switch(preferences.notifications_enabled)));
    output
}

pub fn parse_preferences(lines: &[&str], diagnostics: &mut Diagnostics) -> AppPreferences {
    let values = KeyValues::parse(lines);
    let defaults = AppPreferences::default();
    let at = Section::Preferences.heading();

    AppPreferences {
        theme: values.choice(THEME, defaults.theme, at, diagnostics),
        week_start: values.choice(WEEK_START, defaults.week_start, at, diagnostics),
        default_view: values.choice(DEFAULT_VIEW, defaults.default_view, at, diagnostics),
        daily_goal_minutes: values.number(DAILY_GOAL, defaults.daily_goal_minutes, at, diagnostics),
        sound_enabled: values.switch(SOUND, defaults.sound_enabled, at, diagnostics),
        notifications_enabled: values.switch(NOTIFICATIONS, defaults.notifications_enabled, at, diagnostics),
    }
}
