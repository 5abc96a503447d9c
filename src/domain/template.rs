use super::enums::{Category, Energy, Priority};
use serde::Serialize;

/// Task stub stored in a template (not a full task: no id, status or timestamps)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateTask {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy: Option<Energy>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subtasks: Vec<String>,
}

impl TemplateTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            priority: None,
            category: None,
            energy: None,
            subtasks: Vec::new(),
        }
    }
}

/// A reusable set of tasks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskTemplate {
    pub id: String,
    pub name: String,
    pub created_at: String,
    pub description: Option<String>,
    pub tasks: Vec<TemplateTask>,
}
