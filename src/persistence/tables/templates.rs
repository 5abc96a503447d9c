use super::{render_table, Row, Schema, Table};
use crate::domain::{TaskTemplate, TemplateTask};
use crate::persistence::diagnostics::Diagnostics;
use crate::persistence::fields::{encode_json, encode_optional};
use serde::Deserialize;

pub const SCHEMA: Schema = Schema {
    title: "Templates",
    identity: "ID",
    columns: &["ID", "Name", "Created", "Description", "Tasks"],
    placeholder: "_No templates yet._",
};

pub fn render(templates: &[TaskTemplate]) -> String {
    render_table(
        &SCHEMA,
        templates
            .iter()
            .map(|template| {
                vec![
                    template.id.clone(),
                    template.name.clone(),
                    template.created_at.clone(),
                    encode_optional(template.description.as_deref()).to_string(),
                    encode_json(&template.tasks),
                ]
            })
            .collect(),
    )
}

pub fn parse(lines: &[&str], diagnostics: &mut Diagnostics) -> Vec<TaskTemplate> {
    match Table::parse(lines) {
        Some(table) => table.decode(&SCHEMA, diagnostics, template_from_row),
        None => Vec::new(),
    }
}

/// A stub as stored, tags still raw so unknown ones can be reported
#[derive(Deserialize)]
struct StoredStub {
    title: String,
    #[serde(default)]
    priority: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    energy: Option<String>,
    #[serde(default)]
    subtasks: Vec<String>,
}

fn template_from_row(row: &mut Row<'_>) -> TaskTemplate {
    let stored = row.json::<Vec<StoredStub>>("Tasks").unwrap_or_default();
    let mut tasks = Vec::with_capacity(stored.len());
    for stub in stored {
        tasks.push(TemplateTask {
            title: stub.title,
            priority: row.nested_choice("Tasks", stub.priority.as_deref()),
            category: row.nested_choice("Tasks", stub.category.as_deref()),
            energy: row.nested_choice("Tasks", stub.energy.as_deref()),
            subtasks: stub.subtasks,
        });
    }

    TaskTemplate {
        id: row.text("ID"),
        name: row.text("Name"),
        created_at: row.text("Created"),
        description: row.optional("Description"),
        tasks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Energy, Priority};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_round_trip_with_stubs() {
        let mut review = TemplateTask::new("Weekly review");
        review.priority = Some(Priority::High);
        review.energy = Some(Energy::Low);
        review.subtasks = vec!["Inbox zero".to_string(), "Plan | prioritise".to_string()];

        let templates = vec![TaskTemplate {
            id: "tpl1".to_string(),
            name: "Friday".to_string(),
            created_at: "2025-11-07T16:00:00.000Z".to_string(),
            description: Some("End of week\nwrap-up".to_string()),
            tasks: vec![review, TemplateTask::new("Timesheet")],
        }];

        let rendered = render(&templates);
        let lines: Vec<&str> = rendered.lines().collect();
        let mut diagnostics = Diagnostics::new();
        assert_eq!(parse(&lines, &mut diagnostics), templates);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_unknown_stub_tags_are_reported() {
        let lines = [
            "| ID | Name | Tasks |",
            "| --- | --- | --- |",
            r#"| tpl1 | Gym | [{"title":"Run","priority":"urgent","category":"chores","energy":"high"}] |"#,
        ];
        let mut diagnostics = Diagnostics::new();
        let parsed = parse(&lines, &mut diagnostics);

        let stub = &parsed[0].tasks[0];
        assert_eq!(stub.title, "Run");
        assert_eq!(stub.priority, None);
        assert_eq!(stub.category, None);
        assert_eq!(stub.energy, Some(Energy::High));
        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics.iter().all(|d| d.issue().starts_with("Templates tpl1: invalid Tasks")));
    }

    #[test]
    fn test_template_without_tasks_column() {
        let lines = ["| ID | Name | Created |", "| --- | --- | --- |", "| tpl1 | Morning | 2025-01-01 |"];
        let parsed = parse(&lines, &mut Diagnostics::new());
        assert_eq!(parsed[0].name, "Morning");
        assert!(parsed[0].tasks.is_empty());
    }
}
