use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

pub type TaskId = u32;

/// Task priority as stored. Values outside the three known levels are kept
/// verbatim in `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Unknown(String),
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(&self) -> &str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Unknown(raw) => raw,
        }
    }

    /// Capitalized form shown on cards.
    pub fn label(&self) -> String {
        let mut chars = self.as_str().chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    pub fn next(&self) -> Self {
        cycle(&Self::ALL, self.clone(), 1)
    }

    pub fn prev(&self) -> Self {
        cycle(&Self::ALL, self.clone(), -1)
    }
}

impl From<String> for Priority {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "low" => Priority::Low,
            "medium" | "" => Priority::Medium,
            "high" => Priority::High,
            _ => Priority::Unknown(raw),
        }
    }
}

impl From<Priority> for String {
    fn from(priority: Priority) -> Self {
        match priority {
            Priority::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

/// Task status as stored. Anything outside the four columns is kept verbatim
/// in `Unknown` so a load/save cycle never rewrites it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    #[default]
    Todo,
    InProgress,
    Review,
    Done,
    Unknown(String),
}

impl Status {
    pub const COLUMNS: [Status; 4] = [
        Status::Todo,
        Status::InProgress,
        Status::Review,
        Status::Done,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Status::Todo => "todo",
            Status::InProgress => "in-progress",
            Status::Review => "review",
            Status::Done => "done",
            Status::Unknown(raw) => raw,
        }
    }

    pub fn heading(&self) -> &'static str {
        match self.column() {
            Status::InProgress => "In Progress",
            Status::Review => "Review",
            Status::Done => "Done",
            _ => "To Do",
        }
    }

    /// The column this status renders in; unknown values land in todo.
    pub fn column(&self) -> Status {
        match self {
            Status::Unknown(_) => Status::Todo,
            known => known.clone(),
        }
    }

    /// Index of the rendering column, 0..4.
    pub fn column_index(&self) -> usize {
        match self {
            Status::InProgress => 1,
            Status::Review => 2,
            Status::Done => 3,
            Status::Todo | Status::Unknown(_) => 0,
        }
    }

    pub fn next(&self) -> Self {
        cycle(&Self::COLUMNS, self.column(), 1)
    }

    pub fn prev(&self) -> Self {
        cycle(&Self::COLUMNS, self.column(), -1)
    }
}

impl From<String> for Status {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "todo" | "" => Status::Todo,
            "in-progress" => Status::InProgress,
            "review" => Status::Review,
            "done" => Status::Done,
            _ => Status::Unknown(raw),
        }
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        match status {
            Status::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn cycle<T: Clone + PartialEq>(values: &[T], current: T, step: isize) -> T {
    let len = values.len() as isize;
    let index = values.iter().position(|v| *v == current).unwrap_or(0) as isize;
    values[(index + step).rem_euclid(len) as usize].clone()
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub assignee: Option<String>,
    #[serde(default)]
    pub status: Status,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn assignee_display(&self) -> &str {
        self.assignee.as_deref().unwrap_or("Unassigned")
    }
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// The example tasks a fresh board starts with.
pub fn seed_tasks(now: DateTime<Utc>) -> Vec<Task> {
    let seed = |id, title: &str, description: &str, priority, assignee: &str, status| Task {
        id,
        title: title.to_string(),
        description: Some(description.to_string()),
        priority,
        assignee: Some(assignee.to_string()),
        status,
        created_at: now,
    };

    vec![
        seed(
            1,
            "Set up project repository",
            "Initialize Git repository and set up basic project structure",
            Priority::High,
            "John Doe",
            Status::Done,
        ),
        seed(
            2,
            "Design user interface mockups",
            "Create wireframes and visual designs for the main application screens",
            Priority::Medium,
            "Jane Smith",
            Status::InProgress,
        ),
        seed(
            3,
            "Implement authentication system",
            "Add user login, registration, and session management",
            Priority::High,
            "Mike Johnson",
            Status::Todo,
        ),
        seed(
            4,
            "Write API documentation",
            "Document all REST API endpoints with examples",
            Priority::Low,
            "Sarah Wilson",
            Status::Review,
        ),
        seed(
            5,
            "Set up CI/CD pipeline",
            "Configure automated testing and deployment workflow",
            Priority::Medium,
            "Alex Brown",
            Status::Todo,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_the_browser_era_blob() {
        let json = r#"[{"id":7,"title":"Ship","description":"","priority":"high",
            "assignee":"","status":"blocked","createdAt":"2024-05-01T10:00:00.000Z"}]"#;
        let tasks: Vec<Task> = serde_json::from_str(json).unwrap();

        assert_eq!(tasks[0].description, None);
        assert_eq!(tasks[0].assignee_display(), "Unassigned");
        assert_eq!(tasks[0].status, Status::Unknown("blocked".into()));
        assert_eq!(tasks[0].status.column(), Status::Todo);

        let written = serde_json::to_string(&tasks).unwrap();
        assert!(written.contains(r#""status":"blocked""#));
        assert!(written.contains(r#""createdAt""#));
    }

    #[test]
    fn missing_status_and_priority_fall_back() {
        let json = r#"{"id":1,"title":"t","createdAt":"2024-05-01T10:00:00Z"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.status, Status::Todo);
        assert_eq!(task.priority, Priority::Medium);
    }

    #[test]
    fn unknown_priority_is_kept_and_labelled() {
        let json = r#"{"id":9,"title":"mine","priority":"urgent"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.priority, Priority::Unknown("urgent".into()));
        assert_eq!(task.priority.label(), "Urgent");

        let written = serde_json::to_string(&task).unwrap();
        assert!(written.contains(r#""priority":"urgent""#));
    }

    #[test]
    fn status_cycles_through_columns() {
        assert_eq!(Status::Done.next(), Status::Todo);
        assert_eq!(Status::Todo.prev(), Status::Done);
        assert_eq!(Status::Unknown("x".into()).next(), Status::InProgress);
        assert_eq!(Priority::High.next(), Priority::Low);
    }

    #[test]
    fn seed_has_five_unique_ids() {
        let tasks = seed_tasks(Utc::now());
        let ids: Vec<TaskId> = tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }
}
