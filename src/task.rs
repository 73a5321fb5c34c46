// Data model for tasks and the new-task draft

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Date format accepted for due dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Stable identifier of a task within one store
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TaskId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().trim_start_matches('#').parse().map(TaskId)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Parse a priority name, case-insensitively
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One to-do item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub starred: bool,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// A task with only the required fields set, everything else defaulted
    pub fn new(id: TaskId, title: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            completed: false,
            category: None,
            priority: Priority::default(),
            due_date: None,
            starred: false,
            created_at,
        }
    }
}

/// In-progress new-task form state
///
/// Fields hold raw form input; `due_date` is parsed when the draft is added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: Priority,
    pub due_date: String,
}

impl Draft {
    pub fn is_empty(&self) -> bool {
        *self == Draft::default()
    }

    pub(crate) fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }

    pub(crate) fn has_description(&self) -> bool {
        !self.description.trim().is_empty()
    }

    /// Category input, `None` when blank
    pub(crate) fn category(&self) -> Option<String> {
        let category = self.category.trim();
        (!category.is_empty()).then(|| category.to_string())
    }

    /// Due date input, `None` when blank or not a `YYYY-MM-DD` date
    pub(crate) fn due_date(&self) -> Option<NaiveDate> {
        parse_date(&self.due_date)
    }
}

/// Parse a `YYYY-MM-DD` date, ignoring surrounding whitespace
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}
