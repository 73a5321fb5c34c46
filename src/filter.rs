// Display filters for the task projection

use crate::task::{Priority, Task};
use serde::{Deserialize, Serialize};

/// Completion status filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Completed,
    Active,
}

impl StatusFilter {
    /// Exactly `all` or `completed`; any other value means "not completed"
    pub fn parse(s: &str) -> Self {
        match s {
            "all" => StatusFilter::All,
            "completed" => StatusFilter::Completed,
            _ => StatusFilter::Active,
        }
    }

    fn matches(self, task: &Task) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Completed => task.completed,
            StatusFilter::Active => !task.completed,
        }
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusFilter::All => write!(f, "all"),
            StatusFilter::Completed => write!(f, "completed"),
            StatusFilter::Active => write!(f, "active"),
        }
    }
}

/// Category filter: everything, or one exact category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn parse(s: &str) -> Self {
        if s == "all" { CategoryFilter::All } else { CategoryFilter::Only(s.to_string()) }
    }

    fn matches(&self, task: &Task) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => task.category.as_deref() == Some(category.as_str()),
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(s: String) -> Self {
        CategoryFilter::parse(&s)
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        filter.to_string()
    }
}

impl std::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "all"),
            CategoryFilter::Only(category) => write!(f, "{}", category),
        }
    }
}

/// Priority filter: everything, or one exact priority
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PriorityFilter {
    #[default]
    All,
    Only(Priority),
}

impl PriorityFilter {
    /// `None` for anything that is neither `all` nor a priority name
    pub fn parse(s: &str) -> Option<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Some(PriorityFilter::All);
        }
        Priority::parse(s).map(PriorityFilter::Only)
    }

    fn matches(self, task: &Task) -> bool {
        match self {
            PriorityFilter::All => true,
            PriorityFilter::Only(priority) => task.priority == priority,
        }
    }
}

impl TryFrom<String> for PriorityFilter {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        PriorityFilter::parse(&s).ok_or_else(|| format!("unknown priority: {}", s))
    }
}

impl From<PriorityFilter> for String {
    fn from(filter: PriorityFilter) -> Self {
        filter.to_string()
    }
}

impl std::fmt::Display for PriorityFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriorityFilter::All => write!(f, "all"),
            PriorityFilter::Only(priority) => write!(f, "{}", priority),
        }
    }
}

/// Search term plus status, category and priority filters
///
/// A task is included only when every part matches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Filter {
    pub search: String,
    pub status: StatusFilter,
    pub category: CategoryFilter,
    pub priority: PriorityFilter,
}

impl Filter {
    pub fn matches(&self, task: &Task) -> bool {
        self.matches_search(task)
            && self.status.matches(task)
            && self.category.matches(task)
            && self.priority.matches(task)
    }

    /// Case-insensitive substring match on title or description
    fn matches_search(&self, task: &Task) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        task.title.to_lowercase().contains(&needle) || task.description.to_lowercase().contains(&needle)
    }

    pub fn is_default(&self) -> bool {
        *self == Filter::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskId;
    use chrono::{TimeZone, Utc};

    fn task(title: &str, description: &str) -> Task {
        let mut task = Task::new(TaskId(1), title, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        task.description = description.to_string();
        task
    }

    #[test]
    fn test_search_matches_title_case_insensitive() {
        let filter = Filter {
            search: "home".to_string(),
            ..Filter::default()
        };
        assert!(filter.matches(&task("Complete Homework", "Math and Science homework")));
        assert!(!filter.matches(&task("Buy Groceries", "Milk, Bread, Butter")));
    }

    #[test]
    fn test_search_matches_description() {
        let filter = Filter {
            search: "BREAD".to_string(),
            ..Filter::default()
        };
        assert!(filter.matches(&task("Buy Groceries", "Milk, Bread, Butter")));
    }

    #[test]
    fn test_empty_search_matches_all() {
        assert!(Filter::default().matches(&task("anything", "")));
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(StatusFilter::parse("all"), StatusFilter::All);
        assert_eq!(StatusFilter::parse("completed"), StatusFilter::Completed);
        // Matching is exact, so other spellings fall through to active
        assert_eq!(StatusFilter::parse("Completed"), StatusFilter::Active);
        assert_eq!(StatusFilter::parse(" all"), StatusFilter::Active);
        assert_eq!(StatusFilter::parse("active"), StatusFilter::Active);
        assert_eq!(StatusFilter::parse("pending"), StatusFilter::Active);
    }

    #[test]
    fn test_status_filter() {
        let mut done = task("a", "");
        done.completed = true;
        let open = task("b", "");

        assert!(StatusFilter::Completed.matches(&done));
        assert!(!StatusFilter::Completed.matches(&open));
        assert!(StatusFilter::Active.matches(&open));
        assert!(!StatusFilter::Active.matches(&done));
        assert!(StatusFilter::All.matches(&done));
    }

    #[test]
    fn test_category_filter_exact() {
        let mut work = task("a", "");
        work.category = Some("Work".to_string());
        let uncategorized = task("b", "");

        let filter = CategoryFilter::parse("Work");
        assert!(filter.matches(&work));
        assert!(!filter.matches(&uncategorized));
        assert!(!CategoryFilter::parse("work").matches(&work));
        assert!(CategoryFilter::parse("all").matches(&uncategorized));
    }

    #[test]
    fn test_priority_filter() {
        let mut high = task("a", "");
        high.priority = Priority::High;

        assert_eq!(PriorityFilter::parse("all"), Some(PriorityFilter::All));
        assert_eq!(PriorityFilter::parse("nope"), None);
        assert!(PriorityFilter::Only(Priority::High).matches(&high));
        assert!(!PriorityFilter::Only(Priority::Low).matches(&high));
    }

    #[test]
    fn test_filter_deserialize_from_yaml() {
        let yaml = "search: gym\nstatus: completed\ncategory: Health\npriority: high\n";
        let filter: Filter = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(filter.search, "gym");
        assert_eq!(filter.status, StatusFilter::Completed);
        assert_eq!(filter.category, CategoryFilter::Only("Health".to_string()));
        assert_eq!(filter.priority, PriorityFilter::Only(Priority::High));

        let empty: Filter = serde_yaml::from_str("{}").unwrap();
        assert!(empty.is_default());
    }
}
