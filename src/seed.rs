// Seed data loaded into a fresh store

use crate::clock::Clock;
use crate::task::{Priority, Task, TaskId};
use chrono::{Duration, NaiveDate};
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// One entry of a seed set
///
/// A due date is either absolute (`due_date`) or relative to today
/// (`due_in_days`), so seed files stay meaningful on any day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedTask {
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub category: Option<String>,
    pub priority: Priority,
    pub starred: bool,
    pub due_date: Option<NaiveDate>,
    pub due_in_days: Option<i64>,
}

impl SeedTask {
    fn new(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            ..Self::default()
        }
    }

    pub fn into_task<C: Clock>(self, id: TaskId, clock: &C) -> Task {
        let due_date = match (self.due_date, self.due_in_days) {
            (Some(date), Some(_)) => {
                warn!(title = %self.title, "Seed task has both due_date and due_in_days, using due_date");
                Some(date)
            }
            (Some(date), None) => Some(date),
            (None, Some(days)) => {
                let due = Duration::try_days(days).and_then(|offset| clock.today().checked_add_signed(offset));
                if due.is_none() {
                    warn!(title = %self.title, days, "Seed due_in_days out of range, leaving task undated");
                }
                due
            }
            (None, None) => None,
        };

        Task {
            id,
            title: self.title,
            description: self.description,
            completed: self.completed,
            category: self.category,
            priority: self.priority,
            due_date,
            starred: self.starred,
            created_at: clock.now(),
        }
    }
}

/// Turn seed entries into tasks with ids 1..=n
///
/// Entries with a blank title are skipped; ids stay contiguous.
pub fn materialize<C: Clock>(seed: Vec<SeedTask>, clock: &C) -> Vec<Task> {
    let mut tasks = Vec::with_capacity(seed.len());
    for entry in seed {
        if entry.title.trim().is_empty() {
            warn!(?entry, "Skipping seed task without a title");
            continue;
        }
        let id = TaskId(tasks.len() as u64 + 1);
        tasks.push(entry.into_task(id, clock));
    }
    tasks
}

/// Built-in seed for the plain task list
pub fn minimal() -> Vec<SeedTask> {
    vec![
        SeedTask::new("Buy Groceries", "Milk, Bread, Butter"),
        SeedTask {
            completed: true,
            ..SeedTask::new("Complete Homework", "Math and Science homework")
        },
        SeedTask::new("Go to the Gym", "Workout for 1 hour"),
    ]
}

/// Built-in seed for the task manager
pub fn extended() -> Vec<SeedTask> {
    vec![
        SeedTask {
            category: Some("Personal".to_string()),
            due_in_days: Some(1),
            ..SeedTask::new("Buy Groceries", "Milk, Bread, Butter")
        },
        SeedTask {
            completed: true,
            category: Some("Education".to_string()),
            priority: Priority::High,
            due_in_days: Some(0),
            ..SeedTask::new("Complete Homework", "Math and Science homework")
        },
        SeedTask {
            category: Some("Health".to_string()),
            priority: Priority::Low,
            starred: true,
            ..SeedTask::new("Go to the Gym", "Workout for 1 hour")
        },
        SeedTask {
            category: Some("Work".to_string()),
            priority: Priority::High,
            due_in_days: Some(-1),
            ..SeedTask::new("Send Quarterly Report", "Numbers for Q3 review")
        },
    ]
}

/// Load seed entries from a YAML file, or JSON when the extension is `.json`
pub fn load_file(path: &Path) -> Result<Vec<SeedTask>> {
    let content = fs::read_to_string(path).with_context(|| format!("Failed to read seed file {}", path.display()))?;

    let is_json = path.extension().and_then(|s| s.to_str()) == Some("json");
    let seed: Vec<SeedTask> = if is_json {
        serde_json::from_str(&content).with_context(|| format!("Failed to parse seed JSON {}", path.display()))?
    } else {
        serde_yaml::from_str(&content).with_context(|| format!("Failed to parse seed YAML {}", path.display()))?
    };

    info!(path = %path.display(), count = seed.len(), "Loaded seed file");
    Ok(seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn clock() -> FixedClock {
        FixedClock::new(Utc.with_ymd_and_hms(2024, 6, 10, 9, 0, 0).unwrap())
    }

    #[test]
    fn test_minimal_seed() {
        let tasks = materialize(minimal(), &clock());
        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks[0].id, TaskId(1));
        assert_eq!(tasks[0].title, "Buy Groceries");
        assert!(!tasks[0].completed);
        assert!(tasks[1].completed);
        assert_eq!(tasks[2].id, TaskId(3));
    }

    #[test]
    fn test_extended_seed_relative_dates() {
        let tasks = materialize(extended(), &clock());
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        assert_eq!(tasks[0].due_date, NaiveDate::from_ymd_opt(2024, 6, 11));
        assert_eq!(tasks[1].due_date, Some(today));
        assert_eq!(tasks[2].due_date, None);
        assert_eq!(tasks[3].due_date, NaiveDate::from_ymd_opt(2024, 6, 9));
    }

    #[test]
    fn test_materialize_skips_blank_titles() {
        let seed = vec![SeedTask::new("a", ""), SeedTask::new("  ", ""), SeedTask::new("b", "")];
        let tasks = materialize(seed, &clock());
        let ids: Vec<_> = tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![TaskId(1), TaskId(2)]);
        assert_eq!(tasks[1].title, "b");
    }

    #[test]
    fn test_absolute_due_date_wins() {
        let entry = SeedTask {
            due_date: NaiveDate::from_ymd_opt(2025, 1, 1),
            due_in_days: Some(3),
            ..SeedTask::new("x", "")
        };
        let task = entry.into_task(TaskId(1), &clock());
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2025, 1, 1));
    }

    #[test]
    fn test_out_of_range_due_in_days_leaves_task_undated() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("seed.yaml");
        fs::write(&path, "- title: Far future\n  due_in_days: 100000000\n- title: Far past\n  due_in_days: -100000000\n").unwrap();

        let tasks = materialize(load_file(&path).unwrap(), &clock());
        assert_eq!(tasks.len(), 2);
        assert!(tasks[0].due_date.is_none());
        assert!(tasks[1].due_date.is_none());
    }

    #[test]
    fn test_load_yaml_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("seed.yaml");
        fs::write(
            &path,
            "- title: Water plants\n  category: Home\n  priority: low\n  due_in_days: 2\n- title: Call mom\n  starred: true\n",
        )
        .unwrap();

        let seed = load_file(&path).unwrap();
        assert_eq!(seed.len(), 2);
        assert_eq!(seed[0].category.as_deref(), Some("Home"));
        assert_eq!(seed[0].priority, Priority::Low);
        assert_eq!(seed[0].due_in_days, Some(2));
        assert!(seed[1].starred);
        assert_eq!(seed[1].priority, Priority::Medium);
    }

    #[test]
    fn test_load_json_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("seed.json");
        fs::write(&path, r#"[{"title": "Read", "due_date": "2024-07-01", "completed": true}]"#).unwrap();

        let seed = load_file(&path).unwrap();
        assert_eq!(seed[0].due_date, NaiveDate::from_ymd_opt(2024, 7, 1));
        assert!(seed[0].completed);
    }

    #[test]
    fn test_load_missing_file_errors() {
        let temp = TempDir::new().unwrap();
        assert!(load_file(&temp.path().join("nope.yaml")).is_err());
    }
}
