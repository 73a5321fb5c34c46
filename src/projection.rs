// Filtered, sorted view of tasks and due-date urgency

use crate::filter::Filter;
use crate::task::Task;
use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Ordering;

/// Tasks matching `filter`, in display order
///
/// Starred tasks come first. Within a star group tasks are ordered by
/// ascending due date with undated tasks last. The sort is stable, so
/// remaining ties keep collection order.
pub fn project<'a, I>(tasks: I, filter: &Filter) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut visible: Vec<&Task> = tasks.into_iter().filter(|task| filter.matches(task)).collect();
    visible.sort_by(|a, b| display_order(a, b));
    visible
}

fn display_order(a: &Task, b: &Task) -> Ordering {
    b.starred.cmp(&a.starred).then_with(|| match (a.due_date, b.due_date) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    })
}

/// Due-date urgency tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Overdue,
    DueToday,
    DueSoon,
    Normal,
}

impl Urgency {
    /// Days after `today` that still count as due soon
    pub const SOON_DAYS: i64 = 2;

    pub fn classify(due: Option<NaiveDate>, today: NaiveDate) -> Self {
        let Some(due) = due else {
            return Urgency::Normal;
        };
        match (due - today).num_days() {
            d if d < 0 => Urgency::Overdue,
            0 => Urgency::DueToday,
            d if d <= Self::SOON_DAYS => Urgency::DueSoon,
            _ => Urgency::Normal,
        }
    }

    pub fn of(task: &Task, today: NaiveDate) -> Self {
        Self::classify(task.due_date, today)
    }

    pub fn label(self) -> &'static str {
        match self {
            Urgency::Overdue => "overdue",
            Urgency::DueToday => "due today",
            Urgency::DueSoon => "due soon",
            Urgency::Normal => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::StatusFilter;
    use crate::task::TaskId;
    use chrono::{Duration, TimeZone, Utc};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    }

    fn task(id: u64, title: &str) -> Task {
        Task::new(TaskId(id), title, Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap())
    }

    fn ids(tasks: &[&Task]) -> Vec<u64> {
        tasks.iter().map(|t| t.id.0).collect()
    }

    #[test]
    fn test_starred_sorts_before_earlier_due_date() {
        let mut starred = task(1, "starred");
        starred.starred = true;
        starred.due_date = Some(today() + Duration::days(1));
        let mut plain = task(2, "plain");
        plain.due_date = Some(today() - Duration::days(1));

        let tasks = vec![plain, starred];
        let visible = project(&tasks, &Filter::default());
        assert_eq!(ids(&visible), vec![1, 2]);
    }

    #[test]
    fn test_due_date_ascending_undated_last() {
        let mut late = task(1, "late");
        late.due_date = Some(today() + Duration::days(5));
        let undated = task(2, "undated");
        let mut early = task(3, "early");
        early.due_date = Some(today());

        let tasks = vec![late, undated, early];
        let visible = project(&tasks, &Filter::default());
        assert_eq!(ids(&visible), vec![3, 1, 2]);
    }

    #[test]
    fn test_ties_keep_collection_order() {
        let tasks = vec![task(5, "a"), task(2, "b"), task(9, "c")];
        let visible = project(&tasks, &Filter::default());
        assert_eq!(ids(&visible), vec![5, 2, 9]);
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let mut done = task(1, "Complete Homework");
        done.completed = true;
        let tasks = vec![done, task(2, "Homework review"), task(3, "Buy Groceries")];
        let filter = Filter {
            search: "homework".to_string(),
            status: StatusFilter::Active,
            ..Filter::default()
        };

        let once = project(&tasks, &filter);
        let twice = project(once.iter().copied(), &filter);
        assert_eq!(ids(&once), vec![2]);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_urgency_tiers() {
        let t = today();
        assert_eq!(Urgency::classify(Some(t - Duration::days(1)), t), Urgency::Overdue);
        assert_eq!(Urgency::classify(Some(t), t), Urgency::DueToday);
        assert_eq!(Urgency::classify(Some(t + Duration::days(1)), t), Urgency::DueSoon);
        assert_eq!(Urgency::classify(Some(t + Duration::days(2)), t), Urgency::DueSoon);
        assert_eq!(Urgency::classify(Some(t + Duration::days(3)), t), Urgency::Normal);
        assert_eq!(Urgency::classify(None, t), Urgency::Normal);
    }

    #[test]
    fn test_urgency_does_not_mutate() {
        let mut overdue = task(1, "x");
        overdue.due_date = Some(today() - Duration::days(3));
        let before = overdue.clone();
        assert_eq!(Urgency::of(&overdue, today()), Urgency::Overdue);
        assert_eq!(overdue, before);
    }
}
