// Terminal rendering of tasks

use crate::clock::Clock;
use crate::projection::Urgency;
use crate::store::{Store, Variant};
use crate::task::Task;
use colored::Colorize;
use serde::Serialize;

/// Task plus its urgency, as emitted by `list --json`
#[derive(Debug, Serialize)]
pub struct TaskView<'a> {
    #[serde(flatten)]
    pub task: &'a Task,
    pub urgency: Urgency,
}

/// Visible tasks of the store paired with their urgency
pub fn views<C: Clock>(store: &Store<C>) -> Vec<TaskView<'_>> {
    store
        .visible()
        .into_iter()
        .map(|task| TaskView {
            task,
            urgency: store.urgency(task),
        })
        .collect()
}

/// One line for a task
pub fn task_line(task: &Task, urgency: Urgency, variant: Variant) -> String {
    let check = if task.completed { "[x]" } else { "[ ]" };
    let title = if task.completed {
        task.title.dimmed().strikethrough().to_string()
    } else {
        task.title.bold().to_string()
    };

    let mut line = format!("{} #{} ", check, task.id);
    if variant == Variant::Extended {
        line.push_str(if task.starred { "* " } else { "  " });
    }
    line.push_str(&title);

    if !task.description.is_empty() {
        line.push_str(&format!(" - {}", task.description));
    }

    if variant == Variant::Extended {
        let mut meta = Vec::new();
        if let Some(category) = &task.category {
            meta.push(category.clone());
        }
        meta.push(task.priority.to_string());
        if let Some(due) = task.due_date {
            let due = match urgency.label() {
                "" => format!("due {}", due),
                label => format!("due {} {}", due, label),
            };
            meta.push(paint(&due, urgency));
        }
        line.push_str(&format!(" ({})", meta.join(", ")));
    }

    line
}

fn paint(text: &str, urgency: Urgency) -> String {
    match urgency {
        Urgency::Overdue => text.red().bold().to_string(),
        Urgency::DueToday => text.yellow().to_string(),
        Urgency::DueSoon => text.bright_yellow().to_string(),
        Urgency::Normal => text.to_string(),
    }
}

/// The visible list with a summary header
pub fn list<C: Clock>(store: &Store<C>) -> String {
    let stats = store.stats();
    let mut out = format!("{} of {} tasks done", stats.completed, stats.total);
    if stats.overdue > 0 {
        out.push_str(&format!(", {} overdue", stats.overdue));
    }
    if !store.filter().is_default() {
        let filter = store.filter();
        out.push_str(&format!(
            " [search: {:?}, status: {}, category: {}, priority: {}]",
            filter.search, filter.status, filter.category, filter.priority
        ));
    }
    out.push('\n');

    let visible = views(store);
    if visible.is_empty() {
        out.push_str("  (no tasks)\n");
    }
    for view in visible {
        out.push_str(&task_line(view.task, view.urgency, store.variant()));
        out.push('\n');
    }
    out
}
