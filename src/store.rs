// In-memory task store: collection, draft, filters and subscriptions

use crate::clock::{Clock, SystemClock};
use crate::filter::{CategoryFilter, Filter, PriorityFilter, StatusFilter};
use crate::projection::{Urgency, project};
use crate::seed::{self, SeedTask};
use crate::task::{Draft, Task, TaskId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Behaviour of [`Store::add`] and starring
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Plain list: title and description required, new tasks appended
    Minimal,
    /// Task manager: title required, new tasks prepended, starring enabled
    #[default]
    Extended,
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Variant::Minimal => write!(f, "minimal"),
            Variant::Extended => write!(f, "extended"),
        }
    }
}

/// State change reported to subscribers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// A task was added and the draft cleared
    Added(TaskId),
    CompletionToggled { id: TaskId, completed: bool },
    StarToggled { id: TaskId, starred: bool },
    Deleted(TaskId),
    /// Draft fields or adding mode changed
    DraftChanged,
    FilterChanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&StoreEvent)>;

/// Counts shown alongside the list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub active: usize,
    pub starred: usize,
    pub overdue: usize,
}

/// Ordered task collection plus the view state around it
///
/// Every operation runs to completion synchronously. Invalid requests
/// (blank draft, unknown id) leave the store untouched and report nothing.
pub struct Store<C = SystemClock> {
    variant: Variant,
    clock: C,
    tasks: Vec<Task>,
    draft: Draft,
    adding: bool,
    filter: Filter,
    last_id: u64,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl Store<SystemClock> {
    /// Empty store on the system clock
    pub fn new(variant: Variant) -> Self {
        Self::with_clock(variant, SystemClock)
    }

    /// Plain task list with its built-in seed
    pub fn minimal() -> Self {
        Self::seeded(Variant::Minimal, seed::minimal(), SystemClock)
    }

    /// Task manager with its built-in seed
    pub fn extended() -> Self {
        Self::seeded(Variant::Extended, seed::extended(), SystemClock)
    }
}

impl<C: Clock> Store<C> {
    pub fn with_clock(variant: Variant, clock: C) -> Self {
        Self::with_tasks(variant, Vec::new(), clock)
    }

    /// Store initialized from seed entries, ids 1..=n
    pub fn seeded(variant: Variant, seed: Vec<SeedTask>, clock: C) -> Self {
        let tasks = seed::materialize(seed, &clock);
        Self::with_tasks(variant, tasks, clock)
    }

    /// Store over existing tasks; later duplicates of an id are dropped
    pub fn with_tasks(variant: Variant, tasks: Vec<Task>, clock: C) -> Self {
        let mut seen = HashSet::new();
        let tasks: Vec<Task> = tasks
            .into_iter()
            .filter(|task| {
                let fresh = seen.insert(task.id);
                if !fresh {
                    warn!(id = %task.id, title = %task.title, "Dropping task with duplicate id");
                }
                fresh
            })
            .collect();
        let last_id = tasks.iter().map(|t| t.id.0).max().unwrap_or(0);

        debug!(%variant, count = tasks.len(), "Store created");
        Self {
            variant,
            clock,
            tasks,
            draft: Draft::default(),
            adding: false,
            filter: Filter::default(),
            last_id,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// All tasks in collection order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Tasks passing the current filter, in display order
    pub fn visible(&self) -> Vec<&Task> {
        project(&self.tasks, &self.filter)
    }

    /// Distinct categories in first-seen order
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for category in self.tasks.iter().filter_map(|t| t.category.as_deref()) {
            if !categories.contains(&category) {
                categories.push(category);
            }
        }
        categories
    }

    pub fn urgency(&self, task: &Task) -> Urgency {
        Urgency::of(task, self.clock.today())
    }

    pub fn stats(&self) -> Stats {
        let today = self.clock.today();
        let completed = self.tasks.iter().filter(|t| t.completed).count();
        Stats {
            total: self.tasks.len(),
            completed,
            active: self.tasks.len() - completed,
            starred: self.tasks.iter().filter(|t| t.starred).count(),
            overdue: self
                .tasks
                .iter()
                .filter(|t| !t.completed && Urgency::of(t, today) == Urgency::Overdue)
                .count(),
        }
    }

    // ========================================================================
    // Task operations
    // ========================================================================

    /// Add the current draft as a new task
    ///
    /// Returns the created task, or `None` when a required draft field is
    /// blank or no id is left. The minimal variant requires title and
    /// description and appends; the extended variant requires only a title,
    /// prepends, and leaves adding mode.
    pub fn add(&mut self) -> Option<Task> {
        let valid = match self.variant {
            Variant::Minimal => self.draft.has_title() && self.draft.has_description(),
            Variant::Extended => self.draft.has_title(),
        };
        if !valid {
            return None;
        }

        let id = self.next_id()?;
        let draft = std::mem::take(&mut self.draft);
        let mut task = Task::new(id, draft.title.as_str(), self.clock.now());
        task.description = draft.description.clone();

        match self.variant {
            Variant::Minimal => self.tasks.push(task.clone()),
            Variant::Extended => {
                task.category = draft.category();
                task.priority = draft.priority;
                task.due_date = draft.due_date();
                if task.due_date.is_none() && !draft.due_date.trim().is_empty() {
                    debug!(input = %draft.due_date, "Ignoring unparseable due date");
                }
                self.tasks.insert(0, task.clone());
                self.adding = false;
            }
        }

        debug!(id = %task.id, title = %task.title, "Task added");
        self.emit(StoreEvent::Added(task.id));
        Some(task)
    }

    /// Flip `completed` on the task with this id
    pub fn toggle_completion(&mut self, id: TaskId) {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return;
        };
        task.completed = !task.completed;
        let completed = task.completed;

        debug!(%id, completed, "Task completion toggled");
        self.emit(StoreEvent::CompletionToggled { id, completed });
    }

    /// Flip `starred` on the task with this id; extended variant only
    pub fn toggle_star(&mut self, id: TaskId) {
        if self.variant != Variant::Extended {
            return;
        }
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return;
        };
        task.starred = !task.starred;
        let starred = task.starred;

        debug!(%id, starred, "Task star toggled");
        self.emit(StoreEvent::StarToggled { id, starred });
    }

    pub fn delete(&mut self, id: TaskId) {
        let Some(index) = self.tasks.iter().position(|t| t.id == id) else {
            return;
        };
        self.tasks.remove(index);

        debug!(%id, "Task deleted");
        self.emit(StoreEvent::Deleted(id));
    }

    // ========================================================================
    // Draft
    // ========================================================================

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Whether the new-task form is open
    pub fn is_adding(&self) -> bool {
        self.adding
    }

    /// Edit draft fields in place
    pub fn update_draft<F: FnOnce(&mut Draft)>(&mut self, edit: F) {
        let before = self.draft.clone();
        edit(&mut self.draft);
        if self.draft != before {
            self.emit(StoreEvent::DraftChanged);
        }
    }

    /// Enter adding mode
    pub fn open_draft(&mut self) {
        if !self.adding {
            self.adding = true;
            self.emit(StoreEvent::DraftChanged);
        }
    }

    /// Clear the draft and leave adding mode
    pub fn cancel_draft(&mut self) {
        if self.adding || !self.draft.is_empty() {
            self.adding = false;
            self.draft = Draft::default();
            self.emit(StoreEvent::DraftChanged);
        }
    }

    // ========================================================================
    // Filters
    // ========================================================================

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.update_filter(|f| *f = filter);
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        let search = search.into();
        self.update_filter(|f| f.search = search);
    }

    pub fn set_status(&mut self, status: StatusFilter) {
        self.update_filter(|f| f.status = status);
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.update_filter(|f| f.category = category);
    }

    pub fn set_priority(&mut self, priority: PriorityFilter) {
        self.update_filter(|f| f.priority = priority);
    }

    pub fn reset_filter(&mut self) {
        self.set_filter(Filter::default());
    }

    fn update_filter<F: FnOnce(&mut Filter)>(&mut self, edit: F) {
        let before = self.filter.clone();
        edit(&mut self.filter);
        if self.filter != before {
            self.emit(StoreEvent::FilterChanged);
        }
    }

    // ========================================================================
    // Subscriptions
    // ========================================================================

    /// Register a callback run after every state change
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&StoreEvent) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a subscription; returns false if it was not registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    #[cfg(test)]
    pub(crate) fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn emit(&mut self, event: StoreEvent) {
        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(&event);
        }
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    /// Next unused id for the current variant
    ///
    /// Minimal: `len + 1`, or one past the largest id if that is taken.
    /// Extended: clock milliseconds, bumped past every id issued so far.
    /// `None` once the id space is exhausted.
    fn next_id(&mut self) -> Option<TaskId> {
        let id = match self.variant {
            Variant::Minimal => {
                let candidate = self.tasks.len() as u64 + 1;
                if self.get(TaskId(candidate)).is_some() {
                    self.tasks.iter().map(|t| t.id.0).max().unwrap_or(0).checked_add(1)?
                } else {
                    candidate
                }
            }
            Variant::Extended => {
                let now = u64::try_from(self.clock.now_ms()).unwrap_or(0);
                now.max(self.last_id.checked_add(1)?)
            }
        };
        self.last_id = self.last_id.max(id);
        Some(TaskId(id))
    }
}
