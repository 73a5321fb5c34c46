// tasklist - In-memory task list and task manager with filtering, starring and urgency

pub mod clock;
pub mod config;
pub mod filter;
pub mod projection;
pub mod render;
pub mod seed;
pub mod shell;
pub mod store;
pub mod task;

// Re-export main types for convenience
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use filter::{CategoryFilter, Filter, PriorityFilter, StatusFilter};
pub use projection::{Urgency, project};
pub use seed::SeedTask;
pub use store::{Stats, Store, StoreEvent, SubscriptionId, Variant};
pub use task::{Draft, Priority, Task, TaskId};
