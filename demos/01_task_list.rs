//! Example 01: Plain Task List
//!
//! This example demonstrates the minimal variant: adding tasks from a
//! draft, toggling completion and deleting.
//!
//! Run with: cargo run --example 01_task_list

use eyre::Result;
use tasklist::{Store, TaskId};

fn main() -> Result<()> {
    colored::control::set_override(false);

    println!("tasklist Plain Task List Example");
    println!("================================\n");

    let mut store = Store::minimal();
    print!("{}", tasklist::render::list(&store));

    // A draft needs both a title and a description
    println!("\nAdding a task with only a title...");
    store.update_draft(|d| d.title = "Water plants".to_string());
    match store.add() {
        Some(task) => println!("  added #{}", task.id),
        None => println!("  not added, store still has {} tasks", store.len()),
    }

    println!("\nAdding a description and trying again...");
    store.update_draft(|d| d.description = "Balcony and kitchen".to_string());
    if let Some(task) = store.add() {
        println!("  added #{} at the end of the list", task.id);
    }

    println!("\nCompleting #1 and deleting #3...");
    store.toggle_completion(TaskId(1));
    store.delete(TaskId(3));

    println!();
    print!("{}", tasklist::render::list(&store));

    Ok(())
}
