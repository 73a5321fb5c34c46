//! Example 02: Task Manager
//!
//! This example demonstrates the extended variant: priorities, due dates,
//! starring, filters and change subscriptions.
//!
//! Run with: cargo run --example 02_task_manager

use eyre::Result;
use std::cell::RefCell;
use std::rc::Rc;
use tasklist::{CategoryFilter, Priority, StatusFilter, Store, TaskId};

fn main() -> Result<()> {
    colored::control::set_override(false);

    println!("tasklist Task Manager Example");
    println!("=============================\n");

    let mut store = Store::extended();

    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    store.subscribe(move |event| sink.borrow_mut().push(format!("{:?}", event)));

    print!("{}", tasklist::render::list(&store));

    println!("\nAdding a high priority task due tomorrow...");
    let tomorrow = chrono::Local::now().date_naive() + chrono::Duration::days(1);
    store.open_draft();
    store.update_draft(|d| {
        d.title = "Book flights".to_string();
        d.category = "Travel".to_string();
        d.priority = Priority::High;
        d.due_date = tomorrow.format("%Y-%m-%d").to_string();
    });
    let added = store.add();
    if let Some(task) = &added {
        println!("  added #{} at the front, urgency: {:?}", task.id, store.urgency(task));
    }

    println!("\nStarring #1, so it sorts first...");
    store.toggle_star(TaskId(1));
    print!("{}", tasklist::render::list(&store));

    println!("\nShowing active Work tasks only...");
    store.set_status(StatusFilter::Active);
    store.set_category(CategoryFilter::Only("Work".to_string()));
    print!("{}", tasklist::render::list(&store));

    println!("\nSearching for \"home\" across all tasks...");
    store.reset_filter();
    store.set_search("home");
    print!("{}", tasklist::render::list(&store));

    println!("\nEvents seen by the subscriber:");
    for event in events.borrow().iter() {
        println!("  {}", event);
    }

    Ok(())
}
