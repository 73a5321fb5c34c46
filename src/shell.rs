// Interactive line-command session over a store

use crate::clock::Clock;
use crate::filter::{CategoryFilter, PriorityFilter, StatusFilter};
use crate::render;
use crate::store::Store;
use crate::task::{Priority, TaskId};
use eyre::{Context, Result, eyre};
use std::cell::Cell;
use std::io::{BufRead, Write};
use std::rc::Rc;
use tracing::debug;

pub const HELP: &str = "\
Draft:   new | title <text> | desc <text> | category <text> | priority <low|medium|high>
         due <YYYY-MM-DD> | save | cancel | add <title> [| <description>]
Tasks:   done <id> | star <id> | rm <id>
Filters: search <text> | status <all|completed|active> | show-category <name|all>
         show-priority <low|medium|high|all> | reset
Other:   ls | stats | help | quit";

/// One parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    New,
    Title(String),
    Desc(String),
    Category(String),
    Priority(Priority),
    Due(String),
    Save,
    Cancel,
    /// Fill title and description, then save
    Add { title: String, description: String },
    Done(TaskId),
    Star(TaskId),
    Remove(TaskId),
    Search(String),
    Status(StatusFilter),
    ShowCategory(CategoryFilter),
    ShowPriority(PriorityFilter),
    Reset,
    List,
    Stats,
    Help,
    Quit,
}

impl Command {
    /// Parse a line; `Ok(None)` for blank lines
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_lowercase().as_str() {
            "new" => Command::New,
            "title" => Command::Title(rest.to_string()),
            "desc" | "description" => Command::Desc(rest.to_string()),
            "category" => Command::Category(rest.to_string()),
            "priority" => Command::Priority(Priority::parse(rest).ok_or_else(|| eyre!("Unknown priority: {}", rest))?),
            "due" => Command::Due(rest.to_string()),
            "save" => Command::Save,
            "cancel" => Command::Cancel,
            "add" => {
                let (title, description) = rest.split_once('|').unwrap_or((rest, ""));
                Command::Add {
                    title: title.trim().to_string(),
                    description: description.trim().to_string(),
                }
            }
            "done" => Command::Done(parse_id(rest)?),
            "star" => Command::Star(parse_id(rest)?),
            "rm" | "delete" => Command::Remove(parse_id(rest)?),
            "search" => Command::Search(rest.to_string()),
            "status" => Command::Status(StatusFilter::parse(rest)),
            "show-category" => Command::ShowCategory(CategoryFilter::parse(rest)),
            "show-priority" => Command::ShowPriority(
                PriorityFilter::parse(rest).ok_or_else(|| eyre!("Unknown priority: {}", rest))?,
            ),
            "reset" => Command::Reset,
            "ls" | "list" => Command::List,
            "stats" => Command::Stats,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(eyre!("Unknown command: {} (try 'help')", other)),
        };
        Ok(Some(command))
    }
}

fn parse_id(s: &str) -> Result<TaskId> {
    s.parse().with_context(|| format!("Invalid task id: {:?}", s))
}

/// Whether the session should keep reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Run a command against the store, writing any direct output
pub fn apply<C: Clock, W: Write>(store: &mut Store<C>, command: Command, out: &mut W) -> Result<Flow> {
    debug!(?command, "Applying command");
    match command {
        Command::New => store.open_draft(),
        Command::Title(title) => store.update_draft(|d| d.title = title),
        Command::Desc(description) => store.update_draft(|d| d.description = description),
        Command::Category(category) => store.update_draft(|d| d.category = category),
        Command::Priority(priority) => store.update_draft(|d| d.priority = priority),
        Command::Due(due) => store.update_draft(|d| d.due_date = due),
        Command::Save => {
            store.add();
        }
        Command::Cancel => store.cancel_draft(),
        Command::Add { title, description } => {
            store.update_draft(|d| {
                d.title = title;
                d.description = description;
            });
            store.add();
        }
        Command::Done(id) => store.toggle_completion(id),
        Command::Star(id) => store.toggle_star(id),
        Command::Remove(id) => store.delete(id),
        Command::Search(term) => store.set_search(term),
        Command::Status(status) => store.set_status(status),
        Command::ShowCategory(category) => store.set_category(category),
        Command::ShowPriority(priority) => store.set_priority(priority),
        Command::Reset => store.reset_filter(),
        Command::List => write!(out, "{}", render::list(store))?,
        Command::Stats => {
            let stats = store.stats();
            writeln!(
                out,
                "total: {}, completed: {}, active: {}, starred: {}, overdue: {}",
                stats.total, stats.completed, stats.active, stats.starred, stats.overdue
            )?;
        }
        Command::Help => writeln!(out, "{}", HELP)?,
        Command::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

/// Read commands until EOF or `quit`, re-rendering the list after changes
///
/// Parse errors are reported on `out` and the session continues.
pub fn run<C: Clock, R: BufRead, W: Write>(store: &mut Store<C>, input: R, out: &mut W) -> Result<()> {
    let dirty = Rc::new(Cell::new(false));
    let flag = Rc::clone(&dirty);
    let subscription = store.subscribe(move |_| flag.set(true));

    let result = session_loop(store, input, out, &dirty);
    store.unsubscribe(subscription);
    result
}

fn session_loop<C: Clock, R: BufRead, W: Write>(
    store: &mut Store<C>,
    input: R,
    out: &mut W,
    dirty: &Cell<bool>,
) -> Result<()> {
    write!(out, "{}", render::list(store))?;
    for line in input.lines() {
        let line = line.context("Failed to read command")?;
        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "error: {}", e)?;
                continue;
            }
        };

        if apply(store, command, out)? == Flow::Quit {
            break;
        }
        if dirty.replace(false) {
            write!(out, "{}", render::list(store))?;
        }
    }
    Ok(())
}
