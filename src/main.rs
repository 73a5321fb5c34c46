use clap::{Parser, Subcommand};
use eyre::{Context, Result, eyre};
use std::io::{self, Write};
use std::path::PathBuf;
use tasklist::{CategoryFilter, Config, PriorityFilter, StatusFilter, Store, SystemClock, Variant, render, seed, shell};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tasklist")]
#[command(about = "tasklist - In-memory task list and task manager")]
#[command(version = env!("GIT_DESCRIBE"))]
struct Cli {
    /// Config file (default: $CONFIG_DIR/tasklist/config.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Store variant, overrides the config file
    #[arg(short, long, value_enum)]
    variant: Option<Variant>,

    /// Seed file (YAML, or JSON with a .json extension)
    #[arg(short, long)]
    seed: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the filtered, sorted task list
    List {
        /// Case-insensitive text in title or description
        #[arg(long)]
        search: Option<String>,

        /// all, completed, or anything else for active tasks
        #[arg(long)]
        status: Option<String>,

        /// Exact category, or "all"
        #[arg(long)]
        category: Option<String>,

        /// low, medium, high, or "all"
        #[arg(long)]
        priority: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print the distinct task categories
    Categories,

    /// Interactive session reading commands from stdin
    Shell,
}

fn main() -> Result<()> {
    // Setup tracing on stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;
    if !config.color {
        colored::control::set_override(false);
    }

    let variant = cli.variant.unwrap_or(config.variant);
    let seed = match cli.seed.as_ref().or(config.seed.as_ref()) {
        Some(path) => seed::load_file(path)?,
        None => match variant {
            Variant::Minimal => seed::minimal(),
            Variant::Extended => seed::extended(),
        },
    };

    let mut store = Store::seeded(variant, seed, SystemClock);
    store.set_filter(config.filter.clone());
    info!(%variant, tasks = store.len(), "Session started");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::List {
            search,
            status,
            category,
            priority,
            json,
        } => {
            if let Some(search) = search {
                store.set_search(search);
            }
            if let Some(status) = status {
                store.set_status(StatusFilter::parse(&status));
            }
            if let Some(category) = category {
                store.set_category(CategoryFilter::parse(&category));
            }
            if let Some(priority) = priority {
                let filter = PriorityFilter::parse(&priority).ok_or_else(|| eyre!("Unknown priority: {}", priority))?;
                store.set_priority(filter);
            }

            if json {
                serde_json::to_writer_pretty(&mut out, &render::views(&store)).context("Failed to write JSON")?;
                writeln!(out)?;
            } else {
                write!(out, "{}", render::list(&store))?;
            }
        }
        Commands::Categories => {
            for category in store.categories() {
                writeln!(out, "{}", category)?;
            }
        }
        Commands::Shell => {
            writeln!(out, "Type 'help' for commands, 'quit' to exit")?;
            shell::run(&mut store, io::stdin().lock(), &mut out)?;
        }
    }

    Ok(())
}
