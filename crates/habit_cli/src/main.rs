//! `habit` command-line front end.
//!
//! # Responsibility
//! - Map subcommands onto `HabitService` use-cases.
//! - Render habit lists, statistics and the weekly grid as plain text.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use habit_core::db::open_db;
use habit_core::{
    init_logging, streak_tier, today_key, Config, HabitCategory, HabitDraft, HabitId,
    HabitRecord, HabitService, HabitStorage, SqliteKvStorage,
};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "habit", version, about = "Track daily habits and streaks")]
struct Cli {
    /// Directory holding the habit database.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log level (trace|debug|info|warn|error).
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create a habit.
    Add {
        name: String,
        #[arg(long, default_value = "health")]
        category: HabitCategory,
        /// Display color; defaults to the category color.
        #[arg(long)]
        color: Option<String>,
    },
    /// Change name, category or color of a habit.
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        category: Option<HabitCategory>,
        #[arg(long)]
        color: Option<String>,
    },
    /// Delete a habit and its history.
    Delete { id: String },
    /// Flip completion for a date (today by default).
    Toggle {
        id: String,
        #[arg(long)]
        date: Option<String>,
    },
    /// List habits with current streaks.
    List,
    /// Show statistics for one habit.
    Stats {
        id: String,
        #[arg(long)]
        json: bool,
    },
    /// Show totals across all habits.
    Overview {
        #[arg(long)]
        json: bool,
    },
    /// Show the last seven days for one habit.
    Week { id: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().context("failed to load configuration")?;
    if let Some(dir) = cli.data_dir.clone() {
        config.data_dir = Some(dir);
    }
    if let Some(level) = cli.log_level.clone() {
        config.logging.level = Some(level);
    }

    // Logging is best-effort; the CLI still works without a log sink.
    if let Err(err) = init_logging(&config.log_level(), config.log_dir()) {
        eprintln!("warning: logging disabled: {err}");
    }

    let db_path = config.database_path();
    let conn = open_db(&db_path)
        .with_context(|| format!("failed to open database `{}`", db_path.display()))?;
    log::info!(
        "event=cli_start module=cli status=ok db_path={}",
        db_path.display()
    );
    let mut service = HabitService::new(SqliteKvStorage::new(&conn));

    run(&mut service, cli.command)?;

    if service.has_unsaved_changes() {
        eprintln!("warning: changes could not be saved; see log for details");
    }
    Ok(())
}

fn run<S: HabitStorage>(service: &mut HabitService<S>, command: Command) -> Result<()> {
    match command {
        Command::Add {
            name,
            category,
            color,
        } => {
            let mut draft = HabitDraft::new(name, category);
            if let Some(color) = color {
                draft.color = color;
            }
            let habit = service.create_habit(&draft)?;
            println!("created {} {}", habit.id, habit.name);
        }
        Command::Edit {
            id,
            name,
            category,
            color,
        } => {
            let id = resolve_id(service, &id)?;
            let current = service
                .get(id)
                .ok_or_else(|| anyhow!("habit not found: {id}"))?;
            let category = category.unwrap_or(current.category);
            let draft = HabitDraft {
                name: name.unwrap_or_else(|| current.name.clone()),
                category,
                color: color.unwrap_or_else(|| current.color.clone()),
            };
            let habit = service.update_habit(id, &draft)?;
            println!("updated {} {}", habit.id, habit.name);
        }
        Command::Delete { id } => {
            let id = resolve_id(service, &id)?;
            let habit = service.delete_habit(id)?;
            println!("deleted {} {}", habit.id, habit.name);
        }
        Command::Toggle { id, date } => {
            let id = resolve_id(service, &id)?;
            let date = date.unwrap_or_else(today_key);
            let completed = service.toggle_completion(id, &date)?;
            let mark = if completed { "done" } else { "not done" };
            println!("{date}: {mark}");
        }
        Command::List => {
            let habits = service.list();
            if habits.is_empty() {
                println!("no habits yet");
            }
            for habit in &habits {
                let stats = service.stats(habit.id)?;
                println!(
                    "{} {} [{}] {} streak {}",
                    short_id(habit),
                    habit.name,
                    habit.category,
                    streak_tier(i64::from(stats.current_streak)).emoji(),
                    stats.current_streak
                );
            }
        }
        Command::Stats { id, json } => {
            let id = resolve_id(service, &id)?;
            let stats = service.stats(id)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                let tier = streak_tier(i64::from(stats.current_streak));
                println!("current streak:  {} {}", stats.current_streak, tier.emoji());
                println!("longest streak:  {}", stats.longest_streak);
                println!("completions:     {}", stats.total_completions);
                println!("30-day rate:     {}%", stats.completion_rate);
                println!("tier:            {tier}");
            }
        }
        Command::Overview { json } => {
            let overview = service.overview();
            if json {
                println!("{}", serde_json::to_string_pretty(&overview)?);
            } else {
                println!("habits:       {}", overview.total_habits);
                println!("completions:  {}", overview.total_completions);
                println!("avg. rate:    {}%", overview.average_completion_rate);
                println!("best streak:  {}", overview.best_streak);
            }
        }
        Command::Week { id } => {
            let id = resolve_id(service, &id)?;
            for day in service.week(id)? {
                let mark = if day.completed { "x" } else { " " };
                println!("{} {} [{mark}]", day.day_name, day.date_key);
            }
        }
    }
    Ok(())
}

/// Accepts a full UUID or a unique prefix of one.
fn resolve_id<S: HabitStorage>(service: &HabitService<S>, input: &str) -> Result<HabitId> {
    if let Ok(id) = input.parse::<HabitId>() {
        return Ok(id);
    }
    let needle = input.trim().to_ascii_lowercase();
    if needle.is_empty() {
        bail!("habit id cannot be empty");
    }
    let matches: Vec<HabitId> = service
        .list()
        .iter()
        .map(|habit| habit.id)
        .filter(|id| id.to_string().starts_with(&needle))
        .collect();
    match matches.as_slice() {
        [id] => Ok(*id),
        [] => bail!("no habit matches `{input}`"),
        _ => bail!("`{input}` matches {} habits; use a longer prefix", matches.len()),
    }
}

fn short_id(habit: &HabitRecord) -> String {
    habit.id.to_string().chars().take(8).collect()
}
