use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::paths;
use crate::io::storage::JsonFileStorage;
use crate::logging;
use crate::model::config::{Config, ThemeMode};
use crate::ops::notice::Notice;
use crate::ops::store::{ClearOutcome, StoreError, TaskStore};
use crate::ops::view::{Counts, project};
use crate::util::date::today;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let json = cli.json;
    let data_dir = resolve_data_dir(cli.data_dir.as_deref())?;
    let config = load_config(&data_dir);

    match cli.command {
        // No subcommand → interactive UI
        None => crate::tui::run(&data_dir, config),
        Some(cmd) => match cmd {
            Commands::Add(args) => cmd_add(&data_dir, args, json),
            Commands::List(args) => cmd_list(&data_dir, args, json),
            Commands::Toggle(args) => cmd_toggle(&data_dir, args, json),
            Commands::Delete(args) => cmd_delete(&data_dir, args, json),
            Commands::Clear(args) => cmd_clear(&data_dir, args, json),
            Commands::Stats => cmd_stats(&data_dir, json),
            Commands::Theme(args) => cmd_theme(&data_dir, &config, args, json),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn resolve_data_dir(flag: Option<&str>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let explicit = match flag {
        Some(dir) => Some(
            std::path::absolute(dir)
                .map_err(|e| format!("cannot resolve -C path '{}': {}", dir, e))?,
        ),
        None => None,
    };
    Ok(paths::data_dir(explicit.as_deref()))
}

/// Read config.toml and start logging. A broken config only costs the
/// user their settings; tasks stay reachable.
fn load_config(data_dir: &Path) -> Config {
    match config_io::read_config(data_dir) {
        Ok(config) => {
            start_logging(&config, data_dir);
            config
        }
        Err(e) => {
            eprintln!("warning: ignoring config: {}", e);
            let config = Config::default();
            start_logging(&config, data_dir);
            log::warn!("event=config_load status=defaulted error={}", e);
            config
        }
    }
}

/// Logging problems are reported but never stop a command
fn start_logging(config: &Config, data_dir: &Path) {
    let level = logging::effective_level(
        &config.log.level,
        std::env::var(logging::LOG_LEVEL_ENV).ok(),
    );
    if let Err(e) = logging::init_logging(&level, data_dir) {
        eprintln!("warning: logging disabled: {}", e);
    }
}

fn open_store(data_dir: &Path) -> TaskStore<JsonFileStorage> {
    TaskStore::open(JsonFileStorage::new(data_dir))
}

fn print_json<T: serde::Serialize>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Ask on stderr/stdin; anything but y/yes is a no
fn prompt_yes_no(question: &str) -> bool {
    eprint!("{} [y/N] ", question);
    let _ = std::io::stderr().flush();
    let mut answer = String::new();
    if std::io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_add(data_dir: &Path, args: AddArgs, json: bool) -> CmdResult {
    let mut store = open_store(data_dir);
    let task = store.add(&args.text, &args.date)?;
    if json {
        print_json(&task_to_json(&task))
    } else {
        println!("{} {}", Notice::added().message, task.id);
        Ok(())
    }
}

fn cmd_list(data_dir: &Path, args: ListArgs, json: bool) -> CmdResult {
    let store = open_store(data_dir);
    let view = project(store.tasks(), args.filter, today());
    if json {
        print_json(&view_to_json(&view))
    } else {
        print!("{}", format_view(&view));
        Ok(())
    }
}

fn cmd_toggle(data_dir: &Path, args: IdArgs, json: bool) -> CmdResult {
    let mut store = open_store(data_dir);
    match store.toggle(args.id)? {
        Some(_) => {
            let task = store.get(args.id).map(task_to_json);
            if json {
                print_json(&task)
            } else {
                if let Some(task) = task {
                    let state = if task.done { "done" } else { "not done" };
                    println!("{} marked {}", task.id, state);
                }
                Ok(())
            }
        }
        None => {
            eprintln!("warning: no task with ID {}", args.id);
            if json { print_json(&serde_json::Value::Null) } else { Ok(()) }
        }
    }
}

fn cmd_delete(data_dir: &Path, args: IdArgs, json: bool) -> CmdResult {
    let mut store = open_store(data_dir);
    match store.delete(args.id)? {
        Some(task) => {
            if json {
                print_json(&task_to_json(&task))
            } else {
                println!("{}", Notice::deleted().message);
                Ok(())
            }
        }
        None => {
            eprintln!("warning: no task with ID {}", args.id);
            if json { print_json(&serde_json::Value::Null) } else { Ok(()) }
        }
    }
}

fn cmd_clear(data_dir: &Path, args: ClearArgs, json: bool) -> CmdResult {
    let mut store = open_store(data_dir);
    let outcome = match store.clear(|count| {
        args.yes || prompt_yes_no(&format!("Delete all {} tasks?", count))
    }) {
        Ok(outcome) => outcome,
        // Nothing to delete is a warning, not a failure
        Err(err @ StoreError::NothingToClear) => {
            eprintln!("warning: {}", Notice::from_error(&err).message);
            return if json {
                print_json(&serde_json::json!({ "removed": 0 }))
            } else {
                Ok(())
            };
        }
        Err(err) => return Err(err.into()),
    };

    if json {
        let removed = match outcome {
            ClearOutcome::Cleared(n) => n,
            ClearOutcome::Declined => 0,
        };
        return print_json(&serde_json::json!({ "removed": removed }));
    }
    match Notice::cleared(outcome) {
        Some(notice) => println!("{}", notice.message),
        None => println!("Nothing deleted."),
    }
    Ok(())
}

fn cmd_stats(data_dir: &Path, json: bool) -> CmdResult {
    let store = open_store(data_dir);
    let counts = Counts::of(store.tasks());
    if json {
        print_json(&counts_to_json(&counts))
    } else {
        println!("{}", format_counts(&counts));
        Ok(())
    }
}

fn cmd_theme(data_dir: &Path, config: &Config, args: ThemeArgs, json: bool) -> CmdResult {
    let current = config.ui.theme;
    let theme = match args.theme {
        None => current,
        Some(choice) => {
            let next = match choice {
                ThemeChoice::Light => ThemeMode::Light,
                ThemeChoice::Dark => ThemeMode::Dark,
                ThemeChoice::Toggle => current.toggled(),
            };
            config_io::save_theme(data_dir, next)?;
            next
        }
    };
    if json {
        print_json(&serde_json::json!({ "theme": theme }))
    } else {
        println!("{}", theme);
        Ok(())
    }
}
