use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::model::filter::Filter;
use crate::model::task::TaskId;

#[derive(Parser)]
#[command(name = "peto", about = concat!("peto v", env!("CARGO_PKG_VERSION"), " - tasks with due dates"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use a different data directory (default: $PETO_HOME or ~/.local/share/peto)
    #[arg(short = 'C', long = "data-dir", global = true)]
    pub data_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a task (newest tasks are listed first)
    Add(AddArgs),
    /// List tasks
    List(ListArgs),
    /// Mark a task done, or not done if it already is
    Toggle(IdArgs),
    /// Delete a task
    Delete(IdArgs),
    /// Delete all tasks
    Clear(ClearArgs),
    /// Show total/active/done counts
    Stats,
    /// Show or change the color theme
    Theme(ThemeArgs),
}

#[derive(Args)]
pub struct AddArgs {
    /// Task description
    pub text: String,
    /// Due date (YYYY-MM-DD)
    #[arg(long, short, default_value = "")]
    pub date: String,
}

#[derive(Args)]
pub struct ListArgs {
    /// Which tasks to show
    #[arg(long, short, value_enum, default_value_t = Filter::All)]
    pub filter: Filter,
}

#[derive(Args)]
pub struct IdArgs {
    /// Task ID (as shown by `peto list`)
    pub id: TaskId,
}

#[derive(Args)]
pub struct ClearArgs {
    /// Skip the confirmation prompt
    #[arg(long, short)]
    pub yes: bool,
}

#[derive(Args)]
pub struct ThemeArgs {
    /// New theme; omit to print the current one
    #[arg(value_enum)]
    pub theme: Option<ThemeChoice>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeChoice {
    Light,
    Dark,
    Toggle,
}
