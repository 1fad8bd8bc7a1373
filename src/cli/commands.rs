use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::model::{Filter, Priority, Theme};

#[derive(Parser)]
#[command(name = "tick", about = concat!("[x] tick v", env!("CARGO_PKG_VERSION"), " - a small todo list"), version)]
pub struct Cli {
    /// Subcommand (default: list)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Keep data in this directory instead of the platform data dir
    #[arg(short = 'd', long = "data-dir", global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a todo
    Add(AddArgs),
    /// List todos
    List(ListArgs),
    /// Mark a todo done, or not done again
    Toggle(IdArgs),
    /// Delete a todo
    Rm(IdArgs),
    /// Delete all completed todos
    Clear,
    /// Move a todo to another position
    Mv(MvArgs),
    /// Show, set, or toggle the theme
    Theme(ThemeArgs),
    /// Print how many todos are left
    Count,
    /// Set a config value (store.insert, store.ids)
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct AddArgs {
    /// Todo text (multiple words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
    /// Priority (low, medium, high)
    #[arg(short, long)]
    pub priority: Option<Priority>,
    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due: Option<NaiveDate>,
}

#[derive(Args, Default)]
pub struct ListArgs {
    /// Which todos to show (all, active, completed)
    #[arg(short, long, default_value = "all")]
    pub filter: Filter,
}

#[derive(Args)]
pub struct IdArgs {
    /// Todo ID
    pub id: String,
}

#[derive(Args)]
pub struct MvArgs {
    /// Current position (1-based, within the filtered list)
    pub from: usize,
    /// Target position (1-based, within the filtered list)
    pub to: usize,
    /// Positions count within this view (all, active, completed)
    #[arg(short, long, default_value = "all")]
    pub filter: Filter,
}

#[derive(Args)]
pub struct ThemeArgs {
    /// Theme to set (light, dark); toggles when omitted
    pub theme: Option<Theme>,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Dotted key, e.g. store.insert
    pub key: String,
    /// New value
    pub value: String,
}
