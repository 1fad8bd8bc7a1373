use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::commands::*;
use crate::cli::output::Output;
use crate::io::config_io;
use crate::io::storage::FileStorage;
use crate::model::TaskId;
use crate::store::{StoreError, StoreOptions, TodoStore};

type CliResult = Result<(), Box<dyn std::error::Error>>;
type CliStore = TodoStore<FileStorage, Output>;

/// Directory name under the platform data dir
const APP_DIR: &str = "ticklist";

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CliResult {
    let data_dir = resolve_data_dir(cli.data_dir)?;
    debug!(data_dir = %data_dir.display(), "using data directory");
    let json = cli.json;

    match cli.command {
        None => cmd_list(&data_dir, ListArgs::default(), json),
        Some(cmd) => match cmd {
            Commands::Add(args) => cmd_add(&data_dir, args, json),
            Commands::List(args) => cmd_list(&data_dir, args, json),
            Commands::Toggle(args) => cmd_toggle(&data_dir, args, json),
            Commands::Rm(args) => cmd_rm(&data_dir, args, json),
            Commands::Clear => cmd_clear(&data_dir, json),
            Commands::Mv(args) => cmd_mv(&data_dir, args, json),
            Commands::Theme(args) => cmd_theme(&data_dir, args, json),
            Commands::Count => cmd_count(&data_dir, json),
            Commands::Config(args) => cmd_config(&data_dir, args),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn resolve_data_dir(flag: Option<PathBuf>) -> Result<PathBuf, String> {
    match flag {
        Some(dir) => Ok(dir),
        None => dirs::data_dir()
            .map(|d| d.join(APP_DIR))
            .ok_or_else(|| "could not determine a data directory; pass --data-dir".to_string()),
    }
}

fn open_store(data_dir: &Path, json: bool) -> Result<CliStore, Box<dyn std::error::Error>> {
    let config = config_io::read_config(data_dir)?;
    let storage = FileStorage::open(data_dir)?;
    Ok(TodoStore::open(storage, Output::new(json), StoreOptions::from(&config))?)
}

/// Print the store's latest frame
fn print_frame(store: &CliStore) -> CliResult {
    println!("{}", store.renderer().frame()?);
    Ok(())
}

/// Convert a 1-based CLI position to a 0-based index
fn position(n: usize) -> Result<usize, String> {
    n.checked_sub(1)
        .ok_or_else(|| "positions start at 1".to_string())
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_add(data_dir: &Path, args: AddArgs, json: bool) -> CliResult {
    let mut store = open_store(data_dir, json)?;
    let task = store.add(&args.text.join(" "), args.priority, args.due)?;
    if !json {
        println!("added {}", task.id);
    }
    print_frame(&store)
}

fn cmd_list(data_dir: &Path, args: ListArgs, json: bool) -> CliResult {
    let mut store = open_store(data_dir, json)?;
    store.set_filter(args.filter);
    print_frame(&store)
}

fn cmd_toggle(data_dir: &Path, args: IdArgs, json: bool) -> CliResult {
    let mut store = open_store(data_dir, json)?;
    let id = TaskId::new(args.id);
    if !store.toggle(&id)? {
        return Err(format!("task not found: {}", id).into());
    }
    print_frame(&store)
}

fn cmd_rm(data_dir: &Path, args: IdArgs, json: bool) -> CliResult {
    let mut store = open_store(data_dir, json)?;
    let id = TaskId::new(args.id);
    if !store.remove(&id)? {
        return Err(format!("task not found: {}", id).into());
    }
    if !json {
        println!("removed {}", id);
    }
    print_frame(&store)
}

fn cmd_clear(data_dir: &Path, json: bool) -> CliResult {
    let mut store = open_store(data_dir, json)?;
    let removed = store.clear_completed()?;
    if !json {
        let plural = if removed == 1 { "" } else { "s" };
        println!("cleared {} completed todo{}", removed, plural);
    }
    print_frame(&store)
}

fn cmd_mv(data_dir: &Path, args: MvArgs, json: bool) -> CliResult {
    let from = position(args.from)?;
    let to = position(args.to)?;
    let mut store = open_store(data_dir, json)?;
    store.set_filter(args.filter);
    match store.reorder(from, to) {
        Err(StoreError::InvalidIndex { index, len }) => Err(format!(
            "no position {}: {} task(s) visible",
            index + 1,
            len
        )
        .into()),
        Err(e) => Err(e.into()),
        Ok(()) => print_frame(&store),
    }
}

fn cmd_theme(data_dir: &Path, args: ThemeArgs, json: bool) -> CliResult {
    let mut store = open_store(data_dir, json)?;
    match args.theme {
        Some(theme) => store.set_theme(theme)?,
        None => {
            store.toggle_theme()?;
        }
    }
    let output = store.renderer();
    if output.is_json() {
        println!("{}", serde_json::json!({ "theme": output.theme() }));
    } else {
        println!("theme: {}", output.theme());
    }
    Ok(())
}

fn cmd_count(data_dir: &Path, json: bool) -> CliResult {
    let store = open_store(data_dir, json)?;
    let remaining = store.remaining_count();
    if json {
        println!("{}", serde_json::json!({ "remaining": remaining }));
    } else {
        println!("{}", remaining);
    }
    Ok(())
}

fn cmd_config(data_dir: &Path, args: ConfigArgs) -> CliResult {
    std::fs::create_dir_all(data_dir)?;
    config_io::set_config_value(data_dir, &args.key, &args.value)?;
    println!("{} = {}", args.key, args.value);
    Ok(())
}
