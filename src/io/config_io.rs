use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::io::storage::atomic_write;
use crate::model::config::Config;

pub const CONFIG_FILE: &str = "config.toml";

/// Error type for config operations
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("could not write {path}: {source}")]
    WriteError { path: PathBuf, source: io::Error },
    #[error("could not parse config.toml: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("could not edit config.toml: {0}")]
    EditError(#[from] toml_edit::TomlError),
    #[error("unknown config key '{0}' (expected: store.insert, store.ids)")]
    UnknownKey(String),
    #[error("invalid value '{value}' for {key} (expected: {expected})")]
    InvalidValue {
        key: String,
        value: String,
        expected: String,
    },
}

/// Settable keys and the values each accepts
const KEYS: &[(&str, &[&str])] = &[
    ("store.insert", &["top", "bottom"]),
    ("store.ids", &["token", "counter"]),
];

/// Read config.toml from the data directory. A missing file means defaults.
pub fn read_config(data_dir: &Path) -> Result<Config, ConfigError> {
    let path = data_dir.join(CONFIG_FILE);
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Config::default()),
        Err(e) => return Err(ConfigError::ReadError { path, source: e }),
    };
    Ok(toml::from_str(&text)?)
}

/// Set `key` (dotted, e.g. `store.insert`) to `value` in config.toml,
/// preserving comments and layout of the rest of the file.
pub fn set_config_value(data_dir: &Path, key: &str, value: &str) -> Result<(), ConfigError> {
    let allowed = KEYS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, allowed)| *allowed)
        .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

    if !allowed.contains(&value) {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            expected: allowed.join(", "),
        });
    }
    let (table, field) = key.split_once('.').unwrap_or(("store", key));

    let path = data_dir.join(CONFIG_FILE);
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(ConfigError::ReadError { path, source: e }),
    };

    let mut doc: toml_edit::DocumentMut = text.parse()?;
    set_value(&mut doc, table, field, value);

    // Validate the edited document still deserializes before writing it
    toml::from_str::<Config>(&doc.to_string())?;

    atomic_write(&path, doc.to_string().as_bytes())
        .map_err(|e| ConfigError::WriteError { path, source: e })
}

fn set_value(doc: &mut toml_edit::DocumentMut, table: &str, field: &str, value: &str) {
    if !doc.get(table).is_some_and(toml_edit::Item::is_table_like) {
        doc[table] = toml_edit::Item::Table(toml_edit::Table::new());
    }
    doc[table][field] = toml_edit::value(value);
}
