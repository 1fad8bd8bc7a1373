use serde::{Deserialize, Serialize};

/// Configuration from config.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Which end of the list new tasks go to
    #[serde(default)]
    pub insert: InsertPosition,
    /// How new task ids are minted
    #[serde(default)]
    pub ids: IdStrategy,
}

/// Where `add` places a new task
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsertPosition {
    /// Head of the list (newest first)
    #[default]
    Top,
    /// Tail of the list (oldest first)
    Bottom,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// Time-based base-36 token with a random suffix
    #[default]
    Token,
    /// Sequential integers, with the counter persisted next to the tasks
    Counter,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.store.insert, InsertPosition::Top);
        assert_eq!(config.store.ids, IdStrategy::Token);
    }

    #[test]
    fn reads_store_table() {
        let config: Config = toml::from_str(
            r#"[store]
insert = "bottom"
ids = "counter"
"#,
        )
        .unwrap();
        assert_eq!(config.store.insert, InsertPosition::Bottom);
        assert_eq!(config.store.ids, IdStrategy::Counter);
    }

    #[test]
    fn rejects_unknown_values() {
        let result: Result<Config, _> = toml::from_str("[store]\ninsert = \"middle\"\n");
        assert!(result.is_err());
    }
}
