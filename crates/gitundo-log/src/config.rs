use crate::paths::UndoPaths;
use crate::store::write_atomic;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Per-repository settings stored in `<git-dir>/git-undo/config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UndoConfig {
    /// Restrict undo/redo to entries recorded on the current ref.
    #[serde(default = "default_true")]
    pub branch_scoped: bool,
    /// Maximum entries printed by `--log`.
    #[serde(default = "default_log_limit")]
    pub log_limit: usize,
    /// Record branch switches as navigation entries.
    #[serde(default = "default_true")]
    pub track_navigation: bool,
}

fn default_true() -> bool {
    true
}

fn default_log_limit() -> usize {
    50
}

impl Default for UndoConfig {
    fn default() -> Self {
        Self {
            branch_scoped: true,
            log_limit: default_log_limit(),
            track_navigation: true,
        }
    }
}

impl UndoConfig {
    /// Load the typed view. Missing file → defaults; unknown keys ignored.
    pub fn load(paths: &UndoPaths) -> anyhow::Result<Self> {
        let map = read_config(&paths.config_json)?;
        Ok(serde_json::from_value(serde_json::Value::Object(map))?)
    }
}

/// Read config as a raw JSON map. Returns empty map if file doesn't exist.
pub fn read_config(path: &Path) -> anyhow::Result<serde_json::Map<String, serde_json::Value>> {
    if !path.exists() {
        return Ok(serde_json::Map::new());
    }
    let content = std::fs::read_to_string(path)?;
    let val: serde_json::Value = serde_json::from_str(&content)?;
    match val {
        serde_json::Value::Object(map) => Ok(map),
        _ => Ok(serde_json::Map::new()),
    }
}

pub fn write_config(
    path: &Path,
    config: &serde_json::Map<String, serde_json::Value>,
) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&config)?;
    write_atomic(path, json.as_bytes())
}

/// Parse a CLI string into a JSON value (bool/number/string).
pub fn parse_value(s: &str) -> serde_json::Value {
    match s {
        "true" => serde_json::Value::Bool(true),
        "false" => serde_json::Value::Bool(false),
        _ => match s.parse::<u64>() {
            Ok(n) => serde_json::Value::Number(n.into()),
            Err(_) => serde_json::Value::String(s.to_string()),
        },
    }
}
