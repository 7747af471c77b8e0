use crate::Context;
use clap::Subcommand;
use gitundo_log::config::{parse_value, read_config, write_config};
use gitundo_log::UndoConfig;

// ── CLI Schema ──

#[derive(Subcommand)]
pub enum ConfigCmd {
    /// Set a config value
    Set {
        /// Config key (branch_scoped, log_limit, track_navigation)
        key: String,
        /// Config value (true/false/number/string)
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
}

// ── Dispatch ──

pub fn run(cmd: ConfigCmd, ctx: &Context) -> anyhow::Result<()> {
    match cmd {
        ConfigCmd::Set { key, value } => set(ctx, &key, &value),
        ConfigCmd::Get { key } => get(ctx, &key),
        ConfigCmd::List => list(ctx),
    }
}

// ── Command Implementations ──

/// Insert `key = value`, refusing values the typed config cannot read.
fn apply(
    config: &mut serde_json::Map<String, serde_json::Value>,
    key: &str,
    value: &str,
) -> anyhow::Result<()> {
    let mut candidate = config.clone();
    candidate.insert(key.to_string(), parse_value(value));
    if let Err(e) = serde_json::from_value::<UndoConfig>(serde_json::Value::Object(candidate.clone())) {
        anyhow::bail!("invalid value for {key}: {e}");
    }
    *config = candidate;
    Ok(())
}

/// `git undo config set <key> <value>`
pub fn set(ctx: &Context, key: &str, value: &str) -> anyhow::Result<()> {
    let mut config = read_config(&ctx.paths.config_json)?;
    apply(&mut config, key, value)?;
    write_config(&ctx.paths.config_json, &config)?;
    println!("{key} = {value}");
    Ok(())
}

/// `git undo config get <key>`
pub fn get(ctx: &Context, key: &str) -> anyhow::Result<()> {
    let config = read_config(&ctx.paths.config_json)?;
    match config.get(key) {
        Some(val) => println!("{val}"),
        None => println!("(not set)"),
    }
    Ok(())
}

/// `git undo config list`
pub fn list(ctx: &Context) -> anyhow::Result<()> {
    let config = read_config(&ctx.paths.config_json)?;
    if config.is_empty() {
        println!("(no config set)");
    } else {
        for (k, v) in &config {
            println!("{k} = {v}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_accepts_typed_values() {
        let mut map = serde_json::Map::new();
        apply(&mut map, "log_limit", "10").unwrap();
        apply(&mut map, "branch_scoped", "false").unwrap();
        assert_eq!(map.get("log_limit"), Some(&serde_json::json!(10)));
        assert_eq!(map.get("branch_scoped"), Some(&serde_json::json!(false)));
    }

    #[test]
    fn apply_rejects_wrong_type_and_keeps_map() {
        let mut map = serde_json::Map::new();
        assert!(apply(&mut map, "track_navigation", "maybe").is_err());
        assert!(map.is_empty());
    }

    #[test]
    fn apply_keeps_unknown_keys() {
        let mut map = serde_json::Map::new();
        apply(&mut map, "editor", "vim").unwrap();
        assert_eq!(map.get("editor"), Some(&serde_json::json!("vim")));
    }
}
