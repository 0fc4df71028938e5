//! JSON configuration file.
//!
//! Stores settings in %APPDATA%/DeskPins/config.json (XDG config directory
//! on other platforms, which is what the tests exercise).
//!
//! Uses an in-memory cache to avoid disk I/O on every change.
//! Call `flush_config()` to persist changes to disk.

use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::model::constants::APP_NAME;
use crate::model::Options;

/// Serializable config structure for JSON persistence.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
struct Config {
    #[serde(default)]
    ui_file: String,
    #[serde(default)]
    help_file: String,
}

// In-memory config cache. Loaded once, written on flush.
thread_local! {
    static CONFIG_CACHE: RefCell<Option<Config>> = const { RefCell::new(None) };
    static CONFIG_DIRTY: RefCell<bool> = const { RefCell::new(false) };
}

/// Get config file path: %APPDATA%/DeskPins/config.json
fn config_path() -> PathBuf {
    let base = std::env::var("APPDATA")
        .or_else(|_| std::env::var("XDG_CONFIG_HOME"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(base).join(APP_NAME).join("config.json")
}

/// Ensure the config directory exists.
fn ensure_config_dir() -> std::io::Result<()> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Load config from JSON file, returning defaults if not found or invalid.
fn load_config_from_disk() -> Config {
    let path = config_path();
    match fs::read_to_string(&path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_default(),
        Err(_) => Config::default(),
    }
}

/// Save config to JSON file.
fn save_config_to_disk(config: &Config) {
    if ensure_config_dir().is_err() {
        warn!("failed to create config directory");
        return;
    }

    let path = config_path();
    match serde_json::to_string_pretty(config) {
        Ok(json) => {
            if let Err(e) = fs::write(&path, json) {
                warn!("failed to write config: {}", e);
            }
        }
        Err(e) => warn!("failed to serialize config: {}", e),
    }
}

/// Get the cached config, loading from disk if needed.
fn get_config() -> Config {
    CONFIG_CACHE.with(|cache| {
        let mut cache = cache.borrow_mut();
        if cache.is_none() {
            *cache = Some(load_config_from_disk());
        }
        cache.clone().unwrap()
    })
}

/// Update the cached config and mark it dirty.
fn set_config(config: Config) {
    CONFIG_CACHE.with(|cache| {
        *cache.borrow_mut() = Some(config);
    });
    CONFIG_DIRTY.with(|dirty| {
        *dirty.borrow_mut() = true;
    });
}

/// Flush the config cache to disk if dirty.
///
/// Call this when the options window closes or the app exits.
pub fn flush_config() {
    let is_dirty = CONFIG_DIRTY.with(|dirty| *dirty.borrow());
    if !is_dirty {
        return;
    }

    CONFIG_CACHE.with(|cache| {
        if let Some(ref config) = *cache.borrow() {
            save_config_to_disk(config);
        }
    });

    CONFIG_DIRTY.with(|dirty| {
        *dirty.borrow_mut() = false;
    });
}

/// Load the option record from the config file.
pub fn load_options() -> Options {
    let config = get_config();
    Options {
        ui_file: config.ui_file,
        help_file: config.help_file,
    }
}

/// Save the option record to the config file.
///
/// Note: this updates the cache immediately but only writes to disk
/// when `flush_config()` is called.
pub fn save_options(opt: &Options) {
    set_config(Config {
        ui_file: opt.ui_file.clone(),
        help_file: opt.help_file.clone(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_is_builtin_everything() {
        let config = Config::default();
        assert!(config.ui_file.is_empty());
        assert!(config.help_file.is_empty());
    }

    #[test]
    fn config_serialization_roundtrip() {
        let config = Config {
            ui_file: "lang_fr.dll".into(),
            help_file: "DeskPins_FR.chm".into(),
        };
        let json = serde_json::to_string(&config).unwrap();
        let loaded: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.ui_file, "lang_fr.dll");
        assert_eq!(loaded.help_file, "DeskPins_FR.chm");
    }

    #[test]
    fn config_tolerates_missing_fields() {
        let loaded: Config = serde_json::from_str("{}").unwrap();
        assert!(loaded.ui_file.is_empty());
        assert!(loaded.help_file.is_empty());
    }
}
