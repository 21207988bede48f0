// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Settings persistence — data directory resolution and the JSON config file.

use std::fs;
use std::path::{Path, PathBuf};

use folio_core::AppConfig;
use folio_core::error::Result;
use tracing::{debug, warn};

const CONFIG_FILE: &str = "config.json";

/// Return the application data directory. It is created on first save.
pub fn data_dir() -> PathBuf {
    dirs_fallback().join("folio")
}

fn dirs_fallback() -> PathBuf {
    // Try XDG data dir, then fallback to home
    if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        return PathBuf::from(xdg);
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".local").join("share");
    }
    // Last resort
    std::env::temp_dir()
}

pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join(CONFIG_FILE)
}

/// Load the persisted config. A missing, unreadable or invalid file yields
/// the defaults.
pub fn load_config(data_dir: &Path) -> AppConfig {
    let path = config_path(data_dir);
    let Ok(data) = fs::read_to_string(&path) else {
        debug!(path = %path.display(), "No saved config, using defaults");
        return AppConfig::default();
    };

    match serde_json::from_str::<AppConfig>(&data) {
        Ok(config) if config.validate().is_ok() => config,
        Ok(_) => {
            warn!(path = %path.display(), "Saved config is inconsistent, using defaults");
            AppConfig::default()
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "Saved config is corrupt, using defaults");
            AppConfig::default()
        }
    }
}

pub fn persist_config(data_dir: &Path, config: &AppConfig) -> Result<()> {
    fs::create_dir_all(data_dir)?;
    let json = serde_json::to_string_pretty(config)?;
    fs::write(config_path(data_dir), json)?;
    debug!(dir = %data_dir.display(), "Config saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        assert_eq!(load_config(tmp.path()), AppConfig::default());
    }

    #[test]
    fn persisted_config_round_trips() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("folio");
        let config = AppConfig {
            input_prefix: "scan".into(),
            interlace: true,
            reverse_even: true,
            ..AppConfig::default()
        };
        persist_config(&dir, &config).unwrap();
        assert_eq!(load_config(&dir), config);
    }

    #[test]
    fn corrupt_file_gives_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(config_path(tmp.path()), "{ not json").unwrap();
        assert_eq!(load_config(tmp.path()), AppConfig::default());
    }

    #[test]
    fn invalid_values_give_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(config_path(tmp.path()), r#"{"jpeg_quality": 0}"#).unwrap();
        assert_eq!(load_config(tmp.path()), AppConfig::default());
    }
}
