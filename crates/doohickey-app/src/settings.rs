// Settings persistence: the Pro flag plus output preferences.
// Uses platform-native config dir: e.g. ~/Library/Application Support/doohickey/settings.json
// on macOS, ~/.config/doohickey/settings.json on Linux. DOOHICKEY_SETTINGS overrides the path.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use doohickey_color::Harmony;
use doohickey_core::Capabilities;
use doohickey_markup::MarkdownFlavor;

pub const SETTINGS_ENV: &str = "DOOHICKEY_SETTINGS";

/// Default cap on `old lines × new lines` for `diff`. The LCS table holds
/// one `u32` per cell, so this is roughly 100 MB.
pub const DEFAULT_MAX_DIFF_CELLS: u64 = 25_000_000;

fn default_max_diff_cells() -> u64 {
    DEFAULT_MAX_DIFF_CELLS
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Color only when stdout is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Unlocks the Pro tools.
    #[serde(default)]
    pub pro: bool,
    #[serde(default)]
    pub color: ColorChoice,
    /// Renderer used by `md2html` when `--commonmark` is not given.
    #[serde(default)]
    pub markdown_flavor: MarkdownFlavor,
    /// Harmony used by `palette` when `--harmony` is not given.
    #[serde(default)]
    pub default_harmony: Harmony,
    /// Largest `old lines × new lines` product `diff` will build a table for.
    #[serde(default = "default_max_diff_cells")]
    pub max_diff_cells: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pro: false,
            color: ColorChoice::default(),
            markdown_flavor: MarkdownFlavor::default(),
            default_harmony: Harmony::default(),
            max_diff_cells: DEFAULT_MAX_DIFF_CELLS,
        }
    }
}

impl Settings {
    /// Read once at startup; everything downstream receives this value.
    pub fn capabilities(&self) -> Capabilities {
        if self.pro {
            Capabilities::pro()
        } else {
            Capabilities::free()
        }
    }
}

pub fn settings_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(SETTINGS_ENV).filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }
    let config_dir = dirs::config_dir()?;
    Some(config_dir.join("doohickey").join("settings.json"))
}

/// Missing file means defaults. A file that does not parse also means
/// defaults, with a warning.
pub fn load_settings_from(path: &Path) -> Settings {
    match std::fs::read_to_string(path) {
        Ok(data) => match serde_json::from_str(&data) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Failed to parse {}: {}", path.display(), e);
                Settings::default()
            }
        },
        Err(_) => Settings::default(),
    }
}

pub fn load_settings() -> Settings {
    match settings_path() {
        Some(path) => load_settings_from(&path),
        None => {
            log::debug!("no config dir, using default settings");
            Settings::default()
        }
    }
}

pub fn save_settings_to(settings: &Settings, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(settings).context("Failed to serialize settings")?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    log::debug!("saved settings to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings_from(&dir.path().join("nope.json"));
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.capabilities(), Capabilities::free());
    }

    #[test]
    fn malformed_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ pro: yes").unwrap();
        assert_eq!(load_settings_from(&path), Settings::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "pro": true }"#).unwrap();
        let settings = load_settings_from(&path);
        assert!(settings.pro);
        assert_eq!(settings.color, ColorChoice::Auto);
        assert_eq!(settings.max_diff_cells, DEFAULT_MAX_DIFF_CELLS);
        assert_eq!(settings.capabilities(), Capabilities::pro());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = Settings {
            pro: true,
            color: ColorChoice::Never,
            markdown_flavor: MarkdownFlavor::CommonMark,
            default_harmony: Harmony::Triadic,
            max_diff_cells: 1_000,
        };
        save_settings_to(&settings, &path).unwrap();
        assert_eq!(load_settings_from(&path), settings);

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains(r#""color": "never""#), "{raw}");
        assert!(raw.contains(r#""default_harmony": "triadic""#), "{raw}");
    }
}
