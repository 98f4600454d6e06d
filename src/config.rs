use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::KeyCode;
use serde::Deserialize;

use crate::timeline::duration::DisplayUnit;
use crate::timeline::layout::LayoutOptions;
use crate::timeline::scale::OverflowPolicy;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub timeline: TimelineConfig,
    pub keybinds: KeybindsConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub display_unit: String,
    pub show_charts: bool,
    pub theme: String,
    pub tick_rate_ms: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            display_unit: "mins".to_string(),
            show_charts: true,
            theme: "dark".to_string(),
            tick_rate_ms: 100,
        }
    }
}

impl GeneralConfig {
    pub fn display_unit(&self) -> DisplayUnit {
        DisplayUnit::from_str_config(&self.display_unit)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(1))
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    pub debounce_ms: u64,
    pub scroll_cooldown_ms: u64,
    pub zoom_step: f64,
    pub default_zoom: f64,
    pub overflow_policy: String,
    pub label_min_width_pct: f64,
    pub scroll_step_cols: u16,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        TimelineConfig {
            debounce_ms: 400,
            scroll_cooldown_ms: 10,
            zoom_step: 0.1,
            default_zoom: 1.0,
            overflow_policy: "strict".to_string(),
            label_min_width_pct: 5.0,
            scroll_step_cols: 4,
        }
    }
}

impl TimelineConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn scroll_cooldown(&self) -> Duration {
        Duration::from_millis(self.scroll_cooldown_ms)
    }

    pub fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            overflow_policy: OverflowPolicy::from_str_config(&self.overflow_policy),
            label_min_width_pct: self.label_min_width_pct,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct KeybindsConfig {
    pub quit: String,
    pub zoom_in: String,
    pub zoom_out: String,
    pub zoom_reset: String,
    pub cycle_unit: String,
    pub toggle_charts: String,
    pub cycle_theme: String,
    pub reload: String,
    pub help: String,
    pub next_module: String,
    pub prev_module: String,
}

impl Default for KeybindsConfig {
    fn default() -> Self {
        KeybindsConfig {
            quit: "q".to_string(),
            zoom_in: "+".to_string(),
            zoom_out: "-".to_string(),
            zoom_reset: "0".to_string(),
            cycle_unit: "u".to_string(),
            toggle_charts: "c".to_string(),
            cycle_theme: "t".to_string(),
            reload: "r".to_string(),
            help: "?".to_string(),
            next_module: "Tab".to_string(),
            prev_module: "BackTab".to_string(),
        }
    }
}

/// Parses a keybind string: a single character or a named key.
pub fn parse_key(s: &str) -> Option<KeyCode> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::Char(c));
    }
    match s.to_lowercase().as_str() {
        "tab" => Some(KeyCode::Tab),
        "backtab" | "shift+tab" => Some(KeyCode::BackTab),
        "enter" | "return" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "space" => Some(KeyCode::Char(' ')),
        "backspace" => Some(KeyCode::Backspace),
        "delete" | "del" => Some(KeyCode::Delete),
        "home" => Some(KeyCode::Home),
        "end" => Some(KeyCode::End),
        _ => None,
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("planline").join("config.toml"))
}

pub fn load_config() -> Config {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => Config::default(),
    }
}

pub fn load_config_from_path(path: &Path) -> Config {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_default(),
        Err(_) => Config::default(),
    }
}
