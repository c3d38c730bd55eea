use std::fs;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::config::Config;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThemeColors {
    pub bg: String,
    pub fg: String,
    pub border: String,
    pub title: String,
    pub bar_filled: String,
    pub bar_empty: String,
    pub prompt: String,
    pub status: String,
}

impl Theme {
    /// Look up `<config_dir>/goal-tracker/themes/<name>.toml`.
    pub fn load(name: &str) -> Option<Self> {
        let path = Config::config_dir()
            .join("themes")
            .join(format!("{name}.toml"));
        let content = fs::read_to_string(&path).ok()?;
        match toml::from_str::<Theme>(&content) {
            Ok(theme) => Some(theme),
            Err(e) => {
                log::warn!("Ignoring theme {}: {e}", path.display());
                None
            }
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            colors: ThemeColors::default(),
        }
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        // "reset" leaves the terminal palette alone.
        Self {
            bg: "reset".to_string(),
            fg: "reset".to_string(),
            border: "reset".to_string(),
            title: "reset".to_string(),
            bar_filled: "reset".to_string(),
            bar_empty: "reset".to_string(),
            prompt: "reset".to_string(),
            status: "#f9e2af".to_string(),
        }
    }
}

impl ThemeColors {
    pub fn parse_color(value: &str) -> Color {
        let hex = value.trim_start_matches('#');
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Color::Rgb(r, g, b);
            }
        }
        value.parse().unwrap_or(Color::Reset)
    }

    pub fn bg(&self) -> Color { Self::parse_color(&self.bg) }
    pub fn fg(&self) -> Color { Self::parse_color(&self.fg) }
    pub fn border(&self) -> Color { Self::parse_color(&self.border) }
    pub fn title(&self) -> Color { Self::parse_color(&self.title) }
    pub fn bar_filled(&self) -> Color { Self::parse_color(&self.bar_filled) }
    pub fn bar_empty(&self) -> Color { Self::parse_color(&self.bar_empty) }
    pub fn prompt(&self) -> Color { Self::parse_color(&self.prompt) }
    pub fn status(&self) -> Color { Self::parse_color(&self.status) }
}
