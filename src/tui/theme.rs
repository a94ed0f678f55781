use ratatui::style::Color;

use crate::model::{
    NotificationLevel, Priority, StockStatus, TaskStatus, TaskTag, ThemeMode, UiConfig,
};
use crate::ops::analytics::Health;

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub mode: ThemeMode,
    pub background: Color,
    pub surface: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub red: Color,
    pub yellow: Color,
    pub green: Color,
    pub cyan: Color,
    pub purple: Color,
    pub blue: Color,
    pub selection_bg: Color,
    pub selection_border: Color,
    pub search_match_bg: Color,
    pub search_match_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Theme {
            mode: ThemeMode::Dark,
            background: Color::Rgb(0x0C, 0x00, 0x1B),
            surface: Color::Rgb(0x1A, 0x0E, 0x2E),
            text: Color::Rgb(0xB0, 0xAA, 0xFF),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0xFB, 0x41, 0x96),
            dim: Color::Rgb(0x7D, 0x78, 0xBF),
            red: Color::Rgb(0xFF, 0x44, 0x44),
            yellow: Color::Rgb(0xFF, 0xD7, 0x00),
            green: Color::Rgb(0x44, 0xFF, 0x88),
            cyan: Color::Rgb(0x44, 0xDD, 0xFF),
            purple: Color::Rgb(0xCC, 0x66, 0xFF),
            blue: Color::Rgb(0x44, 0x88, 0xFF),
            selection_bg: Color::Rgb(0x3D, 0x14, 0x38),
            selection_border: Color::Rgb(0xFB, 0x41, 0x96),
            search_match_bg: Color::Rgb(0x40, 0xE0, 0xD0),
            search_match_fg: Color::Rgb(0x0C, 0x00, 0x1B),
        }
    }

    pub fn light() -> Self {
        Theme {
            mode: ThemeMode::Light,
            background: Color::Rgb(0xF8, 0xF9, 0xFC),
            surface: Color::Rgb(0xEC, 0xEE, 0xF5),
            text: Color::Rgb(0x37, 0x41, 0x51),
            text_bright: Color::Rgb(0x11, 0x18, 0x27),
            highlight: Color::Rgb(0x4F, 0x46, 0xE5),
            dim: Color::Rgb(0x9C, 0xA3, 0xAF),
            red: Color::Rgb(0xDC, 0x26, 0x26),
            yellow: Color::Rgb(0xB4, 0x53, 0x09),
            green: Color::Rgb(0x05, 0x96, 0x69),
            cyan: Color::Rgb(0x08, 0x91, 0xB2),
            purple: Color::Rgb(0x7C, 0x3A, 0xED),
            blue: Color::Rgb(0x25, 0x63, 0xEB),
            selection_bg: Color::Rgb(0xE0, 0xE7, 0xFF),
            selection_border: Color::Rgb(0x4F, 0x46, 0xE5),
            search_match_bg: Color::Rgb(0xFD, 0xE6, 0x8A),
            search_match_fg: Color::Rgb(0x11, 0x18, 0x27),
        }
    }

    /// Palette for a mode with the `[ui.colors]` overrides applied on top
    pub fn from_config(mode: ThemeMode, ui: &UiConfig) -> Self {
        let mut theme = match mode {
            ThemeMode::Dark => Theme::dark(),
            ThemeMode::Light => Theme::light(),
        };

        for (key, value) in &ui.colors {
            if let Some(color) = parse_hex_color(value) {
                match key.as_str() {
                    "background" => theme.background = color,
                    "surface" => theme.surface = color,
                    "text" => theme.text = color,
                    "text_bright" => theme.text_bright = color,
                    "highlight" => theme.highlight = color,
                    "dim" => theme.dim = color,
                    "red" => theme.red = color,
                    "yellow" => theme.yellow = color,
                    "green" => theme.green = color,
                    "cyan" => theme.cyan = color,
                    "purple" => theme.purple = color,
                    "blue" => theme.blue = color,
                    "selection_bg" => theme.selection_bg = color,
                    "selection_border" => theme.selection_border = color,
                    "search_match_bg" => theme.search_match_bg = color,
                    "search_match_fg" => theme.search_match_fg = color,
                    _ => {}
                }
            }
        }

        theme
    }

    pub fn tag_color(&self, tag: TaskTag) -> Color {
        match tag {
            TaskTag::General => self.cyan,
            TaskTag::Admin => self.purple,
            TaskTag::Sales => self.green,
        }
    }

    pub fn priority_color(&self, priority: Priority) -> Color {
        match priority {
            Priority::Low => self.dim,
            Priority::Medium => self.yellow,
            Priority::High => self.red,
        }
    }

    pub fn status_color(&self, status: TaskStatus) -> Color {
        match status {
            TaskStatus::Backlog => self.dim,
            TaskStatus::ToDo => self.text,
            TaskStatus::InProgress => self.highlight,
            TaskStatus::Review => self.yellow,
            TaskStatus::Done => self.green,
        }
    }

    pub fn level_color(&self, level: NotificationLevel) -> Color {
        match level {
            NotificationLevel::Success => self.green,
            NotificationLevel::Error => self.red,
            NotificationLevel::Warning => self.yellow,
            NotificationLevel::Info => self.blue,
        }
    }

    pub fn health_color(&self, health: Health) -> Color {
        match health {
            Health::Good => self.green,
            Health::Warning => self.yellow,
            Health::Danger => self.red,
        }
    }

    pub fn stock_color(&self, status: StockStatus) -> Color {
        match status {
            StockStatus::Optimal => self.green,
            StockStatus::Low => self.cyan,
            StockStatus::Warning => self.yellow,
            StockStatus::Critical => self.red,
        }
    }

    pub fn change_color(&self, change: f64) -> Color {
        if change >= 0.0 { self.green } else { self.red }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(
            parse_hex_color("#FF4444"),
            Some(Color::Rgb(0xFF, 0x44, 0x44))
        );
        assert_eq!(parse_hex_color("FF4444"), None); // missing #
        assert_eq!(parse_hex_color("#FF44"), None); // too short
        assert_eq!(parse_hex_color("#ZZZZZZ"), None);
    }

    #[test]
    fn test_from_config_overrides() {
        let mut ui = UiConfig::default();
        ui.colors.insert("highlight".into(), "#112233".into());
        ui.colors.insert("nonsense".into(), "#000000".into());

        let theme = Theme::from_config(ThemeMode::Dark, &ui);
        assert_eq!(theme.highlight, Color::Rgb(0x11, 0x22, 0x33));
        assert_eq!(theme.background, Theme::dark().background);
    }

    #[test]
    fn test_light_mode_palette() {
        let theme = Theme::from_config(ThemeMode::Light, &UiConfig::default());
        assert_eq!(theme.mode, ThemeMode::Light);
        assert_eq!(theme.background, Theme::light().background);
        assert_ne!(theme.background, Theme::dark().background);
    }

    #[test]
    fn test_semantic_colors() {
        let theme = Theme::dark();
        assert_eq!(theme.priority_color(Priority::High), theme.red);
        assert_eq!(theme.status_color(TaskStatus::Done), theme.green);
        assert_eq!(theme.stock_color(StockStatus::Critical), theme.red);
        assert_eq!(theme.change_color(-0.2), theme.red);
    }
}
