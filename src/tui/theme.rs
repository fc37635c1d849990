use std::collections::HashMap;

use ratatui::style::Color;

use crate::model::{Status, UiConfig};

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub selection_bg: Color,
    pub search_match_bg: Color,
    pub search_match_fg: Color,
    /// Colors keyed by status style tag
    pub status_colors: HashMap<String, Color>,
}

impl Default for Theme {
    fn default() -> Self {
        let mut status_colors = HashMap::new();
        status_colors.insert("muted".into(), Color::Rgb(0x7D, 0x78, 0xBF));
        status_colors.insert("accent".into(), Color::Rgb(0x44, 0x88, 0xFF));
        status_colors.insert("green".into(), Color::Rgb(0x44, 0xFF, 0x88));
        status_colors.insert("amber".into(), Color::Rgb(0xFF, 0xD7, 0x00));
        status_colors.insert("purple".into(), Color::Rgb(0xCC, 0x66, 0xFF));

        Theme {
            background: Color::Rgb(0x0C, 0x00, 0x1B),
            text: Color::Rgb(0xB0, 0xAA, 0xFF),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0xFB, 0x41, 0x96),
            dim: Color::Rgb(0x7D, 0x78, 0xBF),
            selection_bg: Color::Rgb(0x3D, 0x14, 0x38),
            search_match_bg: Color::Rgb(0x40, 0xE0, 0xD0),
            search_match_fg: Color::Rgb(0x0C, 0x00, 0x1B),
            status_colors,
        }
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

impl Theme {
    /// Create a theme from workspace UI config, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        // Apply color overrides from [ui.colors]
        for (key, value) in &ui.colors {
            if let Some(color) = parse_hex_color(value) {
                match key.as_str() {
                    "background" => theme.background = color,
                    "text" => theme.text = color,
                    "text_bright" => theme.text_bright = color,
                    "highlight" => theme.highlight = color,
                    "dim" => theme.dim = color,
                    "selection_bg" => theme.selection_bg = color,
                    "search_match_bg" => theme.search_match_bg = color,
                    "search_match_fg" => theme.search_match_fg = color,
                    _ => {}
                }
            }
        }

        // Apply status color overrides from [ui.status_colors]
        for (tag, value) in &ui.status_colors {
            if let Some(color) = parse_hex_color(value) {
                theme.status_colors.insert(tag.clone(), color);
            }
        }

        theme
    }

    /// Get the color for a status, falling back to text color
    pub fn status_color(&self, status: Status) -> Color {
        self.status_colors
            .get(status.display().style_tag)
            .copied()
            .unwrap_or(self.text)
    }
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
        assert_eq!(parse_hex_color("#ZZZZZZ"), None); // invalid hex
    }

    #[test]
    fn test_every_status_has_a_color() {
        let theme = Theme::default();
        for status in Status::ALL {
            assert_ne!(theme.status_color(status), theme.text, "{:?}", status);
        }
    }

    #[test]
    fn test_from_config_overrides() {
        let mut ui = UiConfig::default();
        ui.colors.insert("background".into(), "#000000".into());
        ui.status_colors.insert("accent".into(), "#112233".into());

        let theme = Theme::from_config(&ui);
        assert_eq!(theme.background, Color::Rgb(0, 0, 0));
        assert_eq!(
            theme.status_color(Status::InProgress),
            Color::Rgb(0x11, 0x22, 0x33)
        );
        // Unchanged defaults still present
        assert_eq!(theme.text, Color::Rgb(0xB0, 0xAA, 0xFF));
    }
}
