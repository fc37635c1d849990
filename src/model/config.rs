use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from klyra.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    pub workspace: WorkspaceInfo,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceInfo {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiConfig {
    #[serde(default)]
    pub show_key_hints: bool,
    /// Hex color overrides for the theme, e.g. background = "#0C001B"
    #[serde(default)]
    pub colors: HashMap<String, String>,
    /// Hex color overrides per status style tag, e.g. accent = "#4488FF"
    #[serde(default)]
    pub status_colors: HashMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_parses() {
        let config: WorkspaceConfig = toml::from_str("[workspace]\nname = \"acme\"\n").unwrap();
        assert_eq!(config.workspace.name, "acme");
        assert!(config.ui.colors.is_empty());
    }

    #[test]
    fn test_ui_overrides_parse() {
        let config: WorkspaceConfig = toml::from_str(
            r##"
[workspace]
name = "acme"

[ui]
show_key_hints = true

[ui.colors]
background = "#000000"

[ui.status_colors]
accent = "#4488FF"
"##,
        )
        .unwrap();
        assert!(config.ui.show_key_hints);
        assert_eq!(config.ui.colors.get("background").unwrap(), "#000000");
        assert_eq!(config.ui.status_colors.get("accent").unwrap(), "#4488FF");
    }
}
