//! On-disk viewer configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::render::DiffLayout;
use crate::syntax::DEFAULT_THEME;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// syntect theme name.
    pub theme: String,
    pub layout: DiffLayout,
    /// Disable to strip ANSI colors from terminal output.
    pub color: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            layout: DiffLayout::Unified,
            color: true,
        }
    }
}

/// Loads the config file, falling back to defaults when it is missing
/// or malformed.
pub fn load_config() -> ViewConfig {
    let path = config_path();
    let Ok(contents) = std::fs::read_to_string(&path) else {
        return ViewConfig::default();
    };
    toml::from_str(&contents).unwrap_or_default()
}

pub fn save_config(config: &ViewConfig) -> std::io::Result<()> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let contents = toml::to_string_pretty(config).unwrap_or_default();
    std::fs::write(path, contents)
}

fn config_path() -> PathBuf {
    if let Ok(path) = std::env::var("DIFFVIEW_CONFIG_PATH") {
        return PathBuf::from(path);
    }

    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("diffview")
        .join("config.toml")
}
