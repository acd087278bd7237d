//! Rendering settings loaded from YAML files
//!
//! Every key is optional; missing keys fall back to [`Settings::default`].
//!
//! ```yaml
//! prefix_symbol_1: "└"
//! prefix_symbol_2: "─"
//! separate_param: false
//! locale: en
//! template: ./templates/api.md.tera
//! ```

use crate::{DocError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Table label language
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Zh,
}

/// Settings shared by the tree builder and the renderers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Marker placed before every nested row name
    pub prefix_symbol_1: String,
    /// Marker repeated once per nesting level
    pub prefix_symbol_2: String,
    /// Render one Markdown table per object instead of one indented table
    pub separate_param: bool,
    pub locale: Locale,
    /// Custom document template, replacing the built-in one
    pub template: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            prefix_symbol_1: "└".to_string(),
            prefix_symbol_2: "─".to_string(),
            separate_param: false,
            locale: Locale::En,
            template: None,
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            DocError::Config(format!("Failed to read settings file {:?}: {}", path, e))
        })?;

        Self::from_yaml(&content).map_err(|e| {
            DocError::Config(format!("Failed to parse settings from {:?}: {}", path, e))
        })
    }

    /// Parse settings from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let settings = Settings::from_yaml("separate_param: true\nlocale: zh\n").unwrap();
        assert!(settings.separate_param);
        assert_eq!(settings.locale, Locale::Zh);
        assert_eq!(settings.prefix_symbol_1, "└");
        assert_eq!(settings.prefix_symbol_2, "─");
    }

    #[test]
    fn test_empty_yaml() {
        assert_eq!(Settings::from_yaml("  \n").unwrap(), Settings::default());
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(Settings::from_yaml("locale: [fr").is_err());
        assert!(Settings::from_yaml("locale: fr").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "prefix_symbol_1: \"|-\"").unwrap();
        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.prefix_symbol_1, "|-");

        let missing = Settings::load(Path::new("/nonexistent/settings.yaml"));
        assert!(matches!(missing, Err(DocError::Config(_))));
    }
}
