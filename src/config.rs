use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::i18n::Lang;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Light
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

/// Persisted UI preferences: language and theme, plus an optional api url
/// override. Read once at startup, written on explicit change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub lang: Lang,
    pub theme: Theme,
    pub api_url: Option<String>,
}

impl Preferences {
    fn default_path() -> PathBuf {
        // XDG config directory or fallback
        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "cegcheck") {
            proj_dirs.config_dir().join("preferences.json")
        } else {
            PathBuf::from("cegcheck-preferences.json")
        }
    }

    /// Loads the preference file, defaulting everything when it does not
    /// exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read preferences: {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Malformed preferences file: {}", path.display()))
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::default_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, raw)
            .with_context(|| format!("Failed to write preferences: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let prefs = Preferences::default();
        assert_eq!(prefs.lang, Lang::Hu);
        assert_eq!(prefs.theme, Theme::Light);
        assert!(prefs.api_url.is_none());
    }

    #[test]
    fn test_serde_round_trip() {
        let prefs = Preferences {
            lang: Lang::En,
            theme: Theme::Dark,
            api_url: Some("http://localhost:8000".to_string()),
        };
        let json = serde_json::to_string(&prefs).unwrap();
        let back: Preferences = serde_json::from_str(&json).unwrap();
        assert_eq!(back.lang, Lang::En);
        assert_eq!(back.theme, Theme::Dark);
        assert_eq!(back.api_url.as_deref(), Some("http://localhost:8000"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let prefs: Preferences = serde_json::from_str(r#"{"lang": "en"}"#).unwrap();
        assert_eq!(prefs.lang, Lang::En);
        assert_eq!(prefs.theme, Theme::Light);
    }
}
