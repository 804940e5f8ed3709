//! User interface preferences persisted as JSON.

use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ru,
    En,
    Auto,
}

/// Theme used when the stored value is [`Theme::Auto`].
pub const SYSTEM_THEME: Theme = Theme::Dark;

/// Language used when the stored value is [`Language::Auto`].
pub const SYSTEM_LANGUAGE: Language = Language::Ru;

impl Theme {
    /// Concrete theme, with `auto` replaced by [`SYSTEM_THEME`].
    pub fn resolved(self) -> Theme {
        match self {
            Theme::Auto => SYSTEM_THEME,
            other => other,
        }
    }
}

impl Language {
    /// Concrete language, with `auto` replaced by [`SYSTEM_LANGUAGE`].
    pub fn resolved(self) -> Language {
        match self {
            Language::Auto => SYSTEM_LANGUAGE,
            other => other,
        }
    }
}

impl FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            "auto" => Ok(Theme::Auto),
            _ => Err(anyhow!("Invalid theme: {} (expected dark, light or auto)", s)),
        }
    }
}

impl FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ru" => Ok(Language::Ru),
            "en" => Ok(Language::En),
            "auto" => Ok(Language::Auto),
            _ => Err(anyhow!("Invalid language: {} (expected ru, en or auto)", s)),
        }
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Theme::Dark => "dark",
                Theme::Light => "light",
                Theme::Auto => "auto",
            }
        )
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Language::Ru => "ru",
                Language::En => "en",
                Language::Auto => "auto",
            }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: Theme,
    pub language: Language,
}

impl Settings {
    pub fn default_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "skyrate", "skyrate")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("settings.json"))
    }

    /// Settings as applied, never containing `auto`.
    pub fn effective(&self) -> Settings {
        Settings {
            theme: self.theme.resolved(),
            language: self.language.resolved(),
        }
    }

    /// Reads settings from `path`, falling back to defaults on any error.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) => {
                debug!("Using default settings, cannot read {}: {}", path.display(), e);
                return Self::default();
            }
        };

        serde_json::from_str(&data).unwrap_or_else(|e| {
            debug!("Using default settings, cannot parse {}: {}", path.display(), e);
            Self::default()
        })
    }

    /// Writes settings to `path`, creating the parent directory if needed.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let data = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        fs::write(path, data)
            .with_context(|| format!("Failed to write settings file: {}", path.display()))?;
        debug!("Saved settings to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.language, Language::Ru);
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings::load_from(temp_dir.path().join("missing.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_corrupt_file_returns_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("settings.json");
        fs::write(&path, "{ theme: ")?;

        assert_eq!(Settings::load_from(&path), Settings::default());

        fs::write(&path, r#"{"theme": "neon", "language": "en"}"#)?;
        assert_eq!(Settings::load_from(&path), Settings::default());
        Ok(())
    }

    #[test]
    fn test_load_partial_file_keeps_other_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("settings.json");
        fs::write(&path, r#"{"language": "en"}"#)?;

        let settings = Settings::load_from(&path);
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.language, Language::En);
        Ok(())
    }

    #[test]
    fn test_save_creates_directory_and_loads_back() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("nested").join("dir").join("settings.json");

        let settings = Settings {
            theme: Theme::Light,
            language: Language::En,
        };
        settings.save_to(&path)?;

        assert!(path.exists());
        let content = fs::read_to_string(&path)?;
        assert!(content.contains(r#""theme": "light""#));
        assert_eq!(Settings::load_from(&path), settings);
        Ok(())
    }

    #[test]
    fn test_effective_resolves_auto() {
        let settings = Settings {
            theme: Theme::Auto,
            language: Language::Auto,
        };
        assert_eq!(
            settings.effective(),
            Settings {
                theme: Theme::Dark,
                language: Language::Ru,
            }
        );

        let explicit = Settings {
            theme: Theme::Light,
            language: Language::En,
        };
        assert_eq!(explicit.effective(), explicit);
    }

    #[test]
    fn test_parse_theme_and_language() {
        assert_eq!("LIGHT".parse::<Theme>().unwrap(), Theme::Light);
        assert_eq!("auto".parse::<Language>().unwrap(), Language::Auto);
        assert!("blue".parse::<Theme>().is_err());
        assert!("de".parse::<Language>().is_err());
    }
}
