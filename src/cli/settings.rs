use super::ui;
use crate::core::settings::{Language, Settings, Theme};
use anyhow::Result;
use comfy_table::Cell;
use std::path::Path;

pub fn display_as_table(settings: &Settings) -> String {
    let effective = settings.effective();
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Setting"),
        ui::header_cell("Value"),
        ui::header_cell("Effective"),
    ]);
    table.add_row(vec![
        Cell::new("theme"),
        Cell::new(settings.theme),
        Cell::new(effective.theme),
    ]);
    table.add_row(vec![
        Cell::new("language"),
        Cell::new(settings.language),
        Cell::new(effective.language),
    ]);
    table.to_string()
}

pub fn show(path: &Path) {
    let settings = Settings::load_from(path);
    println!("{}", display_as_table(&settings));
}

/// Updates the given fields, keeping the stored value for the rest.
pub fn set(path: &Path, theme: Option<Theme>, language: Option<Language>) -> Result<Settings> {
    let mut settings = Settings::load_from(path);
    if let Some(theme) = theme {
        settings.theme = theme;
    }
    if let Some(language) = language {
        settings.language = language;
    }
    settings.save_to(path)?;

    tracing::info!("Saved settings to {}", path.display());
    println!("{}", display_as_table(&settings));
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_display_shows_effective_values() {
        let settings = Settings {
            theme: Theme::Auto,
            language: Language::En,
        };

        let output = console::strip_ansi_codes(&display_as_table(&settings)).to_string();
        let theme_row = output.lines().find(|l| l.contains("theme")).unwrap();
        assert!(theme_row.contains("auto"));
        assert!(theme_row.contains("dark"));
        let language_row = output.lines().find(|l| l.contains("language")).unwrap();
        assert_eq!(language_row.matches("en").count(), 2);
    }

    #[test]
    fn test_set_updates_only_given_fields() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("settings.json");

        let settings = set(&path, None, Some(Language::En))?;
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.language, Language::En);

        let settings = set(&path, Some(Theme::Light), None)?;
        assert_eq!(settings.theme, Theme::Light);
        assert_eq!(settings.language, Language::En);

        assert_eq!(Settings::load_from(&path), settings);
        Ok(())
    }
}
