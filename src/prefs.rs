use crate::config::ConfigError;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use std::path::{Path, PathBuf};
use strum::{Display as StrumDisplay, EnumString};

/// The persisted color scheme. Stored as a single `theme` key whose value is
/// one of the two identifiers below; a missing or unreadable preference
/// defaults to the light variant.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
pub enum Theme {
    #[strum(to_string = "theme-dark", serialize = "dark")]
    Dark,
    #[default]
    #[strum(to_string = "theme-light", serialize = "light")]
    Light,
}

impl Theme {
    pub fn css_class(self) -> &'static str {
        match self {
            Theme::Dark => "theme-dark",
            Theme::Light => "theme-light",
        }
    }

    /// The class that must be absent while this theme is applied.
    pub fn opposite_class(self) -> &'static str {
        match self {
            Theme::Dark => "theme-light",
            Theme::Light => "theme-dark",
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    pub fn from_switch(active: bool) -> Self {
        if active { Theme::Dark } else { Theme::Light }
    }
}

pub fn prefs_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "atelier", "vitrine").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("prefs.toml"))
}

#[derive(Debug, Deserialize, Default)]
struct Prefs {
    #[serde(default)]
    theme: Theme,
}

fn load_theme_from(path: &Path) -> Theme {
    config::Config::builder()
        .add_source(config::File::from(path.to_path_buf()).required(false))
        .build()
        .and_then(|s| s.try_deserialize::<Prefs>())
        .map(|p| p.theme)
        .unwrap_or_else(|e| {
            log::warn!("Failed to read theme preference: {}", e);
            Theme::default()
        })
}

pub fn load_theme() -> Theme {
    match prefs_path() {
        Ok(path) => load_theme_from(&path),
        Err(e) => {
            log::warn!("No preference directory: {}", e);
            Theme::default()
        }
    }
}

fn save_theme_to(path: &Path, theme: Theme) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    fs_err::write(path, format!("theme = \"{theme}\"\n"))
}

/// Written on every toggle, not just at shutdown, so a crash never loses
/// the preference.
pub fn save_theme(theme: Theme) {
    match prefs_path() {
        Ok(path) => {
            if let Err(e) = save_theme_to(&path, theme) {
                log::error!("Failed to persist theme preference: {}", e);
            }
        }
        Err(e) => log::error!("No preference directory: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_deserialization() {
        let cases = vec![
            ("\"theme-dark\"", Theme::Dark),
            ("\"dark\"", Theme::Dark),
            ("\"DARK\"", Theme::Dark),
            ("\"theme-light\"", Theme::Light),
            ("\"light\"", Theme::Light),
        ];

        for (json, expected) in cases {
            let deserialized: Theme = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
    }

    #[test]
    fn test_theme_identifiers() {
        assert_eq!(Theme::Dark.to_string(), "theme-dark");
        assert_eq!(Theme::Light.to_string(), "theme-light");
        assert_eq!(Theme::Dark.css_class(), "theme-dark");
        assert_eq!(Theme::Dark.opposite_class(), "theme-light");
    }

    #[test]
    fn test_missing_pref_defaults_to_light() {
        let path = std::env::temp_dir().join("vitrine-test-prefs-missing.toml");
        let _ = fs_err::remove_file(&path);
        assert_eq!(load_theme_from(&path), Theme::Light);
    }

    #[test]
    fn test_persist_round_trip() {
        let path = std::env::temp_dir().join("vitrine-test-prefs-roundtrip.toml");
        save_theme_to(&path, Theme::Dark).unwrap();
        assert_eq!(load_theme_from(&path), Theme::Dark);
        save_theme_to(&path, Theme::Light).unwrap();
        assert_eq!(load_theme_from(&path), Theme::Light);
        let _ = fs_err::remove_file(&path);
    }

    #[test]
    fn test_switch_mapping() {
        assert_eq!(Theme::from_switch(true), Theme::Dark);
        assert_eq!(Theme::from_switch(false), Theme::Light);
        assert!(Theme::Dark.is_dark());
        assert!(!Theme::Light.is_dark());
    }
}
