use derive_more::{AsRef, Deref, Display, From};
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Filter category attached to a technology card. Matched case-sensitively
/// against the active filter, except for the `All` filter which matches
/// every card.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Deref, AsRef,
)]
#[serde(transparent)]
pub struct Category(String);

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Project {
    pub title: String,
    pub summary: String,
    /// Projects with two or more images get a circular autoplaying gallery;
    /// zero or one image means a static display.
    #[serde(default)]
    pub images: Vec<PathBuf>,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Skill {
    pub name: String,
    /// Animated width target, 0..=100. Values above 100 are clamped at use.
    pub level: u8,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Technology {
    pub name: String,
    pub category: Category,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub about: String,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub technologies: Vec<Technology>,
}

impl Config {
    /// Unique technology categories in declaration order, for the filter row.
    pub fn categories(&self) -> Vec<Category> {
        let mut seen = Vec::new();
        for tech in &self.technologies {
            if !seen.contains(&tech.category) {
                seen.push(tech.category.clone());
            }
        }
        seen
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "atelier", "vitrine").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("portfolio.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("VITRINE"))
        .build()?;

    Ok(s.try_deserialize()?)
}

fn embedded_content() -> Config {
    config::Config::builder()
        .add_source(config::File::from_str(
            DEFAULT_CONFIG,
            config::FileFormat::Toml,
        ))
        .build()
        .and_then(|s| s.try_deserialize())
        .unwrap_or_else(|e| {
            log::error!("Embedded default content failed to parse: {}", e);
            Config::default()
        })
}

/// Loads the portfolio content, falling back to the embedded sample content
/// when no config file exists yet or it fails to parse. On first run the
/// sample content is also written out so there is a file to edit and watch.
pub fn load_or_setup() -> Config {
    if let Ok(path) = get_config_path()
        && !path.exists()
    {
        match write_default_config() {
            Ok(written) => log::info!("Wrote sample portfolio content to {:?}", written),
            Err(e) => log::warn!("Could not write sample portfolio content: {}", e),
        }
        return embedded_content();
    }

    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load portfolio config: {}", e);
            embedded_content()
        }
    }
}

pub fn write_default_config() -> std::io::Result<std::path::PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::AppEvent;
use async_channel::Sender;

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ContentReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_content_parses() {
        let content = embedded_content();
        assert!(!content.projects.is_empty());
        assert!(!content.technologies.is_empty());
        assert!(content.skills.iter().all(|s| s.level <= 100));
    }

    #[test]
    fn test_categories_unique_in_order() {
        let content = Config {
            technologies: vec![
                Technology {
                    name: "GTK4".into(),
                    category: "frontend".into(),
                },
                Technology {
                    name: "Axum".into(),
                    category: "backend".into(),
                },
                Technology {
                    name: "Relm4".into(),
                    category: "frontend".into(),
                },
            ],
            ..Config::default()
        };
        let cats: Vec<String> = content
            .categories()
            .into_iter()
            .map(|c| c.to_string())
            .collect();
        assert_eq!(cats, vec!["frontend", "backend"]);
    }

    #[test]
    fn test_category_deserialization() {
        let cat: Category = serde_json::from_str("\"backend\"").unwrap();
        assert_eq!(cat, Category::from("backend"));
    }
}
