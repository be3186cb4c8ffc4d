//! CLI settings (store locations, catalog defaults, permissions).
//!
//! The settings file is `~/.config/gamestore/settings.toml`. Command-line
//! flags win over saved settings, which win over built-in defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub(crate) struct Settings {
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub permissions: PermissionSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub(crate) struct StorageSettings {
    pub primary_db: Option<PathBuf>,
    pub legacy_snapshot: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub(crate) struct CatalogSettings {
    /// Page-size token used when a command does not pass one.
    pub default_page_size: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub(crate) struct PermissionSettings {
    #[serde(default)]
    pub show_deleted: bool,
}

/// Returns `~/.config/gamestore/settings.toml`.
pub(crate) fn settings_path() -> PathBuf {
    config_dir().join("settings.toml")
}

fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("gamestore")
}

fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("gamestore")
}

/// Load settings from disk, returning defaults if missing or corrupt.
pub(crate) fn load_settings() -> Settings {
    load_settings_from(&settings_path())
}

pub(crate) fn load_settings_from(path: &Path) -> Settings {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
            log::warn!("Failed to parse settings at {}: {}", path.display(), e);
            Settings::default()
        }),
        Err(_) => Settings::default(),
    }
}

/// Save settings to disk atomically (write to temp, then rename).
pub(crate) fn save_settings(settings: &Settings) -> std::io::Result<()> {
    save_settings_to(&settings_path(), settings)
}

pub(crate) fn save_settings_to(path: &Path, settings: &Settings) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let contents = toml::to_string_pretty(settings).map_err(std::io::Error::other)?;
    let tmp = path.with_extension("toml.tmp");
    std::fs::write(&tmp, contents)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

/// Resolved locations of both stores.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct StoragePaths {
    pub primary_db: PathBuf,
    pub legacy_snapshot: PathBuf,
}

impl StoragePaths {
    /// Resolve each path using a priority chain:
    ///
    /// 1. CLI override (if `Some`)
    /// 2. `[storage]` entry in `settings.toml`
    /// 3. The platform data directory
    pub(crate) fn resolve(
        db_override: Option<PathBuf>,
        legacy_override: Option<PathBuf>,
        settings: &Settings,
    ) -> Self {
        Self {
            primary_db: db_override
                .or_else(|| settings.storage.primary_db.clone())
                .unwrap_or_else(|| data_dir().join("catalog.db")),
            legacy_snapshot: legacy_override
                .or_else(|| settings.storage.legacy_snapshot.clone())
                .unwrap_or_else(|| data_dir().join("legacy.yaml")),
        }
    }
}

impl Settings {
    /// Page-size token: the flag if given, else the saved default.
    pub(crate) fn page_size(&self, flag: Option<String>) -> Option<String> {
        flag.or_else(|| self.catalog.default_page_size.clone())
    }

    /// A `--show-deleted` flag can only widen the saved permission.
    pub(crate) fn can_see_deleted(&self, flag: bool) -> bool {
        flag || self.permissions.show_deleted
    }
}
