//! YAML persistence for the in-memory document store.
//!
//! A snapshot is one YAML file holding every collection. A missing file is
//! an empty store.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::documents::*;
use crate::store::LegacyError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegacySnapshot {
    #[serde(default)]
    pub products: Vec<LegacyProduct>,
    #[serde(default)]
    pub categories: Vec<LegacyCategory>,
    #[serde(default)]
    pub suppliers: Vec<LegacySupplier>,
    #[serde(default)]
    pub orders: Vec<LegacyOrder>,
    #[serde(default)]
    pub logs: Vec<ChangeLogEntry>,
}

pub fn load_snapshot(path: &Path) -> Result<LegacySnapshot, LegacyError> {
    if !path.exists() {
        log::debug!("No legacy snapshot at {}, starting empty", path.display());
        return Ok(LegacySnapshot::default());
    }
    let contents = std::fs::read_to_string(path).map_err(|e| LegacyError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let snapshot: LegacySnapshot =
        serde_yml::from_str(&contents).map_err(|e| LegacyError::Yaml {
            path: path.display().to_string(),
            source: e,
        })?;
    log::debug!(
        "Loaded legacy snapshot: {} products, {} categories, {} suppliers, {} orders",
        snapshot.products.len(),
        snapshot.categories.len(),
        snapshot.suppliers.len(),
        snapshot.orders.len(),
    );
    Ok(snapshot)
}

/// Write the snapshot atomically: serialize to a sibling temp file, then rename.
pub fn save_snapshot(path: &Path, snapshot: &LegacySnapshot) -> Result<(), LegacyError> {
    let io_err = |e: std::io::Error| LegacyError::Io {
        path: path.display().to_string(),
        source: e,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
    }

    let yaml = serde_yml::to_string(snapshot).map_err(|e| LegacyError::Yaml {
        path: path.display().to_string(),
        source: e,
    })?;

    let tmp = path.with_extension("yaml.tmp");
    std::fs::write(&tmp, yaml).map_err(io_err)?;
    std::fs::rename(&tmp, path).map_err(io_err)?;
    Ok(())
}
