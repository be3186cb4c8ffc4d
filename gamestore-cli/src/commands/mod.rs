pub(crate) mod config;
pub(crate) mod counters;
pub(crate) mod games;
pub(crate) mod migrate;
pub(crate) mod references;

use std::path::PathBuf;

use gamestore_federation::{Federation, PrimaryStore};
use gamestore_legacy::{MemoryDocumentStore, load_snapshot, save_snapshot};

use crate::error::CliError;
use crate::settings::StoragePaths;

/// Both stores opened for one command.
pub(crate) struct Session {
    pub federation: Federation<MemoryDocumentStore>,
    snapshot_path: PathBuf,
}

impl Session {
    pub(crate) fn open(paths: &StoragePaths) -> Result<Self, CliError> {
        if let Some(parent) = paths.primary_db.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let primary = PrimaryStore::open(&paths.primary_db)?;
        let snapshot = load_snapshot(&paths.legacy_snapshot)?;
        log::debug!(
            "Opened {} ({} legacy products in {})",
            paths.primary_db.display(),
            snapshot.products.len(),
            paths.legacy_snapshot.display()
        );
        Ok(Self {
            federation: Federation::new(primary, MemoryDocumentStore::from_snapshot(snapshot)),
            snapshot_path: paths.legacy_snapshot.clone(),
        })
    }

    /// Write the legacy documents and change log back to the snapshot.
    pub(crate) async fn save_legacy(&self) -> Result<(), CliError> {
        let snapshot = self.federation.legacy().snapshot().await;
        save_snapshot(&self.snapshot_path, &snapshot)?;
        log::debug!("Saved legacy snapshot to {}", self.snapshot_path.display());
        Ok(())
    }
}

/// Truncate a string to `max` characters, appending "..." if truncated.
pub(crate) fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}
