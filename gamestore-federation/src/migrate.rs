//! Lazy migration of legacy games into the primary store.
//!
//! Each step commits on its own. An interrupted migration can leave a game
//! without its publisher or without its shadow row; running the migration
//! again is always safe.

use std::collections::HashSet;

use gamestore_catalog::{Game, Genre};
use gamestore_db::queries;
use gamestore_legacy::LegacyProduct;
use uuid::Uuid;

use crate::error::FederationError;
use crate::primary::PrimaryStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// A primary row already holds the key or id; nothing was written.
    AlreadyPresent,
    /// The game was inserted. `shadowed` is set when a soft-deleted row
    /// was also written under the original legacy key.
    Migrated { shadowed: bool },
}

/// Totals from a full sweep over the legacy catalog.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MigrationStats {
    pub examined: usize,
    pub migrated: usize,
    pub already_present: usize,
    pub shadows_written: usize,
    pub failed: usize,
}

impl MigrationStats {
    pub fn record(&mut self, outcome: MigrationOutcome) {
        self.examined += 1;
        match outcome {
            MigrationOutcome::AlreadyPresent => self.already_present += 1,
            MigrationOutcome::Migrated { shadowed } => {
                self.migrated += 1;
                if shadowed {
                    self.shadows_written += 1;
                }
            }
        }
    }

    pub fn record_failure(&mut self) {
        self.examined += 1;
        self.failed += 1;
    }
}

pub struct LazyMigrator<'a> {
    primary: &'a PrimaryStore,
}

impl<'a> LazyMigrator<'a> {
    pub fn new(primary: &'a PrimaryStore) -> Self {
        Self { primary }
    }

    /// Copy `translated` (with its genres and publisher) into the primary
    /// store. `original` is the legacy product it was translated from.
    pub async fn migrate_game(
        &self,
        translated: &Game,
        original: &LegacyProduct,
    ) -> Result<MigrationOutcome, FederationError> {
        // 1. Idempotence.
        if self.game_exists(&translated.key, translated.id).await? {
            log::debug!("Game '{}' already in primary store, skipping", translated.key);
            return Ok(MigrationOutcome::AlreadyPresent);
        }

        // 2. Genres, as one batch. A legacy category whose name a primary
        // genre already owns is linked to that genre instead.
        let mut game = translated.clone();
        let mut missing: Vec<Genre> = Vec::new();
        for genre in &mut game.genres {
            let id = genre.id;
            if self.primary.with_conn(|c| queries::find_genre_by_id(c, id)).await?.is_some() {
                continue;
            }
            let name = genre.name.clone();
            match self
                .primary
                .with_conn(|c| queries::find_genre_by_name(c, &name))
                .await?
            {
                Some(existing) => {
                    log::debug!(
                        "Linking '{}' to existing genre '{}' ({})",
                        translated.key,
                        existing.name,
                        existing.id
                    );
                    *genre = existing;
                }
                None => missing.push(genre.clone()),
            }
        }
        if !missing.is_empty() {
            log::debug!("Migrating {} genres for '{}'", missing.len(), translated.key);
            if let Err(e) = self
                .primary
                .with_conn(|c| gamestore_db::insert_genres(c, &missing))
                .await
            {
                log::warn!("Failed to migrate genres for '{}': {}", translated.key, e);
                let dropped: Vec<Uuid> = missing.iter().map(|g| g.id).collect();
                game.genres.retain(|g| !dropped.contains(&g.id));
            }
        }
        let mut seen = HashSet::new();
        game.genres.retain(|g| seen.insert(g.id));

        // 3. Publisher; a failure here must not block the game.
        if let Some(publisher) = &translated.publisher {
            if !self.publisher_exists(publisher.id).await? {
                if let Err(e) = self
                    .primary
                    .with_conn(|c| gamestore_db::insert_publisher(c, publisher))
                    .await
                {
                    log::warn!(
                        "Failed to migrate publisher '{}' for '{}': {}",
                        publisher.company_name,
                        translated.key,
                        e
                    );
                }
                if !self.publisher_exists(publisher.id).await? {
                    game.publisher = None;
                }
            }
        }

        // 4. The game itself.
        self.primary
            .with_conn(|c| gamestore_db::insert_game(c, &game))
            .await?;
        log::info!("Migrated game '{}' to primary store", game.key);

        // 5. Shadow the original key if the game was re-keyed.
        let original_key = original.game_key.as_str();
        if original_key == game.key {
            return Ok(MigrationOutcome::Migrated { shadowed: false });
        }
        let taken = self
            .primary
            .with_conn(|c| queries::find_game_by_key(c, original_key))
            .await?
            .is_some();
        if taken {
            return Ok(MigrationOutcome::Migrated { shadowed: false });
        }
        let shadow = Game {
            id: Uuid::new_v4(),
            key: original_key.to_string(),
            is_deleted: true,
            genres: Vec::new(),
            platforms: Vec::new(),
            publisher: None,
            ..game
        };
        self.primary
            .with_conn(|c| gamestore_db::insert_game(c, &shadow))
            .await?;
        log::info!("Wrote shadow row for legacy key '{}'", original_key);
        Ok(MigrationOutcome::Migrated { shadowed: true })
    }

    async fn game_exists(&self, key: &str, id: Uuid) -> Result<bool, FederationError> {
        let by_key = self
            .primary
            .with_conn(|c| queries::find_game_by_key(c, key))
            .await?;
        if by_key.is_some() {
            return Ok(true);
        }
        let by_id = self.primary.with_conn(|c| queries::find_game_by_id(c, id)).await?;
        Ok(by_id.is_some())
    }

    async fn publisher_exists(&self, id: Uuid) -> Result<bool, FederationError> {
        let found = self
            .primary
            .with_conn(|c| queries::find_publisher_by_id(c, id))
            .await?;
        Ok(found.is_some())
    }
}
