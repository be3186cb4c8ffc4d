//! The federating game repository.
//!
//! Reads go to both stores and are reconciled. Writes go to the primary
//! store only; touching a legacy-only game through a write first migrates
//! it. View and stock counters of legacy-only games are mutated in place in
//! the legacy store and change-logged.

use std::sync::Arc;

use chrono::Utc;
use gamestore_catalog::{Comment, Game, GameFilter, GamePage, id_bridge};
use gamestore_db::queries;
use gamestore_legacy::{DocumentStore, LegacyProduct, ProductQuery, counters};
use uuid::Uuid;

use crate::counter::GameCounter;
use crate::error::FederationError;
use crate::migrate::{LazyMigrator, MigrationOutcome, MigrationStats};
use crate::pipeline::PipelineFactory;
use crate::primary::PrimaryStore;
use crate::reconcile;
use crate::repository::GameRepository;
use crate::resolver::CrossReferenceResolver;

pub struct FederatedGames<L> {
    primary: Arc<PrimaryStore>,
    legacy: Arc<L>,
    counter: GameCounter,
}

impl<L: DocumentStore> FederatedGames<L> {
    pub fn new(primary: Arc<PrimaryStore>, legacy: Arc<L>) -> Self {
        Self {
            primary,
            legacy,
            counter: GameCounter::new(),
        }
    }

    pub fn counter(&self) -> &GameCounter {
        &self.counter
    }

    pub async fn seed_counter(&self) -> Result<i64, FederationError> {
        self.counter.seed(&self.primary, self.legacy.as_ref()).await
    }

    fn resolver(&self) -> CrossReferenceResolver<'_, L> {
        CrossReferenceResolver::new(&self.primary, self.legacy.as_ref())
    }

    fn migrator(&self) -> LazyMigrator<'_> {
        LazyMigrator::new(&self.primary)
    }

    /// Primary rows sharing a key or id with any of `products`, deleted or not.
    async fn shadows_for(&self, products: &[LegacyProduct]) -> Result<Vec<Game>, FederationError> {
        let keys: Vec<String> = products.iter().map(|p| p.game_key.clone()).collect();
        let ids: Vec<Uuid> = products
            .iter()
            .map(|p| id_bridge::to_primary(p.product_id))
            .collect();
        self.primary
            .with_conn(|c| queries::find_games_by_keys_or_ids(c, &keys, &ids))
            .await
    }

    /// A legacy product by key, unless a primary row already owns that key
    /// (or the product's bridged id).
    async fn legacy_only_by_key(
        &self,
        key: &str,
    ) -> Result<Option<LegacyProduct>, FederationError> {
        let Some(product) = self.legacy.product_by_key(key).await? else {
            return Ok(None);
        };
        let shadows = self.shadows_for(std::slice::from_ref(&product)).await?;
        Ok(shadows.is_empty().then_some(product))
    }

    /// Migrate a legacy-only game and return its primary id.
    async fn migrate_product(
        &self,
        translated: &Game,
        product: &LegacyProduct,
    ) -> Result<Uuid, FederationError> {
        match self.migrator().migrate_game(translated, product).await? {
            MigrationOutcome::Migrated { .. } => Ok(translated.id),
            MigrationOutcome::AlreadyPresent => {
                Err(FederationError::DuplicateKey(translated.key.clone()))
            }
        }
    }

    // ── Explicit migration ──────────────────────────────────────────────────

    /// Migrate the legacy game stored under `key`.
    pub async fn migrate(&self, key: &str) -> Result<MigrationOutcome, FederationError> {
        let product = self
            .legacy
            .product_by_key(key)
            .await?
            .ok_or_else(|| FederationError::not_found("game", key))?;
        let translated = self.resolver().resolve(&product).await?;
        self.migrator().migrate_game(&translated, &product).await
    }

    /// Migrate every legacy product, in document order.
    pub async fn migrate_all(&self) -> Result<MigrationStats, FederationError> {
        let products = self.legacy.find_products(&ProductQuery::new()).await?;
        let resolver = self.resolver();
        let migrator = self.migrator();
        let mut stats = MigrationStats::default();
        for product in &products {
            let outcome = match resolver.resolve(product).await {
                Ok(translated) => migrator.migrate_game(&translated, product).await,
                Err(e) => Err(e),
            };
            match outcome {
                Ok(outcome) => stats.record(outcome),
                Err(e) => {
                    log::warn!("Failed to migrate '{}': {}", product.game_key, e);
                    stats.record_failure();
                }
            }
        }
        log::info!(
            "Migration sweep: {} examined, {} migrated, {} already present, {} shadows, {} failed",
            stats.examined,
            stats.migrated,
            stats.already_present,
            stats.shadows_written,
            stats.failed
        );
        Ok(stats)
    }

    // ── Counters ────────────────────────────────────────────────────────────

    /// Add one view. Legacy-only games are counted in the legacy store.
    pub async fn increment_views(&self, key: &str) -> Result<i64, FederationError> {
        if let Some(game) = self.primary.visible_game_by_key(key, false).await? {
            let id = game.id;
            self.primary
                .with_conn(|c| gamestore_db::add_game_views(c, id, 1))
                .await?;
            return Ok(game.view_count + 1);
        }
        let product = self
            .legacy_only_by_key(key)
            .await?
            .ok_or_else(|| FederationError::not_found("game", key))?;
        let after = counters::add_views(self.legacy.as_ref(), product.product_id, 1)
            .await?
            .ok_or_else(|| FederationError::not_found("game", key))?;
        Ok(after.view_count)
    }

    /// Add `delta` (possibly negative) to the stock count.
    pub async fn adjust_stock(&self, key: &str, delta: i32) -> Result<i32, FederationError> {
        if let Some(game) = self.primary.visible_game_by_key(key, false).await? {
            let id = game.id;
            self.primary
                .with_conn(|c| gamestore_db::adjust_game_stock(c, id, delta))
                .await?;
            return Ok(game.units_in_stock.saturating_add(delta));
        }
        let product = self
            .legacy_only_by_key(key)
            .await?
            .ok_or_else(|| FederationError::not_found("game", key))?;
        let after = counters::adjust_stock(self.legacy.as_ref(), product.product_id, delta)
            .await?
            .ok_or_else(|| FederationError::not_found("game", key))?;
        Ok(after.units_in_stock)
    }

    // ── Comments ────────────────────────────────────────────────────────────

    /// Comments live in the primary store only; commenting on a legacy-only
    /// game migrates it first.
    pub async fn add_comment(
        &self,
        key: &str,
        author: &str,
        body: &str,
    ) -> Result<Comment, FederationError> {
        let game_id = match self.primary.visible_game_by_key(key, false).await? {
            Some(game) => game.id,
            None => {
                let product = self
                    .legacy_only_by_key(key)
                    .await?
                    .ok_or_else(|| FederationError::not_found("game", key))?;
                let translated = self.resolver().resolve(&product).await?;
                self.migrate_product(&translated, &product).await?
            }
        };
        let comment = Comment {
            id: Uuid::new_v4(),
            game_id,
            author: author.to_string(),
            body: body.to_string(),
            created_at: Utc::now(),
        };
        self.primary
            .with_conn(|c| gamestore_db::insert_comment(c, &comment))
            .await?;
        Ok(comment)
    }

    /// Comments on a game, oldest first. Legacy-only games have none.
    pub async fn comments_for(&self, key: &str) -> Result<Vec<Comment>, FederationError> {
        if let Some(game) = self.primary.visible_game_by_key(key, false).await? {
            let id = game.id;
            return self
                .primary
                .with_conn(|c| queries::comments_for_game(c, id))
                .await;
        }
        match self.legacy_only_by_key(key).await? {
            Some(_) => Ok(Vec::new()),
            None => Err(FederationError::not_found("game", key)),
        }
    }
}

impl<L: DocumentStore> GameRepository for FederatedGames<L> {
    async fn list(
        &self,
        filter: &GameFilter,
        can_see_deleted: bool,
    ) -> Result<GamePage, FederationError> {
        let pipeline = PipelineFactory::new(can_see_deleted).build(filter)?;
        let primary_query = pipeline.primary_query();
        let legacy_query = pipeline.legacy_query();

        let (primary, legacy) = tokio::join!(
            self.primary.with_conn(|c| {
                let total = queries::count_games(c, &primary_query.without_page())?;
                Ok((total, queries::query_games(c, &primary_query)?))
            }),
            async {
                let total = self.legacy.count_products(&legacy_query).await?;
                let page = self.legacy.find_products(&legacy_query).await?;
                Ok::<_, FederationError>((total, page))
            },
        );
        let (primary_total, primary_games) = primary?;
        let (legacy_total, products) = legacy?;

        let translated = self.resolver().resolve_all(&products).await?;
        let shadows = self.shadows_for(&products).await?;

        let merged = reconcile::merge_games(primary_games, translated, &shadows);
        let games = pipeline.resort_and_repaginate(merged);

        Ok(GamePage {
            games,
            total_count: primary_total + legacy_total,
        })
    }

    async fn get_by_key(
        &self,
        key: &str,
        can_see_deleted: bool,
    ) -> Result<Option<Game>, FederationError> {
        if let Some(game) = self
            .primary
            .with_conn(|c| queries::find_game_by_key(c, key))
            .await?
        {
            // A deleted primary row still hides its legacy twin.
            return Ok((can_see_deleted || !game.is_deleted).then_some(game));
        }
        match self.legacy_only_by_key(key).await? {
            Some(product) => Ok(Some(self.resolver().resolve(&product).await?)),
            None => Ok(None),
        }
    }

    async fn get_by_id(
        &self,
        id: Uuid,
        can_see_deleted: bool,
    ) -> Result<Option<Game>, FederationError> {
        if let Some(game) = self.primary.with_conn(|c| queries::find_game_by_id(c, id)).await? {
            return Ok((can_see_deleted || !game.is_deleted).then_some(game));
        }
        let Some(product) = self.legacy.product_by_id(id_bridge::to_legacy(id)).await? else {
            return Ok(None);
        };
        let shadows = self.shadows_for(std::slice::from_ref(&product)).await?;
        if !shadows.is_empty() {
            return Ok(None);
        }
        Ok(Some(self.resolver().resolve(&product).await?))
    }

    async fn create(&self, game: &Game) -> Result<(), FederationError> {
        let in_legacy = self.legacy.product_by_key(&game.key).await?.is_some();
        let in_primary = self
            .primary
            .with_conn(|c| queries::find_game_by_key(c, &game.key))
            .await?
            .is_some();
        if in_legacy || in_primary {
            return Err(FederationError::DuplicateKey(game.key.clone()));
        }
        self.primary
            .with_conn(|c| gamestore_db::insert_game(c, game))
            .await?;
        self.counter.increment();
        Ok(())
    }

    /// Legacy-only games are migrated with the update applied; a changed
    /// key leaves a shadow under the old one.
    async fn update(&self, game: &Game) -> Result<(), FederationError> {
        let id = game.id;
        if self.primary.with_conn(|c| queries::find_game_by_id(c, id)).await?.is_some() {
            return self
                .primary
                .with_conn(|c| gamestore_db::update_game(c, game))
                .await;
        }
        let product = self
            .legacy
            .product_by_id(id_bridge::to_legacy(id))
            .await?
            .ok_or_else(|| FederationError::not_found("game", id))?;
        self.migrate_product(game, &product).await?;
        Ok(())
    }

    /// Legacy-only games are migrated, then soft-deleted, so the deleted row
    /// shadows the legacy document from then on.
    async fn delete(&self, key: &str) -> Result<(), FederationError> {
        let id = match self
            .primary
            .with_conn(|c| queries::find_game_by_key(c, key))
            .await?
        {
            Some(game) if !game.is_deleted => game.id,
            Some(_) => return Err(FederationError::not_found("game", key)),
            None => {
                let product = self
                    .legacy_only_by_key(key)
                    .await?
                    .ok_or_else(|| FederationError::not_found("game", key))?;
                let translated = self.resolver().resolve(&product).await?;
                self.migrate_product(&translated, &product).await?
            }
        };
        self.primary
            .with_conn(|c| gamestore_db::soft_delete_game(c, id))
            .await?;
        self.counter.decrement();
        log::info!("Deleted game '{}'", key);
        Ok(())
    }
}
