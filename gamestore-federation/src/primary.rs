//! Async adapter over the SQLite primary store.
//!
//! The connection sits behind a `tokio::sync::Mutex`. Every call locks,
//! runs one synchronous `gamestore_db` function and releases, so the lock
//! is never held across a legacy-store call.

use std::path::Path;

use gamestore_catalog::{Game, GameFilter, GamePage, Genre, Order, Publisher};
use gamestore_db::{OperationError, queries};
use rusqlite::Connection;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::FederationError;
use crate::pipeline::PipelineFactory;
use crate::repository::{GameRepository, GenreRepository, OrderRepository, PublisherRepository};

pub struct PrimaryStore {
    conn: Mutex<Connection>,
}

impl PrimaryStore {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    pub fn open(path: &Path) -> Result<Self, FederationError> {
        Ok(Self::new(gamestore_db::open_database(path)?))
    }

    pub fn in_memory() -> Result<Self, FederationError> {
        Ok(Self::new(gamestore_db::open_memory()?))
    }

    /// Run one database operation under the connection lock.
    pub async fn with_conn<T>(
        &self,
        op: impl FnOnce(&Connection) -> Result<T, OperationError>,
    ) -> Result<T, FederationError> {
        let conn = self.conn.lock().await;
        Ok(op(&conn)?)
    }

    /// The game stored under `key`, hidden if deleted and not permitted.
    pub(crate) async fn visible_game_by_key(
        &self,
        key: &str,
        can_see_deleted: bool,
    ) -> Result<Option<Game>, FederationError> {
        let found = self.with_conn(|c| queries::find_game_by_key(c, key)).await?;
        Ok(found.filter(|g| can_see_deleted || !g.is_deleted))
    }
}

// ── Single-store repositories ───────────────────────────────────────────────

impl GameRepository for PrimaryStore {
    async fn list(
        &self,
        filter: &GameFilter,
        can_see_deleted: bool,
    ) -> Result<GamePage, FederationError> {
        let query = PipelineFactory::new(can_see_deleted)
            .build(filter)?
            .primary_query();
        self.with_conn(|c| {
            Ok(GamePage {
                total_count: queries::count_games(c, &query.without_page())?,
                games: queries::query_games(c, &query)?,
            })
        })
        .await
    }

    async fn get_by_key(
        &self,
        key: &str,
        can_see_deleted: bool,
    ) -> Result<Option<Game>, FederationError> {
        self.visible_game_by_key(key, can_see_deleted).await
    }

    async fn get_by_id(
        &self,
        id: Uuid,
        can_see_deleted: bool,
    ) -> Result<Option<Game>, FederationError> {
        let found = self.with_conn(|c| queries::find_game_by_id(c, id)).await?;
        Ok(found.filter(|g| can_see_deleted || !g.is_deleted))
    }

    async fn create(&self, game: &Game) -> Result<(), FederationError> {
        if self.with_conn(|c| queries::find_game_by_key(c, &game.key)).await?.is_some() {
            return Err(FederationError::DuplicateKey(game.key.clone()));
        }
        self.with_conn(|c| gamestore_db::insert_game(c, game)).await
    }

    async fn update(&self, game: &Game) -> Result<(), FederationError> {
        self.with_conn(|c| gamestore_db::update_game(c, game)).await
    }

    async fn delete(&self, key: &str) -> Result<(), FederationError> {
        let game = self
            .visible_game_by_key(key, false)
            .await?
            .ok_or_else(|| FederationError::not_found("game", key))?;
        self.with_conn(|c| gamestore_db::soft_delete_game(c, game.id)).await
    }
}

impl GenreRepository for PrimaryStore {
    async fn list(&self) -> Result<Vec<Genre>, FederationError> {
        let genres = self.with_conn(queries::list_genres).await?;
        Ok(genres.into_iter().filter(|g| !g.is_deleted).collect())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Genre>, FederationError> {
        let found = self.with_conn(|c| queries::find_genre_by_id(c, id)).await?;
        Ok(found.filter(|g| !g.is_deleted))
    }
}

impl PublisherRepository for PrimaryStore {
    async fn list(&self) -> Result<Vec<Publisher>, FederationError> {
        let publishers = self.with_conn(queries::list_publishers).await?;
        Ok(publishers.into_iter().filter(|p| !p.is_deleted).collect())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Publisher>, FederationError> {
        let found = self.with_conn(|c| queries::find_publisher_by_id(c, id)).await?;
        Ok(found.filter(|p| !p.is_deleted))
    }

    async fn get_by_name(&self, company_name: &str) -> Result<Option<Publisher>, FederationError> {
        let found = self
            .with_conn(|c| queries::find_publisher_by_name(c, company_name))
            .await?;
        Ok(found.filter(|p| !p.is_deleted))
    }
}

impl OrderRepository for PrimaryStore {
    async fn list(&self) -> Result<Vec<Order>, FederationError> {
        self.with_conn(queries::list_orders).await
    }

    async fn get(&self, id: Uuid) -> Result<Option<Order>, FederationError> {
        self.with_conn(|c| queries::find_order_by_id(c, id)).await
    }
}
