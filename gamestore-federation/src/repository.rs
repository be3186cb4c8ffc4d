//! Repository contracts shared by the single-store adapter and the
//! federating decorators.
//!
//! Consumers depend on these traits only; whether a record came from the
//! primary or the legacy store is not observable through them.

use gamestore_catalog::{Game, GameFilter, GamePage, Genre, Order, Publisher};
use uuid::Uuid;

use crate::error::FederationError;

#[allow(async_fn_in_trait)]
pub trait GameRepository {
    /// Filtered, sorted, paginated catalog page.
    ///
    /// `can_see_deleted` is the caller's permission to see soft-deleted games.
    async fn list(
        &self,
        filter: &GameFilter,
        can_see_deleted: bool,
    ) -> Result<GamePage, FederationError>;

    async fn get_by_key(
        &self,
        key: &str,
        can_see_deleted: bool,
    ) -> Result<Option<Game>, FederationError>;

    async fn get_by_id(&self, id: Uuid, can_see_deleted: bool)
    -> Result<Option<Game>, FederationError>;

    async fn create(&self, game: &Game) -> Result<(), FederationError>;

    /// Overwrite the game with the same id.
    async fn update(&self, game: &Game) -> Result<(), FederationError>;

    /// Soft-delete the game with this key.
    async fn delete(&self, key: &str) -> Result<(), FederationError>;
}

#[allow(async_fn_in_trait)]
pub trait GenreRepository {
    /// Every genre that is not soft-deleted.
    async fn list(&self) -> Result<Vec<Genre>, FederationError>;

    async fn get(&self, id: Uuid) -> Result<Option<Genre>, FederationError>;
}

#[allow(async_fn_in_trait)]
pub trait PublisherRepository {
    /// Every publisher that is not soft-deleted.
    async fn list(&self) -> Result<Vec<Publisher>, FederationError>;

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Publisher>, FederationError>;

    async fn get_by_name(&self, company_name: &str) -> Result<Option<Publisher>, FederationError>;
}

#[allow(async_fn_in_trait)]
pub trait OrderRepository {
    /// All orders, newest first.
    async fn list(&self) -> Result<Vec<Order>, FederationError>;

    async fn get(&self, id: Uuid) -> Result<Option<Order>, FederationError>;
}
