//! Federating repository decorators.
//!
//! Each decorator implements the same repository trait as the single-store
//! [`PrimaryStore`](crate::primary::PrimaryStore) adapter, so callers can be
//! handed either.

mod games;
mod orders;
mod references;

pub use games::FederatedGames;
pub use orders::FederatedOrders;
pub use references::{FederatedGenres, FederatedPublishers};

use std::sync::Arc;

use gamestore_legacy::DocumentStore;

use crate::primary::PrimaryStore;

/// Every federating repository over one pair of stores.
pub struct Federation<L> {
    pub games: FederatedGames<L>,
    pub genres: FederatedGenres<L>,
    pub publishers: FederatedPublishers<L>,
    pub orders: FederatedOrders<L>,
    primary: Arc<PrimaryStore>,
    legacy: Arc<L>,
}

impl<L: DocumentStore> Federation<L> {
    pub fn new(primary: PrimaryStore, legacy: L) -> Self {
        let primary = Arc::new(primary);
        let legacy = Arc::new(legacy);
        Self {
            games: FederatedGames::new(primary.clone(), legacy.clone()),
            genres: FederatedGenres::new(primary.clone(), legacy.clone()),
            publishers: FederatedPublishers::new(primary.clone(), legacy.clone()),
            orders: FederatedOrders::new(primary.clone(), legacy.clone()),
            primary,
            legacy,
        }
    }

    pub fn primary(&self) -> &PrimaryStore {
        &self.primary
    }

    pub fn legacy(&self) -> &L {
        &self.legacy
    }
}
