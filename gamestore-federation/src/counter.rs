use std::sync::atomic::{AtomicI64, Ordering};

use gamestore_db::queries;
use gamestore_legacy::{DocumentStore, ProductQuery};

use crate::error::FederationError;
use crate::primary::PrimaryStore;

/// Approximate number of games across both stores.
///
/// Seeded once from both stores, then adjusted on create and delete. Direct
/// legacy mutations and migrations do not touch it; a migrated game is
/// counted twice until the next seed.
#[derive(Debug, Default)]
pub struct GameCounter {
    count: AtomicI64,
}

impl GameCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> i64 {
        self.count.load(Ordering::Relaxed)
    }

    pub fn increment(&self) {
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn decrement(&self) {
        self.count.fetch_sub(1, Ordering::Relaxed);
    }

    /// Count active primary games plus legacy products and store the sum.
    pub async fn seed<L: DocumentStore>(
        &self,
        primary: &PrimaryStore,
        legacy: &L,
    ) -> Result<i64, FederationError> {
        let all = ProductQuery::new();
        let (primary_count, legacy_count) = tokio::join!(
            primary.with_conn(queries::count_active_games),
            legacy.count_products(&all),
        );
        let total = (primary_count? + legacy_count?) as i64;
        self.count.store(total, Ordering::Relaxed);
        log::debug!("Game counter seeded with {}", total);
        Ok(total)
    }
}
