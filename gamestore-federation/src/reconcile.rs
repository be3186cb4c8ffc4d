//! Reconciliation of primary rows with translated legacy rows.
//!
//! Primary rows are kept as they are. A legacy row survives only if no
//! primary row and no known shadow shares its id or natural key; survivors
//! are appended after the primary rows.

use std::collections::HashSet;

use gamestore_catalog::{Game, Genre, Order, Publisher};
use uuid::Uuid;

/// An entity that can appear in both stores.
pub trait Reconcilable {
    fn id(&self) -> Uuid;

    /// The store-independent unique key, if the entity has one.
    fn natural_key(&self) -> Option<&str>;

    fn is_deleted(&self) -> bool {
        false
    }
}

impl Reconcilable for Game {
    fn id(&self) -> Uuid {
        self.id
    }
    fn natural_key(&self) -> Option<&str> {
        Some(&self.key)
    }
    fn is_deleted(&self) -> bool {
        self.is_deleted
    }
}

impl Reconcilable for Genre {
    fn id(&self) -> Uuid {
        self.id
    }
    fn natural_key(&self) -> Option<&str> {
        None
    }
    fn is_deleted(&self) -> bool {
        self.is_deleted
    }
}

impl Reconcilable for Publisher {
    fn id(&self) -> Uuid {
        self.id
    }
    fn natural_key(&self) -> Option<&str> {
        Some(&self.company_name)
    }
    fn is_deleted(&self) -> bool {
        self.is_deleted
    }
}

impl Reconcilable for Order {
    fn id(&self) -> Uuid {
        self.id
    }
    fn natural_key(&self) -> Option<&str> {
        None
    }
}

/// Merge `legacy` into `primary`, dropping legacy rows that collide with a
/// primary row or with one of `shadows`.
pub fn merge<T: Reconcilable>(primary: Vec<T>, legacy: Vec<T>, shadows: &[T]) -> Vec<T> {
    let mut ids: HashSet<Uuid> = HashSet::new();
    let mut keys: HashSet<String> = HashSet::new();
    for item in primary.iter().chain(shadows) {
        ids.insert(item.id());
        if let Some(key) = item.natural_key() {
            keys.insert(key.to_string());
        }
    }

    let mut merged = primary;
    let before = merged.len();
    merged.extend(legacy.into_iter().filter(|item| {
        !ids.contains(&item.id()) && !item.natural_key().is_some_and(|k| keys.contains(k))
    }));
    log::debug!(
        "Merged {} primary rows with {} surviving legacy rows",
        before,
        merged.len() - before
    );
    merged
}

/// Games: `shadows` are the primary rows (deleted or not) that share a key
/// or id with the legacy page.
pub fn merge_games(primary: Vec<Game>, legacy: Vec<Game>, shadows: &[Game]) -> Vec<Game> {
    merge(primary, legacy, shadows)
}

/// Genres: deleted primary genres still suppress their legacy twin, then
/// are dropped from the result.
pub fn merge_genres(primary: Vec<Genre>, legacy: Vec<Genre>) -> Vec<Genre> {
    without_deleted(merge(primary, legacy, &[]))
}

pub fn merge_publishers(primary: Vec<Publisher>, legacy: Vec<Publisher>) -> Vec<Publisher> {
    without_deleted(merge(primary, legacy, &[]))
}

pub fn merge_orders(primary: Vec<Order>, legacy: Vec<Order>) -> Vec<Order> {
    merge(primary, legacy, &[])
}

fn without_deleted<T: Reconcilable>(items: Vec<T>) -> Vec<T> {
    items.into_iter().filter(|item| !item.is_deleted()).collect()
}
