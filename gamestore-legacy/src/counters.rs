//! Counter mutations applied in place to legacy products.
//!
//! Each call increments atomically in the store and then records one
//! change log entry. The returned product is the post-increment state, or
//! `None` if no product has the id.

use serde_json::json;

use crate::change_log::ChangeLogger;
use crate::documents::{ChangeLogEntry, LegacyProduct};
use crate::store::{CounterField, DocumentStore, LegacyError};

pub const ENTITY_PRODUCT: &str = "product";
pub const ACTION_VIEW: &str = "view";
pub const ACTION_STOCK: &str = "adjust-stock";

pub async fn add_views<S: DocumentStore>(
    store: &S,
    product_id: i32,
    delta: i64,
) -> Result<Option<LegacyProduct>, LegacyError> {
    increment_logged(store, product_id, CounterField::ViewCount, delta, ACTION_VIEW).await
}

pub async fn adjust_stock<S: DocumentStore>(
    store: &S,
    product_id: i32,
    delta: i32,
) -> Result<Option<LegacyProduct>, LegacyError> {
    increment_logged(
        store,
        product_id,
        CounterField::UnitsInStock,
        i64::from(delta),
        ACTION_STOCK,
    )
    .await
}

async fn increment_logged<S: DocumentStore>(
    store: &S,
    product_id: i32,
    field: CounterField,
    delta: i64,
    action: &str,
) -> Result<Option<LegacyProduct>, LegacyError> {
    let change = store.increment_product(product_id, field, delta).await?;

    let entry = match &change {
        Some(change) => ChangeLogEntry::capture(
            action,
            ENTITY_PRODUCT,
            Some(&change.before),
            Some(&change.after),
        ),
        None => {
            log::debug!("Legacy product {} not found for {}", product_id, action);
            ChangeLogEntry::capture(
                action,
                ENTITY_PRODUCT,
                Some(&json!({ "product_id": product_id })),
                None,
            )
        }
    };
    ChangeLogger::new(store).log_changes(vec![entry]).await;

    Ok(change.map(|c| c.after))
}
