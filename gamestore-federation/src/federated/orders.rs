use std::sync::Arc;

use gamestore_catalog::{Order, id_bridge};
use gamestore_db::queries;
use gamestore_legacy::DocumentStore;
use uuid::Uuid;

use crate::error::FederationError;
use crate::primary::PrimaryStore;
use crate::reconcile;
use crate::repository::OrderRepository;
use crate::translate;

/// Orders from both stores, matched by id only.
pub struct FederatedOrders<L> {
    primary: Arc<PrimaryStore>,
    legacy: Arc<L>,
}

impl<L: DocumentStore> FederatedOrders<L> {
    pub fn new(primary: Arc<PrimaryStore>, legacy: Arc<L>) -> Self {
        Self { primary, legacy }
    }
}

impl<L: DocumentStore> OrderRepository for FederatedOrders<L> {
    async fn list(&self) -> Result<Vec<Order>, FederationError> {
        let (primary, legacy) = tokio::join!(
            self.primary.with_conn(queries::list_orders),
            self.legacy.orders(),
        );
        let translated = legacy?.iter().map(translate::order_from_legacy).collect();
        let mut orders = reconcile::merge_orders(primary?, translated);
        orders.sort_by(|a, b| b.order_date.cmp(&a.order_date));
        Ok(orders)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Order>, FederationError> {
        if let Some(order) = self.primary.with_conn(|c| queries::find_order_by_id(c, id)).await? {
            return Ok(Some(order));
        }
        let order = self.legacy.order_by_id(id_bridge::to_legacy(id)).await?;
        Ok(order.as_ref().map(translate::order_from_legacy))
    }
}
