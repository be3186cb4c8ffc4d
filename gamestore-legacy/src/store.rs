//! The legacy document store contract and its in-memory implementation.

use thiserror::Error;
use tokio::sync::RwLock;

use crate::documents::*;
use crate::query::ProductQuery;
use crate::snapshot::LegacySnapshot;

#[derive(Debug, Error)]
pub enum LegacyError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("YAML error in {path}: {source}")]
    Yaml {
        path: String,
        source: serde_yml::Error,
    },
    #[error("Legacy store unavailable: {0}")]
    Unavailable(String),
}

/// Numeric product fields that support atomic in-place increments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterField {
    ViewCount,
    UnitsInStock,
}

impl CounterField {
    fn apply(&self, product: &mut LegacyProduct, delta: i64) {
        match self {
            Self::ViewCount => product.view_count = product.view_count.saturating_add(delta),
            Self::UnitsInStock => {
                let delta = delta.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
                product.units_in_stock = product.units_in_stock.saturating_add(delta);
            }
        }
    }
}

/// A product before and after an atomic increment.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterChange {
    pub before: LegacyProduct,
    pub after: LegacyProduct,
}

/// Queryable legacy document source.
///
/// Products are returned in the store's natural order unless the query
/// sorts them.
#[allow(async_fn_in_trait)]
pub trait DocumentStore {
    async fn find_products(&self, query: &ProductQuery) -> Result<Vec<LegacyProduct>, LegacyError>;

    /// Count products matching `query`, ignoring its window.
    async fn count_products(&self, query: &ProductQuery) -> Result<u64, LegacyError>;

    async fn product_by_id(&self, product_id: i32) -> Result<Option<LegacyProduct>, LegacyError>;

    async fn product_by_key(&self, game_key: &str) -> Result<Option<LegacyProduct>, LegacyError>;

    async fn categories(&self) -> Result<Vec<LegacyCategory>, LegacyError>;

    async fn category_by_id(&self, category_id: i32) -> Result<Option<LegacyCategory>, LegacyError>;

    async fn suppliers(&self) -> Result<Vec<LegacySupplier>, LegacyError>;

    async fn supplier_by_id(&self, supplier_id: i32) -> Result<Option<LegacySupplier>, LegacyError>;

    async fn supplier_by_name(
        &self,
        company_name: &str,
    ) -> Result<Option<LegacySupplier>, LegacyError>;

    async fn orders(&self) -> Result<Vec<LegacyOrder>, LegacyError>;

    async fn order_by_id(&self, order_id: i32) -> Result<Option<LegacyOrder>, LegacyError>;

    /// Atomically add `delta` to one counter field of a product.
    ///
    /// Returns `None` when no product has that id.
    async fn increment_product(
        &self,
        product_id: i32,
        field: CounterField,
        delta: i64,
    ) -> Result<Option<CounterChange>, LegacyError>;

    /// Append raw documents to the change log collection.
    async fn append_logs(&self, entries: Vec<ChangeLogEntry>) -> Result<(), LegacyError>;
}

/// In-memory document store holding every collection behind one lock.
///
/// Increments take the write lock, which makes each one atomic per document.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<LegacySnapshot>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: LegacySnapshot) -> Self {
        Self {
            collections: RwLock::new(snapshot),
        }
    }

    /// A copy of every collection, for persisting.
    pub async fn snapshot(&self) -> LegacySnapshot {
        self.collections.read().await.clone()
    }

    pub async fn insert_product(&self, product: LegacyProduct) {
        self.collections.write().await.products.push(product);
    }

    pub async fn insert_category(&self, category: LegacyCategory) {
        self.collections.write().await.categories.push(category);
    }

    pub async fn insert_supplier(&self, supplier: LegacySupplier) {
        self.collections.write().await.suppliers.push(supplier);
    }

    pub async fn insert_order(&self, order: LegacyOrder) {
        self.collections.write().await.orders.push(order);
    }

    pub async fn logs(&self) -> Vec<ChangeLogEntry> {
        self.collections.read().await.logs.clone()
    }
}

impl DocumentStore for MemoryDocumentStore {
    async fn find_products(&self, query: &ProductQuery) -> Result<Vec<LegacyProduct>, LegacyError> {
        Ok(query.run(&self.collections.read().await.products))
    }

    async fn count_products(&self, query: &ProductQuery) -> Result<u64, LegacyError> {
        Ok(query.count(&self.collections.read().await.products))
    }

    async fn product_by_id(&self, product_id: i32) -> Result<Option<LegacyProduct>, LegacyError> {
        let collections = self.collections.read().await;
        Ok(collections
            .products
            .iter()
            .find(|p| p.product_id == product_id)
            .cloned())
    }

    async fn product_by_key(&self, game_key: &str) -> Result<Option<LegacyProduct>, LegacyError> {
        let collections = self.collections.read().await;
        Ok(collections
            .products
            .iter()
            .find(|p| p.game_key == game_key)
            .cloned())
    }

    async fn categories(&self) -> Result<Vec<LegacyCategory>, LegacyError> {
        Ok(self.collections.read().await.categories.clone())
    }

    async fn category_by_id(
        &self,
        category_id: i32,
    ) -> Result<Option<LegacyCategory>, LegacyError> {
        let collections = self.collections.read().await;
        Ok(collections
            .categories
            .iter()
            .find(|c| c.category_id == category_id)
            .cloned())
    }

    async fn suppliers(&self) -> Result<Vec<LegacySupplier>, LegacyError> {
        Ok(self.collections.read().await.suppliers.clone())
    }

    async fn supplier_by_id(
        &self,
        supplier_id: i32,
    ) -> Result<Option<LegacySupplier>, LegacyError> {
        let collections = self.collections.read().await;
        Ok(collections
            .suppliers
            .iter()
            .find(|s| s.supplier_id == supplier_id)
            .cloned())
    }

    async fn supplier_by_name(
        &self,
        company_name: &str,
    ) -> Result<Option<LegacySupplier>, LegacyError> {
        let collections = self.collections.read().await;
        Ok(collections
            .suppliers
            .iter()
            .find(|s| s.company_name == company_name)
            .cloned())
    }

    async fn orders(&self) -> Result<Vec<LegacyOrder>, LegacyError> {
        Ok(self.collections.read().await.orders.clone())
    }

    async fn order_by_id(&self, order_id: i32) -> Result<Option<LegacyOrder>, LegacyError> {
        let collections = self.collections.read().await;
        Ok(collections
            .orders
            .iter()
            .find(|o| o.order_id == order_id)
            .cloned())
    }

    async fn increment_product(
        &self,
        product_id: i32,
        field: CounterField,
        delta: i64,
    ) -> Result<Option<CounterChange>, LegacyError> {
        let mut collections = self.collections.write().await;
        let Some(product) = collections
            .products
            .iter_mut()
            .find(|p| p.product_id == product_id)
        else {
            return Ok(None);
        };
        let before = product.clone();
        field.apply(product, delta);
        Ok(Some(CounterChange {
            before,
            after: product.clone(),
        }))
    }

    async fn append_logs(&self, entries: Vec<ChangeLogEntry>) -> Result<(), LegacyError> {
        self.collections.write().await.logs.extend(entries);
        Ok(())
    }
}
