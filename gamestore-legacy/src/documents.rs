//! Document shapes stored in the legacy catalog.
//!
//! Field names follow the legacy store, not the domain model. Documents are
//! keyed by small integers; there is no soft delete, no platform, and no
//! creation date.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A product document: the legacy form of a game.
///
/// `view_count` and `units_in_stock` are the live values for as long as
/// the product has not been migrated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyProduct {
    pub product_id: i32,
    pub game_key: String,
    pub product_name: String,
    #[serde(default)]
    pub supplier_id: Option<i32>,
    #[serde(default)]
    pub category_id: Option<i32>,
    #[serde(default)]
    pub quantity_per_unit: Option<String>,
    pub unit_price: f64,
    #[serde(default)]
    pub units_in_stock: i32,
    #[serde(default)]
    pub discontinued: bool,
    #[serde(default)]
    pub view_count: i64,
}

impl LegacyProduct {
    pub fn new(
        product_id: i32,
        game_key: impl Into<String>,
        product_name: impl Into<String>,
    ) -> Self {
        Self {
            product_id,
            game_key: game_key.into(),
            product_name: product_name.into(),
            supplier_id: None,
            category_id: None,
            quantity_per_unit: None,
            unit_price: 0.0,
            units_in_stock: 0,
            discontinued: false,
            view_count: 0,
        }
    }

    pub fn with_price(mut self, unit_price: f64) -> Self {
        self.unit_price = unit_price;
        self
    }

    pub fn with_category(mut self, category_id: i32) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_supplier(mut self, supplier_id: i32) -> Self {
        self.supplier_id = Some(supplier_id);
        self
    }

    pub fn with_stock(mut self, units: i32) -> Self {
        self.units_in_stock = units;
        self
    }

    pub fn with_views(mut self, views: i64) -> Self {
        self.view_count = views;
        self
    }
}

/// A category document: the legacy form of a genre.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyCategory {
    pub category_id: i32,
    pub category_name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// A supplier document: the legacy form of a publisher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacySupplier {
    pub supplier_id: i32,
    pub company_name: String,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub home_page: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyOrder {
    pub order_id: i32,
    pub customer_id: String,
    pub order_date: DateTime<Utc>,
    #[serde(default)]
    pub ship_city: Option<String>,
}

/// One audit record of a mutation applied directly to the legacy store.
///
/// `after` is absent when the targeted document could not be found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeLogEntry {
    pub timestamp: DateTime<Utc>,
    pub action: String,
    pub entity_type: String,
    #[serde(default)]
    pub before: Option<serde_json::Value>,
    #[serde(default)]
    pub after: Option<serde_json::Value>,
}

impl ChangeLogEntry {
    /// Build an entry stamped now, snapshotting `before`/`after` as JSON.
    pub fn capture<T: Serialize>(
        action: &str,
        entity_type: &str,
        before: Option<&T>,
        after: Option<&T>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            action: action.to_string(),
            entity_type: entity_type.to_string(),
            before: before.and_then(|b| serde_json::to_value(b).ok()),
            after: after.and_then(|a| serde_json::to_value(a).ok()),
        }
    }
}
