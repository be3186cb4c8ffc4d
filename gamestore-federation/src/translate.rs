//! Legacy document → domain entity translation.
//!
//! Identifiers go through the bridge; fields the legacy store does not have
//! get their empty value. References (genre, publisher) are left empty here
//! and filled by the resolver.

use gamestore_catalog::{Game, Genre, Order, Publisher, id_bridge};
use gamestore_legacy::{LegacyCategory, LegacyOrder, LegacyProduct, LegacySupplier};

pub fn game_from_product(product: &LegacyProduct) -> Game {
    Game {
        id: id_bridge::to_primary(product.product_id),
        key: product.game_key.clone(),
        name: product.product_name.clone(),
        description: product.quantity_per_unit.clone(),
        price: product.unit_price,
        units_in_stock: product.units_in_stock,
        discount: 0,
        created_at: None,
        is_deleted: false,
        view_count: product.view_count,
        comment_count: 0,
        genres: Vec::new(),
        platforms: Vec::new(),
        publisher: None,
    }
}

pub fn genre_from_category(category: &LegacyCategory) -> Genre {
    Genre {
        id: id_bridge::to_primary(category.category_id),
        name: category.category_name.clone(),
        parent_id: None,
        is_deleted: false,
    }
}

pub fn publisher_from_supplier(supplier: &LegacySupplier) -> Publisher {
    Publisher {
        id: id_bridge::to_primary(supplier.supplier_id),
        company_name: supplier.company_name.clone(),
        home_page: supplier.home_page.clone(),
        description: supplier.contact_name.clone(),
        is_deleted: false,
    }
}

pub fn order_from_legacy(order: &LegacyOrder) -> Order {
    Order {
        id: id_bridge::to_primary(order.order_id),
        customer_id: order.customer_id.clone(),
        order_date: order.order_date,
        ship_city: order.ship_city.clone(),
    }
}
