#![allow(dead_code)]

use chrono::{Duration, TimeZone, Utc};
use gamestore_catalog::{Game, GamePage, Genre, Platform, Publisher};
use gamestore_db::{insert_game, insert_genre, insert_publisher, open_memory};
use gamestore_federation::{Federation, PrimaryStore};
use gamestore_legacy::{
    LegacyCategory, LegacyProduct, LegacySnapshot, LegacySupplier, MemoryDocumentStore,
};
use rusqlite::Connection;

pub type TestFederation = Federation<MemoryDocumentStore>;

pub fn federation(conn: Connection, snapshot: LegacySnapshot) -> TestFederation {
    Federation::new(
        PrimaryStore::new(conn),
        MemoryDocumentStore::from_snapshot(snapshot),
    )
}

pub fn keys(page: &GamePage) -> Vec<&str> {
    page.games.iter().map(|g| g.key.as_str()).collect()
}

pub fn categories() -> Vec<LegacyCategory> {
    vec![
        LegacyCategory {
            category_id: 1,
            category_name: "Puzzle".into(),
            description: None,
        },
        LegacyCategory {
            category_id: 2,
            category_name: "Racing".into(),
            description: None,
        },
    ]
}

pub fn suppliers() -> Vec<LegacySupplier> {
    vec![
        LegacySupplier {
            supplier_id: 1,
            company_name: "Exotic Liquids".into(),
            contact_name: None,
            home_page: None,
        },
        LegacySupplier {
            supplier_id: 2,
            company_name: "Tokyo Traders".into(),
            contact_name: None,
            home_page: None,
        },
    ]
}

pub struct PrimaryRefs {
    pub strategy: Genre,
    pub stellar: Publisher,
    pub desktop: Platform,
}

/// Seed the primary store with one game, "supergame".
pub fn seed_primary(conn: &Connection) -> PrimaryRefs {
    let strategy = Genre::new("Strategy");
    let stellar = Publisher::new("Stellar Games");
    let desktop = Platform::new("Desktop");
    insert_genre(conn, &strategy).unwrap();
    insert_publisher(conn, &stellar).unwrap();

    let supergame = Game::new("supergame", "Super Game", 30.0)
        .with_genre(strategy.clone())
        .with_platform(desktop.clone())
        .with_publisher(stellar.clone())
        .with_stock(12)
        .with_created_at(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    let supergame = Game {
        view_count: 10,
        ..supergame
    };
    insert_game(conn, &supergame).unwrap();

    PrimaryRefs {
        strategy,
        stellar,
        desktop,
    }
}

/// Legacy store with "game1" and a second "supergame" under another id.
pub fn legacy_fixture() -> LegacySnapshot {
    LegacySnapshot {
        products: vec![
            LegacyProduct::new(1, "game1", "Game One")
                .with_price(10.0)
                .with_category(1)
                .with_supplier(1)
                .with_stock(5)
                .with_views(5),
            LegacyProduct::new(2, "supergame", "Super Game (legacy)").with_price(99.0),
        ],
        categories: categories(),
        suppliers: suppliers(),
        ..Default::default()
    }
}

/// The standard two-store catalog.
pub fn catalog() -> (TestFederation, PrimaryRefs) {
    let conn = open_memory().unwrap();
    let refs = seed_primary(&conn);
    (federation(conn, legacy_fixture()), refs)
}

pub fn days_ago(days: i64) -> chrono::DateTime<Utc> {
    Utc::now() - Duration::days(days)
}
