mod common;

use common::*;
use gamestore_catalog::{Game, Genre, Publisher, id_bridge};
use gamestore_db::{
    GameQuery, find_game_by_key, insert_game, insert_genre, insert_publisher, list_genres,
    list_publishers, open_memory, query_games,
};
use gamestore_federation::{
    CrossReferenceResolver, GameRepository, LazyMigrator, MigrationOutcome, MigrationStats,
    PrimaryStore,
};
use gamestore_legacy::{DocumentStore, LegacyProduct, MemoryDocumentStore};

async fn primary_state(primary: &PrimaryStore) -> (Vec<Game>, Vec<Genre>, Vec<Publisher>) {
    primary
        .with_conn(|c| {
            Ok((
                query_games(c, &GameQuery::new())?,
                list_genres(c)?,
                list_publishers(c)?,
            ))
        })
        .await
        .unwrap()
}

async fn translated(fed: &TestFederation, key: &str) -> (Game, LegacyProduct) {
    let product = fed.legacy().product_by_key(key).await.unwrap().unwrap();
    let game = CrossReferenceResolver::new(fed.primary(), fed.legacy())
        .resolve(&product)
        .await
        .unwrap();
    (game, product)
}

async fn primary_game(primary: &PrimaryStore, key: &str) -> Option<Game> {
    primary.with_conn(|c| find_game_by_key(c, key)).await.unwrap()
}

#[tokio::test]
async fn migrates_game_with_its_references() {
    let (fed, _) = catalog();
    let (game, product) = translated(&fed, "game1").await;

    let outcome = LazyMigrator::new(fed.primary())
        .migrate_game(&game, &product)
        .await
        .unwrap();
    assert_eq!(outcome, MigrationOutcome::Migrated { shadowed: false });

    let migrated = primary_game(fed.primary(), "game1").await.unwrap();
    assert_eq!(migrated.id, id_bridge::to_primary(1));
    assert_eq!(migrated.view_count, 5);
    assert_eq!(migrated.units_in_stock, 5);
    assert!(migrated.created_at.is_some());
    assert_eq!(migrated.genres[0].name, "Puzzle");
    assert_eq!(migrated.publisher.unwrap().id, id_bridge::to_primary(1));
}

#[tokio::test]
async fn scenario_d_colliding_key_leaves_primary_untouched() {
    let (fed, _) = catalog();
    let before = primary_state(fed.primary()).await;

    let (game, product) = translated(&fed, "supergame").await;
    let outcome = LazyMigrator::new(fed.primary())
        .migrate_game(&game, &product)
        .await
        .unwrap();

    assert_eq!(outcome, MigrationOutcome::AlreadyPresent);
    assert_eq!(primary_state(fed.primary()).await, before);
}

#[tokio::test]
async fn migration_is_idempotent() {
    let (fed, _) = catalog();
    assert_eq!(
        fed.games.migrate("game1").await.unwrap(),
        MigrationOutcome::Migrated { shadowed: false }
    );
    let after_first = primary_state(fed.primary()).await;

    assert_eq!(
        fed.games.migrate("game1").await.unwrap(),
        MigrationOutcome::AlreadyPresent
    );
    assert_eq!(primary_state(fed.primary()).await, after_first);
}

#[tokio::test]
async fn publisher_failure_does_not_block_game() {
    let conn = open_memory().unwrap();
    seed_primary(&conn);
    // Same company name under a native id: the bridged insert violates uniqueness.
    insert_publisher(&conn, &Publisher::new("Exotic Liquids")).unwrap();
    let fed = federation(conn, legacy_fixture());

    let outcome = fed.games.migrate("game1").await.unwrap();
    assert_eq!(outcome, MigrationOutcome::Migrated { shadowed: false });

    let migrated = primary_game(fed.primary(), "game1").await.unwrap();
    assert!(migrated.publisher.is_none());
    assert_eq!(migrated.genres.len(), 1);
}

#[tokio::test]
async fn rekeyed_game_gets_deleted_shadow() {
    let (fed, _) = catalog();
    let (mut game, product) = translated(&fed, "game1").await;
    game.key = "game-one".into();

    let outcome = LazyMigrator::new(fed.primary())
        .migrate_game(&game, &product)
        .await
        .unwrap();
    assert_eq!(outcome, MigrationOutcome::Migrated { shadowed: true });

    let live = primary_game(fed.primary(), "game-one").await.unwrap();
    assert_eq!(live.id, id_bridge::to_primary(1));
    assert!(!live.is_deleted);

    let shadow = primary_game(fed.primary(), "game1").await.unwrap();
    assert!(shadow.is_deleted);
    assert_ne!(shadow.id, live.id);
    assert!(shadow.genres.is_empty());
}

#[tokio::test]
async fn shadow_skipped_when_original_key_taken() {
    let conn = open_memory().unwrap();
    seed_primary(&conn);
    let existing = Game {
        is_deleted: true,
        ..Game::new("game1", "Old Game One", 1.0)
    };
    insert_game(&conn, &existing).unwrap();
    let fed = federation(conn, legacy_fixture());

    let product = fed.legacy().product_by_key("game1").await.unwrap().unwrap();
    let mut game = CrossReferenceResolver::new(fed.primary(), fed.legacy())
        .resolve(&product)
        .await
        .unwrap();
    game.key = "game-one".into();

    let outcome = LazyMigrator::new(fed.primary())
        .migrate_game(&game, &product)
        .await
        .unwrap();
    assert_eq!(outcome, MigrationOutcome::Migrated { shadowed: false });
    assert_eq!(primary_game(fed.primary(), "game1").await.unwrap().id, existing.id);
}

#[tokio::test]
async fn sweep_migrates_everything_once() {
    let (fed, _) = catalog();
    let legacy: &MemoryDocumentStore = fed.legacy();
    legacy
        .insert_product(LegacyProduct::new(3, "game3", "Game Three").with_category(1))
        .await;

    let stats = fed.games.migrate_all().await.unwrap();
    assert_eq!(
        stats,
        MigrationStats {
            examined: 3,
            migrated: 2,
            already_present: 1,
            shadows_written: 0,
            failed: 0,
        }
    );

    // Both games share the one migrated genre.
    let genres = fed
        .primary()
        .with_conn(|c| list_genres(c))
        .await
        .unwrap();
    assert_eq!(
        genres.iter().filter(|g| g.name == "Puzzle").count(),
        1
    );

    let again = fed.games.migrate_all().await.unwrap();
    assert_eq!(again.migrated, 0);
    assert_eq!(again.already_present, 3);
}

/// Primary store holding its own "Puzzle" genre under a native id.
fn catalog_with_native_puzzle() -> (TestFederation, Genre) {
    let conn = open_memory().unwrap();
    seed_primary(&conn);
    let puzzle = Genre::new("Puzzle");
    insert_genre(&conn, &puzzle).unwrap();
    (federation(conn, legacy_fixture()), puzzle)
}

#[tokio::test]
async fn genre_name_taken_links_existing_genre() {
    let (fed, puzzle) = catalog_with_native_puzzle();

    let outcome = fed.games.migrate("game1").await.unwrap();
    assert_eq!(outcome, MigrationOutcome::Migrated { shadowed: false });

    let migrated = primary_game(fed.primary(), "game1").await.unwrap();
    assert_eq!(migrated.genres.len(), 1);
    assert_eq!(migrated.genres[0].id, puzzle.id);

    let (_, genres, _) = primary_state(fed.primary()).await;
    assert_eq!(genres.iter().filter(|g| g.name == "Puzzle").count(), 1);
}

#[tokio::test]
async fn genre_name_taken_does_not_block_writes() {
    let (fed, _) = catalog_with_native_puzzle();
    let comment = fed.games.add_comment("game1", "ann", "great").await.unwrap();
    assert_eq!(comment.game_id, id_bridge::to_primary(1));

    let (fed, _) = catalog_with_native_puzzle();
    fed.games.delete("game1").await.unwrap();
    assert!(primary_game(fed.primary(), "game1").await.unwrap().is_deleted);
}

#[tokio::test]
async fn sweep_counts_failures_and_keeps_going() {
    let conn = open_memory().unwrap();
    seed_primary(&conn);
    conn.execute_batch(
        "CREATE TRIGGER reject_game1 BEFORE INSERT ON games
         WHEN NEW.game_key = 'game1'
         BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
    )
    .unwrap();
    let fed = federation(conn, legacy_fixture());
    fed.legacy()
        .insert_product(LegacyProduct::new(3, "game3", "Game Three").with_category(1))
        .await;

    let stats = fed.games.migrate_all().await.unwrap();
    assert_eq!(
        stats,
        MigrationStats {
            examined: 3,
            migrated: 1,
            already_present: 1,
            shadows_written: 0,
            failed: 1,
        }
    );
    assert!(primary_game(fed.primary(), "game1").await.is_none());
    assert!(primary_game(fed.primary(), "game3").await.is_some());
}

#[tokio::test]
async fn migrating_unknown_key_is_not_found() {
    let (fed, _) = catalog();
    assert!(fed.games.migrate("nope").await.is_err());
}
