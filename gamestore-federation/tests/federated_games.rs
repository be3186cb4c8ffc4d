mod common;

use chrono::Utc;
use common::*;
use gamestore_catalog::{Comment, Game, GameFilter, Genre, id_bridge};
use gamestore_db::{find_game_by_key, insert_comment, insert_game, insert_genre, open_memory};
use gamestore_federation::{FederationError, GameRepository};
use gamestore_legacy::{DocumentStore, LegacyProduct, LegacySnapshot};
use uuid::Uuid;

fn game_with_views(key: &str, views: i64) -> Game {
    Game {
        view_count: views,
        ..Game::new(key, key.to_uppercase(), 10.0)
    }
}

fn product_with_views(id: i32, key: &str, views: i64) -> LegacyProduct {
    LegacyProduct::new(id, key, key.to_uppercase()).with_views(views)
}

// ── Listing ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn scenario_a_legacy_twin_is_suppressed() {
    let (fed, _) = catalog();
    let page = fed.games.list(&GameFilter::new(), false).await.unwrap();

    assert_eq!(keys(&page), ["supergame", "game1"]);
    assert_eq!(page.games[0].name, "Super Game");
    assert_eq!(page.games[1].id, id_bridge::to_primary(1));
}

#[tokio::test]
async fn total_count_is_sum_of_store_counts() {
    let (fed, _) = catalog();
    let page = fed.games.list(&GameFilter::new(), false).await.unwrap();
    assert_eq!(page.total_count, 3);
}

#[tokio::test]
async fn scenario_b_most_commented_orders_across_stores() {
    let conn = open_memory().unwrap();
    for (key, comments) in [("c1", 1), ("c3", 3), ("c2", 2)] {
        let game = Game::new(key, key, 5.0);
        insert_game(&conn, &game).unwrap();
        for n in 0..comments {
            insert_comment(
                &conn,
                &Comment {
                    id: Uuid::new_v4(),
                    game_id: game.id,
                    author: format!("user{n}"),
                    body: "nice".into(),
                    created_at: Utc::now(),
                },
            )
            .unwrap();
        }
    }
    let legacy = LegacySnapshot {
        products: vec![
            product_with_views(1, "l-first", 40),
            product_with_views(2, "l-second", 90),
        ],
        ..Default::default()
    };
    let fed = federation(conn, legacy);

    let filter = GameFilter::new().with_sort("most-commented");
    let page = fed.games.list(&filter, false).await.unwrap();

    assert_eq!(keys(&page), ["c3", "c2", "c1", "l-first", "l-second"]);
    let counts: Vec<i64> = page.games.iter().map(|g| g.comment_count).collect();
    assert_eq!(counts, [3, 2, 1, 0, 0]);
}

#[tokio::test]
async fn merged_page_is_resorted_globally() {
    let conn = open_memory().unwrap();
    insert_game(&conn, &game_with_views("a", 50)).unwrap();
    insert_game(&conn, &game_with_views("b", 5)).unwrap();
    let legacy = LegacySnapshot {
        products: vec![product_with_views(1, "y", 1), product_with_views(2, "x", 20)],
        ..Default::default()
    };
    let fed = federation(conn, legacy);

    let filter = GameFilter::new().with_sort("most-popular");
    let page = fed.games.list(&filter, false).await.unwrap();
    assert_eq!(keys(&page), ["a", "x", "b", "y"]);
}

#[tokio::test]
async fn merged_page_is_cut_to_page_size() {
    let conn = open_memory().unwrap();
    insert_game(&conn, &game_with_views("a", 50)).unwrap();
    insert_game(&conn, &game_with_views("b", 5)).unwrap();
    let legacy = LegacySnapshot {
        products: vec![product_with_views(1, "x", 20), product_with_views(2, "y", 1)],
        ..Default::default()
    };
    let fed = federation(conn, legacy);

    let filter = GameFilter::new().with_sort("most-popular").with_page(1, "2");
    let page = fed.games.list(&filter, false).await.unwrap();
    assert_eq!(keys(&page), ["a", "x"]);
    assert_eq!(page.total_count, 4);
}

#[tokio::test]
async fn scenario_c_page_size_all_returns_every_match() {
    let conn = open_memory().unwrap();
    for key in ["p1", "p2", "p3"] {
        insert_game(&conn, &Game::new(key, key, 15.0)).unwrap();
    }
    let legacy = LegacySnapshot {
        products: (1..=4)
            .map(|n| {
                LegacyProduct::new(n, format!("l{n}"), format!("L{n}")).with_price(f64::from(n))
            })
            .collect(),
        ..Default::default()
    };
    let fed = federation(conn, legacy);

    let filter = GameFilter::new()
        .with_price_range(Some(1.0), None)
        .with_sort("price-asc")
        .with_page(1, "all");
    let page = fed.games.list(&filter, false).await.unwrap();
    assert_eq!(page.games.len(), 7);
    assert_eq!(page.total_count, 7);
    assert_eq!(keys(&page), ["l1", "l2", "l3", "l4", "p1", "p2", "p3"]);
}

async fn walk_pages(
    fed: &TestFederation,
    sort: &str,
    size: &str,
    pages: u32,
) -> Vec<Vec<String>> {
    let mut walked = Vec::new();
    for page in 1..=pages {
        let filter = GameFilter::new().with_sort(sort).with_page(page, size);
        let listed = fed.games.list(&filter, false).await.unwrap();
        walked.push(keys(&listed).into_iter().map(String::from).collect());
    }
    walked
}

#[tokio::test]
async fn every_row_lands_on_exactly_one_page() {
    let conn = open_memory().unwrap();
    for (key, price) in [("p1", 1.5), ("p2", 2.5), ("p3", 6.0)] {
        insert_game(&conn, &Game::new(key, key, price)).unwrap();
    }
    let legacy = LegacySnapshot {
        products: [(1, 1.0), (2, 2.0), (3, 3.0), (4, 4.0)]
            .into_iter()
            .map(|(n, price)| {
                LegacyProduct::new(n, format!("l{n}"), format!("L{n}")).with_price(price)
            })
            .collect(),
        ..Default::default()
    };
    let fed = federation(conn, legacy);

    let walked = walk_pages(&fed, "price-asc", "2", 5).await;
    assert_eq!(
        walked,
        [
            vec!["l1", "p1"],
            vec!["l2", "p2"],
            vec!["l3", "l4"],
            vec!["p3"],
            vec![],
        ]
    );
}

#[tokio::test]
async fn single_row_pages_reach_primary_games() {
    let (fed, _) = catalog();
    let walked = walk_pages(&fed, "price-asc", "1", 3).await;
    assert_eq!(walked, [vec!["game1"], vec!["supergame"], vec![]]);
}

#[tokio::test]
async fn platform_filter_yields_no_legacy_rows() {
    let (fed, refs) = catalog();

    let filter = GameFilter::new().with_platforms([refs.desktop.id]);
    let page = fed.games.list(&filter, false).await.unwrap();
    assert_eq!(keys(&page), ["supergame"]);
    assert_eq!(page.total_count, 1);

    let filter = GameFilter::new().with_platforms([Uuid::new_v4()]);
    let page = fed.games.list(&filter, false).await.unwrap();
    assert!(page.games.is_empty());
    assert_eq!(page.total_count, 0);
}

#[tokio::test]
async fn recency_filter_yields_no_legacy_rows() {
    let (fed, _) = catalog();
    fed.games
        .create(&Game::new("fresh", "Fresh", 5.0).with_created_at(days_ago(2)))
        .await
        .unwrap();

    let filter = GameFilter::new().with_published_within("last-week");
    let page = fed.games.list(&filter, false).await.unwrap();
    assert_eq!(keys(&page), ["fresh"]);
}

#[tokio::test]
async fn name_filter_is_case_sensitive_on_both_sides() {
    let (fed, _) = catalog();

    let page = fed.games.list(&GameFilter::new().with_name("Game"), false).await.unwrap();
    assert_eq!(keys(&page), ["supergame", "game1"]);

    let page = fed.games.list(&GameFilter::new().with_name("game"), false).await.unwrap();
    assert!(page.games.is_empty());
}

#[tokio::test]
async fn genre_and_publisher_filters_bridge_legacy_ids() {
    let (fed, refs) = catalog();

    let filter = GameFilter::new().with_genres([id_bridge::to_primary(1)]);
    let page = fed.games.list(&filter, false).await.unwrap();
    assert_eq!(keys(&page), ["game1"]);

    let filter = GameFilter::new().with_genres([refs.strategy.id]);
    let page = fed.games.list(&filter, false).await.unwrap();
    assert_eq!(keys(&page), ["supergame"]);

    let filter = GameFilter::new().with_publisher(id_bridge::to_primary(1));
    let page = fed.games.list(&filter, false).await.unwrap();
    assert_eq!(keys(&page), ["game1"]);
}

#[tokio::test]
async fn price_filter_does_not_resurface_suppressed_twin() {
    let (fed, _) = catalog();
    let filter = GameFilter::new().with_price_range(Some(20.0), None);
    let page = fed.games.list(&filter, false).await.unwrap();
    assert_eq!(keys(&page), ["supergame"]);
}

#[tokio::test]
async fn unknown_sort_fails_the_query() {
    let (fed, _) = catalog();
    let err = fed
        .games
        .list(&GameFilter::new().with_sort("random"), false)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Invalid sorting option: random");
}

// ── Deletion shadowing ──────────────────────────────────────────────────────

#[tokio::test]
async fn deleted_migrated_game_never_resurfaces() {
    let (fed, _) = catalog();
    fed.games.delete("game1").await.unwrap();

    let page = fed.games.list(&GameFilter::new(), false).await.unwrap();
    assert_eq!(keys(&page), ["supergame"]);
    assert!(fed.games.get_by_key("game1", false).await.unwrap().is_none());
    assert!(
        fed.games
            .get_by_id(id_bridge::to_primary(1), false)
            .await
            .unwrap()
            .is_none()
    );

    // The legacy document is still there.
    assert!(fed.legacy().product_by_key("game1").await.unwrap().is_some());

    // A permitted caller sees the deleted row exactly once.
    let page = fed.games.list(&GameFilter::new(), true).await.unwrap();
    assert_eq!(keys(&page), ["supergame", "game1"]);
    assert!(page.games[1].is_deleted);
}

#[tokio::test]
async fn deleting_unknown_game_is_not_found() {
    let (fed, _) = catalog();
    let err = fed.games.delete("missing").await.unwrap_err();
    assert!(matches!(err, FederationError::NotFound { .. }));
}

// ── Single lookups ──────────────────────────────────────────────────────────

#[tokio::test]
async fn lookup_falls_back_to_resolved_legacy_game() {
    let (fed, _) = catalog();
    let game = fed.games.get_by_key("game1", false).await.unwrap().unwrap();

    assert_eq!(game.id, id_bridge::to_primary(1));
    assert_eq!(game.created_at, None);
    assert_eq!(game.genres.len(), 1);
    assert_eq!(game.genres[0].name, "Puzzle");
    assert_eq!(game.genres[0].id, id_bridge::to_primary(1));
    assert_eq!(game.publisher.unwrap().company_name, "Exotic Liquids");
}

#[tokio::test]
async fn resolver_prefers_migrated_references() {
    let conn = open_memory().unwrap();
    seed_primary(&conn);
    let migrated = Genre {
        id: id_bridge::to_primary(1),
        name: "Puzzle Games".into(),
        parent_id: None,
        is_deleted: false,
    };
    insert_genre(&conn, &migrated).unwrap();
    let fed = federation(conn, legacy_fixture());

    let game = fed.games.get_by_key("game1", false).await.unwrap().unwrap();
    assert_eq!(game.genres, [migrated]);
}

#[tokio::test]
async fn lookup_by_id_of_shadowed_legacy_twin_is_none() {
    let (fed, _) = catalog();
    assert!(
        fed.games
            .get_by_id(id_bridge::to_primary(2), false)
            .await
            .unwrap()
            .is_none()
    );
    let game = fed.games.get_by_id(id_bridge::to_primary(1), false).await.unwrap();
    assert_eq!(game.unwrap().key, "game1");
}

#[tokio::test]
async fn missing_everywhere_is_none() {
    let (fed, _) = catalog();
    assert!(fed.games.get_by_key("nope", true).await.unwrap().is_none());
}

// ── Counters ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn legacy_views_are_incremented_in_place_and_logged() {
    let (fed, _) = catalog();
    assert_eq!(fed.games.increment_views("game1").await.unwrap(), 6);

    let product = fed.legacy().product_by_key("game1").await.unwrap().unwrap();
    assert_eq!(product.view_count, 6);
    let logs = fed.legacy().logs().await;
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].entity_type, "product");

    // Nothing was migrated.
    let migrated = fed
        .primary()
        .with_conn(|c| find_game_by_key(c, "game1"))
        .await
        .unwrap();
    assert!(migrated.is_none());
}

#[tokio::test]
async fn primary_views_stay_in_primary_store() {
    let (fed, _) = catalog();
    assert_eq!(fed.games.increment_views("supergame").await.unwrap(), 11);

    let game = fed.games.get_by_key("supergame", false).await.unwrap().unwrap();
    assert_eq!(game.view_count, 11);
    assert!(fed.legacy().logs().await.is_empty());
}

#[tokio::test]
async fn stock_adjustments_route_by_store() {
    let (fed, _) = catalog();
    assert_eq!(fed.games.adjust_stock("game1", -2).await.unwrap(), 3);
    assert_eq!(fed.games.adjust_stock("supergame", 3).await.unwrap(), 15);

    let err = fed.games.adjust_stock("nope", 1).await.unwrap_err();
    assert!(matches!(err, FederationError::NotFound { .. }));
}

// ── Writes on legacy-only games ─────────────────────────────────────────────

#[tokio::test]
async fn commenting_migrates_legacy_game() {
    let (fed, _) = catalog();
    fed.games.add_comment("game1", "ann", "great").await.unwrap();

    let migrated = fed
        .primary()
        .with_conn(|c| find_game_by_key(c, "game1"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(migrated.id, id_bridge::to_primary(1));
    assert_eq!(migrated.comment_count, 1);
    assert_eq!(migrated.publisher.unwrap().company_name, "Exotic Liquids");

    let page = fed.games.list(&GameFilter::new(), false).await.unwrap();
    assert_eq!(keys(&page), ["supergame", "game1"]);
    assert_eq!(fed.games.comments_for("game1").await.unwrap().len(), 1);
}

#[tokio::test]
async fn comments_of_legacy_only_game_are_empty() {
    let (fed, _) = catalog();
    assert!(fed.games.comments_for("game1").await.unwrap().is_empty());
    assert!(matches!(
        fed.games.comments_for("nope").await.unwrap_err(),
        FederationError::NotFound { .. }
    ));
}

#[tokio::test]
async fn rekeying_legacy_game_leaves_shadow() {
    let (fed, _) = catalog();
    let mut game = fed.games.get_by_key("game1", false).await.unwrap().unwrap();
    game.key = "game-one".into();
    game.price = 12.5;
    fed.games.update(&game).await.unwrap();

    let page = fed.games.list(&GameFilter::new(), false).await.unwrap();
    assert_eq!(keys(&page), ["supergame", "game-one"]);
    assert!(fed.games.get_by_key("game1", false).await.unwrap().is_none());

    let updated = fed.games.get_by_key("game-one", false).await.unwrap().unwrap();
    assert_eq!(updated.price, 12.5);
    assert_eq!(updated.id, id_bridge::to_primary(1));
}

#[tokio::test]
async fn create_rejects_key_known_to_either_store() {
    let (fed, _) = catalog();
    for key in ["game1", "supergame"] {
        let err = fed.games.create(&Game::new(key, "Dup", 1.0)).await.unwrap_err();
        assert!(matches!(err, FederationError::DuplicateKey(_)));
    }
}

#[tokio::test]
async fn counter_tracks_creates_and_deletes() {
    let (fed, _) = catalog();
    assert_eq!(fed.games.seed_counter().await.unwrap(), 3);

    fed.games.create(&Game::new("new", "New", 1.0)).await.unwrap();
    assert_eq!(fed.games.counter().get(), 4);

    fed.games.delete("new").await.unwrap();
    assert_eq!(fed.games.counter().get(), 3);
}
