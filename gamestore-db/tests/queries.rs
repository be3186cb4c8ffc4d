use chrono::{Duration, TimeZone, Utc};
use gamestore_catalog::types::*;
use gamestore_db::*;
use uuid::Uuid;

struct Fixture {
    conn: rusqlite::Connection,
    rpg: Genre,
    desktop: Platform,
    publisher: Publisher,
}

fn setup_db() -> Fixture {
    let conn = open_memory().unwrap();
    let rpg = Genre::new("RPG");
    let action = Genre::new("Action");
    insert_genres(&conn, &[rpg.clone(), action.clone()]).unwrap();
    let publisher = Publisher::new("Bethesda");
    insert_publisher(&conn, &publisher).unwrap();
    let desktop = Platform::new("Desktop");
    let console = Platform::new("Console");

    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let games = [
        Game::new("skyrim", "Skyrim", 40.0)
            .with_genre(rpg.clone())
            .with_platform(desktop.clone())
            .with_publisher(publisher.clone())
            .with_created_at(base),
        Game::new("doom", "Doom", 20.0)
            .with_genre(action.clone())
            .with_platform(console.clone())
            .with_publisher(publisher.clone())
            .with_created_at(base + Duration::days(30)),
        Game::new("fallout", "Fallout", 30.0)
            .with_genre(rpg.clone())
            .with_genre(action)
            .with_platform(desktop.clone())
            .with_platform(console)
            .with_created_at(base + Duration::days(60)),
    ];
    for game in &games {
        insert_game(&conn, game).unwrap();
    }
    Fixture {
        conn,
        rpg,
        desktop,
        publisher,
    }
}

fn keys(games: &[Game]) -> Vec<&str> {
    games.iter().map(|g| g.key.as_str()).collect()
}

#[test]
fn natural_order_is_insertion_order() {
    let f = setup_db();
    let games = query_games(&f.conn, &GameQuery::new()).unwrap();
    assert_eq!(keys(&games), ["skyrim", "doom", "fallout"]);
}

#[test]
fn name_match_is_case_sensitive() {
    let f = setup_db();
    let hits = query_games(&f.conn, &GameQuery::new().name_contains("Sky")).unwrap();
    assert_eq!(keys(&hits), ["skyrim"]);
    let misses = query_games(&f.conn, &GameQuery::new().name_contains("sky")).unwrap();
    assert!(misses.is_empty());
}

#[test]
fn genre_and_platform_membership() {
    let f = setup_db();
    let rpgs = query_games(&f.conn, &GameQuery::new().in_genres(&[f.rpg.id])).unwrap();
    assert_eq!(keys(&rpgs), ["skyrim", "fallout"]);
    let desktop = query_games(&f.conn, &GameQuery::new().on_platforms(&[f.desktop.id])).unwrap();
    assert_eq!(keys(&desktop), ["skyrim", "fallout"]);
}

#[test]
fn publisher_and_price_bounds() {
    let f = setup_db();
    let q = GameQuery::new()
        .published_by(f.publisher.id)
        .price_at_least(20.0)
        .price_at_most(30.0);
    assert_eq!(keys(&query_games(&f.conn, &q).unwrap()), ["doom"]);
}

#[test]
fn created_since_filters_by_date() {
    let f = setup_db();
    let since = Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap();
    let q = GameQuery::new().created_since(since);
    assert_eq!(keys(&query_games(&f.conn, &q).unwrap()), ["doom", "fallout"]);
}

#[test]
fn orderings() {
    let f = setup_db();
    let by_price = query_games(&f.conn, &GameQuery::new().order_by(GameOrder::PriceAsc)).unwrap();
    assert_eq!(keys(&by_price), ["doom", "fallout", "skyrim"]);
    let newest = query_games(&f.conn, &GameQuery::new().order_by(GameOrder::CreatedDesc)).unwrap();
    assert_eq!(keys(&newest), ["fallout", "doom", "skyrim"]);
}

#[test]
fn comment_order_counts_comments() {
    let f = setup_db();
    let doom = find_game_by_key(&f.conn, "doom").unwrap().unwrap();
    insert_comment(
        &f.conn,
        &Comment {
            id: Uuid::new_v4(),
            game_id: doom.id,
            author: "bob".to_string(),
            body: "rip and tear".to_string(),
            created_at: Utc::now(),
        },
    )
    .unwrap();
    let games =
        query_games(&f.conn, &GameQuery::new().order_by(GameOrder::CommentsDesc)).unwrap();
    assert_eq!(games[0].key, "doom");
    assert_eq!(games[0].comment_count, 1);
}

#[test]
fn page_window_and_count() {
    let f = setup_db();
    let q = GameQuery::new().order_by(GameOrder::PriceDesc).paginate(1, 1);
    assert_eq!(keys(&query_games(&f.conn, &q).unwrap()), ["fallout"]);
    assert_eq!(count_games(&f.conn, &q).unwrap(), 3);
}

#[test]
fn exclude_deleted_hides_soft_deleted_rows() {
    let f = setup_db();
    let doom = find_game_by_key(&f.conn, "doom").unwrap().unwrap();
    soft_delete_game(&f.conn, doom.id).unwrap();
    let visible = query_games(&f.conn, &GameQuery::new().exclude_deleted()).unwrap();
    assert_eq!(keys(&visible), ["skyrim", "fallout"]);
    let all = query_games(&f.conn, &GameQuery::new()).unwrap();
    assert_eq!(all.len(), 3);
}

#[test]
fn lookup_by_keys_or_ids_includes_deleted() {
    let f = setup_db();
    let skyrim = find_game_by_key(&f.conn, "skyrim").unwrap().unwrap();
    soft_delete_game(&f.conn, skyrim.id).unwrap();
    let found =
        find_games_by_keys_or_ids(&f.conn, &["doom".to_string()], &[skyrim.id]).unwrap();
    assert_eq!(keys(&found), ["skyrim", "doom"]);
    assert!(find_games_by_keys_or_ids(&f.conn, &[], &[]).unwrap().is_empty());
}

#[test]
fn reference_listings() {
    let f = setup_db();
    let genres = list_genres(&f.conn).unwrap();
    assert_eq!(genres.iter().map(|g| g.name.as_str()).collect::<Vec<_>>(), ["Action", "RPG"]);
    assert_eq!(list_publishers(&f.conn).unwrap().len(), 1);
}

#[test]
fn orders_newest_first() {
    let f = setup_db();
    let older = Order {
        id: Uuid::new_v4(),
        customer_id: "ALFKI".to_string(),
        order_date: Utc.with_ymd_and_hms(2023, 5, 1, 0, 0, 0).unwrap(),
        ship_city: None,
    };
    let newer = Order {
        id: Uuid::new_v4(),
        customer_id: "ALFKI".to_string(),
        order_date: Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap(),
        ship_city: Some("Berlin".to_string()),
    };
    insert_order(&f.conn, &older).unwrap();
    insert_order(&f.conn, &newer).unwrap();
    let orders = list_orders(&f.conn).unwrap();
    assert_eq!(orders, vec![newer.clone(), older]);
    assert_eq!(find_order_by_id(&f.conn, newer.id).unwrap(), Some(newer));
}
