//! SQLite persistence layer for the primary (relational) game store.
//!
//! Provides schema creation, write operations, read queries and the
//! [`GameQuery`] builder the catalog pipeline projects its filters onto.

pub mod operations;
pub mod queries;
pub mod query;
pub mod schema;

pub use operations::{
    add_game_views, adjust_game_stock, insert_comment, insert_game, insert_genre, insert_genres,
    insert_order, insert_publisher, soft_delete_game, update_game, upsert_platform, OperationError,
};
pub use queries::{
    comments_for_game, count_active_games, count_games, find_game_by_id, find_game_by_key,
    find_games_by_keys_or_ids, find_genre_by_id, find_genre_by_name, find_order_by_id,
    find_publisher_by_id, find_publisher_by_name, format_timestamp, genres_for_game, list_genres,
    list_orders, list_publishers, platforms_for_game, query_games,
};
pub use query::{GameOrder, GameQuery};
pub use schema::{open_database, open_memory, SchemaError};
