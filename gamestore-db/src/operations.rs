//! Write operations for the primary store.
//!
//! Deletes are soft: rows get `is_deleted = 1` and stay in place so a
//! deleted game keeps shadowing its legacy twin.

use chrono::Utc;
use gamestore_catalog::types::*;
use rusqlite::{params, Connection};
use thiserror::Error;
use uuid::Uuid;

use crate::queries::format_timestamp;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Entity not found: {entity_type} with id '{id}'")]
    NotFound { entity_type: String, id: String },
}

impl OperationError {
    fn not_found(entity_type: &str, id: Uuid) -> Self {
        Self::NotFound {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        }
    }
}

// ── Publisher Operations ────────────────────────────────────────────────────

pub fn insert_publisher(conn: &Connection, publisher: &Publisher) -> Result<(), OperationError> {
    conn.execute(
        "INSERT INTO publishers (id, company_name, home_page, description, is_deleted)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            publisher.id.to_string(),
            publisher.company_name,
            publisher.home_page,
            publisher.description,
            publisher.is_deleted,
        ],
    )?;
    Ok(())
}

// ── Genre Operations ────────────────────────────────────────────────────────

pub fn insert_genre(conn: &Connection, genre: &Genre) -> Result<(), OperationError> {
    conn.execute(
        "INSERT INTO genres (id, name, parent_id, is_deleted) VALUES (?1, ?2, ?3, ?4)",
        params![
            genre.id.to_string(),
            genre.name,
            genre.parent_id.map(|p| p.to_string()),
            genre.is_deleted,
        ],
    )?;
    Ok(())
}

/// Insert several genres in one transaction; either all land or none do.
pub fn insert_genres(conn: &Connection, genres: &[Genre]) -> Result<(), OperationError> {
    if genres.is_empty() {
        return Ok(());
    }
    let tx = conn.unchecked_transaction()?;
    for genre in genres {
        insert_genre(&tx, genre)?;
    }
    tx.commit()?;
    Ok(())
}

// ── Platform Operations ─────────────────────────────────────────────────────

/// Insert a platform unless one with the same id already exists.
pub fn upsert_platform(conn: &Connection, platform: &Platform) -> Result<(), OperationError> {
    conn.execute(
        "INSERT INTO platforms (id, kind) VALUES (?1, ?2)
         ON CONFLICT(id) DO UPDATE SET kind = excluded.kind",
        params![platform.id.to_string(), platform.kind],
    )?;
    Ok(())
}

// ── Game Operations ─────────────────────────────────────────────────────────

/// Insert a game with its genre and platform links.
///
/// Genres and the publisher must already exist; platforms are upserted.
/// A game without `created_at` is stamped with the current time.
pub fn insert_game(conn: &Connection, game: &Game) -> Result<(), OperationError> {
    let tx = conn.unchecked_transaction()?;
    let created_at = game.created_at.unwrap_or_else(Utc::now);
    tx.execute(
        "INSERT INTO games (id, game_key, name, description, price, units_in_stock,
             discount, view_count, publisher_id, is_deleted, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            game.id.to_string(),
            game.key,
            game.name,
            game.description,
            game.price,
            game.units_in_stock,
            game.discount,
            game.view_count,
            game.publisher.as_ref().map(|p| p.id.to_string()),
            game.is_deleted,
            format_timestamp(&created_at),
        ],
    )?;
    link_relations(&tx, game)?;
    tx.commit()?;
    Ok(())
}

/// Overwrite a game's fields and relations, matched by id.
pub fn update_game(conn: &Connection, game: &Game) -> Result<(), OperationError> {
    let tx = conn.unchecked_transaction()?;
    let changed = tx.execute(
        "UPDATE games SET game_key = ?2, name = ?3, description = ?4, price = ?5,
             units_in_stock = ?6, discount = ?7, publisher_id = ?8
         WHERE id = ?1",
        params![
            game.id.to_string(),
            game.key,
            game.name,
            game.description,
            game.price,
            game.units_in_stock,
            game.discount,
            game.publisher.as_ref().map(|p| p.id.to_string()),
        ],
    )?;
    if changed == 0 {
        return Err(OperationError::not_found("game", game.id));
    }
    tx.execute(
        "DELETE FROM game_genres WHERE game_id = ?1",
        params![game.id.to_string()],
    )?;
    tx.execute(
        "DELETE FROM game_platforms WHERE game_id = ?1",
        params![game.id.to_string()],
    )?;
    link_relations(&tx, game)?;
    tx.commit()?;
    Ok(())
}

pub fn soft_delete_game(conn: &Connection, id: Uuid) -> Result<(), OperationError> {
    let changed = conn.execute(
        "UPDATE games SET is_deleted = 1 WHERE id = ?1",
        params![id.to_string()],
    )?;
    if changed == 0 {
        return Err(OperationError::not_found("game", id));
    }
    Ok(())
}

/// Add `delta` to a game's view counter.
pub fn add_game_views(conn: &Connection, id: Uuid, delta: i64) -> Result<(), OperationError> {
    let changed = conn.execute(
        "UPDATE games SET view_count = view_count + ?2 WHERE id = ?1",
        params![id.to_string(), delta],
    )?;
    if changed == 0 {
        return Err(OperationError::not_found("game", id));
    }
    Ok(())
}

/// Add `delta` (possibly negative) to a game's stock.
pub fn adjust_game_stock(conn: &Connection, id: Uuid, delta: i32) -> Result<(), OperationError> {
    let changed = conn.execute(
        "UPDATE games SET units_in_stock = units_in_stock + ?2 WHERE id = ?1",
        params![id.to_string(), delta],
    )?;
    if changed == 0 {
        return Err(OperationError::not_found("game", id));
    }
    Ok(())
}

fn link_relations(conn: &Connection, game: &Game) -> Result<(), OperationError> {
    for genre in &game.genres {
        conn.execute(
            "INSERT OR IGNORE INTO game_genres (game_id, genre_id) VALUES (?1, ?2)",
            params![game.id.to_string(), genre.id.to_string()],
        )?;
    }
    for platform in &game.platforms {
        upsert_platform(conn, platform)?;
        conn.execute(
            "INSERT OR IGNORE INTO game_platforms (game_id, platform_id) VALUES (?1, ?2)",
            params![game.id.to_string(), platform.id.to_string()],
        )?;
    }
    Ok(())
}

// ── Comment Operations ──────────────────────────────────────────────────────

pub fn insert_comment(conn: &Connection, comment: &Comment) -> Result<(), OperationError> {
    conn.execute(
        "INSERT INTO comments (id, game_id, author, body, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            comment.id.to_string(),
            comment.game_id.to_string(),
            comment.author,
            comment.body,
            format_timestamp(&comment.created_at),
        ],
    )?;
    Ok(())
}

// ── Order Operations ────────────────────────────────────────────────────────

pub fn insert_order(conn: &Connection, order: &Order) -> Result<(), OperationError> {
    conn.execute(
        "INSERT INTO orders (id, customer_id, order_date, ship_city) VALUES (?1, ?2, ?3, ?4)",
        params![
            order.id.to_string(),
            order.customer_id,
            format_timestamp(&order.order_date),
            order.ship_city,
        ],
    )?;
    Ok(())
}
