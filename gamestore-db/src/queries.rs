//! Read queries for the primary store.
//!
//! Game lookups here return soft-deleted rows too; hiding them is the
//! caller's decision (via [`GameQuery::exclude_deleted`] or explicitly).

use chrono::{DateTime, SecondsFormat, Utc};
use gamestore_catalog::types::*;
use rusqlite::types::Type;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use uuid::Uuid;

use crate::operations::OperationError;
use crate::query::{GameQuery, GAME_COLUMNS};

// ── Game Queries ────────────────────────────────────────────────────────────

/// Run a game query, loading genres, platforms and publisher for each row.
pub fn query_games(conn: &Connection, query: &GameQuery) -> Result<Vec<Game>, OperationError> {
    let mut stmt = conn.prepare(&query.select_sql())?;
    let rows = stmt.query_map(params_from_iter(query.params()), row_to_game)?;
    let rows = rows.collect::<Result<Vec<_>, _>>()?;
    rows.into_iter()
        .map(|(game, publisher_id)| attach_relations(conn, game, publisher_id))
        .collect()
}

/// Count rows matching a game query, ignoring its page window.
pub fn count_games(conn: &Connection, query: &GameQuery) -> Result<u64, OperationError> {
    let count: i64 = conn.query_row(
        &query.count_sql(),
        params_from_iter(query.params()),
        |row| row.get(0),
    )?;
    Ok(count as u64)
}

/// Find a game by natural key, deleted or not.
pub fn find_game_by_key(conn: &Connection, key: &str) -> Result<Option<Game>, OperationError> {
    find_game_where(conn, "g.game_key = ?1", &key)
}

/// Find a game by identifier, deleted or not.
pub fn find_game_by_id(conn: &Connection, id: Uuid) -> Result<Option<Game>, OperationError> {
    find_game_where(conn, "g.id = ?1", &id.to_string())
}

/// All games, deleted or not, whose key is in `keys` or whose id is in `ids`.
///
/// Used to find the primary rows that shadow a page of legacy documents.
pub fn find_games_by_keys_or_ids(
    conn: &Connection,
    keys: &[String],
    ids: &[Uuid],
) -> Result<Vec<Game>, OperationError> {
    if keys.is_empty() && ids.is_empty() {
        return Ok(Vec::new());
    }
    let mut clauses = Vec::new();
    let mut values: Vec<String> = Vec::new();
    if !keys.is_empty() {
        clauses.push(format!("g.game_key IN ({})", vec!["?"; keys.len()].join(", ")));
        values.extend(keys.iter().cloned());
    }
    if !ids.is_empty() {
        clauses.push(format!("g.id IN ({})", vec!["?"; ids.len()].join(", ")));
        values.extend(ids.iter().map(Uuid::to_string));
    }
    let sql = format!(
        "SELECT {GAME_COLUMNS} FROM games g WHERE {} ORDER BY g.rowid",
        clauses.join(" OR ")
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(values.iter()), row_to_game)?;
    let rows = rows.collect::<Result<Vec<_>, _>>()?;
    rows.into_iter()
        .map(|(game, publisher_id)| attach_relations(conn, game, publisher_id))
        .collect()
}

/// Number of games that are not soft-deleted.
pub fn count_active_games(conn: &Connection) -> Result<u64, OperationError> {
    let count: i64 =
        conn.query_row("SELECT COUNT(*) FROM games WHERE is_deleted = 0", [], |r| r.get(0))?;
    Ok(count as u64)
}

fn find_game_where(
    conn: &Connection,
    condition: &str,
    value: &dyn rusqlite::ToSql,
) -> Result<Option<Game>, OperationError> {
    let sql = format!("SELECT {GAME_COLUMNS} FROM games g WHERE {condition} LIMIT 1");
    let found = conn
        .query_row(&sql, params![value], row_to_game)
        .optional()?;
    match found {
        Some((game, publisher_id)) => Ok(Some(attach_relations(conn, game, publisher_id)?)),
        None => Ok(None),
    }
}

fn attach_relations(
    conn: &Connection,
    mut game: Game,
    publisher_id: Option<Uuid>,
) -> Result<Game, OperationError> {
    game.genres = genres_for_game(conn, game.id)?;
    game.platforms = platforms_for_game(conn, game.id)?;
    game.publisher = match publisher_id {
        Some(id) => find_publisher_by_id(conn, id)?,
        None => None,
    };
    Ok(game)
}

// ── Genre Queries ───────────────────────────────────────────────────────────

/// All genres including soft-deleted ones, ordered by name.
pub fn list_genres(conn: &Connection) -> Result<Vec<Genre>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, parent_id, is_deleted FROM genres ORDER BY name",
    )?;
    let rows = stmt.query_map([], row_to_genre)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

pub fn find_genre_by_id(conn: &Connection, id: Uuid) -> Result<Option<Genre>, OperationError> {
    conn.query_row(
        "SELECT id, name, parent_id, is_deleted FROM genres WHERE id = ?1",
        params![id.to_string()],
        row_to_genre,
    )
    .optional()
    .map_err(Into::into)
}

pub fn find_genre_by_name(conn: &Connection, name: &str) -> Result<Option<Genre>, OperationError> {
    conn.query_row(
        "SELECT id, name, parent_id, is_deleted FROM genres WHERE name = ?1",
        params![name],
        row_to_genre,
    )
    .optional()
    .map_err(Into::into)
}

pub fn genres_for_game(conn: &Connection, game_id: Uuid) -> Result<Vec<Genre>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT g.id, g.name, g.parent_id, g.is_deleted
         FROM genres g JOIN game_genres gg ON gg.genre_id = g.id
         WHERE gg.game_id = ?1 ORDER BY g.name",
    )?;
    let rows = stmt.query_map(params![game_id.to_string()], row_to_genre)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Publisher Queries ───────────────────────────────────────────────────────

/// All publishers including soft-deleted ones, ordered by company name.
pub fn list_publishers(conn: &Connection) -> Result<Vec<Publisher>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, company_name, home_page, description, is_deleted
         FROM publishers ORDER BY company_name",
    )?;
    let rows = stmt.query_map([], row_to_publisher)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

pub fn find_publisher_by_id(
    conn: &Connection,
    id: Uuid,
) -> Result<Option<Publisher>, OperationError> {
    conn.query_row(
        "SELECT id, company_name, home_page, description, is_deleted
         FROM publishers WHERE id = ?1",
        params![id.to_string()],
        row_to_publisher,
    )
    .optional()
    .map_err(Into::into)
}

pub fn find_publisher_by_name(
    conn: &Connection,
    company_name: &str,
) -> Result<Option<Publisher>, OperationError> {
    conn.query_row(
        "SELECT id, company_name, home_page, description, is_deleted
         FROM publishers WHERE company_name = ?1",
        params![company_name],
        row_to_publisher,
    )
    .optional()
    .map_err(Into::into)
}

// ── Platform Queries ────────────────────────────────────────────────────────

pub fn platforms_for_game(
    conn: &Connection,
    game_id: Uuid,
) -> Result<Vec<Platform>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT p.id, p.kind FROM platforms p
         JOIN game_platforms gp ON gp.platform_id = p.id
         WHERE gp.game_id = ?1 ORDER BY p.kind",
    )?;
    let rows = stmt.query_map(params![game_id.to_string()], row_to_platform)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Comment Queries ─────────────────────────────────────────────────────────

/// Comments on a game, oldest first.
pub fn comments_for_game(conn: &Connection, game_id: Uuid) -> Result<Vec<Comment>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, game_id, author, body, created_at FROM comments
         WHERE game_id = ?1 ORDER BY created_at, rowid",
    )?;
    let rows = stmt.query_map(params![game_id.to_string()], |row| {
        Ok(Comment {
            id: uuid_column(row, 0)?,
            game_id: uuid_column(row, 1)?,
            author: row.get(2)?,
            body: row.get(3)?,
            created_at: timestamp_column(row, 4)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Order Queries ───────────────────────────────────────────────────────────

/// All orders, newest first.
pub fn list_orders(conn: &Connection) -> Result<Vec<Order>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, customer_id, order_date, ship_city FROM orders
         ORDER BY order_date DESC, rowid",
    )?;
    let rows = stmt.query_map([], row_to_order)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

pub fn find_order_by_id(conn: &Connection, id: Uuid) -> Result<Option<Order>, OperationError> {
    conn.query_row(
        "SELECT id, customer_id, order_date, ship_city FROM orders WHERE id = ?1",
        params![id.to_string()],
        row_to_order,
    )
    .optional()
    .map_err(Into::into)
}

// ── Row Mapping Helpers ─────────────────────────────────────────────────────

/// Timestamps are stored as RFC 3339 UTC text with second precision, which
/// keeps lexicographic and chronological order identical.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn row_to_game(row: &rusqlite::Row<'_>) -> rusqlite::Result<(Game, Option<Uuid>)> {
    let game = Game {
        id: uuid_column(row, 0)?,
        key: row.get(1)?,
        name: row.get(2)?,
        description: row.get(3)?,
        price: row.get(4)?,
        units_in_stock: row.get(5)?,
        discount: row.get(6)?,
        created_at: Some(timestamp_column(row, 7)?),
        is_deleted: row.get(8)?,
        view_count: row.get(9)?,
        comment_count: row.get(11)?,
        genres: Vec::new(),
        platforms: Vec::new(),
        publisher: None,
    };
    let publisher_id = optional_uuid_column(row, 10)?;
    Ok((game, publisher_id))
}

fn row_to_genre(row: &rusqlite::Row<'_>) -> rusqlite::Result<Genre> {
    Ok(Genre {
        id: uuid_column(row, 0)?,
        name: row.get(1)?,
        parent_id: optional_uuid_column(row, 2)?,
        is_deleted: row.get(3)?,
    })
}

fn row_to_publisher(row: &rusqlite::Row<'_>) -> rusqlite::Result<Publisher> {
    Ok(Publisher {
        id: uuid_column(row, 0)?,
        company_name: row.get(1)?,
        home_page: row.get(2)?,
        description: row.get(3)?,
        is_deleted: row.get(4)?,
    })
}

fn row_to_platform(row: &rusqlite::Row<'_>) -> rusqlite::Result<Platform> {
    Ok(Platform {
        id: uuid_column(row, 0)?,
        kind: row.get(1)?,
    })
}

fn row_to_order(row: &rusqlite::Row<'_>) -> rusqlite::Result<Order> {
    Ok(Order {
        id: uuid_column(row, 0)?,
        customer_id: row.get(1)?,
        order_date: timestamp_column(row, 2)?,
        ship_city: row.get(3)?,
    })
}

fn uuid_column(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<Uuid> {
    let text: String = row.get(idx)?;
    Uuid::parse_str(&text)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn optional_uuid_column(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<Option<Uuid>> {
    let text: Option<String> = row.get(idx)?;
    text.map(|t| {
        Uuid::parse_str(&t)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
    })
    .transpose()
}

fn timestamp_column(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let text: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&text)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
