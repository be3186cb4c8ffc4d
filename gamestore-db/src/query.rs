//! Composable SQL query over the `games` table.
//!
//! A `GameQuery` accumulates `WHERE` fragments with positional parameters,
//! one ordering, and an optional page window. It is a plain value: each
//! builder method consumes and returns it, so the same base query can be
//! cloned into a count query and a paged query.

use chrono::{DateTime, Utc};
use rusqlite::types::Value;
use uuid::Uuid;

use crate::queries::format_timestamp;

/// Orderings the primary store can express.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GameOrder {
    /// Insertion order.
    #[default]
    Natural,
    ViewsDesc,
    CommentsDesc,
    PriceAsc,
    PriceDesc,
    CreatedDesc,
}

impl GameOrder {
    fn sql(&self) -> &'static str {
        match self {
            Self::Natural => "g.rowid",
            Self::ViewsDesc => "g.view_count DESC, g.rowid",
            Self::CommentsDesc => "comment_count DESC, g.rowid",
            Self::PriceAsc => "g.price ASC, g.rowid",
            Self::PriceDesc => "g.price DESC, g.rowid",
            Self::CreatedDesc => "g.created_at DESC, g.rowid",
        }
    }
}

pub(crate) const GAME_COLUMNS: &str = "g.id, g.game_key, g.name, g.description, g.price,
        g.units_in_stock, g.discount, g.created_at, g.is_deleted, g.view_count,
        g.publisher_id,
        (SELECT COUNT(*) FROM comments c WHERE c.game_id = g.id) AS comment_count";

#[derive(Debug, Clone, Default)]
pub struct GameQuery {
    conditions: Vec<String>,
    params: Vec<Value>,
    order: GameOrder,
    /// `(offset, limit)`
    window: Option<(u64, u64)>,
}

impl GameQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-sensitive substring match on the game name.
    pub fn name_contains(mut self, fragment: &str) -> Self {
        self.conditions.push("instr(g.name, ?) > 0".to_string());
        self.params.push(Value::Text(fragment.to_string()));
        self
    }

    /// Games linked to at least one of `genre_ids`. An empty slice adds no constraint.
    pub fn in_genres(self, genre_ids: &[Uuid]) -> Self {
        self.member_of("game_genres", "genre_id", genre_ids)
    }

    /// Games available on at least one of `platform_ids`. An empty slice adds no constraint.
    pub fn on_platforms(self, platform_ids: &[Uuid]) -> Self {
        self.member_of("game_platforms", "platform_id", platform_ids)
    }

    pub fn published_by(mut self, publisher_id: Uuid) -> Self {
        self.conditions.push("g.publisher_id = ?".to_string());
        self.params.push(Value::Text(publisher_id.to_string()));
        self
    }

    /// Inclusive lower price bound.
    pub fn price_at_least(mut self, min: f64) -> Self {
        self.conditions.push("g.price >= ?".to_string());
        self.params.push(Value::Real(min));
        self
    }

    /// Inclusive upper price bound.
    pub fn price_at_most(mut self, max: f64) -> Self {
        self.conditions.push("g.price <= ?".to_string());
        self.params.push(Value::Real(max));
        self
    }

    /// Games created at or after `since`.
    pub fn created_since(mut self, since: DateTime<Utc>) -> Self {
        self.conditions.push("g.created_at >= ?".to_string());
        self.params.push(Value::Text(format_timestamp(&since)));
        self
    }

    pub fn exclude_deleted(mut self) -> Self {
        self.conditions.push("g.is_deleted = 0".to_string());
        self
    }

    pub fn order_by(mut self, order: GameOrder) -> Self {
        self.order = order;
        self
    }

    pub fn paginate(mut self, offset: u64, limit: u64) -> Self {
        self.window = Some((offset, limit));
        self
    }

    /// The same filter without its page window, for counting.
    pub fn without_page(&self) -> Self {
        Self {
            window: None,
            ..self.clone()
        }
    }

    pub fn order(&self) -> GameOrder {
        self.order
    }

    pub fn window(&self) -> Option<(u64, u64)> {
        self.window
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }

    pub fn select_sql(&self) -> String {
        let mut sql = format!("SELECT {GAME_COLUMNS} FROM games g");
        self.push_where(&mut sql);
        sql.push_str(" ORDER BY ");
        sql.push_str(self.order.sql());
        if let Some((offset, limit)) = self.window {
            sql.push_str(&format!(" LIMIT {limit} OFFSET {offset}"));
        }
        sql
    }

    /// Counts every row matching the filter, ignoring the page window.
    pub fn count_sql(&self) -> String {
        let mut sql = "SELECT COUNT(*) FROM games g".to_string();
        self.push_where(&mut sql);
        sql
    }

    fn push_where(&self, sql: &mut String) {
        if !self.conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.conditions.join(" AND "));
        }
    }

    fn member_of(mut self, link_table: &str, column: &str, ids: &[Uuid]) -> Self {
        if ids.is_empty() {
            return self;
        }
        let placeholders = vec!["?"; ids.len()].join(", ");
        self.conditions.push(format!(
            "g.id IN (SELECT game_id FROM {link_table} WHERE {column} IN ({placeholders}))"
        ));
        self.params
            .extend(ids.iter().map(|id| Value::Text(id.to_string())));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_selects_everything_in_insertion_order() {
        let q = GameQuery::new();
        assert!(q.select_sql().ends_with("FROM games g ORDER BY g.rowid"));
        assert_eq!(q.count_sql(), "SELECT COUNT(*) FROM games g");
        assert!(q.params().is_empty());
    }

    #[test]
    fn conditions_and_params_stay_aligned() {
        let genres = [Uuid::new_v4(), Uuid::new_v4()];
        let q = GameQuery::new()
            .name_contains("Mario")
            .in_genres(&genres)
            .price_at_most(20.0)
            .exclude_deleted();
        let sql = q.count_sql();
        assert_eq!(sql.matches('?').count(), q.params().len());
        assert!(sql.contains("genre_id IN (?, ?)"));
        assert!(sql.contains("g.is_deleted = 0"));
    }

    #[test]
    fn empty_membership_adds_nothing() {
        let q = GameQuery::new().on_platforms(&[]);
        assert!(!q.count_sql().contains("WHERE"));
    }

    #[test]
    fn window_is_dropped_for_count() {
        let q = GameQuery::new()
            .order_by(GameOrder::PriceDesc)
            .paginate(20, 10);
        assert!(q.select_sql().ends_with("LIMIT 10 OFFSET 20"));
        assert_eq!(q.without_page().window(), None);
        assert_eq!(q.without_page().order(), GameOrder::PriceDesc);
    }
}
