//! Data model types for the game catalog.
//!
//! These are the domain entities every layer above storage works with. A
//! `Game` may have been read from the primary store or translated from a
//! legacy document; callers cannot tell which.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ── Publisher ───────────────────────────────────────────────────────────────

/// A company publishing games. `company_name` is its natural key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publisher {
    pub id: Uuid,
    pub company_name: String,
    #[serde(default)]
    pub home_page: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_deleted: bool,
}

impl Publisher {
    pub fn new(company_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            company_name: company_name.into(),
            home_page: None,
            description: None,
            is_deleted: false,
        }
    }
}

// ── Genre ───────────────────────────────────────────────────────────────────

/// A genre, optionally nested under a parent genre. `name` is unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<Uuid>,
    #[serde(default)]
    pub is_deleted: bool,
}

impl Genre {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            parent_id: None,
            is_deleted: false,
        }
    }
}

// ── Platform ────────────────────────────────────────────────────────────────

/// A platform a game runs on ("Desktop", "Console", ...).
///
/// Only the primary store knows about platforms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    pub id: Uuid,
    pub kind: String,
}

impl Platform {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: kind.into(),
        }
    }
}

// ── Game ────────────────────────────────────────────────────────────────────

/// A catalog item.
///
/// `key` is the natural key and must be unique across the merged catalog,
/// not only within one store. `created_at` is `None` for games that only
/// exist as legacy documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: Uuid,
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    pub units_in_stock: i32,
    /// Discount in whole percent.
    #[serde(default)]
    pub discount: i32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default)]
    pub view_count: i64,
    /// Derived from the comments table; always 0 for legacy games.
    #[serde(default)]
    pub comment_count: i64,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub platforms: Vec<Platform>,
    #[serde(default)]
    pub publisher: Option<Publisher>,
}

impl Game {
    /// A new game with a fresh identifier and no relations.
    pub fn new(key: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            key: key.into(),
            name: name.into(),
            description: None,
            price,
            units_in_stock: 0,
            discount: 0,
            created_at: None,
            is_deleted: false,
            view_count: 0,
            comment_count: 0,
            genres: Vec::new(),
            platforms: Vec::new(),
            publisher: None,
        }
    }

    pub fn with_genre(mut self, genre: Genre) -> Self {
        self.genres.push(genre);
        self
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platforms.push(platform);
        self
    }

    pub fn with_publisher(mut self, publisher: Publisher) -> Self {
        self.publisher = Some(publisher);
        self
    }

    pub fn with_stock(mut self, units: i32) -> Self {
        self.units_in_stock = units;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn genre_ids(&self) -> Vec<Uuid> {
        self.genres.iter().map(|g| g.id).collect()
    }

    pub fn platform_ids(&self) -> Vec<Uuid> {
        self.platforms.iter().map(|p| p.id).collect()
    }
}

/// One page of a catalog query plus the total number of matching rows.
#[derive(Debug, Clone, Default)]
pub struct GamePage {
    pub games: Vec<Game>,
    /// Sum of both stores' filtered counts, before pagination.
    pub total_count: u64,
}

// ── Comments ────────────────────────────────────────────────────────────────

/// A user comment on a game. Comments only live in the primary store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub game_id: Uuid,
    pub author: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

// ── Orders ──────────────────────────────────────────────────────────────────

/// A customer order. Orders have no natural key; they are matched by id only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub customer_id: String,
    pub order_date: DateTime<Utc>,
    #[serde(default)]
    pub ship_city: Option<String>,
}
