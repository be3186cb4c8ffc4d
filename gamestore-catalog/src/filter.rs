//! The catalog filter request and its parsed tokens.
//!
//! `GameFilter` arrives already bound from a query string. Sort mode, page
//! size and publishing recency stay as raw tokens here; they are parsed when
//! a query pipeline is built, which is where an unknown token becomes a
//! configuration error.

use std::str::FromStr;

use chrono::Duration;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("Invalid sorting option: {0}")]
    InvalidSort(String),
    #[error("Invalid page size: {0}")]
    InvalidPageSize(String),
    #[error("Invalid publishing date option: {0}")]
    InvalidPublishedWithin(String),
}

/// An immutable description of one catalog query.
///
/// Absent fields mean "no constraint", never zero.
#[derive(Debug, Clone, PartialEq)]
pub struct GameFilter {
    pub name: Option<String>,
    pub genre_ids: Vec<Uuid>,
    pub platform_ids: Vec<Uuid>,
    pub publisher_id: Option<Uuid>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// Recency bucket token, e.g. "last-month".
    pub published_within: Option<String>,
    /// Sort mode token, e.g. "price-asc".
    pub sort: Option<String>,
    /// 1-based page number.
    pub page: u32,
    /// Page size token: a positive integer, "all", or empty.
    pub page_size: Option<String>,
}

impl Default for GameFilter {
    fn default() -> Self {
        Self {
            name: None,
            genre_ids: Vec::new(),
            platform_ids: Vec::new(),
            publisher_id: None,
            min_price: None,
            max_price: None,
            published_within: None,
            sort: None,
            page: 1,
            page_size: None,
        }
    }
}

impl GameFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_genres(mut self, ids: impl IntoIterator<Item = Uuid>) -> Self {
        self.genre_ids.extend(ids);
        self
    }

    pub fn with_platforms(mut self, ids: impl IntoIterator<Item = Uuid>) -> Self {
        self.platform_ids.extend(ids);
        self
    }

    pub fn with_publisher(mut self, id: Uuid) -> Self {
        self.publisher_id = Some(id);
        self
    }

    pub fn with_price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    pub fn with_published_within(mut self, token: impl Into<String>) -> Self {
        self.published_within = Some(token.into());
        self
    }

    pub fn with_sort(mut self, token: impl Into<String>) -> Self {
        self.sort = Some(token.into());
        self
    }

    pub fn with_page(mut self, page: u32, page_size: impl Into<String>) -> Self {
        self.page = page;
        self.page_size = Some(page_size.into());
        self
    }

    /// The name fragment, with an empty string treated as absent.
    pub fn name_fragment(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }
}

// ── Sort mode ───────────────────────────────────────────────────────────────

/// The closed set of catalog orderings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    MostPopular,
    MostCommented,
    PriceAsc,
    PriceDesc,
    New,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MostPopular => "most-popular",
            Self::MostCommented => "most-commented",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
            Self::New => "new",
        }
    }
}

impl FromStr for SortMode {
    type Err = FilterError;

    /// Accepts the kebab-case token or its display spelling ("Price ASC").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize_token(s);
        match normalized.as_str() {
            "most-popular" => Ok(Self::MostPopular),
            "most-commented" => Ok(Self::MostCommented),
            "price-asc" => Ok(Self::PriceAsc),
            "price-desc" => Ok(Self::PriceDesc),
            "new" | "newest" => Ok(Self::New),
            _ => Err(FilterError::InvalidSort(s.to_string())),
        }
    }
}

// ── Page size ───────────────────────────────────────────────────────────────

/// A parsed page-size token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSize {
    Count(u32),
    All,
}

impl PageSize {
    /// Parse an optional token; absent, empty and "all" all mean unbounded.
    pub fn parse(token: Option<&str>) -> Result<Self, FilterError> {
        let Some(raw) = token.map(str::trim) else {
            return Ok(Self::All);
        };
        if raw.is_empty() || raw.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        match raw.parse::<u32>() {
            Ok(n) if n > 0 => Ok(Self::Count(n)),
            _ => Err(FilterError::InvalidPageSize(raw.to_string())),
        }
    }
}

// ── Publishing recency ──────────────────────────────────────────────────────

/// Named "published within" buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishedWithin {
    LastWeek,
    LastMonth,
    LastYear,
    TwoYears,
    ThreeYears,
}

impl PublishedWithin {
    /// The elapsed-time threshold for this bucket.
    pub fn threshold(&self) -> Duration {
        match self {
            Self::LastWeek => Duration::days(7),
            Self::LastMonth => Duration::days(30),
            Self::LastYear => Duration::days(365),
            Self::TwoYears => Duration::days(2 * 365),
            Self::ThreeYears => Duration::days(3 * 365),
        }
    }
}

impl FromStr for PublishedWithin {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "last-week" | "week" => Ok(Self::LastWeek),
            "last-month" | "month" => Ok(Self::LastMonth),
            "last-year" | "year" => Ok(Self::LastYear),
            "2-years" | "two-years" => Ok(Self::TwoYears),
            "3-years" | "three-years" => Ok(Self::ThreeYears),
            _ => Err(FilterError::InvalidPublishedWithin(s.to_string())),
        }
    }
}

/// Lowercase, trim, and fold spaces/underscores into dashes.
fn normalize_token(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
