//! Pipeline steps and their two store projections.
//!
//! Each step is one catalog predicate expressed twice: once against the
//! relational `GameQuery`, once against the legacy `ProductQuery`. Where the
//! legacy store lacks the field a predicate needs, the legacy projection
//! matches nothing rather than ignoring the filter.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use gamestore_catalog::{Game, PageSize, SortMode, id_bridge};
use gamestore_db::{GameOrder, GameQuery};
use gamestore_legacy::{ProductPredicate, ProductQuery, ProductSortField};
use uuid::Uuid;

// ── Filter steps ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum FilterStep {
    NameContains(String),
    GenreIn(Vec<Uuid>),
    PlatformIn(Vec<Uuid>),
    PublisherIs(Uuid),
    /// Inclusive bounds; `None` is unbounded on that side.
    PriceRange {
        min: Option<f64>,
        max: Option<f64>,
    },
    CreatedSince(DateTime<Utc>),
    ExcludeDeleted,
}

impl FilterStep {
    pub fn apply_primary(&self, query: GameQuery) -> GameQuery {
        match self {
            Self::NameContains(fragment) => query.name_contains(fragment),
            Self::GenreIn(ids) => query.in_genres(ids),
            Self::PlatformIn(ids) => query.on_platforms(ids),
            Self::PublisherIs(id) => query.published_by(*id),
            Self::PriceRange { min, max } => {
                let query = match min {
                    Some(min) => query.price_at_least(*min),
                    None => query,
                };
                match max {
                    Some(max) => query.price_at_most(*max),
                    None => query,
                }
            }
            Self::CreatedSince(since) => query.created_since(*since),
            Self::ExcludeDeleted => query.exclude_deleted(),
        }
    }

    pub fn apply_legacy(&self, query: ProductQuery) -> ProductQuery {
        match self {
            Self::NameContains(fragment) => {
                query.filter(ProductPredicate::NameContains(fragment.clone()))
            }
            Self::GenreIn(ids) => query.filter(ProductPredicate::CategoryIn(
                ids.iter().copied().map(id_bridge::to_legacy).collect(),
            )),
            // No platforms in the legacy store.
            Self::PlatformIn(ids) if ids.is_empty() => query,
            Self::PlatformIn(_) => query.filter(ProductPredicate::MatchNone),
            Self::PublisherIs(id) => {
                query.filter(ProductPredicate::SupplierIs(id_bridge::to_legacy(*id)))
            }
            Self::PriceRange { min, max } => {
                let query = match min {
                    Some(min) => query.filter(ProductPredicate::PriceAtLeast(*min)),
                    None => query,
                };
                match max {
                    Some(max) => query.filter(ProductPredicate::PriceAtMost(*max)),
                    None => query,
                }
            }
            // No creation date in the legacy store.
            Self::CreatedSince(_) => query.filter(ProductPredicate::MatchNone),
            Self::ExcludeDeleted => query,
        }
    }
}

// ── Sort step ───────────────────────────────────────────────────────────────

/// The single sort step. `None` keeps each store's natural order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortStep {
    mode: Option<SortMode>,
}

impl SortStep {
    pub fn new(mode: Option<SortMode>) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> Option<SortMode> {
        self.mode
    }

    pub fn apply_primary(&self, query: GameQuery) -> GameQuery {
        let order = match self.mode {
            None => GameOrder::Natural,
            Some(SortMode::MostPopular) => GameOrder::ViewsDesc,
            Some(SortMode::MostCommented) => GameOrder::CommentsDesc,
            Some(SortMode::PriceAsc) => GameOrder::PriceAsc,
            Some(SortMode::PriceDesc) => GameOrder::PriceDesc,
            Some(SortMode::New) => GameOrder::CreatedDesc,
        };
        query.order_by(order)
    }

    /// Comments and creation dates do not exist in the legacy store; those
    /// modes leave legacy rows in document order.
    pub fn apply_legacy(&self, query: ProductQuery) -> ProductQuery {
        match self.mode {
            Some(SortMode::MostPopular) => query.sort_by(ProductSortField::ViewCount, true),
            Some(SortMode::PriceAsc) => query.sort_by(ProductSortField::UnitPrice, false),
            Some(SortMode::PriceDesc) => query.sort_by(ProductSortField::UnitPrice, true),
            Some(SortMode::MostCommented) | Some(SortMode::New) | None => query,
        }
    }

    /// In-memory comparison matching the primary ordering.
    pub fn compare(&self, a: &Game, b: &Game) -> Ordering {
        match self.mode {
            None => Ordering::Equal,
            Some(SortMode::MostPopular) => b.view_count.cmp(&a.view_count),
            Some(SortMode::MostCommented) => b.comment_count.cmp(&a.comment_count),
            Some(SortMode::PriceAsc) => a.price.total_cmp(&b.price),
            Some(SortMode::PriceDesc) => b.price.total_cmp(&a.price),
            // Newest first, undated last.
            Some(SortMode::New) => match (a.created_at, b.created_at) {
                (Some(a), Some(b)) => b.cmp(&a),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
        }
    }
}

// ── Pagination step ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationStep {
    page: u32,
    size: PageSize,
}

impl Default for PaginationStep {
    fn default() -> Self {
        Self {
            page: 1,
            size: PageSize::All,
        }
    }
}

impl PaginationStep {
    /// Page numbers below 1 are treated as page 1.
    pub fn new(page: u32, size: PageSize) -> Self {
        Self {
            page: page.max(1),
            size,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> PageSize {
        self.size
    }

    /// `(skip, take)`, or `None` when the page is unbounded.
    pub fn window(&self) -> Option<(u64, u64)> {
        match self.size {
            PageSize::All => None,
            PageSize::Count(n) => {
                let n = u64::from(n);
                Some((n * u64::from(self.page - 1), n))
            }
        }
    }

    /// The window each store is read with: every row from the start up to
    /// the end of the requested page. Rows a store holds for earlier pages
    /// can be displaced by the other store's rows once merged, so the
    /// store cannot skip them itself.
    pub fn store_window(&self) -> Option<(u64, u64)> {
        self.window().map(|(skip, take)| (0, skip + take))
    }

    pub fn apply_primary(&self, query: GameQuery) -> GameQuery {
        match self.store_window() {
            Some((skip, take)) => query.paginate(skip, take),
            None => query,
        }
    }

    pub fn apply_legacy(&self, query: ProductQuery) -> ProductQuery {
        match self.store_window() {
            Some((skip, take)) => query.paginate(skip as usize, take as usize),
            None => query,
        }
    }

    /// Position a merged union of store windows at the requested page.
    pub fn slice_merged<T>(&self, rows: Vec<T>) -> Vec<T> {
        match self.window() {
            Some((skip, _)) => {
                let rest = rows.into_iter().skip(skip as usize).collect();
                self.apply_in_memory(rest)
            }
            None => rows,
        }
    }

    /// Cut an already-positioned in-memory page down to the page size.
    /// Input no longer than the page size is returned unchanged.
    pub fn apply_in_memory<T>(&self, mut rows: Vec<T>) -> Vec<T> {
        if let PageSize::Count(n) = self.size {
            rows.truncate(n as usize);
        }
        rows
    }
}
