//! The query pipeline: filter, sort and pagination steps expressed once and
//! projected onto both stores.
//!
//! A pipeline is built per request by [`PipelineFactory`] and only read
//! afterwards. Each store gets its own projection, its own count and its
//! own window, read from the start through the requested page;
//! [`QueryPipeline::resort_and_repaginate`] restores a single ordering and
//! cuts the requested page once the two windows have been merged.

mod factory;
mod steps;

pub use factory::PipelineFactory;
pub use steps::{FilterStep, PaginationStep, SortStep};

use gamestore_catalog::Game;
use gamestore_db::GameQuery;
use gamestore_legacy::ProductQuery;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryPipeline {
    filters: Vec<FilterStep>,
    sort: SortStep,
    pagination: PaginationStep,
}

impl QueryPipeline {
    pub fn new(sort: SortStep, pagination: PaginationStep) -> Self {
        Self {
            filters: Vec::new(),
            sort,
            pagination,
        }
    }

    pub fn add_filter(&mut self, step: FilterStep) {
        self.filters.push(step);
    }

    pub fn filters(&self) -> &[FilterStep] {
        &self.filters
    }

    pub fn sort(&self) -> SortStep {
        self.sort
    }

    pub fn pagination(&self) -> PaginationStep {
        self.pagination
    }

    /// The filtered, sorted and windowed relational query.
    pub fn primary_query(&self) -> GameQuery {
        let query = self
            .filters
            .iter()
            .fold(GameQuery::new(), |q, step| step.apply_primary(q));
        let query = self.sort.apply_primary(query);
        self.pagination.apply_primary(query)
    }

    /// The filtered, sorted and windowed document query.
    pub fn legacy_query(&self) -> ProductQuery {
        let query = self
            .filters
            .iter()
            .fold(ProductQuery::new(), |q, step| step.apply_legacy(q));
        let query = self.sort.apply_legacy(query);
        self.pagination.apply_legacy(query)
    }

    /// Re-apply sort then pagination to the merged store windows.
    ///
    /// The sort is stable, so rows the sort mode considers equal keep
    /// their merged order.
    pub fn resort_and_repaginate(&self, mut games: Vec<Game>) -> Vec<Game> {
        if self.sort.mode().is_some() {
            games.sort_by(|a, b| self.sort.compare(a, b));
        }
        self.pagination.slice_merged(games)
    }
}
