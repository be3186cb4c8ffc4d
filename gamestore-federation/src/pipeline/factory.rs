use chrono::{DateTime, Utc};
use gamestore_catalog::{FilterError, GameFilter, PageSize, PublishedWithin, SortMode};

use super::{FilterStep, PaginationStep, QueryPipeline, SortStep};

/// Builds a [`QueryPipeline`] from a filter request.
///
/// The soft-delete exclusion step is added unless the caller may see
/// deleted games.
#[derive(Debug, Clone, Copy)]
pub struct PipelineFactory {
    can_see_deleted: bool,
}

impl PipelineFactory {
    pub fn new(can_see_deleted: bool) -> Self {
        Self { can_see_deleted }
    }

    pub fn build(&self, filter: &GameFilter) -> Result<QueryPipeline, FilterError> {
        self.build_at(filter, Utc::now())
    }

    /// Build with an explicit "now" for the recency threshold.
    pub fn build_at(
        &self,
        filter: &GameFilter,
        now: DateTime<Utc>,
    ) -> Result<QueryPipeline, FilterError> {
        let sort = match non_empty(filter.sort.as_deref()) {
            Some(token) => Some(token.parse::<SortMode>()?),
            None => None,
        };
        let size = PageSize::parse(filter.page_size.as_deref())?;
        let mut pipeline =
            QueryPipeline::new(SortStep::new(sort), PaginationStep::new(filter.page, size));

        if let Some(name) = filter.name_fragment() {
            pipeline.add_filter(FilterStep::NameContains(name.to_string()));
        }
        if !filter.genre_ids.is_empty() {
            pipeline.add_filter(FilterStep::GenreIn(filter.genre_ids.clone()));
        }
        if !filter.platform_ids.is_empty() {
            pipeline.add_filter(FilterStep::PlatformIn(filter.platform_ids.clone()));
        }
        if let Some(id) = filter.publisher_id {
            pipeline.add_filter(FilterStep::PublisherIs(id));
        }
        if filter.min_price.is_some() || filter.max_price.is_some() {
            pipeline.add_filter(FilterStep::PriceRange {
                min: filter.min_price,
                max: filter.max_price,
            });
        }
        if let Some(token) = non_empty(filter.published_within.as_deref()) {
            let bucket: PublishedWithin = token.parse()?;
            pipeline.add_filter(FilterStep::CreatedSince(now - bucket.threshold()));
        }
        if !self.can_see_deleted {
            pipeline.add_filter(FilterStep::ExcludeDeleted);
        }

        log::debug!(
            "Built pipeline: {} filters, sort {:?}, page {:?}",
            pipeline.filters().len(),
            pipeline.sort().mode().map(|m| m.as_str()),
            pipeline.pagination().window(),
        );
        Ok(pipeline)
    }
}

fn non_empty(token: Option<&str>) -> Option<&str> {
    token.map(str::trim).filter(|t| !t.is_empty())
}
