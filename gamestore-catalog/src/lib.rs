//! Game catalog data model, identifier bridge, and filter request types.
//!
//! This crate has no storage dependencies. Both the primary-store crate
//! (`gamestore-db`) and the federation layer speak these types.

pub mod filter;
pub mod id_bridge;
pub mod types;

pub use filter::{FilterError, GameFilter, PageSize, PublishedWithin, SortMode};
pub use types::*;
