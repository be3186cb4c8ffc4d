//! The legacy document catalog: products, categories, suppliers, orders,
//! and the change log, behind an async [`DocumentStore`] contract.

pub mod change_log;
pub mod counters;
pub mod documents;
pub mod query;
pub mod snapshot;
pub mod store;

pub use change_log::ChangeLogger;
pub use counters::{add_views, adjust_stock};
pub use documents::*;
pub use query::{ProductPredicate, ProductQuery, ProductSort, ProductSortField};
pub use snapshot::{load_snapshot, save_snapshot, LegacySnapshot};
pub use store::{CounterChange, CounterField, DocumentStore, LegacyError, MemoryDocumentStore};
