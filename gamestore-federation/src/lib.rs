//! Federation of the primary (relational) and legacy (document) catalog
//! stores.
//!
//! Catalog reads run one [`pipeline::QueryPipeline`] against both stores,
//! translate legacy documents, reconcile the two result sets and restore a
//! single ordering. Writes go to the primary store, migrating legacy games
//! on first write.

pub mod counter;
pub mod error;
pub mod federated;
pub mod migrate;
pub mod pipeline;
pub mod primary;
pub mod reconcile;
pub mod repository;
pub mod resolver;
pub mod translate;

pub use counter::GameCounter;
pub use error::FederationError;
pub use federated::{
    FederatedGames, FederatedGenres, FederatedOrders, FederatedPublishers, Federation,
};
pub use migrate::{LazyMigrator, MigrationOutcome, MigrationStats};
pub use pipeline::{PipelineFactory, QueryPipeline};
pub use primary::PrimaryStore;
pub use repository::{GameRepository, GenreRepository, OrderRepository, PublisherRepository};
pub use resolver::CrossReferenceResolver;
