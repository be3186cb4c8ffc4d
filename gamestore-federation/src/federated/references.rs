//! Federating repositories for the reference entities: genres and publishers.

use std::sync::Arc;

use gamestore_catalog::{Genre, Publisher, id_bridge};
use gamestore_db::queries;
use gamestore_legacy::DocumentStore;
use uuid::Uuid;

use crate::error::FederationError;
use crate::primary::PrimaryStore;
use crate::reconcile;
use crate::repository::{GenreRepository, PublisherRepository};
use crate::translate;

pub struct FederatedGenres<L> {
    primary: Arc<PrimaryStore>,
    legacy: Arc<L>,
}

impl<L: DocumentStore> FederatedGenres<L> {
    pub fn new(primary: Arc<PrimaryStore>, legacy: Arc<L>) -> Self {
        Self { primary, legacy }
    }
}

impl<L: DocumentStore> GenreRepository for FederatedGenres<L> {
    async fn list(&self) -> Result<Vec<Genre>, FederationError> {
        let (primary, legacy) = tokio::join!(
            self.primary.with_conn(queries::list_genres),
            self.legacy.categories(),
        );
        let translated = legacy?.iter().map(translate::genre_from_category).collect();
        Ok(reconcile::merge_genres(primary?, translated))
    }

    async fn get(&self, id: Uuid) -> Result<Option<Genre>, FederationError> {
        if let Some(genre) = self.primary.with_conn(|c| queries::find_genre_by_id(c, id)).await? {
            return Ok((!genre.is_deleted).then_some(genre));
        }
        let category = self.legacy.category_by_id(id_bridge::to_legacy(id)).await?;
        Ok(category.as_ref().map(translate::genre_from_category))
    }
}

pub struct FederatedPublishers<L> {
    primary: Arc<PrimaryStore>,
    legacy: Arc<L>,
}

impl<L: DocumentStore> FederatedPublishers<L> {
    pub fn new(primary: Arc<PrimaryStore>, legacy: Arc<L>) -> Self {
        Self { primary, legacy }
    }
}

impl<L: DocumentStore> PublisherRepository for FederatedPublishers<L> {
    async fn list(&self) -> Result<Vec<Publisher>, FederationError> {
        let (primary, legacy) = tokio::join!(
            self.primary.with_conn(queries::list_publishers),
            self.legacy.suppliers(),
        );
        let translated = legacy?
            .iter()
            .map(translate::publisher_from_supplier)
            .collect();
        Ok(reconcile::merge_publishers(primary?, translated))
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Publisher>, FederationError> {
        if let Some(publisher) = self
            .primary
            .with_conn(|c| queries::find_publisher_by_id(c, id))
            .await?
        {
            return Ok((!publisher.is_deleted).then_some(publisher));
        }
        let Some(supplier) = self.legacy.supplier_by_id(id_bridge::to_legacy(id)).await? else {
            return Ok(None);
        };
        // A primary publisher owning the company name hides the supplier.
        let name = supplier.company_name.as_str();
        if let Some(owner) = self
            .primary
            .with_conn(|c| queries::find_publisher_by_name(c, name))
            .await?
        {
            return Ok((!owner.is_deleted).then_some(owner));
        }
        Ok(Some(translate::publisher_from_supplier(&supplier)))
    }

    async fn get_by_name(&self, company_name: &str) -> Result<Option<Publisher>, FederationError> {
        if let Some(publisher) = self
            .primary
            .with_conn(|c| queries::find_publisher_by_name(c, company_name))
            .await?
        {
            return Ok((!publisher.is_deleted).then_some(publisher));
        }
        let supplier = self.legacy.supplier_by_name(company_name).await?;
        Ok(supplier.as_ref().map(translate::publisher_from_supplier))
    }
}
