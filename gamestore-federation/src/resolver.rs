//! Cross-reference resolution for translated legacy products.
//!
//! A legacy product refers to its category and supplier by integer id. Each
//! reference is bridged to a primary id; an already-migrated primary entity
//! with that id wins over a fresh translation of the legacy document, so
//! repeated reads never produce two versions of the same genre or publisher.

use futures::future::try_join_all;
use gamestore_catalog::{Game, Genre, Publisher, id_bridge};
use gamestore_db::queries;
use gamestore_legacy::{DocumentStore, LegacyProduct};

use crate::error::FederationError;
use crate::primary::PrimaryStore;
use crate::translate;

/// The reference kinds a legacy product carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference {
    Genre,
    Publisher,
}

impl Reference {
    pub const ALL: [Reference; 2] = [Reference::Genre, Reference::Publisher];

    /// The legacy id this reference points at, if set. Zero means unset.
    fn legacy_id(&self, product: &LegacyProduct) -> Option<i32> {
        let id = match self {
            Self::Genre => product.category_id,
            Self::Publisher => product.supplier_id,
        };
        id.filter(|id| *id != 0)
    }
}

pub struct CrossReferenceResolver<'a, L> {
    primary: &'a PrimaryStore,
    legacy: &'a L,
}

impl<'a, L: DocumentStore> CrossReferenceResolver<'a, L> {
    pub fn new(primary: &'a PrimaryStore, legacy: &'a L) -> Self {
        Self { primary, legacy }
    }

    /// Translate a product and attach each resolved reference.
    ///
    /// Each reference only writes its own field of the game, so the
    /// order of `Reference::ALL` does not matter.
    pub async fn resolve(&self, product: &LegacyProduct) -> Result<Game, FederationError> {
        let mut game = translate::game_from_product(product);
        for reference in Reference::ALL {
            let Some(legacy_id) = reference.legacy_id(product) else {
                continue;
            };
            match reference {
                Reference::Genre => {
                    if let Some(genre) = self.genre(legacy_id).await? {
                        game.genres.push(genre);
                    }
                }
                Reference::Publisher => game.publisher = self.publisher(legacy_id).await?,
            }
        }
        Ok(game)
    }

    /// Resolve a page of products, preserving order.
    pub async fn resolve_all(
        &self,
        products: &[LegacyProduct],
    ) -> Result<Vec<Game>, FederationError> {
        try_join_all(products.iter().map(|p| self.resolve(p))).await
    }

    async fn genre(&self, legacy_id: i32) -> Result<Option<Genre>, FederationError> {
        let id = id_bridge::to_primary(legacy_id);
        if let Some(genre) = self.primary.with_conn(|c| queries::find_genre_by_id(c, id)).await? {
            return Ok(Some(genre));
        }
        let category = self.legacy.category_by_id(legacy_id).await?;
        Ok(category.as_ref().map(translate::genre_from_category))
    }

    async fn publisher(&self, legacy_id: i32) -> Result<Option<Publisher>, FederationError> {
        let id = id_bridge::to_primary(legacy_id);
        if let Some(publisher) = self
            .primary
            .with_conn(|c| queries::find_publisher_by_id(c, id))
            .await?
        {
            return Ok(Some(publisher));
        }
        let supplier = self.legacy.supplier_by_id(legacy_id).await?;
        Ok(supplier.as_ref().map(translate::publisher_from_supplier))
    }
}
