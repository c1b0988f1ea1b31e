use std::sync::Arc;

use tokio::sync::RwLock;

use crate::catalog::Catalog;
use crate::engine::SimilarityIndex;
use crate::models::Favorites;
use crate::services::providers::MetadataProvider;

/// Shared application state
///
/// Catalog and similarity index are built once at startup and read-only for
/// the life of the process, so they are shared as plain Arcs with no locking
/// on the query path. The favorites list is the only mutable state and sits
/// behind an RwLock.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub index: Arc<SimilarityIndex>,
    pub provider: Arc<dyn MetadataProvider>,
    pub favorites: Arc<RwLock<Favorites>>,
}

impl AppState {
    pub fn new(
        catalog: Catalog,
        index: SimilarityIndex,
        provider: Arc<dyn MetadataProvider>,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog),
            index: Arc::new(index),
            provider,
            favorites: Arc::new(RwLock::new(Favorites::new())),
        }
    }
}
