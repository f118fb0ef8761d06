//! Network service: the store and cache wired together.
//!
//! The contributor network is served from the cache when possible. Schools
//! networks depend on an arbitrary school subset and are always rebuilt.

use crate::cache::{CacheKey, GraphCache, NullGraphCache};
use crate::contributors::contributor_network;
use crate::schools::schools_network;
use crate::types::GraphData;
use litnet_core::{Error, Result};
use litnet_store::{EntityId, EntityStore, School};
use std::sync::Arc;

/// Builds networks from an injected store, memoizing through an injected
/// cache.
#[derive(Clone)]
pub struct NetworkService {
    store: Arc<dyn EntityStore>,
    cache: Arc<dyn GraphCache>,
}

impl NetworkService {
    pub fn new(store: Arc<dyn EntityStore>, cache: Arc<dyn GraphCache>) -> Self {
        Self { store, cache }
    }

    /// A service that never caches.
    pub fn uncached(store: Arc<dyn EntityStore>) -> Self {
        Self::new(store, Arc::new(NullGraphCache))
    }

    pub fn store(&self) -> &dyn EntityStore {
        self.store.as_ref()
    }

    pub fn cache(&self) -> &dyn GraphCache {
        self.cache.as_ref()
    }

    /// The author/editor/translator network, cached.
    ///
    /// If the cache refuses the graph, the freshly built graph is returned
    /// anyway.
    pub fn contributor_network(&self) -> Result<Arc<GraphData>> {
        let key = CacheKey::ContributorNetwork;
        if let Some(graph) = self.cache.get(&key) {
            return Ok(graph);
        }

        let graph = Arc::new(contributor_network(self.store())?);
        if let Err(e) = self.cache.set(key, Arc::clone(&graph)) {
            if !e.is_cache_storage() {
                return Err(e);
            }
            log::warn!("Not caching contributor network: {e}");
        }
        Ok(graph)
    }

    /// Schools network for the given school ids. Unknown ids are an error.
    pub fn schools_network(&self, ids: &[EntityId]) -> Result<GraphData> {
        let store = self.store();
        let schools = ids
            .iter()
            .map(|&id| {
                store
                    .school(id)
                    .ok_or_else(|| Error::not_found(format!("school {id}")))
            })
            .collect::<Result<Vec<&School>>>()?;
        schools_network(store, &schools)
    }

    /// Schools network for every school with the given categorizer.
    pub fn schools_by_categorizer(&self, categorizer: &str) -> Result<GraphData> {
        let store = self.store();
        let schools = store.schools_by_categorizer(categorizer);
        if schools.is_empty() {
            log::info!("No schools categorized by '{categorizer}'");
        }
        schools_network(store, &schools)
    }

    /// Drop every cached network.
    pub fn clear_cache(&self) {
        self.cache.clear();
        log::info!("Cleared graph cache");
    }
}
