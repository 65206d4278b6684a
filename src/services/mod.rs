//! Produced interface to the UI layer.
//!
//! The [`Explorer`] facade wires the remote client, the aggregation
//! orchestrator, the list accumulator, and the bounded persistent
//! collections into the single surface the rendering layer consumes and
//! calls back into on user actions.

mod filters;
mod preferences;

pub use filters::SavedFilters;
pub use preferences::{Language, Preferences, Theme};

use crate::aggregate::DetailAggregator;
use crate::api::{CatalogClient, CatalogSource, ListPage};
use crate::catalog::{CatalogAccumulator, TypeFilter};
use crate::collections::BoundedCollection;
use crate::config::DexConfig;
use crate::models::{AggregateDetail, RecordDetail, RecordSummary};
use crate::store::{FileStore, KeyValueStore, StoreScope};
use crate::Result;
use std::sync::Arc;

/// Facade over the data layer, one instance per browsing session.
///
/// Remote operations return `Result` rather than panicking across the
/// boundary; the rendering layer decides how failures are shown.
pub struct Explorer<C = CatalogClient> {
    source: Arc<C>,
    aggregator: DetailAggregator<C>,
    catalog: CatalogAccumulator<C>,
    favorites: BoundedCollection<u32>,
    search_history: BoundedCollection<String>,
    last_viewed: BoundedCollection<u32>,
    preferences: Preferences,
    filters: SavedFilters,
}

impl Explorer<CatalogClient> {
    /// Builds an explorer from configuration, with filesystem-backed
    /// profile and session stores.
    ///
    /// # Errors
    ///
    /// Returns an error if a storage directory cannot be created.
    pub fn from_config(config: &DexConfig) -> Result<Self> {
        let client = Arc::new(CatalogClient::with_config(
            config.api.base_url.clone(),
            config.http_config(),
        ));
        let profile: Arc<dyn KeyValueStore> =
            Arc::new(FileStore::new(config.storage.dir_for(StoreScope::Profile))?);
        let session: Arc<dyn KeyValueStore> =
            Arc::new(FileStore::new(config.storage.dir_for(StoreScope::Session))?);
        Ok(Self::with_source(
            client,
            profile,
            session,
            config.api.page_size,
        ))
    }
}

impl<C: CatalogSource> Explorer<C> {
    /// Builds an explorer over an arbitrary catalog source and store
    /// handles.
    #[must_use]
    pub fn with_source(
        source: Arc<C>,
        profile_store: Arc<dyn KeyValueStore>,
        session_store: Arc<dyn KeyValueStore>,
        page_size: usize,
    ) -> Self {
        Self {
            aggregator: DetailAggregator::new(Arc::clone(&source)),
            catalog: CatalogAccumulator::new(Arc::clone(&source), page_size),
            favorites: BoundedCollection::favorites(Arc::clone(&profile_store)),
            search_history: BoundedCollection::search_history(Arc::clone(&session_store)),
            last_viewed: BoundedCollection::last_viewed(Arc::clone(&session_store)),
            preferences: Preferences::new(profile_store),
            filters: SavedFilters::new(session_store),
            source,
        }
    }

    /// Fetches one page of record references without touching the
    /// accumulated catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the round trip fails.
    pub async fn list_page(&self, limit: usize, offset: usize) -> Result<ListPage> {
        self.source.list_records(limit, offset).await
    }

    /// Fetches full detail for one record.
    ///
    /// # Errors
    ///
    /// Returns an error if the round trip fails.
    pub async fn detail(&self, id_or_name: &str) -> Result<RecordDetail> {
        self.source.get_detail(id_or_name).await
    }

    /// Fetches references for every record belonging to the named type.
    ///
    /// Unlike [`accumulated_view`](Self::accumulated_view) this asks the
    /// remote directly and is not limited to what has been accumulated.
    ///
    /// # Errors
    ///
    /// Returns an error if the round trip fails.
    pub async fn type_members(&self, type_name: &str) -> Result<Vec<RecordSummary>> {
        self.source.get_by_type(type_name).await
    }

    /// Fetches the joined aggregate for one record.
    ///
    /// # Errors
    ///
    /// Returns an error if the detail or species fetch fails; an
    /// evolution-chain failure is tolerated.
    pub async fn full_aggregate(&self, id_or_name: &str) -> Result<AggregateDetail> {
        self.aggregator.full_aggregate(id_or_name).await
    }

    /// Loads the next catalog page into the accumulated set.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Busy`] while a load is in flight, or the
    /// remote error that failed the page.
    pub async fn load_next_page(&mut self) -> Result<usize> {
        self.catalog.load_next_page().await
    }

    /// The accumulated catalog filtered by search term and type.
    #[must_use]
    pub fn accumulated_view(&self, search_term: &str, type_filter: &TypeFilter) -> Vec<&RecordDetail> {
        self.catalog.filtered_view(search_term, type_filter)
    }

    /// Sorted distinct type names observed so far.
    #[must_use]
    pub fn available_types(&self) -> Vec<String> {
        self.catalog.available_types()
    }

    /// Whether the remote signals a further page.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.catalog.has_more()
    }

    /// The accumulated records in insertion order.
    #[must_use]
    pub fn accumulated(&self) -> &[RecordDetail] {
        self.catalog.records()
    }

    /// Adds a record to the favorites. Returns `false` when the record is
    /// already a favorite or the team of six is full.
    pub fn add_favorite(&mut self, id: u32) -> bool {
        self.favorites.append(id)
    }

    /// Removes a record from the favorites.
    pub fn remove_favorite(&mut self, id: u32) -> bool {
        self.favorites.remove(&id)
    }

    /// Whether a record is a favorite.
    #[must_use]
    pub fn is_favorite(&self, id: u32) -> bool {
        self.favorites.contains(&id)
    }

    /// Number of favorites.
    #[must_use]
    pub fn favorites_count(&self) -> usize {
        self.favorites.len()
    }

    /// Whether the favorites set is full.
    #[must_use]
    pub fn favorites_full(&self) -> bool {
        self.favorites.at_capacity()
    }

    /// Favorite record ids, oldest first.
    #[must_use]
    pub fn favorite_ids(&self) -> &[u32] {
        self.favorites.items()
    }

    /// Clears the favorites.
    pub fn clear_favorites(&mut self) {
        self.favorites.clear();
    }

    /// Records a search term in the history. Empty terms and terms
    /// already present are skipped.
    pub fn record_search(&mut self, term: &str) {
        if term.is_empty() {
            return;
        }
        self.search_history.append(term.to_string());
    }

    /// Remembered search terms, most recent first.
    #[must_use]
    pub fn recent_searches(&self) -> Vec<String> {
        self.search_history.items().iter().rev().cloned().collect()
    }

    /// Records a viewed record id.
    pub fn record_viewed(&mut self, id: u32) {
        self.last_viewed.append(id);
    }

    /// Recently viewed record ids, most recent first.
    #[must_use]
    pub fn recently_viewed(&self) -> Vec<u32> {
        self.last_viewed.items().iter().rev().copied().collect()
    }

    /// Profile-scoped display preferences.
    #[must_use]
    pub const fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// The persisted type filter for this session.
    #[must_use]
    pub fn saved_filter(&self) -> TypeFilter {
        self.filters.load()
    }

    /// Persists the session's type filter.
    pub fn save_filter(&self, filter: &TypeFilter) {
        self.filters.save(filter);
    }
}
