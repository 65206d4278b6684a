//! Session-scoped persisted filter state.

use crate::catalog::TypeFilter;
use crate::store::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Store key for the persisted filters.
pub const FILTERS_KEY: &str = "pokemon_filters";

/// Persisted shape of the filter state.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredFilters {
    #[serde(default)]
    type_filter: Option<String>,
}

/// Durable session-scoped filter selection.
pub struct SavedFilters {
    store: Arc<dyn KeyValueStore>,
}

impl SavedFilters {
    /// Creates saved filters over a session-scoped store.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The persisted type filter, defaulting to the match-all sentinel on
    /// a missing or corrupt value.
    #[must_use]
    pub fn load(&self) -> TypeFilter {
        let stored: StoredFilters = match self.store.get(FILTERS_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Corrupt stored filters, using default");
                StoredFilters::default()
            }),
            Ok(None) => StoredFilters::default(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read filters, using default");
                StoredFilters::default()
            }
        };
        stored
            .type_filter
            .map_or(TypeFilter::All, |name| TypeFilter::parse(&name))
    }

    /// Persists the type filter. Write failures are logged and ignored.
    pub fn save(&self, filter: &TypeFilter) {
        let stored = StoredFilters {
            type_filter: Some(filter.to_string()),
        };
        let encoded = match serde_json::to_string(&stored) {
            Ok(encoded) => encoded,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to encode filters");
                return;
            }
        };
        if let Err(e) = self.store.set(FILTERS_KEY, &encoded) {
            tracing::warn!(error = %e, "Failed to persist filters");
        }
    }
}
