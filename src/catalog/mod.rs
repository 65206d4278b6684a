//! Incremental list accumulator.
//!
//! Drives paginated fetch of the catalog, deduplicates results into a
//! growing local set, and exposes derived filtered views. The accumulated
//! set only grows; identifiers are never duplicated or replaced.

use crate::api::CatalogSource;
use crate::models::RecordDetail;
use crate::{Error, Result};
use futures_util::future::try_join_all;
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::sync::Arc;

/// Default number of records per page.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Whether a page load is currently in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchState {
    /// No page load outstanding.
    #[default]
    Idle,
    /// A page load is outstanding; further loads are rejected.
    Fetching,
}

/// Type filter for derived views.
///
/// `All` is the sentinel that matches every record; it corresponds to the
/// string `"all"` at the UI boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeFilter {
    /// Match every record.
    All,
    /// Match records carrying the named type.
    Named(String),
}

impl TypeFilter {
    /// Parses a filter string; `"all"` (any case) and the empty string
    /// select the sentinel.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Named(s.to_ascii_lowercase())
        }
    }

    /// Whether the record passes this filter.
    #[must_use]
    pub fn matches(&self, record: &RecordDetail) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => record.has_type(name),
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Named(name) => write!(f, "{name}"),
        }
    }
}

/// Incrementally accumulated catalog with pagination cursor.
pub struct CatalogAccumulator<C> {
    source: Arc<C>,
    page_size: usize,
    offset: usize,
    has_more: bool,
    state: FetchState,
    records: Vec<RecordDetail>,
    ids: HashSet<u32>,
}

impl<C: CatalogSource> CatalogAccumulator<C> {
    /// Creates an empty accumulator over the given catalog source.
    #[must_use]
    pub fn new(source: Arc<C>, page_size: usize) -> Self {
        Self {
            source,
            page_size,
            offset: 0,
            has_more: true,
            state: FetchState::Idle,
            records: Vec::new(),
            ids: HashSet::new(),
        }
    }

    /// Fetches the next page and merges its details into the catalog.
    ///
    /// The page's record references are listed in one round trip, then
    /// every summary's detail is resolved concurrently; the page settles
    /// as a unit. New details merge by id, skipping any id already
    /// present. Returns the number of records added.
    ///
    /// On failure the catalog, cursor, and `has_more` flag are left
    /// unchanged. Once the remote signals no further page, subsequent
    /// calls return `Ok(0)` without a round trip.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Busy`] if a load is already in flight, or the
    /// first remote error the page ran into.
    pub async fn load_next_page(&mut self) -> Result<usize> {
        if self.state == FetchState::Fetching {
            return Err(Error::Busy);
        }
        if !self.has_more {
            return Ok(0);
        }

        self.state = FetchState::Fetching;
        let outcome = Self::fetch_page(&self.source, self.page_size, self.offset).await;
        self.state = FetchState::Idle;

        let (details, has_more) = outcome?;
        self.offset += self.page_size;
        self.has_more = has_more;

        let mut added = 0;
        for detail in details {
            if self.ids.insert(detail.id) {
                self.records.push(detail);
                added += 1;
            }
        }
        Ok(added)
    }

    /// Lists one page and resolves all of its details concurrently.
    async fn fetch_page(
        source: &Arc<C>,
        page_size: usize,
        offset: usize,
    ) -> Result<(Vec<RecordDetail>, bool)> {
        let page = source.list_records(page_size, offset).await?;

        let fetches = page.results.iter().map(|summary| {
            let identifier = summary
                .id()
                .map_or_else(|| summary.name.clone(), |id| id.to_string());
            let source = Arc::clone(source);
            async move { source.get_detail(&identifier).await }
        });
        let details = try_join_all(fetches).await?;

        Ok((details, page.has_more))
    }

    /// Computes a read-only filtered view of the accumulated catalog.
    ///
    /// A record matches when its name contains `search_term`
    /// (case-insensitive) or its stringified id contains `search_term`,
    /// and it passes the type filter. Insertion order is preserved.
    #[must_use]
    pub fn filtered_view(&self, search_term: &str, type_filter: &TypeFilter) -> Vec<&RecordDetail> {
        let needle = search_term.to_ascii_lowercase();
        self.records
            .iter()
            .filter(|record| {
                (needle.is_empty()
                    || record.name.to_ascii_lowercase().contains(&needle)
                    || record.id.to_string().contains(&needle))
                    && type_filter.matches(record)
            })
            .collect()
    }

    /// The sorted set of distinct type names observed across the catalog.
    #[must_use]
    pub fn available_types(&self) -> Vec<String> {
        self.records
            .iter()
            .flat_map(|record| record.types.iter().map(|t| t.name.clone()))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// All accumulated records in insertion order.
    #[must_use]
    pub fn records(&self) -> &[RecordDetail] {
        &self.records
    }

    /// Number of accumulated records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing has been accumulated yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Current pagination offset.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Whether the remote signals a further page.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.has_more
    }

    /// Whether a page load is in flight.
    #[must_use]
    pub const fn state(&self) -> FetchState {
        self.state
    }

    #[cfg(test)]
    fn set_state(&mut self, state: FetchState) {
        self.state = state;
    }
}
