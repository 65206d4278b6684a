//! Integration tests for the explorer facade.
#![allow(
    clippy::panic,
    clippy::too_many_lines,
    clippy::uninlined_format_args,
    clippy::doc_markdown,
    clippy::redundant_closure_for_method_calls
)]

use async_trait::async_trait;
use dexcore::api::{CatalogSource, ListPage};
use dexcore::catalog::TypeFilter;
use dexcore::models::{
    Ability, EvolutionNode, FlavorText, RecordDetail, RecordSummary, SpeciesInfo, Stat, TypeEntry,
};
use dexcore::services::{Explorer, Language, Theme};
use dexcore::store::{FileStore, KeyValueStore};
use dexcore::{Error, Result};
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A deterministic catalog of `total` records with ids `1..=total`.
///
/// Odd ids are fire-typed, even ids water-typed. Records 1 through 3 form
/// a single evolution family.
struct FixtureCatalog {
    total: u32,
    fail_species: AtomicBool,
    fail_chain: AtomicBool,
}

impl FixtureCatalog {
    fn new(total: u32) -> Self {
        Self {
            total,
            fail_species: AtomicBool::new(false),
            fail_chain: AtomicBool::new(false),
        }
    }

    fn record_url(id: u32) -> String {
        format!("https://catalog.test/api/v2/pokemon/{id}/")
    }

    fn species_url(id: u32) -> String {
        format!("https://catalog.test/api/v2/pokemon-species/{id}/")
    }

    fn detail(&self, id: u32) -> RecordDetail {
        let type_name = if id % 2 == 1 { "fire" } else { "water" };
        RecordDetail {
            id,
            name: format!("record-{id}"),
            height: 7,
            weight: 69,
            base_experience: 64,
            types: vec![TypeEntry {
                name: type_name.to_string(),
            }],
            abilities: vec![Ability {
                name: "overgrow".to_string(),
                is_hidden: false,
            }],
            stats: vec![Stat {
                name: "speed".to_string(),
                base_value: 45,
            }],
        }
    }

    fn parse_id(&self, id_or_name: &str) -> Result<u32> {
        let id = id_or_name
            .parse::<u32>()
            .or_else(|_| {
                id_or_name
                    .strip_prefix("record-")
                    .ok_or(())
                    .and_then(|rest| rest.parse::<u32>().map_err(|_| ()))
            })
            .map_err(|()| Error::HttpStatus {
                status: 404,
                body: format!("unknown record '{id_or_name}'"),
            })?;
        if id == 0 || id > self.total {
            return Err(Error::HttpStatus {
                status: 404,
                body: format!("record {id} out of range"),
            });
        }
        Ok(id)
    }
}

#[async_trait]
impl CatalogSource for FixtureCatalog {
    async fn list_records(&self, limit: usize, offset: usize) -> Result<ListPage> {
        let start = u32::try_from(offset).unwrap() + 1;
        let end = (start + u32::try_from(limit).unwrap()).min(self.total + 1);
        let results = (start..end)
            .map(|id| RecordSummary {
                name: format!("record-{id}"),
                resource_url: Self::record_url(id),
            })
            .collect();
        Ok(ListPage {
            results,
            has_more: end <= self.total,
        })
    }

    async fn get_detail(&self, id_or_name: &str) -> Result<RecordDetail> {
        self.parse_id(id_or_name).map(|id| self.detail(id))
    }

    async fn get_species(&self, id_or_name: &str) -> Result<SpeciesInfo> {
        if self.fail_species.load(Ordering::SeqCst) {
            return Err(Error::Network("species endpoint down".to_string()));
        }
        let id = self.parse_id(id_or_name)?;
        let chain_url = if id <= 3 {
            Some("https://catalog.test/api/v2/evolution-chain/1/".to_string())
        } else {
            None
        };
        Ok(SpeciesInfo {
            flavor_text_entries: vec![
                FlavorText {
                    text: format!("Flavor for record {id}."),
                    language: "en".to_string(),
                },
                FlavorText {
                    text: "sxvadasxva".to_string(),
                    language: "ka".to_string(),
                },
            ],
            evolution_chain_url: chain_url,
        })
    }

    async fn get_evolution_chain(&self, _url: &str) -> Result<EvolutionNode> {
        if self.fail_chain.load(Ordering::SeqCst) {
            return Err(Error::Timeout { timeout_ms: 10_000 });
        }
        Ok(EvolutionNode {
            species_url: Self::species_url(1),
            min_level: None,
            next: Some(Box::new(EvolutionNode {
                species_url: Self::species_url(2),
                min_level: Some(16),
                next: Some(Box::new(EvolutionNode {
                    species_url: Self::species_url(3),
                    min_level: Some(32),
                    next: None,
                })),
            })),
        })
    }

    async fn get_by_type(&self, type_name: &str) -> Result<Vec<RecordSummary>> {
        let wanted_odd = type_name == "fire";
        Ok((1..=self.total)
            .filter(|id| (id % 2 == 1) == wanted_odd)
            .map(|id| RecordSummary {
                name: format!("record-{id}"),
                resource_url: Self::record_url(id),
            })
            .collect())
    }
}

fn fixture_explorer(total: u32, dir: &std::path::Path) -> Explorer<FixtureCatalog> {
    let profile: Arc<dyn KeyValueStore> =
        Arc::new(FileStore::new(&dir.join("profile")).unwrap());
    let session: Arc<dyn KeyValueStore> =
        Arc::new(FileStore::new(&dir.join("session")).unwrap());
    Explorer::with_source(Arc::new(FixtureCatalog::new(total)), profile, session, 20)
}

#[tokio::test]
async fn test_pagination_accumulates_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let mut explorer = fixture_explorer(45, dir.path());

    let added = explorer.load_next_page().await.unwrap();
    assert_eq!(added, 20);
    assert_eq!(explorer.accumulated().len(), 20);
    assert!(explorer.has_more());

    explorer.load_next_page().await.unwrap();
    let added = explorer.load_next_page().await.unwrap();
    assert_eq!(added, 5);
    assert!(!explorer.has_more());

    let ids: Vec<u32> = explorer.accumulated().iter().map(|r| r.id).collect();
    assert_eq!(ids, (1..=45).collect::<Vec<u32>>());

    // Exhausted cursor: further loads are no-ops.
    assert_eq!(explorer.load_next_page().await.unwrap(), 0);
    assert_eq!(explorer.accumulated().len(), 45);
}

#[tokio::test]
async fn test_filtered_view_combines_term_and_type() {
    let dir = tempfile::tempdir().unwrap();
    let mut explorer = fixture_explorer(20, dir.path());
    explorer.load_next_page().await.unwrap();

    let all = explorer.accumulated_view("", &TypeFilter::All);
    assert_eq!(all.len(), 20);

    let fire = TypeFilter::parse("fire");
    let fire_view = explorer.accumulated_view("", &fire);
    assert_eq!(fire_view.len(), 10);
    assert!(fire_view.iter().all(|r| r.id % 2 == 1));

    // Term matches against ids too.
    let by_id = explorer.accumulated_view("15", &TypeFilter::All);
    assert_eq!(by_id.len(), 1);
    assert_eq!(by_id[0].name, "record-15");

    let both = explorer.accumulated_view("record-1", &fire);
    let ids: HashSet<u32> = both.iter().map(|r| r.id).collect();
    // record-1 and the odd record-1x entries.
    assert_eq!(ids, HashSet::from([1, 11, 13, 15, 17, 19]));

    assert_eq!(
        explorer.available_types(),
        vec!["fire".to_string(), "water".to_string()]
    );

    // The remote type listing is independent of the accumulated set.
    let members = explorer.type_members("fire").await.unwrap();
    assert_eq!(members.len(), 10);
    assert!(members.iter().all(|m| m.id().is_some()));
}

#[tokio::test]
async fn test_full_aggregate_joins_chain() {
    let dir = tempfile::tempdir().unwrap();
    let explorer = fixture_explorer(10, dir.path());

    let aggregate = explorer.full_aggregate("record-1").await.unwrap();
    assert_eq!(aggregate.detail.id, 1);
    assert_eq!(
        aggregate.species.flavor_text("en"),
        Some("Flavor for record 1.")
    );

    let chain = aggregate.evolution_chain.as_deref().unwrap();
    assert_eq!(chain.len(), 3);
    assert_eq!(chain[0].name, "record-1");
    assert_eq!(chain[1].min_level, Some(16));
    assert_eq!(chain[2].min_level, Some(32));
    assert!(aggregate.evolves());
}

#[tokio::test]
async fn test_aggregate_tolerates_chain_failure() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = Arc::new(FixtureCatalog::new(10));
    let profile: Arc<dyn KeyValueStore> =
        Arc::new(FileStore::new(&dir.path().join("profile")).unwrap());
    let session: Arc<dyn KeyValueStore> =
        Arc::new(FileStore::new(&dir.path().join("session")).unwrap());
    let explorer = Explorer::with_source(Arc::clone(&catalog), profile, session, 20);

    catalog.fail_chain.store(true, Ordering::SeqCst);
    let aggregate = explorer.full_aggregate("1").await.unwrap();
    assert_eq!(aggregate.detail.id, 1);
    assert!(aggregate.evolution_chain.is_none());

    // A species failure is fatal for the aggregate.
    catalog.fail_species.store(true, Ordering::SeqCst);
    let err = explorer.full_aggregate("1").await.unwrap_err();
    assert!(matches!(err, Error::Network(_)));
}

#[tokio::test]
async fn test_favorites_cap_and_persistence() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut explorer = fixture_explorer(10, dir.path());
        for id in 1..=6 {
            assert!(explorer.add_favorite(id));
        }
        assert!(explorer.favorites_full());
        // Seventh member is rejected, nothing is evicted.
        assert!(!explorer.add_favorite(7));
        // Duplicates are skipped.
        assert!(!explorer.add_favorite(3));
        assert_eq!(explorer.favorites_count(), 6);

        assert!(explorer.remove_favorite(2));
        assert!(explorer.add_favorite(7));
    }

    // A fresh session over the same profile store sees the same team.
    let explorer = fixture_explorer(10, dir.path());
    assert_eq!(explorer.favorite_ids(), &[1, 3, 4, 5, 6, 7]);
    assert!(explorer.is_favorite(7));
    assert!(!explorer.is_favorite(2));
}

#[tokio::test]
async fn test_history_evicts_oldest() {
    let dir = tempfile::tempdir().unwrap();
    let mut explorer = fixture_explorer(10, dir.path());

    for term in ["bulba", "char", "squirt", "pika", "eevee", "mew"] {
        explorer.record_search(term);
    }
    // Capacity five: the oldest term is gone, most recent first.
    assert_eq!(
        explorer.recent_searches(),
        vec!["mew", "eevee", "pika", "squirt", "char"]
    );

    // Repeating a remembered term does not reorder or duplicate it.
    explorer.record_search("pika");
    assert_eq!(explorer.recent_searches().len(), 5);

    explorer.record_search("");
    assert_eq!(explorer.recent_searches().len(), 5);

    for id in 1..=7 {
        explorer.record_viewed(id);
    }
    assert_eq!(explorer.recently_viewed(), vec![7, 6, 5, 4, 3]);
}

#[tokio::test]
async fn test_preferences_and_filters_persist() {
    let dir = tempfile::tempdir().unwrap();
    {
        let explorer = fixture_explorer(10, dir.path());
        assert_eq!(explorer.preferences().theme(), Theme::Light);
        explorer.preferences().set_theme(Theme::Dark);
        explorer.preferences().set_language(Language::Ka);
        explorer.save_filter(&TypeFilter::Named("water".to_string()));
    }

    let explorer = fixture_explorer(10, dir.path());
    assert_eq!(explorer.preferences().theme(), Theme::Dark);
    assert_eq!(explorer.preferences().language(), Language::Ka);
    assert_eq!(
        explorer.saved_filter(),
        TypeFilter::Named("water".to_string())
    );
}
