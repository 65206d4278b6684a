//! Aggregation orchestrator.
//!
//! Joins the detail, species, and evolution-chain fetches for one catalog
//! record into a single [`AggregateDetail`] with partial-failure
//! semantics: the detail and species fetches must both succeed, while the
//! evolution chain is best-effort and never fails the overall operation.

use crate::api::CatalogSource;
use crate::models::{AggregateDetail, EvolutionNode, EvolutionStage, record_id_from_url};
use crate::Result;
use std::collections::HashSet;
use std::sync::Arc;

/// Orchestrates the joined fetch of one record's aggregate detail.
///
/// Each invocation is independent; calling again with a new identifier
/// shares nothing with prior calls. Cross-identifier caching belongs to
/// the consuming view, not here.
pub struct DetailAggregator<C> {
    source: Arc<C>,
}

impl<C: CatalogSource> DetailAggregator<C> {
    /// Creates an aggregator over the given catalog source.
    #[must_use]
    pub fn new(source: Arc<C>) -> Self {
        Self { source }
    }

    /// Fetches the full aggregate for one record.
    ///
    /// The detail and species fetches run concurrently and both must
    /// succeed; when both fail, the detail-fetch failure is reported. The
    /// evolution-chain follow-up is issued only when the species carries a
    /// chain URL, and its failure is swallowed after logging, yielding
    /// `evolution_chain = None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the detail or species fetch fails.
    pub async fn full_aggregate(&self, id_or_name: &str) -> Result<AggregateDetail> {
        let (detail, species) = tokio::join!(
            self.source.get_detail(id_or_name),
            self.source.get_species(id_or_name)
        );
        // Detail takes precedence when both fetches fail.
        let detail = detail?;
        let species = species?;

        let evolution_chain = match species.evolution_chain_url.as_deref() {
            Some(url) => match self.source.get_evolution_chain(url).await {
                Ok(root) => Some(self.flatten_chain(root).await),
                Err(e) => {
                    tracing::warn!(
                        id = %id_or_name,
                        url = %url,
                        error = %e,
                        "Evolution chain fetch failed, omitting chain"
                    );
                    None
                }
            },
            None => None,
        };

        Ok(AggregateDetail {
            detail,
            species,
            evolution_chain,
        })
    }

    /// Flattens a raw chain into display stages.
    ///
    /// Walks `next` pointers, resolving each node's record detail
    /// sequentially. A node whose resolution fails ends the walk, keeping
    /// the stages gathered so far. A visited-id set guards against cycles
    /// in malformed remote data; the domain itself guarantees a linear
    /// chain.
    async fn flatten_chain(&self, root: EvolutionNode) -> Vec<EvolutionStage> {
        let mut stages = Vec::new();
        let mut visited = HashSet::new();
        let mut current = Some(&root);

        while let Some(node) = current {
            let Some(id) = record_id_from_url(&node.species_url) else {
                tracing::warn!(
                    species_url = %node.species_url,
                    "Evolution node without a numeric identifier, ending walk"
                );
                break;
            };
            if !visited.insert(id) {
                tracing::warn!(id, "Cycle detected in evolution chain, ending walk");
                break;
            }

            match self.source.get_detail(&id.to_string()).await {
                Ok(detail) => stages.push(EvolutionStage {
                    id: detail.id,
                    name: detail.name,
                    min_level: node.min_level,
                }),
                Err(e) => {
                    tracing::warn!(
                        id,
                        error = %e,
                        "Failed to resolve evolution stage, keeping partial chain"
                    );
                    break;
                }
            }

            current = node.next.as_deref();
        }

        stages
    }
}
