//! Joined detail view for one catalog record.

use super::{EvolutionStage, RecordDetail, SpeciesInfo};
use serde::{Deserialize, Serialize};

/// The joined result of detail, species, and evolution-chain fetches for
/// one catalog record.
///
/// `evolution_chain` is `None` only when the chain fetch failed or the
/// species has no chain; it is never the cause of an overall aggregate
/// failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateDetail {
    /// Full record detail.
    pub detail: RecordDetail,
    /// Species metadata.
    pub species: SpeciesInfo,
    /// Flattened evolution chain, when one could be resolved.
    pub evolution_chain: Option<Vec<EvolutionStage>>,
}

impl AggregateDetail {
    /// Whether the record has further evolutions.
    ///
    /// A chain of length one or less means the record does not evolve;
    /// consumers render that as an empty state rather than an error.
    #[must_use]
    pub fn evolves(&self) -> bool {
        self.evolution_chain
            .as_ref()
            .is_some_and(|chain| chain.len() > 1)
    }
}
