//! Evolution chain structures.

use serde::{Deserialize, Serialize};

/// One node of a raw evolution chain as fetched from the catalog.
///
/// The domain guarantees a linear chain; branching evolutions collapse to
/// the first branch when the wire response is converted, so `next` is a
/// single optional successor rather than a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionNode {
    /// URL of the species this node refers to.
    pub species_url: String,
    /// Minimum level required to evolve into this node, when level-gated.
    pub min_level: Option<u32>,
    /// The next evolution in the chain.
    pub next: Option<Box<EvolutionNode>>,
}

impl EvolutionNode {
    /// Number of nodes in the chain, this one included.
    #[must_use]
    pub fn stage_count(&self) -> usize {
        let mut count = 1;
        let mut current = self.next.as_deref();
        while let Some(node) = current {
            count += 1;
            current = node.next.as_deref();
        }
        count
    }
}

/// One resolved stage of a flattened evolution chain, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionStage {
    /// Numeric identifier of the stage's record.
    pub id: u32,
    /// The stage's name.
    pub name: String,
    /// Minimum level required to reach this stage, when level-gated.
    pub min_level: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_len() {
        let chain = EvolutionNode {
            species_url: "https://pokeapi.co/api/v2/pokemon-species/1/".to_string(),
            min_level: None,
            next: Some(Box::new(EvolutionNode {
                species_url: "https://pokeapi.co/api/v2/pokemon-species/2/".to_string(),
                min_level: Some(16),
                next: Some(Box::new(EvolutionNode {
                    species_url: "https://pokeapi.co/api/v2/pokemon-species/3/".to_string(),
                    min_level: Some(32),
                    next: None,
                })),
            })),
        };
        assert_eq!(chain.stage_count(), 3);
    }
}
