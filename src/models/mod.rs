//! Data models for dexcore.
//!
//! This module contains the domain structures produced by the remote
//! resource client and consumed by the aggregation and accumulation layers.

mod aggregate;
mod evolution;
mod record;
mod species;

pub use aggregate::AggregateDetail;
pub use evolution::{EvolutionNode, EvolutionStage};
pub use record::{Ability, RecordDetail, RecordSummary, Stat, TypeEntry, record_id_from_url};
pub use species::{FlavorText, SpeciesInfo};
