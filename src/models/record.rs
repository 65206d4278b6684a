//! Catalog record types and identifier parsing.

use serde::{Deserialize, Serialize};

/// Minimal reference to a catalog record, as returned by the list endpoint.
///
/// The numeric identifier is encoded in `resource_url` as the
/// second-to-last path segment; it is never contiguous with list order and
/// must be parsed with [`record_id_from_url`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSummary {
    /// The record's name.
    pub name: String,
    /// URL of the record's detail resource.
    pub resource_url: String,
}

impl RecordSummary {
    /// Parses the numeric identifier out of the resource URL.
    #[must_use]
    pub fn id(&self) -> Option<u32> {
        record_id_from_url(&self.resource_url)
    }
}

/// A record's type membership, ordered by slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeEntry {
    /// Type name, e.g. `fire`.
    pub name: String,
}

/// A record's ability, ordered as delivered by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    /// Ability name.
    pub name: String,
    /// Whether the ability is hidden.
    pub is_hidden: bool,
}

/// A single base stat, value in `0..=255`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    /// Stat name, e.g. `speed`.
    pub name: String,
    /// Base value.
    pub base_value: u8,
}

/// Full detail for one catalog record.
///
/// Immutable once fetched; identified by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDetail {
    /// Numeric identifier, always positive.
    pub id: u32,
    /// The record's name.
    pub name: String,
    /// Height in decimeters.
    pub height: u32,
    /// Weight in hectograms.
    pub weight: u32,
    /// Base experience yield. Zero when the catalog omits it.
    pub base_experience: u32,
    /// Ordered type memberships.
    pub types: Vec<TypeEntry>,
    /// Ordered abilities.
    pub abilities: Vec<Ability>,
    /// Ordered base stats.
    pub stats: Vec<Stat>,
}

impl RecordDetail {
    /// Whether this record belongs to the named type (case-insensitive).
    #[must_use]
    pub fn has_type(&self, type_name: &str) -> bool {
        self.types
            .iter()
            .any(|t| t.name.eq_ignore_ascii_case(type_name))
    }
}

/// Parses the numeric identifier from a catalog resource URL.
///
/// Resource URLs end in `/{id}/`, so the identifier is the second-to-last
/// path segment: `https://pokeapi.co/api/v2/pokemon/25/` yields `25`.
#[must_use]
pub fn record_id_from_url(url: &str) -> Option<u32> {
    let mut segments = url.rsplit('/');
    // A trailing slash produces an empty final segment; skip it.
    let candidate = match segments.next()? {
        "" => segments.next()?,
        last => last,
    };
    candidate.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_from_url() {
        assert_eq!(
            record_id_from_url("https://pokeapi.co/api/v2/pokemon/25/"),
            Some(25)
        );
        assert_eq!(
            record_id_from_url("https://pokeapi.co/api/v2/pokemon-species/133/"),
            Some(133)
        );
    }

    #[test]
    fn test_record_id_from_url_without_trailing_slash() {
        assert_eq!(
            record_id_from_url("https://pokeapi.co/api/v2/pokemon/7"),
            Some(7)
        );
    }

    #[test]
    fn test_record_id_from_url_rejects_non_numeric() {
        assert_eq!(
            record_id_from_url("https://pokeapi.co/api/v2/pokemon/pikachu/"),
            None
        );
        assert_eq!(record_id_from_url(""), None);
    }

    #[test]
    fn test_summary_id() {
        let summary = RecordSummary {
            name: "pikachu".to_string(),
            resource_url: "https://pokeapi.co/api/v2/pokemon/25/".to_string(),
        };
        assert_eq!(summary.id(), Some(25));
    }

    #[test]
    fn test_has_type_is_case_insensitive() {
        let detail = RecordDetail {
            id: 4,
            name: "charmander".to_string(),
            height: 6,
            weight: 85,
            base_experience: 62,
            types: vec![TypeEntry {
                name: "fire".to_string(),
            }],
            abilities: vec![],
            stats: vec![],
        };
        assert!(detail.has_type("Fire"));
        assert!(!detail.has_type("water"));
    }
}
