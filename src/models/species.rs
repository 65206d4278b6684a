//! Species metadata.

use serde::{Deserialize, Serialize};

/// A localized flavor-text entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlavorText {
    /// The descriptive text, with catalog control characters normalized to
    /// spaces.
    pub text: String,
    /// Language code, e.g. `en`.
    pub language: String,
}

/// Species information for one catalog record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesInfo {
    /// Ordered flavor-text entries.
    pub flavor_text_entries: Vec<FlavorText>,
    /// URL of the species' evolution chain, when it has one.
    pub evolution_chain_url: Option<String>,
}

impl SpeciesInfo {
    /// The first flavor text in the given language, if any.
    #[must_use]
    pub fn flavor_text(&self, language: &str) -> Option<&str> {
        self.flavor_text_entries
            .iter()
            .find(|entry| entry.language == language)
            .map(|entry| entry.text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flavor_text_by_language() {
        let species = SpeciesInfo {
            flavor_text_entries: vec![
                FlavorText {
                    text: "A strange seed.".to_string(),
                    language: "en".to_string(),
                },
                FlavorText {
                    text: "Another entry.".to_string(),
                    language: "en".to_string(),
                },
            ],
            evolution_chain_url: None,
        };
        assert_eq!(species.flavor_text("en"), Some("A strange seed."));
        assert_eq!(species.flavor_text("ka"), None);
    }
}
