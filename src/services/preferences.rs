//! Profile-scoped display preferences.
//!
//! Theme and language survive across sessions. Unknown or corrupt stored
//! values fall back to the defaults; write failures are logged and the
//! in-memory choice stays authoritative.

use crate::store::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Store key for the theme preference.
pub const THEME_KEY: &str = "pokemon_theme";
/// Store key for the language preference.
pub const LANGUAGE_KEY: &str = "pokemon_language";

/// UI color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light theme.
    #[default]
    Light,
    /// Dark theme.
    Dark,
}

impl Theme {
    /// The opposite theme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// UI language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English.
    #[default]
    En,
    /// Georgian.
    Ka,
}

/// Durable theme and language preferences.
pub struct Preferences {
    store: Arc<dyn KeyValueStore>,
}

impl Preferences {
    /// Creates preferences over a profile-scoped store.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    fn read<T: Default + serde::de::DeserializeOwned>(&self, key: &str) -> T {
        match self.store.get(key) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(key = %key, error = %e, "Corrupt stored preference, using default");
                T::default()
            }),
            Ok(None) => T::default(),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Failed to read preference, using default");
                T::default()
            }
        }
    }

    fn write<T: Serialize>(&self, key: &str, value: &T) {
        let encoded = match serde_json::to_string(value) {
            Ok(encoded) => encoded,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Failed to encode preference");
                return;
            }
        };
        if let Err(e) = self.store.set(key, &encoded) {
            tracing::warn!(key = %key, error = %e, "Failed to persist preference");
        }
    }

    /// The stored theme, defaulting to light.
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.read(THEME_KEY)
    }

    /// Persists the theme.
    pub fn set_theme(&self, theme: Theme) {
        self.write(THEME_KEY, &theme);
    }

    /// The stored language, defaulting to English.
    #[must_use]
    pub fn language(&self) -> Language {
        self.read(LANGUAGE_KEY)
    }

    /// Persists the language.
    pub fn set_language(&self, language: Language) {
        self.write(LANGUAGE_KEY, &language);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_defaults_when_unset() {
        let preferences = Preferences::new(Arc::new(MemoryStore::new()));
        assert_eq!(preferences.theme(), Theme::Light);
        assert_eq!(preferences.language(), Language::En);
    }

    #[test]
    fn test_roundtrip() {
        let preferences = Preferences::new(Arc::new(MemoryStore::new()));
        preferences.set_theme(Theme::Dark);
        preferences.set_language(Language::Ka);
        assert_eq!(preferences.theme(), Theme::Dark);
        assert_eq!(preferences.language(), Language::Ka);
    }

    #[test]
    fn test_corrupt_value_falls_back_to_default() {
        let store = Arc::new(MemoryStore::new());
        store.set(THEME_KEY, "\"sepia\"").unwrap();

        let preferences = Preferences::new(store);
        assert_eq!(preferences.theme(), Theme::Light);
    }

    #[test]
    fn test_toggled() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }
}
