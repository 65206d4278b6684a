//! Configuration management.

use crate::api::HttpConfig;
use crate::catalog::DEFAULT_PAGE_SIZE;
use crate::store::StoreScope;
use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration for dexcore.
#[derive(Debug, Clone)]
pub struct DexConfig {
    /// Remote catalog settings.
    pub api: ApiConfig,
    /// Durable storage settings.
    pub storage: StorageConfig,
}

/// Remote catalog settings.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the catalog API.
    pub base_url: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds.
    pub connect_timeout_ms: u64,
    /// Records per page.
    pub page_size: usize,
}

/// Durable storage settings.
///
/// The profile directory survives across sessions; the session directory
/// is expected to be cleared when the browsing session ends.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory for profile-scoped values (favorites, theme, language).
    pub profile_dir: PathBuf,
    /// Directory for session-scoped values (search history, last viewed,
    /// filters).
    pub session_dir: PathBuf,
}

impl StorageConfig {
    /// The directory backing the given scope.
    #[must_use]
    pub const fn dir_for(&self, scope: StoreScope) -> &PathBuf {
        match scope {
            StoreScope::Profile => &self.profile_dir,
            StoreScope::Session => &self.session_dir,
        }
    }
}

impl Default for DexConfig {
    fn default() -> Self {
        let data_dir = directories::BaseDirs::new().map_or_else(
            || PathBuf::from(".dexcore"),
            |dirs| dirs.data_dir().join("dexcore"),
        );
        Self {
            api: ApiConfig {
                base_url: crate::api::CatalogClient::DEFAULT_BASE_URL.to_string(),
                timeout_ms: 10_000,
                connect_timeout_ms: 3_000,
                page_size: DEFAULT_PAGE_SIZE,
            },
            storage: StorageConfig {
                profile_dir: data_dir.join(StoreScope::Profile.dir_name()),
                session_dir: std::env::temp_dir()
                    .join("dexcore")
                    .join(StoreScope::Session.dir_name()),
            },
        }
    }
}

impl DexConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The HTTP configuration derived from the API settings.
    #[must_use]
    pub const fn http_config(&self) -> HttpConfig {
        HttpConfig {
            timeout_ms: self.api.timeout_ms,
            connect_timeout_ms: self.api.connect_timeout_ms,
        }
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &std::path::Path) -> crate::Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| crate::Error::Storage {
            operation: "read_config_file".to_string(),
            cause: e.to_string(),
        })?;

        let file: ConfigFile = toml::from_str(&contents).map_err(|e| crate::Error::Storage {
            operation: "parse_config_file".to_string(),
            cause: e.to_string(),
        })?;

        Ok(Self::from_config_file(file))
    }

    /// Loads configuration from the default location.
    ///
    /// Checks the following paths in order:
    /// 1. Platform-specific config dir (`~/Library/Application Support/dexcore/` on macOS)
    /// 2. XDG config dir (`~/.config/dexcore/` for Unix compatibility)
    ///
    /// Returns default configuration (with environment overrides) if no
    /// config file is found.
    #[must_use]
    pub fn load_default() -> Self {
        let config = Self::find_config_file().unwrap_or_default();
        config.with_env_overrides()
    }

    fn find_config_file() -> Option<Self> {
        let base_dirs = directories::BaseDirs::new()?;

        let platform_config = base_dirs.config_dir().join("dexcore").join("config.toml");
        if platform_config.exists() {
            if let Ok(config) = Self::load_from_file(&platform_config) {
                return Some(config);
            }
        }

        let xdg_config = base_dirs
            .home_dir()
            .join(".config")
            .join("dexcore")
            .join("config.toml");
        if xdg_config.exists() {
            if let Ok(config) = Self::load_from_file(&xdg_config) {
                return Some(config);
            }
        }

        None
    }

    /// Applies `DEXCORE_*` environment variable overrides.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = std::env::var("DEXCORE_API_BASE_URL") {
            if !v.is_empty() {
                self.api.base_url = v;
            }
        }
        if let Ok(v) = std::env::var("DEXCORE_HTTP_TIMEOUT_MS") {
            if let Ok(timeout_ms) = v.parse::<u64>() {
                self.api.timeout_ms = timeout_ms;
            }
        }
        if let Ok(v) = std::env::var("DEXCORE_PAGE_SIZE") {
            if let Ok(page_size) = v.parse::<usize>() {
                if page_size > 0 {
                    self.api.page_size = page_size;
                }
            }
        }
        self
    }

    /// Converts a `ConfigFile` to `DexConfig`.
    fn from_config_file(file: ConfigFile) -> Self {
        let mut config = Self::default();

        if let Some(api) = file.api {
            if let Some(base_url) = api.base_url {
                config.api.base_url = base_url;
            }
            if let Some(timeout_ms) = api.timeout_ms {
                config.api.timeout_ms = timeout_ms;
            }
            if let Some(connect_timeout_ms) = api.connect_timeout_ms {
                config.api.connect_timeout_ms = connect_timeout_ms;
            }
            if let Some(page_size) = api.page_size {
                config.api.page_size = page_size;
            }
        }
        if let Some(storage) = file.storage {
            if let Some(profile_dir) = storage.profile_dir {
                config.storage.profile_dir = PathBuf::from(profile_dir);
            }
            if let Some(session_dir) = storage.session_dir {
                config.storage.session_dir = PathBuf::from(session_dir);
            }
        }

        config
    }

    /// Sets the profile storage directory.
    #[must_use]
    pub fn with_profile_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage.profile_dir = path.into();
        self
    }

    /// Sets the session storage directory.
    #[must_use]
    pub fn with_session_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage.session_dir = path.into();
        self
    }

    /// Sets the catalog base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into();
        self
    }
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// API section.
    pub api: Option<ConfigFileApi>,
    /// Storage section.
    pub storage: Option<ConfigFileStorage>,
}

/// API section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileApi {
    /// Base URL.
    pub base_url: Option<String>,
    /// Request timeout in milliseconds.
    pub timeout_ms: Option<u64>,
    /// Connect timeout in milliseconds.
    pub connect_timeout_ms: Option<u64>,
    /// Records per page.
    pub page_size: Option<usize>,
}

/// Storage section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileStorage {
    /// Profile-scoped storage directory.
    pub profile_dir: Option<String>,
    /// Session-scoped storage directory.
    pub session_dir: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DexConfig::default();
        assert_eq!(config.api.base_url, "https://pokeapi.co/api/v2");
        assert_eq!(config.api.timeout_ms, 10_000);
        assert_eq!(config.api.page_size, 20);
    }

    #[test]
    fn test_parse_config_file() {
        let raw = r#"
            [api]
            base_url = "http://localhost:9090/api/v2"
            page_size = 50

            [storage]
            profile_dir = "/tmp/dex-profile"
        "#;
        let file: ConfigFile = toml::from_str(raw).unwrap();
        let config = DexConfig::from_config_file(file);

        assert_eq!(config.api.base_url, "http://localhost:9090/api/v2");
        assert_eq!(config.api.page_size, 50);
        assert_eq!(config.api.timeout_ms, 10_000);
        assert_eq!(config.storage.profile_dir, PathBuf::from("/tmp/dex-profile"));
    }

    #[test]
    fn test_builders() {
        let config = DexConfig::default()
            .with_base_url("http://localhost:1234")
            .with_profile_dir("/tmp/p")
            .with_session_dir("/tmp/s");
        assert_eq!(config.api.base_url, "http://localhost:1234");
        assert_eq!(config.storage.session_dir, PathBuf::from("/tmp/s"));
    }
}
