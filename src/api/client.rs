//! HTTP client for the remote catalog.

use super::{CatalogSource, HttpConfig, ListPage, build_http_client};
use crate::models::{
    Ability, EvolutionNode, FlavorText, RecordDetail, RecordSummary, SpeciesInfo, Stat, TypeEntry,
};
use crate::{Error, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Typed HTTP client for the remote catalog.
///
/// Performs exactly one round trip per operation with a fixed timeout.
/// Every failure is logged once before propagation; logging never
/// suppresses the error.
pub struct CatalogClient {
    /// Base URL of the catalog API.
    base_url: String,
    /// Configured request timeout, reported in timeout errors.
    timeout_ms: u64,
    /// HTTP client.
    client: reqwest::Client,
}

impl CatalogClient {
    /// Default catalog base URL.
    pub const DEFAULT_BASE_URL: &'static str = "https://pokeapi.co/api/v2";

    /// Creates a new client against the default catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Self::DEFAULT_BASE_URL, HttpConfig::from_env())
    }

    /// Creates a new client against the given base URL with the given
    /// HTTP configuration.
    #[must_use]
    pub fn with_config(base_url: impl Into<String>, config: HttpConfig) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            timeout_ms: config.timeout_ms,
            client: build_http_client(config),
        }
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Performs one GET round trip and decodes the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.client.get(url).send().await.map_err(|e| {
            let error_kind = if e.is_timeout() {
                "timeout"
            } else if e.is_connect() {
                "connect"
            } else if e.is_request() {
                "request"
            } else {
                "unknown"
            };
            tracing::error!(
                url = %url,
                error = %e,
                error_kind = error_kind,
                is_timeout = e.is_timeout(),
                is_connect = e.is_connect(),
                "Catalog request failed"
            );
            if e.is_timeout() {
                Error::Timeout {
                    timeout_ms: self.timeout_ms,
                }
            } else {
                Error::Network(format!("{error_kind} error: {e}"))
            }
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                url = %url,
                status = %status,
                body = %body,
                "Catalog returned error status"
            );
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        response.json().await.map_err(|e| {
            tracing::error!(
                url = %url,
                error = %e,
                "Failed to decode catalog response"
            );
            Error::Decode(e.to_string())
        })
    }

    /// Validates a user-supplied identifier path segment.
    fn check_identifier(id_or_name: &str) -> Result<()> {
        if id_or_name.is_empty() {
            return Err(Error::InvalidInput("empty identifier".to_string()));
        }
        if id_or_name.contains('/') || id_or_name.contains('?') {
            return Err(Error::InvalidInput(format!(
                "identifier '{id_or_name}' contains reserved characters"
            )));
        }
        Ok(())
    }
}

impl Default for CatalogClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogSource for CatalogClient {
    async fn list_records(&self, limit: usize, offset: usize) -> Result<ListPage> {
        let url = format!("{}/pokemon?limit={limit}&offset={offset}", self.base_url);
        let response: ListResponse = self.get_json(&url).await?;
        Ok(ListPage {
            has_more: response.next.is_some(),
            results: response
                .results
                .into_iter()
                .map(|r| RecordSummary {
                    name: r.name,
                    resource_url: r.url,
                })
                .collect(),
        })
    }

    async fn get_detail(&self, id_or_name: &str) -> Result<RecordDetail> {
        Self::check_identifier(id_or_name)?;
        let url = format!("{}/pokemon/{id_or_name}", self.base_url);
        let response: DetailResponse = self.get_json(&url).await?;
        Ok(response.into())
    }

    async fn get_species(&self, id_or_name: &str) -> Result<SpeciesInfo> {
        Self::check_identifier(id_or_name)?;
        let url = format!("{}/pokemon-species/{id_or_name}", self.base_url);
        let response: SpeciesResponse = self.get_json(&url).await?;
        Ok(response.into())
    }

    async fn get_evolution_chain(&self, url: &str) -> Result<EvolutionNode> {
        let response: EvolutionChainResponse = self.get_json(url).await?;
        Ok(response.chain.into_node())
    }

    async fn get_by_type(&self, type_name: &str) -> Result<Vec<RecordSummary>> {
        Self::check_identifier(type_name)?;
        let url = format!("{}/type/{type_name}", self.base_url);
        let response: TypeResponse = self.get_json(&url).await?;
        Ok(response
            .pokemon
            .into_iter()
            .map(|slot| RecordSummary {
                name: slot.pokemon.name,
                resource_url: slot.pokemon.url,
            })
            .collect())
    }
}

/// A named resource reference as the catalog delivers it.
#[derive(Debug, Deserialize)]
struct NamedResource {
    name: String,
    #[serde(default)]
    url: String,
}

/// Response from the list endpoint.
#[derive(Debug, Deserialize)]
struct ListResponse {
    next: Option<String>,
    results: Vec<NamedResource>,
}

/// Response from the detail endpoint.
#[derive(Debug, Deserialize)]
struct DetailResponse {
    id: u32,
    name: String,
    height: u32,
    weight: u32,
    base_experience: Option<u32>,
    types: Vec<TypeSlot>,
    abilities: Vec<AbilitySlot>,
    stats: Vec<StatSlot>,
}

#[derive(Debug, Deserialize)]
struct TypeSlot {
    #[serde(rename = "type")]
    type_ref: NamedResource,
}

#[derive(Debug, Deserialize)]
struct AbilitySlot {
    ability: NamedResource,
    is_hidden: bool,
}

#[derive(Debug, Deserialize)]
struct StatSlot {
    base_stat: u8,
    stat: NamedResource,
}

impl From<DetailResponse> for RecordDetail {
    fn from(r: DetailResponse) -> Self {
        Self {
            id: r.id,
            name: r.name,
            height: r.height,
            weight: r.weight,
            base_experience: r.base_experience.unwrap_or(0),
            types: r
                .types
                .into_iter()
                .map(|t| TypeEntry {
                    name: t.type_ref.name,
                })
                .collect(),
            abilities: r
                .abilities
                .into_iter()
                .map(|a| Ability {
                    name: a.ability.name,
                    is_hidden: a.is_hidden,
                })
                .collect(),
            stats: r
                .stats
                .into_iter()
                .map(|s| Stat {
                    name: s.stat.name,
                    base_value: s.base_stat,
                })
                .collect(),
        }
    }
}

/// Response from the species endpoint.
#[derive(Debug, Deserialize)]
struct SpeciesResponse {
    flavor_text_entries: Vec<FlavorEntry>,
    evolution_chain: Option<ChainRef>,
}

#[derive(Debug, Deserialize)]
struct FlavorEntry {
    flavor_text: String,
    language: NamedResource,
}

#[derive(Debug, Deserialize)]
struct ChainRef {
    url: String,
}

impl From<SpeciesResponse> for SpeciesInfo {
    fn from(r: SpeciesResponse) -> Self {
        Self {
            flavor_text_entries: r
                .flavor_text_entries
                .into_iter()
                .map(|entry| FlavorText {
                    // The catalog embeds form-feed and newline control
                    // characters in flavor text.
                    text: entry
                        .flavor_text
                        .replace(['\u{c}', '\n'], " ")
                        .trim()
                        .to_string(),
                    language: entry.language.name,
                })
                .collect(),
            evolution_chain_url: r.evolution_chain.map(|c| c.url),
        }
    }
}

/// Response from the evolution-chain endpoint.
#[derive(Debug, Deserialize)]
struct EvolutionChainResponse {
    chain: ChainNode,
}

#[derive(Debug, Deserialize)]
struct ChainNode {
    species: NamedResource,
    #[serde(default)]
    evolution_details: Vec<EvolutionDetail>,
    #[serde(default)]
    evolves_to: Vec<ChainNode>,
}

#[derive(Debug, Deserialize)]
struct EvolutionDetail {
    min_level: Option<u32>,
}

impl ChainNode {
    /// Converts the wire tree into a linear chain, collapsing branching
    /// evolutions to the first branch.
    fn into_node(self) -> EvolutionNode {
        EvolutionNode {
            species_url: self.species.url,
            min_level: self
                .evolution_details
                .first()
                .and_then(|detail| detail.min_level),
            next: self
                .evolves_to
                .into_iter()
                .next()
                .map(|child| Box::new(child.into_node())),
        }
    }
}

/// Response from the type endpoint.
#[derive(Debug, Deserialize)]
struct TypeResponse {
    pokemon: Vec<TypePokemonSlot>,
}

#[derive(Debug, Deserialize)]
struct TypePokemonSlot {
    pokemon: NamedResource,
}
