//! # Dexcore
//!
//! Client-side data aggregation and bounded persistence layer for a
//! creature-catalog explorer.
//!
//! Dexcore talks to a remote read-only catalog (PokeAPI), joins the
//! dependent resources for one record into a single aggregate with
//! partial-failure tolerance, incrementally accumulates a deduplicated
//! local catalog with derived filtered views, and maintains small durable
//! collections (favorites, search history, recently viewed) under hard
//! capacity and eviction rules.
//!
//! ## Example
//!
//! ```rust,ignore
//! use dexcore::{DexConfig, Explorer, TypeFilter};
//!
//! let mut explorer = Explorer::from_config(&DexConfig::load_default())?;
//! explorer.load_next_page().await?;
//! let view = explorer.accumulated_view("char", &TypeFilter::All);
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
// multiple_crate_versions is inherently crate-level (detects duplicate transitive dependencies).
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

// Module declarations
pub mod aggregate;
pub mod api;
pub mod catalog;
pub mod cli;
pub mod collections;
pub mod config;
pub mod debounce;
pub mod models;
pub mod services;
pub mod store;

// Re-exports for convenience
pub use aggregate::DetailAggregator;
pub use api::{CatalogClient, CatalogSource, HttpConfig, ListPage};
pub use catalog::{CatalogAccumulator, FetchState, TypeFilter};
pub use collections::{BoundedCollection, OverflowPolicy};
pub use config::DexConfig;
pub use debounce::Debouncer;
pub use models::{
    AggregateDetail, EvolutionNode, EvolutionStage, RecordDetail, RecordSummary, SpeciesInfo,
};
pub use services::Explorer;
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreScope};

/// Error type for dexcore operations.
///
/// Uses `thiserror` for automatic `Display` and `Error` trait implementations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `Network` | Connection refused, DNS failure, request aborted mid-flight |
/// | `Timeout` | A remote call exceeds the fixed per-request deadline |
/// | `HttpStatus` | The catalog responds with a non-2xx status |
/// | `Decode` | The response body is not the expected JSON shape |
/// | `Busy` | A page load is requested while one is already in flight |
/// | `InvalidInput` | Malformed identifiers or resource URLs |
/// | `Storage` | The durable store cannot read or write a key |
#[derive(Debug, ThisError)]
pub enum Error {
    /// The request never produced a response.
    ///
    /// Raised when:
    /// - The connection is refused or reset
    /// - DNS resolution fails
    /// - The request is aborted before a response arrives
    #[error("network error: {0}")]
    Network(String),

    /// The remote call exceeded its deadline.
    ///
    /// The deadline is fixed per request (10s by default) and enforced by
    /// the HTTP client; there is no retry.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// The deadline that was exceeded, in milliseconds.
        timeout_ms: u64,
    },

    /// The catalog answered with a non-success status.
    #[error("catalog returned status {status}: {body}")]
    HttpStatus {
        /// The HTTP status code.
        status: u16,
        /// The response body, if one was readable.
        body: String,
    },

    /// The response body could not be decoded.
    ///
    /// Raised when:
    /// - The body is not valid JSON
    /// - The JSON does not match the expected resource shape
    #[error("failed to decode catalog response: {0}")]
    Decode(String),

    /// A page load was requested while one is already in flight.
    ///
    /// The accumulator never overlaps page requests; callers should wait
    /// for the outstanding load to settle and try again.
    #[error("a page load is already in flight")]
    Busy,

    /// Invalid input was provided.
    ///
    /// Raised when:
    /// - An identifier is empty
    /// - A resource URL does not carry a numeric identifier segment
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A durable store operation failed.
    #[error("storage operation '{operation}' failed: {cause}")]
    Storage {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

/// Result type alias for dexcore operations.
pub type Result<T> = std::result::Result<T, Error>;
