//! Country Atlas - travel information aggregator
//!
//! This library resolves free-text country names against a country-data
//! provider, enriches the result with current weather and a representative
//! image, and keeps a sorted, searchable catalog of countries in memory.

pub mod atlas;
pub mod catalog;
pub mod config;
pub mod countries;
pub mod enrichment;
pub mod error;
pub mod extract;
pub mod featured;
pub mod gateway;
pub mod logging;
pub mod models;
pub mod resolver;

// Re-export core types for public API
pub use atlas::Atlas;
pub use catalog::{Catalog, CatalogState, Collation};
pub use config::AtlasConfig;
pub use countries::{CountryClient, LookupStrategy};
pub use enrichment::{Enricher, ImageClient, WeatherClient};
pub use error::AtlasError;
pub use extract::{FieldKind, NOT_AVAILABLE, extract_primary};
pub use featured::FeaturedAggregator;
pub use gateway::{HttpGateway, JsonFetcher};
pub use models::{CountryDetail, CountryProfile, CountrySummary, EnrichmentResult, WeatherSnapshot};
pub use resolver::{CountryResolver, first_match};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, AtlasError>;
