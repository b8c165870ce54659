//! Composition root: owns the provider clients and the catalog

use std::sync::Arc;

use tracing::{info, instrument};

use crate::catalog::Catalog;
use crate::config::AtlasConfig;
use crate::countries::CountryClient;
use crate::enrichment::Enricher;
use crate::featured::FeaturedAggregator;
use crate::gateway::{HttpGateway, JsonFetcher};
use crate::models::{CountryProfile, CountrySummary};
use crate::resolver::CountryResolver;
use crate::Result;

/// Entry point for the presentation layer
pub struct Atlas {
    countries: Arc<CountryClient>,
    resolver: CountryResolver,
    enricher: Enricher,
    catalog: Catalog,
    featured: Vec<String>,
}

impl Atlas {
    /// Build with the reqwest gateway
    pub fn new(config: &AtlasConfig) -> Result<Self> {
        let gateway = HttpGateway::new(&config.http)?;
        Ok(Self::with_fetcher(Arc::new(gateway), config))
    }

    /// Build over any fetcher
    pub fn with_fetcher(fetcher: Arc<dyn JsonFetcher>, config: &AtlasConfig) -> Self {
        let countries = Arc::new(CountryClient::new(fetcher.clone(), config));
        Self {
            resolver: CountryResolver::new(countries.clone()),
            enricher: Enricher::from_config(fetcher, config),
            countries,
            catalog: Catalog::new(),
            featured: config.defaults.featured.clone(),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn resolver(&self) -> &CountryResolver {
        &self.resolver
    }

    /// Load every country into the catalog
    pub async fn load_all(&self) -> Result<Arc<[CountrySummary]>> {
        self.catalog.load_all(&self.countries).await
    }

    /// Load one region into the catalog
    pub async fn load_by_region(&self, region: &str) -> Result<Arc<[CountrySummary]>> {
        self.catalog.load_by_region(&self.countries, region).await
    }

    /// Search the catalog, loading every country first if it is empty
    pub async fn search(&self, term: &str) -> Result<Vec<CountrySummary>> {
        if self.catalog.is_empty() {
            self.load_all().await?;
        }
        Ok(self.catalog.search(term))
    }

    /// Resolve and enrich one country. `Ok(None)` when nothing matches the name.
    #[instrument(skip(self))]
    pub async fn country_profile(&self, name: &str) -> Result<Option<CountryProfile>> {
        let Some(detail) = self.resolver.resolve_by_name(name).await? else {
            return Ok(None);
        };

        let enrichment = self.enricher.enrich(&detail).await;
        info!(
            "Profile ready for {} (weather: {})",
            detail.name(),
            enrichment.weather.is_some()
        );
        Ok(Some(CountryProfile { detail, enrichment }))
    }

    /// Featured profiles for the given names, or the configured list when empty
    pub async fn featured<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<CountryProfile>> {
        let aggregator = FeaturedAggregator::new(&self.resolver, &self.enricher);
        if names.is_empty() {
            aggregator.load_featured(&self.featured).await
        } else {
            aggregator.load_featured(names).await
        }
    }
}
