//! REST Countries client
//!
//! Builds the listing and lookup URLs and turns raw payloads into
//! [`CountrySummary`] / [`CountryDetail`] records.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::config::{AtlasConfig, CountriesConfig};
use crate::gateway::JsonFetcher;
use crate::models::{CountryDetail, CountrySummary, DecodeOptions};
use crate::{AtlasError, Result};

/// Fields requested by the listing endpoints
pub const SUMMARY_FIELDS: &str =
    "name,flags,capital,population,continents,languages,currencies,region,translations";

/// Fields requested by the lookup endpoints
pub const DETAIL_FIELDS: &str = "name,capital,population,languages,currencies,latlng,timezones,flags,borders,region,subregion,continents,translations,cca3,idd,tld,area,independent";

/// Name lookup strategies, in the order they are tried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupStrategy {
    /// `/name/{name}?fullText=true`
    ExactName,
    /// `/translation/{name}`
    Translation,
    /// `/name/{name}` without `fullText`
    PartialName,
}

impl LookupStrategy {
    /// Priority order used by the resolver
    pub const ORDER: [LookupStrategy; 3] = [
        LookupStrategy::ExactName,
        LookupStrategy::Translation,
        LookupStrategy::PartialName,
    ];
}

impl std::fmt::Display for LookupStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupStrategy::ExactName => write!(f, "exact name"),
            LookupStrategy::Translation => write!(f, "translation"),
            LookupStrategy::PartialName => write!(f, "partial name"),
        }
    }
}

/// Client for the country-data provider
pub struct CountryClient {
    fetcher: Arc<dyn JsonFetcher>,
    base_url: String,
    translation_key: String,
    placeholder_flag: String,
}

impl CountryClient {
    /// Create a new client
    pub fn new(fetcher: Arc<dyn JsonFetcher>, config: &AtlasConfig) -> Self {
        let CountriesConfig {
            base_url,
            translation_key,
        } = &config.countries;

        Self {
            fetcher,
            base_url: base_url.trim_end_matches('/').to_string(),
            translation_key: translation_key.clone(),
            placeholder_flag: config.defaults.placeholder_flag.clone(),
        }
    }

    fn options(&self) -> DecodeOptions<'_> {
        DecodeOptions {
            translation_key: &self.translation_key,
            placeholder_flag: &self.placeholder_flag,
        }
    }

    /// URL of the full listing
    #[must_use]
    pub fn all_url(&self) -> String {
        format!("{}/all?fields={SUMMARY_FIELDS}", self.base_url)
    }

    /// URL of one region's listing
    #[must_use]
    pub fn region_url(&self, region: &str) -> String {
        format!(
            "{}/region/{}?fields={SUMMARY_FIELDS}",
            self.base_url,
            urlencoding::encode(region)
        )
    }

    /// URL of a name lookup under the given strategy
    #[must_use]
    pub fn lookup_url(&self, strategy: LookupStrategy, name: &str) -> String {
        let encoded = urlencoding::encode(name);
        match strategy {
            LookupStrategy::ExactName => format!(
                "{}/name/{encoded}?fullText=true&fields={DETAIL_FIELDS}",
                self.base_url
            ),
            LookupStrategy::Translation => format!(
                "{}/translation/{encoded}?fields={DETAIL_FIELDS}",
                self.base_url
            ),
            LookupStrategy::PartialName => {
                format!("{}/name/{encoded}?fields={DETAIL_FIELDS}", self.base_url)
            }
        }
    }

    /// Fetch every country
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<CountrySummary>> {
        let payload = self.fetcher.fetch_json(&self.all_url()).await?;
        let summaries = self.summaries_from(&payload, "country list")?;
        info!("Fetched {} countries", summaries.len());
        Ok(summaries)
    }

    /// Fetch the countries of one region
    #[instrument(skip(self))]
    pub async fn list_by_region(&self, region: &str) -> Result<Vec<CountrySummary>> {
        let payload = self.fetcher.fetch_json(&self.region_url(region)).await?;
        let summaries = self.summaries_from(&payload, &format!("region '{region}'"))?;
        info!("Fetched {} countries for region {}", summaries.len(), region);
        Ok(summaries)
    }

    /// Run one lookup strategy. `Ok(None)` means the provider had nothing usable.
    pub async fn lookup(&self, strategy: LookupStrategy, name: &str) -> Result<Option<CountryDetail>> {
        let url = self.lookup_url(strategy, name);
        let payload = self.fetcher.fetch_json(&url).await?;
        Ok(self.first_detail(&payload))
    }

    fn summaries_from(&self, payload: &Value, what: &str) -> Result<Vec<CountrySummary>> {
        let items = payload
            .as_array()
            .ok_or_else(|| AtlasError::load(format!("Malformed {what}: expected an array")))?;

        if items.is_empty() {
            return Err(AtlasError::load(format!("Empty {what} received")));
        }

        let options = self.options();
        let summaries: Vec<CountrySummary> = items
            .iter()
            .filter_map(|item| CountrySummary::from_payload(item, &options))
            .collect();

        if summaries.len() < items.len() {
            debug!(
                "Skipped {} entries without a common name in {}",
                items.len() - summaries.len(),
                what
            );
        }

        if summaries.is_empty() {
            return Err(AtlasError::load(format!("No usable entries in {what}")));
        }

        Ok(summaries)
    }

    fn first_detail(&self, payload: &Value) -> Option<CountryDetail> {
        let first = payload.as_array()?.first()?;
        CountryDetail::from_payload(first, &self.options())
    }
}
