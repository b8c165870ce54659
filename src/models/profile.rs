//! Enrichment results and the detail/featured view record

use serde::{Deserialize, Serialize};

use super::{CountryDetail, WeatherSnapshot};

/// Weather and imagery gathered for one country, fresh per request
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EnrichmentResult {
    /// `None` when the country has no coordinates or the lookup failed
    pub weather: Option<WeatherSnapshot>,
    /// Found image, or the configured placeholder
    pub image_url: String,
}

/// A resolved country together with its enrichment
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CountryProfile {
    pub detail: CountryDetail,
    pub enrichment: EnrichmentResult,
}

impl CountryProfile {
    /// Canonical common name
    #[must_use]
    pub fn name(&self) -> &str {
        self.detail.name()
    }

    /// Weather line for display
    #[must_use]
    pub fn weather_summary(&self) -> String {
        self.enrichment
            .weather
            .as_ref()
            .map_or_else(|| crate::extract::NOT_AVAILABLE.to_string(), WeatherSnapshot::summary)
    }
}
