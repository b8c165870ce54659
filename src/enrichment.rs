//! Weather and image enrichment for resolved countries
//!
//! Both lookups run concurrently and neither can fail the enrichment: a
//! missing or failed weather lookup leaves `weather` empty, a failed image
//! search falls back to the placeholder image.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::config::AtlasConfig;
use crate::gateway::{JsonFetcher, decode};
use crate::models::weather::openweather::CurrentWeatherResponse;
use crate::models::{Coordinates, CountryDetail, EnrichmentResult, WeatherSnapshot};
use crate::{AtlasError, Result};

/// OpenWeatherMap current-weather client
pub struct WeatherClient {
    fetcher: Arc<dyn JsonFetcher>,
    base_url: String,
    api_key: String,
    units: String,
    lang: String,
}

impl WeatherClient {
    pub fn new(fetcher: Arc<dyn JsonFetcher>, config: &AtlasConfig) -> Self {
        Self {
            fetcher,
            base_url: config.weather.base_url.clone(),
            api_key: config.weather.api_key.clone().unwrap_or_default(),
            units: config.weather.units.clone(),
            lang: config.weather.lang.clone(),
        }
    }

    #[must_use]
    pub fn current_url(&self, coordinates: Coordinates) -> String {
        format!(
            "{}?lat={}&lon={}&units={}&lang={}&appid={}",
            self.base_url,
            coordinates.latitude,
            coordinates.longitude,
            self.units,
            self.lang,
            urlencoding::encode(&self.api_key)
        )
    }

    /// Current conditions at the given coordinates
    pub async fn current(&self, coordinates: Coordinates) -> Result<WeatherSnapshot> {
        let payload = self.fetcher.fetch_json(&self.current_url(coordinates)).await?;
        let response: CurrentWeatherResponse = decode(payload, "weather")?;
        Ok(response.into())
    }
}

/// Unsplash photo search response
#[derive(Debug, Deserialize)]
struct PhotoSearchResponse {
    #[serde(default)]
    results: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    urls: PhotoUrls,
}

#[derive(Debug, Deserialize)]
struct PhotoUrls {
    full: String,
}

/// Unsplash image-search client
pub struct ImageClient {
    fetcher: Arc<dyn JsonFetcher>,
    base_url: String,
    access_key: String,
}

impl ImageClient {
    pub fn new(fetcher: Arc<dyn JsonFetcher>, config: &AtlasConfig) -> Self {
        Self {
            fetcher,
            base_url: config.images.base_url.clone(),
            access_key: config.images.access_key.clone().unwrap_or_default(),
        }
    }

    #[must_use]
    pub fn search_url(&self, query: &str) -> String {
        format!(
            "{}?query={}&per_page=1&client_id={}",
            self.base_url,
            urlencoding::encode(query),
            urlencoding::encode(&self.access_key)
        )
    }

    /// URL of the best-ranked image for `query`
    pub async fn first_image(&self, query: &str) -> Result<String> {
        let payload = self.fetcher.fetch_json(&self.search_url(query)).await?;
        let response: PhotoSearchResponse = decode(payload, "image search")?;
        response
            .results
            .into_iter()
            .next()
            .map(|photo| photo.urls.full)
            .ok_or_else(|| AtlasError::decode(format!("No images for '{query}'")))
    }
}

/// Runs the weather and image lookups for a resolved country
pub struct Enricher {
    weather: WeatherClient,
    images: ImageClient,
    placeholder_image: String,
}

impl Enricher {
    #[must_use]
    pub fn new(weather: WeatherClient, images: ImageClient, placeholder_image: String) -> Self {
        Self {
            weather,
            images,
            placeholder_image,
        }
    }

    /// Build from configuration, sharing one fetcher
    pub fn from_config(fetcher: Arc<dyn JsonFetcher>, config: &AtlasConfig) -> Self {
        Self::new(
            WeatherClient::new(fetcher.clone(), config),
            ImageClient::new(fetcher, config),
            config.defaults.placeholder_image.clone(),
        )
    }

    /// Fetch weather and image concurrently; never fails.
    #[instrument(skip(self, detail), fields(country = %detail.name()))]
    pub async fn enrich(&self, detail: &CountryDetail) -> EnrichmentResult {
        let (weather, image_url) =
            futures::join!(self.weather_for(detail), self.image_for(detail.name()));

        EnrichmentResult { weather, image_url }
    }

    async fn weather_for(&self, detail: &CountryDetail) -> Option<WeatherSnapshot> {
        let Some(coordinates) = detail.coordinates else {
            debug!("No coordinates for {}, skipping weather", detail.name());
            return None;
        };

        match self.weather.current(coordinates).await {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!("Weather lookup failed for {}: {}", detail.name(), e);
                None
            }
        }
    }

    async fn image_for(&self, query: &str) -> String {
        match self.images.first_image(query).await {
            Ok(url) => url,
            Err(e) => {
                warn!("Image lookup failed for {}: {}", query, e);
                self.placeholder_image.clone()
            }
        }
    }
}
