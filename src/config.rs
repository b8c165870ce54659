//! Configuration management for Country Atlas
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::AtlasError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for Country Atlas
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtlasConfig {
    /// Country-data provider settings
    #[serde(default)]
    pub countries: CountriesConfig,
    /// Weather provider settings
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Image-search provider settings
    #[serde(default)]
    pub images: ImagesConfig,
    /// Shared HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Default application settings
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// REST Countries settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountriesConfig {
    /// Base URL of the country-data API
    #[serde(default = "default_countries_base_url")]
    pub base_url: String,
    /// Translation key used for localized names (e.g. "por", "fra")
    #[serde(default = "default_translation_key")]
    pub translation_key: String,
}

/// OpenWeatherMap settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Weather API key
    pub api_key: Option<String>,
    /// Base URL for the current-weather endpoint
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Unit system passed to the provider
    #[serde(default = "default_weather_units")]
    pub units: String,
    /// Language of the condition descriptions
    #[serde(default = "default_weather_lang")]
    pub lang: String,
}

/// Unsplash settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImagesConfig {
    /// Unsplash access key
    pub access_key: Option<String>,
    /// Base URL for the photo search endpoint
    #[serde(default = "default_images_base_url")]
    pub base_url: String,
}

/// Shared HTTP client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_http_timeout")]
    pub timeout_seconds: u32,
    /// Retries for transient failures (0 disables retrying)
    #[serde(default)]
    pub max_retries: u32,
    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Default application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Image used when the image search yields nothing
    #[serde(default = "default_placeholder_image")]
    pub placeholder_image: String,
    /// Flag used when the provider has no flag URL
    #[serde(default = "default_placeholder_flag")]
    pub placeholder_flag: String,
    /// Countries shown on the featured view
    #[serde(default = "default_featured")]
    pub featured: Vec<String>,
}

// Default value functions
fn default_countries_base_url() -> String {
    "https://restcountries.com/v3.1".to_string()
}

fn default_translation_key() -> String {
    "por".to_string()
}

fn default_weather_base_url() -> String {
    "https://api.openweathermap.org/data/2.5/weather".to_string()
}

fn default_weather_units() -> String {
    "metric".to_string()
}

fn default_weather_lang() -> String {
    "pt_br".to_string()
}

fn default_images_base_url() -> String {
    "https://api.unsplash.com/search/photos".to_string()
}

fn default_http_timeout() -> u32 {
    30
}

fn default_user_agent() -> String {
    format!("CountryAtlas/{}", crate::VERSION)
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_placeholder_image() -> String {
    "https://via.placeholder.com/1920x1080?text=NoMap".to_string()
}

fn default_placeholder_flag() -> String {
    "https://via.placeholder.com/300x200?text=Flag".to_string()
}

fn default_featured() -> Vec<String> {
    ["Brazil", "Japan", "Italy", "Egypt", "Australia", "Canada"]
        .iter()
        .map(|s| (*s).to_string())
        .collect()
}

impl Default for CountriesConfig {
    fn default() -> Self {
        Self {
            base_url: default_countries_base_url(),
            translation_key: default_translation_key(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_weather_base_url(),
            units: default_weather_units(),
            lang: default_weather_lang(),
        }
    }
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            access_key: None,
            base_url: default_images_base_url(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_http_timeout(),
            max_retries: 0,
            user_agent: default_user_agent(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            placeholder_image: default_placeholder_image(),
            placeholder_flag: default_placeholder_flag(),
            featured: default_featured(),
        }
    }
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            countries: CountriesConfig::default(),
            weather: WeatherConfig::default(),
            images: ImagesConfig::default(),
            http: HttpConfig::default(),
            logging: LoggingConfig::default(),
            defaults: DefaultsConfig::default(),
        }
    }
}

impl AtlasConfig {
    /// Load configuration from the default file location and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // ATLAS_WEATHER__API_KEY -> weather.api_key
        builder = builder.add_source(
            Environment::with_prefix("ATLAS")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("defaults.featured"),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: AtlasConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("country-atlas").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.countries.base_url.is_empty() {
            self.countries.base_url = default_countries_base_url();
        }
        if self.countries.translation_key.is_empty() {
            self.countries.translation_key = default_translation_key();
        }
        if self.weather.base_url.is_empty() {
            self.weather.base_url = default_weather_base_url();
        }
        if self.weather.units.is_empty() {
            self.weather.units = default_weather_units();
        }
        if self.weather.lang.is_empty() {
            self.weather.lang = default_weather_lang();
        }
        if self.images.base_url.is_empty() {
            self.images.base_url = default_images_base_url();
        }
        if self.http.timeout_seconds == 0 {
            self.http.timeout_seconds = default_http_timeout();
        }
        if self.http.user_agent.is_empty() {
            self.http.user_agent = default_user_agent();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.defaults.placeholder_image.is_empty() {
            self.defaults.placeholder_image = default_placeholder_image();
        }
        if self.defaults.placeholder_flag.is_empty() {
            self.defaults.placeholder_flag = default_placeholder_flag();
        }
        if self.defaults.featured.is_empty() {
            self.defaults.featured = default_featured();
        }
        // Blank keys behave like missing keys
        if self.weather.api_key.as_deref().is_some_and(str::is_empty) {
            self.weather.api_key = None;
        }
        if self.images.access_key.as_deref().is_some_and(str::is_empty) {
            self.images.access_key = None;
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_urls()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_urls(&self) -> Result<()> {
        let urls = [
            ("Country API base URL", &self.countries.base_url),
            ("Weather API base URL", &self.weather.base_url),
            ("Image API base URL", &self.images.base_url),
        ];

        for (label, url) in urls {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(
                    AtlasError::config(format!("{label} must be a valid HTTP or HTTPS URL")).into(),
                );
            }
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.http.timeout_seconds > 300 {
            return Err(AtlasError::config("HTTP timeout cannot exceed 300 seconds").into());
        }

        if self.http.max_retries > 10 {
            return Err(AtlasError::config("HTTP max retries cannot exceed 10").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(AtlasError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(AtlasError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if self.defaults.featured.iter().any(|name| name.trim().is_empty()) {
            return Err(AtlasError::config("Featured country names cannot be blank").into());
        }

        Ok(())
    }
}
