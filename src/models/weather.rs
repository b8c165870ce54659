//! Current weather snapshot and OpenWeatherMap decoding

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::extract::NOT_AVAILABLE;

/// Current conditions at a country's reference coordinates
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherSnapshot {
    /// Observation time reported by the provider
    pub observed_at: Option<DateTime<Utc>>,
    /// Temperature in Celsius
    pub temperature: f32,
    /// Perceived temperature in Celsius
    pub feels_like: f32,
    pub temp_min: f32,
    pub temp_max: f32,
    /// Relative humidity percentage (0-100)
    pub humidity: u8,
    /// Human-readable description of weather conditions
    pub description: String,
    /// Weather condition icon ID from API
    pub icon: String,
}

impl WeatherSnapshot {
    /// Format temperature with unit, rounded like the provider's widgets
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{:.0}°C", self.temperature.round())
    }

    /// Short "23°C, clear sky" line
    #[must_use]
    pub fn summary(&self) -> String {
        format!("{}, {}", self.format_temperature(), self.description)
    }

    /// URL of the condition icon, when the provider sent one
    #[must_use]
    pub fn icon_url(&self) -> Option<String> {
        (self.icon != NOT_AVAILABLE)
            .then(|| format!("https://openweathermap.org/img/wn/{}@2x.png", self.icon))
    }
}

/// OpenWeatherMap current-weather response structures
pub(crate) mod openweather {
    use super::WeatherSnapshot;
    use crate::extract::NOT_AVAILABLE;
    use chrono::DateTime;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct CurrentWeatherResponse {
        pub main: MainData,
        #[serde(default)]
        pub weather: Vec<Condition>,
        /// Unix timestamp of the observation
        pub dt: Option<i64>,
    }

    #[derive(Debug, Deserialize)]
    pub struct MainData {
        pub temp: f32,
        pub feels_like: f32,
        pub temp_min: f32,
        pub temp_max: f32,
        pub humidity: u8,
    }

    #[derive(Debug, Deserialize)]
    pub struct Condition {
        pub description: Option<String>,
        pub icon: Option<String>,
    }

    impl From<CurrentWeatherResponse> for WeatherSnapshot {
        fn from(response: CurrentWeatherResponse) -> Self {
            let condition = response.weather.into_iter().next();
            let (description, icon) = condition.map_or((None, None), |c| (c.description, c.icon));

            WeatherSnapshot {
                observed_at: response.dt.and_then(|secs| DateTime::from_timestamp(secs, 0)),
                temperature: response.main.temp,
                feels_like: response.main.feels_like,
                temp_min: response.main.temp_min,
                temp_max: response.main.temp_max,
                humidity: response.main.humidity,
                description: description.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                icon: icon.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            }
        }
    }
}
