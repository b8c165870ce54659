//! Country records assembled from REST Countries payloads
//!
//! Listing and lookup endpoints return different shapes; they are kept as two
//! record types joined only by the canonical common name.

use crate::extract::{
    FieldKind, NOT_AVAILABLE, dialing_code, extract_primary, first_string, localized,
    native_names, string_list, string_or_na,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::format_thousands;

/// Settings that shape record assembly
#[derive(Debug, Clone, Copy)]
pub struct DecodeOptions<'a> {
    /// Translation key for localized names ("por", "fra", ...)
    pub translation_key: &'a str,
    /// Flag used when the payload has neither svg nor png
    pub placeholder_flag: &'a str,
}

/// Geographic coordinates in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Read a `[lat, lon]` pair; anything but exactly two numbers is absent.
    #[must_use]
    pub fn from_latlng(value: Option<&Value>) -> Option<Self> {
        match value?.as_array()?.as_slice() {
            [lat, lon] => Some(Self {
                latitude: lat.as_f64()?,
                longitude: lon.as_f64()?,
            }),
            _ => None,
        }
    }
}

/// Tri-state independence flag
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Independence {
    Yes,
    No,
    Unknown,
}

impl Independence {
    fn from_value(value: Option<&Value>) -> Self {
        match value.and_then(Value::as_bool) {
            Some(true) => Independence::Yes,
            Some(false) => Independence::No,
            None => Independence::Unknown,
        }
    }
}

impl std::fmt::Display for Independence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Independence::Yes => write!(f, "Yes"),
            Independence::No => write!(f, "No"),
            Independence::Unknown => write!(f, "{NOT_AVAILABLE}"),
        }
    }
}

/// Country record used by the catalog grid
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CountrySummary {
    /// Canonical common name (`name.common`)
    pub name: String,
    /// Common name in the configured translation, when the provider has one
    pub localized_name: Option<String>,
    pub flag_url: String,
    pub capital: String,
    pub population: Option<u64>,
    pub continent: String,
    pub region: String,
    pub currency: String,
    pub language: String,
}

impl CountrySummary {
    /// Assemble a summary; `None` when the payload has no canonical name.
    #[must_use]
    pub fn from_payload(country: &Value, options: &DecodeOptions<'_>) -> Option<Self> {
        let name = country
            .get("name")?
            .get("common")?
            .as_str()
            .filter(|s| !s.is_empty())?
            .to_string();

        let flags = country.get("flags");
        let flag_url = ["svg", "png"]
            .iter()
            .find_map(|kind| flags.and_then(|f| f.get(*kind)).and_then(Value::as_str))
            .filter(|s| !s.is_empty())
            .unwrap_or(options.placeholder_flag)
            .to_string();

        Some(Self {
            name,
            localized_name: localized(
                country.get("translations"),
                options.translation_key,
                "common",
            ),
            flag_url,
            capital: first_string(country.get("capital")),
            population: country
                .get("population")
                .and_then(Value::as_u64)
                .filter(|&p| p > 0),
            continent: first_string(country.get("continents")),
            region: string_or_na(country.get("region")),
            currency: extract_primary(country.get("currencies"), FieldKind::Currency),
            language: extract_primary(country.get("languages"), FieldKind::Language),
        })
    }

    /// Exact region match, ignoring ASCII case and surrounding whitespace
    #[must_use]
    pub fn in_region(&self, region: &str) -> bool {
        self.region.eq_ignore_ascii_case(region.trim())
    }

    /// Localized name when present, otherwise the canonical name
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.localized_name.as_deref().unwrap_or(&self.name)
    }

    /// Population with digit grouping, or the sentinel
    #[must_use]
    pub fn format_population(&self) -> String {
        self.population
            .map_or_else(|| NOT_AVAILABLE.to_string(), format_thousands)
    }
}

/// Full country record produced by name resolution
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CountryDetail {
    /// Fields shared with the listing shape
    pub summary: CountrySummary,
    pub official_name: String,
    pub subregion: String,
    pub area_km2: Option<f64>,
    pub coordinates: Option<Coordinates>,
    pub timezone: String,
    /// Bordering country codes, upper-cased
    pub borders: Vec<String>,
    pub independence: Independence,
    pub dialing_code: String,
    pub tld: String,
    pub native_names: Vec<String>,
    pub cca3: String,
}

impl CountryDetail {
    /// Assemble a detail record; `None` when the payload has no canonical name.
    #[must_use]
    pub fn from_payload(country: &Value, options: &DecodeOptions<'_>) -> Option<Self> {
        let summary = CountrySummary::from_payload(country, options)?;
        let name = country.get("name");

        let official_name = localized(
            country.get("translations"),
            options.translation_key,
            "official",
        )
        .unwrap_or_else(|| string_or_na(name.and_then(|n| n.get("official"))));

        Some(Self {
            summary,
            official_name,
            subregion: string_or_na(country.get("subregion")),
            area_km2: country
                .get("area")
                .and_then(Value::as_f64)
                .filter(|area| *area > 0.0),
            coordinates: Coordinates::from_latlng(country.get("latlng")),
            timezone: first_string(country.get("timezones")),
            borders: string_list(country.get("borders"))
                .into_iter()
                .map(|code| code.to_uppercase())
                .collect(),
            independence: Independence::from_value(country.get("independent")),
            dialing_code: dialing_code(country.get("idd")),
            tld: first_string(country.get("tld")),
            native_names: native_names(name.and_then(|n| n.get("nativeName"))),
            cca3: string_or_na(country.get("cca3")),
        })
    }

    /// Canonical common name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.summary.name
    }

    /// Area with digit grouping and unit, or the sentinel
    #[must_use]
    pub fn format_area(&self) -> String {
        self.area_km2.map_or_else(
            || NOT_AVAILABLE.to_string(),
            |area| format!("{} km²", format_thousands(area.round() as u64)),
        )
    }

    /// Borders joined for display
    #[must_use]
    pub fn format_borders(&self) -> String {
        if self.borders.is_empty() {
            "No land borders".to_string()
        } else {
            self.borders.join(", ")
        }
    }
}
