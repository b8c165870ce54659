//! Data models for Country Atlas
//!
//! This module contains the core domain models organized by concern:
//! - Country: summary (listing) and detail (lookup) records
//! - Weather: current conditions for a country's coordinates
//! - Profile: a detail record joined with its enrichment

pub mod country;
pub mod profile;
pub mod weather;

// Re-export all public types for convenient access
pub use country::{Coordinates, CountryDetail, CountrySummary, DecodeOptions, Independence};
pub use profile::{CountryProfile, EnrichmentResult};
pub use weather::WeatherSnapshot;

/// Group digits in threes with `.` (214326223 -> "214.326.223")
#[must_use]
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}
