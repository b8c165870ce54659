//! In-memory country catalog
//!
//! Holds the last loaded country list sorted under [`Collation`], and serves
//! substring search and exact-region filtering over it. Loads replace the
//! whole state by swapping an `Arc`. Search records its term but never
//! touches the country list.

use std::cmp::Ordering;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, info, instrument};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::Result;
use crate::countries::CountryClient;
use crate::models::CountrySummary;

/// Base-sensitivity collation: case, accents, punctuation and spacing are
/// insignificant.
#[derive(Debug, Clone, Copy, Default)]
pub struct Collation;

impl Collation {
    /// Comparison key: NFD, combining marks dropped, alphanumerics only, lowercased.
    #[must_use]
    pub fn key(&self, s: &str) -> String {
        s.nfd()
            .filter(|c| !is_combining_mark(*c))
            .filter(|c| c.is_alphanumeric())
            .flat_map(char::to_lowercase)
            .collect()
    }

    #[must_use]
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        self.key(a).cmp(&self.key(b))
    }

    /// Stable sort by display name; collation-equal names keep their order.
    pub fn sort(&self, countries: &mut Vec<CountrySummary>) {
        let mut keyed: Vec<(String, CountrySummary)> = countries
            .drain(..)
            .map(|c| (self.key(c.display_name()), c))
            .collect();
        keyed.sort_by(|a, b| a.0.cmp(&b.0));
        countries.extend(keyed.into_iter().map(|(_, c)| c));
    }
}

/// Immutable view of the catalog at one point in time
#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    /// Sorted by collated display name
    pub countries: Arc<[CountrySummary]>,
    /// Region of the last regional load, `None` after a full load
    pub region: Option<String>,
    /// Last term passed to [`Catalog::search`]
    pub search_term: Option<String>,
}

/// Country list shared by the grid views
#[derive(Debug, Default)]
pub struct Catalog {
    state: RwLock<Arc<CatalogState>>,
    collation: Collation,
}

impl Catalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state; cheap to clone and never half-written
    #[must_use]
    pub fn snapshot(&self) -> Arc<CatalogState> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn swap(&self, next: CatalogState) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(next);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshot().countries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn last_region(&self) -> Option<String> {
        self.snapshot().region.clone()
    }

    #[must_use]
    pub fn last_search(&self) -> Option<String> {
        self.snapshot().search_term.clone()
    }

    /// Fetch every country and replace the catalog. On error the previous
    /// catalog is kept.
    #[instrument(skip(self, client))]
    pub async fn load_all(&self, client: &CountryClient) -> Result<Arc<[CountrySummary]>> {
        let countries = client.list_all().await?;
        let loaded = self.replace(countries, None);
        info!("Catalog loaded with {} countries", loaded.len());
        Ok(loaded)
    }

    /// Fetch one region and replace the catalog. On error the previous
    /// catalog is kept.
    #[instrument(skip(self, client))]
    pub async fn load_by_region(
        &self,
        client: &CountryClient,
        region: &str,
    ) -> Result<Arc<[CountrySummary]>> {
        let countries = client.list_by_region(region).await?;
        let loaded = self.replace(countries, Some(region.to_string()));
        info!("Catalog loaded with {} countries of {}", loaded.len(), region);
        Ok(loaded)
    }

    /// Sort and install a new country list wholesale.
    pub fn replace(
        &self,
        mut countries: Vec<CountrySummary>,
        region: Option<String>,
    ) -> Arc<[CountrySummary]> {
        self.collation.sort(&mut countries);
        let countries: Arc<[CountrySummary]> = countries.into();
        self.swap(CatalogState {
            countries: countries.clone(),
            region,
            search_term: None,
        });
        countries
    }

    /// Case-insensitive substring search over common and localized names.
    /// An empty term returns the whole catalog in order.
    pub fn search(&self, term: &str) -> Vec<CountrySummary> {
        let term = term.trim().to_lowercase();

        // Read and record under one write guard; an older list is never written back.
        let current = {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            let next = Arc::new(CatalogState {
                search_term: (!term.is_empty()).then(|| term.clone()),
                ..(**state).clone()
            });
            *state = next.clone();
            next
        };

        if term.is_empty() {
            return current.countries.to_vec();
        }

        let found: Vec<CountrySummary> = current
            .countries
            .iter()
            .filter(|country| {
                country.name.to_lowercase().contains(&term)
                    || country
                        .localized_name
                        .as_deref()
                        .is_some_and(|local| local.to_lowercase().contains(&term))
            })
            .cloned()
            .collect();

        debug!("Search '{}' matched {} countries", term, found.len());
        found
    }

    /// Countries whose region equals `region` (case-insensitive), in catalog order
    #[must_use]
    pub fn filter_region(&self, region: &str) -> Vec<CountrySummary> {
        self.snapshot()
            .countries
            .iter()
            .filter(|country| country.in_region(region))
            .cloned()
            .collect()
    }
}
