//! Country Resolution Module
//!
//! Resolves a free-text country name into a [`CountryDetail`] by trying the
//! provider's lookup strategies in a fixed priority order. A 404 from one
//! strategy moves on to the next; any other failure aborts the resolution.

use std::future::Future;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::countries::{CountryClient, LookupStrategy};
use crate::models::CountryDetail;
use crate::{AtlasError, Result};

/// Evaluate `attempt` over `candidates` in order, one at a time, and return
/// the first match.
///
/// `Ok(None)` and soft misses ([`AtlasError::is_soft_miss`]) continue with
/// the next candidate; any other error is returned immediately and the
/// remaining candidates are never attempted. `Ok(None)` overall means every
/// candidate missed.
pub async fn first_match<C, T, F, Fut>(
    candidates: impl IntoIterator<Item = C>,
    mut attempt: F,
) -> Result<Option<T>>
where
    F: FnMut(C) -> Fut,
    Fut: Future<Output = Result<Option<T>>>,
{
    for candidate in candidates {
        match attempt(candidate).await {
            Ok(Some(found)) => return Ok(Some(found)),
            Ok(None) => {}
            Err(e) if e.is_soft_miss() => {}
            Err(e) => return Err(e),
        }
    }
    Ok(None)
}

/// Service for resolving country names
pub struct CountryResolver {
    client: Arc<CountryClient>,
}

impl CountryResolver {
    #[must_use]
    pub fn new(client: Arc<CountryClient>) -> Self {
        Self { client }
    }

    /// Resolve a country name. `Ok(None)` is the not-found outcome.
    #[instrument(skip(self))]
    pub async fn resolve_by_name(&self, name: &str) -> Result<Option<CountryDetail>> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AtlasError::validation("Country name cannot be empty"));
        }

        let client = &self.client;
        let resolved = first_match(LookupStrategy::ORDER, |strategy| async move {
            debug!("Trying {} lookup for '{}'", strategy, name);
            let result = client.lookup(strategy, name).await;
            match &result {
                Ok(Some(detail)) => debug!("{} lookup matched {}", strategy, detail.name()),
                Ok(None) => debug!("{} lookup returned no usable entry", strategy),
                Err(e) if e.is_soft_miss() => debug!("{} lookup missed: {}", strategy, e),
                Err(_) => {}
            }
            result
        })
        .await?;

        match &resolved {
            Some(detail) => info!("Resolved '{}' to {}", name, detail.name()),
            None => info!("No country found for '{}'", name),
        }

        Ok(resolved)
    }

    /// Resolve a country name, treating absence as [`AtlasError::NotFound`].
    pub async fn resolve_required(&self, name: &str) -> Result<CountryDetail> {
        self.resolve_by_name(name)
            .await?
            .ok_or_else(|| AtlasError::not_found(name.trim()))
    }
}
