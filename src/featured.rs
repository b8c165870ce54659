//! Featured countries: best-effort resolve + enrich over a fixed name list

use futures::future::join_all;
use tracing::{info, instrument, warn};

use crate::enrichment::Enricher;
use crate::models::CountryProfile;
use crate::resolver::CountryResolver;
use crate::{AtlasError, Result};

/// Resolves and enriches a batch of names concurrently
pub struct FeaturedAggregator<'a> {
    resolver: &'a CountryResolver,
    enricher: &'a Enricher,
}

impl<'a> FeaturedAggregator<'a> {
    #[must_use]
    pub fn new(resolver: &'a CountryResolver, enricher: &'a Enricher) -> Self {
        Self { resolver, enricher }
    }

    /// Profiles of the names that resolved, in input order.
    ///
    /// Names that are not found or fail are dropped, not retried. Fails with
    /// [`AtlasError::NoFeaturedCountries`] only when nothing resolved.
    #[instrument(skip(self, names), fields(count = names.len()))]
    pub async fn load_featured<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<CountryProfile>> {
        let lookups = names.iter().map(|name| self.profile(name.as_ref()));
        let results = join_all(lookups).await;

        let profiles: Vec<CountryProfile> = names
            .iter()
            .zip(results)
            .filter_map(|(name, result)| match result {
                Ok(profile) => Some(profile),
                Err(e) => {
                    warn!("Dropping featured country '{}': {}", name.as_ref(), e);
                    None
                }
            })
            .collect();

        if profiles.is_empty() {
            return Err(AtlasError::NoFeaturedCountries);
        }

        info!("Loaded {}/{} featured countries", profiles.len(), names.len());
        Ok(profiles)
    }

    async fn profile(&self, name: &str) -> Result<CountryProfile> {
        let detail = self.resolver.resolve_required(name).await?;
        let enrichment = self.enricher.enrich(&detail).await;
        Ok(CountryProfile { detail, enrichment })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AtlasConfig;
    use crate::countries::CountryClient;
    use crate::gateway::JsonFetcher;
    use crate::gateway::testing::{GatedFetcher, Reply, ScriptedFetcher};
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;

    fn fixtures(fetcher: ScriptedFetcher) -> (CountryResolver, Enricher) {
        fixtures_over(Arc::new(fetcher))
    }

    fn fixtures_over(fetcher: Arc<dyn JsonFetcher>) -> (CountryResolver, Enricher) {
        let config = AtlasConfig::default();
        let client = CountryClient::new(fetcher.clone(), &config);
        (
            CountryResolver::new(Arc::new(client)),
            Enricher::from_config(fetcher, &config),
        )
    }

    fn brazil() -> ScriptedFetcher {
        ScriptedFetcher::new()
            .json(
                "/name/Brazil?fullText=true",
                json!([{"name": {"common": "Brazil"}, "latlng": [-10.0, -55.0]}]),
            )
            .json(
                "/name/Japan?fullText=true",
                json!([{"name": {"common": "Japan"}}]),
            )
            .json(
                "api.unsplash.com",
                json!({"results": [{"urls": {"full": "https://images.test/x.jpg"}}]}),
            )
    }

    #[tokio::test]
    async fn test_unresolved_names_are_dropped() {
        let (resolver, enricher) = fixtures(brazil());
        let featured = FeaturedAggregator::new(&resolver, &enricher)
            .load_featured(&["Atlantis", "Brazil"])
            .await
            .unwrap();
        assert_eq!(featured.len(), 1);
        assert_eq!(featured[0].name(), "Brazil");
        assert_eq!(featured[0].enrichment.image_url, "https://images.test/x.jpg");
    }

    #[tokio::test]
    async fn test_only_unresolved_names_fail() {
        let (resolver, enricher) = fixtures(brazil());
        let err = FeaturedAggregator::new(&resolver, &enricher)
            .load_featured(&["Atlantis"])
            .await
            .unwrap_err();
        assert!(matches!(err, AtlasError::NoFeaturedCountries));
    }

    #[tokio::test]
    async fn test_hard_failures_are_dropped_too() {
        let fetcher = brazil().route("/name/Italy?fullText=true", Reply::Status(500));
        let (resolver, enricher) = fixtures(fetcher);
        let featured = FeaturedAggregator::new(&resolver, &enricher)
            .load_featured(&["Japan", "Italy", "Brazil"])
            .await
            .unwrap();
        let names: Vec<&str> = featured.iter().map(CountryProfile::name).collect();
        assert_eq!(names, vec!["Japan", "Brazil"]);
    }

    #[tokio::test]
    async fn test_empty_batch_fails() {
        let (resolver, enricher) = fixtures(brazil());
        let names: [&str; 0] = [];
        let err = FeaturedAggregator::new(&resolver, &enricher)
            .load_featured(&names)
            .await
            .unwrap_err();
        assert!(matches!(err, AtlasError::NoFeaturedCountries));
    }

    #[tokio::test]
    async fn test_names_resolve_concurrently() {
        // No coordinates, so each name costs one lookup and one image search.
        let scripted = ScriptedFetcher::new()
            .json("/name/Chile?fullText=true", json!([{"name": {"common": "Chile"}}]))
            .json("/name/Japan?fullText=true", json!([{"name": {"common": "Japan"}}]))
            .json(
                "api.unsplash.com",
                json!({"results": [{"urls": {"full": "https://images.test/x.jpg"}}]}),
            );
        let (resolver, enricher) = fixtures_over(Arc::new(GatedFetcher::new(scripted, 2)));

        let featured = tokio::time::timeout(
            Duration::from_secs(5),
            FeaturedAggregator::new(&resolver, &enricher).load_featured(&["Chile", "Japan"]),
        )
        .await
        .expect("both names should be looked up at the same time")
        .unwrap();

        let names: Vec<&str> = featured.iter().map(CountryProfile::name).collect();
        assert_eq!(names, vec!["Chile", "Japan"]);
    }
}
