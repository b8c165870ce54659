//! Integration tests for Country Atlas against mocked providers

use std::io::Write;
use std::sync::Arc;

use country_atlas::config::HttpConfig;
use country_atlas::{Atlas, AtlasConfig, AtlasError, HttpGateway, JsonFetcher};
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> AtlasConfig {
    let mut config = AtlasConfig::default();
    config.countries.base_url = server.uri();
    config.weather.base_url = format!("{}/data/2.5/weather", server.uri());
    config.weather.api_key = Some("test-key".to_string());
    config.images.base_url = format!("{}/search/photos", server.uri());
    config.images.access_key = Some("test-access".to_string());
    config.http.timeout_seconds = 5;
    config
}

fn atlas_for(server: &MockServer) -> Atlas {
    Atlas::new(&config_for(server)).expect("gateway should build")
}

fn brazil() -> Value {
    json!([{
        "name": {
            "common": "Brazil",
            "official": "Federative Republic of Brazil",
            "nativeName": {"por": {"official": "República Federativa do Brasil", "common": "Brasil"}}
        },
        "translations": {"por": {"official": "República Federativa do Brasil", "common": "Brasil"}},
        "capital": ["Brasília"],
        "population": 212559409,
        "region": "Americas",
        "subregion": "South America",
        "continents": ["South America"],
        "currencies": {"BRL": {"name": "Brazilian real", "symbol": "R$"}},
        "languages": {"por": "Portuguese"},
        "latlng": [-10.0, -55.0],
        "area": 8515767.0,
        "borders": ["arg", "bol"],
        "flags": {"png": "https://flagcdn.com/w320/br.png"}
    }])
}

fn weather() -> Value {
    json!({
        "weather": [{"description": "céu limpo", "icon": "01d"}],
        "main": {"temp": 27.6, "feels_like": 29.0, "temp_min": 26.0, "temp_max": 29.1, "humidity": 70},
        "dt": 1_700_000_000
    })
}

async fn mount_enrichment(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("appid", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(weather()))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/search/photos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({"results": [{"urls": {"full": "https://images.test/brazil.jpg"}}]}),
        ))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_gateway_maps_status_codes() {
    let server = MockServer::start().await;
    Mock::given(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let gateway = HttpGateway::new(&HttpConfig::default()).unwrap();

    let missing = gateway
        .fetch_json(&format!("{}/missing", server.uri()))
        .await
        .unwrap_err();
    assert_eq!(missing.status(), Some(404));
    assert!(missing.is_soft_miss());

    let broken = gateway
        .fetch_json(&format!("{}/broken", server.uri()))
        .await
        .unwrap_err();
    assert!(matches!(broken, AtlasError::Http { status: 500, .. }));
    assert!(!broken.is_soft_miss());
}

#[tokio::test]
async fn test_gateway_parses_json_and_rejects_garbage() {
    let server = MockServer::start().await;
    Mock::given(path("/ok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&server)
        .await;
    Mock::given(path("/html"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let gateway = HttpGateway::new(&HttpConfig::default()).unwrap();

    let value = gateway
        .fetch_json(&format!("{}/ok", server.uri()))
        .await
        .unwrap();
    assert_eq!(value, json!({"ok": true}));

    let err = gateway
        .fetch_json(&format!("{}/html", server.uri()))
        .await
        .unwrap_err();
    assert!(matches!(err, AtlasError::Decode { .. }));
}

#[tokio::test]
async fn test_gateway_unreachable_host_is_network_error() {
    let gateway = HttpGateway::new(&HttpConfig::default()).unwrap();
    let err = gateway
        .fetch_json("http://127.0.0.1:9/nothing")
        .await
        .unwrap_err();
    assert!(matches!(err, AtlasError::Network { .. }));
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_profile_falls_back_to_translation_lookup() {
    let server = MockServer::start().await;
    Mock::given(path("/name/Brasil"))
        .and(query_param("fullText", "true"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(path("/translation/Brasil"))
        .respond_with(ResponseTemplate::new(200).set_body_json(brazil()))
        .expect(1)
        .mount(&server)
        .await;
    mount_enrichment(&server).await;

    let profile = atlas_for(&server)
        .country_profile("Brasil")
        .await
        .unwrap()
        .expect("Brasil should resolve by translation");

    assert_eq!(profile.name(), "Brazil");
    assert_eq!(profile.detail.summary.localized_name.as_deref(), Some("Brasil"));
    assert_eq!(profile.detail.summary.format_population(), "212.559.409");
    assert_eq!(profile.detail.format_area(), "8.515.767 km²");
    assert_eq!(profile.enrichment.image_url, "https://images.test/brazil.jpg");

    let weather = profile.enrichment.weather.expect("weather should be present");
    assert_eq!(weather.format_temperature(), "28°C");
    assert_eq!(weather.description, "céu limpo");
}

#[tokio::test]
async fn test_hard_failure_aborts_before_translation() {
    let server = MockServer::start().await;
    Mock::given(path("/name/Brazil"))
        .and(query_param("fullText", "true"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(path("/translation/Brazil"))
        .respond_with(ResponseTemplate::new(200).set_body_json(brazil()))
        .expect(0)
        .mount(&server)
        .await;

    let err = atlas_for(&server)
        .country_profile("Brazil")
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert!(!err.is_not_found());
}

#[tokio::test]
async fn test_unknown_country_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let profile = atlas_for(&server).country_profile("Atlantis").await.unwrap();
    assert!(profile.is_none());

    let requests = server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 3);
    assert!(requests.iter().all(|r| !r.url.path().starts_with("/search")));
}

#[tokio::test]
async fn test_enrichment_failures_fall_back() {
    let server = MockServer::start().await;
    Mock::given(path("/name/Brazil"))
        .respond_with(ResponseTemplate::new(200).set_body_json(brazil()))
        .mount(&server)
        .await;
    Mock::given(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(path("/search/photos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let profile = Atlas::new(&config)
        .unwrap()
        .country_profile("Brazil")
        .await
        .unwrap()
        .unwrap();

    assert!(profile.enrichment.weather.is_none());
    assert_eq!(profile.enrichment.image_url, config.defaults.placeholder_image);
}

#[tokio::test]
async fn test_featured_drops_unresolved_names() {
    let server = MockServer::start().await;
    Mock::given(path("/name/Brazil"))
        .respond_with(ResponseTemplate::new(200).set_body_json(brazil()))
        .mount(&server)
        .await;
    mount_enrichment(&server).await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let atlas = atlas_for(&server);
    let featured = atlas.featured(&["Atlantis", "Brazil"]).await.unwrap();
    assert_eq!(featured.len(), 1);
    assert_eq!(featured[0].name(), "Brazil");

    let err = atlas.featured(&["Atlantis", "Lemuria"]).await.unwrap_err();
    assert!(matches!(err, AtlasError::NoFeaturedCountries));
}

#[tokio::test]
async fn test_region_load_sorts_and_filters() {
    let server = MockServer::start().await;
    Mock::given(path("/region/Americas"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": {"common": "Peru"}, "region": "Americas"},
            {"name": {"common": "Argentina"}, "region": "Americas"},
            {"name": {"common": "Belize"}, "region": "Americas"}
        ])))
        .mount(&server)
        .await;

    let atlas = atlas_for(&server);
    let countries = atlas.load_by_region("Americas").await.unwrap();
    let names: Vec<&str> = countries.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Argentina", "Belize", "Peru"]);
    assert_eq!(atlas.catalog().filter_region("americas").len(), 3);

    let found = atlas.search("er").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Peru");
}

#[test]
fn test_config_loads_from_toml_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        r#"
[countries]
translation_key = "fra"

[weather]
api_key = "from-file"

[http]
timeout_seconds = 12

[defaults]
featured = ["Chile", "Peru"]
"#
    )
    .unwrap();

    let config = AtlasConfig::load_from_path(Some(file.path().to_path_buf())).unwrap();
    assert_eq!(config.countries.translation_key, "fra");
    assert_eq!(config.weather.api_key.as_deref(), Some("from-file"));
    assert_eq!(config.http.timeout_seconds, 12);
    assert_eq!(config.defaults.featured, vec!["Chile", "Peru"]);
    assert_eq!(config.weather.units, "metric");
}

#[test]
fn test_config_rejects_invalid_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "[http]\ntimeout_seconds = 9000").unwrap();

    assert!(AtlasConfig::load_from_path(Some(file.path().to_path_buf())).is_err());
}

#[test]
fn test_gateway_is_object_safe() {
    let gateway: Arc<dyn JsonFetcher> = Arc::new(HttpGateway::new(&HttpConfig::default()).unwrap());
    let _atlas = Atlas::with_fetcher(gateway, &AtlasConfig::default());
}
