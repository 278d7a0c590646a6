//! Integration tests for the chart provider chain: fallback order, the mock
//! tail, and the OAuth2 token cache of the secondary provider.

use anyhow::Result;
use api_lib::adapters::{AstroApiAdapter, MockChartAdapter, ProkeralaAdapter, ProviderChain};
use httpmock::prelude::*;
use oracle_core::domain::{BirthInput, ZodiacSign};
use oracle_core::ports::ChartProvider;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn birth_input() -> BirthInput {
    BirthInput {
        name: "Test Subject".to_string(),
        birth_date: "1990-04-15".to_string(),
        birth_time: "08:30".to_string(),
        birth_place: "Berlin".to_string(),
        latitude: 52.52,
        longitude: 13.405,
        timezone: "Europe/Berlin".to_string(),
    }
}

fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .expect("client builds")
}

fn prokerala_chart_body() -> serde_json::Value {
    json!({
        "data": {
            "ascendant": {"sign": {"name": "Capricorn"}},
            "planets": [
                {"name": "Sun", "sign": {"name": "Taurus"}, "longitude": 42.0, "house": 5, "is_retrograde": false},
                {"name": "Moon", "sign": {"name": "Virgo"}, "longitude": 160.5, "house": 9, "is_retrograde": false},
            ],
            "houses": [],
            "aspects": []
        }
    })
}

#[tokio::test]
async fn failing_primary_falls_through_to_secondary() -> Result<()> {
    let primary = MockServer::start_async().await;
    let secondary = MockServer::start_async().await;

    let horoscope = primary
        .mock_async(|when, then| {
            when.method(POST).path("/horoscope");
            then.status(502);
        })
        .await;

    let token = secondary
        .mock_async(|when, then| {
            when.method(POST).path("/token");
            then.status(200)
                .json_body(json!({"access_token": "tok-1", "expires_in": 3600}));
        })
        .await;
    let details = secondary
        .mock_async(|when, then| {
            when.method(POST)
                .path("/astrology/birth-details")
                .header("authorization", "Bearer tok-1");
            then.status(200).json_body(prokerala_chart_body());
        })
        .await;

    let chain = ProviderChain::new(vec![
        Arc::new(AstroApiAdapter::new(
            http_client(),
            Some("test-key".to_string()),
            primary.base_url(),
        )) as Arc<dyn ChartProvider>,
        Arc::new(ProkeralaAdapter::new(
            http_client(),
            Some("client-id".to_string()),
            Some("client-secret".to_string()),
            secondary.base_url(),
        )),
        Arc::new(MockChartAdapter),
    ]);

    let resolution = chain.resolve(&birth_input()).await;

    assert_eq!(resolution.source, "prokerala");
    assert_eq!(resolution.chart.sun_sign, ZodiacSign::Taurus);
    assert_eq!(resolution.chart.moon_sign, ZodiacSign::Virgo);
    assert_eq!(resolution.chart.rising_sign, ZodiacSign::Capricorn);
    assert_eq!(horoscope.hits_async().await, 1);
    assert_eq!(token.hits_async().await, 1);
    assert_eq!(details.hits_async().await, 1);
    Ok(())
}

#[tokio::test]
async fn healthy_primary_short_circuits_the_chain() -> Result<()> {
    let primary = MockServer::start_async().await;
    let secondary = MockServer::start_async().await;

    let horoscope = primary
        .mock_async(|when, then| {
            when.method(POST)
                .path("/horoscope")
                .header("authorization", "Bearer test-key");
            then.status(200).json_body(json!({
                "sun_sign": "Gemini",
                "moon_sign": "Libra",
                "rising_sign": "Aries",
                "planets": [],
                "houses": {},
                "aspects": []
            }));
        })
        .await;
    let token = secondary
        .mock_async(|when, then| {
            when.method(POST).path("/token");
            then.status(200)
                .json_body(json!({"access_token": "tok-1", "expires_in": 3600}));
        })
        .await;

    let chain = ProviderChain::new(vec![
        Arc::new(AstroApiAdapter::new(
            http_client(),
            Some("test-key".to_string()),
            primary.base_url(),
        )) as Arc<dyn ChartProvider>,
        Arc::new(ProkeralaAdapter::new(
            http_client(),
            Some("client-id".to_string()),
            Some("client-secret".to_string()),
            secondary.base_url(),
        )),
        Arc::new(MockChartAdapter),
    ]);

    let resolution = chain.resolve(&birth_input()).await;

    assert_eq!(resolution.source, "astro_api");
    assert_eq!(resolution.chart.sun_sign, ZodiacSign::Gemini);
    assert_eq!(horoscope.hits_async().await, 1);
    // The secondary is never consulted when the primary succeeds.
    assert_eq!(token.hits_async().await, 0);
    Ok(())
}

#[tokio::test]
async fn unconfigured_providers_yield_the_builtin_template() -> Result<()> {
    let chain = ProviderChain::new(vec![
        Arc::new(AstroApiAdapter::new(
            http_client(),
            None,
            "http://localhost:1".to_string(),
        )) as Arc<dyn ChartProvider>,
        Arc::new(ProkeralaAdapter::new(
            http_client(),
            None,
            None,
            "http://localhost:1".to_string(),
        )),
        Arc::new(MockChartAdapter),
    ]);

    let resolution = chain.resolve(&birth_input()).await;

    assert_eq!(resolution.source, "mock");
    assert_eq!(resolution.chart.sun_sign, ZodiacSign::Leo);
    assert_eq!(resolution.chart.moon_sign, ZodiacSign::Scorpio);
    assert_eq!(resolution.chart.rising_sign, ZodiacSign::Cancer);
    assert_eq!(resolution.chart.planets.len(), 10);
    assert_eq!(resolution.chart.houses.len(), 12);
    Ok(())
}

#[tokio::test]
async fn token_refresh_failure_disables_the_secondary() -> Result<()> {
    let secondary = MockServer::start_async().await;

    let token = secondary
        .mock_async(|when, then| {
            when.method(POST).path("/token");
            then.status(401);
        })
        .await;
    let details = secondary
        .mock_async(|when, then| {
            when.method(POST).path("/astrology/birth-details");
            then.status(200).json_body(prokerala_chart_body());
        })
        .await;

    let chain = ProviderChain::new(vec![
        Arc::new(ProkeralaAdapter::new(
            http_client(),
            Some("client-id".to_string()),
            Some("client-secret".to_string()),
            secondary.base_url(),
        )) as Arc<dyn ChartProvider>,
        Arc::new(MockChartAdapter),
    ]);

    let resolution = chain.resolve(&birth_input()).await;

    assert_eq!(resolution.source, "mock");
    // Exactly one attempt, no retries, and the chart call never happens.
    assert_eq!(token.hits_async().await, 1);
    assert_eq!(details.hits_async().await, 0);
    Ok(())
}

#[tokio::test]
async fn token_is_cached_within_its_validity_window() -> Result<()> {
    let secondary = MockServer::start_async().await;

    let token = secondary
        .mock_async(|when, then| {
            when.method(POST).path("/token");
            then.status(200)
                .json_body(json!({"access_token": "tok-1", "expires_in": 3600}));
        })
        .await;
    let details = secondary
        .mock_async(|when, then| {
            when.method(POST).path("/astrology/birth-details");
            then.status(200).json_body(prokerala_chart_body());
        })
        .await;

    let adapter = ProkeralaAdapter::new(
        http_client(),
        Some("client-id".to_string()),
        Some("client-secret".to_string()),
        secondary.base_url(),
    );

    adapter.resolve_chart(&birth_input()).await?;
    adapter.resolve_chart(&birth_input()).await?;

    // Two chart calls, one token request: the second call reused the cache.
    assert_eq!(token.hits_async().await, 1);
    assert_eq!(details.hits_async().await, 2);
    Ok(())
}

#[tokio::test]
async fn near_expiry_token_is_refreshed() -> Result<()> {
    let secondary = MockServer::start_async().await;

    // A 60-second TTL is already inside the five-minute refresh buffer, so
    // every call must fetch a fresh token.
    let token = secondary
        .mock_async(|when, then| {
            when.method(POST).path("/token");
            then.status(200)
                .json_body(json!({"access_token": "tok-1", "expires_in": 60}));
        })
        .await;
    let details = secondary
        .mock_async(|when, then| {
            when.method(POST).path("/astrology/birth-details");
            then.status(200).json_body(prokerala_chart_body());
        })
        .await;

    let adapter = ProkeralaAdapter::new(
        http_client(),
        Some("client-id".to_string()),
        Some("client-secret".to_string()),
        secondary.base_url(),
    );

    adapter.resolve_chart(&birth_input()).await?;
    adapter.resolve_chart(&birth_input()).await?;

    assert_eq!(token.hits_async().await, 2);
    assert_eq!(details.hits_async().await, 2);
    Ok(())
}

#[tokio::test]
async fn unparsable_secondary_payload_degrades_to_the_template() -> Result<()> {
    let secondary = MockServer::start_async().await;

    secondary
        .mock_async(|when, then| {
            when.method(POST).path("/token");
            then.status(200)
                .json_body(json!({"access_token": "tok-1", "expires_in": 3600}));
        })
        .await;
    // Valid JSON, but no `data` object to map.
    secondary
        .mock_async(|when, then| {
            when.method(POST).path("/astrology/birth-details");
            then.status(200).json_body(json!({"status": "ok"}));
        })
        .await;

    let adapter = ProkeralaAdapter::new(
        http_client(),
        Some("client-id".to_string()),
        Some("client-secret".to_string()),
        secondary.base_url(),
    );

    let chart = adapter.resolve_chart(&birth_input()).await?;

    // The provider still answers, with the canonical built-in template.
    assert_eq!(chart.sun_sign, ZodiacSign::Leo);
    assert_eq!(chart.moon_sign, ZodiacSign::Scorpio);
    assert_eq!(chart.rising_sign, ZodiacSign::Cancer);
    Ok(())
}

#[tokio::test]
async fn error_variants_distinguish_skip_from_failure() -> Result<()> {
    use oracle_core::ports::PortError;

    let unconfigured = AstroApiAdapter::new(http_client(), None, "http://localhost:1".to_string());
    match unconfigured.resolve_chart(&birth_input()).await {
        Err(PortError::Unavailable) => {}
        other => panic!("expected Unavailable, got {other:?}"),
    }

    let primary = MockServer::start_async().await;
    primary
        .mock_async(|when, then| {
            when.method(POST).path("/horoscope");
            then.status(503);
        })
        .await;
    let failing = AstroApiAdapter::new(
        http_client(),
        Some("test-key".to_string()),
        primary.base_url(),
    );
    match failing.resolve_chart(&birth_input()).await {
        Err(PortError::Upstream(_)) => {}
        other => panic!("expected Upstream, got {other:?}"),
    }
    Ok(())
}
