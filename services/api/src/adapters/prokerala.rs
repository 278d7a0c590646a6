//! services/api/src/adapters/prokerala.rs
//!
//! The secondary astrology data source (Prokerala), authenticated with an
//! OAuth2 client-credentials token. Implements the `ChartProvider` port from
//! the `core` crate.
//!
//! The access token is cached next to its expiry inside the adapter, behind
//! an async mutex that stays locked across a refresh: concurrent requests
//! never race to the token endpoint and never observe a half-updated
//! token/expiry pair.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use oracle_core::domain::{Aspect, BirthChart, BirthInput, Planet, PlanetPosition, ZodiacSign};
use oracle_core::ports::{ChartProvider, PortError, PortResult};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::mock::default_chart;

/// Lahiri ayanamsa, the sidereal correction this integration always requests.
const AYANAMSA: u8 = 1;

/// Tokens are refreshed once they are within this buffer of their expiry.
const EXPIRY_BUFFER_MINUTES: i64 = 5;

/// Assumed token lifetime when the token endpoint omits `expires_in`.
const DEFAULT_TOKEN_TTL_SECONDS: i64 = 3600;

//=========================================================================================
// Token Cache
//=========================================================================================

#[derive(Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at - Duration::minutes(EXPIRY_BUFFER_MINUTES)
    }
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that resolves charts against the Prokerala birth-details API.
pub struct ProkeralaAdapter {
    client: reqwest::Client,
    client_id: Option<String>,
    client_secret: Option<String>,
    base_url: String,
    token: Mutex<Option<CachedToken>>,
}

impl ProkeralaAdapter {
    /// Creates a new `ProkeralaAdapter`. Without both client credentials the
    /// adapter reports itself unavailable and the chain skips it.
    pub fn new(
        client: reqwest::Client,
        client_id: Option<String>,
        client_secret: Option<String>,
        base_url: String,
    ) -> Self {
        Self {
            client,
            client_id,
            client_secret,
            base_url,
            token: Mutex::new(None),
        }
    }

    /// Returns a valid bearer token, refreshing it when absent or inside the
    /// expiry buffer. The cache lock is held for the whole refresh round trip
    /// so only one request refreshes at a time.
    async fn bearer_token(&self, client_id: &str, client_secret: &str) -> PortResult<String> {
        let mut guard = self.token.lock().await;

        if let Some(cached) = guard.as_ref() {
            if cached.is_fresh(Utc::now()) {
                return Ok(cached.access_token.clone());
            }
        }

        debug!("requesting new Prokerala access token");
        let response = self
            .client
            .post(format!("{}/token", self.base_url))
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", client_id),
                ("client_secret", client_secret),
            ])
            .send()
            .await
            .map_err(|e| PortError::Upstream(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PortError::Upstream(format!(
                "token request returned status {}",
                response.status()
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| PortError::Malformed(e.to_string()))?;

        let access_token = body
            .get("access_token")
            .and_then(Value::as_str)
            .ok_or_else(|| PortError::Malformed("token response missing access_token".to_string()))?
            .to_string();
        let expires_in = body
            .get("expires_in")
            .and_then(Value::as_i64)
            .unwrap_or(DEFAULT_TOKEN_TTL_SECONDS);

        *guard = Some(CachedToken {
            access_token: access_token.clone(),
            expires_at: Utc::now() + Duration::seconds(expires_in),
        });

        Ok(access_token)
    }
}

//=========================================================================================
// `ChartProvider` Trait Implementation
//=========================================================================================

#[async_trait]
impl ChartProvider for ProkeralaAdapter {
    fn name(&self) -> &'static str {
        "prokerala"
    }

    async fn resolve_chart(&self, input: &BirthInput) -> PortResult<BirthChart> {
        let (client_id, client_secret) = match (&self.client_id, &self.client_secret) {
            (Some(id), Some(secret)) => (id.clone(), secret.clone()),
            _ => return Err(PortError::Unavailable),
        };

        // A refresh failure makes this provider unavailable for the current
        // request; the chain moves on without retrying.
        let token = self.bearer_token(&client_id, &client_secret).await?;

        let payload = json!({
            "datetime": format!("{}T{}:00", input.birth_date, input.birth_time),
            "coordinates": format!("{},{}", input.latitude, input.longitude),
            "ayanamsa": AYANAMSA,
        });

        let response = self
            .client
            .post(format!("{}/astrology/birth-details", self.base_url))
            .bearer_auth(&token)
            .json(&payload)
            .send()
            .await
            .map_err(|e| PortError::Upstream(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PortError::Upstream(format!(
                "birth-details request returned status {}",
                response.status()
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| PortError::Malformed(e.to_string()))?;

        Ok(parse_response(&body).unwrap_or_else(|| {
            warn!("Prokerala payload had no data object, using the built-in chart");
            default_chart()
        }))
    }
}

//=========================================================================================
// Response Mapping
//=========================================================================================

/// Maps Prokerala's nested `data.{planets,houses,aspects}` shape into the
/// canonical chart. Individual fields default leniently; only a missing
/// `data` object makes the whole parse fail.
fn parse_response(body: &Value) -> Option<BirthChart> {
    let data = body.get("data")?.as_object()?;

    let planets = parse_planets(data.get("planets"));

    let sun_sign = named_planet_sign(data.get("planets"), "Sun").unwrap_or(ZodiacSign::Leo);
    let moon_sign = named_planet_sign(data.get("planets"), "Moon").unwrap_or(ZodiacSign::Leo);
    let rising_sign = data
        .get("ascendant")
        .and_then(|a| a.get("sign"))
        .and_then(|s| s.get("name"))
        .and_then(Value::as_str)
        .and_then(ZodiacSign::from_name)
        .unwrap_or(ZodiacSign::Cancer);

    Some(BirthChart {
        sun_sign,
        moon_sign,
        rising_sign,
        planets,
        houses: parse_houses(data.get("houses")),
        aspects: parse_aspects(data.get("aspects")),
    })
}

fn named_planet_sign(planets: Option<&Value>, name: &str) -> Option<ZodiacSign> {
    planets?
        .as_array()?
        .iter()
        .find(|p| {
            p.get("name")
                .and_then(Value::as_str)
                .is_some_and(|n| n.eq_ignore_ascii_case(name))
        })
        .and_then(sign_name_field)
}

fn sign_name_field(entry: &Value) -> Option<ZodiacSign> {
    entry
        .get("sign")
        .and_then(|s| s.get("name"))
        .and_then(Value::as_str)
        .and_then(ZodiacSign::from_name)
}

fn parse_planets(value: Option<&Value>) -> Vec<PlanetPosition> {
    let entries = match value.and_then(Value::as_array) {
        Some(entries) => entries,
        None => return Vec::new(),
    };

    entries
        .iter()
        .filter_map(|entry| {
            let planet = Planet::from_name(entry.get("name")?.as_str()?)?;
            // The provider reports absolute ecliptic longitude; reduce it to
            // the degree within the sign.
            let degree = entry
                .get("longitude")
                .and_then(Value::as_f64)
                .unwrap_or(0.0)
                .rem_euclid(30.0);
            Some(PlanetPosition {
                planet,
                sign: sign_name_field(entry).unwrap_or(ZodiacSign::Aries),
                degree,
                house: entry
                    .get("house")
                    .and_then(Value::as_i64)
                    .filter(|h| (1..=12).contains(h))
                    .map(|h| h as u8)
                    .unwrap_or(1),
                retrograde: entry
                    .get("is_retrograde")
                    .and_then(Value::as_bool)
                    .unwrap_or(false),
            })
        })
        .collect()
}

/// Prokerala lists house cusps in order; the first twelve map to houses 1–12
/// and gaps rule Aries.
fn parse_houses(value: Option<&Value>) -> BTreeMap<u8, ZodiacSign> {
    let entries = value.and_then(Value::as_array);
    (1..=12u8)
        .map(|house| {
            let sign = entries
                .and_then(|list| list.get(house as usize - 1))
                .and_then(sign_name_field)
                .unwrap_or(ZodiacSign::Aries);
            (house, sign)
        })
        .collect()
}

fn parse_aspects(value: Option<&Value>) -> Vec<Aspect> {
    let entries = match value.and_then(Value::as_array) {
        Some(entries) => entries,
        None => return Vec::new(),
    };

    entries
        .iter()
        .map(|entry| Aspect {
            planet1: nested_name(entry, "planet1"),
            planet2: nested_name(entry, "planet2"),
            aspect: entry
                .get("aspect_name")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            orb: entry.get("orb").and_then(Value::as_f64).unwrap_or(0.0),
        })
        .collect()
}

fn nested_name(entry: &Value, field: &str) -> String {
    entry
        .get(field)
        .and_then(|p| p.get("name"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
