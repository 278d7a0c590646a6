//! services/api/src/adapters/astro_api.rs
//!
//! The primary astrology data source: a bearer-authenticated horoscope API.
//! Implements the `ChartProvider` port from the `core` crate.
//!
//! Parsing is deliberately lenient: the provider's payload is read field by
//! field with named defaults, so a sparse response still yields a chart and
//! only a non-JSON body counts as a provider failure.

use async_trait::async_trait;
use oracle_core::domain::{Aspect, BirthChart, BirthInput, Planet, PlanetPosition, ZodiacSign};
use oracle_core::ports::{ChartProvider, PortError, PortResult};
use serde_json::{json, Value};
use std::collections::BTreeMap;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that resolves charts against the primary horoscope API.
#[derive(Clone)]
pub struct AstroApiAdapter {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl AstroApiAdapter {
    /// Creates a new `AstroApiAdapter`. Without an API key the adapter
    /// reports itself unavailable and the chain skips it.
    pub fn new(client: reqwest::Client, api_key: Option<String>, base_url: String) -> Self {
        Self {
            client,
            api_key,
            base_url,
        }
    }
}

//=========================================================================================
// `ChartProvider` Trait Implementation
//=========================================================================================

#[async_trait]
impl ChartProvider for AstroApiAdapter {
    fn name(&self) -> &'static str {
        "astro_api"
    }

    async fn resolve_chart(&self, input: &BirthInput) -> PortResult<BirthChart> {
        let api_key = self.api_key.as_ref().ok_or(PortError::Unavailable)?;

        let response = self
            .client
            .post(format!("{}/horoscope", self.base_url))
            .bearer_auth(api_key)
            .json(&request_payload(input))
            .send()
            .await
            .map_err(|e| PortError::Upstream(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PortError::Upstream(format!(
                "horoscope request returned status {}",
                response.status()
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| PortError::Malformed(e.to_string()))?;

        Ok(parse_chart(&body))
    }
}

//=========================================================================================
// Request/Response Mapping
//=========================================================================================

/// Splits the date/time strings into the numeric fields the provider expects.
/// Unparsable components become 0; the provider's own validation decides what
/// to do with them.
fn request_payload(input: &BirthInput) -> Value {
    let mut date = input.birth_date.split('-');
    let year = int_part(date.next());
    let month = int_part(date.next());
    let day = int_part(date.next());

    let mut time = input.birth_time.split(':');
    let hour = int_part(time.next());
    let min = int_part(time.next());

    json!({
        "day": day,
        "month": month,
        "year": year,
        "hour": hour,
        "min": min,
        "lat": input.latitude,
        "lon": input.longitude,
        "tzone": input.timezone,
    })
}

fn int_part(part: Option<&str>) -> i64 {
    part.and_then(|p| p.trim().parse().ok()).unwrap_or(0)
}

/// Maps the provider's JSON into the canonical chart shape with per-field
/// defaults. Sun and moon fall back to the planets list, then to Leo; the
/// rising sign falls back to Cancer.
fn parse_chart(body: &Value) -> BirthChart {
    let planets = parse_planets(body.get("planets"));

    let sun_sign = top_level_sign(body, "sun_sign")
        .or_else(|| listed_sign(&planets, Planet::Sun))
        .unwrap_or(ZodiacSign::Leo);
    let moon_sign = top_level_sign(body, "moon_sign")
        .or_else(|| listed_sign(&planets, Planet::Moon))
        .unwrap_or(ZodiacSign::Leo);
    let rising_sign = top_level_sign(body, "rising_sign").unwrap_or(ZodiacSign::Cancer);

    BirthChart {
        sun_sign,
        moon_sign,
        rising_sign,
        planets,
        houses: parse_houses(body.get("houses")),
        aspects: parse_aspects(body.get("aspects")),
    }
}

fn top_level_sign(body: &Value, field: &str) -> Option<ZodiacSign> {
    body.get(field)
        .and_then(Value::as_str)
        .and_then(ZodiacSign::from_name)
}

fn listed_sign(planets: &[PlanetPosition], planet: Planet) -> Option<ZodiacSign> {
    planets.iter().find(|p| p.planet == planet).map(|p| p.sign)
}

fn parse_planets(value: Option<&Value>) -> Vec<PlanetPosition> {
    let entries = match value.and_then(Value::as_array) {
        Some(entries) => entries,
        None => return Vec::new(),
    };

    entries
        .iter()
        .filter_map(|entry| {
            // Bodies outside the fixed ten-planet set are dropped.
            let planet = Planet::from_name(entry.get("name")?.as_str()?)?;
            Some(PlanetPosition {
                planet,
                sign: entry
                    .get("sign")
                    .and_then(Value::as_str)
                    .and_then(ZodiacSign::from_name)
                    .unwrap_or(ZodiacSign::Aries),
                degree: entry.get("degree").and_then(Value::as_f64).unwrap_or(0.0),
                house: house_number(entry.get("house")),
                retrograde: entry
                    .get("retrograde")
                    .and_then(Value::as_bool)
                    .unwrap_or(false),
            })
        })
        .collect()
}

/// All twelve house entries are always present in the canonical shape;
/// anything the provider omitted rules Aries.
fn parse_houses(value: Option<&Value>) -> BTreeMap<u8, ZodiacSign> {
    let map = value.and_then(Value::as_object);
    (1..=12u8)
        .map(|house| {
            let sign = map
                .and_then(|m| m.get(&house.to_string()))
                .and_then(Value::as_str)
                .and_then(ZodiacSign::from_name)
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
            planet1: str_field(entry, "planet1"),
            planet2: str_field(entry, "planet2"),
            aspect: str_field(entry, "aspect"),
            orb: entry.get("orb").and_then(Value::as_f64).unwrap_or(0.0),
        })
        .collect()
}

fn str_field(entry: &Value, field: &str) -> String {
    entry
        .get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn house_number(value: Option<&Value>) -> u8 {
    value
        .and_then(Value::as_i64)
        .filter(|h| (1..=12).contains(h))
        .map(|h| h as u8)
        .unwrap_or(1)
}
