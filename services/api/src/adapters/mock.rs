//! services/api/src/adapters/mock.rs
//!
//! The deterministic fallback chart source. It terminates the provider chain:
//! no network, no credentials, never fails, so chart acquisition as a whole
//! cannot fail.

use async_trait::async_trait;
use oracle_core::domain::{Aspect, BirthChart, BirthInput, Planet, PlanetPosition, ZodiacSign};
use oracle_core::ports::{ChartProvider, PortResult};

/// The canonical built-in chart template, identical across all requests.
///
/// Also used by the secondary provider when its payload cannot be parsed, so
/// there is exactly one fallback template in the system.
pub fn default_chart() -> BirthChart {
    let planets = vec![
        position(Planet::Sun, ZodiacSign::Leo, 15.5, 7),
        position(Planet::Moon, ZodiacSign::Scorpio, 22.3, 10),
        position(Planet::Mercury, ZodiacSign::Virgo, 8.7, 8),
        position(Planet::Venus, ZodiacSign::Cancer, 28.1, 6),
        position(Planet::Mars, ZodiacSign::Gemini, 12.9, 5),
        position(Planet::Jupiter, ZodiacSign::Sagittarius, 5.4, 11),
        position(Planet::Saturn, ZodiacSign::Capricorn, 18.2, 12),
        position(Planet::Uranus, ZodiacSign::Aquarius, 3.8, 1),
        position(Planet::Neptune, ZodiacSign::Pisces, 25.6, 2),
        position(Planet::Pluto, ZodiacSign::Scorpio, 17.9, 10),
    ];

    let houses = [
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
    ]
    .iter()
    .enumerate()
    .map(|(i, &sign)| (i as u8 + 1, sign))
    .collect();

    BirthChart {
        sun_sign: ZodiacSign::Leo,
        moon_sign: ZodiacSign::Scorpio,
        rising_sign: ZodiacSign::Cancer,
        planets,
        houses,
        aspects: vec![
            Aspect {
                planet1: "Sun".to_string(),
                planet2: "Moon".to_string(),
                aspect: "Square".to_string(),
                orb: 3.2,
            },
            Aspect {
                planet1: "Venus".to_string(),
                planet2: "Mars".to_string(),
                aspect: "Trine".to_string(),
                orb: 1.8,
            },
        ],
    }
}

fn position(planet: Planet, sign: ZodiacSign, degree: f64, house: u8) -> PlanetPosition {
    PlanetPosition {
        planet,
        sign,
        degree,
        house,
        retrograde: false,
    }
}

/// An adapter serving [`default_chart`] as the chain's last resort.
#[derive(Debug, Default, Clone)]
pub struct MockChartAdapter;

#[async_trait]
impl ChartProvider for MockChartAdapter {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn resolve_chart(&self, _input: &BirthInput) -> PortResult<BirthChart> {
        Ok(default_chart())
    }
}
