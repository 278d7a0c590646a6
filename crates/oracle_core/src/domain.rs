//! crates/oracle_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any provider payload or web framework;
//! they are the single chart/assessment vocabulary shared by every layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

//=========================================================================================
// Birth Input
//=========================================================================================

/// The raw birth data supplied by the caller.
///
/// Only presence is validated (at deserialization); latitude/longitude and the
/// date/time strings are passed through to providers as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BirthInput {
    pub name: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub birth_date: String,
    /// Local time, `HH:MM`.
    pub birth_time: String,
    pub birth_place: String,
    pub latitude: f64,
    pub longitude: f64,
    /// IANA timezone identifier, e.g. `America/New_York`.
    pub timezone: String,
}

//=========================================================================================
// Zodiac Signs and Planets
//=========================================================================================

/// The twelve zodiac signs. A closed enum: every lookup in the engine is an
/// exhaustive `match`, so a sign without a table entry cannot compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        }
    }

    /// Case-insensitive lookup by display name. Returns `None` for anything
    /// outside the canonical twelve; callers at the parse edge decide the
    /// default to substitute.
    pub fn from_name(name: &str) -> Option<ZodiacSign> {
        ZodiacSign::ALL
            .iter()
            .copied()
            .find(|s| s.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The fixed ten-body set tracked in a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Planet {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl Planet {
    pub const ALL: [Planet; 10] = [
        Planet::Sun,
        Planet::Moon,
        Planet::Mercury,
        Planet::Venus,
        Planet::Mars,
        Planet::Jupiter,
        Planet::Saturn,
        Planet::Uranus,
        Planet::Neptune,
        Planet::Pluto,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Planet::Sun => "Sun",
            Planet::Moon => "Moon",
            Planet::Mercury => "Mercury",
            Planet::Venus => "Venus",
            Planet::Mars => "Mars",
            Planet::Jupiter => "Jupiter",
            Planet::Saturn => "Saturn",
            Planet::Uranus => "Uranus",
            Planet::Neptune => "Neptune",
            Planet::Pluto => "Pluto",
        }
    }

    pub fn from_name(name: &str) -> Option<Planet> {
        Planet::ALL
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for Planet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

//=========================================================================================
// Birth Chart
//=========================================================================================

/// One body's placement in the chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanetPosition {
    pub planet: Planet,
    pub sign: ZodiacSign,
    /// Degree within the sign, 0.0–30.0.
    pub degree: f64,
    /// House number, 1–12.
    pub house: u8,
    #[serde(default)]
    pub retrograde: bool,
}

/// An angular relationship between two bodies. Providers emit free-form names
/// here and the engine never branches on them, so both sides stay strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Aspect {
    pub planet1: String,
    pub planet2: String,
    /// Conjunction, Trine, Square, Opposition, Sextile, or whatever the
    /// provider called it.
    pub aspect: String,
    /// Deviation from the exact aspect angle, in degrees.
    pub orb: f64,
}

/// A complete natal chart: the engine's only input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BirthChart {
    pub sun_sign: ZodiacSign,
    pub moon_sign: ZodiacSign,
    pub rising_sign: ZodiacSign,
    pub planets: Vec<PlanetPosition>,
    /// House number (1–12) to ruling sign.
    pub houses: BTreeMap<u8, ZodiacSign>,
    pub aspects: Vec<Aspect>,
}

impl BirthChart {
    /// The sign a given body occupies, if the chart carries that body.
    pub fn planet_sign(&self, planet: Planet) -> Option<ZodiacSign> {
        self.planets
            .iter()
            .find(|p| p.planet == planet)
            .map(|p| p.sign)
    }
}

//=========================================================================================
// Per-Framework Assessment Results
//=========================================================================================

/// Four-letter type indicator (e.g. "ESTJ").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeIndicatorResult {
    #[serde(rename = "type")]
    pub type_code: String,
    pub description: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub careers: Vec<String>,
}

/// Five-factor scores, each 1–100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiveFactorResult {
    pub openness: u8,
    pub conscientiousness: u8,
    pub extraversion: u8,
    pub agreeableness: u8,
    pub neuroticism: u8,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnneagramResult {
    /// Core type, 1–9.
    #[serde(rename = "type")]
    pub type_number: u8,
    pub wing: u8,
    pub description: String,
    pub core_motivation: String,
    pub basic_fear: String,
    pub strengths: Vec<String>,
}

/// Four-axis behavioral style; the percentages always sum to exactly 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehavioralStyleResult {
    pub dominance: u8,
    pub influence: u8,
    pub steadiness: u8,
    pub conscientiousness: u8,
    pub primary_style: String,
    pub description: String,
}

/// Top five of the 34 strength themes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrengthsResult {
    pub top_strengths: Vec<String>,
    pub descriptions: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoveLanguageResult {
    pub primary: String,
    pub secondary: String,
    /// All five languages with scores.
    pub scores: BTreeMap<String, u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachmentResult {
    /// Secure, Anxious, Avoidant, or Disorganized.
    pub style: String,
    pub percentage: u8,
    pub description: String,
    pub characteristics: Vec<String>,
}

/// Overall and component scores, each clamped to 30–95.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionalIntelligenceResult {
    pub overall_eq: u8,
    pub self_awareness: u8,
    pub self_regulation: u8,
    pub motivation: u8,
    pub empathy: u8,
    pub social_skills: u8,
    pub description: String,
}

/// Three-letter Holland code (e.g. "ECA").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerFitResult {
    pub holland_code: String,
    pub primary_type: String,
    pub career_matches: Vec<String>,
    pub work_environments: Vec<String>,
}

//=========================================================================================
// Framework Keys and the Assessment Bundle
//=========================================================================================

/// Stable wire keys for the nine assessment frameworks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameworkKind {
    TypeIndicator,
    FiveFactor,
    Enneagram,
    BehavioralStyle,
    Strengths,
    LoveLanguage,
    AttachmentStyle,
    EmotionalIntelligence,
    CareerFit,
}

impl FrameworkKind {
    pub const ALL: [FrameworkKind; 9] = [
        FrameworkKind::TypeIndicator,
        FrameworkKind::FiveFactor,
        FrameworkKind::Enneagram,
        FrameworkKind::BehavioralStyle,
        FrameworkKind::Strengths,
        FrameworkKind::LoveLanguage,
        FrameworkKind::AttachmentStyle,
        FrameworkKind::EmotionalIntelligence,
        FrameworkKind::CareerFit,
    ];

    pub fn key(self) -> &'static str {
        match self {
            FrameworkKind::TypeIndicator => "type_indicator",
            FrameworkKind::FiveFactor => "five_factor",
            FrameworkKind::Enneagram => "enneagram",
            FrameworkKind::BehavioralStyle => "behavioral_style",
            FrameworkKind::Strengths => "strengths",
            FrameworkKind::LoveLanguage => "love_language",
            FrameworkKind::AttachmentStyle => "attachment_style",
            FrameworkKind::EmotionalIntelligence => "emotional_intelligence",
            FrameworkKind::CareerFit => "career_fit",
        }
    }
}

impl fmt::Display for FrameworkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The full nine-framework assessment for one request.
///
/// Constructed fresh per request and never mutated afterwards; the per-
/// framework fields are optional only to survive partial generation failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentBundle {
    pub user_id: String,
    pub birth_data: BirthInput,
    pub type_indicator: Option<TypeIndicatorResult>,
    pub five_factor: Option<FiveFactorResult>,
    pub enneagram: Option<EnneagramResult>,
    pub behavioral_style: Option<BehavioralStyleResult>,
    pub strengths: Option<StrengthsResult>,
    pub love_language: Option<LoveLanguageResult>,
    pub attachment_style: Option<AttachmentResult>,
    pub emotional_intelligence: Option<EmotionalIntelligenceResult>,
    pub career_fit: Option<CareerFitResult>,
    pub created_at: DateTime<Utc>,
    /// Confidence in [0, 1]; fixed per generation path.
    pub confidence_score: f64,
}
