//! crates/oracle_core/src/assessment.rs
//!
//! The assessment aggregator: runs all nine engine generators against one
//! chart and composes the result bundle, plus the single-framework
//! projection used by the per-framework endpoint.

use crate::domain::{
    AssessmentBundle, AttachmentResult, BehavioralStyleResult, BirthChart, BirthInput,
    CareerFitResult, EmotionalIntelligenceResult, EnneagramResult, FiveFactorResult,
    FrameworkKind, LoveLanguageResult, StrengthsResult, TypeIndicatorResult,
};
use crate::engine;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Confidence attached to rule-based bundles.
pub const RULE_BASED_CONFIDENCE: f64 = 0.85;
/// Confidence attached to bundles produced by the text-model path.
pub const LLM_CONFIDENCE: f64 = 0.95;

/// Opaque per-request user identifier derived from the display name.
/// Two users sharing a display name collide; that is accepted, nothing is
/// persisted under the id.
pub fn user_slug(name: &str) -> String {
    format!("user_{}", name.trim().to_lowercase().replace(' ', "_"))
}

/// Runs every generator against the same chart and assembles the bundle.
///
/// Deterministic: for a fixed `created_at`, the same input and chart always
/// produce an identical bundle.
pub fn generate_bundle(
    input: &BirthInput,
    chart: &BirthChart,
    created_at: DateTime<Utc>,
) -> AssessmentBundle {
    AssessmentBundle {
        user_id: user_slug(&input.name),
        birth_data: input.clone(),
        type_indicator: Some(engine::type_indicator(chart)),
        five_factor: Some(engine::five_factor(chart)),
        enneagram: Some(engine::enneagram(chart)),
        behavioral_style: Some(engine::behavioral_style(chart)),
        strengths: Some(engine::strengths(chart)),
        love_language: Some(engine::love_language(chart)),
        attachment_style: Some(engine::attachment_style(chart)),
        emotional_intelligence: Some(engine::emotional_intelligence(chart)),
        career_fit: Some(engine::career_fit(chart)),
        created_at,
        confidence_score: RULE_BASED_CONFIDENCE,
    }
}

//=========================================================================================
// Single-Framework Projection
//=========================================================================================

/// One framework's result, lifted out of a full bundle.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum FrameworkResult {
    TypeIndicator(TypeIndicatorResult),
    FiveFactor(FiveFactorResult),
    Enneagram(EnneagramResult),
    BehavioralStyle(BehavioralStyleResult),
    Strengths(StrengthsResult),
    LoveLanguage(LoveLanguageResult),
    AttachmentStyle(AttachmentResult),
    EmotionalIntelligence(EmotionalIntelligenceResult),
    CareerFit(CareerFitResult),
}

impl AssessmentBundle {
    /// Projects a single framework out of the bundle. All nine are always
    /// computed first; the generators are cheap and pure, so no per-framework
    /// short-circuit exists.
    pub fn framework(&self, kind: FrameworkKind) -> Option<FrameworkResult> {
        match kind {
            FrameworkKind::TypeIndicator => self
                .type_indicator
                .clone()
                .map(FrameworkResult::TypeIndicator),
            FrameworkKind::FiveFactor => self.five_factor.clone().map(FrameworkResult::FiveFactor),
            FrameworkKind::Enneagram => self.enneagram.clone().map(FrameworkResult::Enneagram),
            FrameworkKind::BehavioralStyle => self
                .behavioral_style
                .clone()
                .map(FrameworkResult::BehavioralStyle),
            FrameworkKind::Strengths => self.strengths.clone().map(FrameworkResult::Strengths),
            FrameworkKind::LoveLanguage => self
                .love_language
                .clone()
                .map(FrameworkResult::LoveLanguage),
            FrameworkKind::AttachmentStyle => self
                .attachment_style
                .clone()
                .map(FrameworkResult::AttachmentStyle),
            FrameworkKind::EmotionalIntelligence => self
                .emotional_intelligence
                .clone()
                .map(FrameworkResult::EmotionalIntelligence),
            FrameworkKind::CareerFit => self.career_fit.clone().map(FrameworkResult::CareerFit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Planet, PlanetPosition, ZodiacSign};
    use chrono::TimeZone;

    fn sample_input() -> BirthInput {
        BirthInput {
            name: "Ada Lovelace".to_string(),
            birth_date: "1815-12-10".to_string(),
            birth_time: "13:30".to_string(),
            birth_place: "London, UK".to_string(),
            latitude: 51.5074,
            longitude: -0.1278,
            timezone: "Europe/London".to_string(),
        }
    }

    fn sample_chart() -> BirthChart {
        BirthChart {
            sun_sign: ZodiacSign::Sagittarius,
            moon_sign: ZodiacSign::Cancer,
            rising_sign: ZodiacSign::Virgo,
            planets: Planet::ALL
                .iter()
                .map(|&planet| PlanetPosition {
                    planet,
                    sign: ZodiacSign::Sagittarius,
                    degree: 18.2,
                    house: 4,
                    retrograde: false,
                })
                .collect(),
            houses: (1..=12).map(|h| (h, ZodiacSign::Virgo)).collect(),
            aspects: vec![],
        }
    }

    #[test]
    fn user_slug_lowercases_and_underscores() {
        assert_eq!(user_slug("Ada Lovelace"), "user_ada_lovelace");
        assert_eq!(user_slug("  Grace Brewster Hopper "), "user_grace_brewster_hopper");
    }

    #[test]
    fn bundle_is_deterministic() {
        let input = sample_input();
        let chart = sample_chart();
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();

        let a = generate_bundle(&input, &chart, at);
        let b = generate_bundle(&input, &chart, at);

        let a_json = serde_json::to_vec(&a).unwrap();
        let b_json = serde_json::to_vec(&b).unwrap();
        assert_eq!(a_json, b_json);
    }

    #[test]
    fn bundle_fills_all_nine_frameworks() {
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let bundle = generate_bundle(&sample_input(), &sample_chart(), at);

        for kind in FrameworkKind::ALL {
            assert!(bundle.framework(kind).is_some(), "missing {kind}");
        }
        assert_eq!(bundle.confidence_score, RULE_BASED_CONFIDENCE);
        assert_eq!(bundle.user_id, "user_ada_lovelace");
    }

    #[test]
    fn projection_matches_the_bundle_field() {
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let bundle = generate_bundle(&sample_input(), &sample_chart(), at);

        let projected = bundle.framework(FrameworkKind::Enneagram).unwrap();
        let projected_json = serde_json::to_value(&projected).unwrap();
        let field_json = serde_json::to_value(bundle.enneagram.as_ref().unwrap()).unwrap();
        assert_eq!(projected_json, field_json);
    }
}
