//! services/api/src/adapters/llm.rs
//!
//! The optional text-model assessment path. It consumes the same chart shape
//! as the rule-based engine and produces the same nine-record bundle, but the
//! mapping lives in prompt text interpreted by an OpenAI-compatible model:
//! format the chart as text, send one request per framework, parse strict
//! JSON back. Implements the `AssessmentGenerator` port from the `core` crate.

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use chrono::Utc;
use oracle_core::assessment::{user_slug, LLM_CONFIDENCE};
use oracle_core::domain::{AssessmentBundle, BirthChart, BirthInput, FrameworkKind};
use oracle_core::ports::{AssessmentGenerator, PortError, PortResult};
use serde::de::DeserializeOwned;

const SYSTEM_INSTRUCTIONS: &str = "You are an expert in psychological astrology and modern \
personality psychology. Analyze the provided birth chart thoughtfully. Respond ONLY with valid \
JSON in the exact format requested, with no surrounding prose or markdown.";

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `AssessmentGenerator` using an OpenAI-compatible LLM.
#[derive(Clone)]
pub struct OpenAiAssessmentAdapter {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiAssessmentAdapter {
    /// Creates a new `OpenAiAssessmentAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String) -> Self {
        Self { client, model }
    }

    /// One chat completion returning a JSON document parsed into `T`. A parse
    /// mismatch is an error: the caller aborts the whole alternate path
    /// rather than returning a partial bundle.
    async fn complete_json<T: DeserializeOwned>(&self, prompt: String) -> PortResult<T> {
        let messages = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(SYSTEM_INSTRUCTIONS)
                .build()
                .map_err(|e| PortError::Upstream(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()
                .map_err(|e| PortError::Upstream(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(0.8)
            .max_tokens(2000u32)
            .build()
            .map_err(|e| PortError::Upstream(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e: OpenAIError| PortError::Upstream(e.to_string()))?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                PortError::Malformed("model response contained no text content".to_string())
            })?;

        serde_json::from_str(content.trim()).map_err(|e| PortError::Malformed(e.to_string()))
    }
}

//=========================================================================================
// `AssessmentGenerator` Trait Implementation
//=========================================================================================

#[async_trait]
impl AssessmentGenerator for OpenAiAssessmentAdapter {
    /// Generates the full bundle, one framework at a time. The first failing
    /// sub-generation aborts everything; the caller falls back to the
    /// rule-based engine.
    async fn generate_assessment(
        &self,
        input: &BirthInput,
        chart: &BirthChart,
    ) -> PortResult<AssessmentBundle> {
        let chart_text = format_chart(chart);

        let type_indicator = self
            .complete_json(prompt_for(FrameworkKind::TypeIndicator, &chart_text))
            .await?;
        let five_factor = self
            .complete_json(prompt_for(FrameworkKind::FiveFactor, &chart_text))
            .await?;
        let enneagram = self
            .complete_json(prompt_for(FrameworkKind::Enneagram, &chart_text))
            .await?;
        let behavioral_style = self
            .complete_json(prompt_for(FrameworkKind::BehavioralStyle, &chart_text))
            .await?;
        let strengths = self
            .complete_json(prompt_for(FrameworkKind::Strengths, &chart_text))
            .await?;
        let love_language = self
            .complete_json(prompt_for(FrameworkKind::LoveLanguage, &chart_text))
            .await?;
        let attachment_style = self
            .complete_json(prompt_for(FrameworkKind::AttachmentStyle, &chart_text))
            .await?;
        let emotional_intelligence = self
            .complete_json(prompt_for(FrameworkKind::EmotionalIntelligence, &chart_text))
            .await?;
        let career_fit = self
            .complete_json(prompt_for(FrameworkKind::CareerFit, &chart_text))
            .await?;

        Ok(AssessmentBundle {
            user_id: user_slug(&input.name),
            birth_data: input.clone(),
            type_indicator: Some(type_indicator),
            five_factor: Some(five_factor),
            enneagram: Some(enneagram),
            behavioral_style: Some(behavioral_style),
            strengths: Some(strengths),
            love_language: Some(love_language),
            attachment_style: Some(attachment_style),
            emotional_intelligence: Some(emotional_intelligence),
            career_fit: Some(career_fit),
            created_at: Utc::now(),
            confidence_score: LLM_CONFIDENCE,
        })
    }
}

//=========================================================================================
// Chart Formatting and Prompts
//=========================================================================================

/// Renders the chart as the plain-text summary embedded in every prompt.
fn format_chart(chart: &BirthChart) -> String {
    let mut text = format!(
        "BIRTH CHART\n\
         Sun Sign: {} (core self)\n\
         Moon Sign: {} (emotional nature)\n\
         Rising Sign: {} (outer personality)\n\n\
         PLANETARY POSITIONS:\n",
        chart.sun_sign, chart.moon_sign, chart.rising_sign
    );

    for position in &chart.planets {
        text.push_str(&format!(
            "- {}: {} {:.1} deg in house {}{}\n",
            position.planet,
            position.sign,
            position.degree,
            position.house,
            if position.retrograde { " (retrograde)" } else { "" }
        ));
    }

    text.push_str("\nHOUSES:\n");
    for (house, sign) in &chart.houses {
        text.push_str(&format!("- House {house}: {sign}\n"));
    }

    if !chart.aspects.is_empty() {
        text.push_str("\nASPECTS:\n");
        for aspect in &chart.aspects {
            text.push_str(&format!(
                "- {} {} {} (orb {:.1} deg)\n",
                aspect.planet1, aspect.aspect, aspect.planet2, aspect.orb
            ));
        }
    }

    text
}

/// The per-framework instruction plus the exact JSON shape the response must
/// match. The shapes mirror the engine's result records one to one.
fn prompt_for(kind: FrameworkKind, chart_text: &str) -> String {
    let instructions = match kind {
        FrameworkKind::TypeIndicator => {
            "Determine the four-letter personality type indicated by this chart. Weigh fire/air \
             against earth/water for the first two axes, decision-making style for the third, and \
             cardinal/fixed against mutable emphasis for the fourth.\n\
             {\"type\": \"ESTJ\", \"description\": \"...\", \"strengths\": [\"...\"], \
             \"weaknesses\": [\"...\"], \"careers\": [\"...\"]}"
        }
        FrameworkKind::FiveFactor => {
            "Score the five major personality dimensions from 1 to 100 based on the sign and \
             house emphasis of this chart.\n\
             {\"openness\": 50, \"conscientiousness\": 50, \"extraversion\": 50, \
             \"agreeableness\": 50, \"neuroticism\": 50, \"description\": \"...\"}"
        }
        FrameworkKind::Enneagram => {
            "Determine the Enneagram type (1-9) and wing suggested by the chart's core \
             motivational patterns.\n\
             {\"type\": 4, \"wing\": 5, \"description\": \"...\", \"core_motivation\": \"...\", \
             \"basic_fear\": \"...\", \"strengths\": [\"...\"]}"
        }
        FrameworkKind::BehavioralStyle => {
            "Score the four behavioral-style axes as percentages that sum to exactly 100: \
             dominance (fire signs, Mars), influence (air signs), steadiness (earth/water \
             signs), conscientiousness (earth signs, Saturn).\n\
             {\"dominance\": 35, \"influence\": 30, \"steadiness\": 20, \"conscientiousness\": 15, \
             \"primary_style\": \"D\", \"description\": \"...\"}"
        }
        FrameworkKind::Strengths => {
            "Pick the five strength themes most strongly indicated by the chart's planetary \
             placements, with a short piece of astrological evidence for each.\n\
             {\"top_strengths\": [\"...\", \"...\", \"...\", \"...\", \"...\"], \
             \"descriptions\": {\"Theme\": \"evidence\"}}"
        }
        FrameworkKind::LoveLanguage => {
            "Determine the primary and secondary love language from the Venus placement and \
             emotional patterns; secondary must differ from primary. Score all five languages.\n\
             {\"primary\": \"Quality Time\", \"secondary\": \"Physical Touch\", \"scores\": \
             {\"Words of Affirmation\": 15, \"Quality Time\": 35, \"Receiving Gifts\": 10, \
             \"Acts of Service\": 20, \"Physical Touch\": 20}}"
        }
        FrameworkKind::AttachmentStyle => {
            "Determine the attachment style (Secure, Anxious, Avoidant, or Disorganized) from \
             the moon placement and emotional-security themes.\n\
             {\"style\": \"Secure\", \"percentage\": 75, \"description\": \"...\", \
             \"characteristics\": [\"...\"]}"
        }
        FrameworkKind::EmotionalIntelligence => {
            "Score overall emotional intelligence and its five components (self_awareness, \
             self_regulation, motivation, empathy, social_skills) from 1 to 100 based on water \
             sign emphasis and related placements.\n\
             {\"overall_eq\": 70, \"self_awareness\": 70, \"self_regulation\": 70, \
             \"motivation\": 70, \"empathy\": 70, \"social_skills\": 70, \"description\": \"...\"}"
        }
        FrameworkKind::CareerFit => {
            "Determine the three-letter Holland career code (letters from RIASEC) from the \
             vocational indicators of this chart.\n\
             {\"holland_code\": \"EAS\", \"primary_type\": \"Enterprising\", \
             \"career_matches\": [\"...\"], \"work_environments\": [\"...\"]}"
        }
    };

    format!(
        "{chart_text}\n\nTASK:\n{instructions}\n\nReturn ONLY the JSON object, in exactly the \
         shape shown above."
    )
}
