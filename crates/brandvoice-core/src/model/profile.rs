use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Value used for every numeric field no method has supplied.
pub const DEFAULT_LEVEL: u8 = 5;

pub const DEFAULT_PRIMARY_TRAITS: [&str; 3] = ["innovative", "trustworthy", "friendly"];
pub const DEFAULT_SECONDARY_TRAITS: [&str; 3] = ["bold", "empathetic", "playful"];
pub const DEFAULT_PRIMARY_EMOTIONS: [&str; 2] = ["optimistic", "passionate"];
pub const DEFAULT_SECONDARY_EMOTIONS: [&str; 2] = ["reassuring", "calm"];

/// The one merged, capped, defaulted brand-voice profile of a session.
///
/// Serializes to the nested export document consumed by downstream tools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalProfile {
    pub personality: Personality,
    pub formality: Formality,
    pub emotional_tone: EmotionalTone,
    pub vocabulary: Vocabulary,
    pub communication_style: CommunicationStyle,
    #[serde(default)]
    pub audience_adaptation: AudienceAdaptation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Personality {
    pub primary_traits: Vec<String>,
    pub secondary_traits: Vec<String>,
    pub traits_to_avoid: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formality {
    pub level: u8,
    /// Free-text notes on how formality shifts by context, keyed by context.
    #[serde(default)]
    pub context_variations: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionalTone {
    pub primary_emotions: Vec<String>,
    pub secondary_emotions: Vec<String>,
    pub emotions_to_avoid: Vec<String>,
    pub intensity: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    pub preferred_terms: Vec<String>,
    pub restricted_terms: Vec<String>,
    pub jargon_level: u8,
    pub technical_complexity: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunicationStyle {
    pub storytelling_preference: u8,
    pub sentence_length_preference: u8,
    pub sentence_complexity_preference: u8,
    pub rhetorical_devices: Vec<String>,
    #[serde(default)]
    pub cta_style: String,
}

/// How the voice shifts per audience, channel and journey stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudienceAdaptation {
    #[serde(default)]
    pub audience_segments: BTreeMap<String, String>,
    #[serde(default)]
    pub channel_adaptations: BTreeMap<String, String>,
    #[serde(default)]
    pub journey_stage_adaptations: BTreeMap<String, String>,
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

impl Default for CanonicalProfile {
    /// The profile of a session no method has contributed to yet.
    fn default() -> Self {
        Self {
            personality: Personality {
                primary_traits: owned(&DEFAULT_PRIMARY_TRAITS),
                secondary_traits: owned(&DEFAULT_SECONDARY_TRAITS),
                traits_to_avoid: Vec::new(),
            },
            formality: Formality {
                level: DEFAULT_LEVEL,
                context_variations: BTreeMap::new(),
            },
            emotional_tone: EmotionalTone {
                primary_emotions: owned(&DEFAULT_PRIMARY_EMOTIONS),
                secondary_emotions: owned(&DEFAULT_SECONDARY_EMOTIONS),
                emotions_to_avoid: Vec::new(),
                intensity: DEFAULT_LEVEL,
            },
            vocabulary: Vocabulary {
                preferred_terms: Vec::new(),
                restricted_terms: Vec::new(),
                jargon_level: DEFAULT_LEVEL,
                technical_complexity: DEFAULT_LEVEL,
            },
            communication_style: CommunicationStyle {
                storytelling_preference: DEFAULT_LEVEL,
                sentence_length_preference: DEFAULT_LEVEL,
                sentence_complexity_preference: DEFAULT_LEVEL,
                rhetorical_devices: Vec::new(),
                cta_style: String::new(),
            },
            audience_adaptation: AudienceAdaptation::default(),
        }
    }
}

impl CanonicalProfile {
    /// Render as Markdown for terminal display and reports.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str("# Brand Voice Profile\n\n");

        md.push_str("## Personality\n\n");
        push_list(&mut md, "Primary traits", &self.personality.primary_traits);
        push_list(&mut md, "Secondary traits", &self.personality.secondary_traits);
        push_list(&mut md, "Traits to avoid", &self.personality.traits_to_avoid);

        md.push_str("\n## Formality\n\n");
        push_level(&mut md, "Level", self.formality.level);
        push_notes(&mut md, "Context variations", &self.formality.context_variations);

        md.push_str("\n## Emotional Tone\n\n");
        push_list(&mut md, "Primary emotions", &self.emotional_tone.primary_emotions);
        push_list(
            &mut md,
            "Secondary emotions",
            &self.emotional_tone.secondary_emotions,
        );
        push_list(
            &mut md,
            "Emotions to avoid",
            &self.emotional_tone.emotions_to_avoid,
        );
        push_level(&mut md, "Intensity", self.emotional_tone.intensity);

        md.push_str("\n## Vocabulary\n\n");
        push_list(&mut md, "Preferred terms", &self.vocabulary.preferred_terms);
        push_list(&mut md, "Restricted terms", &self.vocabulary.restricted_terms);
        push_level(&mut md, "Jargon", self.vocabulary.jargon_level);
        push_level(
            &mut md,
            "Technical complexity",
            self.vocabulary.technical_complexity,
        );

        md.push_str("\n## Communication Style\n\n");
        let style = &self.communication_style;
        push_level(&mut md, "Storytelling", style.storytelling_preference);
        push_level(&mut md, "Sentence length", style.sentence_length_preference);
        push_level(
            &mut md,
            "Sentence complexity",
            style.sentence_complexity_preference,
        );
        push_list(&mut md, "Rhetorical devices", &style.rhetorical_devices);
        if !style.cta_style.is_empty() {
            md.push_str(&format!("- **Call to action**: {}\n", style.cta_style));
        }

        let audience = &self.audience_adaptation;
        if *audience != AudienceAdaptation::default() {
            md.push_str("\n## Audience Adaptation\n\n");
            push_notes(&mut md, "Audience segments", &audience.audience_segments);
            push_notes(&mut md, "Channels", &audience.channel_adaptations);
            push_notes(&mut md, "Journey stages", &audience.journey_stage_adaptations);
        }

        md
    }
}

fn push_list(md: &mut String, label: &str, values: &[String]) {
    if values.is_empty() {
        md.push_str(&format!("- **{label}**: (none)\n"));
    } else {
        md.push_str(&format!("- **{label}**: {}\n", values.join(", ")));
    }
}

fn push_notes(md: &mut String, label: &str, notes: &BTreeMap<String, String>) {
    for (context, note) in notes {
        md.push_str(&format!("- **{label}** ({context}): {note}\n"));
    }
}

fn push_level(md: &mut String, label: &str, level: u8) {
    md.push_str(&format!("- **{label}**: {level}/10\n"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_values() {
        let profile = CanonicalProfile::default();
        assert_eq!(
            profile.personality.primary_traits,
            vec!["innovative", "trustworthy", "friendly"]
        );
        assert_eq!(
            profile.emotional_tone.primary_emotions,
            vec!["optimistic", "passionate"]
        );
        assert!(profile.personality.traits_to_avoid.is_empty());
        assert!(profile.vocabulary.preferred_terms.is_empty());
        assert_eq!(profile.formality.level, 5);
        assert_eq!(profile.communication_style.sentence_complexity_preference, 5);
    }

    #[test]
    fn test_export_shape() {
        let value = serde_json::to_value(CanonicalProfile::default()).unwrap();
        for key in [
            "personality",
            "formality",
            "emotional_tone",
            "vocabulary",
            "communication_style",
            "audience_adaptation",
        ] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        assert_eq!(value["formality"]["level"], 5);
        assert_eq!(value["communication_style"]["storytelling_preference"], 5);
        assert_eq!(value["communication_style"]["cta_style"], "");
    }

    #[test]
    fn test_markdown_lists_sections() {
        let md = CanonicalProfile::default().to_markdown();
        assert!(md.contains("## Personality"));
        assert!(md.contains("innovative, trustworthy, friendly"));
        assert!(md.contains("- **Traits to avoid**: (none)"));
        assert!(md.contains("- **Level**: 5/10"));
    }
}
