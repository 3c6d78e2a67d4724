//! Brand interview questionnaire and the coercion of its answers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use brandvoice_core::model::{FieldValue, ListField, NumericField, PartialParameterSet};

use crate::error::AnalyzeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Multiselect,
    Range,
    Textarea,
}

/// Where an answer lands in the partial parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    List(ListField),
    Numeric(NumericField),
    /// Collected for the record, not merged.
    Ignored,
}

#[derive(Debug, Clone, Serialize)]
pub struct Question {
    pub name: &'static str,
    pub prompt: &'static str,
    pub kind: QuestionKind,
    #[serde(skip_serializing_if = "has_no_options")]
    pub options: &'static [&'static str],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_selections: Option<usize>,
    #[serde(skip)]
    pub target: Target,
}

fn has_no_options(options: &&'static [&'static str]) -> bool {
    options.is_empty()
}

#[derive(Debug, Clone, Serialize)]
pub struct Section {
    pub name: &'static str,
    pub questions: &'static [Question],
}

const TRAIT_OPTIONS: &[&str] = &[
    "Innovative",
    "Trustworthy",
    "Playful",
    "Sophisticated",
    "Friendly",
    "Authoritative",
    "Bold",
    "Empathetic",
];

const EMOTION_OPTIONS: &[&str] = &[
    "Optimistic",
    "Serious",
    "Passionate",
    "Calm",
    "Urgent",
    "Reassuring",
];

const RHETORICAL_OPTIONS: &[&str] = &[
    "Questions",
    "Metaphors",
    "Analogies",
    "Repetition",
    "Alliteration",
    "Statistics",
    "Quotes",
];

const fn multiselect(
    name: &'static str,
    prompt: &'static str,
    options: &'static [&'static str],
    max_selections: Option<usize>,
    field: ListField,
) -> Question {
    Question {
        name,
        prompt,
        kind: QuestionKind::Multiselect,
        options,
        max_selections,
        target: Target::List(field),
    }
}

/// A 1-10 slider.
const fn range(name: &'static str, prompt: &'static str, field: NumericField) -> Question {
    Question {
        name,
        prompt,
        kind: QuestionKind::Range,
        options: &[],
        max_selections: None,
        target: Target::Numeric(field),
    }
}

const fn textarea(name: &'static str, prompt: &'static str, target: Target) -> Question {
    Question {
        name,
        prompt,
        kind: QuestionKind::Textarea,
        options: &[],
        max_selections: None,
        target,
    }
}

/// The questionnaire, section by section, in the order it is asked.
pub const SECTIONS: &[Section] = &[
    Section {
        name: "personality",
        questions: &[
            multiselect(
                "primary_traits",
                "If your brand were a person, how would you describe their personality? (Select up to 3)",
                TRAIT_OPTIONS,
                Some(3),
                ListField::PrimaryTraits,
            ),
            multiselect(
                "secondary_traits",
                "What secondary personality traits would your brand have? (Select up to 3)",
                TRAIT_OPTIONS,
                Some(3),
                ListField::SecondaryTraits,
            ),
            multiselect(
                "traits_to_avoid",
                "Which personality traits would you specifically want to avoid?",
                TRAIT_OPTIONS,
                None,
                ListField::TraitsToAvoid,
            ),
        ],
    },
    Section {
        name: "formality",
        questions: &[
            range(
                "formality_level",
                "How formal or casual should your brand voice be? (1 very casual, 10 very formal)",
                NumericField::FormalityLevel,
            ),
            textarea(
                "context_variations",
                "Does your brand's formality level change in different contexts? If so, please describe:",
                Target::Ignored,
            ),
        ],
    },
    Section {
        name: "emotional_tone",
        questions: &[
            multiselect(
                "primary_emotions",
                "What primary emotions should your brand voice convey? (Select up to 2)",
                EMOTION_OPTIONS,
                Some(2),
                ListField::PrimaryEmotions,
            ),
            multiselect(
                "secondary_emotions",
                "What secondary emotions might your brand voice convey? (Select up to 2)",
                EMOTION_OPTIONS,
                Some(2),
                ListField::SecondaryEmotions,
            ),
            multiselect(
                "emotions_to_avoid",
                "Which emotional tones should your brand specifically avoid?",
                EMOTION_OPTIONS,
                None,
                ListField::EmotionsToAvoid,
            ),
            range(
                "emotional_intensity",
                "How intense should your brand's emotional expression be? (1 subtle, 10 intense)",
                NumericField::Intensity,
            ),
        ],
    },
    Section {
        name: "vocabulary",
        questions: &[
            textarea(
                "preferred_terms",
                "List some key terms or phrases that your brand should use frequently:",
                Target::List(ListField::PreferredTerms),
            ),
            textarea(
                "restricted_terms",
                "List any terms or phrases that your brand should avoid:",
                Target::List(ListField::RestrictedTerms),
            ),
            range(
                "jargon_level",
                "How much industry jargon should your brand use? (1 minimal, 10 extensive)",
                NumericField::JargonLevel,
            ),
            range(
                "technical_complexity",
                "How technically complex should your language be? (1 simple, 10 complex)",
                NumericField::TechnicalComplexity,
            ),
        ],
    },
    Section {
        name: "communication_style",
        questions: &[
            range(
                "storytelling_preference",
                "Should your brand favor direct communication or storytelling? (1 very direct, 10 narrative)",
                NumericField::StorytellingPreference,
            ),
            range(
                "sentence_length",
                "What sentence length does your brand prefer? (1 very short, 10 long)",
                NumericField::SentenceLengthPreference,
            ),
            range(
                "sentence_complexity",
                "What sentence complexity does your brand prefer? (1 very simple, 10 complex)",
                NumericField::SentenceComplexityPreference,
            ),
            multiselect(
                "rhetorical_devices",
                "Which rhetorical devices should your brand use? (Select all that apply)",
                RHETORICAL_OPTIONS,
                None,
                ListField::RhetoricalDevices,
            ),
            textarea(
                "cta_style",
                "How would you describe your brand's call-to-action style?",
                Target::Ignored,
            ),
        ],
    },
    Section {
        name: "audience_adaptation",
        questions: &[
            textarea(
                "audience_segments",
                "Does your brand voice change for different audience segments? If so, please describe:",
                Target::Ignored,
            ),
            textarea(
                "channel_adaptations",
                "Does your brand voice change across different channels? If so, please describe:",
                Target::Ignored,
            ),
            textarea(
                "journey_stages",
                "Does your brand voice change across different customer journey stages? If so, please describe:",
                Target::Ignored,
            ),
        ],
    },
];

/// Look up a question by its answer key.
pub fn find_question(name: &str) -> Option<&'static Question> {
    SECTIONS
        .iter()
        .flat_map(|s| s.questions.iter())
        .find(|q| q.name == name)
}

/// Raw answers keyed by question name, as a form would submit them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InterviewResponses(BTreeMap<String, Value>);

impl InterviewResponses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, AnalyzeError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn insert(&mut self, name: impl Into<String>, answer: impl Into<Value>) {
        self.0.insert(name.into(), answer.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Coerce every answer into the partial set the interview contributes.
    ///
    /// Unknown keys and answers to unmapped questions are dropped.
    pub fn to_params(&self) -> PartialParameterSet {
        let mut set = PartialParameterSet::default();

        for (name, answer) in &self.0 {
            let Some(question) = find_question(name) else {
                tracing::debug!(answer = %name, "Ignoring answer to unknown question");
                continue;
            };

            match question.target {
                Target::List(field) => {
                    *field.read_mut(&mut set) = coerce_list(question, answer.clone());
                }
                Target::Numeric(field) => {
                    *field.read_mut(&mut set) = FieldValue::classify(answer.clone());
                }
                Target::Ignored => {}
            }
        }

        set
    }
}

fn coerce_list(question: &Question, answer: Value) -> FieldValue {
    let value = match (question.kind, answer) {
        (QuestionKind::Textarea, Value::String(text)) => FieldValue::list(split_terms(&text)),
        // A single checked box arrives as a bare string.
        (_, Value::String(one)) => FieldValue::list([one]),
        (_, other) => FieldValue::classify(other),
    };

    match (value, question.max_selections) {
        (FieldValue::List(mut items), Some(max)) if items.len() > max => {
            tracing::warn!(
                question = question.name,
                selected = items.len(),
                max,
                "Too many selections, keeping the first ones"
            );
            items.truncate(max);
            FieldValue::List(items)
        }
        (FieldValue::List(items), _) if items.is_empty() => FieldValue::Missing,
        (value, _) => value,
    }
}

/// Split a free-text answer on commas and newlines.
fn split_terms(text: &str) -> Vec<&str> {
    text.split([',', '\n'])
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_catalog_shape() {
        let names: Vec<&str> = SECTIONS.iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            vec![
                "personality",
                "formality",
                "emotional_tone",
                "vocabulary",
                "communication_style",
                "audience_adaptation"
            ]
        );
        let primary = find_question("primary_traits").unwrap();
        assert_eq!(primary.max_selections, Some(3));
        assert_eq!(primary.options.len(), 8);
        assert!(find_question("nope").is_none());
    }

    #[test]
    fn test_multiselect_coercion() {
        let mut responses = InterviewResponses::new();
        responses.insert("primary_traits", json!(["Bold", "Friendly"]));
        responses.insert("secondary_traits", "Playful");
        let set = responses.to_params();

        assert_eq!(
            set.personality.primary_traits,
            FieldValue::List(vec!["bold".into(), "friendly".into()])
        );
        assert_eq!(
            set.personality.secondary_traits,
            FieldValue::List(vec!["playful".into()])
        );
    }

    #[test]
    fn test_selections_past_max_are_truncated() {
        let mut responses = InterviewResponses::new();
        responses.insert("primary_emotions", json!(["Calm", "Serious", "Urgent"]));
        let set = responses.to_params();
        assert_eq!(
            set.emotional_tone.primary_emotions,
            FieldValue::List(vec!["calm".into(), "serious".into()])
        );
    }

    #[test]
    fn test_textarea_terms() {
        let mut responses = InterviewResponses::new();
        responses.insert("preferred_terms", "Quality, Craft\nComfort,, ");
        responses.insert("restricted_terms", "   ");
        let set = responses.to_params();
        assert_eq!(
            set.vocabulary.preferred_terms,
            FieldValue::List(vec!["quality".into(), "craft".into(), "comfort".into()])
        );
        assert!(set.vocabulary.restricted_terms.is_missing());
    }

    #[test]
    fn test_range_answers() {
        let mut responses = InterviewResponses::new();
        responses.insert("formality_level", "8");
        responses.insert("emotional_intensity", 3);
        responses.insert("sentence_length", "long");
        let set = responses.to_params();

        assert_eq!(set.formality.level, FieldValue::Scalar(8.0));
        assert_eq!(set.emotional_tone.intensity, FieldValue::Scalar(3.0));
        assert!(set.communication_style.sentence_length_preference.is_invalid());
    }

    #[test]
    fn test_ignored_and_unknown_answers() {
        let responses = InterviewResponses::from_json(
            r#"{"audience_segments": "B2B buyers", "cta_style": "direct", "favourite_color": "blue"}"#,
        )
        .unwrap();
        assert_eq!(responses.len(), 3);
        assert!(responses.to_params().is_empty());
    }
}
