//! Field descriptors shared by the merge engine and its report.
//!
//! Each descriptor knows where its field lives in a [`PartialParameterSet`]
//! and in a [`CanonicalProfile`], plus the merge rules that apply to it.

use serde::Serialize;

use super::params::PartialParameterSet;
use super::profile::{
    CanonicalProfile, DEFAULT_PRIMARY_EMOTIONS, DEFAULT_PRIMARY_TRAITS,
    DEFAULT_SECONDARY_EMOTIONS, DEFAULT_SECONDARY_TRAITS,
};
use super::value::FieldValue;

/// A categorical, list-valued field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListField {
    PrimaryTraits,
    SecondaryTraits,
    TraitsToAvoid,
    PrimaryEmotions,
    SecondaryEmotions,
    EmotionsToAvoid,
    PreferredTerms,
    RestrictedTerms,
    RhetoricalDevices,
}

impl ListField {
    pub const ALL: [ListField; 9] = [
        ListField::PrimaryTraits,
        ListField::SecondaryTraits,
        ListField::TraitsToAvoid,
        ListField::PrimaryEmotions,
        ListField::SecondaryEmotions,
        ListField::EmotionsToAvoid,
        ListField::PreferredTerms,
        ListField::RestrictedTerms,
        ListField::RhetoricalDevices,
    ];

    /// Dotted path of the field in the export document.
    pub fn path(&self) -> &'static str {
        match self {
            Self::PrimaryTraits => "personality.primary_traits",
            Self::SecondaryTraits => "personality.secondary_traits",
            Self::TraitsToAvoid => "personality.traits_to_avoid",
            Self::PrimaryEmotions => "emotional_tone.primary_emotions",
            Self::SecondaryEmotions => "emotional_tone.secondary_emotions",
            Self::EmotionsToAvoid => "emotional_tone.emotions_to_avoid",
            Self::PreferredTerms => "vocabulary.preferred_terms",
            Self::RestrictedTerms => "vocabulary.restricted_terms",
            Self::RhetoricalDevices => "communication_style.rhetorical_devices",
        }
    }

    /// Maximum number of entries kept in the canonical profile.
    pub fn cap(&self) -> usize {
        match self {
            Self::PreferredTerms | Self::RestrictedTerms => 10,
            Self::RhetoricalDevices => 5,
            _ => 3,
        }
    }

    /// Built-in list used when no method contributed anything.
    pub fn fallback(&self) -> &'static [&'static str] {
        match self {
            Self::PrimaryTraits => &DEFAULT_PRIMARY_TRAITS,
            Self::SecondaryTraits => &DEFAULT_SECONDARY_TRAITS,
            Self::PrimaryEmotions => &DEFAULT_PRIMARY_EMOTIONS,
            Self::SecondaryEmotions => &DEFAULT_SECONDARY_EMOTIONS,
            _ => &[],
        }
    }

    /// Whether a priority method's missing value may take slot 0.
    pub fn has_priority_override(&self) -> bool {
        matches!(
            self,
            Self::PrimaryTraits
                | Self::SecondaryTraits
                | Self::PrimaryEmotions
                | Self::SecondaryEmotions
        )
    }

    pub fn read<'a>(&self, set: &'a PartialParameterSet) -> &'a FieldValue {
        match self {
            Self::PrimaryTraits => &set.personality.primary_traits,
            Self::SecondaryTraits => &set.personality.secondary_traits,
            Self::TraitsToAvoid => &set.personality.traits_to_avoid,
            Self::PrimaryEmotions => &set.emotional_tone.primary_emotions,
            Self::SecondaryEmotions => &set.emotional_tone.secondary_emotions,
            Self::EmotionsToAvoid => &set.emotional_tone.emotions_to_avoid,
            Self::PreferredTerms => &set.vocabulary.preferred_terms,
            Self::RestrictedTerms => &set.vocabulary.restricted_terms,
            Self::RhetoricalDevices => &set.communication_style.rhetorical_devices,
        }
    }

    pub fn read_mut<'a>(&self, set: &'a mut PartialParameterSet) -> &'a mut FieldValue {
        match self {
            Self::PrimaryTraits => &mut set.personality.primary_traits,
            Self::SecondaryTraits => &mut set.personality.secondary_traits,
            Self::TraitsToAvoid => &mut set.personality.traits_to_avoid,
            Self::PrimaryEmotions => &mut set.emotional_tone.primary_emotions,
            Self::SecondaryEmotions => &mut set.emotional_tone.secondary_emotions,
            Self::EmotionsToAvoid => &mut set.emotional_tone.emotions_to_avoid,
            Self::PreferredTerms => &mut set.vocabulary.preferred_terms,
            Self::RestrictedTerms => &mut set.vocabulary.restricted_terms,
            Self::RhetoricalDevices => &mut set.communication_style.rhetorical_devices,
        }
    }

    pub fn get<'a>(&self, profile: &'a CanonicalProfile) -> &'a [String] {
        match self {
            Self::PrimaryTraits => &profile.personality.primary_traits,
            Self::SecondaryTraits => &profile.personality.secondary_traits,
            Self::TraitsToAvoid => &profile.personality.traits_to_avoid,
            Self::PrimaryEmotions => &profile.emotional_tone.primary_emotions,
            Self::SecondaryEmotions => &profile.emotional_tone.secondary_emotions,
            Self::EmotionsToAvoid => &profile.emotional_tone.emotions_to_avoid,
            Self::PreferredTerms => &profile.vocabulary.preferred_terms,
            Self::RestrictedTerms => &profile.vocabulary.restricted_terms,
            Self::RhetoricalDevices => &profile.communication_style.rhetorical_devices,
        }
    }

    pub fn set(&self, profile: &mut CanonicalProfile, values: Vec<String>) {
        let slot = match self {
            Self::PrimaryTraits => &mut profile.personality.primary_traits,
            Self::SecondaryTraits => &mut profile.personality.secondary_traits,
            Self::TraitsToAvoid => &mut profile.personality.traits_to_avoid,
            Self::PrimaryEmotions => &mut profile.emotional_tone.primary_emotions,
            Self::SecondaryEmotions => &mut profile.emotional_tone.secondary_emotions,
            Self::EmotionsToAvoid => &mut profile.emotional_tone.emotions_to_avoid,
            Self::PreferredTerms => &mut profile.vocabulary.preferred_terms,
            Self::RestrictedTerms => &mut profile.vocabulary.restricted_terms,
            Self::RhetoricalDevices => &mut profile.communication_style.rhetorical_devices,
        };
        *slot = values;
    }
}

/// A 1-10 numeric field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericField {
    FormalityLevel,
    Intensity,
    JargonLevel,
    TechnicalComplexity,
    StorytellingPreference,
    SentenceLengthPreference,
    SentenceComplexityPreference,
}

impl NumericField {
    pub const ALL: [NumericField; 7] = [
        NumericField::FormalityLevel,
        NumericField::Intensity,
        NumericField::JargonLevel,
        NumericField::TechnicalComplexity,
        NumericField::StorytellingPreference,
        NumericField::SentenceLengthPreference,
        NumericField::SentenceComplexityPreference,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Self::FormalityLevel => "formality.level",
            Self::Intensity => "emotional_tone.intensity",
            Self::JargonLevel => "vocabulary.jargon_level",
            Self::TechnicalComplexity => "vocabulary.technical_complexity",
            Self::StorytellingPreference => "communication_style.storytelling_preference",
            Self::SentenceLengthPreference => "communication_style.sentence_length_preference",
            Self::SentenceComplexityPreference => {
                "communication_style.sentence_complexity_preference"
            }
        }
    }

    /// Communication-style fields average only priority-method values when any exist.
    pub fn prefers_priority_sources(&self) -> bool {
        matches!(
            self,
            Self::StorytellingPreference
                | Self::SentenceLengthPreference
                | Self::SentenceComplexityPreference
        )
    }

    pub fn read<'a>(&self, set: &'a PartialParameterSet) -> &'a FieldValue {
        match self {
            Self::FormalityLevel => &set.formality.level,
            Self::Intensity => &set.emotional_tone.intensity,
            Self::JargonLevel => &set.vocabulary.jargon_level,
            Self::TechnicalComplexity => &set.vocabulary.technical_complexity,
            Self::StorytellingPreference => &set.communication_style.storytelling_preference,
            Self::SentenceLengthPreference => &set.communication_style.sentence_length_preference,
            Self::SentenceComplexityPreference => {
                &set.communication_style.sentence_complexity_preference
            }
        }
    }

    pub fn read_mut<'a>(&self, set: &'a mut PartialParameterSet) -> &'a mut FieldValue {
        match self {
            Self::FormalityLevel => &mut set.formality.level,
            Self::Intensity => &mut set.emotional_tone.intensity,
            Self::JargonLevel => &mut set.vocabulary.jargon_level,
            Self::TechnicalComplexity => &mut set.vocabulary.technical_complexity,
            Self::StorytellingPreference => &mut set.communication_style.storytelling_preference,
            Self::SentenceLengthPreference => {
                &mut set.communication_style.sentence_length_preference
            }
            Self::SentenceComplexityPreference => {
                &mut set.communication_style.sentence_complexity_preference
            }
        }
    }

    pub fn get(&self, profile: &CanonicalProfile) -> u8 {
        match self {
            Self::FormalityLevel => profile.formality.level,
            Self::Intensity => profile.emotional_tone.intensity,
            Self::JargonLevel => profile.vocabulary.jargon_level,
            Self::TechnicalComplexity => profile.vocabulary.technical_complexity,
            Self::StorytellingPreference => profile.communication_style.storytelling_preference,
            Self::SentenceLengthPreference => {
                profile.communication_style.sentence_length_preference
            }
            Self::SentenceComplexityPreference => {
                profile.communication_style.sentence_complexity_preference
            }
        }
    }

    pub fn set(&self, profile: &mut CanonicalProfile, value: u8) {
        let slot = match self {
            Self::FormalityLevel => &mut profile.formality.level,
            Self::Intensity => &mut profile.emotional_tone.intensity,
            Self::JargonLevel => &mut profile.vocabulary.jargon_level,
            Self::TechnicalComplexity => &mut profile.vocabulary.technical_complexity,
            Self::StorytellingPreference => {
                &mut profile.communication_style.storytelling_preference
            }
            Self::SentenceLengthPreference => {
                &mut profile.communication_style.sentence_length_preference
            }
            Self::SentenceComplexityPreference => {
                &mut profile.communication_style.sentence_complexity_preference
            }
        };
        *slot = value;
    }
}
