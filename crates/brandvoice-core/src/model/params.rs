use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::field::{ListField, NumericField};
use super::value::FieldValue;

/// The brand-voice attributes derived from one run of one input method.
///
/// Every field may be missing or malformed; the merge decides what to fold in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialParameterSet {
    #[serde(default, deserialize_with = "lenient_section")]
    pub personality: PersonalityParams,
    #[serde(default, deserialize_with = "lenient_section")]
    pub formality: FormalityParams,
    #[serde(default, deserialize_with = "lenient_section")]
    pub emotional_tone: EmotionalToneParams,
    #[serde(default, deserialize_with = "lenient_section")]
    pub vocabulary: VocabularyParams,
    #[serde(default, deserialize_with = "lenient_section")]
    pub communication_style: CommunicationStyleParams,
}

/// Read a section, treating anything other than a JSON object as absent.
fn lenient_section<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    if !value.is_object() {
        tracing::debug!(value = %value, "Ignoring malformed parameter section");
        return Ok(T::default());
    }
    serde_json::from_value(value).map_err(serde::de::Error::custom)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalityParams {
    #[serde(default, skip_serializing_if = "FieldValue::is_missing")]
    pub primary_traits: FieldValue,
    #[serde(default, skip_serializing_if = "FieldValue::is_missing")]
    pub secondary_traits: FieldValue,
    #[serde(default, skip_serializing_if = "FieldValue::is_missing")]
    pub traits_to_avoid: FieldValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormalityParams {
    #[serde(default, skip_serializing_if = "FieldValue::is_missing")]
    pub level: FieldValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmotionalToneParams {
    #[serde(default, skip_serializing_if = "FieldValue::is_missing")]
    pub primary_emotions: FieldValue,
    #[serde(default, skip_serializing_if = "FieldValue::is_missing")]
    pub secondary_emotions: FieldValue,
    #[serde(default, skip_serializing_if = "FieldValue::is_missing")]
    pub emotions_to_avoid: FieldValue,
    #[serde(default, skip_serializing_if = "FieldValue::is_missing")]
    pub intensity: FieldValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VocabularyParams {
    #[serde(default, skip_serializing_if = "FieldValue::is_missing")]
    pub preferred_terms: FieldValue,
    #[serde(default, skip_serializing_if = "FieldValue::is_missing")]
    pub restricted_terms: FieldValue,
    #[serde(default, skip_serializing_if = "FieldValue::is_missing")]
    pub jargon_level: FieldValue,
    #[serde(default, skip_serializing_if = "FieldValue::is_missing")]
    pub technical_complexity: FieldValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommunicationStyleParams {
    #[serde(default, skip_serializing_if = "FieldValue::is_missing")]
    pub storytelling_preference: FieldValue,
    #[serde(default, skip_serializing_if = "FieldValue::is_missing")]
    pub sentence_length_preference: FieldValue,
    #[serde(default, skip_serializing_if = "FieldValue::is_missing")]
    pub sentence_complexity_preference: FieldValue,
    #[serde(default, skip_serializing_if = "FieldValue::is_missing")]
    pub rhetorical_devices: FieldValue,
}

impl PartialParameterSet {
    /// True when no field carries anything, valid or not.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// The slot behind a dotted path such as `formality.level`.
    pub fn field_mut(&mut self, path: &str) -> Option<&mut FieldValue> {
        let list = ListField::ALL.into_iter().find(|f| f.path() == path);
        let numeric = NumericField::ALL.into_iter().find(|f| f.path() == path);
        match (list, numeric) {
            (Some(field), _) => Some(field.read_mut(self)),
            (None, Some(field)) => Some(field.read_mut(self)),
            (None, None) => None,
        }
    }

    /// Parse a partial set from JSON text. Unknown keys are ignored.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_sparse_document() {
        let set: PartialParameterSet = serde_json::from_value(json!({
            "personality": { "primary_traits": ["Bold", "Calm"] },
            "formality": { "level": 7 }
        }))
        .unwrap();

        assert_eq!(
            set.personality.primary_traits,
            FieldValue::List(vec!["bold".into(), "calm".into()])
        );
        assert_eq!(set.formality.level, FieldValue::Scalar(7.0));
        assert!(set.emotional_tone.intensity.is_missing());
        assert!(set.vocabulary.preferred_terms.is_missing());
    }

    #[test]
    fn test_malformed_fields_are_kept_not_rejected() {
        let set: PartialParameterSet = serde_json::from_value(json!({
            "personality": { "primary_traits": "bold" },
            "formality": { "level": "very" },
            "emotional_tone": { "intensity": [1, 2] }
        }))
        .unwrap();

        assert!(set.personality.primary_traits.is_invalid());
        assert!(set.formality.level.is_invalid());
        assert!(set.emotional_tone.intensity.is_invalid());
    }

    #[test]
    fn test_malformed_section_is_treated_as_absent() {
        let set = PartialParameterSet::from_json(
            r#"{"personality":{"primary_traits":["bold"]},"formality":7}"#,
        )
        .unwrap();
        assert_eq!(
            set.personality.primary_traits,
            FieldValue::List(vec!["bold".into()])
        );
        assert!(set.formality.level.is_missing());

        let set = PartialParameterSet::from_json(
            r#"{"formality":null,"vocabulary":["x"],"emotional_tone":{"intensity":4}}"#,
        )
        .unwrap();
        assert_eq!(set.formality, FormalityParams::default());
        assert_eq!(set.vocabulary, VocabularyParams::default());
        assert_eq!(set.emotional_tone.intensity, FieldValue::Scalar(4.0));
    }

    #[test]
    fn test_field_mut_by_path() {
        let mut set = PartialParameterSet::default();
        *set.field_mut("formality.level").unwrap() = FieldValue::scalar(9);
        *set.field_mut("communication_style.rhetorical_devices").unwrap() =
            FieldValue::list(["Metaphors"]);

        assert_eq!(set.formality.level, FieldValue::Scalar(9.0));
        assert_eq!(
            set.communication_style.rhetorical_devices,
            FieldValue::List(vec!["metaphors".into()])
        );
        assert!(set.field_mut("formality.mood").is_none());
    }

    #[test]
    fn test_missing_fields_are_not_serialized() {
        let mut set = PartialParameterSet::default();
        assert!(set.is_empty());
        set.formality.level = FieldValue::scalar(3);

        let value = serde_json::to_value(&set).unwrap();
        assert_eq!(value["formality"], json!({ "level": 3 }));
        assert_eq!(value["personality"], json!({}));
        assert!(!set.is_empty());
    }
}
