//! Hand edits layered over the merged profile.
//!
//! An adjustment pins one profile field to a chosen value. The session
//! applies every adjustment after each recomputation, so later commits
//! never overwrite a hand edit; only clearing the adjustment does.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;
use crate::model::{normalize_term, CanonicalProfile, ListField, NumericField};

/// Free-text fields that only hand edits can set.
pub const NOTE_FIELDS: [&str; 5] = [
    "formality.context_variations",
    "communication_style.cta_style",
    "audience_adaptation.audience_segments",
    "audience_adaptation.channel_adaptations",
    "audience_adaptation.journey_stage_adaptations",
];

/// Context key under which a single free-text note is filed.
const GENERAL: &str = "general";

/// The value a hand edit pins a field to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Adjustment {
    Level(u8),
    List(Vec<String>),
    Note(String),
}

#[derive(Debug, Clone, Copy)]
enum Slot {
    List(ListField),
    Level(NumericField),
    Note(&'static str),
}

fn slot(path: &str) -> Result<Slot, CoreError> {
    if let Some(field) = ListField::ALL.into_iter().find(|f| f.path() == path) {
        return Ok(Slot::List(field));
    }
    if let Some(field) = NumericField::ALL.into_iter().find(|f| f.path() == path) {
        return Ok(Slot::Level(field));
    }
    NOTE_FIELDS
        .into_iter()
        .find(|p| *p == path)
        .map(Slot::Note)
        .ok_or_else(|| CoreError::UnknownField(path.to_string()))
}

fn invalid(path: &str, reason: &str) -> CoreError {
    CoreError::InvalidAdjustment {
        path: path.to_string(),
        reason: reason.to_string(),
    }
}

fn normalize_list<'a>(items: impl IntoIterator<Item = &'a str>, cap: usize) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for term in items.into_iter().filter_map(normalize_term) {
        if !out.contains(&term) {
            out.push(term);
        }
    }
    out.truncate(cap);
    out
}

impl Adjustment {
    /// Build the adjustment for `path` from a JSON value.
    ///
    /// List fields take an array of strings or one comma/newline separated
    /// string, capped like the merged field. Levels take a number from 1 to
    /// 10. Note fields take a string.
    pub fn from_value(path: &str, value: Value) -> Result<Self, CoreError> {
        match slot(path)? {
            Slot::List(field) => match value {
                Value::Null => Ok(Self::List(Vec::new())),
                Value::String(text) => Ok(Self::List(normalize_list(
                    text.split(|c: char| c == ',' || c == '\n'),
                    field.cap(),
                ))),
                Value::Array(items) if items.iter().all(Value::is_string) => Ok(Self::List(
                    normalize_list(items.iter().filter_map(Value::as_str), field.cap()),
                )),
                _ => Err(invalid(path, "expected a list of terms")),
            },
            Slot::Level(_) => {
                let level = match &value {
                    Value::Number(n) => n.as_f64(),
                    Value::String(s) => s.trim().parse::<f64>().ok(),
                    _ => None,
                };
                match level {
                    Some(v) if (1.0..=10.0).contains(&v) => Ok(Self::Level(v.round() as u8)),
                    Some(_) => Err(invalid(path, "expected a level between 1 and 10")),
                    None => Err(invalid(path, "expected a number")),
                }
            }
            Slot::Note(_) => match value {
                Value::String(text) => Ok(Self::Note(text.trim().to_string())),
                _ => Err(invalid(path, "expected text")),
            },
        }
    }

    /// Parse a command-line value: JSON when it parses, plain text otherwise.
    pub fn parse(path: &str, raw: &str) -> Result<Self, CoreError> {
        let value = match slot(path)? {
            Slot::Note(_) => Value::String(raw.to_string()),
            _ => serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string())),
        };
        Self::from_value(path, value)
    }
}

/// Every hand edit of a session, keyed by field path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileAdjustments {
    fields: BTreeMap<String, Adjustment>,
}

impl ProfileAdjustments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin `path` to `adjustment`, replacing any earlier edit of that field.
    pub fn set(&mut self, path: &str, adjustment: Adjustment) -> Result<(), CoreError> {
        let adjustment = match (slot(path)?, adjustment) {
            (Slot::List(field), Adjustment::List(items)) => Adjustment::List(normalize_list(
                items.iter().map(String::as_str),
                field.cap(),
            )),
            (Slot::Level(_), Adjustment::Level(v)) if (1..=10).contains(&v) => {
                Adjustment::Level(v)
            }
            (Slot::Note(_), Adjustment::Note(text)) => Adjustment::Note(text),
            _ => return Err(invalid(path, "value does not fit this field")),
        };
        self.fields.insert(path.to_string(), adjustment);
        Ok(())
    }

    pub fn get(&self, path: &str) -> Option<&Adjustment> {
        self.fields.get(path)
    }

    pub fn remove(&mut self, path: &str) -> bool {
        self.fields.remove(path).is_some()
    }

    pub fn clear(&mut self) {
        self.fields.clear();
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Adjustment)> {
        self.fields.iter().map(|(path, adj)| (path.as_str(), adj))
    }

    /// Write every adjustment into `profile`. Returns the paths applied.
    pub fn apply(&self, profile: &mut CanonicalProfile) -> Vec<String> {
        let mut applied = Vec::new();
        for (path, adjustment) in &self.fields {
            match (slot(path), adjustment) {
                (Ok(Slot::List(field)), Adjustment::List(items)) => {
                    field.set(profile, items.iter().take(field.cap()).cloned().collect());
                }
                (Ok(Slot::Level(field)), Adjustment::Level(v)) => {
                    field.set(profile, (*v).clamp(1, 10));
                }
                (Ok(Slot::Note(note)), Adjustment::Note(text)) => set_note(profile, note, text),
                _ => {
                    tracing::debug!(path = %path, "Ignoring adjustment that does not fit its field");
                    continue;
                }
            }
            applied.push(path.clone());
        }
        applied
    }
}

fn set_note(profile: &mut CanonicalProfile, path: &str, text: &str) {
    let notes = if text.is_empty() {
        BTreeMap::new()
    } else {
        BTreeMap::from([(GENERAL.to_string(), text.to_string())])
    };
    match path {
        "formality.context_variations" => profile.formality.context_variations = notes,
        "communication_style.cta_style" => profile.communication_style.cta_style = text.to_string(),
        "audience_adaptation.audience_segments" => {
            profile.audience_adaptation.audience_segments = notes
        }
        "audience_adaptation.channel_adaptations" => {
            profile.audience_adaptation.channel_adaptations = notes
        }
        "audience_adaptation.journey_stage_adaptations" => {
            profile.audience_adaptation.journey_stage_adaptations = notes
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_by_field_kind() {
        assert_eq!(
            Adjustment::parse("formality.level", "8").unwrap(),
            Adjustment::Level(8)
        );
        assert_eq!(
            Adjustment::parse("personality.primary_traits", "Bold, Calm,,bold").unwrap(),
            Adjustment::List(vec!["bold".into(), "calm".into()])
        );
        assert_eq!(
            Adjustment::parse("personality.primary_traits", r#"["Warm"]"#).unwrap(),
            Adjustment::List(vec!["warm".into()])
        );
        assert_eq!(
            Adjustment::parse("communication_style.cta_style", "42").unwrap(),
            Adjustment::Note("42".into())
        );
    }

    #[test]
    fn test_rejects_values_that_do_not_fit() {
        assert!(matches!(
            Adjustment::parse("formality.level", "11"),
            Err(CoreError::InvalidAdjustment { .. })
        ));
        assert!(matches!(
            Adjustment::parse("formality.level", "casual"),
            Err(CoreError::InvalidAdjustment { .. })
        ));
        assert!(matches!(
            Adjustment::from_value("personality.primary_traits", json!({"a": 1})),
            Err(CoreError::InvalidAdjustment { .. })
        ));
        assert!(matches!(
            Adjustment::parse("formality.mood", "1"),
            Err(CoreError::UnknownField(_))
        ));

        let mut adjustments = ProfileAdjustments::new();
        assert!(adjustments
            .set("formality.level", Adjustment::Note("high".into()))
            .is_err());
        assert!(adjustments.is_empty());
    }

    #[test]
    fn test_lists_are_capped() {
        let adj = Adjustment::from_value(
            "personality.primary_traits",
            json!(["a", "b", "c", "d", "e"]),
        )
        .unwrap();
        assert_eq!(adj, Adjustment::List(vec!["a".into(), "b".into(), "c".into()]));
    }

    #[test]
    fn test_apply_overrides_profile_fields() {
        let mut adjustments = ProfileAdjustments::new();
        adjustments
            .set("formality.level", Adjustment::Level(9))
            .unwrap();
        adjustments
            .set(
                "emotional_tone.primary_emotions",
                Adjustment::List(vec!["Serious".into()]),
            )
            .unwrap();
        adjustments
            .set(
                "communication_style.cta_style",
                Adjustment::Note("Soft asks, never pushy".into()),
            )
            .unwrap();
        adjustments
            .set(
                "audience_adaptation.channel_adaptations",
                Adjustment::Note("Shorter on social".into()),
            )
            .unwrap();

        let mut profile = CanonicalProfile::default();
        let applied = adjustments.apply(&mut profile);

        assert_eq!(applied.len(), 4);
        assert_eq!(profile.formality.level, 9);
        assert_eq!(profile.emotional_tone.primary_emotions, vec!["serious"]);
        assert_eq!(profile.communication_style.cta_style, "Soft asks, never pushy");
        assert_eq!(
            profile.audience_adaptation.channel_adaptations["general"],
            "Shorter on social"
        );
        assert_eq!(profile.vocabulary.jargon_level, 5);
    }

    #[test]
    fn test_serialized_form_is_a_plain_map() {
        let mut adjustments = ProfileAdjustments::new();
        adjustments
            .set("vocabulary.jargon_level", Adjustment::Level(2))
            .unwrap();
        adjustments
            .set(
                "vocabulary.preferred_terms",
                Adjustment::List(vec!["honest".into()]),
            )
            .unwrap();

        let value = serde_json::to_value(&adjustments).unwrap();
        assert_eq!(
            value,
            json!({"vocabulary.jargon_level": 2, "vocabulary.preferred_terms": ["honest"]})
        );
        let back: ProfileAdjustments = serde_json::from_value(value).unwrap();
        assert_eq!(back, adjustments);
    }
}
