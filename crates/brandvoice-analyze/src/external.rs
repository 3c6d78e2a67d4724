//! Import of an external AI analysis document.
//!
//! Analysis services report traits and emotions either as a `{name: score}`
//! map, a plain ranked list, or already split into `primary`/`secondary`.
//! All three are folded into the same primary/secondary lists.

use serde_json::{Map, Value};

use brandvoice_core::model::{FieldValue, PartialParameterSet};

use crate::error::AnalyzeError;

const PRIMARY_TRAITS: usize = 3;
const SECONDARY_TRAITS: usize = 3;
const PRIMARY_EMOTIONS: usize = 2;
const SECONDARY_EMOTIONS: usize = 2;

/// Parse and import an analysis document from JSON text.
pub fn import_analysis_json(json: &str) -> Result<PartialParameterSet, AnalyzeError> {
    let doc: Value = serde_json::from_str(json)?;
    import_analysis(&doc)
}

/// Map an analysis document onto a partial parameter set.
///
/// A top-level `recommendations` object, when present, is used instead of
/// the document root. Fields the document does not mention stay missing.
pub fn import_analysis(doc: &Value) -> Result<PartialParameterSet, AnalyzeError> {
    let root = doc
        .as_object()
        .ok_or_else(|| AnalyzeError::Import("analysis document must be a JSON object".into()))?;
    let root = match root.get("recommendations").and_then(Value::as_object) {
        Some(recommendations) => recommendations,
        None => root,
    };

    let mut set = PartialParameterSet::default();

    if let Some(traits) = root.get("personality_traits") {
        let (primary, secondary) = split_ranked(traits, PRIMARY_TRAITS, SECONDARY_TRAITS);
        set.personality.primary_traits = primary;
        set.personality.secondary_traits = secondary;
    }
    if let Some(emotions) = root.get("emotional_tone") {
        let (primary, secondary) = split_ranked(emotions, PRIMARY_EMOTIONS, SECONDARY_EMOTIONS);
        set.emotional_tone.primary_emotions = primary;
        set.emotional_tone.secondary_emotions = secondary;
    }

    let formality = section(root, "formality");
    set.formality.level = field(formality, "level");

    let vocabulary = section(root, "vocabulary");
    set.vocabulary.preferred_terms = field(vocabulary, "preferred_terms");
    set.vocabulary.restricted_terms = match field(vocabulary, "avoided_terms") {
        FieldValue::Missing => field(vocabulary, "restricted_terms"),
        avoided => avoided,
    };
    set.vocabulary.jargon_level = field(vocabulary, "jargon_level");
    set.vocabulary.technical_complexity = field(vocabulary, "technical_complexity");

    let style = section(root, "communication_style");
    set.communication_style.storytelling_preference = field(style, "storytelling_preference");
    set.communication_style.rhetorical_devices = field(style, "rhetorical_devices");
    let structure = style.and_then(|s| s.get("sentence_structure")).and_then(Value::as_object);
    set.communication_style.sentence_length_preference = field(structure, "length_preference");
    set.communication_style.sentence_complexity_preference =
        field(structure, "complexity_preference");

    Ok(set)
}

fn section<'a>(root: &'a Map<String, Value>, name: &str) -> Option<&'a Map<String, Value>> {
    root.get(name).and_then(Value::as_object)
}

fn field(section: Option<&Map<String, Value>>, name: &str) -> FieldValue {
    section
        .and_then(|s| s.get(name))
        .cloned()
        .map(FieldValue::classify)
        .unwrap_or_default()
}

/// Split a ranked map or list into (primary, secondary) lists.
fn split_ranked(value: &Value, primary: usize, secondary: usize) -> (FieldValue, FieldValue) {
    let ranked: Vec<String> = match value {
        Value::Object(map) if map.contains_key("primary") || map.contains_key("secondary") => {
            let get = |key: &str| {
                map.get(key)
                    .cloned()
                    .map(FieldValue::classify)
                    .unwrap_or_default()
            };
            return (get("primary"), get("secondary"));
        }
        Value::Object(map) => rank_by_score(map),
        Value::Array(_) => match FieldValue::classify(value.clone()) {
            FieldValue::List(items) => items,
            other => return (other, FieldValue::Missing),
        },
        other => return (FieldValue::Invalid(other.clone()), FieldValue::Missing),
    };

    let head = ranked.iter().take(primary);
    let tail = ranked.iter().skip(primary).take(secondary);
    (to_field(head), to_field(tail))
}

fn to_field<'a>(items: impl Iterator<Item = &'a String>) -> FieldValue {
    match FieldValue::list(items) {
        FieldValue::List(items) if items.is_empty() => FieldValue::Missing,
        value => value,
    }
}

/// Names ordered by descending score. Ties keep document order; non-numeric scores are dropped.
fn rank_by_score(map: &Map<String, Value>) -> Vec<String> {
    let mut scored: Vec<(&String, f64)> = map
        .iter()
        .filter_map(|(name, score)| match FieldValue::classify(score.clone()) {
            FieldValue::Scalar(s) => Some((name, s)),
            _ => {
                tracing::debug!(name = %name, "Dropping entry with non-numeric score");
                None
            }
        })
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.into_iter().map(|(name, _)| name.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn list(items: &[&str]) -> FieldValue {
        FieldValue::List(items.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_scored_maps_are_ranked() {
        let doc = json!({
            "personality_traits": {"grounded": 9, "honest": 8, "clear": 7, "witty": 6, "unafraid": 5},
            "emotional_tone": {"respectful": 7, "no_bullshit": 9, "sensual": 6, "positive_without_toxicity": 8},
        });
        let set = import_analysis(&doc).unwrap();

        assert_eq!(set.personality.primary_traits, list(&["grounded", "honest", "clear"]));
        assert_eq!(set.personality.secondary_traits, list(&["witty", "unafraid"]));
        assert_eq!(
            set.emotional_tone.primary_emotions,
            list(&["no_bullshit", "positive_without_toxicity"])
        );
        assert_eq!(set.emotional_tone.secondary_emotions, list(&["respectful", "sensual"]));
    }

    #[test]
    fn test_score_ties_keep_document_order() {
        let set = import_analysis_json(
            r#"{"personality_traits": {"zen": 5, "alert": 5, "bold": 5, "calm": 5}}"#,
        )
        .unwrap();
        assert_eq!(set.personality.primary_traits, list(&["zen", "alert", "bold"]));
        assert_eq!(set.personality.secondary_traits, list(&["calm"]));

        let set = import_analysis_json(
            r#"{"emotional_tone": {"urgent": 3, "calm": 7, "bold": 3, "warm": 7}}"#,
        )
        .unwrap();
        assert_eq!(set.emotional_tone.primary_emotions, list(&["calm", "warm"]));
        assert_eq!(set.emotional_tone.secondary_emotions, list(&["urgent", "bold"]));
    }

    #[test]
    fn test_plain_lists_and_explicit_split() {
        let doc = json!({
            "personality_traits": ["Bold", "Calm", "Warm", "Kind"],
            "emotional_tone": {"primary": ["Optimistic"], "secondary": ["Calm"]},
        });
        let set = import_analysis(&doc).unwrap();
        assert_eq!(set.personality.primary_traits, list(&["bold", "calm", "warm"]));
        assert_eq!(set.personality.secondary_traits, list(&["kind"]));
        assert_eq!(set.emotional_tone.primary_emotions, list(&["optimistic"]));
        assert_eq!(set.emotional_tone.secondary_emotions, list(&["calm"]));
    }

    #[test]
    fn test_nested_sections() {
        let set = import_analysis_json(
            r#"{
                "formality": {"level": 4},
                "vocabulary": {"preferred_terms": ["Honest", "Real"], "avoided_terms": ["Premium"]},
                "communication_style": {
                    "sentence_structure": {"length_preference": 4, "complexity_preference": "3"}
                }
            }"#,
        )
        .unwrap();

        assert_eq!(set.formality.level, FieldValue::Scalar(4.0));
        assert_eq!(set.vocabulary.preferred_terms, list(&["honest", "real"]));
        assert_eq!(set.vocabulary.restricted_terms, list(&["premium"]));
        assert_eq!(
            set.communication_style.sentence_length_preference,
            FieldValue::Scalar(4.0)
        );
        assert_eq!(
            set.communication_style.sentence_complexity_preference,
            FieldValue::Scalar(3.0)
        );
        assert!(set.personality.primary_traits.is_missing());
    }

    #[test]
    fn test_recommendations_wrapper() {
        let doc = json!({"recommendations": {"formality": {"level": 9}}, "formality": {"level": 1}});
        let set = import_analysis(&doc).unwrap();
        assert_eq!(set.formality.level, FieldValue::Scalar(9.0));
    }

    #[test]
    fn test_malformed_parts_are_kept_as_invalid() {
        let doc = json!({"personality_traits": "bold", "formality": {"level": "very"}});
        let set = import_analysis(&doc).unwrap();
        assert!(set.personality.primary_traits.is_invalid());
        assert!(set.formality.level.is_invalid());
    }

    #[test]
    fn test_non_object_document_is_rejected() {
        assert!(matches!(
            import_analysis(&json!([1, 2])),
            Err(AnalyzeError::Import(_))
        ));
    }
}
