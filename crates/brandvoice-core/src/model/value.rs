use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One field of a partial parameter set, classified at the producer boundary.
///
/// Producers hand over whatever they extracted; the merge only folds in
/// `List` for list fields and `Scalar` for numeric fields. Everything else
/// counts as "contributed nothing".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum FieldValue {
    #[default]
    Missing,
    Scalar(f64),
    List(Vec<String>),
    Invalid(Value),
}

impl FieldValue {
    /// Build a list value, lower-casing and trimming each entry and dropping empties.
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::List(
            items
                .into_iter()
                .filter_map(|s| normalize_term(s.as_ref()))
                .collect(),
        )
    }

    /// Build a numeric value. Non-finite input is kept as `Invalid`.
    pub fn scalar(value: impl Into<f64>) -> Self {
        let value = value.into();
        if value.is_finite() {
            Self::Scalar(value)
        } else {
            Self::Invalid(Value::String(value.to_string()))
        }
    }

    /// Classify an arbitrary JSON value.
    ///
    /// - `null` or a blank string is `Missing`
    /// - a finite number, or a string that parses as one, is `Scalar`
    /// - an array made only of strings is `List` (normalized)
    /// - anything else is `Invalid`
    pub fn classify(value: Value) -> Self {
        match value {
            Value::Null => Self::Missing,
            Value::Number(ref n) => match n.as_f64() {
                Some(f) if f.is_finite() => Self::Scalar(f),
                _ => Self::Invalid(value),
            },
            Value::String(ref s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Self::Missing;
                }
                match trimmed.parse::<f64>() {
                    Ok(f) if f.is_finite() => Self::Scalar(f),
                    _ => Self::Invalid(value),
                }
            }
            Value::Array(ref items) => {
                if items.iter().all(Value::is_string) {
                    Self::list(items.iter().filter_map(Value::as_str))
                } else {
                    Self::Invalid(value)
                }
            }
            Value::Bool(_) | Value::Object(_) => Self::Invalid(value),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }

    /// The list contribution, if this field holds a well-formed list.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// The numeric contribution, if this field holds a well-formed number.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        Self::classify(value)
    }
}

impl From<FieldValue> for Value {
    fn from(field: FieldValue) -> Self {
        match field {
            FieldValue::Missing => Value::Null,
            FieldValue::Scalar(v) => {
                if v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
                    Value::from(v as i64)
                } else {
                    serde_json::Number::from_f64(v)
                        .map(Value::Number)
                        .unwrap_or(Value::Null)
                }
            }
            FieldValue::List(items) => Value::from(items),
            FieldValue::Invalid(raw) => raw,
        }
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        Self::Scalar(v as f64)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        Self::list(items)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(items: Vec<&str>) -> Self {
        Self::list(items)
    }
}

/// Lower-case and trim a producer term. Blank terms yield `None`.
pub fn normalize_term(term: &str) -> Option<String> {
    let trimmed = term.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_variants() {
        assert_eq!(FieldValue::classify(json!(null)), FieldValue::Missing);
        assert_eq!(FieldValue::classify(json!("  ")), FieldValue::Missing);
        assert_eq!(FieldValue::classify(json!(7)), FieldValue::Scalar(7.0));
        assert_eq!(FieldValue::classify(json!("8")), FieldValue::Scalar(8.0));
        assert_eq!(
            FieldValue::classify(json!(["Bold", " calm ", ""])),
            FieldValue::List(vec!["bold".into(), "calm".into()])
        );
        assert!(FieldValue::classify(json!("very formal")).is_invalid());
        assert!(FieldValue::classify(json!(true)).is_invalid());
        assert!(FieldValue::classify(json!({"bold": 9})).is_invalid());
        assert!(FieldValue::classify(json!(["bold", 3])).is_invalid());
    }

    #[test]
    fn test_accessors_are_type_checked() {
        let list = FieldValue::list(["witty"]);
        assert_eq!(list.as_list(), Some(&["witty".to_string()][..]));
        assert_eq!(list.as_scalar(), None);

        let num = FieldValue::scalar(4);
        assert_eq!(num.as_scalar(), Some(4.0));
        assert_eq!(num.as_list(), None);

        assert!(FieldValue::scalar(f64::NAN).is_invalid());
    }

    #[test]
    fn test_invalid_survives_serialization() {
        let field = FieldValue::classify(json!([1, 2]));
        let value: Value = field.clone().into();
        assert_eq!(value, json!([1, 2]));
        assert_eq!(FieldValue::classify(value), field);
    }

    #[test]
    fn test_integral_scalars_serialize_as_integers() {
        let value: Value = FieldValue::scalar(6).into();
        assert_eq!(value, json!(6));
        let value: Value = FieldValue::scalar(6.5).into();
        assert_eq!(value, json!(6.5));
    }
}
