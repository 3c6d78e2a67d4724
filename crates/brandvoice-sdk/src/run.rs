use serde_json::Value;

use brandvoice_core::error::CoreError;
use brandvoice_core::model::*;
use brandvoice_core::session::BrandSession;
use brandvoice_core::storage::SessionStorage;

/// A fluent builder for one producer run.
///
/// Collects whatever a producer extracted for a single input method, then
/// commits it as that method's latest partial parameter set.
#[derive(Debug, Clone)]
pub struct ParameterRun {
    method: Method,
    params: PartialParameterSet,
    source: Option<String>,
}

impl ParameterRun {
    /// Begin a run for an input method.
    pub fn begin(method: Method) -> Self {
        Self {
            method,
            params: PartialParameterSet::default(),
            source: None,
        }
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// Label what the run consumed (file names, URL, ...).
    pub fn source(&mut self, label: &str) -> &mut Self {
        self.source = Some(label.to_string());
        self
    }

    pub fn primary_traits(&mut self, traits: &[&str]) -> &mut Self {
        self.list(ListField::PrimaryTraits, traits)
    }

    pub fn secondary_traits(&mut self, traits: &[&str]) -> &mut Self {
        self.list(ListField::SecondaryTraits, traits)
    }

    pub fn traits_to_avoid(&mut self, traits: &[&str]) -> &mut Self {
        self.list(ListField::TraitsToAvoid, traits)
    }

    pub fn primary_emotions(&mut self, emotions: &[&str]) -> &mut Self {
        self.list(ListField::PrimaryEmotions, emotions)
    }

    pub fn secondary_emotions(&mut self, emotions: &[&str]) -> &mut Self {
        self.list(ListField::SecondaryEmotions, emotions)
    }

    pub fn emotions_to_avoid(&mut self, emotions: &[&str]) -> &mut Self {
        self.list(ListField::EmotionsToAvoid, emotions)
    }

    pub fn preferred_terms(&mut self, terms: &[&str]) -> &mut Self {
        self.list(ListField::PreferredTerms, terms)
    }

    pub fn restricted_terms(&mut self, terms: &[&str]) -> &mut Self {
        self.list(ListField::RestrictedTerms, terms)
    }

    pub fn rhetorical_devices(&mut self, devices: &[&str]) -> &mut Self {
        self.list(ListField::RhetoricalDevices, devices)
    }

    pub fn formality(&mut self, level: impl Into<f64>) -> &mut Self {
        self.level(NumericField::FormalityLevel, level)
    }

    pub fn intensity(&mut self, level: impl Into<f64>) -> &mut Self {
        self.level(NumericField::Intensity, level)
    }

    pub fn jargon(&mut self, level: impl Into<f64>) -> &mut Self {
        self.level(NumericField::JargonLevel, level)
    }

    pub fn technical_complexity(&mut self, level: impl Into<f64>) -> &mut Self {
        self.level(NumericField::TechnicalComplexity, level)
    }

    pub fn storytelling(&mut self, level: impl Into<f64>) -> &mut Self {
        self.level(NumericField::StorytellingPreference, level)
    }

    pub fn sentence_length(&mut self, level: impl Into<f64>) -> &mut Self {
        self.level(NumericField::SentenceLengthPreference, level)
    }

    pub fn sentence_complexity(&mut self, level: impl Into<f64>) -> &mut Self {
        self.level(NumericField::SentenceComplexityPreference, level)
    }

    /// Set any list field.
    pub fn list(&mut self, field: ListField, values: &[&str]) -> &mut Self {
        *field.read_mut(&mut self.params) = FieldValue::list(values);
        self
    }

    /// Set any numeric field.
    pub fn level(&mut self, field: NumericField, value: impl Into<f64>) -> &mut Self {
        *field.read_mut(&mut self.params) = FieldValue::scalar(value);
        self
    }

    /// Set a field by dotted path from raw text.
    ///
    /// The text is parsed as JSON when possible (`7`, `["bold","calm"]`),
    /// otherwise taken as a plain string, then classified like any other
    /// producer value.
    pub fn set_raw(&mut self, path: &str, raw: &str) -> Result<&mut Self, CoreError> {
        let value: Value =
            serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        let slot = self
            .params
            .field_mut(path)
            .ok_or_else(|| CoreError::UnknownField(path.to_string()))?;
        *slot = FieldValue::classify(value);
        Ok(self)
    }

    /// Copy over every field `other` carries, leaving the rest untouched.
    pub fn extend(&mut self, other: PartialParameterSet) -> &mut Self {
        let mut other = other;
        for field in ListField::ALL {
            let value = std::mem::take(field.read_mut(&mut other));
            if !value.is_missing() {
                *field.read_mut(&mut self.params) = value;
            }
        }
        for field in NumericField::ALL {
            let value = std::mem::take(field.read_mut(&mut other));
            if !value.is_missing() {
                *field.read_mut(&mut self.params) = value;
            }
        }
        self
    }

    /// The partial set collected so far.
    pub fn build(self) -> PartialParameterSet {
        self.params
    }

    /// Commit into an in-memory session. Returns the recomputed profile.
    pub fn commit(self, session: &BrandSession) -> CanonicalProfile {
        if self.params.is_empty() {
            tracing::warn!(method = %self.method, "Committing a run that carries no parameters");
        }
        session.commit_with_source(self.method, self.params, self.source)
    }

    /// Commit into the persisted session of a brand voice home.
    pub fn commit_to(self, storage: &SessionStorage) -> Result<CanonicalProfile, CoreError> {
        storage.update(|session| self.commit(session))
    }
}
