pub mod field;
pub mod method;
pub mod params;
pub mod profile;
pub mod value;

pub use field::{ListField, NumericField};
pub use method::{Method, MethodStatus};
pub use params::{
    CommunicationStyleParams, EmotionalToneParams, FormalityParams, PartialParameterSet,
    PersonalityParams, VocabularyParams,
};
pub use profile::{
    AudienceAdaptation, CanonicalProfile, CommunicationStyle, EmotionalTone, Formality,
    Personality, Vocabulary, DEFAULT_LEVEL,
};
pub use value::{normalize_term, FieldValue};
