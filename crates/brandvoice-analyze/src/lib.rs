//! Producers of partial parameter sets.
//!
//! Each module turns one kind of raw input (interview answers, an external
//! analysis document, plain text) into a [`PartialParameterSet`] ready to be
//! committed under its input method.
//!
//! [`PartialParameterSet`]: brandvoice_core::PartialParameterSet

pub mod documents;
pub mod error;
pub mod external;
pub mod interview;
pub mod text;

pub use documents::{collect_documents, DocumentBundle};
pub use error::AnalyzeError;
pub use external::{import_analysis, import_analysis_json};
pub use interview::{InterviewResponses, SECTIONS};
pub use text::{analyze_text, TextAnalysis};
