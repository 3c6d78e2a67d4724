//! Fluent Rust SDK for producers of brand voice parameters.
//!
//! # Example
//! ```no_run
//! use brandvoice_sdk::{Method, ParameterRun, SessionStorage};
//!
//! let storage = SessionStorage::discover().unwrap();
//! let mut run = ParameterRun::begin(Method::WebScraper);
//! run.primary_traits(&["bold", "honest"])
//!     .primary_emotions(&["calm"])
//!     .formality(4)
//!     .source("https://example.com");
//! let profile = run.commit_to(&storage).unwrap();
//! println!("Lead trait: {}", profile.personality.primary_traits[0]);
//! ```

mod run;

pub use run::ParameterRun;

// Re-export core types that SDK users may need
pub use brandvoice_core::model::{
    CanonicalProfile, FieldValue, ListField, Method, NumericField, PartialParameterSet,
};
pub use brandvoice_core::session::BrandSession;
pub use brandvoice_core::storage::SessionStorage;
