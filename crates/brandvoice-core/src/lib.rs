//! Brand voice parameter merging.
//!
//! Producers (document analysis, a brand interview, a web scraper) each commit
//! a partial parameter set per input method. The merge engine combines the
//! latest set of every method into one [`CanonicalProfile`], which drives the
//! example-copy renderer.

pub mod adjust;
pub mod config;
pub mod error;
pub mod merge;
pub mod model;
pub mod render;
pub mod session;
pub mod storage;
pub mod store;

pub use adjust::{Adjustment, ProfileAdjustments};
pub use config::BrandVoiceConfig;
pub use error::CoreError;
pub use merge::{explain, recompute, MergeReport};
pub use model::{CanonicalProfile, FieldValue, Method, MethodStatus, PartialParameterSet};
pub use session::{BrandSession, SessionId, SessionSnapshot};
pub use storage::SessionStorage;
pub use store::ParameterStore;
