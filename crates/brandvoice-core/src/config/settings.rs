use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const CONFIG_FILE: &str = "config.json";

const DEFAULT_MAX_DOCUMENT_BYTES: u64 = 5 * 1024 * 1024;
const DEFAULT_PREFERRED_TERMS_PER_RUN: usize = 20;

fn default_document_extensions() -> Vec<String> {
    vec!["txt".into(), "md".into()]
}

fn default_max_document_bytes() -> u64 {
    DEFAULT_MAX_DOCUMENT_BYTES
}

fn default_preferred_terms_per_run() -> usize {
    DEFAULT_PREFERRED_TERMS_PER_RUN
}

/// Settings stored as `config.json` in the brand voice home.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandVoiceConfig {
    #[serde(default)]
    pub enabled: bool,
    /// File extensions (without the dot) accepted by document collection.
    #[serde(default = "default_document_extensions")]
    pub document_extensions: Vec<String>,
    /// Documents larger than this are skipped.
    #[serde(default = "default_max_document_bytes")]
    pub max_document_bytes: u64,
    /// How many frequent words the keyword analyzer emits as preferred terms.
    #[serde(default = "default_preferred_terms_per_run")]
    pub preferred_terms_per_run: usize,
}

impl Default for BrandVoiceConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            document_extensions: default_document_extensions(),
            max_document_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
            preferred_terms_per_run: DEFAULT_PREFERRED_TERMS_PER_RUN,
        }
    }
}

impl BrandVoiceConfig {
    /// Read `config.json` from `home`. A missing file yields the defaults.
    pub fn load(home: &Path) -> Result<Self, CoreError> {
        let path = home.join(CONFIG_FILE);
        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&data)
            .map_err(|e| CoreError::Config(format!("{}: {e}", path.display())))
    }

    /// Write `config.json` into `home`.
    pub fn save(&self, home: &Path) -> Result<(), CoreError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| CoreError::Config(format!("Failed to serialize config: {e}")))?;
        fs::write(home.join(CONFIG_FILE), json)?;
        Ok(())
    }

    /// Default config for `brandvoice init`.
    pub fn default_init() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }

    /// Whether `path` has one of the configured document extensions.
    pub fn accepts_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| {
                self.document_extensions
                    .iter()
                    .any(|allowed| allowed.trim_start_matches('.').eq_ignore_ascii_case(ext))
            })
    }
}
