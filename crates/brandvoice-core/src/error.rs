use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Unknown input method: {0} (expected document_upload, brand_interview or web_scraper)")]
    UnknownMethod(String),

    #[error("Unknown parameter field: {0}")]
    UnknownField(String),

    #[error("Invalid value for {path}: {reason}")]
    InvalidAdjustment { path: String, reason: String },

    #[error("Brand voice home not initialized (run `brandvoice init`)")]
    NotInitialized,

    #[error("Invalid session file: {0}")]
    InvalidSession(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid session ID: {0}")]
    InvalidId(String),
}
