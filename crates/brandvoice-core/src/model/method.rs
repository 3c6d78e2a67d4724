use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// An input method that produces partial parameter sets.
///
/// Declaration order is the registry order: it fixes the iteration order of
/// the store and the concatenation order used by the merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    DocumentUpload,
    BrandInterview,
    WebScraper,
}

impl Method {
    /// Every known method, in registry order.
    pub const ALL: [Method; 3] = [
        Method::DocumentUpload,
        Method::BrandInterview,
        Method::WebScraper,
    ];

    /// Methods treated as authoritative, in the order they are consulted.
    pub const PRIORITY: [Method; 2] = [Method::WebScraper, Method::DocumentUpload];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DocumentUpload => "document_upload",
            Self::BrandInterview => "brand_interview",
            Self::WebScraper => "web_scraper",
        }
    }

    /// Human-readable name for status listings.
    pub fn label(&self) -> &'static str {
        match self {
            Self::DocumentUpload => "Document Upload",
            Self::BrandInterview => "Brand Interview",
            Self::WebScraper => "Web Scraper",
        }
    }

    pub fn is_priority(&self) -> bool {
        Self::PRIORITY.contains(self)
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = CoreError;

    /// Accepts the identifier with either `_` or `-` separators.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "document_upload" => Ok(Self::DocumentUpload),
            "brand_interview" => Ok(Self::BrandInterview),
            "web_scraper" => Ok(Self::WebScraper),
            _ => Err(CoreError::UnknownMethod(s.to_string())),
        }
    }
}

/// What consumers see about one method: whether it ever ran, and when.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MethodStatus {
    pub used: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_order_is_ord_order() {
        let mut sorted = Method::ALL;
        sorted.sort();
        assert_eq!(sorted, Method::ALL);
        assert!(Method::DocumentUpload < Method::WebScraper);
    }

    #[test]
    fn test_parse_accepts_dashes() {
        assert_eq!(
            "web-scraper".parse::<Method>().unwrap(),
            Method::WebScraper
        );
        assert_eq!(
            "Brand_Interview".parse::<Method>().unwrap(),
            Method::BrandInterview
        );
        assert!("newsletter".parse::<Method>().is_err());
    }

    #[test]
    fn test_priority_membership() {
        assert!(Method::WebScraper.is_priority());
        assert!(Method::DocumentUpload.is_priority());
        assert!(!Method::BrandInterview.is_priority());
    }

    #[test]
    fn test_serde_identifiers() {
        let json = serde_json::to_string(&Method::DocumentUpload).unwrap();
        assert_eq!(json, "\"document_upload\"");
        let parsed: Method = serde_json::from_str("\"web_scraper\"").unwrap();
        assert_eq!(parsed, Method::WebScraper);
    }
}
