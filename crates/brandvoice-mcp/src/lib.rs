use std::path::PathBuf;

use rmcp::model::{ServerCapabilities, ServerInfo};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    tool, tool_handler, tool_router, ServerHandler,
};
use schemars::JsonSchema;
use serde::Deserialize;

use brandvoice_core::adjust::Adjustment;
use brandvoice_core::model::{Method, PartialParameterSet};
use brandvoice_core::storage::SessionStorage;

/// MCP server exposing the brand voice profile of one home directory.
///
/// Every tool call reloads the session from disk, so commits made by the CLI
/// or another server are visible immediately.
#[derive(Debug, Clone)]
pub struct BrandVoiceMcpServer {
    storage: SessionStorage,
    tool_router: ToolRouter<Self>,
}

impl BrandVoiceMcpServer {
    /// Create a new MCP server for the brand voice home at the given path.
    pub fn new(home: PathBuf) -> Self {
        Self {
            storage: SessionStorage::open(home),
            tool_router: Self::tool_router(),
        }
    }
}

// -- Tool parameter structs --

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ProfileParams {
    /// "markdown" (default) or "json" (the nested export document)
    pub format: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CommitParams {
    /// Input method: document_upload, brand_interview or web_scraper
    pub method: String,
    /// Partial parameter set, e.g. {"personality": {"primary_traits": ["bold"]}, "formality": {"level": 7}}
    pub params: serde_json::Value,
    /// What the run consumed (file names, URL); shown in status
    pub source: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct AdjustParams {
    /// Profile field path, e.g. "formality.level", "personality.primary_traits" or "communication_style.cta_style"
    pub path: String,
    /// New value (a level from 1 to 10, a list of terms, or text). Omit to remove the hand edit.
    pub value: Option<serde_json::Value>,
}

// -- Tool implementations --

#[tool_router]
impl BrandVoiceMcpServer {
    #[tool(
        description = "Get the current canonical brand voice profile: traits, emotions, formality, vocabulary and communication style."
    )]
    fn brand_profile(
        &self,
        Parameters(params): Parameters<ProfileParams>,
    ) -> Result<String, String> {
        let session = self
            .storage
            .load()
            .map_err(|e| format!("Failed to load session: {e}"))?;
        let profile = session.get_profile();

        match params.format.as_deref().unwrap_or("markdown") {
            "json" => serde_json::to_string_pretty(&profile)
                .map_err(|e| format!("Failed to serialize profile: {e}")),
            "markdown" | "md" | "text" => Ok(profile.to_markdown()),
            other => Err(format!("Unknown format '{other}' (expected markdown or json)")),
        }
    }

    #[tool(description = "Show which input methods have been completed, when, and from what source.")]
    fn brand_status(&self) -> Result<String, String> {
        let session = self
            .storage
            .load()
            .map_err(|e| format!("Failed to load session: {e}"))?;

        let mut out = format!("Session {}\n\n", session.id().short());
        for (method, status) in session.get_method_status() {
            let mark = if status.used { "x" } else { " " };
            out.push_str(&format!("[{mark}] {} ({method})", method.label()));
            if let Some(at) = status.updated_at {
                out.push_str(&format!(" {}", at.format("%Y-%m-%d %H:%M")));
            }
            if let Some(source) = &status.source {
                out.push_str(&format!(" from {source}"));
            }
            out.push('\n');
        }
        let adjustments = session.adjustments();
        if !adjustments.is_empty() {
            out.push_str("\nAdjusted by hand:\n");
            for (path, adjustment) in adjustments.iter() {
                let value = serde_json::to_string(adjustment).unwrap_or_default();
                out.push_str(&format!("- {path} = {value}\n"));
            }
        }
        Ok(out)
    }

    #[tool(
        description = "Generate a short piece of example marketing copy in the current brand voice."
    )]
    fn brand_example_copy(&self) -> Result<String, String> {
        let session = self
            .storage
            .load()
            .map_err(|e| format!("Failed to load session: {e}"))?;
        Ok(session.render_example_copy())
    }

    #[tool(
        description = "Commit a partial parameter set for one input method. Replaces that method's previous run and returns the recomputed profile."
    )]
    fn brand_commit(&self, Parameters(params): Parameters<CommitParams>) -> Result<String, String> {
        let method: Method = params.method.parse().map_err(|e| format!("{e}"))?;
        let set: PartialParameterSet = serde_json::from_value(params.params)
            .map_err(|e| format!("Invalid parameter set: {e}"))?;

        let profile = self
            .storage
            .update(|session| session.commit_with_source(method, set, params.source))
            .map_err(|e| format!("Failed to commit: {e}"))?;

        tracing::info!(%method, "Committed parameters over MCP");
        Ok(format!(
            "Committed {method}.\n\n{}",
            profile.to_markdown()
        ))
    }

    #[tool(
        description = "Pin one profile field to a hand-chosen value that later commits do not overwrite, or remove that edit by omitting the value. Also sets fields no input method produces: formality.context_variations, communication_style.cta_style and the audience_adaptation notes."
    )]
    fn brand_adjust(&self, Parameters(params): Parameters<AdjustParams>) -> Result<String, String> {
        let path = params.path.trim();
        let Some(value) = params.value else {
            let removed = self
                .storage
                .update(|session| session.clear_adjustment(path))
                .map_err(|e| format!("Failed to update session: {e}"))?;
            return Ok(if removed {
                format!("Cleared adjustment of {path}.")
            } else {
                format!("No adjustment of {path}.")
            });
        };

        let adjustment = Adjustment::from_value(path, value).map_err(|e| e.to_string())?;
        let profile = self
            .storage
            .update(|session| session.adjust(path, adjustment))
            .map_err(|e| format!("Failed to update session: {e}"))?
            .map_err(|e| e.to_string())?;

        Ok(format!("Adjusted {path}.\n\n{}", profile.to_markdown()))
    }

    #[tool(
        description = "Explain how the profile was merged: per-field value counts, selected values, defaults used, priority-source overrides and averaged levels."
    )]
    fn brand_explain(&self) -> Result<String, String> {
        let session = self
            .storage
            .load()
            .map_err(|e| format!("Failed to load session: {e}"))?;
        Ok(session.explain().to_markdown())
    }
}

#[tool_handler]
impl ServerHandler for BrandVoiceMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Brand Voice MCP Server - Read and extend a merged brand voice profile. \
                 Use brand_profile before writing copy; commit new findings with brand_commit."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Start the MCP server on stdio transport.
pub async fn run_stdio(home: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    use rmcp::transport::stdio;
    use rmcp::ServiceExt;

    let server = BrandVoiceMcpServer::new(home);
    let service = server.serve(stdio()).await?;
    service.waiting().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn server() -> (TempDir, BrandVoiceMcpServer) {
        let tmp = TempDir::new().unwrap();
        SessionStorage::open(tmp.path()).init().unwrap();
        let server = BrandVoiceMcpServer::new(tmp.path().to_path_buf());
        (tmp, server)
    }

    #[test]
    fn test_commit_then_profile() {
        let (_tmp, server) = server();
        let out = server
            .brand_commit(Parameters(CommitParams {
                method: "web_scraper".into(),
                params: json!({"personality": {"primary_traits": ["Grounded"]}}),
                source: Some("https://example.com".into()),
            }))
            .unwrap();
        assert!(out.starts_with("Committed web_scraper."));

        let json = server
            .brand_profile(Parameters(ProfileParams {
                format: Some("json".into()),
            }))
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["personality"]["primary_traits"], json!(["grounded"]));

        let status = server.brand_status().unwrap();
        assert!(status.contains("[x] Web Scraper (web_scraper)"));
        assert!(status.contains("from https://example.com"));
        assert!(status.contains("[ ] Brand Interview (brand_interview)"));
    }

    #[test]
    fn test_commit_keeps_valid_fields_beside_malformed_section() {
        let (_tmp, server) = server();
        server
            .brand_commit(Parameters(CommitParams {
                method: "document_upload".into(),
                params: json!({"personality": {"primary_traits": ["Bold"]}, "formality": 7}),
                source: None,
            }))
            .unwrap();

        let json = server
            .brand_profile(Parameters(ProfileParams {
                format: Some("json".into()),
            }))
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["personality"]["primary_traits"], json!(["bold"]));
        assert_eq!(value["formality"]["level"], 5);
    }

    #[test]
    fn test_adjust_then_clear() {
        let (_tmp, server) = server();
        server
            .brand_commit(Parameters(CommitParams {
                method: "brand_interview".into(),
                params: json!({"formality": {"level": 8}}),
                source: None,
            }))
            .unwrap();
        let out = server
            .brand_adjust(Parameters(AdjustParams {
                path: "audience_adaptation.audience_segments".into(),
                value: Some(json!("Founders of small studios")),
            }))
            .unwrap();
        assert!(out.contains("Audience Adaptation"));
        server
            .brand_adjust(Parameters(AdjustParams {
                path: "formality.level".into(),
                value: Some(json!(4)),
            }))
            .unwrap();

        let profile = |server: &BrandVoiceMcpServer| -> serde_json::Value {
            let json = server
                .brand_profile(Parameters(ProfileParams {
                    format: Some("json".into()),
                }))
                .unwrap();
            serde_json::from_str(&json).unwrap()
        };
        let value = profile(&server);
        assert_eq!(value["formality"]["level"], 4);
        assert_eq!(
            value["audience_adaptation"]["audience_segments"]["general"],
            "Founders of small studios"
        );
        assert!(server.brand_status().unwrap().contains("formality.level = 4"));

        let out = server
            .brand_adjust(Parameters(AdjustParams {
                path: "formality.level".into(),
                value: None,
            }))
            .unwrap();
        assert!(out.contains("Cleared"));
        assert_eq!(profile(&server)["formality"]["level"], 8);
    }

    #[test]
    fn test_adjust_rejects_bad_value() {
        let (_tmp, server) = server();
        let err = server
            .brand_adjust(Parameters(AdjustParams {
                path: "formality.level".into(),
                value: Some(json!(["loud"])),
            }))
            .unwrap_err();
        assert!(err.contains("formality.level"));
    }

    #[test]
    fn test_commit_rejects_unknown_method() {
        let (_tmp, server) = server();
        let err = server
            .brand_commit(Parameters(CommitParams {
                method: "telepathy".into(),
                params: json!({}),
                source: None,
            }))
            .unwrap_err();
        assert!(err.contains("telepathy"));
    }

    #[test]
    fn test_example_copy_before_and_after_commit() {
        let (_tmp, server) = server();
        assert_eq!(
            server.brand_example_copy().unwrap(),
            brandvoice_core::render::NO_DATA_MESSAGE
        );

        server
            .brand_commit(Parameters(CommitParams {
                method: "brand_interview".into(),
                params: json!({
                    "personality": {"primary_traits": ["playful"]},
                    "emotional_tone": {"primary_emotions": ["optimistic"]},
                    "formality": {"level": 2}
                }),
                source: None,
            }))
            .unwrap();
        assert!(server
            .brand_example_copy()
            .unwrap()
            .starts_with("Let's have some fun with this!"));
    }

    #[test]
    fn test_explain_and_bad_format() {
        let (_tmp, server) = server();
        assert!(server.brand_explain().unwrap().starts_with("# Merge Report"));
        assert!(server
            .brand_profile(Parameters(ProfileParams {
                format: Some("yaml".into()),
            }))
            .is_err());
    }

    #[test]
    fn test_uninitialized_home_reports_error() {
        let tmp = TempDir::new().unwrap();
        let server = BrandVoiceMcpServer::new(tmp.path().join("missing"));
        let err = server.brand_status().unwrap_err();
        assert!(err.contains("not initialized"));
    }
}
