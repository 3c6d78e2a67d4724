use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use walkdir::WalkDir;

use brandvoice_core::config::BrandVoiceConfig;

use crate::error::AnalyzeError;

/// Text gathered from a set of uploaded documents.
#[derive(Debug, Clone)]
pub struct DocumentBundle {
    /// Files that were read, in the order their text appears.
    pub files: Vec<PathBuf>,
    /// Files passed over (wrong extension, too large, unreadable).
    pub skipped: Vec<PathBuf>,
    pub text: String,
    /// SHA-256 of the concatenated text, hex encoded.
    pub digest: String,
}

impl DocumentBundle {
    /// Label recorded as the source of a document-upload run.
    pub fn source_label(&self) -> String {
        let names: Vec<String> = self
            .files
            .iter()
            .map(|p| {
                p.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| p.display().to_string())
            })
            .collect();
        let short = &self.digest[..12.min(self.digest.len())];
        format!("{} (sha256:{short})", names.join(", "))
    }
}

/// Read every accepted document under `inputs`.
///
/// Directories are walked recursively in file-name order. Files with an
/// extension outside `config.document_extensions`, or larger than
/// `config.max_document_bytes`, are skipped with a warning.
pub fn collect_documents(
    inputs: &[PathBuf],
    config: &BrandVoiceConfig,
) -> Result<DocumentBundle, AnalyzeError> {
    let mut files = Vec::new();
    let mut skipped = Vec::new();
    let mut texts = Vec::new();

    for input in inputs {
        for path in candidate_files(input)? {
            match read_document(&path, config) {
                Some(text) => {
                    texts.push(text);
                    files.push(path);
                }
                None => skipped.push(path),
            }
        }
    }

    if files.is_empty() {
        let described: Vec<String> = inputs.iter().map(|p| p.display().to_string()).collect();
        return Err(AnalyzeError::NoDocuments(described.join(", ")));
    }

    let text = texts.join("\n\n");
    let digest = format!("{:x}", Sha256::digest(text.as_bytes()));
    tracing::info!(files = files.len(), skipped = skipped.len(), "Collected documents");

    Ok(DocumentBundle {
        files,
        skipped,
        text,
        digest,
    })
}

fn candidate_files(input: &Path) -> Result<Vec<PathBuf>, AnalyzeError> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    if !input.exists() {
        return Err(AnalyzeError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} does not exist", input.display()),
        )));
    }

    let mut paths = Vec::new();
    for entry in WalkDir::new(input).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() {
            paths.push(entry.into_path());
        }
    }
    Ok(paths)
}

fn read_document(path: &Path, config: &BrandVoiceConfig) -> Option<String> {
    if !config.accepts_extension(path) {
        tracing::debug!(path = %path.display(), "Skipping file with unsupported extension");
        return None;
    }

    let size = match fs::metadata(path) {
        Ok(meta) => meta.len(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable document");
            return None;
        }
    };
    if size > config.max_document_bytes {
        tracing::warn!(
            path = %path.display(),
            size,
            limit = config.max_document_bytes,
            "Skipping oversized document"
        );
        return None;
    }

    match fs::read(path) {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable document");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_collects_directory_recursively() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "b.md", "Second.");
        write(tmp.path(), "a.txt", "First.");
        write(tmp.path(), "nested/c.txt", "Third.");
        write(tmp.path(), "logo.png", "binary");

        let bundle =
            collect_documents(&[tmp.path().to_path_buf()], &BrandVoiceConfig::default()).unwrap();

        assert_eq!(bundle.files.len(), 3);
        assert_eq!(bundle.skipped.len(), 1);
        assert_eq!(bundle.text, "First.\n\nSecond.\n\nThird.");
        assert_eq!(bundle.digest.len(), 64);
    }

    #[test]
    fn test_oversized_documents_are_skipped() {
        let tmp = TempDir::new().unwrap();
        let small = write(tmp.path(), "small.txt", "ok");
        let big = write(tmp.path(), "big.txt", &"x".repeat(100));
        let config = BrandVoiceConfig {
            max_document_bytes: 10,
            ..BrandVoiceConfig::default()
        };

        let bundle = collect_documents(&[small.clone(), big.clone()], &config).unwrap();
        assert_eq!(bundle.files, vec![small]);
        assert_eq!(bundle.skipped, vec![big]);
    }

    #[test]
    fn test_nothing_readable_is_an_error() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "photo.jpg", "binary");
        let result = collect_documents(&[tmp.path().to_path_buf()], &BrandVoiceConfig::default());
        assert!(matches!(result, Err(AnalyzeError::NoDocuments(_))));
    }

    #[test]
    fn test_missing_input_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let result = collect_documents(
            &[tmp.path().join("missing")],
            &BrandVoiceConfig::default(),
        );
        assert!(matches!(result, Err(AnalyzeError::Io(_))));
    }

    #[test]
    fn test_source_label_names_files_and_digest() {
        let tmp = TempDir::new().unwrap();
        let doc = write(tmp.path(), "brand.md", "Hello.");
        let bundle = collect_documents(&[doc], &BrandVoiceConfig::default()).unwrap();
        let label = bundle.source_label();
        assert!(label.starts_with("brand.md (sha256:"));
        assert!(label.contains(&bundle.digest[..12]));
    }
}
