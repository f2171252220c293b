//! Extension-based dispatch to a text extraction strategy.

use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use crate::config::Config;
use crate::docx;
use crate::error::CountError;

pub const DOCX_EXTENSION: &str = "docx";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    PlainText,
    MarkdownText,
    StructuredDocument,
    Unsupported,
}

impl DocumentKind {
    /// Resolves the kind from the file extension, compared case-insensitively.
    pub fn for_path(path: &Path, config: &Config) -> Self {
        let extension = path
            .extension()
            .and_then(OsStr::to_str)
            .map(str::to_lowercase);

        match extension.as_deref() {
            Some(DOCX_EXTENSION) => DocumentKind::StructuredDocument,
            Some(ext) if config.text_extensions.iter().any(|known| known == ext) => {
                DocumentKind::PlainText
            }
            Some(ext) if config.markdown_extensions.iter().any(|known| known == ext) => {
                DocumentKind::MarkdownText
            }
            _ => DocumentKind::Unsupported,
        }
    }
}

/// Human readable list of accepted extensions, e.g. `.txt, .md, and .docx`.
pub fn supported_extensions(config: &Config) -> String {
    let names: Vec<String> = config
        .text_extensions
        .iter()
        .chain(&config.markdown_extensions)
        .map(String::as_str)
        .chain([DOCX_EXTENSION])
        .map(|ext| format!(".{ext}"))
        .collect();

    match names.as_slice() {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{first} and {second}"),
        [init @ .., last] => format!("{}, and {last}", init.join(", ")),
    }
}

/// Validates `path` and returns its full text content.
pub fn extract(path: &Path, config: &Config) -> Result<String, CountError> {
    if !path.exists() {
        return Err(CountError::PathNotFound(path.to_path_buf()));
    }

    let kind = DocumentKind::for_path(path, config);
    tracing::debug!("{} resolved as {:?}", path.display(), kind);

    match kind {
        DocumentKind::PlainText | DocumentKind::MarkdownText => read_plain_text(path),
        DocumentKind::StructuredDocument => docx::extract_text(path),
        DocumentKind::Unsupported => Err(CountError::UnsupportedExtension {
            path: path.to_path_buf(),
            supported: supported_extensions(config),
        }),
    }
}

fn read_plain_text(path: &Path) -> Result<String, CountError> {
    let bytes = fs::read(path).map_err(|source| CountError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("read {} bytes from {}", bytes.len(), path.display());

    String::from_utf8(bytes).map_err(|_| CountError::Decode {
        path: path.to_path_buf(),
    })
}
