use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::document::DOCX_EXTENSION;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub text_extensions: Vec<String>,
    pub markdown_extensions: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    text_extensions: Option<Vec<String>>,
    markdown_extensions: Option<Vec<String>>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub extra_text_extensions: Option<Vec<String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            text_extensions: vec!["txt".to_string()],
            markdown_extensions: vec!["md".to_string()],
        }
    }
}

impl Config {
    pub fn load(config_path: Option<PathBuf>, overrides: ConfigOverrides) -> Result<Self> {
        let file_config = load_file_config(config_path.as_ref())?;
        Ok(Self::from_parts(file_config, overrides))
    }

    fn from_parts(file_config: FileConfig, overrides: ConfigOverrides) -> Self {
        let mut config = Self::default();

        for ext in file_config.text_extensions.into_iter().flatten() {
            config.add_text_extension(&ext);
        }
        for ext in file_config.markdown_extensions.into_iter().flatten() {
            config.add_markdown_extension(&ext);
        }
        for ext in overrides.extra_text_extensions.into_iter().flatten() {
            config.add_text_extension(&ext);
        }

        config
    }

    fn add_text_extension(&mut self, raw: &str) {
        if let Some(ext) = self.accept_extension(raw) {
            self.text_extensions.push(ext);
        }
    }

    fn add_markdown_extension(&mut self, raw: &str) {
        if let Some(ext) = self.accept_extension(raw) {
            self.markdown_extensions.push(ext);
        }
    }

    /// Normalizes `raw` and returns it only if it is not already mapped.
    fn accept_extension(&self, raw: &str) -> Option<String> {
        let cleaned = normalize_extension(raw)?;
        if cleaned == DOCX_EXTENSION {
            tracing::warn!("ignoring configured extension '{}': reserved for .docx", raw);
            return None;
        }
        let known = self
            .text_extensions
            .iter()
            .chain(&self.markdown_extensions)
            .any(|existing| *existing == cleaned);
        if known {
            tracing::debug!("extension '{}' already mapped", cleaned);
            return None;
        }
        Some(cleaned)
    }
}

fn normalize_extension(raw: &str) -> Option<String> {
    let cleaned = raw.trim().trim_start_matches('.').to_lowercase();
    if cleaned.is_empty() { None } else { Some(cleaned) }
}

/// Only an explicitly named file is read; there is no implicit location.
fn load_file_config(path: Option<&PathBuf>) -> Result<FileConfig> {
    let Some(path) = path else {
        return Ok(FileConfig::default());
    };
    if !path.exists() {
        anyhow::bail!("config path {:?} does not exist", path);
    }
    read_config_from_path(path)
}

fn read_config_from_path(path: &Path) -> Result<FileConfig> {
    tracing::debug!("loading config from {}", path.display());
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    toml::from_str(&raw)
        .with_context(|| format!("failed to parse config file at {}", path.display()))
}
