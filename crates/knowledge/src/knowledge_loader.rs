//! Knowledge Base Loader
//!
//! Loads the intent document (tag, keywords, canned response) from a local
//! YAML/JSON file or over HTTP. Tags must be unique; a document with a
//! duplicate tag is rejected as a whole.

use loan_assistant_config::KnowledgeConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use crate::KnowledgeError;

/// One answerable intent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeIntent {
    /// Unique intent tag
    pub tag: String,
    /// Keyword phrases, in document order
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Canned response returned on a match
    pub response: String,
}

/// Knowledge document file format
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KnowledgeFile {
    /// Version for format compatibility
    #[serde(default)]
    pub version: Option<String>,
    /// List of intents
    #[serde(default)]
    pub intents: Vec<KnowledgeIntent>,
}

/// Validated, immutable intent set
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    version: Option<String>,
    intents: Vec<KnowledgeIntent>,
}

impl KnowledgeBase {
    /// Empty intent set; the keyword tier never fires
    pub fn empty() -> Self {
        Self::default()
    }

    /// Validate a parsed document
    pub fn from_file(file: KnowledgeFile) -> Result<Self, KnowledgeError> {
        let mut seen = HashSet::new();
        for intent in &file.intents {
            if !seen.insert(intent.tag.as_str()) {
                return Err(KnowledgeError::DuplicateTag(intent.tag.clone()));
            }
        }

        Ok(Self {
            version: file.version,
            intents: file.intents,
        })
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn intents(&self) -> &[KnowledgeIntent] {
        &self.intents
    }

    pub fn get(&self, tag: &str) -> Option<&KnowledgeIntent> {
        self.intents.iter().find(|intent| intent.tag == tag)
    }

    pub fn len(&self) -> usize {
        self.intents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }
}

/// Knowledge loader
pub struct KnowledgeLoader;

impl KnowledgeLoader {
    /// Load a knowledge file, format chosen by extension
    pub fn load_file(path: &Path) -> Result<KnowledgeBase, KnowledgeError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            KnowledgeError::Io(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let file = match extension {
            "json" => Self::parse_json(&content)?,
            "yaml" | "yml" => Self::parse_yaml(&content)?,
            _ => return Err(KnowledgeError::UnsupportedFormat(extension.to_string())),
        };

        let base = KnowledgeBase::from_file(file)?;
        tracing::info!(
            file = %path.display(),
            intents = base.len(),
            "Loaded knowledge file"
        );
        Ok(base)
    }

    pub fn parse_json(content: &str) -> Result<KnowledgeFile, KnowledgeError> {
        serde_json::from_str(content)
            .map_err(|e| KnowledgeError::Parse(format!("JSON parse error: {}", e)))
    }

    pub fn parse_yaml(content: &str) -> Result<KnowledgeFile, KnowledgeError> {
        serde_yaml::from_str(content)
            .map_err(|e| KnowledgeError::Parse(format!("YAML parse error: {}", e)))
    }

    /// Fetch a JSON knowledge document over HTTP
    pub async fn fetch(url: &str, timeout: Duration) -> Result<KnowledgeBase, KnowledgeError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| KnowledgeError::Fetch(format!("Failed to create HTTP client: {}", e)))?;

        let response = client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;
        let base = KnowledgeBase::from_file(Self::parse_json(&body)?)?;

        tracing::info!(url = %url, intents = base.len(), "Fetched knowledge document");
        Ok(base)
    }

    /// Load from a file, or fall back to an empty set on any failure
    pub fn load_file_or_empty(path: &Path) -> KnowledgeBase {
        match Self::load_file(path) {
            Ok(base) => base,
            Err(e) => {
                tracing::warn!(
                    file = %path.display(),
                    error = %e,
                    "Failed to load knowledge file, continuing with empty intent set"
                );
                KnowledgeBase::empty()
            },
        }
    }

    /// Load the configured local file, if any
    pub fn load_configured(config: &KnowledgeConfig) -> KnowledgeBase {
        match config.path.as_deref() {
            Some(path) => Self::load_file_or_empty(Path::new(path)),
            None => {
                tracing::warn!("No knowledge path configured, continuing with empty intent set");
                KnowledgeBase::empty()
            },
        }
    }

    /// Try the configured URL first, then the local file, then empty
    pub async fn load_configured_async(config: &KnowledgeConfig) -> KnowledgeBase {
        if let Some(url) = config.url.as_deref() {
            let timeout = Duration::from_millis(config.fetch_timeout_ms);
            match Self::fetch(url, timeout).await {
                Ok(base) => return base,
                Err(e) => {
                    tracing::warn!(
                        url = %url,
                        error = %e,
                        "Failed to fetch knowledge document"
                    );
                },
            }
        }

        Self::load_configured(config)
    }
}
