//! Template catalog for storing and looking up meme templates

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of caption slots assumed when a template does not declare one
pub const DEFAULT_LINE_COUNT: usize = 2;

/// Catalog shipped with the crate
const BUNDLED_CATALOG: &str = include_str!("../../data/templates.json");

/// Errors that can occur while loading or resolving against a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog holds no templates
    #[error("template catalog is empty")]
    Empty,

    /// Configured fixed fallback id is not in the catalog
    #[error("fallback template not found in catalog: {id}")]
    UnknownFallback { id: String },

    /// Configured fallback pool matches nothing in the catalog
    #[error("fallback pool is empty: none of [{}] are in the catalog", ids.join(", "))]
    EmptyFallbackPool { ids: Vec<String> },

    /// Error reading the catalog file
    #[error("error reading template catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Catalog JSON is malformed
    #[error("failed to parse template catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A meme image layout with a fixed number of caption slots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    /// Unique key, used in the image path
    pub id: String,
    /// Human readable name
    pub name: String,
    /// Declared caption slot count
    #[serde(rename = "lines", default, skip_serializing_if = "Option::is_none")]
    pub line_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    /// Sample captions showing typical usage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<TemplateExample>,
    /// URL of the uncaptioned image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blank: Option<String>,
    /// Where the meme originates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Example captions attached to a catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateExample {
    #[serde(default)]
    pub text: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Template {
    /// Create a template with an explicit slot count and no extra metadata
    pub fn new(id: impl Into<String>, name: impl Into<String>, line_count: usize) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            line_count: Some(line_count),
            keywords: Vec::new(),
            example: None,
            blank: None,
            source: None,
        }
    }

    /// Number of caption lines this template takes
    pub fn required_line_count(&self) -> usize {
        self.line_count.unwrap_or(DEFAULT_LINE_COUNT)
    }

    /// Example captions, empty when the catalog has none
    pub fn example_lines(&self) -> &[String] {
        self.example
            .as_ref()
            .map(|e| e.text.as_slice())
            .unwrap_or_default()
    }

    /// Set the keywords
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Set the example captions
    pub fn with_example_lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.example = Some(TemplateExample {
            text: lines.into_iter().map(Into::into).collect(),
            url: None,
        });
        self
    }
}

/// Read-only, ordered collection of templates
///
/// Lookups are by exact id. When the same id appears more than once the
/// first entry wins; duplicates are logged when the catalog is built.
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    templates: Vec<Template>,
}

impl TemplateCatalog {
    /// Build a catalog from templates in iteration order
    pub fn new(templates: Vec<Template>) -> Self {
        let mut seen = HashSet::new();
        for template in &templates {
            if !seen.insert(template.id.as_str()) {
                warn!(
                    "duplicate template id '{}' in catalog; the first entry wins",
                    template.id
                );
            }
        }
        Self { templates }
    }

    /// Load the catalog shipped with the crate
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json_str(BUNDLED_CATALOG)
    }

    /// Load a catalog from a memegen-style `templates.json` file
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Load a catalog from a JSON array of templates
    ///
    /// An empty array is rejected.
    pub fn from_json_str(content: &str) -> Result<Self, CatalogError> {
        let templates: Vec<Template> = serde_json::from_str(content)?;
        if templates.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self::new(templates))
    }

    /// Get a template by id
    pub fn get(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Check if a template exists
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// All templates in catalog order
    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    /// Get all template ids in catalog order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.templates.iter().map(|t| t.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl FromIterator<Template> for TemplateCatalog {
    fn from_iter<I: IntoIterator<Item = Template>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
