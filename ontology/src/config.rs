//! Exporter configuration.
//!
//! Settings come from an optional TOML file; command-line flags override
//! individual fields. Every field is optional:
//!
//! ```toml
//! concepts = ["Table", "Drawer", "Door", "Handle"]
//! base_iri = "http://example.org/apartment#"
//! format = "turtle"
//! strict = true
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::concepts::{Vocabulary, DEFAULT_CONCEPTS};
use crate::error::{Error, Result};
use crate::pipeline::ExportOptions;
use crate::serializer::Format;

/// Top-level exporter configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Concept vocabulary, in matching order.
    pub concepts: Vec<String>,
    /// Namespace for generated IRIs; defaults to `file://<output>#`.
    pub base_iri: Option<String>,
    /// Output format; inferred from the output extension when unset.
    pub format: Option<Format>,
    /// Reject duplicate or unnamed joints, duplicate links and references to
    /// undeclared links instead of warning about them.
    pub strict: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            concepts: DEFAULT_CONCEPTS.iter().map(|&c| c.to_owned()).collect(),
            base_iri: None,
            format: None,
            strict: true,
        }
    }
}

impl Config {
    /// Loads a config file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and [`Error::Config`]
    /// if it is not valid config TOML.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The configured concept vocabulary.
    ///
    /// # Errors
    ///
    /// Propagates [`Vocabulary::new`] validation errors.
    pub fn vocabulary(&self) -> Result<Vocabulary> {
        Vocabulary::new(self.concepts.iter().cloned())
    }

    /// Export options derived from this config.
    #[must_use]
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            base_iri: self.base_iri.clone(),
            format: self.format,
            strict: self.strict,
        }
    }
}
