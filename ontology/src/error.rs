//! Error type shared by every stage of the exporter.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::graph::GraphIssue;

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that can stop an export.
#[derive(Debug, Error)]
pub enum Error {
    /// The input document could not be read from disk.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The input is not well-formed XML.
    #[error("malformed URDF document: {0}")]
    Parse(#[from] roxmltree::Error),

    /// Strict validation found structural problems in the kinematic graph.
    #[error("URDF graph failed validation ({} issue(s)): {}", .issues.len(), summarize(.issues))]
    InvalidGraph {
        /// Every issue found, in document order.
        issues: Vec<GraphIssue>,
    },

    /// A concept vocabulary entry was the empty string.
    #[error("concept names must not be empty")]
    EmptyConcept,

    /// Two vocabulary entries differ only by case.
    #[error("concept {0:?} is listed more than once (names are compared case-insensitively)")]
    DuplicateConcept(String),

    /// The base IRI, with its `#` separator, is not an absolute IRI.
    #[error("base IRI {0:?} is not an absolute IRI (spaces, <, >, \" and braces must be percent-encoded)")]
    InvalidBaseIri(String),

    /// An output format name was not recognised.
    #[error("unknown output format {0:?} (expected rdfxml, turtle, ntriples or jsonld)")]
    UnknownFormat(String),

    /// The exporter config file could not be read or parsed.
    #[error("invalid config {}: {source}", .path.display())]
    Config {
        /// Config file path.
        path: PathBuf,
        /// TOML decoding failure.
        #[source]
        source: toml::de::Error,
    },

    /// JSON-LD rendering failed.
    #[error("failed to render JSON-LD: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The output file could not be written. No partial file is left behind.
    #[error("failed to write {}: {source}", .path.display())]
    Persist {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

fn summarize(issues: &[GraphIssue]) -> String {
    const SHOWN: usize = 3;
    let mut parts: Vec<String> = issues.iter().take(SHOWN).map(ToString::to_string).collect();
    if issues.len() > SHOWN {
        parts.push(format!("and {} more", issues.len() - SHOWN));
    }
    parts.join("; ")
}
