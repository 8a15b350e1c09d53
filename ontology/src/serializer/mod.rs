//! Serializers for the robot ontology.
//!
//! Four formats are supported:
//! - **RDF/XML** ([`rdfxml`]): the default; what OWL tooling such as Protégé opens directly
//! - **Turtle** ([`turtle`]): compact and readable
//! - **N-Triples** ([`ntriples`]): one triple per line, diff-friendly
//! - **JSON-LD** ([`jsonld`]): for JSON tooling

pub mod jsonld;
pub mod ntriples;
pub mod rdfxml;
pub mod turtle;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::Ontology;

/// Output serialization format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// RDF/XML.
    #[default]
    RdfXml,
    /// Turtle 1.1.
    Turtle,
    /// N-Triples.
    NTriples,
    /// JSON-LD 1.1.
    JsonLd,
}

impl Format {
    /// Guesses the format from a file extension: `owl`/`rdf`/`xml`, `ttl`,
    /// `nt`, `jsonld`/`json`.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "owl" | "rdf" | "xml" => Some(Format::RdfXml),
            "ttl" => Some(Format::Turtle),
            "nt" => Some(Format::NTriples),
            "jsonld" | "json" => Some(Format::JsonLd),
            _ => None,
        }
    }

    /// Canonical name, as accepted by [`FromStr`] and the config file.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Format::RdfXml => "rdfxml",
            Format::Turtle => "turtle",
            Format::NTriples => "ntriples",
            Format::JsonLd => "jsonld",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "rdfxml" | "rdf/xml" | "rdf" | "owl" | "xml" => Ok(Format::RdfXml),
            "turtle" | "ttl" => Ok(Format::Turtle),
            "ntriples" | "n-triples" | "nt" => Ok(Format::NTriples),
            "jsonld" | "json-ld" | "json" => Ok(Format::JsonLd),
            _ => Err(Error::UnknownFormat(s.to_owned())),
        }
    }
}

/// Renders `ontology` in `format`.
///
/// # Errors
///
/// Returns [`Error::Serialize`] if JSON-LD pretty-printing fails; the text
/// formats are infallible.
pub fn serialize(ontology: &Ontology, format: Format) -> Result<String> {
    Ok(match format {
        Format::RdfXml => rdfxml::to_rdf_xml(ontology),
        Format::Turtle => turtle::to_turtle(ontology),
        Format::NTriples => ntriples::to_ntriples(ontology),
        Format::JsonLd => serde_json::to_string_pretty(&jsonld::to_json_ld(ontology))?,
    })
}
