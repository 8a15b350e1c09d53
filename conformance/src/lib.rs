//! Conformance checks for exported URDF ontologies.
//!
//! Re-reads an artifact written by `urdf-ontology` and validates it the way a
//! downstream consumer would see it.
//!
//! # Conformance Scope
//!
//! | Check | Standard |
//! |-------|----------|
//! | Syntax | RDF/XML (well-formed XML), Turtle 1.1, N-Triples, JSON-LD 1.1 |
//! | Structure | OWL 2 declarations of the link/joint TBox |
//! | Inventory | every link, joint and link relation of the source URDF |
//!
//! # Entry Point
//!
//! ```no_run
//! use urdf_ontology_conformance::{run_all, ArtifactPaths};
//! use std::path::PathBuf;
//!
//! let paths = ArtifactPaths {
//!     artifact: PathBuf::from("robot.owl"),
//!     source: Some(PathBuf::from("robot.urdf")),
//!     format: None,
//!     base_iri: None,
//! };
//! let report = run_all(&paths)?;
//! assert!(report.all_passed());
//! # Ok::<(), anyhow::Error>(())
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod graph;
pub mod report;
pub mod validators;

use std::path::PathBuf;

use urdf_ontology::pipeline::resolve_format;
use urdf_ontology::Format;

pub use graph::ArtifactGraph;
pub use report::{ConformanceReport, Finding, Severity, Stage, StageLog};

/// What to check.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    /// The exported ontology.
    pub artifact: PathBuf,
    /// The URDF it was exported from; enables the inventory check.
    pub source: Option<PathBuf>,
    /// Artifact format; inferred from the extension when `None`.
    pub format: Option<Format>,
    /// Namespace used at export time; read from the artifact's
    /// `owl:Ontology` header when `None`.
    pub base_iri: Option<String>,
}

/// Runs every [`Stage`] in order and returns the report.
///
/// 1. Syntax: the artifact parses in its format
/// 2. Structure: header, structural classes and properties
/// 3. Inventory: individuals and relations of the source URDF
///
/// When the artifact does not parse, structure and inventory are skipped.
/// When its namespace cannot be determined, inventory is skipped. Without a
/// source URDF, inventory is skipped.
///
/// # Errors
///
/// Returns an error only if a file cannot be read or the source URDF is
/// malformed.
pub fn run_all(paths: &ArtifactPaths) -> anyhow::Result<ConformanceReport> {
    let mut report = ConformanceReport::new(&paths.artifact);
    let format = resolve_format(&paths.artifact, paths.format);

    let Some(graph) = validators::syntax::validate(&paths.artifact, format, &mut report)? else {
        report.skip(Stage::Structure, "artifact did not parse");
        report.skip(Stage::Inventory, "artifact did not parse");
        return Ok(report);
    };

    let Some(namespace) = validators::namespace(&graph, paths.base_iri.as_deref()) else {
        report.stage(Stage::Structure).fail(
            "Cannot determine the ontology namespace: expected exactly one owl:Ontology header \
             (pass a base IRI to override)",
            Vec::new(),
        );
        report.skip(Stage::Inventory, "ontology namespace unknown");
        return Ok(report);
    };
    tracing::debug!(%namespace, "checking artifact");

    validators::structure::validate(&graph, &namespace, &mut report);

    match &paths.source {
        Some(source) => validators::inventory::validate(&graph, source, &namespace, &mut report)?,
        None => report.skip(Stage::Inventory, "no source URDF given"),
    }

    Ok(report)
}
