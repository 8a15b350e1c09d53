//! Artifact syntax validator.
//!
//! Parses the artifact with the reader for its format: Turtle and N-Triples
//! through `sophia_turtle`, RDF/XML through `roxmltree`, JSON-LD through
//! `serde_json`. A successful parse yields the [`ArtifactGraph`] the other
//! validators run on.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;
use urdf_ontology::Format;

use crate::graph::ArtifactGraph;
use crate::report::{ConformanceReport, Stage, StageLog};

/// Parses `artifact` as `format`, recording the outcome under
/// [`Stage::Syntax`].
///
/// Returns `None` when the artifact is missing, unparseable, or empty.
///
/// # Errors
///
/// Returns an error if the artifact exists but cannot be read.
pub fn validate(
    artifact: &Path,
    format: Format,
    report: &mut ConformanceReport,
) -> Result<Option<ArtifactGraph>> {
    let mut log = report.stage(Stage::Syntax);
    if !artifact.exists() {
        log.fail(format!("{} not found", artifact.display()), Vec::new());
        return Ok(None);
    }

    let text = std::fs::read_to_string(artifact)
        .with_context(|| format!("Failed to read {}", artifact.display()))?;

    let parsed = match format {
        Format::RdfXml => ArtifactGraph::from_rdf_xml(&text),
        Format::Turtle => ArtifactGraph::from_turtle(&text),
        Format::NTriples => ArtifactGraph::from_ntriples(&text),
        Format::JsonLd => ArtifactGraph::from_json_ld(&text),
    };

    let graph = match parsed {
        Ok(graph) => graph,
        Err(e) => {
            log.fail(
                format!("{} is not valid {format}", artifact.display()),
                vec![format!("{e:#}")],
            );
            return Ok(None);
        }
    };
    debug!(statements = graph.len(), %format, "parsed artifact");

    if graph.is_empty() {
        log.fail(
            format!("{} asserts no statements", artifact.display()),
            Vec::new(),
        );
        return Ok(None);
    }

    if format == Format::NTriples {
        check_line_per_statement(&text, &graph, &mut log);
    }

    log.pass(format!(
        "{} is valid {format} ({} statements, {} bytes)",
        artifact.display(),
        graph.len(),
        text.len()
    ));
    Ok(Some(graph))
}

/// The exporter writes each N-Triples statement once; repeated lines mean a
/// statement was emitted twice.
fn check_line_per_statement(text: &str, graph: &ArtifactGraph, log: &mut StageLog<'_>) {
    let lines = text
        .lines()
        .filter(|l| {
            let t = l.trim();
            !t.is_empty() && !t.starts_with('#')
        })
        .count();
    if lines != graph.len() {
        log.warn(
            format!("{lines} statement lines but {} distinct statements", graph.len()),
            Vec::new(),
        );
    }
}
