//! End-to-end export: URDF file in, serialized ontology file out.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::builder::{checked_namespace, OntologyBuilder};
use crate::concepts::{map_links_to_concepts, Vocabulary};
use crate::error::{Error, Result};
use crate::graph::{extract_file, GraphIssue, KinematicGraph};
use crate::serializer::{serialize, Format};

/// Knobs for [`export`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Namespace for generated IRIs; [`default_base_iri`] when `None`.
    pub base_iri: Option<String>,
    /// Output format; [`resolve_format`] when `None`.
    pub format: Option<Format>,
    /// Treat every [`GraphIssue`] as fatal.
    pub strict: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            base_iri: None,
            format: None,
            strict: true,
        }
    }
}

/// What an export produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// Where the ontology was written.
    pub output: PathBuf,
    /// Format it was written in.
    pub format: Format,
    /// Namespace of the generated IRIs.
    pub base_iri: String,
    /// Link elements extracted.
    pub links: usize,
    /// Distinct joints extracted.
    pub joints: usize,
    /// Links that received a concept.
    pub assigned: usize,
    /// `hasPart` edges asserted.
    pub part_edges: usize,
    /// Issues tolerated in lenient mode; always empty in strict mode.
    pub issues: Vec<GraphIssue>,
}

/// `file://<output>#`, with bytes outside the IRI-safe set percent-encoded.
#[must_use]
pub fn default_base_iri(output: &Path) -> String {
    let path = output.to_string_lossy();
    let mut iri = String::from("file://");
    for byte in path.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~' | b'/') {
            iri.push(char::from(byte));
        } else {
            iri.push_str(&format!("%{byte:02X}"));
        }
    }
    iri.push('#');
    iri
}

/// The explicit format if given, else the one implied by the output
/// extension, else RDF/XML.
#[must_use]
pub fn resolve_format(output: &Path, explicit: Option<Format>) -> Format {
    explicit
        .or_else(|| Format::from_path(output))
        .unwrap_or_default()
}

/// Applies the validation policy to an extracted graph.
///
/// # Errors
///
/// In strict mode, returns [`Error::InvalidGraph`] if the graph has any
/// issue. In lenient mode the issues are logged and returned.
pub fn check_graph(graph: &KinematicGraph, strict: bool) -> Result<Vec<GraphIssue>> {
    let issues = graph.issues();
    if issues.is_empty() {
        return Ok(issues);
    }
    if strict {
        return Err(Error::InvalidGraph { issues });
    }
    for issue in &issues {
        warn!(%issue, "continuing despite URDF issue");
    }
    Ok(issues)
}

/// Reads the URDF at `input`, classifies its links against `vocabulary`, and
/// writes the ontology to `output`.
///
/// # Errors
///
/// Returns [`Error::InvalidBaseIri`] if the namespace is not an absolute
/// IRI, [`Error::Io`] or [`Error::Parse`] for unreadable or malformed input, [`Error::InvalidGraph`] in strict mode when validation fails,
/// [`Error::Serialize`] if rendering fails, and [`Error::Persist`] if the
/// output cannot be written. On error no output file is created or
/// modified.
pub fn export(
    input: &Path,
    output: &Path,
    vocabulary: &Vocabulary,
    options: &ExportOptions,
) -> Result<ExportSummary> {
    let base_iri = match &options.base_iri {
        Some(base_iri) => checked_namespace(base_iri)?,
        None => checked_namespace(&default_base_iri(output))?,
    };

    let graph = extract_file(input)?;
    let issues = check_graph(&graph, options.strict)?;

    let assignment = map_links_to_concepts(graph.links(), vocabulary);
    debug!(
        assigned = assignment.assigned_count(),
        links = assignment.len(),
        "mapped links to concepts"
    );

    let mut builder = OntologyBuilder::new(&base_iri);
    builder.declare_concepts(vocabulary);
    builder.add_links(graph.links(), vocabulary, &assignment);
    builder.add_joints(&graph);
    let part_edges = builder.add_part_relations(&graph);
    let ontology = builder.finish();

    let format = resolve_format(output, options.format);
    let text = serialize(&ontology, format)?;
    write_atomic(output, text.as_bytes())?;

    info!(
        output = %output.display(),
        %format,
        individuals = ontology.individuals.len(),
        "ontology written"
    );

    Ok(ExportSummary {
        output: output.to_path_buf(),
        format,
        base_iri: ontology.namespace,
        links: graph.links().len(),
        joints: graph.joints().len(),
        assigned: assignment.assigned_count(),
        part_edges,
        issues,
    })
}

/// Writes `contents` to a temporary file next to `path` and renames it into
/// place, so readers never observe a partially written file.
///
/// A replaced file keeps its permissions. A new file gets the same mode a
/// plain [`std::fs::write`] would give it (`0o666` less the umask on Unix).
///
/// # Errors
///
/// Returns [`Error::Persist`] if any step fails; the temporary file is
/// removed in that case.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let persist_err = |source| Error::Persist {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut builder = tempfile::Builder::new();
    builder.prefix(".urdf-onto");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    let mut tmp = builder.tempfile_in(dir).map_err(persist_err)?;
    if let Ok(existing) = fs::metadata(path) {
        tmp.as_file()
            .set_permissions(existing.permissions())
            .map_err(persist_err)?;
    }
    tmp.write_all(contents).map_err(persist_err)?;
    tmp.as_file().sync_all().map_err(persist_err)?;
    tmp.persist(path).map_err(|e| persist_err(e.error))?;
    Ok(())
}
