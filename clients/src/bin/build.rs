//! `urdf-onto`: Exports a URDF robot description as an OWL ontology.
//!
//! Extracts links and joints, classifies each link against the concept
//! vocabulary, and writes the ontology in the requested RDF format.
//!
//! **Usage:**
//! ```text
//! urdf-onto <INPUT> <OUTPUT> [--concept NAME]... [--config FILE]
//!           [--format rdfxml|turtle|ntriples|jsonld] [--base-iri IRI]
//!           [--lenient] [--verbose]
//! ```
//!
//! Command-line flags override the config file. Without `--concept` or a
//! config file, the built-in apartment vocabulary is used.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use urdf_ontology::{export, Config, Format};

/// Export a URDF robot description as an OWL ontology.
#[derive(Parser)]
#[command(
    name = "urdf-onto",
    version,
    about = "Export a URDF robot description as an OWL ontology"
)]
struct Args {
    /// URDF file to read.
    input: PathBuf,

    /// Ontology file to write.
    output: PathBuf,

    /// Concept name to classify links against; repeat for more, in
    /// matching order. Replaces the configured vocabulary.
    #[arg(long = "concept", value_name = "NAME")]
    concepts: Vec<String>,

    /// TOML config file (concepts, base_iri, format, strict).
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format (default: inferred from the output extension, else rdfxml).
    #[arg(long, value_name = "FMT")]
    format: Option<Format>,

    /// Namespace for generated IRIs (default: file://<OUTPUT>#).
    #[arg(long, value_name = "IRI")]
    base_iri: Option<String>,

    /// Export despite duplicate, unnamed or dangling links and joints.
    #[arg(long)]
    lenient: bool,

    /// Log pipeline details to stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);

    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if !args.concepts.is_empty() {
        config.concepts = args.concepts;
    }
    if args.base_iri.is_some() {
        config.base_iri = args.base_iri;
    }
    if args.format.is_some() {
        config.format = args.format;
    }
    if args.lenient {
        config.strict = false;
    }
    debug!(?config, "resolved configuration");

    let vocabulary = config.vocabulary().context("Invalid concept vocabulary")?;
    let summary = export(&args.input, &args.output, &vocabulary, &config.export_options())
        .with_context(|| format!("Failed to export {}", args.input.display()))?;

    debug!(
        links = summary.links,
        joints = summary.joints,
        assigned = summary.assigned,
        part_edges = summary.part_edges,
        tolerated_issues = summary.issues.len(),
        "export summary"
    );
    println!("Ontology exported to: {}", summary.output.display());
    Ok(())
}

/// Logs go to stderr; `RUST_LOG` wins over `--verbose`.
fn setup_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
