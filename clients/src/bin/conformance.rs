//! `urdf-onto-conformance`: Validates an exported URDF ontology.
//!
//! Checks that the artifact parses in its format, declares the structural
//! link/joint TBox, and (given the source URDF) contains every link, joint
//! and link relation of the robot.
//!
//! **Usage:**
//! ```text
//! urdf-onto-conformance <ARTIFACT> [--source <URDF>] [--format <FMT>] [--base-iri <IRI>]
//! ```
//!
//! Exits non-zero if any conformance check fails.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use urdf_ontology::Format;
use urdf_ontology_conformance::{run_all, ArtifactPaths, Severity, Stage};

/// Validate an exported URDF ontology.
#[derive(Parser)]
#[command(
    name = "urdf-onto-conformance",
    version,
    about = "Validate an exported URDF ontology"
)]
struct Args {
    /// Ontology artifact to check.
    artifact: PathBuf,

    /// URDF the artifact was exported from; enables the inventory check.
    #[arg(long, value_name = "URDF")]
    source: Option<PathBuf>,

    /// Artifact format (default: inferred from the extension, else rdfxml).
    #[arg(long, value_name = "FMT")]
    format: Option<Format>,

    /// Namespace used at export time (default: read from the owl:Ontology header).
    #[arg(long, value_name = "IRI")]
    base_iri: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let paths = ArtifactPaths {
        artifact: args.artifact,
        source: args.source,
        format: args.format,
        base_iri: args.base_iri,
    };

    let report = run_all(&paths)?;

    println!("URDF Ontology Conformance Report");
    println!("================================");
    println!("Artifact: {}", report.artifact().display());

    for stage in Stage::ALL {
        println!();
        if let Some(reason) = report.skip_reason(stage) {
            println!("[SKIP] {stage}: {reason}");
            continue;
        }
        for finding in report.findings_for(stage) {
            println!("[{}] {stage}: {}", finding.severity, finding.message);
            for detail in &finding.details {
                println!("       {detail}");
            }
        }
    }

    let failed = report.failure_count();
    let skipped = Stage::ALL
        .iter()
        .filter(|&&stage| report.skip_reason(stage).is_some())
        .count();
    println!();
    println!(
        "Summary: {} passed, {} warnings, {} failed, {} stage(s) skipped",
        report.count(Severity::Pass),
        report.count(Severity::Warning),
        failed,
        skipped
    );

    if failed > 0 {
        eprintln!("Conformance FAILED: {failed} check(s) did not pass.");
        process::exit(1);
    }

    println!("Conformance PASSED.");
    Ok(())
}
