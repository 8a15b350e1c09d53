//! Runs the full conformance suite on artifacts produced by the exporter.

use std::path::{Path, PathBuf};

use urdf_ontology::{export, ExportOptions, Format, Vocabulary};
use urdf_ontology_conformance::{run_all, ArtifactPaths, Severity, Stage};

const KITCHEN: &str = r#"<robot name="kitchen">
  <link name="world"/>
  <link name="sink_area"/>
  <link name="sink_area_tap"/>
  <link name="oven"/>
  <link name="oven_door"/>
  <joint name="world_sink" type="fixed"><parent link="world"/><child link="sink_area"/></joint>
  <joint name="sink_tap" type="continuous"><parent link="sink_area"/><child link="sink_area_tap"/></joint>
  <joint name="world_oven" type="fixed"><parent link="world"/><child link="oven"/></joint>
  <joint name="oven_hinge" type="revolute"><parent link="oven"/><child link="oven_door"/></joint>
</robot>"#;

fn exported(dir: &Path, file: &str) -> (PathBuf, PathBuf) {
    let source = dir.join("kitchen.urdf");
    std::fs::write(&source, KITCHEN).expect("write source");
    let artifact = dir.join(file);
    export(
        &source,
        &artifact,
        &Vocabulary::apartment(),
        &ExportOptions::default(),
    )
    .expect("export");
    (source, artifact)
}

fn paths(artifact: PathBuf, source: Option<PathBuf>) -> ArtifactPaths {
    ArtifactPaths {
        artifact,
        source,
        format: None,
        base_iri: None,
    }
}

fn failures(paths: &ArtifactPaths) -> Vec<String> {
    run_all(paths)
        .expect("suite runs")
        .findings()
        .iter()
        .filter(|f| f.is_failure())
        .map(|f| format!("{}: {} {:?}", f.stage, f.message, f.details))
        .collect()
}

#[test]
fn fresh_exports_pass_in_every_format() {
    for file in ["kitchen.owl", "kitchen.ttl", "kitchen.nt", "kitchen.jsonld"] {
        let dir = tempfile::tempdir().expect("temp dir");
        let (source, artifact) = exported(dir.path(), file);
        let checked = paths(artifact, Some(source));
        let failed = failures(&checked);
        assert!(failed.is_empty(), "{file}: {failed:#?}");
        let report = run_all(&checked).expect("suite runs");
        for stage in Stage::ALL {
            assert_eq!(report.outcome(stage), Some(Severity::Pass), "{file}: {stage}");
        }
    }
}

#[test]
fn missing_individual_fails_inventory() {
    let dir = tempfile::tempdir().expect("temp dir");
    let (source, artifact) = exported(dir.path(), "kitchen.nt");
    let text = std::fs::read_to_string(&artifact).expect("read");
    let pruned: String = text
        .lines()
        .filter(|line| !line.starts_with(&format!("<{}", individual_iri(&text, "oven_door"))))
        .map(|line| format!("{line}\n"))
        .collect();
    std::fs::write(&artifact, pruned).expect("rewrite");

    let report = run_all(&paths(artifact, Some(source))).expect("suite runs");

    assert_eq!(report.outcome(Stage::Inventory), Some(Severity::Failure));
    let failure = report
        .findings_for(Stage::Inventory)
        .find(|f| f.is_failure())
        .expect("inventory failure");
    assert!(failure.details.iter().any(|d| d.contains("oven_door")));
}

#[test]
fn without_source_inventory_is_skipped() {
    let dir = tempfile::tempdir().expect("temp dir");
    let (_, artifact) = exported(dir.path(), "kitchen.ttl");

    let report = run_all(&paths(artifact, None)).expect("suite runs");

    assert!(report.all_passed());
    assert_eq!(report.count(Severity::Warning), 0);
    assert_eq!(report.skip_reason(Stage::Inventory), Some("no source URDF given"));
    assert_eq!(report.outcome(Stage::Inventory), None);
    assert_eq!(report.outcome(Stage::Structure), Some(Severity::Pass));
}

#[test]
fn missing_artifact_fails() {
    let dir = tempfile::tempdir().expect("temp dir");
    let report = run_all(&paths(dir.path().join("absent.owl"), None)).expect("suite runs");
    assert_eq!(report.failure_count(), 1);
    assert_eq!(report.outcome(Stage::Syntax), Some(Severity::Failure));
    assert!(report.skip_reason(Stage::Structure).is_some());
    assert!(report.skip_reason(Stage::Inventory).is_some());
}

#[test]
fn wrong_format_fails_syntax() {
    let dir = tempfile::tempdir().expect("temp dir");
    let (_, artifact) = exported(dir.path(), "kitchen.jsonld");
    let checked = ArtifactPaths {
        format: Some(Format::Turtle),
        ..paths(artifact, None)
    };

    let report = run_all(&checked).expect("suite runs");

    assert_eq!(report.failure_count(), 1);
    assert_eq!(report.findings()[0].stage, Stage::Syntax);
    assert_eq!(report.skip_reason(Stage::Structure), Some("artifact did not parse"));
}

#[test]
fn explicit_base_iri_must_match_export() {
    let dir = tempfile::tempdir().expect("temp dir");
    let (source, artifact) = exported(dir.path(), "kitchen.owl");
    let checked = ArtifactPaths {
        base_iri: Some("http://example.org/elsewhere#".to_owned()),
        ..paths(artifact, Some(source))
    };

    let report = run_all(&checked).expect("suite runs");

    assert!(!report.all_passed());
}

/// The IRI the exporter gave `local`, read from its N-Triples label line.
fn individual_iri(nt: &str, local: &str) -> String {
    let label = format!("\"{local}\"^^");
    nt.lines()
        .find(|l| l.contains("rdf-schema#label") && l.contains(&label))
        .and_then(|l| l.strip_prefix('<'))
        .and_then(|l| l.split_once('>'))
        .map(|(iri, _)| iri.to_owned())
        .expect("individual present")
}
