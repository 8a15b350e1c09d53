//! Individual inventory validator.
//!
//! Re-extracts the source URDF, rebuilds the individuals an export of it must
//! contain, and verifies that the artifact asserts each of them with its
//! structural type and relations:
//! - one `Link` individual per link
//! - one joint individual per joint, typed by its joint-type class
//! - every `hasParentLink`, `hasChildLink` and `hasPart` edge
//!
//! Concept classes depend on the vocabulary used at export time and are not
//! checked here.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};
use urdf_ontology::model::iris::OWL_NAMED_INDIVIDUAL;
use urdf_ontology::{build, extract_file, map_links_to_concepts, Ontology, Vocabulary};

use crate::graph::ArtifactGraph;
use crate::report::{ConformanceReport, Stage, StageLog};

/// Compares `graph` against the export `source` would produce in
/// `namespace`, recording findings under [`Stage::Inventory`].
///
/// # Errors
///
/// Returns an error if the source URDF cannot be read or parsed.
pub fn validate(
    graph: &ArtifactGraph,
    source: &Path,
    namespace: &str,
    report: &mut ConformanceReport,
) -> Result<()> {
    let kinematics = extract_file(source)
        .with_context(|| format!("Failed to extract {}", source.display()))?;
    let issues = kinematics.issues();
    let mut log = report.stage(Stage::Inventory);
    if !issues.is_empty() {
        log.warn(
            format!(
                "{} has {} structural issue(s); it only exports in lenient mode",
                source.display(),
                issues.len()
            ),
            issues.iter().map(ToString::to_string).collect(),
        );
    }

    let vocabulary = Vocabulary::default();
    let assignment = map_links_to_concepts(kinematics.links(), &vocabulary);
    let expected = build(&kinematics, &vocabulary, &assignment, namespace);

    validate_individuals(graph, &expected, &mut log);
    validate_relations(graph, &expected, &mut log);
    validate_extras(graph, &expected, &mut log);

    Ok(())
}

fn validate_individuals(graph: &ArtifactGraph, expected: &Ontology, log: &mut StageLog<'_>) {
    let mut missing = Vec::new();
    for individual in &expected.individuals {
        if !graph.has_type(&individual.id, OWL_NAMED_INDIVIDUAL) {
            missing.push(format!("{} is not an owl:NamedIndividual", individual.id));
            continue;
        }
        for class in &individual.types {
            if !graph.has_type(&individual.id, class) {
                missing.push(format!("{} is not typed {class}", individual.id));
            }
        }
    }

    if missing.is_empty() {
        log.pass(format!(
            "All {} link and joint individuals present and typed",
            expected.individuals.len()
        ));
    } else {
        log.fail(format!("{} individual problems", missing.len()), missing);
    }
}

fn validate_relations(graph: &ArtifactGraph, expected: &Ontology, log: &mut StageLog<'_>) {
    let mut missing = Vec::new();
    let mut total = 0usize;
    for individual in &expected.individuals {
        for relation in &individual.relations {
            total += 1;
            if !graph.contains(&individual.id, &relation.property, &relation.target) {
                missing.push(format!(
                    "{} {} {}",
                    individual.id, relation.property, relation.target
                ));
            }
        }
    }

    if missing.is_empty() {
        log.pass(format!("All {total} link relations present"));
    } else {
        log.fail(
            format!("{} of {total} link relations missing", missing.len()),
            missing,
        );
    }
}

/// Individuals the source does not account for are suspicious but not fatal.
fn validate_extras(graph: &ArtifactGraph, expected: &Ontology, log: &mut StageLog<'_>) {
    let known: BTreeSet<&str> = expected.individuals.iter().map(|i| i.id.as_str()).collect();
    let extras: Vec<String> = graph
        .instances_of(OWL_NAMED_INDIVIDUAL)
        .filter(|id| !known.contains(id))
        .map(str::to_owned)
        .collect();
    if !extras.is_empty() {
        let message = format!("{} individuals not found in the source URDF", extras.len());
        log.warn(message, extras);
    }
}
