//! Structural declarations validator.
//!
//! Every export declares the same TBox skeleton regardless of the robot:
//! - exactly one `owl:Ontology` header
//! - the `Link` and `Joint` classes and the six joint-type subclasses
//! - `hasPart` (transitive), `hasParentLink` and `hasChildLink`
//! - an `owl:Class` declaration for every class an individual is typed by

use std::collections::BTreeSet;

use urdf_ontology::builder::{HAS_CHILD_LINK, HAS_PARENT_LINK, HAS_PART, JOINT_CLASS, LINK_CLASS};
use urdf_ontology::model::encode_local;
use urdf_ontology::model::iris::{
    OWL, OWL_CLASS, OWL_NAMED_INDIVIDUAL, OWL_OBJECT_PROPERTY, OWL_ONTOLOGY, OWL_TRANSITIVE_PROPERTY,
    RDFS_SUBCLASS_OF, RDF_TYPE,
};
use urdf_ontology::JointKind;

use crate::graph::{ArtifactGraph, Object};
use crate::report::{ConformanceReport, Stage, StageLog};

/// Checks the structural declarations of `graph` in `namespace`, recording
/// four findings under [`Stage::Structure`].
pub fn validate(graph: &ArtifactGraph, namespace: &str, report: &mut ConformanceReport) {
    let mut log = report.stage(Stage::Structure);
    let term = |local: &str| format!("{namespace}{}", encode_local(local));

    validate_header(graph, &mut log);
    validate_classes(graph, &term, &mut log);
    validate_properties(graph, &term, &mut log);
    validate_typed_classes(graph, namespace, &mut log);
}

fn validate_header(graph: &ArtifactGraph, log: &mut StageLog<'_>) {
    let headers: Vec<&str> = graph.instances_of(OWL_ONTOLOGY).collect();
    match headers.as_slice() {
        [iri] => log.pass(format!("Single owl:Ontology header <{iri}>")),
        [] => log.fail("No owl:Ontology header", Vec::new()),
        many => log.fail(
            format!("{} owl:Ontology headers (expected 1)", many.len()),
            many.iter().map(|s| (*s).to_owned()).collect(),
        ),
    }
}

fn validate_classes(
    graph: &ArtifactGraph,
    term: &dyn Fn(&str) -> String,
    log: &mut StageLog<'_>,
) {
    let link = term(LINK_CLASS);
    let joint = term(JOINT_CLASS);
    let mut expected = vec![(link.clone(), None), (joint.clone(), None)];
    expected.extend(
        JointKind::SPECIFIC
            .iter()
            .map(|kind| (term(kind.class_name()), Some(joint.clone()))),
    );

    let mut missing = Vec::new();
    for (class, parent) in &expected {
        if !graph.has_type(class, OWL_CLASS) {
            missing.push(format!("{class} is not declared as owl:Class"));
        } else if let Some(parent) = parent {
            if !graph.contains(class, RDFS_SUBCLASS_OF, parent) {
                missing.push(format!("{class} is not rdfs:subClassOf {parent}"));
            }
        }
    }

    if missing.is_empty() {
        log.pass(format!("All {} structural classes declared", expected.len()));
    } else {
        log.fail(format!("{} structural class problems", missing.len()), missing);
    }
}

fn validate_properties(
    graph: &ArtifactGraph,
    term: &dyn Fn(&str) -> String,
    log: &mut StageLog<'_>,
) {
    let mut missing = Vec::new();
    for name in [HAS_PART, HAS_PARENT_LINK, HAS_CHILD_LINK] {
        let iri = term(name);
        if !graph.has_type(&iri, OWL_OBJECT_PROPERTY) {
            missing.push(format!("{iri} is not declared as owl:ObjectProperty"));
        }
    }
    let has_part = term(HAS_PART);
    if !graph.has_type(&has_part, OWL_TRANSITIVE_PROPERTY) {
        missing.push(format!("{has_part} is not an owl:TransitiveProperty"));
    }

    if missing.is_empty() {
        log.pass("hasPart, hasParentLink and hasChildLink declared");
    } else {
        log.fail(format!("{} object property problems", missing.len()), missing);
    }
}

/// Every class an individual is typed by must itself be declared.
fn validate_typed_classes(graph: &ArtifactGraph, namespace: &str, log: &mut StageLog<'_>) {
    let individuals: BTreeSet<&str> = graph.instances_of(OWL_NAMED_INDIVIDUAL).collect();
    let undeclared: BTreeSet<String> = graph
        .iter()
        .filter(|s| individuals.contains(s.subject.as_str()))
        .filter_map(|s| match &s.object {
            Object::Iri(class)
                if s.predicate == RDF_TYPE
                    && !class.starts_with(OWL)
                    && !graph.has_type(class, OWL_CLASS) =>
            {
                Some(class.clone())
            }
            _ => None,
        })
        .collect();

    if undeclared.is_empty() {
        log.pass(format!("{} individuals, every type declared", individuals.len()));
    } else {
        let foreign = undeclared.iter().filter(|c| !c.starts_with(namespace)).count();
        log.fail(
            format!(
                "{} classes used as types but never declared ({foreign} outside the ontology namespace)",
                undeclared.len()
            ),
            undeclared.into_iter().collect(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NS: &str = "http://example.org/r#";

    fn graph_of(nt: &str) -> ArtifactGraph {
        ArtifactGraph::from_ntriples(nt).expect("valid N-Triples")
    }

    fn checked(nt: &str) -> ConformanceReport {
        let mut report = ConformanceReport::new("robot.nt");
        validate(&graph_of(nt), NS, &mut report);
        report
    }

    fn exported() -> String {
        let graph = urdf_ontology::extract_str(
            r#"<robot><link name="sink"/><link name="tap"/>
  <joint name="j" type="continuous"><parent link="sink"/><child link="tap"/></joint>
</robot>"#,
        )
        .expect("parses");
        let vocabulary = urdf_ontology::Vocabulary::new(["Sink", "Tap"]).expect("valid");
        let assignment = urdf_ontology::map_links_to_concepts(graph.links(), &vocabulary);
        let ontology = urdf_ontology::build(&graph, &vocabulary, &assignment, NS);
        urdf_ontology::serializer::ntriples::to_ntriples(&ontology)
    }

    #[test]
    fn fresh_export_passes() {
        let report = checked(&exported());
        assert!(report.all_passed(), "{:#?}", report.findings());
        assert_eq!(report.findings_for(Stage::Structure).count(), 4);
        assert_eq!(report.findings().len(), 4);
    }

    #[test]
    fn missing_transitivity_fails() {
        let transitive = format!(
            "<{NS}hasPart> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <{OWL_TRANSITIVE_PROPERTY}> .\n"
        );
        let nt = exported().replace(&transitive, "");
        let report = checked(&nt);
        assert_eq!(report.failure_count(), 1);
        assert_eq!(report.outcome(Stage::Structure), Some(crate::Severity::Failure));
    }

    #[test]
    fn undeclared_concept_class_fails() {
        let declaration = format!(
            "<{NS}Tap> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <{OWL_CLASS}> .\n"
        );
        let nt = exported().replace(&declaration, "");
        let report = checked(&nt);
        let failure = report
            .findings()
            .iter()
            .find(|r| r.is_failure())
            .expect("one failure");
        assert_eq!(failure.details, [format!("{NS}Tap")]);
    }
}
