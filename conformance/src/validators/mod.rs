//! Artifact validators.
//!
//! [`syntax`] parses the artifact; [`structure`] checks the declarations every
//! export carries; [`inventory`] compares the individuals against the URDF the
//! artifact was exported from.

pub mod inventory;
pub mod structure;
pub mod syntax;

use urdf_ontology::builder::normalize_namespace;
use urdf_ontology::model::iris::OWL_ONTOLOGY;

use crate::graph::ArtifactGraph;

/// The namespace generated terms live in: `base_iri` when given, otherwise
/// derived from the artifact's single `owl:Ontology` resource.
pub fn namespace(graph: &ArtifactGraph, base_iri: Option<&str>) -> Option<String> {
    if let Some(base) = base_iri {
        return Some(normalize_namespace(base));
    }
    let mut headers = graph.instances_of(OWL_ONTOLOGY);
    let iri = headers.next()?;
    if headers.next().is_some() {
        return None;
    }
    Some(normalize_namespace(iri))
}
