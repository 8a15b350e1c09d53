//! Materializes a kinematic graph and its concept assignment as an
//! [`Ontology`].
//!
//! The builder is an ordinary value: create it with [`OntologyBuilder::new`],
//! populate it, then call [`OntologyBuilder::finish`] and hand the result to a
//! serializer.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::concepts::{Assignment, ConceptId, Vocabulary};
use crate::error::{Error, Result};
use crate::graph::{JointKind, KinematicGraph};
use crate::model::iris::OWL_THING;
use crate::model::{Class, Individual, Ontology, Property, Relation};

/// Local name of the class every link individual belongs to.
pub const LINK_CLASS: &str = "Link";
/// Local name of the base class of every joint class.
pub const JOINT_CLASS: &str = "Joint";
/// Transitive part-of relation from a parent link to a child link.
pub const HAS_PART: &str = "hasPart";
/// Relation from a joint to its parent link.
pub const HAS_PARENT_LINK: &str = "hasParentLink";
/// Relation from a joint to its child link.
pub const HAS_CHILD_LINK: &str = "hasChildLink";

/// Returns `true` if `name` is one of the builder's own class names
/// (`Link`, `Joint`, or a joint-type class), compared case-insensitively.
#[must_use]
pub fn is_reserved(name: &str) -> bool {
    name.eq_ignore_ascii_case(LINK_CLASS)
        || name.eq_ignore_ascii_case(JOINT_CLASS)
        || JointKind::SPECIFIC
            .iter()
            .any(|kind| name.eq_ignore_ascii_case(kind.class_name()))
}

/// Ensures a namespace ends with `#` or `/` so local names can be appended.
#[must_use]
pub fn normalize_namespace(base_iri: &str) -> String {
    if base_iri.ends_with('#') || base_iri.ends_with('/') {
        base_iri.to_owned()
    } else {
        format!("{base_iri}#")
    }
}

/// Normalizes `base_iri` with [`normalize_namespace`] and checks that the
/// result is an absolute IRI every serializer can emit verbatim.
///
/// # Errors
///
/// Returns [`Error::InvalidBaseIri`] if the namespace is relative or contains
/// characters that are not allowed in an IRI.
pub fn checked_namespace(base_iri: &str) -> Result<String> {
    let namespace = normalize_namespace(base_iri);
    if sophia_iri::Iri::new(namespace.as_str()).is_err() {
        return Err(Error::InvalidBaseIri(base_iri.to_owned()));
    }
    Ok(namespace)
}

/// Accumulates classes, properties and individuals for one robot.
#[derive(Debug)]
pub struct OntologyBuilder {
    ontology: Ontology,
    concept_classes: HashMap<ConceptId, String>,
    positions: HashMap<String, usize>,
}

impl OntologyBuilder {
    /// Starts an ontology in `base_iri` with the structural classes and
    /// properties already declared.
    #[must_use]
    pub fn new(base_iri: &str) -> Self {
        let namespace = normalize_namespace(base_iri);
        let iri = namespace.trim_end_matches('#').to_owned();
        let mut builder = Self {
            ontology: Ontology {
                iri,
                namespace,
                classes: Vec::new(),
                properties: Vec::new(),
                individuals: Vec::new(),
            },
            concept_classes: HashMap::new(),
            positions: HashMap::new(),
        };
        builder.declare_structure();
        builder
    }

    fn declare_structure(&mut self) {
        let link = self.ontology.term(LINK_CLASS);
        let joint = self.ontology.term(JOINT_CLASS);

        self.declare_class(LINK_CLASS, OWL_THING.to_owned());
        self.declare_class(JOINT_CLASS, OWL_THING.to_owned());
        for kind in JointKind::SPECIFIC {
            self.declare_class(kind.class_name(), joint.clone());
        }

        let properties = [
            (HAS_PART, true, &link),
            (HAS_PARENT_LINK, false, &joint),
            (HAS_CHILD_LINK, false, &joint),
        ];
        for (name, transitive, domain) in properties {
            let id = self.ontology.term(name);
            self.ontology.properties.push(Property {
                id,
                label: name.to_owned(),
                transitive,
                domain: domain.clone(),
                range: link.clone(),
            });
        }
    }

    fn declare_class(&mut self, name: &str, parent: String) -> String {
        let id = self.ontology.term(name);
        self.ontology.classes.push(Class {
            id: id.clone(),
            label: name.to_owned(),
            subclass_of: vec![parent],
        });
        id
    }

    /// Declares one subclass of `Link` per concept. Reserved structural names
    /// are skipped. Returns the number of classes declared.
    pub fn declare_concepts(&mut self, vocabulary: &Vocabulary) -> usize {
        let link = self.ontology.term(LINK_CLASS);
        let mut declared = 0;
        for (id, name) in vocabulary.iter() {
            if is_reserved(name) {
                debug!(concept = name, "skipping reserved concept name");
                continue;
            }
            if self.concept_classes.contains_key(&id) {
                continue;
            }
            let class = self.declare_class(name, link.clone());
            self.concept_classes.insert(id, class);
            declared += 1;
        }
        declared
    }

    /// Adds one `Link` individual per link, also typed by its assigned
    /// concept class when that concept was declared.
    pub fn add_links<S: AsRef<str>>(
        &mut self,
        links: &[S],
        vocabulary: &Vocabulary,
        assignment: &Assignment,
    ) {
        let link_class = self.ontology.term(LINK_CLASS);
        for link in links.iter().map(AsRef::as_ref) {
            let mut types = vec![link_class.clone()];
            if let Some(concept) = assignment.concept_of(link) {
                match (vocabulary.name(concept), self.concept_classes.get(&concept)) {
                    (None, _) => warn!(link, "assigned concept is not in the vocabulary"),
                    (Some(_), Some(class)) => types.push(class.clone()),
                    (Some(name), None) if is_reserved(name) => debug!(
                        link,
                        concept = name,
                        "link matched a reserved name; typed as Link only"
                    ),
                    (Some(name), None) => {
                        warn!(link, concept = name, "assigned concept has no declared class");
                    }
                }
            }
            self.individual(link, types);
        }
    }

    /// Adds one individual per joint, typed by its joint-type class, with its
    /// parent and child link relations. Nameless joints are named
    /// `unnamed_joint_<position>`.
    pub fn add_joints(&mut self, graph: &KinematicGraph) {
        for (position, joint) in graph.joints().iter().enumerate() {
            let name = joint.individual_name(position);
            let class = self.ontology.term(joint.kind.class_name());
            let ends = [(HAS_PARENT_LINK, &joint.parent), (HAS_CHILD_LINK, &joint.child)];
            let relations: Vec<Relation> = ends
                .into_iter()
                .filter_map(|(property, end)| {
                    end.as_deref().map(|link| Relation {
                        property: self.ontology.term(property),
                        target: self.ontology.term(link),
                    })
                })
                .collect();
            self.individual(&name, vec![class]).relations.extend(relations);
        }
    }

    /// Asserts `hasPart` from each parent link to each of its children.
    /// Returns the number of edges asserted; edges whose parent is not a
    /// declared individual are skipped.
    pub fn add_part_relations(&mut self, graph: &KinematicGraph) -> usize {
        let property = self.ontology.term(HAS_PART);
        let mut asserted = 0;
        for (parent, children) in graph.adjacency() {
            let parent_iri = self.ontology.term(parent);
            let Some(&position) = self.positions.get(&parent_iri) else {
                warn!(parent = parent.as_str(), "skipping hasPart edges from undeclared link");
                continue;
            };
            for child in children {
                let target = self.ontology.term(child);
                self.ontology.individuals[position].relations.push(Relation {
                    property: property.clone(),
                    target,
                });
                asserted += 1;
            }
        }
        asserted
    }

    /// Runs every population step in order: concept classes, links, joints,
    /// part relations.
    pub fn populate(
        &mut self,
        graph: &KinematicGraph,
        vocabulary: &Vocabulary,
        assignment: &Assignment,
    ) {
        let classes = self.declare_concepts(vocabulary);
        self.add_links(graph.links(), vocabulary, assignment);
        self.add_joints(graph);
        let edges = self.add_part_relations(graph);
        debug!(
            concept_classes = classes,
            individuals = self.ontology.individuals.len(),
            part_edges = edges,
            "populated ontology"
        );
    }

    /// Finishes the build.
    #[must_use]
    pub fn finish(self) -> Ontology {
        self.ontology
    }

    /// Gets or creates the individual for `name`, merging in `types`.
    fn individual(&mut self, name: &str, types: Vec<String>) -> &mut Individual {
        let id = self.ontology.term(name);
        let position = match self.positions.get(&id) {
            Some(&position) => position,
            None => {
                self.positions.insert(id.clone(), self.ontology.individuals.len());
                self.ontology.individuals.push(Individual {
                    id,
                    label: name.to_owned(),
                    types: Vec::new(),
                    relations: Vec::new(),
                });
                self.ontology.individuals.len() - 1
            }
        };
        let individual = &mut self.ontology.individuals[position];
        for t in types {
            if !individual.types.contains(&t) {
                individual.types.push(t);
            }
        }
        individual
    }
}

/// Builds the complete ontology for `graph` in one call.
#[must_use]
pub fn build(
    graph: &KinematicGraph,
    vocabulary: &Vocabulary,
    assignment: &Assignment,
    base_iri: &str,
) -> Ontology {
    let mut builder = OntologyBuilder::new(base_iri);
    builder.populate(graph, vocabulary, assignment);
    builder.finish()
}
