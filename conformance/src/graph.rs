//! A format-independent view of an exported artifact: the set of triples it
//! asserts, with every IRI fully expanded.

use std::collections::{BTreeMap, BTreeSet};

use anyhow::{anyhow, bail, Context, Result};
use serde_json::Value;
use sophia_api::source::TripleSource;
use sophia_api::term::Term;
use sophia_api::triple::Triple;
use urdf_ontology::model::iris::{RDF, RDF_TYPE};

/// Object position of a triple.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Object {
    /// An IRI reference.
    Iri(String),
    /// A literal's lexical form.
    Literal(String),
}

/// One asserted statement.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Statement {
    /// Subject IRI.
    pub subject: String,
    /// Predicate IRI.
    pub predicate: String,
    /// Object term.
    pub object: Object,
}

/// Every statement of one artifact.
#[derive(Debug, Clone, Default)]
pub struct ArtifactGraph {
    statements: BTreeSet<Statement>,
}

impl ArtifactGraph {
    /// Number of distinct statements.
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Returns true if the artifact asserts nothing.
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Whether `subject predicate <object>` is asserted.
    pub fn contains(&self, subject: &str, predicate: &str, object: &str) -> bool {
        self.statements.contains(&Statement {
            subject: subject.to_owned(),
            predicate: predicate.to_owned(),
            object: Object::Iri(object.to_owned()),
        })
    }

    /// Whether `subject` has `rdf:type` `class`.
    pub fn has_type(&self, subject: &str, class: &str) -> bool {
        self.contains(subject, RDF_TYPE, class)
    }

    /// Subjects typed `class`, in IRI order.
    pub fn instances_of<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.statements
            .iter()
            .filter(move |s| {
                s.predicate == RDF_TYPE && matches!(&s.object, Object::Iri(o) if o == class)
            })
            .map(|s| s.subject.as_str())
    }

    /// IRI objects of every `rdf:type` statement.
    pub fn type_objects(&self) -> BTreeSet<&str> {
        self.statements
            .iter()
            .filter(|s| s.predicate == RDF_TYPE)
            .filter_map(|s| match &s.object {
                Object::Iri(o) => Some(o.as_str()),
                Object::Literal(_) => None,
            })
            .collect()
    }

    /// All statements, in order.
    pub fn iter(&self) -> impl Iterator<Item = &Statement> {
        self.statements.iter()
    }

    fn insert(&mut self, subject: &str, predicate: &str, object: Object) {
        self.statements.insert(Statement {
            subject: subject.to_owned(),
            predicate: predicate.to_owned(),
            object,
        });
    }

    /// Reads a Turtle document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid Turtle.
    pub fn from_turtle(text: &str) -> Result<Self> {
        let mut graph = Self::default();
        sophia_turtle::parser::turtle::parse_str(text)
            .for_each_triple(|t| graph.insert_sophia(&t))
            .map_err(|e| anyhow!("invalid Turtle: {e}"))?;
        Ok(graph)
    }

    /// Reads an N-Triples document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid N-Triples.
    pub fn from_ntriples(text: &str) -> Result<Self> {
        let mut graph = Self::default();
        sophia_turtle::parser::nt::parse_str(text)
            .for_each_triple(|t| graph.insert_sophia(&t))
            .map_err(|e| anyhow!("invalid N-Triples: {e}"))?;
        Ok(graph)
    }

    fn insert_sophia<T: Triple>(&mut self, triple: &T) {
        let (s, p, o) = (triple.s(), triple.p(), triple.o());
        let (Some(s), Some(p)) = (s.iri(), p.iri()) else {
            return;
        };
        let object = match (o.iri(), o.lexical_form()) {
            (Some(iri), _) => Object::Iri(iri.as_str().to_owned()),
            (None, Some(lex)) => Object::Literal(lex.to_string()),
            (None, None) => return,
        };
        self.insert(s.as_str(), p.as_str(), object);
    }

    /// Reads the striped RDF/XML subset the exporter writes: node elements
    /// with `rdf:about`, property elements with `rdf:resource` or text.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not well-formed XML or is not
    /// rooted at `rdf:RDF`.
    pub fn from_rdf_xml(text: &str) -> Result<Self> {
        let doc = roxmltree::Document::parse(text).context("malformed RDF/XML")?;
        let root = doc.root_element();
        if !root.has_tag_name((RDF, "RDF")) {
            bail!("root element is not rdf:RDF");
        }
        let mut graph = Self::default();
        for node in root.children().filter(roxmltree::Node::is_element) {
            let Some(subject) = node.attribute((RDF, "about")) else {
                bail!(
                    "node element <{}> has no rdf:about",
                    node.tag_name().name()
                );
            };
            if !node.has_tag_name((RDF, "Description")) {
                let class = expanded_name(node);
                graph.insert(subject, RDF_TYPE, Object::Iri(class));
            }
            for property in node.children().filter(roxmltree::Node::is_element) {
                let predicate = expanded_name(property);
                let object = match property.attribute((RDF, "resource")) {
                    Some(iri) => Object::Iri(iri.to_owned()),
                    None => Object::Literal(property.text().unwrap_or_default().to_owned()),
                };
                graph.insert(subject, &predicate, object);
            }
        }
        Ok(graph)
    }

    /// Reads a JSON-LD document with a prefix-only `@context` and a flat
    /// `@graph`, as the exporter writes it.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not JSON or lacks `@graph`.
    pub fn from_json_ld(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text).context("invalid JSON")?;
        let prefixes: BTreeMap<&str, &str> = value
            .get("@context")
            .and_then(Value::as_object)
            .map(|ctx| {
                ctx.iter()
                    .filter_map(|(k, v)| v.as_str().map(|ns| (k.as_str(), ns)))
                    .collect()
            })
            .unwrap_or_default();
        let expand = |term: &str| -> String {
            match term.split_once(':') {
                Some((prefix, local)) if !local.starts_with("//") => match prefixes.get(prefix) {
                    Some(ns) => format!("{ns}{local}"),
                    None => term.to_owned(),
                },
                _ => term.to_owned(),
            }
        };

        let nodes = value
            .get("@graph")
            .and_then(Value::as_array)
            .ok_or_else(|| anyhow!("document has no @graph array"))?;
        let mut graph = Self::default();
        for node in nodes {
            let Some(fields) = node.as_object() else {
                bail!("@graph entry is not an object");
            };
            let Some(subject) = fields.get("@id").and_then(Value::as_str) else {
                bail!("@graph entry has no @id");
            };
            let subject = expand(subject);
            for (key, value) in fields {
                match key.as_str() {
                    "@id" => {}
                    "@type" => {
                        for class in one_or_many(value).filter_map(Value::as_str) {
                            graph.insert(&subject, RDF_TYPE, Object::Iri(expand(class)));
                        }
                    }
                    _ => {
                        let predicate = expand(key);
                        for item in one_or_many(value) {
                            let object = match item {
                                Value::String(s) => Object::Literal(s.clone()),
                                other => match other.get("@id").and_then(Value::as_str) {
                                    Some(iri) => Object::Iri(expand(iri)),
                                    None => Object::Literal(other.to_string()),
                                },
                            };
                            graph.insert(&subject, &predicate, object);
                        }
                    }
                }
            }
        }
        Ok(graph)
    }
}

fn expanded_name(node: roxmltree::Node<'_, '_>) -> String {
    let name = node.tag_name();
    format!("{}{}", name.namespace().unwrap_or_default(), name.name())
}

fn one_or_many(value: &Value) -> Box<dyn Iterator<Item = &Value> + '_> {
    match value {
        Value::Array(items) => Box::new(items.iter()),
        single => Box::new(std::iter::once(single)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use urdf_ontology::model::iris::{OWL_CLASS, OWL_NAMED_INDIVIDUAL, RDFS_LABEL};

    const NS: &str = "http://example.org/r#";

    fn sample() -> urdf_ontology::Ontology {
        let graph = urdf_ontology::extract_str(
            r#"<robot><link name="oven"/><link name="oven_door"/>
  <joint name="hinge" type="revolute"><parent link="oven"/><child link="oven_door"/></joint>
</robot>"#,
        )
        .expect("parses");
        let vocabulary = urdf_ontology::Vocabulary::new(["Oven", "Door"]).expect("valid");
        let assignment = urdf_ontology::map_links_to_concepts(graph.links(), &vocabulary);
        urdf_ontology::build(&graph, &vocabulary, &assignment, NS)
    }

    fn read(format: urdf_ontology::Format) -> ArtifactGraph {
        use urdf_ontology::Format;
        let text = urdf_ontology::serializer::serialize(&sample(), format).expect("renders");
        match format {
            Format::RdfXml => ArtifactGraph::from_rdf_xml(&text),
            Format::Turtle => ArtifactGraph::from_turtle(&text),
            Format::NTriples => ArtifactGraph::from_ntriples(&text),
            Format::JsonLd => ArtifactGraph::from_json_ld(&text),
        }
        .expect("reads back")
    }

    #[test]
    fn every_format_reads_to_the_same_statements() {
        use urdf_ontology::Format;
        let reference: Vec<Statement> = read(Format::NTriples).iter().cloned().collect();
        for format in [Format::RdfXml, Format::Turtle, Format::JsonLd] {
            let other: Vec<Statement> = read(format).iter().cloned().collect();
            assert_eq!(other, reference, "{format} disagrees with N-Triples");
        }
    }

    #[test]
    fn typed_queries() {
        let graph = read(urdf_ontology::Format::Turtle);
        let door = format!("{NS}oven_door");
        assert!(graph.has_type(&door, &format!("{NS}Door")));
        assert!(graph.has_type(&door, OWL_NAMED_INDIVIDUAL));
        assert!(graph.contains(&format!("{NS}oven"), &format!("{NS}hasPart"), &door));
        assert_eq!(graph.instances_of(OWL_CLASS).count(), 10);
        assert!(graph
            .iter()
            .any(|s| s.predicate == RDFS_LABEL && s.object == Object::Literal("hinge".into())));
    }

    #[test]
    fn rejects_foreign_xml_root() {
        assert!(ArtifactGraph::from_rdf_xml("<robot/>").is_err());
    }

    #[test]
    fn rejects_json_without_graph() {
        assert!(ArtifactGraph::from_json_ld("{\"@context\": {}}").is_err());
    }

    #[test]
    fn rejects_broken_turtle() {
        assert!(ArtifactGraph::from_turtle("<a> <b> .").is_err());
    }
}
