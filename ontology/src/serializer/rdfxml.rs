//! RDF/XML serializer.
//!
//! Writes one `owl:` typed node element per resource with every IRI spelled
//! out in `rdf:about`/`rdf:resource`, so the document does not depend on
//! `xml:base` resolution. Predicates in the ontology namespace use the
//! `robot:` prefix.

use std::fmt::Write as _;

use crate::model::iris::{OWL, OWL_TRANSITIVE_PROPERTY, RDF, RDFS, XSD};
use crate::model::Ontology;

/// Serializes the ontology to an RDF/XML document.
#[must_use]
pub fn to_rdf_xml(ontology: &Ontology) -> String {
    let mut out = String::with_capacity(16 * 1024);

    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    let _ = writeln!(out, "<rdf:RDF xmlns:rdf=\"{RDF}\"");
    let _ = writeln!(out, "         xmlns:rdfs=\"{RDFS}\"");
    let _ = writeln!(out, "         xmlns:owl=\"{OWL}\"");
    let _ = writeln!(out, "         xmlns:xsd=\"{XSD}\"");
    let _ = writeln!(out, "         xmlns:robot=\"{}\">", escape(&ontology.namespace));
    out.push('\n');

    let _ = writeln!(out, "  <owl:Ontology rdf:about=\"{}\"/>\n", escape(&ontology.iri));

    for prop in &ontology.properties {
        let _ = writeln!(out, "  <owl:ObjectProperty rdf:about=\"{}\">", escape(&prop.id));
        if prop.transitive {
            resource(&mut out, "rdf:type", OWL_TRANSITIVE_PROPERTY);
        }
        label(&mut out, &prop.label);
        resource(&mut out, "rdfs:domain", &prop.domain);
        resource(&mut out, "rdfs:range", &prop.range);
        out.push_str("  </owl:ObjectProperty>\n\n");
    }

    for class in &ontology.classes {
        let _ = writeln!(out, "  <owl:Class rdf:about=\"{}\">", escape(&class.id));
        label(&mut out, &class.label);
        for parent in &class.subclass_of {
            resource(&mut out, "rdfs:subClassOf", parent);
        }
        out.push_str("  </owl:Class>\n\n");
    }

    for ind in &ontology.individuals {
        let _ = writeln!(out, "  <owl:NamedIndividual rdf:about=\"{}\">", escape(&ind.id));
        for t in &ind.types {
            resource(&mut out, "rdf:type", t);
        }
        label(&mut out, &ind.label);
        for rel in &ind.relations {
            match rel.property.strip_prefix(ontology.namespace.as_str()) {
                Some(local) if is_ncname(local) => {
                    resource(&mut out, &format!("robot:{local}"), &rel.target);
                }
                _ => foreign_resource(&mut out, &rel.property, &rel.target),
            }
        }
        out.push_str("  </owl:NamedIndividual>\n\n");
    }

    out.push_str("</rdf:RDF>\n");
    out
}

fn resource(out: &mut String, element: &str, iri: &str) {
    let _ = writeln!(out, "    <{element} rdf:resource=\"{}\"/>", escape(iri));
}

fn label(out: &mut String, text: &str) {
    let _ = writeln!(out, "    <rdfs:label>{}</rdfs:label>", escape(text));
}

/// Emits a predicate outside the `robot:` namespace with a locally declared
/// prefix.
fn foreign_resource(out: &mut String, property: &str, target: &str) {
    let split = property
        .rfind(|c: char| c == '#' || c == '/')
        .map_or(0, |i| i + 1);
    let (namespace, local) = property.split_at(split);
    let _ = writeln!(
        out,
        "    <ns0:{local} xmlns:ns0=\"{}\" rdf:resource=\"{}\"/>",
        escape(namespace),
        escape(target)
    );
}

fn is_ncname(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serializer::fixtures::{kitchen, BASE};

    #[test]
    fn output_is_well_formed_xml() {
        let xml = to_rdf_xml(&kitchen());
        let doc = roxmltree::Document::parse(&xml).expect("well-formed RDF/XML");
        assert_eq!(doc.root_element().tag_name().name(), "RDF");
        assert_eq!(doc.root_element().tag_name().namespace(), Some(RDF));
    }

    #[test]
    fn one_node_element_per_individual() {
        let ontology = kitchen();
        let xml = to_rdf_xml(&ontology);
        let doc = roxmltree::Document::parse(&xml).expect("well-formed RDF/XML");
        let individuals = doc
            .root_element()
            .children()
            .filter(|n| n.has_tag_name((OWL, "NamedIndividual")))
            .count();
        assert_eq!(individuals, ontology.individuals.len());
    }

    #[test]
    fn labels_survive_escaping() {
        let xml = to_rdf_xml(&kitchen());
        let doc = roxmltree::Document::parse(&xml).expect("well-formed RDF/XML");
        let labels: Vec<_> = doc
            .descendants()
            .filter(|n| n.has_tag_name((RDFS, "label")))
            .filter_map(|n| n.text())
            .collect();
        assert!(labels.contains(&"left door & \"frame\""));
    }

    #[test]
    fn relations_use_robot_prefix() {
        let xml = to_rdf_xml(&kitchen());
        assert!(xml.contains(&format!(
            "<robot:hasPart rdf:resource=\"{BASE}sink_area\"/>"
        )));
        assert!(xml.contains(&format!(
            "<robot:hasParentLink rdf:resource=\"{BASE}sink_area\"/>"
        )));
    }

    #[test]
    fn transitive_property_is_marked() {
        let xml = to_rdf_xml(&kitchen());
        let doc = roxmltree::Document::parse(&xml).expect("well-formed RDF/XML");
        let has_part = doc
            .root_element()
            .children()
            .find(|n| n.attribute((RDF, "about")) == Some(&format!("{BASE}hasPart")[..]))
            .expect("hasPart declared");
        assert!(has_part
            .children()
            .any(|n| n.attribute((RDF, "resource")) == Some(OWL_TRANSITIVE_PROPERTY)));
    }

    #[test]
    fn ncname_check() {
        assert!(is_ncname("hasPart"));
        assert!(!is_ncname("1abc"));
        assert!(!is_ncname("a%20b"));
    }
}
