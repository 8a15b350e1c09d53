//! Turtle 1.1 serializer.
//!
//! Produces a Turtle document with the standard prefixes, the ontology
//! namespace bound to `robot:`, and one subject block per resource.

use crate::model::Ontology;

/// Serializes the ontology to a Turtle string.
#[must_use]
pub fn to_turtle(ontology: &Ontology) -> String {
    let mut out = String::with_capacity(16 * 1024);

    // Prefix declarations
    out.push_str("@prefix owl:   <http://www.w3.org/2002/07/owl#> .\n");
    out.push_str("@prefix rdf:   <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .\n");
    out.push_str("@prefix rdfs:  <http://www.w3.org/2000/01/rdf-schema#> .\n");
    out.push_str("@prefix xsd:   <http://www.w3.org/2001/XMLSchema#> .\n");
    out.push_str(&format!("@prefix robot: <{}> .\n\n", ontology.namespace));

    out.push_str(&format!("<{}>\n  a owl:Ontology .\n\n", ontology.iri));

    for prop in &ontology.properties {
        let type_str = if prop.transitive {
            "owl:ObjectProperty , owl:TransitiveProperty"
        } else {
            "owl:ObjectProperty"
        };
        out.push_str(&format!(
            "<{}>\n  a {} ;\n  rdfs:label {} ;\n  rdfs:domain <{}> ;\n  rdfs:range <{}> .\n\n",
            prop.id,
            type_str,
            turtle_string(&prop.label),
            prop.domain,
            prop.range
        ));
    }

    for class in &ontology.classes {
        let subclasses: String = class
            .subclass_of
            .iter()
            .map(|iri| format!(" ;\n  rdfs:subClassOf <{}>", iri))
            .collect();
        out.push_str(&format!(
            "<{}>\n  a owl:Class ;\n  rdfs:label {}{} .\n\n",
            class.id,
            turtle_string(&class.label),
            subclasses
        ));
    }

    for ind in &ontology.individuals {
        let mut types = String::from("owl:NamedIndividual");
        for t in &ind.types {
            types.push_str(&format!(" , <{}>", t));
        }
        let mut ind_str = format!(
            "<{}>\n  a {} ;\n  rdfs:label {}",
            ind.id,
            types,
            turtle_string(&ind.label)
        );
        for rel in &ind.relations {
            ind_str.push_str(&format!(" ;\n  <{}> <{}>", rel.property, rel.target));
        }
        ind_str.push_str(" .\n\n");
        out.push_str(&ind_str);
    }

    out
}

fn turtle_string(s: &str) -> String {
    let escaped = s
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r");
    format!("\"{}\"", escaped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serializer::fixtures::{kitchen, BASE};
    use sophia_api::source::TripleSource;

    #[test]
    fn declares_robot_prefix() {
        let turtle = to_turtle(&kitchen());
        assert!(turtle.contains(&format!("@prefix robot: <{BASE}> .")));
        assert!(turtle.contains("owl:Ontology"));
    }

    #[test]
    fn joint_block_lists_type_and_links() {
        let turtle = to_turtle(&kitchen());
        let block = format!(
            "<{BASE}oven_hinge>\n  a owl:NamedIndividual , <{BASE}RevoluteJoint> ;\n  rdfs:label \"oven_hinge\" ;\n  <{BASE}hasParentLink> <{BASE}sink_area> ;\n  <{BASE}hasChildLink> <{BASE}oven_door> ."
        );
        assert!(turtle.contains(&block), "missing block:\n{block}");
    }

    #[test]
    fn parses_as_turtle() {
        let turtle = to_turtle(&kitchen());
        let mut triples = 0usize;
        sophia_turtle::parser::turtle::parse_str(&turtle)
            .for_each_triple(|_| triples += 1)
            .expect("valid Turtle");
        assert!(triples > 0);
    }

    #[test]
    fn quotes_are_escaped() {
        assert_eq!(turtle_string("a \"b\"\n"), "\"a \\\"b\\\"\\n\"");
    }
}
