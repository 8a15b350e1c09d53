//! N-Triples serializer.
//!
//! One triple per line, absolute IRIs only. Suitable for diffs and bulk
//! loading.

use crate::model::iris::{
    OWL_CLASS, OWL_NAMED_INDIVIDUAL, OWL_OBJECT_PROPERTY, OWL_ONTOLOGY, OWL_TRANSITIVE_PROPERTY,
    RDFS_DOMAIN, RDFS_LABEL, RDFS_RANGE, RDFS_SUBCLASS_OF, RDF_TYPE, XSD_STRING,
};
use crate::model::Ontology;

/// Serializes the ontology to an N-Triples string.
#[must_use]
pub fn to_ntriples(ontology: &Ontology) -> String {
    let mut out = String::with_capacity(16 * 1024);

    triple(&mut out, &ontology.iri, RDF_TYPE, &iri(OWL_ONTOLOGY));

    for prop in &ontology.properties {
        triple(&mut out, &prop.id, RDF_TYPE, &iri(OWL_OBJECT_PROPERTY));
        if prop.transitive {
            triple(&mut out, &prop.id, RDF_TYPE, &iri(OWL_TRANSITIVE_PROPERTY));
        }
        triple(&mut out, &prop.id, RDFS_LABEL, &lit(&prop.label));
        triple(&mut out, &prop.id, RDFS_DOMAIN, &iri(&prop.domain));
        triple(&mut out, &prop.id, RDFS_RANGE, &iri(&prop.range));
    }

    for class in &ontology.classes {
        triple(&mut out, &class.id, RDF_TYPE, &iri(OWL_CLASS));
        triple(&mut out, &class.id, RDFS_LABEL, &lit(&class.label));
        for parent in &class.subclass_of {
            triple(&mut out, &class.id, RDFS_SUBCLASS_OF, &iri(parent));
        }
    }

    for ind in &ontology.individuals {
        triple(&mut out, &ind.id, RDF_TYPE, &iri(OWL_NAMED_INDIVIDUAL));
        for t in &ind.types {
            triple(&mut out, &ind.id, RDF_TYPE, &iri(t));
        }
        triple(&mut out, &ind.id, RDFS_LABEL, &lit(&ind.label));
        for rel in &ind.relations {
            triple(&mut out, &ind.id, &rel.property, &iri(&rel.target));
        }
    }

    out
}

fn triple(out: &mut String, subj: &str, pred: &str, obj: &str) {
    out.push('<');
    out.push_str(subj);
    out.push_str("> <");
    out.push_str(pred);
    out.push_str("> ");
    out.push_str(obj);
    out.push_str(" .\n");
}

fn iri(s: &str) -> String {
    format!("<{}>", s)
}

fn lit(s: &str) -> String {
    let escaped = s
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r");
    format!("\"{}\"^^<{}>", escaped, XSD_STRING)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serializer::fixtures::{kitchen, BASE};
    use sophia_api::source::TripleSource;

    #[test]
    fn every_line_ends_with_period() {
        let nt = to_ntriples(&kitchen());
        for line in nt.lines() {
            assert!(line.ends_with(" ."), "Line does not end with ' .': {line}");
        }
    }

    #[test]
    fn has_part_edges_are_present() {
        let nt = to_ntriples(&kitchen());
        assert!(nt.contains(&format!("<{BASE}world> <{BASE}hasPart> <{BASE}sink_area> .")));
        assert!(nt.contains(&format!("<{BASE}sink_area> <{BASE}hasPart> <{BASE}oven_door> .")));
    }

    #[test]
    fn concept_types_are_present() {
        let nt = to_ntriples(&kitchen());
        assert!(nt.contains(&format!("<{BASE}oven_door> <{RDF_TYPE}> <{BASE}Door> .")));
        assert!(nt.contains(&format!("<{BASE}sink_area> <{RDF_TYPE}> <{BASE}Sink> .")));
    }

    #[test]
    fn parses_as_ntriples_with_one_triple_per_line() {
        let nt = to_ntriples(&kitchen());
        let mut triples = 0usize;
        sophia_turtle::parser::nt::parse_str(&nt)
            .for_each_triple(|_| triples += 1)
            .expect("valid N-Triples");
        assert_eq!(triples, nt.lines().count());
    }
}
