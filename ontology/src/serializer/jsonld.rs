//! JSON-LD 1.1 serializer.
//!
//! Produces a single document with an `@context` binding the standard
//! prefixes plus `robot:`, and a flat `@graph` of every resource.

use serde_json::{json, Map, Value};

use crate::model::iris::{OWL, RDF, RDFS, XSD};
use crate::model::{Class, Individual, Ontology, Property};

/// Serializes the ontology to a JSON-LD `Value`.
///
/// The returned value can be pretty-printed with [`serde_json::to_string_pretty`].
#[must_use]
pub fn to_json_ld(ontology: &Ontology) -> Value {
    let mut ctx = Map::new();
    ctx.insert("owl".to_owned(), json!(OWL));
    ctx.insert("rdf".to_owned(), json!(RDF));
    ctx.insert("rdfs".to_owned(), json!(RDFS));
    ctx.insert("xsd".to_owned(), json!(XSD));
    ctx.insert("robot".to_owned(), json!(ontology.namespace));

    let mut nodes: Vec<Value> = Vec::new();
    nodes.push(json!({
        "@id": ontology.iri,
        "@type": "owl:Ontology"
    }));
    nodes.extend(ontology.properties.iter().map(property_to_json));
    nodes.extend(ontology.classes.iter().map(class_to_json));
    nodes.extend(ontology.individuals.iter().map(individual_to_json));

    json!({
        "@context": Value::Object(ctx),
        "@graph": nodes
    })
}

fn property_to_json(prop: &Property) -> Value {
    let type_ = if prop.transitive {
        json!(["owl:ObjectProperty", "owl:TransitiveProperty"])
    } else {
        json!("owl:ObjectProperty")
    };
    json!({
        "@id": prop.id,
        "@type": type_,
        "rdfs:label": prop.label,
        "rdfs:domain": { "@id": prop.domain },
        "rdfs:range": { "@id": prop.range }
    })
}

fn class_to_json(class: &Class) -> Value {
    let subclass_of: Vec<Value> = class
        .subclass_of
        .iter()
        .map(|iri| json!({ "@id": iri }))
        .collect();
    json!({
        "@id": class.id,
        "@type": "owl:Class",
        "rdfs:label": class.label,
        "rdfs:subClassOf": subclass_of
    })
}

fn individual_to_json(ind: &Individual) -> Value {
    let mut types = vec![json!("owl:NamedIndividual")];
    types.extend(ind.types.iter().map(|t| json!(t)));

    let mut node = Map::new();
    node.insert("@id".to_owned(), json!(ind.id));
    node.insert("@type".to_owned(), Value::Array(types));
    node.insert("rdfs:label".to_owned(), json!(ind.label));

    // Repeated properties are grouped into one array per key.
    for rel in &ind.relations {
        let target = json!({ "@id": rel.target });
        match node.get_mut(&rel.property) {
            Some(Value::Array(targets)) => targets.push(target),
            _ => {
                node.insert(rel.property.clone(), Value::Array(vec![target]));
            }
        }
    }

    Value::Object(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serializer::fixtures::{kitchen, BASE};

    #[test]
    fn produces_context_and_graph() {
        let json = to_json_ld(&kitchen());
        assert_eq!(json["@context"]["robot"], BASE);
        assert!(json["@graph"].is_array());
    }

    #[test]
    fn graph_has_one_node_per_resource() {
        let ontology = kitchen();
        let json = to_json_ld(&ontology);
        let graph = json["@graph"].as_array().expect("@graph must be array");
        let expected = 1 + ontology.properties.len() + ontology.classes.len() + ontology.individuals.len();
        assert_eq!(graph.len(), expected);
        for (i, node) in graph.iter().enumerate() {
            assert!(node["@id"].is_string(), "Node at index {i} is missing @id");
        }
    }

    #[test]
    fn relations_are_grouped_by_property() {
        let json = to_json_ld(&kitchen());
        let graph = json["@graph"].as_array().expect("@graph must be array");
        let world = graph
            .iter()
            .find(|n| n["@id"] == format!("{BASE}world"))
            .expect("world node");
        let parts = world[format!("{BASE}hasPart")].as_array().expect("hasPart array");
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0]["@id"], format!("{BASE}sink_area"));
    }
}
