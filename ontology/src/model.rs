//! Ontology model types.
//!
//! An [`Ontology`] is plain owned data produced by
//! [`OntologyBuilder`](crate::builder::OntologyBuilder) and consumed by the
//! serializers. All identifiers are full IRIs.

/// An OWL class definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Class {
    /// Full IRI (e.g. `"file://robot.owl#Drawer"`).
    pub id: String,
    /// Human-readable label.
    pub label: String,
    /// Full IRIs of parent classes (`rdfs:subClassOf`).
    pub subclass_of: Vec<String>,
}

/// An OWL object property definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    /// Full IRI.
    pub id: String,
    /// Human-readable label.
    pub label: String,
    /// Whether this is also an `owl:TransitiveProperty`.
    pub transitive: bool,
    /// Full IRI of the domain class.
    pub domain: String,
    /// Full IRI of the range class.
    pub range: String,
}

/// A property assertion from an individual to another resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    /// Full IRI of the object property.
    pub property: String,
    /// Full IRI of the target individual.
    pub target: String,
}

/// A named individual (`owl:NamedIndividual`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Individual {
    /// Full IRI.
    pub id: String,
    /// The URDF name the individual was created from.
    pub label: String,
    /// Full IRIs of the classes this individual is an instance of.
    pub types: Vec<String>,
    /// Object property assertions, in insertion order.
    pub relations: Vec<Relation>,
}

impl Individual {
    /// Targets of every assertion of `property`.
    pub fn targets<'a>(&'a self, property: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.relations
            .iter()
            .filter(move |r| r.property == property)
            .map(|r| r.target.as_str())
    }
}

/// A complete robot ontology: header, TBox, and ABox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ontology {
    /// IRI of the `owl:Ontology` resource (the namespace without its `#`).
    pub iri: String,
    /// Namespace every class, property and individual IRI starts with.
    pub namespace: String,
    /// Declared classes.
    pub classes: Vec<Class>,
    /// Declared object properties.
    pub properties: Vec<Property>,
    /// Link and joint individuals.
    pub individuals: Vec<Individual>,
}

impl Ontology {
    /// Looks up a class by its full IRI.
    #[must_use]
    pub fn find_class(&self, iri: &str) -> Option<&Class> {
        self.classes.iter().find(|c| c.id == iri)
    }

    /// Looks up a property by its full IRI.
    #[must_use]
    pub fn find_property(&self, iri: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.id == iri)
    }

    /// Looks up a named individual by its full IRI.
    #[must_use]
    pub fn find_individual(&self, iri: &str) -> Option<&Individual> {
        self.individuals.iter().find(|i| i.id == iri)
    }

    /// IRI of a term in this ontology's namespace; `local` is percent-encoded.
    #[must_use]
    pub fn term(&self, local: &str) -> String {
        format!("{}{}", self.namespace, encode_local(local))
    }
}

/// Percent-encodes every byte of `name` outside the IRI-safe set
/// `A-Z a-z 0-9 - . _ ~`.
#[must_use]
pub fn encode_local(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for byte in name.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~') {
            out.push(char::from(byte));
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

/// Standard IRI constants.
pub mod iris {
    /// OWL namespace.
    pub const OWL: &str = "http://www.w3.org/2002/07/owl#";
    /// RDF namespace.
    pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    /// RDFS namespace.
    pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
    /// XSD namespace.
    pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";

    /// `owl:Thing`.
    pub const OWL_THING: &str = "http://www.w3.org/2002/07/owl#Thing";
    /// `owl:Class`.
    pub const OWL_CLASS: &str = "http://www.w3.org/2002/07/owl#Class";
    /// `owl:Ontology`.
    pub const OWL_ONTOLOGY: &str = "http://www.w3.org/2002/07/owl#Ontology";
    /// `owl:ObjectProperty`.
    pub const OWL_OBJECT_PROPERTY: &str = "http://www.w3.org/2002/07/owl#ObjectProperty";
    /// `owl:TransitiveProperty`.
    pub const OWL_TRANSITIVE_PROPERTY: &str = "http://www.w3.org/2002/07/owl#TransitiveProperty";
    /// `owl:NamedIndividual`.
    pub const OWL_NAMED_INDIVIDUAL: &str = "http://www.w3.org/2002/07/owl#NamedIndividual";
    /// `rdf:type`.
    pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
    /// `rdfs:label`.
    pub const RDFS_LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
    /// `rdfs:subClassOf`.
    pub const RDFS_SUBCLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";
    /// `rdfs:domain`.
    pub const RDFS_DOMAIN: &str = "http://www.w3.org/2000/01/rdf-schema#domain";
    /// `rdfs:range`.
    pub const RDFS_RANGE: &str = "http://www.w3.org/2000/01/rdf-schema#range";
    /// `xsd:string`.
    pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
}
