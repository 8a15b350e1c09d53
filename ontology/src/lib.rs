//! URDF robot descriptions exported as OWL ontologies.
//!
//! The `urdf-ontology` crate reads the links and joints of a URDF document,
//! classifies each link against a vocabulary of semantic concepts (`Drawer`,
//! `Handle`, `Oven`, ...) by a name heuristic, and materializes the result as
//! an OWL ontology serialized to RDF/XML, Turtle, N-Triples, or JSON-LD.
//!
//! # Entry Point
//!
//! ```no_run
//! use std::path::Path;
//! use urdf_ontology::{export, ExportOptions, Vocabulary};
//!
//! let summary = export(
//!     Path::new("kitchen.urdf"),
//!     Path::new("kitchen.owl"),
//!     &Vocabulary::apartment(),
//!     &ExportOptions::default(),
//! )?;
//! println!("{} links, {} classified", summary.links, summary.assigned);
//! # Ok::<(), urdf_ontology::Error>(())
//! ```
//!
//! # In-memory use
//!
//! ```
//! use urdf_ontology::{build, extract_str, map_links_to_concepts, serializer, Format, Vocabulary};
//!
//! let graph = extract_str(r#"<robot><link name="oven_door"/></robot>"#)?;
//! let vocabulary = Vocabulary::apartment();
//! let assignment = map_links_to_concepts(graph.links(), &vocabulary);
//! let ontology = build(&graph, &vocabulary, &assignment, "http://example.org/robot#");
//! let turtle = serializer::serialize(&ontology, Format::Turtle)?;
//! assert!(turtle.contains("oven_door"));
//! # Ok::<(), urdf_ontology::Error>(())
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod builder;
pub mod concepts;
pub mod config;
pub mod error;
pub mod graph;
pub mod model;
pub mod pipeline;
pub mod serializer;

pub use builder::{build, OntologyBuilder};
pub use concepts::{map_links_to_concepts, Assignment, ConceptId, Vocabulary, DEFAULT_CONCEPTS};
pub use config::Config;
pub use error::{Error, Result};
pub use graph::{extract, extract_file, extract_str, GraphIssue, Joint, JointKind, KinematicGraph};
pub use model::{Class, Individual, Ontology, Property, Relation};
pub use pipeline::{export, ExportOptions, ExportSummary};
pub use serializer::Format;
