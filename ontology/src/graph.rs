//! Kinematic graph extraction.
//!
//! Reads the `link` and `joint` children of a URDF root element into a
//! [`KinematicGraph`]. Extraction is tolerant: missing attributes degrade to
//! `None` instead of failing, and structural problems are reported afterwards
//! by [`KinematicGraph::issues`] so the caller decides whether they are fatal.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::error::{Error, Result};

/// The motion type of a joint, as named by the URDF `type` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JointKind {
    /// Rotation about an axis, with limits.
    Revolute,
    /// Rotation about an axis, unlimited.
    Continuous,
    /// Translation along an axis.
    Prismatic,
    /// No relative motion.
    Fixed,
    /// Six degrees of freedom.
    Floating,
    /// Motion in a plane.
    Planar,
    /// Missing or unrecognised `type` attribute.
    Generic,
}

impl JointKind {
    /// All kinds with a dedicated ontology subclass.
    pub const SPECIFIC: [JointKind; 6] = [
        JointKind::Revolute,
        JointKind::Continuous,
        JointKind::Prismatic,
        JointKind::Fixed,
        JointKind::Floating,
        JointKind::Planar,
    ];

    /// Parses a URDF `type` attribute. Case-insensitive; anything unknown,
    /// including a missing attribute, is [`JointKind::Generic`].
    #[must_use]
    pub fn from_urdf(value: Option<&str>) -> Self {
        let Some(value) = value else {
            return JointKind::Generic;
        };
        match value.trim().to_ascii_lowercase().as_str() {
            "revolute" => JointKind::Revolute,
            "continuous" => JointKind::Continuous,
            "prismatic" => JointKind::Prismatic,
            "fixed" => JointKind::Fixed,
            "floating" => JointKind::Floating,
            "planar" => JointKind::Planar,
            _ => JointKind::Generic,
        }
    }

    /// Local name of the ontology class individuals of this kind are typed by.
    #[must_use]
    pub fn class_name(self) -> &'static str {
        match self {
            JointKind::Revolute => "RevoluteJoint",
            JointKind::Continuous => "ContinuousJoint",
            JointKind::Prismatic => "PrismaticJoint",
            JointKind::Fixed => "FixedJoint",
            JointKind::Floating => "FloatingJoint",
            JointKind::Planar => "PlanarJoint",
            JointKind::Generic => "Joint",
        }
    }
}

/// One `joint` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Joint {
    /// The `name` attribute, if present.
    pub name: Option<String>,
    /// Parsed motion type.
    pub kind: JointKind,
    /// The raw `type` attribute.
    pub type_attr: Option<String>,
    /// `parent/@link`, if the element is present and the attribute non-empty.
    pub parent: Option<String>,
    /// `child/@link`, if the element is present and the attribute non-empty.
    pub child: Option<String>,
}

impl Joint {
    /// Name of the ontology individual for the joint at `position` in
    /// [`KinematicGraph::joints`]: its own name, or `unnamed_joint_<position>`.
    #[must_use]
    pub fn individual_name(&self, position: usize) -> Cow<'_, str> {
        match &self.name {
            Some(name) => Cow::Borrowed(name),
            None => Cow::Owned(format!("unnamed_joint_{position}")),
        }
    }
}

/// Which end of a joint a reference belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JointSide {
    /// The `parent` element.
    Parent,
    /// The `child` element.
    Child,
}

impl fmt::Display for JointSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            JointSide::Parent => "parent",
            JointSide::Child => "child",
        })
    }
}

/// A structural problem found after extraction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphIssue {
    /// Two `link` elements share a name.
    #[error("link {0:?} is declared more than once")]
    DuplicateLink(String),
    /// Two `joint` elements share a name; the later one replaced the earlier.
    #[error("joint {0:?} is declared more than once; the last declaration wins")]
    DuplicateJoint(String),
    /// A `joint` element has no `name` attribute.
    #[error("joint #{index} has no name attribute")]
    UnnamedJoint {
        /// Zero-based position among the document's `joint` elements.
        index: usize,
    },
    /// A joint points at a link that is not declared.
    #[error("joint {} references unknown {side} link {link:?}", display_name(.joint))]
    DanglingLink {
        /// Joint name, if it has one.
        joint: Option<String>,
        /// Which end carries the bad reference.
        side: JointSide,
        /// The referenced link name.
        link: String,
    },
    /// A joint's individual name is already taken by a link or by another
    /// joint, so both would share one individual.
    #[error("joint name {0:?} collides with another link or joint individual")]
    NameClash(String),
}

fn display_name(name: &Option<String>) -> String {
    match name {
        Some(name) => format!("{name:?}"),
        None => "<unnamed>".to_owned(),
    }
}

/// Links, joints and parent → children adjacency of one URDF document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KinematicGraph {
    links: Vec<String>,
    joints: Vec<Joint>,
    joint_index: HashMap<Option<String>, usize>,
    shadowed_joints: Vec<Joint>,
    unnamed_joints: Vec<usize>,
    children: BTreeMap<String, Vec<String>>,
}

impl KinematicGraph {
    /// Link names in document order, duplicates included.
    #[must_use]
    pub fn links(&self) -> &[String] {
        &self.links
    }

    /// Joints in first-declaration order, one per distinct name.
    #[must_use]
    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    /// Looks up a joint by name; `None` finds the surviving nameless joint.
    #[must_use]
    pub fn joint(&self, name: Option<&str>) -> Option<&Joint> {
        self.joint_index
            .get(&name.map(str::to_owned))
            .map(|&i| &self.joints[i])
    }

    /// Joints that were replaced by a later joint with the same name.
    #[must_use]
    pub fn shadowed_joints(&self) -> &[Joint] {
        &self.shadowed_joints
    }

    /// Parent link name → child link names, in document order.
    #[must_use]
    pub fn adjacency(&self) -> &BTreeMap<String, Vec<String>> {
        &self.children
    }

    /// Children recorded for `parent`; empty if it has none.
    #[must_use]
    pub fn children_of(&self, parent: &str) -> &[String] {
        self.children.get(parent).map_or(&[], Vec::as_slice)
    }

    /// Number of parent → child edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.children.values().map(Vec::len).sum()
    }

    /// Returns `true` if a link with this name was declared.
    #[must_use]
    pub fn has_link(&self, name: &str) -> bool {
        self.links.iter().any(|l| l == name)
    }

    /// Structural problems: duplicate links, unnamed or duplicate joints,
    /// joint ends naming undeclared links, and joint names that collide with
    /// a link or another joint's individual.
    #[must_use]
    pub fn issues(&self) -> Vec<GraphIssue> {
        let mut issues = Vec::new();

        let mut seen = HashSet::new();
        for link in &self.links {
            if !seen.insert(link.as_str()) {
                issues.push(GraphIssue::DuplicateLink(link.clone()));
            }
        }

        for &index in &self.unnamed_joints {
            issues.push(GraphIssue::UnnamedJoint { index });
        }
        for joint in &self.shadowed_joints {
            if let Some(name) = &joint.name {
                issues.push(GraphIssue::DuplicateJoint(name.clone()));
            }
        }

        for joint in &self.joints {
            let ends = [
                (JointSide::Parent, &joint.parent),
                (JointSide::Child, &joint.child),
            ];
            for (side, end) in ends {
                if let Some(link) = end {
                    if !seen.contains(link.as_str()) {
                        issues.push(GraphIssue::DanglingLink {
                            joint: joint.name.clone(),
                            side,
                            link: link.clone(),
                        });
                    }
                }
            }
        }

        let mut individuals: HashSet<Cow<'_, str>> =
            seen.iter().map(|&link| Cow::Borrowed(link)).collect();
        for (position, joint) in self.joints.iter().enumerate() {
            let name = joint.individual_name(position);
            if !individuals.insert(name.clone()) {
                issues.push(GraphIssue::NameClash(name.into_owned()));
            }
        }

        issues
    }

    fn insert_joint(&mut self, joint: Joint) {
        match self.joint_index.get(&joint.name) {
            Some(&i) => {
                let old = std::mem::replace(&mut self.joints[i], joint);
                self.shadowed_joints.push(old);
            }
            None => {
                self.joint_index.insert(joint.name.clone(), self.joints.len());
                self.joints.push(joint);
            }
        }
    }
}

/// Extracts the kinematic graph from a parsed URDF document.
#[must_use]
pub fn extract(document: &roxmltree::Document<'_>) -> KinematicGraph {
    let root = document.root_element();
    let mut graph = KinematicGraph::default();

    for link in elements(root, "link") {
        if let Some(name) = link.attribute("name").filter(|n| !n.is_empty()) {
            graph.links.push(name.to_owned());
        }
    }

    for (index, node) in elements(root, "joint").enumerate() {
        let joint = Joint {
            name: node.attribute("name").map(str::to_owned),
            kind: JointKind::from_urdf(node.attribute("type")),
            type_attr: node.attribute("type").map(str::to_owned),
            parent: end_link(node, "parent"),
            child: end_link(node, "child"),
        };
        if joint.name.is_none() {
            graph.unnamed_joints.push(index);
        }
        if let (Some(parent), Some(child)) = (&joint.parent, &joint.child) {
            graph
                .children
                .entry(parent.clone())
                .or_default()
                .push(child.clone());
        }
        graph.insert_joint(joint);
    }

    debug!(
        links = graph.links.len(),
        joints = graph.joints.len(),
        edges = graph.edge_count(),
        "extracted kinematic graph"
    );
    graph
}

/// Parses `xml` and extracts its kinematic graph.
///
/// # Errors
///
/// Returns [`Error::Parse`] if `xml` is not well-formed.
pub fn extract_str(xml: &str) -> Result<KinematicGraph> {
    let document = roxmltree::Document::parse(xml)?;
    Ok(extract(&document))
}

/// Reads and parses the URDF file at `path`.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read and [`Error::Parse`] if it
/// is not well-formed XML.
pub fn extract_file(path: &Path) -> Result<KinematicGraph> {
    let xml = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    extract_str(&xml)
}

fn elements<'a, 'input: 'a>(
    parent: roxmltree::Node<'a, 'input>,
    tag: &'static str,
) -> impl Iterator<Item = roxmltree::Node<'a, 'input>> {
    parent
        .children()
        .filter(move |n| n.is_element() && n.tag_name().name() == tag)
}

fn end_link(joint: roxmltree::Node<'_, '_>, tag: &'static str) -> Option<String> {
    elements(joint, tag)
        .next()
        .and_then(|end| end.attribute("link"))
        .filter(|link| !link.is_empty())
        .map(str::to_owned)
}
