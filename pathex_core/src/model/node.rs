//! Node types of the pathway graph.
//!
//! Every element of a loaded pathway model is a [`Node`]: a shared header
//! (URI, display name, cross-references) plus a tagged [`NodeBody`]. Edges are
//! stored as [`NodeId`] indices into the owning [`PathwayModel`](super::PathwayModel).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a node inside a [`PathwayModel`](super::PathwayModel).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Flat runtime type tag of a node.
///
/// Tags form a small hierarchy; use [`NodeKind::is_a`] rather than equality
/// when a constraint accepts a family of kinds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum NodeKind {
    EntityReference,
    ProteinReference,
    SmallMoleculeReference,
    PhysicalEntity,
    Protein,
    SmallMolecule,
    Complex,
    ModificationFeature,
    Control,
    Conversion,
    Evidence,
    Xref,
}

impl NodeKind {
    /// Returns the string representation of this kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::EntityReference => "EntityReference",
            Self::ProteinReference => "ProteinReference",
            Self::SmallMoleculeReference => "SmallMoleculeReference",
            Self::PhysicalEntity => "PhysicalEntity",
            Self::Protein => "Protein",
            Self::SmallMolecule => "SmallMolecule",
            Self::Complex => "Complex",
            Self::ModificationFeature => "ModificationFeature",
            Self::Control => "Control",
            Self::Conversion => "Conversion",
            Self::Evidence => "Evidence",
            Self::Xref => "Xref",
        }
    }

    /// The direct parent kind, if any.
    #[must_use]
    pub const fn parent(&self) -> Option<Self> {
        match self {
            Self::ProteinReference | Self::SmallMoleculeReference => Some(Self::EntityReference),
            Self::Protein | Self::SmallMolecule | Self::Complex => Some(Self::PhysicalEntity),
            _ => None,
        }
    }

    /// Whether `self` is `other` or one of its subkinds.
    #[must_use]
    pub fn is_a(&self, other: Self) -> bool {
        let mut current = Some(*self);
        while let Some(kind) = current {
            if kind == other {
                return true;
            }
            current = kind.parent();
        }
        false
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Specialisation of an entity reference.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    #[default]
    Generic,
    Protein,
    SmallMolecule,
}

/// Specialisation of a physical entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PhysicalEntityKind {
    #[default]
    Generic,
    Protein,
    SmallMolecule,
    Complex,
}

/// Identity of a molecular species, independent of context.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityReference {
    pub kind: ReferenceKind,
    /// More specific references grouped under this one (generic → specific).
    #[serde(default)]
    pub member_references: Vec<NodeId>,
}

/// A context-specific instance of an entity reference.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhysicalEntity {
    pub kind: PhysicalEntityKind,
    #[serde(default)]
    pub entity_reference: Option<NodeId>,
    /// Complex members; empty unless `kind` is `Complex`.
    #[serde(default)]
    pub components: Vec<NodeId>,
    /// More specific physical entities grouped under this one.
    #[serde(default)]
    pub member_entities: Vec<NodeId>,
    /// Attached modification features; the builder rejects any other kind.
    #[serde(default)]
    pub features: Vec<NodeId>,
}

/// Reliability marker of a sequence position.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PositionStatus {
    Equal,
    GreaterThan,
    LessThan,
}

impl PositionStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Equal => "EQUAL",
            Self::GreaterThan => "GREATER_THAN",
            Self::LessThan => "LESS_THAN",
        }
    }
}

/// Residue position of a modification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SequenceSite {
    pub position: i32,
    #[serde(default)]
    pub status: Option<PositionStatus>,
}

/// A chemical modification annotated on a physical entity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModificationFeature {
    /// Terms of the sequence-modification vocabulary.
    #[serde(default)]
    pub terms: Vec<String>,
    #[serde(default)]
    pub location: Option<SequenceSite>,
}

/// Direction in which a reaction or its catalysis proceeds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    #[default]
    LeftToRight,
    RightToLeft,
    Reversible,
}

/// Regulatory link from controller entities to controlled processes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Control {
    #[serde(default)]
    pub controllers: Vec<NodeId>,
    /// Conversions or other controls.
    #[serde(default)]
    pub controlled: Vec<NodeId>,
    /// Overrides the conversion's own direction when set.
    #[serde(default)]
    pub direction: Option<Direction>,
}

/// A reaction turning left participants into right participants.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Conversion {
    #[serde(default)]
    pub left: Vec<NodeId>,
    #[serde(default)]
    pub right: Vec<NodeId>,
    #[serde(default)]
    pub direction: Direction,
    #[serde(default)]
    pub evidence: Vec<NodeId>,
}

/// Cross-reference to an external resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Xref {
    #[serde(default)]
    pub db: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub urls: Vec<String>,
}

/// Kind-specific payload of a node.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeBody {
    EntityReference(EntityReference),
    PhysicalEntity(PhysicalEntity),
    ModificationFeature(ModificationFeature),
    Control(Control),
    Conversion(Conversion),
    /// Evidence records carry their publications in the node's `xrefs`.
    Evidence,
    Xref(Xref),
}

/// One element of the pathway graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub uri: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub xrefs: Vec<NodeId>,
    pub body: NodeBody,
}

impl Node {
    #[must_use]
    pub fn new(uri: impl Into<String>, body: NodeBody) -> Self {
        Self {
            uri: uri.into(),
            display_name: None,
            xrefs: Vec::new(),
            body,
        }
    }

    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_xrefs(mut self, xrefs: Vec<NodeId>) -> Self {
        self.xrefs = xrefs;
        self
    }

    /// The flat kind tag of this node.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match &self.body {
            NodeBody::EntityReference(er) => match er.kind {
                ReferenceKind::Generic => NodeKind::EntityReference,
                ReferenceKind::Protein => NodeKind::ProteinReference,
                ReferenceKind::SmallMolecule => NodeKind::SmallMoleculeReference,
            },
            NodeBody::PhysicalEntity(pe) => match pe.kind {
                PhysicalEntityKind::Generic => NodeKind::PhysicalEntity,
                PhysicalEntityKind::Protein => NodeKind::Protein,
                PhysicalEntityKind::SmallMolecule => NodeKind::SmallMolecule,
                PhysicalEntityKind::Complex => NodeKind::Complex,
            },
            NodeBody::ModificationFeature(_) => NodeKind::ModificationFeature,
            NodeBody::Control(_) => NodeKind::Control,
            NodeBody::Conversion(_) => NodeKind::Conversion,
            NodeBody::Evidence => NodeKind::Evidence,
            NodeBody::Xref(_) => NodeKind::Xref,
        }
    }

    /// Every node id this node points at, for reference validation.
    pub(crate) fn outgoing(&self) -> Vec<NodeId> {
        let mut out = self.xrefs.clone();
        match &self.body {
            NodeBody::EntityReference(er) => out.extend(&er.member_references),
            NodeBody::PhysicalEntity(pe) => {
                out.extend(pe.entity_reference);
                out.extend(&pe.components);
                out.extend(&pe.member_entities);
                out.extend(&pe.features);
            }
            NodeBody::Control(c) => {
                out.extend(&c.controllers);
                out.extend(&c.controlled);
            }
            NodeBody::Conversion(c) => {
                out.extend(&c.left);
                out.extend(&c.right);
                out.extend(&c.evidence);
            }
            NodeBody::ModificationFeature(_) | NodeBody::Evidence | NodeBody::Xref(_) => {}
        }
        out
    }
}
