mod builder;
mod graph;
mod node;

pub use builder::ModelBuilder;
pub use graph::PathwayModel;
pub use node::{
    Control, Conversion, Direction, EntityReference, ModificationFeature, Node, NodeBody, NodeId,
    NodeKind, PhysicalEntity, PhysicalEntityKind, PositionStatus, ReferenceKind, SequenceSite,
    Xref,
};
