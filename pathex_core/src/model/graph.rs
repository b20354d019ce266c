//! Read-only pathway graph with reverse indices.

use std::collections::HashMap;

use super::node::{
    Control, Conversion, EntityReference, ModificationFeature, Node, NodeBody, NodeId, NodeKind,
    PhysicalEntity, Xref,
};
use crate::error::{ModelError, Result};

const EMPTY: &[NodeId] = &[];

/// Reverse edges computed once when the model is built.
#[derive(Debug, Default, Clone)]
pub(crate) struct ReverseIndex {
    /// Entity reference → physical entities instantiating it.
    pub entity_reference_of: HashMap<NodeId, Vec<NodeId>>,
    /// Physical entity → complexes listing it as a component.
    pub component_of: HashMap<NodeId, Vec<NodeId>>,
    /// Physical entity → generic physical entities grouping it.
    pub member_entity_of: HashMap<NodeId, Vec<NodeId>>,
    /// Entity reference → generic references grouping it.
    pub member_reference_of: HashMap<NodeId, Vec<NodeId>>,
    /// Physical entity → controls it acts as controller in.
    pub controller_of: HashMap<NodeId, Vec<NodeId>>,
}

impl ReverseIndex {
    pub(crate) fn build(nodes: &[Node]) -> Self {
        let mut index = Self::default();
        for (i, node) in nodes.iter().enumerate() {
            let id = NodeId(i);
            match &node.body {
                NodeBody::EntityReference(er) => {
                    for member in &er.member_references {
                        push(&mut index.member_reference_of, *member, id);
                    }
                }
                NodeBody::PhysicalEntity(pe) => {
                    if let Some(er) = pe.entity_reference {
                        push(&mut index.entity_reference_of, er, id);
                    }
                    for component in &pe.components {
                        push(&mut index.component_of, *component, id);
                    }
                    for member in &pe.member_entities {
                        push(&mut index.member_entity_of, *member, id);
                    }
                }
                NodeBody::Control(control) => {
                    for controller in &control.controllers {
                        push(&mut index.controller_of, *controller, id);
                    }
                }
                NodeBody::ModificationFeature(_)
                | NodeBody::Conversion(_)
                | NodeBody::Evidence
                | NodeBody::Xref(_) => {}
            }
        }
        index
    }
}

fn push(map: &mut HashMap<NodeId, Vec<NodeId>>, key: NodeId, value: NodeId) {
    let entry = map.entry(key).or_default();
    if !entry.contains(&value) {
        entry.push(value);
    }
}

/// An immutable, already-loaded pathway model.
///
/// Created through [`ModelBuilder`](super::ModelBuilder); every stored
/// reference is guaranteed to point at an existing node.
#[derive(Debug, Clone)]
pub struct PathwayModel {
    pub(crate) nodes: Vec<Node>,
    pub(crate) by_uri: HashMap<String, NodeId>,
    pub(crate) reverse: ReverseIndex,
}

impl PathwayModel {
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id.0).ok_or(ModelError::UnknownNode(id))
    }

    /// Kind tag of a node.
    pub fn kind(&self, id: NodeId) -> Result<NodeKind> {
        self.node(id).map(Node::kind)
    }

    /// Look a node up by its URI.
    #[must_use]
    pub fn lookup(&self, uri: &str) -> Option<NodeId> {
        self.by_uri.get(uri).copied()
    }

    /// All node ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Ids of all nodes whose kind is `kind` or one of its subkinds.
    #[must_use]
    pub fn nodes_of_kind(&self, kind: NodeKind) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.kind().is_a(kind))
            .map(|(i, _)| NodeId(i))
            .collect()
    }

    fn mismatch(&self, id: NodeId, expected: NodeKind) -> ModelError {
        match self.kind(id) {
            Ok(found) => ModelError::TypeMismatch {
                node: id,
                expected,
                found,
            },
            Err(e) => e,
        }
    }

    pub fn entity_reference(&self, id: NodeId) -> Result<&EntityReference> {
        match &self.node(id)?.body {
            NodeBody::EntityReference(er) => Ok(er),
            _ => Err(self.mismatch(id, NodeKind::EntityReference)),
        }
    }

    pub fn physical_entity(&self, id: NodeId) -> Result<&PhysicalEntity> {
        match &self.node(id)?.body {
            NodeBody::PhysicalEntity(pe) => Ok(pe),
            _ => Err(self.mismatch(id, NodeKind::PhysicalEntity)),
        }
    }

    pub fn modification_feature(&self, id: NodeId) -> Result<&ModificationFeature> {
        match &self.node(id)?.body {
            NodeBody::ModificationFeature(mf) => Ok(mf),
            _ => Err(self.mismatch(id, NodeKind::ModificationFeature)),
        }
    }

    pub fn control(&self, id: NodeId) -> Result<&Control> {
        match &self.node(id)?.body {
            NodeBody::Control(control) => Ok(control),
            _ => Err(self.mismatch(id, NodeKind::Control)),
        }
    }

    pub fn conversion(&self, id: NodeId) -> Result<&Conversion> {
        match &self.node(id)?.body {
            NodeBody::Conversion(conversion) => Ok(conversion),
            _ => Err(self.mismatch(id, NodeKind::Conversion)),
        }
    }

    pub fn xref(&self, id: NodeId) -> Result<&Xref> {
        match &self.node(id)?.body {
            NodeBody::Xref(xref) => Ok(xref),
            _ => Err(self.mismatch(id, NodeKind::Xref)),
        }
    }

    /// Materialized cross-references of a node.
    pub fn xrefs_of(&self, id: NodeId) -> Result<Vec<&Xref>> {
        self.node(id)?
            .xrefs
            .iter()
            .map(|x| self.xref(*x))
            .collect()
    }

    /// Physical entities whose entity reference is `er`.
    #[must_use]
    pub fn physical_entities_of(&self, er: NodeId) -> &[NodeId] {
        self.reverse
            .entity_reference_of
            .get(&er)
            .map_or(EMPTY, Vec::as_slice)
    }

    /// Complexes directly listing `pe` as a component.
    #[must_use]
    pub fn complexes_containing(&self, pe: NodeId) -> &[NodeId] {
        self.reverse.component_of.get(&pe).map_or(EMPTY, Vec::as_slice)
    }

    /// Generic physical entities directly grouping `pe`.
    #[must_use]
    pub fn generic_entities_of(&self, pe: NodeId) -> &[NodeId] {
        self.reverse
            .member_entity_of
            .get(&pe)
            .map_or(EMPTY, Vec::as_slice)
    }

    /// Generic entity references directly grouping `er`.
    #[must_use]
    pub fn generic_references_of(&self, er: NodeId) -> &[NodeId] {
        self.reverse
            .member_reference_of
            .get(&er)
            .map_or(EMPTY, Vec::as_slice)
    }

    /// Controls in which `pe` is a controller.
    #[must_use]
    pub fn controls_of(&self, pe: NodeId) -> &[NodeId] {
        self.reverse.controller_of.get(&pe).map_or(EMPTY, Vec::as_slice)
    }
}
