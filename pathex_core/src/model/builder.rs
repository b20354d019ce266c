//! Incremental construction of a [`PathwayModel`].
//!
//! The external loader (or a test) adds nodes in any order and wires them by
//! [`NodeId`]; [`ModelBuilder::build`] validates every edge once and freezes
//! the graph.

use std::collections::HashMap;

use super::graph::{PathwayModel, ReverseIndex};
use super::node::{
    Control, Conversion, EntityReference, ModificationFeature, Node, NodeBody, NodeId, NodeKind,
    PhysicalEntity, PhysicalEntityKind, ReferenceKind, SequenceSite, Xref,
};
use crate::error::{ModelError, Result};

#[derive(Debug, Default)]
pub struct ModelBuilder {
    nodes: Vec<Node>,
}

impl ModelBuilder {
    #[must_use]
    pub const fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Add a node and return its id.
    pub fn add(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// Mutable access to an already added node.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    pub fn xref(&mut self, uri: &str, db: &str, id: &str) -> NodeId {
        self.add(Node::new(
            uri,
            NodeBody::Xref(Xref {
                db: Some(db.to_string()),
                id: Some(id.to_string()),
                urls: Vec::new(),
            }),
        ))
    }

    /// A publication cross-reference known only by URL.
    pub fn url_xref(&mut self, uri: &str, url: &str) -> NodeId {
        self.add(Node::new(
            uri,
            NodeBody::Xref(Xref {
                db: None,
                id: None,
                urls: vec![url.to_string()],
            }),
        ))
    }

    pub fn entity_reference(
        &mut self,
        uri: &str,
        kind: ReferenceKind,
        name: &str,
        xrefs: Vec<NodeId>,
    ) -> NodeId {
        self.add(
            Node::new(
                uri,
                NodeBody::EntityReference(EntityReference {
                    kind,
                    member_references: Vec::new(),
                }),
            )
            .with_display_name(name)
            .with_xrefs(xrefs),
        )
    }

    pub fn protein_reference(&mut self, uri: &str, name: &str, xrefs: Vec<NodeId>) -> NodeId {
        self.entity_reference(uri, ReferenceKind::Protein, name, xrefs)
    }

    pub fn physical_entity(
        &mut self,
        uri: &str,
        kind: PhysicalEntityKind,
        entity_reference: Option<NodeId>,
        features: Vec<NodeId>,
    ) -> NodeId {
        self.add(Node::new(
            uri,
            NodeBody::PhysicalEntity(PhysicalEntity {
                kind,
                entity_reference,
                features,
                ..PhysicalEntity::default()
            }),
        ))
    }

    pub fn protein(&mut self, uri: &str, entity_reference: NodeId, features: Vec<NodeId>) -> NodeId {
        self.physical_entity(
            uri,
            PhysicalEntityKind::Protein,
            Some(entity_reference),
            features,
        )
    }

    pub fn complex(&mut self, uri: &str, components: Vec<NodeId>) -> NodeId {
        self.add(Node::new(
            uri,
            NodeBody::PhysicalEntity(PhysicalEntity {
                kind: PhysicalEntityKind::Complex,
                components,
                ..PhysicalEntity::default()
            }),
        ))
    }

    pub fn modification(
        &mut self,
        uri: &str,
        terms: &[&str],
        location: Option<SequenceSite>,
    ) -> NodeId {
        self.add(Node::new(
            uri,
            NodeBody::ModificationFeature(ModificationFeature {
                terms: terms.iter().map(ToString::to_string).collect(),
                location,
            }),
        ))
    }

    pub fn evidence(&mut self, uri: &str, xrefs: Vec<NodeId>) -> NodeId {
        self.add(Node::new(uri, NodeBody::Evidence).with_xrefs(xrefs))
    }

    pub fn conversion(
        &mut self,
        uri: &str,
        left: Vec<NodeId>,
        right: Vec<NodeId>,
        evidence: Vec<NodeId>,
    ) -> NodeId {
        self.add(Node::new(
            uri,
            NodeBody::Conversion(Conversion {
                left,
                right,
                evidence,
                ..Conversion::default()
            }),
        ))
    }

    pub fn control(&mut self, uri: &str, controllers: Vec<NodeId>, controlled: Vec<NodeId>) -> NodeId {
        self.add(Node::new(
            uri,
            NodeBody::Control(Control {
                controllers,
                controlled,
                direction: None,
            }),
        ))
    }

    /// Validate all edges and freeze the model.
    ///
    /// # Errors
    /// Returns an error on duplicate URIs, dangling references, edges
    /// pointing at a node of the wrong kind, or a complex that contains
    /// itself.
    pub fn build(self) -> Result<PathwayModel> {
        let mut by_uri = HashMap::with_capacity(self.nodes.len());
        for (i, node) in self.nodes.iter().enumerate() {
            if by_uri.insert(node.uri.clone(), NodeId(i)).is_some() {
                return Err(ModelError::DuplicateUri(node.uri.clone()));
            }
        }

        for node in &self.nodes {
            for target in node.outgoing() {
                if target.0 >= self.nodes.len() {
                    return Err(ModelError::DanglingReference {
                        uri: node.uri.clone(),
                        target,
                    });
                }
            }
            Self::check_edge_kinds(&self.nodes, node)?;
        }
        Self::check_component_cycles(&self.nodes)?;

        let reverse = ReverseIndex::build(&self.nodes);
        Ok(PathwayModel {
            nodes: self.nodes,
            by_uri,
            reverse,
        })
    }

    fn check_edge_kinds(nodes: &[Node], node: &Node) -> Result<()> {
        let check = |ids: &[NodeId], expected: NodeKind| -> Result<()> {
            for id in ids {
                let found = nodes[id.0].kind();
                if !found.is_a(expected) {
                    return Err(ModelError::TypeMismatch {
                        node: *id,
                        expected,
                        found,
                    });
                }
            }
            Ok(())
        };

        check(&node.xrefs, NodeKind::Xref)?;
        match &node.body {
            NodeBody::EntityReference(er) => {
                check(&er.member_references, NodeKind::EntityReference)?;
            }
            NodeBody::PhysicalEntity(pe) => {
                if let Some(er) = pe.entity_reference {
                    check(&[er], NodeKind::EntityReference)?;
                }
                check(&pe.components, NodeKind::PhysicalEntity)?;
                check(&pe.member_entities, NodeKind::PhysicalEntity)?;
                check(&pe.features, NodeKind::ModificationFeature)?;
            }
            NodeBody::Control(control) => {
                check(&control.controllers, NodeKind::PhysicalEntity)?;
                for id in &control.controlled {
                    let found = nodes[id.0].kind();
                    if !matches!(found, NodeKind::Conversion | NodeKind::Control) {
                        return Err(ModelError::TypeMismatch {
                            node: *id,
                            expected: NodeKind::Conversion,
                            found,
                        });
                    }
                }
            }
            NodeBody::Conversion(conversion) => {
                check(&conversion.left, NodeKind::PhysicalEntity)?;
                check(&conversion.right, NodeKind::PhysicalEntity)?;
                check(&conversion.evidence, NodeKind::Evidence)?;
            }
            NodeBody::ModificationFeature(_) | NodeBody::Evidence | NodeBody::Xref(_) => {}
        }
        Ok(())
    }

    /// Depth-first walk over complex components; reaching a node that is
    /// still on the stack means a cycle.
    fn check_component_cycles(nodes: &[Node]) -> Result<()> {
        #[derive(Clone, Copy, PartialEq, Eq)]
        enum Mark {
            Unvisited,
            OnStack,
            Done,
        }

        fn components(node: &Node) -> &[NodeId] {
            match &node.body {
                NodeBody::PhysicalEntity(pe) => &pe.components,
                _ => &[],
            }
        }

        let mut marks = vec![Mark::Unvisited; nodes.len()];
        for root in 0..nodes.len() {
            if marks[root] != Mark::Unvisited {
                continue;
            }
            marks[root] = Mark::OnStack;
            let mut stack = vec![(root, 0usize)];
            while let Some((node, next)) = stack.last_mut() {
                let node = *node;
                let Some(child) = components(&nodes[node]).get(*next) else {
                    marks[node] = Mark::Done;
                    stack.pop();
                    continue;
                };
                *next += 1;
                match marks[child.0] {
                    Mark::OnStack => {
                        return Err(ModelError::ComponentCycle(nodes[child.0].uri.clone()));
                    }
                    Mark::Unvisited => {
                        marks[child.0] = Mark::OnStack;
                        stack.push((child.0, 0));
                    }
                    Mark::Done => {}
                }
            }
        }
        Ok(())
    }
}
