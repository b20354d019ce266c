//! Constraint vocabulary of the pattern language.
//!
//! A constraint relates an ordered tuple of pattern variables. Generative
//! constraints can enumerate candidates for their last variable from the
//! bindings of the others; every constraint can check a fully bound tuple.
//! Constraints are pure predicates over a read-only [`PathwayModel`].

use pathex_core::model::{Direction, NodeBody, NodeId, NodeKind, PathwayModel};
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use std::fmt;

/// Which side of a conversion a participant constraint selects.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RelType {
    Input,
    Output,
}

/// Direction of a modification change between two states of an entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    Gain,
    Loss,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Constraint {
    /// ER → itself and its generic (`up`) or specific (`!up`) relatives.
    LinkedEr { up: bool },
    /// ER → physical entities instantiating it.
    ErToPe,
    /// PE → its entity reference.
    PeToEr,
    /// PE → itself and every complex containing it, transitively.
    LinkToComplex,
    /// PE → itself and every specific member entity, transitively.
    LinkToSpecific,
    /// PE → complexes directly containing it.
    ComponentOf,
    /// Complex → its direct components.
    ComplexComponent,
    /// PE → controls it is a controller of.
    PeToControl,
    /// Control → conversions it governs, through nested controls.
    ControlToConv,
    /// Conversion → entity references of all participants.
    ParticipantEr,
    /// (Control, Conversion) → participants on the given side.
    Participant {
        side: RelType,
        treat_reversible_as_left_to_right: bool,
    },
    /// (PE, Conversion) → participants on the opposite side of PE.
    OtherSide,
    /// Two variables are (`true`) or are not (`false`) the same node.
    Equality(bool),
    /// The variable's kind is the given kind or a subkind.
    Type(NodeKind),
    /// A modification term containing `filter` is gained or lost between
    /// the first and second entity.
    ModificationChange { change: ChangeType, filter: String },
    Not(Box<Self>),
}

impl Constraint {
    #[must_use]
    pub fn not(inner: Self) -> Self {
        Self::Not(Box::new(inner))
    }

    #[must_use]
    pub fn modification_change(change: ChangeType, filter: impl Into<String>) -> Self {
        Self::ModificationChange {
            change,
            filter: filter.into(),
        }
    }

    /// Number of variables this constraint relates.
    #[must_use]
    pub fn arity(&self) -> usize {
        match self {
            Self::Type(_) => 1,
            Self::Participant { .. } | Self::OtherSide => 3,
            Self::Not(inner) => inner.arity(),
            _ => 2,
        }
    }

    /// Whether candidates for the last variable can be enumerated.
    #[must_use]
    pub const fn is_generative(&self) -> bool {
        !matches!(
            self,
            Self::Equality(_) | Self::Type(_) | Self::ModificationChange { .. } | Self::Not(_)
        )
    }

    /// Candidates for the last variable given the bound leading variables.
    ///
    /// Non-generative constraints, and nodes of an unexpected kind, yield
    /// no candidates.
    #[must_use]
    pub fn generate(&self, model: &PathwayModel, bound: &[NodeId]) -> Vec<NodeId> {
        let (Some(&first), second) = (bound.first(), bound.get(1).copied()) else {
            return Vec::new();
        };
        match self {
            Self::LinkedEr { up } => linked_er(model, first, *up),
            Self::ErToPe => model.physical_entities_of(first).to_vec(),
            Self::PeToEr => model
                .physical_entity(first)
                .ok()
                .and_then(|pe| pe.entity_reference)
                .into_iter()
                .collect(),
            Self::LinkToComplex => closure(first, |id| model.complexes_containing(id).to_vec()),
            Self::LinkToSpecific => closure(first, |id| {
                model
                    .physical_entity(id)
                    .map(|pe| pe.member_entities.clone())
                    .unwrap_or_default()
            }),
            Self::ComponentOf => model.complexes_containing(first).to_vec(),
            Self::ComplexComponent => model
                .physical_entity(first)
                .map(|pe| pe.components.clone())
                .unwrap_or_default(),
            Self::PeToControl => model.controls_of(first).to_vec(),
            Self::ControlToConv => control_to_conversions(model, first),
            Self::ParticipantEr => participant_ers(model, first),
            Self::Participant {
                side,
                treat_reversible_as_left_to_right,
            } => second.map_or_else(Vec::new, |conv| {
                participants(model, first, conv, *side, *treat_reversible_as_left_to_right)
            }),
            Self::OtherSide => second.map_or_else(Vec::new, |conv| other_side(model, first, conv)),
            Self::Equality(_) | Self::Type(_) | Self::ModificationChange { .. } | Self::Not(_) => {
                Vec::new()
            }
        }
    }

    /// Whether a fully bound tuple satisfies the constraint.
    #[must_use]
    pub fn satisfies(&self, model: &PathwayModel, nodes: &[NodeId]) -> bool {
        if nodes.len() != self.arity() {
            return false;
        }
        match self {
            Self::Equality(equal) => (nodes[0] == nodes[1]) == *equal,
            Self::Type(kind) => model.kind(nodes[0]).is_ok_and(|k| k.is_a(*kind)),
            Self::ModificationChange { change, filter } => {
                modification_changed(model, nodes[0], nodes[1], *change, filter)
            }
            Self::Not(inner) => !inner.satisfies(model, nodes),
            _ => {
                let (last, bound) = nodes.split_last().map_or((None, nodes), |(l, b)| (Some(l), b));
                last.is_some_and(|l| self.generate(model, bound).contains(l))
            }
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LinkedEr { up } => write!(f, "linkedER({up})"),
            Self::ErToPe => f.write_str("erToPE"),
            Self::PeToEr => f.write_str("peToER"),
            Self::LinkToComplex => f.write_str("linkToComplex"),
            Self::LinkToSpecific => f.write_str("linkToSpecific"),
            Self::ComponentOf => f.write_str("componentOf"),
            Self::ComplexComponent => f.write_str("complexComponent"),
            Self::PeToControl => f.write_str("peToControl"),
            Self::ControlToConv => f.write_str("controlToConv"),
            Self::ParticipantEr => f.write_str("participantER"),
            Self::Participant { side, .. } => write!(f, "participant({side:?})"),
            Self::OtherSide => f.write_str("conversionSide(OTHER_SIDE)"),
            Self::Equality(eq) => write!(f, "equality({eq})"),
            Self::Type(kind) => write!(f, "type({kind})"),
            Self::ModificationChange { change, filter } => {
                write!(f, "modificationChange({change:?}, {filter:?})")
            }
            Self::Not(inner) => write!(f, "NOT({inner})"),
        }
    }
}

/// Breadth-first reflexive-transitive closure of `step` from `start`.
fn closure(start: NodeId, mut step: impl FnMut(NodeId) -> Vec<NodeId>) -> Vec<NodeId> {
    let mut seen = HashSet::from([start]);
    let mut out = vec![start];
    let mut queue = VecDeque::from([start]);
    while let Some(id) = queue.pop_front() {
        for next in step(id) {
            if seen.insert(next) {
                out.push(next);
                queue.push_back(next);
            }
        }
    }
    out
}

fn linked_er(model: &PathwayModel, er: NodeId, up: bool) -> Vec<NodeId> {
    if model.entity_reference(er).is_err() {
        return Vec::new();
    }
    if up {
        closure(er, |id| model.generic_references_of(id).to_vec())
    } else {
        closure(er, |id| {
            model
                .entity_reference(id)
                .map(|e| e.member_references.clone())
                .unwrap_or_default()
        })
    }
}

fn control_to_conversions(model: &PathwayModel, control: NodeId) -> Vec<NodeId> {
    let mut out = Vec::new();
    for id in closure(control, |id| {
        model
            .control(id)
            .map(|c| c.controlled.clone())
            .unwrap_or_default()
    }) {
        if model.conversion(id).is_ok() {
            out.push(id);
        }
    }
    out
}

fn participant_ers(model: &PathwayModel, conversion: NodeId) -> Vec<NodeId> {
    let Ok(conv) = model.conversion(conversion) else {
        return Vec::new();
    };
    let mut out = Vec::new();
    for pe in conv.left.iter().chain(&conv.right) {
        // Descend into complexes and generic groupings down to simple entities.
        let expanded = closure(*pe, |id| {
            model
                .physical_entity(id)
                .map(|p| {
                    p.components
                        .iter()
                        .chain(&p.member_entities)
                        .copied()
                        .collect()
                })
                .unwrap_or_default()
        });
        for id in expanded {
            if let Some(er) = model.physical_entity(id).ok().and_then(|p| p.entity_reference) {
                if !out.contains(&er) {
                    out.push(er);
                }
            }
        }
    }
    out
}

fn participants(
    model: &PathwayModel,
    control: NodeId,
    conversion: NodeId,
    side: RelType,
    treat_reversible_as_left_to_right: bool,
) -> Vec<NodeId> {
    let (Ok(ctrl), Ok(conv)) = (model.control(control), model.conversion(conversion)) else {
        return Vec::new();
    };
    let direction = ctrl.direction.unwrap_or(conv.direction);
    let left_is_input = match direction {
        Direction::LeftToRight => Some(true),
        Direction::RightToLeft => Some(false),
        Direction::Reversible if treat_reversible_as_left_to_right => Some(true),
        Direction::Reversible => None,
    };
    match (left_is_input, side) {
        (Some(true), RelType::Input) | (Some(false), RelType::Output) => conv.left.clone(),
        (Some(false), RelType::Input) | (Some(true), RelType::Output) => conv.right.clone(),
        (None, _) => {
            let mut both = conv.left.clone();
            both.extend(conv.right.iter().filter(|id| !conv.left.contains(id)));
            both
        }
    }
}

fn other_side(model: &PathwayModel, pe: NodeId, conversion: NodeId) -> Vec<NodeId> {
    let Ok(conv) = model.conversion(conversion) else {
        return Vec::new();
    };
    let mut out = Vec::new();
    if conv.left.contains(&pe) {
        out.extend(&conv.right);
    }
    if conv.right.contains(&pe) {
        for id in &conv.left {
            if !out.contains(id) {
                out.push(*id);
            }
        }
    }
    out
}

/// Lowercased modification terms on a physical entity.
fn modification_terms(model: &PathwayModel, pe: NodeId) -> HashSet<String> {
    let Ok(entity) = model.physical_entity(pe) else {
        return HashSet::new();
    };
    entity
        .features
        .iter()
        .filter_map(|f| model.node(*f).ok())
        .filter_map(|node| match &node.body {
            NodeBody::ModificationFeature(mf) => Some(mf.terms.iter()),
            _ => None,
        })
        .flatten()
        .map(|t| t.to_lowercase())
        .collect()
}

fn modification_changed(
    model: &PathwayModel,
    input: NodeId,
    output: NodeId,
    change: ChangeType,
    filter: &str,
) -> bool {
    let before = modification_terms(model, input);
    let after = modification_terms(model, output);
    let filter = filter.to_lowercase();
    let (from, to) = match change {
        ChangeType::Gain => (&before, &after),
        ChangeType::Loss => (&after, &before),
    };
    to.difference(from).any(|term| term.contains(&filter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathex_core::ModelBuilder;
    use pathex_core::model::{Node, PhysicalEntity, PhysicalEntityKind};

    #[test]
    fn test_arity_and_generativity() {
        assert_eq!(Constraint::Type(NodeKind::Protein).arity(), 1);
        assert_eq!(Constraint::OtherSide.arity(), 3);
        assert_eq!(Constraint::not(Constraint::LinkToSpecific).arity(), 2);
        assert!(Constraint::ErToPe.is_generative());
        assert!(!Constraint::not(Constraint::ErToPe).is_generative());
        assert!(!Constraint::Equality(false).is_generative());
    }

    #[test]
    fn test_link_to_complex_is_reflexive_and_transitive() {
        let mut b = ModelBuilder::new();
        let er = b.protein_reference("er", "A", Vec::new());
        let pe = b.protein("pe", er, Vec::new());
        let inner = b.complex("inner", vec![pe]);
        let outer = b.complex("outer", vec![inner]);
        let model = b.build().unwrap();

        assert_eq!(
            Constraint::LinkToComplex.generate(&model, &[pe]),
            vec![pe, inner, outer]
        );
        assert_eq!(Constraint::ComponentOf.generate(&model, &[pe]), vec![inner]);
        assert!(Constraint::LinkToComplex.satisfies(&model, &[pe, outer]));
        assert!(!Constraint::LinkToComplex.satisfies(&model, &[outer, pe]));
    }

    #[test]
    fn test_link_to_specific_follows_members() {
        let mut b = ModelBuilder::new();
        let er = b.protein_reference("er", "A", Vec::new());
        let specific = b.protein("specific", er, Vec::new());
        let generic = b.add(Node::new(
            "generic",
            NodeBody::PhysicalEntity(PhysicalEntity {
                kind: PhysicalEntityKind::Protein,
                member_entities: vec![specific],
                ..PhysicalEntity::default()
            }),
        ));
        let model = b.build().unwrap();

        assert_eq!(
            Constraint::LinkToSpecific.generate(&model, &[generic]),
            vec![generic, specific]
        );
        assert_eq!(
            Constraint::LinkToSpecific.generate(&model, &[specific]),
            vec![specific]
        );
    }

    #[test]
    fn test_participant_respects_direction() {
        let mut b = ModelBuilder::new();
        let er = b.protein_reference("er", "A", Vec::new());
        let left = b.protein("left", er, Vec::new());
        let right = b.protein("right", er, Vec::new());
        let conv = b.conversion("conv", vec![left], vec![right], Vec::new());
        let ctrl = b.control("ctrl", Vec::new(), vec![conv]);
        if let Some(node) = b.node_mut(conv) {
            if let NodeBody::Conversion(c) = &mut node.body {
                c.direction = Direction::RightToLeft;
            }
        }
        let model = b.build().unwrap();

        let input = Constraint::Participant {
            side: RelType::Input,
            treat_reversible_as_left_to_right: true,
        };
        assert_eq!(input.generate(&model, &[ctrl, conv]), vec![right]);
        assert_eq!(
            Constraint::OtherSide.generate(&model, &[right, conv]),
            vec![left]
        );
    }

    #[test]
    fn test_reversible_without_override_yields_both_sides() {
        let mut b = ModelBuilder::new();
        let er = b.protein_reference("er", "A", Vec::new());
        let left = b.protein("left", er, Vec::new());
        let right = b.protein("right", er, Vec::new());
        let conv = b.conversion("conv", vec![left], vec![right], Vec::new());
        let ctrl = b.control("ctrl", Vec::new(), vec![conv]);
        if let Some(node) = b.node_mut(conv) {
            if let NodeBody::Conversion(c) = &mut node.body {
                c.direction = Direction::Reversible;
            }
        }
        let model = b.build().unwrap();

        let strict = Constraint::Participant {
            side: RelType::Input,
            treat_reversible_as_left_to_right: false,
        };
        assert_eq!(strict.generate(&model, &[ctrl, conv]), vec![left, right]);
    }

    #[test]
    fn test_modification_change_gain_and_loss() {
        let mut b = ModelBuilder::new();
        let er = b.protein_reference("er", "A", Vec::new());
        let phos = b.modification("mf", &["O-phospho-L-serine"], None);
        let plain = b.protein("plain", er, Vec::new());
        let modified = b.protein("modified", er, vec![phos]);
        let model = b.build().unwrap();

        let gain = Constraint::modification_change(ChangeType::Gain, "phospho");
        let loss = Constraint::modification_change(ChangeType::Loss, "phospho");
        assert!(gain.satisfies(&model, &[plain, modified]));
        assert!(!gain.satisfies(&model, &[modified, plain]));
        assert!(loss.satisfies(&model, &[modified, plain]));
        assert!(!Constraint::modification_change(ChangeType::Gain, "acetyl")
            .satisfies(&model, &[plain, modified]));
    }

    #[test]
    fn test_not_and_type() {
        let mut b = ModelBuilder::new();
        let er = b.protein_reference("er", "A", Vec::new());
        let pe = b.protein("pe", er, Vec::new());
        let model = b.build().unwrap();

        assert!(Constraint::Type(NodeKind::PhysicalEntity).satisfies(&model, &[pe]));
        assert!(!Constraint::Type(NodeKind::Complex).satisfies(&model, &[pe]));
        assert!(Constraint::not(Constraint::Equality(true)).satisfies(&model, &[pe, er]));
        assert!(!Constraint::not(Constraint::PeToEr).satisfies(&model, &[pe, er]));
    }
}
