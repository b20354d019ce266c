//! Constraint graphs over named variables.

use pathex_core::model::{NodeId, NodeKind};
use serde::{Deserialize, Serialize};

use crate::constraint::Constraint;
use crate::error::{PatternError, Result};

/// One constraint applied to a tuple of variable indices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    pub constraint: Constraint,
    pub vars: Vec<usize>,
}

/// An ordered constraint graph.
///
/// Variable 0 is seeded with every node of the start kind; each later
/// variable is introduced by the generative constraint that first names it.
/// Constraint order is evaluation order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pattern {
    name: String,
    start_kind: NodeKind,
    labels: Vec<String>,
    steps: Vec<Step>,
}

impl Pattern {
    #[must_use]
    pub fn new(name: impl Into<String>, start_kind: NodeKind, start_label: &str) -> Self {
        Self {
            name: name.into(),
            start_kind,
            labels: vec![start_label.to_string()],
            steps: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn start_kind(&self) -> NodeKind {
        self.start_kind
    }

    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    #[must_use]
    pub fn var_count(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// Rename the pattern, e.g. after extending a library pattern.
    #[must_use]
    pub fn renamed(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Append a constraint over `labels`.
    ///
    /// All labels but the last must already be bound. The last may be new
    /// only when the constraint is generative.
    ///
    /// # Errors
    /// Returns an error if the arity does not match, a label repeats, or the
    /// binding order is violated.
    pub fn add(&mut self, constraint: Constraint, labels: &[&str]) -> Result<()> {
        if labels.len() != constraint.arity() {
            return Err(PatternError::ArityMismatch {
                constraint: constraint.to_string(),
                expected: constraint.arity(),
                got: labels.len(),
            });
        }
        for (i, label) in labels.iter().enumerate() {
            if labels[..i].contains(label) {
                return Err(PatternError::DuplicateVariable((*label).to_string()));
            }
        }

        let Some((last, leading)) = labels.split_last() else {
            return Err(PatternError::ArityMismatch {
                constraint: constraint.to_string(),
                expected: constraint.arity(),
                got: 0,
            });
        };

        let mut vars = Vec::with_capacity(labels.len());
        for label in leading {
            let idx = self
                .index_of(label)
                .ok_or_else(|| PatternError::UnboundVariable((*label).to_string()))?;
            vars.push(idx);
        }

        let last_idx = match self.index_of(last) {
            Some(idx) => idx,
            None if constraint.is_generative() => {
                self.labels.push((*last).to_string());
                self.labels.len() - 1
            }
            None if labels.len() == 1 => {
                return Err(PatternError::UnboundVariable((*last).to_string()));
            }
            None => return Err(PatternError::NotGenerative(constraint.to_string())),
        };
        vars.push(last_idx);

        self.steps.push(Step { constraint, vars });
        Ok(())
    }

    /// Node bound to `label` in a match of this pattern.
    ///
    /// # Errors
    /// Returns an error if the label is not a variable of this pattern.
    pub fn bound(&self, m: &Match, label: &str) -> Result<NodeId> {
        self.index_of(label)
            .and_then(|i| m.get(i))
            .ok_or_else(|| PatternError::UnknownVariable(label.to_string()))
    }
}

/// One complete binding of a pattern's variables, by variable index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Match {
    nodes: Vec<NodeId>,
}

impl Match {
    #[must_use]
    pub const fn new(nodes: Vec<NodeId>) -> Self {
        Self { nodes }
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<NodeId> {
        self.nodes.get(index).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[NodeId] {
        &self.nodes
    }
}
