//! Pattern search over a pathway model.

use pathex_core::PathwayModel;
use pathex_core::model::NodeId;
use std::collections::HashSet;
use tracing::debug;

use crate::pattern::{Match, Pattern};

/// Enumerates every binding of a pattern's variables that satisfies all of
/// its constraints. Match order is unspecified.
pub trait Matcher {
    fn search(&self, model: &PathwayModel, pattern: &Pattern) -> Vec<Match>;
}

/// Depth-first backtracking matcher.
///
/// Constraints are evaluated in insertion order: a constraint whose last
/// variable is still unbound enumerates candidates for it, any other
/// constraint filters the current partial binding.
#[derive(Debug, Clone, Copy, Default)]
pub struct Searcher;

impl Searcher {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

struct SearchState<'a> {
    model: &'a PathwayModel,
    pattern: &'a Pattern,
    binding: Vec<Option<NodeId>>,
    seen: HashSet<Vec<NodeId>>,
    results: Vec<Match>,
}

impl SearchState<'_> {
    fn bound(&self, vars: &[usize]) -> Option<Vec<NodeId>> {
        vars.iter().map(|v| self.binding[*v]).collect()
    }

    fn extend(&mut self, step_idx: usize) {
        let pattern = self.pattern;
        let Some(step) = pattern.steps().get(step_idx) else {
            self.emit();
            return;
        };
        let Some((&last, leading)) = step.vars.split_last() else {
            return;
        };

        if self.binding[last].is_none() {
            let Some(leading) = self.bound(leading) else {
                return;
            };
            for candidate in step.constraint.generate(self.model, &leading) {
                self.binding[last] = Some(candidate);
                self.extend(step_idx + 1);
            }
            self.binding[last] = None;
        } else if let Some(nodes) = self.bound(&step.vars) {
            if step.constraint.satisfies(self.model, &nodes) {
                self.extend(step_idx + 1);
            }
        }
    }

    fn emit(&mut self) {
        let Some(nodes) = self.binding.iter().copied().collect::<Option<Vec<_>>>() else {
            return;
        };
        if self.seen.insert(nodes.clone()) {
            self.results.push(Match::new(nodes));
        }
    }
}

impl Matcher for Searcher {
    fn search(&self, model: &PathwayModel, pattern: &Pattern) -> Vec<Match> {
        let mut state = SearchState {
            model,
            pattern,
            binding: vec![None; pattern.var_count()],
            seen: HashSet::new(),
            results: Vec::new(),
        };

        for seed in model.nodes_of_kind(pattern.start_kind()) {
            state.binding[0] = Some(seed);
            state.extend(0);
        }

        debug!(
            "Pattern '{}' matched {} times",
            pattern.name(),
            state.results.len()
        );
        state.results
    }
}
