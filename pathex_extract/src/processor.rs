//! Statement extraction pipeline.
//!
//! Each `get_*` operation runs one library pattern, turns every match into
//! statements and appends them to the processor's running list. Recoverable
//! anomalies are logged and kept as [`Diagnostic`]s; resolution and lookup
//! failures abort the operation and are returned to the caller.

use std::collections::HashSet;

use pathex_config::Config;
use pathex_core::{
    ActivityModification, Agent, Modification, NodeId, PathwayModel, Relationship, Statement,
    StatementContext,
};
use pathex_pattern::library::{
    ACTIVE_FILTER, CONTROLS_STATE_CHANGE, IN_COMPLEX_WITH, labels, with_modification_change,
};
use pathex_pattern::{ChangeType, Match, Matcher, Pattern, PatternLibrary, Searcher};
use tracing::{debug, info};

use crate::citation::extract_citations;
use crate::diagnostic::Diagnostic;
use crate::error::{CacheError, Result};
use crate::hgnc::{HgncCache, HgncLookup, HgncRestClient};
use crate::modification::extract_modification_sites;
use crate::resolver::EntityResolver;

/// Activity name recorded on activity-modification statements.
pub const ACTIVITY: &str = "Activity";

/// `true` when there is no filter or any of `names` is in it.
fn passes(filter: Option<&HashSet<String>>, names: &[&str]) -> bool {
    filter.is_none_or(|f| names.iter().any(|name| f.contains(*name)))
}

/// Runs extraction patterns over one pathway model and collects statements.
pub struct PathwayProcessor<'m, L, M = Searcher> {
    model: &'m PathwayModel,
    resolver: EntityResolver<L>,
    matcher: M,
    library: PatternLibrary,
    statements: Vec<Statement>,
    diagnostics: Vec<Diagnostic>,
    seen_complexes: HashSet<(String, String)>,
}

impl<'m, L: HgncLookup> PathwayProcessor<'m, L> {
    /// Processor with the built-in pattern library and the in-memory searcher.
    pub fn new(model: &'m PathwayModel, lookup: L, cache: HgncCache) -> Self {
        Self {
            model,
            resolver: EntityResolver::new(lookup, cache),
            matcher: Searcher,
            library: PatternLibrary::with_defaults(),
            statements: Vec::new(),
            diagnostics: Vec::new(),
            seen_complexes: HashSet::new(),
        }
    }
}

impl<'m> PathwayProcessor<'m, HgncRestClient> {
    /// Processor backed by the HGNC REST service, with the cache loaded
    /// from the configured path.
    pub fn from_config(model: &'m PathwayModel, config: &Config) -> Result<Self> {
        let lookup = HgncRestClient::new(&config.hgnc)?;
        let cache = HgncCache::load(config.cache.path.clone())?;
        Ok(Self::new(model, lookup, cache))
    }
}

impl<'m, L: HgncLookup, M: Matcher> PathwayProcessor<'m, L, M> {
    /// Replace the matcher, keeping everything collected so far.
    pub fn with_matcher<N: Matcher>(self, matcher: N) -> PathwayProcessor<'m, L, N> {
        PathwayProcessor {
            model: self.model,
            resolver: self.resolver,
            matcher,
            library: self.library,
            statements: self.statements,
            diagnostics: self.diagnostics,
            seen_complexes: self.seen_complexes,
        }
    }

    #[must_use]
    pub fn with_library(mut self, library: PatternLibrary) -> Self {
        self.library = library;
        self
    }

    /// Complexes of two distinct proteins.
    ///
    /// A pair found in both orders yields one statement.
    pub fn get_complexes(&mut self, filter: Option<&HashSet<String>>) -> Result<usize> {
        let Some(pattern) = self.pattern(IN_COMPLEX_WITH)? else {
            return Ok(0);
        };
        let matches = self.matcher.search(self.model, &pattern);

        let mut added = 0;
        for hit in &matches {
            let first = self.agent(&pattern, hit, labels::PROTEIN_1)?;
            let second = self.agent(&pattern, hit, labels::PROTEIN_2)?;
            if !passes(filter, &[first.name.as_str(), second.name.as_str()]) {
                continue;
            }

            let key = if first.name <= second.name {
                (first.name.clone(), second.name.clone())
            } else {
                (second.name.clone(), first.name.clone())
            };
            if !self.seen_complexes.insert(key) {
                debug!("Skipping repeated complex {} / {}", first.name, second.name);
                continue;
            }

            self.statements.push(Statement::Complex {
                members: vec![first, second],
                context: StatementContext::default(),
            });
            added += 1;
        }

        info!(
            "Extracted {added} Complex statements from {} matches",
            matches.len()
        );
        Ok(added)
    }

    pub fn get_phosphorylation(&mut self, filter: Option<&HashSet<String>>) -> Result<usize> {
        self.generic_modification("phospho", ChangeType::Gain, filter, Statement::Phosphorylation)
    }

    pub fn get_dephosphorylation(&mut self, filter: Option<&HashSet<String>>) -> Result<usize> {
        self.generic_modification(
            "phospho",
            ChangeType::Loss,
            filter,
            Statement::Dephosphorylation,
        )
    }

    pub fn get_acetylation(&mut self, filter: Option<&HashSet<String>>) -> Result<usize> {
        self.generic_modification("acetyl", ChangeType::Gain, filter, Statement::Acetylation)
    }

    pub fn get_glycosylation(&mut self, filter: Option<&HashSet<String>>) -> Result<usize> {
        self.generic_modification("glycosyl", ChangeType::Gain, filter, Statement::Glycosylation)
    }

    pub fn get_palmitoylation(&mut self, filter: Option<&HashSet<String>>) -> Result<usize> {
        self.generic_modification(
            "palmitoyl",
            ChangeType::Gain,
            filter,
            Statement::Palmitoylation,
        )
    }

    /// Conversions producing an active form of a protein.
    ///
    /// One statement per match, listing every known modification of the
    /// output form; the filter applies to the modified protein.
    pub fn get_activity_modification(&mut self, filter: Option<&HashSet<String>>) -> Result<usize> {
        let Some(base) = self.pattern(CONTROLS_STATE_CHANGE)? else {
            return Ok(0);
        };
        let pattern = with_modification_change(base, ChangeType::Gain, ACTIVE_FILTER)?;
        let matches = self.matcher.search(self.model, &pattern);

        let mut added = 0;
        for hit in &matches {
            let agent = self.agent(&pattern, hit, labels::CHANGED_GENERIC_ER)?;
            if !passes(filter, &[agent.name.as_str()]) {
                continue;
            }
            let citations = extract_citations(self.model, pattern.bound(hit, labels::CONVERSION)?)?;
            let output = pattern.bound(hit, labels::OUTPUT_PE)?;
            let sites = extract_modification_sites(self.model, output, &mut self.diagnostics)?;
            if sites.is_empty() {
                continue;
            }

            self.statements
                .push(Statement::ActivityModification(ActivityModification {
                    agent,
                    mod_types: sites.types,
                    positions: sites.positions,
                    relationship: Relationship::Increases,
                    activity: ACTIVITY.to_string(),
                    context: StatementContext::with_citations(citations),
                }));
            added += 1;
        }

        info!(
            "Extracted {added} ActivityModification statements from {} matches",
            matches.len()
        );
        Ok(added)
    }

    /// State changes gaining (or losing) a modification whose term contains
    /// `term_filter`; one statement per matching modification of the
    /// changed form.
    fn generic_modification(
        &mut self,
        term_filter: &str,
        change: ChangeType,
        filter: Option<&HashSet<String>>,
        make: fn(Modification) -> Statement,
    ) -> Result<usize> {
        let Some(base) = self.pattern(CONTROLS_STATE_CHANGE)? else {
            return Ok(0);
        };
        let pattern = with_modification_change(base, change, term_filter)?;
        let matches = self.matcher.search(self.model, &pattern);

        // The modified form: what was gained sits on the output side, what
        // was lost on the input side.
        let modified_label = match change {
            ChangeType::Gain => labels::OUTPUT_SIMPLE_PE,
            ChangeType::Loss => labels::INPUT_SIMPLE_PE,
        };

        let mut added = 0;
        for hit in &matches {
            let enzyme = self.agent(&pattern, hit, labels::CONTROLLER_ER)?;
            let substrate = self.agent(&pattern, hit, labels::CHANGED_GENERIC_ER)?;
            if !passes(filter, &[enzyme.name.as_str(), substrate.name.as_str()]) {
                continue;
            }

            let citations = extract_citations(self.model, pattern.bound(hit, labels::CONVERSION)?)?;
            let modified = pattern.bound(hit, modified_label)?;
            let sites = extract_modification_sites(self.model, modified, &mut self.diagnostics)?;

            for (mod_type, position) in sites.iter() {
                if !mod_type.as_str().to_lowercase().contains(term_filter) {
                    continue;
                }
                self.statements.push(make(Modification {
                    enzyme: enzyme.clone(),
                    substrate: substrate.clone(),
                    mod_type,
                    position,
                    context: StatementContext::with_citations(citations.clone()),
                }));
                added += 1;
            }
        }

        info!(
            "Extracted {added} '{term_filter}' modification statements from {} matches",
            matches.len()
        );
        Ok(added)
    }

    fn agent(&mut self, pattern: &Pattern, hit: &Match, label: &str) -> Result<Agent> {
        let node: NodeId = pattern.bound(hit, label)?;
        self.resolver.resolve(self.model, node)
    }

    /// Build a library pattern; an unavailable one is recorded once and
    /// turns the calling operation into a no-op.
    fn pattern(&mut self, name: &str) -> Result<Option<Pattern>> {
        if let Some(pattern) = self.library.get(name) {
            return Ok(Some(pattern?));
        }
        let already = self.diagnostics.iter().any(
            |d| matches!(d, Diagnostic::CapabilityUnavailable { name: n } if n == name),
        );
        if !already {
            self.diagnostics.push(Diagnostic::CapabilityUnavailable {
                name: name.to_string(),
            });
        }
        Ok(None)
    }

    /// Statements collected so far, in extraction order.
    #[must_use]
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Hand over the collected statements, leaving the list empty.
    ///
    /// Complex pairs already emitted are forgotten too, so a later
    /// `get_complexes` reports them again.
    pub fn take_statements(&mut self) -> Vec<Statement> {
        self.seen_complexes.clear();
        std::mem::take(&mut self.statements)
    }

    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    #[must_use]
    pub const fn resolver(&self) -> &EntityResolver<L> {
        &self.resolver
    }

    /// Write the HGNC cache back to its file.
    pub fn dump_cache(&self) -> std::result::Result<(), CacheError> {
        self.resolver.dump_cache()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(names: &[&str]) -> HashSet<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_passes_without_filter() {
        assert!(passes(None, &["A", "B"]));
        assert!(passes(None, &[]));
    }

    #[test]
    fn test_passes_is_or_over_sides() {
        let filter = set(&["MAPK1"]);
        assert!(passes(Some(&filter), &["MAP2K1", "MAPK1"]));
        assert!(passes(Some(&filter), &["MAPK1", "MAP2K1"]));
        assert!(!passes(Some(&filter), &["BRAF", "RAF1"]));
        assert!(!passes(Some(&set(&[])), &["BRAF"]));
    }
}
