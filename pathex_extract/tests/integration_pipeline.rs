//! Integration tests for the extraction pipeline.
//!
//! These tests verify that:
//! - HGNC symbols are looked up once per id and then served from the cache
//! - Unknown modification terms are dropped with a recorded warning
//! - Complex pairs are emitted once per collection and honour the membership filter
//! - Gained modifications are read from the output side, lost ones from the input side
//! - Unavailable patterns degrade to empty results

use std::cell::Cell;
use std::collections::{HashMap, HashSet};

use pathex_core::model::{PositionStatus, SequenceSite};
use pathex_core::{ModType, ModelBuilder, NodeId, PathwayModel, Statement};
use pathex_extract::{
    Diagnostic, EntityResolver, HgncCache, HgncLookup, LookupError, PathwayProcessor,
    StaticHgncTable, extract_modification_sites,
};
use pathex_pattern::library::{IN_COMPLEX_WITH, in_complex_with};
use pathex_pattern::{Match, Matcher, Pattern, PatternLibrary};

const HGNC_MAP2K1: u32 = 6840;
const HGNC_MAPK1: u32 = 6871;
const HGNC_BRAF: u32 = 1097;
const HGNC_RAF1: u32 = 9829;

/// Lookup double that counts how often the service is asked.
struct CountingLookup {
    symbols: HashMap<u32, &'static str>,
    calls: Cell<usize>,
}

impl CountingLookup {
    fn new() -> Self {
        Self {
            symbols: HashMap::from([
                (HGNC_MAP2K1, "MAP2K1"),
                (HGNC_MAPK1, "MAPK1"),
                (HGNC_BRAF, "BRAF"),
                (HGNC_RAF1, "RAF1"),
            ]),
            calls: Cell::new(0),
        }
    }
}

impl HgncLookup for CountingLookup {
    fn symbol(&self, hgnc_id: u32) -> Result<String, LookupError> {
        self.calls.set(self.calls.get() + 1);
        self.symbols
            .get(&hgnc_id)
            .map(|s| (*s).to_string())
            .ok_or(LookupError::NotFound(hgnc_id))
    }
}

fn names(filter: &[&str]) -> HashSet<String> {
    filter.iter().map(ToString::to_string).collect()
}

fn site(position: i32) -> Option<SequenceSite> {
    Some(SequenceSite {
        position,
        status: Some(PositionStatus::Equal),
    })
}

fn hgnc_reference(b: &mut ModelBuilder, uri: &str, name: &str, hgnc: u32) -> NodeId {
    let xref = b.xref(&format!("{uri}_hgnc"), "HGNC", &hgnc.to_string());
    b.protein_reference(uri, name, vec![xref])
}

/// MAP2K1 converts MAPK1 from `before` features to `after` features.
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
fn kinase_model(
    before: &[(&str, &str, Option<SequenceSite>)],
    after: &[(&str, &str, Option<SequenceSite>)],
) -> PathwayModel {
    let mut b = ModelBuilder::new();
    let er_mek = hgnc_reference(&mut b, "er_mek", "MEK1", HGNC_MAP2K1);
    let er_erk = hgnc_reference(&mut b, "er_erk", "ERK2", HGNC_MAPK1);
    let pe_mek = b.protein("pe_mek", er_mek, Vec::new());

    let before: Vec<NodeId> = before
        .iter()
        .map(|(uri, term, loc)| b.modification(uri, &[*term], *loc))
        .collect();
    let after: Vec<NodeId> = after
        .iter()
        .map(|(uri, term, loc)| b.modification(uri, &[*term], *loc))
        .collect();
    let pe_in = b.protein("pe_erk_in", er_erk, before);
    let pe_out = b.protein("pe_erk_out", er_erk, after);

    let pmid = b.xref("pmid", "pubmed", "8157000");
    let evidence = b.evidence("ev", vec![pmid]);
    let conv = b.conversion("conv", vec![pe_in], vec![pe_out], vec![evidence]);
    b.control("ctrl", vec![pe_mek], vec![conv]);
    b.build().expect("model should build")
}

#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
fn complex_model() -> PathwayModel {
    let mut b = ModelBuilder::new();
    let er_braf = hgnc_reference(&mut b, "er_braf", "B-Raf", HGNC_BRAF);
    let er_raf1 = hgnc_reference(&mut b, "er_raf1", "c-Raf", HGNC_RAF1);
    let pe_braf = b.protein("pe_braf", er_braf, Vec::new());
    let pe_raf1 = b.protein("pe_raf1", er_raf1, Vec::new());
    b.complex("cplx_braf_raf1", vec![pe_braf, pe_raf1]);
    b.build().expect("model should build")
}

fn processor<'a>(
    model: &'a PathwayModel,
    lookup: &'a CountingLookup,
) -> PathwayProcessor<'a, &'a CountingLookup> {
    PathwayProcessor::new(model, lookup, HgncCache::empty("unused.json"))
}

#[test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
fn test_hgnc_lookup_is_cached() {
    let mut b = ModelBuilder::new();
    let er = hgnc_reference(&mut b, "er_braf", "B-Raf", HGNC_BRAF);
    let model = b.build().expect("model should build");

    let lookup = CountingLookup::new();
    let mut resolver = EntityResolver::new(&lookup, HgncCache::empty("unused.json"));

    let first = resolver.resolve(&model, er).expect("first resolution");
    let second = resolver.resolve(&model, er).expect("second resolution");
    assert_eq!(first.name, "BRAF");
    assert_eq!(first, second);
    assert_eq!(first.db_refs.hgnc, Some(HGNC_BRAF));
    assert_eq!(lookup.calls.get(), 1);
    assert_eq!(resolver.cache().get(HGNC_BRAF), Some("BRAF"));
}

#[test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
fn test_unknown_term_dropped_with_warning() {
    let mut b = ModelBuilder::new();
    let er = b.protein_reference("er", "EGFR", Vec::new());
    let tyr = b.modification("mf_y42", &["O-phospho-L-tyrosine"], site(42));
    let odd = b.modification("mf_odd", &["sumoylated lysine"], site(91));
    let pe = b.protein("pe", er, vec![tyr, odd]);
    let model = b.build().expect("model should build");

    let mut diagnostics = Vec::new();
    let sites = extract_modification_sites(&model, pe, &mut diagnostics).expect("sites");
    assert_eq!(sites.types, vec![ModType::PhosphorylationTyrosine]);
    assert_eq!(sites.positions, vec![Some(42)]);
    assert_eq!(diagnostics.len(), 1);
    assert!(matches!(diagnostics[0], Diagnostic::UnknownVocabulary { .. }));
}

#[test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
fn test_complex_emitted_once_and_filtered() {
    let model = complex_model();
    let lookup = CountingLookup::new();

    let mut p = processor(&model, &lookup);
    assert_eq!(p.get_complexes(None).expect("complexes"), 1);
    let Statement::Complex { members, .. } = &p.statements()[0] else {
        panic!("expected a Complex statement");
    };
    let mut member_names: Vec<&str> = members.iter().map(|a| a.name.as_str()).collect();
    member_names.sort_unstable();
    assert_eq!(member_names, vec!["BRAF", "RAF1"]);

    let mut filtered = processor(&model, &lookup);
    assert_eq!(
        filtered
            .get_complexes(Some(&names(&["MEK1"])))
            .expect("complexes"),
        0
    );
    assert!(filtered.statements().is_empty());

    let mut kept = processor(&model, &lookup);
    assert_eq!(
        kept.get_complexes(Some(&names(&["RAF1"]))).expect("complexes"),
        1
    );
}

#[test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
fn test_gain_reads_output_and_loss_reads_input() {
    let model = kinase_model(
        &[("mf_s10", "O-phospho-L-serine", site(10))],
        &[("mf_t20", "O-phospho-L-threonine", site(20))],
    );
    let lookup = CountingLookup::new();
    let mut p = processor(&model, &lookup);

    assert_eq!(p.get_phosphorylation(None).expect("phosphorylation"), 1);
    assert_eq!(p.get_dephosphorylation(None).expect("dephosphorylation"), 1);

    let stmts = p.take_statements();
    assert!(p.statements().is_empty());

    let Statement::Phosphorylation(gain) = &stmts[0] else {
        panic!("expected Phosphorylation, got {}", stmts[0]);
    };
    assert_eq!(gain.enzyme.name, "MAP2K1");
    assert_eq!(gain.substrate.name, "MAPK1");
    assert_eq!(gain.mod_type, ModType::PhosphorylationThreonine);
    assert_eq!(gain.position, Some(20));
    assert_eq!(gain.context.citations, vec!["pubmed:8157000"]);

    let Statement::Dephosphorylation(loss) = &stmts[1] else {
        panic!("expected Dephosphorylation, got {}", stmts[1]);
    };
    assert_eq!(loss.mod_type, ModType::PhosphorylationSerine);
    assert_eq!(loss.position, Some(10));

    // Two resolutions per statement, one lookup per distinct id.
    assert_eq!(lookup.calls.get(), 2);
}

#[test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
fn test_one_statement_per_matching_feature() {
    let model = kinase_model(
        &[],
        &[
            ("mf_t185", "O-phospho-L-threonine", site(185)),
            ("mf_y187", "O-phospho-L-tyrosine", site(187)),
            ("mf_k5", "N6-acetyl-L-lysine", site(5)),
        ],
    );
    let lookup = CountingLookup::new();
    let mut p = processor(&model, &lookup);

    assert_eq!(p.get_phosphorylation(None).expect("phosphorylation"), 2);
    assert_eq!(p.get_acetylation(None).expect("acetylation"), 1);
    assert_eq!(p.get_glycosylation(None).expect("glycosylation"), 0);
    assert_eq!(p.get_palmitoylation(None).expect("palmitoylation"), 0);

    let mut sites: Vec<(ModType, Option<i32>)> = p.statements()[..2]
        .iter()
        .filter_map(Statement::modification)
        .map(|m| (m.mod_type, m.position))
        .collect();
    sites.sort_unstable_by_key(|(_, pos)| *pos);
    assert_eq!(
        sites,
        vec![
            (ModType::PhosphorylationThreonine, Some(185)),
            (ModType::PhosphorylationTyrosine, Some(187)),
        ]
    );
    assert_eq!(p.statements()[2].kind(), "Acetylation");
}

#[test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
fn test_glycosylation_and_palmitoylation_gained() {
    let model = kinase_model(
        &[],
        &[
            ("mf_n44", "glycosylated residue", site(44)),
            ("mf_c3", "S-palmitoyl-L-cysteine", site(3)),
        ],
    );
    let lookup = CountingLookup::new();
    let mut p = processor(&model, &lookup);

    assert_eq!(p.get_glycosylation(None).expect("glycosylation"), 1);
    assert_eq!(p.get_palmitoylation(None).expect("palmitoylation"), 1);
    assert_eq!(p.get_phosphorylation(None).expect("phosphorylation"), 0);

    let Statement::Glycosylation(glyco) = &p.statements()[0] else {
        panic!("expected Glycosylation, got {}", p.statements()[0]);
    };
    assert_eq!(glyco.mod_type, ModType::Glycosylation);
    assert_eq!(glyco.position, Some(44));

    let Statement::Palmitoylation(palm) = &p.statements()[1] else {
        panic!("expected Palmitoylation, got {}", p.statements()[1]);
    };
    assert_eq!(palm.enzyme.name, "MAP2K1");
    assert_eq!(palm.substrate.name, "MAPK1");
    assert_eq!(palm.mod_type, ModType::PalmitoylationCysteine);
    assert_eq!(palm.position, Some(3));
}

#[test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
fn test_complexes_reported_again_after_take() {
    let model = complex_model();
    let lookup = CountingLookup::new();
    let mut p = processor(&model, &lookup);

    assert_eq!(p.get_complexes(None).expect("complexes"), 1);
    assert_eq!(p.get_complexes(None).expect("complexes"), 0);
    assert_eq!(p.take_statements().len(), 1);

    assert_eq!(p.get_complexes(None).expect("complexes"), 1);
    assert_eq!(p.statements().len(), 1);
}

#[test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
fn test_membership_filter_on_modifications() {
    let model = kinase_model(&[], &[("mf_t185", "O-phospho-L-threonine", site(185))]);
    let lookup = CountingLookup::new();

    for (filter, expected) in [
        (vec!["MAPK1"], 1),
        (vec!["MAP2K1"], 1),
        (vec!["MAP2K1", "MAPK1"], 1),
        (vec!["BRAF"], 0),
        (vec![], 0),
    ] {
        let mut p = processor(&model, &lookup);
        let added = p
            .get_phosphorylation(Some(&names(&filter)))
            .expect("phosphorylation");
        assert_eq!(added, expected, "filter {filter:?}");
    }
}

#[test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
fn test_activity_modification() {
    let model = kinase_model(
        &[],
        &[
            ("mf_active", "residue modification, active", None),
            ("mf_t185", "O-phospho-L-threonine", site(185)),
        ],
    );
    let lookup = CountingLookup::new();

    let mut p = processor(&model, &lookup);
    assert_eq!(p.get_activity_modification(None).expect("activity"), 1);
    let Statement::ActivityModification(am) = &p.statements()[0] else {
        panic!("expected ActivityModification");
    };
    assert_eq!(am.agent.name, "MAPK1");
    assert_eq!(am.mod_types, vec![ModType::PhosphorylationThreonine]);
    assert_eq!(am.positions, vec![Some(185)]);
    assert_eq!(am.activity, "Activity");
    assert!(p.diagnostics().iter().any(|d| matches!(
        d,
        Diagnostic::UnknownVocabulary { term, .. } if term == "residue modification, active"
    )));

    let mut enzyme_only = processor(&model, &lookup);
    assert_eq!(
        enzyme_only
            .get_activity_modification(Some(&names(&["MAP2K1"])))
            .expect("activity"),
        0
    );
}

#[test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
fn test_unavailable_pattern_is_recorded_once() {
    let model = kinase_model(&[], &[("mf_t185", "O-phospho-L-threonine", site(185))]);
    let lookup = CountingLookup::new();

    let mut library = PatternLibrary::new();
    library.register(IN_COMPLEX_WITH, in_complex_with);
    let mut p = processor(&model, &lookup).with_library(library);

    assert_eq!(p.get_phosphorylation(None).expect("phosphorylation"), 0);
    assert_eq!(p.get_activity_modification(None).expect("activity"), 0);
    assert_eq!(
        p.diagnostics(),
        &[Diagnostic::CapabilityUnavailable {
            name: "controlsStateChange".to_string()
        }]
    );
    assert_eq!(lookup.calls.get(), 0);
}

struct NoMatches;

impl Matcher for NoMatches {
    fn search(&self, _model: &PathwayModel, _pattern: &Pattern) -> Vec<Match> {
        Vec::new()
    }
}

#[test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
fn test_custom_matcher() {
    let model = complex_model();
    let lookup = CountingLookup::new();
    let mut p = processor(&model, &lookup).with_matcher(NoMatches);
    assert_eq!(p.get_complexes(None).expect("complexes"), 0);
}

#[test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
fn test_cache_persists_across_processors() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("hgnc_cache.json");
    let model = complex_model();

    let lookup = CountingLookup::new();
    let mut p = PathwayProcessor::new(
        &model,
        &lookup,
        HgncCache::load(&path).expect("missing cache loads empty"),
    );
    p.get_complexes(None).expect("complexes");
    assert!(!path.exists());
    p.dump_cache().expect("cache should be written");

    let offline = StaticHgncTable::new();
    let mut reloaded = PathwayProcessor::new(
        &model,
        offline,
        HgncCache::load(&path).expect("cache should load"),
    );
    assert_eq!(reloaded.resolver().cache().len(), 2);
    assert_eq!(reloaded.get_complexes(None).expect("complexes"), 1);
}
