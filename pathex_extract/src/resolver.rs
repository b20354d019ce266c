//! Entity resolution: pathway nodes to canonical agents.

use pathex_core::model::NodeKind;
use pathex_core::{Agent, DbRefs, ModelError, NodeId, PathwayModel, canonicalize};
use tracing::debug;

use crate::error::{CacheError, LookupError, Result};
use crate::hgnc::{HgncCache, HgncLookup};

const HGNC_DB: &str = "HGNC";
const UNIPROT_DB: &str = "UniProt Knowledgebase";

/// HGNC id of a node: the last `HGNC` cross-reference whose id is an
/// integer. Non-integer ids are skipped.
pub fn hgnc_id(model: &PathwayModel, node: NodeId) -> Result<Option<u32>> {
    Ok(model
        .xrefs_of(node)?
        .into_iter()
        .rev()
        .filter(|x| x.db.as_deref() == Some(HGNC_DB))
        .find_map(|x| x.id.as_deref().and_then(|id| id.trim().parse::<u32>().ok())))
}

/// Every `UniProt Knowledgebase` identifier of a node, in xref order.
pub fn uniprot_ids(model: &PathwayModel, node: NodeId) -> Result<Vec<String>> {
    Ok(model
        .xrefs_of(node)?
        .into_iter()
        .filter(|x| x.db.as_deref() == Some(UNIPROT_DB))
        .filter_map(|x| x.id.clone())
        .collect())
}

/// Turns entity references (and the physical entities built on them) into
/// [`Agent`]s, looking gene symbols up through an [`HgncLookup`] behind a
/// persistent cache.
pub struct EntityResolver<L> {
    lookup: L,
    cache: HgncCache,
}

impl<L: HgncLookup> EntityResolver<L> {
    pub const fn new(lookup: L, cache: HgncCache) -> Self {
        Self { lookup, cache }
    }

    /// Resolve an entity reference, physical entity or complex.
    ///
    /// A complex becomes one agent named after its components joined by `_`.
    pub fn resolve(&mut self, model: &PathwayModel, node: NodeId) -> Result<Agent> {
        let kind = model.kind(node)?;
        if kind.is_a(NodeKind::EntityReference) {
            let name = self.reference_name(model, node)?;
            let db_refs = DbRefs {
                hgnc: hgnc_id(model, node)?,
                uniprot: uniprot_ids(model, node)?,
            };
            return Ok(Agent::new(&name, db_refs));
        }
        if kind == NodeKind::Complex {
            return Ok(Agent::new(&self.entity_name(model, node)?, DbRefs::default()));
        }
        if kind.is_a(NodeKind::PhysicalEntity) {
            return match model.physical_entity(node)?.entity_reference {
                Some(er) => self.resolve(model, er),
                None => Ok(Agent::new(&display_name(model, node)?, DbRefs::default())),
            };
        }
        Err(ModelError::TypeMismatch {
            node,
            expected: NodeKind::EntityReference,
            found: kind,
        }
        .into())
    }

    fn entity_name(&mut self, model: &PathwayModel, node: NodeId) -> Result<String> {
        let kind = model.kind(node)?;
        if kind == NodeKind::Complex {
            let components = model.physical_entity(node)?.components.clone();
            let mut names = Vec::with_capacity(components.len());
            for component in components {
                names.push(self.entity_name(model, component)?);
            }
            return Ok(names.join("_"));
        }
        if kind.is_a(NodeKind::EntityReference) {
            return Ok(canonicalize(&self.reference_name(model, node)?));
        }
        match model.physical_entity(node)?.entity_reference {
            Some(er) => Ok(canonicalize(&self.reference_name(model, er)?)),
            None => Ok(canonicalize(&display_name(model, node)?)),
        }
    }

    /// Gene symbol when the reference has an HGNC id, else its display name.
    fn reference_name(&mut self, model: &PathwayModel, er: NodeId) -> Result<String> {
        match hgnc_id(model, er)? {
            Some(id) => Ok(self.hgnc_symbol(id)?),
            None => display_name(model, er),
        }
    }

    /// Cached symbol lookup; a miss asks the service and stores the answer.
    pub fn hgnc_symbol(&mut self, hgnc_id: u32) -> std::result::Result<String, LookupError> {
        if let Some(symbol) = self.cache.get(hgnc_id) {
            debug!("HGNC cache hit for {hgnc_id}");
            return Ok(symbol.to_string());
        }
        debug!("HGNC cache miss for {hgnc_id}");
        let symbol = self.lookup.symbol(hgnc_id)?;
        self.cache.insert(hgnc_id, symbol.clone());
        Ok(symbol)
    }

    #[must_use]
    pub const fn cache(&self) -> &HgncCache {
        &self.cache
    }

    pub fn dump_cache(&self) -> std::result::Result<(), CacheError> {
        self.cache.dump()
    }
}

fn display_name(model: &PathwayModel, node: NodeId) -> Result<String> {
    let node_ref = model.node(node)?;
    Ok(node_ref
        .display_name
        .clone()
        .unwrap_or_else(|| node_ref.uri.clone()))
}
