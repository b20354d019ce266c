//! Printable citations of a reaction's evidence.

use pathex_core::{NodeId, PathwayModel};

use crate::error::Result;

/// `db:id` for every evidence cross-reference that names a database, the
/// raw URLs otherwise. Evidence then xref order; duplicates are kept.
pub fn extract_citations(model: &PathwayModel, conversion: NodeId) -> Result<Vec<String>> {
    let mut citations = Vec::new();
    for &evidence in &model.conversion(conversion)?.evidence {
        for xref in model.xrefs_of(evidence)? {
            match &xref.db {
                Some(db) => {
                    citations.push(format!("{db}:{}", xref.id.as_deref().unwrap_or_default()));
                }
                None => citations.extend(xref.urls.iter().cloned()),
            }
        }
    }
    Ok(citations)
}
