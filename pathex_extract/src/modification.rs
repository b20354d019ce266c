//! Modification sites carried by a physical entity.

use pathex_core::model::PositionStatus;
use pathex_core::{ModType, NodeId, PathwayModel};
use tracing::warn;

use crate::diagnostic::Diagnostic;
use crate::error::Result;

/// Modification types and positions of one entity.
///
/// `types[i]` and `positions[i]` come from the same modification feature.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModificationSites {
    pub types: Vec<ModType>,
    pub positions: Vec<Option<i32>>,
}

impl ModificationSites {
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ModType, Option<i32>)> + '_ {
        self.types.iter().copied().zip(self.positions.iter().copied())
    }

    fn push(&mut self, mod_type: ModType, position: Option<i32>) {
        self.types.push(mod_type);
        self.positions.push(position);
    }
}

/// Collect the known modification sites of `pe` in feature order.
///
/// Features with an unknown term are skipped, features with several terms
/// use the first one, and inexact positions are kept. Each of these is
/// logged and appended to `diagnostics`.
pub fn extract_modification_sites(
    model: &PathwayModel,
    pe: NodeId,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<ModificationSites> {
    let mut sites = ModificationSites::default();

    for &feature_id in &model.physical_entity(pe)?.features {
        let feature = model.modification_feature(feature_id)?;
        let uri = &model.node(feature_id)?.uri;

        let term = feature.terms.first().map_or("", String::as_str);
        if feature.terms.len() > 1 {
            warn!("Other than one modification term on {uri}");
            diagnostics.push(Diagnostic::AmbiguousVocabulary {
                feature: uri.clone(),
                terms: feature.terms.clone(),
            });
        }

        let Some(mod_type) = ModType::from_vocabulary(term) else {
            warn!("Unknown modification type '{term}' on {uri}");
            diagnostics.push(Diagnostic::UnknownVocabulary {
                feature: uri.clone(),
                term: term.to_string(),
            });
            continue;
        };

        let position = feature.location.map(|site| {
            if let Some(status) = site.status.filter(|s| *s != PositionStatus::Equal) {
                warn!(
                    "Modification site position on {uri} is {}",
                    status.as_str()
                );
                diagnostics.push(Diagnostic::ImprecisePosition {
                    feature: uri.clone(),
                    status,
                    position: site.position,
                });
            }
            site.position
        });

        sites.push(mod_type, position);
    }

    Ok(sites)
}
