//! Gene-symbol lookup keyed by HGNC numeric id.

mod cache;
mod rest;

pub use cache::HgncCache;
pub use rest::{HgncRestClient, parse_fetch_response};

use std::collections::HashMap;

use crate::error::LookupError;

/// Resolves an HGNC id to its approved gene symbol.
///
/// Implementations are expected to be idempotent; the resolver caches every
/// successful answer and never asks twice for the same id.
pub trait HgncLookup {
    fn symbol(&self, hgnc_id: u32) -> Result<String, LookupError>;
}

impl<T: HgncLookup + ?Sized> HgncLookup for &T {
    fn symbol(&self, hgnc_id: u32) -> Result<String, LookupError> {
        (**self).symbol(hgnc_id)
    }
}

/// Fixed in-memory symbol table.
#[derive(Debug, Clone, Default)]
pub struct StaticHgncTable {
    symbols: HashMap<u32, String>,
}

impl StaticHgncTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, hgnc_id: u32, symbol: &str) -> Self {
        self.symbols.insert(hgnc_id, symbol.to_string());
        self
    }
}

impl FromIterator<(u32, String)> for StaticHgncTable {
    fn from_iter<I: IntoIterator<Item = (u32, String)>>(iter: I) -> Self {
        Self {
            symbols: iter.into_iter().collect(),
        }
    }
}

impl HgncLookup for StaticHgncTable {
    fn symbol(&self, hgnc_id: u32) -> Result<String, LookupError> {
        self.symbols
            .get(&hgnc_id)
            .cloned()
            .ok_or(LookupError::NotFound(hgnc_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_table() {
        let table = StaticHgncTable::new().with(1097, "BRAF");
        assert_eq!(table.symbol(1097), Ok("BRAF".to_string()));
        assert_eq!(table.symbol(1), Err(LookupError::NotFound(1)));
    }

    #[test]
    fn test_lookup_through_reference() {
        let table: StaticHgncTable = [(6871, "MAPK1".to_string())].into_iter().collect();
        let by_ref = &table;
        assert_eq!(by_ref.symbol(6871), Ok("MAPK1".to_string()));
    }
}
