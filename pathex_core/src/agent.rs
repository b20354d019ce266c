//! Canonical molecular identities.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static NON_WORD: OnceLock<Regex> = OnceLock::new();

#[expect(
    clippy::expect_used,
    reason = "Static regex pattern validated at compile time"
)]
fn non_word() -> &'static Regex {
    NON_WORD.get_or_init(|| {
        Regex::new(r"[^A-Za-z0-9_]").expect("Static regex pattern is guaranteed to be valid")
    })
}

/// Sanitize a raw name into an identifier-safe symbol.
///
/// Every character outside `[A-Za-z0-9_]` becomes `_`, and a leading digit
/// gets a `p` prefix. Applying it twice gives the same result as once.
#[must_use]
pub fn canonicalize(name: &str) -> String {
    let replaced = non_word().replace_all(name, "_");
    if replaced.starts_with(|c: char| c.is_ascii_digit()) {
        format!("p{replaced}")
    } else {
        replaced.into_owned()
    }
}

/// Database identifiers attached to an agent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DbRefs {
    #[serde(rename = "HGNC")]
    pub hgnc: Option<u32>,
    #[serde(rename = "UP")]
    pub uniprot: Vec<String>,
}

/// A resolved molecular identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Agent {
    pub name: String,
    pub db_refs: DbRefs,
}

impl Agent {
    /// Create an agent; the name is canonicalized.
    #[must_use]
    pub fn new(name: &str, db_refs: DbRefs) -> Self {
        Self {
            name: canonicalize(name),
            db_refs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_replaces_non_word() {
        assert_eq!(canonicalize("MAP2K1"), "MAP2K1");
        assert_eq!(canonicalize("NF-kappa-B p65"), "NF_kappa_B_p65");
        assert_eq!(canonicalize("a.b/c"), "a_b_c");
    }

    #[test]
    fn test_canonicalize_leading_digit() {
        assert_eq!(canonicalize("14-3-3"), "p14_3_3");
        assert_eq!(canonicalize("4E-BP1"), "p4E_BP1");
    }

    #[test]
    fn test_canonicalize_non_ascii() {
        assert_eq!(canonicalize("TNF-α"), "TNF__");
        assert_eq!(canonicalize(""), "");
    }

    #[test]
    fn test_canonicalize_idempotent_and_charset() {
        let charset = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap();
        for raw in ["BRAF", "1abc", "  x y ", "9", "_9", "é9", "p53/TP53", "ÅÄÖ", "-1"] {
            let once = canonicalize(raw);
            assert_eq!(canonicalize(&once), once, "not idempotent for {raw:?}");
            assert!(once.is_empty() || charset.is_match(&once), "bad output {once:?}");
        }
    }

    #[test]
    fn test_agent_new_canonicalizes() {
        let agent = Agent::new("14-3-3 zeta", DbRefs::default());
        assert_eq!(agent.name, "p14_3_3_zeta");
    }

    #[test]
    fn test_db_refs_serialize_keys() {
        let refs = DbRefs {
            hgnc: Some(1097),
            uniprot: vec!["P15056".to_string()],
        };
        let json = serde_json::to_value(&refs).unwrap();
        assert_eq!(json["HGNC"], 1097);
        assert_eq!(json["UP"][0], "P15056");
    }
}
