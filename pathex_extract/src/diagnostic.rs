use pathex_core::model::PositionStatus;
use serde::Serialize;
use std::fmt;

/// A recoverable anomaly met during extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Modification term outside the known vocabulary; the feature was skipped.
    UnknownVocabulary { feature: String, term: String },
    /// Feature with several terms; only the first was used.
    AmbiguousVocabulary { feature: String, terms: Vec<String> },
    /// Position kept although its status is not exact.
    ImprecisePosition {
        feature: String,
        status: PositionStatus,
        position: i32,
    },
    /// A named pattern or other capability could not be resolved.
    CapabilityUnavailable { name: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownVocabulary { feature, term } => {
                write!(f, "Unknown modification type '{term}' on {feature}")
            }
            Self::AmbiguousVocabulary { feature, terms } => write!(
                f,
                "Other than one modification term on {feature}: {}",
                terms.join(", ")
            ),
            Self::ImprecisePosition {
                feature,
                status,
                position,
            } => write!(
                f,
                "Modification site position on {feature} is {} ({position})",
                status.as_str()
            ),
            Self::CapabilityUnavailable { name } => write!(f, "Capability '{name}' is unavailable"),
        }
    }
}
