//! Extracted interaction statements.
//!
//! Statements are a data sink: they are built by the extraction pipeline and
//! handed to downstream consumers for validation and serialization.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::agent::Agent;

/// Canonical modification-type tag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ModType {
    Phosphorylation,
    PhosphorylationSerine,
    PhosphorylationThreonine,
    PhosphorylationTyrosine,
    Acetylation,
    AcetylationLysine,
    Glycosylation,
    Palmitoylation,
    PalmitoylationCysteine,
}

impl ModType {
    /// Returns the string representation of this tag.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Phosphorylation => "Phosphorylation",
            Self::PhosphorylationSerine => "PhosphorylationSerine",
            Self::PhosphorylationThreonine => "PhosphorylationThreonine",
            Self::PhosphorylationTyrosine => "PhosphorylationTyrosine",
            Self::Acetylation => "Acetylation",
            Self::AcetylationLysine => "AcetylationLysine",
            Self::Glycosylation => "Glycosylation",
            Self::Palmitoylation => "Palmitoylation",
            Self::PalmitoylationCysteine => "PalmitoylationCysteine",
        }
    }

    /// Map a sequence-modification vocabulary term to its tag.
    ///
    /// Returns `None` for terms outside the known vocabulary; the caller
    /// decides whether that skips or fails.
    #[must_use]
    pub fn from_vocabulary(term: &str) -> Option<Self> {
        match term {
            "phosphorylated residue" => Some(Self::Phosphorylation),
            "O-phospho-L-serine" => Some(Self::PhosphorylationSerine),
            "O-phospho-L-threonine" => Some(Self::PhosphorylationThreonine),
            "O-phospho-L-tyrosine" | "O4'-phospho-L-tyrosine" => {
                Some(Self::PhosphorylationTyrosine)
            }
            "acetylated residue" => Some(Self::Acetylation),
            "N6-acetyl-L-lysine" => Some(Self::AcetylationLysine),
            "glycosylated residue" => Some(Self::Glycosylation),
            "palmitoylated residue" => Some(Self::Palmitoylation),
            "S-palmitoyl-L-cysteine" => Some(Self::PalmitoylationCysteine),
            _ => None,
        }
    }
}

impl fmt::Display for ModType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModType {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Phosphorylation" => Ok(Self::Phosphorylation),
            "PhosphorylationSerine" => Ok(Self::PhosphorylationSerine),
            "PhosphorylationThreonine" => Ok(Self::PhosphorylationThreonine),
            "PhosphorylationTyrosine" => Ok(Self::PhosphorylationTyrosine),
            "Acetylation" => Ok(Self::Acetylation),
            "AcetylationLysine" => Ok(Self::AcetylationLysine),
            "Glycosylation" => Ok(Self::Glycosylation),
            "Palmitoylation" => Ok(Self::Palmitoylation),
            "PalmitoylationCysteine" => Ok(Self::PalmitoylationCysteine),
            _ => Err("unknown modification type"),
        }
    }
}

/// Free-text context every statement carries.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatementContext {
    pub stmt_str: String,
    pub citations: Vec<String>,
    pub evidence: String,
    pub annotations: String,
}

impl StatementContext {
    #[must_use]
    pub const fn with_citations(citations: Vec<String>) -> Self {
        Self {
            stmt_str: String::new(),
            citations,
            evidence: String::new(),
            annotations: String::new(),
        }
    }
}

/// Enzyme-catalysed covalent modification of a substrate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Modification {
    pub enzyme: Agent,
    pub substrate: Agent,
    pub mod_type: ModType,
    pub position: Option<i32>,
    #[serde(flatten)]
    pub context: StatementContext,
}

/// Direction of an activity change.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Relationship {
    #[default]
    Increases,
    Decreases,
}

impl Relationship {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Increases => "increases",
            Self::Decreases => "decreases",
        }
    }
}

/// A modified form of an agent changing its activity.
///
/// `mod_types[i]` is located at `positions[i]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActivityModification {
    pub agent: Agent,
    pub mod_types: Vec<ModType>,
    pub positions: Vec<Option<i32>>,
    pub relationship: Relationship,
    pub activity: String,
    #[serde(flatten)]
    pub context: StatementContext,
}

/// One extracted fact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum Statement {
    Complex {
        members: Vec<Agent>,
        #[serde(flatten)]
        context: StatementContext,
    },
    Phosphorylation(Modification),
    Dephosphorylation(Modification),
    Acetylation(Modification),
    Glycosylation(Modification),
    Palmitoylation(Modification),
    ActivityModification(ActivityModification),
}

impl Statement {
    /// Statement kind name, as used in the serialized `type` tag.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Complex { .. } => "Complex",
            Self::Phosphorylation(_) => "Phosphorylation",
            Self::Dephosphorylation(_) => "Dephosphorylation",
            Self::Acetylation(_) => "Acetylation",
            Self::Glycosylation(_) => "Glycosylation",
            Self::Palmitoylation(_) => "Palmitoylation",
            Self::ActivityModification(_) => "ActivityModification",
        }
    }

    /// The modification payload of the five enzyme/substrate kinds.
    #[must_use]
    pub const fn modification(&self) -> Option<&Modification> {
        match self {
            Self::Phosphorylation(m)
            | Self::Dephosphorylation(m)
            | Self::Acetylation(m)
            | Self::Glycosylation(m)
            | Self::Palmitoylation(m) => Some(m),
            Self::Complex { .. } | Self::ActivityModification(_) => None,
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Complex { members, .. } => {
                let names: Vec<&str> = members.iter().map(|m| m.name.as_str()).collect();
                write!(f, "Complex({})", names.join(", "))
            }
            Self::ActivityModification(am) => {
                write!(
                    f,
                    "ActivityModification({}, {} {})",
                    am.agent.name,
                    am.relationship.as_str(),
                    am.activity
                )
            }
            _ => match self.modification() {
                Some(m) => {
                    write!(f, "{}({}, {}, {}", self.kind(), m.enzyme.name, m.substrate.name, m.mod_type)?;
                    if let Some(pos) = m.position {
                        write!(f, ", {pos}")?;
                    }
                    f.write_str(")")
                }
                None => f.write_str(self.kind()),
            },
        }
    }
}
