#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Core types for extracting interaction statements from pathway models.

pub mod agent;
pub mod capability;
pub mod error;
pub mod model;
pub mod statement;

pub use agent::{Agent, DbRefs, canonicalize};
pub use capability::CapabilityRegistry;
pub use error::ModelError;
pub use model::{ModelBuilder, NodeId, NodeKind, PathwayModel};
pub use statement::{
    ActivityModification, ModType, Modification, Relationship, Statement, StatementContext,
};
