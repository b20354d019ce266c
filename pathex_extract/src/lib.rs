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

//! Statement extraction from pathway models.

pub mod citation;
pub mod diagnostic;
pub mod error;
pub mod hgnc;
pub mod modification;
pub mod processor;
pub mod resolver;

pub use citation::extract_citations;
pub use diagnostic::Diagnostic;
pub use error::{CacheError, ExtractError, LookupError, Result};
pub use hgnc::{HgncCache, HgncLookup, HgncRestClient, StaticHgncTable};
pub use modification::{ModificationSites, extract_modification_sites};
pub use processor::PathwayProcessor;
pub use resolver::{EntityResolver, hgnc_id, uniprot_ids};
