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

//! Declarative constraint-graph patterns and their search.

pub mod constraint;
pub mod error;
pub mod library;
pub mod pattern;
pub mod search;

pub use constraint::{ChangeType, Constraint, RelType};
pub use error::PatternError;
pub use library::{PatternLibrary, activity_modification, controls_state_change, in_complex_with};
pub use pattern::{Match, Pattern};
pub use search::{Matcher, Searcher};
