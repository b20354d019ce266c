use std::path::PathBuf;

use pathex_core::ModelError;
use pathex_pattern::PatternError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExtractError>;

/// Failure of the gene-symbol lookup service.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("No HGNC symbol for id {0}")]
    NotFound(u32),

    #[error("HGNC request failed: {0}")]
    Http(String),

    #[error("Malformed HGNC response: {0}")]
    Malformed(String),
}

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cache file {path} is not valid JSON: {source}")]
    Serde {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Pattern error: {0}")]
    Pattern(#[from] PatternError),

    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),
}
