use thiserror::Error;

pub type Result<T> = std::result::Result<T, PatternError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("Unknown pattern variable: '{0}'")]
    UnknownVariable(String),

    #[error("Variable '{0}' listed twice in one constraint")]
    DuplicateVariable(String),

    #[error("Constraint {constraint} takes {expected} variables, got {got}")]
    ArityMismatch {
        constraint: String,
        expected: usize,
        got: usize,
    },

    #[error("Variable '{0}' must be bound before this constraint")]
    UnboundVariable(String),

    #[error("Constraint {0} cannot introduce a new variable")]
    NotGenerative(String),
}
