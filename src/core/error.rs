use super::Variable;
use thiserror::Error;

/// The kinds of failures raised by this crate.
///
/// They are carried inside [`anyhow::Error`] values; use [`anyhow::Error::downcast_ref`] to inspect them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KernelError {
    /// A value was built from inconsistent parts (operator arity, empty trust partition set).
    #[error("construction error: {0}")]
    Construction(String),
    /// A strategy was combined with an incompatible collaborator.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// A formula was evaluated against a state that lacks one of its variables.
    #[error(r#"no value assigned to variable "{0}""#)]
    MissingAssignment(Variable),
    /// A search observed its cancellation token.
    #[error("search cancelled")]
    Cancelled,
}
