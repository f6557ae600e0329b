// Error kinds surfaced at the classifier boundary.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    /// The supplied payload was not an array; classification must not run.
    #[error("Invalid input. 'data' field must be an array.")]
    InvalidInput,

    /// Anything unexpected while classifying. Carries no detail.
    #[error("Internal server error")]
    InternalFailure,
}
