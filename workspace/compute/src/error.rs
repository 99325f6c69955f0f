use common::ValidationErrors;
use thiserror::Error;

/// Error types for the scheduling module
#[derive(Error, Debug)]
pub enum SchedulerError {
    /// The draft violated one or more business rules. Carries the complete
    /// field-keyed set so callers can render every failure at once.
    #[error("transfer draft failed validation: {0}")]
    Validation(ValidationErrors),

    /// The referenced scheduled transfer does not exist.
    #[error("scheduled transfer {0} does not exist")]
    TransferNotFound(i32),

    /// The caller does not own the scheduled transfer it tried to act on.
    #[error("user {owner_id} does not own scheduled transfer {transfer_id}")]
    Forbidden { transfer_id: i32, owner_id: i32 },

    /// The caller handed over a structurally impossible draft, e.g. a
    /// third-party transfer with no beneficiary reference at all. This is a
    /// programmer error on the calling side, kept apart from the recoverable
    /// validation set.
    #[error("malformed transfer draft: {0}")]
    MalformedDraft(String),
}

/// Type alias for Result with SchedulerError
pub type Result<T> = std::result::Result<T, SchedulerError>;
