use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    /// Malformed or out-of-policy input, carrying a message fit for the caller.
    #[error("{0}")]
    Validation(String),

    /// A domain rule refused the operation (overlap, missing slot, wrong status).
    #[error("{0}")]
    Rejected(String),

    #[error("Store error: {0}")]
    Store(#[from] eyre::Report),

    #[error("Corrupt slot record for provider {provider_id}: {reason}")]
    CorruptRecord { provider_id: String, reason: String },

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type SlotResult<T> = Result<T, SlotError>;
