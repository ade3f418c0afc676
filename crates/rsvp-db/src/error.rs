use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A row with this email already exists; nothing was written.
    #[error("email already registered")]
    DuplicateEmail,

    /// Connectivity or execution failure. Callers report this as a generic
    /// condition; the underlying error only goes to server-side logs.
    #[error("database unavailable: {0}")]
    Unavailable(#[from] rusqlite::Error),

    #[error("database lock poisoned")]
    LockPoisoned,
}
