use thiserror::Error;

/// Recoverable failures of store operations. Every failure leaves the
/// store unchanged; nothing here is fatal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("term '{0}' already exists")]
    DuplicateTerm(String),
    #[error("no available terms to select")]
    NoAvailableTerms,
    #[error("import data must be a JSON array")]
    ImportFormat,
}
