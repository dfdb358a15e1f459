use thiserror::Error;

/// All errors produced by the finances backend.
#[derive(Error, Debug)]
pub enum FinancesError {
    /// The backing store is unavailable or a write failed. Always surfaced
    /// to the initiating action so the user can retry.
    #[error("storage failure: {0}")]
    Storage(#[from] sqlx::Error),

    /// An update or delete referenced a transaction that does not exist.
    #[error("transaction {0} not found")]
    NotFound(i64),

    /// A create/update request failed validation.
    #[error("invalid transaction: {0}")]
    InvalidTransaction(String),

    /// A fault while deriving balances, totals or daily maps. Coordinators
    /// substitute an empty result instead of propagating this.
    #[error("aggregation failed: {0}")]
    Aggregation(String),

    /// A stored preference value no longer matches a known case.
    #[error("unrecognized {field} value in preferences: {value}")]
    PreferenceParse { field: &'static str, value: String },

    /// A preference file could not be serialized or deserialized.
    #[error("preference file error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Pass-through for raw I/O errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the backend.
pub type Result<T> = std::result::Result<T, FinancesError>;
