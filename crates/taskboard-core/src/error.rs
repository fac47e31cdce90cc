use thiserror::Error;

/// Failures raised by a record store backend.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Failed to load {0}")]
    Load(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Category '{name}' is still used by {count} task(s)")]
    CategoryInUse { name: String, count: usize },
}

impl CoreError {
    /// Wraps a store failure raised while reading a collection.
    pub(crate) fn load(what: &str, err: StoreError) -> Self {
        tracing::error!(error = %err, "failed to load {}", what);
        CoreError::Load(format!("{}: {}", what, err))
    }

    /// Wraps a store failure raised while performing `action`.
    pub(crate) fn store(action: &str, err: StoreError) -> Self {
        tracing::error!(error = %err, "failed to {}", action);
        CoreError::Store(format!("failed to {}: {}", action, err))
    }
}
