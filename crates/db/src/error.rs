use thiserror::Error;

/// Failures the seeding run can surface. All are fatal to the run; the
/// steps are idempotent, so re-running after fixing the cause is the
/// recovery path.
#[derive(Debug, Error)]
pub enum SeedError {
    /// The database handle is unusable (probe, pool build, or begin failed).
    #[error("database handle unusable: {0}")]
    Connectivity(#[source] sqlx::Error),

    /// A principal with the configured name exists but carries a different
    /// secret or different role grants. Never auto-resolved.
    #[error("principal '{name}' already exists with different credentials or roles")]
    PrincipalConflict { name: String },

    /// Collection DDL failed for a reason other than already-exists
    /// (`IF NOT EXISTS` absorbs the benign case).
    #[error("failed to create collection '{collection}': {source}")]
    CollectionCreate {
        collection: &'static str,
        source: sqlx::Error,
    },

    /// Any other seeding statement failed (principal bookkeeping, emptiness
    /// checks, baseline inserts, commit).
    #[error("seeding statement failed: {0}")]
    Query(#[from] sqlx::Error),

    /// Role grants could not be encoded for storage.
    #[error("role grants not serializable: {0}")]
    Serialization(#[from] serde_json::Error),
}
