use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Record store unavailable: {0}")]
    StoreUnavailable(String),
}

impl StatsError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Wrap a failed store query, keeping the full context chain in the message.
    pub fn store(err: anyhow::Error) -> Self {
        Self::StoreUnavailable(format!("{err:#}"))
    }

    /// Stable machine-readable code for API consumers.
    pub fn code(&self) -> &'static str {
        match self {
            StatsError::NotFound { .. } => "not_found",
            StatsError::Validation(_) => "validation",
            StatsError::StoreUnavailable(_) => "store_unavailable",
        }
    }
}
