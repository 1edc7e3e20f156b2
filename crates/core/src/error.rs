use thiserror::Error;

pub type InsightsResult<T> = Result<T, InsightsError>;

#[derive(Error, Debug)]
pub enum InsightsError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Insights fetch error: {0}")]
    Fetch(String),

    #[error("Insights service returned HTTP {status}: {message}")]
    UpstreamStatus { status: u16, message: String },

    #[error("Invalid insights payload: {0}")]
    InvalidPayload(String),

    #[error("Customer not found: {0}")]
    CustomerNotFound(u32),

    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Content generation cancelled")]
    GenerationCancelled,

    #[error("Content generation superseded by a newer request")]
    GenerationSuperseded,

    #[error("Session limit reached: {0} sessions are active")]
    SessionLimit(usize),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl InsightsError {
    /// Whether the error came from the external insights service rather
    /// than from this process.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            InsightsError::Fetch(_)
                | InsightsError::UpstreamStatus { .. }
                | InsightsError::InvalidPayload(_)
        )
    }
}
