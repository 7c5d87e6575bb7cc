use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Deliberate capability gap in the storage contract; callers reaching
    /// these operations are miswired and must hear about it.
    #[error("operation not supported: {0}")]
    Unsupported(&'static str),
    #[error("io error: {0}")]
    Io(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}
