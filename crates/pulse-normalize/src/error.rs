use thiserror::Error;

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("payload does not match any platform shape: {0}")]
    PayloadShape(#[from] serde_json::Error),
}
