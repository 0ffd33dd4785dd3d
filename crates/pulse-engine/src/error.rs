use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("payload normalization failed: {0}")]
    Normalize(#[from] pulse_normalize::NormalizeError),
    #[error("analysis task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
