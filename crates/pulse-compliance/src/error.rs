use thiserror::Error;

#[derive(Debug, Error)]
pub enum ComplianceError {
    #[error("failed to read compliance config at {path}: {source}")]
    ConfigIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse compliance config: {0}")]
    ConfigParse(#[from] serde_yaml::Error),
}
