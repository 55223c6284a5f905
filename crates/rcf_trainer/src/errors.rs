use thiserror::Error;

/// Errors returned by the trainer pipeline.
#[derive(Debug, Error)]
pub enum TrainerError {
    #[error("dataset error: {0}")]
    Dataset(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("model error: {0}")]
    Model(#[from] rcf_core::RcfError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
