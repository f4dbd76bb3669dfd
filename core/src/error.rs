use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrainerError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unknown entry point '{name}'")]
    UnknownEntryPoint { name: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type TrainerResult<T> = Result<T, TrainerError>;
