//! Error types for the board and its storage collaborator

use crate::task::TaskId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed for key `{key}`: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("stored tasks could not be decoded: {0}")]
    Corrupt(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Please enter a task title")]
    EmptyTitle,

    #[error("task {0} not found")]
    TaskNotFound(TaskId),

    #[error("no task ids left to assign")]
    IdsExhausted,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type BoardResult<T> = Result<T, BoardError>;
