use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MoltError {
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
    #[error("Malformed identity store: {0}")]
    ParseError(String),
    #[error("Path error: {0}")]
    PathError(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Identity store changed on disk since it was loaded: {0}")]
    ConcurrentModification(String),
}
