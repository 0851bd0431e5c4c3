use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid record format: {0}")]
    InvalidFormat(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(i64),
}
