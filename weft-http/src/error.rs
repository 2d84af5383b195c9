use thiserror::Error;
use weft_codec::CodecError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpError {
    #[error("invalid data: {0}")]
    InvalidData(String),
    #[error("buffer overflow: {size} bytes exceeds limit of {limit}")]
    BufferOverflow { size: usize, limit: usize },
    #[error("too many headers: {count} exceeds limit of {limit}")]
    TooManyHeaders { count: usize, limit: usize },
    #[error("header line too long: {size} bytes exceeds limit of {limit}")]
    HeaderLineTooLong { size: usize, limit: usize },
    #[error("body too large: {size} bytes exceeds limit of {limit}")]
    BodyTooLarge { size: usize, limit: usize },
    #[error("unexpected eof")]
    UnexpectedEof,
    #[error("invalid header value")]
    InvalidHeaderValue,
    #[error("invalid status code")]
    InvalidStatusCode,
    #[error("invalid chunk size")]
    InvalidChunkSize,
}

impl From<CodecError> for HttpError {
    fn from(err: CodecError) -> Self {
        HttpError::InvalidData(err.to_string())
    }
}
