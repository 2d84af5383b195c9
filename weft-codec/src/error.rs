use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("invalid decimal: {0}")]
    Decimal(String),
    #[error("invalid hex: {0}")]
    Hex(String),
    #[error("integer overflow: {0}")]
    Overflow(String),
    #[error("invalid percent encoding: {0}")]
    Percent(String),
    #[error("invalid base64: {0}")]
    Base64(String),
    #[error("invalid utf-8: {0}")]
    Utf8(String),
}
