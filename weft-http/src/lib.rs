mod decode;
mod encode;
mod error;
mod limits;
mod types;

pub use decode::{InterimMode, RequestDecoder, ResponseDecoder};
pub use encode::{
    canonical_reason, encode_chunk, encode_chunks, encode_request, encode_response,
};
pub use error::HttpError;
pub use limits::DecoderLimits;
pub use types::{Header, Headers, HttpVersion, Request, Response};
