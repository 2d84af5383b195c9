mod ascii;
mod encode;
mod error;
mod num;

pub use ascii::{
    eq_ignore_case, is_field_byte, is_obs_text, is_ows, is_tchar, is_token, is_vchar, trim_ows,
};
pub use encode::{
    base64_decode_bytes, base64_decode_str, base64_encode_bytes, percent_decode_bytes,
    percent_decode_str, percent_encode_bytes, percent_encode_str,
};
pub use error::CodecError;
pub use num::{dec_digit, hex_digit, parse_dec_u64, parse_hex_u64};
