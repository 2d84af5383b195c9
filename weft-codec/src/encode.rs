use base64::Engine;

use crate::num::hex_digit;
use crate::CodecError;

pub fn percent_encode_bytes(input: &[u8]) -> String {
    percent_encoding::percent_encode(input, percent_encoding::NON_ALPHANUMERIC).to_string()
}

pub fn percent_encode_str(input: &str) -> String {
    percent_encode_bytes(input.as_bytes())
}

pub fn percent_decode_bytes(input: &[u8]) -> Result<Vec<u8>, CodecError> {
    let mut output = Vec::with_capacity(input.len());
    let mut cursor = 0;
    while cursor < input.len() {
        let byte = input[cursor];
        if byte == b'%' {
            let hi = input.get(cursor + 1).and_then(|b| hex_digit(*b));
            let lo = input.get(cursor + 2).and_then(|b| hex_digit(*b));
            match (hi, lo) {
                (Some(hi), Some(lo)) => {
                    output.push((hi as u8) << 4 | lo as u8);
                    cursor += 3;
                }
                _ => {
                    let tail = String::from_utf8_lossy(&input[cursor..]).into_owned();
                    return Err(CodecError::Percent(tail));
                }
            }
        } else {
            output.push(byte);
            cursor += 1;
        }
    }
    Ok(output)
}

pub fn percent_decode_str(input: &str) -> Result<String, CodecError> {
    let decoded = percent_decode_bytes(input.as_bytes())?;
    String::from_utf8(decoded).map_err(|err| CodecError::Utf8(err.to_string()))
}

pub fn base64_encode_bytes(input: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(input)
}

pub fn base64_decode_bytes(input: &[u8]) -> Result<Vec<u8>, CodecError> {
    base64::engine::general_purpose::STANDARD
        .decode(input)
        .map_err(|err| CodecError::Base64(err.to_string()))
}

pub fn base64_decode_str(input: &str) -> Result<Vec<u8>, CodecError> {
    base64_decode_bytes(input.as_bytes())
}
