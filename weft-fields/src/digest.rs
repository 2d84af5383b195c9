use weft_codec::{base64_encode_bytes, base64_decode_str, parse_dec_u64, trim_ows};
use weft_http::HttpError;

use crate::common::{invalid, lowercase_token, split_list};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDigest {
    pub digests: Vec<(String, Vec<u8>)>,
}

impl ContentDigest {
    pub fn parse(value: &str) -> Result<Self, HttpError> {
        let mut digests = Vec::new();
        for item in split_list(value) {
            let (algorithm, encoded) = item
                .split_once('=')
                .ok_or_else(|| invalid(format!("digest entry missing '=': {item:?}")))?;
            let algorithm = lowercase_token(trim_ows(algorithm))?;
            let encoded = trim_ows(encoded);
            let inner = encoded
                .strip_prefix(':')
                .and_then(|rest| rest.strip_suffix(':'))
                .ok_or_else(|| invalid(format!("digest value is not a byte sequence: {encoded:?}")))?;
            digests.push((algorithm, base64_decode_str(inner)?));
        }
        if digests.is_empty() {
            return Err(invalid("empty digest field"));
        }
        Ok(Self { digests })
    }

    pub fn get(&self, algorithm: &str) -> Option<&[u8]> {
        self.digests
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(algorithm))
            .map(|(_, digest)| digest.as_slice())
    }

    pub fn to_header_value(&self) -> String {
        self.digests
            .iter()
            .map(|(algorithm, digest)| {
                format!("{algorithm}=:{}:", base64_encode_bytes(digest))
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WantDigest {
    pub preferences: Vec<(String, u64)>,
}

impl WantDigest {
    pub fn parse(value: &str) -> Result<Self, HttpError> {
        let mut preferences = Vec::new();
        for item in split_list(value) {
            let (algorithm, weight) = item
                .split_once('=')
                .ok_or_else(|| invalid(format!("digest preference missing '=': {item:?}")))?;
            let algorithm = lowercase_token(trim_ows(algorithm))?;
            let weight = parse_dec_u64(trim_ows(weight))
                .map_err(|_| invalid(format!("invalid digest preference: {item:?}")))?;
            preferences.push((algorithm, weight));
        }
        if preferences.is_empty() {
            return Err(invalid("empty digest preference field"));
        }
        Ok(Self { preferences })
    }

    pub fn to_header_value(&self) -> String {
        self.preferences
            .iter()
            .map(|(algorithm, weight)| format!("{algorithm}={weight}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
