use weft_codec::{base64_decode_str, base64_encode_bytes, trim_ows};
use weft_http::HttpError;

use crate::common::{invalid, split_list, token_or_quote, token_or_unquote};

fn strip_scheme<'a>(value: &'a str, scheme: &str) -> Option<&'a str> {
    let (candidate, rest) = value.split_once(' ')?;
    if candidate.eq_ignore_ascii_case(scheme) {
        Some(trim_ows(rest))
    } else {
        None
    }
}

fn is_token68(value: &str) -> bool {
    let trimmed = value.trim_end_matches('=');
    !trimmed.is_empty()
        && trimmed
            .bytes()
            .all(|byte| byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~' | b'+' | b'/'))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicAuth {
    pub user_id: String,
    pub password: String,
}

impl BasicAuth {
    pub fn new(user_id: impl Into<String>, password: impl Into<String>) -> Result<Self, HttpError> {
        let user_id = user_id.into();
        if user_id.contains(':') {
            return Err(invalid(format!("user-id contains ':': {user_id:?}")));
        }
        Ok(Self {
            user_id,
            password: password.into(),
        })
    }

    pub fn parse(value: &str) -> Result<Self, HttpError> {
        let encoded = strip_scheme(value, "Basic")
            .ok_or_else(|| invalid(format!("not a basic credential: {value:?}")))?;
        if !is_token68(encoded) {
            return Err(invalid(format!("invalid basic token: {encoded:?}")));
        }
        let decoded = base64_decode_str(encoded)?;
        let decoded = String::from_utf8(decoded)
            .map_err(|_| invalid("basic credentials are not valid utf-8"))?;
        let (user_id, password) = decoded
            .split_once(':')
            .ok_or_else(|| invalid("basic credentials missing ':'"))?;
        Ok(Self {
            user_id: user_id.to_string(),
            password: password.to_string(),
        })
    }

    pub fn to_header_value(&self) -> String {
        let credentials = format!("{}:{}", self.user_id, self.password);
        format!("Basic {}", base64_encode_bytes(credentials.as_bytes()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerToken {
    pub token: String,
}

impl BearerToken {
    pub fn parse(value: &str) -> Result<Self, HttpError> {
        let token = strip_scheme(value, "Bearer")
            .ok_or_else(|| invalid(format!("not a bearer credential: {value:?}")))?;
        if !is_token68(token) {
            return Err(invalid(format!("invalid bearer token: {token:?}")));
        }
        Ok(Self {
            token: token.to_string(),
        })
    }

    pub fn to_header_value(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestAuth {
    pub params: Vec<(String, String)>,
}

impl DigestAuth {
    pub fn parse(value: &str) -> Result<Self, HttpError> {
        let rest = strip_scheme(value, "Digest")
            .ok_or_else(|| invalid(format!("not a digest credential: {value:?}")))?;
        let mut params = Vec::new();
        for item in split_list(rest) {
            let (name, value) = item
                .split_once('=')
                .ok_or_else(|| invalid(format!("digest parameter missing '=': {item:?}")))?;
            let name = trim_ows(name).to_ascii_lowercase();
            let value = token_or_unquote(trim_ows(value))?;
            params.push((name, value));
        }
        if params.is_empty() {
            return Err(invalid("empty digest parameter list"));
        }
        Ok(Self { params })
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(parameter, _)| parameter.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn to_header_value(&self) -> String {
        let params = self
            .params
            .iter()
            .map(|(name, value)| format!("{name}={}", token_or_quote(value)))
            .collect::<Vec<_>>()
            .join(", ");
        format!("Digest {params}")
    }
}
