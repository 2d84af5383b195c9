use weft_codec::{percent_decode_str, percent_encode_str, trim_ows};
use weft_http::HttpError;

use crate::common::{
    format_parameters, invalid, lowercase_token, parse_parameters, split_list,
    split_outside_quotes,
};
use crate::uri::Uri;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentType {
    pub media_type: String,
    pub subtype: String,
    pub parameters: Vec<(String, String)>,
}

impl ContentType {
    pub fn parse(value: &str) -> Result<Self, HttpError> {
        let parts = split_outside_quotes(value, ';');
        let parts: Vec<&str> = parts.iter().map(|part| trim_ows(part)).collect();
        let (media_type, subtype) = parts[0]
            .split_once('/')
            .ok_or_else(|| invalid(format!("media type missing '/': {value:?}")))?;
        Ok(Self {
            media_type: lowercase_token(media_type)?,
            subtype: lowercase_token(subtype)?,
            parameters: parse_parameters(&parts[1..])?,
        })
    }

    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|(parameter, _)| parameter.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn charset(&self) -> Option<&str> {
        self.parameter("charset")
    }

    pub fn is_json(&self) -> bool {
        self.media_type == "application"
            && (self.subtype == "json" || self.subtype.ends_with("+json"))
    }

    pub fn to_header_value(&self) -> String {
        let mut output = format!("{}/{}", self.media_type, self.subtype);
        format_parameters(&mut output, &self.parameters);
        output
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentEncoding {
    pub codings: Vec<String>,
}

impl ContentEncoding {
    pub fn parse(value: &str) -> Result<Self, HttpError> {
        let codings = split_list(value)
            .into_iter()
            .map(lowercase_token)
            .collect::<Result<Vec<_>, _>>()?;
        if codings.is_empty() {
            return Err(invalid("empty content-encoding"));
        }
        Ok(Self { codings })
    }

    pub fn to_header_value(&self) -> String {
        self.codings.join(", ")
    }
}

fn is_language_tag(value: &str) -> bool {
    !value.is_empty()
        && value.split('-').all(|segment| {
            (1..=8).contains(&segment.len())
                && segment.bytes().all(|byte| byte.is_ascii_alphanumeric())
        })
}

pub(crate) fn parse_language_tag(value: &str) -> Result<String, HttpError> {
    if is_language_tag(value) {
        Ok(value.to_string())
    } else {
        Err(invalid(format!("invalid language tag: {value:?}")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLanguage {
    pub tags: Vec<String>,
}

impl ContentLanguage {
    pub fn parse(value: &str) -> Result<Self, HttpError> {
        let tags = split_list(value)
            .into_iter()
            .map(parse_language_tag)
            .collect::<Result<Vec<_>, _>>()?;
        if tags.is_empty() {
            return Err(invalid("empty content-language"));
        }
        Ok(Self { tags })
    }

    pub fn to_header_value(&self) -> String {
        self.tags.join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDisposition {
    pub disposition: String,
    pub parameters: Vec<(String, String)>,
}

fn decode_ext_value(value: &str) -> Result<String, HttpError> {
    let mut parts = value.splitn(3, '\'');
    let charset = parts
        .next()
        .ok_or_else(|| invalid(format!("malformed ext-value: {value:?}")))?;
    let _language = parts
        .next()
        .ok_or_else(|| invalid(format!("malformed ext-value: {value:?}")))?;
    let encoded = parts
        .next()
        .ok_or_else(|| invalid(format!("malformed ext-value: {value:?}")))?;
    if !charset.eq_ignore_ascii_case("utf-8") {
        return Err(invalid(format!("unsupported ext-value charset: {charset:?}")));
    }
    Ok(percent_decode_str(encoded)?)
}

fn encode_ext_value(value: &str) -> String {
    format!("UTF-8''{}", percent_encode_str(value))
}

impl ContentDisposition {
    pub fn parse(value: &str) -> Result<Self, HttpError> {
        let parts = split_outside_quotes(value, ';');
        let parts: Vec<&str> = parts.iter().map(|part| trim_ows(part)).collect();
        let disposition = lowercase_token(parts[0])?;
        let mut parameters = Vec::new();
        for part in &parts[1..] {
            let (name, raw) = part
                .split_once('=')
                .ok_or_else(|| invalid(format!("parameter missing '=': {part:?}")))?;
            let name = trim_ows(name).to_ascii_lowercase();
            let raw = trim_ows(raw);
            let value = if name.ends_with('*') {
                decode_ext_value(raw)?
            } else {
                crate::common::token_or_unquote(raw)?
            };
            parameters.push((name, value));
        }
        Ok(Self {
            disposition,
            parameters,
        })
    }

    pub fn filename(&self) -> Option<&str> {
        self.parameters
            .iter()
            .find(|(name, _)| name == "filename*")
            .or_else(|| self.parameters.iter().find(|(name, _)| name == "filename"))
            .map(|(_, value)| value.as_str())
    }

    pub fn to_header_value(&self) -> String {
        let mut output = self.disposition.clone();
        for (name, value) in &self.parameters {
            output.push_str("; ");
            output.push_str(name);
            output.push('=');
            if name.ends_with('*') {
                output.push_str(&encode_ext_value(value));
            } else {
                output.push_str(&crate::common::token_or_quote(value));
            }
        }
        output
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub uri: Uri,
}

impl Location {
    pub fn parse(value: &str) -> Result<Self, HttpError> {
        Ok(Self {
            uri: Uri::parse(value)?,
        })
    }

    pub fn to_header_value(&self) -> String {
        self.uri.to_header_value()
    }
}
