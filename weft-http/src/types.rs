use std::fmt;

use weft_codec::{is_field_byte, is_token, parse_dec_u64, trim_ows};

use crate::error::HttpError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpVersion {
    Http10,
    #[default]
    Http11,
}

impl HttpVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpVersion::Http10 => "HTTP/1.0",
            HttpVersion::Http11 => "HTTP/1.1",
        }
    }
}

impl fmt::Display for HttpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Headers {
    entries: Vec<Header>,
}

pub(crate) fn validate_header(name: &str, value: &str) -> Result<Header, HttpError> {
    if !is_token(name.as_bytes()) {
        return Err(HttpError::InvalidHeaderValue);
    }
    if !value.bytes().all(is_field_byte) {
        return Err(HttpError::InvalidHeaderValue);
    }
    Ok(Header {
        name: name.to_string(),
        value: trim_ows(value).to_string(),
    })
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: &str, value: &str) -> Result<(), HttpError> {
        let header = validate_header(name, value)?;
        self.entries.push(header);
        Ok(())
    }

    pub(crate) fn append(&mut self, header: Header) {
        self.entries.push(header);
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|header| header.name.eq_ignore_ascii_case(name))
            .map(|header| header.value.as_str())
    }

    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> {
        self.entries
            .iter()
            .filter(move |header| header.name.eq_ignore_ascii_case(name))
            .map(|header| header.value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Header> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a Headers {
    type Item = &'a Header;
    type IntoIter = std::slice::Iter<'a, Header>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

fn header_tokens<'a>(headers: &'a Headers, name: &'a str) -> impl Iterator<Item = &'a str> {
    headers
        .get_all(name)
        .flat_map(|value| value.split(','))
        .map(trim_ows)
        .filter(|token| !token.is_empty())
}

fn has_connection_token(headers: &Headers, token: &str) -> bool {
    header_tokens(headers, "connection").any(|option| option.eq_ignore_ascii_case(token))
}

pub(crate) fn last_transfer_coding_is_chunked(headers: &Headers) -> bool {
    header_tokens(headers, "transfer-encoding")
        .last()
        .is_some_and(|coding| coding.eq_ignore_ascii_case("chunked"))
}

pub(crate) fn single_content_length(headers: &Headers) -> Option<usize> {
    let mut values = header_tokens(headers, "content-length");
    let first = values.next()?;
    if !values.all(|value| value == first) {
        return None;
    }
    parse_dec_u64(first)
        .ok()
        .and_then(|length| usize::try_from(length).ok())
}

fn keep_alive(version: HttpVersion, headers: &Headers) -> bool {
    match version {
        HttpVersion::Http10 => has_connection_token(headers, "keep-alive"),
        HttpVersion::Http11 => !has_connection_token(headers, "close"),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub(crate) method: String,
    pub(crate) target: String,
    pub(crate) version: HttpVersion,
    pub(crate) headers: Headers,
    pub(crate) body: Vec<u8>,
}

impl Request {
    pub fn new(method: impl Into<String>, target: impl Into<String>) -> Self {
        Self::with_version(method, target, HttpVersion::Http11)
    }

    pub fn with_version(
        method: impl Into<String>,
        target: impl Into<String>,
        version: HttpVersion,
    ) -> Self {
        Self {
            method: method.into(),
            target: target.into(),
            version,
            headers: Headers::new(),
            body: Vec::new(),
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Result<Self, HttpError> {
        self.headers.push(name, value)?;
        Ok(self)
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn version(&self) -> HttpVersion {
        self.version
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn body_bytes(&self) -> &[u8] {
        &self.body
    }

    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    pub fn has_header(&self, name: &str) -> bool {
        self.headers.contains(name)
    }

    pub fn is_keep_alive(&self) -> bool {
        keep_alive(self.version, &self.headers)
    }

    pub fn content_length(&self) -> Option<usize> {
        single_content_length(&self.headers)
    }

    pub fn is_chunked(&self) -> bool {
        last_transfer_coding_is_chunked(&self.headers)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub(crate) version: HttpVersion,
    pub(crate) status_code: u16,
    pub(crate) reason_phrase: String,
    pub(crate) headers: Headers,
    pub(crate) body: Vec<u8>,
}

impl Response {
    pub fn new(status_code: u16) -> Self {
        Self::with_version(status_code, HttpVersion::Http11)
    }

    pub fn with_version(status_code: u16, version: HttpVersion) -> Self {
        Self {
            version,
            status_code,
            reason_phrase: String::new(),
            headers: Headers::new(),
            body: Vec::new(),
        }
    }

    pub fn reason(mut self, reason_phrase: impl Into<String>) -> Self {
        self.reason_phrase = reason_phrase.into();
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Result<Self, HttpError> {
        self.headers.push(name, value)?;
        Ok(self)
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub fn version(&self) -> HttpVersion {
        self.version
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn reason_phrase(&self) -> &str {
        &self.reason_phrase
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn body_bytes(&self) -> &[u8] {
        &self.body
    }

    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    pub fn has_header(&self, name: &str) -> bool {
        self.headers.contains(name)
    }

    pub fn is_keep_alive(&self) -> bool {
        keep_alive(self.version, &self.headers)
    }

    pub fn content_length(&self) -> Option<usize> {
        single_content_length(&self.headers)
    }

    pub fn is_chunked(&self) -> bool {
        last_transfer_coding_is_chunked(&self.headers)
    }

    pub fn is_informational(&self) -> bool {
        (100..=199).contains(&self.status_code)
    }

    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status_code)
    }

    pub fn is_redirect(&self) -> bool {
        (300..=399).contains(&self.status_code)
    }

    pub fn is_client_error(&self) -> bool {
        (400..=499).contains(&self.status_code)
    }

    pub fn is_server_error(&self) -> bool {
        (500..=599).contains(&self.status_code)
    }
}
