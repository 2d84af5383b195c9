use weft_codec::trim_ows;
use weft_http::HttpError;

use crate::common::{expect_token, invalid, lowercase_token, split_list};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expect {
    Continue,
}

impl Expect {
    pub fn parse(value: &str) -> Result<Self, HttpError> {
        if value.eq_ignore_ascii_case("100-continue") {
            Ok(Expect::Continue)
        } else {
            Err(invalid(format!("unsupported expectation: {value:?}")))
        }
    }

    pub fn to_header_value(&self) -> String {
        "100-continue".to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trailer {
    pub fields: Vec<String>,
}

impl Trailer {
    pub fn parse(value: &str) -> Result<Self, HttpError> {
        let fields = split_list(value)
            .into_iter()
            .map(lowercase_token)
            .collect::<Result<Vec<_>, _>>()?;
        if fields.is_empty() {
            return Err(invalid("empty trailer header"));
        }
        Ok(Self { fields })
    }

    pub fn to_header_value(&self) -> String {
        self.fields.join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Protocol {
    pub name: String,
    pub version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upgrade {
    pub protocols: Vec<Protocol>,
}

impl Upgrade {
    pub fn parse(value: &str) -> Result<Self, HttpError> {
        let mut protocols = Vec::new();
        for item in split_list(value) {
            let protocol = match item.split_once('/') {
                Some((name, version)) => Protocol {
                    name: expect_token(trim_ows(name))?.to_string(),
                    version: Some(expect_token(trim_ows(version))?.to_string()),
                },
                None => Protocol {
                    name: expect_token(item)?.to_string(),
                    version: None,
                },
            };
            protocols.push(protocol);
        }
        if protocols.is_empty() {
            return Err(invalid("empty upgrade header"));
        }
        Ok(Self { protocols })
    }

    pub fn to_header_value(&self) -> String {
        self.protocols
            .iter()
            .map(|protocol| match &protocol.version {
                Some(version) => format!("{}/{version}", protocol.name),
                None => protocol.name.clone(),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Vary {
    Any,
    Headers(Vec<String>),
}

impl Vary {
    pub fn parse(value: &str) -> Result<Self, HttpError> {
        if value.trim() == "*" {
            return Ok(Vary::Any);
        }
        let headers = split_list(value)
            .into_iter()
            .map(lowercase_token)
            .collect::<Result<Vec<_>, _>>()?;
        if headers.is_empty() {
            return Err(invalid("empty vary header"));
        }
        Ok(Vary::Headers(headers))
    }

    pub fn to_header_value(&self) -> String {
        match self {
            Vary::Any => "*".to_string(),
            Vary::Headers(headers) => headers.join(", "),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub options: Vec<String>,
}

impl Connection {
    pub fn parse(value: &str) -> Result<Self, HttpError> {
        let options = split_list(value)
            .into_iter()
            .map(lowercase_token)
            .collect::<Result<Vec<_>, _>>()?;
        if options.is_empty() {
            return Err(invalid("empty connection header"));
        }
        Ok(Self { options })
    }

    pub fn has(&self, option: &str) -> bool {
        self.options
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(option))
    }

    pub fn to_header_value(&self) -> String {
        self.options.join(", ")
    }
}
