use weft_codec::{parse_dec_u64, trim_ows};
use weft_http::HttpError;

use crate::common::{invalid, lowercase_token, split_list, token_or_quote, token_or_unquote};
use crate::date::HttpDate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheDirective {
    pub name: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheControl {
    pub directives: Vec<CacheDirective>,
}

impl CacheControl {
    pub fn parse(value: &str) -> Result<Self, HttpError> {
        let mut directives = Vec::new();
        for item in split_list(value) {
            let directive = match item.split_once('=') {
                Some((name, value)) => CacheDirective {
                    name: lowercase_token(trim_ows(name))?,
                    value: Some(token_or_unquote(trim_ows(value))?),
                },
                None => CacheDirective {
                    name: lowercase_token(item)?,
                    value: None,
                },
            };
            directives.push(directive);
        }
        if directives.is_empty() {
            return Err(invalid("empty cache-control"));
        }
        Ok(Self { directives })
    }

    pub fn get(&self, name: &str) -> Option<&CacheDirective> {
        self.directives
            .iter()
            .find(|directive| directive.name.eq_ignore_ascii_case(name))
    }

    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn max_age(&self) -> Option<u64> {
        let directive = self.get("max-age")?;
        parse_dec_u64(directive.value.as_deref()?).ok()
    }

    pub fn to_header_value(&self) -> String {
        let mut items = Vec::new();
        for directive in &self.directives {
            match &directive.value {
                Some(value) => items.push(format!("{}={}", directive.name, token_or_quote(value))),
                None => items.push(directive.name.clone()),
            }
        }
        items.join(", ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Age {
    pub seconds: u64,
}

impl Age {
    pub fn parse(value: &str) -> Result<Self, HttpError> {
        let seconds = parse_dec_u64(value)
            .map_err(|_| invalid(format!("invalid age: {value:?}")))?;
        Ok(Self { seconds })
    }

    pub fn to_header_value(&self) -> String {
        self.seconds.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expires {
    pub date: HttpDate,
}

impl Expires {
    pub fn parse(value: &str) -> Result<Self, HttpError> {
        Ok(Self {
            date: HttpDate::parse(value)?,
        })
    }

    pub fn to_header_value(&self) -> String {
        self.date.to_header_value()
    }
}
