use weft_codec::{is_token, trim_ows};
use weft_http::HttpError;

use crate::common::invalid;
use crate::date::HttpDate;

fn parse_cookie_pair(item: &str) -> Result<(String, String), HttpError> {
    let (name, value) = item
        .split_once('=')
        .ok_or_else(|| invalid(format!("cookie pair missing '=': {item:?}")))?;
    let name = trim_ows(name);
    if !is_token(name.as_bytes()) {
        return Err(invalid(format!("invalid cookie name: {name:?}")));
    }
    Ok((name.to_string(), trim_ows(value).to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub pairs: Vec<(String, String)>,
}

impl Cookie {
    pub fn parse(value: &str) -> Result<Self, HttpError> {
        let mut pairs = Vec::new();
        for item in value.split(';') {
            let item = trim_ows(item);
            if item.is_empty() {
                continue;
            }
            pairs.push(parse_cookie_pair(item)?);
        }
        if pairs.is_empty() {
            return Err(invalid("empty cookie header"));
        }
        Ok(Self { pairs })
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(cookie, _)| cookie == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn to_header_value(&self) -> String {
        self.pairs
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl SameSite {
    fn parse(value: &str) -> Result<Self, HttpError> {
        if value.eq_ignore_ascii_case("strict") {
            Ok(SameSite::Strict)
        } else if value.eq_ignore_ascii_case("lax") {
            Ok(SameSite::Lax)
        } else if value.eq_ignore_ascii_case("none") {
            Ok(SameSite::None)
        } else {
            Err(invalid(format!("invalid samesite value: {value:?}")))
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCookie {
    pub name: String,
    pub value: String,
    pub domain: Option<String>,
    pub path: Option<String>,
    pub expires: Option<HttpDate>,
    pub max_age: Option<i64>,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: Option<SameSite>,
}

impl SetCookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: None,
            path: None,
            expires: None,
            max_age: None,
            secure: false,
            http_only: false,
            same_site: None,
        }
    }

    pub fn parse(value: &str) -> Result<Self, HttpError> {
        let mut items = value.split(';');
        let pair = items
            .next()
            .ok_or_else(|| invalid("empty set-cookie header"))?;
        let (name, value) = parse_cookie_pair(trim_ows(pair))?;
        let mut cookie = SetCookie::new(name, value);

        for item in items {
            let item = trim_ows(item);
            if item.is_empty() {
                continue;
            }
            let (attribute, argument) = match item.split_once('=') {
                Some((attribute, argument)) => (trim_ows(attribute), Some(trim_ows(argument))),
                None => (item, None),
            };
            if attribute.eq_ignore_ascii_case("domain") {
                let argument =
                    argument.ok_or_else(|| invalid("domain attribute missing value"))?;
                cookie.domain = Some(argument.trim_start_matches('.').to_ascii_lowercase());
            } else if attribute.eq_ignore_ascii_case("path") {
                let argument = argument.ok_or_else(|| invalid("path attribute missing value"))?;
                cookie.path = Some(argument.to_string());
            } else if attribute.eq_ignore_ascii_case("expires") {
                let argument =
                    argument.ok_or_else(|| invalid("expires attribute missing value"))?;
                cookie.expires = Some(HttpDate::parse(argument)?);
            } else if attribute.eq_ignore_ascii_case("max-age") {
                let argument =
                    argument.ok_or_else(|| invalid("max-age attribute missing value"))?;
                let max_age = argument
                    .parse::<i64>()
                    .map_err(|_| invalid(format!("invalid max-age: {argument:?}")))?;
                cookie.max_age = Some(max_age);
            } else if attribute.eq_ignore_ascii_case("secure") {
                cookie.secure = true;
            } else if attribute.eq_ignore_ascii_case("httponly") {
                cookie.http_only = true;
            } else if attribute.eq_ignore_ascii_case("samesite") {
                let argument =
                    argument.ok_or_else(|| invalid("samesite attribute missing value"))?;
                cookie.same_site = Some(SameSite::parse(argument)?);
            }
        }
        Ok(cookie)
    }

    pub fn to_header_value(&self) -> String {
        let mut output = format!("{}={}", self.name, self.value);
        if let Some(domain) = &self.domain {
            output.push_str("; Domain=");
            output.push_str(domain);
        }
        if let Some(path) = &self.path {
            output.push_str("; Path=");
            output.push_str(path);
        }
        if let Some(expires) = &self.expires {
            output.push_str("; Expires=");
            output.push_str(&expires.to_header_value());
        }
        if let Some(max_age) = self.max_age {
            output.push_str("; Max-Age=");
            output.push_str(&max_age.to_string());
        }
        if self.secure {
            output.push_str("; Secure");
        }
        if self.http_only {
            output.push_str("; HttpOnly");
        }
        if let Some(same_site) = self.same_site {
            output.push_str("; SameSite=");
            output.push_str(same_site.as_str());
        }
        output
    }
}
