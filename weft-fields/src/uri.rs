use weft_codec::is_vchar;
use weft_http::HttpError;

use crate::common::invalid;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Uri {
    pub scheme: Option<String>,
    pub userinfo: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub path: String,
    pub query: Option<String>,
    pub fragment: Option<String>,
}

fn is_scheme(value: &str) -> bool {
    let bytes = value.as_bytes();
    match bytes.first() {
        Some(first) if first.is_ascii_alphabetic() => bytes[1..]
            .iter()
            .all(|byte| byte.is_ascii_alphanumeric() || matches!(byte, b'+' | b'-' | b'.')),
        _ => false,
    }
}

fn parse_authority(value: &str) -> Result<(Option<String>, String, Option<u16>), HttpError> {
    if value.is_empty() {
        return Err(invalid("empty authority"));
    }
    let (userinfo, host_port) = match value.split_once('@') {
        Some((userinfo, host_port)) => (Some(userinfo.to_string()), host_port),
        None => (None, value),
    };
    let (host, port_part) = if let Some(rest) = host_port.strip_prefix('[') {
        let end = rest
            .find(']')
            .ok_or_else(|| invalid(format!("unterminated ip-literal: {host_port:?}")))?;
        let host = &host_port[..end + 2];
        let after = &rest[end + 1..];
        match after.strip_prefix(':') {
            Some(port) => (host, Some(port)),
            None if after.is_empty() => (host, None),
            None => return Err(invalid(format!("junk after ip-literal: {host_port:?}"))),
        }
    } else {
        match host_port.split_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (host_port, None),
        }
    };
    if host.is_empty() {
        return Err(invalid(format!("empty host in {value:?}")));
    }
    let port = match port_part {
        Some("") | None => None,
        Some(port) => Some(
            port.parse::<u16>()
                .map_err(|_| invalid(format!("invalid port: {port:?}")))?,
        ),
    };
    Ok((userinfo, host.to_string(), port))
}

impl Uri {
    pub fn parse(value: &str) -> Result<Self, HttpError> {
        if value.is_empty() {
            return Err(invalid("empty uri"));
        }
        if !value.bytes().all(is_vchar) {
            return Err(invalid(format!("uri contains invalid bytes: {value:?}")));
        }
        if value == "*" {
            return Ok(Self {
                path: "*".to_string(),
                ..Self::default()
            });
        }

        let (rest, fragment) = match value.split_once('#') {
            Some((rest, fragment)) => (rest, Some(fragment.to_string())),
            None => (value, None),
        };
        let (rest, query) = match rest.split_once('?') {
            Some((rest, query)) => (rest, Some(query.to_string())),
            None => (rest, None),
        };

        if rest.starts_with('/') {
            return Ok(Self {
                path: rest.to_string(),
                query,
                fragment,
                ..Self::default()
            });
        }

        if let Some((scheme, after)) = rest.split_once(':') {
            if is_scheme(scheme) && !after.bytes().all(|byte| byte.is_ascii_digit()) {
                let scheme = Some(scheme.to_ascii_lowercase());
                if let Some(after) = after.strip_prefix("//") {
                    let (authority, path) = match after.find('/') {
                        Some(slash) => (&after[..slash], &after[slash..]),
                        None => (after, ""),
                    };
                    let (userinfo, host, port) = parse_authority(authority)?;
                    return Ok(Self {
                        scheme,
                        userinfo,
                        host: Some(host),
                        port,
                        path: path.to_string(),
                        query,
                        fragment,
                    });
                }
                return Ok(Self {
                    scheme,
                    path: after.to_string(),
                    query,
                    fragment,
                    ..Self::default()
                });
            }
        }

        let (userinfo, host, port) = parse_authority(rest)?;
        Ok(Self {
            scheme: None,
            userinfo,
            host: Some(host),
            port,
            path: String::new(),
            query,
            fragment,
        })
    }

    pub fn origin_form(&self) -> String {
        let mut output = if self.path.is_empty() {
            "/".to_string()
        } else {
            self.path.clone()
        };
        if let Some(query) = &self.query {
            output.push('?');
            output.push_str(query);
        }
        output
    }

    pub fn to_header_value(&self) -> String {
        let mut output = String::new();
        if let Some(scheme) = &self.scheme {
            output.push_str(scheme);
            output.push(':');
        }
        if let Some(host) = &self.host {
            if self.scheme.is_some() {
                output.push_str("//");
            }
            if let Some(userinfo) = &self.userinfo {
                output.push_str(userinfo);
                output.push('@');
            }
            output.push_str(host);
            if let Some(port) = self.port {
                output.push(':');
                output.push_str(&port.to_string());
            }
        }
        output.push_str(&self.path);
        if let Some(query) = &self.query {
            output.push('?');
            output.push_str(query);
        }
        if let Some(fragment) = &self.fragment {
            output.push('#');
            output.push_str(fragment);
        }
        output
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Host {
    pub host: String,
    pub port: Option<u16>,
}

impl Host {
    pub fn parse(value: &str) -> Result<Self, HttpError> {
        if value.is_empty() {
            return Err(invalid("empty host header"));
        }
        if value.contains('@') || !value.bytes().all(is_vchar) {
            return Err(invalid(format!("invalid host header: {value:?}")));
        }
        let (userinfo, host, port) = parse_authority(value)?;
        if userinfo.is_some() {
            return Err(invalid(format!("invalid host header: {value:?}")));
        }
        Ok(Self { host, port })
    }

    pub fn to_header_value(&self) -> String {
        match self.port {
            Some(port) => format!("{}:{port}", self.host),
            None => self.host.clone(),
        }
    }
}
