use weft_codec::trim_ows;
use weft_http::HttpError;

use crate::common::{
    format_parameters, format_qvalue, invalid, lowercase_token, parse_qvalue, split_list,
    split_outside_quotes, token_or_unquote,
};
use crate::media::parse_language_tag;

fn split_params(item: &str) -> (Vec<&str>, &str) {
    let parts = split_outside_quotes(item, ';');
    (parts[1..].to_vec(), parts[0])
}

fn extract_q(parts: &[&str]) -> Result<(Vec<(String, String)>, f32), HttpError> {
    let mut parameters = Vec::new();
    let mut q = 1.0;
    for part in parts {
        let part = trim_ows(part);
        let (name, value) = part
            .split_once('=')
            .ok_or_else(|| invalid(format!("parameter missing '=': {part:?}")))?;
        let name = trim_ows(name).to_ascii_lowercase();
        let value = trim_ows(value);
        if name == "q" {
            q = parse_qvalue(value)?;
        } else {
            parameters.push((name, token_or_unquote(value)?));
        }
    }
    Ok((parameters, q))
}

#[derive(Debug, Clone, PartialEq)]
pub struct MediaRange {
    pub media_type: String,
    pub subtype: String,
    pub parameters: Vec<(String, String)>,
    pub q: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Accept {
    pub ranges: Vec<MediaRange>,
}

fn parse_range_token(value: &str) -> Result<String, HttpError> {
    if value == "*" {
        Ok(value.to_string())
    } else {
        lowercase_token(value)
    }
}

impl Accept {
    pub fn parse(value: &str) -> Result<Self, HttpError> {
        let mut ranges = Vec::new();
        for item in split_list(value) {
            let (params, range) = split_params(item);
            let range = trim_ows(range);
            let (media_type, subtype) = range
                .split_once('/')
                .ok_or_else(|| invalid(format!("media range missing '/': {range:?}")))?;
            let media_type = parse_range_token(media_type)?;
            let subtype = parse_range_token(subtype)?;
            if media_type == "*" && subtype != "*" {
                return Err(invalid(format!("invalid media range: {range:?}")));
            }
            let (parameters, q) = extract_q(&params)?;
            ranges.push(MediaRange {
                media_type,
                subtype,
                parameters,
                q,
            });
        }
        if ranges.is_empty() {
            return Err(invalid("empty accept"));
        }
        Ok(Self { ranges })
    }

    pub fn to_header_value(&self) -> String {
        let mut items = Vec::new();
        for range in &self.ranges {
            let mut item = format!("{}/{}", range.media_type, range.subtype);
            format_parameters(&mut item, &range.parameters);
            if range.q != 1.0 {
                item.push_str(";q=");
                item.push_str(&format_qvalue(range.q));
            }
            items.push(item);
        }
        items.join(", ")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Weighted {
    pub value: String,
    pub q: f32,
}

fn parse_weighted_list(
    value: &str,
    parse_item: fn(&str) -> Result<String, HttpError>,
) -> Result<Vec<Weighted>, HttpError> {
    let mut entries = Vec::new();
    for item in split_list(value) {
        let (params, name) = split_params(item);
        let name = trim_ows(name);
        let name = if name == "*" {
            name.to_string()
        } else {
            parse_item(name)?
        };
        let (parameters, q) = extract_q(&params)?;
        if !parameters.is_empty() {
            return Err(invalid(format!("unexpected parameter on {name:?}")));
        }
        entries.push(Weighted { value: name, q });
    }
    if entries.is_empty() {
        return Err(invalid("empty list"));
    }
    Ok(entries)
}

fn format_weighted_list(entries: &[Weighted]) -> String {
    let mut items = Vec::new();
    for entry in entries {
        if entry.q == 1.0 {
            items.push(entry.value.clone());
        } else {
            items.push(format!("{};q={}", entry.value, format_qvalue(entry.q)));
        }
    }
    items.join(", ")
}

#[derive(Debug, Clone, PartialEq)]
pub struct AcceptEncoding {
    pub codings: Vec<Weighted>,
}

impl AcceptEncoding {
    pub fn parse(value: &str) -> Result<Self, HttpError> {
        Ok(Self {
            codings: parse_weighted_list(value, lowercase_token)?,
        })
    }

    pub fn to_header_value(&self) -> String {
        format_weighted_list(&self.codings)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AcceptCharset {
    pub charsets: Vec<Weighted>,
}

impl AcceptCharset {
    pub fn parse(value: &str) -> Result<Self, HttpError> {
        Ok(Self {
            charsets: parse_weighted_list(value, lowercase_token)?,
        })
    }

    pub fn to_header_value(&self) -> String {
        format_weighted_list(&self.charsets)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AcceptLanguage {
    pub languages: Vec<Weighted>,
}

impl AcceptLanguage {
    pub fn parse(value: &str) -> Result<Self, HttpError> {
        Ok(Self {
            languages: parse_weighted_list(value, parse_language_tag)?,
        })
    }

    pub fn to_header_value(&self) -> String {
        format_weighted_list(&self.languages)
    }
}
