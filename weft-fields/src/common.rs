use weft_codec::{is_token, trim_ows};
use weft_http::HttpError;

pub(crate) fn invalid(detail: impl Into<String>) -> HttpError {
    HttpError::InvalidData(detail.into())
}

pub(crate) fn split_outside_quotes(value: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut escaped = false;
    for (index, ch) in value.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            _ if ch == separator && !in_quotes => {
                parts.push(&value[start..index]);
                start = index + ch.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&value[start..]);
    parts
}

pub(crate) fn split_list(value: &str) -> Vec<&str> {
    split_outside_quotes(value, ',')
        .into_iter()
        .map(trim_ows)
        .filter(|item| !item.is_empty())
        .collect()
}

pub(crate) fn expect_token(value: &str) -> Result<&str, HttpError> {
    if is_token(value.as_bytes()) {
        Ok(value)
    } else {
        Err(invalid(format!("expected token, found {value:?}")))
    }
}

pub(crate) fn is_quoted(value: &str) -> bool {
    value.len() >= 2 && value.starts_with('"') && value.ends_with('"')
}

pub(crate) fn unquote(value: &str) -> Result<String, HttpError> {
    if !is_quoted(value) {
        return Err(invalid(format!("expected quoted string, found {value:?}")));
    }
    let inner = &value[1..value.len() - 1];
    let mut output = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                let escaped = chars
                    .next()
                    .ok_or_else(|| invalid(format!("dangling escape in {value:?}")))?;
                output.push(escaped);
            }
            '"' => return Err(invalid(format!("unescaped quote in {value:?}"))),
            _ => output.push(ch),
        }
    }
    Ok(output)
}

pub(crate) fn quote(value: &str) -> String {
    let mut output = String::with_capacity(value.len() + 2);
    output.push('"');
    for ch in value.chars() {
        if ch == '"' || ch == '\\' {
            output.push('\\');
        }
        output.push(ch);
    }
    output.push('"');
    output
}

pub(crate) fn token_or_unquote(value: &str) -> Result<String, HttpError> {
    if is_quoted(value) {
        unquote(value)
    } else {
        Ok(expect_token(value)?.to_string())
    }
}

pub(crate) fn token_or_quote(value: &str) -> String {
    if is_token(value.as_bytes()) {
        value.to_string()
    } else {
        quote(value)
    }
}

pub(crate) fn parse_parameters(parts: &[&str]) -> Result<Vec<(String, String)>, HttpError> {
    let mut parameters = Vec::new();
    for part in parts {
        let (name, value) = part
            .split_once('=')
            .ok_or_else(|| invalid(format!("parameter missing '=': {part:?}")))?;
        let name = expect_token(trim_ows(name))?.to_ascii_lowercase();
        let value = token_or_unquote(trim_ows(value))?;
        parameters.push((name, value));
    }
    Ok(parameters)
}

pub(crate) fn format_parameters(output: &mut String, parameters: &[(String, String)]) {
    for (name, value) in parameters {
        output.push(';');
        output.push_str(name);
        output.push('=');
        output.push_str(&token_or_quote(value));
    }
}

pub(crate) fn parse_qvalue(value: &str) -> Result<f32, HttpError> {
    let bytes = value.as_bytes();
    let valid_shape = match bytes {
        [b'0'] | [b'1'] => true,
        [b'0', b'.', rest @ ..] => {
            (1..=3).contains(&rest.len()) && rest.iter().all(u8::is_ascii_digit)
        }
        [b'1', b'.', rest @ ..] => {
            (1..=3).contains(&rest.len()) && rest.iter().all(|byte| *byte == b'0')
        }
        _ => false,
    };
    if !valid_shape {
        return Err(invalid(format!("invalid quality value: {value:?}")));
    }
    value
        .parse::<f32>()
        .map_err(|_| invalid(format!("invalid quality value: {value:?}")))
}

pub(crate) fn format_qvalue(q: f32) -> String {
    let scaled = (q * 1000.0).round() as u32;
    if scaled % 1000 == 0 {
        format!("{}", scaled / 1000)
    } else if scaled % 100 == 0 {
        format!("0.{}", scaled / 100)
    } else if scaled % 10 == 0 {
        format!("0.{:02}", scaled / 10)
    } else {
        format!("0.{scaled:03}")
    }
}

pub(crate) fn lowercase_token(value: &str) -> Result<String, HttpError> {
    Ok(expect_token(value)?.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_splitting_respects_quotes() {
        assert_eq!(split_list("a, b ,c"), ["a", "b", "c"]);
        assert_eq!(split_list("\"a,b\", c"), ["\"a,b\"", "c"]);
        assert_eq!(split_list(" , ,a"), ["a"]);
        assert_eq!(split_list("\"a\\\",b\", c"), ["\"a\\\",b\"", "c"]);
    }

    #[test]
    fn quoted_string_roundtrip() {
        assert_eq!(unquote("\"plain\"").unwrap(), "plain");
        assert_eq!(unquote("\"a\\\"b\\\\c\"").unwrap(), "a\"b\\c");
        assert_eq!(quote("a\"b\\c"), "\"a\\\"b\\\\c\"");
        assert!(unquote("bare").is_err());
        assert!(unquote("\"dangling\\\"").is_err());
    }

    #[test]
    fn qvalue_parsing() {
        assert_eq!(parse_qvalue("1").unwrap(), 1.0);
        assert_eq!(parse_qvalue("0.5").unwrap(), 0.5);
        assert_eq!(parse_qvalue("0.125").unwrap(), 0.125);
        assert_eq!(parse_qvalue("1.000").unwrap(), 1.0);
        assert!(parse_qvalue("1.5").is_err());
        assert!(parse_qvalue("0.1234").is_err());
        assert!(parse_qvalue("-1").is_err());
        assert!(parse_qvalue("").is_err());
    }

    #[test]
    fn qvalue_formatting() {
        assert_eq!(format_qvalue(1.0), "1");
        assert_eq!(format_qvalue(0.5), "0.5");
        assert_eq!(format_qvalue(0.05), "0.05");
        assert_eq!(format_qvalue(0.125), "0.125");
    }
}
