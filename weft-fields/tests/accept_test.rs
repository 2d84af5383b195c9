use assert_matches::assert_matches;
use weft_fields::{Accept, AcceptCharset, AcceptEncoding, AcceptLanguage};
use weft_http::HttpError;

#[test]
fn accept_preserves_order_and_weights() {
    let parsed = Accept::parse("text/html, application/json;q=0.9, */*;q=0.1").unwrap();
    assert_eq!(parsed.ranges.len(), 3);
    assert_eq!(parsed.ranges[0].media_type, "text");
    assert_eq!(parsed.ranges[0].q, 1.0);
    assert_eq!(parsed.ranges[1].subtype, "json");
    assert_eq!(parsed.ranges[1].q, 0.9);
    assert_eq!(parsed.ranges[2].media_type, "*");
    assert_eq!(parsed.ranges[2].subtype, "*");
    assert_eq!(parsed.ranges[2].q, 0.1);
    assert_eq!(
        parsed.to_header_value(),
        "text/html, application/json;q=0.9, */*;q=0.1"
    );
}

#[test]
fn accept_keeps_media_parameters() {
    let parsed = Accept::parse("text/html;level=1;q=0.5").unwrap();
    assert_eq!(parsed.ranges[0].parameters, [("level".to_string(), "1".to_string())]);
    assert_eq!(parsed.ranges[0].q, 0.5);
    assert_eq!(parsed.to_header_value(), "text/html;level=1;q=0.5");
}

#[test]
fn accept_rejects_star_type_with_concrete_subtype() {
    assert_matches!(Accept::parse("*/html"), Err(HttpError::InvalidData(_)));
}

#[test]
fn accept_rejects_bad_qvalue() {
    assert_matches!(
        Accept::parse("text/html;q=2"),
        Err(HttpError::InvalidData(_))
    );
    assert_matches!(
        Accept::parse("text/html;q=0.1234"),
        Err(HttpError::InvalidData(_))
    );
}

#[test]
fn accept_encoding_with_wildcard() {
    let parsed = AcceptEncoding::parse("gzip;q=0.8, identity, *;q=0").unwrap();
    assert_eq!(parsed.codings[0].value, "gzip");
    assert_eq!(parsed.codings[0].q, 0.8);
    assert_eq!(parsed.codings[1].value, "identity");
    assert_eq!(parsed.codings[1].q, 1.0);
    assert_eq!(parsed.codings[2].value, "*");
    assert_eq!(parsed.codings[2].q, 0.0);
    assert_eq!(parsed.to_header_value(), "gzip;q=0.8, identity, *;q=0");
}

#[test]
fn accept_charset_lowercases_names() {
    let parsed = AcceptCharset::parse("UTF-8, ISO-8859-1;q=0.5").unwrap();
    assert_eq!(parsed.charsets[0].value, "utf-8");
    assert_eq!(parsed.charsets[1].value, "iso-8859-1");
}

#[test]
fn accept_language_validates_tags() {
    let parsed = AcceptLanguage::parse("en-US, en;q=0.8, *;q=0.1").unwrap();
    assert_eq!(parsed.languages[0].value, "en-US");
    assert_eq!(parsed.languages[1].q, 0.8);
    assert_eq!(parsed.languages[2].value, "*");
    assert_matches!(
        AcceptLanguage::parse("bad_tag"),
        Err(HttpError::InvalidData(_))
    );
}

#[test]
fn weighted_roundtrip_is_stable() {
    for value in ["gzip, br;q=0.7", "en-US;q=0.9, de", "utf-8"] {
        let parsed = AcceptEncoding::parse(value);
        if let Ok(parsed) = parsed {
            let reparsed = AcceptEncoding::parse(&parsed.to_header_value()).unwrap();
            assert_eq!(parsed, reparsed);
        }
    }
}
