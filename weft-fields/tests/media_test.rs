use assert_matches::assert_matches;
use weft_fields::{ContentDisposition, ContentEncoding, ContentLanguage, ContentType};
use weft_http::HttpError;

#[test]
fn content_type_with_parameters() {
    let parsed = ContentType::parse("Text/HTML; Charset=\"utf-8\"").unwrap();
    assert_eq!(parsed.media_type, "text");
    assert_eq!(parsed.subtype, "html");
    assert_eq!(parsed.charset(), Some("utf-8"));
    assert_eq!(parsed.to_header_value(), "text/html;charset=utf-8");
}

#[test]
fn content_type_json_detection() {
    assert!(ContentType::parse("application/json").unwrap().is_json());
    assert!(ContentType::parse("application/problem+json").unwrap().is_json());
    assert!(!ContentType::parse("text/json-like").unwrap().is_json());
    assert!(!ContentType::parse("text/plain").unwrap().is_json());
}

#[test]
fn content_type_rejects_missing_subtype() {
    assert_matches!(ContentType::parse("text"), Err(HttpError::InvalidData(_)));
    assert_matches!(ContentType::parse("text/"), Err(HttpError::InvalidData(_)));
}

#[test]
fn content_type_roundtrip() {
    for value in ["text/plain", "multipart/form-data;boundary=xYz", "application/json"] {
        let parsed = ContentType::parse(value).unwrap();
        assert_eq!(ContentType::parse(&parsed.to_header_value()).unwrap(), parsed);
    }
}

#[test]
fn content_encoding_preserves_order() {
    let parsed = ContentEncoding::parse("gzip, br").unwrap();
    assert_eq!(parsed.codings, ["gzip", "br"]);
    assert_eq!(parsed.to_header_value(), "gzip, br");
}

#[test]
fn content_language_validates_tags() {
    let parsed = ContentLanguage::parse("en-US, de").unwrap();
    assert_eq!(parsed.tags, ["en-US", "de"]);
    assert_matches!(
        ContentLanguage::parse("not_a_tag"),
        Err(HttpError::InvalidData(_))
    );
    assert_matches!(
        ContentLanguage::parse("toolongsegment1x"),
        Err(HttpError::InvalidData(_))
    );
}

#[test]
fn disposition_with_quoted_filename() {
    let parsed = ContentDisposition::parse("attachment; filename=\"report 2024.pdf\"").unwrap();
    assert_eq!(parsed.disposition, "attachment");
    assert_eq!(parsed.filename(), Some("report 2024.pdf"));
    assert_eq!(
        parsed.to_header_value(),
        "attachment; filename=\"report 2024.pdf\""
    );
}

#[test]
fn disposition_decodes_extended_filename() {
    let parsed =
        ContentDisposition::parse("attachment; filename*=UTF-8''%E2%82%AC%20rates.txt").unwrap();
    assert_eq!(parsed.filename(), Some("€ rates.txt"));
}

#[test]
fn extended_filename_wins_over_plain() {
    let parsed = ContentDisposition::parse(
        "attachment; filename=fallback.txt; filename*=UTF-8''real%20name.txt",
    )
    .unwrap();
    assert_eq!(parsed.filename(), Some("real name.txt"));
}

#[test]
fn disposition_extended_roundtrip() {
    let parsed =
        ContentDisposition::parse("attachment; filename*=UTF-8''na%C3%AFve.txt").unwrap();
    let reparsed = ContentDisposition::parse(&parsed.to_header_value()).unwrap();
    assert_eq!(parsed, reparsed);
}

#[test]
fn disposition_rejects_bad_ext_value() {
    assert_matches!(
        ContentDisposition::parse("attachment; filename*=latin-1''x"),
        Err(HttpError::InvalidData(_))
    );
    assert_matches!(
        ContentDisposition::parse("attachment; filename*=UTF-8''%zz"),
        Err(HttpError::InvalidData(_))
    );
}
