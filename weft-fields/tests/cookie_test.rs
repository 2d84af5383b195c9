use assert_matches::assert_matches;
use weft_fields::{Cookie, HttpDate, SameSite, SetCookie};
use weft_http::HttpError;

#[test]
fn cookie_pairs_preserve_order() {
    let parsed = Cookie::parse("SID=31d4d96e407aad42; lang=en-US").unwrap();
    assert_eq!(
        parsed.pairs,
        [
            ("SID".to_string(), "31d4d96e407aad42".to_string()),
            ("lang".to_string(), "en-US".to_string()),
        ]
    );
    assert_eq!(parsed.get("lang"), Some("en-US"));
    assert_eq!(parsed.get("LANG"), None);
    assert_eq!(parsed.to_header_value(), "SID=31d4d96e407aad42; lang=en-US");
}

#[test]
fn cookie_allows_empty_value() {
    let parsed = Cookie::parse("flag=").unwrap();
    assert_eq!(parsed.get("flag"), Some(""));
}

#[test]
fn cookie_rejects_malformed_pairs() {
    assert_matches!(Cookie::parse("no-equals"), Err(HttpError::InvalidData(_)));
    assert_matches!(Cookie::parse("=value"), Err(HttpError::InvalidData(_)));
    assert_matches!(Cookie::parse(""), Err(HttpError::InvalidData(_)));
}

#[test]
fn set_cookie_with_all_attributes() {
    let parsed = SetCookie::parse(
        "id=a3fWa; Domain=example.com; Path=/; Expires=Wed, 21 Oct 2015 07:28:00 GMT; Max-Age=2592000; Secure; HttpOnly; SameSite=Lax",
    )
    .unwrap();
    assert_eq!(parsed.name, "id");
    assert_eq!(parsed.value, "a3fWa");
    assert_eq!(parsed.domain.as_deref(), Some("example.com"));
    assert_eq!(parsed.path.as_deref(), Some("/"));
    assert_eq!(
        parsed.expires,
        Some(HttpDate::parse("Wed, 21 Oct 2015 07:28:00 GMT").unwrap())
    );
    assert_eq!(parsed.max_age, Some(2_592_000));
    assert!(parsed.secure);
    assert!(parsed.http_only);
    assert_eq!(parsed.same_site, Some(SameSite::Lax));
}

#[test]
fn set_cookie_roundtrip() {
    let parsed = SetCookie::parse(
        "id=a3fWa; Domain=example.com; Path=/docs; Max-Age=3600; Secure; HttpOnly; SameSite=Strict",
    )
    .unwrap();
    let reparsed = SetCookie::parse(&parsed.to_header_value()).unwrap();
    assert_eq!(parsed, reparsed);
}

#[test]
fn set_cookie_domain_is_normalized() {
    let parsed = SetCookie::parse("a=b; Domain=.Example.COM").unwrap();
    assert_eq!(parsed.domain.as_deref(), Some("example.com"));
}

#[test]
fn set_cookie_negative_max_age() {
    let parsed = SetCookie::parse("a=b; Max-Age=-1").unwrap();
    assert_eq!(parsed.max_age, Some(-1));
}

#[test]
fn set_cookie_attribute_names_are_case_insensitive() {
    let parsed = SetCookie::parse("a=b; secure; HTTPONLY; samesite=none").unwrap();
    assert!(parsed.secure);
    assert!(parsed.http_only);
    assert_eq!(parsed.same_site, Some(SameSite::None));
}

#[test]
fn set_cookie_rejects_bad_attributes() {
    assert_matches!(
        SetCookie::parse("a=b; Max-Age=later"),
        Err(HttpError::InvalidData(_))
    );
    assert_matches!(
        SetCookie::parse("a=b; Expires=0"),
        Err(HttpError::InvalidData(_))
    );
    assert_matches!(
        SetCookie::parse("a=b; SameSite=sorta"),
        Err(HttpError::InvalidData(_))
    );
}
