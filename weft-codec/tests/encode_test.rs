use assert_matches::assert_matches;
use weft_codec::*;

#[test]
fn percent_roundtrip_bytes() {
    let input = b"hello world?=\n";
    let encoded = percent_encode_bytes(input);
    let decoded = percent_decode_bytes(encoded.as_bytes()).unwrap();
    assert_eq!(decoded, input);
}

#[test]
fn percent_decode_accepts_mixed_case_hex() {
    assert_eq!(percent_decode_str("%2f%2F").unwrap(), "//");
}

#[test]
fn percent_decode_passes_plain_bytes() {
    assert_eq!(percent_decode_str("a b").unwrap(), "a b");
}

#[test]
fn percent_decode_rejects_truncated_escape() {
    assert_matches!(percent_decode_bytes(b"abc%2"), Err(CodecError::Percent(_)));
    assert_matches!(percent_decode_bytes(b"abc%"), Err(CodecError::Percent(_)));
}

#[test]
fn percent_decode_rejects_bad_hex() {
    assert_matches!(percent_decode_bytes(b"%zz"), Err(CodecError::Percent(_)));
}

#[test]
fn percent_decode_str_rejects_invalid_utf8() {
    assert_matches!(percent_decode_str("%ff"), Err(CodecError::Utf8(_)));
}

#[test]
fn base64_roundtrip() {
    let input = b"user:pass";
    let encoded = base64_encode_bytes(input);
    let decoded = base64_decode_bytes(encoded.as_bytes()).unwrap();
    assert_eq!(decoded, input);
}

#[test]
fn base64_invalid_errors() {
    assert_matches!(base64_decode_str("@@@"), Err(CodecError::Base64(_)));
}
