use assert_matches::assert_matches;
use weft_http::{
    canonical_reason, encode_chunk, encode_chunks, encode_request, encode_response, HttpError,
    HttpVersion, Request, Response,
};

#[test]
fn encodes_request_line_headers_and_body() {
    let request = Request::new("POST", "/api")
        .header("Host", "example.com")
        .unwrap()
        .header("Content-Length", "5")
        .unwrap()
        .body(*b"hello");
    let bytes = encode_request(&request).unwrap();
    assert_eq!(
        bytes,
        b"POST /api HTTP/1.1\r\nHost: example.com\r\nContent-Length: 5\r\n\r\nhello"
    );
}

#[test]
fn encodes_bare_request_without_headers() {
    let request = Request::new("GET", "/");
    assert_eq!(encode_request(&request).unwrap(), b"GET / HTTP/1.1\r\n\r\n");
}

#[test]
fn encodes_http10_version() {
    let request = Request::with_version("GET", "/", HttpVersion::Http10);
    let bytes = encode_request(&request).unwrap();
    assert!(bytes.starts_with(b"GET / HTTP/1.0\r\n"));
}

#[test]
fn encodes_response_status_line_and_body() {
    let response = Response::new(200)
        .reason("OK")
        .header("Content-Length", "2")
        .unwrap()
        .body(*b"ok");
    let bytes = encode_response(&response).unwrap();
    assert_eq!(bytes, b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\n\r\nok");
}

#[test]
fn fills_in_canonical_reason() {
    let response = Response::new(404);
    let bytes = encode_response(&response).unwrap();
    assert!(bytes.starts_with(b"HTTP/1.1 404 Not Found\r\n"));
}

#[test]
fn keeps_custom_reason() {
    let response = Response::new(404).reason("Lost");
    let bytes = encode_response(&response).unwrap();
    assert!(bytes.starts_with(b"HTTP/1.1 404 Lost\r\n"));
}

#[test]
fn unknown_code_gets_empty_reason() {
    let response = Response::new(599);
    let bytes = encode_response(&response).unwrap();
    assert!(bytes.starts_with(b"HTTP/1.1 599 \r\n"));
}

#[test]
fn canonical_reason_table() {
    assert_eq!(canonical_reason(200), Some("OK"));
    assert_eq!(canonical_reason(101), Some("Switching Protocols"));
    assert_eq!(canonical_reason(503), Some("Service Unavailable"));
    assert_eq!(canonical_reason(599), None);
}

#[test]
fn rejects_out_of_range_status() {
    assert_eq!(
        encode_response(&Response::new(600)),
        Err(HttpError::InvalidStatusCode)
    );
    assert_eq!(
        encode_response(&Response::new(99)),
        Err(HttpError::InvalidStatusCode)
    );
}

#[test]
fn rejects_invalid_method() {
    let request = Request::new("GE T", "/");
    assert_matches!(encode_request(&request), Err(HttpError::InvalidData(_)));
}

#[test]
fn rejects_empty_target() {
    let request = Request::new("GET", "");
    assert_matches!(encode_request(&request), Err(HttpError::InvalidData(_)));
}

#[test]
fn rejects_control_bytes_in_reason() {
    let response = Response::new(200).reason("bad\x01reason");
    assert_matches!(encode_response(&response), Err(HttpError::InvalidData(_)));
}

#[test]
fn header_with_crlf_cannot_be_constructed() {
    assert_eq!(
        Request::new("GET", "/").header("X-Test", "a\r\nInjected: yes"),
        Err(HttpError::InvalidHeaderValue)
    );
    assert_eq!(
        Request::new("GET", "/").header("Bad Name", "v"),
        Err(HttpError::InvalidHeaderValue)
    );
}

#[test]
fn chunk_framing() {
    assert_eq!(encode_chunk(b"Hello, "), b"7\r\nHello, \r\n");
    assert_eq!(
        encode_chunks([&b"Hello, "[..], &b"world!"[..]]),
        b"7\r\nHello, \r\n6\r\nworld!\r\n0\r\n\r\n"
    );
    assert_eq!(encode_chunks::<[&[u8]; 0]>([]), b"0\r\n\r\n");
}

#[test]
fn chunk_sizes_are_lowercase_hex() {
    let data = vec![b'x'; 255];
    let encoded = encode_chunk(&data);
    assert!(encoded.starts_with(b"ff\r\n"));
}

#[test]
fn empty_chunks_are_skipped() {
    assert_eq!(
        encode_chunks([&b"hi"[..], &b""[..], &b"yo"[..]]),
        b"2\r\nhi\r\n2\r\nyo\r\n0\r\n\r\n"
    );
}
