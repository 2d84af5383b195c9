use weft_http::{
    encode_chunks, encode_request, encode_response, HttpVersion, Request, RequestDecoder,
    Response, ResponseDecoder,
};

fn sample_request() -> Request {
    Request::new("POST", "/submit?q=1")
        .header("Host", "example.com")
        .unwrap()
        .header("Accept", "text/html, application/json")
        .unwrap()
        .header("Content-Length", "11")
        .unwrap()
        .body(*b"hello world")
}

fn sample_response() -> Response {
    Response::new(200)
        .reason("OK")
        .header("Content-Type", "text/plain")
        .unwrap()
        .header("Content-Length", "2")
        .unwrap()
        .body(*b"ok")
}

#[test]
fn request_roundtrips_through_wire_bytes() {
    let request = sample_request();
    let wire = encode_request(&request).unwrap();
    let mut decoder = RequestDecoder::new();
    decoder.feed(&wire).unwrap();
    let decoded = decoder.decode().unwrap().unwrap();
    assert_eq!(decoded, request);
    assert!(decoder.remaining().is_empty());
}

#[test]
fn response_roundtrips_through_wire_bytes() {
    let response = sample_response();
    let wire = encode_response(&response).unwrap();
    let mut decoder = ResponseDecoder::new();
    decoder.feed(&wire).unwrap();
    let decoded = decoder.decode().unwrap().unwrap();
    assert_eq!(decoded, response);
}

#[test]
fn roundtrip_is_stable_across_chunk_boundaries() {
    let request = sample_request();
    let wire = encode_request(&request).unwrap();
    for split in [1, 3, 7, wire.len() / 2, wire.len() - 1] {
        let mut decoder = RequestDecoder::new();
        decoder.feed(&wire[..split]).unwrap();
        let _ = decoder.decode().unwrap();
        decoder.feed(&wire[split..]).unwrap();
        let decoded = decoder.decode().unwrap().unwrap();
        assert_eq!(decoded, request);
    }
}

#[test]
fn roundtrip_normalizes_value_whitespace_only() {
    let request = Request::new("GET", "/")
        .header("X-Padded", "  spaced value  ")
        .unwrap();
    let wire = encode_request(&request).unwrap();
    let mut decoder = RequestDecoder::new();
    decoder.feed(&wire).unwrap();
    let decoded = decoder.decode().unwrap().unwrap();
    assert_eq!(decoded.get_header("X-Padded"), Some("spaced value"));
    assert_eq!(decoded, request);
}

#[test]
fn http10_roundtrip_keeps_version() {
    let request = Request::with_version("GET", "/", HttpVersion::Http10);
    let wire = encode_request(&request).unwrap();
    let mut decoder = RequestDecoder::new();
    decoder.feed(&wire).unwrap();
    let decoded = decoder.decode().unwrap().unwrap();
    assert_eq!(decoded.version(), HttpVersion::Http10);
}

#[test]
fn chunked_splits_reassemble_exactly() {
    let body: Vec<u8> = (0u8..=255).cycle().take(1000).collect();
    for chunk_size in [1usize, 7, 64, 999, 1000] {
        let chunks: Vec<&[u8]> = body.chunks(chunk_size).collect();
        let mut wire = b"POST / HTTP/1.1\r\nTransfer-Encoding: chunked\r\n\r\n".to_vec();
        wire.extend_from_slice(&encode_chunks(&chunks));
        wire.extend_from_slice(b"GET /tail HTTP/1.1\r\n\r\n");

        let mut decoder = RequestDecoder::new();
        decoder.feed(&wire).unwrap();
        let request = decoder.decode().unwrap().unwrap();
        assert_eq!(request.body_bytes(), body.as_slice());
        decoder.reset();
        let tail = decoder.decode().unwrap().unwrap();
        assert_eq!(tail.target(), "/tail");
    }
}

#[test]
fn encoded_responses_pipeline_cleanly() {
    let first = encode_response(&sample_response()).unwrap();
    let second = encode_response(
        &Response::new(204).header("X-Marker", "2").unwrap(),
    )
    .unwrap();
    let mut decoder = ResponseDecoder::new();
    decoder.feed(&first).unwrap();
    decoder.feed(&second).unwrap();
    let one = decoder.decode().unwrap().unwrap();
    assert_eq!(one.status_code(), 200);
    decoder.reset();
    let two = decoder.decode().unwrap().unwrap();
    assert_eq!(two.status_code(), 204);
    assert!(decoder.remaining().is_empty());
}
