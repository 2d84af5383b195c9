use weft_codec::{is_token, is_vchar};

use crate::error::HttpError;
use crate::types::{validate_header, Headers, Request, Response};

const CRLF: &[u8] = b"\r\n";

pub fn encode_request(request: &Request) -> Result<Vec<u8>, HttpError> {
    if !is_token(request.method().as_bytes()) {
        return Err(HttpError::InvalidData(format!(
            "invalid method: {:?}",
            request.method()
        )));
    }
    if request.target().is_empty() || !request.target().bytes().all(is_vchar) {
        return Err(HttpError::InvalidData(format!(
            "invalid request target: {:?}",
            request.target()
        )));
    }

    let mut output = Vec::new();
    output.extend_from_slice(request.method().as_bytes());
    output.push(b' ');
    output.extend_from_slice(request.target().as_bytes());
    output.push(b' ');
    output.extend_from_slice(request.version().as_str().as_bytes());
    output.extend_from_slice(CRLF);
    encode_headers(&mut output, request.headers())?;
    output.extend_from_slice(CRLF);
    output.extend_from_slice(request.body_bytes());
    Ok(output)
}

pub fn encode_response(response: &Response) -> Result<Vec<u8>, HttpError> {
    if !(100..=599).contains(&response.status_code()) {
        return Err(HttpError::InvalidStatusCode);
    }
    let reason = if response.reason_phrase().is_empty() {
        canonical_reason(response.status_code()).unwrap_or("")
    } else {
        response.reason_phrase()
    };
    if !reason
        .bytes()
        .all(|byte| is_vchar(byte) || byte == b' ' || byte == b'\t')
    {
        return Err(HttpError::InvalidData(format!(
            "invalid reason phrase: {reason:?}"
        )));
    }

    let mut output = Vec::new();
    output.extend_from_slice(response.version().as_str().as_bytes());
    output.push(b' ');
    output.extend_from_slice(format!("{:03}", response.status_code()).as_bytes());
    output.push(b' ');
    output.extend_from_slice(reason.as_bytes());
    output.extend_from_slice(CRLF);
    encode_headers(&mut output, response.headers())?;
    output.extend_from_slice(CRLF);
    output.extend_from_slice(response.body_bytes());
    Ok(output)
}

fn encode_headers(output: &mut Vec<u8>, headers: &Headers) -> Result<(), HttpError> {
    for header in headers {
        validate_header(&header.name, &header.value)?;
        output.extend_from_slice(header.name.as_bytes());
        output.extend_from_slice(b": ");
        output.extend_from_slice(header.value.as_bytes());
        output.extend_from_slice(CRLF);
    }
    Ok(())
}

pub fn encode_chunk(data: &[u8]) -> Vec<u8> {
    let mut output = format!("{:x}\r\n", data.len()).into_bytes();
    output.extend_from_slice(data);
    output.extend_from_slice(CRLF);
    output
}

pub fn encode_chunks<I>(chunks: I) -> Vec<u8>
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let mut output = Vec::new();
    for chunk in chunks {
        let chunk = chunk.as_ref();
        if !chunk.is_empty() {
            output.extend_from_slice(&encode_chunk(chunk));
        }
    }
    output.extend_from_slice(b"0\r\n\r\n");
    output
}

pub fn canonical_reason(status_code: u16) -> Option<&'static str> {
    let reason = match status_code {
        100 => "Continue",
        101 => "Switching Protocols",
        102 => "Processing",
        103 => "Early Hints",
        200 => "OK",
        201 => "Created",
        202 => "Accepted",
        203 => "Non-Authoritative Information",
        204 => "No Content",
        205 => "Reset Content",
        206 => "Partial Content",
        300 => "Multiple Choices",
        301 => "Moved Permanently",
        302 => "Found",
        303 => "See Other",
        304 => "Not Modified",
        305 => "Use Proxy",
        307 => "Temporary Redirect",
        308 => "Permanent Redirect",
        400 => "Bad Request",
        401 => "Unauthorized",
        402 => "Payment Required",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        406 => "Not Acceptable",
        407 => "Proxy Authentication Required",
        408 => "Request Timeout",
        409 => "Conflict",
        410 => "Gone",
        411 => "Length Required",
        412 => "Precondition Failed",
        413 => "Payload Too Large",
        414 => "URI Too Long",
        415 => "Unsupported Media Type",
        416 => "Range Not Satisfiable",
        417 => "Expectation Failed",
        421 => "Misdirected Request",
        422 => "Unprocessable Entity",
        426 => "Upgrade Required",
        428 => "Precondition Required",
        429 => "Too Many Requests",
        431 => "Request Header Fields Too Large",
        451 => "Unavailable For Legal Reasons",
        500 => "Internal Server Error",
        501 => "Not Implemented",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        505 => "HTTP Version Not Supported",
        506 => "Variant Also Negotiates",
        507 => "Insufficient Storage",
        508 => "Loop Detected",
        511 => "Network Authentication Required",
        _ => return None,
    };
    Some(reason)
}
