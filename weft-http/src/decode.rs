use weft_codec::{is_field_byte, is_token, is_vchar, parse_dec_u64, parse_hex_u64, trim_ows};

use crate::error::HttpError;
use crate::limits::DecoderLimits;
use crate::types::{
    last_transfer_coding_is_chunked, Header, Headers, HttpVersion, Request, Response,
};

const CRLF: &[u8] = b"\r\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterimMode {
    #[default]
    Deliver,
    Skip,
}

pub(crate) trait StartLine: Sized {
    const SKIP_LEADING_EMPTY_LINES: bool;
    const UNTIL_CLOSE_FALLBACK: bool;

    fn parse(line: &[u8]) -> Result<Self, HttpError>;
    fn suppresses_body(&self) -> bool;
    fn interim_status(&self) -> Option<u16>;
}

#[derive(Debug)]
pub(crate) struct RequestHead {
    method: String,
    target: String,
    version: HttpVersion,
}

#[derive(Debug)]
pub(crate) struct ResponseHead {
    version: HttpVersion,
    status_code: u16,
    reason_phrase: String,
}

fn parse_version(raw: &str) -> Result<HttpVersion, HttpError> {
    match raw {
        "HTTP/1.0" => Ok(HttpVersion::Http10),
        "HTTP/1.1" => Ok(HttpVersion::Http11),
        other => Err(HttpError::InvalidData(format!(
            "unsupported http version: {other:?}"
        ))),
    }
}

impl StartLine for RequestHead {
    const SKIP_LEADING_EMPTY_LINES: bool = true;
    const UNTIL_CLOSE_FALLBACK: bool = false;

    fn parse(line: &[u8]) -> Result<Self, HttpError> {
        let text = std::str::from_utf8(line)
            .map_err(|_| HttpError::InvalidData("request line is not valid utf-8".to_string()))?;
        let mut parts = text.splitn(3, ' ');
        let method = parts.next().unwrap_or("");
        let target = parts
            .next()
            .ok_or_else(|| HttpError::InvalidData(format!("malformed request line: {text:?}")))?;
        let version = parts
            .next()
            .ok_or_else(|| HttpError::InvalidData(format!("malformed request line: {text:?}")))?;

        if !is_token(method.as_bytes()) {
            return Err(HttpError::InvalidData(format!("invalid method: {method:?}")));
        }
        if target.is_empty() || !target.bytes().all(is_vchar) {
            return Err(HttpError::InvalidData(format!(
                "invalid request target: {target:?}"
            )));
        }

        Ok(Self {
            method: method.to_string(),
            target: target.to_string(),
            version: parse_version(version)?,
        })
    }

    fn suppresses_body(&self) -> bool {
        false
    }

    fn interim_status(&self) -> Option<u16> {
        None
    }
}

impl StartLine for ResponseHead {
    const SKIP_LEADING_EMPTY_LINES: bool = false;
    const UNTIL_CLOSE_FALLBACK: bool = true;

    fn parse(line: &[u8]) -> Result<Self, HttpError> {
        let text = std::str::from_utf8(line)
            .map_err(|_| HttpError::InvalidData("status line is not valid utf-8".to_string()))?;
        let mut parts = text.splitn(3, ' ');
        let version = parts.next().unwrap_or("");
        let status = parts
            .next()
            .ok_or_else(|| HttpError::InvalidData(format!("malformed status line: {text:?}")))?;
        let reason = parts.next().unwrap_or("");

        let version = parse_version(version)?;
        if status.len() != 3 || !status.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(HttpError::InvalidStatusCode);
        }
        let status_code: u16 = status.parse().map_err(|_| HttpError::InvalidStatusCode)?;
        if !(100..=599).contains(&status_code) {
            return Err(HttpError::InvalidStatusCode);
        }
        if !reason
            .bytes()
            .all(|byte| is_vchar(byte) || byte == b' ' || byte == b'\t')
        {
            return Err(HttpError::InvalidData(format!(
                "invalid reason phrase: {reason:?}"
            )));
        }

        Ok(Self {
            version,
            status_code,
            reason_phrase: reason.to_string(),
        })
    }

    fn suppresses_body(&self) -> bool {
        matches!(self.status_code, 100..=199 | 204 | 304)
    }

    fn interim_status(&self) -> Option<u16> {
        if (100..=199).contains(&self.status_code) {
            Some(self.status_code)
        } else {
            None
        }
    }
}

fn parse_header_line(line: &[u8]) -> Result<Header, HttpError> {
    let colon = line
        .iter()
        .position(|byte| *byte == b':')
        .ok_or_else(|| HttpError::InvalidData("header line missing ':'".to_string()))?;
    let name = &line[..colon];
    if !is_token(name) {
        return Err(HttpError::InvalidData(format!(
            "invalid header name: {:?}",
            String::from_utf8_lossy(name)
        )));
    }
    let value = &line[colon + 1..];
    if !value.iter().all(|byte| is_field_byte(*byte)) {
        return Err(HttpError::InvalidHeaderValue);
    }
    let name = String::from_utf8(name.to_vec()).map_err(|_| HttpError::InvalidHeaderValue)?;
    let value = String::from_utf8(value.to_vec()).map_err(|_| HttpError::InvalidHeaderValue)?;
    Ok(Header {
        name,
        value: trim_ows(&value).to_string(),
    })
}

fn parse_chunk_size(line: &[u8]) -> Result<usize, HttpError> {
    let text = std::str::from_utf8(line).map_err(|_| HttpError::InvalidChunkSize)?;
    let digits = text.split(';').next().unwrap_or("");
    let size = parse_hex_u64(digits).map_err(|_| HttpError::InvalidChunkSize)?;
    usize::try_from(size).map_err(|_| HttpError::InvalidChunkSize)
}

fn parse_content_length(headers: &Headers) -> Result<Option<usize>, HttpError> {
    let mut first: Option<String> = None;
    for value in headers.get_all("content-length") {
        for part in value.split(',') {
            let part = trim_ows(part);
            if part.is_empty() {
                return Err(HttpError::InvalidData("empty content-length".to_string()));
            }
            match &first {
                None => first = Some(part.to_string()),
                Some(seen) if seen == part => {}
                Some(seen) => {
                    return Err(HttpError::InvalidData(format!(
                        "conflicting content-length values: {seen:?} and {part:?}"
                    )));
                }
            }
        }
    }
    let Some(value) = first else {
        return Ok(None);
    };
    let length = parse_dec_u64(&value)
        .ok()
        .and_then(|length| usize::try_from(length).ok())
        .ok_or_else(|| HttpError::InvalidData(format!("invalid content-length: {value:?}")))?;
    Ok(Some(length))
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ChunkPhase {
    Size,
    Data { remaining: usize },
    DataEnd,
    Trailers { count: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Framing {
    Length { remaining: usize },
    Chunked { phase: ChunkPhase },
    UntilClose,
}

#[derive(Debug)]
enum State<H> {
    Idle,
    StartLine,
    Headers {
        head: H,
        headers: Headers,
    },
    Body {
        head: H,
        headers: Headers,
        framing: Framing,
        body: Vec<u8>,
    },
    Done,
    Failed(HttpError),
}

#[derive(Debug)]
struct Engine<H> {
    buffer: Vec<u8>,
    state: State<H>,
    limits: DecoderLimits,
    lenient: bool,
    interim: InterimMode,
    head_response: bool,
    eof: bool,
}

impl<H: StartLine> Engine<H> {
    fn new(limits: DecoderLimits) -> Self {
        Self {
            buffer: Vec::new(),
            state: State::Idle,
            limits,
            lenient: false,
            interim: InterimMode::Deliver,
            head_response: false,
            eof: false,
        }
    }

    fn feed(&mut self, bytes: &[u8]) -> Result<(), HttpError> {
        if let State::Failed(err) = &self.state {
            return Err(err.clone());
        }
        let size = self.buffer.len() + bytes.len();
        if size > self.limits.max_buffer_size {
            return Err(self.fail(HttpError::BufferOverflow {
                size,
                limit: self.limits.max_buffer_size,
            }));
        }
        self.buffer.extend_from_slice(bytes);
        Ok(())
    }

    fn feed_eof(&mut self) -> Result<(), HttpError> {
        if let State::Failed(err) = &self.state {
            return Err(err.clone());
        }
        match &self.state {
            State::Idle | State::Done => {
                self.eof = true;
                Ok(())
            }
            State::Body {
                framing: Framing::UntilClose,
                ..
            } => {
                self.eof = true;
                Ok(())
            }
            _ => Err(self.fail(HttpError::UnexpectedEof)),
        }
    }

    fn decode(&mut self) -> Result<Option<(H, Headers, Vec<u8>)>, HttpError> {
        if let State::Failed(err) = &self.state {
            return Err(err.clone());
        }
        match self.advance() {
            Ok(message) => Ok(message),
            Err(err) => Err(self.fail(err)),
        }
    }

    fn fail(&mut self, err: HttpError) -> HttpError {
        self.state = State::Failed(err.clone());
        err
    }

    fn reset(&mut self) {
        self.state = State::Idle;
    }

    fn remaining(&self) -> &[u8] {
        &self.buffer
    }

    fn advance(&mut self) -> Result<Option<(H, Headers, Vec<u8>)>, HttpError> {
        loop {
            match std::mem::replace(&mut self.state, State::Idle) {
                State::Idle | State::StartLine => {
                    let Some(line) = self.take_line()? else {
                        self.state = State::StartLine;
                        return Ok(None);
                    };
                    if line.is_empty() {
                        if H::SKIP_LEADING_EMPTY_LINES {
                            self.state = State::StartLine;
                            continue;
                        }
                        return Err(HttpError::InvalidData("empty start line".to_string()));
                    }
                    let head = H::parse(&line)?;
                    self.state = State::Headers {
                        head,
                        headers: Headers::new(),
                    };
                }
                State::Headers { head, mut headers } => {
                    let Some(line) = self.take_line()? else {
                        self.state = State::Headers { head, headers };
                        return Ok(None);
                    };
                    if line.is_empty() {
                        match self.decide_framing(&head, &headers)? {
                            Some(framing) => {
                                self.state = State::Body {
                                    head,
                                    headers,
                                    framing,
                                    body: Vec::new(),
                                };
                            }
                            None => {
                                if self.skip_interim(&head) {
                                    self.state = State::StartLine;
                                    continue;
                                }
                                self.state = State::Done;
                                return Ok(Some((head, headers, Vec::new())));
                            }
                        }
                    } else {
                        if line[0] == b' ' || line[0] == b'\t' {
                            return Err(HttpError::InvalidHeaderValue);
                        }
                        headers.append(parse_header_line(&line)?);
                        if headers.len() > self.limits.max_headers_count {
                            return Err(HttpError::TooManyHeaders {
                                count: headers.len(),
                                limit: self.limits.max_headers_count,
                            });
                        }
                        self.state = State::Headers { head, headers };
                    }
                }
                State::Body {
                    head,
                    headers,
                    mut framing,
                    mut body,
                } => {
                    if self.advance_body(&mut framing, &mut body)? {
                        self.state = State::Done;
                        return Ok(Some((head, headers, body)));
                    }
                    self.state = State::Body {
                        head,
                        headers,
                        framing,
                        body,
                    };
                    return Ok(None);
                }
                State::Done => {
                    self.state = State::Done;
                    return Ok(None);
                }
                State::Failed(err) => {
                    self.state = State::Failed(err.clone());
                    return Err(err);
                }
            }
        }
    }

    fn skip_interim(&self, head: &H) -> bool {
        self.interim == InterimMode::Skip
            && head.interim_status().is_some_and(|status| status != 101)
    }

    fn take_line(&mut self) -> Result<Option<Vec<u8>>, HttpError> {
        match find_line(&self.buffer, self.lenient) {
            Some((end, terminator)) => {
                if end > self.limits.max_header_line_size {
                    return Err(HttpError::HeaderLineTooLong {
                        size: end,
                        limit: self.limits.max_header_line_size,
                    });
                }
                let line = self.buffer[..end].to_vec();
                self.buffer.drain(..end + terminator);
                Ok(Some(line))
            }
            None => {
                if self.buffer.len() > self.limits.max_header_line_size {
                    return Err(HttpError::HeaderLineTooLong {
                        size: self.buffer.len(),
                        limit: self.limits.max_header_line_size,
                    });
                }
                Ok(None)
            }
        }
    }

    fn decide_framing(&self, head: &H, headers: &Headers) -> Result<Option<Framing>, HttpError> {
        let te_present = headers.contains("transfer-encoding");
        let chunked = last_transfer_coding_is_chunked(headers);
        let content_length = parse_content_length(headers)?;

        if te_present && content_length.is_some() {
            return Err(HttpError::InvalidData(
                "content-length conflicts with transfer-encoding".to_string(),
            ));
        }
        if head.suppresses_body() || self.head_response {
            return Ok(None);
        }
        if te_present {
            if chunked {
                return Ok(Some(Framing::Chunked {
                    phase: ChunkPhase::Size,
                }));
            }
            if H::UNTIL_CLOSE_FALLBACK {
                return Ok(Some(Framing::UntilClose));
            }
            return Err(HttpError::InvalidData(
                "unsupported transfer coding".to_string(),
            ));
        }
        if let Some(length) = content_length {
            if length > self.limits.max_body_size {
                return Err(HttpError::BodyTooLarge {
                    size: length,
                    limit: self.limits.max_body_size,
                });
            }
            if length == 0 {
                return Ok(None);
            }
            return Ok(Some(Framing::Length { remaining: length }));
        }
        if H::UNTIL_CLOSE_FALLBACK {
            Ok(Some(Framing::UntilClose))
        } else {
            Ok(None)
        }
    }

    fn advance_body(&mut self, framing: &mut Framing, body: &mut Vec<u8>) -> Result<bool, HttpError> {
        match framing {
            Framing::Length { remaining } => {
                let take = (*remaining).min(self.buffer.len());
                body.extend_from_slice(&self.buffer[..take]);
                self.buffer.drain(..take);
                *remaining -= take;
                Ok(*remaining == 0)
            }
            Framing::Chunked { phase } => self.advance_chunked(phase, body),
            Framing::UntilClose => {
                if !self.buffer.is_empty() {
                    let size = body.len() + self.buffer.len();
                    if size > self.limits.max_body_size {
                        return Err(HttpError::BodyTooLarge {
                            size,
                            limit: self.limits.max_body_size,
                        });
                    }
                    body.extend_from_slice(&self.buffer);
                    self.buffer.clear();
                }
                Ok(self.eof)
            }
        }
    }

    fn advance_chunked(
        &mut self,
        phase: &mut ChunkPhase,
        body: &mut Vec<u8>,
    ) -> Result<bool, HttpError> {
        loop {
            match phase {
                ChunkPhase::Size => {
                    let Some(line) = self.take_line()? else {
                        return Ok(false);
                    };
                    let size = parse_chunk_size(&line)?;
                    if size == 0 {
                        *phase = ChunkPhase::Trailers { count: 0 };
                        continue;
                    }
                    let total = body.len() + size;
                    if total > self.limits.max_body_size {
                        return Err(HttpError::BodyTooLarge {
                            size: total,
                            limit: self.limits.max_body_size,
                        });
                    }
                    *phase = ChunkPhase::Data { remaining: size };
                }
                ChunkPhase::Data { remaining } => {
                    if self.buffer.is_empty() {
                        return Ok(false);
                    }
                    let take = (*remaining).min(self.buffer.len());
                    body.extend_from_slice(&self.buffer[..take]);
                    self.buffer.drain(..take);
                    *remaining -= take;
                    if *remaining > 0 {
                        return Ok(false);
                    }
                    *phase = ChunkPhase::DataEnd;
                }
                ChunkPhase::DataEnd => {
                    if self.take_chunk_terminator()? {
                        *phase = ChunkPhase::Size;
                    } else {
                        return Ok(false);
                    }
                }
                ChunkPhase::Trailers { count } => {
                    let Some(line) = self.take_line()? else {
                        return Ok(false);
                    };
                    if line.is_empty() {
                        return Ok(true);
                    }
                    if line[0] == b' ' || line[0] == b'\t' {
                        return Err(HttpError::InvalidHeaderValue);
                    }
                    parse_header_line(&line)?;
                    *count += 1;
                    if *count > self.limits.max_headers_count {
                        return Err(HttpError::TooManyHeaders {
                            count: *count,
                            limit: self.limits.max_headers_count,
                        });
                    }
                }
            }
        }
    }

    fn take_chunk_terminator(&mut self) -> Result<bool, HttpError> {
        if self.buffer.is_empty() {
            return Ok(false);
        }
        if self.buffer[0] == b'\r' {
            if self.buffer.len() < 2 {
                return Ok(false);
            }
            if self.buffer[1] == b'\n' {
                self.buffer.drain(..2);
                return Ok(true);
            }
            return Err(HttpError::InvalidChunkSize);
        }
        if self.lenient && self.buffer[0] == b'\n' {
            self.buffer.drain(..1);
            return Ok(true);
        }
        Err(HttpError::InvalidChunkSize)
    }
}

fn find_line(buffer: &[u8], lenient: bool) -> Option<(usize, usize)> {
    if lenient {
        let lf = twoway::find_bytes(buffer, b"\n")?;
        if lf > 0 && buffer[lf - 1] == b'\r' {
            Some((lf - 1, 2))
        } else {
            Some((lf, 1))
        }
    } else {
        twoway::find_bytes(buffer, CRLF).map(|index| (index, 2))
    }
}

#[derive(Debug)]
pub struct RequestDecoder {
    engine: Engine<RequestHead>,
}

impl RequestDecoder {
    pub fn new() -> Self {
        Self::with_limits(DecoderLimits::default())
    }

    pub fn with_limits(limits: DecoderLimits) -> Self {
        Self {
            engine: Engine::new(limits),
        }
    }

    pub fn lenient(mut self) -> Self {
        self.engine.lenient = true;
        self
    }

    pub fn feed(&mut self, bytes: &[u8]) -> Result<(), HttpError> {
        self.engine.feed(bytes)
    }

    pub fn feed_eof(&mut self) -> Result<(), HttpError> {
        self.engine.feed_eof()
    }

    pub fn decode(&mut self) -> Result<Option<Request>, HttpError> {
        Ok(self.engine.decode()?.map(|(head, headers, body)| Request {
            method: head.method,
            target: head.target,
            version: head.version,
            headers,
            body,
        }))
    }

    pub fn reset(&mut self) {
        self.engine.reset();
    }

    pub fn remaining(&self) -> &[u8] {
        self.engine.remaining()
    }
}

impl Default for RequestDecoder {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct ResponseDecoder {
    engine: Engine<ResponseHead>,
}

impl ResponseDecoder {
    pub fn new() -> Self {
        Self::with_limits(DecoderLimits::default())
    }

    pub fn with_limits(limits: DecoderLimits) -> Self {
        Self {
            engine: Engine::new(limits),
        }
    }

    pub fn lenient(mut self) -> Self {
        self.engine.lenient = true;
        self
    }

    pub fn interim_mode(mut self, mode: InterimMode) -> Self {
        self.engine.interim = mode;
        self
    }

    pub fn head_request(&mut self, head: bool) {
        self.engine.head_response = head;
    }

    pub fn feed(&mut self, bytes: &[u8]) -> Result<(), HttpError> {
        self.engine.feed(bytes)
    }

    pub fn feed_eof(&mut self) -> Result<(), HttpError> {
        self.engine.feed_eof()
    }

    pub fn decode(&mut self) -> Result<Option<Response>, HttpError> {
        Ok(self.engine.decode()?.map(|(head, headers, body)| Response {
            version: head.version,
            status_code: head.status_code,
            reason_phrase: head.reason_phrase,
            headers,
            body,
        }))
    }

    pub fn reset(&mut self) {
        self.engine.reset();
    }

    pub fn remaining(&self) -> &[u8] {
        self.engine.remaining()
    }
}

impl Default for ResponseDecoder {
    fn default() -> Self {
        Self::new()
    }
}
