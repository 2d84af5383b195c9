use weft_codec::{parse_dec_u64, trim_ows};
use weft_http::HttpError;

use crate::common::{invalid, lowercase_token, split_list};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeSpec {
    FromTo(u64, u64),
    From(u64),
    Suffix(u64),
}

impl RangeSpec {
    fn parse(value: &str) -> Result<Self, HttpError> {
        if let Some(suffix) = value.strip_prefix('-') {
            let length = parse_dec_u64(suffix)
                .map_err(|_| invalid(format!("invalid suffix range: {value:?}")))?;
            return Ok(RangeSpec::Suffix(length));
        }
        let (first, last) = value
            .split_once('-')
            .ok_or_else(|| invalid(format!("invalid range spec: {value:?}")))?;
        let first = parse_dec_u64(first)
            .map_err(|_| invalid(format!("invalid range spec: {value:?}")))?;
        if last.is_empty() {
            return Ok(RangeSpec::From(first));
        }
        let last = parse_dec_u64(last)
            .map_err(|_| invalid(format!("invalid range spec: {value:?}")))?;
        if last < first {
            return Err(invalid(format!("descending range: {value:?}")));
        }
        Ok(RangeSpec::FromTo(first, last))
    }

    fn format(&self) -> String {
        match self {
            RangeSpec::FromTo(first, last) => format!("{first}-{last}"),
            RangeSpec::From(first) => format!("{first}-"),
            RangeSpec::Suffix(length) => format!("-{length}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Range {
    pub unit: String,
    pub specs: Vec<RangeSpec>,
}

impl Range {
    pub fn parse(value: &str) -> Result<Self, HttpError> {
        let (unit, set) = value
            .split_once('=')
            .ok_or_else(|| invalid(format!("range missing '=': {value:?}")))?;
        let unit = lowercase_token(trim_ows(unit))?;
        let specs = split_list(set)
            .into_iter()
            .map(RangeSpec::parse)
            .collect::<Result<Vec<_>, _>>()?;
        if specs.is_empty() {
            return Err(invalid("empty range set"));
        }
        Ok(Self { unit, specs })
    }

    pub fn to_header_value(&self) -> String {
        let specs = self
            .specs
            .iter()
            .map(RangeSpec::format)
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}={specs}", self.unit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentRangeResp {
    Range {
        first: u64,
        last: u64,
        complete: Option<u64>,
    },
    Unsatisfied {
        complete: u64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRange {
    pub unit: String,
    pub range: ContentRangeResp,
}

impl ContentRange {
    pub fn parse(value: &str) -> Result<Self, HttpError> {
        let (unit, rest) = value
            .split_once(' ')
            .ok_or_else(|| invalid(format!("content-range missing unit: {value:?}")))?;
        let unit = lowercase_token(unit)?;
        let (range, complete) = rest
            .split_once('/')
            .ok_or_else(|| invalid(format!("content-range missing '/': {value:?}")))?;

        if range == "*" {
            let complete = parse_dec_u64(complete)
                .map_err(|_| invalid(format!("invalid complete length: {value:?}")))?;
            return Ok(Self {
                unit,
                range: ContentRangeResp::Unsatisfied { complete },
            });
        }

        let (first, last) = range
            .split_once('-')
            .ok_or_else(|| invalid(format!("invalid content-range: {value:?}")))?;
        let first = parse_dec_u64(first)
            .map_err(|_| invalid(format!("invalid content-range: {value:?}")))?;
        let last = parse_dec_u64(last)
            .map_err(|_| invalid(format!("invalid content-range: {value:?}")))?;
        if last < first {
            return Err(invalid(format!("descending content-range: {value:?}")));
        }
        let complete = if complete == "*" {
            None
        } else {
            Some(
                parse_dec_u64(complete)
                    .map_err(|_| invalid(format!("invalid complete length: {value:?}")))?,
            )
        };
        Ok(Self {
            unit,
            range: ContentRangeResp::Range {
                first,
                last,
                complete,
            },
        })
    }

    pub fn to_header_value(&self) -> String {
        match self.range {
            ContentRangeResp::Range {
                first,
                last,
                complete,
            } => match complete {
                Some(complete) => format!("{} {first}-{last}/{complete}", self.unit),
                None => format!("{} {first}-{last}/*", self.unit),
            },
            ContentRangeResp::Unsatisfied { complete } => {
                format!("{} */{complete}", self.unit)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptRanges {
    pub units: Vec<String>,
}

impl AcceptRanges {
    pub fn parse(value: &str) -> Result<Self, HttpError> {
        let units = split_list(value)
            .into_iter()
            .map(lowercase_token)
            .collect::<Result<Vec<_>, _>>()?;
        if units.is_empty() {
            return Err(invalid("empty accept-ranges"));
        }
        Ok(Self { units })
    }

    pub fn accepts_bytes(&self) -> bool {
        self.units.iter().any(|unit| unit == "bytes")
    }

    pub fn to_header_value(&self) -> String {
        self.units.join(", ")
    }
}
