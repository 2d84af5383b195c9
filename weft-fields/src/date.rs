use chrono::{DateTime, NaiveDateTime, Utc};

use weft_http::HttpError;

use crate::common::invalid;

const IMF_FIXDATE: &str = "%a, %d %b %Y %H:%M:%S GMT";
const RFC_850: &str = "%A, %d-%b-%y %H:%M:%S GMT";
const ASCTIME: &str = "%a %b %e %H:%M:%S %Y";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct HttpDate {
    pub date_time: DateTime<Utc>,
}

impl HttpDate {
    pub fn new(date_time: DateTime<Utc>) -> Self {
        Self { date_time }
    }

    pub fn parse(value: &str) -> Result<Self, HttpError> {
        for format in [IMF_FIXDATE, RFC_850, ASCTIME] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
                return Ok(Self {
                    date_time: naive.and_utc(),
                });
            }
        }
        Err(invalid(format!("invalid http date: {value:?}")))
    }

    pub fn to_header_value(&self) -> String {
        self.date_time.format(IMF_FIXDATE).to_string()
    }
}
