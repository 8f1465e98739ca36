//! The Generalized Time syntax.
//!
//! Values have the form `YYYYMMDDHH[MM[SS]][(.|,)fraction](Z|(+|-)HH[MM])`. A
//! fraction applies to the last field present, so `2009010112.5Z` is half past
//! noon. Every field is range checked on its own before the calendar date is
//! checked as a whole.

use crate::byte_string::ByteString;
use crate::error::{DecodeError, DecodeResult};
use crate::matching::string::utf8;
use crate::schema::constants::{EMR_GENERALIZED_TIME_OID, OMR_GENERALIZED_TIME_OID};
use crate::schema::registry::Schema;
use crate::syntaxes::SyntaxImpl;
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};

const NAME: &str = "Generalized Time";

const MILLIS_PER_HOUR: f64 = 3_600_000.0;
const MILLIS_PER_MINUTE: f64 = 60_000.0;
const MILLIS_PER_SECOND: f64 = 1_000.0;

struct TimeReader<'a> {
    value: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> TimeReader<'a> {
    fn new(value: &'a str) -> Self {
        Self {
            value,
            bytes: value.as_bytes(),
            pos: 0,
        }
    }

    fn error(&self, reason: impl Into<String>) -> DecodeError {
        DecodeError::invalid_value(NAME, self.value, reason)
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn digit(&self, offset: usize) -> Option<u32> {
        match self.bytes.get(self.pos + offset) {
            Some(b @ b'0'..=b'9') => Some(u32::from(b - b'0')),
            _ => None,
        }
    }

    /// Read a two-digit field and check it against `min..=max`.
    fn field(&mut self, name: &str, min: u32, max: u32) -> DecodeResult<u32> {
        let text: String = self.value.get(self.pos..).unwrap_or_default().chars().take(2).collect();
        let (Some(tens), Some(units)) = (self.digit(0), self.digit(1)) else {
            return Err(self.error(format!("invalid {} '{}'", name, text)));
        };
        let value = tens * 10 + units;
        if value < min || value > max {
            return Err(self.error(format!("invalid {} '{}'", name, text)));
        }
        self.pos += 2;
        Ok(value)
    }

    fn year(&mut self) -> DecodeResult<i32> {
        let mut year = 0;
        for offset in 0..4 {
            let digit = self
                .digit(offset)
                .ok_or_else(|| self.error("the year must be four digits"))?;
            year = year * 10 + digit;
        }
        self.pos += 4;
        Ok(year as i32)
    }

    /// Fraction digits up to the time zone, as a value in `[0, 1)`.
    fn fraction(&mut self) -> DecodeResult<f64> {
        let start = self.pos;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(self.error("the fraction is empty"));
        }
        format!("0.{}", &self.value[start..self.pos])
            .parse::<f64>()
            .map_err(|e| self.error(e.to_string()))
    }

    fn time_zone(&mut self) -> DecodeResult<FixedOffset> {
        match self.peek() {
            Some(b'Z') if self.pos + 1 == self.bytes.len() => {
                self.pos += 1;
                FixedOffset::east_opt(0).ok_or_else(|| self.error("invalid offset"))
            }
            Some(sign @ (b'+' | b'-')) => {
                let remaining = self.bytes.len() - self.pos;
                if remaining != 3 && remaining != 5 {
                    return Err(self.error("the time zone offset must be +HH or +HHMM"));
                }
                self.pos += 1;
                let hours = self.field("time zone hour", 0, 23)?;
                let minutes = if remaining == 5 {
                    self.field("time zone minute", 0, 59)?
                } else {
                    0
                };
                let seconds = (hours * 3600 + minutes * 60) as i32;
                let seconds = if sign == b'-' { -seconds } else { seconds };
                FixedOffset::east_opt(seconds).ok_or_else(|| self.error("invalid offset"))
            }
            Some(c) => Err(self.error(format!(
                "illegal character '{}' at position {}",
                c as char, self.pos
            ))),
            None => Err(self.error("the value has no time zone")),
        }
    }
}

/// Decode a generalized time value into an instant.
pub fn decode(value: &str) -> DecodeResult<DateTime<Utc>> {
    let mut reader = TimeReader::new(value);
    if value.len() < 11 {
        return Err(reader.error("the value is too short"));
    }

    let year = reader.year()?;
    let month = reader.field("month", 1, 12)?;
    let day = reader.field("day", 1, 31)?;
    let hour = reader.field("hour", 0, 23)?;
    let mut minute = 0;
    let mut second = 0;
    let mut multiplier = MILLIS_PER_HOUR;

    if reader.digit(0).is_some() {
        minute = reader.field("minute", 0, 59)?;
        multiplier = MILLIS_PER_MINUTE;
        if reader.digit(0).is_some() {
            second = reader.field("second", 0, 60)?;
            multiplier = MILLIS_PER_SECOND;
        }
    }

    let mut millis = 0;
    if matches!(reader.peek(), Some(b'.' | b',')) {
        reader.pos += 1;
        millis = (reader.fraction()? * multiplier).round() as i64;
    }
    let offset = reader.time_zone()?;

    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| reader.error("the date does not exist"))?;
    let time = if second == 60 {
        NaiveTime::from_hms_milli_opt(hour, minute, 59, 1000)
    } else {
        NaiveTime::from_hms_opt(hour, minute, second)
    }
    .ok_or_else(|| reader.error("the time does not exist"))?;

    let local = date.and_time(time) + Duration::milliseconds(millis);
    offset
        .from_local_datetime(&local)
        .single()
        .map(|instant| instant.with_timezone(&Utc))
        .ok_or_else(|| reader.error("the time does not exist"))
}

/// Encode milliseconds since the epoch so that byte order equals time order.
pub fn encode_millis(millis: i64) -> ByteString {
    ((millis as u64) ^ (1 << 63)).to_be_bytes().to_vec().into()
}

/// Decode and encode in one step, as the matching rules need.
pub fn normalize(value: &ByteString) -> DecodeResult<ByteString> {
    let instant = decode(utf8(value, NAME)?)?;
    Ok(encode_millis(instant.timestamp_millis()))
}

#[derive(Debug, Clone, Copy)]
pub struct GeneralizedTimeSyntax;

impl SyntaxImpl for GeneralizedTimeSyntax {
    fn name(&self) -> &str {
        NAME
    }

    fn value_is_acceptable(&self, _schema: &Schema, value: &ByteString) -> DecodeResult<()> {
        decode(utf8(value, NAME)?).map(|_| ())
    }

    fn equality_matching_rule(&self) -> Option<&str> {
        Some(EMR_GENERALIZED_TIME_OID)
    }

    fn ordering_matching_rule(&self) -> Option<&str> {
        Some(OMR_GENERALIZED_TIME_OID)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).single().expect("valid instant")
    }

    #[test]
    fn test_decode_utc() {
        assert_eq!(decode("20090101120000Z"), Ok(utc(2009, 1, 1, 12, 0, 0)));
        assert_eq!(decode("2009010112Z"), Ok(utc(2009, 1, 1, 12, 0, 0)));
    }

    #[test]
    fn test_fractions_scale_by_last_field() {
        assert_eq!(decode("2009010112.5Z"), decode("20090101123000Z"));
        assert_eq!(decode("200901011200,5Z"), decode("20090101120030Z"));
        let millis = decode("20090101120000.123Z").expect("valid");
        assert_eq!(millis.nanosecond(), 123_000_000);
    }

    #[test]
    fn test_offsets() {
        assert_eq!(decode("20090101140000+02"), Ok(utc(2009, 1, 1, 12, 0, 0)));
        assert_eq!(decode("20090101113000-0030"), Ok(utc(2009, 1, 1, 12, 0, 0)));
        assert!(decode("20090101120000+2").is_err());
        assert!(decode("20090101120000+0260").is_err());
        assert!(decode("20090101120000+24").is_err());
    }

    #[test]
    fn test_rejects_invalid_fields() {
        assert!(decode("20091301120000Z").is_err());
        assert!(decode("20090100120000Z").is_err());
        assert!(decode("20090101240000Z").is_err());
        assert!(decode("20090101126000Z").is_err());
        assert!(decode("20090101120061Z").is_err());
        assert!(decode("20090231000000Z").is_err());
        assert!(decode("20090101120000").is_err());
        assert!(decode("20090101120000ZZ").is_err());
        assert!(decode("20090101120000.Z").is_err());
    }

    #[test]
    fn test_leap_second() {
        let leap = decode("20081231235960Z").expect("leap second accepted");
        assert!(leap > decode("20081231235959Z").expect("valid"));
    }

    #[test]
    fn test_encoding_preserves_order() {
        let before = encode_millis(-1);
        let epoch = encode_millis(0);
        let after = encode_millis(1_000);
        assert!(before < epoch && epoch < after);
    }
}
