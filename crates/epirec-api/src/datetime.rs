//! Lenient ISO 8601 datetime parsing for request bodies.
//!
//! Accepts RFC 3339 timestamps with an offset (`2021-01-01T10:00:00Z`,
//! `2021-01-01T10:00:00+02:00`) and naive ones without
//! (`2021-01-01T10:00:00`, `2021-01-01 10:00:00.5`, `2021-01-01T10:00`).
//! Offset timestamps keep their wall-clock time, so truncating to a date
//! yields the day as written. A bare date is rejected.
//!
//! Numbers, and strings holding a number, are Unix timestamps in UTC. Values
//! beyond 2e10 in magnitude are taken as milliseconds.

use std::fmt;

use chrono::{DateTime, NaiveDateTime};
use serde::{
  Deserializer,
  de::{self, Visitor},
};

const MILLIS_THRESHOLD: f64 = 2e10;

const NAIVE_FORMATS: &[&str] = &[
  "%Y-%m-%dT%H:%M:%S%.f",
  "%Y-%m-%d %H:%M:%S%.f",
  "%Y-%m-%dT%H:%M",
  "%Y-%m-%d %H:%M",
];

/// Convert a Unix timestamp, in seconds or milliseconds, to UTC.
pub fn from_epoch(value: f64) -> Result<NaiveDateTime, String> {
  let secs = if value.abs() > MILLIS_THRESHOLD { value / 1000.0 } else { value };
  let whole = secs.floor();
  let nanos = (((secs - whole) * 1e9).round() as u32).min(999_999_999);
  if !whole.is_finite() {
    return Err(format!("invalid timestamp {value}"));
  }
  DateTime::from_timestamp(whole as i64, nanos)
    .map(|dt| dt.naive_utc())
    .ok_or_else(|| format!("timestamp {value} is out of range"))
}

pub fn parse(s: &str) -> Result<NaiveDateTime, String> {
  let s = s.trim();
  if let Ok(n) = s.parse::<f64>()
    && n.is_finite()
  {
    return from_epoch(n);
  }
  if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
    return Ok(dt.naive_local());
  }
  NAIVE_FORMATS
    .iter()
    .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    .ok_or_else(|| {
      format!("invalid datetime {s:?}, expected ISO 8601 such as 2021-01-01T00:00:00")
    })
}

/// `#[serde(deserialize_with = "...")]` adapter for [`parse`] and
/// [`from_epoch`].
pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
  D: Deserializer<'de>,
{
  deserializer.deserialize_any(DateTimeVisitor)
}

struct DateTimeVisitor;

impl<'de> Visitor<'de> for DateTimeVisitor {
  type Value = NaiveDateTime;

  fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("an ISO 8601 datetime string or a Unix timestamp")
  }

  fn visit_str<E: de::Error>(self, v: &str) -> Result<NaiveDateTime, E> {
    parse(v).map_err(E::custom)
  }

  fn visit_i64<E: de::Error>(self, v: i64) -> Result<NaiveDateTime, E> {
    from_epoch(v as f64).map_err(E::custom)
  }

  fn visit_u64<E: de::Error>(self, v: u64) -> Result<NaiveDateTime, E> {
    from_epoch(v as f64).map_err(E::custom)
  }

  fn visit_f64<E: de::Error>(self, v: f64) -> Result<NaiveDateTime, E> {
    from_epoch(v).map_err(E::custom)
  }
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;

  fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  #[test]
  fn naive_forms() {
    assert_eq!(parse("2021-01-01T00:00:00").unwrap().date(), ymd(2021, 1, 1));
    assert_eq!(parse("2021-01-01 23:59:59").unwrap().date(), ymd(2021, 1, 1));
    assert_eq!(parse("2021-01-01T12:30:00.250").unwrap().date(), ymd(2021, 1, 1));
    assert_eq!(parse("2021-06-15T08:05").unwrap().date(), ymd(2021, 6, 15));
  }

  #[test]
  fn offset_forms_keep_wall_clock_day() {
    assert_eq!(parse("2021-01-01T10:00:00Z").unwrap().date(), ymd(2021, 1, 1));
    // 23:30 at -05:00 is already Jan 2 in UTC, but the written day wins.
    assert_eq!(
      parse("2021-01-01T23:30:00-05:00").unwrap().date(),
      ymd(2021, 1, 1)
    );
  }

  #[test]
  fn epoch_seconds_and_millis() {
    let new_year = ymd(2021, 1, 1).and_hms_opt(0, 0, 0).unwrap();
    assert_eq!(from_epoch(1_609_459_200.0).unwrap(), new_year);
    assert_eq!(from_epoch(1_609_459_200_000.0).unwrap(), new_year);
    assert_eq!(parse("1609459200").unwrap(), new_year);
    assert_eq!(from_epoch(1_609_459_199.5).unwrap().date(), ymd(2020, 12, 31));
    assert_eq!(from_epoch(0.0).unwrap().date(), ymd(1970, 1, 1));
  }

  #[test]
  fn deserialize_takes_strings_and_numbers() {
    #[derive(serde::Deserialize)]
    struct Body {
      #[serde(deserialize_with = "deserialize")]
      date: NaiveDateTime,
    }
    let date = |v: serde_json::Value| {
      serde_json::from_value::<Body>(serde_json::json!({ "date": v })).map(|b| b.date.date())
    };
    assert_eq!(date(serde_json::json!("2021-01-01T05:00:00")).unwrap(), ymd(2021, 1, 1));
    assert_eq!(date(serde_json::json!(1_609_459_200)).unwrap(), ymd(2021, 1, 1));
    assert_eq!(date(serde_json::json!(1_609_459_200.25)).unwrap(), ymd(2021, 1, 1));
    assert!(date(serde_json::json!(true)).is_err());
    assert!(date(serde_json::json!(null)).is_err());
  }

  #[test]
  fn rejects_bare_dates_and_garbage() {
    for bad in ["2021-01-01", "yesterday", "", "2021-13-01T00:00:00"] {
      assert!(parse(bad).is_err(), "{bad:?} should not parse");
    }
  }
}
