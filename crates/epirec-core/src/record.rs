//! Record — one country's case, death and recovery counts for one day.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::Error;

/// Primary key of a [`Record`], assigned by the store on insert.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl fmt::Display for RecordId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}

/// Accepts integers and integral decimals (`"1"`, `"1.0"`, `"1e2"`), the
/// same text SQLite converts losslessly to an integer key.
impl FromStr for RecordId {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let t = s.trim();
    if let Ok(n) = t.parse::<i64>() {
      return Ok(RecordId(n));
    }
    match t.parse::<f64>() {
      Ok(f)
        if f.is_finite()
          && f.fract() == 0.0
          && f >= i64::MIN as f64
          && f < i64::MAX as f64 =>
      {
        Ok(RecordId(f as i64))
      }
      _ => Err(Error::InvalidRecordId(s.to_owned())),
    }
  }
}

/// A persisted record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
  pub id:         RecordId,
  pub date:       NaiveDate,
  pub country:    String,
  pub cases:      i64,
  pub deaths:     i64,
  pub recoveries: i64,
}

/// Input for [`RecordStore::insert`](crate::store::RecordStore::insert).
/// Everything a [`Record`] has except the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
  pub date:       NaiveDate,
  pub country:    String,
  pub cases:      i64,
  pub deaths:     i64,
  pub recoveries: i64,
}

impl NewRecord {
  /// Attach the id the store assigned to this input.
  pub fn with_id(self, id: RecordId) -> Record {
    Record {
      id,
      date:       self.date,
      country:    self.country,
      cases:      self.cases,
      deaths:     self.deaths,
      recoveries: self.recoveries,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn record_id_parses_integers() {
    assert_eq!("42".parse::<RecordId>().unwrap(), RecordId(42));
    assert_eq!("-3".parse::<RecordId>().unwrap(), RecordId(-3));
  }

  #[test]
  fn record_id_accepts_integral_decimals() {
    assert_eq!("1.0".parse::<RecordId>().unwrap(), RecordId(1));
    assert_eq!("1e2".parse::<RecordId>().unwrap(), RecordId(100));
    assert_eq!(" 7 ".parse::<RecordId>().unwrap(), RecordId(7));
  }

  #[test]
  fn record_id_rejects_non_integers() {
    for bad in ["", "abc", "1.5", "9999999999999999999999", "NaN", "inf"] {
      let err = bad.parse::<RecordId>().unwrap_err();
      assert!(matches!(err, Error::InvalidRecordId(ref s) if s == bad));
    }
  }

  #[test]
  fn record_serialises_with_plain_date_and_id() {
    let record = NewRecord {
      date:       NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
      country:    "USA".into(),
      cases:      100,
      deaths:     2,
      recoveries: 90,
    }
    .with_id(RecordId(1));

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(
      json,
      serde_json::json!({
        "id": 1,
        "date": "2021-01-01",
        "country": "USA",
        "cases": 100,
        "deaths": 2,
        "recoveries": 90,
      })
    );
  }
}
