//! Conversions between domain types and the plain values stored in SQLite
//! columns. Dates are stored as ISO 8601 `YYYY-MM-DD` text.

use chrono::NaiveDate;
use epirec_core::record::{Record, RecordId};

use crate::{Error, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

/// Columns of `records`, in `SELECT` order.
pub const RECORD_COLUMNS: &str = "id, date, country, cases, deaths, recoveries";

/// A `records` row exactly as read from SQLite.
pub struct RawRecord {
  pub id:         i64,
  pub date:       String,
  pub country:    String,
  pub cases:      i64,
  pub deaths:     i64,
  pub recoveries: i64,
}

impl RawRecord {
  /// Map a row selected with [`RECORD_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(RawRecord {
      id:         row.get(0)?,
      date:       row.get(1)?,
      country:    row.get(2)?,
      cases:      row.get(3)?,
      deaths:     row.get(4)?,
      recoveries: row.get(5)?,
    })
  }

  pub fn into_record(self) -> Result<Record> {
    Ok(Record {
      id:         RecordId(self.id),
      date:       decode_date(&self.date)?,
      country:    self.country,
      cases:      self.cases,
      deaths:     self.deaths,
      recoveries: self.recoveries,
    })
  }
}
