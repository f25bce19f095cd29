//! Handlers for `/records` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/records/` | All records, ascending id |
//! | `GET`  | `/records/{id}` | 404 if absent or not an integer key |
//! | `POST` | `/records/` | Body: [`NewRecordBody`]; returns the stored record |

use std::sync::Arc;

use axum::{
  Json,
  extract::{
    Path, State,
    rejection::{JsonRejection, PathRejection},
  },
  http::Uri,
};
use chrono::NaiveDateTime;
use epirec_core::{
  record::{NewRecord, Record, RecordId},
  store::RecordStore,
};
use serde::Deserialize;

use crate::{coerce, datetime, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /records/` (also `/records`)
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Record>>, ApiError>
where
  S: RecordStore,
{
  let records = store.find_all().await.map_err(ApiError::store)?;
  Ok(Json(records))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /records/{id}`
///
/// A segment that is not an integer key (or not even UTF-8 once decoded) can
/// never name a row, so it is reported the same way as a missing one.
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  uri: Uri,
  id: Result<Path<String>, PathRejection>,
) -> Result<Json<Record>, ApiError>
where
  S: RecordStore,
{
  let id = match id {
    Ok(Path(id)) => id,
    // Echo the still-encoded segment.
    Err(_) => uri.path().rsplit('/').next().unwrap_or_default().to_owned(),
  };
  let not_found = || ApiError::NotFound(format!("Item not found with id= {id}"));

  let key: RecordId = id.parse().map_err(|_| not_found())?;
  let record = store
    .find_by_id(key)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(not_found)?;
  Ok(Json(record))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /records/`.
#[derive(Debug, Deserialize)]
pub struct NewRecordBody {
  /// ISO 8601 datetime or Unix timestamp; only its calendar date is kept.
  #[serde(deserialize_with = "datetime::deserialize")]
  pub date:       NaiveDateTime,
  pub country:    String,
  #[serde(deserialize_with = "coerce::deserialize_int")]
  pub cases:      i64,
  #[serde(deserialize_with = "coerce::deserialize_int")]
  pub deaths:     i64,
  #[serde(deserialize_with = "coerce::deserialize_int")]
  pub recoveries: i64,
}

impl From<NewRecordBody> for NewRecord {
  fn from(b: NewRecordBody) -> Self {
    NewRecord {
      date:       b.date.date(),
      country:    b.country,
      cases:      b.cases,
      deaths:     b.deaths,
      recoveries: b.recoveries,
    }
  }
}

/// `POST /records/` (also `/records`) — returns 200 + the stored [`Record`] with its new id.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<NewRecordBody>, JsonRejection>,
) -> Result<Json<Record>, ApiError>
where
  S: RecordStore,
{
  let Json(body) = body?;
  let record = store
    .insert(NewRecord::from(body))
    .await
    .map_err(ApiError::store)?;

  tracing::debug!(id = %record.id, country = %record.country, "record created");
  Ok(Json(record))
}
