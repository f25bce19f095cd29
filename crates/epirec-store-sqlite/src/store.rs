//! [`SqliteStore`] — the SQLite implementation of [`RecordStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;

use epirec_core::{
  record::{NewRecord, Record, RecordId},
  store::RecordStore,
};

use crate::{
  Result,
  encode::{RECORD_COLUMNS, RawRecord, encode_date},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A records store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    tracing::debug!("records schema ready");
    Ok(())
  }

  /// Run `f` inside a session: a transaction on the connection thread.
  ///
  /// The transaction commits only when `f` returns `Ok`. On an error, an
  /// early return or a panic it is dropped, which rolls it back, so the
  /// session is released on every exit path.
  pub(crate) async fn with_session<F, R>(&self, f: F) -> Result<R>
  where
    F: FnOnce(&rusqlite::Transaction<'_>) -> rusqlite::Result<R> + Send + 'static,
    R: Send + 'static,
  {
    let out = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let out = f(&tx)?;
        tx.commit()?;
        Ok(out)
      })
      .await?;
    Ok(out)
  }
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for SqliteStore {
  type Error = crate::Error;

  async fn find_all(&self) -> Result<Vec<Record>> {
    let raws: Vec<RawRecord> = self
      .with_session(|tx| {
        let mut stmt = tx.prepare(&format!(
          "SELECT {RECORD_COLUMNS} FROM records ORDER BY id"
        ))?;
        let rows = stmt
          .query_map([], RawRecord::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawRecord::into_record).collect()
  }

  async fn find_by_id(&self, id: RecordId) -> Result<Option<Record>> {
    let raw: Option<RawRecord> = self
      .with_session(move |tx| {
        tx.query_row(
          &format!("SELECT {RECORD_COLUMNS} FROM records WHERE id = ?1"),
          rusqlite::params![id.0],
          RawRecord::from_row,
        )
        .optional()
      })
      .await?;

    raw.map(RawRecord::into_record).transpose()
  }

  async fn insert(&self, input: NewRecord) -> Result<Record> {
    let date_str   = encode_date(input.date);
    let country    = input.country.clone();
    let cases      = input.cases;
    let deaths     = input.deaths;
    let recoveries = input.recoveries;

    let id = self
      .with_session(move |tx| {
        tx.execute(
          "INSERT INTO records (date, country, cases, deaths, recoveries)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![date_str, country, cases, deaths, recoveries],
        )?;
        Ok(tx.last_insert_rowid())
      })
      .await?;

    Ok(input.with_id(RecordId(id)))
  }
}
