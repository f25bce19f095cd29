//! The `RecordStore` trait.
//!
//! Implemented by storage backends (e.g. `epirec-store-sqlite`). The HTTP
//! layer depends on this abstraction, never on a concrete backend or its
//! query API.

use std::future::Future;

use crate::record::{NewRecord, Record, RecordId};

/// Abstraction over a records store backend.
///
/// Records are insert-only: nothing in this system updates or deletes a row.
/// Every method runs in its own store-side session which is released on all
/// exit paths.
///
/// All methods return `Send` futures so the trait can be used behind `axum`
/// on a multi-threaded tokio runtime.
pub trait RecordStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Return every record, in ascending id (insertion) order.
  fn find_all(
    &self,
  ) -> impl Future<Output = Result<Vec<Record>, Self::Error>> + Send + '_;

  /// Look up a single record by primary key. Returns `None` if absent.
  fn find_by_id(
    &self,
    id: RecordId,
  ) -> impl Future<Output = Result<Option<Record>, Self::Error>> + Send + '_;

  /// Persist `input` as a new row and return it with the store-assigned id.
  ///
  /// No deduplication: identical inputs produce distinct rows.
  fn insert(
    &self,
    input: NewRecord,
  ) -> impl Future<Output = Result<Record, Self::Error>> + Send + '_;
}
