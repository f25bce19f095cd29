//! Error types for `epirec-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid record id: {0:?}")]
  InvalidRecordId(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
