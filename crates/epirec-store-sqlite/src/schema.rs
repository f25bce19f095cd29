//! SQL schema for the records store.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
/// Executed once when the store is opened.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Rows are insert-only.
-- AUTOINCREMENT keeps ids from ever being reused.
CREATE TABLE IF NOT EXISTS records (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    date        TEXT    NOT NULL,   -- ISO 8601 calendar date, YYYY-MM-DD
    country     TEXT    NOT NULL,
    cases       INTEGER NOT NULL,
    deaths      INTEGER NOT NULL,
    recoveries  INTEGER NOT NULL
);

PRAGMA user_version = 1;
";
