//! Core types and the repository trait for the epidemiological records
//! service.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! store and API crates both depend on it.

pub mod error;
pub mod record;
pub mod store;

pub use error::{Error, Result};
