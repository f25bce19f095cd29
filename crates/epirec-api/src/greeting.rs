//! Static greeting endpoints, `GET /` and `GET /hello/{name}`.

use axum::{
  Json,
  extract::{Path, rejection::PathRejection},
};
use serde::Serialize;

use crate::error::ApiError;

#[derive(Debug, Serialize)]
pub struct Greeting {
  pub message: String,
}

fn greet(name: &str) -> Json<Greeting> {
  Json(Greeting { message: format!("Hello {name}") })
}

/// `GET /`
pub async fn root() -> Json<Greeting> { greet("World") }

/// `GET /hello/{name}` — echoes `name` verbatim. A segment that does not
/// decode to UTF-8 is a 400.
pub async fn hello(
  name: Result<Path<String>, PathRejection>,
) -> Result<Json<Greeting>, ApiError> {
  let Path(name) = name?;
  Ok(greet(&name))
}

/// `GET /hello/` — the empty name.
pub async fn hello_empty() -> Json<Greeting> { greet("") }
