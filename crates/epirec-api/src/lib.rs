//! JSON REST API for the epidemiological records service.
//!
//! Exposes an axum [`Router`] backed by any [`RecordStore`]. The store is
//! constructed by the caller and injected as router state; TLS and auth are
//! out of scope.

pub mod coerce;
pub mod datetime;
pub mod error;
pub mod greeting;
pub mod records;

use std::sync::Arc;

use axum::{Router, routing::get};
use epirec_core::store::RecordStore;
use tower_http::{
  cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
  trace::TraceLayer,
};

pub use error::ApiError;

/// Every origin, method and header is allowed, with credentials.
///
/// A literal `*` may not be combined with credentials, so each list mirrors
/// what the request asked for.
pub fn cors_layer() -> CorsLayer {
  CorsLayer::new()
    .allow_origin(AllowOrigin::mirror_request())
    .allow_methods(AllowMethods::mirror_request())
    .allow_headers(AllowHeaders::mirror_request())
    .allow_credentials(true)
}

/// Build the full application router for `store`.
pub fn router<S>(store: Arc<S>) -> Router<()>
where
  S: RecordStore + 'static,
{
  Router::new()
    // Records
    .route("/records/", get(records::list::<S>).post(records::create::<S>))
    .route("/records", get(records::list::<S>).post(records::create::<S>))
    .route("/records/{id}", get(records::get_one::<S>))
    // Greetings
    .route("/", get(greeting::root))
    .route("/hello/", get(greeting::hello_empty))
    .route("/hello/{name}", get(greeting::hello))
    .layer(TraceLayer::new_for_http())
    .layer(cors_layer())
    .with_state(store)
}
