//! Handler error type and [`axum::response::IntoResponse`] implementation.
//!
//! Unrouted paths and missing records render the generic 404 page; anything
//! else that escapes a handler renders the generic 500 page. Persistence
//! failures on writes never reach this type: handlers turn them into a
//! [`Notice`](crate::notice::Notice).

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("not found")]
  NotFound,

  /// A required form field was absent from the request body.
  #[error("missing form field: {0}")]
  MissingField(&'static str),

  #[error("invalid value for {field}: {value:?}")]
  InvalidField {
    field: &'static str,
    value: String,
  },

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<fyyur_core::Error> for Error {
  fn from(e: fyyur_core::Error) -> Self {
    match e {
      fyyur_core::Error::VenueNotFound(_) | fyyur_core::Error::ArtistNotFound(_) => {
        Error::NotFound
      }
      fyyur_core::Error::Store(e) => Error::Store(e),
    }
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      Error::NotFound => (StatusCode::NOT_FOUND, "Not Found"),
      Error::BadRequest(_) | Error::InvalidField { .. } => {
        tracing::debug!(error = %self, "rejected request");
        (StatusCode::BAD_REQUEST, "Bad Request")
      }
      Error::MissingField(_) | Error::Store(_) => {
        tracing::error!(error = %self, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
