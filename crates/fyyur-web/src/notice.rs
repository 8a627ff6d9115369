//! One-shot user notices returned by the create/edit/delete handlers.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
  Success,
  Error,
}

/// A message for the user plus the page the client should return to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
  pub level:    Level,
  pub message:  String,
  pub location: String,
}

impl Notice {
  pub fn success(message: impl Into<String>, location: impl Into<String>) -> Self {
    Self { level: Level::Success, message: message.into(), location: location.into() }
  }

  pub fn failure(message: impl Into<String>, location: impl Into<String>) -> Self {
    Self { level: Level::Error, message: message.into(), location: location.into() }
  }

  /// Respond with `201 Created` instead of `200 OK` when successful.
  pub fn created(self) -> Response {
    let status = match self.level {
      Level::Success => StatusCode::CREATED,
      Level::Error => StatusCode::OK,
    };
    (status, Json(self)).into_response()
  }
}

impl IntoResponse for Notice {
  fn into_response(self) -> Response { (StatusCode::OK, Json(self)).into_response() }
}
