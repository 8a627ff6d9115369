//! The home page and the catch-all for unrouted paths.

use std::sync::Arc;

use axum::{Json, extract::State};
use fyyur_core::{query, store::BookingStore, view::DirectoryStats};

use crate::error::Error;

/// `GET /`
pub async fn home<S: BookingStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<DirectoryStats>, Error> {
  Ok(Json(query::directory_stats(store.as_ref(), None).await?))
}

/// Fallback for every path no route matches.
pub async fn not_found() -> Error { Error::NotFound }
