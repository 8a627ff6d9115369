//! HTTP layer for the Fyyur booking directory.
//!
//! Exposes an axum [`Router`] backed by any [`BookingStore`]. Handlers decode
//! form posts, call the store or the read models in [`fyyur_core::query`], and
//! return typed view data as JSON for the presentation layer to render.

pub mod artists;
pub mod error;
pub mod form;
pub mod notice;
pub mod pages;
pub mod shows;
pub mod venues;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use fyyur_core::{store::BookingStore, view::SearchResults};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `FYYUR_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

// ─── Shared views ────────────────────────────────────────────────────────────

/// Search results together with the term that produced them.
#[derive(Debug, Serialize)]
pub struct SearchView<T> {
  pub search_term: String,
  pub results:     SearchResults<T>,
}

/// An edit form pre-filled with the current values of record `id`.
#[derive(Debug, Serialize)]
pub struct EditView<F> {
  pub id:   i64,
  pub form: F,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the application router for `store`.
pub fn router<S>(store: Arc<S>) -> Router
where
  S: BookingStore + 'static,
{
  Router::new()
    .route("/", get(pages::home::<S>))
    // Venues
    .route("/venues", get(venues::index::<S>))
    .route("/venues/search", post(venues::search::<S>))
    .route("/venues/create", get(venues::create_form).post(venues::create::<S>))
    .route("/venues/{id}", get(venues::detail::<S>).delete(venues::delete::<S>))
    .route("/venues/{id}/edit", get(venues::edit_form::<S>).post(venues::edit::<S>))
    // Artists
    .route("/artists", get(artists::index::<S>))
    .route("/artists/search", post(artists::search::<S>))
    .route("/artists/create", get(artists::create_form).post(artists::create::<S>))
    .route("/artists/{id}", get(artists::detail::<S>).delete(artists::delete::<S>))
    .route(
      "/artists/{id}/edit",
      get(artists::edit_form::<S>).post(artists::edit::<S>),
    )
    // Shows
    .route("/shows", get(shows::index::<S>))
    .route("/shows/create", get(shows::create_form).post(shows::create::<S>))
    .fallback(pages::not_found)
    .layer(TraceLayer::new_for_http())
    .with_state(store)
}

// ─── Integration tests ────────────────────────────────────────────────────────
