//! Handlers for `/shows` endpoints.

use std::sync::Arc;

use axum::{Json, extract::State, response::Response};
use fyyur_core::{query, store::BookingStore, view::ShowListing};
use serde::Serialize;

use crate::{
  error::Error,
  form::{FormData, show_from_form},
  notice::Notice,
};

/// Blank show form.
#[derive(Debug, Default, Serialize)]
pub struct ShowFormView {
  pub artist_id:  Option<i64>,
  pub venue_id:   Option<i64>,
  pub start_time: Option<String>,
}

/// `GET /shows`
pub async fn index<S: BookingStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<ShowListing>>, Error> {
  Ok(Json(query::list_all_shows(store.as_ref()).await?))
}

/// `GET /shows/create`
pub async fn create_form() -> Json<ShowFormView> { Json(ShowFormView::default()) }

/// `POST /shows/create`
///
/// Unparseable ids or timestamps get the same notice as a rejected insert.
pub async fn create<S: BookingStore>(
  State(store): State<Arc<S>>,
  form: FormData,
) -> Result<Response, Error> {
  let failure = || Notice::failure("An error occurred. Show could not be listed.", "/");

  let input = match show_from_form(&form) {
    Ok(input) => input,
    Err(e @ Error::InvalidField { .. }) => {
      tracing::warn!(error = %e, "show could not be listed");
      return Ok(failure().created());
    }
    Err(e) => return Err(e),
  };

  let notice = match store.add_show(input).await {
    Ok(show) => {
      tracing::info!(
        show_id = show.show_id,
        artist_id = show.artist_id,
        venue_id = show.venue_id,
        "show listed"
      );
      Notice::success("Show was successfully listed!", "/")
    }
    Err(e) => {
      tracing::warn!(error = %e, "show could not be listed");
      failure()
    }
  };
  Ok(notice.created())
}
