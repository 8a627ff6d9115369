//! Handlers for `/venues` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`    | `/venues` | Venues grouped by city and state |
//! | `POST`   | `/venues/search` | Form field `search_term` |
//! | `GET`    | `/venues/create` | Empty form |
//! | `POST`   | `/venues/create` | Returns a [`Notice`] |
//! | `GET`    | `/venues/{id}` | Detail view; 404 if not found |
//! | `DELETE` | `/venues/{id}` | Also deletes the venue's shows |
//! | `GET`    | `/venues/{id}/edit` | Form pre-filled with current values |
//! | `POST`   | `/venues/{id}/edit` | Full overwrite; returns a [`Notice`] |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  response::Response,
};
use fyyur_core::{
  query,
  store::{BookingStore, Role},
  venue::NewVenue,
  view::{Area, EntityDetail, VenueSummary},
};

use crate::{
  EditView, SearchView,
  error::Error,
  form::{FormData, venue_from_form},
  notice::Notice,
};

/// `GET /venues`
pub async fn index<S: BookingStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Area>>, Error> {
  Ok(Json(query::group_venues_by_location(store.as_ref(), None).await?))
}

/// `POST /venues/search`
pub async fn search<S: BookingStore>(
  State(store): State<Arc<S>>,
  form: FormData,
) -> Result<Json<SearchView<VenueSummary>>, Error> {
  let search_term = form.get("search_term").unwrap_or_default().to_owned();
  let results = query::search_venues_by_name(store.as_ref(), &search_term, None).await?;
  Ok(Json(SearchView { search_term, results }))
}

/// `GET /venues/{id}`
pub async fn detail<S: BookingStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<EntityDetail>, Error> {
  let detail = query::build_entity_detail(store.as_ref(), id, Role::Venue, None).await?;
  Ok(Json(detail))
}

/// `GET /venues/create`
pub async fn create_form() -> Json<NewVenue> { Json(NewVenue::default()) }

/// `POST /venues/create`
pub async fn create<S: BookingStore>(
  State(store): State<Arc<S>>,
  form: FormData,
) -> Result<Response, Error> {
  let input = venue_from_form(&form)?;
  let name = input.name.clone();

  let notice = match store.add_venue(input).await {
    Ok(venue) => {
      tracing::info!(venue_id = venue.venue_id, %name, "venue listed");
      Notice::success(format!("Venue {name} was successfully listed!"), "/")
    }
    Err(e) => {
      tracing::warn!(error = %e, %name, "venue could not be listed");
      Notice::failure(format!("An error occurred. Venue {name} could not be listed."), "/")
    }
  };
  Ok(notice.created())
}

/// `GET /venues/{id}/edit`
pub async fn edit_form<S: BookingStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<EditView<NewVenue>>, Error> {
  let venue = store
    .get_venue(id)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?
    .ok_or(Error::NotFound)?;
  Ok(Json(EditView { id, form: NewVenue::from(venue) }))
}

/// `POST /venues/{id}/edit`
pub async fn edit<S: BookingStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  form: FormData,
) -> Result<Notice, Error> {
  let input = venue_from_form(&form)?;
  let name = input.name.clone();
  let location = format!("/venues/{id}");

  Ok(match store.update_venue(id, input).await {
    Ok(_) => {
      tracing::info!(venue_id = id, %name, "venue updated");
      Notice::success(format!("Venue {name} was successfully updated!"), location)
    }
    Err(e) => {
      tracing::warn!(error = %e, venue_id = id, "venue could not be updated");
      Notice::failure(
        format!("An error occurred. Venue {name} could not be updated."),
        location,
      )
    }
  })
}

/// `DELETE /venues/{id}`
pub async fn delete<S: BookingStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Notice {
  match store.delete_venue(id).await {
    Ok(shows) => {
      tracing::info!(venue_id = id, shows, "venue deleted");
      Notice::success("Venue was deleted successfully", "/")
    }
    Err(e) => {
      tracing::warn!(error = %e, venue_id = id, "venue could not be deleted");
      Notice::failure("An error occurred. Venue could not be deleted.", "/")
    }
  }
}
