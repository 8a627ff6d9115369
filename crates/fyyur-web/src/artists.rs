//! Handlers for `/artists` endpoints. Same shape as [`crate::venues`], except
//! that the index is a flat list.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  response::Response,
};
use fyyur_core::{
  artist::NewArtist,
  query,
  store::{BookingStore, Role},
  view::{ArtistSummary, EntityDetail},
};

use crate::{
  EditView, SearchView,
  error::Error,
  form::{FormData, artist_from_form},
  notice::Notice,
};

/// `GET /artists`
pub async fn index<S: BookingStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<ArtistSummary>>, Error> {
  Ok(Json(query::list_artists(store.as_ref()).await?))
}

/// `POST /artists/search`
pub async fn search<S: BookingStore>(
  State(store): State<Arc<S>>,
  form: FormData,
) -> Result<Json<SearchView<ArtistSummary>>, Error> {
  let search_term = form.get("search_term").unwrap_or_default().to_owned();
  let results =
    query::search_artists_by_name(store.as_ref(), &search_term, None).await?;
  Ok(Json(SearchView { search_term, results }))
}

/// `GET /artists/{id}`
pub async fn detail<S: BookingStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<EntityDetail>, Error> {
  let detail =
    query::build_entity_detail(store.as_ref(), id, Role::Artist, None).await?;
  Ok(Json(detail))
}

/// `GET /artists/create`
pub async fn create_form() -> Json<NewArtist> { Json(NewArtist::default()) }

/// `POST /artists/create`
pub async fn create<S: BookingStore>(
  State(store): State<Arc<S>>,
  form: FormData,
) -> Result<Response, Error> {
  let input = artist_from_form(&form)?;
  let name = input.name.clone();

  let notice = match store.add_artist(input).await {
    Ok(artist) => {
      tracing::info!(artist_id = artist.artist_id, %name, "artist listed");
      Notice::success(format!("Artist {name} was successfully listed!"), "/")
    }
    Err(e) => {
      tracing::warn!(error = %e, %name, "artist could not be listed");
      Notice::failure(
        format!("An error occurred. Artist {name} could not be listed."),
        "/",
      )
    }
  };
  Ok(notice.created())
}

/// `GET /artists/{id}/edit`
pub async fn edit_form<S: BookingStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<EditView<NewArtist>>, Error> {
  let artist = store
    .get_artist(id)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?
    .ok_or(Error::NotFound)?;
  Ok(Json(EditView { id, form: NewArtist::from(artist) }))
}

/// `POST /artists/{id}/edit`
pub async fn edit<S: BookingStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  form: FormData,
) -> Result<Notice, Error> {
  let input = artist_from_form(&form)?;
  let name = input.name.clone();
  let location = format!("/artists/{id}");

  Ok(match store.update_artist(id, input).await {
    Ok(_) => {
      tracing::info!(artist_id = id, %name, "artist updated");
      Notice::success(format!("Artist {name} was successfully updated!"), location)
    }
    Err(e) => {
      tracing::warn!(error = %e, artist_id = id, "artist could not be updated");
      Notice::failure(
        format!("An error occurred. Artist {name} could not be updated."),
        location,
      )
    }
  })
}

/// `DELETE /artists/{id}`
pub async fn delete<S: BookingStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Notice {
  match store.delete_artist(id).await {
    Ok(shows) => {
      tracing::info!(artist_id = id, shows, "artist deleted");
      Notice::success("Artist was deleted successfully", "/")
    }
    Err(e) => {
      tracing::warn!(error = %e, artist_id = id, "artist could not be deleted");
      Notice::failure("An error occurred. Artist could not be deleted.", "/")
    }
  }
}
