//! Decoding of `application/x-www-form-urlencoded` request bodies.
//!
//! The create/edit forms submit `genres` once per selected option, which
//! `axum::Form` cannot collect, so bodies are decoded into ordered pairs with
//! [`url::form_urlencoded`] and read field by field.

use axum::extract::{FromRequest, Request};
use bytes::Bytes;
use chrono::{DateTime, NaiveDateTime, Utc};
use fyyur_core::{artist::NewArtist, show::NewShow, venue::NewVenue};

use crate::error::Error;

/// Raw value of a checked seeking checkbox.
const CHECKED: &str = "y";

/// Naive layouts accepted for `start_time`, interpreted as UTC.
const START_TIME_LAYOUTS: &[&str] = &[
  "%Y-%m-%d %H:%M:%S",
  "%Y-%m-%dT%H:%M:%S",
  "%Y-%m-%d %H:%M",
  "%Y-%m-%dT%H:%M",
];

/// A decoded form body, keeping repeated keys in submission order.
#[derive(Debug, Clone, Default)]
pub struct FormData {
  pairs: Vec<(String, String)>,
}

impl FormData {
  pub fn parse(body: &[u8]) -> Self {
    Self { pairs: url::form_urlencoded::parse(body).into_owned().collect() }
  }

  /// First value submitted for `key`.
  pub fn get(&self, key: &str) -> Option<&str> {
    self
      .pairs
      .iter()
      .find(|(k, _)| k == key)
      .map(|(_, v)| v.as_str())
  }

  pub fn required(&self, key: &'static str) -> Result<String, Error> {
    self.get(key).map(str::to_owned).ok_or(Error::MissingField(key))
  }

  /// Every value submitted for `key`.
  pub fn all(&self, key: &str) -> Vec<String> {
    self
      .pairs
      .iter()
      .filter(|(k, _)| k == key)
      .map(|(_, v)| v.clone())
      .collect()
  }

  /// True iff `key` was submitted with the checkbox marker `"y"`.
  pub fn flag(&self, key: &str) -> bool { self.get(key) == Some(CHECKED) }
}

impl<S> FromRequest<S> for FormData
where
  S: Send + Sync,
{
  type Rejection = Error;

  async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
    let body = Bytes::from_request(req, state)
      .await
      .map_err(|e| Error::BadRequest(e.body_text()))?;
    Ok(Self::parse(&body))
  }
}

// ─── Entity forms ────────────────────────────────────────────────────────────

pub fn venue_from_form(form: &FormData) -> Result<NewVenue, Error> {
  Ok(NewVenue {
    name:                form.required("name")?,
    city:                form.required("city")?,
    state:               form.required("state")?,
    address:             form.required("address")?,
    phone:               form.required("phone")?,
    image_link:          form.required("image_link")?,
    facebook_link:       form.required("facebook_link")?,
    genres:              form.all("genres"),
    website_link:        form.required("website_link")?,
    seeking_talent:      form.flag("seeking_talent"),
    seeking_description: form.required("seeking_description")?,
  })
}

pub fn artist_from_form(form: &FormData) -> Result<NewArtist, Error> {
  Ok(NewArtist {
    name:                form.required("name")?,
    city:                form.required("city")?,
    state:               form.required("state")?,
    phone:               form.required("phone")?,
    genres:              form.all("genres"),
    image_link:          form.required("image_link")?,
    facebook_link:       form.required("facebook_link")?,
    website_link:        form.required("website_link")?,
    seeking_venue:       form.flag("seeking_venue"),
    seeking_description: form.required("seeking_description")?,
  })
}

/// Decode the show form. Absent fields are [`Error::MissingField`];
/// unparseable ids or timestamps are [`Error::InvalidField`].
pub fn show_from_form(form: &FormData) -> Result<NewShow, Error> {
  let artist_id = form.required("artist_id")?;
  let venue_id = form.required("venue_id")?;
  let start_time = form.required("start_time")?;

  Ok(NewShow {
    artist_id:  parse_id("artist_id", artist_id)?,
    venue_id:   parse_id("venue_id", venue_id)?,
    start_time: parse_start_time(&start_time)
      .ok_or(Error::InvalidField { field: "start_time", value: start_time.clone() })?,
  })
}

fn parse_id(field: &'static str, value: String) -> Result<i64, Error> {
  value.trim().parse().map_err(|_| Error::InvalidField { field, value })
}

/// Parse an RFC 3339 timestamp, or one of the naive layouts as UTC.
pub fn parse_start_time(s: &str) -> Option<DateTime<Utc>> {
  let s = s.trim();
  if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
    return Some(dt.with_timezone(&Utc));
  }
  START_TIME_LAYOUTS
    .iter()
    .find_map(|layout| NaiveDateTime::parse_from_str(s, layout).ok())
    .map(|naive| naive.and_utc())
}
