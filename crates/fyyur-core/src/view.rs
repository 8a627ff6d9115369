//! Read models handed to the presentation layer.
//!
//! These are computed on every request and never stored. Timestamps are
//! pre-formatted display strings.

use serde::Serialize;

use crate::{artist::Artist, venue::Venue};

/// A venue in a listing, with its upcoming-show count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueSummary {
  pub id:                 i64,
  pub name:               String,
  pub num_upcoming_shows: u64,
}

/// An artist in a listing. The count is only filled in by search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistSummary {
  pub id:                 i64,
  pub name:               String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub num_upcoming_shows: Option<u64>,
}

/// All venues sharing one exact (city, state) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Area {
  pub city:   String,
  pub state:  String,
  pub venues: Vec<VenueSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults<T> {
  pub count: usize,
  pub data:  Vec<T>,
}

impl<T> From<Vec<T>> for SearchResults<T> {
  fn from(data: Vec<T>) -> Self { Self { count: data.len(), data } }
}

/// One show as seen from a detail page: the fields describe the counterpart
/// (the artist on a venue page, the venue on an artist page).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowEntry {
  pub id:         i64,
  pub name:       String,
  pub image_link: String,
  pub start_time: String,
}

/// The static profile behind a detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Profile {
  Venue(Venue),
  Artist(Artist),
}

/// The full detail view for one venue or artist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityDetail {
  #[serde(flatten)]
  pub profile:              Profile,
  pub past_shows:           Vec<ShowEntry>,
  pub upcoming_shows:       Vec<ShowEntry>,
  pub past_shows_count:     usize,
  pub upcoming_shows_count: usize,
}

/// A row of the all-shows listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowListing {
  pub venue_id:          i64,
  pub venue_name:        String,
  pub artist_id:         i64,
  pub artist_name:       String,
  pub artist_image_link: String,
  pub start_time:        String,
}

/// Totals shown on the home page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DirectoryStats {
  pub venues:         usize,
  pub artists:        usize,
  pub upcoming_shows: u64,
}
