//! The `BookingStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `fyyur-store-sqlite`).
//! The read models in [`crate::query`] and the web layer depend on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  artist::{Artist, NewArtist},
  show::{BookedShow, NewShow, Show},
  venue::{NewVenue, Venue},
};

// ─── Roles ───────────────────────────────────────────────────────────────────

/// Which side of a show an entity sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  Venue,
  Artist,
}

// ─── Query type ──────────────────────────────────────────────────────────────

/// Filter for [`BookingStore::list_shows`] and [`BookingStore::count_shows`].
/// Unset fields do not constrain the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShowQuery {
  pub venue_id:        Option<i64>,
  pub artist_id:       Option<i64>,
  /// Inclusive lower bound on `start_time`.
  pub starting_from:   Option<DateTime<Utc>>,
  /// Exclusive upper bound on `start_time`.
  pub starting_before: Option<DateTime<Utc>>,
}

impl ShowQuery {
  /// Every show the entity `id` takes part in as `role`.
  pub fn involving(role: Role, id: i64) -> Self {
    match role {
      Role::Venue => Self { venue_id: Some(id), ..Self::default() },
      Role::Artist => Self { artist_id: Some(id), ..Self::default() },
    }
  }

  /// Restrict to shows starting at or after `as_of`.
  pub fn upcoming(mut self, as_of: DateTime<Utc>) -> Self {
    self.starting_from = Some(as_of);
    self
  }
}

/// Convert a raw SQL `COUNT` into a show count. A negative value cannot occur
/// with correct accounting and is clamped to zero.
pub fn clamp_count(raw: i64) -> u64 { u64::try_from(raw).unwrap_or(0) }

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a Fyyur entity store backend.
///
/// Every mutating method is transactional: either all field writes and the id
/// assignment succeed, or the store is left unchanged and an error returned.
/// Updates overwrite every mutable field.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait BookingStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Venues ────────────────────────────────────────────────────────────

  /// Persist a new venue; the store assigns its id.
  fn add_venue(
    &self,
    input: NewVenue,
  ) -> impl Future<Output = Result<Venue, Self::Error>> + Send + '_;

  /// Retrieve a venue by id. Returns `None` if not found.
  fn get_venue(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Venue>, Self::Error>> + Send + '_;

  /// All venues in storage order.
  fn list_venues(
    &self,
  ) -> impl Future<Output = Result<Vec<Venue>, Self::Error>> + Send + '_;

  /// Replace every mutable field of venue `id`.
  fn update_venue(
    &self,
    id: i64,
    input: NewVenue,
  ) -> impl Future<Output = Result<Venue, Self::Error>> + Send + '_;

  /// Delete venue `id` together with its shows. Returns the number of shows
  /// removed.
  fn delete_venue(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Venues whose name contains `term`, ignoring case.
  fn search_venues<'a>(
    &'a self,
    term: &'a str,
  ) -> impl Future<Output = Result<Vec<Venue>, Self::Error>> + Send + 'a;

  // ── Artists ───────────────────────────────────────────────────────────

  fn add_artist(
    &self,
    input: NewArtist,
  ) -> impl Future<Output = Result<Artist, Self::Error>> + Send + '_;

  fn get_artist(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Artist>, Self::Error>> + Send + '_;

  fn list_artists(
    &self,
  ) -> impl Future<Output = Result<Vec<Artist>, Self::Error>> + Send + '_;

  fn update_artist(
    &self,
    id: i64,
    input: NewArtist,
  ) -> impl Future<Output = Result<Artist, Self::Error>> + Send + '_;

  fn delete_artist(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  fn search_artists<'a>(
    &'a self,
    term: &'a str,
  ) -> impl Future<Output = Result<Vec<Artist>, Self::Error>> + Send + 'a;

  // ── Shows ─────────────────────────────────────────────────────────────

  /// Persist a new show. Fails without writing anything if either endpoint
  /// does not exist.
  fn add_show(
    &self,
    input: NewShow,
  ) -> impl Future<Output = Result<Show, Self::Error>> + Send + '_;

  /// Shows matching `query`, joined with both endpoints, ordered by start
  /// time.
  fn list_shows<'a>(
    &'a self,
    query: &'a ShowQuery,
  ) -> impl Future<Output = Result<Vec<BookedShow>, Self::Error>> + Send + 'a;

  /// Number of shows matching `query`.
  fn count_shows<'a>(
    &'a self,
    query: &'a ShowQuery,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + 'a;
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  #[test]
  fn negative_counts_clamp_to_zero() {
    assert_eq!(clamp_count(-3), 0);
    assert_eq!(clamp_count(i64::MIN), 0);
    assert_eq!(clamp_count(0), 0);
    assert_eq!(clamp_count(7), 7);
  }

  #[test]
  fn involving_sets_the_matching_key() {
    let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();

    let q = ShowQuery::involving(Role::Artist, 4).upcoming(now);
    assert_eq!(q.artist_id, Some(4));
    assert_eq!(q.venue_id, None);
    assert_eq!(q.starting_from, Some(now));
    assert_eq!(q.starting_before, None);

    let q = ShowQuery::involving(Role::Venue, 9);
    assert_eq!(q.venue_id, Some(9));
    assert_eq!(q.artist_id, None);
    assert_eq!(q.starting_from, None);
  }
}
