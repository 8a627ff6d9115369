//! Read-side aggregation over a [`BookingStore`].
//!
//! Counts and upcoming/past splits are computed on every call rather than
//! maintained on write. Each operation fixes "now" once (`as_of`, defaulting
//! to [`Utc::now`]) so a single view is classified against a single instant.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::{
  Error, Result,
  show::{BookedShow, Timing, display_start_time},
  store::{BookingStore, Role, ShowQuery},
  venue::Venue,
  view::{
    Area, ArtistSummary, DirectoryStats, EntityDetail, Profile, SearchResults,
    ShowEntry, ShowListing, VenueSummary,
  },
};

fn resolve_as_of(as_of: Option<DateTime<Utc>>) -> DateTime<Utc> {
  as_of.unwrap_or_else(Utc::now)
}

// ─── Counts ──────────────────────────────────────────────────────────────────

/// Number of shows involving entity `id` as `role` that start at or after
/// `as_of`.
pub async fn count_upcoming_shows<S: BookingStore>(
  store: &S,
  id: i64,
  role: Role,
  as_of: Option<DateTime<Utc>>,
) -> Result<u64> {
  let query = ShowQuery::involving(role, id).upcoming(resolve_as_of(as_of));
  store.count_shows(&query).await.map_err(Error::store)
}

async fn venue_summary<S: BookingStore>(
  store: &S,
  venue: &Venue,
  as_of: DateTime<Utc>,
) -> Result<VenueSummary> {
  let num_upcoming_shows =
    count_upcoming_shows(store, venue.venue_id, Role::Venue, Some(as_of)).await?;
  Ok(VenueSummary {
    id: venue.venue_id,
    name: venue.name.clone(),
    num_upcoming_shows,
  })
}

// ─── Grouping ────────────────────────────────────────────────────────────────

/// Group venues by exact `(city, state)`.
///
/// Groups appear in order of their first venue; venues keep input order.
/// Keys are compared byte for byte, so `"Springfield"` and `"springfield"`
/// are different areas.
pub fn group_by_location<I>(venues: I) -> Vec<Area>
where
  I: IntoIterator<Item = (Venue, u64)>,
{
  let mut areas: Vec<Area> = Vec::new();
  let mut index: HashMap<(String, String), usize> = HashMap::new();

  for (venue, num_upcoming_shows) in venues {
    let summary = VenueSummary {
      id: venue.venue_id,
      name: venue.name,
      num_upcoming_shows,
    };
    let key = (venue.city, venue.state);
    match index.get(&key) {
      Some(&i) => areas[i].venues.push(summary),
      None => {
        index.insert(key.clone(), areas.len());
        areas.push(Area { city: key.0, state: key.1, venues: vec![summary] });
      }
    }
  }

  areas
}

/// Every distinct venue location with the venues found there.
pub async fn group_venues_by_location<S: BookingStore>(
  store: &S,
  as_of: Option<DateTime<Utc>>,
) -> Result<Vec<Area>> {
  let as_of = resolve_as_of(as_of);
  let venues = store.list_venues().await.map_err(Error::store)?;

  let mut counted = Vec::with_capacity(venues.len());
  for venue in venues {
    let n =
      count_upcoming_shows(store, venue.venue_id, Role::Venue, Some(as_of)).await?;
    counted.push((venue, n));
  }

  Ok(group_by_location(counted))
}

// ─── Search ──────────────────────────────────────────────────────────────────

/// Venues whose name contains `term`, ignoring case. An empty term matches
/// every venue.
pub async fn search_venues_by_name<S: BookingStore>(
  store: &S,
  term: &str,
  as_of: Option<DateTime<Utc>>,
) -> Result<SearchResults<VenueSummary>> {
  let as_of = resolve_as_of(as_of);
  let venues = store.search_venues(term).await.map_err(Error::store)?;

  let mut data = Vec::with_capacity(venues.len());
  for venue in &venues {
    data.push(venue_summary(store, venue, as_of).await?);
  }
  Ok(SearchResults::from(data))
}

/// Artists whose name contains `term`, ignoring case.
pub async fn search_artists_by_name<S: BookingStore>(
  store: &S,
  term: &str,
  as_of: Option<DateTime<Utc>>,
) -> Result<SearchResults<ArtistSummary>> {
  let as_of = resolve_as_of(as_of);
  let artists = store.search_artists(term).await.map_err(Error::store)?;

  let mut data = Vec::with_capacity(artists.len());
  for artist in artists {
    let n = count_upcoming_shows(store, artist.artist_id, Role::Artist, Some(as_of))
      .await?;
    data.push(ArtistSummary {
      id:                 artist.artist_id,
      name:               artist.name,
      num_upcoming_shows: Some(n),
    });
  }
  Ok(SearchResults::from(data))
}

// ─── Listings ────────────────────────────────────────────────────────────────

/// The artist index: id and name only.
pub async fn list_artists<S: BookingStore>(store: &S) -> Result<Vec<ArtistSummary>> {
  let artists = store.list_artists().await.map_err(Error::store)?;
  Ok(
    artists
      .into_iter()
      .map(|a| ArtistSummary {
        id:                 a.artist_id,
        name:               a.name,
        num_upcoming_shows: None,
      })
      .collect(),
  )
}

/// Every show with both endpoints, unfiltered.
pub async fn list_all_shows<S: BookingStore>(store: &S) -> Result<Vec<ShowListing>> {
  let shows = store
    .list_shows(&ShowQuery::default())
    .await
    .map_err(Error::store)?;

  Ok(
    shows
      .into_iter()
      .map(|s| ShowListing {
        venue_id:          s.venue.id,
        venue_name:        s.venue.name,
        artist_id:         s.artist.id,
        artist_name:       s.artist.name,
        artist_image_link: s.artist.image_link,
        start_time:        display_start_time(s.start_time),
      })
      .collect(),
  )
}

pub async fn directory_stats<S: BookingStore>(
  store: &S,
  as_of: Option<DateTime<Utc>>,
) -> Result<DirectoryStats> {
  let venues = store.list_venues().await.map_err(Error::store)?.len();
  let artists = store.list_artists().await.map_err(Error::store)?.len();
  let upcoming = ShowQuery::default().upcoming(resolve_as_of(as_of));
  let upcoming_shows = store.count_shows(&upcoming).await.map_err(Error::store)?;
  Ok(DirectoryStats { venues, artists, upcoming_shows })
}

// ─── Detail ──────────────────────────────────────────────────────────────────

/// Split the shows of an entity into `(past, upcoming)`, preserving order.
/// `role` is the side the entity sits on; entries describe the other side.
pub fn split_shows(
  shows: Vec<BookedShow>,
  role: Role,
  as_of: DateTime<Utc>,
) -> (Vec<ShowEntry>, Vec<ShowEntry>) {
  let mut past = Vec::new();
  let mut upcoming = Vec::new();

  for show in shows {
    let counterpart = match role {
      Role::Venue => show.artist,
      Role::Artist => show.venue,
    };
    let entry = ShowEntry {
      id:         counterpart.id,
      name:       counterpart.name,
      image_link: counterpart.image_link,
      start_time: display_start_time(show.start_time),
    };
    match Timing::classify(show.start_time, as_of) {
      Timing::Upcoming => upcoming.push(entry),
      Timing::Past => past.push(entry),
    }
  }

  (past, upcoming)
}

/// Assemble the detail view for venue or artist `id`.
///
/// Fails with [`Error::VenueNotFound`] / [`Error::ArtistNotFound`] when no
/// such entity exists.
pub async fn build_entity_detail<S: BookingStore>(
  store: &S,
  id: i64,
  role: Role,
  as_of: Option<DateTime<Utc>>,
) -> Result<EntityDetail> {
  let as_of = resolve_as_of(as_of);

  let profile = match role {
    Role::Venue => store.get_venue(id).await.map_err(Error::store)?.map(Profile::Venue),
    Role::Artist => {
      store.get_artist(id).await.map_err(Error::store)?.map(Profile::Artist)
    }
  }
  .ok_or_else(|| Error::not_found(role, id))?;

  let shows = store
    .list_shows(&ShowQuery::involving(role, id))
    .await
    .map_err(Error::store)?;
  let (past_shows, upcoming_shows) = split_shows(shows, role, as_of);

  Ok(EntityDetail {
    profile,
    past_shows_count: past_shows.len(),
    upcoming_shows_count: upcoming_shows.len(),
    past_shows,
    upcoming_shows,
  })
}
