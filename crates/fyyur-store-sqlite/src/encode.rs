//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as fixed-width RFC 3339 UTC strings (nanosecond
//! precision, `Z` suffix) so that string comparison in SQL orders them in
//! time exactly as `DateTime` comparison does. Genre lists are stored as JSON
//! arrays.

use chrono::{DateTime, Datelike as _, SecondsFormat, Utc};
use fyyur_core::{
  artist::Artist,
  show::{BookedShow, EntityRef},
  venue::Venue,
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

/// Only four-digit years keep the encoding fixed-width.
pub fn encode_dt(dt: DateTime<Utc>) -> Result<String> {
  if !(0..=9999).contains(&dt.year()) {
    return Err(Error::TimestampOutOfRange(dt));
  }
  Ok(dt.to_rfc3339_opts(SecondsFormat::Nanos, true))
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Genres ──────────────────────────────────────────────────────────────────

pub fn encode_genres(genres: &[String]) -> Result<String> {
  Ok(serde_json::to_string(genres)?)
}

/// Decode a genre column.
///
/// Current rows hold a JSON array. Older rows hold a single delimited string
/// such as `{Jazz,"Musical Theatre"}`; those are split on `,` after stripping
/// the enclosing braces. The legacy form has no escaping, so a genre that
/// itself contained a comma cannot be recovered.
pub fn decode_genres(s: &str) -> Result<Vec<String>> {
  let trimmed = s.trim();
  if trimmed.starts_with('[') {
    return Ok(serde_json::from_str(trimmed)?);
  }
  Ok(decode_legacy_genres(trimmed))
}

fn decode_legacy_genres(s: &str) -> Vec<String> {
  s.trim_matches(|c: char| c == '{' || c == '}')
    .split(',')
    .map(|g| g.trim().trim_matches('"').to_owned())
    .filter(|g| !g.is_empty())
    .collect()
}

// ─── Row types ───────────────────────────────────────────────────────────────

pub const VENUE_COLUMNS: &str = "venue_id, name, city, state, address, phone, \
  image_link, facebook_link, website_link, genres, seeking_talent, \
  seeking_description";

pub const ARTIST_COLUMNS: &str = "artist_id, name, city, state, phone, \
  image_link, facebook_link, website_link, genres, seeking_venue, \
  seeking_description";

/// Raw values read directly from a `venues` row, in [`VENUE_COLUMNS`] order.
pub struct RawVenue {
  pub venue_id:            i64,
  pub name:                String,
  pub city:                String,
  pub state:               String,
  pub address:             String,
  pub phone:               String,
  pub image_link:          String,
  pub facebook_link:       String,
  pub website_link:        String,
  pub genres:              String,
  pub seeking_talent:      bool,
  pub seeking_description: String,
}

impl RawVenue {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(RawVenue {
      venue_id:            row.get(0)?,
      name:                row.get(1)?,
      city:                row.get(2)?,
      state:               row.get(3)?,
      address:             row.get(4)?,
      phone:               row.get(5)?,
      image_link:          row.get(6)?,
      facebook_link:       row.get(7)?,
      website_link:        row.get(8)?,
      genres:              row.get(9)?,
      seeking_talent:      row.get(10)?,
      seeking_description: row.get(11)?,
    })
  }

  pub fn into_venue(self) -> Result<Venue> {
    Ok(Venue {
      venue_id:            self.venue_id,
      name:                self.name,
      city:                self.city,
      state:               self.state,
      address:             self.address,
      phone:               self.phone,
      image_link:          self.image_link,
      facebook_link:       self.facebook_link,
      website_link:        self.website_link,
      genres:              decode_genres(&self.genres)?,
      seeking_talent:      self.seeking_talent,
      seeking_description: self.seeking_description,
    })
  }
}

/// Raw values read directly from an `artists` row, in [`ARTIST_COLUMNS`]
/// order.
pub struct RawArtist {
  pub artist_id:           i64,
  pub name:                String,
  pub city:                String,
  pub state:               String,
  pub phone:               String,
  pub image_link:          String,
  pub facebook_link:       String,
  pub website_link:        String,
  pub genres:              String,
  pub seeking_venue:       bool,
  pub seeking_description: String,
}

impl RawArtist {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(RawArtist {
      artist_id:           row.get(0)?,
      name:                row.get(1)?,
      city:                row.get(2)?,
      state:               row.get(3)?,
      phone:               row.get(4)?,
      image_link:          row.get(5)?,
      facebook_link:       row.get(6)?,
      website_link:        row.get(7)?,
      genres:              row.get(8)?,
      seeking_venue:       row.get(9)?,
      seeking_description: row.get(10)?,
    })
  }

  pub fn into_artist(self) -> Result<Artist> {
    Ok(Artist {
      artist_id:           self.artist_id,
      name:                self.name,
      city:                self.city,
      state:               self.state,
      phone:               self.phone,
      image_link:          self.image_link,
      facebook_link:       self.facebook_link,
      website_link:        self.website_link,
      genres:              decode_genres(&self.genres)?,
      seeking_venue:       self.seeking_venue,
      seeking_description: self.seeking_description,
    })
  }
}

/// Raw values from a `shows` row joined with both endpoints.
pub struct RawBookedShow {
  pub show_id:           i64,
  pub start_time:        String,
  pub venue_id:          i64,
  pub venue_name:        String,
  pub venue_image_link:  String,
  pub artist_id:         i64,
  pub artist_name:       String,
  pub artist_image_link: String,
}

impl RawBookedShow {
  pub fn into_booked(self) -> Result<BookedShow> {
    Ok(BookedShow {
      show_id:    self.show_id,
      start_time: decode_dt(&self.start_time)?,
      venue:      EntityRef {
        id:         self.venue_id,
        name:       self.venue_name,
        image_link: self.venue_image_link,
      },
      artist:     EntityRef {
        id:         self.artist_id,
        name:       self.artist_name,
        image_link: self.artist_image_link,
      },
    })
  }
}
