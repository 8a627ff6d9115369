//! [`SqliteStore`], the SQLite implementation of [`BookingStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;

use fyyur_core::{
  artist::{Artist, NewArtist},
  show::{BookedShow, NewShow, Show},
  store::{BookingStore, ShowQuery, clamp_count},
  venue::{NewVenue, Venue},
};

use crate::{
  Error, Result,
  encode::{
    ARTIST_COLUMNS, RawArtist, RawBookedShow, RawVenue, VENUE_COLUMNS,
    encode_dt, encode_genres,
  },
  schema::SCHEMA,
};

/// Filter shared by the show listing and the show count. Unset parameters
/// are bound as NULL and drop out of the predicate.
const SHOW_FILTER: &str = "
  WHERE (?1 IS NULL OR s.venue_id   =  ?1)
    AND (?2 IS NULL OR s.artist_id  =  ?2)
    AND (?3 IS NULL OR s.start_time >= ?3)
    AND (?4 IS NULL OR s.start_time <  ?4)";

/// Substring match after Unicode lowercasing of both sides. `folded_term`
/// must already be lowercased.
fn name_matches(name: &str, folded_term: &str) -> bool {
  name.to_lowercase().contains(folded_term)
}

/// Outcome of the show insert transaction.
enum ShowInsert {
  Inserted(i64),
  MissingArtist,
  MissingVenue,
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Fyyur entity store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run a parameterless venue `SELECT`.
  async fn query_venues(&self, sql: String) -> Result<Vec<Venue>> {
    let raws: Vec<RawVenue> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map([], RawVenue::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawVenue::into_venue).collect()
  }

  async fn query_artists(&self, sql: String) -> Result<Vec<Artist>> {
    let raws: Vec<RawArtist> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map([], RawArtist::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawArtist::into_artist).collect()
  }

  /// Delete one row of `table` and every show referencing it, in one
  /// transaction. Returns `None` when the row does not exist.
  async fn delete_with_shows(
    &self,
    table: &'static str,
    key: &'static str,
    id: i64,
  ) -> Result<Option<u64>> {
    let removed = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let shows = tx.execute(
          &format!("DELETE FROM shows WHERE {key} = ?1"),
          rusqlite::params![id],
        )?;
        let deleted = tx.execute(
          &format!("DELETE FROM {table} WHERE {key} = ?1"),
          rusqlite::params![id],
        )?;
        if deleted == 0 {
          // Dropping `tx` rolls back; nothing was there to cascade anyway.
          return Ok(None);
        }
        tx.commit()?;
        Ok(Some(shows as u64))
      })
      .await?;
    Ok(removed)
  }
}

// ─── BookingStore impl ───────────────────────────────────────────────────────

impl BookingStore for SqliteStore {
  type Error = Error;

  // ── Venues ────────────────────────────────────────────────────────────────

  async fn add_venue(&self, input: NewVenue) -> Result<Venue> {
    let genres_str = encode_genres(&input.genres)?;
    let row = input.clone();

    let venue_id = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO venues (
             name, city, state, address, phone, image_link, facebook_link,
             website_link, genres, seeking_talent, seeking_description
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
          rusqlite::params![
            row.name,
            row.city,
            row.state,
            row.address,
            row.phone,
            row.image_link,
            row.facebook_link,
            row.website_link,
            genres_str,
            row.seeking_talent,
            row.seeking_description,
          ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        Ok(id)
      })
      .await?;

    tracing::debug!(venue_id, "venue inserted");
    Ok(input.into_venue(venue_id))
  }

  async fn get_venue(&self, id: i64) -> Result<Option<Venue>> {
    let sql = format!("SELECT {VENUE_COLUMNS} FROM venues WHERE venue_id = ?1");

    let raw: Option<RawVenue> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(&sql, rusqlite::params![id], RawVenue::from_row)
            .optional()?,
        )
      })
      .await?;

    raw.map(RawVenue::into_venue).transpose()
  }

  async fn list_venues(&self) -> Result<Vec<Venue>> {
    self
      .query_venues(format!("SELECT {VENUE_COLUMNS} FROM venues ORDER BY venue_id"))
      .await
  }

  async fn update_venue(&self, id: i64, input: NewVenue) -> Result<Venue> {
    let genres_str = encode_genres(&input.genres)?;
    let row = input.clone();

    let updated = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let n = tx.execute(
          "UPDATE venues SET
             name = ?2, city = ?3, state = ?4, address = ?5, phone = ?6,
             image_link = ?7, facebook_link = ?8, website_link = ?9,
             genres = ?10, seeking_talent = ?11, seeking_description = ?12
           WHERE venue_id = ?1",
          rusqlite::params![
            id,
            row.name,
            row.city,
            row.state,
            row.address,
            row.phone,
            row.image_link,
            row.facebook_link,
            row.website_link,
            genres_str,
            row.seeking_talent,
            row.seeking_description,
          ],
        )?;
        tx.commit()?;
        Ok(n)
      })
      .await?;

    if updated == 0 {
      return Err(Error::VenueNotFound(id));
    }
    Ok(input.into_venue(id))
  }

  async fn delete_venue(&self, id: i64) -> Result<u64> {
    let shows = self
      .delete_with_shows("venues", "venue_id", id)
      .await?
      .ok_or(Error::VenueNotFound(id))?;
    tracing::debug!(venue_id = id, shows, "venue deleted");
    Ok(shows)
  }

  async fn search_venues(&self, term: &str) -> Result<Vec<Venue>> {
    // SQLite LIKE only folds ASCII, so matching happens here.
    let needle = term.to_lowercase();
    let mut venues = self
      .query_venues(format!("SELECT {VENUE_COLUMNS} FROM venues ORDER BY venue_id"))
      .await?;
    venues.retain(|v| name_matches(&v.name, &needle));
    Ok(venues)
  }


  // ── Artists ───────────────────────────────────────────────────────────────

  async fn add_artist(&self, input: NewArtist) -> Result<Artist> {
    let genres_str = encode_genres(&input.genres)?;
    let row = input.clone();

    let artist_id = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO artists (
             name, city, state, phone, image_link, facebook_link,
             website_link, genres, seeking_venue, seeking_description
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
          rusqlite::params![
            row.name,
            row.city,
            row.state,
            row.phone,
            row.image_link,
            row.facebook_link,
            row.website_link,
            genres_str,
            row.seeking_venue,
            row.seeking_description,
          ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        Ok(id)
      })
      .await?;

    tracing::debug!(artist_id, "artist inserted");
    Ok(input.into_artist(artist_id))
  }

  async fn get_artist(&self, id: i64) -> Result<Option<Artist>> {
    let sql = format!("SELECT {ARTIST_COLUMNS} FROM artists WHERE artist_id = ?1");

    let raw: Option<RawArtist> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(&sql, rusqlite::params![id], RawArtist::from_row)
            .optional()?,
        )
      })
      .await?;

    raw.map(RawArtist::into_artist).transpose()
  }

  async fn list_artists(&self) -> Result<Vec<Artist>> {
    self
      .query_artists(format!("SELECT {ARTIST_COLUMNS} FROM artists ORDER BY artist_id"))
      .await
  }

  async fn update_artist(&self, id: i64, input: NewArtist) -> Result<Artist> {
    let genres_str = encode_genres(&input.genres)?;
    let row = input.clone();

    let updated = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let n = tx.execute(
          "UPDATE artists SET
             name = ?2, city = ?3, state = ?4, phone = ?5, image_link = ?6,
             facebook_link = ?7, website_link = ?8, genres = ?9,
             seeking_venue = ?10, seeking_description = ?11
           WHERE artist_id = ?1",
          rusqlite::params![
            id,
            row.name,
            row.city,
            row.state,
            row.phone,
            row.image_link,
            row.facebook_link,
            row.website_link,
            genres_str,
            row.seeking_venue,
            row.seeking_description,
          ],
        )?;
        tx.commit()?;
        Ok(n)
      })
      .await?;

    if updated == 0 {
      return Err(Error::ArtistNotFound(id));
    }
    Ok(input.into_artist(id))
  }

  async fn delete_artist(&self, id: i64) -> Result<u64> {
    let shows = self
      .delete_with_shows("artists", "artist_id", id)
      .await?
      .ok_or(Error::ArtistNotFound(id))?;
    tracing::debug!(artist_id = id, shows, "artist deleted");
    Ok(shows)
  }

  async fn search_artists(&self, term: &str) -> Result<Vec<Artist>> {
    // SQLite LIKE only folds ASCII, so matching happens here.
    let needle = term.to_lowercase();
    let mut artists = self
      .query_artists(format!("SELECT {ARTIST_COLUMNS} FROM artists ORDER BY artist_id"))
      .await?;
    artists.retain(|a| name_matches(&a.name, &needle));
    Ok(artists)
  }


  // ── Shows ─────────────────────────────────────────────────────────────────

  async fn add_show(&self, input: NewShow) -> Result<Show> {
    let artist_id = input.artist_id;
    let venue_id = input.venue_id;
    let start_str = encode_dt(input.start_time)?;

    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let artist_exists = tx
          .query_row(
            "SELECT 1 FROM artists WHERE artist_id = ?1",
            rusqlite::params![artist_id],
            |_| Ok(()),
          )
          .optional()?
          .is_some();
        if !artist_exists {
          return Ok(ShowInsert::MissingArtist);
        }

        let venue_exists = tx
          .query_row(
            "SELECT 1 FROM venues WHERE venue_id = ?1",
            rusqlite::params![venue_id],
            |_| Ok(()),
          )
          .optional()?
          .is_some();
        if !venue_exists {
          return Ok(ShowInsert::MissingVenue);
        }

        tx.execute(
          "INSERT INTO shows (artist_id, venue_id, start_time) VALUES (?1, ?2, ?3)",
          rusqlite::params![artist_id, venue_id, start_str],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        Ok(ShowInsert::Inserted(id))
      })
      .await?;

    match outcome {
      ShowInsert::Inserted(show_id) => Ok(Show {
        show_id,
        artist_id,
        venue_id,
        start_time: input.start_time,
      }),
      ShowInsert::MissingArtist => Err(Error::ArtistNotFound(artist_id)),
      ShowInsert::MissingVenue => Err(Error::VenueNotFound(venue_id)),
    }
  }

  async fn list_shows(&self, query: &ShowQuery) -> Result<Vec<BookedShow>> {
    let venue_id = query.venue_id;
    let artist_id = query.artist_id;
    let from_str = query.starting_from.map(encode_dt).transpose()?;
    let before_str = query.starting_before.map(encode_dt).transpose()?;

    let raws: Vec<RawBookedShow> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT
             s.show_id, s.start_time,
             v.venue_id, v.name, v.image_link,
             a.artist_id, a.name, a.image_link
           FROM shows s
           JOIN venues  v ON v.venue_id  = s.venue_id
           JOIN artists a ON a.artist_id = s.artist_id
           {SHOW_FILTER}
           ORDER BY s.start_time, s.show_id"
        ))?;

        let rows = stmt
          .query_map(
            rusqlite::params![venue_id, artist_id, from_str, before_str],
            |row| {
              Ok(RawBookedShow {
                show_id:           row.get(0)?,
                start_time:        row.get(1)?,
                venue_id:          row.get(2)?,
                venue_name:        row.get(3)?,
                venue_image_link:  row.get(4)?,
                artist_id:         row.get(5)?,
                artist_name:       row.get(6)?,
                artist_image_link: row.get(7)?,
              })
            },
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawBookedShow::into_booked).collect()
  }

  async fn count_shows(&self, query: &ShowQuery) -> Result<u64> {
    let venue_id = query.venue_id;
    let artist_id = query.artist_id;
    let from_str = query.starting_from.map(encode_dt).transpose()?;
    let before_str = query.starting_before.map(encode_dt).transpose()?;

    let raw: i64 = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          &format!("SELECT COUNT(*) FROM shows s {SHOW_FILTER}"),
          rusqlite::params![venue_id, artist_id, from_str, before_str],
          |row| row.get(0),
        )?)
      })
      .await?;

    Ok(clamp_count(raw))
  }
}
