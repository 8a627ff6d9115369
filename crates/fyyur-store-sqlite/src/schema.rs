//! SQL schema for the Fyyur SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS venues (
    venue_id            INTEGER PRIMARY KEY AUTOINCREMENT,
    name                TEXT NOT NULL,
    city                TEXT NOT NULL,
    state               TEXT NOT NULL,
    address             TEXT NOT NULL DEFAULT '',
    phone               TEXT NOT NULL DEFAULT '',
    image_link          TEXT NOT NULL DEFAULT '',
    facebook_link       TEXT NOT NULL DEFAULT '',
    website_link        TEXT NOT NULL DEFAULT '',
    genres              TEXT NOT NULL DEFAULT '[]',   -- JSON array of strings
    seeking_talent      INTEGER NOT NULL DEFAULT 0,
    seeking_description TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS artists (
    artist_id           INTEGER PRIMARY KEY AUTOINCREMENT,
    name                TEXT NOT NULL,
    city                TEXT NOT NULL,
    state               TEXT NOT NULL,
    phone               TEXT NOT NULL DEFAULT '',
    image_link          TEXT NOT NULL DEFAULT '',
    facebook_link       TEXT NOT NULL DEFAULT '',
    website_link        TEXT NOT NULL DEFAULT '',
    genres              TEXT NOT NULL DEFAULT '[]',
    seeking_venue       INTEGER NOT NULL DEFAULT 0,
    seeking_description TEXT NOT NULL DEFAULT ''
);

-- Shows are never updated. Upcoming/past is derived from start_time at
-- query time and is not stored.
CREATE TABLE IF NOT EXISTS shows (
    show_id    INTEGER PRIMARY KEY AUTOINCREMENT,
    artist_id  INTEGER NOT NULL REFERENCES artists(artist_id) ON DELETE CASCADE,
    venue_id   INTEGER NOT NULL REFERENCES venues(venue_id)   ON DELETE CASCADE,
    start_time TEXT NOT NULL    -- fixed-width RFC 3339 UTC, sorts as time
);

CREATE INDEX IF NOT EXISTS shows_artist_idx ON shows(artist_id);
CREATE INDEX IF NOT EXISTS shows_venue_idx  ON shows(venue_id);
CREATE INDEX IF NOT EXISTS shows_start_idx  ON shows(start_time);

PRAGMA user_version = 1;
";
