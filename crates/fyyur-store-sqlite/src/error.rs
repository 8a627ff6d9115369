//! Error type for `fyyur-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("timestamp outside years 0000-9999: {0}")]
  TimestampOutOfRange(chrono::DateTime<chrono::Utc>),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("venue not found: {0}")]
  VenueNotFound(i64),

  #[error("artist not found: {0}")]
  ArtistNotFound(i64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
