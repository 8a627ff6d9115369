//! Show: the association between one artist and one venue at a start time.
//!
//! Whether a show is upcoming or past is never stored. It is derived from the
//! start time and the instant a query is evaluated at.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted show. Both foreign keys are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Show {
  pub show_id:    i64,
  pub artist_id:  i64,
  pub venue_id:   i64,
  pub start_time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewShow {
  pub artist_id:  i64,
  pub venue_id:   i64,
  pub start_time: DateTime<Utc>,
}

// ─── Joined reads ────────────────────────────────────────────────────────────

/// The identifying fields of one end of a show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
  pub id:         i64,
  pub name:       String,
  pub image_link: String,
}

/// A show joined with both of its endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedShow {
  pub show_id:    i64,
  pub start_time: DateTime<Utc>,
  pub venue:      EntityRef,
  pub artist:     EntityRef,
}

// ─── Classification ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timing {
  Upcoming,
  Past,
}

impl Timing {
  /// Upcoming iff `start_time >= as_of`; the boundary instant is upcoming.
  pub fn classify(start_time: DateTime<Utc>, as_of: DateTime<Utc>) -> Self {
    if start_time >= as_of { Self::Upcoming } else { Self::Past }
  }
}

/// Render a start time the way listings display it, e.g.
/// `Sat Oct 17 20:00:00 2026`.
pub fn display_start_time(start_time: DateTime<Utc>) -> String {
  start_time.format("%a %b %e %H:%M:%S %Y").to_string()
}
