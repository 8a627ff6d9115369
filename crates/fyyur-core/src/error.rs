//! Error types for `fyyur-core`.

use thiserror::Error;

use crate::store::Role;

#[derive(Debug, Error)]
pub enum Error {
  #[error("venue not found: {0}")]
  VenueNotFound(i64),

  #[error("artist not found: {0}")]
  ArtistNotFound(i64),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// The not-found error for an entity of the given role.
  pub fn not_found(role: Role, id: i64) -> Self {
    match role {
      Role::Venue => Self::VenueNotFound(id),
      Role::Artist => Self::ArtistNotFound(id),
    }
  }

  pub fn store<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(err))
  }

  pub fn is_not_found(&self) -> bool {
    matches!(self, Self::VenueNotFound(_) | Self::ArtistNotFound(_))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
