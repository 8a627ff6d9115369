//! Artist: a performer that can be booked at venues.

use serde::{Deserialize, Serialize};

/// A persisted artist. Owns zero or more shows through `Show::artist_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
  pub artist_id:           i64,
  pub name:                String,
  pub city:                String,
  pub state:               String,
  pub phone:               String,
  pub image_link:          String,
  pub facebook_link:       String,
  pub website_link:        String,
  pub genres:              Vec<String>,
  /// Whether the artist is open to venue bookings.
  pub seeking_venue:       bool,
  pub seeking_description: String,
}

/// Every mutable field of an artist; see [`crate::venue::NewVenue`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewArtist {
  pub name:                String,
  pub city:                String,
  pub state:               String,
  pub phone:               String,
  pub image_link:          String,
  pub facebook_link:       String,
  pub website_link:        String,
  pub genres:              Vec<String>,
  pub seeking_venue:       bool,
  pub seeking_description: String,
}

impl NewArtist {
  pub fn into_artist(self, artist_id: i64) -> Artist {
    Artist {
      artist_id,
      name: self.name,
      city: self.city,
      state: self.state,
      phone: self.phone,
      image_link: self.image_link,
      facebook_link: self.facebook_link,
      website_link: self.website_link,
      genres: self.genres,
      seeking_venue: self.seeking_venue,
      seeking_description: self.seeking_description,
    }
  }
}

impl From<Artist> for NewArtist {
  fn from(a: Artist) -> Self {
    NewArtist {
      name:                a.name,
      city:                a.city,
      state:               a.state,
      phone:               a.phone,
      image_link:          a.image_link,
      facebook_link:       a.facebook_link,
      website_link:        a.website_link,
      genres:              a.genres,
      seeking_venue:       a.seeking_venue,
      seeking_description: a.seeking_description,
    }
  }
}
