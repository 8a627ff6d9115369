//! Venue: a place that hosts shows.

use serde::{Deserialize, Serialize};

/// A persisted venue. Owns zero or more shows through `Show::venue_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
  pub venue_id:            i64,
  pub name:                String,
  pub city:                String,
  pub state:               String,
  pub address:             String,
  pub phone:               String,
  pub image_link:          String,
  pub facebook_link:       String,
  pub website_link:        String,
  pub genres:              Vec<String>,
  /// Whether the venue is currently looking for artists to book.
  pub seeking_talent:      bool,
  pub seeking_description: String,
}

/// Every mutable field of a venue. Used both for creation and for the
/// full-overwrite update; there is no partial patch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVenue {
  pub name:                String,
  pub city:                String,
  pub state:               String,
  pub address:             String,
  pub phone:               String,
  pub image_link:          String,
  pub facebook_link:       String,
  pub website_link:        String,
  pub genres:              Vec<String>,
  pub seeking_talent:      bool,
  pub seeking_description: String,
}

impl NewVenue {
  /// Attach a store-assigned id.
  pub fn into_venue(self, venue_id: i64) -> Venue {
    Venue {
      venue_id,
      name: self.name,
      city: self.city,
      state: self.state,
      address: self.address,
      phone: self.phone,
      image_link: self.image_link,
      facebook_link: self.facebook_link,
      website_link: self.website_link,
      genres: self.genres,
      seeking_talent: self.seeking_talent,
      seeking_description: self.seeking_description,
    }
  }
}

impl From<Venue> for NewVenue {
  fn from(v: Venue) -> Self {
    NewVenue {
      name:                v.name,
      city:                v.city,
      state:               v.state,
      address:             v.address,
      phone:               v.phone,
      image_link:          v.image_link,
      facebook_link:       v.facebook_link,
      website_link:        v.website_link,
      genres:              v.genres,
      seeking_talent:      v.seeking_talent,
      seeking_description: v.seeking_description,
    }
  }
}
