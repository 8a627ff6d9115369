//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{DateTime, Duration, TimeZone, Utc};
use fyyur_core::{
  Error as CoreError,
  artist::NewArtist,
  query,
  show::NewShow,
  store::{BookingStore, Role, ShowQuery},
  venue::NewVenue,
  view::Profile,
};

use crate::{
  Error, SqliteStore,
  encode::{decode_dt, decode_genres, encode_dt},
};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn now() -> DateTime<Utc> { Utc.with_ymd_and_hms(2026, 10, 17, 19, 0, 0).unwrap() }

fn new_venue(name: &str, city: &str, state: &str) -> NewVenue {
  NewVenue {
    name: name.into(),
    city: city.into(),
    state: state.into(),
    address: "1015 Folsom Street".into(),
    phone: "123-123-1234".into(),
    image_link: format!("https://img.example.com/{name}.jpg"),
    facebook_link: "https://www.facebook.com/TheMusicalHop".into(),
    website_link: "https://www.themusicalhop.com".into(),
    genres: vec!["Jazz".into(), "Reggae".into(), "Swing".into()],
    seeking_talent: true,
    seeking_description: "We are on the lookout for a local artist".into(),
  }
}

fn new_artist(name: &str) -> NewArtist {
  NewArtist {
    name: name.into(),
    city: "San Francisco".into(),
    state: "CA".into(),
    phone: "326-123-5000".into(),
    image_link: format!("https://img.example.com/{name}.jpg"),
    facebook_link: "https://www.facebook.com/GunsNPetals".into(),
    website_link: "https://www.gunsnpetalsband.com".into(),
    genres: vec!["Rock n Roll".into()],
    seeking_venue: false,
    seeking_description: String::new(),
  }
}

async fn book(s: &SqliteStore, artist_id: i64, venue_id: i64, start: DateTime<Utc>) {
  s.add_show(NewShow { artist_id, venue_id, start_time: start })
    .await
    .unwrap();
}

// ─── Venues ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_get_venue() {
  let s = store().await;

  let venue = s
    .add_venue(new_venue("The Musical Hop", "San Francisco", "CA"))
    .await
    .unwrap();

  let fetched = s.get_venue(venue.venue_id).await.unwrap().unwrap();
  assert_eq!(fetched, venue);
  assert_eq!(fetched.genres, ["Jazz", "Reggae", "Swing"]);
  assert!(fetched.seeking_talent);
}

#[tokio::test]
async fn get_venue_missing_returns_none() {
  let s = store().await;
  assert!(s.get_venue(42).await.unwrap().is_none());
}

#[tokio::test]
async fn update_venue_overwrites_every_field() {
  let s = store().await;
  let venue = s
    .add_venue(new_venue("The Musical Hop", "San Francisco", "CA"))
    .await
    .unwrap();

  let mut replacement = new_venue("The Dueling Pianos Bar", "New York", "NY");
  replacement.genres = vec![];
  replacement.seeking_talent = false;

  let updated = s.update_venue(venue.venue_id, replacement.clone()).await.unwrap();
  let fetched = s.get_venue(venue.venue_id).await.unwrap().unwrap();
  assert_eq!(fetched, updated);
  assert_eq!(fetched, replacement.into_venue(venue.venue_id));
}

#[tokio::test]
async fn update_missing_venue_fails() {
  let s = store().await;
  let err = s
    .update_venue(7, new_venue("Nowhere", "X", "Y"))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::VenueNotFound(7)));
  assert!(s.list_venues().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_venue_cascades_to_its_shows() {
  let s = store().await;
  let hop = s.add_venue(new_venue("Hop", "SF", "CA")).await.unwrap();
  let park = s.add_venue(new_venue("Park", "SF", "CA")).await.unwrap();
  let artist = s.add_artist(new_artist("Guns N Petals")).await.unwrap();

  book(&s, artist.artist_id, hop.venue_id, now()).await;
  book(&s, artist.artist_id, hop.venue_id, now() - Duration::days(2)).await;
  book(&s, artist.artist_id, park.venue_id, now()).await;

  let removed = s.delete_venue(hop.venue_id).await.unwrap();
  assert_eq!(removed, 2);
  assert!(s.get_venue(hop.venue_id).await.unwrap().is_none());

  let remaining = s.list_shows(&ShowQuery::default()).await.unwrap();
  assert_eq!(remaining.len(), 1);
  assert_eq!(remaining[0].venue.id, park.venue_id);
}

#[tokio::test]
async fn delete_missing_venue_fails() {
  let s = store().await;
  let err = s.delete_venue(3).await.unwrap_err();
  assert!(matches!(err, Error::VenueNotFound(3)));
}

// ─── Artists ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn artist_name_update_leaves_other_fields() {
  let s = store().await;
  let artist = s.add_artist(new_artist("Matt Quevedo")).await.unwrap();

  let mut input = NewArtist::from(artist.clone());
  input.name = "Matt Quevado".into();
  s.update_artist(artist.artist_id, input).await.unwrap();

  let fetched = s.get_artist(artist.artist_id).await.unwrap().unwrap();
  assert_eq!(fetched.name, "Matt Quevado");
  assert_eq!(fetched.city, artist.city);
  assert_eq!(fetched.state, artist.state);
  assert_eq!(fetched.phone, artist.phone);
  assert_eq!(fetched.genres, artist.genres);
  assert_eq!(fetched.image_link, artist.image_link);
  assert_eq!(fetched.facebook_link, artist.facebook_link);
  assert_eq!(fetched.website_link, artist.website_link);
  assert_eq!(fetched.seeking_venue, artist.seeking_venue);
  assert_eq!(fetched.seeking_description, artist.seeking_description);
}

#[tokio::test]
async fn delete_artist_cascades_to_its_shows() {
  let s = store().await;
  let venue = s.add_venue(new_venue("Hop", "SF", "CA")).await.unwrap();
  let artist = s.add_artist(new_artist("The Wild Sax Band")).await.unwrap();
  book(&s, artist.artist_id, venue.venue_id, now()).await;

  assert_eq!(s.delete_artist(artist.artist_id).await.unwrap(), 1);
  assert!(s.list_artists().await.unwrap().is_empty());
  assert_eq!(s.count_shows(&ShowQuery::default()).await.unwrap(), 0);
}

// ─── Shows ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_show_with_missing_artist_leaves_store_unchanged() {
  let s = store().await;
  let venue = s.add_venue(new_venue("Hop", "SF", "CA")).await.unwrap();

  let err = s
    .add_show(NewShow { artist_id: 99, venue_id: venue.venue_id, start_time: now() })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::ArtistNotFound(99)));
  assert_eq!(s.count_shows(&ShowQuery::default()).await.unwrap(), 0);
}

#[tokio::test]
async fn add_show_with_missing_venue_fails() {
  let s = store().await;
  let artist = s.add_artist(new_artist("Guns N Petals")).await.unwrap();

  let err = s
    .add_show(NewShow { artist_id: artist.artist_id, venue_id: 5, start_time: now() })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::VenueNotFound(5)));
}

#[tokio::test]
async fn list_shows_filters_by_bounds_and_orders_by_start() {
  let s = store().await;
  let venue = s.add_venue(new_venue("Hop", "SF", "CA")).await.unwrap();
  let artist = s.add_artist(new_artist("Guns N Petals")).await.unwrap();

  book(&s, artist.artist_id, venue.venue_id, now() + Duration::days(5)).await;
  book(&s, artist.artist_id, venue.venue_id, now() - Duration::days(5)).await;
  book(&s, artist.artist_id, venue.venue_id, now()).await;

  let all = s.list_shows(&ShowQuery::default()).await.unwrap();
  let starts: Vec<_> = all.iter().map(|b| b.start_time).collect();
  assert_eq!(
    starts,
    [now() - Duration::days(5), now(), now() + Duration::days(5)]
  );

  let upcoming = ShowQuery::involving(Role::Venue, venue.venue_id).upcoming(now());
  assert_eq!(s.count_shows(&upcoming).await.unwrap(), 2);

  let past = ShowQuery {
    starting_before: Some(now()),
    ..ShowQuery::involving(Role::Artist, artist.artist_id)
  };
  let listed = s.list_shows(&past).await.unwrap();
  assert_eq!(listed.len(), 1);
  assert_eq!(listed[0].artist.name, "Guns N Petals");
}

#[tokio::test]
async fn add_show_rejects_five_digit_years() {
  let s = store().await;
  let venue = s.add_venue(new_venue("Hop", "SF", "CA")).await.unwrap();
  let artist = s.add_artist(new_artist("Guns N Petals")).await.unwrap();
  book(&s, artist.artist_id, venue.venue_id, now() + Duration::days(1)).await;

  let far = Utc.with_ymd_and_hms(12345, 1, 1, 0, 0, 0).unwrap();
  let err = s
    .add_show(NewShow {
      artist_id:  artist.artist_id,
      venue_id:   venue.venue_id,
      start_time: far,
    })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::TimestampOutOfRange(t) if t == far));

  let shows = query::list_all_shows(&s).await.unwrap();
  assert_eq!(shows.len(), 1);
  let n = query::count_upcoming_shows(&s, venue.venue_id, Role::Venue, Some(now()))
    .await
    .unwrap();
  assert_eq!(n, 1);
}

// ─── Query layer ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn show_starting_now_counts_as_upcoming() {
  let s = store().await;
  let venue = s.add_venue(new_venue("Hop", "SF", "CA")).await.unwrap();
  let artist = s.add_artist(new_artist("Guns N Petals")).await.unwrap();
  book(&s, artist.artist_id, venue.venue_id, now()).await;

  let n = query::count_upcoming_shows(&s, venue.venue_id, Role::Venue, Some(now()))
    .await
    .unwrap();
  assert_eq!(n, 1);

  let detail =
    query::build_entity_detail(&s, artist.artist_id, Role::Artist, Some(now()))
      .await
      .unwrap();
  assert_eq!(detail.upcoming_shows_count, 1);
  assert_eq!(detail.past_shows_count, 0);
}

#[tokio::test]
async fn count_and_detail_agree_below_a_microsecond() {
  let s = store().await;
  let venue = s.add_venue(new_venue("Hop", "SF", "CA")).await.unwrap();
  let artist = s.add_artist(new_artist("Guns N Petals")).await.unwrap();
  book(&s, artist.artist_id, venue.venue_id, now()).await;
  book(&s, artist.artist_id, venue.venue_id, now() + Duration::nanoseconds(600)).await;

  let as_of = now() + Duration::nanoseconds(500);
  let n = query::count_upcoming_shows(&s, venue.venue_id, Role::Venue, Some(as_of))
    .await
    .unwrap();
  let detail = query::build_entity_detail(&s, venue.venue_id, Role::Venue, Some(as_of))
    .await
    .unwrap();

  assert_eq!(n, 1);
  assert_eq!(detail.upcoming_shows_count, 1);
  assert_eq!(detail.past_shows_count, 1);
}

#[tokio::test]
async fn count_for_unknown_entity_is_zero() {
  let s = store().await;
  let n = query::count_upcoming_shows(&s, 1234, Role::Artist, None)
    .await
    .unwrap();
  assert_eq!(n, 0);
}

#[tokio::test]
async fn grouping_separates_cities() {
  let s = store().await;
  let a = s.add_venue(new_venue("Springfield Hall", "Springfield", "IL")).await.unwrap();
  let b = s.add_venue(new_venue("Daily Planet Stage", "Metropolis", "IL")).await.unwrap();
  let c = s.add_venue(new_venue("Kwik-E-Club", "Springfield", "IL")).await.unwrap();
  let artist = s.add_artist(new_artist("Guns N Petals")).await.unwrap();
  book(&s, artist.artist_id, c.venue_id, now() + Duration::hours(1)).await;

  let areas = query::group_venues_by_location(&s, Some(now())).await.unwrap();
  assert_eq!(areas.len(), 2);

  let springfield = areas.iter().find(|area| area.city == "Springfield").unwrap();
  let ids: Vec<i64> = springfield.venues.iter().map(|v| v.id).collect();
  assert_eq!(ids, [a.venue_id, c.venue_id]);
  assert_eq!(springfield.venues[1].num_upcoming_shows, 1);

  let metropolis = areas.iter().find(|area| area.city == "Metropolis").unwrap();
  assert_eq!(metropolis.venues.len(), 1);
  assert_eq!(metropolis.venues[0].id, b.venue_id);
  assert_eq!(metropolis.venues[0].num_upcoming_shows, 0);
}

#[tokio::test]
async fn empty_search_returns_every_venue_once() {
  let s = store().await;
  s.add_venue(new_venue("The Musical Hop", "SF", "CA")).await.unwrap();
  s.add_venue(new_venue("The Dueling Pianos Bar", "NY", "NY")).await.unwrap();
  s.add_venue(new_venue("Park Square Live Music & Coffee", "SF", "CA"))
    .await
    .unwrap();

  let results = query::search_venues_by_name(&s, "", None).await.unwrap();
  assert_eq!(results.count, 3);
  let mut ids: Vec<i64> = results.data.iter().map(|v| v.id).collect();
  ids.dedup();
  assert_eq!(ids.len(), 3);
}

#[tokio::test]
async fn venue_search_ignores_case() {
  let s = store().await;
  s.add_venue(new_venue("The Musical Hop", "SF", "CA")).await.unwrap();
  s.add_venue(new_venue("Park Square Live Music & Coffee", "SF", "CA"))
    .await
    .unwrap();

  let lower = query::search_venues_by_name(&s, "hop", Some(now())).await.unwrap();
  let upper = query::search_venues_by_name(&s, "HOP", Some(now())).await.unwrap();
  let mixed = query::search_venues_by_name(&s, "Hop", Some(now())).await.unwrap();
  assert_eq!(lower.count, 1);
  assert_eq!(lower, upper);
  assert_eq!(lower, mixed);

  let music = query::search_venues_by_name(&s, "Music", None).await.unwrap();
  assert_eq!(music.count, 2);
}

#[tokio::test]
async fn search_folds_non_ascii_case() {
  let s = store().await;
  s.add_venue(new_venue("Café Olé", "SF", "CA")).await.unwrap();
  s.add_venue(new_venue("The Musical Hop", "SF", "CA")).await.unwrap();
  s.add_artist(new_artist("Sigur Rós")).await.unwrap();

  for term in ["café", "CAFÉ", "Olé", "É O"] {
    let results = query::search_venues_by_name(&s, term, None).await.unwrap();
    assert_eq!(results.count, 1, "term {term:?}");
    assert_eq!(results.data[0].name, "Café Olé");
  }

  let ros = query::search_artists_by_name(&s, "RÓS", None).await.unwrap();
  assert_eq!(ros.count, 1);
  assert_eq!(ros.data[0].name, "Sigur Rós");
}

#[tokio::test]
async fn search_treats_wildcards_literally() {
  let s = store().await;
  s.add_venue(new_venue("100% Jazz", "SF", "CA")).await.unwrap();
  s.add_venue(new_venue("100 Jazz", "SF", "CA")).await.unwrap();
  s.add_venue(new_venue("Under_Ground", "SF", "CA")).await.unwrap();
  s.add_venue(new_venue("UnderXGround", "SF", "CA")).await.unwrap();

  let pct = query::search_venues_by_name(&s, "0%", None).await.unwrap();
  assert_eq!(pct.count, 1);
  assert_eq!(pct.data[0].name, "100% Jazz");

  let underscore = query::search_venues_by_name(&s, "r_g", None).await.unwrap();
  assert_eq!(underscore.count, 1);
  assert_eq!(underscore.data[0].name, "Under_Ground");
}

#[tokio::test]
async fn artist_search_counts_upcoming_shows() {
  let s = store().await;
  let venue = s.add_venue(new_venue("Hop", "SF", "CA")).await.unwrap();
  let petals = s.add_artist(new_artist("Guns N Petals")).await.unwrap();
  s.add_artist(new_artist("Matt Quevado")).await.unwrap();
  s.add_artist(new_artist("The Wild Sax Band")).await.unwrap();
  book(&s, petals.artist_id, venue.venue_id, now() + Duration::days(1)).await;
  book(&s, petals.artist_id, venue.venue_id, now() - Duration::days(1)).await;

  let a = query::search_artists_by_name(&s, "A", Some(now())).await.unwrap();
  assert_eq!(a.count, 3);
  assert_eq!(a.data[0].num_upcoming_shows, Some(1));

  let band = query::search_artists_by_name(&s, "band", Some(now())).await.unwrap();
  assert_eq!(band.count, 1);
  assert_eq!(band.data[0].name, "The Wild Sax Band");
}

#[tokio::test]
async fn detail_of_missing_artist_is_not_found() {
  let s = store().await;
  let err = query::build_entity_detail(&s, 77, Role::Artist, None)
    .await
    .unwrap_err();
  assert!(matches!(err, CoreError::ArtistNotFound(77)));
  assert!(err.is_not_found());
}

#[tokio::test]
async fn fresh_venue_detail_is_empty() {
  let s = store().await;
  let venue = s.add_venue(new_venue("Hop", "SF", "CA")).await.unwrap();

  let detail = query::build_entity_detail(&s, venue.venue_id, Role::Venue, None)
    .await
    .unwrap();
  assert_eq!(detail.profile, Profile::Venue(venue));
  assert!(detail.past_shows.is_empty());
  assert!(detail.upcoming_shows.is_empty());
  assert_eq!(detail.past_shows_count, 0);
  assert_eq!(detail.upcoming_shows_count, 0);
}

#[tokio::test]
async fn past_show_is_past_from_both_sides() {
  let s = store().await;
  let venue = s.add_venue(new_venue("Hop", "SF", "CA")).await.unwrap();
  let artist = s.add_artist(new_artist("Guns N Petals")).await.unwrap();
  let start = Utc.with_ymd_and_hms(2019, 5, 21, 21, 30, 0).unwrap();
  book(&s, artist.artist_id, venue.venue_id, start).await;

  let by_venue = query::build_entity_detail(&s, venue.venue_id, Role::Venue, Some(now()))
    .await
    .unwrap();
  assert_eq!(by_venue.past_shows.len(), 1);
  assert!(by_venue.upcoming_shows.is_empty());
  assert_eq!(by_venue.past_shows[0].id, artist.artist_id);
  assert_eq!(by_venue.past_shows[0].name, "Guns N Petals");
  assert_eq!(by_venue.past_shows[0].start_time, "Tue May 21 21:30:00 2019");

  let by_artist =
    query::build_entity_detail(&s, artist.artist_id, Role::Artist, Some(now()))
      .await
      .unwrap();
  assert_eq!(by_artist.past_shows.len(), 1);
  assert!(by_artist.upcoming_shows.is_empty());
  assert_eq!(by_artist.past_shows[0].id, venue.venue_id);
  assert_eq!(by_artist.past_shows[0].image_link, venue.image_link);
}

#[tokio::test]
async fn list_all_shows_carries_both_endpoints() {
  let s = store().await;
  let venue = s.add_venue(new_venue("Hop", "SF", "CA")).await.unwrap();
  let artist = s.add_artist(new_artist("Guns N Petals")).await.unwrap();
  book(&s, artist.artist_id, venue.venue_id, now()).await;

  let shows = query::list_all_shows(&s).await.unwrap();
  assert_eq!(shows.len(), 1);
  assert_eq!(shows[0].venue_id, venue.venue_id);
  assert_eq!(shows[0].venue_name, "Hop");
  assert_eq!(shows[0].artist_id, artist.artist_id);
  assert_eq!(shows[0].artist_image_link, artist.image_link);
  assert_eq!(shows[0].start_time, "Sat Oct 17 19:00:00 2026");
}

#[tokio::test]
async fn directory_stats_counts_entities() {
  let s = store().await;
  let venue = s.add_venue(new_venue("Hop", "SF", "CA")).await.unwrap();
  let artist = s.add_artist(new_artist("Guns N Petals")).await.unwrap();
  s.add_artist(new_artist("Matt Quevado")).await.unwrap();
  book(&s, artist.artist_id, venue.venue_id, now()).await;
  book(&s, artist.artist_id, venue.venue_id, now() - Duration::days(1)).await;

  let stats = query::directory_stats(&s, Some(now())).await.unwrap();
  assert_eq!(stats.venues, 1);
  assert_eq!(stats.artists, 2);
  assert_eq!(stats.upcoming_shows, 1);
}

// ─── Encoding ────────────────────────────────────────────────────────────────

#[test]
fn timestamps_sort_as_strings() {
  let early = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
  let late = early + Duration::milliseconds(500);
  let later = late + Duration::nanoseconds(1);
  assert!(encode_dt(early).unwrap() < encode_dt(late).unwrap());
  assert!(encode_dt(late).unwrap() < encode_dt(later).unwrap());
  assert_eq!(encode_dt(early).unwrap(), "2026-01-01T00:00:00.000000000Z");
  assert_eq!(decode_dt(&encode_dt(later).unwrap()).unwrap(), later);
}

#[test]
fn timestamps_need_four_digit_years() {
  let max = Utc.with_ymd_and_hms(9999, 12, 31, 23, 59, 59).unwrap();
  assert_eq!(encode_dt(max).unwrap(), "9999-12-31T23:59:59.000000000Z");

  let far = Utc.with_ymd_and_hms(10000, 1, 1, 0, 0, 0).unwrap();
  assert!(matches!(encode_dt(far), Err(Error::TimestampOutOfRange(_))));
  let before = Utc.with_ymd_and_hms(-1, 1, 1, 0, 0, 0).unwrap();
  assert!(matches!(encode_dt(before), Err(Error::TimestampOutOfRange(_))));
}

#[test]
fn legacy_genre_strings_decode() {
  assert_eq!(decode_genres("{Jazz,Reggae,Swing}").unwrap(), ["Jazz", "Reggae", "Swing"]);
  assert_eq!(
    decode_genres(r#"{Jazz,"Musical Theatre"}"#).unwrap(),
    ["Jazz", "Musical Theatre"]
  );
  assert!(decode_genres("{}").unwrap().is_empty());
  assert!(decode_genres("").unwrap().is_empty());
  assert_eq!(decode_genres(r#"["Hip-Hop","R&B"]"#).unwrap(), ["Hip-Hop", "R&B"]);
}
