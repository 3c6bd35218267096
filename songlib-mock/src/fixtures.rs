//! Fixture songs seeded into the mock backend at startup
//!
//! Text fields cycle through fixed tables; year and duration come from a
//! seeded RNG so a given seed always produces the same catalog.

use chrono::Utc;
use rand::{rngs::StdRng, Rng, SeedableRng};
use songlib_common::Song;
use uuid::Uuid;

/// Number of songs seeded when not configured
pub const DEFAULT_SEED_COUNT: usize = 50;

/// RNG seed used when not configured
pub const DEFAULT_RNG_SEED: u64 = 42;

const TITLES: [&str; 20] = [
    "Bohemian Rhapsody",
    "Stairway to Heaven",
    "Hotel California",
    "Imagine",
    "Sweet Child O' Mine",
    "Billie Jean",
    "Like a Rolling Stone",
    "Smells Like Teen Spirit",
    "Purple Haze",
    "Good Vibrations",
    "Respect",
    "Hey Jude",
    "What's Going On",
    "Born to Run",
    "London Calling",
    "Thriller",
    "The Sound of Silence",
    "Yesterday",
    "A Day in the Life",
    "Satisfaction",
];

const ARTISTS: [&str; 20] = [
    "Queen",
    "Led Zeppelin",
    "Eagles",
    "John Lennon",
    "Guns N' Roses",
    "Michael Jackson",
    "Bob Dylan",
    "Nirvana",
    "Jimi Hendrix",
    "The Beach Boys",
    "Aretha Franklin",
    "The Beatles",
    "Marvin Gaye",
    "Bruce Springsteen",
    "The Clash",
    "Michael Jackson",
    "Simon & Garfunkel",
    "The Beatles",
    "The Beatles",
    "The Rolling Stones",
];

const ALBUMS: [&str; 20] = [
    "A Night at the Opera",
    "Led Zeppelin IV",
    "Hotel California",
    "Imagine",
    "Appetite for Destruction",
    "Thriller",
    "Highway 61 Revisited",
    "Nevermind",
    "Are You Experienced",
    "Pet Sounds",
    "I Never Loved a Man",
    "Abbey Road",
    "What's Going On",
    "Born to Run",
    "London Calling",
    "Thriller",
    "The Sound of Silence",
    "Yesterday and Today",
    "Sgt. Pepper's",
    "Out of Our Heads",
];

const FIXTURE_GENRES: [&str; 12] = [
    "Rock",
    "Pop",
    "Hip Hop",
    "Jazz",
    "Classical",
    "Electronic",
    "Country",
    "R&B",
    "Folk",
    "Blues",
    "Reggae",
    "Metal",
];

/// Build `count` fixture songs
///
/// Years fall in 1960..=2022 and durations in 120..=359 seconds.
pub fn seed_songs(count: usize, rng_seed: u64) -> Vec<Song> {
    let mut rng = StdRng::seed_from_u64(rng_seed);
    let now = Utc::now();

    (0..count)
        .map(|i| Song {
            id: Uuid::new_v4().to_string(),
            title: TITLES[i % TITLES.len()].to_string(),
            artist: ARTISTS[i % ARTISTS.len()].to_string(),
            album: ALBUMS[i % ALBUMS.len()].to_string(),
            year: rng.random_range(1960..2023),
            genre: FIXTURE_GENRES[i % FIXTURE_GENRES.len()].to_string(),
            duration: rng.random_range(120..360),
            created_at: now,
            updated_at: now,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_count_and_unique_ids() {
        let songs = seed_songs(DEFAULT_SEED_COUNT, DEFAULT_RNG_SEED);
        assert_eq!(songs.len(), 50);

        let ids: HashSet<_> = songs.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_fields_cycle_through_tables() {
        let songs = seed_songs(21, DEFAULT_RNG_SEED);
        assert_eq!(songs[0].title, "Bohemian Rhapsody");
        assert_eq!(songs[20].title, "Bohemian Rhapsody");
        assert_eq!(songs[12].genre, "Rock");
    }

    #[test]
    fn test_ranges_and_determinism() {
        let a = seed_songs(30, 7);
        let b = seed_songs(30, 7);
        for (x, y) in a.iter().zip(&b) {
            assert!((1960..2023).contains(&x.year));
            assert!((120..360).contains(&x.duration));
            assert_eq!(x.year, y.year);
            assert_eq!(x.duration, y.duration);
        }
    }
}
