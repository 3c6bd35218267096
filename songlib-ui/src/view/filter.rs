//! Local search over the loaded page

use songlib_common::Song;

/// Songs whose title, artist, album or genre contains `term`
///
/// Case-insensitive substring match; an empty term keeps everything. Only
/// the songs already loaded are searched.
pub fn filter_songs<'a>(songs: &'a [Song], term: &str) -> Vec<&'a Song> {
    if term.is_empty() {
        return songs.iter().collect();
    }

    let needle = term.to_lowercase();
    songs
        .iter()
        .filter(|song| {
            [&song.title, &song.artist, &song.album, &song.genre]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}
