//! Genres offered by the song editing form
//!
//! The catalog itself accepts any genre string; only the form restricts input
//! to this list.

pub const GENRES: [&str; 15] = [
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
    "Punk",
    "Alternative",
    "Other",
];

/// Find the canonical spelling of a genre, ignoring case
///
/// ```
/// use songlib_common::genres::canonical_genre;
///
/// assert_eq!(canonical_genre("hip hop"), Some("Hip Hop"));
/// assert_eq!(canonical_genre("polka"), None);
/// ```
pub fn canonical_genre(input: &str) -> Option<&'static str> {
    let needle = input.trim();
    GENRES
        .iter()
        .copied()
        .find(|genre| genre.eq_ignore_ascii_case(needle))
}
