//! Song editing form
//!
//! Field edits are buffered here until the user saves; nothing reaches the
//! store before that. The draft is thrown away when the dialog closes.

use chrono::Datelike;
use songlib_common::genres::{canonical_genre, GENRES};
use songlib_common::human_time::{format_duration, parse_duration, parse_leading_int};
use songlib_common::{CreateSongRequest, Song, UpdateSongRequest};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Unknown field '{0}' (expected title, artist, album, year, genre or duration)")]
    UnknownField(String),

    #[error("Unknown genre '{0}'")]
    UnknownGenre(String),
}

/// Editable song fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Artist,
    Album,
    Year,
    Genre,
    Duration,
}

impl FromStr for FormField {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "title" => Ok(FormField::Title),
            "artist" => Ok(FormField::Artist),
            "album" => Ok(FormField::Album),
            "year" => Ok(FormField::Year),
            "genre" => Ok(FormField::Genre),
            "duration" => Ok(FormField::Duration),
            _ => Err(FormError::UnknownField(s.to_string())),
        }
    }
}

/// Draft of a song being created or edited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongForm {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub year: i32,
    pub genre: String,
    /// Whole seconds
    pub duration: u32,
}

impl SongForm {
    /// Empty draft dated to the current year
    pub fn blank() -> Self {
        Self {
            title: String::new(),
            artist: String::new(),
            album: String::new(),
            year: chrono::Local::now().year(),
            genre: String::new(),
            duration: 0,
        }
    }

    /// Draft prefilled from an existing song
    pub fn from_song(song: &Song) -> Self {
        Self {
            title: song.title.clone(),
            artist: song.artist.clone(),
            album: song.album.clone(),
            year: song.year,
            genre: song.genre.clone(),
            duration: song.duration,
        }
    }

    /// Update one field from user text
    ///
    /// `year` reads a leading integer (0 when there is none), `duration`
    /// takes `M:SS` or plain seconds, `genre` must name one of the fixed
    /// genres.
    pub fn set(&mut self, field: FormField, value: &str) -> Result<(), FormError> {
        match field {
            FormField::Title => self.title = value.to_string(),
            FormField::Artist => self.artist = value.to_string(),
            FormField::Album => self.album = value.to_string(),
            FormField::Year => {
                let year = parse_leading_int(value).unwrap_or(0);
                self.year = year.clamp(i32::MIN as i64, i32::MAX as i64) as i32;
            }
            FormField::Genre => {
                if value.trim().is_empty() {
                    self.genre.clear();
                } else {
                    let genre = canonical_genre(value)
                        .ok_or_else(|| FormError::UnknownGenre(value.to_string()))?;
                    self.genre = genre.to_string();
                }
            }
            FormField::Duration => self.duration = parse_duration(value),
        }
        Ok(())
    }

    pub fn duration_display(&self) -> String {
        format_duration(self.duration)
    }

    /// Mandatory fields still blank
    pub fn missing_fields(&self) -> Vec<&'static str> {
        self.to_create_request().missing_fields()
    }

    /// Title, artist, album and genre are all present
    pub fn is_valid(&self) -> bool {
        self.missing_fields().is_empty()
    }

    pub fn to_create_request(&self) -> CreateSongRequest {
        CreateSongRequest {
            title: self.title.clone(),
            artist: self.artist.clone(),
            album: self.album.clone(),
            year: self.year,
            genre: self.genre.clone(),
            duration: self.duration,
        }
    }

    /// Update carrying every field of the draft
    pub fn to_update_request(&self) -> UpdateSongRequest {
        UpdateSongRequest::from(self.to_create_request())
    }
}

impl Default for SongForm {
    fn default() -> Self {
        Self::blank()
    }
}

/// Genre list for help output
pub fn genre_list() -> String {
    GENRES.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_form_is_invalid() {
        let form = SongForm::blank();
        assert_eq!(form.year, chrono::Local::now().year());
        assert_eq!(form.duration, 0);
        assert!(!form.is_valid());
        assert_eq!(form.missing_fields(), vec!["title", "artist", "album", "genre"]);
    }

    #[test]
    fn test_set_fields_until_valid() {
        let mut form = SongForm::blank();
        form.set(FormField::Title, "Hey Jude").unwrap();
        form.set(FormField::Artist, "The Beatles").unwrap();
        form.set(FormField::Album, "Single").unwrap();
        assert!(!form.is_valid());

        form.set(FormField::Genre, "rock").unwrap();
        assert_eq!(form.genre, "Rock");
        assert!(form.is_valid());
    }

    #[test]
    fn test_duration_and_year_parsing() {
        let mut form = SongForm::blank();

        form.set(FormField::Duration, "7:11").unwrap();
        assert_eq!(form.duration, 431);
        assert_eq!(form.duration_display(), "7:11");

        form.set(FormField::Duration, "95").unwrap();
        assert_eq!(form.duration, 95);

        form.set(FormField::Duration, "soon").unwrap();
        assert_eq!(form.duration, 0);

        form.set(FormField::Year, "1968").unwrap();
        assert_eq!(form.year, 1968);

        form.set(FormField::Year, "unknown").unwrap();
        assert_eq!(form.year, 0);
    }

    #[test]
    fn test_unknown_genre_is_rejected() {
        let mut form = SongForm::blank();
        let err = form.set(FormField::Genre, "Polka").unwrap_err();
        assert_eq!(err, FormError::UnknownGenre("Polka".to_string()));
        assert!(form.genre.is_empty());
    }

    #[test]
    fn test_field_names() {
        assert_eq!("Duration".parse::<FormField>().unwrap(), FormField::Duration);
        assert!(matches!(
            "bpm".parse::<FormField>(),
            Err(FormError::UnknownField(_))
        ));
    }

    #[test]
    fn test_update_request_carries_all_fields() {
        let mut form = SongForm::blank();
        form.set(FormField::Title, "T").unwrap();
        let update = form.to_update_request();
        assert_eq!(update.title.as_deref(), Some("T"));
        assert_eq!(update.year, Some(form.year));
        assert_eq!(update.duration, Some(0));
    }
}
