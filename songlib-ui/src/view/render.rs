//! Text rendering of catalog snapshots

use songlib_common::human_time::format_duration;
use songlib_common::{PaginationInfo, Song};

use super::filter::filter_songs;
use super::form::SongForm;
use super::pager::{visible_pages, PageItem};
use crate::events::ModalMode;
use crate::store::CatalogState;

/// Main list screen: header, error banner, cards or empty state, page strip
///
/// Card numbers refer to the filtered list, which is what `edit <n>` and
/// friends resolve against.
pub fn render_catalog(state: &CatalogState, filter: &str) -> String {
    let mut lines = vec![
        "My Music Library".to_string(),
        "Discover and manage your favorite songs".to_string(),
        String::new(),
    ];

    if !filter.is_empty() {
        lines.push(format!("Search: \"{}\"", filter));
    }

    if let Some(error) = &state.error {
        lines.push(format!("! {}", error));
    }

    if state.loading && state.songs.is_empty() {
        lines.push("Loading your music...".to_string());
        return lines.join("\n");
    }

    let visible = filter_songs(&state.songs, filter);

    if visible.is_empty() && !state.loading {
        if filter.is_empty() {
            lines.push("No songs in your library".to_string());
            lines.push(
                "Start building your music collection by adding your first song! (type `add`)"
                    .to_string(),
            );
        } else {
            lines.push("No songs found".to_string());
            lines.push(format!(
                "No songs match \"{}\". Try a different search term.",
                filter
            ));
        }
    } else {
        for (index, song) in visible.iter().enumerate() {
            lines.push(render_song_card(index + 1, song));
        }

        if let Some(pagination) = &state.pagination {
            if filter.is_empty() {
                if let Some(strip) = render_pager(pagination) {
                    lines.push(String::new());
                    lines.push(strip);
                }
            }
        }
    }

    if state.loading {
        lines.push("Loading...".to_string());
    }

    lines.join("\n")
}

/// Two-line summary of one song
pub fn render_song_card(number: usize, song: &Song) -> String {
    format!(
        "{:>3}. {} by {}\n     {} | {} | {} | {}",
        number,
        song.title,
        song.artist,
        song.album,
        song.genre,
        format_duration(song.duration),
        song.year
    )
}

/// Page strip, or `None` when there is at most one page
pub fn render_pager(pagination: &PaginationInfo) -> Option<String> {
    let pages = visible_pages(pagination.page, pagination.total_pages);
    if pages.is_empty() {
        return None;
    }

    let mut parts = Vec::with_capacity(pages.len() + 2);
    if pagination.has_prev {
        parts.push("< prev".to_string());
    }
    for item in pages {
        parts.push(match item {
            PageItem::Page(page) if page == pagination.page => format!("[{}]", page),
            PageItem::Page(page) => page.to_string(),
            PageItem::Gap => "...".to_string(),
        });
    }
    if pagination.has_next {
        parts.push("next >".to_string());
    }

    Some(format!(
        "{}   Page {} of {}",
        parts.join(" "),
        pagination.page,
        pagination.total_pages
    ))
}

/// Read-only details dialog
pub fn render_song_details(song: &Song) -> String {
    [
        format!("Title:    {}", song.title),
        format!("Artist:   {}", song.artist),
        format!("Album:    {}", song.album),
        format!("Year:     {}", song.year),
        format!("Genre:    {}", song.genre),
        format!("Duration: {}", format_duration(song.duration)),
        format!("Added:    {}", song.created_at.format("%Y-%m-%d %H:%M UTC")),
        format!("Updated:  {}", song.updated_at.format("%Y-%m-%d %H:%M UTC")),
    ]
    .join("\n")
}

/// Create/edit dialog with the current draft
pub fn render_form(mode: ModalMode, form: &SongForm, state: &CatalogState) -> String {
    let title = match mode {
        ModalMode::Create => "Add New Song",
        _ => "Edit Song",
    };

    let mut lines = vec![title.to_string()];
    if let Some(error) = &state.error {
        lines.push(format!("! {}", error));
    }

    let or_dash = |value: &str| {
        if value.is_empty() {
            "-".to_string()
        } else {
            value.to_string()
        }
    };
    lines.push(format!("  title *    {}", or_dash(&form.title)));
    lines.push(format!("  artist *   {}", or_dash(&form.artist)));
    lines.push(format!("  album *    {}", or_dash(&form.album)));
    lines.push(format!("  year       {}", form.year));
    lines.push(format!("  genre *    {}", or_dash(&form.genre)));
    lines.push(format!("  duration   {}", form.duration_display()));

    let action = match mode {
        ModalMode::Create => "Add Song",
        _ => "Update Song",
    };
    if state.loading {
        lines.push("Saving...".to_string());
    } else if form.is_valid() {
        lines.push(format!("`save` to {}, `cancel` to discard", action));
    } else {
        lines.push(format!("Missing: {}", form.missing_fields().join(", ")));
    }

    lines.join("\n")
}
