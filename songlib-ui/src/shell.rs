//! Interactive terminal shell
//!
//! Line-oriented front end over a [`CatalogHandle`]. The shell keeps only
//! presentation-local state: the search filter, the draft of the song being
//! edited and a pending delete confirmation. Everything else is read from
//! catalog snapshots.

use songlib_common::Song;
use tracing::debug;

use crate::effects::CatalogHandle;
use crate::error::Result;
use crate::events::{CatalogEvent, ModalMode};
use crate::store::CatalogState;
use crate::view::form::{genre_list, FormField};
use crate::view::render::{render_catalog, render_form, render_song_details};
use crate::view::{filter_songs, SongForm};

pub const HELP: &str = "\
Commands:
  list [page]          load a page (default: current page)
  page <n>             load page n
  next | prev          load the adjacent page
  search [term]        filter the loaded page; no term clears the filter
  add                  open the form for a new song
  edit <n>             edit song n of the list
  view <n>             show details of song n
  delete <n>           delete song n (asks for confirmation)
  set <field> <value>  edit the open form (title, artist, album, year, genre, duration)
  save                 submit the open form
  cancel | close       close the open dialog, discarding the draft
  dismiss              hide the current error
  show                 redraw the screen
  help                 this text
  quit                 leave";

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List(Option<u32>),
    Next,
    Prev,
    Search(Option<String>),
    Add,
    Edit(usize),
    View(usize),
    Delete(usize),
    Set { field: FormField, value: String },
    Save,
    Close,
    Dismiss,
    Show,
    Help,
    Quit,
}

impl Command {
    /// Parse a line; `Ok(None)` for blank input, `Err` carries a usage message
    pub fn parse(line: &str) -> std::result::Result<Option<Command>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "list" | "ls" if rest.is_empty() => Command::List(None),
            "list" | "ls" | "page" => Command::List(Some(parse_page(rest)?)),
            "next" | "n" => Command::Next,
            "prev" | "p" => Command::Prev,
            "search" | "find" | "/" => {
                if rest.is_empty() {
                    Command::Search(None)
                } else {
                    Command::Search(Some(rest.to_string()))
                }
            }
            "add" | "new" => Command::Add,
            "edit" => Command::Edit(parse_index(rest)?),
            "view" => Command::View(parse_index(rest)?),
            "delete" | "rm" => Command::Delete(parse_index(rest)?),
            "set" => {
                let (field, value) = rest
                    .split_once(char::is_whitespace)
                    .map(|(f, v)| (f, v.trim()))
                    .unwrap_or((rest, ""));
                if field.is_empty() {
                    return Err("usage: set <field> <value>".to_string());
                }
                let field = field.parse::<FormField>().map_err(|e| e.to_string())?;
                Command::Set {
                    field,
                    value: value.to_string(),
                }
            }
            "save" | "submit" => Command::Save,
            "cancel" | "close" => Command::Close,
            "dismiss" => Command::Dismiss,
            "show" | "refresh" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(format!("Unknown command '{}'. Type `help`.", other)),
        };
        Ok(Some(command))
    }
}

fn parse_page(raw: &str) -> std::result::Result<u32, String> {
    match raw.parse::<u32>() {
        Ok(page) if page >= 1 => Ok(page),
        _ => Err(format!("Invalid page '{}': pages start at 1", raw)),
    }
}

fn parse_index(raw: &str) -> std::result::Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(index) if index >= 1 => Ok(index),
        _ => Err(format!("Expected a song number from the list, got '{}'", raw)),
    }
}

/// Whether the shell should keep reading input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Draft being edited in an open create/edit dialog
#[derive(Debug, Clone)]
struct FormSession {
    mode: ModalMode,
    /// Song being edited; `None` when creating
    song_id: Option<String>,
    draft: SongForm,
    /// `modal_opens` value once this dialog's open has been applied
    opened_at: u64,
}

pub struct Shell {
    handle: CatalogHandle,
    page_size: u32,
    current_page: u32,
    filter: String,
    form: Option<FormSession>,
    pending_delete: Option<Song>,
    /// Dialog opens dispatched by this shell
    opens_sent: u64,
    was_loading: bool,
    last_screen: String,
}

impl Shell {
    pub fn new(handle: CatalogHandle, page_size: u32) -> Self {
        Self {
            handle,
            page_size: page_size.max(1),
            current_page: 1,
            filter: String::new(),
            form: None,
            pending_delete: None,
            opens_sent: 0,
            was_loading: false,
            last_screen: String::new(),
        }
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn draft(&self) -> Option<&SongForm> {
        self.form.as_ref().map(|session| &session.draft)
    }

    /// Request the first page
    pub async fn start(&mut self) -> Result<()> {
        self.fetch(1).await
    }

    /// Handle one input line and return the text to print
    pub async fn handle_line(&mut self, line: &str) -> Result<(Flow, String)> {
        if let Some(song) = self.pending_delete.take() {
            let answer = line.trim().to_ascii_lowercase();
            if answer == "y" || answer == "yes" {
                debug!(id = %song.id, "Delete confirmed");
                self.handle
                    .dispatch(CatalogEvent::DeleteRequested(song.id.clone()))
                    .await?;
                return Ok((Flow::Continue, format!("Deleting \"{}\"...", song.title)));
            }
            return Ok((Flow::Continue, "Delete cancelled".to_string()));
        }

        let command = match Command::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok((Flow::Continue, String::new())),
            Err(usage) => return Ok((Flow::Continue, usage)),
        };

        self.execute(command).await
    }

    async fn execute(&mut self, command: Command) -> Result<(Flow, String)> {
        let state = self.handle.snapshot();
        self.discard_closed_form(&state);

        let output = match command {
            Command::List(page) => {
                self.fetch(page.unwrap_or(self.current_page)).await?;
                String::new()
            }
            Command::Next => match state.pagination {
                Some(p) if p.has_next => {
                    self.fetch(p.page + 1).await?;
                    String::new()
                }
                _ => "Already on the last page".to_string(),
            },
            Command::Prev => match state.pagination {
                Some(p) if p.has_prev => {
                    self.fetch(p.page - 1).await?;
                    String::new()
                }
                _ => "Already on the first page".to_string(),
            },
            Command::Search(term) => {
                self.filter = term.unwrap_or_default();
                self.remember(render_catalog(&state, &self.filter))
            }
            Command::Add => {
                self.open_form(ModalMode::Create, None).await?;
                self.form_screen(&state)
            }
            Command::Edit(number) => match self.song_at(&state, number) {
                Some(song) => {
                    self.open_form(ModalMode::Edit, Some(song)).await?;
                    self.form_screen(&state)
                }
                None => no_such_song(number),
            },
            Command::View(number) => match self.song_at(&state, number) {
                Some(song) => {
                    let details = render_song_details(&song);
                    self.opens_sent += 1;
                    self.handle
                        .dispatch(CatalogEvent::OpenModal {
                            mode: ModalMode::View,
                            song: Some(song),
                        })
                        .await?;
                    self.form = None;
                    self.remember(format!("{}\n`close` to return", details))
                }
                None => no_such_song(number),
            },
            Command::Delete(number) => match self.song_at(&state, number) {
                Some(song) => {
                    let prompt = format!("Are you sure you want to delete \"{}\"? (y/N)", song.title);
                    self.pending_delete = Some(song);
                    prompt
                }
                None => no_such_song(number),
            },
            Command::Set { field, value } => match self.form.as_mut() {
                Some(session) => match session.draft.set(field, &value) {
                    Ok(()) => self.form_screen(&state),
                    Err(e) => format!("{}\nGenres: {}", e, genre_list()),
                },
                None => "No form is open. Use `add` or `edit <n>` first.".to_string(),
            },
            Command::Save => self.save().await?,
            Command::Close => {
                self.form = None;
                self.handle.dispatch(CatalogEvent::CloseModal).await?;
                let mut closed = state;
                closed.modal = None;
                closed.selected_song = None;
                closed.error = None;
                self.remember(render_catalog(&closed, &self.filter))
            }
            Command::Dismiss => {
                self.handle.dispatch(CatalogEvent::ClearError).await?;
                String::new()
            }
            Command::Show => self.remember(self.render(&state)),
            Command::Help => HELP.to_string(),
            Command::Quit => return Ok((Flow::Quit, String::new())),
        };

        Ok((Flow::Continue, output))
    }

    async fn fetch(&mut self, page: u32) -> Result<()> {
        self.current_page = page;
        self.handle
            .dispatch(CatalogEvent::FetchRequested {
                page,
                limit: self.page_size,
            })
            .await
    }

    async fn open_form(&mut self, mode: ModalMode, song: Option<Song>) -> Result<()> {
        let draft = song.as_ref().map(SongForm::from_song).unwrap_or_default();
        self.opens_sent += 1;
        self.form = Some(FormSession {
            mode,
            song_id: song.as_ref().map(|s| s.id.clone()),
            draft,
            opened_at: self.opens_sent,
        });
        self.handle
            .dispatch(CatalogEvent::OpenModal { mode, song })
            .await
    }

    async fn save(&mut self) -> Result<String> {
        let Some(session) = self.form.as_ref() else {
            return Ok("No form is open. Use `add` or `edit <n>` first.".to_string());
        };

        if !session.draft.is_valid() {
            return Ok(format!(
                "Missing: {}",
                session.draft.missing_fields().join(", ")
            ));
        }

        let event = match (session.mode, &session.song_id) {
            (ModalMode::Edit, Some(id)) => CatalogEvent::UpdateRequested {
                id: id.clone(),
                changes: session.draft.to_update_request(),
            },
            _ => CatalogEvent::CreateRequested(session.draft.to_create_request()),
        };

        self.handle.dispatch(event).await?;
        Ok("Saving...".to_string())
    }

    /// Song `number` (1-based) of the list as currently shown
    fn song_at(&self, state: &CatalogState, number: usize) -> Option<Song> {
        filter_songs(&state.songs, &self.filter)
            .get(number.checked_sub(1)?)
            .map(|song| (*song).clone())
    }

    /// React to a new snapshot; returns the text to print, if any
    ///
    /// Drops the draft once its dialog has closed (after a successful save,
    /// for instance), even if no snapshot ever showed it open.
    pub fn on_snapshot(&mut self, state: &CatalogState) -> Option<String> {
        self.discard_closed_form(state);

        let was_loading = std::mem::replace(&mut self.was_loading, state.loading);
        if state.loading {
            return (!was_loading).then(|| "Loading...".to_string());
        }

        let screen = self.render(state);
        if screen == self.last_screen {
            return None;
        }
        Some(self.remember(screen))
    }

    /// Forget the draft when `state` shows its dialog opened and closed again
    ///
    /// Assumes this shell is the only one opening dialogs on its handle.
    fn discard_closed_form(&mut self, state: &CatalogState) {
        let closed = self.form.as_ref().is_some_and(|session| {
            state.modal_opens >= session.opened_at && !state.is_modal_open()
        });
        if closed {
            debug!("Dialog closed, discarding draft");
            self.form = None;
        }
    }

    fn form_screen(&mut self, state: &CatalogState) -> String {
        let screen = match &self.form {
            Some(session) => render_form(session.mode, &session.draft, state),
            None => return String::new(),
        };
        self.remember(screen)
    }

    /// Record `screen` as the last full screen shown
    fn remember(&mut self, screen: String) -> String {
        self.last_screen.clone_from(&screen);
        screen
    }

    /// Screen for the current state
    pub fn render(&self, state: &CatalogState) -> String {
        match (state.modal_mode(), &self.form, &state.selected_song) {
            (Some(ModalMode::Create | ModalMode::Edit), Some(session), _) => {
                render_form(session.mode, &session.draft, state)
            }
            (Some(ModalMode::View), _, Some(song)) => {
                format!("{}\n`close` to return", render_song_details(song))
            }
            _ => render_catalog(state, &self.filter),
        }
    }
}

fn no_such_song(number: usize) -> String {
    format!("No song number {} in the list", number)
}
