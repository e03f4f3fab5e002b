//! Screen state and the loading/error/empty/populated selection.

use crate::api::types::Character;
use crate::labels;

/// Sequence number handed out when a fetch starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The list was replaced.
    Applied,
    /// The fetch failed; the previous list is kept but hidden behind the error.
    Failed,
    /// A newer fetch was started after this one; nothing changed.
    Stale,
}

/// What the main area shows for the current state.
#[derive(Debug, PartialEq, Eq)]
pub enum ScreenView<'a> {
    Loading,
    Error(&'a str),
    Empty,
    Populated(&'a [Character]),
}

#[derive(Debug)]
pub struct ScreenState {
    pub characters: Vec<Character>,
    pub loading: bool,
    /// Empty means no error.
    pub error: String,
    latest: u64,
}

impl Default for ScreenState {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreenState {
    pub fn new() -> Self {
        Self {
            characters: Vec::new(),
            loading: true,
            error: String::new(),
            latest: 0,
        }
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.latest += 1;
        self.loading = true;
        self.error.clear();
        FetchTicket(self.latest)
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.0 == self.latest
    }

    pub fn finish_fetch<E>(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Character>, E>,
    ) -> FetchOutcome {
        if !self.is_current(ticket) {
            return FetchOutcome::Stale;
        }

        self.loading = false;
        match result {
            Ok(characters) => {
                self.characters = characters;
                FetchOutcome::Applied
            }
            Err(_) => {
                self.error = labels::LOAD_FAILED.to_string();
                FetchOutcome::Failed
            }
        }
    }

    pub fn view(&self) -> ScreenView<'_> {
        if self.loading {
            ScreenView::Loading
        } else if !self.error.is_empty() {
            ScreenView::Error(&self.error)
        } else if self.characters.is_empty() {
            ScreenView::Empty
        } else {
            ScreenView::Populated(&self.characters)
        }
    }

    /// Number of rows on screen.
    pub fn visible_rows(&self) -> usize {
        match self.view() {
            ScreenView::Populated(rows) => rows.len(),
            _ => 0,
        }
    }
}
