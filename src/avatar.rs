//! Per-row avatar resolution with a placeholder fallback.

use std::collections::HashMap;
use std::sync::Arc;

use futures::StreamExt;
use tokio::sync::mpsc;

use crate::api::FuturamaClient;
use crate::api::types::Character;
use crate::event::{AppEvent, Event};
use crate::screen::FetchTicket;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvatarState {
    Pending,
    Loaded,
    Fallback,
}

/// Avatar state for the rows of the current list, keyed by character id.
#[derive(Debug)]
pub struct AvatarBook {
    ticket: Option<FetchTicket>,
    states: HashMap<i64, AvatarState>,
    fallback_url: String,
}

impl AvatarBook {
    pub fn new(fallback_url: impl Into<String>) -> Self {
        Self {
            ticket: None,
            states: HashMap::new(),
            fallback_url: fallback_url.into(),
        }
    }

    /// Start tracking a freshly applied list.
    ///
    /// With `check` off every row is taken as loaded.
    pub fn reset(&mut self, ticket: FetchTicket, characters: &[Character], check: bool) {
        let initial = if check {
            AvatarState::Pending
        } else {
            AvatarState::Loaded
        };
        self.ticket = Some(ticket);
        self.states = characters
            .iter()
            .map(|c| (c.id, initial.clone()))
            .collect();
    }

    /// Record one row's check result. Results for an older list are ignored.
    pub fn resolve(&mut self, ticket: FetchTicket, id: i64, ok: bool) -> bool {
        if self.ticket != Some(ticket) {
            return false;
        }
        let Some(state) = self.states.get_mut(&id) else {
            return false;
        };
        *state = if ok {
            AvatarState::Loaded
        } else {
            AvatarState::Fallback
        };
        true
    }

    pub fn state(&self, id: i64) -> AvatarState {
        self.states.get(&id).cloned().unwrap_or(AvatarState::Pending)
    }

    /// URL the row should display.
    pub fn source<'a>(&'a self, character: &'a Character) -> &'a str {
        match self.state(character.id) {
            AvatarState::Fallback => &self.fallback_url,
            AvatarState::Pending | AvatarState::Loaded => &character.image,
        }
    }
}

/// Check every row's image with bounded concurrency, posting one
/// [`AppEvent::AvatarChecked`] per row as each finishes.
pub async fn check_avatars(
    client: Arc<FuturamaClient>,
    ticket: FetchTicket,
    rows: Vec<(i64, String)>,
    concurrency: usize,
    sender: mpsc::UnboundedSender<Event>,
) {
    let checks = rows.into_iter().map(|(id, url)| {
        let client = Arc::clone(&client);
        async move {
            let result = client.check_image(&url).await;
            if let Err(ref e) = result {
                tracing::debug!(id, %url, "avatar unavailable: {e}");
            }
            (id, result.is_ok())
        }
    });

    let mut results = futures::stream::iter(checks).buffer_unordered(concurrency.max(1));
    while let Some((id, ok)) = results.next().await {
        if sender
            .send(Event::App(Box::new(AppEvent::AvatarChecked { ticket, id, ok })))
            .is_err()
        {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{Gender, Status};
    use crate::screen::ScreenState;

    fn character(id: i64, image: &str) -> Character {
        Character {
            id,
            name: format!("c{id}"),
            gender: Gender::default(),
            status: Status::default(),
            species: String::new(),
            created_at: None,
            image: image.to_string(),
        }
    }

    #[test]
    fn fallback_is_per_row() {
        let mut screen = ScreenState::new();
        let ticket = screen.begin_fetch();
        let rows = vec![character(1, "https://a/1.png"), character(2, "https://a/2.png")];

        let mut book = AvatarBook::new("https://fallback/avatar.svg");
        book.reset(ticket, &rows, true);
        assert!(book.resolve(ticket, 1, false));
        assert!(book.resolve(ticket, 2, true));

        assert_eq!(book.source(&rows[0]), "https://fallback/avatar.svg");
        assert_eq!(book.source(&rows[1]), "https://a/2.png");
    }

    #[test]
    fn results_for_replaced_list_are_ignored() {
        let mut screen = ScreenState::new();
        let old = screen.begin_fetch();
        let new = screen.begin_fetch();
        let rows = vec![character(1, "https://a/1.png")];

        let mut book = AvatarBook::new("fb");
        book.reset(old, &rows, true);
        book.reset(new, &rows, true);

        assert!(!book.resolve(old, 1, false));
        assert_eq!(book.state(1), AvatarState::Pending);
        assert_eq!(book.source(&rows[0]), "https://a/1.png");
    }

    #[test]
    fn unchecked_rows_start_loaded() {
        let mut screen = ScreenState::new();
        let ticket = screen.begin_fetch();
        let rows = vec![character(7, "x")];
        let mut book = AvatarBook::new("fb");
        book.reset(ticket, &rows, false);
        assert_eq!(book.state(7), AvatarState::Loaded);
    }

    #[tokio::test]
    async fn check_posts_one_event_per_row() {
        let client = Arc::new(FuturamaClient::new(&crate::config::AppConfig::default()).unwrap());
        let mut screen = ScreenState::new();
        let ticket = screen.begin_fetch();
        let (tx, mut rx) = mpsc::unbounded_channel();

        // Unparsable URLs fail without touching the network.
        let rows = vec![(1, "bad".to_string()), (2, "also bad".to_string())];
        check_avatars(client, ticket, rows, 4, tx).await;

        let mut seen = Vec::new();
        while let Ok(Event::App(event)) = rx.try_recv() {
            if let AppEvent::AvatarChecked { id, ok, .. } = *event {
                assert!(!ok);
                seen.push(id);
            }
        }
        seen.sort();
        assert_eq!(seen, [1, 2]);
    }
}
