use std::sync::Arc;

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::DefaultTerminal;

use crate::api::{CharacterQuery, FuturamaClient};
use crate::avatar::{self, AvatarBook};
use crate::config::AppConfig;
use crate::event::{AppEvent, Event, EventHandler};
use crate::refresh::{RefreshControl, RefreshGesture};
use crate::screen::{FetchOutcome, FetchTicket, ScreenState};
use crate::ui;

/// Rows skipped by PageUp/PageDown.
const PAGE_STEP: usize = 5;

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    pub running: bool,
    pub events: EventHandler,
    pub config: AppConfig,

    // Data state
    pub screen: ScreenState,
    pub avatars: AvatarBook,
    pub refresher: RefreshControl,
    pub last_updated: Option<DateTime<Local>>,

    // View state
    pub selected_index: usize,
    pub show_help: bool,
    pub spinner_frame: usize,

    // API client (shared with spawned tasks)
    client: Arc<FuturamaClient>,
}

impl App {
    pub fn new(config: AppConfig, client: FuturamaClient) -> Self {
        let events = EventHandler::new(config.tick_rate_fps);
        Self::with_events(config, client, events)
    }

    pub fn with_events(config: AppConfig, client: FuturamaClient, events: EventHandler) -> Self {
        let avatars = AvatarBook::new(config.fallback_avatar_url.clone());
        Self {
            running: true,
            events,
            config,
            screen: ScreenState::new(),
            avatars,
            refresher: RefreshControl::default(),
            last_updated: None,
            selected_index: 0,
            show_help: false,
            spinner_frame: 0,
            client: Arc::new(client),
        }
    }

    // -- Main event loop ----------------------------------------------------

    pub async fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        // Initial load on mount.
        self.events.send(AppEvent::FetchCharacters { refresh: None });

        while self.running {
            terminal.draw(|frame| self.draw(frame))?;
            match self.events.next().await? {
                Event::Tick => self.tick(),
                Event::Crossterm(event) => {
                    if let crossterm::event::Event::Key(key) = event
                        && key.kind == crossterm::event::KeyEventKind::Press
                    {
                        self.handle_key_event(key);
                    }
                }
                Event::App(app_event) => self.handle_app_event(*app_event),
            }
        }
        Ok(())
    }

    fn draw(&self, frame: &mut ratatui::Frame) {
        ui::draw(frame, self);
    }

    fn tick(&mut self) {
        if self.screen.loading || self.refresher.is_refreshing() {
            self.spinner_frame = self.spinner_frame.wrapping_add(1);
        }
    }

    // -- Key event routing --------------------------------------------------

    fn handle_key_event(&mut self, key: KeyEvent) {
        // Ctrl-C always quits.
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c' | 'C'))
        {
            self.events.send(AppEvent::Quit);
            return;
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?' | 'q')) {
                self.events.send(AppEvent::ToggleHelp);
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.events.send(AppEvent::Quit);
            }
            KeyCode::Char('r') | KeyCode::F(5) => {
                self.pull_to_refresh();
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_selection_down(1);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_selection_up(1);
            }
            KeyCode::PageDown => {
                self.move_selection_down(PAGE_STEP);
            }
            KeyCode::PageUp => {
                self.move_selection_up(PAGE_STEP);
            }
            KeyCode::Char('g') | KeyCode::Home => {
                self.selected_index = 0;
            }
            KeyCode::Char('G') | KeyCode::End => {
                self.selected_index = self.screen.visible_rows().saturating_sub(1);
            }
            KeyCode::Char('?') => {
                self.events.send(AppEvent::ToggleHelp);
            }
            _ => {}
        }
    }

    /// Start a refresh gesture; the gesture rides along with its fetch.
    pub fn pull_to_refresh(&mut self) {
        let gesture = self.refresher.pull();
        self.events.send(AppEvent::FetchCharacters {
            refresh: Some(gesture),
        });
    }

    // -- Selection helpers --------------------------------------------------

    fn move_selection_down(&mut self, step: usize) {
        let count = self.screen.visible_rows();
        if count > 0 {
            self.selected_index = (self.selected_index + step).min(count - 1);
        }
    }

    fn move_selection_up(&mut self, step: usize) {
        self.selected_index = self.selected_index.saturating_sub(step);
    }

    // -- App event handling -------------------------------------------------

    pub fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Quit => {
                self.running = false;
            }
            AppEvent::ToggleHelp => {
                self.show_help = !self.show_help;
            }
            AppEvent::FetchCharacters { refresh } => {
                let ticket = self.screen.begin_fetch();
                self.dispatch_fetch(ticket, refresh);
            }
            AppEvent::CharactersLoaded {
                ticket,
                result,
                refresh,
            } => {
                match self.screen.finish_fetch(ticket, result) {
                    FetchOutcome::Applied => {
                        self.last_updated = Some(Local::now());
                        self.selected_index = self
                            .selected_index
                            .min(self.screen.characters.len().saturating_sub(1));
                        self.start_avatar_checks(ticket);
                    }
                    FetchOutcome::Failed => {}
                    FetchOutcome::Stale => {
                        tracing::debug!(?ticket, "discarding stale character list");
                    }
                }
                if let Some(gesture) = refresh {
                    self.refresher.complete(gesture);
                }
            }
            AppEvent::AvatarChecked { ticket, id, ok } => {
                self.avatars.resolve(ticket, id, ok);
            }
        }
    }

    // -- API dispatch -------------------------------------------------------

    fn dispatch_fetch(&self, ticket: FetchTicket, refresh: Option<RefreshGesture>) {
        let client = Arc::clone(&self.client);
        let sender = self.events.sender();
        let query = CharacterQuery::with_size(self.config.page_size);

        tokio::spawn(async move {
            let result = client.get_characters(&query).await.map_err(|e| {
                tracing::error!("failed to fetch characters: {e}");
                e.to_string()
            });
            if let Ok(ref characters) = result {
                tracing::info!(count = characters.len(), "characters loaded");
            }
            let _ = sender.send(Event::App(Box::new(AppEvent::CharactersLoaded {
                ticket,
                result,
                refresh,
            })));
        });
    }

    fn start_avatar_checks(&mut self, ticket: FetchTicket) {
        let check = self.config.check_avatars;
        self.avatars.reset(ticket, &self.screen.characters, check);
        if !check || self.screen.characters.is_empty() {
            return;
        }

        let rows = self
            .screen
            .characters
            .iter()
            .map(|c| (c.id, c.image.clone()))
            .collect();
        tokio::spawn(avatar::check_avatars(
            Arc::clone(&self.client),
            ticket,
            rows,
            self.config.avatar_check_concurrency,
            self.events.sender(),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_server::serve_once;
    use crate::avatar::AvatarState;
    use crate::config::FALLBACK_AVATAR_URL;
    use crate::labels;
    use crate::screen::ScreenView;

    const BENDER: &str = r#"{"items":[{"id":1,"name":"Bender","gender":"MALE","status":"DEAD","species":"Robot","image":"x"}]}"#;

    fn app_for(base_url: &str) -> App {
        let config = AppConfig {
            api_base_url: base_url.to_string(),
            check_avatars: false,
            ..AppConfig::default()
        };
        let client = FuturamaClient::new(&config).unwrap();
        App::with_events(config, client, EventHandler::detached())
    }

    /// Base URL of a port nobody listens on.
    async fn refused_base_url() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}")
    }

    /// Process queued app events until a fetch result has been handled.
    async fn settle(app: &mut App) {
        loop {
            if let Event::App(event) = app.events.next().await.unwrap() {
                let done = matches!(*event, AppEvent::CharactersLoaded { .. });
                app.handle_app_event(*event);
                if done {
                    return;
                }
            }
        }
    }

    #[tokio::test]
    async fn mount_fetch_populates_list() {
        let (base, _) = serve_once("200 OK", "application/json", BENDER).await;
        let mut app = app_for(&base);

        app.handle_app_event(AppEvent::FetchCharacters { refresh: None });
        assert_eq!(app.screen.view(), ScreenView::Loading);
        settle(&mut app).await;

        match app.screen.view() {
            ScreenView::Populated(rows) => {
                assert_eq!(rows.len(), 1);
                assert_eq!(rows[0].name, "Bender");
            }
            other => panic!("unexpected view {other:?}"),
        }
        assert!(app.last_updated.is_some());
    }

    #[tokio::test]
    async fn network_failure_shows_error_and_completes_refresh() {
        let mut app = app_for(&refused_base_url().await);

        app.pull_to_refresh();
        assert!(app.refresher.is_refreshing());
        settle(&mut app).await;

        assert!(!app.screen.loading);
        assert_eq!(app.screen.view(), ScreenView::Error(labels::LOAD_FAILED));
        assert!(!app.refresher.is_refreshing());
        assert_eq!(app.refresher.completed(), 1);
    }

    #[tokio::test]
    async fn refresh_completes_once_on_success() {
        let (base, _) = serve_once("200 OK", "application/json", BENDER).await;
        let mut app = app_for(&base);

        app.pull_to_refresh();
        settle(&mut app).await;

        assert_eq!(app.refresher.completed(), 1);
        assert!(!app.refresher.is_refreshing());
        assert_eq!(app.screen.visible_rows(), 1);
    }

    #[tokio::test]
    async fn stale_refresh_still_completes_its_gesture() {
        let mut app = app_for("http://127.0.0.1:9");
        let older = app.screen.begin_fetch();
        let _newer = app.screen.begin_fetch();
        let gesture = app.refresher.pull();

        app.handle_app_event(AppEvent::CharactersLoaded {
            ticket: older,
            result: Err("late".to_string()),
            refresh: Some(gesture),
        });

        assert_eq!(app.refresher.completed(), 1);
        assert!(app.screen.loading);
        assert!(app.screen.error.is_empty());
    }

    #[tokio::test]
    async fn failed_avatar_falls_back_only_for_its_row() {
        let (image_base, _) = serve_once("200 OK", "image/png", "png").await;
        let image_url = format!("{image_base}/fry.png");
        let body = format!(
            r#"{{"items":[{{"id":1,"name":"Fry","image":"{image_url}"}},{{"id":2,"name":"Zoidberg","image":"not a url"}}]}}"#
        );
        let (base, _) = serve_once("200 OK", "application/json", body).await;

        let config = AppConfig {
            api_base_url: base,
            check_avatars: true,
            ..AppConfig::default()
        };
        let client = FuturamaClient::new(&config).unwrap();
        let mut app = App::with_events(config, client, EventHandler::detached());

        app.handle_app_event(AppEvent::FetchCharacters { refresh: None });
        settle(&mut app).await;
        assert_eq!(app.avatars.state(1), AvatarState::Pending);
        assert_eq!(app.avatars.state(2), AvatarState::Pending);

        let mut checked = 0;
        while checked < 2 {
            if let Event::App(event) = app.events.next().await.unwrap() {
                if matches!(*event, AppEvent::AvatarChecked { .. }) {
                    checked += 1;
                }
                app.handle_app_event(*event);
            }
        }

        let rows = app.screen.characters.clone();
        assert_eq!(app.avatars.state(1), AvatarState::Loaded);
        assert_eq!(app.avatars.source(&rows[0]), image_url);
        assert_eq!(app.avatars.state(2), AvatarState::Fallback);
        assert_eq!(app.avatars.source(&rows[1]), FALLBACK_AVATAR_URL);
    }

    #[test]
    fn selection_is_clamped_to_rows() {
        let mut app = app_for("http://127.0.0.1:9");
        let ticket = app.screen.begin_fetch();
        let rows = serde_json::from_str::<crate::api::types::ApiResponse>(BENDER)
            .unwrap()
            .items
            .unwrap();
        app.screen.finish_fetch::<()>(ticket, Ok(rows));

        app.move_selection_down(PAGE_STEP);
        assert_eq!(app.selected_index, 0);
        app.move_selection_up(1);
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn help_toggles() {
        let mut app = app_for("http://127.0.0.1:9");
        app.handle_app_event(AppEvent::ToggleHelp);
        assert!(app.show_help);
        app.handle_app_event(AppEvent::ToggleHelp);
        assert!(!app.show_help);
    }
}
