//! The application shell: screen switching, the event loop and all async
//! plumbing.
//!
//! Everything asynchronous (debounce and blur-grace timers, suggestion
//! fetches, the report fetch, the session probe) is spawned as a task that
//! reports back through one unbounded channel. The main loop selects over
//! terminal input and that channel, so all state mutation happens in one
//! place. Timer and fetch completions carry the generation/sequence numbers
//! the core state machines handed out, which is how superseded work gets
//! discarded.

use std::io;

use api_client::{ApiClient, Session, SuggestionSource};
use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use eolmadak_core::{FieldCommand, FieldId, FlowConfig};
use eolmadak_types::{
    LocationCandidate, ReportRequest, ReportSnapshot, SearchQuery, SearchTerm, TreatmentCandidate,
};
use futures::StreamExt;
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Constraint, Layout};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;

use crate::home::{HomeAction, HomeScreen};
use crate::results::{ResultsAction, ResultsScreen};
use crate::theme;

/// A completed suggestion fetch, already mapped to a plain list.
///
/// Fetch failures were logged and collapsed to an empty list by the fetch
/// task; suggestion problems are never surfaced as blocking UI errors.
#[derive(Debug)]
pub enum SuggestionPayload {
    Treatments(Vec<TreatmentCandidate>),
    Locations(Vec<LocationCandidate>),
    Hospitals(Vec<String>),
}

/// Messages from spawned tasks into the main loop.
#[derive(Debug)]
pub enum AppEvent {
    DebounceElapsed { field: FieldId, generation: u64 },
    CloseElapsed { field: FieldId, generation: u64 },
    Suggestions { seq: u64, payload: SuggestionPayload },
    ReportLoaded {
        attempt: u64,
        outcome: Result<ReportSnapshot, String>,
    },
    SessionLoaded(Session),
}

enum Screen {
    Home(HomeScreen),
    Results(ResultsScreen),
}

enum ScreenAction {
    Home(HomeAction),
    Results(ResultsAction),
}

pub struct App {
    api: ApiClient,
    config: FlowConfig,
    screen: Screen,
    /// `None` while the startup probe is still in flight.
    session: Option<Session>,
    events_tx: mpsc::UnboundedSender<AppEvent>,
    events_rx: Option<mpsc::UnboundedReceiver<AppEvent>>,
    should_quit: bool,
}

impl App {
    pub fn new(api: ApiClient, config: FlowConfig) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let screen = Screen::Home(HomeScreen::new(&config));
        Self {
            api,
            config,
            screen,
            session: None,
            events_tx,
            events_rx: Some(events_rx),
            should_quit: false,
        }
    }

    /// Drive the app until the user quits.
    pub async fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        let mut events_rx = self.events_rx.take().expect("App::run called once");
        self.spawn_session_probe();

        let mut input = EventStream::new();
        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;

            tokio::select! {
                maybe_event = input.next() => match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        self.on_key(key);
                    }
                    Some(Ok(_)) => {}
                    Some(Err(error)) => return Err(error),
                    None => break,
                },
                Some(event) = events_rx.recv() => self.on_app_event(event),
            }
        }
        Ok(())
    }

    fn on_key(&mut self, key: KeyEvent) {
        let action = match &mut self.screen {
            Screen::Home(home) => ScreenAction::Home(home.on_key(key)),
            Screen::Results(results) => ScreenAction::Results(results.on_key(key)),
        };

        match action {
            ScreenAction::Home(HomeAction::None) => {}
            ScreenAction::Home(HomeAction::Command(field, command)) => {
                self.run_field_command(field, command);
            }
            ScreenAction::Home(HomeAction::Submit(query)) => self.open_results(query),
            ScreenAction::Home(HomeAction::Quit) => self.should_quit = true,
            ScreenAction::Results(ResultsAction::None) => {}
            ScreenAction::Results(ResultsAction::Fetch { attempt, request }) => {
                self.spawn_report_fetch(attempt, request);
            }
            ScreenAction::Results(ResultsAction::BackHome) => {
                // The report snapshot dies with the screen; a new search
                // always fetches fresh.
                self.screen = Screen::Home(HomeScreen::new(&self.config));
            }
            ScreenAction::Results(ResultsAction::Quit) => self.should_quit = true,
        }
    }

    fn on_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::DebounceElapsed { field, generation } => {
                let command = match &mut self.screen {
                    Screen::Home(home) => home.form_mut().debounce_elapsed(field, generation),
                    Screen::Results(_) => None,
                };
                if let Some(command) = command {
                    self.run_field_command(field, command);
                }
            }
            AppEvent::CloseElapsed { field, generation } => {
                if let Screen::Home(home) = &mut self.screen {
                    home.form_mut().close_elapsed(field, generation);
                }
            }
            AppEvent::Suggestions { seq, payload } => {
                if let Screen::Home(home) = &mut self.screen {
                    match payload {
                        SuggestionPayload::Treatments(list) => {
                            home.form_mut().treatment_suggestions(seq, list);
                        }
                        SuggestionPayload::Locations(list) => {
                            home.form_mut().location_suggestions(seq, list);
                        }
                        SuggestionPayload::Hospitals(list) => {
                            home.form_mut().hospital_suggestions(seq, list);
                        }
                    }
                }
            }
            AppEvent::ReportLoaded { attempt, outcome } => {
                if let Screen::Results(results) = &mut self.screen {
                    results.report_arrived(attempt, outcome);
                }
            }
            AppEvent::SessionLoaded(session) => self.session = Some(session),
        }
    }

    fn run_field_command(&mut self, field: FieldId, command: FieldCommand) {
        match command {
            FieldCommand::ArmDebounce { generation, quiet } => {
                let tx = self.events_tx.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(quiet).await;
                    let _ = tx.send(AppEvent::DebounceElapsed { field, generation });
                });
            }
            FieldCommand::ScheduleClose { generation, grace } => {
                let tx = self.events_tx.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(grace).await;
                    let _ = tx.send(AppEvent::CloseElapsed { field, generation });
                });
            }
            FieldCommand::Fetch { seq, term } => self.spawn_suggestion_fetch(field, seq, term),
        }
    }

    fn spawn_suggestion_fetch(&self, field: FieldId, seq: u64, term: SearchTerm) {
        // Recomputed at every fetch: the scope follows whatever region is
        // selected right now.
        let scope = match (&self.screen, field) {
            (Screen::Home(home), FieldId::Hospital) => {
                home.form().hospital_scope().map(str::to_owned)
            }
            _ => None,
        };

        let api = self.api.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let payload = match field {
                FieldId::Treatment => SuggestionPayload::Treatments(
                    api.treatments(&term).await.unwrap_or_else(|error| {
                        tracing::warn!(%error, "treatment suggestion fetch failed");
                        Vec::new()
                    }),
                ),
                FieldId::Location => SuggestionPayload::Locations(
                    api.locations(&term).await.unwrap_or_else(|error| {
                        tracing::warn!(%error, "location suggestion fetch failed");
                        Vec::new()
                    }),
                ),
                FieldId::Hospital => SuggestionPayload::Hospitals(
                    api.hospitals(&term, scope.as_deref())
                        .await
                        .unwrap_or_else(|error| {
                            tracing::warn!(%error, "hospital suggestion fetch failed");
                            Vec::new()
                        }),
                ),
            };
            let _ = tx.send(AppEvent::Suggestions { seq, payload });
        });
    }

    fn spawn_report_fetch(&self, attempt: u64, request: ReportRequest) {
        let api = self.api.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let outcome = api
                .fetch_report(&request)
                .await
                .map_err(|error| error.to_string());
            let _ = tx.send(AppEvent::ReportLoaded { attempt, outcome });
        });
    }

    fn spawn_session_probe(&self) {
        let api = self.api.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let session = api.fetch_session().await;
            let _ = tx.send(AppEvent::SessionLoaded(session));
        });
    }

    fn open_results(&mut self, query: SearchQuery) {
        match ResultsScreen::try_new(query, self.config.page_size()) {
            Some(mut results) => {
                let action = results.start_fetch();
                self.screen = Screen::Results(results);
                if let ResultsAction::Fetch { attempt, request } = action {
                    self.spawn_report_fetch(attempt, request);
                }
            }
            // Guard refused the handoff: stay on the search entry point.
            None => {}
        }
    }

    fn render(&self, frame: &mut Frame) {
        let [header_area, body_area] =
            Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(frame.area());
        let [brand_area, session_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(30)]).areas(header_area);

        frame.render_widget(
            Paragraph::new(Line::styled("얼마닥 — 비급여 진료비 비교", theme::title())),
            brand_area,
        );

        let session_label = match &self.session {
            None => Line::styled("…", theme::muted()),
            Some(session) => match session.user() {
                Some(user) => Line::from(format!("내 정보  {}", user.name)),
                None => Line::styled("로그인 · 회원가입", theme::muted()),
            },
        };
        frame.render_widget(
            Paragraph::new(session_label).right_aligned(),
            session_area,
        );

        match &self.screen {
            Screen::Home(home) => home.render(frame, body_area),
            Screen::Results(results) => results.render(frame, body_area),
        }
    }
}

/// Put the terminal into raw + alternate-screen mode.
pub fn init_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

/// Undo [`init_terminal`]. Safe to call on the error path.
pub fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}
