use anyhow::Result;
use crossterm::event::{self, Event};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::config::Config;
use crate::submit::{
    BusyGuard, HttpTransport, SubmissionTransport, SubmitOutcome, SubmitResponse, TransportError,
};
use crate::survey::{PageCatalog, Wizard};
use crate::ui::{install_panic_hook, ScreenAction, SurveyScreen, TerminalGuard};

/// Request running on the runtime while the screen keeps drawing
struct InFlight {
    guard: BusyGuard,
    handle: JoinHandle<Result<SubmitResponse, TransportError>>,
}

pub struct App {
    config: Config,
    wizard: Wizard,
    screen: SurveyScreen,
    transport: Arc<dyn SubmissionTransport>,
    in_flight: Option<InFlight>,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let transport = Arc::new(HttpTransport::from_config(&config.submit)?);
        Ok(Self::with_transport(config, transport))
    }

    pub fn with_transport(config: Config, transport: Arc<dyn SubmissionTransport>) -> Self {
        let wizard = Wizard::new(
            Arc::new(PageCatalog::standard()),
            config.validation_policy(),
        );
        let screen = SurveyScreen::new(&wizard);
        Self {
            config,
            wizard,
            screen,
            transport,
            in_flight: None,
            should_quit: false,
        }
    }

    pub fn wizard(&self) -> &Wizard {
        &self.wizard
    }

    pub fn screen(&self) -> &SurveyScreen {
        &self.screen
    }

    pub async fn run(&mut self) -> Result<()> {
        install_panic_hook();
        let guard = TerminalGuard::new()?;
        let mut terminal = guard.terminal()?;
        terminal.clear()?;

        tracing::info!(
            endpoint = self.transport.endpoint(),
            session_id = %self.wizard.session().id(),
            "survey wizard started"
        );

        let tick_rate = Duration::from_millis(self.config.ui.tick_rate_ms);

        while !self.should_quit {
            terminal.draw(|f| self.screen.render(f, &self.wizard))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    let action = self.screen.handle_key(&mut self.wizard, key);
                    self.handle_action(action);
                }
            }

            self.poll_submission().await;
        }

        if let Some(in_flight) = self.in_flight.take() {
            tracing::warn!("quitting with a submission in flight");
            in_flight.handle.abort();
        }

        drop(guard);
        Ok(())
    }

    pub fn handle_action(&mut self, action: ScreenAction) {
        match action {
            ScreenAction::None => {}
            ScreenAction::Quit => self.should_quit = true,
            ScreenAction::Submit => self.start_submission(),
        }
    }

    /// Validate and spawn the request; the reply is picked up by
    /// [`App::poll_submission`]
    fn start_submission(&mut self) {
        let pending = match self.wizard.begin_submission() {
            Ok(pending) => pending,
            Err(outcome) => {
                self.show_outcome(&outcome);
                return;
            }
        };

        let (payload, guard) = pending.into_parts();
        let transport = Arc::clone(&self.transport);
        tracing::info!(endpoint = transport.endpoint(), "submitting survey");
        let handle = tokio::spawn(async move { transport.submit(&payload).await });
        self.in_flight = Some(InFlight { guard, handle });
    }

    /// Apply the reply once the request task has finished
    pub async fn poll_submission(&mut self) {
        let finished = self
            .in_flight
            .as_ref()
            .is_some_and(|f| f.handle.is_finished());
        if !finished {
            return;
        }
        let Some(InFlight { guard, handle }) = self.in_flight.take() else {
            return;
        };

        let result = match handle.await {
            Ok(result) => result,
            Err(err) => Err(TransportError::Network(format!(
                "request task failed: {}",
                err
            ))),
        };

        let outcome = self.wizard.finish_submission(guard, result);
        if outcome.is_success() {
            self.screen.sync(&self.wizard);
        }
        self.show_outcome(&outcome);
    }

    /// Wait for an outstanding request to finish and apply it
    pub async fn settle(&mut self) {
        while self.in_flight.is_some() {
            self.poll_submission().await;
            tokio::task::yield_now().await;
        }
    }

    fn show_outcome(&mut self, outcome: &SubmitOutcome) {
        if let Some(message) = outcome.notice() {
            self.screen.show_notice(message, outcome.is_success());
        }
    }
}
