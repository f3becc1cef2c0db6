use std::time::Instant;

use rand::Rng;
use shared::{
    domain::Game,
    error::{SelectionError, MSG_MISSING_NAME},
    protocol::{SubmitRequest, SubmitResponse, SubmitVerdict},
};
use tracing::{debug, info, warn};

use crate::{
    notice::NoticeBoard,
    selection::{SelectionState, ToggleOutcome, UiFlags},
    submission::{SubmitError, SubmitPhase, SubmitTransport},
    view::FormView,
};

/// Why `begin_submit` did not produce a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitBlocked {
    NoGames,
    MissingName,
    AlreadySubmitting,
}

/// Owns the form's state and routes every user action through the pure
/// selection transitions, keeping the error line and the submit phase in step.
#[derive(Debug, Clone)]
pub struct SelectionController {
    state: SelectionState,
    notices: NoticeBoard,
    phase: SubmitPhase,
    submit_label: String,
}

impl SelectionController {
    pub fn new(submit_label: impl Into<String>) -> Self {
        Self {
            state: SelectionState::new(),
            notices: NoticeBoard::default(),
            phase: SubmitPhase::Idle,
            submit_label: submit_label.into(),
        }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn phase(&self) -> &SubmitPhase {
        &self.phase
    }

    pub fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    pub fn submit_label(&self) -> &str {
        &self.submit_label
    }

    /// Submit stays disabled while a request is in flight, whatever the data says.
    pub fn flags(&self) -> UiFlags {
        let mut flags = self.state.flags();
        flags.submit_enabled &= self.phase.is_idle();
        flags
    }

    pub fn view(&self, now: Instant) -> FormView {
        FormView::render(self, now)
    }

    pub fn toggle_number(
        &mut self,
        number: u8,
        now: Instant,
    ) -> Result<ToggleOutcome, SelectionError> {
        match self.state.toggle_number(number) {
            Ok(outcome) => {
                debug!(?outcome, selected = self.state.current().len(), "toggled number");
                self.notices.clear();
                Ok(outcome)
            }
            Err(err) => {
                if err.is_user_facing() {
                    self.notices.show(err.to_string(), now);
                }
                debug!(number, "toggle rejected: {err}");
                Err(err)
            }
        }
    }

    pub fn randomize(&mut self) -> [u8; shared::domain::NUMBERS_PER_GAME] {
        self.randomize_with(&mut rand::thread_rng())
    }

    pub fn randomize_with<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> [u8; shared::domain::NUMBERS_PER_GAME] {
        self.notices.clear();
        let picked = self.state.randomize(rng);
        debug!(?picked, "randomized selection");
        picked
    }

    pub fn commit_game(&mut self) -> Option<usize> {
        let index = self.state.commit_game()?;
        self.notices.clear();
        debug!(index, games = self.state.games().len(), "committed game");
        Some(index)
    }

    pub fn remove_game(&mut self, index: usize) -> Option<Game> {
        let removed = self.state.remove_game(index);
        match &removed {
            Some(game) => {
                self.notices.clear();
                debug!(index, %game, games = self.state.games().len(), "removed game");
            }
            None => debug!(index, "ignoring remove for missing game"),
        }
        removed
    }

    pub fn set_full_name(&mut self, full_name: impl Into<String>) {
        self.state.set_full_name(full_name);
        self.notices.clear();
    }

    /// Runs the submit guards and, when they pass, moves to `Submitting` and
    /// returns the payload snapshot to send.
    pub fn begin_submit(&mut self, now: Instant) -> Result<SubmitRequest, SubmitBlocked> {
        if !self.phase.is_idle() {
            return Err(SubmitBlocked::AlreadySubmitting);
        }
        if self.state.games().is_empty() {
            return Err(SubmitBlocked::NoGames);
        }
        if self.state.full_name().trim().is_empty() {
            self.notices.show(MSG_MISSING_NAME, now);
            return Err(SubmitBlocked::MissingName);
        }

        self.phase = SubmitPhase::Submitting;
        let request = self.state.submit_request();
        info!(games = request.games.len(), "submitting games");
        Ok(request)
    }

    /// Applies the settled network result. Success moves to `Redirecting`;
    /// anything else shows a message and returns to `Idle`.
    pub fn finish_submit(
        &mut self,
        result: Result<SubmitResponse, SubmitError>,
        now: Instant,
    ) -> &SubmitPhase {
        let outcome = result.and_then(|response| match response.verdict() {
            SubmitVerdict::Accepted { redirect } => Ok(redirect),
            SubmitVerdict::Rejected { message } => Err(SubmitError::Rejected { message }),
        });

        match outcome {
            Ok(target) => {
                info!(%target, "submission accepted");
                self.phase = SubmitPhase::Redirecting { target };
            }
            Err(err) => {
                warn!("submission failed: {err}");
                self.notices.show(err.user_message(), now);
                self.phase = SubmitPhase::Idle;
            }
        }
        &self.phase
    }

    /// Guards, sends, and settles in one call. The payload is the snapshot
    /// taken before the request goes out.
    pub async fn submit<T>(&mut self, transport: &T) -> Result<&SubmitPhase, SubmitBlocked>
    where
        T: SubmitTransport + ?Sized,
    {
        let request = self.begin_submit(Instant::now())?;
        let result = transport.submit(&request).await;
        Ok(self.finish_submit(result, Instant::now()))
    }

    pub fn expire_notices(&mut self, now: Instant) -> bool {
        self.notices.expire(now)
    }
}

impl Default for SelectionController {
    fn default() -> Self {
        Self::new(crate::config::ClientSettings::default().submit_label)
    }
}
