//! Maps controller state to what the form displays. Front ends render a
//! `FormView` and never read the state directly.

use std::time::Instant;

use shared::domain::{Game, MAX_NUMBER, MIN_NUMBER};

use crate::{
    controller::SelectionController,
    submission::{SubmitPhase, SUBMITTING_LABEL},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberCell {
    pub number: u8,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRow {
    pub index: usize,
    pub label: String,
    pub game: Game,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    /// Always 60 cells, number `i + 1` at position `i`.
    pub cells: Vec<NumberCell>,
    pub games: Vec<GameRow>,
    pub game_count: usize,
    pub add_game_enabled: bool,
    pub submit_enabled: bool,
    pub submit_label: String,
    pub error: Option<String>,
    pub redirect: Option<String>,
}

pub fn game_label(index: usize, game: &Game) -> String {
    format!("Game {}: {game}", index + 1)
}

impl FormView {
    pub fn render(controller: &SelectionController, now: Instant) -> Self {
        let state = controller.state();
        let flags = controller.flags();

        let cells = (MIN_NUMBER..=MAX_NUMBER)
            .map(|number| NumberCell {
                number,
                selected: state.is_selected(number),
            })
            .collect();

        let games = state
            .games()
            .iter()
            .enumerate()
            .map(|(index, game)| GameRow {
                index,
                label: game_label(index, game),
                game: *game,
            })
            .collect();

        let (submit_label, redirect) = match controller.phase() {
            SubmitPhase::Idle => (controller.submit_label().to_string(), None),
            SubmitPhase::Submitting => (SUBMITTING_LABEL.to_string(), None),
            SubmitPhase::Redirecting { target } => {
                (SUBMITTING_LABEL.to_string(), Some(target.clone()))
            }
        };

        Self {
            cells,
            games,
            game_count: state.games().len(),
            add_game_enabled: flags.add_game_enabled,
            submit_enabled: flags.submit_enabled,
            submit_label,
            error: controller.notices().visible(now).map(str::to_string),
            redirect,
        }
    }
}
