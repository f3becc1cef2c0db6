//! Selection state and its transitions. Nothing in here touches a display.

use std::collections::BTreeSet;

use rand::{seq::SliceRandom, Rng};
use shared::{
    domain::{is_valid_number, Game, MAX_GAMES, MAX_NUMBER, MIN_NUMBER, NUMBERS_PER_GAME},
    error::SelectionError,
    protocol::SubmitRequest,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Selected(u8),
    Deselected(u8),
}

/// Enablement flags derived from the current data. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UiFlags {
    pub add_game_enabled: bool,
    pub submit_enabled: bool,
}

pub fn derive_flags(selection_len: usize, games_len: usize, full_name: &str) -> UiFlags {
    UiFlags {
        add_game_enabled: selection_len == NUMBERS_PER_GAME && games_len < MAX_GAMES,
        submit_enabled: games_len > 0 && !full_name.trim().is_empty(),
    }
}

/// Every number of the grid, in uniformly random order.
pub(crate) fn shuffled_pool<R: Rng + ?Sized>(rng: &mut R) -> Vec<u8> {
    let mut pool: Vec<u8> = (MIN_NUMBER..=MAX_NUMBER).collect();
    pool.shuffle(rng);
    pool
}

#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    current: BTreeSet<u8>,
    games: Vec<Game>,
    full_name: String,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &BTreeSet<u8> {
        &self.current
    }

    pub fn is_selected(&self, number: u8) -> bool {
        self.current.contains(&number)
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn flags(&self) -> UiFlags {
        derive_flags(self.current.len(), self.games.len(), &self.full_name)
    }

    pub fn toggle_number(&mut self, number: u8) -> Result<ToggleOutcome, SelectionError> {
        if !is_valid_number(number) {
            return Err(SelectionError::NumberOutOfRange(number));
        }
        if self.current.remove(&number) {
            return Ok(ToggleOutcome::Deselected(number));
        }
        if self.current.len() >= NUMBERS_PER_GAME {
            return Err(SelectionError::SelectionFull);
        }
        self.current.insert(number);
        Ok(ToggleOutcome::Selected(number))
    }

    pub fn clear_selection(&mut self) {
        self.current.clear();
    }

    /// Replaces the current selection with six distinct numbers taken from
    /// the front of a shuffled `1..=60`.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) -> [u8; NUMBERS_PER_GAME] {
        self.clear_selection();

        let pool = shuffled_pool(rng);

        let mut picked = [0u8; NUMBERS_PER_GAME];
        picked.copy_from_slice(&pool[..NUMBERS_PER_GAME]);
        self.current.extend(picked);
        picked
    }

    /// Appends the current selection as a sorted game and clears the
    /// selection. Returns the new game's index, or `None` when the selection
    /// is not exactly six numbers or the list is already full.
    pub fn commit_game(&mut self) -> Option<usize> {
        if self.current.len() != NUMBERS_PER_GAME || self.games.len() >= MAX_GAMES {
            return None;
        }
        let game = Game::from_numbers(self.current.iter().copied()).ok()?;
        self.games.push(game);
        self.clear_selection();
        Some(self.games.len() - 1)
    }

    /// Out-of-range indices are a no-op.
    pub fn remove_game(&mut self, index: usize) -> Option<Game> {
        if index >= self.games.len() {
            return None;
        }
        Some(self.games.remove(index))
    }

    pub fn set_full_name(&mut self, full_name: impl Into<String>) {
        self.full_name = full_name.into();
    }

    /// Snapshot of the payload as of now. The name is sent untrimmed.
    pub fn submit_request(&self) -> SubmitRequest {
        SubmitRequest {
            full_name: self.full_name.clone(),
            games: self.games.clone(),
        }
    }
}
