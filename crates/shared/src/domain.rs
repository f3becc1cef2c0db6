use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SelectionError;

pub const MIN_NUMBER: u8 = 1;
pub const MAX_NUMBER: u8 = 60;
pub const NUMBERS_PER_GAME: usize = 6;
pub const MAX_GAMES: usize = 5;

pub fn is_valid_number(number: u8) -> bool {
    (MIN_NUMBER..=MAX_NUMBER).contains(&number)
}

/// A committed set of six distinct numbers, always held in ascending order.
///
/// Serializes as a bare JSON array (`[3, 9, 14, 27, 41, 60]`), which is the
/// shape the `/submit` endpoint expects inside `games`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct Game([u8; NUMBERS_PER_GAME]);

impl Game {
    /// Builds a game from any ordering of six distinct in-range numbers.
    pub fn from_numbers<I>(numbers: I) -> Result<Self, SelectionError>
    where
        I: IntoIterator<Item = u8>,
    {
        let mut collected: Vec<u8> = numbers.into_iter().collect();
        if collected.len() != NUMBERS_PER_GAME {
            return Err(SelectionError::IncompleteSelection {
                have: collected.len(),
            });
        }
        if let Some(&bad) = collected.iter().find(|n| !is_valid_number(**n)) {
            return Err(SelectionError::NumberOutOfRange(bad));
        }
        collected.sort_unstable();
        if let Some(pair) = collected.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(SelectionError::DuplicateNumber(pair[0]));
        }

        let mut numbers = [0u8; NUMBERS_PER_GAME];
        numbers.copy_from_slice(&collected);
        Ok(Self(numbers))
    }

    pub fn numbers(&self) -> &[u8; NUMBERS_PER_GAME] {
        &self.0
    }
}

impl TryFrom<Vec<u8>> for Game {
    type Error = SelectionError;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        if value.windows(2).any(|pair| pair[0] > pair[1]) {
            return Err(SelectionError::UnsortedGame);
        }
        Self::from_numbers(value)
    }
}

impl From<Game> for Vec<u8> {
    fn from(value: Game) -> Self {
        value.0.to_vec()
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(u8::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "[ {joined} ]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_sorts_numbers_ascending() {
        let game = Game::from_numbers([42, 7, 60, 1, 19, 33]).expect("game");
        assert_eq!(game.numbers(), &[1, 7, 19, 33, 42, 60]);
    }

    #[test]
    fn game_rejects_wrong_size_duplicates_and_range() {
        assert!(matches!(
            Game::from_numbers([1, 2, 3, 4, 5]),
            Err(SelectionError::IncompleteSelection { have: 5 })
        ));
        assert!(matches!(
            Game::from_numbers([1, 2, 3, 4, 5, 5]),
            Err(SelectionError::DuplicateNumber(5))
        ));
        assert!(matches!(
            Game::from_numbers([0, 2, 3, 4, 5, 6]),
            Err(SelectionError::NumberOutOfRange(0))
        ));
        assert!(matches!(
            Game::from_numbers([1, 2, 3, 4, 5, 61]),
            Err(SelectionError::NumberOutOfRange(61))
        ));
    }

    #[test]
    fn game_serializes_as_plain_array() {
        let game = Game::from_numbers([6, 5, 4, 3, 2, 1]).expect("game");
        assert_eq!(
            serde_json::to_string(&game).expect("json"),
            "[1,2,3,4,5,6]"
        );
    }

    #[test]
    fn deserializing_unsorted_game_fails() {
        let err = serde_json::from_str::<Game>("[6,5,4,3,2,1]").expect_err("unsorted");
        assert!(err.to_string().contains("ascending"));
        let game: Game = serde_json::from_str("[1,2,3,4,5,6]").expect("sorted");
        assert_eq!(game.numbers(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn display_matches_games_list_label_format() {
        let game = Game::from_numbers([10, 20, 30, 40, 50, 60]).expect("game");
        assert_eq!(game.to_string(), "[ 10, 20, 30, 40, 50, 60 ]");
    }
}
