use thiserror::Error;

pub const MSG_SELECTION_FULL: &str = "Maximum of 6 numbers per game.";
pub const MSG_MISSING_NAME: &str = "Please fill in your name.";
pub const MSG_SUBMIT_FAILED: &str = "Error submitting games.";
pub const MSG_CONNECTION_ERROR: &str = "Connection error.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("number {0} is outside 1..=60")]
    NumberOutOfRange(u8),
    #[error("Maximum of 6 numbers per game.")]
    SelectionFull,
    #[error("a game needs exactly 6 numbers, have {have}")]
    IncompleteSelection { have: usize },
    #[error("number {0} appears more than once")]
    DuplicateNumber(u8),
    #[error("game numbers must be in ascending order")]
    UnsortedGame,
}

impl SelectionError {
    /// Whether the error is shown to the user rather than only logged.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Self::SelectionFull)
    }
}
