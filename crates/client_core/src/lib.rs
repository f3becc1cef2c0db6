pub mod config;
pub mod controller;
pub mod notice;
pub mod selection;
pub mod submission;
pub mod view;

pub use config::{load_settings, load_settings_from, ClientSettings, ConfigError};
pub use controller::{SelectionController, SubmitBlocked};
pub use notice::{NoticeBoard, NOTICE_TTL};
pub use selection::{derive_flags, SelectionState, ToggleOutcome, UiFlags};
pub use submission::{
    decode_submit_response, resolve_redirect, HttpSubmitClient, SubmitError, SubmitPhase, SubmitTransport,
    SUBMITTING_LABEL,
};
pub use view::{game_label, FormView, GameRow, NumberCell};

#[cfg(test)]
#[path = "tests/selection_tests.rs"]
mod selection_tests;

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod controller_tests;

#[cfg(test)]
#[path = "tests/submission_tests.rs"]
mod submission_tests;
