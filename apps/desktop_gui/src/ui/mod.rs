//! UI layer for the desktop form: grid, games list, and submission controls.

pub mod app;

pub use app::{LottoFormApp, StartupConfig};
