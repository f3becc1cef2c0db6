//! Controller layer: backend events and command orchestration around the form.

pub mod events;
pub mod orchestration;
