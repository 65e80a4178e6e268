#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod controller;
mod state;
mod store;

pub use controller::{Interaction, RenderController, View, ViewContent};
pub use state::{Outcome, RenderState, SessionState};
pub use store::{SessionId, SessionStore, SharedSession};
