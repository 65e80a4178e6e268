use std::sync::Arc;

use lumen_core::{ErrorInfo, GenerationResult, Prompt};

/// What the last generation call for the current prompt produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Generated(Arc<GenerationResult>),
    Failed(ErrorInfo),
}

/// Where a session sits in the render cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    /// Nothing submitted yet, or the session was reset
    Idle,
    /// A prompt is stored but no call has completed for it
    AwaitingResult,
    /// The stored prompt has images
    Displaying,
    /// The stored prompt failed; it stays failed until the prompt changes
    Failed,
}

/// Per-session association of the current prompt with its outcome
///
/// Holds at most one prompt and one outcome at a time. An outcome is only
/// ever stored for the prompt that is stored alongside it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    prompt: Option<Prompt>,
    outcome: Option<Outcome>,
}

impl SessionState {
    pub fn prompt(&self) -> Option<&Prompt> {
        self.prompt.as_ref()
    }

    /// Store a new prompt, dropping the outcome of the previous one
    pub fn set_prompt(&mut self, prompt: Prompt) {
        self.prompt = Some(prompt);
        self.outcome = None;
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Record the outcome for the stored prompt
    ///
    /// Ignored when no prompt is stored.
    pub fn set_outcome(&mut self, outcome: Outcome) {
        if self.prompt.is_some() {
            self.outcome = Some(outcome);
        }
    }

    /// Forget everything, returning to the first-visit state
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn phase(&self) -> RenderState {
        match (&self.prompt, &self.outcome) {
            (None, _) => RenderState::Idle,
            (Some(_), None) => RenderState::AwaitingResult,
            (Some(_), Some(Outcome::Generated(_))) => RenderState::Displaying,
            (Some(_), Some(Outcome::Failed(_))) => RenderState::Failed,
        }
    }
}
