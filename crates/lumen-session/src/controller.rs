use std::sync::Arc;

use lumen_core::{ErrorInfo, GenerationResult, Prompt};
use lumen_imagegen::ImageGenerator;

use crate::state::{Outcome, RenderState, SessionState};

/// One user interaction with the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    /// The prompt form was submitted; the field may be missing or empty
    Submit(Option<String>),
    /// The user asked to start over
    Reset,
    /// A plain re-render, such as a page reload
    Refresh,
}

/// What the page shows below the prompt form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewContent {
    Empty,
    Images(Arc<GenerationResult>),
    Error(ErrorInfo),
}

/// Everything needed to render the page for one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub prompt: Option<Prompt>,
    pub state: RenderState,
    pub content: ViewContent,
}

impl View {
    fn of(state: &SessionState) -> Self {
        let content = match state.outcome() {
            Some(Outcome::Generated(result)) => ViewContent::Images(Arc::clone(result)),
            Some(Outcome::Failed(error)) => ViewContent::Error(error.clone()),
            None => ViewContent::Empty,
        };

        Self {
            prompt: state.prompt().cloned(),
            state: state.phase(),
            content,
        }
    }
}

/// Decides, once per interaction, whether the provider must be called
///
/// A prompt is sent to the provider at most once while it remains the
/// current prompt of its session. Later renders reuse the stored images or
/// the stored failure.
#[derive(Clone)]
pub struct RenderController {
    generator: Arc<dyn ImageGenerator>,
}

impl RenderController {
    pub fn new(generator: Arc<dyn ImageGenerator>) -> Self {
        Self { generator }
    }

    /// Apply `interaction` to `state` and produce the view to display
    pub async fn render(&self, state: &mut SessionState, interaction: Interaction) -> View {
        match interaction {
            Interaction::Reset => {
                state.clear();
                tracing::debug!("session reset");
            }
            Interaction::Submit(field) => match Prompt::from_submission(field.as_deref()) {
                Some(prompt) if state.prompt() != Some(&prompt) => {
                    state.clear();
                    state.set_prompt(prompt);
                }
                Some(_) => tracing::debug!("prompt unchanged, reusing stored outcome"),
                None => tracing::debug!("empty submission ignored"),
            },
            Interaction::Refresh => {}
        }

        if state.phase() == RenderState::AwaitingResult
            && let Some(prompt) = state.prompt().cloned()
        {
            let outcome = match self.generator.generate(&prompt).await {
                Ok(result) => Outcome::Generated(Arc::new(result)),
                Err(error) => Outcome::Failed(error),
            };
            state.set_outcome(outcome);
        }

        View::of(state)
    }
}

impl std::fmt::Debug for RenderController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderController").finish_non_exhaustive()
    }
}
