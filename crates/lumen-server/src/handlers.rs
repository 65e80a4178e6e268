use std::sync::Arc;

use axum::Form;
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use http::{HeaderValue, header};
use lumen_core::derive_filename;
use lumen_session::{Interaction, Outcome, RenderController, View};
use serde::Deserialize;

use crate::{
    error::ServerError,
    page::{self, PageSettings},
    session::SessionHandle,
};

/// Shared state for page handlers
#[derive(Clone)]
pub(crate) struct AppState {
    pub controller: RenderController,
    pub page: Arc<PageSettings>,
}

/// Prompt form submission
#[derive(Debug, Deserialize)]
pub(crate) struct PromptForm {
    #[serde(default)]
    prompt: Option<String>,
}

/// Render the page for the current session
pub(crate) async fn index(State(state): State<AppState>, handle: SessionHandle) -> Result<Html<String>, ServerError> {
    let view = run(&state, handle, Interaction::Refresh).await?;
    Ok(Html(page::render(&state.page, &view)))
}

/// Accept a prompt submission, then send the browser back to the page
pub(crate) async fn submit(
    State(state): State<AppState>,
    handle: SessionHandle,
    Form(form): Form<PromptForm>,
) -> Result<Redirect, ServerError> {
    run(&state, handle, Interaction::Submit(form.prompt)).await?;
    Ok(Redirect::to("/"))
}

/// Clear the session, then send the browser back to the page
pub(crate) async fn reset(State(state): State<AppState>, handle: SessionHandle) -> Result<Redirect, ServerError> {
    run(&state, handle, Interaction::Reset).await?;
    Ok(Redirect::to("/"))
}

/// Serve one displayed image as a file download
///
/// Reads the stored result only; never triggers a generation call.
pub(crate) async fn download(handle: SessionHandle, Path(index): Path<usize>) -> Result<Response, ServerError> {
    let session = handle.session.lock().await;

    let (Some(prompt), Some(Outcome::Generated(result))) = (session.prompt(), session.outcome()) else {
        return Err(ServerError::ImageNotFound(index));
    };

    let image = result.get(index).ok_or(ServerError::ImageNotFound(index))?;
    let disposition = content_disposition(&derive_filename(prompt.as_str(), index))?;

    tracing::debug!(session_id = %handle.id, index, "serving image download");

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("image/png")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        image.bytes().clone(),
    )
        .into_response())
}

/// Run one controller pass with the session locked for its whole duration
///
/// The pass runs on its own task so a dropped connection cannot cancel a
/// provider call that is already in flight.
async fn run(state: &AppState, handle: SessionHandle, interaction: Interaction) -> Result<View, ServerError> {
    let controller = state.controller.clone();
    let mut session = handle.session.lock_owned().await;

    let view = tokio::spawn(async move { controller.render(&mut session, interaction).await }).await?;

    Ok(view)
}

/// Build an attachment disposition, with an RFC 5987 form for non-ASCII names
fn content_disposition(filename: &str) -> Result<HeaderValue, ServerError> {
    let value = if filename.is_ascii() {
        format!(r#"attachment; filename="{filename}""#)
    } else {
        let fallback: String = filename
            .chars()
            .map(|c| if c.is_ascii() { c } else { '_' })
            .collect();
        let encoded: String = url::form_urlencoded::byte_serialize(filename.as_bytes()).collect();
        format!(r#"attachment; filename="{fallback}"; filename*=UTF-8''{encoded}"#)
    };

    Ok(HeaderValue::from_str(&value)?)
}
