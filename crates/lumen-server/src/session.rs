use axum::extract::{FromRequestParts, Request};
use axum::middleware::Next;
use axum::response::Response;
use http::request::Parts;
use http::{HeaderMap, HeaderValue, header};
use lumen_session::{SessionId, SessionStore, SharedSession};

use crate::error::ServerError;

/// The session resolved for the current request
#[derive(Debug, Clone)]
pub struct SessionHandle {
    pub id: SessionId,
    pub session: SharedSession,
}

impl<S: Send + Sync> FromRequestParts<S> for SessionHandle {
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<Self>().cloned().ok_or(ServerError::MissingSession)
    }
}

/// Middleware that attaches a session to every request
///
/// Reads the session id from the configured cookie. When the cookie is
/// missing or names a session that no longer exists, a fresh session is
/// created and its id is sent back in a `Set-Cookie` header.
pub async fn session_middleware(sessions: &SessionStore, cookie_name: &str, request: Request, next: Next) -> Response {
    let presented = session_cookie(request.headers(), cookie_name);
    let (id, session) = sessions.get_or_create(presented);

    let mut request = request;
    request.extensions_mut().insert(SessionHandle { id, session });

    let mut response = next.run(request).await;

    if presented != Some(id) {
        match HeaderValue::from_str(&format!("{cookie_name}={id}; Path=/; HttpOnly; SameSite=Lax")) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => tracing::error!(error = %e, "failed to build session cookie"),
        }
    }

    response
}

/// Extract a well-formed session id from the request cookies
fn session_cookie(headers: &HeaderMap, cookie_name: &str) -> Option<SessionId> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name)
        .and_then(|(_, value)| value.trim().parse().ok())
}
