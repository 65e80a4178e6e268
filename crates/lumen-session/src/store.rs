use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use lumen_config::SessionConfig;
use mini_moka::sync::Cache;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::state::SessionState;

/// Session state behind its own lock
///
/// Holding the lock for a whole render pass keeps interactions within one
/// session strictly sequential.
pub type SharedSession = Arc<Mutex<SessionState>>;

/// Opaque, randomly generated session identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// In-memory registry of live sessions
///
/// Sessions idle for longer than the configured timeout are evicted along
/// with their cached images; the registry is also bounded in size.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Cache<SessionId, SharedSession>,
}

impl SessionStore {
    pub fn new(idle_timeout: Duration, max_sessions: u64) -> Self {
        Self {
            sessions: Cache::builder()
                .max_capacity(max_sessions)
                .time_to_idle(idle_timeout)
                .build(),
        }
    }

    pub fn from_config(config: &SessionConfig) -> anyhow::Result<Self> {
        Ok(Self::new(config.idle_timeout()?, config.max_sessions))
    }

    /// Resolve the session for a request
    ///
    /// Unknown or expired ids are never revived: a fresh empty session is
    /// registered under a newly generated id instead.
    pub fn get_or_create(&self, id: Option<SessionId>) -> (SessionId, SharedSession) {
        if let Some(id) = id
            && let Some(session) = self.sessions.get(&id)
        {
            return (id, session);
        }

        let id = SessionId::generate();
        let session = SharedSession::default();
        self.sessions.insert(id, Arc::clone(&session));

        tracing::debug!(session_id = %id, "session created");

        (id, session)
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}
