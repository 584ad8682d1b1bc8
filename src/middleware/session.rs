use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::Response,
    Json,
};
use serde_json::json;
use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::{Mutex, RwLock};
use tracing::debug;
use uuid::Uuid;

use crate::domain::Session;
use crate::middleware::logging::{to_response, ApiError};

/// Sessions untouched for this long are dropped.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

#[derive(Debug)]
struct Entry {
    session: Arc<Mutex<Session>>,
    last_seen: Instant,
}

/// Server-side registry of visitor sessions, keyed by an opaque token.
///
/// Each session sits behind its own mutex, so requests of one visitor are
/// applied one at a time while different visitors proceed independently.
/// Sessions idle for longer than the store's timeout are evicted whenever a
/// session is opened or looked up. Unsaved favorites of an evicted session
/// are lost, as with a session that is never logged out.
#[derive(Clone, Debug)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Entry>>>,
    idle_timeout: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_idle_timeout(DEFAULT_IDLE_TIMEOUT)
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_idle_timeout(idle_timeout: Duration) -> Self {
        SessionStore {
            sessions: Arc::default(),
            idle_timeout,
        }
    }

    fn evict_idle(&self, sessions: &mut HashMap<Uuid, Entry>, now: Instant) {
        let before = sessions.len();
        sessions.retain(|_, entry| now.duration_since(entry.last_seen) <= self.idle_timeout);
        let evicted = before - sessions.len();
        if evicted > 0 {
            debug!(evicted, remaining = sessions.len(), "Evicted idle sessions");
        }
    }

    /// Starts an anonymous session and returns its token.
    pub async fn open(&self) -> Uuid {
        let id = Uuid::new_v4();
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        self.evict_idle(&mut sessions, now);
        sessions.insert(
            id,
            Entry {
                session: Arc::new(Mutex::new(Session::new())),
                last_seen: now,
            },
        );
        id
    }

    /// Looks up a live session and marks it as seen.
    pub async fn get(&self, id: &Uuid) -> Option<Arc<Mutex<Session>>> {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        self.evict_idle(&mut sessions, now);
        sessions.get_mut(id).map(|entry| {
            entry.last_seen = now;
            entry.session.clone()
        })
    }

    pub async fn close(&self, id: &Uuid) -> bool {
        self.sessions.write().await.remove(id).is_some()
    }

    /// Number of sessions currently held, idle ones included.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// The caller's session, placed in request extensions by [`session_middleware`].
#[derive(Clone, Debug)]
pub struct SessionHandle {
    pub id: Uuid,
    pub session: Arc<Mutex<Session>>,
}

pub async fn session_middleware(
    State(sessions): State<SessionStore>,
    mut req: Request,
    next: Next,
) -> Response {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .and_then(|token| Uuid::parse_str(token.trim()).ok());

    let handle = match token {
        Some(id) => sessions
            .get(&id)
            .await
            .map(|session| SessionHandle { id, session }),
        None => None,
    };

    match handle {
        Some(handle) => {
            req.extensions_mut().insert(handle);
            next.run(req).await
        }
        None => to_response(
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "Missing or unknown session"
                })),
            ),
            Err(ApiError::SessionMissing),
        ),
    }
}
