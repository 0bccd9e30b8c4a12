//! # Session Store & Gate
//!
//! Server-side sessions keyed by a random token carried in an `HttpOnly`
//! cookie.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Session Lifecycle                                 │
//! │                                                                         │
//! │  POST /login (valid credentials)                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SessionStore::create() → UUID v4 token, expiry = now + lifetime       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Set-Cookie: session=<token>; Path=/; HttpOnly; SameSite=Lax           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Every protected request ── require_login middleware                   │
//! │       ├── token found & unexpired → CurrentUser extension, continue    │
//! │       └── missing/unknown/expired → 303 See Other → /login             │
//! │                                                                         │
//! │  GET /logout → remove token server-side, expire the cookie             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Sessions live in process memory; a restart logs everyone out. That is
//! the accepted trade for a single-shop deployment.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use axum::extract::{Request, State};
use axum::http::{header, HeaderMap};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::AppState;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "session";

/// The logged-in identity attached to each authenticated request.
///
/// Handlers take this as an `Extension` when they need to know who is
/// acting; nothing reads ambient global state.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: i64,
    pub username: String,
}

#[derive(Debug, Clone)]
struct Session {
    user_id: i64,
    username: String,
    expires_at: DateTime<Utc>,
}

/// In-memory session store shared across request handlers.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    lifetime: Duration,
}

impl SessionStore {
    /// Creates a store whose sessions live for `lifetime_secs` seconds.
    pub fn new(lifetime_secs: i64) -> Self {
        SessionStore {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            lifetime: Duration::seconds(lifetime_secs),
        }
    }

    /// Creates a session for the user and returns its token.
    pub fn create(&self, user_id: i64, username: &str) -> String {
        let token = Uuid::new_v4().to_string();
        let session = Session {
            user_id,
            username: username.to_string(),
            expires_at: Utc::now() + self.lifetime,
        };

        // A poisoned lock means another thread panicked mid-write; the
        // session map is a plain HashMap, so the data is still usable.
        let mut sessions = self.sessions.write().unwrap_or_else(|e| e.into_inner());
        sessions.insert(token.clone(), session);

        debug!(user_id = %user_id, "Session created");
        token
    }

    /// Resolves a token to its user, dropping the session if it expired.
    pub fn resolve(&self, token: &str) -> Option<CurrentUser> {
        let mut sessions = self.sessions.write().unwrap_or_else(|e| e.into_inner());

        match sessions.get(token) {
            Some(session) if session.expires_at > Utc::now() => Some(CurrentUser {
                user_id: session.user_id,
                username: session.username.clone(),
            }),
            Some(_) => {
                sessions.remove(token);
                None
            }
            None => None,
        }
    }

    /// Removes a session (logout).
    pub fn remove(&self, token: &str) {
        let mut sessions = self.sessions.write().unwrap_or_else(|e| e.into_inner());
        sessions.remove(token);
    }
}

/// Extracts the session token from a `Cookie` header.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;

    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name == SESSION_COOKIE {
            Some(value.to_string())
        } else {
            None
        }
    })
}

/// `Set-Cookie` value that installs a session token.
pub fn login_cookie(token: &str) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax")
}

/// `Set-Cookie` value that clears the session cookie.
pub fn logout_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Middleware gating every protected route.
///
/// Missing, unknown, and expired tokens are all answered the same way:
/// a `303 See Other` redirect to `/login`.
pub async fn require_login(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let user = session_token(request.headers()).and_then(|token| state.sessions.resolve(&token));

    match user {
        Some(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        None => {
            warn!(path = %request.uri().path(), "Unauthenticated request, redirecting to login");
            Redirect::to("/login").into_response()
        }
    }
}
