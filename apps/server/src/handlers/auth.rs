//! Login and logout handlers.
//!
//! Both login failure modes (unknown username, wrong password) answer with
//! the same generic message so the response does not reveal which usernames
//! exist.

use axum::extract::State;
use axum::http::{header, HeaderMap};
use axum::response::{AppendHeaders, IntoResponse, Redirect, Response};
use axum::{Form, Json};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::auth::verify_password;
use crate::error::{ApiError, ApiResult};
use crate::session::{login_cookie, logout_cookie, session_token};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// `GET /login`: describes the login form for API clients.
pub async fn login_page() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Please log in",
        "fields": ["username", "password"],
    }))
}

/// `POST /login`: verifies credentials and installs a session cookie.
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> ApiResult<Response> {
    let user = state
        .db
        .users()
        .get_by_username(form.username.trim())
        .await?;

    let user = match user {
        Some(user) if verify_password(&form.password, &user.password_hash) => user,
        _ => {
            warn!(username = %form.username, "Login failed");
            return Err(ApiError::InvalidCredentials);
        }
    };

    let token = state.sessions.create(user.id, &user.username);
    info!(username = %user.username, "Login successful");

    Ok((
        AppendHeaders([(header::SET_COOKIE, login_cookie(&token))]),
        Redirect::to("/dashboard"),
    )
        .into_response())
}

/// `GET /logout`: drops the session and clears the cookie.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    if let Some(token) = session_token(&headers) {
        state.sessions.remove(&token);
    }

    (
        AppendHeaders([(header::SET_COOKIE, logout_cookie())]),
        Redirect::to("/login"),
    )
}
