//! # Dukaan Server
//!
//! HTTP application for the Dukaan shop manager.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Dukaan HTTP Server                               │
//! │                                                                         │
//! │  Browser/client ──► axum Router                                        │
//! │       │                  │                                              │
//! │       │          TraceLayer (request logging)                          │
//! │       │                  │                                              │
//! │       │          require_login middleware ── /login exempt            │
//! │       │                  │                                              │
//! │       ▼                  ▼                                              │
//! │  handlers::{auth, inventory, sales, expenses, easypaisa, reports}      │
//! │                          │                                              │
//! │                          ▼                                              │
//! │                dukaan-db repositories ──► SQLite                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The router is built by [`router`] from an [`AppState`], so integration
//! tests drive the exact production routing table with
//! `tower::ServiceExt::oneshot` and no socket.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod session;

use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use dukaan_db::Database;

use crate::config::ServerConfig;
use crate::error::ApiResult;
use crate::session::SessionStore;

/// Shared application state.
///
/// Cheap to clone: the database handle wraps a pooled connection set and
/// the session store wraps an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub sessions: SessionStore,
    pub config: ServerConfig,
}

impl AppState {
    /// Builds the state, deriving the session store from the config.
    pub fn new(db: Database, config: ServerConfig) -> Self {
        let sessions = SessionStore::new(config.session_lifetime_secs);
        AppState {
            db,
            sessions,
            config,
        }
    }
}

/// Seeds the admin account from the configured credentials.
///
/// No-op when the username already exists; the stored hash is never
/// overwritten.
pub async fn bootstrap_admin(state: &AppState) -> ApiResult<()> {
    let hash = auth::hash_password(&state.config.admin_password)?;
    let created = state
        .db
        .users()
        .create_if_missing(&state.config.admin_username, &hash)
        .await?;

    if created {
        info!(username = %state.config.admin_username, "Admin account bootstrapped");
    }

    Ok(())
}

/// Builds the full application router.
pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        // Reports & dashboards
        .route("/", get(handlers::reports::index))
        .route("/dashboard", get(handlers::reports::dashboard))
        .route("/revenue", get(handlers::reports::revenue))
        .route("/reports", get(handlers::reports::reports))
        // Inventory
        .route("/inventory", get(handlers::inventory::list))
        .route("/inventory/add", post(handlers::inventory::add))
        .route("/inventory/edit/:id", post(handlers::inventory::edit))
        .route("/inventory/delete/:id", get(handlers::inventory::delete))
        .route("/api/inventory/add", post(handlers::inventory::api_add))
        .route("/api/inventory/search", get(handlers::inventory::api_search))
        // Sales
        .route("/sales", get(handlers::sales::list))
        .route("/sales/add", post(handlers::sales::add))
        // Expenses
        .route("/expenses", get(handlers::expenses::list))
        .route("/expenses/add", post(handlers::expenses::add))
        .route("/expenses/delete/:id", get(handlers::expenses::delete))
        // EasyPaisa
        .route("/easypaisa", get(handlers::easypaisa::list))
        .route("/easypaisa/add", post(handlers::easypaisa::add))
        .route("/easypaisa/delete/:id", get(handlers::easypaisa::delete))
        // Session teardown stays behind the gate
        .route("/logout", get(handlers::auth::logout))
        .route_layer(from_fn_with_state(state.clone(), session::require_login));

    Router::new()
        .route(
            "/login",
            get(handlers::auth::login_page).post(handlers::auth::login),
        )
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
