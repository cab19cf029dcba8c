//! HTTP API server

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::menu::MenuService;

pub mod handlers;
pub mod state;

pub use handlers::ApiError;
pub use state::AppState;

/// Build the API router using the provided application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/hansik", get(handlers::get_menu))
        .route("/api/hansik/", get(handlers::get_menu))
        .route("/api/hansik/scrape", get(handlers::scrape_menu))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Router with permissive CORS for browser frontends on another origin
pub fn create_router_with_cors(state: AppState) -> Router {
    create_router(state).layer(CorsLayer::permissive())
}

/// Convenience helper serving the given menu service
pub fn create_menu_router(menu: MenuService) -> Router {
    create_router(AppState::new(menu))
}
