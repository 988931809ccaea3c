//! Route definitions.

use axum::{Router, routing::get};

use crate::{handlers, state::AppState};

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::landing))
        .route("/api", get(handlers::api_info))
        .route("/weather", get(handlers::current_weather))
        .route("/forecast", get(handlers::forecast))
        .route("/ascii", get(handlers::ascii))
        .fallback(handlers::fallback)
        .with_state(state)
}
