use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

use super::health;
use super::state::AppState;
use super::users;

/// Create user routes, mounted under `/users`
pub fn create_users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list_users))
        .route("/create", post(users::create_user))
        .route("/search", get(users::search_users))
        .route("/update/{user_id}", patch(users::update_user_fields))
        .route("/update-all/{user_id}", put(users::update_all_user_fields))
        .route("/delete/{user_id}", delete(users::delete_user))
        .route("/{user_id}", get(users::get_user))
}

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // User management
        .nest("/users", create_users_router())
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
