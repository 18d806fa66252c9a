//! User Registry
//!
//! An in-memory user record service:
//! - Email and minimum-age validation on creation
//! - Partial and full updates addressed by positional index
//! - Birth date range search with exclusive bounds

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use tracing::info;

use api::state::AppState;
use infrastructure::user::{InMemoryUserRepository, UserService};

/// Create the application state with custom configuration
pub fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let repository = Arc::new(InMemoryUserRepository::new());
    let user_service = UserService::new(repository, config.users.min_age)?;

    info!(
        min_age = user_service.min_age(),
        min_birth_date = %user_service.min_birth_date(),
        "User service ready"
    );

    Ok(AppState::new(Arc::new(user_service)))
}
