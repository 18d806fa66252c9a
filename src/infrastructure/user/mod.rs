//! User infrastructure module
//!
//! This module provides the in-memory positional user store and the user
//! service that applies the validation rules before touching it.

mod repository;
mod service;

pub use repository::InMemoryUserRepository;
pub use service::{UserService, MAX_MIN_AGE};
