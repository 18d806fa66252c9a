//! User domain
//!
//! This module provides the user record, the inbound payloads, and the rules
//! deciding whether a payload is acceptable and how it is applied, plus the
//! repository trait for positional storage.

mod entity;
mod repository;
mod request;
pub mod rules;
mod validation;

pub use entity::User;
pub use repository::UserRepository;
pub use request::{UserCreateRequest, UserPatchRequest};
pub use rules::{convert_to_user, matches_birth_date_range, merge_patch, min_birth_date_at};
pub use validation::{
    check_age_at, parse_date, today, validate_age, validate_age_at, validate_email,
    UserValidationError,
};

#[cfg(test)]
pub use repository::mock::MockUserRepository;
