//! User repository trait

use async_trait::async_trait;
use chrono::NaiveDate;
use std::fmt::Debug;

use super::entity::User;
use super::request::UserPatchRequest;
use crate::domain::DomainError;

/// Ordered storage for users, addressed by position
///
/// Removing a user shifts every later user down by one, so an index is
/// only meaningful for the state of the store at the time it is used.
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Append a user and return its index
    async fn add(&self, user: User) -> Result<usize, DomainError>;

    /// Get the user at `index`, if there is one
    async fn get(&self, index: usize) -> Result<Option<User>, DomainError>;

    /// Overwrite the user at `index`
    ///
    /// Fails with `NotFound` when the index is out of bounds.
    async fn replace(&self, index: usize, user: User) -> Result<User, DomainError>;

    /// Merge `patch` onto the user at `index` and store the result
    ///
    /// Fails with `NotFound` when the index is out of bounds and with
    /// `Validation` when the patch cannot be applied; the stored user is
    /// unchanged in both cases.
    async fn patch(&self, index: usize, patch: &UserPatchRequest) -> Result<User, DomainError>;

    /// Remove and return the user at `index`, shifting later users down
    async fn remove(&self, index: usize) -> Result<Option<User>, DomainError>;

    /// All users in storage order
    async fn list(&self) -> Result<Vec<User>, DomainError>;

    /// Number of stored users
    async fn count(&self) -> Result<usize, DomainError>;

    /// Users born strictly between `from` and `to`, in storage order
    async fn search(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<User>, DomainError>;
}
