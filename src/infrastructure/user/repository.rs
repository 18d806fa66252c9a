//! In-memory user repository implementation

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::user::{matches_birth_date_range, merge_patch, User, UserPatchRequest, UserRepository};
use crate::domain::DomainError;

/// In-memory implementation of UserRepository
///
/// A single lock guards the whole sequence so that a bounds check and the
/// mutation that depends on it happen atomically.
#[derive(Debug)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<Vec<User>>>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Create a repository with initial users, in the given order
    #[cfg(test)]
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(RwLock::new(users)),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn user_not_found() -> DomainError {
    DomainError::not_found("User not found.")
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn add(&self, user: User) -> Result<usize, DomainError> {
        let mut users = self.users.write().await;
        users.push(user);
        Ok(users.len() - 1)
    }

    async fn get(&self, index: usize) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(index).cloned())
    }

    async fn replace(&self, index: usize, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        let slot = users.get_mut(index).ok_or_else(user_not_found)?;
        *slot = user.clone();
        Ok(user)
    }

    async fn patch(&self, index: usize, patch: &UserPatchRequest) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        let slot = users.get_mut(index).ok_or_else(user_not_found)?;

        let merged = merge_patch(slot, patch).map_err(|e| DomainError::validation(e.to_string()))?;
        *slot = merged.clone();

        Ok(merged)
    }

    async fn remove(&self, index: usize) -> Result<Option<User>, DomainError> {
        let mut users = self.users.write().await;

        if index < users.len() {
            Ok(Some(users.remove(index)))
        } else {
            Ok(None)
        }
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.clone())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let users = self.users.read().await;
        Ok(users.len())
    }

    async fn search(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<User>, DomainError> {
        let users = self.users.read().await;

        let result: Vec<User> = users
            .iter()
            .filter(|u| matches_birth_date_range(u, from, to))
            .cloned()
            .collect();

        Ok(result)
    }
}
