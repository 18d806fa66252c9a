//! Application state for shared services

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::{DomainError, User, UserCreateRequest, UserPatchRequest, UserRepository};
use crate::infrastructure::user::UserService;

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
}

impl AppState {
    pub fn new(user_service: Arc<dyn UserServiceTrait>) -> Self {
        Self { user_service }
    }
}

/// Trait for user service operations
#[async_trait::async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn create(&self, request: UserCreateRequest) -> Result<(usize, User), DomainError>;
    async fn patch(&self, index: usize, request: UserPatchRequest) -> Result<User, DomainError>;
    async fn replace_all(
        &self,
        index: usize,
        request: UserCreateRequest,
    ) -> Result<User, DomainError>;
    async fn delete(&self, index: usize) -> Result<User, DomainError>;
    async fn search(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<User>, DomainError>;
    async fn get(&self, index: usize) -> Result<Option<User>, DomainError>;
    async fn list(&self) -> Result<Vec<User>, DomainError>;
    async fn count(&self) -> Result<usize, DomainError>;
}

#[async_trait::async_trait]
impl<R: UserRepository + 'static> UserServiceTrait for UserService<R> {
    async fn create(&self, request: UserCreateRequest) -> Result<(usize, User), DomainError> {
        UserService::create(self, request).await
    }

    async fn patch(&self, index: usize, request: UserPatchRequest) -> Result<User, DomainError> {
        UserService::patch(self, index, request).await
    }

    async fn replace_all(
        &self,
        index: usize,
        request: UserCreateRequest,
    ) -> Result<User, DomainError> {
        UserService::replace_all(self, index, request).await
    }

    async fn delete(&self, index: usize) -> Result<User, DomainError> {
        UserService::delete(self, index).await
    }

    async fn search(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<User>, DomainError> {
        UserService::search(self, from, to).await
    }

    async fn get(&self, index: usize) -> Result<Option<User>, DomainError> {
        UserService::get(self, index).await
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        UserService::list(self).await
    }

    async fn count(&self) -> Result<usize, DomainError> {
        UserService::count(self).await
    }
}
