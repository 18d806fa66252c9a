//! User service wiring the validation rules to the store

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::domain::user::{
    check_age_at, convert_to_user, min_birth_date_at, today, User, UserCreateRequest,
    UserPatchRequest, UserRepository, UserValidationError,
};
use crate::domain::DomainError;

/// Largest accepted minimum age, in years
pub const MAX_MIN_AGE: u32 = 150;

/// User service for validated record management
#[derive(Debug)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    min_age: u32,
}

fn join_errors(errors: &[UserValidationError]) -> DomainError {
    let message = errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    DomainError::validation(message)
}

fn validation_error(error: UserValidationError) -> DomainError {
    DomainError::validation(error.to_string())
}

impl<R: UserRepository> UserService<R> {
    /// Create a new user service
    ///
    /// `min_age` is fixed for the lifetime of the service.
    pub fn new(repository: Arc<R>, min_age: u32) -> Result<Self, DomainError> {
        if min_age > MAX_MIN_AGE {
            return Err(DomainError::configuration(format!(
                "Minimum age {} exceeds the maximum of {} years",
                min_age, MAX_MIN_AGE
            )));
        }

        Ok(Self {
            repository,
            min_age,
        })
    }

    /// Configured minimum age in years
    pub fn min_age(&self) -> u32 {
        self.min_age
    }

    /// Latest acceptable birth date, computed from the current date on every call
    pub fn min_birth_date(&self) -> NaiveDate {
        min_birth_date_at(today(), self.min_age)
    }

    /// Create a new user and return its index
    pub async fn create(&self, request: UserCreateRequest) -> Result<(usize, User), DomainError> {
        request.validate().map_err(|e| join_errors(&e))?;

        let user = convert_to_user(request).map_err(validation_error)?;

        let today = today();
        let min_birth_date = min_birth_date_at(today, self.min_age);
        if let Err(e) = check_age_at(user.birth_date(), min_birth_date, self.min_age, today) {
            warn!(birth_date = %user.birth_date(), reason = %e, "Rejected user creation");
            return Err(validation_error(e));
        }

        let index = self.repository.add(user.clone()).await?;
        info!(index, "User created");

        Ok((index, user))
    }

    /// Apply the supplied fields to the user at `index`
    ///
    /// Age rules are not re-applied to a patched birth date.
    pub async fn patch(&self, index: usize, request: UserPatchRequest) -> Result<User, DomainError> {
        request.validate().map_err(|e| join_errors(&e))?;

        if request.is_empty() {
            debug!(index, "Patch carries no fields");
        }

        let user = self.repository.patch(index, &request).await?;
        info!(index, "User fields updated");

        Ok(user)
    }

    /// Replace every field of the user at `index`
    ///
    /// The payload is converted like on creation but age rules are not applied.
    pub async fn replace_all(
        &self,
        index: usize,
        request: UserCreateRequest,
    ) -> Result<User, DomainError> {
        request.validate().map_err(|e| join_errors(&e))?;

        let user = convert_to_user(request).map_err(validation_error)?;
        let user = self.repository.replace(index, user).await?;
        info!(index, "All user fields updated");

        Ok(user)
    }

    /// Delete the user at `index`; later users move down one position
    pub async fn delete(&self, index: usize) -> Result<User, DomainError> {
        let user = self
            .repository
            .remove(index)
            .await?
            .ok_or_else(|| DomainError::not_found("User not found."))?;
        info!(index, "User deleted");

        Ok(user)
    }

    /// Users born strictly between `from` and `to`
    pub async fn search(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<User>, DomainError> {
        if from > to {
            return Err(DomainError::invalid_range(
                "'From' date must be before 'To' date.",
            ));
        }

        let users = self.repository.search(from, to).await?;
        debug!(%from, %to, found = users.len(), "Searched users by birth date");

        Ok(users)
    }

    /// Get the user at `index`
    pub async fn get(&self, index: usize) -> Result<Option<User>, DomainError> {
        self.repository.get(index).await
    }

    /// List all users in storage order
    pub async fn list(&self) -> Result<Vec<User>, DomainError> {
        self.repository.list().await
    }

    /// Count users
    pub async fn count(&self) -> Result<usize, DomainError> {
        self.repository.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::MockUserRepository;
    use crate::infrastructure::user::repository::InMemoryUserRepository;
    use chrono::{Duration, Months};

    fn create_service() -> UserService<InMemoryUserRepository> {
        let repository = Arc::new(InMemoryUserRepository::new());
        UserService::new(repository, 18).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_request(first_name: &str, birth_date: &str) -> UserCreateRequest {
        UserCreateRequest {
            email: "john.doe@example.com".to_string(),
            first_name: first_name.to_string(),
            last_name: "Doe".to_string(),
            birth_date: Some(birth_date.to_string()),
            ..Default::default()
        }
    }

    fn validation_message(err: DomainError) -> String {
        match err {
            DomainError::Validation { message } => message,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unreasonable_min_age() {
        let repository = Arc::new(InMemoryUserRepository::new());
        let result = UserService::new(repository, 151);
        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }

    #[test]
    fn test_min_birth_date_tracks_today() {
        let service = create_service();
        let expected = today().checked_sub_months(Months::new(18 * 12)).unwrap();

        assert_eq!(service.min_age(), 18);
        assert_eq!(service.min_birth_date(), expected);
    }

    #[tokio::test]
    async fn test_create_user() {
        let service = create_service();

        let (index, user) = service.create(make_request("John", "1990-01-01")).await.unwrap();

        assert_eq!(index, 0);
        assert_eq!(user.birth_date(), date(1990, 1, 1));
        assert_eq!(service.get(0).await.unwrap(), Some(user));
    }

    #[tokio::test]
    async fn test_create_exactly_min_age() {
        let service = create_service();
        let birth_date = service.min_birth_date().format("%Y-%m-%d").to_string();

        assert!(service.create(make_request("John", &birth_date)).await.is_ok());
    }

    #[tokio::test]
    async fn test_create_one_day_under_min_age() {
        let service = create_service();
        let birth_date = (service.min_birth_date() + Duration::days(1))
            .format("%Y-%m-%d")
            .to_string();

        let err = service.create(make_request("John", &birth_date)).await.unwrap_err();

        assert_eq!(validation_message(err), "User must be at least 18 years old.");
    }

    #[tokio::test]
    async fn test_create_future_birth_date() {
        let service = create_service();
        let tomorrow = (today() + Duration::days(1)).format("%Y-%m-%d").to_string();

        let err = service.create(make_request("John", &tomorrow)).await.unwrap_err();

        assert_eq!(
            validation_message(err),
            "Birth date must be earlier than the current date."
        );
        assert_eq!(service.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_under_min_age() {
        let service = create_service();
        let sixteen = today()
            .checked_sub_months(Months::new(16 * 12))
            .unwrap()
            .format("%Y-%m-%d")
            .to_string();

        let err = service.create(make_request("John", &sixteen)).await.unwrap_err();

        assert_eq!(validation_message(err), "User must be at least 18 years old.");
        assert_eq!(service.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_reports_every_field_error() {
        let service = create_service();
        let request = UserCreateRequest {
            email: "".to_string(),
            birth_date: None,
            ..Default::default()
        };

        let err = service.create(request).await.unwrap_err();

        assert_eq!(
            validation_message(err),
            "Email is required; Birth date is required"
        );
    }

    #[tokio::test]
    async fn test_create_invalid_date() {
        let service = create_service();

        let err = service
            .create(make_request("John", "1990-13-01"))
            .await
            .unwrap_err();

        assert!(validation_message(err).contains("1990-13-01"));
    }

    #[tokio::test]
    async fn test_patch_user() {
        let service = create_service();
        service.create(make_request("John", "1990-01-01")).await.unwrap();

        let patch = UserPatchRequest {
            first_name: Some("Jane".to_string()),
            ..Default::default()
        };
        let user = service.patch(0, patch).await.unwrap();

        assert_eq!(user.first_name(), "Jane");
        assert_eq!(user.last_name(), "Doe");
    }

    #[tokio::test]
    async fn test_patch_does_not_revalidate_age() {
        let service = create_service();
        service.create(make_request("John", "1990-01-01")).await.unwrap();

        let tomorrow = (today() + Duration::days(1)).format("%Y-%m-%d").to_string();
        let patch = UserPatchRequest {
            birth_date: Some(tomorrow),
            ..Default::default()
        };

        let user = service.patch(0, patch).await.unwrap();
        assert!(user.birth_date() > today());
    }

    #[tokio::test]
    async fn test_patch_invalid_email() {
        let service = create_service();
        service.create(make_request("John", "1990-01-01")).await.unwrap();

        let patch = UserPatchRequest {
            email: Some("nope".to_string()),
            ..Default::default()
        };

        let err = service.patch(0, patch).await.unwrap_err();
        assert_eq!(validation_message(err), "Invalid email format");
    }

    #[tokio::test]
    async fn test_patch_not_found() {
        let service = create_service();

        let result = service.patch(0, UserPatchRequest::default()).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_replace_all() {
        let service = create_service();
        service.create(make_request("John", "1990-01-01")).await.unwrap();

        let replacement = UserCreateRequest {
            email: "john.doe_Updated@example.com".to_string(),
            first_name: "John_Updated".to_string(),
            last_name: "Doe_Updated".to_string(),
            birth_date: Some("1990-01-02".to_string()),
            ..Default::default()
        };

        let user = service.replace_all(0, replacement).await.unwrap();

        assert_eq!(user.first_name(), "John_Updated");
        assert_eq!(user.birth_date(), date(1990, 1, 2));
        assert_eq!(service.get(0).await.unwrap(), Some(user));
    }

    #[tokio::test]
    async fn test_replace_all_does_not_check_age() {
        let service = create_service();
        service.create(make_request("John", "1990-01-01")).await.unwrap();

        let young = today().format("%Y-%m-%d").to_string();
        let user = service.replace_all(0, make_request("Kid", &young)).await.unwrap();

        assert_eq!(user.birth_date(), today());
    }

    #[tokio::test]
    async fn test_replace_all_not_found() {
        let service = create_service();

        let result = service.replace_all(3, make_request("John", "1990-01-01")).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_replace_all_format_error_before_lookup() {
        let service = create_service();

        let result = service.replace_all(3, make_request("John", "not-a-date")).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_delete_shifts_indices() {
        let service = create_service();
        service.create(make_request("First", "1980-01-01")).await.unwrap();
        service.create(make_request("Second", "1981-01-01")).await.unwrap();

        let deleted = service.delete(0).await.unwrap();

        assert_eq!(deleted.first_name(), "First");
        let now_first = service.get(0).await.unwrap().unwrap();
        assert_eq!(now_first.first_name(), "Second");
    }

    #[tokio::test]
    async fn test_delete_not_found() {
        let service = create_service();

        let result = service.delete(0).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_search() {
        let service = create_service();
        service.create(make_request("OnFrom", "1990-01-01")).await.unwrap();
        service.create(make_request("Inside", "1990-01-02")).await.unwrap();
        service.create(make_request("OnTo", "2000-12-31")).await.unwrap();

        let found = service.search(date(1990, 1, 1), date(2000, 12, 31)).await.unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].first_name(), "Inside");
    }

    #[tokio::test]
    async fn test_search_rejects_reversed_range() {
        let service = create_service();

        let result = service.search(date(2000, 1, 1), date(1990, 1, 1)).await;
        assert!(matches!(result, Err(DomainError::InvalidRange { .. })));
    }

    #[tokio::test]
    async fn test_search_same_day_range_is_empty() {
        let service = create_service();
        service.create(make_request("John", "1990-01-01")).await.unwrap();

        let found = service.search(date(1990, 1, 1), date(1990, 1, 1)).await.unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_repository_failure_propagates() {
        let repository = Arc::new(MockUserRepository::new());
        let service = UserService::new(repository.clone(), 18).unwrap();

        repository.set_should_fail(true).await;

        let result = service.create(make_request("John", "1990-01-01")).await;
        assert!(matches!(result, Err(DomainError::Internal { .. })));
        assert!(service.list().await.is_err());
    }
}
