//! Inbound user payloads

use serde::{Deserialize, Deserializer, Serialize};

use super::validation::{validate_email, UserValidationError};

/// Payload for creating a user or replacing one entirely
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreateRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub last_name: String,
    /// Raw `YYYY-MM-DD` string, parsed on conversion
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
}

/// Treat an explicit `null` like a missing field
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl UserCreateRequest {
    /// Check field presence and email shape
    ///
    /// Every failing field is reported, in field order.
    pub fn validate(&self) -> Result<(), Vec<UserValidationError>> {
        let mut errors = Vec::new();

        if self.email.trim().is_empty() {
            errors.push(UserValidationError::EmptyEmail);
        } else if let Err(e) = validate_email(&self.email) {
            errors.push(e);
        }

        if self.birth_date.is_none() {
            errors.push(UserValidationError::MissingBirthDate);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Payload for a partial update; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatchRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
}

impl UserPatchRequest {
    /// Check the email shape, if an email was supplied
    pub fn validate(&self) -> Result<(), Vec<UserValidationError>> {
        match self.email.as_deref().map(validate_email) {
            Some(Err(e)) => Err(vec![e]),
            _ => Ok(()),
        }
    }

    /// Whether the patch carries no fields at all
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.birth_date.is_none()
            && self.address.is_none()
            && self.phone_number.is_none()
    }
}
