//! Conversion, merge and search rules for user records

use chrono::{Months, NaiveDate};

use super::entity::User;
use super::request::{UserCreateRequest, UserPatchRequest};
use super::validation::{parse_date, UserValidationError};

/// Convert a create/replace payload into a user
///
/// Fields are copied verbatim; only the birth date is parsed.
pub fn convert_to_user(request: UserCreateRequest) -> Result<User, UserValidationError> {
    let raw_birth_date = request
        .birth_date
        .ok_or(UserValidationError::MissingBirthDate)?;
    let birth_date = parse_date(&raw_birth_date)?;

    Ok(User::new(
        request.email,
        request.first_name,
        request.last_name,
        birth_date,
    )
    .with_address(request.address)
    .with_phone_number(request.phone_number))
}

/// Apply the fields present in `patch` to a copy of `existing`
///
/// The birth date is parsed like on creation but the age rules are not
/// re-applied, so a patch can store a date that creation would refuse.
pub fn merge_patch(existing: &User, patch: &UserPatchRequest) -> Result<User, UserValidationError> {
    let mut user = existing.clone();

    if let Some(email) = &patch.email {
        user.set_email(email);
    }
    if let Some(first_name) = &patch.first_name {
        user.set_first_name(first_name);
    }
    if let Some(last_name) = &patch.last_name {
        user.set_last_name(last_name);
    }
    if let Some(birth_date) = &patch.birth_date {
        user.set_birth_date(parse_date(birth_date)?);
    }
    if let Some(address) = &patch.address {
        user.set_address(address);
    }
    if let Some(phone_number) = &patch.phone_number {
        user.set_phone_number(phone_number);
    }

    Ok(user)
}

/// Whether the user was born strictly between `from` and `to`
pub fn matches_birth_date_range(user: &User, from: NaiveDate, to: NaiveDate) -> bool {
    let birth_date = user.birth_date();
    birth_date > from && birth_date < to
}

/// Latest birth date that still satisfies `min_age` on `today`
///
/// February 29 maps to February 28 in non-leap target years.
pub fn min_birth_date_at(today: NaiveDate, min_age: u32) -> NaiveDate {
    today
        .checked_sub_months(Months::new(min_age.saturating_mul(12)))
        .unwrap_or(NaiveDate::MIN)
}
