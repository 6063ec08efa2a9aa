//! Field-by-field input validation.
//!
//! Each check appends to a collector so a single response names every
//! offending field.

use crate::domain::types::{ChitGroupPatch, NewChitGroup};
use crate::error::{ChitServiceError, FieldError};

#[derive(Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ensure(&mut self, ok: bool, field: &'static str, message: &str) {
        if !ok {
            self.errors.push(FieldError {
                field,
                message: message.to_owned(),
            });
        }
    }

    pub fn finish(self) -> Result<(), ChitServiceError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ChitServiceError::Validation(self.errors))
        }
    }
}

/// Usernames: 3–30 chars, ASCII alphanumeric plus underscore.
pub fn valid_username(username: &str) -> bool {
    (3..=30).contains(&username.len())
        && username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

pub fn validate_registration(
    username: &str,
    password: &str,
    name: &str,
    phone: &str,
) -> Result<(), ChitServiceError> {
    let mut v = Validator::new();
    v.ensure(
        valid_username(username),
        "username",
        "must be 3-30 characters, alphanumeric or underscore",
    );
    v.ensure(
        password.len() >= 8,
        "password",
        "must be at least 8 characters",
    );
    v.ensure(!name.trim().is_empty(), "name", "must not be empty");
    v.ensure(!phone.trim().is_empty(), "phone", "must not be empty");
    v.finish()
}

pub fn validate_new_password(password: &str) -> Result<(), ChitServiceError> {
    let mut v = Validator::new();
    v.ensure(
        password.len() >= 8,
        "new_password",
        "must be at least 8 characters",
    );
    v.finish()
}

pub fn validate_new_group(group: &NewChitGroup) -> Result<(), ChitServiceError> {
    let mut v = Validator::new();
    v.ensure(!group.name.trim().is_empty(), "name", "must not be empty");
    v.ensure(group.value > 0, "value", "must be positive");
    v.ensure(
        (1..=60).contains(&group.duration_months),
        "duration_months",
        "must be between 1 and 60",
    );
    v.ensure(
        (2..=50).contains(&group.members_count),
        "members_count",
        "must be between 2 and 50",
    );
    v.finish()
}

pub fn validate_group_patch(patch: &ChitGroupPatch) -> Result<(), ChitServiceError> {
    let mut v = Validator::new();
    if let Some(ref name) = patch.name {
        v.ensure(!name.trim().is_empty(), "name", "must not be empty");
    }
    if let Some(value) = patch.value {
        v.ensure(value > 0, "value", "must be positive");
    }
    if let Some(duration) = patch.duration_months {
        v.ensure(
            (1..=60).contains(&duration),
            "duration_months",
            "must be between 1 and 60",
        );
    }
    if let Some(count) = patch.members_count {
        v.ensure(
            (2..=50).contains(&count),
            "members_count",
            "must be between 2 and 50",
        );
    }
    v.finish()
}

pub fn validate_month_number(month_number: i32) -> Result<(), ChitServiceError> {
    let mut v = Validator::new();
    v.ensure(month_number >= 1, "month_number", "must be at least 1");
    v.finish()
}

pub fn validate_amount(amount: i64, field: &'static str) -> Result<(), ChitServiceError> {
    let mut v = Validator::new();
    v.ensure(amount > 0, field, "must be positive");
    v.finish()
}
