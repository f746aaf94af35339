//! Whole-form validation for the registration form.
//!
//! Individual inputs are checked live by [`crate::validation`]; this module
//! validates the assembled form in one pass before it is submitted, wiring
//! the same field checks into the `validator` derive.

use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::validation::{evaluate_password, validate_fiscal_code};

/// The registration form as posted by the sign-up page.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    #[validate(length(
        min = 4,
        max = 30,
        message = "username must be between 4 and 30 characters"
    ))]
    pub username: String,

    #[validate(custom(function = check_password))]
    pub password: String,

    /// Must repeat `password` exactly.
    #[validate(must_match(other = password, message = "Password confirmation does not match"))]
    pub confirm: String,

    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,

    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,

    #[validate(custom(function = check_fiscal_code))]
    pub fiscal_code: String,
}

fn check_fiscal_code(value: &str) -> Result<(), ValidationError> {
    let outcome = validate_fiscal_code(value);
    if outcome.accepted {
        return Ok(());
    }
    let mut error = ValidationError::new("fiscal_code");
    error.message = outcome.error_message.map(Into::into);
    Err(error)
}

fn check_password(value: &str) -> Result<(), ValidationError> {
    let checklist = evaluate_password(value);
    if checklist.is_acceptable() {
        return Ok(());
    }
    let mut error = ValidationError::new("password");
    error.message = Some(if checklist.too_common {
        crate::validation::password::TOO_COMMON_LABEL.into()
    } else {
        "Password must contain at least 8 characters with uppercase, lowercase, \
         a digit and a special character"
            .into()
    });
    Err(error)
}
