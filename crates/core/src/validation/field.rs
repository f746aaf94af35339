//! Single-field pattern validators.
//!
//! Each validator trims the raw input, tests it against one fixed pattern,
//! and returns a [`FieldOutcome`]: either accepted, or rejected with the
//! fixed human-readable message the form displays inline.

use regex::Regex;

/// Error text shown next to the fiscal code input.
pub const FISCAL_CODE_ERROR: &str =
    "The fiscal code must contain exactly 16 alphanumeric characters.";

/// Error text shown next to the register number input.
pub const REGISTER_ERROR: &str = "The register must contain at least 6 digits.";

/// Error text shown next to the unique code input.
pub const UNIQUE_CODE_ERROR: &str =
    "The unique code must contain at least 8 alphanumeric characters.";

const FISCAL_CODE_PATTERN: &str = r"(?i)^[A-Z0-9]{16}$";
const REGISTER_PATTERN: &str = r"^\d{6,}$";
const UNIQUE_CODE_PATTERN: &str = r"^[A-Za-z0-9]{8,}$";

/// Result of validating a single text field.
///
/// When `accepted` is `false`, `error_message` carries the text to display
/// in the field's error element; when `true` it is `None`, which tells the
/// caller to clear any previously displayed error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldOutcome {
    pub accepted: bool,
    pub error_message: Option<&'static str>,
}

impl FieldOutcome {
    fn accept() -> Self {
        Self {
            accepted: true,
            error_message: None,
        }
    }

    fn reject(message: &'static str) -> Self {
        Self {
            accepted: false,
            error_message: Some(message),
        }
    }
}

/// Validate a fiscal code: exactly 16 alphanumeric characters, any case.
pub fn validate_fiscal_code(value: &str) -> FieldOutcome {
    check_pattern(value, FISCAL_CODE_PATTERN, FISCAL_CODE_ERROR)
}

/// Validate a register number: at least 6 digits, nothing else.
pub fn validate_register_number(value: &str) -> FieldOutcome {
    check_pattern(value, REGISTER_PATTERN, REGISTER_ERROR)
}

/// Validate a professor unique code: at least 8 alphanumeric characters.
pub fn validate_unique_code(value: &str) -> FieldOutcome {
    check_pattern(value, UNIQUE_CODE_PATTERN, UNIQUE_CODE_ERROR)
}

fn check_pattern(value: &str, pattern: &str, message: &'static str) -> FieldOutcome {
    let re = Regex::new(pattern).expect("field pattern is a valid regex");
    if re.is_match(value.trim()) {
        FieldOutcome::accept()
    } else {
        FieldOutcome::reject(message)
    }
}
