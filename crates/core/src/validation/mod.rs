//! Form-field validation. Pure logic, no network access.
//!
//! Every check here is synchronous and idempotent: safe to run on each
//! keystroke or once at submit time, with identical results.

pub mod field;
pub mod password;

pub use field::{validate_fiscal_code, validate_register_number, validate_unique_code, FieldOutcome};
pub use password::{evaluate_password, PasswordChecklist};
