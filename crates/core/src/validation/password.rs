//! Live password-strength checklist.
//!
//! Unlike the field validators, the checklist never blocks anything: it is
//! re-evaluated on every input change and each rule is rendered as
//! satisfied or not. A deny-list of well-known passwords swaps the length
//! rule's label for a warning instead of adding a sixth rule.

/// Special characters the password rule accepts.
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*()";

/// Passwords rejected outright, compared case-insensitively.
pub const COMMON_PASSWORDS: &[&str] = &["password", "12345678", "qwerty", "letmein", "admin"];

/// Label of the length rule under normal circumstances.
pub const LENGTH_RULE_LABEL: &str = "At least 8 characters";

/// Label of the length rule when the password is deny-listed.
pub const TOO_COMMON_LABEL: &str = "This password is too common!";

/// Per-rule evaluation of a candidate password.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordChecklist {
    /// Length is at least 8 characters.
    pub length: bool,
    pub uppercase: bool,
    pub lowercase: bool,
    pub digit: bool,
    /// Contains at least one character from [`SPECIAL_CHARACTERS`].
    pub special: bool,
    /// Exactly matches a deny-listed password, ignoring case.
    pub too_common: bool,
}

impl PasswordChecklist {
    /// Whether all five strength rules are satisfied.
    pub fn all_satisfied(&self) -> bool {
        self.length && self.uppercase && self.lowercase && self.digit && self.special
    }

    /// Whether the password is acceptable: every rule satisfied and not
    /// on the deny list.
    pub fn is_acceptable(&self) -> bool {
        self.all_satisfied() && !self.too_common
    }

    /// Label to display for the length rule.
    ///
    /// A deny-list hit replaces the label with the warning text.
    pub fn length_rule_label(&self) -> &'static str {
        if self.too_common {
            TOO_COMMON_LABEL
        } else {
            LENGTH_RULE_LABEL
        }
    }

    /// Whether the length rule should render as marked. A deny-listed
    /// password marks the rule regardless of length so the warning label
    /// stands out.
    pub fn length_rule_marked(&self) -> bool {
        self.length || self.too_common
    }
}

/// Evaluate every checklist rule against the raw input.
pub fn evaluate_password(value: &str) -> PasswordChecklist {
    let lowered = value.to_lowercase();
    PasswordChecklist {
        length: value.chars().count() >= 8,
        uppercase: value.chars().any(|c| c.is_ascii_uppercase()),
        lowercase: value.chars().any(|c| c.is_ascii_lowercase()),
        digit: value.chars().any(|c| c.is_ascii_digit()),
        special: value.chars().any(|c| SPECIAL_CHARACTERS.contains(c)),
        too_common: COMMON_PASSWORDS.contains(&lowered.as_str()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strong_password_satisfies_every_rule() {
        let checklist = evaluate_password("Abcdef1!");
        assert!(checklist.length);
        assert!(checklist.uppercase);
        assert!(checklist.lowercase);
        assert!(checklist.digit);
        assert!(checklist.special);
        assert!(!checklist.too_common);
        assert!(checklist.all_satisfied());
        assert!(checklist.is_acceptable());
    }

    #[test]
    fn lowercase_only_password_satisfies_length_and_lowercase() {
        let checklist = evaluate_password("abcdefgh");
        assert!(checklist.length);
        assert!(checklist.lowercase);
        assert!(!checklist.uppercase);
        assert!(!checklist.digit);
        assert!(!checklist.special);
        assert!(!checklist.all_satisfied());
    }

    #[test]
    fn deny_listed_password_switches_length_label() {
        let checklist = evaluate_password("qwerty");
        assert!(checklist.too_common);
        assert_eq!(checklist.length_rule_label(), TOO_COMMON_LABEL);
        assert!(checklist.length_rule_marked());
        assert!(!checklist.is_acceptable());
    }

    #[test]
    fn deny_list_is_case_insensitive() {
        assert!(evaluate_password("PassWord").too_common);
        assert!(evaluate_password("LETMEIN").too_common);
    }

    #[test]
    fn near_miss_of_deny_list_is_not_flagged() {
        let checklist = evaluate_password("password1");
        assert!(!checklist.too_common);
        assert_eq!(checklist.length_rule_label(), LENGTH_RULE_LABEL);
    }

    #[test]
    fn special_characters_outside_the_fixed_set_do_not_count() {
        let checklist = evaluate_password("Abcdef1~");
        assert!(!checklist.special);
    }

    #[test]
    fn empty_password_satisfies_nothing() {
        let checklist = evaluate_password("");
        assert!(!checklist.length);
        assert!(!checklist.uppercase);
        assert!(!checklist.lowercase);
        assert!(!checklist.digit);
        assert!(!checklist.special);
        assert!(!checklist.too_common);
    }
}
