//! Field normalization and pure server-side validation.
//!
//! Text fields are trimmed and HTML-escaped before anything looks at them,
//! so embedded markup is inert both in the rendered pages and in the store.
//! Passwords are kept raw (escaping would corrupt them before hashing) and
//! wrapped in [`SecretString`] so they never leak through `Debug` output.
//!
//! [`validate`] is pure: it takes the normalized fields and returns every
//! failure, in evaluation order, without touching HTTP or storage.

use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use std::fmt;

/// HTML-escape `& < > " '`, leaving everything else untouched.
#[must_use]
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());

    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }

    out
}

/// Trim surrounding whitespace, then escape. Applied to every text field
/// before validation and storage, never to the passwords.
#[must_use]
pub fn clean(input: &str) -> String {
    escape(input.trim())
}

pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").map_or(false, |re| re.is_match(email))
}

pub fn valid_phone(phone: &str) -> bool {
    Regex::new(r"^[0-9]{10}$").map_or(false, |re| re.is_match(phone))
}

/// A submission after normalization, ready for validation.
#[derive(Debug)]
pub struct Submission {
    pub fullname: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
}

/// A user-facing reason a submitted field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationFailure {
    FullnameRequired,
    UsernameRequired,
    EmailRequired,
    EmailInvalid,
    PasswordRequired,
    PasswordTooShort,
    PasswordMismatch,
    PhoneFormat,
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::FullnameRequired => "Full name is required.",
            Self::UsernameRequired => "Username is required.",
            Self::EmailRequired => "Email is required.",
            Self::EmailInvalid => "Email is not valid.",
            Self::PasswordRequired => "Password is required.",
            Self::PasswordTooShort => "Password must be at least 6 characters.",
            Self::PasswordMismatch => "Passwords do not match.",
            Self::PhoneFormat => "Phone must be 10 digits if provided.",
        };

        f.write_str(message)
    }
}

/// Check every rule and collect every failure, not just the first.
///
/// An empty phone is valid; the format is only enforced when one was given.
#[must_use]
pub fn validate(submission: &Submission) -> Vec<ValidationFailure> {
    let mut failures = Vec::new();

    if submission.fullname.is_empty() {
        failures.push(ValidationFailure::FullnameRequired);
    }

    if submission.username.is_empty() {
        failures.push(ValidationFailure::UsernameRequired);
    }

    if submission.email.is_empty() {
        failures.push(ValidationFailure::EmailRequired);
    } else if !valid_email(&submission.email) {
        failures.push(ValidationFailure::EmailInvalid);
    }

    let password = submission.password.expose_secret();

    if password.is_empty() {
        failures.push(ValidationFailure::PasswordRequired);
    } else if password.chars().count() < 6 {
        failures.push(ValidationFailure::PasswordTooShort);
    }

    if password != submission.confirm_password.expose_secret() {
        failures.push(ValidationFailure::PasswordMismatch);
    }

    if !submission.phone.is_empty() && !valid_phone(&submission.phone) {
        failures.push(ValidationFailure::PhoneFormat);
    }

    failures
}
