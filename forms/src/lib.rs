//! Shared form inputs and acceptance rules for the auth and profile flows.
//!
//! This crate is compiled into both `server` and `client`. Handlers and form
//! components call the same `validate_*` functions, so an input the browser
//! accepts is exactly an input the API accepts. Every validator is pure and
//! returns either the normalized value or the full list of field errors.

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;

use serde::{Deserialize, Serialize};

/// Minimum password length, counted in characters.
pub const MIN_PASSWORD_LEN: usize = 6;
/// Maximum display-name length, counted in characters.
pub const MAX_NAME_LEN: usize = 60;
/// Maximum bio length, counted in characters.
pub const MAX_BIO_LEN: usize = 250;
/// Maximum phone length, counted in characters.
pub const MAX_PHONE_LEN: usize = 20;

// =============================================================================
// ERRORS
// =============================================================================

/// A single rejected field with a user-facing message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    /// Input field name as it appears in the JSON body (e.g. `"email"`).
    pub field: String,
    /// Message safe to show next to the field.
    pub message: String,
}

impl FieldError {
    #[must_use]
    pub fn new(field: &str, message: &str) -> Self {
        Self { field: field.to_owned(), message: message.to_owned() }
    }
}

/// Outcome of a validator: the normalized value or every field error found.
pub type Validated<T> = Result<T, Vec<FieldError>>;

fn finish<T>(errors: Vec<FieldError>, value: impl FnOnce() -> T) -> Validated<T> {
    if errors.is_empty() { Ok(value()) } else { Err(errors) }
}

// =============================================================================
// INPUTS
// =============================================================================

/// Body of `POST /api/users/login`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginInput {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Body of `POST /api/users/register`.
///
/// `password2` is the confirmation field of the register form. The API does
/// not require it, but when present it must match `password`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password2: Option<String>,
}

/// Body of `PATCH /api/users/updateuser`. Absent fields are left unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

/// Body of `PATCH /api/users/changepassword`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangePasswordInput {
    #[serde(default)]
    pub old_password: String,
    #[serde(default)]
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password2: Option<String>,
}

// =============================================================================
// VALIDATED VALUES
// =============================================================================

/// Login credentials with a normalized email.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// A registration that passed every rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// A password change that passed every rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PasswordChange {
    pub old_password: String,
    pub new_password: String,
}

// =============================================================================
// FIELD RULES
// =============================================================================

/// Trim and lowercase an email, returning `None` unless it has exactly one
/// `@`, a non-empty local part, and a dotted domain.
#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_ascii_lowercase();
    let (local, domain) = normalized.split_once('@')?;
    if local.is_empty() || domain.contains('@') || normalized.contains(char::is_whitespace) {
        return None;
    }
    let (host, tld) = domain.rsplit_once('.')?;
    if host.is_empty() || tld.is_empty() {
        return None;
    }
    Some(normalized)
}

fn check_email(raw: &str, errors: &mut Vec<FieldError>) -> String {
    if raw.trim().is_empty() {
        errors.push(FieldError::new("email", "Email is required"));
        return String::new();
    }
    normalize_email(raw).unwrap_or_else(|| {
        errors.push(FieldError::new("email", "Please enter a valid email"));
        String::new()
    })
}

fn check_name(raw: &str, errors: &mut Vec<FieldError>) -> String {
    let name = raw.trim();
    if name.is_empty() {
        errors.push(FieldError::new("name", "Name is required"));
    } else if name.chars().count() > MAX_NAME_LEN {
        errors.push(FieldError::new("name", "Name must be at most 60 characters"));
    }
    name.to_owned()
}

fn check_new_password(password: &str, confirmation: Option<&str>, errors: &mut Vec<FieldError>) {
    if password.is_empty() {
        errors.push(FieldError::new("password", "Password is required"));
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        errors.push(FieldError::new("password", "Password must be at least 6 characters"));
    }
    if confirmation.is_some_and(|c| c != password) {
        errors.push(FieldError::new("password2", "Passwords do not match"));
    }
}

fn is_phone_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')')
}

// =============================================================================
// VALIDATORS
// =============================================================================

/// Validate a login form. Password length is not checked here so accounts
/// created under older rules can still sign in.
///
/// # Errors
///
/// Returns every field error when the email is missing or malformed, or the
/// password is empty.
pub fn validate_login(input: &LoginInput) -> Validated<Credentials> {
    let mut errors = Vec::new();
    let email = check_email(&input.email, &mut errors);
    if input.password.is_empty() {
        errors.push(FieldError::new("password", "Password is required"));
    }
    finish(errors, || Credentials { email, password: input.password.clone() })
}

/// Validate a registration form.
///
/// # Errors
///
/// Returns every field error found across name, email, password, and the
/// optional confirmation.
pub fn validate_register(input: &RegisterInput) -> Validated<Registration> {
    let mut errors = Vec::new();
    let name = check_name(&input.name, &mut errors);
    let email = check_email(&input.email, &mut errors);
    check_new_password(&input.password, input.password2.as_deref(), &mut errors);
    finish(errors, || Registration { name, email, password: input.password.clone() })
}

/// Validate a partial profile update, trimming every provided field.
///
/// # Errors
///
/// Returns every field error for provided fields that break a rule.
pub fn validate_profile_update(input: &ProfileUpdate) -> Validated<ProfileUpdate> {
    let mut errors = Vec::new();
    let name = input.name.as_deref().map(|n| check_name(n, &mut errors));

    let phone = input.phone.as_deref().map(str::trim).map(|phone| {
        if phone.chars().count() > MAX_PHONE_LEN || !phone.chars().all(is_phone_char) {
            errors.push(FieldError::new("phone", "Please enter a valid phone number"));
        }
        phone.to_owned()
    });

    let bio = input.bio.as_deref().map(str::trim).map(|bio| {
        if bio.chars().count() > MAX_BIO_LEN {
            errors.push(FieldError::new("bio", "Bio must be at most 250 characters"));
        }
        bio.to_owned()
    });

    finish(errors, || ProfileUpdate { name, phone, bio })
}

/// Validate a password change.
///
/// # Errors
///
/// Returns every field error when the old password is missing or the new one
/// breaks the password rules.
pub fn validate_change_password(input: &ChangePasswordInput) -> Validated<PasswordChange> {
    let mut errors = Vec::new();
    if input.old_password.is_empty() {
        errors.push(FieldError::new("old_password", "Old password is required"));
    }
    check_new_password(&input.password, input.password2.as_deref(), &mut errors);
    finish(errors, || PasswordChange {
        old_password: input.old_password.clone(),
        new_password: input.password.clone(),
    })
}
