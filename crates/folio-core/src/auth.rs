//! Request bodies for the external auth lifecycle.
//!
//! Sessions are cookie-based and owned by the backend; these types only
//! carry what the forms collect, after client-side checks.

use serde::Serialize;

use crate::field::{Field, FieldErrors, REQUIRED};

/// Minimum password length accepted at login and signup.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Minimum password length accepted when resetting a password.
pub const MIN_RESET_PASSWORD_LEN: usize = 6;

fn check_email(errors: &mut FieldErrors, email: &str) {
  if email.trim().is_empty() {
    errors.insert(Field::Email, REQUIRED);
  } else if !email.contains('@') {
    errors.insert(Field::Email, "not an email address");
  }
}

fn check_password(errors: &mut FieldErrors, field: Field, password: &str, min: usize) {
  if password.is_empty() {
    errors.insert(field, REQUIRED);
  } else if password.chars().count() < min {
    errors.insert(field, format!("must be at least {min} characters"));
  }
}

// ─── Login / signup ──────────────────────────────────────────────────────────

/// `POST /auth/login` body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginInput {
  pub email:       String,
  pub password:    String,
  pub remember_me: bool,
}

impl LoginInput {
  pub fn new(
    email: impl Into<String>,
    password: impl Into<String>,
    remember_me: bool,
  ) -> Result<Self, FieldErrors> {
    let input = Self {
      email: email.into().trim().to_owned(),
      password: password.into(),
      remember_me,
    };
    let mut errors = FieldErrors::new();
    check_email(&mut errors, &input.email);
    check_password(&mut errors, Field::Password, &input.password, MIN_PASSWORD_LEN);
    errors.into_result(input)
  }
}

/// `POST /auth/signup` body.
#[derive(Debug, Clone, Serialize)]
pub struct SignupInput {
  pub email:    String,
  pub password: String,
}

impl SignupInput {
  pub fn new(
    email: impl Into<String>,
    password: impl Into<String>,
  ) -> Result<Self, FieldErrors> {
    let input = Self {
      email:    email.into().trim().to_owned(),
      password: password.into(),
    };
    let mut errors = FieldErrors::new();
    check_email(&mut errors, &input.email);
    check_password(&mut errors, Field::Password, &input.password, MIN_PASSWORD_LEN);
    errors.into_result(input)
  }
}

// ─── Password reset ──────────────────────────────────────────────────────────

/// `POST /auth/RequestPasswordReset` body.
#[derive(Debug, Clone, Serialize)]
pub struct PasswordResetRequest {
  pub email: String,
}

impl PasswordResetRequest {
  pub fn new(email: impl Into<String>) -> Result<Self, FieldErrors> {
    let input = Self {
      email: email.into().trim().to_owned(),
    };
    let mut errors = FieldErrors::new();
    check_email(&mut errors, &input.email);
    errors.into_result(input)
  }
}

/// A single-use token from an emailed link (`/auth/verify`,
/// `/auth/CheckResetToken`).
#[derive(Debug, Clone, Serialize)]
pub struct TokenInput {
  pub token: String,
}

impl TokenInput {
  pub fn new(token: impl Into<String>) -> Result<Self, FieldErrors> {
    let input = Self {
      token: token.into().trim().to_owned(),
    };
    let mut errors = FieldErrors::new();
    errors.require(Field::Token, input.token.is_empty());
    errors.into_result(input)
  }
}

/// `POST /auth/ResetPassword` body.
#[derive(Debug, Clone, Serialize)]
pub struct PasswordReset {
  pub token:        String,
  pub new_password: String,
}

impl PasswordReset {
  /// Build the reset body; the confirmation must repeat the new password.
  pub fn new(
    token: impl Into<String>,
    new_password: impl Into<String>,
    confirmation: &str,
  ) -> Result<Self, FieldErrors> {
    let input = Self {
      token:        token.into().trim().to_owned(),
      new_password: new_password.into(),
    };
    let mut errors = FieldErrors::new();
    errors.require(Field::Token, input.token.is_empty());
    check_password(
      &mut errors,
      Field::Password,
      &input.new_password,
      MIN_RESET_PASSWORD_LEN,
    );
    if input.new_password != confirmation {
      errors.insert(Field::PasswordConfirmation, "passwords do not match");
    }
    errors.into_result(input)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn login_serialises_remember_me_in_camel_case() {
    let input = LoginInput::new("a@example.com", "password1", true).unwrap();
    let json = serde_json::to_value(&input).unwrap();
    assert_eq!(json["rememberMe"], true);
    assert_eq!(json["email"], "a@example.com");
  }

  #[test]
  fn short_password_and_bad_email_are_reported() {
    let errors = SignupInput::new("nobody", "short").unwrap_err();
    assert_eq!(errors.get(Field::Email), Some("not an email address"));
    assert_eq!(
      errors.get(Field::Password),
      Some("must be at least 8 characters")
    );
  }

  #[test]
  fn reset_requires_matching_confirmation() {
    let errors = PasswordReset::new("tok", "secret1", "secret2").unwrap_err();
    assert!(errors.contains(Field::PasswordConfirmation));
    assert!(!errors.contains(Field::Password));

    let ok = PasswordReset::new("tok", "secret1", "secret1").unwrap();
    let json = serde_json::to_value(&ok).unwrap();
    assert_eq!(json["new_password"], "secret1");
  }

  #[test]
  fn blank_token_is_required() {
    let errors = TokenInput::new("  ").unwrap_err();
    assert_eq!(errors.get(Field::Token), Some(REQUIRED));
  }
}
