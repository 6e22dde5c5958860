//! Form validation schemas for the sign-in and sign-up forms.
//!
//! DESIGN
//! ======
//! Each form is a candidate struct implementing [`FormSchema`]. Validation is a
//! pure function from the candidate to either the typed credentials or an
//! ordered list of per-field messages. The server runs the same schemas over
//! proxied request bodies.

#[cfg(test)]
#[path = "validation_test.rs"]
mod validation_test;

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::net::types::{SignInCredentials, SignUpCredentials};

pub const EMAIL_INVALID: &str = "Invalid email address";
pub const NAME_REQUIRED: &str = "Name is required";
pub const PASSWORD_REQUIRED: &str = "Password is required";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters long";
pub const SIGN_UP_PASSWORD_MIN_LEN: usize = 6;

// `regex` has no lookaround: the leading-dot and double-dot rules are checked
// separately in `is_valid_email`.
static EMAIL_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-\.]*[A-Za-z0-9_+\-]@(?:[A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$").ok()
});

/// Whether `email` matches the accepted address grammar.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    if email.starts_with('.') || email.contains("..") {
        return false;
    }
    EMAIL_PATTERN
        .as_ref()
        .is_some_and(|re| re.is_match(email))
}

// =============================================================================
// FIELD ERRORS
// =============================================================================

/// Per-field validation messages in field declaration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldErrors<F> {
    entries: Vec<(F, String)>,
}

impl<F> Default for FieldErrors<F> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<F: Copy + Eq> FieldErrors<F> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` for `field`, keeping the first message per field.
    pub fn push(&mut self, field: F, message: impl Into<String>) {
        if self.get(field).is_none() {
            self.entries.push((field, message.into()));
        }
    }

    /// Replace the message for `field`, or clear it when `message` is `None`.
    ///
    /// New entries are placed by their position in `order` (the form's
    /// declared fields), so the list stays in field order whatever the
    /// sequence of updates.
    pub fn set(&mut self, field: F, message: Option<String>, order: &[F]) {
        match (self.entries.iter().position(|(f, _)| *f == field), message) {
            (Some(idx), Some(message)) => self.entries[idx].1 = message,
            (Some(idx), None) => {
                self.entries.remove(idx);
            }
            (None, Some(message)) => {
                let rank = |f: F| order.iter().position(|o| *o == f).unwrap_or(order.len());
                let target = rank(field);
                let idx = self
                    .entries
                    .iter()
                    .position(|(f, _)| rank(*f) > target)
                    .unwrap_or(self.entries.len());
                self.entries.insert(idx, (field, message));
            }
            (None, None) => {}
        }
    }

    #[must_use]
    pub fn get(&self, field: F) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, message)| message.as_str())
    }

    #[must_use]
    pub fn first(&self) -> Option<(F, &str)> {
        self.entries
            .first()
            .map(|(field, message)| (*field, message.as_str()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (F, &str)> {
        self.entries
            .iter()
            .map(|(field, message)| (*field, message.as_str()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, Self> {
        if self.is_empty() { Ok(value()) } else { Err(self) }
    }
}

// =============================================================================
// SCHEMA TRAITS
// =============================================================================

/// Rendering metadata for a form field.
pub trait FieldSpec: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// HTML id and name of the input.
    fn id(self) -> &'static str;
    fn label(self) -> &'static str;
    fn input_type(self) -> &'static str;
    fn placeholder(self) -> &'static str;
}

/// A form candidate: raw field values plus the rules that turn them into a
/// typed payload.
pub trait FormSchema: Clone + Default + Send + Sync + 'static {
    type Field: FieldSpec;
    type Output: Clone + 'static;

    /// Fields in display and error order.
    const FIELDS: &'static [Self::Field];

    fn value(&self, field: Self::Field) -> &str;

    fn set_value(&mut self, field: Self::Field, value: String);

    /// Validate the whole candidate.
    ///
    /// # Errors
    ///
    /// Returns every failing field with its message, in [`Self::FIELDS`] order.
    fn validate(&self) -> Result<Self::Output, FieldErrors<Self::Field>>;
}

// =============================================================================
// SIGN IN
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignInField {
    Email,
    Password,
}

impl FieldSpec for SignInField {
    fn id(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Password => "password",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Email => "Email",
            Self::Password => "Password",
        }
    }

    fn input_type(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Password => "password",
        }
    }

    fn placeholder(self) -> &'static str {
        match self {
            Self::Email => "you@example.com",
            Self::Password => "password",
        }
    }
}

/// Raw sign-in form values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

impl SignInInput {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self { email: email.into(), password: password.into() }
    }
}

impl From<&SignInCredentials> for SignInInput {
    fn from(credentials: &SignInCredentials) -> Self {
        Self::new(credentials.email.clone(), credentials.password.clone())
    }
}

impl FormSchema for SignInInput {
    type Field = SignInField;
    type Output = SignInCredentials;

    const FIELDS: &'static [SignInField] = &[SignInField::Email, SignInField::Password];

    fn value(&self, field: SignInField) -> &str {
        match field {
            SignInField::Email => &self.email,
            SignInField::Password => &self.password,
        }
    }

    fn set_value(&mut self, field: SignInField, value: String) {
        match field {
            SignInField::Email => self.email = value,
            SignInField::Password => self.password = value,
        }
    }

    fn validate(&self) -> Result<SignInCredentials, FieldErrors<SignInField>> {
        let mut errors = FieldErrors::new();
        if !is_valid_email(&self.email) {
            errors.push(SignInField::Email, EMAIL_INVALID);
        }
        if self.password.is_empty() {
            errors.push(SignInField::Password, PASSWORD_REQUIRED);
        }
        errors.into_result(|| SignInCredentials { email: self.email.clone(), password: self.password.clone() })
    }
}

// =============================================================================
// SIGN UP
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignUpField {
    Name,
    Email,
    Password,
}

impl FieldSpec for SignUpField {
    fn id(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Password => "password",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Password => "Password",
        }
    }

    fn input_type(self) -> &'static str {
        match self {
            Self::Name => "text",
            Self::Email => "email",
            Self::Password => "password",
        }
    }

    fn placeholder(self) -> &'static str {
        match self {
            Self::Name => "Your Name",
            Self::Email => "you@example.com",
            Self::Password => "password",
        }
    }
}

/// Raw sign-up form values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignUpInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl SignUpInput {
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, password: impl Into<String>) -> Self {
        Self { name: name.into(), email: email.into(), password: password.into() }
    }
}

impl From<&SignUpCredentials> for SignUpInput {
    fn from(credentials: &SignUpCredentials) -> Self {
        Self::new(credentials.name.clone(), credentials.email.clone(), credentials.password.clone())
    }
}

impl FormSchema for SignUpInput {
    type Field = SignUpField;
    type Output = SignUpCredentials;

    const FIELDS: &'static [SignUpField] = &[SignUpField::Name, SignUpField::Email, SignUpField::Password];

    fn value(&self, field: SignUpField) -> &str {
        match field {
            SignUpField::Name => &self.name,
            SignUpField::Email => &self.email,
            SignUpField::Password => &self.password,
        }
    }

    fn set_value(&mut self, field: SignUpField, value: String) {
        match field {
            SignUpField::Name => self.name = value,
            SignUpField::Email => self.email = value,
            SignUpField::Password => self.password = value,
        }
    }

    fn validate(&self) -> Result<SignUpCredentials, FieldErrors<SignUpField>> {
        let mut errors = FieldErrors::new();
        if self.name.is_empty() {
            errors.push(SignUpField::Name, NAME_REQUIRED);
        }
        if !is_valid_email(&self.email) {
            errors.push(SignUpField::Email, EMAIL_INVALID);
        }
        if self.password.chars().count() < SIGN_UP_PASSWORD_MIN_LEN {
            errors.push(SignUpField::Password, PASSWORD_TOO_SHORT);
        }
        errors.into_result(|| SignUpCredentials {
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        })
    }
}
