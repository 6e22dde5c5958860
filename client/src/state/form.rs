//! Form controller state: field values, touch tracking, errors, and the
//! submit lifecycle.
//!
//! SYSTEM CONTEXT
//! ==============
//! Form components keep one `RwSignal<FormState<S>>` per mounted form. The
//! gateway call itself happens in the component; this module decides when a
//! call may start and what to do with its result.
//!
//! Validation timing: a field surfaces errors once it has been blurred, or
//! once the form has seen a submit attempt. Before that, typing is silent.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use std::future::Future;

use leptos_router::NavigateOptions;

use crate::net::types::AuthError;
use crate::util::validation::{FieldErrors, FormSchema};

pub const HOME_ROUTE: &str = "/";

/// Where to go after a successful submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Navigation {
    pub path: &'static str,
    /// Replace the current history entry instead of pushing a new one.
    pub replace: bool,
}

impl Navigation {
    /// Home, replacing the form's history entry.
    #[must_use]
    pub fn home() -> Self {
        Self { path: HOME_ROUTE, replace: true }
    }

    #[must_use]
    pub fn options(self) -> NavigateOptions {
        NavigateOptions { replace: self.replace, ..NavigateOptions::default() }
    }
}

/// State of one mounted form.
#[derive(Clone, Debug)]
pub struct FormState<S: FormSchema> {
    input: S,
    touched: Vec<S::Field>,
    errors: FieldErrors<S::Field>,
    root_error: Option<String>,
    submitting: bool,
    submit_count: u32,
}

impl<S: FormSchema> Default for FormState<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S: FormSchema> FormState<S> {
    #[must_use]
    pub fn new(input: S) -> Self {
        Self {
            input,
            touched: Vec::new(),
            errors: FieldErrors::new(),
            root_error: None,
            submitting: false,
            submit_count: 0,
        }
    }

    #[must_use]
    pub fn input(&self) -> &S {
        &self.input
    }

    #[must_use]
    pub fn value(&self, field: S::Field) -> &str {
        self.input.value(field)
    }

    #[must_use]
    pub fn error(&self, field: S::Field) -> Option<&str> {
        self.errors.get(field)
    }

    #[must_use]
    pub fn errors(&self) -> &FieldErrors<S::Field> {
        &self.errors
    }

    #[must_use]
    pub fn root_error(&self) -> Option<&str> {
        self.root_error.as_deref()
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    #[must_use]
    pub fn is_touched(&self, field: S::Field) -> bool {
        self.touched.contains(&field)
    }

    #[must_use]
    pub fn submit_count(&self) -> u32 {
        self.submit_count
    }

    /// Apply a change event.
    pub fn change(&mut self, field: S::Field, value: String) {
        self.input.set_value(field, value);
        if self.is_touched(field) || self.submit_count > 0 {
            self.revalidate(field);
        }
    }

    /// Apply a blur event: the field becomes touched and is validated.
    pub fn blur(&mut self, field: S::Field) {
        self.touch(field);
        self.revalidate(field);
    }

    /// Start a submission.
    ///
    /// Returns the validated payload when the gateway may be called. Returns
    /// `None` while a submission is already in flight, or when validation
    /// fails (field errors are then populated).
    pub fn begin_submit(&mut self) -> Option<S::Output> {
        if self.submitting {
            return None;
        }
        self.submit_count += 1;
        self.root_error = None;
        for field in S::FIELDS {
            self.touch(*field);
        }
        match self.input.validate() {
            Ok(output) => {
                self.errors.clear();
                self.submitting = true;
                Some(output)
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }

    /// Resolve an in-flight submission with the gateway result.
    ///
    /// Failure stores the provider message as the root error and keeps
    /// field values. Success yields the navigation to perform.
    pub fn finish_submit<T>(&mut self, result: Result<T, AuthError>) -> Option<Navigation> {
        self.submitting = false;
        match result {
            Ok(_) => Some(Navigation::home()),
            Err(error) => {
                self.root_error = Some(error.message);
                None
            }
        }
    }

    fn touch(&mut self, field: S::Field) {
        if !self.is_touched(field) {
            self.touched.push(field);
        }
    }

    fn revalidate(&mut self, field: S::Field) {
        let message = match self.input.validate() {
            Ok(_) => None,
            Err(errors) => errors.get(field).map(str::to_owned),
        };
        self.errors.set(field, message, S::FIELDS);
    }
}

/// Run a full submission against `call` without a reactive wrapper.
///
/// Returns the navigation to perform on success.
pub async fn run_submit<S, F, Fut, T>(form: &mut FormState<S>, call: F) -> Option<Navigation>
where
    S: FormSchema,
    F: FnOnce(S::Output) -> Fut,
    Fut: Future<Output = Result<T, AuthError>>,
{
    let payload = form.begin_submit()?;
    let result = call(payload).await;
    form.finish_submit(result)
}
