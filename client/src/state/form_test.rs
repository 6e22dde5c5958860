use std::cell::RefCell;

use futures::executor::block_on;

use super::*;
use crate::net::gateway::AuthGateway;
use crate::net::types::{Session, SessionUser, SignInCredentials, SignUpCredentials};
use crate::util::validation::{
    EMAIL_INVALID, PASSWORD_REQUIRED, PASSWORD_TOO_SHORT, SignInField, SignInInput, SignUpField, SignUpInput,
};

// =============================================================
// Helpers
// =============================================================

/// Gateway double that records calls and replays a canned result.
struct FakeGateway {
    result: Result<Session, AuthError>,
    sign_in_calls: RefCell<Vec<SignInCredentials>>,
    sign_up_calls: RefCell<Vec<(SignUpCredentials, String)>>,
}

impl FakeGateway {
    fn ok() -> Self {
        Self::with(Ok(Session {
            user: SessionUser { id: None, name: Some("Ada".to_owned()), email: "ada@example.com".to_owned() },
        }))
    }

    fn rejecting(message: &str) -> Self {
        Self::with(Err(AuthError::new(message)))
    }

    fn with(result: Result<Session, AuthError>) -> Self {
        Self { result, sign_in_calls: RefCell::new(Vec::new()), sign_up_calls: RefCell::new(Vec::new()) }
    }

    fn calls(&self) -> usize {
        self.sign_in_calls.borrow().len() + self.sign_up_calls.borrow().len()
    }
}

impl AuthGateway for FakeGateway {
    async fn sign_in(&self, credentials: &SignInCredentials) -> Result<Session, AuthError> {
        self.sign_in_calls.borrow_mut().push(credentials.clone());
        self.result.clone()
    }

    async fn sign_up(&self, credentials: &SignUpCredentials, callback_target: &str) -> Result<Session, AuthError> {
        self.sign_up_calls
            .borrow_mut()
            .push((credentials.clone(), callback_target.to_owned()));
        self.result.clone()
    }

    async fn sign_out(&self) {}

    async fn current_session(&self) -> Option<Session> {
        self.result.clone().ok()
    }
}

fn sign_in_form(email: &str, password: &str) -> FormState<SignInInput> {
    FormState::new(SignInInput::new(email, password))
}

fn submit_sign_in(form: &mut FormState<SignInInput>, gateway: &FakeGateway) -> Option<Navigation> {
    block_on(run_submit(form, |creds| async move { gateway.sign_in(&creds).await }))
}

fn submit_sign_up(form: &mut FormState<SignUpInput>, gateway: &FakeGateway) -> Option<Navigation> {
    block_on(run_submit(form, |creds| async move { gateway.sign_up(&creds, HOME_ROUTE).await }))
}

// =============================================================
// Touched policy
// =============================================================

#[test]
fn change_before_touch_surfaces_no_error() {
    let mut form = FormState::<SignInInput>::default();
    form.change(SignInField::Email, "not-an".to_owned());
    assert_eq!(form.error(SignInField::Email), None);
    assert!(!form.is_touched(SignInField::Email));
}

#[test]
fn blur_marks_touched_and_validates() {
    let mut form = FormState::<SignInInput>::default();
    form.change(SignInField::Email, "not-an".to_owned());
    form.blur(SignInField::Email);
    assert!(form.is_touched(SignInField::Email));
    assert_eq!(form.error(SignInField::Email), Some(EMAIL_INVALID));
}

#[test]
fn blur_validates_only_that_field() {
    let mut form = FormState::<SignInInput>::default();
    form.blur(SignInField::Email);
    assert_eq!(form.error(SignInField::Email), Some(EMAIL_INVALID));
    assert_eq!(form.error(SignInField::Password), None);
}

#[test]
fn blurs_out_of_order_keep_errors_in_field_order() {
    let mut form = FormState::<SignUpInput>::default();
    form.blur(SignUpField::Password);
    form.blur(SignUpField::Name);
    let fields: Vec<_> = form.errors().iter().map(|(field, _)| field).collect();
    assert_eq!(fields, vec![SignUpField::Name, SignUpField::Password]);
}

#[test]
fn change_after_touch_revalidates() {
    let mut form = FormState::<SignInInput>::default();
    form.blur(SignInField::Email);
    form.change(SignInField::Email, "ada@example.com".to_owned());
    assert_eq!(form.error(SignInField::Email), None);
    form.change(SignInField::Email, "ada@".to_owned());
    assert_eq!(form.error(SignInField::Email), Some(EMAIL_INVALID));
}

#[test]
fn change_after_failed_submit_revalidates() {
    let mut form = FormState::<SignUpInput>::default();
    assert!(form.begin_submit().is_none());
    form.change(SignUpField::Password, "secret".to_owned());
    assert_eq!(form.error(SignUpField::Password), None);
    assert_eq!(form.error(SignUpField::Name), Some(crate::util::validation::NAME_REQUIRED));
}

// =============================================================
// Submission
// =============================================================

#[test]
fn empty_password_blocks_sign_in_without_calling_gateway() {
    let gateway = FakeGateway::ok();
    let mut form = sign_in_form("ada@example.com", "");
    let nav = submit_sign_in(&mut form, &gateway);
    assert_eq!(nav, None);
    assert_eq!(form.error(SignInField::Password), Some(PASSWORD_REQUIRED));
    assert_eq!(gateway.calls(), 0);
    assert!(!form.is_submitting());
}

#[test]
fn short_password_blocks_sign_up_without_calling_gateway() {
    let gateway = FakeGateway::ok();
    let mut form = FormState::new(SignUpInput::new("Ada", "ada@example.com", "12345"));
    assert_eq!(submit_sign_up(&mut form, &gateway), None);
    assert_eq!(form.error(SignUpField::Password), Some(PASSWORD_TOO_SHORT));
    assert_eq!(gateway.calls(), 0);
}

#[test]
fn malformed_email_blocks_sign_up() {
    let gateway = FakeGateway::ok();
    let mut form = FormState::new(SignUpInput::new("Ada", "ada.example.com", "secret1"));
    assert_eq!(submit_sign_up(&mut form, &gateway), None);
    assert_eq!(form.error(SignUpField::Email), Some(EMAIL_INVALID));
    assert_eq!(gateway.calls(), 0);
}

#[test]
fn submit_touches_every_field() {
    let mut form = FormState::<SignUpInput>::default();
    let _ = form.begin_submit();
    for field in SignUpInput::FIELDS {
        assert!(form.is_touched(*field));
    }
    assert_eq!(form.submit_count(), 1);
}

#[test]
fn gateway_rejection_sets_root_error_and_keeps_values() {
    let gateway = FakeGateway::rejecting("Invalid credentials");
    let mut form = sign_in_form("ada@example.com", "hunter2");
    assert_eq!(submit_sign_in(&mut form, &gateway), None);
    assert_eq!(form.root_error(), Some("Invalid credentials"));
    assert_eq!(form.value(SignInField::Email), "ada@example.com");
    assert_eq!(form.value(SignInField::Password), "hunter2");
    assert!(form.errors().is_empty());
    assert!(!form.is_submitting());
    assert_eq!(gateway.calls(), 1);
}

#[test]
fn gateway_success_navigates_home_replacing_history() {
    let gateway = FakeGateway::ok();
    let mut form = sign_in_form("ada@example.com", "hunter2");
    let nav = submit_sign_in(&mut form, &gateway).unwrap();
    assert_eq!(nav, Navigation { path: "/", replace: true });
    assert!(nav.options().replace);
    assert_eq!(
        gateway.sign_in_calls.borrow().as_slice(),
        &[SignInCredentials { email: "ada@example.com".to_owned(), password: "hunter2".to_owned() }]
    );
}

#[test]
fn sign_up_sends_home_as_callback_target() {
    let gateway = FakeGateway::ok();
    let mut form = FormState::new(SignUpInput::new("Ada", "ada@example.com", "secret1"));
    assert_eq!(submit_sign_up(&mut form, &gateway), Some(Navigation::home()));
    let calls = gateway.sign_up_calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].1, "/");
    assert_eq!(calls[0].0.name, "Ada");
}

#[test]
fn second_submit_while_pending_is_ignored() {
    let mut form = sign_in_form("ada@example.com", "hunter2");
    assert!(form.begin_submit().is_some());
    assert!(form.is_submitting());
    assert!(form.begin_submit().is_none());
    assert_eq!(form.submit_count(), 1);
}

#[test]
fn resubmit_clears_previous_root_error() {
    let mut form = sign_in_form("ada@example.com", "hunter2");
    assert!(form.begin_submit().is_some());
    assert_eq!(form.finish_submit::<()>(Err(AuthError::new("Invalid credentials"))), None);
    assert_eq!(form.root_error(), Some("Invalid credentials"));
    assert!(form.begin_submit().is_some());
    assert_eq!(form.root_error(), None);
}
