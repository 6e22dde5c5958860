//! Name + email + password sign-up form.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use super::form_field::{RootError, bound_field};
use super::form_submit::handle_submit;
use crate::net::api::BrowserGateway;
use crate::net::gateway::AuthGateway;
use crate::state::form::{FormState, HOME_ROUTE};
use crate::util::auth::{PageRoute, SIGN_IN_ROUTE, entry_link_rel};
use crate::util::validation::{SignUpField, SignUpInput};

#[component]
pub fn SignUpForm() -> impl IntoView {
    let form = RwSignal::new(FormState::<SignUpInput>::default());
    let navigate = use_navigate();

    // The provider's callback target is sent but navigation always goes home.
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        handle_submit(ev, form, navigate.clone(), "Sign up", |credentials| async move {
            BrowserGateway.sign_up(&credentials, HOME_ROUTE).await
        });
    };

    view! {
        <div class="card auth-card">
            <h1 class="auth-card__title">"Sign Up"</h1>
            <form id="sign-up-form" class="auth-form" novalidate=true on:submit=on_submit>
                {bound_field(form, SignUpField::Name)}
                {bound_field(form, SignUpField::Email)}
                {bound_field(form, SignUpField::Password)}
                <RootError message=Signal::derive(move || form.with(|f| f.root_error().map(str::to_owned)))/>
                <button
                    class="button"
                    type="submit"
                    form="sign-up-form"
                    disabled=move || form.with(FormState::is_submitting)
                >
                    "Sign Up"
                </button>
                <p class="auth-form__switch">
                    "Already have an account? "
                    <a href=SIGN_IN_ROUTE rel=entry_link_rel(PageRoute::SignIn) class="auth-form__link">"Sign in"</a>
                </p>
            </form>
        </div>
    }
}
