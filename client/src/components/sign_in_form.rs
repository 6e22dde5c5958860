//! Email + password sign-in form.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use super::form_field::{RootError, bound_field};
use super::form_submit::handle_submit;
use crate::net::api::BrowserGateway;
use crate::net::gateway::AuthGateway;
use crate::state::form::FormState;
use crate::util::auth::{PageRoute, SIGN_UP_ROUTE, entry_link_rel};
use crate::util::validation::{SignInField, SignInInput};

#[component]
pub fn SignInForm() -> impl IntoView {
    let form = RwSignal::new(FormState::<SignInInput>::default());
    let navigate = use_navigate();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        handle_submit(ev, form, navigate.clone(), "Sign in", |credentials| async move {
            BrowserGateway.sign_in(&credentials).await
        });
    };

    view! {
        <div class="card auth-card">
            <h1 class="auth-card__title">"Sign In"</h1>
            <form id="sign-in-form" class="auth-form" novalidate=true on:submit=on_submit>
                {bound_field(form, SignInField::Email)}
                {bound_field(form, SignInField::Password)}
                <RootError message=Signal::derive(move || form.with(|f| f.root_error().map(str::to_owned)))/>
                <button
                    class="button"
                    type="submit"
                    form="sign-in-form"
                    disabled=move || form.with(FormState::is_submitting)
                >
                    "Sign In"
                </button>
                <p class="auth-form__switch">
                    "Don't have an account? "
                    <a href=SIGN_UP_ROUTE rel=entry_link_rel(PageRoute::SignUp) class="auth-form__link">"Sign up"</a>
                </p>
            </form>
        </div>
    }
}
