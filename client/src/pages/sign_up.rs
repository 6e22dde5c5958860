//! `/sign-up` route, gated like `/sign-in`.

use leptos::prelude::*;

use crate::components::sign_up_form::SignUpForm;

#[component]
pub fn SignUpPage() -> impl IntoView {
    view! {
        <div class="auth-page">
            <SignUpForm/>
        </div>
    }
}
