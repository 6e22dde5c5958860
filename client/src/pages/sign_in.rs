//! `/sign-in` route. Signed-in visitors never reach this page: the server
//! redirects them home before rendering.

use leptos::prelude::*;

use crate::components::sign_in_form::SignInForm;

#[component]
pub fn SignInPage() -> impl IntoView {
    view! {
        <div class="auth-page">
            <SignInForm/>
        </div>
    }
}
