//! Home page: greeting and sign-out for signed-in users, auth links otherwise.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session is looked up in the browser after hydration. The page follows
//! the shared `SessionStore` through an explicit subscription that is dropped
//! on cleanup, so a sign-out re-renders the anonymous view.

use leptos::prelude::*;

use crate::state::auth::AuthState;
use crate::state::session::SessionStore;
use crate::util::auth::{HomeView, PageRoute, SIGN_IN_ROUTE, SIGN_UP_ROUTE, entry_link_rel, home_view};

#[component]
pub fn HomePage() -> impl IntoView {
    let store = expect_context::<SessionStore>();
    let auth = RwSignal::new(AuthState::pending());

    let subscription = store.subscribe(move |session| {
        auth.try_update(|state| state.resolve(session.cloned()));
    });
    let cleanup_store = store.clone();
    on_cleanup(move || {
        cleanup_store.unsubscribe(subscription);
    });

    #[cfg(feature = "hydrate")]
    {
        use crate::net::gateway::AuthGateway;

        let store = store.clone();
        leptos::task::spawn_local(async move {
            let session = crate::net::api::BrowserGateway.current_session().await;
            auth.try_update(|state| state.resolve(session.clone()));
            store.set(session);
        });
    }

    let sign_out = move || {
        #[cfg(feature = "hydrate")]
        {
            use crate::net::gateway::AuthGateway;

            let store = store.clone();
            leptos::task::spawn_local(async move {
                crate::net::api::BrowserGateway.sign_out().await;
                store.set(None);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = &store;
    };

    view! {
        <div class="home-page">
            {move || match home_view(&auth.get()) {
                HomeView::Loading => view! { <p class="home-page__loading">"Loading..."</p> }.into_any(),
                HomeView::Greeting(name) => {
                    let sign_out = sign_out.clone();
                    view! {
                        <div class="home-page__session">
                            <h3 class="home-page__title">"Welcome back, " {name} "!"</h3>
                            <button class="button button--outline" on:click=move |_| sign_out()>
                                "Sign Out"
                            </button>
                        </div>
                    }
                        .into_any()
                }
                HomeView::Anonymous => {
                    view! {
                        <h3 class="home-page__title">
                            "Welcome to Where It Goes! Please "
                            <a href=SIGN_IN_ROUTE rel=entry_link_rel(PageRoute::SignIn)>"sign in"</a>
                            " or "
                            <a href=SIGN_UP_ROUTE rel=entry_link_rel(PageRoute::SignUp)>"sign up"</a>
                            " to continue."
                        </h3>
                    }
                        .into_any()
                }
            }}
        </div>
    }
}
