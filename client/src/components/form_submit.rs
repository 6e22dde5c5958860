//! Submit wiring shared by the auth forms.

use std::future::Future;

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::net::types::{AuthError, Session};
use crate::state::form::FormState;
use crate::util::validation::FormSchema;

/// Handle a form submit event.
///
/// Validates, then calls `call` with the typed payload on the browser task
/// queue. Failures land in the form's root error and are logged; success
/// navigates home, replacing the form's history entry.
pub fn handle_submit<S, F, Fut, N>(ev: SubmitEvent, form: RwSignal<FormState<S>>, navigate: N, action: &'static str, call: F)
where
    S: FormSchema,
    F: FnOnce(S::Output) -> Fut + 'static,
    Fut: Future<Output = Result<Session, AuthError>> + 'static,
    N: Fn(&str, NavigateOptions) + 'static,
{
    ev.prevent_default();
    let Some(payload) = form.try_update(FormState::begin_submit).flatten() else {
        return;
    };

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let result = call(payload).await;
        if let Err(error) = &result {
            log::error!("{action} error: {error:?}");
        }
        if let Some(nav) = form.try_update(|f| f.finish_submit(result)).flatten() {
            navigate(nav.path, nav.options());
        }
    });

    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (payload, navigate, action, call);
    }
}
