//! Page-entry decisions shared by the server gate and the pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each page route is a two-state machine over session presence, evaluated
//! once at entry. The server applies [`entry_decision`] before rendering the
//! auth forms; the home page renders from [`home_view`].

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::Session;
use crate::state::auth::AuthState;
use crate::state::form::HOME_ROUTE;

pub const SIGN_IN_ROUTE: &str = "/sign-in";
pub const SIGN_UP_ROUTE: &str = "/sign-up";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageRoute {
    Home,
    SignIn,
    SignUp,
}

impl PageRoute {
    /// Match a request path, tolerating one trailing slash.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = match path.strip_suffix('/') {
            Some("") | None => path,
            Some(rest) => rest,
        };
        match trimmed {
            HOME_ROUTE => Some(Self::Home),
            SIGN_IN_ROUTE => Some(Self::SignIn),
            SIGN_UP_ROUTE => Some(Self::SignUp),
            _ => None,
        }
    }

    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Home => HOME_ROUTE,
            Self::SignIn => SIGN_IN_ROUTE,
            Self::SignUp => SIGN_UP_ROUTE,
        }
    }

    /// Auth forms are pointless to a signed-in user.
    #[must_use]
    pub fn redirects_when_authenticated(self) -> bool {
        matches!(self, Self::SignIn | Self::SignUp)
    }
}

/// `rel` for in-app links to `route`.
///
/// Gated routes get `"external"` so the router does a full page load and the
/// server gate sees the visit.
#[must_use]
pub fn entry_link_rel(route: PageRoute) -> Option<&'static str> {
    route.redirects_when_authenticated().then_some("external")
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageAccess {
    Unauthenticated,
    Authenticated,
}

impl PageAccess {
    #[must_use]
    pub fn from_session(session: Option<&Session>) -> Self {
        if session.is_some() { Self::Authenticated } else { Self::Unauthenticated }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageEntry {
    Render,
    Redirect(&'static str),
}

#[must_use]
pub fn entry_decision(route: PageRoute, access: PageAccess) -> PageEntry {
    match access {
        PageAccess::Authenticated if route.redirects_when_authenticated() => PageEntry::Redirect(HOME_ROUTE),
        _ => PageEntry::Render,
    }
}

/// What the home page shows for a given auth state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HomeView {
    Loading,
    /// Greeting with the user's name or email.
    Greeting(String),
    /// Links to sign in and sign up.
    Anonymous,
}

#[must_use]
pub fn home_view(state: &AuthState) -> HomeView {
    if state.loading {
        return HomeView::Loading;
    }
    match &state.session {
        Some(session) => HomeView::Greeting(session.display_name().to_owned()),
        None => HomeView::Anonymous,
    }
}
