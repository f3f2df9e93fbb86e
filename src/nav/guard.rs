//! Navigation guard: pure allow/redirect decision per navigation attempt.
//!
//! DESIGN
//! ======
//! Evaluated in a fixed order against the target route's policy:
//! 1. login route while logged in -> resume the pending return target
//!    (landing route when there is none)
//! 2. session required, none present -> login, carrying the requested
//!    location as `?redirect=`
//! 3. role required, role differs -> landing route
//! 4. otherwise allow (public aliases forward to their target)
//!
//! Every redirect lands on a route whose policy the current session already
//! satisfies or on the public login route, so following redirects settles
//! within [`MAX_REDIRECT_HOPS`]. Denial is always a redirect, never an error.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use std::borrow::Cow;

use super::table::{self, AccessPolicy, LANDING_PATH, LOGIN_PATH, RouteDescriptor, RouteTarget, View};
use crate::state::session::SessionStore;
use crate::util::storage::SessionStorage;

/// Query parameter carrying the location to resume after login.
pub const RETURN_PARAM: &str = "redirect";

/// Upper bound on consecutive redirects from any starting location.
pub const MAX_REDIRECT_HOPS: usize = 2;

/// The parts of the session the guard looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub logged_in: bool,
    pub role: Option<String>,
}

impl SessionSnapshot {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_role(role: Option<&str>) -> Self {
        Self { logged_in: true, role: role.map(str::to_owned) }
    }

    pub fn of<S: SessionStorage>(store: &SessionStore<S>) -> Self {
        Self { logged_in: store.is_logged_in(), role: store.current_role().map(str::to_owned) }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow(View),
    Redirect {
        to: String,
        /// Location to resume once the user has signed in.
        return_to: Option<String>,
    },
}

impl Decision {
    /// Full redirect location, `None` for [`Decision::Allow`].
    pub fn location(&self) -> Option<String> {
        match self {
            Self::Allow(_) => None,
            Self::Redirect { to, return_to } => Some(redirect_location(to, return_to.as_deref())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("navigation from {start} did not settle within {} redirects", MAX_REDIRECT_HOPS)]
pub struct RedirectLoop {
    pub start: String,
}

/// Where a navigation attempt ends up after following the guard's redirects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub view: View,
    pub location: String,
    pub hops: usize,
}

/// Decide a navigation to `requested` (path plus optional query).
pub fn decide(requested: &str, session: &SessionSnapshot) -> Decision {
    evaluate(table::resolve(requested), requested, session)
}

/// Decide a navigation to `route`, reached via the location `requested`.
pub fn evaluate(route: &RouteDescriptor, requested: &str, session: &SessionSnapshot) -> Decision {
    if route.policy == AccessPolicy::Public && route.is_login() && session.logged_in {
        let resume = return_target_from_query(query_param(requested, RETURN_PARAM).as_deref());
        return Decision::Redirect { to: resume, return_to: None };
    }

    if route.policy.requires_session() && !session.logged_in {
        return Decision::Redirect { to: LOGIN_PATH.to_owned(), return_to: Some(requested.to_owned()) };
    }

    if let AccessPolicy::RequiresRole(role) = route.policy {
        if session.role.as_deref() != Some(role) {
            return Decision::Redirect { to: LANDING_PATH.to_owned(), return_to: None };
        }
    }

    match route.target {
        RouteTarget::View(view) => Decision::Allow(view),
        RouteTarget::Redirect(to) => Decision::Redirect { to: to.to_owned(), return_to: None },
    }
}

/// Follow redirects from `start` until a view is allowed.
///
/// # Errors
///
/// Returns [`RedirectLoop`] if the table ever lets a chain exceed
/// [`MAX_REDIRECT_HOPS`].
pub fn resolve_chain(start: &str, session: &SessionSnapshot) -> Result<Resolution, RedirectLoop> {
    let mut location = start.to_owned();
    for hops in 0..=MAX_REDIRECT_HOPS {
        match decide(&location, session) {
            Decision::Allow(view) => return Ok(Resolution { view, location, hops }),
            Decision::Redirect { to, return_to } => location = redirect_location(&to, return_to.as_deref()),
        }
    }
    Err(RedirectLoop { start: start.to_owned() })
}

fn redirect_location(to: &str, return_to: Option<&str>) -> String {
    match return_to {
        Some(target) => format!("{to}?{RETURN_PARAM}={}", encode_return_target(target)),
        None => to.to_owned(),
    }
}

/// Percent-encode a location for use as a query value, keeping `/` readable
/// (`/dashboard` stays `/dashboard`).
pub fn encode_return_target(target: &str) -> String {
    target
        .split('/')
        .map(urlencoding::encode)
        .collect::<Vec<_>>()
        .join("/")
}

/// Turn a raw `redirect` value into a safe local location to resume.
///
/// Only same-origin paths without whitespace or control characters are
/// honored, and never the login route itself; anything else resumes at the
/// landing route.
pub fn return_target_from_query(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return LANDING_PATH.to_owned();
    };
    let decoded = urlencoding::decode(raw).unwrap_or(Cow::Borrowed(raw));
    // Browsers drop tabs and newlines while parsing, so `/\t/host` would
    // turn into a protocol-relative `//host`.
    let local = decoded.starts_with('/')
        && !decoded.starts_with("//")
        && !decoded.contains('\\')
        && !decoded.chars().any(|c| c.is_control() || c.is_whitespace());
    if !local || table::normalize_path(&decoded) == LOGIN_PATH {
        return LANDING_PATH.to_owned();
    }
    decoded.into_owned()
}

/// Raw (still encoded) value of query parameter `name` in `location`.
fn query_param(location: &str, name: &str) -> Option<String> {
    let (_, rest) = location.split_once('?')?;
    let query = rest.split('#').next().unwrap_or_default();
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_owned())
}
