//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page is reached only through the guarded outlet, so pages never check
//! the session themselves. Data goes through the API gateway; rendering
//! details live in `components`.


pub mod daily_report;
pub mod dashboard;
pub mod historical_chart;
pub mod login;
pub mod settings;

use crate::net::error::ApiError;
use crate::util::i18n::{Lang, translate};

/// Failure reason recorded when the backend refused the session.
const SESSION_EXPIRED: &str = "session.expired";

/// Outcome of a page data fetch, reduced to what the view renders.
#[derive(Debug, Clone, PartialEq)]
pub enum Loaded<T> {
    Ready(T),
    Failed(String),
}

impl<T> From<Result<T, ApiError>> for Loaded<T> {
    fn from(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(ApiError::SessionExpired) => Self::Failed(SESSION_EXPIRED.to_owned()),
            Err(e) => {
                log::warn!("page data unavailable: {e}");
                Self::Failed(e.to_string())
            }
        }
    }
}

/// User-facing text for a [`Loaded::Failed`] reason.
pub fn failure_text(lang: Lang, reason: &str) -> String {
    if reason == SESSION_EXPIRED {
        return translate(lang, SESSION_EXPIRED, &[]);
    }
    translate(lang, "loadFailed", &[("reason", reason)])
}
