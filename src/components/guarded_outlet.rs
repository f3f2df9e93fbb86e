//! Router outlet that runs the navigation guard before rendering a view.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every location is routed here. The outlet resolves it through the route
//! table, asks the guard for a decision, and renders either the allowed view
//! or a `<Redirect>`. Decisions are memoized, so the view is rebuilt only when
//! the outcome changes, not on every session or query tweak.

#[cfg(test)]
#[path = "guarded_outlet_test.rs"]
mod guarded_outlet_test;

use leptos::prelude::*;
use leptos_router::components::Redirect;
use leptos_router::hooks::use_location;
use log::debug;

use crate::app::Session;
use crate::nav::guard::{self, Decision, SessionSnapshot};
use crate::nav::table::{LANDING_PATH, View};
use crate::pages::{
    daily_report::DailyReportPage, dashboard::DashboardPage, historical_chart::HistoricalChartPage,
    login::LoginPage, settings::SettingsPage,
};

#[component]
pub fn GuardedOutlet() -> impl IntoView {
    let session = expect_context::<Session>();
    let location = use_location();

    let snapshot = Memo::new(move |_| session.with(SessionSnapshot::of));
    let decision = Memo::new(move |_| {
        let requested = requested_location(&location.pathname.get(), &location.search.get());
        let decision = guard::decide(&requested, &snapshot.get());
        debug!("navigation to {requested}: {decision:?}");
        decision
    });

    move || match decision.get() {
        Decision::Allow(screen) => render(screen),
        redirect @ Decision::Redirect { .. } => {
            let path = redirect.location().unwrap_or_else(|| LANDING_PATH.to_owned());
            view! { <Redirect path=path/> }.into_any()
        }
    }
}

/// Path plus query as the guard sees it.
fn requested_location(pathname: &str, search: &str) -> String {
    let search = search.trim_start_matches('?');
    if search.is_empty() { pathname.to_owned() } else { format!("{pathname}?{search}") }
}

fn render(screen: View) -> AnyView {
    match screen {
        View::Login => view! { <LoginPage/> }.into_any(),
        View::Dashboard => view! { <DashboardPage/> }.into_any(),
        View::DailyReport => view! { <DailyReportPage/> }.into_any(),
        View::HistoricalChart => view! { <HistoricalChartPage/> }.into_any(),
        View::Settings => view! { <SettingsPage/> }.into_any(),
    }
}
