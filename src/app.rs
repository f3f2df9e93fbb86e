//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    WildcardSegment,
    components::{Route, Router, Routes},
};

use crate::components::{guarded_outlet::GuardedOutlet, nav_bar::NavBar};
use crate::config::ClientConfig;
use crate::net::api::ApiClient;
use crate::net::http::BrowserTransport;
use crate::state::session::SessionStore;
use crate::util::i18n::{Lang, translate};
use crate::util::storage::LocalStorage;

/// The app-wide session, provided via context.
pub type Session = RwSignal<SessionStore<LocalStorage>>;

/// The app-wide API gateway, provided via context.
pub type Api = ApiClient<BrowserTransport>;

/// Root application component.
///
/// Restores the persisted session, provides it with the gateway and language
/// as contexts, and routes every location through the guarded outlet.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session: Session = RwSignal::new(SessionStore::restore(LocalStorage));
    let lang = RwSignal::new(Lang::load(&LocalStorage));
    let api: Api = ApiClient::new(ClientConfig::from_build_env(), BrowserTransport);
    log::info!("backend at {:?}, logged in: {}", api.config().api_base, session.with_untracked(SessionStore::is_logged_in));

    provide_context(session);
    provide_context(lang);
    provide_context(api);

    view! {
        <Title text=move || translate(lang.get(), "appTitle", &[])/>

        <Router>
            <NavBar/>
            <main class="app-main">
                // The route table lives in `nav::table`; the router only hands
                // every location to the guard.
                <Routes fallback=|| view! { <GuardedOutlet/> }>
                    <Route path=WildcardSegment("any") view=GuardedOutlet/>
                </Routes>
            </main>
        </Router>
    }
}
