//! Top bar: view links, signed-in user, logout and language toggle.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::app::Session;
use crate::nav::table::{ADMIN_ROLE, View};
use crate::net::types::Identity;
use crate::state::session::SessionStore;
use crate::util::i18n::{Lang, translate};
use crate::util::storage::LocalStorage;

#[component]
pub fn NavBar() -> impl IntoView {
    let session = expect_context::<Session>();
    let lang = expect_context::<RwSignal<Lang>>();

    let logged_in = Memo::new(move |_| session.with(SessionStore::is_logged_in));
    let is_admin = Memo::new(move |_| session.with(|s| s.has_role(ADMIN_ROLE)));
    let t = move |key: &'static str| move || translate(lang.get(), key, &[]);
    let signed_in_as = move || {
        let name = session.with(|s| s.identity().map(Identity::display_name).unwrap_or_default());
        translate(lang.get(), "nav.signedInAs", &[("name", name.as_str())])
    };

    // Logging out flips the guard's decision; the outlet redirects to login.
    let on_logout = move |_| session.update(SessionStore::logout);
    let on_toggle_lang = move |_| {
        lang.update(|current| {
            *current = current.toggled();
            current.save(&LocalStorage);
        });
    };

    view! {
        <header class="nav-bar">
            <span class="nav-bar__title">{t("appTitle")}</span>
            <Show when=move || logged_in.get()>
                <nav class="nav-bar__links">
                    <A href=View::Dashboard.path()>{t(View::Dashboard.title_key())}</A>
                    <A href=View::DailyReport.path()>{t(View::DailyReport.title_key())}</A>
                    <A href=View::HistoricalChart.path()>{t(View::HistoricalChart.title_key())}</A>
                    <Show when=move || is_admin.get()>
                        <A href=View::Settings.path()>{t(View::Settings.title_key())}</A>
                    </Show>
                </nav>
                <span class="nav-bar__user">{signed_in_as}</span>
                <button class="nav-bar__logout" on:click=on_logout>
                    {t("nav.logout")}
                </button>
            </Show>
            <button class="nav-bar__lang" on:click=on_toggle_lang>
                {t("nav.language")}
            </button>
        </header>
    }
}
