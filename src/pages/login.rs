//! Login page: username + password exchanged for a session.
//!
//! On success the page only updates the session. The guarded outlet then
//! sees a logged-in user on the login route and resumes the pending
//! `redirect` target, so the page never navigates by itself.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;

use crate::app::{Api, Session};
use crate::net::error::AuthError;
use crate::state::session::SessionStore;
use crate::util::i18n::{Lang, translate};

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<Session>();
    let api = expect_context::<Api>();
    let lang = expect_context::<RwSignal<Lang>>();

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let message = RwSignal::new(None::<String>);
    let busy = Memo::new(move |_| session.with(SessionStore::login_pending));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let lang_now = lang.get_untracked();
        if busy.get_untracked() {
            message.set(Some(translate(lang_now, "login.inFlight", &[])));
            return;
        }
        let (user, pass) = match validate_login_input(&username.get_untracked(), &password.get_untracked()) {
            Ok(fields) => fields,
            Err(key) => {
                message.set(Some(translate(lang_now, key, &[])));
                return;
            }
        };
        message.set(None);

        #[cfg(feature = "csr")]
        {
            let api = api.clone();
            leptos::task::spawn_local(async move {
                if let Err(e) = crate::state::session::login_reactive(session, &api, &user, &pass).await {
                    log::warn!("login failed: {e}");
                    password.set(String::new());
                    message.set(Some(login_error_message(lang.get_untracked(), &e)));
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (&api, user, pass);
        }
    };

    let t = move |key: &'static str| move || translate(lang.get(), key, &[]);

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>{t("appTitle")}</h1>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        autocomplete="username"
                        placeholder=t("login.username")
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        autocomplete="current-password"
                        placeholder=t("login.password")
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || {
                            let key = if busy.get() { "login.submitting" } else { "login.submit" };
                            translate(lang.get(), key, &[])
                        }}
                    </button>
                </form>
                <Show when=move || message.with(Option::is_some)>
                    <p class="login-message">{move || message.get().unwrap_or_default()}</p>
                </Show>
            </div>
        </div>
    }
}

/// Trim the username and require both fields; `Err` carries a translation key.
fn validate_login_input(username: &str, password: &str) -> Result<(String, String), &'static str> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err("login.missingFields");
    }
    Ok((username.to_owned(), password.to_owned()))
}

/// Message shown under the form after a failed exchange.
fn login_error_message(lang: Lang, err: &AuthError) -> String {
    match err {
        AuthError::Rejected { .. } => translate(lang, "login.rejected", &[]),
        AuthError::LoginInFlight => translate(lang, "login.inFlight", &[]),
        AuthError::Network(_) | AuthError::MalformedResponse(_) => {
            translate(lang, "login.failed", &[("reason", err.to_string().as_str())])
        }
    }
}
