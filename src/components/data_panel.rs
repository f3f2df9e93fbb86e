//! Generic panel that loads a JSON document through the API gateway.
//!
//! Dashboard data shapes are owned by the backend; views only need to show
//! what came back, or why nothing did.

use leptos::prelude::*;

use crate::app::{Api, Session};
use crate::pages::{Loaded, failure_text};
use crate::util::i18n::{Lang, translate};

#[component]
pub fn DataPanel(title_key: &'static str, #[prop(into)] endpoint: Signal<String>) -> impl IntoView {
    let session = expect_context::<Session>();
    let api = expect_context::<Api>();
    let lang = expect_context::<RwSignal<Lang>>();

    // Refetches whenever `endpoint` changes; a superseded fetch is dropped.
    let data = LocalResource::new(move || {
        let api = api.clone();
        let path = endpoint.get();
        async move { Loaded::from(api.get_json::<serde_json::Value, _>(&session, &path).await) }
    });

    view! {
        <section class="data-panel">
            <h2>{move || translate(lang.get(), title_key, &[])}</h2>
            <Suspense fallback=move || view! { <p class="data-panel__loading">{translate(lang.get(), "loading", &[])}</p> }>
                {move || {
                    data.get()
                        .map(|loaded| match loaded {
                            Loaded::Ready(value) => {
                                let pretty = serde_json::to_string_pretty(&value).unwrap_or_default();
                                view! { <pre class="data-panel__body">{pretty}</pre> }.into_any()
                            }
                            Loaded::Failed(reason) => {
                                view! { <p class="data-panel__error">{failure_text(lang.get(), &reason)}</p> }.into_any()
                            }
                        })
                }}
            </Suspense>
        </section>
    }
}
