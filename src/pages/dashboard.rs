//! Dashboard page: machine status, steel ball weight and recent alarms.

use leptos::prelude::*;

use crate::app::{Api, Session};
use crate::components::data_panel::DataPanel;
use crate::net::types::MachineStatus;
use crate::pages::{Loaded, failure_text};
use crate::util::i18n::{Lang, translate, translate_status};

pub const MACHINE_STATUS_ENDPOINT: &str = "/api/machine/status";
pub const STEEL_BALL_WEIGHT_ENDPOINT: &str = "/api/steel-ball/weight";
pub const ALARMS_ENDPOINT: &str = "/api/alarms";

#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = expect_context::<Session>();
    let api = expect_context::<Api>();
    let lang = expect_context::<RwSignal<Lang>>();

    let machine = LocalResource::new(move || {
        let api = api.clone();
        async move { Loaded::from(api.get_json::<MachineStatus, _>(&session, MACHINE_STATUS_ENDPOINT).await) }
    });

    view! {
        <div class="dashboard-page">
            <section class="dashboard-page__status">
                <h2>{move || translate(lang.get(), "machineStatus", &[])}</h2>
                <Suspense fallback=move || view! { <p>{translate(lang.get(), "loading", &[])}</p> }>
                    {move || {
                        machine.get().map(|loaded| match loaded {
                            Loaded::Ready(MachineStatus { status, batch_id }) => {
                                let label = translate_status(lang.get(), &status);
                                let batch = batch_id
                                    .map(|id| format!("{}: {id}", translate(lang.get(), "batchInProgress", &[])));
                                view! {
                                    <p class=format!("status status--{status}")>{label}</p>
                                    {batch.map(|text| view! { <p class="dashboard-page__batch">{text}</p> })}
                                }
                                    .into_any()
                            }
                            Loaded::Failed(reason) => {
                                view! { <p class="dashboard-page__error">{failure_text(lang.get(), &reason)}</p> }
                                    .into_any()
                            }
                        })
                    }}
                </Suspense>
            </section>
            <DataPanel title_key="steelBallWeight" endpoint=STEEL_BALL_WEIGHT_ENDPOINT.to_owned()/>
            <DataPanel title_key="alarmHistory" endpoint=ALARMS_ENDPOINT.to_owned()/>
        </div>
    }
}
