//! Settings page (admin only): steel ball types and alarm thresholds.

use leptos::prelude::*;

use crate::components::data_panel::DataPanel;

#[component]
pub fn SettingsPage() -> impl IntoView {
    view! {
        <div class="settings-page">
            <DataPanel title_key="generalSettings.steelTypeTitle" endpoint="/api/settings/steel-types".to_owned()/>
            <DataPanel title_key="generalSettings.alarmTitle" endpoint="/api/settings/alarms".to_owned()/>
        </div>
    }
}
