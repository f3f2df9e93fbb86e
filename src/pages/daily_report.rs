//! Daily report page: totals, per-shift and per-batch summaries.

use leptos::prelude::*;

use crate::components::data_panel::DataPanel;

#[component]
pub fn DailyReportPage() -> impl IntoView {
    view! {
        <div class="report-page">
            <DataPanel title_key="dailyReport.dailyTotal" endpoint="/api/reports/daily".to_owned()/>
            <DataPanel title_key="dailyReport.shiftReport" endpoint="/api/reports/shift".to_owned()/>
            <DataPanel title_key="dailyReport.batchSummary" endpoint="/api/reports/batches".to_owned()/>
        </div>
    }
}
