//! Historical chart page with a daily / monthly / yearly report selector.

#[cfg(test)]
#[path = "historical_chart_test.rs"]
mod historical_chart_test;

use leptos::prelude::*;

use crate::components::data_panel::DataPanel;
use crate::util::i18n::{Lang, translate};

pub const HISTORICAL_ENDPOINT: &str = "/api/reports/historical";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportType {
    #[default]
    Daily,
    Monthly,
    Yearly,
}

impl ReportType {
    pub const ALL: [Self; 3] = [Self::Daily, Self::Monthly, Self::Yearly];

    pub fn code(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    pub fn label_key(self) -> &'static str {
        match self {
            Self::Daily => "historical.reportType.daily",
            Self::Monthly => "historical.reportType.monthly",
            Self::Yearly => "historical.reportType.yearly",
        }
    }
}

/// Backend path for the series of `report`.
pub fn historical_endpoint(report: ReportType) -> String {
    format!("{HISTORICAL_ENDPOINT}?type={}", report.code())
}

#[component]
pub fn HistoricalChartPage() -> impl IntoView {
    let lang = expect_context::<RwSignal<Lang>>();
    let report = RwSignal::new(ReportType::default());
    let endpoint = Signal::derive(move || historical_endpoint(report.get()));

    let on_change = move |ev: leptos::ev::Event| {
        if let Some(kind) = ReportType::from_code(&event_target_value(&ev)) {
            report.set(kind);
        }
    };

    view! {
        <div class="historical-page">
            <label class="historical-page__type">
                {move || translate(lang.get(), "historicalReportTypeLabel", &[])}
                <select on:change=on_change prop:value=move || report.get().code()>
                    {ReportType::ALL
                        .into_iter()
                        .map(|kind| {
                            view! {
                                <option value=kind.code()>
                                    {move || translate(lang.get(), kind.label_key(), &[])}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </label>
            <DataPanel title_key="nav.historicalChart" endpoint=endpoint/>
        </div>
    }
}
