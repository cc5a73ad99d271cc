use dioxus::prelude::*;

use super::model::ChartModel;
use crate::charts::{interaction_chart, key_app_chart, strategy_chart};
use crate::core::store::Activity;

/// One proportional chart: a conic-gradient disc with positioned labels and
/// a value legend.
#[component]
pub fn ChartCard(model: ChartModel) -> Element {
    let gradient = model.conic_gradient();
    let total = model.total_minutes;

    rsx! {
        section { class: "chart-card",
            h3 { class: "chart-card__title", "{model.title}" }
            div { class: "chart-card__pie-wrap",
                div {
                    class: "pie-chart",
                    style: "background: {gradient};",
                    for slice in model.slices.iter().filter(|s| s.label_visible()) {
                        {
                            let (x, y) = slice.label_anchor();
                            let percent = slice.percent(total);
                            rsx! {
                                span {
                                    key: "{slice.key}",
                                    class: "pie-label",
                                    style: "left: {x}%; top: {y}%;",
                                    span { class: "pie-value", "{slice.minutes}" }
                                    span { class: "pie-percent", "{percent}%" }
                                }
                            }
                        }
                    }
                }
            }
            if total == 0 {
                p { class: "chart-card__placeholder", "No timed activities yet." }
            }
            ul { class: "chart-legend",
                for slice in model.slices.iter() {
                    li { key: "{slice.key}", class: "chart-legend-item",
                        span {
                            class: "chart-legend-swatch",
                            style: "background: {slice.color};",
                        }
                        span { class: "chart-legend-label", "{slice.label}" }
                        span { class: "chart-legend-value", "{slice.minutes} min" }
                    }
                }
            }
        }
    }
}

/// The three classification axes side by side.
#[component]
pub fn ChartsBoard(activities: Vec<Activity>) -> Element {
    let strategy = strategy_chart(&activities);
    let interaction = interaction_chart(&activities);
    let key_app = key_app_chart(&activities);

    rsx! {
        div { class: "charts-board",
            ChartCard { model: strategy }
            ChartCard { model: interaction }
            ChartCard { model: key_app }
        }
    }
}
