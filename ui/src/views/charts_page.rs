use dioxus::prelude::*;

use super::export_panel::ChartsDownload;
use super::SaveIndicator;
use crate::charts::ChartsBoard;
use crate::core::format::missing_fields_message;
use crate::core::store::PlannerState;

/// Time-allocation charts across the three classification axes.
#[component]
pub fn Charts() -> Element {
    let planner = use_context::<Signal<PlannerState>>();
    let state = planner();
    let incomplete = state.incomplete_ids();
    let complete = state.complete_activities();

    rsx! {
        section { class: "page page-charts",
            div { class: "page-heading",
                h1 { "Time allocation" }
                SaveIndicator {}
            }
            p { "How the lesson's minutes spread across processes, interaction types and technology applications." }

            if !incomplete.is_empty() {
                p { class: "validation-warning", {missing_fields_message(&incomplete)} }
            }

            ChartsBoard { activities: complete }
            ChartsDownload {}
        }
    }
}
