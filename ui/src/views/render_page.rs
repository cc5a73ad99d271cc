use dioxus::prelude::*;

use super::export_panel::ExportPanel;
use super::SaveIndicator;
use crate::core::format::missing_fields_message;
use crate::core::store::PlannerState;
use crate::map::DesignMap;

/// The rendered design map page. Rendering is blocked, with the ids named,
/// until at least one activity is complete; incomplete activities stay
/// flagged even once the map renders.
#[component]
pub fn DesignMapPage() -> Element {
    let planner = use_context::<Signal<PlannerState>>();
    let state = planner();
    let incomplete = state.incomplete_ids();
    let has_complete = !state.complete_activities().is_empty();

    rsx! {
        section { class: "page page-map",
            div { class: "page-heading",
                h1 { "Design map" }
                SaveIndicator {}
            }

            if !incomplete.is_empty() {
                p { class: "validation-warning", {missing_fields_message(&incomplete)} }
            }

            if has_complete {
                DesignMap {}
                ExportPanel {}
            } else {
                div { class: "validation-block",
                    p { "There is nothing to map yet." }
                    p {
                        "Each activity needs an interaction type, an active learning process and activity details before it appears here."
                    }
                }
            }
        }
    }
}
