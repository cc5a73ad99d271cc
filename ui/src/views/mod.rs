mod charts_page;
mod export_panel;
mod plan;
mod plan_activities;
mod render_page;

pub use charts_page::Charts;
pub use plan::Plan;
pub use render_page::DesignMapPage;

use dioxus::prelude::*;

use crate::core::storage;
use crate::core::store::PlannerState;

/// Outcome of the most recent snapshot write, surfaced as the save
/// indicator.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SaveStatus {
    #[default]
    Idle,
    Saved,
    Failed(String),
}

/// Installs the planner state and save-status context at the app root.
/// Loads the persisted snapshot, seeding one blank activity when none
/// exists or it cannot be read.
pub fn use_planner_root() {
    use_context_provider(|| {
        let state = match storage::load() {
            Ok(Some(state)) => state,
            Ok(None) => PlannerState::seeded(),
            Err(err) => {
                log::warn!("unable to restore design map snapshot: {err}");
                PlannerState::seeded()
            }
        };
        Signal::new(state)
    });
    use_context_provider(|| Signal::new(SaveStatus::default()));
}

/// Writes the snapshot and updates the save indicator. Failures are logged
/// and non-fatal; the in-memory state stays editable.
pub fn persist(state: &PlannerState, mut status: Signal<SaveStatus>) {
    match storage::save(state) {
        Ok(()) => status.set(SaveStatus::Saved),
        Err(err) => {
            log::warn!("unable to save design map snapshot: {err}");
            status.set(SaveStatus::Failed(err.to_string()));
        }
    }
}

/// Applies a mutation to the store, then persists. Every mutating UI
/// handler funnels through here so no edit can skip the snapshot write.
pub fn edit_planner(
    mut planner: Signal<PlannerState>,
    status: Signal<SaveStatus>,
    mutate: impl FnOnce(&mut PlannerState),
) {
    planner.with_mut(mutate);
    persist(&planner.peek(), status);
}

/// The save indicator rendered beside page titles.
#[component]
pub fn SaveIndicator() -> Element {
    let status = use_context::<Signal<SaveStatus>>();
    match status() {
        SaveStatus::Idle => rsx! {
            span { class: "save-indicator", "" }
        },
        SaveStatus::Saved => rsx! {
            span { class: "save-indicator save-indicator--ok", "Saved locally" }
        },
        SaveStatus::Failed(err) => rsx! {
            span { class: "save-indicator save-indicator--error", "Not saved: {err}" }
        },
    }
}
