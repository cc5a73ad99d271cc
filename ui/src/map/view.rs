use std::rc::Rc;

use dioxus::prelude::*;

use super::arrows::{connectors, svg_path};
use super::layout::{band_for_offset, MapLayout, DRAG_THRESHOLD_PX};
use crate::core::format::split_label;
use crate::core::lexicon::{Coded, Interaction, KeyApplication, Strategy, TechIntegration};
use crate::core::store::{ActivityField, PlannerState};
use crate::views::{edit_planner, SaveStatus};

/// A pointer press on an activity box; resolved into a click (inline
/// editor) or a drag (row reassignment) on release.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DragGesture {
    id: u32,
    start_x: f64,
    start_y: f64,
}

/// The rendered design map: metadata header, 4-row grid, connector overlay,
/// legend, and the two pointer interactions.
#[component]
pub fn DesignMap() -> Element {
    let planner = use_context::<Signal<PlannerState>>();
    let save_status = use_context::<Signal<SaveStatus>>();
    let mut drag = use_signal(|| Option::<DragGesture>::None);
    let mut editor_id = use_signal(|| Option::<u32>::None);
    let mut grid_el = use_signal(|| Option::<Rc<MountedData>>::None);

    let state = planner();
    let complete = state.complete_activities();
    let layout = MapLayout::compute(&complete, &state.meta);
    let routed = connectors(&layout);
    let columns = layout.columns().max(1);
    let grid_w = layout.grid_width();
    let grid_h = layout.grid_height();

    let on_grid_mouseup = move |evt: Event<MouseData>| {
        let Some(gesture) = drag() else {
            return;
        };
        drag.set(None);

        let point = evt.client_coordinates();
        let dx = point.x - gesture.start_x;
        let dy = point.y - gesture.start_y;
        if (dx * dx + dy * dy).sqrt() < DRAG_THRESHOLD_PX {
            editor_id.set(Some(gesture.id));
            return;
        }

        let Some(grid) = grid_el() else {
            return;
        };
        // Geometry is only measurable after layout has committed, so the
        // band lookup runs as a scheduled continuation against the mounted
        // grid element.
        spawn(async move {
            if let Ok(rect) = grid.get_client_rect().await {
                let offset_y = point.y - rect.origin.y;
                let band = band_for_offset(offset_y, rect.size.height);
                edit_planner(planner, save_status, |s| {
                    s.update(gesture.id, ActivityField::Interaction, band.code());
                });
            }
        });
    };

    rsx! {
        div { class: "design-map-wrapper print-root",
            MapHeader { layout: layout.clone() }

            div { class: "design-map-frame",
                div { class: "axis-label y-axis", "Social Plane" }
                div { class: "axis-label x-axis", "Time -\u{3e}" }

                div { class: "design-map",
                    div { class: "social-labels",
                        for interaction in Interaction::ALL.iter() {
                            div { key: "{interaction.code()}", class: "social-label",
                                span { class: "social-label__name", "{interaction.short_label()}" }
                                span { class: "social-label__gloss", "{interaction.gloss()}" }
                            }
                        }
                    }

                    div {
                        class: "activities-grid",
                        style: "--activity-count: {columns};",
                        onmounted: move |evt| grid_el.set(Some(evt.data())),
                        onmouseup: on_grid_mouseup,

                        for placement in layout.placements.iter() {
                            {
                                let activity = placement.activity.clone();
                                let id = activity.id;
                                let strategy_code =
                                    activity.strategy.map(Coded::code).unwrap_or("");
                                let row = placement.row + 1;
                                let column = placement.column + 1;
                                let title = if activity.minutes.trim().is_empty() {
                                    format!("Activity {id}")
                                } else {
                                    format!("Activity {id} ({} min)", activity.minutes.trim())
                                };
                                let tag = activity.key_app.map(|k| split_label(k.label()));
                                rsx! {
                                    div {
                                        key: "{id}",
                                        class: "activity-slot",
                                        style: "grid-row: {row}; grid-column: {column};",
                                        div {
                                            class: "activity-box {strategy_code}",
                                            onmousedown: move |evt: Event<MouseData>| {
                                                evt.prevent_default();
                                                let point = evt.client_coordinates();
                                                drag.set(Some(DragGesture {
                                                    id,
                                                    start_x: point.x,
                                                    start_y: point.y,
                                                }));
                                            },
                                            div { class: "activity-time-inline", "{title}" }
                                            if let Some((first, second)) = tag {
                                                div { class: "activity-alp-tag",
                                                    span { class: "alp-text", "{first}" }
                                                    if let Some(second) = second {
                                                        span { class: "alp-text", "{second}" }
                                                    }
                                                }
                                            }
                                            div { class: "activity-details", "{activity.details}" }
                                            if !activity.tool.trim().is_empty() {
                                                div { class: "activity-tech", "[Tool]: {activity.tool}" }
                                            }
                                        }
                                    }
                                }
                            }
                        }

                        if !routed.is_empty() {
                            svg {
                                class: "activity-arrows",
                                view_box: "0 0 {grid_w} {grid_h}",
                                preserve_aspect_ratio: "none",
                                defs {
                                    marker {
                                        id: "arrowhead",
                                        marker_units: "userSpaceOnUse",
                                        marker_width: "10",
                                        marker_height: "8",
                                        ref_x: "9",
                                        ref_y: "4",
                                        orient: "auto",
                                        polygon { points: "0 0, 10 4, 0 8", fill: "#333" }
                                    }
                                }
                                for connector in routed.iter() {
                                    path {
                                        key: "{connector.from_id}-{connector.to_id}",
                                        d: svg_path(&connector.points),
                                        stroke: "#111",
                                        stroke_width: "2.5",
                                        stroke_linecap: "round",
                                        stroke_linejoin: "round",
                                        fill: "none",
                                        marker_end: "url(#arrowhead)",
                                    }
                                }
                            }
                        }
                    }
                }
            }

            MapLegend {}

            if let Some(id) = editor_id() {
                InlineEditor { id, on_close: move |_| editor_id.set(None) }
            }
        }
    }
}

/// Map header: topic, level/duration line with the mismatch flag, and the
/// optional metadata rows.
#[component]
fn MapHeader(layout: MapLayout) -> Element {
    let planner = use_context::<Signal<PlannerState>>();
    let meta = planner().meta;
    let duration_class = if layout.duration_mismatch {
        "duration-mismatch"
    } else {
        ""
    };

    rsx! {
        div { class: "map-header",
            h3 { class: "map-header__topic", "{meta.display_topic()}" }
            p { class: "map-header__line",
                if !meta.level.trim().is_empty() {
                    strong { "Level: " }
                    "{meta.level} | "
                }
                span { class: "{duration_class}", "Duration: {meta.duration} minutes" }
                if layout.duration_mismatch {
                    span { class: "duration-warning", "; Activities total: {layout.total_minutes} mins" }
                }
            }
            div { class: "map-header__details",
                if !meta.student_profile.trim().is_empty() {
                    div { strong { "Student profile: " } "{meta.student_profile}" }
                }
                if !meta.learning_outcomes.trim().is_empty() {
                    div { strong { "Learning outcomes: " } "{meta.learning_outcomes}" }
                }
                if !meta.prerequisite_knowledge.trim().is_empty() {
                    div { strong { "Prerequisite knowledge: " } "{meta.prerequisite_knowledge}" }
                }
                if meta.tech_integration != TechIntegration::Optional {
                    div {
                        strong { "Level of technology integration: " }
                        "{meta.tech_integration.label()}"
                    }
                }
                if !meta.learning_issues.trim().is_empty() {
                    div { strong { "Learning issue to be addressed: " } "{meta.learning_issues}" }
                }
            }
        }
    }
}

#[component]
fn MapLegend() -> Element {
    rsx! {
        div { class: "legend-table",
            div { class: "legend-header", span { "Legend" } }
            for strategy in Strategy::ALL.iter() {
                div { key: "{strategy.code()}", class: "legend-row",
                    div { class: "legend-color-box", style: "background: {strategy.color()};" }
                    div { class: "legend-text", "{strategy.label()}" }
                }
            }
        }
    }
}

/// Click-to-edit panel bound to one activity. Edits flow straight back into
/// the store; insert/delete renumber, so both close the editor.
#[component]
fn InlineEditor(id: u32, on_close: EventHandler<()>) -> Element {
    let planner = use_context::<Signal<PlannerState>>();
    let save_status = use_context::<Signal<SaveStatus>>();

    let state = planner();
    let Some(activity) = state.list().iter().find(|a| a.id == id).cloned() else {
        return rsx! {
            div { class: "inline-editor inline-editor--missing",
                p { "That activity is gone." }
                button { r#type: "button", class: "btn", onclick: move |_| on_close.call(()), "Close" }
            }
        };
    };

    let interaction_value = activity.interaction.map(Coded::code).unwrap_or("");
    let strategy_value = activity.strategy.map(Coded::code).unwrap_or("");
    let key_app_value = activity.key_app.map(Coded::code).unwrap_or("");

    let field_handler = move |field: ActivityField| {
        move |evt: Event<FormData>| {
            edit_planner(planner, save_status, |s| {
                s.update(id, field, &evt.value());
            });
        }
    };

    rsx! {
        div { class: "inline-editor",
            div { class: "inline-editor__header",
                h4 { "Edit activity {id}" }
                button { r#type: "button", class: "btn btn-ghost", onclick: move |_| on_close.call(()), "Close" }
            }
            div { class: "inline-editor__fields",
                label { "Interaction type"
                    select {
                        value: "{interaction_value}",
                        oninput: field_handler(ActivityField::Interaction),
                        option { value: "", "Select type" }
                        for variant in Interaction::ALL.iter() {
                            option { key: "{variant.code()}", value: "{variant.code()}", "{variant.label()}" }
                        }
                    }
                }
                label { "Active learning process"
                    select {
                        value: "{strategy_value}",
                        oninput: field_handler(ActivityField::Strategy),
                        option { value: "", "Select process" }
                        for variant in Strategy::ALL.iter() {
                            option { key: "{variant.code()}", value: "{variant.code()}", "{variant.label()}" }
                        }
                    }
                }
                label { "Key application of technology"
                    select {
                        value: "{key_app_value}",
                        oninput: field_handler(ActivityField::KeyApp),
                        option { value: "", "Select category" }
                        for variant in KeyApplication::ALL.iter() {
                            option { key: "{variant.code()}", value: "{variant.code()}", "{variant.label()}" }
                        }
                    }
                }
                label { "Time (mins)"
                    input {
                        r#type: "number",
                        min: "0",
                        value: "{activity.minutes}",
                        oninput: field_handler(ActivityField::Minutes),
                    }
                }
                label { "Activity details"
                    textarea {
                        maxlength: "115",
                        value: "{activity.details}",
                        oninput: field_handler(ActivityField::Details),
                    }
                }
                label { "Tech tool"
                    input {
                        maxlength: "25",
                        value: "{activity.tool}",
                        oninput: field_handler(ActivityField::Tool),
                    }
                }
            }
            div { class: "inline-editor__actions",
                button {
                    r#type: "button",
                    class: "btn",
                    onclick: move |_| {
                        edit_planner(planner, save_status, |s| {
                            s.insert_after(id);
                        });
                        on_close.call(());
                    },
                    "Insert activity after"
                }
                button {
                    r#type: "button",
                    class: "btn btn-inline-delete",
                    onclick: move |_| {
                        edit_planner(planner, save_status, |s| s.delete(id));
                        on_close.call(());
                    },
                    "Delete activity"
                }
            }
        }
    }
}
